use anyhow::Result;
use aurora_tools::cli::Commands;
use aurora_tools::*;
use colored::Colorize;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::time::Instant;

fn main() {
    std::process::exit(parse_cli());
}

pub fn parse_cli() -> i32 {
    let pg_start = Instant::now();
    let args = cli::make_cli_parse();
    let matches = cli::make_cli_app().get_matches();
    let subcommand = matches.subcommand_name().unwrap();

    // set the logging level
    let min_log_level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .target(Target::Stderr)
        .filter(None, min_log_level)
        .init();

    log::debug!("DEBUG logging enabled");
    log::trace!("TRACE logging enabled");

    match run_command(&args) {
        Ok(()) => {
            let duration = pg_start.elapsed();
            log::info!(
                "{} done! Time elapsed: {}",
                subcommand.bright_green().bold(),
                format!("{:.2?}", duration).bright_yellow().bold()
            );
            0
        }
        Err(error) => {
            eprintln!("{}: {:#}", "ERROR".bright_red().bold(), error);
            2
        }
    }
}

fn run_command(args: &cli::Cli) -> Result<()> {
    match &args.command {
        //
        // Run RolePct
        //
        Some(Commands::RolePct { path, prefix }) => report::run_role_pct(path, prefix),
        //
        // Run ColumnCount
        //
        Some(Commands::ColumnCount {
            col,
            path,
            min,
            max,
        }) => column::run_column_count(*col, path, *min, *max),
        //
        // Run ColumnSplit
        //
        Some(Commands::ColumnSplit {
            col,
            in_file,
            base_file,
            spill_file,
        }) => column::run_column_split(*col, in_file, base_file, spill_file),
        //
        // Run UniqueCounts
        //
        Some(Commands::UniqueCounts { path }) => column::run_unique_counts(path),
        //
        // Run DupMark
        //
        Some(Commands::DupMark { in_file }) => dedup::run_dup_mark(in_file),
        //
        // Run DupClean
        //
        Some(Commands::DupClean { in_file, out_file }) => {
            dedup::run_dup_clean(in_file, out_file)
        }
        //
        // Run Combine
        //
        Some(Commands::Combine { output, inputs }) => {
            combine::run_combine(output.as_deref(), inputs)
        }
        //
        // Run DirExtract
        //
        Some(Commands::DirExtract {
            in_dir,
            sra_map,
            out_file,
        }) => extract::run_dir_extract(in_dir, sra_map, out_file),
        //
        // Run TypeCount
        //
        Some(Commands::TypeCount { paths }) => jsondump::run_type_count(paths),
        //
        // Run ResponseClean
        //
        Some(Commands::ResponseClean { out_path, paths }) => {
            jsondump::run_response_clean(out_path, paths)
        }
        //
        // Run LogCalc
        //
        Some(Commands::LogCalc { path }) => logcalc::run_log_calc(path),
        //
        // Run FixFamilyDefs
        //
        Some(Commands::FixFamilyDefs {
            genus,
            in_file,
            out_file,
        }) => family::run_fix_family_defs(genus, in_file, out_file),
        //
        // no command opt
        //
        None => Ok(()),
    }
}
