use clap::IntoApp;
use clap::{AppSettings, Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about,
    propagate_version = true,
    subcommand_required = true,
    infer_subcommands = true,
    arg_required_else_help = true,
    help_expected = true
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
pub struct Cli {
    /// Logging level [-v: Info, -vv: Debug, -vvv: Trace].
    #[clap(short, long, parse(from_occurrences), help_heading = "DEBUG")]
    pub verbose: usize,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

///
/// This structure contains all the subcommands for aurora-tools and their help descriptions.
///
/// Because of naming conventions for rust enums the command names have
/// different capitalization than on the command line.
/// For example, the `RolePct` enum is invoked using `aurora role-pct`
/// and the `DupMark` command with `aurora dup-mark`.
///
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Consolidate an SRA test roles report into a bad-hit percentage report.
    ///
    /// The input is `<PATH>/<PREFIX>.roles.tbl`, a tab-delimited report in which
    /// each sample has two data lines, one for good hits and one for bad hits,
    /// distinguished by the type column. The two lines are converted to a single
    /// line in `<PATH>/<PREFIX>.rolePct.tbl` containing the fraction of hits that
    /// were bad in each category column.
    ///
    /// ## ratio computed per category column:
    ///  `bad / (bad + good)`, or exactly `0.0` when there are no bad hits
    #[clap(visible_aliases = &["rp", "rolepct"])]
    RolePct {
        /// Path to the folder with the source report files.
        path: String,
        /// File prefix identifying the report cluster.
        prefix: String,
    },
    /// Count the occurrences of each value in one column of a tab-delimited file.
    ///
    /// The first line of the file is treated as a header and skipped. Blank
    /// values are not counted. Output is `value<TAB>count` on the standard
    /// output, one line per distinct value in first-seen order.
    #[clap(visible_aliases = &["cc"])]
    ColumnCount {
        /// Column index (1-based) to count.
        col: usize,
        /// Path to the input file.
        path: String,
        /// Only print values occurring at least this many times.
        #[clap(short, long, default_value_t = 0)]
        min: u64,
        /// Only print values occurring at most this many times (0 = no limit).
        #[clap(short = 'x', long, default_value_t = 0)]
        max: u64,
    },
    /// Split a tab-delimited file on first occurrence of a column value.
    ///
    /// The header line is echoed to both outputs. A data line whose key column
    /// value has not been seen before goes to the base file; repeats go to the
    /// spill file. Lines with a blank key value are dropped.
    #[clap(visible_aliases = &["cs"])]
    ColumnSplit {
        /// Column index (1-based) to split on.
        col: usize,
        /// Path to the input file.
        in_file: String,
        /// Path to the base output file (first occurrences).
        base_file: String,
        /// Path to the spill output file (repeats).
        spill_file: String,
    },
    /// Count the distinct values in every column of a tab-delimited file.
    ///
    /// The first line of the file supplies the column names. A summary line
    /// `column: N unique values` is printed for each column in header order.
    #[clap(visible_aliases = &["uc"])]
    UniqueCounts {
        /// Path to the input file.
        path: String,
    },
    /// Flag rows whose final column repeats the previous row's value.
    ///
    /// Appends a `dup` column to a tab-delimited file: a row whose last field
    /// (an MD5 checksum in the original reports) equals the last field of the
    /// preceding row is flagged `Y`. Output goes to the standard output and the
    /// duplicate count is reported on the standard error.
    #[clap(visible_aliases = &["dm", "md5-check"])]
    DupMark {
        /// Path to the input file.
        in_file: String,
    },
    /// Remove rows flagged as duplicates by dup-mark.
    ///
    /// Copies the input file, dropping every line whose final tab-delimited
    /// field is `Y`.
    #[clap(visible_aliases = &["dc"])]
    DupClean {
        /// Path to the input file.
        in_file: String,
        /// Path to the output file.
        out_file: String,
    },
    /// Concatenate text files (and directory trees of text files) into one.
    ///
    /// Directories are walked recursively and every regular file found is
    /// appended. By default the result goes to the standard output.
    Combine {
        /// Output file name [default: stdout].
        #[clap(short, long)]
        output: Option<String>,
        /// Input files or directories to combine.
        #[clap(required = true)]
        inputs: Vec<String>,
    },
    /// Filter an SRA map table to the samples present in a directory.
    ///
    /// Keeps the header plus every data line whose third column names an entry
    /// of the sample directory.
    #[clap(visible_aliases = &["de"])]
    DirExtract {
        /// Directory whose entries name the samples to keep.
        in_dir: String,
        /// Path to the SRA map table.
        sra_map: String,
        /// Path to the output file.
        out_file: String,
    },
    /// Tally feature types across genome feature dump directories.
    ///
    /// For each subdirectory of each input path, reads the
    /// `genome_feature.json` dump (a JSON array of feature objects) and counts
    /// the `feature_type` values. Prints an aligned type/count table.
    #[clap(visible_aliases = &["tc"])]
    TypeCount {
        /// Directories whose subdirectories hold genome feature dumps.
        #[clap(required = true)]
        paths: Vec<String>,
    },
    /// Normalize SOLR response dumps to bare JSON arrays.
    ///
    /// Copies the `.json` files found in the subdirectories of each input path
    /// into a mirror tree under the output path. SOLR response wrappers are
    /// unwrapped to their `response.docs` array, single objects are boxed into
    /// one-element arrays, and empty files or scalars become `[]`.
    #[clap(visible_aliases = &["rc"])]
    ResponseClean {
        /// Directory to receive the cleaned dumps.
        out_path: String,
        /// Directories whose subdirectories hold raw response dumps.
        #[clap(required = true)]
        paths: Vec<String>,
    },
    /// Total the generated-token counts recorded in numbered aurora logs.
    ///
    /// Scans `aurora1.log`, `aurora2.log`, ... in the given directory until a
    /// number is missing. The last token-progress line in each log supplies
    /// that log's count; per-file and grand totals are printed.
    #[clap(visible_aliases = &["lc"])]
    LogCalc {
        /// Directory containing the numbered log files.
        path: String,
    },
    /// Rewrite a protein family definition table with full PLF identifiers.
    ///
    /// Each input line holds a family index and a name; the output gets a
    /// `family_id<TAB>name` header and ids of the form
    /// `PLF_<GENUS>_<zero-padded index>`.
    #[clap(visible_aliases = &["ffd"])]
    FixFamilyDefs {
        /// Genus code to embed in the family ids.
        genus: String,
        /// Path to the input definition table.
        in_file: String,
        /// Path to the output file.
        out_file: String,
    },
}

pub fn make_cli_parse() -> Cli {
    Cli::parse()
}

pub fn make_cli_app() -> clap::Command<'static> {
    Cli::command()
}
