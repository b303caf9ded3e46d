use super::myio;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use walkdir::WalkDir;

fn copy_file(path: &Path, out: &mut dyn Write) -> Result<()> {
    log::info!("Copying {} to output.", path.display());
    if !path.is_file() {
        log::warn!("{} is not a valid file, skipping.", path.display());
        return Ok(());
    }
    let mut input =
        File::open(path).with_context(|| format!("couldn't open {}", path.display()))?;
    io::copy(&mut input, out)
        .with_context(|| format!("couldn't copy {}", path.display()))?;
    Ok(())
}

/// Concatenate the inputs into one output stream. Directories are walked
/// recursively and every regular file found is appended in walk order.
pub fn run_combine(output: Option<&str>, inputs: &[String]) -> Result<()> {
    let mut out = myio::writer(output.unwrap_or("-"))?;
    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            log::info!("Processing directory: {}", path.display());
            for entry in WalkDir::new(path) {
                let entry = entry?;
                if entry.file_type().is_file() {
                    copy_file(entry.path(), &mut out)?;
                }
            }
        } else {
            copy_file(path, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}
