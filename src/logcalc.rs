use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

lazy_static! {
    static ref TOKEN_RE: Regex =
        Regex::new(r"(\d+) (?:total tokens generated in database|tokens produced so far)\.")
            .unwrap();
}

/// Scan one log and return its token count and line count. The last
/// token-progress line wins; a log with no such line counts zero tokens.
fn scan_log(file: &Path) -> Result<(u64, u64)> {
    let stream = File::open(file).with_context(|| format!("couldn't open {}", file.display()))?;
    let mut found = 0u64;
    let mut line_count = 0u64;
    for line in BufReader::new(stream).lines() {
        let line = line?;
        line_count += 1;
        if let Some(caps) = TOKEN_RE.captures(&line) {
            found = caps[1]
                .parse()
                .with_context(|| format!("bad token count in {}", file.display()))?;
        }
    }
    Ok((found, line_count))
}

/// Total the token counts recorded in `aurora1.log`, `aurora2.log`, ... in
/// the given directory, stopping at the first missing number.
pub fn run_log_calc(log_dir: &str) -> Result<()> {
    let mut i = 0u32;
    let mut total = 0u64;
    loop {
        i += 1;
        let file = Path::new(log_dir).join(format!("aurora{}.log", i));
        if !file.exists() {
            break;
        }
        let (found, line_count) = scan_log(&file)?;
        println!(
            "{} tokens recorded in {} lines of {}.",
            found,
            line_count,
            file.display()
        );
        total += found;
    }
    println!("{} tokens total for project.", total);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pattern_takes_last_match() {
        let lines = [
            "starting run",
            "100 tokens produced so far.",
            "chatter",
            "2500 tokens produced so far.",
            "9999 total tokens generated in database.",
        ];
        let mut found = 0u64;
        for line in lines {
            if let Some(caps) = TOKEN_RE.captures(line) {
                found = caps[1].parse().unwrap();
            }
        }
        assert_eq!(found, 9999);
    }

    #[test]
    fn test_token_pattern_ignores_other_lines() {
        assert!(TOKEN_RE.captures("500 tokens remaining.").is_none());
        assert!(TOKEN_RE
            .captures("42 total tokens generated in database.")
            .is_some());
    }
}
