use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Datelike, Local, Timelike};

////////////////
/// Local time as `year_month_day_hour_minute_second_microsecond`, no zero padding
pub fn datetime_string() -> String {
    let now = Local::now();
    format!(
        "{}_{}_{}_{}_{}_{}_{}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
        now.timestamp_subsec_micros()
    )
}

/// File name without its last extension
pub fn file_stem<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Directory to write into: the one given, else the directory of the input file
pub fn output_dir_for<P: AsRef<Path>>(input: P, output: Option<&PathBuf>) -> PathBuf {
    match output {
        Some(dir) => dir.clone(),
        None => match input.as_ref().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    }
}

/// `<dir>/<input stem><suffix>`
pub fn derived_path<P: AsRef<Path>>(input: P, dir: &Path, suffix: &str) -> PathBuf {
    dir.join(format!("{}{}", file_stem(input), suffix))
}

/// Create the output directory if it does not exist yet
pub fn ensure_output_dir(dir: &Path) -> anyhow::Result<()> {
    if !dir.exists() {
        log::info!("Creating output directory {}", dir.display());
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }
    Ok(())
}
