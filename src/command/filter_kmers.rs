use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Args;

use crate::fileformat::{KmerTableReader, KmerTableWriter};
use crate::utils::{derived_path, ensure_output_dir, output_dir_for};

pub const FILTER_SUFFIX: &str = "_filtered.csv";

/// Commandline option: Remove k-mers that were never aligned
#[derive(Args)]
pub struct FilterKmersCMD {
    /// K-mer CIGAR count table
    #[arg(short = 'i', long = "input", value_parser)]
    pub path_in: PathBuf,

    /// Output directory. Defaults to the directory of the input
    #[arg(short = 'o', long = "output", value_parser)]
    pub path_out: Option<PathBuf>,
}

impl FilterKmersCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        let dir = output_dir_for(&self.path_in, self.path_out.as_ref());
        ensure_output_dir(&dir)?;

        let stats = FilterKmers::run(&FilterKmers {
            path_in: self.path_in.clone(),
            path_out: derived_path(&self.path_in, &dir, FILTER_SUFFIX),
        })?;

        log::info!(
            "FilterKmers has finished succesfully. Kept {}, dropped {} empty k-mers",
            stats.num_kept,
            stats.num_dropped
        );
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FilterStats {
    pub num_kept: usize,
    pub num_dropped: usize,
}

/// Algorithm: Keep k-mers with at least one inserted, deleted, matching or mismatching base
pub struct FilterKmers {
    pub path_in: PathBuf,
    pub path_out: PathBuf,
}

impl FilterKmers {
    /// Run the algorithm
    pub fn run(params: &FilterKmers) -> anyhow::Result<FilterStats> {
        let mut reader = KmerTableReader::from_path(&params.path_in)?;

        log::info!("Writing file: {}", params.path_out.display());
        let mut writer = KmerTableWriter::from_path(&params.path_out)?;

        let mut stats = FilterStats::default();
        for record in reader.records() {
            let record = record.with_context(|| format!("Failed parsing {}", params.path_in.display()))?;
            if record.counts.n_aligned_total() == 0 {
                log::trace!("Dropping empty k-mer {} at line {}", String::from_utf8_lossy(&record.kmer), record.line);
                stats.num_dropped += 1;
            } else {
                writer.write(&record.kmer, &record.counts)?;
                stats.num_kept += 1;
            }
        }
        writer.flush()?;
        Ok(stats)
    }
}
