use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use anyhow::Result;
use clap::Args;

use crate::errors::Error;
use crate::fileformat::matrix_text::format_float;
use crate::fileformat::{KmerTableReader, KmerTableWriter};
use crate::utils::{ensure_output_dir, file_stem, output_dir_for};

/// Commandline option: Select k-mers with high identity and few matches
#[derive(Args)]
pub struct ThresholdKmersCMD {
    /// K-mer CIGAR count table
    #[arg(short = 'i', long = "input", value_parser)]
    pub path_in: PathBuf,

    /// Output directory. Defaults to the directory of the input
    #[arg(short = 'o', long = "output", value_parser)]
    pub path_out: Option<PathBuf>,

    /// Decimal cutoff between 0 and 1 for identity; k-mers above it are kept
    #[arg(long = "identity", value_parser)]
    pub identity: f64,

    /// Keep only k-mers with fewer matches than this
    #[arg(long = "matches", value_parser)]
    pub matches: Option<u64>,
}

impl ThresholdKmersCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.identity) {
            return Err(Error::invalid_parameter(
                "identity",
                Some(format!("must be between 0 and 1, got {}", self.identity)),
            )
            .into());
        }

        let dir = output_dir_for(&self.path_in, self.path_out.as_ref());
        ensure_output_dir(&dir)?;

        let params = ThresholdKmers::new(&self.path_in, &dir, self.identity, self.matches);
        let stats = ThresholdKmers::run(&params)?;

        log::info!(
            "ThresholdKmers has finished succesfully. Found {} k-mers, skipped {} without aligned bases",
            stats.num_found,
            stats.num_unaligned
        );
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdStats {
    pub num_found: usize,
    pub num_unaligned: usize,
}

/// Algorithm: Keep k-mers with identity above a cutoff and match count below a cutoff
pub struct ThresholdKmers {
    pub path_in: PathBuf,
    pub identity_cutoff: f64,
    pub match_cutoff: Option<u64>,
    /// Kept rows with their identity appended
    pub path_out_stats: PathBuf,
    /// Only the kept k-mers, one per line
    pub path_out_kmers: PathBuf,
}

impl ThresholdKmers {
    /// Set up output names as `<stem>_identity-<cutoff>[_match-<cutoff>].csv`
    pub fn new(path_in: &Path, dir: &Path, identity_cutoff: f64, match_cutoff: Option<u64>) -> Self {
        let mut prefix = format!("{}_identity-{}", file_stem(path_in), format_float(identity_cutoff));
        if let Some(m) = match_cutoff {
            prefix.push_str(&format!("_match-{}", m));
        }
        Self {
            path_in: path_in.to_path_buf(),
            identity_cutoff,
            match_cutoff,
            path_out_stats: dir.join(format!("{}.csv", prefix)),
            path_out_kmers: dir.join(format!("{}_KMERS_ONLY.csv", prefix)),
        }
    }

    /// Run the algorithm
    pub fn run(params: &ThresholdKmers) -> anyhow::Result<ThresholdStats> {
        let mut reader = KmerTableReader::from_path(&params.path_in)?;

        log::info!("Writing file: {}", params.path_out_stats.display());
        let mut writer_stats = KmerTableWriter::from_path(&params.path_out_stats)?;
        let file_kmers = File::create(&params.path_out_kmers)
            .with_context(|| format!("Could not create {}", params.path_out_kmers.display()))?;
        let mut writer_kmers = BufWriter::new(file_kmers);

        let match_cutoff = params.match_cutoff.unwrap_or(u64::MAX);

        let mut stats = ThresholdStats::default();
        for record in reader.records() {
            let record = record.with_context(|| format!("Failed parsing {}", params.path_in.display()))?;

            let Some(identity) = record.counts.identity() else {
                stats.num_unaligned += 1;
                continue;
            };

            if identity > params.identity_cutoff && record.counts.n_match < match_cutoff {
                writer_stats.write_with_extra(&record.kmer, &record.counts, &[format_float(identity)])?;
                writer_kmers.write_all(&record.kmer)?;
                writer_kmers.write_all(b"\n")?;
                stats.num_found += 1;
            }
        }
        writer_stats.flush()?;
        writer_kmers.flush()?;

        if stats.num_unaligned > 0 {
            log::warn!(
                "Skipped {} k-mers without any aligned bases; their identity is undefined",
                stats.num_unaligned
            );
        }
        Ok(stats)
    }
}
