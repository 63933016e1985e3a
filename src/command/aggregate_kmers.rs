use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Args;

use crate::fileformat::{KmerTableReader, KmerTableWriter};
use crate::kmer::KmerCigarCounts;
use crate::utils::{derived_path, ensure_output_dir, output_dir_for};

pub const AGGREGATE_SUFFIX: &str = "_bidirectional.csv";

/// Commandline option: Merge k-mer CIGAR counts of reverse complement k-mers
#[derive(Args)]
pub struct AggregateKmersCMD {
    /// K-mer CIGAR count table: kmer,M,I,D,N,S,H,P,=,X
    #[arg(short = 'i', long = "input", value_parser)]
    pub path_in: PathBuf,

    /// Output directory. Defaults to the directory of the input
    #[arg(short = 'o', long = "output", value_parser)]
    pub path_out: Option<PathBuf>,
}

impl AggregateKmersCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        let dir = output_dir_for(&self.path_in, self.path_out.as_ref());
        ensure_output_dir(&dir)?;

        AggregateKmers::run(&AggregateKmers {
            path_in: self.path_in.clone(),
            path_out: derived_path(&self.path_in, &dir, AGGREGATE_SUFFIX),
        })?;

        log::info!("AggregateKmers has finished succesfully");
        Ok(())
    }
}

/// Algorithm: Sum counts of each k-mer and its reverse complement under the canonical k-mer
pub struct AggregateKmers {
    pub path_in: PathBuf,
    pub path_out: PathBuf,
}

impl AggregateKmers {
    /// Run the algorithm
    pub fn run(params: &AggregateKmers) -> anyhow::Result<()> {
        let mut reader = KmerTableReader::from_path(&params.path_in)?;
        let mut counts = KmerCigarCounts::new();
        let num_rows = counts
            .add_table(&mut reader)
            .with_context(|| format!("Failed parsing {}", params.path_in.display()))?;
        log::info!(
            "Read {} k-mers, merged into {} canonical k-mers",
            num_rows,
            counts.len()
        );

        log::info!("Writing file: {}", params.path_out.display());
        let mut writer = KmerTableWriter::from_path(&params.path_out)?;
        for (kmer, c) in counts.iter() {
            writer.write(kmer, c)?;
        }
        writer.flush()?;
        Ok(())
    }
}
