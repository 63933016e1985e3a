use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Args;
use rust_htslib::bam::record::Cigar;
use rust_htslib::bam::Read;
use serde::Serialize;

use crate::kmer::CigarCount;
use crate::utils::{derived_path, ensure_output_dir, output_dir_for};

pub const IDENTITY_SUFFIX: &str = "_identity.csv";

/// Indels longer than this are structural variants, not sequencing errors
pub const DEFAULT_MAX_INDEL: u32 = 500;

/// Forward and reverse primary (0, 16) and supplementary (2048, 2064) alignments
pub const ACCEPTED_FLAGS: [u16; 4] = [0, 16, 2048, 2064];

/// Commandline option: Summarise alignment operations of a SAM/BAM into error rates
#[derive(Args)]
pub struct SamIdentityCMD {
    /// SAM or BAM file
    #[arg(short = 'i', long = "input", value_parser)]
    pub path_in: PathBuf,

    /// Output directory. Defaults to the directory of the input
    #[arg(short = 'o', long = "output", value_parser)]
    pub path_out: Option<PathBuf>,

    /// Skip insertions and deletions longer than this
    #[arg(long = "max-indel", value_parser, default_value_t = DEFAULT_MAX_INDEL)]
    pub max_indel: u32,
}

impl SamIdentityCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        let dir = output_dir_for(&self.path_in, self.path_out.as_ref());
        ensure_output_dir(&dir)?;

        SamIdentity::run(&SamIdentity {
            path_in: self.path_in.clone(),
            path_out: derived_path(&self.path_in, &dir, IDENTITY_SUFFIX),
            max_indel: self.max_indel,
        })?;

        log::info!("SamIdentity has finished succesfully");
        Ok(())
    }
}

///////////////////////////////
/// One line of the summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationSummary {
    pub operation: String,
    pub count: u64,
    pub rate: f64,
    pub per_100kb: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SamIdentityStats {
    pub num_used: u64,
    pub num_wrong_flag: u64,
    pub num_no_cigar: u64,
    pub num_large_indels: u64,
}

/// Algorithm: Sum CIGAR operations over all accepted alignments
pub struct SamIdentity {
    pub path_in: PathBuf,
    pub path_out: PathBuf,
    pub max_indel: u32,
}

impl SamIdentity {
    /// Run the algorithm
    pub fn run(params: &SamIdentity) -> anyhow::Result<CigarCount> {
        let mut bam = rust_htslib::bam::Reader::from_path(&params.path_in)
            .with_context(|| format!("Could not open {}", params.path_in.display()))?;

        let mut counts = CigarCount::new();
        let mut stats = SamIdentityStats::default();

        let mut record = rust_htslib::bam::Record::new();
        while let Some(r) = bam.read(&mut record) {
            r.with_context(|| format!("Failed reading record from {}", params.path_in.display()))?;

            if !ACCEPTED_FLAGS.contains(&record.flags()) {
                stats.num_wrong_flag += 1;
                continue;
            }

            //Unaligned, CIGAR is *
            if record.cigar_len() == 0 {
                stats.num_no_cigar += 1;
                continue;
            }

            let cigar = record.cigar();
            stats.num_large_indels += add_cigar(&mut counts, cigar.iter(), params.max_indel);
            stats.num_used += 1;
        }

        log::info!(
            "Used {} alignments. Skipped {} by flag, {} without CIGAR, and {} indels longer than {}",
            stats.num_used,
            stats.num_wrong_flag,
            stats.num_no_cigar,
            stats.num_large_indels,
            params.max_indel
        );
        log::debug!("Operation totals: {:?}", counts);

        let summary = summarize_operations(&counts);
        for s in &summary {
            log::info!(
                "{}: {}, rate {:.6}, per 100kb {:.6}",
                s.operation,
                s.count,
                s.rate,
                s.per_100kb
            );
        }
        if let Some(identity) = counts.identity() {
            log::info!("Identity: {:.6}", identity);
        }

        log::info!("Writing file: {}", params.path_out.display());
        let mut writer = csv::Writer::from_path(&params.path_out)
            .with_context(|| format!("Could not create {}", params.path_out.display()))?;
        for s in summary {
            writer.serialize(s)?;
        }
        writer.flush()?;

        Ok(counts)
    }
}

////////////////
/// Add the operations of one alignment, skipping indels longer than max_indel.
/// Returns the number of indels skipped
pub fn add_cigar<'a, I>(counts: &mut CigarCount, ops: I, max_indel: u32) -> u64
where
    I: IntoIterator<Item = &'a Cigar>,
{
    let mut num_skipped = 0;
    for op in ops {
        match op {
            Cigar::Ins(n) | Cigar::Del(n) if *n > max_indel => num_skipped += 1,
            _ => counts.add_op(op),
        }
    }
    num_skipped
}

////////////////
/// Count, fraction and rate per 100kb of mismatches, insertions, deletions and matches
pub fn summarize_operations(counts: &CigarCount) -> Vec<OperationSummary> {
    let ops = [
        ("X", counts.n_mismatch),
        ("I", counts.n_insert),
        ("D", counts.n_delete),
        ("=", counts.n_match),
    ];
    let total: u64 = ops.iter().map(|(_, n)| n).sum();
    if total == 0 {
        log::warn!("No mismatches, insertions, deletions or matches found; rates are reported as 0");
    }

    ops.iter()
        .map(|(name, n)| {
            let rate = if total == 0 {
                0.0
            } else {
                *n as f64 / total as f64
            };
            OperationSummary {
                operation: name.to_string(),
                count: *n,
                rate,
                per_100kb: rate * 100_000.0,
            }
        })
        .collect()
}
