use std::io::Write;

use anyhow::Context;
use ndarray::{s, Array3};

use super::matrix_text::{format_pseudocount, MatrixValues};
use crate::kmer::INDEX_TO_BASE;
use crate::matrix::{NormalizeParams, Prior, NUM_BASES};

///////////////////////////////
/// Header information of a Shasta Bayesian consensus config
#[derive(Debug, Clone)]
pub struct ShastaHeader {
    pub name: String,
    pub pseudocount: f64,
    pub prior: Prior,
}

////////////////
/// Write non-directional run-length matrices as a Shasta Bayesian config.
///
/// Layout: a `>Name` block, the organism prior, then one `>B likelihood` block per base
/// with one comma-separated line per true run-length.
/// `counts` is [base, true length, observed length]
pub fn write_shasta_config<W: Write>(
    w: &mut W,
    header: &ShastaHeader,
    counts: &Array3<u64>,
    params: Option<&NormalizeParams>,
) -> anyhow::Result<()> {
    match params {
        Some(_) => write!(
            w,
            ">Name\n{} with pseudocounts {}\n\n",
            header.name,
            format_pseudocount(header.pseudocount)
        )?,
        //No pseudocount is added to raw counts
        None => write!(w, ">Name\n{} raw counts\n\n", header.name)?,
    }
    header.prior.table().write_blocks(w)?;

    for base_index in 0..NUM_BASES {
        let base = INDEX_TO_BASE[base_index] as char;
        let values = MatrixValues::from_counts(counts.slice(s![base_index, .., ..]), params)
            .with_context(|| format!("Failed normalizing matrix {}", base))?;

        //Raw counts are not likelihoods
        if params.is_some() {
            writeln!(w, ">{} likelihood", base)?;
        } else {
            writeln!(w, ">{}", base)?;
        }
        for row in values.rows(",") {
            writeln!(w, "{}", row)?;
        }
        writeln!(w)?;
    }
    Ok(())
}
