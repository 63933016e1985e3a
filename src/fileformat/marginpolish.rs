use std::io::Write;

use anyhow::Context;

use super::matrix_text::MatrixValues;
use crate::kmer::INDEX_TO_BASE;
use crate::matrix::{Direction, NormalizeParams, RunlengthMatrices, NUM_BASES};

////////////////
/// Write strand-directional run-length matrices in the MarginPolish JSON-like grammar:
///
/// ```text
/// "repeatCountLogProbabilities_A_F": [
///     v00,v01,...,vNN
/// ],
/// ```
///
/// Forward matrices come first, bases in ACGT order
pub fn write_marginpolish_config<W: Write>(
    w: &mut W,
    matrices: &RunlengthMatrices,
    params: Option<&NormalizeParams>,
) -> anyhow::Result<()> {
    for direction in Direction::ALL {
        for base_index in 0..NUM_BASES {
            let matrix_name = format!(
                "{}_{}",
                INDEX_TO_BASE[base_index] as char,
                direction.suffix()
            );

            let values = MatrixValues::from_counts(matrices.matrix(direction, base_index), params)
                .with_context(|| format!("Failed normalizing matrix {}", matrix_name))?;

            writeln!(w, "\"repeatCountLogProbabilities_{}\": [", matrix_name)?;
            writeln!(w, "    {}\n],", values.rows(",").join(","))?;
        }
    }
    Ok(())
}
