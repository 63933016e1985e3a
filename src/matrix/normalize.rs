use ndarray::{Array2, ArrayView2, Axis};

use crate::errors::Error;

/// Pseudocount used when none is given on the command line
pub const DEFAULT_PSEUDOCOUNT: f64 = 1.0;

///////////////////////////////
/// Smoothing applied before turning counts into probabilities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeParams {
    /// Added to every cell
    pub pseudocount: f64,
    /// Added to cells where true length == observed length, on top of the pseudocount
    pub diagonal_bias: f64,
    /// Return log10 probabilities
    pub logify: bool,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self {
            pseudocount: DEFAULT_PSEUDOCOUNT,
            diagonal_bias: 0.0,
            logify: true,
        }
    }
}

impl NormalizeParams {
    pub fn validate(&self) -> Result<(), Error> {
        if !self.pseudocount.is_finite() || self.pseudocount < 0.0 {
            return Err(Error::invalid_parameter(
                "pseudocount",
                Some(format!("must be finite and >= 0, got {}", self.pseudocount)),
            ));
        }
        if !self.diagonal_bias.is_finite() || self.diagonal_bias < 0.0 {
            return Err(Error::invalid_parameter(
                "diagonal-bias",
                Some(format!("must be finite and >= 0, got {}", self.diagonal_bias)),
            ));
        }
        Ok(())
    }
}

////////////////
/// Turn a count matrix into a row-stochastic probability matrix, optionally in log10 space.
///
/// Each row r becomes (count + pseudocount [+ diagonal_bias if r==c]) / row sum.
/// A row that sums to zero is rejected instead of producing NaN
pub fn normalize(counts: ArrayView2<f64>, params: &NormalizeParams) -> Result<Array2<f64>, Error> {
    params.validate()?;

    let mut m = counts.to_owned();
    m += params.pseudocount;
    for d in m.diag_mut() {
        *d += params.diagonal_bias;
    }

    let row_sums = m.sum_axis(Axis(1));
    for (r, s) in row_sums.iter().enumerate() {
        if *s <= 0.0 || !s.is_finite() {
            return Err(Error::invalid_parameter(
                "pseudocount",
                Some(format!("row {} sums to {}; use a pseudocount > 0", r, s)),
            ));
        }
    }

    for (mut row, s) in m.axis_iter_mut(Axis(0)).zip(row_sums.iter()) {
        row /= *s;
    }

    if params.logify {
        m.mapv_inplace(f64::log10);
    }
    Ok(m)
}

/// Convert integer counts to floating point
pub fn counts_to_f64(counts: ArrayView2<u64>) -> Array2<f64> {
    counts.mapv(|c| c as f64)
}
