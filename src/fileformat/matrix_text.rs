use itertools::Itertools;
use ndarray::ArrayView2;

use crate::errors::Error;
use crate::matrix::{counts_to_f64, normalize, NormalizeParams};

///////////////////////////////
/// A matrix ready to be written: either raw counts or (log) probabilities
pub enum MatrixValues {
    Counts(ndarray::Array2<u64>),
    Probabilities(ndarray::Array2<f64>),
}

impl MatrixValues {
    /// Normalize the counts if params are given, otherwise keep them as they are
    pub fn from_counts(
        counts: ArrayView2<u64>,
        params: Option<&NormalizeParams>,
    ) -> Result<Self, Error> {
        match params {
            Some(params) => Ok(MatrixValues::Probabilities(normalize(
                counts_to_f64(counts).view(),
                params,
            )?)),
            None => Ok(MatrixValues::Counts(counts.to_owned())),
        }
    }

    /// Each row as comma-separated text
    pub fn rows(&self, delimiter: &str) -> Vec<String> {
        match self {
            MatrixValues::Counts(m) => m.rows().into_iter().map(|r| r.iter().join(delimiter)).collect(),
            MatrixValues::Probabilities(m) => m
                .rows()
                .into_iter()
                .map(|r| r.iter().map(|v| format_float(*v)).join(delimiter))
                .collect(),
        }
    }
}

/// Shortest text that reads back to the same value; always has a decimal point or exponent
pub fn format_float(v: f64) -> String {
    format!("{:?}", v)
}

/// Integral values are written without decimals, as the pseudocount is usually a whole number
pub fn format_pseudocount(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-0.5), "-0.5");
        assert_eq!(format_float(0.5f64.log10()), "-0.3010299956639812");
    }

    #[test]
    fn test_format_pseudocount() {
        assert_eq!(format_pseudocount(1.0), "1");
        assert_eq!(format_pseudocount(0.25), "0.25");
    }

    #[test]
    fn test_rows() {
        let counts = array![[1u64, 0], [2, 3]];
        let raw = MatrixValues::from_counts(counts.view(), None).unwrap();
        assert_eq!(raw.rows(","), vec!["1,0", "2,3"]);

        let params = NormalizeParams {
            pseudocount: 0.0,
            diagonal_bias: 0.0,
            logify: false,
        };
        let p = MatrixValues::from_counts(counts.view(), Some(&params)).unwrap();
        assert_eq!(p.rows(","), vec!["1.0,0.0", "0.4,0.6"]);
    }
}
