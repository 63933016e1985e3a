use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use ndarray::{s, Array3, Array4, ArrayView2};

use crate::errors::Error;
use crate::fileformat::block_table::{read_blocks, Block};
use crate::kmer::{base_to_index, INDEX_TO_BASE};

/// Largest run-length tracked by the counters
pub const DEFAULT_MAX_RUNLENGTH: usize = 50;

pub const NUM_BASES: usize = 4;
pub const NUM_DIRECTIONS: usize = 2;

///////////////////////////////
/// Strand of the read the run-lengths were observed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub const ALL: [Direction; NUM_DIRECTIONS] = [Direction::Forward, Direction::Reverse];

    pub fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Reverse => 1,
        }
    }

    pub fn suffix(self) -> char {
        match self {
            Direction::Forward => 'F',
            Direction::Reverse => 'R',
        }
    }

    /// `>A_R` is reverse; everything else, including a bare `>A`, is forward
    pub fn from_block_name(name: &str) -> Direction {
        if name.ends_with('R') && name.len() > 1 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }
}

/// Parse one cell of a frequency matrix.
///
/// The upstream counter writes doubles, so integral decimals like `12.000000` are accepted
fn parse_count(field: &str, line: usize) -> Result<u64, Error> {
    if let Ok(v) = field.parse::<u64>() {
        return Ok(v);
    }
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => Ok(v as u64),
        _ => Err(Error::schema_mismatch(
            line,
            Some(format!("'{}' is not a non-negative integer count", field)),
        )),
    }
}

///////////////////////////////
/// Observed vs true run-length counts, per strand direction and base.
///
/// Shape is [direction, base, true length, observed length], lengths 0..=max_runlength
#[derive(Debug, Clone, PartialEq)]
pub struct RunlengthMatrices {
    max_runlength: usize,
    counts: Array4<u64>,
}

impl RunlengthMatrices {
    pub fn new(max_runlength: usize) -> Self {
        let dim = max_runlength + 1;
        Self {
            max_runlength,
            counts: Array4::zeros((NUM_DIRECTIONS, NUM_BASES, dim, dim)),
        }
    }

    pub fn max_runlength(&self) -> usize {
        self.max_runlength
    }

    /// Side length of each matrix
    pub fn dim(&self) -> usize {
        self.max_runlength + 1
    }

    pub fn counts(&self) -> &Array4<u64> {
        &self.counts
    }

    pub fn matrix(&self, direction: Direction, base_index: usize) -> ArrayView2<'_, u64> {
        self.counts.slice(s![direction.index(), base_index, .., ..])
    }

    pub fn increment(
        &mut self,
        direction: Direction,
        base_index: usize,
        true_length: usize,
        observed_length: usize,
        n: u64,
    ) {
        self.counts[[direction.index(), base_index, true_length, observed_length]] += n;
    }

    ////////////////
    /// Add the counts of one `>B` or `>B_D` block. Rows past max_runlength are ignored
    pub fn add_block(&mut self, block: &Block) -> Result<(), Error> {
        let base = *block.name.as_bytes().first().ok_or_else(|| {
            Error::schema_mismatch(block.line, Some("block without a base name"))
        })?;
        let base_index = base_to_index(base)?;
        let direction = Direction::from_block_name(&block.name);

        let dim = self.dim();
        block.expect_min_rows(dim)?;
        block.expect_columns(dim, dim)?;

        let rows = &block.rows[..dim];
        let mut m = self
            .counts
            .slice_mut(s![direction.index(), base_index, .., ..]);
        for (y, row) in rows.iter().enumerate() {
            for (x, field) in row.fields.iter().enumerate() {
                m[[y, x]] += parse_count(field, row.line)?;
            }
        }
        if block.rows.len() > dim {
            log::debug!(
                "Ignoring {} rows beyond run-length {} in block '{}'",
                block.rows.len() - dim,
                self.max_runlength,
                block.name
            );
        }
        Ok(())
    }

    ////////////////
    /// Add all blocks. Repeated blocks are summed
    pub fn load_blocks(&mut self, blocks: &[Block]) -> anyhow::Result<()> {
        let mut seen = [[false; NUM_BASES]; NUM_DIRECTIONS];
        for block in blocks {
            self.add_block(block)
                .with_context(|| format!("Failed loading block '>{}' at line {}", block.name, block.line))?;
            //add_block already validated the base
            if let Some(Ok(b)) = block.name.as_bytes().first().map(|b| base_to_index(*b)) {
                seen[Direction::from_block_name(&block.name).index()][b] = true;
            }
        }

        for base_index in 0..NUM_BASES {
            if !seen[0][base_index] && !seen[1][base_index] {
                log::warn!(
                    "No block found for base {}; its counts are all zero",
                    INDEX_TO_BASE[base_index] as char
                );
            }
        }
        Ok(())
    }

    pub fn read_from<R: BufRead>(reader: R, max_runlength: usize) -> anyhow::Result<Self> {
        let blocks = read_blocks(reader, ',')?;
        let mut matrices = Self::new(max_runlength);
        matrices.load_blocks(&blocks)?;
        Ok(matrices)
    }

    pub fn from_path<P: AsRef<Path>>(path: P, max_runlength: usize) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Could not open frequency matrix {}", path.display()))?;
        Self::read_from(BufReader::new(file), max_runlength)
            .with_context(|| format!("Failed parsing {}", path.display()))
    }

    /// Load several files and sum them
    pub fn from_paths<P: AsRef<Path>>(paths: &[P], max_runlength: usize) -> anyhow::Result<Self> {
        let mut total = Self::new(max_runlength);
        for path in paths {
            log::info!("Loading frequency matrices from {}", path.as_ref().display());
            let m = Self::from_path(path, max_runlength)?;
            total.merge(&m)?;
        }
        Ok(total)
    }

    /// Element-wise sum with another set of matrices
    pub fn merge(&mut self, other: &RunlengthMatrices) -> Result<(), Error> {
        if self.max_runlength != other.max_runlength {
            return Err(Error::invalid_parameter(
                "max_runlength",
                Some(format!(
                    "matrices with unequal sizes cannot be added: {} vs {}",
                    self.max_runlength, other.max_runlength
                )),
            ));
        }
        self.counts += &other.counts;
        Ok(())
    }

    ////////////////
    /// Fold the reverse strand onto the forward strand.
    ///
    /// A run of base B read on the reverse strand is a run of complement(B) on the reference,
    /// so forward[B] is summed with reverse[3-B]. Shape is [base, true length, observed length]
    pub fn collapse_directions(&self) -> Array3<u64> {
        let dim = self.dim();
        let mut sum = Array3::zeros((NUM_BASES, dim, dim));
        for b in 0..NUM_BASES {
            let mut m = sum.slice_mut(s![b, .., ..]);
            m += &self.matrix(Direction::Forward, b);
            m += &self.matrix(Direction::Reverse, NUM_BASES - 1 - b);
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_directional() {
        let data = ">A_F\n1,2\n3,4\n\n>T_R\n5,6\n7,8\n\n";
        let m = RunlengthMatrices::read_from(data.as_bytes(), 1).unwrap();

        assert_eq!(m.dim(), 2);
        assert_eq!(m.counts()[[0, 0, 1, 0]], 3);
        assert_eq!(m.counts()[[1, 3, 0, 1]], 6);
        assert_eq!(m.matrix(Direction::Forward, 3).sum(), 0);
    }

    #[test]
    fn test_undirected_header_is_forward() {
        let data = ">A\n0,0\n0,0\n\n>G\n1,1\n1,1\n";
        let m = RunlengthMatrices::read_from(data.as_bytes(), 1).unwrap();
        assert_eq!(m.matrix(Direction::Forward, 2).sum(), 4);
        assert_eq!(m.matrix(Direction::Reverse, 2).sum(), 0);
    }

    #[test]
    fn test_extra_rows_ignored() {
        let data = ">C_F\n1,0\n0,1\n9,9\n";
        let m = RunlengthMatrices::read_from(data.as_bytes(), 1).unwrap();
        assert_eq!(m.matrix(Direction::Forward, 1).sum(), 2);
    }

    #[test]
    fn test_too_few_rows() {
        let data = ">C_F\n1,0\n";
        let err = RunlengthMatrices::read_from(data.as_bytes(), 1).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::SchemaMismatch { line: 1, .. })
        ));
    }

    #[test]
    fn test_wrong_column_count() {
        let data = ">C_F\n1,0\n0,1,2\n";
        let err = RunlengthMatrices::read_from(data.as_bytes(), 1).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::SchemaMismatch { line: 3, .. })
        ));
    }

    #[test]
    fn test_invalid_base() {
        let data = ">N_F\n1,0\n0,1\n";
        let err = RunlengthMatrices::read_from(data.as_bytes(), 1).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::InvalidBase { base: b'N' })
        );
    }

    #[test]
    fn test_invalid_base_reports_line() {
        let data = ">A_F\n1,0\n0,1\n\n>N_F\n1,0\n0,1\n";
        let err = RunlengthMatrices::read_from(data.as_bytes(), 1).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("'>N_F' at line 5"), "{}", msg);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("12", 1), Ok(12));
        assert_eq!(parse_count("12.000000", 1), Ok(12));
        assert!(parse_count("1.5", 1).is_err());
        assert!(parse_count("-1", 1).is_err());
        assert!(parse_count("nan", 1).is_err());
    }

    #[test]
    fn test_repeated_block_sums() {
        let data = ">A_F\n1,0\n0,1\n\n>A_F\n1,0\n0,1\n";
        let m = RunlengthMatrices::read_from(data.as_bytes(), 1).unwrap();
        assert_eq!(m.counts()[[0, 0, 0, 0]], 2);
        assert_eq!(m.counts()[[0, 0, 1, 1]], 2);
    }

    #[test]
    fn test_merge() {
        let mut a = RunlengthMatrices::new(1);
        a.increment(Direction::Reverse, 2, 1, 0, 5);
        let mut b = RunlengthMatrices::new(1);
        b.increment(Direction::Reverse, 2, 1, 0, 2);
        a.merge(&b).unwrap();
        assert_eq!(a.counts()[[1, 2, 1, 0]], 7);

        assert!(matches!(
            a.merge(&RunlengthMatrices::new(2)),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_collapse_directions() {
        let mut m = RunlengthMatrices::new(1);
        m.increment(Direction::Forward, 0, 1, 1, 3);
        m.increment(Direction::Reverse, 3, 1, 1, 4);
        m.increment(Direction::Reverse, 0, 0, 0, 1);

        let c = m.collapse_directions();
        assert_eq!(c[[0, 1, 1]], 7);
        //Reverse A counts belong to T
        assert_eq!(c[[3, 0, 0]], 1);
        assert_eq!(c.sum(), 8);
    }
}
