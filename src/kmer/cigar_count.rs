use std::ops::AddAssign;

use rust_htslib::bam::record::Cigar;

/// Number of counters, one per CIGAR operation
pub const NUM_CIGAR_OPS: usize = 9;

///////////////////////////////
/// Alignment operation counts, in BAM operation order: M I D N S H P = X
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CigarCount {
    pub n_align_match: u64,
    pub n_insert: u64,
    pub n_delete: u64,
    pub n_refskip: u64,
    pub n_softclip: u64,
    pub n_hardclip: u64,
    pub n_pad: u64,
    pub n_match: u64,
    pub n_mismatch: u64,
}

impl CigarCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_array(c: [u64; NUM_CIGAR_OPS]) -> Self {
        Self {
            n_align_match: c[0],
            n_insert: c[1],
            n_delete: c[2],
            n_refskip: c[3],
            n_softclip: c[4],
            n_hardclip: c[5],
            n_pad: c[6],
            n_match: c[7],
            n_mismatch: c[8],
        }
    }

    pub fn to_array(&self) -> [u64; NUM_CIGAR_OPS] {
        [
            self.n_align_match,
            self.n_insert,
            self.n_delete,
            self.n_refskip,
            self.n_softclip,
            self.n_hardclip,
            self.n_pad,
            self.n_match,
            self.n_mismatch,
        ]
    }

    /// Add a single CIGAR operation of the given length
    pub fn add_op(&mut self, op: &Cigar) {
        match *op {
            Cigar::Match(n) => self.n_align_match += n as u64,
            Cigar::Ins(n) => self.n_insert += n as u64,
            Cigar::Del(n) => self.n_delete += n as u64,
            Cigar::RefSkip(n) => self.n_refskip += n as u64,
            Cigar::SoftClip(n) => self.n_softclip += n as u64,
            Cigar::HardClip(n) => self.n_hardclip += n as u64,
            Cigar::Pad(n) => self.n_pad += n as u64,
            Cigar::Equal(n) => self.n_match += n as u64,
            Cigar::Diff(n) => self.n_mismatch += n as u64,
        }
    }

    /// Bases taking part in the alignment: insertions, deletions, matches and mismatches
    pub fn n_aligned_total(&self) -> u64 {
        self.n_insert + self.n_delete + self.n_match + self.n_mismatch
    }

    /// Fraction of aligned bases that match. None if nothing aligned
    pub fn identity(&self) -> Option<f64> {
        let total = self.n_aligned_total();
        if total == 0 {
            None
        } else {
            Some(self.n_match as f64 / total as f64)
        }
    }
}

impl AddAssign<&CigarCount> for CigarCount {
    fn add_assign(&mut self, other: &CigarCount) {
        self.n_align_match += other.n_align_match;
        self.n_insert += other.n_insert;
        self.n_delete += other.n_delete;
        self.n_refskip += other.n_refskip;
        self.n_softclip += other.n_softclip;
        self.n_hardclip += other.n_hardclip;
        self.n_pad += other.n_pad;
        self.n_match += other.n_match;
        self.n_mismatch += other.n_mismatch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assign() {
        let mut a = CigarCount::from_array([1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let b = CigarCount::from_array([1, 1, 1, 1, 1, 1, 1, 1, 1]);
        a += &b;
        assert_eq!(a.to_array(), [2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_add_op() {
        let mut c = CigarCount::new();
        for op in [
            Cigar::Match(10),
            Cigar::Ins(2),
            Cigar::Del(3),
            Cigar::Equal(7),
            Cigar::Diff(1),
            Cigar::SoftClip(5),
            Cigar::Equal(3),
        ] {
            c.add_op(&op);
        }
        assert_eq!(c.to_array(), [10, 2, 3, 0, 5, 0, 0, 10, 1]);
        assert_eq!(c.n_aligned_total(), 16);
    }

    #[test]
    fn test_identity() {
        assert_eq!(CigarCount::new().identity(), None);
        let c = CigarCount::from_array([0, 1, 0, 0, 0, 0, 0, 3, 0]);
        assert_eq!(c.identity(), Some(0.75));
    }
}
