use std::collections::BTreeMap;
use std::io::Read;

use anyhow::Context;

use super::canonical::canonical;
use super::cigar_count::CigarCount;
use crate::errors::Error;
use crate::fileformat::KmerTableReader;

///////////////////////////////
/// CIGAR counts merged over both strands, keyed by canonical k-mer.
///
/// Kept sorted so that the output does not depend on input order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct KmerCigarCounts {
    counts: BTreeMap<Vec<u8>, CigarCount>,
}

impl KmerCigarCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add counts observed for a k-mer on either strand
    pub fn add(&mut self, kmer: &[u8], counts: &CigarCount) -> Result<(), Error> {
        let key = canonical(kmer)?;
        *self.counts.entry(key).or_default() += counts;
        Ok(())
    }

    /// Add every row of a k-mer table
    pub fn add_table<R: Read>(&mut self, reader: &mut KmerTableReader<R>) -> anyhow::Result<usize> {
        let mut num_rows = 0;
        for record in reader.records() {
            let record = record?;
            self.add(&record.kmer, &record.counts)
                .with_context(|| format!("Failed parsing k-mer at line {}", record.line))?;
            num_rows += 1;
        }
        Ok(num_rows)
    }

    pub fn get(&self, kmer: &[u8]) -> Option<&CigarCount> {
        self.counts.get(kmer)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Vec<u8>, &CigarCount)> {
        self.counts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(n_align_match: u64, n_match: u64) -> CigarCount {
        CigarCount {
            n_align_match,
            n_match,
            ..Default::default()
        }
    }

    #[test]
    fn test_reverse_complements_merge() {
        let mut agg = KmerCigarCounts::new();
        agg.add(&b"AAAA"[..], &counts(1, 1)).unwrap();
        agg.add(&b"TTTT"[..], &counts(2, 2)).unwrap();

        assert_eq!(agg.len(), 1);
        let c = agg.get(b"AAAA").unwrap();
        assert_eq!(c.n_align_match, 3);
        assert_eq!(c.n_match, 3);
        assert!(agg.get(b"TTTT").is_none());
    }

    #[test]
    fn test_order_independent() {
        let rows: Vec<(&[u8], CigarCount)> = vec![
            (&b"AAAA"[..], counts(1, 1)),
            (&b"TTTT"[..], counts(2, 2)),
            (&b"ACGG"[..], CigarCount::from_array([4, 1, 0, 0, 2, 0, 0, 3, 1])),
            (&b"CCGT"[..], CigarCount::from_array([1, 0, 1, 0, 0, 0, 0, 1, 0])),
            (&b"GATC"[..], counts(7, 6)),
        ];

        let mut forward = KmerCigarCounts::new();
        for (k, c) in rows.iter() {
            forward.add(k, c).unwrap();
        }

        let mut backward = KmerCigarCounts::new();
        for (k, c) in rows.iter().rev() {
            backward.add(k, c).unwrap();
        }

        let mut interleaved = KmerCigarCounts::new();
        for i in [3, 0, 4, 2, 1] {
            interleaved.add(rows[i].0, &rows[i].1).unwrap();
        }

        assert_eq!(forward, backward);
        assert_eq!(forward, interleaved);
        assert_eq!(forward.len(), 3);
        assert_eq!(
            forward.get(b"ACGG").unwrap().to_array(),
            [5, 1, 1, 0, 2, 0, 0, 4, 1]
        );
    }

    #[test]
    fn test_add_table_reports_line() {
        let data = "AAAA,1,0,0,0,0,0,0,1,0,\nAANA,1,0,0,0,0,0,0,1,0,\n";
        let mut reader = KmerTableReader::new(data.as_bytes());
        let mut agg = KmerCigarCounts::new();
        let err = agg.add_table(&mut reader).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::InvalidBase { base: b'N' })
        );
    }
}
