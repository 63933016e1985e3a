use crate::errors::Error;

// A  65  0b1000001
// C  67  0b1000011
// G  71  0b1000111
// T  84  0b1010100

////////////////
/// Complement of each base, 0 for anything that is not ACGT
const COMPLEMENT_LOOKUP: [u8; 256] = {
    let mut table = [0u8; 256];
    table[b'A' as usize] = b'T';
    table[b'C' as usize] = b'G';
    table[b'G' as usize] = b'C';
    table[b'T' as usize] = b'A';
    table
};

////////////////
/// Order of the bases along the base axis of the run-length matrices
pub const INDEX_TO_BASE: [u8; 4] = [b'A', b'C', b'G', b'T'];

////////////////
/// Map a base onto its matrix index: A=0, C=1, G=2, T=3
pub fn base_to_index(base: u8) -> Result<usize, Error> {
    match base {
        b'A' => Ok(0),
        b'C' => Ok(1),
        b'G' => Ok(2),
        b'T' => Ok(3),
        _ => Err(Error::invalid_base(base)),
    }
}

////////////////
/// Complement of a single base
#[inline(always)]
pub fn complement(base: u8) -> Result<u8, Error> {
    match COMPLEMENT_LOOKUP[base as usize] {
        0 => Err(Error::invalid_base(base)),
        c => Ok(c),
    }
}

////////////////
/// Reverse the k-mer and complement each base
pub fn reverse_complement(kmer: &[u8]) -> Result<Vec<u8>, Error> {
    kmer.iter().rev().map(|&b| complement(b)).collect()
}

////////////////
/// Strand-independent key of a k-mer: the smaller of the k-mer and its reverse complement.
///
/// Statistics gathered on either strand are merged under this key.
pub fn canonical(kmer: &[u8]) -> Result<Vec<u8>, Error> {
    let rc = reverse_complement(kmer)?;
    if rc.as_slice() < kmer {
        Ok(rc)
    } else {
        Ok(kmer.to_vec())
    }
}

pub fn is_canonical(kmer: &[u8]) -> Result<bool, Error> {
    Ok(canonical(kmer)? == kmer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    /// Every 4-mer over ACGT
    fn all_4mers() -> Vec<Vec<u8>> {
        (0..4)
            .map(|_| INDEX_TO_BASE.iter().copied())
            .multi_cartesian_product()
            .collect()
    }

    #[test]
    fn test_complement() {
        assert_eq!(complement(b'A'), Ok(b'T'));
        assert_eq!(complement(b'C'), Ok(b'G'));
        assert_eq!(complement(b'G'), Ok(b'C'));
        assert_eq!(complement(b'T'), Ok(b'A'));
        assert_eq!(complement(b'N'), Err(Error::InvalidBase { base: b'N' }));
        assert_eq!(complement(b'a'), Err(Error::InvalidBase { base: b'a' }));
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement(b"AACG").unwrap(), b"CGTT".to_vec());
        assert_eq!(reverse_complement(b"").unwrap(), Vec::<u8>::new());
        assert!(reverse_complement(b"ACNT").is_err());
    }

    #[test]
    fn test_involution() {
        for kmer in all_4mers() {
            let rc = reverse_complement(&kmer).unwrap();
            assert_eq!(reverse_complement(&rc).unwrap(), kmer);
        }
    }

    #[test]
    fn test_strand_symmetry() {
        for kmer in all_4mers() {
            let rc = reverse_complement(&kmer).unwrap();
            assert_eq!(canonical(&kmer).unwrap(), canonical(&rc).unwrap());
            assert!(canonical(&kmer).unwrap() <= kmer);
        }
    }

    #[test]
    fn test_canonical() {
        assert_eq!(canonical(b"TTTT").unwrap(), b"AAAA".to_vec());
        assert_eq!(canonical(b"AAAA").unwrap(), b"AAAA".to_vec());
        //Palindrome
        assert_eq!(canonical(b"ACGT").unwrap(), b"ACGT".to_vec());
        assert!(is_canonical(b"AAAC").unwrap());
        assert!(!is_canonical(b"GTTT").unwrap());
    }

    #[test]
    fn test_base_to_index() {
        for (i, b) in INDEX_TO_BASE.iter().enumerate() {
            assert_eq!(base_to_index(*b), Ok(i));
        }
        assert!(base_to_index(b'-').is_err());
    }
}
