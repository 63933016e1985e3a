pub mod aggregate;
pub mod canonical;
pub mod cigar_count;

pub use aggregate::KmerCigarCounts;

pub use canonical::base_to_index;
pub use canonical::canonical;
pub use canonical::complement;
pub use canonical::is_canonical;
pub use canonical::reverse_complement;
pub use canonical::INDEX_TO_BASE;

pub use cigar_count::CigarCount;
pub use cigar_count::NUM_CIGAR_OPS;
