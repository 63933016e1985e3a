pub mod block_table;
pub mod kmer_table;
pub mod marginpolish;
pub mod matrix_text;
pub mod shasta;

pub use block_table::read_blocks;
pub use block_table::Block;
pub use block_table::Row;

pub use kmer_table::KmerRecord;
pub use kmer_table::KmerTableReader;
pub use kmer_table::KmerTableWriter;

pub use marginpolish::write_marginpolish_config;

pub use shasta::write_shasta_config;
pub use shasta::ShastaHeader;
