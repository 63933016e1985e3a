pub mod command;
pub mod errors;
pub mod fileformat;
pub mod kmer;
pub mod matrix;
pub mod utils;

pub use errors::Error;
