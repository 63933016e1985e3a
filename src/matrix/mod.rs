pub mod normalize;
pub mod prior;
pub mod runlength;

pub use normalize::counts_to_f64;
pub use normalize::normalize;
pub use normalize::NormalizeParams;
pub use normalize::DEFAULT_PSEUDOCOUNT;

pub use prior::Prior;
pub use prior::PriorTable;
pub use prior::ECOLI_K12_PRIOR;
pub use prior::HG38_PRIOR;

pub use runlength::Direction;
pub use runlength::RunlengthMatrices;
pub use runlength::DEFAULT_MAX_RUNLENGTH;
pub use runlength::NUM_BASES;
pub use runlength::NUM_DIRECTIONS;
