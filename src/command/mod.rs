pub mod aggregate_kmers;
pub mod filter_kmers;
pub mod sam_identity;
pub mod threshold_kmers;
pub mod to_marginpolish;
pub mod to_shasta;

use std::fmt;

use clap::Subcommand;

pub use aggregate_kmers::AggregateKmers;
pub use aggregate_kmers::AggregateKmersCMD;

pub use filter_kmers::FilterKmers;
pub use filter_kmers::FilterKmersCMD;

pub use threshold_kmers::ThresholdKmers;
pub use threshold_kmers::ThresholdKmersCMD;

pub use sam_identity::SamIdentity;
pub use sam_identity::SamIdentityCMD;

pub use to_marginpolish::MatrixConversionArgs;
pub use to_marginpolish::ToMarginPolish;
pub use to_marginpolish::ToMarginPolishCMD;

pub use to_shasta::ToShasta;
pub use to_shasta::ToShastaCMD;

///////////////////////////////
/// Possible subcommands to parse
#[derive(Subcommand)]
pub enum Commands {
    AggregateKmers(AggregateKmersCMD),
    FilterKmers(FilterKmersCMD),
    ThresholdKmers(ThresholdKmersCMD),
    SamIdentity(SamIdentityCMD),
    ToMarginpolish(ToMarginPolishCMD),
    ToShasta(ToShastaCMD),
}

impl Commands {
    pub fn try_execute(&mut self) -> anyhow::Result<()> {
        match self {
            Commands::AggregateKmers(cmd) => cmd.try_execute(),
            Commands::FilterKmers(cmd) => cmd.try_execute(),
            Commands::ThresholdKmers(cmd) => cmd.try_execute(),
            Commands::SamIdentity(cmd) => cmd.try_execute(),
            Commands::ToMarginpolish(cmd) => cmd.try_execute(),
            Commands::ToShasta(cmd) => cmd.try_execute(),
        }
    }
}

impl fmt::Debug for Commands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cmd = match self {
            Commands::AggregateKmers(_) => "AggregateKmers",
            Commands::FilterKmers(_) => "FilterKmers",
            Commands::ThresholdKmers(_) => "ThresholdKmers",
            Commands::SamIdentity(_) => "SamIdentity",
            Commands::ToMarginpolish(_) => "ToMarginPolish",
            Commands::ToShasta(_) => "ToShasta",
        };
        write!(f, "{}", cmd)
    }
}
