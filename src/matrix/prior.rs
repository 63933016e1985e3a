use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::errors::Error;

///////////////////////////////
/// Log10 prior probabilities of true run-lengths 0..=50, for AT and GC homopolymers
#[derive(Debug)]
pub struct PriorTable {
    pub name: &'static str,
    pub at: &'static str,
    pub gc: &'static str,
}

impl PriorTable {
    /// Write the table as `>AT prior` and `>GC prior` blocks
    pub fn write_blocks<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        write!(w, ">AT prior\n{}\n\n", self.at)?;
        write!(w, ">GC prior\n{}\n\n", self.gc)?;
        Ok(())
    }

    /// Number of run-lengths covered, i.e. max run-length + 1
    pub fn len(&self) -> usize {
        self.at.split(',').count()
    }

    pub fn is_empty(&self) -> bool {
        self.at.is_empty()
    }
}

/// Measured on GRCh38
pub static HG38_PRIOR: PriorTable = PriorTable {
    name: "human",
    at: "-9.064598218,-0.156115265,-0.733150752,-1.137260069,-1.562448179,-1.972014127,-2.496940054,-2.876194859,-3.319246222,-3.562261244,-3.751292148,-3.966307608,-4.075210701,-4.129711096,-4.180840284,-4.230209309,-4.296352417,-4.390849486,-4.486302913,-4.558093185,-4.630189010,-4.682977808,-4.720874604,-4.777244445,-4.840324204,-4.925033952,-5.033877089,-5.142547816,-5.237552201,-5.351023680,-5.484129434,-5.681321567,-5.827054480,-5.950654866,-6.085505317,-6.128587422,-6.130605054,-6.121103702,-6.162595327,-6.235938321,-6.322659140,-6.480266994,-6.630029314,-6.761402160,-6.857772342,-6.903230216,-6.897280883,-6.954008508,-7.031174462,-7.183784626,-7.265257668",
    gc: "-8.952736661,-0.127049254,-0.724514025,-1.304860743,-1.921083364,-2.548855332,-3.251059900,-4.067296280,-4.767137850,-5.178365701,-5.397884227,-5.602488643,-5.813172395,-6.043180632,-6.276043051,-6.532780912,-6.740549057,-6.903518638,-7.126661858,-7.271495424,-7.554796652,-7.630517366,-8.049646674,-7.998494152,-8.049646674,-8.475615406,-8.952736661,-8.174585411,-8.952736661,-8.174585411,-8.651706665,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661,-8.952736661",
};

/// Measured on E. coli K-12
pub static ECOLI_K12_PRIOR: PriorTable = PriorTable {
    name: "ecoli",
    at: "-6.205901275,-0.146046406,-0.713553033,-1.204055110,-1.715900633,-2.136270172,-2.623837912,-3.229551296,-3.892034055,-4.950628770,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275,-6.205901275",
    gc: "-6.258995296,-0.122685760,-0.691951276,-1.458793905,-2.176425332,-2.928175830,-3.771856921,-4.510807269,-5.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296,-6.258995296",
};

///////////////////////////////
/// Organism whose run-length prior goes into the Shasta config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prior {
    Ecoli,
    Human,
}

impl Prior {
    pub fn table(self) -> &'static PriorTable {
        match self {
            Prior::Ecoli => &ECOLI_K12_PRIOR,
            Prior::Human => &HG38_PRIOR,
        }
    }
}

impl FromStr for Prior {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ecoli" => Ok(Prior::Ecoli),
            "human" => Ok(Prior::Human),
            _ => Err(Error::unknown_prior(s)),
        }
    }
}

impl fmt::Display for Prior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table().name)
    }
}
