use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Args;

use super::to_marginpolish::MatrixConversionArgs;
use crate::fileformat::{write_shasta_config, ShastaHeader};
use crate::matrix::{NormalizeParams, Prior, RunlengthMatrices};
use crate::utils::{ensure_output_dir, file_stem};

pub const SHASTA_SUFFIX: &str = "_shasta_bayesian_config.csv";

/// Commandline option: Convert run-length frequency matrices into a Shasta Bayesian consensus config
#[derive(Args)]
pub struct ToShastaCMD {
    #[command(flatten)]
    pub matrix: MatrixConversionArgs,

    /// Run-length prior: Ecoli ('ecoli') or Human ('human')
    #[arg(long = "prior", value_parser)]
    pub prior: String,

    /// Descriptive name for the config header. Ideally organism + region + sequencer
    #[arg(short = 'n', long = "name", value_parser)]
    pub name: String,
}

impl ToShastaCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        let prior: Prior = self.prior.parse()?;
        log::info!("Using pseudocount: {}", self.matrix.pseudocount);

        let path_out = ToShasta::run(&ToShasta {
            path_in: self.matrix.path_in.clone(),
            path_out: self.matrix.output_dir()?,
            filename: self.matrix.filename.clone(),
            max_runlength: self.matrix.max_runlength,
            normalize: self.matrix.normalize_params(),
            header: ShastaHeader {
                name: self.name.clone(),
                pseudocount: self.matrix.pseudocount,
                prior,
            },
        })?;

        log::info!("ToShasta has finished succesfully, wrote {}", path_out.display());
        Ok(())
    }
}

/// Algorithm: Sum frequency matrices over both strands, normalize and write a Shasta config
pub struct ToShasta {
    pub path_in: Vec<PathBuf>,
    pub path_out: PathBuf,
    pub filename: Option<String>,
    pub max_runlength: usize,
    pub normalize: Option<NormalizeParams>,
    pub header: ShastaHeader,
}

impl ToShasta {
    /// Run the algorithm. Returns the path of the written config
    pub fn run(params: &ToShasta) -> anyhow::Result<PathBuf> {
        if let Some(p) = &params.normalize {
            p.validate()?;
        }

        let table = params.header.prior.table();
        if table.len() != params.max_runlength + 1 {
            log::warn!(
                "The {} prior covers run-lengths up to {} but the matrices go up to {}",
                table.name,
                table.len() - 1,
                params.max_runlength
            );
        }

        let matrices = RunlengthMatrices::from_paths(&params.path_in, params.max_runlength)?;
        let counts = matrices.collapse_directions();

        ensure_output_dir(&params.path_out)?;
        let filename = match &params.filename {
            Some(f) => f.clone(),
            None => {
                let first = params
                    .path_in
                    .first()
                    .context("No input frequency matrix given")?;
                format!("{}{}", file_stem(first), SHASTA_SUFFIX)
            }
        };
        let path_out = params.path_out.join(filename);

        log::info!("SAVING: {}", path_out.display());
        let file = File::create(&path_out)
            .with_context(|| format!("Could not create {}", path_out.display()))?;
        let mut writer = BufWriter::new(file);
        write_shasta_config(&mut writer, &params.header, &counts, params.normalize.as_ref())?;
        writer.flush()?;

        Ok(path_out)
    }
}
