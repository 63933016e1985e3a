use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Args;

use crate::fileformat::write_marginpolish_config;
use crate::matrix::{NormalizeParams, RunlengthMatrices, DEFAULT_MAX_RUNLENGTH, DEFAULT_PSEUDOCOUNT};
use crate::utils::{datetime_string, ensure_output_dir, output_dir_for};

///////////////////////////////
/// Options shared by the frequency matrix converters
#[derive(Args, Debug, Clone)]
pub struct MatrixConversionArgs {
    /// Frequency matrix csv. Several files, comma separated, are summed
    #[arg(short = 'i', long = "input", value_parser = clap::value_parser!(PathBuf), num_args = 1.., value_delimiter = ',', required = true)]
    pub path_in: Vec<PathBuf>,

    /// Output directory, created if absent. Defaults to the directory of the first input
    #[arg(short = 'o', long = "output", value_parser)]
    pub path_out: Option<PathBuf>,

    /// Added to every cell in the matrix (to prevent extremely low probabilities)
    #[arg(short = 'p', long = "pseudocount", value_parser, default_value_t = DEFAULT_PSEUDOCOUNT)]
    pub pseudocount: f64,

    /// Added to the diagonal (true length == observed length) on top of the pseudocount
    #[arg(long = "diagonal-bias", value_parser, default_value_t = 0.0)]
    pub diagonal_bias: f64,

    /// Largest run-length in the input matrices
    #[arg(long = "max-runlength", value_parser, default_value_t = DEFAULT_MAX_RUNLENGTH)]
    pub max_runlength: usize,

    /// Name of the output file. Generated if not given
    #[arg(long = "filename", value_parser)]
    pub filename: Option<String>,

    /// Write the summed counts instead of log probabilities
    #[arg(long = "raw")]
    pub raw: bool,
}

impl MatrixConversionArgs {
    /// The directory given, else the directory of the first input
    pub fn output_dir(&self) -> anyhow::Result<PathBuf> {
        let first = self
            .path_in
            .first()
            .context("No input frequency matrix given")?;
        Ok(output_dir_for(first, self.path_out.as_ref()))
    }

    /// None when raw counts are requested
    pub fn normalize_params(&self) -> Option<NormalizeParams> {
        if self.raw {
            None
        } else {
            Some(NormalizeParams {
                pseudocount: self.pseudocount,
                diagonal_bias: self.diagonal_bias,
                logify: true,
            })
        }
    }
}

/// Commandline option: Convert directional run-length frequency matrices into a MarginPolish config
#[derive(Args)]
pub struct ToMarginPolishCMD {
    #[command(flatten)]
    pub matrix: MatrixConversionArgs,
}

impl ToMarginPolishCMD {
    /// Run the commandline option
    pub fn try_execute(&mut self) -> Result<()> {
        log::info!("Using pseudocount: {}", self.matrix.pseudocount);

        let path_out = ToMarginPolish::run(&ToMarginPolish {
            path_in: self.matrix.path_in.clone(),
            path_out: self.matrix.output_dir()?,
            filename: self.matrix.filename.clone(),
            max_runlength: self.matrix.max_runlength,
            normalize: self.matrix.normalize_params(),
        })?;

        log::info!("ToMarginPolish has finished succesfully, wrote {}", path_out.display());
        Ok(())
    }
}

/// Algorithm: Sum directional frequency matrices, normalize and write them as a MarginPolish config
pub struct ToMarginPolish {
    pub path_in: Vec<PathBuf>,
    pub path_out: PathBuf,
    pub filename: Option<String>,
    pub max_runlength: usize,
    pub normalize: Option<NormalizeParams>,
}

impl ToMarginPolish {
    /// Default name, e.g. probability_matrices_directional_MP_genomic_2024_3_7_14_5_9_123456.csv
    pub fn default_filename(raw: bool) -> String {
        let prefix = if raw {
            "frequency_matrices"
        } else {
            "probability_matrices"
        };
        format!("{}_directional_MP_genomic_{}.csv", prefix, datetime_string())
    }

    /// Run the algorithm. Returns the path of the written config
    pub fn run(params: &ToMarginPolish) -> anyhow::Result<PathBuf> {
        if let Some(p) = &params.normalize {
            p.validate()?;
        }

        //Everything is read before the output is touched
        let matrices = RunlengthMatrices::from_paths(&params.path_in, params.max_runlength)?;

        ensure_output_dir(&params.path_out)?;
        let filename = params
            .filename
            .clone()
            .unwrap_or_else(|| Self::default_filename(params.normalize.is_none()));
        let path_out = params.path_out.join(filename);

        log::info!("SAVING: {}", path_out.display());
        let file = File::create(&path_out)
            .with_context(|| format!("Could not create {}", path_out.display()))?;
        let mut writer = BufWriter::new(file);
        write_marginpolish_config(&mut writer, &matrices, params.normalize.as_ref())?;
        writer.flush()?;

        Ok(path_out)
    }
}
