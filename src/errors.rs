use thiserror::Error;

///////////////////////////////
/// Errors raised while parsing or converting alignment statistics.
///
/// These are the typed root causes; file names and line numbers are attached
/// as anyhow context by the caller.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Invalid base '{}' has no complement", *base as char)]
    InvalidBase { base: u8 },

    #[error("Schema mismatch at line {}{}", line, Error::format_msg_as_detail(msg))]
    SchemaMismatch { line: usize, msg: Option<String> },

    #[error("Malformed input at line {}{}", line, Error::format_msg_as_detail(msg))]
    MalformedInput { line: usize, msg: Option<String> },

    #[error("Unknown or unspecified prior '{}'. Choose between 'ecoli' and 'human'", prior)]
    UnknownPrior { prior: String },

    #[error("Invalid parameter '{}'{}", name, Error::format_msg_as_detail(msg))]
    InvalidParameter { name: String, msg: Option<String> },
}

impl Error {
    #[cold]
    pub fn invalid_base(base: u8) -> Self {
        Error::InvalidBase { base }
    }

    #[cold]
    pub fn schema_mismatch<M: Into<String>>(line: usize, msg: Option<M>) -> Self {
        Error::SchemaMismatch {
            line,
            msg: msg.map(|m| m.into()),
        }
    }

    #[cold]
    pub fn malformed_input<M: Into<String>>(line: usize, msg: Option<M>) -> Self {
        Error::MalformedInput {
            line,
            msg: msg.map(|m| m.into()),
        }
    }

    #[cold]
    pub fn unknown_prior<P: Into<String>>(prior: P) -> Self {
        Error::UnknownPrior {
            prior: prior.into(),
        }
    }

    #[cold]
    pub fn invalid_parameter<N: Into<String>, M: Into<String>>(name: N, msg: Option<M>) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            msg: msg.map(|m| m.into()),
        }
    }

    pub fn format_msg_as_detail(msg: &Option<String>) -> String {
        match msg {
            Some(m) => format!(" ({})", m),
            None => String::new(),
        }
    }
}
