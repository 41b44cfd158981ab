use std::io;

use kinematics::{IkError, InputError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Ik(#[from] IkError),
}

impl From<InputError> for CliError {
    fn from(err: InputError) -> Self {
        CliError::Ik(err.into())
    }
}

impl CliError {
    /// 1 when the target is out of reach, 2 for anything wrong with the
    /// request itself, 3 for internal failures. Command-line syntax errors
    /// never get here; clap exits with 2 on its own.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Ik(IkError::Unreachable) => 1,
            CliError::Ik(IkError::NoValidCandidate) => 3,
            _ => 2,
        }
    }
}
