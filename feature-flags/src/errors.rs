use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlagError {
    #[error("Flag {0} not found")]
    NotFound(String),
    #[error("Flag id {0} is already registered")]
    DuplicateId(String),
    #[error("Flag {flag_id} uses an unsupported operator in condition {condition_index}")]
    UnsupportedOperator {
        flag_id: String,
        condition_index: usize,
    },
    #[error("failed to read flag definitions from {}: {source}", .path.display())]
    DefinitionsUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse data: {0}")]
    DataParsingError(#[from] serde_json::Error),
}

impl FlagError {
    /// Stable snake_case code for this error, used as a metrics label and in logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            FlagError::NotFound(_) => "flag_not_found",
            FlagError::DuplicateId(_) => "duplicate_flag_id",
            FlagError::UnsupportedOperator { .. } => "unsupported_operator",
            FlagError::DefinitionsUnavailable { .. } => "definitions_unavailable",
            FlagError::DataParsingError(_) => "data_parsing_error",
        }
    }
}
