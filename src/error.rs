use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkiJumpError {
    #[error("Starting gate search did not converge after {tries} tries")]
    GateConvergence { tries: usize },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type SjResult<T> = Result<T, SkiJumpError>;
