use thiserror::Error;

#[derive(Error, Debug)]
pub enum InteriorError {
    #[error("Solver did not converge after {iterations} iterations (max density change {residual} kg/m^3)")]
    NonConvergence { iterations: usize, residual: f64 },

    #[error("Unsupported equation of state form: {0}")]
    UnsupportedForm(String),

    #[error("Numeric domain violation: {0}")]
    NumericDomain(String),

    #[error("Invalid shell grid: {0}")]
    InvalidGrid(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type InteriorResult<T> = Result<T, InteriorError>;
