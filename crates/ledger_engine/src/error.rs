use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Input rejected before any computation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid {param} format. Use YYYY-MM-DD.")]
    InvalidDate { param: &'static str, value: String },

    #[error("Invalid client_id: {0}")]
    InvalidClientId(String),
}
