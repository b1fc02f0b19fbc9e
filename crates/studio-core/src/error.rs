use thiserror::Error;

/// Failures raised by the analytics core.
///
/// Short or empty histories are never errors; every analytic has a neutral
/// default for them.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid rank '{symbol}': expected one of A, 2-10, J, Q, K")]
    InvalidRank { symbol: String },
    #[error("unsupported history snapshot version {0}")]
    UnsupportedVersion(u32),
    #[error("failed to decode history snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub fn invalid_rank(symbol: impl Into<String>) -> Self {
        CoreError::InvalidRank {
            symbol: symbol.into(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

impl ValidationError {
    pub(crate) fn field(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
