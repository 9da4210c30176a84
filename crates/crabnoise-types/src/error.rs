use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrabNoiseError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CrabNoiseResult<T> = Result<T, CrabNoiseError>;

/// Reject non-finite values. `name` is used in the error message.
pub fn ensure_finite(name: &str, value: f64) -> CrabNoiseResult<f64> {
    if !value.is_finite() {
        return Err(CrabNoiseError::InvalidArgument(format!(
            "{name} must be finite, got {value}"
        )));
    }
    Ok(value)
}

/// Reject non-finite or non-positive values.
pub fn ensure_positive(name: &str, value: f64) -> CrabNoiseResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CrabNoiseError::InvalidArgument(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(value)
}

/// Reject non-finite or negative values.
pub fn ensure_non_negative(name: &str, value: f64) -> CrabNoiseResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CrabNoiseError::InvalidArgument(format!(
            "{name} must be finite and >= 0, got {value}"
        )));
    }
    Ok(value)
}
