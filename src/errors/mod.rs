use thiserror::Error;

/// Typed error hierarchy for telebridge.
///
/// Per-message failures (`NoMessage`, `MalformedPayload`, `Validation`, `Delivery`) are
/// logged and dropped by the relay loop. `Config` aborts the process at startup and
/// `StreamClosed` ends the relay loop so a supervisor can restart it. Leaf code can keep
/// using `anyhow::Result`; the `Internal` variant converts through `?`.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("no message in update")]
    NoMessage,

    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("invalid send request: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("delivery to {target} failed: {message}")]
    Delivery { target: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} stream closed")]
    StreamClosed(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience alias for results using `RelayError`.
pub type RelayResult<T> = std::result::Result<T, RelayError>;

impl RelayError {
    /// Whether the relay should drop the offending message and keep running.
    pub fn is_droppable(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::StreamClosed(_))
    }

    pub fn delivery(target: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Delivery {
            target: target.into(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests;
