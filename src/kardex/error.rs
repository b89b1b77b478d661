use crate::model::ProductId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KardexError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error: {status}. Details: {detail}")]
    Api { status: u16, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl KardexError {
    /// True for failures worth retrying as-is: timeouts and transport
    /// errors, as opposed to definitive server rejections.
    pub fn is_retryable(&self) -> bool {
        match self {
            KardexError::Network(e) => e.is_timeout() || e.is_connect(),
            KardexError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, KardexError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;

    #[test]
    fn server_side_statuses_are_retryable_rejections_are_not() {
        let flaky = KardexError::Api {
            status: 503,
            detail: "try later".into(),
        };
        assert!(flaky.is_retryable());

        let rejected = KardexError::Api {
            status: 422,
            detail: "bad payload".into(),
        };
        assert!(!rejected.is_retryable());

        assert!(!KardexError::NotFound(ProductId::new("x")).is_retryable());
    }
}
