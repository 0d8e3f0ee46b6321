use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Upstream returned HTTP {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("Upstream rejected credentials: {0}")]
    Unauthorized(String),

    #[error("Rate limited by upstream API")]
    RateLimited,

    #[error("Failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid item id: {0}")]
    InvalidId(String),

    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("Item not found: {0}")]
    NotFound(String),
}

impl CatalogError {
    /// True for failures that originate on the upstream side of the adapter.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            CatalogError::Upstream(_)
                | CatalogError::UpstreamStatus { .. }
                | CatalogError::Unauthorized(_)
                | CatalogError::RateLimited
                | CatalogError::Decode(_)
        )
    }
}
