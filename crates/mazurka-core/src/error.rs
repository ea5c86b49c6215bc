// src/error.rs
use thiserror::Error;

/// Central error type for the dispatch core.
///
/// Matching itself never errors: a lookup miss, a duplicate registration or
/// a malformed pattern all resolve representationally. Errors exist only at
/// the edges — registering against a sealed router, and typed parameter
/// extraction.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Registration attempted after the router was compiled.
    #[error("router is sealed: registration is closed after compilation")]
    Sealed,
    /// Captured parameters did not fit the requested shape.
    #[error("invalid path parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),
}

pub type RouterResult<T> = Result<T, RouterError>;
