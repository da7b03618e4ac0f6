//! Error taxonomy for catalog construction and queries.
//!
//! Query preconditions (`InvalidFacet`, `EmptyQuery`) are caller mistakes and
//! recoverable by fixing the argument; `SchemaViolation` is fatal to catalog
//! load and the catalog must not be used after it is raised. "No matches" is
//! never an error anywhere in the crate; valid queries that hit nothing
//! return empty sequences.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, HubError>;

#[derive(Debug, Error)]
pub enum HubError {
    /// A catalog entry broke a data invariant (priority range, duplicate or
    /// empty id, missing mandatory content type), or the authored file failed
    /// its JSON Schema contract.
    #[error("catalog schema violation: {detail}")]
    SchemaViolation { detail: String },

    /// An unrecognized facet name was passed to the category filter.
    #[error("unknown category facet '{name}'")]
    InvalidFacet { name: String },

    /// A keyword search was given no usable terms after normalization.
    #[error("keyword query contains no usable terms")]
    EmptyQuery,

    #[error("reading catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

impl HubError {
    /// Shorthand for invariant failures detected during catalog construction.
    pub(crate) fn schema(detail: impl Into<String>) -> Self {
        HubError::SchemaViolation {
            detail: detail.into(),
        }
    }

    /// True when the caller can recover by fixing the query argument.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HubError::InvalidFacet { .. } | HubError::EmptyQuery)
    }
}
