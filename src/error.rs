//! Error types for the render pipeline.
//!
//! Every variant is terminal for the current render: nothing is drawn once one
//! of these is returned.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The payload is not valid JSON or misses a required field.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The payload contains neither branches nor leaves.
    #[error("payload contains no nodes")]
    EmptyInput,

    /// The edges do not single out exactly one node without a parent.
    #[error("expected exactly one root node, found {count}")]
    MultipleOrNoRoot { count: usize },
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
