//! Error types for model decoding

/// Errors while building a model from a raw API object
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Raw value is not a JSON object
    #[error("expected a JSON object for {model}")]
    NotAnObject {
        /// Model being decoded
        model: &'static str,
    },

    /// A field has the wrong type
    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}
