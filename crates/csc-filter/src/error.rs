//! Error types for filter schemas
//!
//! Reconciliation itself never fails; only loading a schema can.

/// Errors while loading a [`FilterSchema`](crate::FilterSchema)
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Schema text is not a valid schema document
    #[error("invalid filter schema: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SchemaError::from(source);
        assert!(err.to_string().starts_with("invalid filter schema:"));
    }
}
