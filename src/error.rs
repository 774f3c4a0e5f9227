//! Error types for viewxml.
//!
//! `ViewError` is what callers of the visitor see: one terminal error per
//! failed conversion. Store and writer errors are folded into it.

use std::io;

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur while converting a view to XML.
#[derive(Debug, Error)]
pub enum ViewError {
    /// No writer accepts this payload for the asset kind
    #[error("{payload} not supported for {context}")]
    UnsupportedPayload {
        /// Payload type name
        payload: &'static str,
        /// Asset kind that tried to write it
        context: String,
    },

    /// Asset block carries neither inline data nor a file reference
    #[error("No asset to add")]
    NoAsset,

    /// Output would not be well-formed XML
    #[error("invalid XML in <{element}>: {problem}")]
    InvalidXml {
        /// Tag of the offending element
        element: String,
        /// What is wrong with it
        problem: String,
    },

    /// A writer failed while serializing into the store
    #[error("failed to write {context} asset: {source}")]
    Write {
        /// Asset kind being written
        context: String,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The content store rejected an operation
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for view conversion.
pub type ViewResult<T> = Result<T, ViewError>;

impl ViewError {
    /// Create an unsupported-payload error.
    pub fn unsupported(payload: &'static str, context: impl Into<String>) -> Self {
        Self::UnsupportedPayload {
            payload,
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ViewError::unsupported("Table", "Plot");
        assert_eq!(err.to_string(), "Table not supported for Plot");

        assert_eq!(ViewError::NoAsset.to_string(), "No asset to add");

        let err = ViewError::InvalidXml {
            element: "Text".into(),
            problem: "character data contains '\\u{1}'".into(),
        };
        assert_eq!(err.to_string(), "invalid XML in <Text>: character data contains '\\u{1}'");
    }

    #[test]
    fn test_error_is_send_sync() {
        static_assertions::assert_impl_all!(ViewError: Send, Sync);
    }
}
