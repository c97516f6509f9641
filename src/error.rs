//! Error types for reading FMB exports.

use thiserror::Error;

/// Errors that can occur while reading an FMB XML export.
///
/// Only the structural parser fails. Classification and trigger analysis
/// degrade gracefully and never return an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormsError {
    /// The document is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// The top-level element is not a `Module`.
    #[error("Missing Module root element (found <{found}>)")]
    MissingRoot { found: String },

    /// Input bytes are not valid UTF-8.
    #[error("Invalid UTF-8: {0}")]
    Utf8(String),
}

impl FormsError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a missing root error.
    pub fn missing_root(found: impl Into<String>) -> Self {
        Self::MissingRoot {
            found: found.into(),
        }
    }

    /// True if the document could not be read as XML at all.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Xml(_) | Self::Utf8(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = FormsError> = std::result::Result<T, E>;
