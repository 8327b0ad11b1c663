//! Error types for the PDF generator

use std::io;
use thiserror::Error;

/// Main error type for PDF generation
#[derive(Error, Debug)]
pub enum PDFError {
    /// Registered object has no payload to render
    #[error("Object {0} has no payload to render")]
    EmptyObject(usize),

    /// Object not found in the object table
    #[error("Object not found: {0}")]
    ObjectNotFound(usize),

    /// Invalid object type
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        expected: &'static str,
        found: &'static str,
    },

    /// Missing required dictionary entry
    #[error("Missing required dictionary entry: {0}")]
    MissingDictionaryEntry(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type for PDF generation
pub type PDFResult<T> = Result<T, PDFError>;

impl PDFError {
    /// Create a new invalid object type error
    pub fn invalid_type(expected: &'static str, found: &'static str) -> Self {
        Self::InvalidObjectType { expected, found }
    }

    /// Create a new missing dictionary entry error
    pub fn missing_entry(key: impl Into<String>) -> Self {
        Self::MissingDictionaryEntry(key.into())
    }

    /// Check if error comes from the output sink
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError(_))
    }

    /// Check if error is related to the object graph
    pub fn is_structure_error(&self) -> bool {
        matches!(self,
            Self::EmptyObject(_) |
            Self::ObjectNotFound(_) |
            Self::InvalidObjectType { .. } |
            Self::MissingDictionaryEntry(_)
        )
    }
}
