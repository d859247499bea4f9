//! Error types for reading and writing XML element trees.

use thiserror::Error;

/// Result type alias for quarto-xml-tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or serializing a tree.
///
/// Navigation and mutation never fail; a missing child, path or attribute is
/// reported as `None`, `false` or an empty string instead.
#[derive(Debug, Error)]
pub enum Error {
    /// XML syntax error from quick-xml.
    #[error("XML syntax error: {}{}", .message, .position.as_ref().map(|pos| format!(" at byte {}", pos)).unwrap_or_default())]
    XmlSyntax {
        message: String,
        /// Byte offset where the error occurred.
        position: Option<u64>,
    },

    /// The input ended while an element was still open.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// What was expected when EOF was encountered.
        expected: String,
    },

    /// An end tag that does not close the innermost open element.
    #[error("Mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag { expected: String, found: String },

    /// Invalid XML structure.
    #[error("Invalid XML structure: {message}")]
    InvalidStructure { message: String },

    /// Empty document (no root element).
    #[error("Empty XML document: no root element found")]
    EmptyDocument,

    /// A second top-level element.
    #[error("Invalid XML: multiple root elements")]
    MultipleRoots,

    /// The output sink rejected serialized data.
    #[error("Failed to write XML output: {0}")]
    Write(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input was not well-formed markup. Raised by the parser.
    MalformedInput,
    /// The output sink failed. Raised by the writer.
    WriteFailure,
}

impl Error {
    /// Which side of the round trip produced this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Write(_) => ErrorKind::WriteFailure,
            _ => ErrorKind::MalformedInput,
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlSyntax {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlSyntax {
            message: format!("Attribute error: {}", err),
            position: None,
        }
    }
}
