//! Error types for wavecrate

use thiserror::Error;

/// Main error type for wavecrate operations
///
/// Every parse failure is fatal for the document being read: the parser stops at
/// the first offending statement and no partial document is returned.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrong token count, unknown sub-keyword or unparsable number
    #[error("line {line}: malformed '{keyword}' statement: {message}")]
    MalformedStatement {
        line: usize,
        keyword: String,
        message: String,
    },

    /// An index that does not resolve into its target collection
    #[error("line {line}: '{keyword}' refers to index {index}, only {count} {target} declared")]
    DanglingReference {
        line: usize,
        keyword: String,
        index: i64,
        count: usize,
        target: &'static str,
    },

    /// Statements retired from the format (bsp, bzp, cdc, cdp, res)
    #[error("line {line}: '{keyword}' statement is obsolete and not supported")]
    UnsupportedStatement { line: usize, keyword: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// The 1-based line the failing statement started on, if this is a parse error
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MalformedStatement { line, .. }
            | Error::DanglingReference { line, .. }
            | Error::UnsupportedStatement { line, .. } => Some(*line),
            Error::Io(_) | Error::UnsupportedFormat(_) => None,
        }
    }

    /// The keyword of the failing statement, if this is a parse error
    pub fn keyword(&self) -> Option<&str> {
        match self {
            Error::MalformedStatement { keyword, .. }
            | Error::DanglingReference { keyword, .. }
            | Error::UnsupportedStatement { keyword, .. } => Some(keyword),
            Error::Io(_) | Error::UnsupportedFormat(_) => None,
        }
    }
}

/// Result type alias for wavecrate operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_accessors() {
        let err = Error::MalformedStatement {
            line: 12,
            keyword: "vn".to_string(),
            message: "expected 3 values".to_string(),
        };
        assert_eq!(err.line(), Some(12));
        assert_eq!(err.keyword(), Some("vn"));
        assert_eq!(err.to_string(), "line 12: malformed 'vn' statement: expected 3 values");

        let err = Error::UnsupportedStatement { line: 3, keyword: "bsp".to_string() };
        assert!(err.to_string().contains("bsp"));
    }

    #[test]
    fn test_io_error_has_no_location() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert_eq!(err.line(), None);
        assert_eq!(err.keyword(), None);
    }
}
