//! Log processing errors.

use std::path::PathBuf;

/// Errors raised while reading or interpreting a game log.
///
/// Unrecognized lines and unknown labels are not errors; extractors skip them
/// and log a warning. Only I/O failures and numbers that a pattern captured
/// but cannot be converted abort a run.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid number '{value}' for {field}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<ParseError>,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read log: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write annotated output: {0}")]
    Output(#[source] std::io::Error),
}

impl ParseError {
    /// Name the file a bare read error came from.
    pub fn in_file(self, path: &std::path::Path) -> Self {
        match self {
            ParseError::Read(source) => ParseError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }

    /// Attach a 1-based line number to an error raised by an extractor.
    pub fn at_line(self, line: usize) -> Self {
        ParseError::AtLine {
            line,
            source: Box::new(self),
        }
    }
}
