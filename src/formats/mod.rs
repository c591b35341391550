//! FASTA reading and writing.
//!
//! - `reader`: line-by-line state machine turning text into records
//! - `writer`: canonical wrapped output of records
//!
//! Both share the error type and the definition-line parser defined here.

pub mod reader;
pub mod writer;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use reader::{FastaRecord, QuickFasta, Reader, ReaderOptions};
pub use writer::{ToFasta, Writer};

/// Default number of sequence characters per line when writing.
pub const DEFAULT_LINE_WIDTH: usize = 70;

/// Errors raised by the sequence model, the reader and the writer.
#[derive(Error, Debug)]
pub enum FastaError {
    /// Malformed input to a constructor or method.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation not allowed in the current state (e.g. complementing amino acids).
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// How the reader materializes records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMethod {
    /// Full `FastaSequence` objects with letter-code classification.
    #[default]
    Rich,
    /// Raw `(header, sequence)` pairs, no classification.
    Quick,
}

impl fmt::Display for ParseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMethod::Rich => write!(f, "rich"),
            ParseMethod::Quick => write!(f, "quick"),
        }
    }
}

impl FromStr for ParseMethod {
    type Err = FastaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rich" => Ok(ParseMethod::Rich),
            "quick" => Ok(ParseMethod::Quick),
            other => Err(FastaError::InvalidArgument(format!(
                "parse method must be one of: rich, quick (got '{}')",
                other
            ))),
        }
    }
}

/// Splits a definition line into id and description.
///
/// The id is the first whitespace-delimited token, without its leading `>`s;
/// the description is the remainder. Both can be empty.
///
/// ```
/// use fastaparser::formats::parse_definition_line;
///
/// assert_eq!(parse_definition_line(">sp|P69905 Hemoglobin alpha"), ("sp|P69905", "Hemoglobin alpha"));
/// assert_eq!(parse_definition_line(">"), ("", ""));
/// ```
pub fn parse_definition_line(line: &str) -> (&str, &str) {
    let line = line.trim();
    let (id, description) = match line.split_once(char::is_whitespace) {
        Some((id, rest)) => (id, rest.trim_start()),
        None => (line, ""),
    };
    (id.trim_start_matches('>'), description)
}
