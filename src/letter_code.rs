//! A single classified nucleotide or amino-acid character.

use std::fmt;

use log::warn;

use crate::codes::{self, SequenceKind};
use crate::formats::{FastaError, FastaResult};

/// One letter code of a sequence.
///
/// Only the code and the kind are stored. Every classification property
/// (`description`, `is_degenerate`, `is_supported`) is derived from them and
/// the static tables, so changing the kind reclassifies the code.
#[derive(Debug, Clone, Copy)]
pub struct LetterCode {
    code: char,
    kind: Option<SequenceKind>,
}

impl LetterCode {
    /// Creates a letter code, uppercasing `code`.
    pub fn new(code: char, kind: Option<SequenceKind>) -> Self {
        Self {
            code: uppercase(code),
            kind,
        }
    }

    /// The uppercased character.
    pub fn code(&self) -> char {
        self.code
    }

    pub fn kind(&self) -> Option<SequenceKind> {
        self.kind
    }

    /// Sets the kind, reclassifying the code.
    pub fn set_kind(&mut self, kind: Option<SequenceKind>) {
        self.kind = kind;
    }

    /// Resets the kind to unknown.
    pub fn clear_kind(&mut self) {
        self.kind = None;
    }

    /// Name of the nucleotide or amino acid, empty when the kind is unknown
    /// or the code is not defined for it.
    pub fn description(&self) -> &'static str {
        match self.kind {
            Some(kind) => kind
                .good_code(self.code)
                .or_else(|| kind.degenerate_code(self.code))
                .unwrap_or(""),
            None => "",
        }
    }

    /// `Some(true)` for degenerate codes, `Some(false)` for good ones and
    /// `None` when the kind is unknown or the code is not defined for it.
    pub fn is_degenerate(&self) -> Option<bool> {
        let kind = self.kind?;
        if kind.good_code(self.code).is_some() {
            Some(false)
        } else if kind.degenerate_code(self.code).is_some() {
            Some(true)
        } else {
            None
        }
    }

    /// True if the kind is known and the code is defined for it.
    pub fn is_supported(&self) -> bool {
        self.kind.is_some_and(|kind| kind.is_valid_code(self.code))
    }

    /// True if the code is defined for either kind.
    pub fn in_spec(&self) -> bool {
        codes::is_in_spec(self.code)
    }

    /// Complementary letter code.
    ///
    /// Codes without a nucleotide complement are returned unchanged. This
    /// also applies to amino-acid codes when the kind is unknown, which gives
    /// meaningless results for non-nucleotide data.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` if the kind is amino acid.
    pub fn complement(&self) -> FastaResult<LetterCode> {
        match self.kind {
            Some(SequenceKind::AminoAcid) => Err(FastaError::InvalidOperation(
                "complement is not possible for amino acids".to_string(),
            )),
            kind => {
                if kind.is_none() {
                    warn!(
                        "letter code '{}' is not explicitly a nucleotide, its complement might not make sense",
                        self.code
                    );
                }
                Ok(LetterCode::new(self.complementary_code(), kind))
            }
        }
    }

    /// Complement table lookup with the unchanged-code fallback, no kind checks.
    pub(crate) fn complementary_code(&self) -> char {
        codes::nucleotide_complement(self.code).unwrap_or(self.code)
    }
}

/// Parses a one-character string.
impl TryFrom<&str> for LetterCode {
    type Error = FastaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Ok(LetterCode::new(code, None)),
            _ => Err(FastaError::InvalidArgument(format!(
                "letter code must be a single character (got '{}')",
                value
            ))),
        }
    }
}

impl PartialEq for LetterCode {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for LetterCode {}

impl PartialEq<char> for LetterCode {
    fn eq(&self, other: &char) -> bool {
        self.code == uppercase(*other)
    }
}

impl fmt::Display for LetterCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// Uppercases a character, keeping it as is when its uppercase form is
/// more than one character (e.g. 'ß').
pub(crate) fn uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
