//! Letter-code tables for nucleotides and amino acids.
//!
//! This module provides:
//! - The sequence kind (`nucleotide` / `aminoacid`)
//! - "Good" and degenerate letter codes for each kind, with their names
//! - Nucleotide complements (IUPAC)
//! - The derived sets used for type inference
//!
//! Each table is a `const` slice for iteration plus a `match` lookup, so
//! nothing needs initialising at runtime.

use std::fmt;
use std::str::FromStr;

use crate::formats::FastaError;

/// Kind of a sequence or letter code.
///
/// An unknown kind is expressed as `Option<SequenceKind>::None` throughout
/// the crate, so every consumer has to handle it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    Nucleotide,
    AminoAcid,
}

impl SequenceKind {
    /// Name used in FASTA tooling and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SequenceKind::Nucleotide => "nucleotide",
            SequenceKind::AminoAcid => "aminoacid",
        }
    }

    /// Name of `code` if it is a non-degenerate code of this kind.
    pub fn good_code(&self, code: char) -> Option<&'static str> {
        match self {
            SequenceKind::Nucleotide => nucleotide_good(code),
            SequenceKind::AminoAcid => aminoacid_good(code),
        }
    }

    /// Name of `code` if it is a degenerate code of this kind.
    pub fn degenerate_code(&self, code: char) -> Option<&'static str> {
        match self {
            SequenceKind::Nucleotide => nucleotide_degenerate(code),
            SequenceKind::AminoAcid => aminoacid_degenerate(code),
        }
    }

    /// Whether `code` is defined (good or degenerate) for this kind.
    pub fn is_valid_code(&self, code: char) -> bool {
        self.good_code(code).is_some() || self.degenerate_code(code).is_some()
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SequenceKind {
    type Err = FastaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nucleotide" => Ok(SequenceKind::Nucleotide),
            "aminoacid" => Ok(SequenceKind::AminoAcid),
            other => Err(FastaError::InvalidArgument(format!(
                "sequence kind must be one of: nucleotide, aminoacid (got '{}')",
                other
            ))),
        }
    }
}

/// Declares a code table both as a `const` slice, for iteration, and as a
/// `match`-based lookup function.
macro_rules! code_table {
    ($(#[$doc:meta])* $table:ident, $lookup:ident: $value:ty { $($code:literal => $entry:expr,)* }) => {
        $(#[$doc])*
        pub const $table: &[(char, $value)] = &[$(($code, $entry)),*];

        $(#[$doc])*
        pub fn $lookup(code: char) -> Option<$value> {
            match code {
                $($code => Some($entry),)*
                _ => None,
            }
        }
    };
}

code_table! {
    /// Non-degenerate nucleotide codes.
    NUCLEOTIDE_CODES_GOOD, nucleotide_good: &'static str {
        'A' => "adenosine",
        'C' => "cytidine",
        'G' => "guanine",
        'T' => "thymidine",
        'N' => "any (A/G/C/T)",
        'U' => "uridine",
    }
}

code_table! {
    /// Degenerate (ambiguity) nucleotide codes.
    NUCLEOTIDE_CODES_DEGENERATE, nucleotide_degenerate: &'static str {
        'K' => "keto (G/T)",
        'S' => "strong (G/C)",
        'Y' => "pyrimidine (T/C)",
        'M' => "amino (A/C)",
        'W' => "weak (A/T)",
        'R' => "purine (G/A)",
        'B' => "G/T/C",
        'D' => "G/A/T",
        'H' => "A/C/T",
        'V' => "G/C/A",
        '-' => "gap of indeterminate length",
    }
}

code_table! {
    /// Nucleotide code to its base-pairing counterpart.
    NUCLEOTIDE_CODES_COMPLEMENT, nucleotide_complement: char {
        'A' => 'T',
        'C' => 'G',
        'G' => 'C',
        'T' => 'A',
        'N' => 'N',
        'U' => 'A',
        'K' => 'M',
        'S' => 'S',
        'Y' => 'R',
        'M' => 'K',
        'W' => 'W',
        'R' => 'Y',
        'B' => 'V',
        'D' => 'H',
        'H' => 'D',
        'V' => 'B',
        '-' => '-',
    }
}

code_table! {
    /// Non-degenerate amino-acid codes.
    AMINOACID_CODES_GOOD, aminoacid_good: &'static str {
        'A' => "alanine",
        'B' => "aspartate/asparagine",
        'C' => "cystine",
        'D' => "aspartate",
        'E' => "glutamate",
        'F' => "phenylalanine",
        'G' => "glycine",
        'H' => "histidine",
        'I' => "isoleucine",
        'K' => "lysine",
        'L' => "leucine",
        'M' => "methionine",
        'N' => "asparagine",
        'P' => "proline",
        'Q' => "glutamine",
        'R' => "arginine",
        'S' => "serine",
        'T' => "threonine",
        'U' => "selenocysteine",
        'V' => "valine",
        'W' => "tryptophan",
        'Y' => "tyrosine",
        'Z' => "glutamate/glutamine",
        'X' => "any",
        '*' => "translation stop",
    }
}

code_table! {
    /// Degenerate amino-acid codes.
    AMINOACID_CODES_DEGENERATE, aminoacid_degenerate: &'static str {
        '-' => "gap of indeterminate length",
    }
}

/// Amino-acid codes that are not nucleotide codes. Their presence is the
/// only positive signal type inference can rely on.
pub const AMINOACID_ONLY_CODES: &[char] = &['E', 'F', 'I', 'L', 'P', 'Q', 'X', 'Z', '*'];

/// Whether `code` is defined by either kind.
pub fn is_in_spec(code: char) -> bool {
    SequenceKind::Nucleotide.is_valid_code(code) || SequenceKind::AminoAcid.is_valid_code(code)
}

/// Whether `code` can only be an amino acid.
pub fn is_aminoacid_only(code: char) -> bool {
    SequenceKind::AminoAcid.is_valid_code(code) && !SequenceKind::Nucleotide.is_valid_code(code)
}
