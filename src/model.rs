//! Data model for FASTA sequences.
//!
//! A `FastaSequence` is a definition line (id + description) and a non-empty
//! vector of `LetterCode`s sharing one sequence kind. It provides:
//! - Complement / reverse complement
//! - GC content and AT/GC ratio (computed once, then cached)
//! - Letter-code counts
//! - FASTA formatting

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Bound, Index, RangeBounds};

use log::warn;

use crate::codes::{self, SequenceKind};
use crate::formats::{FastaError, FastaResult, DEFAULT_LINE_WIDTH};
use crate::letter_code::{uppercase, LetterCode};

/// Cached GC counts: G/C/S codes and the bases they are divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GcCounts {
    gc: usize,
    counted: usize,
}

/// Represents a single FASTA sequence with its definition line.
#[derive(Debug, Clone)]
pub struct FastaSequence {
    id: String,
    description: String,
    sequence: Vec<LetterCode>,
    kind: Option<SequenceKind>,
    type_inferred: bool,
    counts: BTreeMap<char, usize>,
    gc_cache: Cell<Option<GcCounts>>,
    at_cache: Cell<Option<usize>>,
}

impl FastaSequence {
    /// Creates a sequence without definition line or kind.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `sequence` is empty.
    pub fn new(sequence: &str) -> FastaResult<Self> {
        Self::from_parts(sequence, "", "", None, false)
    }

    /// Creates a sequence from its raw string and definition-line parts.
    ///
    /// # Arguments
    ///
    /// * `sequence` - Letter codes, one per character (uppercased)
    /// * `id` - Leading `>` and whitespace removed, inner spaces become `_`
    /// * `description` - Whitespace runs (line breaks included) collapsed to one space
    /// * `kind` - Nucleotide, amino acid or unknown
    /// * `infer_kind` - If `kind` is unknown, look for amino-acid-only codes.
    ///   Inference can only ever detect amino acids: nucleotide codes are
    ///   all valid amino-acid codes, so a nucleotide-looking sequence keeps
    ///   an unknown kind.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `sequence` is empty.
    pub fn from_parts(
        sequence: &str,
        id: &str,
        description: &str,
        kind: Option<SequenceKind>,
        infer_kind: bool,
    ) -> FastaResult<Self> {
        if sequence.is_empty() {
            return Err(FastaError::InvalidArgument(
                "sequence must be a non-empty string".to_string(),
            ));
        }

        let (kind, type_inferred) = match kind {
            None if infer_kind && sequence.chars().map(uppercase).any(codes::is_aminoacid_only) => {
                (Some(SequenceKind::AminoAcid), true)
            }
            kind => (kind, false),
        };

        let letters = sequence.chars().map(|c| LetterCode::new(c, kind)).collect();
        let mut fasta = Self::from_letters(letters, normalize_id(id), normalize_description(description), kind);
        fasta.type_inferred = type_inferred;
        Ok(fasta)
    }

    /// Independent deep copy of `other`.
    pub fn from_fastasequence(other: &FastaSequence) -> Self {
        other.clone()
    }

    /// Builds the struct and the letter-code counts in one pass.
    /// `letters` must be non-empty and already carry `kind`.
    fn from_letters(
        letters: Vec<LetterCode>,
        id: String,
        description: String,
        kind: Option<SequenceKind>,
    ) -> Self {
        let mut counts = BTreeMap::new();
        for letter in &letters {
            *counts.entry(letter.code()).or_insert(0) += 1;
        }
        Self {
            id,
            description,
            sequence: letters,
            kind,
            type_inferred: false,
            counts,
            gc_cache: Cell::new(None),
            at_cache: Cell::new(None),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sets the id, with the same normalisation as on creation.
    pub fn set_id(&mut self, id: &str) {
        self.id = normalize_id(id);
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Sets the description, with the same normalisation as on creation.
    pub fn set_description(&mut self, description: &str) {
        self.description = normalize_description(description);
    }

    /// The letter codes, in file order.
    pub fn sequence(&self) -> &[LetterCode] {
        &self.sequence
    }

    pub fn kind(&self) -> Option<SequenceKind> {
        self.kind
    }

    /// True if the kind was detected from the letter codes rather than given.
    pub fn type_inferred(&self) -> bool {
        self.type_inferred
    }

    /// Sets the kind of the sequence and of every letter code in it.
    pub fn set_kind(&mut self, kind: Option<SequenceKind>) {
        if kind == Some(SequenceKind::AminoAcid) {
            self.gc_cache.set(None);
            self.at_cache.set(None);
        }
        self.kind = kind;
        self.type_inferred = false;
        for letter in &mut self.sequence {
            letter.set_kind(kind);
        }
    }

    /// Resets the kind to unknown.
    pub fn clear_kind(&mut self) {
        self.set_kind(None);
    }

    /// Complementary sequence, reversed if `reverse` is set.
    ///
    /// Codes without a nucleotide complement stay the same, so the result is
    /// meaningless for amino acids read with an unknown kind.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` if the kind is amino acid.
    pub fn complement(&self, reverse: bool) -> FastaResult<FastaSequence> {
        self.check_nucleotide_operation("complement")?;

        let complement_of = |letter: &LetterCode| LetterCode::new(letter.complementary_code(), self.kind);
        let letters: Vec<LetterCode> = if reverse {
            self.sequence.iter().rev().map(complement_of).collect()
        } else {
            self.sequence.iter().map(complement_of).collect()
        };

        let tag = if reverse { "[REVERSE COMPLEMENT]" } else { "[COMPLEMENT]" };
        let description = if self.description.is_empty() {
            tag.to_string()
        } else {
            format!("{} {}", self.description, tag)
        };

        Ok(Self::from_letters(letters, self.id.clone(), description, self.kind))
    }

    /// GC content as a ratio (or a percentage).
    ///
    /// G, C and S (G or C) count as GC. Degenerate codes other than S are
    /// left out of the denominator. The counts are computed on the first
    /// call and reused afterwards.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` if the kind is amino acid.
    pub fn gc_content(&self, as_percentage: bool) -> FastaResult<f64> {
        self.check_nucleotide_operation("GC content")?;

        let counts = self.gc_counts();
        let ratio = if counts.counted == 0 {
            0.0
        } else {
            counts.gc as f64 / counts.counted as f64
        };
        Ok(if as_percentage { ratio * 100.0 } else { ratio })
    }

    /// AT/GC ratio, with W counted as AT and S as GC. Zero when there is no GC.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` if the kind is amino acid.
    pub fn at_gc_ratio(&self) -> FastaResult<f64> {
        self.check_nucleotide_operation("AT/GC ratio")?;

        let gc = self.gc_counts().gc;
        let at = match self.at_cache.get() {
            Some(at) => at,
            None => {
                let at = self
                    .sequence
                    .iter()
                    .filter(|letter| matches!(letter.code(), 'A' | 'T' | 'W'))
                    .count();
                self.at_cache.set(Some(at));
                at
            }
        };

        Ok(if gc == 0 { 0.0 } else { at as f64 / gc as f64 })
    }

    fn gc_counts(&self) -> GcCounts {
        if let Some(counts) = self.gc_cache.get() {
            return counts;
        }
        let mut counts = GcCounts { gc: 0, counted: 0 };
        for letter in &self.sequence {
            let code = letter.code();
            if matches!(code, 'G' | 'C' | 'S') {
                counts.gc += 1;
            }
            if code == 'S' || codes::nucleotide_degenerate(code).is_none() {
                counts.counted += 1;
            }
        }
        self.gc_cache.set(Some(counts));
        counts
    }

    fn check_nucleotide_operation(&self, operation: &str) -> FastaResult<()> {
        match self.kind {
            Some(SequenceKind::AminoAcid) => Err(FastaError::InvalidOperation(format!(
                "{} is not possible for amino-acid sequences",
                operation
            ))),
            Some(SequenceKind::Nucleotide) => Ok(()),
            None => {
                warn!(
                    "sequence '{}' is not explicitly nucleotide, its {} might not make sense",
                    self.id, operation
                );
                Ok(())
            }
        }
    }

    /// Occurrences of every letter code present in the sequence.
    pub fn count_letter_codes(&self) -> BTreeMap<char, usize> {
        self.counts.clone()
    }

    /// Occurrences of the requested letter codes (0 when absent).
    ///
    /// An empty request falls back to `count_letter_codes`.
    pub fn count_letter_codes_for<I>(&self, codes: I) -> BTreeMap<char, usize>
    where
        I: IntoIterator<Item = char>,
    {
        let requested: BTreeMap<char, usize> = codes
            .into_iter()
            .map(|code| (code, self.counts.get(&uppercase(code)).copied().unwrap_or(0)))
            .collect();
        if requested.is_empty() {
            self.count_letter_codes()
        } else {
            requested
        }
    }

    /// Occurrences of the degenerate codes of the sequence kind.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` if the kind is unknown.
    pub fn count_letter_codes_degenerate(&self) -> FastaResult<BTreeMap<char, usize>> {
        let kind = self.kind.ok_or_else(|| {
            FastaError::InvalidOperation(
                "counting degenerate letter codes needs an explicit sequence kind".to_string(),
            )
        })?;
        Ok(self
            .counts
            .iter()
            .filter(|&(&code, _)| kind.degenerate_code(code).is_some())
            .map(|(&code, &count)| (code, count))
            .collect())
    }

    /// `>id description`, or `>id` when there is no description.
    pub fn formatted_definition_line(&self) -> String {
        if self.description.is_empty() {
            format!(">{}", self.id)
        } else {
            format!(">{} {}", self.id, self.description)
        }
    }

    /// The sequence wrapped at `max_chars_per_line`, without trailing line break.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `max_chars_per_line` is 0.
    pub fn formatted_sequence(&self, max_chars_per_line: usize) -> FastaResult<String> {
        if max_chars_per_line == 0 {
            return Err(FastaError::InvalidArgument(
                "max_chars_per_line must be a positive integer".to_string(),
            ));
        }
        Ok(self.wrapped(max_chars_per_line))
    }

    fn wrapped(&self, width: usize) -> String {
        let mut out = String::with_capacity(self.sequence.len() + self.sequence.len() / width);
        for (i, line) in self.sequence.chunks(width).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(line.iter().map(LetterCode::code));
        }
        out
    }

    /// Definition line and sequence wrapped at the default width.
    pub fn formatted_fasta(&self) -> String {
        format!("{}\n{}", self.formatted_definition_line(), self.wrapped(DEFAULT_LINE_WIDTH))
    }

    pub fn sequence_as_string(&self) -> String {
        self.sequence.iter().map(LetterCode::code).collect()
    }

    /// Iterates over the letter codes from the end. Each call starts over.
    pub fn reverse(&self) -> std::iter::Rev<std::slice::Iter<'_, LetterCode>> {
        self.sequence.iter().rev()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LetterCode> {
        self.sequence.iter()
    }

    /// Number of letter codes.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Always false: a sequence cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Letter code at `index`; negative indices count from the end.
    pub fn get(&self, index: isize) -> Option<&LetterCode> {
        let len = self.sequence.len() as isize;
        let index = if index < 0 { len + index } else { index };
        if index < 0 {
            return None;
        }
        self.sequence.get(index as usize)
    }

    /// New sequence holding the letter codes in `range`, with the same id and
    /// kind and the slice noted in the description.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the range is out of bounds or empty.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> FastaResult<FastaSequence> {
        let out_of_bounds = || {
            FastaError::InvalidArgument(format!(
                "slice bound out of range for a sequence of length {}",
                self.sequence.len()
            ))
        };
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.checked_add(1).ok_or_else(out_of_bounds)?,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.checked_add(1).ok_or_else(out_of_bounds)?,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.sequence.len(),
        };
        if end > self.sequence.len() || start >= end {
            return Err(FastaError::InvalidArgument(format!(
                "slice {}..{} of a sequence of length {} is empty or out of bounds",
                start,
                end,
                self.sequence.len()
            )));
        }

        let tag = format!("[SLICE OF ORIGINAL: {}:{}]", start, end);
        let description = if self.description.is_empty() {
            tag
        } else {
            format!("{} {}", self.description, tag)
        };
        Ok(Self::from_letters(
            self.sequence[start..end].to_vec(),
            self.id.clone(),
            description,
            self.kind,
        ))
    }
}

impl Index<usize> for FastaSequence {
    type Output = LetterCode;

    fn index(&self, index: usize) -> &LetterCode {
        &self.sequence[index]
    }
}

impl<'a> IntoIterator for &'a FastaSequence {
    type Item = &'a LetterCode;
    type IntoIter = std::slice::Iter<'a, LetterCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.sequence.iter()
    }
}

/// Equal when the definition lines and the letter codes match.
impl PartialEq for FastaSequence {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.description == other.description && self.sequence == other.sequence
    }
}

impl Eq for FastaSequence {}

impl PartialEq<str> for FastaSequence {
    fn eq(&self, other: &str) -> bool {
        self.sequence.len() == other.chars().count()
            && self.sequence.iter().zip(other.chars()).all(|(letter, c)| letter.code() == c)
    }
}

impl fmt::Display for FastaSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted_fasta())
    }
}

fn normalize_id(id: &str) -> String {
    id.trim()
        .trim_start_matches('>')
        .replace(' ', "_")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

fn normalize_description(description: &str) -> String {
    description.split_whitespace().collect::<Vec<_>>().join(" ")
}
