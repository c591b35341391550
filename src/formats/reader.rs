//! FASTA reader.
//!
//! Reads a FASTA text stream line by line and yields one record per
//! definition line. It supports both single-line and multi-line sequences.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! >another_sequence
//! TGCATGCATGCA...
//! ```
//!
//! Lines are trimmed before use. Blank lines, and anything before the first
//! `>`, are skipped rather than treated as errors.
//!
//! A read error (including a line that is not valid UTF-8) is yielded once
//! and ends the reader. The record being accumulated at that point is
//! discarded, since its remaining lines are unknown.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::mem;
use std::path::Path;

use log::debug;

use super::{parse_definition_line, FastaResult, ParseMethod};
use crate::codes::SequenceKind;
use crate::model::FastaSequence;

/// Raw record produced by the quick parse method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickFasta {
    /// Definition line, including the leading `>`
    pub header: String,
    /// Sequence lines concatenated
    pub sequence: String,
}

/// A record yielded by the reader.
#[derive(Debug, Clone, PartialEq)]
pub enum FastaRecord {
    Rich(FastaSequence),
    Quick(QuickFasta),
}

impl FastaRecord {
    /// The definition line, with its leading `>`.
    pub fn header(&self) -> String {
        match self {
            FastaRecord::Rich(seq) => seq.formatted_definition_line(),
            FastaRecord::Quick(quick) => quick.header.clone(),
        }
    }

    /// The sequence as a single string.
    pub fn sequence_string(&self) -> String {
        match self {
            FastaRecord::Rich(seq) => seq.sequence_as_string(),
            FastaRecord::Quick(quick) => quick.sequence.clone(),
        }
    }

    pub fn into_rich(self) -> Option<FastaSequence> {
        match self {
            FastaRecord::Rich(seq) => Some(seq),
            FastaRecord::Quick(_) => None,
        }
    }

    pub fn into_quick(self) -> Option<QuickFasta> {
        match self {
            FastaRecord::Quick(quick) => Some(quick),
            FastaRecord::Rich(_) => None,
        }
    }
}

/// Reader settings, applied to every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Kind given to every rich record (ignored in quick mode)
    pub kind: Option<SequenceKind>,
    /// Try to detect amino-acid records (ignored in quick mode)
    pub infer_kind: bool,
    pub parse_method: ParseMethod,
}

/// Parser state between two lines.
#[derive(Debug)]
enum ReaderState {
    /// No definition line seen yet.
    AwaitingHeader,
    /// Accumulating the body of the record started by `header`.
    InBody { header: String, body: String },
    /// End of input (or read error) reached.
    Done,
}

/// Single-pass iterator over the records of a FASTA stream.
///
/// The reader owns its source for its whole lifetime. Once exhausted it
/// keeps returning `None`.
///
/// # Examples
///
/// ```
/// use fastaparser::formats::Reader;
///
/// let input = ">id1 desc one\nACGT\nACGT\n>id2\nMKV\n";
/// let ids: Vec<String> = Reader::new(input.as_bytes())
///     .map(|record| record.unwrap().into_rich().unwrap().id().to_string())
///     .collect();
/// assert_eq!(ids, ["id1", "id2"]);
/// ```
pub struct Reader<R: BufRead> {
    lines: Lines<R>,
    options: ReaderOptions,
    state: ReaderState,
    line_number: usize,
}

impl Reader<BufReader<File>> {
    /// Opens a FASTA file for reading.
    pub fn from_path<P: AsRef<Path>>(path: P, options: ReaderOptions) -> FastaResult<Self> {
        let file = File::open(path)?;
        Ok(Self::with_options(BufReader::new(file), options))
    }
}

impl<R: BufRead> Reader<R> {
    /// Rich reader with unknown kind and no inference.
    pub fn new(source: R) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    pub fn with_options(source: R, options: ReaderOptions) -> Self {
        Self {
            lines: source.lines(),
            options,
            state: ReaderState::AwaitingHeader,
            line_number: 0,
        }
    }

    pub fn kind(&self) -> Option<SequenceKind> {
        self.options.kind
    }

    pub fn infer_kind(&self) -> bool {
        self.options.infer_kind
    }

    pub fn parse_method(&self) -> ParseMethod {
        self.options.parse_method
    }

    /// Advances the state machine to the next complete `(header, body)` pair.
    fn next_raw(&mut self) -> Option<FastaResult<(String, String)>> {
        loop {
            if matches!(self.state, ReaderState::Done) {
                return None;
            }

            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.state = ReaderState::Done;
                    return Some(Err(e.into()));
                }
                None => {
                    return match mem::replace(&mut self.state, ReaderState::Done) {
                        ReaderState::InBody { header, body } if !body.is_empty() => {
                            Some(Ok((header, body)))
                        }
                        ReaderState::InBody { header, .. } => {
                            debug!("dropping record '{}' without sequence at end of input", header);
                            None
                        }
                        _ => None,
                    };
                }
            };
            self.line_number += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let ReaderState::InBody { header, body } = &mut self.state {
                if line.starts_with('>') {
                    let completed = mem::replace(header, line.to_string());
                    return Some(Ok((completed, mem::take(body))));
                }
                body.push_str(line);
            } else if line.starts_with('>') {
                self.state = ReaderState::InBody {
                    header: line.to_string(),
                    body: String::new(),
                };
            } else {
                debug!("skipping line {} before the first header", self.line_number);
            }
        }
    }

    fn materialize(&self, header: String, body: String) -> FastaResult<FastaRecord> {
        match self.options.parse_method {
            ParseMethod::Quick => Ok(FastaRecord::Quick(QuickFasta {
                header,
                sequence: body,
            })),
            ParseMethod::Rich => {
                let (id, description) = parse_definition_line(&header);
                let seq = FastaSequence::from_parts(
                    &body,
                    id,
                    description,
                    self.options.kind,
                    self.options.infer_kind,
                )?;
                Ok(FastaRecord::Rich(seq))
            }
        }
    }
}

impl<R: BufRead> Iterator for Reader<R> {
    type Item = FastaResult<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.next_raw()?;
        Some(raw.and_then(|(header, body)| self.materialize(header, body)))
    }
}
