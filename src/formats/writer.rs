//! FASTA writer.
//!
//! Writes records in canonical form: definition line, the sequence wrapped
//! at a fixed width (70 by default) and a trailing line break. Output is
//! appended at the sink's current position; truncating or appending to an
//! existing file is decided by how the caller opened it.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::reader::{FastaRecord, QuickFasta};
use super::{parse_definition_line, FastaError, FastaResult, DEFAULT_LINE_WIDTH};
use crate::model::FastaSequence;

/// Anything the writer can turn into a FASTA record.
///
/// Implemented for `FastaSequence`, reader records and `(header, sequence)`
/// string pairs. A pair's header may start with any number of `>` (written
/// as exactly one) and may be empty; its sequence may contain line breaks but must not be empty.
pub trait ToFasta {
    /// Definition line and unwrapped sequence, ready for wrapping.
    /// Existing sequences are borrowed, not copied.
    fn to_fasta_sequence(&self) -> FastaResult<Cow<'_, FastaSequence>>;
}

impl ToFasta for FastaSequence {
    fn to_fasta_sequence(&self) -> FastaResult<Cow<'_, FastaSequence>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<H: AsRef<str>, S: AsRef<str>> ToFasta for (H, S) {
    fn to_fasta_sequence(&self) -> FastaResult<Cow<'_, FastaSequence>> {
        pair_to_sequence(self.0.as_ref(), self.1.as_ref()).map(Cow::Owned)
    }
}

impl ToFasta for QuickFasta {
    fn to_fasta_sequence(&self) -> FastaResult<Cow<'_, FastaSequence>> {
        pair_to_sequence(&self.header, &self.sequence).map(Cow::Owned)
    }
}

impl ToFasta for FastaRecord {
    fn to_fasta_sequence(&self) -> FastaResult<Cow<'_, FastaSequence>> {
        match self {
            FastaRecord::Rich(seq) => seq.to_fasta_sequence(),
            FastaRecord::Quick(quick) => quick.to_fasta_sequence(),
        }
    }
}

impl<T: ToFasta + ?Sized> ToFasta for &T {
    fn to_fasta_sequence(&self) -> FastaResult<Cow<'_, FastaSequence>> {
        (**self).to_fasta_sequence()
    }
}

fn pair_to_sequence(header: &str, sequence: &str) -> FastaResult<FastaSequence> {
    let sequence: String = sequence.chars().filter(|&c| c != '\n' && c != '\r').collect();
    if sequence.is_empty() {
        return Err(FastaError::InvalidArgument(format!(
            "record '{}' has an empty sequence",
            header
        )));
    }
    let (id, description) = parse_definition_line(header);
    FastaSequence::from_parts(&sequence, id, description, None, false)
}

/// Writes FASTA records to a sink it owns exclusively.
///
/// # Examples
///
/// ```
/// use fastaparser::formats::Writer;
///
/// let mut writer = Writer::new(Vec::new());
/// writer.write_fasta(&("seq1 example", "ACGT")).unwrap();
/// assert_eq!(writer.into_inner(), b">seq1 example\nACGT\n");
/// ```
pub struct Writer<W: Write> {
    sink: W,
    line_width: usize,
}

impl Writer<BufWriter<File>> {
    /// Creates (or truncates) a FASTA file for writing.
    pub fn create<P: AsRef<Path>>(path: P) -> FastaResult<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Writer<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }

    /// Writer wrapping sequences at `line_width` characters.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `line_width` is 0.
    pub fn with_line_width(sink: W, line_width: usize) -> FastaResult<Self> {
        if line_width == 0 {
            return Err(FastaError::InvalidArgument(
                "line width must be a positive integer".to_string(),
            ));
        }
        Ok(Self { sink, line_width })
    }

    pub fn line_width(&self) -> usize {
        self.line_width
    }

    /// Writes a single record.
    pub fn write_fasta<T: ToFasta + ?Sized>(&mut self, record: &T) -> FastaResult<()> {
        let seq = record.to_fasta_sequence()?;
        writeln!(self.sink, "{}", seq.formatted_definition_line())?;
        writeln!(self.sink, "{}", seq.formatted_sequence(self.line_width)?)?;
        Ok(())
    }

    /// Writes every record in order, stopping at the first failure.
    pub fn write_fastas<I>(&mut self, records: I) -> FastaResult<()>
    where
        I: IntoIterator,
        I::Item: ToFasta,
    {
        for record in records {
            self.write_fasta(&record)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> FastaResult<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Returns the sink. Buffered sinks are not flushed.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::SequenceKind;

    fn written<F: FnOnce(&mut Writer<Vec<u8>>) -> FastaResult<()>>(f: F) -> FastaResult<String> {
        let mut writer = Writer::new(Vec::new());
        f(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner()).unwrap())
    }

    #[test]
    fn test_write_fasta_sequence() {
        let seq = FastaSequence::from_parts("ACGT", "id1", "desc one", Some(SequenceKind::Nucleotide), false)
            .unwrap();
        let out = written(|w| w.write_fasta(&seq)).unwrap();
        assert_eq!(out, ">id1 desc one\nACGT\n");
    }

    #[test]
    fn test_write_pair_normalizes_header() {
        let out = written(|w| w.write_fasta(&("id1 desc", "ACGT"))).unwrap();
        assert_eq!(out, ">id1 desc\nACGT\n");
        let out = written(|w| w.write_fasta(&(">id1 desc", "AC\nGT\n"))).unwrap();
        assert_eq!(out, ">id1 desc\nACGT\n");
        let out = written(|w| w.write_fasta(&("", "ACGT"))).unwrap();
        assert_eq!(out, ">\nACGT\n");
    }

    #[test]
    fn test_write_pair_with_repeated_marker() {
        let out = written(|w| w.write_fasta(&(">>>id d", "AC"))).unwrap();
        assert_eq!(out, ">id d\nAC\n");
        let quick = QuickFasta {
            header: ">>q".to_string(),
            sequence: "GT".to_string(),
        };
        assert_eq!(written(|w| w.write_fasta(&quick)).unwrap(), ">q\nGT\n");
    }

    #[test]
    fn test_sequences_are_borrowed() {
        let seq = FastaSequence::new("ACGT").unwrap();
        assert!(matches!(seq.to_fasta_sequence(), Ok(Cow::Borrowed(_))));
        assert!(matches!((&&seq).to_fasta_sequence(), Ok(Cow::Borrowed(_))));
        let record = FastaRecord::Rich(seq);
        assert!(matches!(record.to_fasta_sequence(), Ok(Cow::Borrowed(_))));
        assert!(matches!(("id", "AC").to_fasta_sequence(), Ok(Cow::Owned(_))));
    }

    #[test]
    fn test_write_pair_empty_sequence_fails() {
        let result = written(|w| w.write_fasta(&("id1", "")));
        assert!(matches!(result, Err(FastaError::InvalidArgument(_))));
        let result = written(|w| w.write_fasta(&("id1", "\n")));
        assert!(matches!(result, Err(FastaError::InvalidArgument(_))));
    }

    #[test]
    fn test_wrapping() {
        let raw = "ACGT".repeat(20);
        let out = written(|w| w.write_fasta(&("long", raw.as_str()))).unwrap();
        assert_eq!(out, format!(">long\n{}\n{}\n", &raw[..70], &raw[70..]));

        let mut writer = Writer::with_line_width(Vec::new(), 3).unwrap();
        writer.write_fasta(&("s", "ACGTACG")).unwrap();
        assert_eq!(writer.into_inner(), b">s\nACG\nTAC\nG\n");

        assert!(matches!(
            Writer::with_line_width(Vec::new(), 0),
            Err(FastaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_write_fastas() {
        let records = vec![("a", "AC"), ("b", "GT")];
        let out = written(|w| w.write_fastas(&records)).unwrap();
        assert_eq!(out, ">a\nAC\n>b\nGT\n");
    }

    #[test]
    fn test_write_fastas_stops_at_first_failure() {
        let records = vec![("a", "AC"), ("b", ""), ("c", "GT")];
        let mut writer = Writer::new(Vec::new());
        let result = writer.write_fastas(&records);
        assert!(matches!(result, Err(FastaError::InvalidArgument(_))));
        assert_eq!(writer.into_inner(), b">a\nAC\n");
    }

    #[test]
    fn test_write_quick_records() {
        let quick = FastaRecord::Quick(QuickFasta {
            header: ">q1 quick one".to_string(),
            sequence: "MKV".to_string(),
        });
        let out = written(|w| w.write_fasta(&quick)).unwrap();
        assert_eq!(out, ">q1 quick one\nMKV\n");
    }
}
