//! # fastaparser - FASTA reader and writer
//!
//! Parses and writes FASTA files, with letter-code classification of
//! nucleotide and amino-acid sequences.
//!
//! ## Architecture
//!
//! - `codes`: Static letter-code tables (good/degenerate codes, complements)
//! - `letter_code`: A single classified character
//! - `model`: `FastaSequence`, its biological computations and formatting
//! - `formats`: Line-by-line reader state machine and writer
//!
//! ## Example
//!
//! ```
//! use fastaparser::formats::{Reader, ReaderOptions, Writer};
//! use fastaparser::SequenceKind;
//!
//! let options = ReaderOptions {
//!     kind: Some(SequenceKind::Nucleotide),
//!     ..ReaderOptions::default()
//! };
//! let mut writer = Writer::new(Vec::new());
//! for record in Reader::with_options(">seq1\nACGGCT\n".as_bytes(), options) {
//!     let seq = record.unwrap().into_rich().unwrap();
//!     assert!((seq.gc_content(true).unwrap() - 66.67).abs() < 0.01);
//!     writer.write_fasta(&seq.complement(true).unwrap()).unwrap();
//! }
//! assert_eq!(writer.into_inner(), b">seq1 [REVERSE COMPLEMENT]\nAGCCGT\n");
//! ```

pub mod codes;
pub mod formats;
pub mod letter_code;
pub mod model;

pub use codes::SequenceKind;
pub use formats::{FastaError, FastaResult};
pub use letter_code::LetterCode;
pub use model::FastaSequence;
