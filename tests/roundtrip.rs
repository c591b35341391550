//! Integration tests: write FASTA files to disk and read them back.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};

use fastaparser::formats::{FastaRecord, ParseMethod, Reader, ReaderOptions, Writer};
use fastaparser::{FastaSequence, SequenceKind};
use tempfile::NamedTempFile;

const MULTI_FASTA: &str = "\
>HSBGPG Human gene for bone gla protein (BGP)
GGCAGATTCCCCCTAGACCCGCCCGCACCATGGTCAGGCATGCCCCTCCTCATCGCTGGGCACAGCCCAGAGGGT
ATAAACAGTGCTGGAGGCTGGCGGGGCAGGCCAGCTGAGTCCTGAGCAGCAGCCCAGCGCAGCCACCGAGACACC
>HSGLTH1 Human theta 1-globin gene
CCACTGCACTCACCGCACCCGGCCAATTTTTGTGTTTTTAGTAGAGACTAAATACCATATAGTGAACACCTAAGA
CGGGGGGCCTTGGATCCAGGGCGATTCAGAGGGCCCCGGTCGGAGCTGTCGGAGATTGAGCGCGCGCGGTCCCGG
>sp|P69905|HBA_HUMAN Hemoglobin subunit alpha
MVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHFDLSHGSAQVKGHGKKVADALTNAVAHV
";

fn read_rich(path: &std::path::Path, options: ReaderOptions) -> Vec<FastaSequence> {
    Reader::from_path(path, options)
        .unwrap()
        .map(|r| r.unwrap().into_rich().unwrap())
        .collect()
}

#[test]
fn test_write_then_read_back() {
    let input = NamedTempFile::new().unwrap();
    fs::write(input.path(), MULTI_FASTA).unwrap();
    let originals = read_rich(input.path(), ReaderOptions::default());
    assert_eq!(originals.len(), 3);

    let output = NamedTempFile::new().unwrap();
    let mut writer = Writer::create(output.path()).unwrap();
    writer.write_fastas(&originals).unwrap();
    writer.flush().unwrap();
    drop(writer);

    let reread = read_rich(output.path(), ReaderOptions::default());
    assert_eq!(reread, originals);
    for (a, b) in originals.iter().zip(&reread) {
        assert_eq!(a.formatted_definition_line(), b.formatted_definition_line());
        assert_eq!(a.sequence(), b.sequence());
    }
}

#[test]
fn test_canonical_output_is_wrapped_at_70() {
    let input = NamedTempFile::new().unwrap();
    fs::write(input.path(), MULTI_FASTA).unwrap();

    let output = NamedTempFile::new().unwrap();
    let mut writer = Writer::create(output.path()).unwrap();
    writer
        .write_fastas(read_rich(input.path(), ReaderOptions::default()))
        .unwrap();
    writer.flush().unwrap();
    drop(writer);

    let written = fs::read_to_string(output.path()).unwrap();
    assert!(written.ends_with('\n'));
    for line in written.lines().filter(|l| !l.starts_with('>')) {
        assert!(line.len() <= 70, "line too long: {}", line);
    }
    assert_eq!(written.lines().filter(|l| l.starts_with('>')).count(), 3);
}

#[test]
fn test_quick_pairs_round_trip() {
    let input = NamedTempFile::new().unwrap();
    fs::write(input.path(), MULTI_FASTA).unwrap();
    let options = ReaderOptions {
        parse_method: ParseMethod::Quick,
        ..ReaderOptions::default()
    };
    let quick: Vec<FastaRecord> = Reader::from_path(input.path(), options)
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(quick[0].header(), ">HSBGPG Human gene for bone gla protein (BGP)");
    assert_eq!(quick[2].header(), ">sp|P69905|HBA_HUMAN Hemoglobin subunit alpha");

    let output = NamedTempFile::new().unwrap();
    let mut writer = Writer::create(output.path()).unwrap();
    writer.write_fastas(&quick).unwrap();
    writer.flush().unwrap();
    drop(writer);

    let rich = read_rich(output.path(), ReaderOptions::default());
    let sequences: Vec<String> = rich.iter().map(FastaSequence::sequence_as_string).collect();
    let expected: Vec<String> = quick.iter().map(FastaRecord::sequence_string).collect();
    assert_eq!(sequences, expected);
}

#[test]
fn test_append_to_existing_file() {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), ">first\nACGT\n").unwrap();

    let sink = OpenOptions::new().append(true).open(file.path()).unwrap();
    let mut writer = Writer::new(BufWriter::new(sink));
    writer.write_fasta(&("second extra", "GGCC")).unwrap();
    writer.flush().unwrap();
    drop(writer);

    assert_eq!(
        fs::read_to_string(file.path()).unwrap(),
        ">first\nACGT\n>second extra\nGGCC\n"
    );
    let seqs = read_rich(file.path(), ReaderOptions::default());
    assert_eq!(seqs.len(), 2);
    assert_eq!(seqs[1].description(), "extra");
}

#[test]
fn test_inference_over_mixed_file() {
    let mut input = NamedTempFile::new().unwrap();
    input.write_all(MULTI_FASTA.as_bytes()).unwrap();
    input.flush().unwrap();

    let options = ReaderOptions {
        infer_kind: true,
        ..ReaderOptions::default()
    };
    let seqs = read_rich(input.path(), options);
    assert_eq!(seqs[0].kind(), None);
    assert_eq!(seqs[1].kind(), None);
    assert_eq!(seqs[2].kind(), Some(SequenceKind::AminoAcid));
    assert!(seqs[2].type_inferred());

    // nucleotide records still allow nucleotide statistics
    assert!(seqs[0].gc_content(false).unwrap() > 0.5);
    assert!(seqs[2].gc_content(false).is_err());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Reader::from_path(dir.path().join("absent.fasta"), ReaderOptions::default());
    assert!(matches!(result, Err(fastaparser::FastaError::Io(_))));
}
