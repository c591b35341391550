//! fastaparser - FASTA reformatting and statistics
//!
//! ## Usage
//!
//! ```bash
//! fastaparser <fasta_file>                        # rewrap to stdout
//! fastaparser -k nucleotide -c -r -o out.fa in.fa # reverse complement
//! fastaparser --stats in.fa                       # per-record statistics
//! cat in.fa | fastaparser -                       # read stdin
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use fastaparser::formats::{FastaRecord, ParseMethod, Reader, ReaderOptions, Writer};
use fastaparser::{FastaSequence, SequenceKind};

/// Sequence kind for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    /// Nucleotide sequences (DNA/RNA)
    Nucleotide,
    /// Amino-acid sequences
    Aminoacid,
}

impl From<KindArg> for SequenceKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Nucleotide => SequenceKind::Nucleotide,
            KindArg::Aminoacid => SequenceKind::AminoAcid,
        }
    }
}

/// Parse method for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ParseMethodArg {
    /// Classify every letter code
    Rich,
    /// Header and sequence only
    Quick,
}

impl From<ParseMethodArg> for ParseMethod {
    fn from(arg: ParseMethodArg) -> Self {
        match arg {
            ParseMethodArg::Rich => ParseMethod::Rich,
            ParseMethodArg::Quick => ParseMethod::Quick,
        }
    }
}

/// fastaparser - Read, rewrap, complement and summarise FASTA files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// FASTA file to read. Use "-" for stdin.
    file: PathBuf,

    /// Kind of the sequences (unknown if omitted)
    #[arg(short = 'k', long = "kind", value_enum)]
    kind: Option<KindArg>,

    /// Detect amino-acid sequences when no kind is given
    #[arg(short = 'i', long = "infer")]
    infer: bool,

    /// Parse method (quick skips letter-code classification)
    #[arg(short = 'p', long = "parse-method", value_enum, default_value = "rich")]
    parse_method: ParseMethodArg,

    /// Sequence characters per output line
    #[arg(short = 'w', long = "width", default_value = "70")]
    width: usize,

    /// Output file. Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: String,

    /// Write the complement of every sequence
    #[arg(short = 'c', long = "complement")]
    complement: bool,

    /// With --complement, write the reverse complement
    #[arg(short = 'r', long = "reverse", requires = "complement")]
    reverse: bool,

    /// Print per-record statistics instead of sequences
    #[arg(short = 's', long = "stats", conflicts_with = "complement")]
    stats: bool,
}

/// Formats a statistic, "NA" when the sequence kind rules it out.
fn stat(value: fastaparser::FastaResult<f64>) -> String {
    match value {
        Ok(v) => format!("{:.2}", v),
        Err(_) => "NA".to_string(),
    }
}

fn write_stats<W: Write>(out: &mut W, seq: &FastaSequence) -> Result<()> {
    let kind = seq.kind().map_or("unknown", |k| k.as_str());
    writeln!(
        out,
        "{}\t{}\t{}\t{}\t{}",
        seq.id(),
        seq.len(),
        kind,
        stat(seq.gc_content(true)),
        stat(seq.at_gc_ratio())
    )?;
    Ok(())
}

fn run<R: BufRead, W: Write>(args: &Args, input: R, output: W) -> Result<usize> {
    let options = ReaderOptions {
        kind: args.kind.map(SequenceKind::from),
        infer_kind: args.infer,
        parse_method: args.parse_method.into(),
    };
    if (args.complement || args.stats) && options.parse_method == ParseMethod::Quick {
        anyhow::bail!("--complement and --stats need the rich parse method");
    }

    let reader = Reader::with_options(input, options);
    let mut count = 0;

    if args.stats {
        let mut out = output;
        writeln!(out, "id\tlength\tkind\tgc_percent\tat_gc_ratio")?;
        for record in reader {
            if let FastaRecord::Rich(seq) = record? {
                write_stats(&mut out, &seq)?;
                count += 1;
            }
        }
        out.flush()?;
        return Ok(count);
    }

    let mut writer = Writer::with_line_width(output, args.width)?;
    for record in reader {
        let record = record?;
        match (&record, args.complement) {
            (FastaRecord::Rich(seq), true) => writer.write_fasta(&seq.complement(args.reverse)?)?,
            _ => writer.write_fasta(&record)?,
        }
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let input: Box<dyn BufRead> = if args.file.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&args.file)
            .with_context(|| format!("Failed to open {}", args.file.display()))?;
        Box::new(BufReader::new(file))
    };

    let count = if args.output == "-" {
        let stdout = io::stdout();
        run(&args, input, BufWriter::new(stdout.lock()))?
    } else {
        let file = File::create(&args.output)
            .with_context(|| format!("Failed to create {}", args.output))?;
        let count = run(&args, input, BufWriter::new(file))?;
        eprintln!("Wrote {} sequences to {}", count, args.output);
        count
    };

    info!("processed {} records", count);
    Ok(())
}
