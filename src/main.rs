//! fiveprime: project genomic alignment intervals to 5' tag coordinates.
//!
//! Usage: fiveprime [OPTIONS] [INPUT]

use clap::{Parser, ValueEnum};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use fiveprime::bed::{truncate_on_error, BedReader, ReadError, Result};
use fiveprime::bedpe::BedpeReader;
use fiveprime::{ingest, project, RawRecord, TagStore};

#[derive(Parser)]
#[command(name = "fiveprime")]
#[command(version)]
#[command(
    about = "Project genomic alignment intervals to strand-aware 5' tag coordinates",
    long_about = None
)]
struct Cli {
    /// Input file, plain or gzip-compressed (use - or omit for stdin)
    input: Option<PathBuf>,

    /// Input record layout
    #[arg(short, long, value_enum, default_value = "auto")]
    format: Format,

    /// Sort each group and remove exact-duplicate intervals before projection
    #[arg(short = 'd', long)]
    drop_duplicates: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail on the first malformed record instead of truncating the input
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Detect from the file extension (.bedpe means paired; default single)
    Auto,
    /// 6-field single-interval records
    Bed,
    /// 10-field paired-interval records
    Bedpe,
}

fn detect_format(path: Option<&Path>) -> Format {
    let Some(path) = path else {
        return Format::Bed;
    };
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(name);
    if name.ends_with(".bedpe") {
        Format::Bedpe
    } else {
        Format::Bed
    }
}

/// Ingest a fallible record stream and project it, honoring `--strict`.
fn collect_tags<I>(records: I, strict: bool, drop_duplicates: bool) -> Result<TagStore>
where
    I: Iterator<Item = Result<RawRecord>>,
{
    let store = if strict {
        let records: Vec<RawRecord> = records.collect::<Result<_>>()?;
        ingest(records)
    } else {
        ingest(truncate_on_error(records))
    };
    Ok(project(store, drop_duplicates))
}

fn run(cli: Cli) -> Result<()> {
    let file_input = cli
        .input
        .as_deref()
        .filter(|p| p.as_os_str() != "-");

    let reader = match file_input {
        Some(path) => fiveprime::io::open(path)?,
        None => fiveprime::io::decompress(io::stdin())?,
    };

    let format = match cli.format {
        Format::Auto => detect_format(file_input),
        explicit => explicit,
    };

    let tags = match format {
        Format::Bedpe => collect_tags(
            BedpeReader::new(reader).records(),
            cli.strict,
            cli.drop_duplicates,
        )?,
        _ => collect_tags(
            BedReader::new(reader).records(),
            cli.strict,
            cli.drop_duplicates,
        )?,
    };

    match &cli.output {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(ReadError::Io)?;
            write_tags(&mut BufWriter::with_capacity(256 * 1024, file), &tags)
        }
        None => {
            let stdout = io::stdout();
            let handle = stdout.lock();
            write_tags(&mut BufWriter::with_capacity(256 * 1024, handle), &tags)
        }
    }
}

/// Write one `chrom<TAB>strand<TAB>position` line per tag, groups in
/// sorted key order for deterministic output.
fn write_tags<W: Write>(writer: &mut W, tags: &TagStore) -> Result<()> {
    for key in tags.sorted_keys() {
        for &position in tags.get(key).unwrap_or(&[]) {
            writeln!(writer, "{}\t{}", key, position).map_err(ReadError::Io)?;
        }
    }
    writer.flush().map_err(ReadError::Io)?;
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
