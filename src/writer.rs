use crate::error::{BgResult, BigramError};
use crate::ranker::RankedList;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};
use std::path::Path;
use strum_macros::{Display, EnumIter};
use tempfile::NamedTempFile;
use tracing::info;

pub const REPORT_HEADER: &str = "Bigram Frequency";

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    ValueEnum,
    EnumIter,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// `Bigram Frequency` header, then `<bigram>: <count>` per line
    #[default]
    Text,
    /// `bigram,frequency` header, then one record per bigram
    Csv,
    /// Array of `{"bigram": .., "frequency": ..}` objects
    Json,
}

#[derive(Serialize)]
struct ReportRow<'a> {
    bigram: &'a str,
    frequency: u64,
}

/// Serializes `ranked` into `sink`, preserving rank order.
pub fn write_report<W: Write>(ranked: &RankedList<'_>, format: ReportFormat, sink: W) -> BgResult<()> {
    match format {
        ReportFormat::Text => {
            let mut out = BufWriter::new(sink);
            writeln!(out, "{}", REPORT_HEADER)?;
            for (bigram, frequency) in ranked.iter() {
                writeln!(out, "{}: {}", bigram, frequency)?;
            }
            out.flush()?;
        }
        ReportFormat::Csv => {
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(sink);
            wtr.write_record(["bigram", "frequency"])?;
            for (bigram, frequency) in ranked.iter() {
                wtr.serialize(ReportRow { bigram, frequency })?;
            }
            wtr.flush()?;
        }
        ReportFormat::Json => {
            let rows: Vec<ReportRow<'_>> = ranked
                .iter()
                .map(|(bigram, frequency)| ReportRow { bigram, frequency })
                .collect();
            let mut out = BufWriter::new(sink);
            serde_json::to_writer_pretty(&mut out, &rows)?;
            writeln!(out)?;
            out.flush()?;
        }
    }
    Ok(())
}

pub fn report_to_string(ranked: &RankedList<'_>, format: ReportFormat) -> BgResult<String> {
    let mut buf = Vec::new();
    write_report(ranked, format, &mut buf)?;
    String::from_utf8(buf).map_err(|e| BigramError::Io(std::io::Error::other(e)))
}

/// Recovers the underlying I/O error from a serializer failure.
fn into_io(err: BigramError) -> std::io::Error {
    match err {
        BigramError::Io(source) | BigramError::Output { source, .. } => source,
        BigramError::Csv(e) if e.is_io_error() => match e.into_kind() {
            csv::ErrorKind::Io(source) => source,
            kind => std::io::Error::other(format!("{:?}", kind)),
        },
        BigramError::Csv(e) => std::io::Error::other(e),
        BigramError::Json(e) => match e.io_error_kind() {
            Some(kind) => std::io::Error::new(kind, e),
            None => std::io::Error::other(e),
        },
        other => std::io::Error::other(other),
    }
}

/// Writes the report to `path`, replacing any previous file.
///
/// Output goes to a temporary file next to `path` that is renamed into place
/// only after every line was written, so a failed run never leaves a
/// truncated report behind.
pub fn write_report_file<P: AsRef<Path>>(
    ranked: &RankedList<'_>,
    format: ReportFormat,
    path: P,
) -> BgResult<()> {
    let path = path.as_ref();
    let output_err = |source: std::io::Error| BigramError::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir).map_err(output_err)?;
    write_report(ranked, format, tmp.as_file()).map_err(|e| output_err(into_io(e)))?;
    tmp.persist(path).map_err(|e| output_err(e.error))?;

    info!(
        "📝 Wrote {} ranked bigrams to {} ({})",
        ranked.len(),
        path.display(),
        format
    );
    Ok(())
}
