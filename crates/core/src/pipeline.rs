//! Compression pipeline.
//!
//! ```text
//! source ──► FrequencyTable ──► TreeBuilder ──► CodeTable
//!   │                                             │
//!   └──(second pass)──► BitWriter ◄───────────────┘
//!                          │
//!                          ▼
//!          MAGIC | tree block | separator | payload
//! ```
//!
//! The input is read twice and never held in memory as a whole. Empty input
//! is rejected after the first pass, before anything is written.

use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

use crate::encoder::{EncodeStats, Encoder};
use crate::error::Result;
use crate::metrics::Metrics;
use crate::source::{ByteSource, FileSource};

/// Compress `source` into `writer`.
///
/// The writer receives nothing if the input is empty.
///
/// # Errors
/// - `Error::EmptyInput` if the source holds no bytes
/// - `Error::Io` if reading the source or writing the container fails
#[instrument(level = "debug", skip_all)]
pub fn compress<S: ByteSource, W: Write>(source: &S, writer: W) -> Result<Metrics> {
    let mut metrics = Metrics::new();

    let encoder = Encoder::from_source(source)?;
    let stats = encoder.write_container(source.open()?, writer)?;

    record(&mut metrics, &encoder, &stats);
    Ok(metrics)
}

/// Compress the file at `input` into a container at `output`.
///
/// The container is assembled in a temporary file next to `output` and moved
/// into place once complete. On any error `output` is left untouched.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn compress_file(input: &Path, output: &Path) -> Result<Metrics> {
    let source = FileSource::new(input);
    let mut metrics = Metrics::new();

    let encoder = Encoder::from_source(&source)?;

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(dir)?;
    debug!(temp = %temp.path().display(), "writing container");

    let mut writer = BufWriter::new(temp);
    let stats = encoder.write_container(source.open()?, &mut writer)?;
    let temp = writer.into_inner().map_err(|e| e.into_error())?;
    temp.as_file().sync_all()?;
    temp.persist(output).map_err(|e| e.error)?;

    record(&mut metrics, &encoder, &stats);

    info!(
        input_bytes = metrics.input_bytes,
        container_bytes = metrics.container_bytes,
        "compressed"
    );
    Ok(metrics)
}

fn record(metrics: &mut Metrics, encoder: &Encoder, stats: &EncodeStats) {
    let counted = encoder.frequencies().total();
    if stats.input_bytes != counted {
        warn!(
            counted,
            encoded = stats.input_bytes,
            "input length changed between passes"
        );
    }

    metrics.input_bytes = counted;
    metrics.distinct_symbols = encoder.frequencies().distinct();
    metrics.tree_nodes = encoder.tree().node_count();
    metrics.tree_height = encoder.tree().height();
    metrics.payload_bits = stats.payload_bits;
    metrics.payload_bytes = stats.payload_bytes;
    metrics.container_bytes = stats.container_bytes();
    metrics.complete();
}
