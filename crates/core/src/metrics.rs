//! Metrics for a compression run.
//!
//! Collected by the pipeline as each stage completes:
//! - Input size and alphabet
//! - Tree size and height
//! - Payload bits and bytes
//! - Timing
//!
//! The struct is plain data with no synchronization; one run fills one
//! instance.

use std::time::{Duration, Instant};

/// What a single compression run produced.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input ===
    /// Bytes read in the frequency pass
    pub input_bytes: u64,

    /// Distinct byte values in the input
    pub distinct_symbols: usize,

    // === Tree ===
    /// Nodes in the code tree (records in the tree block)
    pub tree_nodes: usize,

    /// Longest code length in bits
    pub tree_height: usize,

    // === Output ===
    /// Bits of packed codes, padding excluded
    pub payload_bits: u64,

    /// Payload bytes, padding included
    pub payload_bytes: u64,

    /// Total container size
    pub container_bytes: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            distinct_symbols: 0,
            tree_nodes: 0,
            tree_height: 0,
            payload_bits: 0,
            payload_bytes: 0,
            container_bytes: 0,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Container size over input size. 0.0 for empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.container_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Average code length in bits per input byte.
    pub fn bits_per_byte(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.input_bytes as f64
        }
    }

    /// Padding bits in the last payload byte.
    pub fn padding_bits(&self) -> u64 {
        (self.payload_bytes * 8).saturating_sub(self.payload_bits)
    }

    /// Compute throughput in bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Compression Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("=== Input ===");
        println!(
            "Bytes: {} ({:.2} MiB)",
            self.input_bytes,
            self.input_bytes as f64 / 1024.0 / 1024.0
        );
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!();

        println!("=== Tree ===");
        println!("Nodes: {}", self.tree_nodes);
        println!("Longest code: {} bits", self.tree_height);
        println!();

        println!("=== Output ===");
        println!(
            "Payload: {} bits in {} bytes ({} padding bits)",
            self.payload_bits,
            self.payload_bytes,
            self.padding_bits()
        );
        println!("Container: {} bytes", self.container_bytes);
        println!("Bits per input byte: {:.3}", self.bits_per_byte());
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!();

        println!("=== Performance ===");
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_bytes={}\n\
             distinct_symbols={}\n\
             tree_nodes={}\n\
             tree_height={}\n\
             payload_bits={}\n\
             payload_bytes={}\n\
             container_bytes={}\n\
             compression_ratio={:.4}\n\
             bits_per_byte={:.4}\n",
            self.duration().as_millis(),
            self.input_bytes,
            self.distinct_symbols,
            self.tree_nodes,
            self.tree_height,
            self.payload_bits,
            self.payload_bytes,
            self.container_bytes,
            self.compression_ratio(),
            self.bits_per_byte(),
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert!(metrics.end_time.is_none());
        assert!(metrics.duration().as_millis() < 100);
    }

    #[test]
    fn test_ratios_on_empty_input() {
        let metrics = Metrics::new();
        assert_eq!(metrics.compression_ratio(), 0.0);
        assert_eq!(metrics.bits_per_byte(), 0.0);
    }

    #[test]
    fn test_compression_ratio() {
        let mut metrics = Metrics::new();
        metrics.input_bytes = 1000;
        metrics.container_bytes = 750;
        assert_eq!(metrics.compression_ratio(), 0.75);
    }

    #[test]
    fn test_bits_and_padding() {
        let mut metrics = Metrics::new();
        metrics.input_bytes = 4;
        metrics.payload_bits = 4;
        metrics.payload_bytes = 1;
        assert_eq!(metrics.bits_per_byte(), 1.0);
        assert_eq!(metrics.padding_bits(), 4);
    }

    #[test]
    fn test_complete_freezes_duration() {
        let mut metrics = Metrics::new();
        metrics.complete();
        let first = metrics.duration();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(metrics.duration(), first);
    }

    #[test]
    fn test_export_text() {
        let mut metrics = Metrics::new();
        metrics.input_bytes = 1000;
        metrics.distinct_symbols = 12;
        metrics.payload_bytes = 400;

        let text = metrics.export_text();
        assert!(text.contains("input_bytes=1000"));
        assert!(text.contains("distinct_symbols=12"));
        assert!(text.contains("payload_bytes=400"));
    }
}
