use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use huff_core::serialize::TreeText;
use huff_core::{compress_file, Encoder, Error, FileSource};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

mod config;
mod exitcode;

use config::{Cli, Config};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                process::exit(exitcode::OK);
            }
            _ => {
                println!("Argument Error");
                eprintln!("{}", e);
                process::exit(exitcode::USAGE);
            }
        },
    };

    setup_logging(cli.debug);

    let config = Config::from_cli(cli);
    if config.print_config {
        config.print();
    }

    if let Err(e) = run(&config) {
        let (message, code) = report(&e);
        tracing::debug!(error = %e, "run failed");
        println!("{}", message);
        process::exit(code);
    }
}

fn run(config: &Config) -> huff_core::Result<()> {
    if config.print_tree {
        let encoder = Encoder::from_source(&FileSource::new(&config.input_file))?;
        println!("{}", TreeText(encoder.tree()));
    }

    let metrics = compress_file(&config.input_file, &config.output_file)?;

    if config.print_metrics {
        metrics.print_summary();
    }
    Ok(())
}

/// User-facing message and exit code for a failed run. The error detail
/// goes to the debug log, not into the message.
fn report(error: &Error) -> (&'static str, i32) {
    match error {
        Error::EmptyInput => ("Empty Input", exitcode::DATAERR),
        Error::Io(_) => ("File Error", exitcode::IOERR),
        _ => ("Internal Error", exitcode::SOFTWARE),
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // Formatted output on stderr; stdout carries status messages and reports
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_report_empty_input() {
        assert_eq!(report(&Error::EmptyInput), ("Empty Input", 65));
    }

    #[test]
    fn test_report_io_failure() {
        let error = Error::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(report(&error), ("File Error", exitcode::IOERR));
    }

    #[test]
    fn test_run_writes_container_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        std::fs::write(&input, b"hello huffman").unwrap();

        let cli = Cli::try_parse_from([std::ffi::OsStr::new("huff"), input.as_os_str()]).unwrap();
        let config = Config::from_cli(cli);
        run(&config).unwrap();

        let bytes = std::fs::read(dir.path().join("notes.txt.huff")).unwrap();
        assert_eq!(&bytes[..8], &huff_core::MAGIC);
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            std::ffi::OsStr::new("huff"),
            dir.path().join("missing").as_os_str(),
        ])
        .unwrap();
        let config = Config::from_cli(cli);

        let error = run(&config).unwrap_err();
        assert_eq!(report(&error), ("File Error", exitcode::IOERR));
        assert!(!config.output_file.exists());
    }
}
