//! Configuration for the huff application.
//!
//! Everything comes from the command line. The output path is derived from
//! the input path and all resolved values can be printed with `--print-config`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;

/// Extension appended to the input path to name the container.
pub const CONTAINER_EXTENSION: &str = "huff";

/// Compress a file into a .huff container
#[derive(Parser, Debug)]
#[command(name = "huff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File to compress; the container is written to INPUT.huff
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Print the code tree in pre-order
    #[arg(long)]
    pub print_tree: bool,

    /// Print a compression summary
    #[arg(long)]
    pub metrics: bool,

    /// Print the resolved configuration
    #[arg(long)]
    pub print_config: bool,
}

/// Complete configuration for a compression run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // === Files ===
    /// Input file path
    pub input_file: PathBuf,

    /// Container path (input path + ".huff")
    pub output_file: PathBuf,

    // === Behavior ===
    /// Whether to print the code tree
    pub print_tree: bool,

    /// Whether to print the metrics summary
    pub print_metrics: bool,

    /// Whether to print this configuration
    pub print_config: bool,

    /// Log verbosity (number of -d flags)
    pub debug: u8,
}

impl Config {
    /// Resolve a parsed command line into a configuration.
    pub fn from_cli(cli: Cli) -> Self {
        let output_file = container_path(&cli.input);
        Self {
            input_file: cli.input,
            output_file,
            print_tree: cli.print_tree,
            print_metrics: cli.metrics,
            print_config: cli.print_config,
            debug: cli.debug,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Input file:  {}", self.input_file.display());
        println!("Output file: {}", self.output_file.display());
        println!();
        println!("Print tree:    {}", self.print_tree);
        println!("Print metrics: {}", self.print_metrics);
        println!("Debug level:   {}", self.debug);
        println!();
    }
}

/// `path` with `.huff` appended to the full file name.
pub fn container_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(CONTAINER_EXTENSION);
    PathBuf::from(name)
}
