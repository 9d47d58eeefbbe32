//! CLI argument parsing for pdftoolbox.
//!
//! This module defines the command-line interface structure using `clap`.
//! Each engine operation gets its own subcommand; parsing of option values
//! into engine types happens here so `main` only dispatches.
//!
//! # Examples
//!
//! ```no_run
//! use pdftoolbox::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::compress::Quality;
use crate::split::SplitMode;

/// Transform PDF documents: compress, split, merge, inspect.
#[derive(Parser, Debug)]
#[command(name = "pdftoolbox")]
#[command(version)]
#[command(about = "Compress, split and merge PDF documents", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Suppress all non-error output
    ///
    /// Only errors are printed. Useful for scripts and automation.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// The operation to perform.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a PDF by recoding content streams and removing duplicate
    /// and unreachable objects
    Compress {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Compression quality
        ///
        /// - low: fastest, least reduction
        /// - medium: balanced (default)
        /// - high: slowest, most reduction
        #[arg(long, value_name = "LEVEL", default_value = "medium")]
        quality: Quality,

        /// Print the compression statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split a PDF into independent single-page documents
    Split {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Which pages to extract
        ///
        /// - all: every page (default)
        /// - range: the pages named by --pages
        #[arg(long, value_name = "MODE", default_value = "all")]
        mode: SplitMode,

        /// Page range expression, e.g. "1-3,5,7-10"
        ///
        /// Page numbers are 1-indexed. Invalid tokens and out-of-range
        /// pages are silently skipped; duplicates collapse.
        #[arg(long, value_name = "RANGE", default_value = "")]
        pages: String,

        /// Directory for the page_N.pdf outputs
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Also pack all outputs into a single zip archive at this path
        #[arg(long, value_name = "FILE")]
        archive: Option<PathBuf>,
    },

    /// Merge PDF files into a single document, in the order given
    Merge {
        /// Input PDF files or glob patterns (at least two files after
        /// expansion)
        ///
        /// Examples:
        ///   pdftoolbox merge a.pdf b.pdf -o out.pdf
        ///   pdftoolbox merge 'chapter*.pdf' -o book.pdf
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Show summary information about a PDF
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}
