//! CLI module for libdesk.
//!
//! Flags are parsed with clap before the terminal is touched, so `--help`
//! and `--version` print normally:
//!
//! ```ignore
//! use clap::Parser;
//! use libdesk::cli::Args;
//!
//! let args = Args::parse();
//! let config = args.config()?;
//! ```

pub mod args;

pub use args::Args;
