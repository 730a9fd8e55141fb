//! Command-line interface wiring for the `barencode` binary.
//!
//! This module owns the clap definitions and delegates execution to one
//! submodule per command.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

pub mod batch;
pub mod check;
pub mod common;
pub mod encode;
pub mod list;
pub mod upc;
pub mod utils;

/// Parsed CLI entrypoint for the `barencode` binary.
#[derive(Parser, Debug)]
#[command(
    name = "barencode",
    version,
    about = "Encode payloads into one-dimensional barcode bar/space patterns"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a payload and print its pattern.
    Encode(encode::EncodeArgs),
    /// Print the check character(s) of a payload.
    Check(check::CheckArgs),
    /// Report whether a payload fits a symbology's alphabet and length.
    Validate(check::ValidateArgs),
    /// Convert between UPC-A and UPC-E.
    #[command(subcommand)]
    Upc(upc::UpcCommand),
    /// Encode every job of a JSON-lines job file.
    Batch(batch::BatchArgs),
    /// List the supported symbologies.
    List(list::ListArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Encode(args) => encode::handle(args),
        Command::Check(args) => check::check(args),
        Command::Validate(args) => check::validate(args),
        Command::Upc(cmd) => upc::handle(cmd),
        Command::Batch(args) => batch::handle(args),
        Command::List(args) => list::handle(args),
    }
}
