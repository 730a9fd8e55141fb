//! `barencode upc to-e|to-a`.

use anyhow::{Context, Result};
use barencode::{upca_to_upce, upce_to_upca};
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum UpcCommand {
    /// Compress an 11- or 12-digit UPC-A into UPC-E.
    ToE { upca: String },
    /// Expand a 6-, 7- or 8-digit UPC-E into UPC-A.
    ToA { upce: String },
}

pub fn handle(command: UpcCommand) -> Result<()> {
    let converted = match command {
        UpcCommand::ToE { upca } => {
            upca_to_upce(&upca).with_context(|| format!("cannot convert UPC-A {upca}"))?
        }
        UpcCommand::ToA { upce } => {
            upce_to_upca(&upce).with_context(|| format!("cannot convert UPC-E {upce}"))?
        }
    };
    println!("{converted}");
    Ok(())
}
