//! `barencode list`.

use anyhow::Result;
use barencode::{BarcodeEncoding, ChecksumPolicy, LengthRule, Symbology, UnitSystem};
use clap::Args;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Include alphabet and unit details.
    #[arg(long, short)]
    pub long: bool,
}

pub fn handle(args: ListArgs) -> Result<()> {
    for symbology in Symbology::all() {
        let d = symbology.descriptor();
        if !args.long {
            println!("{:<18} {}", symbology.key(), d.name);
            continue;
        }
        println!(
            "{:<18} {:<20} {:<10} {:<12} {:<14} {}",
            symbology.key(),
            d.name,
            length(d.length),
            checksum(d.checksum),
            units(d.units),
            d.alphabet
        );
    }
    Ok(())
}

fn length(rule: LengthRule) -> String {
    match rule {
        LengthRule::Fixed(lens) => lens
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/"),
        LengthRule::Variable { min } => format!("{min}+"),
    }
}

fn checksum(policy: ChecksumPolicy) -> &'static str {
    match policy {
        ChecksumPolicy::None => "none",
        ChecksumPolicy::Single => "single",
        ChecksumPolicy::Dual => "dual",
        ChecksumPolicy::Conditional => "conditional",
        ChecksumPolicy::Implicit => "parity",
        ChecksumPolicy::Selectable => "selectable",
    }
}

fn units(units: UnitSystem) -> String {
    match units {
        UnitSystem::Binary => "binary".to_string(),
        UnitSystem::WideNarrow { narrow, wide } => format!("w/n {narrow}:{wide}"),
        UnitSystem::TallShort => "tall/short".to_string(),
    }
}
