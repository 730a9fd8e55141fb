//! `barencode check` and `barencode validate`.

use anyhow::{Context, Result, bail};
use barencode::symbology::Code93;
use barencode::{BarcodeEncoding, EncodeOptions, Symbology};
use clap::Args;
use tracing::debug;

#[derive(Args, Debug)]
pub struct CheckArgs {
    pub symbology: Symbology,
    /// Payload without check characters.
    pub payload: String,
    /// Compute Code 93 checks over the full-ASCII promoted text.
    #[arg(long)]
    pub full_ascii: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    pub symbology: Symbology,
    pub payload: String,
    /// Also verify the embedded check characters by encoding without appending.
    #[arg(long)]
    pub strict: bool,
}

pub fn check(args: CheckArgs) -> Result<()> {
    if args.full_ascii && args.symbology != Symbology::Code93 {
        bail!("--full-ascii only applies to code93");
    }
    let checksum = if args.full_ascii {
        Code93::full_ascii_check_digit(&args.payload)
    } else {
        args.symbology.check_digit(&args.payload)
    };
    let checksum = checksum
        .with_context(|| format!("cannot compute {} check for '{}'", args.symbology, args.payload))?;
    println!("{checksum}");
    Ok(())
}

pub fn validate(args: ValidateArgs) -> Result<()> {
    if !args.symbology.validate(&args.payload) {
        bail!("'{}' is not a valid {} payload", args.payload, args.symbology.name());
    }
    if args.strict {
        let options = EncodeOptions::new().with_check_digit(false);
        let barcode = args
            .symbology
            .encode(&args.payload, &options)
            .with_context(|| format!("'{}' failed verification", args.payload))?;
        debug!(units = barcode.pattern.len(), "verified");
    }
    println!("valid");
    Ok(())
}
