//! `barencode encode <symbology> [payload]`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use barencode::batch::EncodedJob;
use barencode::{BarcodeEncoding, EncodeOptions, Symbology};
use clap::Args;

use crate::cli::common::{OptionArgs, OutputFormat};
use crate::cli::utils::{read_payload, write_output};

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Symbology key, e.g. `ean13`, `code128`, `plessey-mod11` (see `list`).
    pub symbology: Symbology,
    /// Payload (falls back to --from, then stdin).
    pub payload: Option<String>,
    /// Read the payload from a file (`-` for stdin).
    #[arg(long)]
    pub from: Option<PathBuf>,
    #[command(flatten)]
    pub options: OptionArgs,
    /// Output form.
    #[arg(long, value_enum, default_value_t = OutputFormat::Pattern)]
    pub format: OutputFormat,
    /// Shorthand for `--format rle`.
    #[arg(long, conflicts_with = "format")]
    pub rle: bool,
    /// Destination file (`-` for stdout).
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,
}

pub fn handle(args: EncodeArgs) -> Result<()> {
    let payload = read_payload(args.payload, args.from)?;
    let options = EncodeOptions::from(&args.options);
    let barcode = args
        .symbology
        .encode(&payload, &options)
        .with_context(|| format!("failed to encode '{payload}' as {}", args.symbology))?;

    let format = if args.rle { OutputFormat::Rle } else { args.format };
    let mut rendered = match format {
        OutputFormat::Pattern => barcode.rendered(),
        OutputFormat::Rle => barcode.rle()?.to_string(),
        OutputFormat::Text => barcode.text.clone(),
        OutputFormat::Json => serde_json::to_string_pretty(&EncodedJob {
            text: barcode.text.clone(),
            pattern: barcode.rendered(),
            rle: barcode.rle()?.to_string(),
        })?,
    };
    rendered.push('\n');
    write_output(&args.output, &rendered)
}
