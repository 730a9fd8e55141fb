//! Shared clap helper types for CLI commands.

use barencode::EncodeOptions;
use clap::{Args, ValueEnum};

/// Encoder options accepted by every encoding command.
#[derive(Args, Debug, Clone)]
pub struct OptionArgs {
    /// The payload already ends with its check character(s); verify them.
    #[arg(long)]
    pub no_check: bool,
    /// Character printed for a bar unit.
    #[arg(long, default_value_t = '1')]
    pub bar: char,
    /// Character printed for a space unit.
    #[arg(long, default_value_t = '0')]
    pub space: char,
    /// Code 93: promote any ASCII character through shift pairs.
    #[arg(long)]
    pub full_ascii: bool,
}

impl From<&OptionArgs> for EncodeOptions {
    fn from(value: &OptionArgs) -> EncodeOptions {
        EncodeOptions::new()
            .with_check_digit(!value.no_check)
            .with_symbols(value.bar, value.space)
            .with_full_ascii(value.full_ascii)
    }
}

/// Output forms for an encoded barcode.
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Bar/space string using the configured symbols.
    #[default]
    Pattern,
    /// `<total>:<runs>` run-length string.
    Rle,
    /// Human-readable text including check characters.
    Text,
    /// JSON object with text, pattern and RLE.
    Json,
}
