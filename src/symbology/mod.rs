//! Symbology encoders and the registry that names them.
//!
//! Each symbology is a stateless unit struct implementing
//! [`BarcodeEncoding`]. [`Symbology`] is the closed set of all of them and
//! dispatches to the matching encoder, which is what the CLI and batch jobs
//! use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{EncodeError, Result};
use crate::core::options::EncodeOptions;
use crate::core::pattern::{BarPattern, RlePattern};

mod codabar;
mod code11;
mod code128;
mod code39;
mod code93;
mod ean;
mod plessey;
mod postnet;
mod supplement;
mod two_of_five;
mod upce;

pub use codabar::{Codabar, CodabarCheck};
pub use code11::Code11;
pub use code128::{Code128, Code128Symbol, Subset};
pub use code39::Code39;
pub use code93::{Code93, promote_full_ascii};
pub use ean::{Ean8, Ean13, UpcA};
pub use plessey::{Plessey, PlesseyCheck};
pub use postnet::PostNet;
pub use supplement::{UpcSupplement2, UpcSupplement5};
pub use two_of_five::{Coop2of5, Interleaved2of5, Matrix2of5, Standard2of5};
pub use upce::{UpcE, upca_to_upce, upce_to_upca};

/// Common capability set of every symbology encoder.
pub trait BarcodeEncoding {
    fn name(&self) -> &'static str;

    fn descriptor(&self) -> SymbologyDescriptor;

    /// True when every character belongs to the alphabet and the length is
    /// acceptable with or without embedded check characters. Does not verify
    /// check digits.
    fn validate(&self, payload: &str) -> bool;

    /// Compute the check character(s) for a payload without them.
    fn check_digit(&self, payload: &str) -> Result<Checksum>;

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode>;

    fn encode_rle(&self, payload: &str, options: &EncodeOptions) -> Result<RlePattern> {
        self.encode(payload, options)?.pattern.to_rle()
    }
}

/// Check characters computed for a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Checksum {
    /// The symbology carries no check character.
    None,
    /// One or two characters from the symbology's alphabet.
    Chars(String),
    /// A Code 128 symbol value; not a printable character.
    Symbol(u8),
    /// Encoded through digit parity only, never printed (UPC supplements).
    Parity(u8),
}

impl Checksum {
    pub(crate) fn digit(value: u8) -> Self {
        Checksum::Chars(char::from(b'0' + value).to_string())
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Checksum::None => Ok(()),
            Checksum::Chars(s) => f.write_str(s),
            Checksum::Symbol(v) | Checksum::Parity(v) => write!(f, "{v}"),
        }
    }
}

/// How many characters a symbology accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRule {
    /// Data lengths (without check characters) the symbology accepts.
    Fixed(&'static [usize]),
    Variable { min: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumPolicy {
    None,
    Single,
    Dual,
    /// One check digit, a second one for long payloads.
    Conditional,
    /// Folded into the parity of the data digits.
    Implicit,
    /// The caller picks one of several algorithms.
    Selectable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    Binary,
    WideNarrow { narrow: usize, wide: usize },
    TallShort,
}

/// Static description of a symbology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbologyDescriptor {
    pub name: &'static str,
    pub alphabet: &'static str,
    pub length: LengthRule,
    pub checksum: ChecksumPolicy,
    pub units: UnitSystem,
}

/// Result of a successful encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode {
    pub symbology: &'static str,
    /// Human-readable text including check characters as encoded.
    pub text: String,
    pub pattern: BarPattern,
    bar_symbol: char,
    space_symbol: char,
}

impl Barcode {
    pub(crate) fn new(
        symbology: &'static str,
        text: String,
        pattern: BarPattern,
        options: &EncodeOptions,
    ) -> Self {
        debug!(symbology, units = pattern.len(), "encoded barcode");
        Self {
            symbology,
            text,
            pattern,
            bar_symbol: options.bar_symbol,
            space_symbol: options.space_symbol,
        }
    }

    /// Pattern rendered with the configured bar and space symbols.
    pub fn rendered(&self) -> String {
        self.pattern.render(self.bar_symbol, self.space_symbol)
    }

    pub fn rle(&self) -> Result<RlePattern> {
        self.pattern.to_rle()
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered())
    }
}

/// Every supported symbology, with its checksum variant where selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Symbology {
    Ean13,
    Ean8,
    UpcA,
    UpcE,
    UpcSupplement2,
    UpcSupplement5,
    Code39,
    Code93,
    Code128,
    Codabar(CodabarCheck),
    Code11,
    Interleaved2of5,
    Standard2of5,
    Matrix2of5,
    Coop2of5,
    Plessey(PlesseyCheck),
    PostNet,
}

impl Symbology {
    /// All symbologies in a stable order, one entry per checksum variant.
    pub fn all() -> Vec<Symbology> {
        vec![
            Symbology::Ean13,
            Symbology::Ean8,
            Symbology::UpcA,
            Symbology::UpcE,
            Symbology::UpcSupplement2,
            Symbology::UpcSupplement5,
            Symbology::Code39,
            Symbology::Code93,
            Symbology::Code128,
            Symbology::Codabar(CodabarCheck::None),
            Symbology::Codabar(CodabarCheck::Modulo10),
            Symbology::Code11,
            Symbology::Interleaved2of5,
            Symbology::Standard2of5,
            Symbology::Matrix2of5,
            Symbology::Coop2of5,
            Symbology::Plessey(PlesseyCheck::Modulo10),
            Symbology::Plessey(PlesseyCheck::Modulo10Dual),
            Symbology::Plessey(PlesseyCheck::Modulo11),
            Symbology::Plessey(PlesseyCheck::Modulo11Modulo10),
            Symbology::PostNet,
        ]
    }

    /// Short identifier accepted by [`FromStr`].
    pub fn key(&self) -> &'static str {
        match self {
            Symbology::Ean13 => "ean13",
            Symbology::Ean8 => "ean8",
            Symbology::UpcA => "upca",
            Symbology::UpcE => "upce",
            Symbology::UpcSupplement2 => "upc2",
            Symbology::UpcSupplement5 => "upc5",
            Symbology::Code39 => "code39",
            Symbology::Code93 => "code93",
            Symbology::Code128 => "code128",
            Symbology::Codabar(CodabarCheck::None) => "codabar",
            Symbology::Codabar(CodabarCheck::Modulo10) => "codabar-mod10",
            Symbology::Code11 => "code11",
            Symbology::Interleaved2of5 => "i2of5",
            Symbology::Standard2of5 => "s2of5",
            Symbology::Matrix2of5 => "m2of5",
            Symbology::Coop2of5 => "coop2of5",
            Symbology::Plessey(PlesseyCheck::Modulo10) => "plessey",
            Symbology::Plessey(PlesseyCheck::Modulo10Dual) => "plessey-mod10-10",
            Symbology::Plessey(PlesseyCheck::Modulo11) => "plessey-mod11",
            Symbology::Plessey(PlesseyCheck::Modulo11Modulo10) => "plessey-mod11-10",
            Symbology::PostNet => "postnet",
        }
    }

    fn dispatch<R>(&self, f: impl FnOnce(&dyn BarcodeEncoding) -> R) -> R {
        match *self {
            Symbology::Ean13 => f(&Ean13),
            Symbology::Ean8 => f(&Ean8),
            Symbology::UpcA => f(&UpcA),
            Symbology::UpcE => f(&UpcE),
            Symbology::UpcSupplement2 => f(&UpcSupplement2),
            Symbology::UpcSupplement5 => f(&UpcSupplement5),
            Symbology::Code39 => f(&Code39),
            Symbology::Code93 => f(&Code93),
            Symbology::Code128 => f(&Code128),
            Symbology::Codabar(check) => f(&Codabar::new(check)),
            Symbology::Code11 => f(&Code11),
            Symbology::Interleaved2of5 => f(&Interleaved2of5),
            Symbology::Standard2of5 => f(&Standard2of5),
            Symbology::Matrix2of5 => f(&Matrix2of5),
            Symbology::Coop2of5 => f(&Coop2of5),
            Symbology::Plessey(check) => f(&Plessey::new(check)),
            Symbology::PostNet => f(&PostNet),
        }
    }
}

impl BarcodeEncoding for Symbology {
    fn name(&self) -> &'static str {
        self.dispatch(|e| e.name())
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        self.dispatch(|e| e.descriptor())
    }

    fn validate(&self, payload: &str) -> bool {
        self.dispatch(|e| e.validate(payload))
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        self.dispatch(|e| e.check_digit(payload))
    }

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        debug!(symbology = self.key(), chars = payload.chars().count(), "encode");
        self.dispatch(|e| e.encode(payload, options))
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Symbology {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        let alias = match wanted.as_str() {
            "ean-13" => "ean13",
            "ean-8" => "ean8",
            "upc-a" => "upca",
            "upc-e" => "upce",
            "itf" | "interleaved2of5" => "i2of5",
            "industrial2of5" | "standard2of5" => "s2of5",
            "matrix2of5" => "m2of5",
            other => other,
        };
        Symbology::all()
            .into_iter()
            .find(|s| s.key() == alias)
            .ok_or_else(|| format!("unknown symbology '{s}'"))
    }
}

impl TryFrom<String> for Symbology {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbology> for String {
    fn from(value: Symbology) -> Self {
        value.key().to_string()
    }
}

/// Fail on the first character `allowed` rejects.
pub(crate) fn check_alphabet(
    symbology: &'static str,
    payload: &str,
    allowed: impl Fn(char) -> bool,
) -> Result<()> {
    match payload.chars().enumerate().find(|&(_, ch)| !allowed(ch)) {
        Some((idx, ch)) => Err(EncodeError::invalid_char(symbology, ch, idx)),
        None => Ok(()),
    }
}

/// Split `count` trailing check characters from an already validated payload.
pub(crate) fn split_check(
    symbology: &'static str,
    payload: &str,
    count: usize,
) -> Result<(String, String)> {
    let chars: Vec<char> = payload.chars().collect();
    if chars.len() <= count {
        return Err(EncodeError::invalid_length(
            symbology,
            format!("more than {count} characters including check"),
            chars.len(),
        ));
    }
    let (data, check) = chars.split_at(chars.len() - count);
    Ok((data.iter().collect(), check.iter().collect()))
}

/// Compare an embedded check against the computed one.
pub(crate) fn verify_check(symbology: &'static str, expected: &str, found: &str) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(EncodeError::mismatch(symbology, expected, found))
    }
}
