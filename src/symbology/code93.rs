//! Code 93 with its two modulo 47 check characters.
//!
//! The 47 symbol values are 43 data characters plus four shift symbols,
//! written in raw payloads as `!` `($)`, `#` `(%)`, `&` `(/)` and `@` `(+)`.
//! Full-ASCII promotion rewrites any ASCII text into shift pairs; the check
//! characters are always computed over the promoted symbols.

use crate::core::checksum::modulo47_dual;
use crate::core::error::{EncodeError, Result};
use crate::core::options::EncodeOptions;
use crate::core::pattern::PatternBuilder;
use crate::core::tables::{
    CODE93_ALPHABET, CODE93_BITS, CODE93_SHIFT_DOLLAR, CODE93_SHIFT_PERCENT, CODE93_SHIFT_PLUS,
    CODE93_SHIFT_SLASH, CODE93_START_STOP, CODE93_TERMINATOR,
};

use super::{
    Barcode, BarcodeEncoding, Checksum, ChecksumPolicy, LengthRule, SymbologyDescriptor,
    UnitSystem,
};

const NAME: &str = "Code 93";
const SHIFT_MARKERS: [char; 4] = ['!', '#', '&', '@'];

/// Symbol value of a raw (non-promoted) payload character.
fn raw_value(ch: char) -> Option<usize> {
    CODE93_ALPHABET.find(ch).or_else(|| {
        SHIFT_MARKERS
            .iter()
            .position(|&m| m == ch)
            .map(|i| CODE93_SHIFT_DOLLAR + i)
    })
}

fn value_char(value: usize) -> char {
    if value < CODE93_SHIFT_DOLLAR {
        CODE93_ALPHABET.as_bytes()[value] as char
    } else {
        SHIFT_MARKERS[value - CODE93_SHIFT_DOLLAR]
    }
}

/// Letter `A` + offset as a symbol value.
fn letter(offset: u8) -> usize {
    10 + usize::from(offset)
}

fn promote_byte(b: u8) -> Vec<usize> {
    if let Some(native) = CODE93_ALPHABET.find(char::from(b)) {
        return vec![native];
    }
    let (shift, value) = match b {
        0 => (CODE93_SHIFT_PERCENT, letter(20)),
        1..=26 => (CODE93_SHIFT_DOLLAR, letter(b - 1)),
        27..=31 => (CODE93_SHIFT_PERCENT, letter(b - 27)),
        33..=44 => (CODE93_SHIFT_SLASH, letter(b - 33)),
        b':' => (CODE93_SHIFT_SLASH, letter(25)),
        59..=63 => (CODE93_SHIFT_PERCENT, letter(b - 59 + 5)),
        b'@' => (CODE93_SHIFT_PERCENT, letter(21)),
        91..=95 => (CODE93_SHIFT_PERCENT, letter(b - 91 + 10)),
        b'`' => (CODE93_SHIFT_PERCENT, letter(22)),
        97..=122 => (CODE93_SHIFT_PLUS, letter(b - 97)),
        _ => (CODE93_SHIFT_PERCENT, letter(b - 123 + 15)),
    };
    vec![shift, value]
}

/// Rewrite ASCII text into Code 93 symbol values using shift pairs.
pub fn promote_full_ascii(payload: &str) -> Result<Vec<usize>> {
    let mut values = Vec::with_capacity(payload.len() * 2);
    for (idx, ch) in payload.chars().enumerate() {
        if !ch.is_ascii() {
            return Err(EncodeError::invalid_char(NAME, ch, idx));
        }
        values.extend(promote_byte(ch as u8));
    }
    Ok(values)
}

fn raw_values(payload: &str) -> Result<Vec<usize>> {
    payload
        .chars()
        .enumerate()
        .map(|(idx, ch)| raw_value(ch).ok_or_else(|| EncodeError::invalid_char(NAME, ch, idx)))
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Code93;

impl Code93 {
    fn symbols(payload: &str, options: &EncodeOptions) -> Result<Vec<usize>> {
        if options.auto_promote_full_ascii {
            promote_full_ascii(payload)
        } else {
            raw_values(payload)
        }
    }

    /// Check characters of `payload` after full-ASCII promotion.
    pub fn full_ascii_check_digit(payload: &str) -> Result<Checksum> {
        Ok(check_chars(&promote_full_ascii(payload)?))
    }
}

fn check_chars(values: &[usize]) -> Checksum {
    let (c, k) = modulo47_dual(values);
    Checksum::Chars([value_char(c), value_char(k)].iter().collect())
}

/// `validate` and `check_digit` work on the raw 47-symbol alphabet; use
/// [`Code93::full_ascii_check_digit`] for text that needs promotion.

impl BarcodeEncoding for Code93 {
    fn name(&self) -> &'static str {
        NAME
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        SymbologyDescriptor {
            name: NAME,
            alphabet: "0-9 A-Z - . space $ / + % and shifts ! # & @",
            length: LengthRule::Variable { min: 1 },
            checksum: ChecksumPolicy::Dual,
            units: UnitSystem::Binary,
        }
    }

    fn validate(&self, payload: &str) -> bool {
        !payload.is_empty() && payload.chars().all(|c| raw_value(c).is_some())
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        Ok(check_chars(&raw_values(payload)?))
    }

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        options.validate()?;
        if options.auto_promote_full_ascii && !options.append_check_digit {
            return Err(EncodeError::ConfigurationConflict(
                "full-ASCII promotion changes the check characters and requires appending them"
                    .to_string(),
            ));
        }
        if payload.is_empty() {
            return Err(EncodeError::invalid_length(NAME, "at least 1 character", 0));
        }
        let mut values = Self::symbols(payload, options)?;
        let mut text = payload.to_string();
        if options.append_check_digit {
            let (c, k) = modulo47_dual(&values);
            values.extend([c, k]);
            text.push(value_char(c));
            text.push(value_char(k));
        } else {
            if values.len() < 3 {
                return Err(EncodeError::invalid_length(
                    NAME,
                    "at least 3 characters including checks",
                    values.len(),
                ));
            }
            let data = &values[..values.len() - 2];
            let (c, k) = modulo47_dual(data);
            let found = &values[values.len() - 2..];
            if found != [c, k] {
                return Err(EncodeError::mismatch(
                    NAME,
                    [value_char(c), value_char(k)].iter().collect::<String>(),
                    found.iter().map(|&v| value_char(v)).collect::<String>(),
                ));
            }
        }

        let mut builder = PatternBuilder::new();
        builder.bits(CODE93_START_STOP);
        for &v in &values {
            builder.bits(CODE93_BITS[v]);
        }
        builder.bits(CODE93_START_STOP).bits(CODE93_TERMINATOR);
        Ok(Barcode::new(NAME, text, builder.finish(), options))
    }
}
