//! Code 11: digits and `-`, with one check digit or two for long payloads.

use crate::core::checksum::modulo11_dual;
use crate::core::error::{EncodeError, Result};
use crate::core::options::EncodeOptions;
use crate::core::pattern::PatternBuilder;
use crate::core::tables::{CODE11_START_STOP, CODE11_WN};

use super::{
    Barcode, BarcodeEncoding, Checksum, ChecksumPolicy, LengthRule, SymbologyDescriptor,
    UnitSystem, check_alphabet, split_check, verify_check,
};

const NAME: &str = "Code 11";
const NARROW: usize = 1;
const WIDE: usize = 2;
/// Payloads of this many characters or more carry a second check digit.
const DUAL_CHECK_FROM: usize = 10;

fn value(ch: char) -> Option<usize> {
    match ch {
        '-' => Some(10),
        c => c.to_digit(10).map(|d| d as usize),
    }
}

fn value_char(v: usize) -> char {
    if v == 10 {
        '-'
    } else {
        char::from(b'0' + v as u8)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Code11;

impl Code11 {
    fn values(payload: &str) -> Result<Vec<usize>> {
        check_alphabet(NAME, payload, |c| value(c).is_some())?;
        Ok(payload.chars().filter_map(value).collect())
    }

    fn checks(data: &str) -> Result<String> {
        let (c, k) = modulo11_dual(&Self::values(data)?);
        Ok(std::iter::once(c).chain(k).map(value_char).collect())
    }

    /// Number of trailing check characters in a payload that already has them.
    fn embedded_check_count(total: usize) -> Result<usize> {
        match total {
            0 | 1 => Err(EncodeError::invalid_length(
                NAME,
                "at least 2 characters including check",
                total,
            )),
            n if n <= DUAL_CHECK_FROM => Ok(1),
            n if n == DUAL_CHECK_FROM + 1 => Err(EncodeError::invalid_length(
                NAME,
                "at most 10 characters with one check or 12 or more with two",
                n,
            )),
            _ => Ok(2),
        }
    }
}

impl BarcodeEncoding for Code11 {
    fn name(&self) -> &'static str {
        NAME
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        SymbologyDescriptor {
            name: NAME,
            alphabet: "0123456789-",
            length: LengthRule::Variable { min: 1 },
            checksum: ChecksumPolicy::Conditional,
            units: UnitSystem::WideNarrow {
                narrow: NARROW,
                wide: WIDE,
            },
        }
    }

    fn validate(&self, payload: &str) -> bool {
        !payload.is_empty() && payload.chars().all(|c| value(c).is_some())
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        if payload.is_empty() {
            return Err(EncodeError::invalid_length(NAME, "at least 1 character", 0));
        }
        Ok(Checksum::Chars(Self::checks(payload)?))
    }

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        options.validate()?;
        check_alphabet(NAME, payload, |c| value(c).is_some())?;
        let text = if options.append_check_digit {
            if payload.is_empty() {
                return Err(EncodeError::invalid_length(NAME, "at least 1 character", 0));
            }
            format!("{payload}{}", Self::checks(payload)?)
        } else {
            let count = Self::embedded_check_count(payload.chars().count())?;
            let (data, found) = split_check(NAME, payload, count)?;
            verify_check(NAME, &Self::checks(&data)?, &found)?;
            payload.to_string()
        };

        let mut builder = PatternBuilder::new();
        builder.wide_narrow(CODE11_START_STOP, NARROW, WIDE);
        for ch in text.chars() {
            let v = value(ch).ok_or_else(|| EncodeError::invalid_char(NAME, ch, 0))?;
            builder.space(NARROW);
            builder.wide_narrow(CODE11_WN[v], NARROW, WIDE);
        }
        builder.space(NARROW);
        builder.wide_narrow(CODE11_START_STOP, NARROW, WIDE);
        Ok(Barcode::new(NAME, text, builder.finish(), options))
    }
}
