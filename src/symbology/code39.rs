//! Code 39 with the optional modulo 43 check character.

use crate::core::checksum::modulo43;
use crate::core::error::{EncodeError, Result};
use crate::core::options::EncodeOptions;
use crate::core::pattern::PatternBuilder;
use crate::core::tables::{CODE39, CODE39_ALPHABET, CODE39_START_STOP};

use super::{
    Barcode, BarcodeEncoding, Checksum, ChecksumPolicy, LengthRule, SymbologyDescriptor,
    UnitSystem, check_alphabet, split_check, verify_check,
};

const NAME: &str = "Code 39";
const NARROW: usize = 1;
const WIDE: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct Code39;

impl Code39 {
    fn values(payload: &str) -> Result<Vec<usize>> {
        check_alphabet(NAME, payload, |c| CODE39.contains_key(&c))?;
        Ok(payload.chars().map(|c| CODE39[&c].0).collect())
    }

    fn check_char(payload: &str) -> Result<char> {
        let value = modulo43(&Self::values(payload)?);
        Ok(CODE39_ALPHABET.as_bytes()[value] as char)
    }
}

impl BarcodeEncoding for Code39 {
    fn name(&self) -> &'static str {
        NAME
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        SymbologyDescriptor {
            name: NAME,
            alphabet: CODE39_ALPHABET,
            length: LengthRule::Variable { min: 1 },
            checksum: ChecksumPolicy::Single,
            units: UnitSystem::WideNarrow {
                narrow: NARROW,
                wide: WIDE,
            },
        }
    }

    fn validate(&self, payload: &str) -> bool {
        !payload.is_empty() && payload.chars().all(|c| CODE39.contains_key(&c))
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        Ok(Checksum::Chars(Self::check_char(payload)?.to_string()))
    }

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        options.validate()?;
        if payload.is_empty() {
            return Err(EncodeError::invalid_length(NAME, "at least 1 character", 0));
        }
        check_alphabet(NAME, payload, |c| CODE39.contains_key(&c))?;
        let text = if options.append_check_digit {
            let mut text = payload.to_string();
            text.push(Self::check_char(payload)?);
            text
        } else {
            let (data, found) = split_check(NAME, payload, 1)?;
            verify_check(NAME, &Self::check_char(&data)?.to_string(), &found)?;
            payload.to_string()
        };

        let mut builder = PatternBuilder::new();
        builder.wide_narrow(CODE39_START_STOP, NARROW, WIDE);
        for ch in text.chars() {
            builder.space(NARROW);
            builder.wide_narrow(CODE39[&ch].1, NARROW, WIDE);
        }
        builder.space(NARROW);
        builder.wide_narrow(CODE39_START_STOP, NARROW, WIDE);
        Ok(Barcode::new(NAME, text, builder.finish(), options))
    }
}
