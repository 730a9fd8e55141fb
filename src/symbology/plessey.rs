//! Plessey: hex digits sent as four bits each, least significant first.

use crate::core::checksum::{modulo10_plessey, modulo11_plessey};
use crate::core::error::{EncodeError, Result};
use crate::core::options::EncodeOptions;
use crate::core::pattern::PatternBuilder;
use crate::core::tables::{
    PLESSEY_ALPHABET, PLESSEY_ONE_BIT, PLESSEY_START, PLESSEY_STOP, PLESSEY_ZERO_BIT,
};

use super::{
    Barcode, BarcodeEncoding, Checksum, ChecksumPolicy, LengthRule, SymbologyDescriptor,
    UnitSystem, check_alphabet, split_check, verify_check,
};

const NAME: &str = "Plessey";

/// Check character scheme, chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlesseyCheck {
    #[default]
    Modulo10,
    /// Modulo 10 twice, the second over data plus the first check.
    Modulo10Dual,
    Modulo11,
    /// Modulo 11, then modulo 10 over data plus the first check.
    Modulo11Modulo10,
}

impl PlesseyCheck {
    fn len(self) -> usize {
        match self {
            PlesseyCheck::Modulo10 | PlesseyCheck::Modulo11 => 1,
            PlesseyCheck::Modulo10Dual | PlesseyCheck::Modulo11Modulo10 => 2,
        }
    }
}

fn value(ch: char) -> Option<u8> {
    PLESSEY_ALPHABET
        .find(ch.to_ascii_uppercase())
        .map(|v| v as u8)
}

fn value_char(v: u8) -> char {
    char::from(PLESSEY_ALPHABET.as_bytes()[usize::from(v)])
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Plessey {
    check: PlesseyCheck,
}

impl Plessey {
    pub fn new(check: PlesseyCheck) -> Self {
        Self { check }
    }

    fn values(payload: &str) -> Result<Vec<u8>> {
        check_alphabet(NAME, payload, |c| value(c).is_some())?;
        Ok(payload.chars().filter_map(value).collect())
    }

    /// Check values for `data` under the configured scheme.
    fn checks(&self, data: &[u8]) -> Vec<u8> {
        let first = match self.check {
            PlesseyCheck::Modulo10 | PlesseyCheck::Modulo10Dual => modulo10_plessey(data),
            PlesseyCheck::Modulo11 | PlesseyCheck::Modulo11Modulo10 => modulo11_plessey(data),
        };
        let mut checks = vec![first];
        if self.check.len() == 2 {
            let mut extended = data.to_vec();
            extended.push(first);
            checks.push(modulo10_plessey(&extended));
        }
        checks
    }

    fn check_text(&self, data: &[u8]) -> String {
        self.checks(data).into_iter().map(value_char).collect()
    }
}

impl BarcodeEncoding for Plessey {
    fn name(&self) -> &'static str {
        NAME
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        SymbologyDescriptor {
            name: NAME,
            alphabet: PLESSEY_ALPHABET,
            length: LengthRule::Variable { min: 1 },
            checksum: ChecksumPolicy::Selectable,
            units: UnitSystem::Binary,
        }
    }

    fn validate(&self, payload: &str) -> bool {
        !payload.is_empty() && payload.chars().all(|c| value(c).is_some())
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        let values = Self::values(payload)?;
        if values.is_empty() {
            return Err(EncodeError::invalid_length(NAME, "at least 1 character", 0));
        }
        Ok(Checksum::Chars(self.check_text(&values)))
    }

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        options.validate()?;
        let mut values = Self::values(payload)?;
        if options.append_check_digit {
            if values.is_empty() {
                return Err(EncodeError::invalid_length(NAME, "at least 1 character", 0));
            }
            let checks = self.checks(&values);
            values.extend(checks);
        } else {
            let (data, found) = split_check(NAME, payload, self.check.len())?;
            let expected = self.check_text(&Self::values(&data)?);
            verify_check(NAME, &expected, &found.to_ascii_uppercase())?;
        }

        let mut builder = PatternBuilder::new();
        builder.bits(PLESSEY_START);
        for &v in &values {
            for bit in 0..4 {
                builder.bits(if (v >> bit) & 1 == 1 {
                    PLESSEY_ONE_BIT
                } else {
                    PLESSEY_ZERO_BIT
                });
            }
        }
        builder.bits(PLESSEY_STOP);
        let text = values.iter().map(|&v| value_char(v)).collect();
        Ok(Barcode::new(NAME, text, builder.finish(), options))
    }
}
