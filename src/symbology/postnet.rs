//! USPS PostNet.
//!
//! Cells are tall or short bars rather than bars and spaces: a
//! [`Module::Bar`](crate::core::pattern::Module) is a full-height bar and a
//! `Module::Space` a half-height bar, one cell per bar.

use crate::core::checksum::modulo10_unweighted;
use crate::core::error::{EncodeError, Result};
use crate::core::options::EncodeOptions;
use crate::core::pattern::PatternBuilder;
use crate::core::tables::{POSTNET_BITS, POSTNET_GUARD};

use super::{
    Barcode, BarcodeEncoding, Checksum, ChecksumPolicy, LengthRule, SymbologyDescriptor,
    UnitSystem, verify_check,
};

const NAME: &str = "PostNet";
/// ZIP, ZIP+4 and delivery point lengths, without the check digit.
const DATA_LENGTHS: [usize; 3] = [5, 9, 11];

/// Digits of the payload; separators such as `-` and spaces are dropped.
fn digits(payload: &str) -> Vec<u8> {
    payload
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8)
        .collect()
}

fn ensure_length(digits: &[u8], with_check: bool) -> Result<()> {
    let extra = usize::from(with_check);
    if DATA_LENGTHS.iter().any(|&n| n + extra == digits.len()) {
        return Ok(());
    }
    let expected = if with_check { "6, 10 or 12 digits" } else { "5, 9 or 11 digits" };
    Err(EncodeError::invalid_length(NAME, expected, digits.len()))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PostNet;

impl BarcodeEncoding for PostNet {
    fn name(&self) -> &'static str {
        NAME
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        SymbologyDescriptor {
            name: NAME,
            alphabet: "0123456789 (other characters are ignored)",
            length: LengthRule::Fixed(&DATA_LENGTHS),
            checksum: ChecksumPolicy::Single,
            units: UnitSystem::TallShort,
        }
    }

    fn validate(&self, payload: &str) -> bool {
        let digits = digits(payload);
        ensure_length(&digits, false).is_ok() || ensure_length(&digits, true).is_ok()
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        let digits = digits(payload);
        ensure_length(&digits, false)?;
        Ok(Checksum::digit(modulo10_unweighted(&digits)))
    }

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        options.validate()?;
        let mut digits = digits(payload);
        if options.append_check_digit {
            ensure_length(&digits, false)?;
            digits.push(modulo10_unweighted(&digits));
        } else {
            ensure_length(&digits, true)?;
            let (&found, data) = digits
                .split_last()
                .ok_or_else(|| EncodeError::invalid_length(NAME, "6, 10 or 12 digits", 0))?;
            verify_check(
                NAME,
                &modulo10_unweighted(data).to_string(),
                &found.to_string(),
            )?;
        }

        let mut builder = PatternBuilder::new();
        builder.bits(POSTNET_GUARD);
        for &d in &digits {
            builder.bits(POSTNET_BITS[usize::from(d)]);
        }
        builder.bits(POSTNET_GUARD);
        let text = digits.iter().map(|&d| char::from(b'0' + d)).collect();
        Ok(Barcode::new(NAME, text, builder.finish(), options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_with_check_is_framed_by_tall_bars() {
        let code = PostNet.encode("55555", &EncodeOptions::default()).unwrap();
        assert_eq!(code.text, "555555");
        assert_eq!(code.rendered(), format!("1{}1", "01010".repeat(6)));
        assert_eq!(code.pattern.len(), 2 + 5 * 6);
    }

    #[test]
    fn separators_are_stripped() {
        let opts = EncodeOptions::default();
        let dashed = PostNet.encode("12345-6789", &opts).unwrap();
        let plain = PostNet.encode("123456789", &opts).unwrap();
        assert_eq!(dashed, plain);
        // 1 + 2 + ... + 9 = 45
        assert_eq!(dashed.text, "1234567895");
    }

    #[test]
    fn embedded_check_uses_longer_lengths() {
        let opts = EncodeOptions::default().with_check_digit(false);
        assert!(PostNet.encode("12345-67895", &opts).is_ok());
        assert!(matches!(
            PostNet.encode("12345-67896", &opts),
            Err(EncodeError::ChecksumMismatch { .. })
        ));
        assert!(matches!(
            PostNet.encode("12345", &opts),
            Err(EncodeError::InvalidLength { .. })
        ));
    }

    #[test]
    fn other_lengths_are_rejected() {
        assert_eq!(
            PostNet.encode("1234", &EncodeOptions::default()),
            Err(EncodeError::invalid_length(NAME, "5, 9 or 11 digits", 4))
        );
        assert!(PostNet.validate("12345"));
        assert!(PostNet.validate("123455"));
        assert!(!PostNet.validate("1234567"));
    }
}
