//! EAN-13, EAN-8 and UPC-A.

use crate::core::checksum::{digit_values, modulo10_weighted};
use crate::core::error::{EncodeError, Result};
use crate::core::options::EncodeOptions;
use crate::core::pattern::{BarPattern, PatternBuilder};
use crate::core::tables::{EAN_CENTER, EAN_GUARD, EAN_ODD, EAN_RIGHT, EAN13_PARITY, ean_left};

use super::{
    Barcode, BarcodeEncoding, Checksum, ChecksumPolicy, LengthRule, SymbologyDescriptor,
    UnitSystem, verify_check,
};

const DIGITS: &str = "0123456789";

/// Resolve a digit payload protected by the weighted modulo 10 check.
///
/// With `append` the payload is data only and the check digit is added;
/// otherwise its last digit is verified. `data_len` pins the data length
/// for fixed-length symbologies.
pub(super) fn complete_mod10(
    symbology: &'static str,
    payload: &str,
    data_len: Option<usize>,
    append: bool,
) -> Result<Vec<u8>> {
    let mut digits = digit_values(symbology, payload)?;
    let expected_len = data_len.map(|n| if append { n } else { n + 1 });
    if let Some(expected) = expected_len {
        if digits.len() != expected {
            return Err(EncodeError::invalid_length(
                symbology,
                format!("{expected} digits"),
                digits.len(),
            ));
        }
    }
    if append {
        if digits.is_empty() {
            return Err(EncodeError::invalid_length(symbology, "at least 1 digit", 0));
        }
        let check = modulo10_weighted(&digits);
        digits.push(check);
    } else {
        let Some((&found, data)) = digits.split_last() else {
            return Err(EncodeError::invalid_length(symbology, "at least 2 digits", 0));
        };
        if data.is_empty() {
            return Err(EncodeError::invalid_length(symbology, "at least 2 digits", 1));
        }
        let expected = modulo10_weighted(data);
        verify_check(symbology, &expected.to_string(), &found.to_string())?;
    }
    Ok(digits)
}

/// Check digit for exactly `data_len` digits.
fn fixed_check(symbology: &'static str, payload: &str, data_len: usize) -> Result<Checksum> {
    let digits = digit_values(symbology, payload)?;
    if digits.len() != data_len {
        return Err(EncodeError::invalid_length(
            symbology,
            format!("{data_len} digits"),
            digits.len(),
        ));
    }
    Ok(Checksum::digit(modulo10_weighted(&digits)))
}

fn digits_text(digits: &[u8]) -> String {
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}

/// Thirteen digits, the first carried by the parity of digits 2..7.
pub(super) fn ean13_pattern(digits: &[u8]) -> BarPattern {
    let parity = EAN13_PARITY[usize::from(digits[0])].as_bytes();
    let mut builder = PatternBuilder::new();
    builder.bits(EAN_GUARD);
    for (i, &d) in digits[1..7].iter().enumerate() {
        builder.bits(ean_left(usize::from(d), parity[i]));
    }
    builder.bits(EAN_CENTER);
    for &d in &digits[7..13] {
        builder.bits(EAN_RIGHT[usize::from(d)]);
    }
    builder.bits(EAN_GUARD).finish()
}

fn ean8_pattern(digits: &[u8]) -> BarPattern {
    let mut builder = PatternBuilder::new();
    builder.bits(EAN_GUARD);
    for &d in &digits[..4] {
        builder.bits(EAN_ODD[usize::from(d)]);
    }
    builder.bits(EAN_CENTER);
    for &d in &digits[4..8] {
        builder.bits(EAN_RIGHT[usize::from(d)]);
    }
    builder.bits(EAN_GUARD).finish()
}

fn digits_with_optional_check(payload: &str, data_len: usize) -> bool {
    let n = payload.chars().count();
    (n == data_len || n == data_len + 1) && payload.chars().all(|c| c.is_ascii_digit())
}

/// EAN-13: 12 data digits plus a check digit, 95 units.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ean13;

impl BarcodeEncoding for Ean13 {
    fn name(&self) -> &'static str {
        "EAN-13"
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        SymbologyDescriptor {
            name: self.name(),
            alphabet: DIGITS,
            length: LengthRule::Fixed(&[12]),
            checksum: ChecksumPolicy::Single,
            units: UnitSystem::Binary,
        }
    }

    fn validate(&self, payload: &str) -> bool {
        digits_with_optional_check(payload, 12)
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        fixed_check(self.name(), payload, 12)
    }

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        options.validate()?;
        let digits = complete_mod10(self.name(), payload, Some(12), options.append_check_digit)?;
        let pattern = ean13_pattern(&digits);
        Ok(Barcode::new(self.name(), digits_text(&digits), pattern, options))
    }
}

/// EAN-8: 7 data digits plus a check digit, 67 units.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ean8;

impl BarcodeEncoding for Ean8 {
    fn name(&self) -> &'static str {
        "EAN-8"
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        SymbologyDescriptor {
            name: self.name(),
            alphabet: DIGITS,
            length: LengthRule::Fixed(&[7]),
            checksum: ChecksumPolicy::Single,
            units: UnitSystem::Binary,
        }
    }

    fn validate(&self, payload: &str) -> bool {
        digits_with_optional_check(payload, 7)
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        fixed_check(self.name(), payload, 7)
    }

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        options.validate()?;
        let digits = complete_mod10(self.name(), payload, Some(7), options.append_check_digit)?;
        let pattern = ean8_pattern(&digits);
        Ok(Barcode::new(self.name(), digits_text(&digits), pattern, options))
    }
}

/// UPC-A: EAN-13 with number-system prefix `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpcA;

impl BarcodeEncoding for UpcA {
    fn name(&self) -> &'static str {
        "UPC-A"
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        SymbologyDescriptor {
            name: self.name(),
            alphabet: DIGITS,
            length: LengthRule::Fixed(&[11]),
            checksum: ChecksumPolicy::Single,
            units: UnitSystem::Binary,
        }
    }

    fn validate(&self, payload: &str) -> bool {
        digits_with_optional_check(payload, 11)
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        fixed_check(self.name(), payload, 11)?;
        Ean13.check_digit(&format!("0{payload}"))
    }

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        options.validate()?;
        let digits = complete_mod10(self.name(), payload, Some(11), options.append_check_digit)?;
        let mut ean = Vec::with_capacity(13);
        ean.push(0);
        ean.extend_from_slice(&digits);
        let pattern = ean13_pattern(&ean);
        Ok(Barcode::new(self.name(), digits_text(&digits), pattern, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EncodeError;

    fn opts() -> EncodeOptions {
        EncodeOptions::default()
    }

    #[test]
    fn ean13_reference() {
        let code = Ean13.encode("750105453010", &opts()).unwrap();
        assert_eq!(code.text, "7501054530107");
        assert_eq!(code.pattern.len(), 95);
        assert_eq!(
            Ean13.check_digit("750105453010").unwrap(),
            Checksum::Chars("7".into())
        );
    }

    #[test]
    fn ean13_known_pattern() {
        // 4006381333931: first digit 4 -> parity OEOOEE
        let code = Ean13
            .encode("4006381333931", &opts().with_check_digit(false))
            .unwrap();
        let left = ["0001101", "0100111", "0101111", "0111101", "0001001", "0110011"];
        let right = ["1000010", "1000010", "1000010", "1110100", "1000010", "1100110"];
        let expected = format!("101{}01010{}101", left.concat(), right.concat());
        assert_eq!(code.rendered(), expected);
    }

    #[test]
    fn ean13_embedded_check_is_verified() {
        let err = Ean13
            .encode("7501054530108", &opts().with_check_digit(false))
            .unwrap_err();
        assert_eq!(
            err,
            EncodeError::ChecksumMismatch {
                symbology: "EAN-13",
                expected: "7".into(),
                found: "8".into(),
            }
        );
    }

    #[test]
    fn ean13_wrong_length() {
        assert!(matches!(
            Ean13.encode("12345", &opts()),
            Err(EncodeError::InvalidLength { actual: 5, .. })
        ));
        assert!(matches!(
            Ean13.check_digit("7501054530107"),
            Err(EncodeError::InvalidLength { .. })
        ));
    }

    #[test]
    fn ean8_is_67_units() {
        let code = Ean8.encode("9638507", &opts()).unwrap();
        assert_eq!(code.text, "96385074");
        assert_eq!(code.pattern.len(), 67);
    }

    #[test]
    fn upca_matches_ean13_with_zero_prefix() {
        let upc = UpcA.encode("03600029145", &opts()).unwrap();
        let ean = Ean13.encode("003600029145", &opts()).unwrap();
        assert_eq!(upc.text, "036000291452");
        assert_eq!(upc.pattern, ean.pattern);
        assert_eq!(upc.pattern.len(), 95);
    }

    #[test]
    fn validate_is_pure() {
        assert!(Ean13.validate("750105453010"));
        assert!(Ean13.validate("750105453010"));
        assert!(Ean13.validate("7501054530107"));
        assert!(!Ean13.validate("75010545301A"));
        assert!(!Ean8.validate("123"));
    }
}
