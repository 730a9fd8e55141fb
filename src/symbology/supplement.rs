//! UPC/EAN two- and five-digit add-on symbols.
//!
//! The check value of an add-on is never printed; it only picks the parity
//! of the data digits, so `append_check_digit` has no effect here.

use crate::core::checksum::{digit_values, modulo4, modulo10_weights_3_9};
use crate::core::error::{EncodeError, Result};
use crate::core::options::EncodeOptions;
use crate::core::pattern::{BarPattern, PatternBuilder};
use crate::core::tables::{
    SUPPLEMENT_SEPARATOR, SUPPLEMENT_START, SUPPLEMENT2_PARITY, SUPPLEMENT5_PARITY, ean_left,
};

use super::{
    Barcode, BarcodeEncoding, Checksum, ChecksumPolicy, LengthRule, SymbologyDescriptor,
    UnitSystem,
};

fn exact_digits(symbology: &'static str, payload: &str, len: usize) -> Result<Vec<u8>> {
    let digits = digit_values(symbology, payload)?;
    if digits.len() != len {
        return Err(EncodeError::invalid_length(
            symbology,
            format!("{len} digits"),
            digits.len(),
        ));
    }
    Ok(digits)
}

fn supplement_pattern(digits: &[u8], parity: &str) -> BarPattern {
    let mut builder = PatternBuilder::new();
    builder.bits(SUPPLEMENT_START);
    for (i, (&d, p)) in digits.iter().zip(parity.bytes()).enumerate() {
        if i > 0 {
            builder.bits(SUPPLEMENT_SEPARATOR);
        }
        builder.bits(ean_left(usize::from(d), p));
    }
    builder.finish()
}

fn descriptor(name: &'static str, len: &'static [usize]) -> SymbologyDescriptor {
    SymbologyDescriptor {
        name,
        alphabet: "0123456789",
        length: LengthRule::Fixed(len),
        checksum: ChecksumPolicy::Implicit,
        units: UnitSystem::Binary,
    }
}

/// Two-digit add-on; parity keyed by value mod 4. 20 units.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpcSupplement2;

impl BarcodeEncoding for UpcSupplement2 {
    fn name(&self) -> &'static str {
        "UPC supplemental 2"
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        descriptor(self.name(), &[2])
    }

    fn validate(&self, payload: &str) -> bool {
        payload.len() == 2 && payload.chars().all(|c| c.is_ascii_digit())
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        let digits = exact_digits(self.name(), payload, 2)?;
        Ok(Checksum::Parity(modulo4(&digits)))
    }

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        options.validate()?;
        let digits = exact_digits(self.name(), payload, 2)?;
        let parity = SUPPLEMENT2_PARITY[usize::from(modulo4(&digits))];
        let pattern = supplement_pattern(&digits, parity);
        Ok(Barcode::new(self.name(), payload.to_string(), pattern, options))
    }
}

/// Five-digit add-on; parity keyed by the 3/9 weighted checksum. 47 units.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpcSupplement5;

impl BarcodeEncoding for UpcSupplement5 {
    fn name(&self) -> &'static str {
        "UPC supplemental 5"
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        descriptor(self.name(), &[5])
    }

    fn validate(&self, payload: &str) -> bool {
        payload.len() == 5 && payload.chars().all(|c| c.is_ascii_digit())
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        let digits = exact_digits(self.name(), payload, 5)?;
        Ok(Checksum::Parity(modulo10_weights_3_9(&digits)))
    }

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        options.validate()?;
        let digits = exact_digits(self.name(), payload, 5)?;
        let parity = SUPPLEMENT5_PARITY[usize::from(modulo10_weights_3_9(&digits))];
        let pattern = supplement_pattern(&digits, parity);
        Ok(Barcode::new(self.name(), payload.to_string(), pattern, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tables::{EAN_EVEN, EAN_ODD};

    #[test]
    fn two_digit_parity_by_mod4() {
        // 34 mod 4 = 2 -> even, odd
        let code = UpcSupplement2.encode("34", &EncodeOptions::default()).unwrap();
        assert_eq!(code.rendered(), format!("1011{}01{}", EAN_EVEN[3], EAN_ODD[4]));
        assert_eq!(code.pattern.len(), 20);
        assert_eq!(UpcSupplement2.check_digit("34").unwrap(), Checksum::Parity(2));
    }

    #[test]
    fn five_digit_parity_by_weighted_sum() {
        // 52495 -> checksum 1 -> EOEOO
        let code = UpcSupplement5.encode("52495", &EncodeOptions::default()).unwrap();
        let expected = format!(
            "1011{}01{}01{}01{}01{}",
            EAN_EVEN[5], EAN_ODD[2], EAN_EVEN[4], EAN_ODD[9], EAN_ODD[5]
        );
        assert_eq!(code.rendered(), expected);
        assert_eq!(code.pattern.len(), 47);
    }

    #[test]
    fn check_flag_is_ignored() {
        let with = UpcSupplement5.encode("52495", &EncodeOptions::default()).unwrap();
        let without = UpcSupplement5
            .encode("52495", &EncodeOptions::default().with_check_digit(false))
            .unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn exact_length_required() {
        assert!(matches!(
            UpcSupplement2.encode("123", &EncodeOptions::default()),
            Err(EncodeError::InvalidLength { .. })
        ));
    }
}
