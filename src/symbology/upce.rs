//! UPC-E and its structural conversion to and from UPC-A.
//!
//! A UPC-E symbol carries six data digits. The number system (0 or 1) and
//! the UPC-A check digit are not printed as bars; they select the parity of
//! the six digits through [`UPCE_PARITY`].

use crate::core::checksum::{digit_values, modulo10_weighted};
use crate::core::error::{EncodeError, Result};
use crate::core::options::EncodeOptions;
use crate::core::pattern::PatternBuilder;
use crate::core::tables::{EAN_GUARD, UPCE_END, UPCE_PARITY, ean_left};

use super::{
    Barcode, BarcodeEncoding, Checksum, ChecksumPolicy, LengthRule, SymbologyDescriptor,
    UnitSystem, verify_check,
};

const NAME: &str = "UPC-E";

fn text(digits: &[u8]) -> String {
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}

fn ensure_number_system(ns: u8) -> Result<()> {
    if ns > 1 {
        return Err(EncodeError::UnsupportedConversion(format!(
            "UPC-E requires number system 0 or 1, got {ns}"
        )));
    }
    Ok(())
}

/// Expand a six-digit UPC-E body into the eleven UPC-A data digits.
fn expand_body(ns: u8, b: &[u8]) -> [u8; 11] {
    match b[5] {
        0..=2 => [ns, b[0], b[1], b[5], 0, 0, 0, 0, b[2], b[3], b[4]],
        3 => [ns, b[0], b[1], b[2], 0, 0, 0, 0, 0, b[3], b[4]],
        4 => [ns, b[0], b[1], b[2], b[3], 0, 0, 0, 0, 0, b[4]],
        _ => [ns, b[0], b[1], b[2], b[3], b[4], 0, 0, 0, 0, b[5]],
    }
}

/// Compress eleven UPC-A data digits into a UPC-E body, if the
/// manufacturer/product split allows it.
fn compress_body(a: &[u8]) -> Result<[u8; 6]> {
    let m = &a[1..6];
    let p = &a[6..11];
    if m[2] <= 2 && m[3] == 0 && m[4] == 0 && p[0] == 0 && p[1] == 0 {
        return Ok([m[0], m[1], p[2], p[3], p[4], m[2]]);
    }
    if m[3] == 0 && m[4] == 0 && p[..3].iter().all(|&d| d == 0) {
        return Ok([m[0], m[1], m[2], p[3], p[4], 3]);
    }
    if m[4] == 0 && p[..4].iter().all(|&d| d == 0) {
        return Ok([m[0], m[1], m[2], m[3], p[4], 4]);
    }
    if p[..4].iter().all(|&d| d == 0) && p[4] >= 5 {
        return Ok([m[0], m[1], m[2], m[3], m[4], p[4]]);
    }
    Err(EncodeError::UnsupportedConversion(format!(
        "UPC-A {} has no UPC-E form",
        text(a)
    )))
}

/// Convert 6, 7 or 8 UPC-E digits to 11 or 12 UPC-A digits.
///
/// Six digits assume number system 0. An eighth (check) digit is verified
/// and carried over.
pub fn upce_to_upca(upce: &str) -> Result<String> {
    let digits = digit_values(NAME, upce)?;
    let (ns, body, check) = match digits.len() {
        6 => (0, &digits[..], None),
        7 => (digits[0], &digits[1..], None),
        8 => (digits[0], &digits[1..7], Some(digits[7])),
        n => {
            return Err(EncodeError::invalid_length(NAME, "6, 7 or 8 digits", n));
        }
    };
    ensure_number_system(ns)?;
    let mut upca = expand_body(ns, body).to_vec();
    if let Some(found) = check {
        let expected = modulo10_weighted(&upca);
        verify_check(NAME, &expected.to_string(), &found.to_string())?;
        upca.push(found);
    }
    Ok(text(&upca))
}

/// Convert 11 or 12 UPC-A digits to 7 or 8 UPC-E digits.
pub fn upca_to_upce(upca: &str) -> Result<String> {
    let digits = digit_values("UPC-A", upca)?;
    let (data, check) = match digits.len() {
        11 => (&digits[..], None),
        12 => (&digits[..11], Some(digits[11])),
        n => return Err(EncodeError::invalid_length("UPC-A", "11 or 12 digits", n)),
    };
    if let Some(found) = check {
        let expected = modulo10_weighted(data);
        verify_check("UPC-A", &expected.to_string(), &found.to_string())?;
    }
    ensure_number_system(data[0])?;
    let body = compress_body(data)?;
    let mut upce = Vec::with_capacity(8);
    upce.push(data[0]);
    upce.extend_from_slice(&body);
    upce.extend(check);
    Ok(text(&upce))
}

/// UPC-E: number system, six digits and check, 51 units.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpcE;

impl UpcE {
    /// Split a payload without check digit into number system and body.
    fn split_data(digits: &[u8]) -> Result<(u8, &[u8])> {
        match digits.len() {
            6 => Ok((0, digits)),
            7 => Ok((digits[0], &digits[1..])),
            n => Err(EncodeError::invalid_length(NAME, "6 or 7 digits", n)),
        }
    }

    fn compute_check(ns: u8, body: &[u8]) -> Result<u8> {
        ensure_number_system(ns)?;
        Ok(modulo10_weighted(&expand_body(ns, body)))
    }
}

impl BarcodeEncoding for UpcE {
    fn name(&self) -> &'static str {
        NAME
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        SymbologyDescriptor {
            name: NAME,
            alphabet: "0123456789",
            length: LengthRule::Fixed(&[6, 7]),
            checksum: ChecksumPolicy::Implicit,
            units: UnitSystem::Binary,
        }
    }

    fn validate(&self, payload: &str) -> bool {
        let n = payload.chars().count();
        (6..=8).contains(&n) && payload.chars().all(|c| c.is_ascii_digit())
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        let digits = digit_values(NAME, payload)?;
        let (ns, body) = Self::split_data(&digits)?;
        Ok(Checksum::digit(Self::compute_check(ns, body)?))
    }

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        options.validate()?;
        let digits = digit_values(NAME, payload)?;
        let (ns, body, check) = if options.append_check_digit {
            let (ns, body) = Self::split_data(&digits)?;
            (ns, body, Self::compute_check(ns, body)?)
        } else {
            if digits.len() != 8 {
                return Err(EncodeError::invalid_length(NAME, "8 digits", digits.len()));
            }
            let (ns, body, found) = (digits[0], &digits[1..7], digits[7]);
            let expected = Self::compute_check(ns, body)?;
            verify_check(NAME, &expected.to_string(), &found.to_string())?;
            (ns, body, found)
        };

        let parity = UPCE_PARITY[usize::from(check)].as_bytes();
        let mut builder = PatternBuilder::new();
        builder.bits(EAN_GUARD);
        for (i, &d) in body.iter().enumerate() {
            // Number system 1 uses the complementary parity set.
            let flag = match (ns, parity[i]) {
                (0, p) => p,
                (_, b'O') => b'E',
                _ => b'O',
            };
            builder.bits(ean_left(usize::from(d), flag));
        }
        builder.bits(UPCE_END);

        let mut full = vec![ns];
        full.extend_from_slice(body);
        full.push(check);
        Ok(Barcode::new(NAME, text(&full), builder.finish(), options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_each_rule() {
        assert_eq!(upce_to_upca("04252614").unwrap(), "042100005264");
        assert_eq!(upce_to_upca("0123453").unwrap(), "01230000045");
        assert_eq!(upce_to_upca("0123454").unwrap(), "01234000005");
        assert_eq!(upce_to_upca("123457").unwrap(), "01234500007");
    }

    #[test]
    fn compresses_each_rule() {
        assert_eq!(upca_to_upce("042100005264").unwrap(), "04252614");
        assert_eq!(upca_to_upce("01230000045").unwrap(), "0123453");
        assert_eq!(upca_to_upce("01234000005").unwrap(), "0123454");
        assert_eq!(upca_to_upce("01234500007").unwrap(), "0123457");
    }

    #[test]
    fn round_trip_through_upce() {
        for data in ["04210000526", "01230000045", "01234000005", "01234500007", "10000000005"] {
            let check = modulo10_weighted(&digit_values("UPC-A", data).unwrap());
            let upca = format!("{data}{check}");
            let upce = upca_to_upce(&upca).unwrap();
            assert_eq!(upce_to_upca(&upce).unwrap(), upca);
        }
    }

    #[test]
    fn incompressible_upca_is_rejected() {
        assert!(matches!(
            upca_to_upce("03600029145"),
            Err(EncodeError::UnsupportedConversion(_))
        ));
        assert!(matches!(
            upca_to_upce("21234500007"),
            Err(EncodeError::UnsupportedConversion(_))
        ));
    }

    #[test]
    fn encodes_parity_from_check_digit() {
        let code = UpcE.encode("0425261", &EncodeOptions::default()).unwrap();
        assert_eq!(code.text, "04252614");
        let expected = concat!(
            "101", "0011101", "0010011", "0111001", "0011011", "0101111", "0011001", "010101"
        );
        assert_eq!(code.rendered(), expected);
        assert_eq!(code.pattern.len(), 51);
    }

    #[test]
    fn number_system_one_flips_parity() {
        let zero = UpcE.encode("0425261", &EncodeOptions::default()).unwrap();
        let one = UpcE.encode("1425261", &EncodeOptions::default()).unwrap();
        assert_ne!(zero.pattern, one.pattern);
        assert_eq!(one.pattern.len(), 51);
    }

    #[test]
    fn embedded_check_is_verified() {
        let opts = EncodeOptions::default().with_check_digit(false);
        assert!(UpcE.encode("04252614", &opts).is_ok());
        assert!(matches!(
            UpcE.encode("04252615", &opts),
            Err(EncodeError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn six_digits_assume_number_system_zero() {
        assert_eq!(
            UpcE.check_digit("425261").unwrap(),
            Checksum::Chars("4".into())
        );
    }
}
