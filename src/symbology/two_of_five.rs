//! The 2-of-5 family: Interleaved, Standard (Industrial), Matrix and COOP.
//!
//! All four carry digits protected by the weighted modulo 10 check. Their
//! guard bars are drawn at two units while wide payload elements are three
//! units, so the two widths are separate constants.

use crate::core::checksum::{digit_values, modulo10_weighted};
use crate::core::error::{EncodeError, Result};
use crate::core::options::EncodeOptions;
use crate::core::pattern::PatternBuilder;
use crate::core::tables::{
    COOP_25_START_WN, COOP_25_STOP_WN, COOP_TWO_OF_FIVE_WN, ITF_START, ITF_STOP_WN,
    MATRIX_25_START_WN, MATRIX_25_STOP_WN, STANDARD_25_START_WN, STANDARD_25_STOP_WN,
    TWO_OF_FIVE_WN,
};

use super::ean::complete_mod10;
use super::{
    Barcode, BarcodeEncoding, Checksum, ChecksumPolicy, LengthRule, SymbologyDescriptor,
    UnitSystem,
};

const NARROW: usize = 1;
/// Wide payload element.
const PAYLOAD_WIDE: usize = 3;
/// Wide guard element of the discrete variants.
const GUARD_WIDE: usize = 2;

fn width(element: u8) -> usize {
    if element == b'w' { PAYLOAD_WIDE } else { NARROW }
}

fn descriptor(name: &'static str) -> SymbologyDescriptor {
    SymbologyDescriptor {
        name,
        alphabet: "0123456789",
        length: LengthRule::Variable { min: 1 },
        checksum: ChecksumPolicy::Single,
        units: UnitSystem::WideNarrow {
            narrow: NARROW,
            wide: PAYLOAD_WIDE,
        },
    }
}

fn all_digits(payload: &str) -> bool {
    !payload.is_empty() && payload.chars().all(|c| c.is_ascii_digit())
}

fn check_digit(name: &'static str, payload: &str) -> Result<Checksum> {
    let digits = digit_values(name, payload)?;
    if digits.is_empty() {
        return Err(EncodeError::invalid_length(name, "at least 1 digit", 0));
    }
    Ok(Checksum::digit(modulo10_weighted(&digits)))
}

fn text(digits: &[u8]) -> String {
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}

/// How a non-interleaved variant lays out the five elements of a digit.
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// Five bars, each followed by a narrow space.
    BarsOnly,
    /// Bar, space, bar, space, bar, then a narrow gap.
    Alternating,
}

struct Discrete {
    name: &'static str,
    table: &'static [&'static str; 10],
    start: &'static str,
    stop: &'static str,
    layout: Layout,
}

impl Discrete {
    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        options.validate()?;
        let digits = complete_mod10(self.name, payload, None, options.append_check_digit)?;
        let mut builder = PatternBuilder::new();
        builder.wide_narrow(self.start, NARROW, GUARD_WIDE);
        for &d in &digits {
            let elements = self.table[usize::from(d)].bytes();
            match self.layout {
                Layout::BarsOnly => {
                    for e in elements {
                        builder.bar(width(e)).space(NARROW);
                    }
                }
                Layout::Alternating => {
                    for (i, e) in elements.enumerate() {
                        if i % 2 == 0 {
                            builder.bar(width(e));
                        } else {
                            builder.space(width(e));
                        }
                    }
                    builder.space(NARROW);
                }
            }
        }
        builder.wide_narrow(self.stop, NARROW, GUARD_WIDE);
        Ok(Barcode::new(self.name, text(&digits), builder.finish(), options))
    }
}

const STANDARD: Discrete = Discrete {
    name: "Standard 2 of 5",
    table: &TWO_OF_FIVE_WN,
    start: STANDARD_25_START_WN,
    stop: STANDARD_25_STOP_WN,
    layout: Layout::BarsOnly,
};

const MATRIX: Discrete = Discrete {
    name: "Matrix 2 of 5",
    table: &TWO_OF_FIVE_WN,
    start: MATRIX_25_START_WN,
    stop: MATRIX_25_STOP_WN,
    layout: Layout::Alternating,
};

const COOP: Discrete = Discrete {
    name: "COOP 2 of 5",
    table: &COOP_TWO_OF_FIVE_WN,
    start: COOP_25_START_WN,
    stop: COOP_25_STOP_WN,
    layout: Layout::Alternating,
};

macro_rules! discrete_symbology {
    ($ty:ident, $def:expr) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        impl BarcodeEncoding for $ty {
            fn name(&self) -> &'static str {
                $def.name
            }

            fn descriptor(&self) -> SymbologyDescriptor {
                descriptor($def.name)
            }

            fn validate(&self, payload: &str) -> bool {
                all_digits(payload)
            }

            fn check_digit(&self, payload: &str) -> Result<Checksum> {
                check_digit($def.name, payload)
            }

            fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
                $def.encode(payload, options)
            }
        }
    };
}

discrete_symbology!(Standard2of5, STANDARD);
discrete_symbology!(Matrix2of5, MATRIX);
discrete_symbology!(Coop2of5, COOP);

const ITF_NAME: &str = "Interleaved 2 of 5";

/// Interleaved 2 of 5 (ITF): digit pairs, the first in the bars and the
/// second in the spaces between them.
///
/// The digit count must come out even. When appending, an even payload is
/// prefixed with `0` so the check digit restores evenness; when the check is
/// already embedded, an odd payload is padded with a leading `0`. A leading
/// zero does not change the weighted check.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interleaved2of5;

impl Interleaved2of5 {
    fn digits(payload: &str, append: bool) -> Result<Vec<u8>> {
        let count = payload.chars().count();
        if count == 0 {
            return Err(EncodeError::invalid_length(ITF_NAME, "at least 1 digit", 0));
        }
        if append && count % 2 == 0 {
            digit_values(ITF_NAME, payload)?;
            complete_mod10(ITF_NAME, &format!("0{payload}"), None, true)
        } else {
            let mut digits = complete_mod10(ITF_NAME, payload, None, append)?;
            if digits.len() % 2 == 1 {
                digits.insert(0, 0);
            }
            Ok(digits)
        }
    }
}

impl BarcodeEncoding for Interleaved2of5 {
    fn name(&self) -> &'static str {
        ITF_NAME
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        descriptor(ITF_NAME)
    }

    fn validate(&self, payload: &str) -> bool {
        all_digits(payload)
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        check_digit(ITF_NAME, payload)
    }

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        options.validate()?;
        let digits = Self::digits(payload, options.append_check_digit)?;
        let mut builder = PatternBuilder::new();
        builder.bits(ITF_START);
        for pair in digits.chunks_exact(2) {
            let bars = TWO_OF_FIVE_WN[usize::from(pair[0])].bytes();
            let spaces = TWO_OF_FIVE_WN[usize::from(pair[1])].bytes();
            for (b, s) in bars.zip(spaces) {
                builder.bar(width(b)).space(width(s));
            }
        }
        builder.wide_narrow(ITF_STOP_WN, NARROW, PAYLOAD_WIDE);
        Ok(Barcode::new(ITF_NAME, text(&digits), builder.finish(), options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn itf_pads_even_payload_before_check() {
        // 0 1 2 3 4 -> 4*3 + 3 + 2*3 + 1 + 0 = 22 -> check 8
        let code = Interleaved2of5
            .encode("1234", &EncodeOptions::default())
            .unwrap();
        assert_eq!(code.text, "012348");
        assert_eq!(code.pattern.len(), 4 + 9 * 6 + 5);
    }

    #[test]
    fn itf_odd_payload_needs_no_padding_when_appending() {
        let code = Interleaved2of5
            .encode("12345", &EncodeOptions::default())
            .unwrap();
        assert_eq!(code.text.len(), 6);
        assert!(code.text.starts_with("12345"));
    }

    #[test]
    fn itf_pads_odd_embedded_payload() {
        let opts = EncodeOptions::default().with_check_digit(false);
        let code = Interleaved2of5.encode("12348", &opts).unwrap();
        assert_eq!(code.text, "012348");
        let appended = Interleaved2of5
            .encode("1234", &EncodeOptions::default())
            .unwrap();
        assert_eq!(code.pattern, appended.pattern);
        assert!(matches!(
            Interleaved2of5.encode("12349", &opts),
            Err(EncodeError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn itf_interleaves_bars_and_spaces() {
        let opts = EncodeOptions::default().with_check_digit(false);
        // "00": nnwwn in both bars and spaces
        let code = Interleaved2of5.encode("00", &opts).unwrap();
        assert_eq!(code.rendered(), "101010101110001110001011101");
    }

    #[test]
    fn standard_uses_bars_only() {
        // check of "1" is 7
        let code = Standard2of5.encode("1", &EncodeOptions::default()).unwrap();
        assert_eq!(code.text, "17");
        let expected = concat!("11011010", "11101010101110", "10101011101110", "1101011");
        assert_eq!(code.rendered(), expected);
    }

    #[test]
    fn matrix_alternates_with_gap() {
        let code = Matrix2of5.encode("1", &EncodeOptions::default()).unwrap();
        let expected = concat!("1101010", "1110101110", "1010001110", "110101");
        assert_eq!(code.rendered(), expected);
    }

    #[test]
    fn coop_uses_reversed_table() {
        let opts = EncodeOptions::default();
        let coop = Coop2of5.encode("1", &opts).unwrap();
        let matrix = Matrix2of5.encode("1", &opts).unwrap();
        assert_eq!(coop.text, matrix.text);
        assert_eq!(coop.pattern.len(), 6 + 10 * 2 + 4);
        assert_ne!(coop.rendered(), matrix.rendered());
    }

    #[test]
    fn guards_use_narrower_wide_elements_than_payload() {
        let render = |wn: &str, wide: usize| {
            PatternBuilder::new()
                .wide_narrow(wn, NARROW, wide)
                .finish()
                .render('1', '0')
        };
        assert_eq!(render(STANDARD_25_START_WN, GUARD_WIDE), "11011010");
        assert_eq!(render(STANDARD_25_STOP_WN, GUARD_WIDE), "1101011");
        assert_eq!(render(MATRIX_25_START_WN, GUARD_WIDE), "1101010");
        assert_eq!(render(MATRIX_25_STOP_WN, GUARD_WIDE), "110101");
        assert_eq!(render(COOP_25_START_WN, GUARD_WIDE), "110110");
        assert_eq!(render(COOP_25_STOP_WN, GUARD_WIDE), "1011");
        assert_eq!(render(STANDARD_25_STOP_WN, PAYLOAD_WIDE), "111010111");
    }

    #[test]
    fn itf_error_positions_ignore_padding() {
        assert_eq!(
            Interleaved2of5.encode("12a4", &EncodeOptions::default()),
            Err(EncodeError::invalid_char(ITF_NAME, 'a', 2))
        );
        assert_eq!(
            Standard2of5.encode("12a4", &EncodeOptions::default()),
            Err(EncodeError::invalid_char("Standard 2 of 5", 'a', 2))
        );
    }

    #[test]
    fn family_rejects_letters() {
        assert!(matches!(
            Matrix2of5.encode("12a", &EncodeOptions::default()),
            Err(EncodeError::InvalidCharacter { ch: 'a', position: 2, .. })
        ));
        assert!(!Coop2of5.validate(""));
    }
}
