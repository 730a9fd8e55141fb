//! Codabar.

use crate::core::checksum::modulo10_weighted;
use crate::core::error::{EncodeError, Result};
use crate::core::options::EncodeOptions;
use crate::core::pattern::PatternBuilder;
use crate::core::tables::CODABAR;

use super::{
    Barcode, BarcodeEncoding, Checksum, ChecksumPolicy, LengthRule, SymbologyDescriptor,
    UnitSystem, verify_check,
};

const NAME: &str = "Codabar";
const NARROW: usize = 1;
const WIDE: usize = 2;
const DATA_CHARS: &str = "0123456789-$:/.+";

/// Optional check character. Codabar defines none; `Modulo10` is a
/// reader-specific weighted mod 10 over the digits and is never the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodabarCheck {
    #[default]
    None,
    Modulo10,
}

/// Canonical start/stop character, folding the `T N * E` aliases.
fn guard(ch: char) -> Option<char> {
    match ch.to_ascii_uppercase() {
        c @ ('A' | 'B' | 'C' | 'D') => Some(c),
        'T' => Some('A'),
        'N' => Some('B'),
        '*' => Some('C'),
        'E' => Some('D'),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Codabar {
    check: CodabarCheck,
}

impl Codabar {
    pub fn new(check: CodabarCheck) -> Self {
        Self { check }
    }

    /// Split a payload into start, data and stop, defaulting to `A...B`.
    fn frame(payload: &str) -> Result<(char, String, char)> {
        let chars: Vec<char> = payload.chars().collect();
        let framed = chars.first().copied().and_then(guard);
        let (start, body, stop) = match framed {
            Some(start) => {
                if chars.len() < 2 {
                    return Err(EncodeError::invalid_length(
                        NAME,
                        "start, data and stop characters",
                        chars.len(),
                    ));
                }
                let last = chars.len() - 1;
                let stop = guard(chars[last])
                    .ok_or_else(|| EncodeError::invalid_char(NAME, chars[last], last))?;
                (start, &chars[1..last], stop)
            }
            None => ('A', &chars[..], 'B'),
        };
        let offset = usize::from(framed.is_some());
        if let Some((idx, &ch)) = body
            .iter()
            .enumerate()
            .find(|&(_, c)| !DATA_CHARS.contains(*c))
        {
            return Err(EncodeError::invalid_char(NAME, ch, idx + offset));
        }
        if body.is_empty() {
            return Err(EncodeError::invalid_length(NAME, "at least 1 data character", 0));
        }
        Ok((start, body.iter().collect(), stop))
    }

    fn modulo10(data: &str) -> u8 {
        let digits: Vec<u8> = data
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| d as u8)
            .collect();
        modulo10_weighted(&digits)
    }
}

impl BarcodeEncoding for Codabar {
    fn name(&self) -> &'static str {
        NAME
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        SymbologyDescriptor {
            name: NAME,
            alphabet: "0-9 - $ : / . + with start/stop A B C D (aliases T N * E)",
            length: LengthRule::Variable { min: 1 },
            checksum: match self.check {
                CodabarCheck::None => ChecksumPolicy::None,
                CodabarCheck::Modulo10 => ChecksumPolicy::Single,
            },
            units: UnitSystem::WideNarrow {
                narrow: NARROW,
                wide: WIDE,
            },
        }
    }

    fn validate(&self, payload: &str) -> bool {
        Self::frame(payload).is_ok()
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        let (_, data, _) = Self::frame(payload)?;
        Ok(match self.check {
            CodabarCheck::None => Checksum::None,
            CodabarCheck::Modulo10 => Checksum::digit(Self::modulo10(&data)),
        })
    }

    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        options.validate()?;
        let (start, mut data, stop) = Self::frame(payload)?;
        if self.check == CodabarCheck::Modulo10 {
            if options.append_check_digit {
                data.push(char::from(b'0' + Self::modulo10(&data)));
            } else {
                let Some(found) = data.pop() else {
                    return Err(EncodeError::invalid_length(NAME, "data and check", 0));
                };
                verify_check(NAME, &Self::modulo10(&data).to_string(), &found.to_string())?;
                data.push(found);
            }
        }

        let text: String = std::iter::once(start)
            .chain(data.chars())
            .chain(std::iter::once(stop))
            .collect();
        let mut builder = PatternBuilder::new();
        for (i, ch) in text.chars().enumerate() {
            if i > 0 {
                builder.space(NARROW);
            }
            let wn = CODABAR
                .get(&ch)
                .ok_or_else(|| EncodeError::invalid_char(NAME, ch, i))?;
            builder.wide_narrow(wn, NARROW, WIDE);
        }
        Ok(Barcode::new(NAME, text, builder.finish(), options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_guards_are_kept() {
        let code = Codabar::default()
            .encode("A40156B", &EncodeOptions::default())
            .unwrap();
        assert_eq!(code.text, "A40156B");
        let expected = concat!(
            "1011001001", "0", // A
            "101101001", "0", // 4
            "101010011", "0", // 0
            "101011001", "0", // 1
            "110101001", "0", // 5
            "100101011", "0", // 6
            "1001001011" // B
        );
        assert_eq!(code.rendered(), expected);
        assert_eq!(code.pattern.len(), 71);
    }

    #[test]
    fn missing_guards_default_to_a_b() {
        let opts = EncodeOptions::default();
        let bare = Codabar::default().encode("40156", &opts).unwrap();
        let framed = Codabar::default().encode("A40156B", &opts).unwrap();
        assert_eq!(bare, framed);
    }

    #[test]
    fn aliases_and_lowercase_normalize() {
        let opts = EncodeOptions::default();
        let aliased = Codabar::default().encode("t40156n", &opts).unwrap();
        assert_eq!(aliased.text, "A40156B");
    }

    #[test]
    fn start_without_stop_is_rejected() {
        assert_eq!(
            Codabar::default().encode("A40156", &EncodeOptions::default()),
            Err(EncodeError::invalid_char(NAME, '6', 5))
        );
        assert_eq!(
            Codabar::default().encode("40156B", &EncodeOptions::default()),
            Err(EncodeError::invalid_char(NAME, 'B', 5))
        );
    }

    #[test]
    fn check_is_opt_in() {
        let opts = EncodeOptions::default();
        assert_eq!(
            Codabar::default().check_digit("A40156B").unwrap(),
            Checksum::None
        );
        // 6*3 + 5 + 1*3 + 0 + 4*3 = 38
        let with_check = Codabar::new(CodabarCheck::Modulo10)
            .encode("A40156B", &opts)
            .unwrap();
        assert_eq!(with_check.text, "A401562B");

        let verify = opts.with_check_digit(false);
        assert!(Codabar::new(CodabarCheck::Modulo10)
            .encode("A401562B", &verify)
            .is_ok());
        assert!(matches!(
            Codabar::new(CodabarCheck::Modulo10).encode("A401563B", &verify),
            Err(EncodeError::ChecksumMismatch { .. })
        ));
    }
}
