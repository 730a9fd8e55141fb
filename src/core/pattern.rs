//! Bar/space patterns and their run-length form.
//!
//! A [`BarPattern`] is the unit-by-unit output of every encoder. Renderers
//! either draw it directly (one cell per unit) or consume the compact
//! [`RlePattern`], whose text form is `"<total units>:<run digits>"`.

use std::fmt;
use std::str::FromStr;

use crate::core::error::{EncodeError, Result};

/// Largest run a single RLE digit can describe.
pub const MAX_RUN: usize = 9;

/// One unit-wide cell of a pattern.
///
/// For height-modulated symbologies (PostNet) `Bar` is a full-height bar and
/// `Space` a half-height bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Bar,
    Space,
}

impl Module {
    fn flip(self) -> Self {
        match self {
            Module::Bar => Module::Space,
            Module::Space => Module::Bar,
        }
    }
}

/// Ordered unit cells produced by an encoder. Always starts with a bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BarPattern {
    modules: Vec<Module>,
}

impl BarPattern {
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Total width in units.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Render with caller-chosen bar and space characters.
    pub fn render(&self, bar: char, space: char) -> String {
        self.modules
            .iter()
            .map(|m| match m {
                Module::Bar => bar,
                Module::Space => space,
            })
            .collect()
    }

    /// Parse a rendered pattern back into cells.
    pub fn parse(text: &str, bar: char, space: char) -> Result<Self> {
        let mut modules = Vec::with_capacity(text.len());
        for (idx, ch) in text.chars().enumerate() {
            let module = if ch == bar {
                Module::Bar
            } else if ch == space {
                Module::Space
            } else {
                return Err(EncodeError::invalid_char("pattern", ch, idx));
            };
            modules.push(module);
        }
        if modules.first() == Some(&Module::Space) {
            return Err(EncodeError::MalformedRle(
                "pattern must start with a bar".to_string(),
            ));
        }
        Ok(Self { modules })
    }

    /// Collapse into alternating run lengths, starting from a bar.
    pub fn to_rle(&self) -> Result<RlePattern> {
        let mut runs = Vec::new();
        let mut offset = 0;
        let mut iter = self.modules.iter().peekable();
        while let Some(&current) = iter.next() {
            let mut run = 1;
            while iter.peek() == Some(&&current) {
                iter.next();
                run += 1;
            }
            if run > MAX_RUN {
                return Err(EncodeError::RunTooLong { run, offset });
            }
            runs.push(run as u8);
            offset += run;
        }
        Ok(RlePattern {
            total_units: offset,
            runs,
        })
    }
}

impl fmt::Display for BarPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render('1', '0'))
    }
}

/// Incremental builder used by the symbology encoders.
#[derive(Debug, Default)]
pub(crate) struct PatternBuilder {
    modules: Vec<Module>,
}

impl PatternBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(&mut self, module: Module, width: usize) -> &mut Self {
        self.modules.extend(std::iter::repeat_n(module, width));
        self
    }

    pub fn bar(&mut self, width: usize) -> &mut Self {
        self.run(Module::Bar, width)
    }

    pub fn space(&mut self, width: usize) -> &mut Self {
        self.run(Module::Space, width)
    }

    /// Append a literal `1`/`0` table entry.
    pub fn bits(&mut self, bits: &str) -> &mut Self {
        for b in bits.bytes() {
            self.modules.push(if b == b'1' {
                Module::Bar
            } else {
                Module::Space
            });
        }
        self
    }

    /// Append a `w`/`n` table entry; elements alternate starting with a bar.
    pub fn wide_narrow(&mut self, wn: &str, narrow: usize, wide: usize) -> &mut Self {
        let mut module = Module::Bar;
        for b in wn.bytes() {
            let width = if b == b'w' { wide } else { narrow };
            self.run(module, width);
            module = module.flip();
        }
        self
    }

    /// Append explicit element widths (`"211214"`), alternating from a bar.
    pub fn widths(&mut self, widths: &str) -> &mut Self {
        let mut module = Module::Bar;
        for b in widths.bytes() {
            self.run(module, usize::from(b - b'0'));
            module = module.flip();
        }
        self
    }

    pub fn finish(&mut self) -> BarPattern {
        let modules = std::mem::take(&mut self.modules);
        debug_assert!(modules.first() != Some(&Module::Space));
        BarPattern { modules }
    }
}

/// Run-length form: total width plus alternating bar/space run lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RlePattern {
    total_units: usize,
    runs: Vec<u8>,
}

impl RlePattern {
    pub fn total_units(&self) -> usize {
        self.total_units
    }

    pub fn runs(&self) -> &[u8] {
        &self.runs
    }

    /// Run lengths as a string of single ASCII digits.
    pub fn run_digits(&self) -> String {
        self.runs.iter().map(|r| char::from(b'0' + r)).collect()
    }

    /// Rebuild the unit-cell pattern this encoding describes.
    pub fn expand(&self) -> BarPattern {
        let mut builder = PatternBuilder::new();
        let mut module = Module::Bar;
        for &run in &self.runs {
            builder.run(module, usize::from(run));
            module = module.flip();
        }
        builder.finish()
    }
}

impl fmt::Display for RlePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.total_units, self.run_digits())
    }
}

impl FromStr for RlePattern {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self> {
        let (total, digits) = s
            .split_once(':')
            .ok_or_else(|| EncodeError::MalformedRle(format!("missing ':' in '{s}'")))?;
        let total_units: usize = total
            .trim()
            .parse()
            .map_err(|_| EncodeError::MalformedRle(format!("bad unit count '{total}'")))?;
        let mut runs = Vec::with_capacity(digits.len());
        for ch in digits.trim().chars() {
            match ch.to_digit(10) {
                Some(d) if d > 0 => runs.push(d as u8),
                _ => {
                    return Err(EncodeError::MalformedRle(format!(
                        "run '{ch}' is not a digit 1-9"
                    )));
                }
            }
        }
        let sum: usize = runs.iter().map(|&r| usize::from(r)).sum();
        if sum != total_units {
            return Err(EncodeError::MalformedRle(format!(
                "runs add up to {sum} units, header says {total_units}"
            )));
        }
        Ok(Self { total_units, runs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rle_of_simple_pattern() {
        let pattern = BarPattern::parse("1011001", '1', '0').unwrap();
        let rle = pattern.to_rle().unwrap();
        assert_eq!(rle.total_units(), 7);
        assert_eq!(rle.to_string(), "7:11221");
    }

    #[test]
    fn rle_text_round_trip() {
        let rle: RlePattern = "29:112211221112112111221".parse().unwrap();
        assert_eq!(rle.total_units(), 29);
        let expanded = rle.expand();
        assert_eq!(expanded.len(), 29);
        assert_eq!(expanded.to_rle().unwrap(), rle);
    }

    #[test]
    fn rle_rejects_inconsistent_total() {
        assert!(matches!(
            "10:111".parse::<RlePattern>(),
            Err(EncodeError::MalformedRle(_))
        ));
        assert!(matches!(
            "3:102".parse::<RlePattern>(),
            Err(EncodeError::MalformedRle(_))
        ));
    }

    #[test]
    fn long_runs_are_reported() {
        let mut builder = PatternBuilder::new();
        let pattern = builder.bar(1).space(10).bar(1).finish();
        assert_eq!(
            pattern.to_rle(),
            Err(EncodeError::RunTooLong { run: 10, offset: 1 })
        );
    }

    #[test]
    fn wide_narrow_alternates_from_bar() {
        let mut builder = PatternBuilder::new();
        let pattern = builder.wide_narrow("nwnnw", 1, 2).finish();
        assert_eq!(pattern.to_string(), "1001011");
    }

    #[test]
    fn custom_symbols() {
        let mut builder = PatternBuilder::new();
        let pattern = builder.widths("2112").finish();
        assert_eq!(pattern.render('#', ' '), "## #  ");
    }
}
