//! Code 128 with automatic A/B/C subset selection.
//!
//! Encoding happens in two steps. [`Code128::plan`] assigns a subset to every
//! input position: digit runs long enough to pay for a switch go to subset C,
//! everything else to whichever of A or B covers the longer stretch from the
//! point where a choice has to be made (ties go to A). [`Code128::codewords`]
//! then walks the plan, emitting start and switch symbols where the subset
//! changes and packing digit pairs in subset C, and closes the stream with
//! the modulo 103 check symbol and the stop symbol.

use std::fmt;

use tracing::trace;

use crate::core::checksum::modulo103;
use crate::core::error::{EncodeError, Result};
use crate::core::options::EncodeOptions;
use crate::core::pattern::PatternBuilder;
use crate::core::tables::{
    CODE128_START_A, CODE128_START_B, CODE128_START_C, CODE128_STOP, CODE128_WIDTHS,
};

use super::{
    Barcode, BarcodeEncoding, Checksum, ChecksumPolicy, LengthRule, SymbologyDescriptor,
    UnitSystem,
};

const NAME: &str = "Code 128";

/// Minimum digit run worth switching to subset C inside the data.
const C_RUN_INTERIOR: usize = 6;
/// Minimum digit run worth starting or ending in subset C.
const C_RUN_ANCHORED: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subset {
    A,
    B,
    C,
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Subset::A => 'A',
            Subset::B => 'B',
            Subset::C => 'C',
        };
        write!(f, "{c}")
    }
}

/// Logical Code 128 symbols.
///
/// Input streams hold `Literal` bytes (ASCII 0..=127) and function codes;
/// the start, switch, `Digits` and stop symbols are produced by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code128Symbol {
    Literal(u8),
    /// Two digits packed into one subset C symbol (value 0..=99).
    Digits(u8),
    Shift,
    Fnc1,
    Fnc2,
    Fnc3,
    Fnc4,
    CodeA,
    CodeB,
    CodeC,
    StartA,
    StartB,
    StartC,
    Stop,
}

impl Code128Symbol {
    /// Symbol value when emitted while `subset` is active.
    pub fn value(self, subset: Subset) -> Option<u8> {
        use Code128Symbol::*;
        use Subset::{A, B, C};
        match (self, subset) {
            (Literal(b), A) if b < 32 => Some(b + 64),
            (Literal(b), A) if b < 96 => Some(b - 32),
            (Literal(b), B) if (32..128).contains(&b) => Some(b - 32),
            (Digits(v), C) if v < 100 => Some(v),
            (Fnc3, A | B) => Some(96),
            (Fnc2, A | B) => Some(97),
            (Shift, A | B) => Some(98),
            (CodeC, A | B) => Some(99),
            (CodeB, A | C) => Some(100),
            (Fnc4, B) => Some(100),
            (Fnc4, A) => Some(101),
            (CodeA, B | C) => Some(101),
            (Fnc1, _) => Some(102),
            (StartA, _) => Some(CODE128_START_A),
            (StartB, _) => Some(CODE128_START_B),
            (StartC, _) => Some(CODE128_START_C),
            (Stop, _) => Some(CODE128_STOP),
            _ => None,
        }
    }

    fn start(subset: Subset) -> Self {
        match subset {
            Subset::A => Code128Symbol::StartA,
            Subset::B => Code128Symbol::StartB,
            Subset::C => Code128Symbol::StartC,
        }
    }

    fn switch(subset: Subset) -> Self {
        match subset {
            Subset::A => Code128Symbol::CodeA,
            Subset::B => Code128Symbol::CodeB,
            Subset::C => Code128Symbol::CodeC,
        }
    }

    fn is_digit(self) -> bool {
        matches!(self, Code128Symbol::Literal(b) if b.is_ascii_digit())
    }

    fn fits(self, subset: Subset) -> bool {
        subset != Subset::C && self.value(subset).is_some()
    }
}

fn only_fnc1(side: &[Code128Symbol]) -> bool {
    side.iter().all(|&s| s == Code128Symbol::Fnc1)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Code128;

impl Code128 {
    fn symbols_from_text(payload: &str) -> Result<Vec<Code128Symbol>> {
        payload
            .chars()
            .enumerate()
            .map(|(idx, ch)| {
                if ch.is_ascii() {
                    Ok(Code128Symbol::Literal(ch as u8))
                } else {
                    Err(EncodeError::invalid_char(NAME, ch, idx))
                }
            })
            .collect()
    }

    fn check_input(input: &[Code128Symbol]) -> Result<()> {
        if input.is_empty() {
            return Err(EncodeError::invalid_length(NAME, "at least 1 symbol", 0));
        }
        for (idx, &symbol) in input.iter().enumerate() {
            match symbol {
                Code128Symbol::Literal(b) if b >= 128 => {
                    return Err(EncodeError::invalid_char(NAME, char::from(b), idx));
                }
                Code128Symbol::Literal(_)
                | Code128Symbol::Fnc1
                | Code128Symbol::Fnc2
                | Code128Symbol::Fnc3
                | Code128Symbol::Fnc4 => {}
                other => {
                    return Err(EncodeError::ConfigurationConflict(format!(
                        "{other:?} at position {idx} is chosen by the encoder, not the caller"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Positions covered by subset C: qualifying digit runs, trimmed to an
    /// even length by leaving their first digit to A/B.
    fn subset_c_mask(input: &[Code128Symbol]) -> Vec<bool> {
        let n = input.len();
        let mut mask = vec![false; n];
        let mut i = 0;
        while i < n {
            if !input[i].is_digit() {
                i += 1;
                continue;
            }
            let start = i;
            while i < n && input[i].is_digit() {
                i += 1;
            }
            let len = i - start;
            // FNC1 is encodable in C and does not break an anchor.
            let anchored = only_fnc1(&input[..start]) || only_fnc1(&input[i..]);
            let threshold = if anchored {
                C_RUN_ANCHORED
            } else {
                C_RUN_INTERIOR
            };
            if len >= threshold {
                let from = if len % 2 == 1 { start + 1 } else { start };
                mask[from..i].iter_mut().for_each(|m| *m = true);
            }
        }
        // FNC1 has a subset C value; keep it in C next to a C run.
        for j in (0..n.saturating_sub(1)).rev() {
            if input[j] == Code128Symbol::Fnc1 && mask[j + 1] {
                mask[j] = true;
            }
        }
        for j in 1..n {
            if input[j] == Code128Symbol::Fnc1 && mask[j - 1] {
                mask[j] = true;
            }
        }
        mask
    }

    /// Assign a subset to every input position.
    pub fn plan(input: &[Code128Symbol]) -> Result<Vec<Subset>> {
        Self::check_input(input)?;
        let n = input.len();
        let in_c = Self::subset_c_mask(input);
        let mut plan = Vec::with_capacity(n);
        let mut current: Option<Subset> = None;

        for i in 0..n {
            if in_c[i] {
                plan.push(Subset::C);
                current = Some(Subset::C);
                continue;
            }
            if let Some(s) = current {
                if input[i].fits(s) {
                    plan.push(s);
                    continue;
                }
            }
            let run = |subset: Subset| {
                (i..n)
                    .take_while(|&j| !in_c[j] && input[j].fits(subset))
                    .count()
            };
            let chosen = if run(Subset::A) >= run(Subset::B) {
                Subset::A
            } else {
                Subset::B
            };
            plan.push(chosen);
            current = Some(chosen);
        }

        trace!(
            plan = %plan.iter().map(ToString::to_string).collect::<String>(),
            "code128 subset plan"
        );
        Ok(plan)
    }

    /// Logical symbol stream from start to stop, check symbol excluded.
    pub fn symbol_stream(input: &[Code128Symbol]) -> Result<Vec<(Code128Symbol, Subset)>> {
        let plan = Self::plan(input)?;
        let mut stream = Vec::with_capacity(input.len() + 4);
        let mut active: Option<Subset> = None;
        let mut i = 0;
        while i < input.len() {
            let subset = plan[i];
            match active {
                None => stream.push((Code128Symbol::start(subset), subset)),
                Some(prev) if prev != subset => {
                    stream.push((Code128Symbol::switch(subset), prev));
                }
                _ => {}
            }
            active = Some(subset);
            match (subset, input[i]) {
                (Subset::C, Code128Symbol::Literal(hi)) => {
                    let lo = match input.get(i + 1) {
                        Some(Code128Symbol::Literal(lo)) => *lo,
                        _ => b'0',
                    };
                    stream.push((Code128Symbol::Digits((hi - b'0') * 10 + (lo - b'0')), subset));
                    i += 2;
                }
                (_, symbol) => {
                    stream.push((symbol, subset));
                    i += 1;
                }
            }
        }
        Ok(stream)
    }

    /// Symbol values including start, check and stop.
    pub fn codewords(input: &[Code128Symbol]) -> Result<Vec<u8>> {
        let stream = Self::symbol_stream(input)?;
        let mut values = Vec::with_capacity(stream.len() + 2);
        for (idx, (symbol, subset)) in stream.into_iter().enumerate() {
            let value = symbol.value(subset).ok_or_else(|| {
                EncodeError::ConfigurationConflict(format!(
                    "{symbol:?} at {idx} has no value in subset {subset}"
                ))
            })?;
            values.push(value);
        }
        values.push(modulo103(&values));
        values.push(CODE128_STOP);
        Ok(values)
    }

    /// Encode an explicit symbol stream, e.g. one carrying FNC1.
    pub fn encode_symbols(
        &self,
        input: &[Code128Symbol],
        options: &EncodeOptions,
    ) -> Result<Barcode> {
        options.validate()?;
        let codewords = Self::codewords(input)?;
        let mut builder = PatternBuilder::new();
        for &cw in &codewords {
            builder.widths(CODE128_WIDTHS[usize::from(cw)]);
        }
        let text = input
            .iter()
            .filter_map(|s| match s {
                Code128Symbol::Literal(b) => Some(char::from(*b)),
                _ => None,
            })
            .collect();
        Ok(Barcode::new(NAME, text, builder.finish(), options))
    }
}

impl BarcodeEncoding for Code128 {
    fn name(&self) -> &'static str {
        NAME
    }

    fn descriptor(&self) -> SymbologyDescriptor {
        SymbologyDescriptor {
            name: NAME,
            alphabet: "ASCII 0-127",
            length: LengthRule::Variable { min: 1 },
            checksum: ChecksumPolicy::Single,
            units: UnitSystem::Binary,
        }
    }

    fn validate(&self, payload: &str) -> bool {
        !payload.is_empty() && payload.is_ascii()
    }

    fn check_digit(&self, payload: &str) -> Result<Checksum> {
        let codewords = Self::codewords(&Self::symbols_from_text(payload)?)?;
        Ok(Checksum::Symbol(codewords[codewords.len() - 2]))
    }

    /// The check symbol is mandatory, so `append_check_digit` is not consulted.
    fn encode(&self, payload: &str, options: &EncodeOptions) -> Result<Barcode> {
        let input = Self::symbols_from_text(payload)?;
        self.encode_symbols(&input, options)
    }
}
