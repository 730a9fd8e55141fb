//! Checksum algorithms shared by the symbology encoders.
//!
//! Every function takes symbol values (not characters) so that the same
//! arithmetic serves several symbologies. Callers are responsible for mapping
//! characters to values and results back to characters.

use crate::core::error::{EncodeError, Result};

/// Parse an all-digit payload into values 0..=9.
pub fn digit_values(symbology: &'static str, payload: &str) -> Result<Vec<u8>> {
    payload
        .chars()
        .enumerate()
        .map(|(idx, ch)| {
            ch.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| EncodeError::invalid_char(symbology, ch, idx))
        })
        .collect()
}

/// Weighted modulo 10 (EAN/UPC, 2-of-5): weights 3,1,3,... from the right.
pub fn modulo10_weighted(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * if i % 2 == 0 { 3 } else { 1 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Unweighted modulo 10 (PostNet).
pub fn modulo10_unweighted(digits: &[u8]) -> u8 {
    let sum: u32 = digits.iter().map(|&d| u32::from(d)).sum();
    ((10 - sum % 10) % 10) as u8
}

/// Modulo 4 of the numeric value (UPC two-digit supplement).
pub fn modulo4(digits: &[u8]) -> u8 {
    digits
        .iter()
        .fold(0u32, |acc, &d| (acc * 10 + u32::from(d)) % 4) as u8
}

/// Modulo 10 with weights 3,9,3,... from the right (UPC five-digit supplement).
pub fn modulo10_weights_3_9(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * if i % 2 == 0 { 3 } else { 9 })
        .sum();
    (sum % 10) as u8
}

/// Modulo 43 over Code 39 alphabet positions.
pub fn modulo43(values: &[usize]) -> usize {
    values.iter().sum::<usize>() % 43
}

/// Cyclic right-to-left weighting `1..=max_weight`, summed.
fn cyclic_weighted_sum(values: &[usize], max_weight: usize) -> usize {
    values
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &v)| v * (i % max_weight + 1))
        .sum()
}

/// Code 93 check pair `(C, K)`, both symbol values below 47.
pub fn modulo47_dual(values: &[usize]) -> (usize, usize) {
    let c = cyclic_weighted_sum(values, 20) % 47;
    let mut with_c = values.to_vec();
    with_c.push(c);
    let k = cyclic_weighted_sum(&with_c, 15) % 47;
    (c, k)
}

/// Plessey modulo 11: weights 2..=7 cycling from the right over hex values.
///
/// Result is 0..=10; 10 is written as `A` by the Plessey encoder.
pub fn modulo11_plessey(values: &[u8]) -> u8 {
    let sum: u32 = values
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &v)| u32::from(v) * (i as u32 % 6 + 2))
        .sum();
    ((11 - sum % 11) % 11) as u8
}

/// Plessey/MSI modulo 10.
///
/// The values at odd positions counted from the right form one number that
/// is doubled; the digit sum of that product plus the remaining values gives
/// the check. Doubling digit by digit never carries twice, so summing the
/// digits of each doubled value yields the same total.
pub fn modulo10_plessey(values: &[u8]) -> u8 {
    let sum: u32 = values
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &v)| {
            let v = u32::from(v);
            if i % 2 == 0 {
                let doubled = v * 2;
                doubled / 10 + doubled % 10
            } else {
                v
            }
        })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Code 11 check digits. The second one is present only for payloads of ten
/// or more characters. Values are 0..=10 where 10 stands for `-`.
pub fn modulo11_dual(values: &[usize]) -> (usize, Option<usize>) {
    let c = cyclic_weighted_sum(values, 10) % 11;
    if values.len() < 10 {
        return (c, None);
    }
    let mut with_c = values.to_vec();
    with_c.push(c);
    (c, Some(cyclic_weighted_sum(&with_c, 9) % 11))
}

/// Code 128 modulo 103 over a symbol stream whose first entry is the start
/// symbol. The start value counts once; data symbols are weighted 1, 2, ...
pub fn modulo103(symbols: &[u8]) -> u8 {
    let Some((&start, data)) = symbols.split_first() else {
        return 0;
    };
    let sum = data
        .iter()
        .enumerate()
        .fold(u32::from(start), |acc, (i, &v)| {
            (acc + u32::from(v) * (i as u32 + 1)) % 103
        });
    (sum % 103) as u8
}
