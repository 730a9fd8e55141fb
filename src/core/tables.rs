//! Static symbol tables for every supported symbology.
//!
//! Entries are either literal bit strings (`1` = bar unit, `0` = space unit),
//! `w`/`n` element sequences starting with a bar, or Code 128 element widths.
//! The tables are read-only and shared by all callers; lookups do not
//! validate, so encoders check alphabet membership first.

use std::collections::HashMap;
use std::sync::LazyLock;

// ---------------------------------------------------------------------------
// EAN / UPC
// ---------------------------------------------------------------------------

/// Left-hand odd parity ("L") digit codes.
pub const EAN_ODD: [&str; 10] = [
    "0001101", "0011001", "0010011", "0111101", "0100011", "0110001", "0101111", "0111011",
    "0110111", "0001011",
];

/// Left-hand even parity ("G") digit codes.
pub const EAN_EVEN: [&str; 10] = [
    "0100111", "0110011", "0011011", "0100001", "0011101", "0111001", "0000101", "0010001",
    "0001001", "0010111",
];

/// Right-hand ("R") digit codes.
pub const EAN_RIGHT: [&str; 10] = [
    "1110010", "1100110", "1101100", "1000010", "1011100", "1001110", "1010000", "1000100",
    "1001000", "1110100",
];

pub const EAN_GUARD: &str = "101";
pub const EAN_CENTER: &str = "01010";
pub const UPCE_END: &str = "010101";
pub const SUPPLEMENT_START: &str = "1011";
pub const SUPPLEMENT_SEPARATOR: &str = "01";

/// EAN-13 parity of digits 2..7, keyed by the leading digit (`O` odd, `E` even).
pub const EAN13_PARITY: [&str; 10] = [
    "OOOOOO", "OOEOEE", "OOEEOE", "OOEEEO", "OEOOEE", "OEEOOE", "OEEEOO", "OEOEOE", "OEOEEO",
    "OEEOEO",
];

/// UPC-E parity keyed by check digit, for number system 0. Number system 1
/// uses the complement.
pub const UPCE_PARITY: [&str; 10] = [
    "EEEOOO", "EEOEOO", "EEOOEO", "EEOOOE", "EOEEOO", "EOOEEO", "EOOOEE", "EOEOEO", "EOEOOE",
    "EOOEOE",
];

/// Two-digit supplement parity keyed by value mod 4.
pub const SUPPLEMENT2_PARITY: [&str; 4] = ["OO", "OE", "EO", "EE"];

/// Five-digit supplement parity keyed by its 3/9 weighted checksum.
pub const SUPPLEMENT5_PARITY: [&str; 10] = [
    "EEOOO", "EOEOO", "EOOEO", "EOOOE", "OEEOO", "OOEEO", "OOOEE", "OEOEO", "OEOOE", "OOEOE",
];

/// Select the left-hand code for `digit` under parity flag `O`/`E`.
pub fn ean_left(digit: usize, parity: u8) -> &'static str {
    if parity == b'E' {
        EAN_EVEN[digit]
    } else {
        EAN_ODD[digit]
    }
}

// ---------------------------------------------------------------------------
// Code 39
// ---------------------------------------------------------------------------

/// Code 39 alphabet; a character's position is its mod 43 value.
pub const CODE39_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%";

const CODE39_WN: [&str; 43] = [
    "nnnwwnwnn", "wnnwnnnnw", "nnwwnnnnw", "wnwwnnnnn", "nnnwwnnnw", "wnnwwnnnn", "nnwwwnnnn",
    "nnnwnnwnw", "wnnwnnwnn", "nnwwnnwnn", "wnnnnwnnw", "nnwnnwnnw", "wnwnnwnnn", "nnnnwwnnw",
    "wnnnwwnnn", "nnwnwwnnn", "nnnnnwwnw", "wnnnnwwnn", "nnwnnwwnn", "nnnnwwwnn", "wnnnnnnww",
    "nnwnnnnww", "wnwnnnnwn", "nnnnwnnww", "wnnnwnnwn", "nnwnwnnwn", "nnnnnnwww", "wnnnnnwwn",
    "nnwnnnwwn", "nnnnwnwwn", "wwnnnnnnw", "nwwnnnnnw", "wwwnnnnnn", "nwnnwnnnw", "wwnnwnnnn",
    "nwwnwnnnn", "nwnnnnwnw", "wwnnnnwnn", "nwwnnnwnn", "nwnwnwnnn", "nwnwnnnwn", "nwnnnwnwn",
    "nnnwnwnwn",
];

pub const CODE39_START_STOP: &str = "nwnnwnwnn";

/// Code 39 character → (mod 43 value, w/n pattern).
pub static CODE39: LazyLock<HashMap<char, (usize, &'static str)>> = LazyLock::new(|| {
    CODE39_ALPHABET
        .chars()
        .zip(CODE39_WN)
        .enumerate()
        .map(|(value, (ch, wn))| (ch, (value, wn)))
        .collect()
});

// ---------------------------------------------------------------------------
// Code 93
// ---------------------------------------------------------------------------

/// First 43 Code 93 symbols share the Code 39 character set and ordering.
pub const CODE93_ALPHABET: &str = CODE39_ALPHABET;

pub const CODE93_SHIFT_DOLLAR: usize = 43;
pub const CODE93_SHIFT_PERCENT: usize = 44;
pub const CODE93_SHIFT_SLASH: usize = 45;
pub const CODE93_SHIFT_PLUS: usize = 46;

/// Code 93 patterns indexed by symbol value (0..=46).
pub const CODE93_BITS: [&str; 47] = [
    "100010100", "101001000", "101000100", "101000010", "100101000", "100100100", "100100010",
    "101010000", "100010010", "100001010", "110101000", "110100100", "110100010", "110010100",
    "110010010", "110001010", "101101000", "101100100", "101100010", "100110100", "100011010",
    "101011000", "101001100", "101000110", "100101100", "100010110", "110110100", "110110010",
    "110101100", "110100110", "110010110", "110011010", "101101100", "101100110", "100110110",
    "100111010", "100101110", "111010100", "111010010", "111001010", "101101110", "101110110",
    "110101110", "100100110", "111011010", "111010110", "100110010",
];

pub const CODE93_START_STOP: &str = "101011110";
pub const CODE93_TERMINATOR: &str = "1";

// ---------------------------------------------------------------------------
// Code 128
// ---------------------------------------------------------------------------

pub const CODE128_START_A: u8 = 103;
pub const CODE128_START_B: u8 = 104;
pub const CODE128_START_C: u8 = 105;
pub const CODE128_STOP: u8 = 106;

/// Element widths (bar, space, ...) per symbol value; the stop symbol has 7.
pub const CODE128_WIDTHS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312", "132212",
    "221213", "221312", "231212", "112232", "122132", "122231", "113222", "123122", "123221",
    "223211", "221132", "221231", "213212", "223112", "312131", "311222", "321122", "321221",
    "312212", "322112", "322211", "212123", "212321", "232121", "111323", "131123", "131321",
    "112313", "132113", "132311", "211313", "231113", "231311", "112133", "112331", "132131",
    "113123", "113321", "133121", "313121", "211331", "231131", "213113", "213311", "213131",
    "311123", "311321", "331121", "312113", "312311", "332111", "314111", "221411", "431111",
    "111224", "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111", "111242",
    "121142", "121241", "114212", "124112", "124211", "411212", "421112", "421211", "212141",
    "214121", "412121", "111143", "111341", "131141", "114113", "114311", "411113", "411311",
    "113141", "114131", "311141", "411131", "211412", "211214", "211232", "2331112",
];

// ---------------------------------------------------------------------------
// Codabar
// ---------------------------------------------------------------------------

/// Codabar w/n patterns; `A`..`D` are the start/stop characters.
pub static CODABAR: LazyLock<HashMap<char, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ('0', "nnnnnww"),
        ('1', "nnnnwwn"),
        ('2', "nnnwnnw"),
        ('3', "wwnnnnn"),
        ('4', "nnwnnwn"),
        ('5', "wnnnnwn"),
        ('6', "nwnnnnw"),
        ('7', "nwnnwnn"),
        ('8', "nwwnnnn"),
        ('9', "wnnwnnn"),
        ('-', "nnnwwnn"),
        ('$', "nnwwnnn"),
        (':', "wnnnwnw"),
        ('/', "wnwnnnw"),
        ('.', "wnwnwnn"),
        ('+', "nnwnwnw"),
        ('A', "nnwwnwn"),
        ('B', "nwnwnnw"),
        ('C', "nnnwnww"),
        ('D', "nnnwwwn"),
    ])
});

// ---------------------------------------------------------------------------
// Code 11
// ---------------------------------------------------------------------------

/// Code 11 w/n patterns indexed by value; `-` is value 10.
pub const CODE11_WN: [&str; 11] = [
    "nnnnw", "wnnnw", "nwnnw", "wwnnn", "nnwnw", "wnwnn", "nwwnn", "nnnww", "wnnwn", "wnnnn",
    "nnwnn",
];

pub const CODE11_START_STOP: &str = "nnwwn";

// ---------------------------------------------------------------------------
// 2-of-5 family
// ---------------------------------------------------------------------------

/// Five-element 2-of-5 digit patterns (weights 1-2-4-7-parity).
pub const TWO_OF_FIVE_WN: [&str; 10] = [
    "nnwwn", "wnnnw", "nwnnw", "wwnnn", "nnwnw", "wnwnn", "nwwnn", "nnnww", "wnnwn", "nwnwn",
];

/// COOP 2-of-5 digit patterns: the 2-of-5 elements in reversed weight order.
pub const COOP_TWO_OF_FIVE_WN: [&str; 10] = [
    "nwwnn", "wnnnw", "wnnwn", "nnnww", "wnwnn", "nnwnw", "nnwwn", "wwnnn", "nwnnw", "nwnwn",
];

pub const ITF_START: &str = "1010";
/// Interleaved stop: wide bar, narrow space, narrow bar (payload widths).
pub const ITF_STOP_WN: &str = "wnn";

/// Discrete 2-of-5 guards as bar/space elements, drawn at guard widths.
pub const STANDARD_25_START_WN: &str = "wnwnnn";
pub const STANDARD_25_STOP_WN: &str = "wnnnw";
pub const MATRIX_25_START_WN: &str = "wnnnnn";
pub const MATRIX_25_STOP_WN: &str = "wnnnn";
pub const COOP_25_START_WN: &str = "wnwn";
pub const COOP_25_STOP_WN: &str = "nnw";

// ---------------------------------------------------------------------------
// Plessey
// ---------------------------------------------------------------------------

pub const PLESSEY_ALPHABET: &str = "0123456789ABCDEF";
pub const PLESSEY_ZERO_BIT: &str = "100";
pub const PLESSEY_ONE_BIT: &str = "110";
pub const PLESSEY_START: &str = "110110100110";
pub const PLESSEY_STOP: &str = "11001001011011";

// ---------------------------------------------------------------------------
// PostNet
// ---------------------------------------------------------------------------

/// PostNet digits as tall (`1`) / short (`0`) bars.
pub const POSTNET_BITS: [&str; 10] = [
    "11000", "00011", "00101", "00110", "01001", "01010", "01100", "10001", "10010", "10100",
];

pub const POSTNET_GUARD: &str = "1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ean_digits_are_seven_units_with_two_bars() {
        for table in [EAN_ODD, EAN_EVEN, EAN_RIGHT] {
            for code in table {
                assert_eq!(code.len(), 7);
                let runs = code
                    .as_bytes()
                    .windows(2)
                    .filter(|w| w[0] != w[1])
                    .count();
                assert_eq!(runs, 3, "{code} should have four elements");
            }
        }
    }

    #[test]
    fn right_codes_complement_odd_codes() {
        for (odd, right) in EAN_ODD.iter().zip(EAN_RIGHT) {
            let flipped: String = odd
                .chars()
                .map(|c| if c == '1' { '0' } else { '1' })
                .collect();
            assert_eq!(flipped, right);
        }
    }

    #[test]
    fn code39_has_three_wide_elements() {
        for (_, wn) in CODE39.values() {
            assert_eq!(wn.len(), 9);
            assert_eq!(wn.matches('w').count(), 3);
        }
        assert_eq!(CODE39.len(), 43);
    }

    #[test]
    fn code93_symbols_are_nine_units() {
        for bits in CODE93_BITS {
            assert_eq!(bits.len(), 9);
            assert!(bits.starts_with('1') && bits.ends_with('0'));
        }
    }

    #[test]
    fn code128_symbols_are_eleven_units() {
        for widths in &CODE128_WIDTHS[..106] {
            let total: u32 = widths.bytes().map(|b| u32::from(b - b'0')).sum();
            assert_eq!(total, 11, "{widths}");
        }
        let stop: u32 = CODE128_WIDTHS[106].bytes().map(|b| u32::from(b - b'0')).sum();
        assert_eq!(stop, 13);
    }

    #[test]
    fn two_of_five_tables_have_two_wide_elements() {
        for wn in TWO_OF_FIVE_WN.iter().chain(COOP_TWO_OF_FIVE_WN.iter()) {
            assert_eq!(wn.matches('w').count(), 2);
        }
    }
}
