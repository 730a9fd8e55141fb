use barencode::symbology::{
    Codabar, CodabarCheck, Code11, Code93, Code128, Code128Symbol, PlesseyCheck, Subset,
};
use barencode::{
    BarPattern, BarcodeEncoding, Checksum, EncodeError, EncodeOptions, RlePattern, Symbology,
    upca_to_upce, upce_to_upca,
};
use pretty_assertions::assert_eq;

/// Two payloads of equal length per symbology.
fn samples(symbology: Symbology) -> [&'static str; 2] {
    match symbology {
        Symbology::Ean13 => ["400638133393", "750105453010"],
        Symbology::Ean8 => ["9638507", "1234567"],
        Symbology::UpcA => ["03600029145", "12345678901"],
        Symbology::UpcE => ["0425261", "0123453"],
        Symbology::UpcSupplement2 => ["34", "05"],
        Symbology::UpcSupplement5 => ["52495", "12345"],
        Symbology::Code39 => ["CODE39", "HELLO1"],
        Symbology::Code93 => ["CODE93", "TEST12"],
        Symbology::Code128 => ["ABCDEF", "GHIJKL"],
        Symbology::Codabar(_) => ["40156", "12345"],
        Symbology::Code11 => ["123-45", "678-90"],
        Symbology::Interleaved2of5
        | Symbology::Standard2of5
        | Symbology::Matrix2of5
        | Symbology::Coop2of5 => ["1234", "5678"],
        Symbology::Plessey(_) => ["12AB", "9F30"],
        Symbology::PostNet => ["12345", "98765"],
    }
}

#[test]
fn registry_lists_every_variant_once() {
    let keys: Vec<&str> = Symbology::all().iter().map(|s| s.key()).collect();
    assert_eq!(keys.len(), 21);
    let mut unique = keys.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), keys.len());
}

#[test]
fn fixed_width_symbologies() {
    let opts = EncodeOptions::default();
    for (symbology, units) in [
        (Symbology::Ean13, 95),
        (Symbology::UpcA, 95),
        (Symbology::Ean8, 67),
        (Symbology::UpcE, 51),
        (Symbology::UpcSupplement2, 20),
        (Symbology::UpcSupplement5, 47),
        (Symbology::PostNet, 32),
    ] {
        for payload in samples(symbology) {
            let code = symbology.encode(payload, &opts).unwrap();
            assert_eq!(code.pattern.len(), units, "{symbology} {payload}");
        }
    }
}

#[test]
fn width_depends_only_on_payload_length() {
    // Code 11 is excluded: its digits differ in the number of wide elements.
    let opts = EncodeOptions::default();
    for symbology in Symbology::all() {
        if symbology == Symbology::Code11 {
            continue;
        }
        let [a, b] = samples(symbology);
        let a = symbology.encode(a, &opts).unwrap();
        let b = symbology.encode(b, &opts).unwrap();
        assert_eq!(a.pattern.len(), b.pattern.len(), "{symbology}");
    }
}

#[test]
fn rle_round_trips_for_every_symbology() {
    let opts = EncodeOptions::default();
    for symbology in Symbology::all() {
        for payload in samples(symbology) {
            let code = symbology.encode(payload, &opts).unwrap();
            let rle = symbology.encode_rle(payload, &opts).unwrap();
            assert_eq!(rle.total_units(), code.pattern.len());

            let reparsed: RlePattern = rle.to_string().parse().unwrap();
            assert_eq!(reparsed.expand(), code.pattern, "{symbology} {payload}");
        }
    }
}

#[test]
fn rendering_with_custom_symbols_parses_back() {
    let opts = EncodeOptions::default().with_symbols('#', '.');
    let code = Symbology::Code39.encode("RUST", &opts).unwrap();
    let rendered = code.rendered();
    assert!(rendered.chars().all(|c| c == '#' || c == '.'));
    assert_eq!(BarPattern::parse(&rendered, '#', '.').unwrap(), code.pattern);
}

#[test]
fn identical_bar_and_space_symbols_conflict() {
    let opts = EncodeOptions::default().with_symbols('x', 'x');
    for symbology in Symbology::all() {
        let [payload, _] = samples(symbology);
        assert!(
            matches!(
                symbology.encode(payload, &opts),
                Err(EncodeError::ConfigurationConflict(_))
            ),
            "{symbology}"
        );
    }
}

#[test]
fn validation_is_pure() {
    for symbology in Symbology::all() {
        for payload in samples(symbology).into_iter().chain(["", "??"]) {
            let first = symbology.validate(payload);
            assert_eq!(symbology.validate(payload), first, "{symbology} {payload:?}");
        }
        let [payload, _] = samples(symbology);
        assert!(symbology.validate(payload), "{symbology} {payload}");
    }
}

#[test]
fn ean13_reference_check_digit() {
    assert_eq!(
        Symbology::Ean13.check_digit("750105453010").unwrap(),
        Checksum::Chars("7".into())
    );
    let opts = EncodeOptions::default().with_check_digit(false);
    assert!(Symbology::Ean13.encode("7501054530107", &opts).is_ok());
}

#[test]
fn upc_conversions_round_trip() {
    for upca in ["042100005264", "012300000451", "012340000053", "012345000072"] {
        let upce = upca_to_upce(upca).unwrap();
        assert_eq!(upce_to_upca(&upce).unwrap(), upca);
    }
    assert!(matches!(
        upca_to_upce("036000291452"),
        Err(EncodeError::UnsupportedConversion(_))
    ));
}

#[test]
fn upca_is_ean13_with_leading_zero() {
    let opts = EncodeOptions::default();
    let upca = Symbology::UpcA.encode("03600029145", &opts).unwrap();
    let ean = Symbology::Ean13.encode("003600029145", &opts).unwrap();
    assert_eq!(upca.pattern, ean.pattern);
    assert_eq!(upca.text, "036000291452");
}

#[test]
fn code128_even_numeric_is_pure_subset_c() {
    let input: Vec<Code128Symbol> = "0123456789".bytes().map(Code128Symbol::Literal).collect();
    assert!(Code128::plan(&input).unwrap().iter().all(|&s| s == Subset::C));

    let stream = Code128::symbol_stream(&input).unwrap();
    assert_eq!(stream[0].0, Code128Symbol::StartC);
    assert!(!stream.iter().any(|(s, _)| matches!(
        s,
        Code128Symbol::CodeA | Code128Symbol::CodeB | Code128Symbol::CodeC
    )));
    assert_eq!(
        Code128::codewords(&input).unwrap(),
        vec![105, 1, 23, 45, 67, 89, 73, 106]
    );
}

#[test]
fn code128_gs1_style_input() {
    let mut input = vec![Code128Symbol::Fnc1];
    input.extend("0112345678901231".bytes().map(Code128Symbol::Literal));
    let code = Code128
        .encode_symbols(&input, &EncodeOptions::default())
        .unwrap();
    assert_eq!(code.text, "0112345678901231");
    // start, FNC1, 8 pairs, check at 11 units each, stop at 13
    assert_eq!(code.pattern.len(), 11 * 11 + 13);
}

#[test]
fn code93_checks_follow_promotion() {
    let opts = EncodeOptions::default().with_full_ascii(true);
    let code = Code93.encode("ab", &opts).unwrap();
    assert_eq!(code.text, "abZ%");
    assert_eq!(
        Code93.check_digit("@A@B").unwrap(),
        Checksum::Chars("Z%".into())
    );
}

#[test]
fn code11_single_trailing_check() {
    let opts = EncodeOptions::default().with_check_digit(false);
    assert!(Code11.encode("123-4530", &opts).is_ok());
    assert_eq!(
        Code11.check_digit("123-453").unwrap(),
        Checksum::Chars("0".into())
    );
}

#[test]
fn codabar_guard_to_guard() {
    let code = Codabar::new(CodabarCheck::None)
        .encode("A40156B", &EncodeOptions::default())
        .unwrap();
    let rle = code.rle().unwrap();
    // seven characters of seven elements plus six gaps
    assert_eq!(rle.runs().len(), 7 * 7 + 6);
    assert!(rle.runs().iter().all(|&r| r == 1 || r == 2));
}

#[test]
fn plessey_variants_are_distinct_keys() {
    let keys: Vec<String> = [
        PlesseyCheck::Modulo10,
        PlesseyCheck::Modulo10Dual,
        PlesseyCheck::Modulo11,
        PlesseyCheck::Modulo11Modulo10,
    ]
    .into_iter()
    .map(|c| Symbology::Plessey(c).to_string())
    .collect();
    assert_eq!(
        keys,
        ["plessey", "plessey-mod10-10", "plessey-mod11", "plessey-mod11-10"]
    );
}

#[test]
fn failures_carry_position_and_symbology() {
    let err = Symbology::Ean8
        .encode("12x4567", &EncodeOptions::default())
        .unwrap_err();
    assert_eq!(err.to_string(), "EAN-8: unsupported character 'x' at position 2");
}
