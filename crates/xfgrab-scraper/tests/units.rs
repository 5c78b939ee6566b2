use xfgrab_scraper::{format_bytes, parse_shorthand, ByteSize, UnitsError};

#[test]
fn parses_binary_and_decimal_shorthand() {
    assert_eq!(parse_shorthand("103KiB").unwrap(), 105_472);
    assert_eq!(parse_shorthand("103GIB").unwrap(), 110_595_407_872);
    assert_eq!(parse_shorthand("0.5TB").unwrap(), 500_000_000_000);
    assert_eq!(parse_shorthand("1kb").unwrap(), 1_000);
    assert_eq!(parse_shorthand("2MiB").unwrap(), 2_097_152);
}

#[test]
fn rejects_input_without_a_unit() {
    assert_eq!(
        parse_shorthand("ad2wd2"),
        Err(UnitsError::InvalidFormat("ad2wd2".into()))
    );
    assert!(matches!(parse_shorthand(""), Err(UnitsError::InvalidFormat(_))));
}

#[test]
fn rejects_an_unparsable_magnitude() {
    assert!(matches!(
        parse_shorthand("xKB"),
        Err(UnitsError::InvalidMagnitude(_))
    ));
}

#[test]
fn formats_with_the_largest_fitting_unit() {
    assert_eq!(format_bytes(105_472), "105.47KB");
    assert_eq!(format_bytes(110_595_407_872), "110.6GB");
    assert_eq!(format_bytes(500_000_000_000), "500.0GB");
    assert_eq!(format_bytes(2_500), "2.5KB");
}

#[test]
fn sub_kilobyte_counts_stay_plain_bytes() {
    assert_eq!(format_bytes(0), "0B");
    assert_eq!(format_bytes(999), "999B");
}

#[test]
fn round_trips_within_rounding_tolerance() {
    for (text, exact) in [
        ("2.5MB", 2_500_000_u64),
        ("1.5GiB", 1_610_612_736),
        ("3TB", 3_000_000_000_000),
    ] {
        let parsed = parse_shorthand(text).unwrap();
        assert_eq!(parsed, exact);
        let reparsed = parse_shorthand(&format_bytes(parsed)).unwrap();
        let drift = (reparsed as f64 - parsed as f64).abs() / parsed as f64;
        assert!(drift <= 0.01, "{text}: {parsed} vs {reparsed}");
    }
}

#[test]
fn byte_size_parses_and_displays_shorthand() {
    let size: ByteSize = "500MB".parse().unwrap();
    assert_eq!(size, ByteSize(500_000_000));
    assert_eq!(size.to_string(), "500.0MB");
}
