use lfsr_taps::lfsr;
use lfsr_taps::taps::{self, MAX_WIDTH, MIN_WIDTH, NUM_RECORDS};

static TAPS_TXT: &str = include_str!("../taps.txt");

#[test]
fn shipped_table_generates_full_listing() {
    let mut out = Vec::new();
    taps::generate(TAPS_TXT.as_bytes(), &mut out).expect("shipped taps.txt should generate");
    let listing = String::from_utf8(out).unwrap();

    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), NUM_RECORDS);
    assert_eq!(lines[0], "    0x0000000000000006ul,");
    assert_eq!(lines[NUM_RECORDS - 1], "    0xd800000000000000ul,");

    for line in &lines {
        let digits = line
            .strip_prefix("    0x")
            .and_then(|rest| rest.strip_suffix("ul,"))
            .expect("line should carry the array-literal framing");
        assert_eq!(digits.len(), 16);
        assert!(digits
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}

#[test]
fn listing_matches_lookup_table() {
    // The emitted array and the in-crate lookup come from the same records.
    let mut out = Vec::new();
    taps::generate(TAPS_TXT.as_bytes(), &mut out).unwrap();
    let listing = String::from_utf8(out).unwrap();

    for (line, width) in listing.lines().zip(MIN_WIDTH..=MAX_WIDTH) {
        assert_eq!(line, taps::format_magic(lfsr::magic_for_width(width)));
    }
}

#[test]
fn generation_is_idempotent() {
    let mut first = Vec::new();
    let mut second = Vec::new();
    taps::generate(TAPS_TXT.as_bytes(), &mut first).unwrap();
    taps::generate(TAPS_TXT.as_bytes(), &mut second).unwrap();
    assert_eq!(first, second);
}

#[test]
fn shipped_table_parses_in_sequence() {
    let records = taps::parse_table(TAPS_TXT.as_bytes()).unwrap();
    assert_eq!(records.len(), NUM_RECORDS);
    for (record, width) in records.iter().zip(MIN_WIDTH..=MAX_WIDTH) {
        assert_eq!(record.width(), width);
        // The highest tap is always the register's top bit, so every width's magic
        // value has its width'th bit set.
        assert_ne!(record.magic() & (1 << (width - 1)), 0);
    }
}
