//! Scenario tests against the public library API: the documented worked
//! examples for each calculator, plus layout persistence on disk.

use bitbench::core::bits::{reverse_bits, xor_values};
use bitbench::core::boolean::{Assignment, BoolExpr};
use bitbench::core::kmap::KarnaughMap;
use bitbench::core::modules::{ModuleKey, ModuleLayout};
use bitbench::core::pow2::Pow2;
use bitbench::core::radix::{BaseReadout, parse_integer, signed_readout};
use bitbench::core::truth_table::build_truth_table;
use bitbench::core::units::{
    LastEdited, SIZE_UNITS_BINARY, convert_size, convert_unit, format_number, frequency_hz,
    period_seconds, throughput, time_frequency,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn assign(pairs: &[(char, bool)]) -> Assignment {
    pairs.iter().copied().collect()
}

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("bitbench-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

// ============================================================================
// Integers
// ============================================================================

#[test]
fn test_base_converter_worked_example() {
    let value = parse_integer("255", 10).unwrap();
    let readout = BaseReadout::from_value(&value, 16);
    assert_eq!(readout.binary, "11111111");
    assert_eq!(readout.octal, "377");
    assert_eq!(readout.hex, "ff");
    assert_eq!(readout.padded_binary, "0000000011111111");
}

#[test]
fn test_invalid_digits_are_reported_not_panicked() {
    assert!(parse_integer("12z", 10).is_err());
    assert!(parse_integer("ff", 40).is_err());
    assert!(parse_integer("", 16).is_err());
}

#[test]
fn test_signed_byte() {
    let signed = signed_readout("1000_0000").unwrap();
    assert_eq!(signed.width, 8);
    assert_eq!(signed.decimal, "-128");
    assert_eq!(signed.hex, "-0x80");
}

#[test]
fn test_reverse_then_reverse_restores_bits() {
    let once = reverse_bits("00101100", 2, None).unwrap();
    assert_eq!(once.binary, "00110100");
    let twice = reverse_bits(&once.binary, 2, Some(once.width)).unwrap();
    assert_eq!(twice.binary, "00101100");
}

#[test]
fn test_xor_example() {
    let x = xor_values(("ff", 16), ("0f", 16), 8).unwrap();
    assert_eq!(x.readout.hex, "f0");
    assert_eq!(x.readout.padded_binary, "11110000");
}

#[test]
fn test_pow2_32() {
    let p = Pow2::new(32);
    assert_eq!(p.decimal(), "4,294,967,296");
    assert_eq!(p.hex(), "100000000");
    assert_eq!(p.max_unsigned_decimal(), "4,294,967,295");
}

// ============================================================================
// Units
// ============================================================================

#[test]
fn test_gib_reads_as_1024_mib() {
    let out = convert_unit(1.0, "GiB", SIZE_UNITS_BINARY).unwrap();
    let mib = out.iter().find(|c| c.unit == "MiB").unwrap();
    assert_eq!(mib.value, 1024.0);
}

#[test]
fn test_negative_size_has_no_result() {
    assert!(convert_size(-5.0, "MB").is_none());
}

#[test]
fn test_period_and_frequency_agree() {
    let seconds = period_seconds(10.0, "ns");
    let hz = frequency_hz(100.0, "MHz");
    let from_period = time_frequency(seconds, hz, LastEdited::Period).unwrap();
    let from_freq = time_frequency(seconds, hz, LastEdited::Frequency).unwrap();
    for (a, b) in from_period.periods.iter().zip(&from_freq.periods) {
        assert!((a.value - b.value).abs() <= a.value.abs() * 1e-12);
    }
    assert!(time_frequency(period_seconds(0.0, "ns"), None, LastEdited::Period).is_none());
}

#[test]
fn test_throughput_example() {
    let t = throughput(32.0, 100.0, "MHz").unwrap();
    assert_eq!(format_number(t.gbps), "3.2");
    assert_eq!(format_number(t.megabytes_per_sec), "400");
    assert_eq!(format_number(t.bits_per_sec), "3.200000e+9");
}

// ============================================================================
// Boolean logic
// ============================================================================

#[test]
fn test_and_evaluation() {
    let expr = BoolExpr::new("A & B");
    assert!(expr.evaluate(&assign(&[('A', true), ('B', true)])));
    assert!(!expr.evaluate(&assign(&[('A', true), ('B', false)])));
}

#[test]
fn test_malformed_expression_is_false() {
    assert!(!BoolExpr::new("(").evaluate(&Assignment::new()));
}

#[test]
fn test_xor_truth_table() {
    let table = build_truth_table("A ^ B").unwrap();
    let rows: Vec<(bool, bool, bool)> = table
        .rows
        .iter()
        .map(|r| (r.inputs[&'a'], r.inputs[&'b'], r.output))
        .collect();
    assert_eq!(
        rows,
        vec![
            (false, false, false),
            (false, true, true),
            (true, false, true),
            (true, true, false),
        ]
    );
}

#[test]
fn test_kmap_covers_exactly_the_minterms() {
    let map = KarnaughMap::new(3, &[0, 1, 3, 7]).unwrap();
    let implicants = map.implicants();
    for m in 0..8 {
        let covered = implicants.iter().any(|imp| imp.covers(m));
        assert_eq!(covered, [0, 1, 3, 7].contains(&m), "minterm {m}");
    }
    assert_eq!(map.minimize(), "¬A¬B + BC");
}

#[test]
fn test_truth_table_feeds_kmap() {
    let table = build_truth_table("A ∧ B ∨ ¬C").unwrap();
    let map = KarnaughMap::new(table.variables.len(), &table.minterms()).unwrap();
    for imp in map.implicants() {
        for m in 0..8 {
            if imp.covers(m) {
                assert!(table.rows[m].output, "term {} covers false row {m}", imp.term());
            }
        }
    }
}

// ============================================================================
// Layout persistence
// ============================================================================

#[test]
fn test_layout_survives_save_and_load() {
    let dir = temp_dir("layout");
    let path = dir.join("modules.json");

    let mut layout = ModuleLayout::default();
    layout.set_visible(ModuleKey::Ascii, false);
    layout.move_entry(10, 0);
    layout.save_to(&path).unwrap();

    let loaded = ModuleLayout::load_from(&path);
    assert_eq!(loaded, layout);
    assert_eq!(loaded.entries()[0].key, ModuleKey::Xor);
    assert!(!loaded.is_visible(ModuleKey::Ascii));
    assert!(!path.with_extension("tmp").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_layout_file_gives_defaults() {
    let dir = temp_dir("missing");
    assert_eq!(
        ModuleLayout::load_from(&dir.join("modules.json")),
        ModuleLayout::default()
    );
}
