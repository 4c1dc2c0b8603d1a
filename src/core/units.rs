//! # Unit Conversion
//!
//! Static factor tables and linear scaling between units of the same table.
//!
//! Each table expresses its units as a multiple of one base unit (seconds,
//! hertz, bits). Converting is two steps:
//!
//! ```text
//! base  = value * factor(selected)
//! out_k = base / factor(k)          for every unit k in the table
//! ```
//!
//! Period and frequency are linked by `f = 1 / T`.

/// One row of a unit table: the display key and its size in base units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub key: &'static str,
    pub factor: f64,
}

const fn unit(key: &'static str, factor: f64) -> Unit {
    Unit { key, factor }
}

/// Base unit: second.
pub const TIME_UNITS: &[Unit] = &[
    unit("s", 1.0),
    unit("ms", 1e-3),
    unit("us", 1e-6),
    unit("ns", 1e-9),
    unit("ps", 1e-12),
];

/// Base unit: hertz.
pub const FREQ_UNITS: &[Unit] = &[
    unit("Hz", 1.0),
    unit("kHz", 1e3),
    unit("MHz", 1e6),
    unit("GHz", 1e9),
];

/// IEC prefixes. Base unit: bit.
pub const SIZE_UNITS_BINARY: &[Unit] = &[
    unit("b", 1.0),
    unit("B", 8.0),
    unit("KiB", 8.0 * 1024.0),
    unit("MiB", 8.0 * 1024.0 * 1024.0),
    unit("GiB", 8.0 * 1024.0 * 1024.0 * 1024.0),
    unit("TiB", 8.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0),
];

/// SI prefixes. Base unit: bit.
pub const SIZE_UNITS_DECIMAL: &[Unit] = &[
    unit("kb", 1e3),
    unit("kB", 8e3),
    unit("MB", 8e6),
    unit("GB", 8e9),
    unit("TB", 8e12),
];

/// A value expressed in one unit of a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub unit: &'static str,
    pub value: f64,
}

pub fn find_unit(table: &[Unit], key: &str) -> Option<Unit> {
    table.iter().copied().find(|u| u.key == key)
}

/// Parse user-typed numeric text. Blank input has no value.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Express `value` (in `unit`) in base units of `table`.
pub fn to_base(value: f64, unit: &str, table: &[Unit]) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    find_unit(table, unit).map(|u| value * u.factor)
}

/// Spread a base-unit quantity across every unit of `table`.
pub fn spread(base: f64, table: &[Unit]) -> Vec<Conversion> {
    table
        .iter()
        .map(|u| Conversion {
            unit: u.key,
            value: base / u.factor,
        })
        .collect()
}

/// Convert `value` in `unit` to every unit of `table`.
pub fn convert_unit(value: f64, unit: &str, table: &[Unit]) -> Option<Vec<Conversion>> {
    to_base(value, unit, table).map(|base| spread(base, table))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizeReadout {
    pub binary: Vec<Conversion>,
    pub decimal: Vec<Conversion>,
}

/// Size conversion across both prefix families. Negative sizes have no
/// result.
pub fn convert_size(value: f64, unit: &str) -> Option<SizeReadout> {
    if value < 0.0 {
        return None;
    }
    let bits = to_base(value, unit, SIZE_UNITS_BINARY)
        .or_else(|| to_base(value, unit, SIZE_UNITS_DECIMAL))?;
    Some(SizeReadout {
        binary: spread(bits, SIZE_UNITS_BINARY),
        decimal: spread(bits, SIZE_UNITS_DECIMAL),
    })
}

/// Which of the period/frequency inputs the user touched last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastEdited {
    #[default]
    Period,
    Frequency,
}

/// Period in seconds, if the value is a usable (finite, positive) period.
pub fn period_seconds(value: f64, unit: &str) -> Option<f64> {
    (value.is_finite() && value > 0.0)
        .then(|| to_base(value, unit, TIME_UNITS))
        .flatten()
}

/// Frequency in hertz, if the value is a usable (finite, positive) frequency.
pub fn frequency_hz(value: f64, unit: &str) -> Option<f64> {
    (value.is_finite() && value > 0.0)
        .then(|| to_base(value, unit, FREQ_UNITS))
        .flatten()
}

pub fn period_to_frequency(seconds: f64) -> f64 {
    1.0 / seconds
}

pub fn frequency_to_period(hz: f64) -> f64 {
    1.0 / hz
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeFreqReadout {
    pub frequencies: Vec<Conversion>,
    pub periods: Vec<Conversion>,
}

/// Derive both readouts from whichever valid input was edited last, falling
/// back to the other input when the last-edited one is unusable.
pub fn time_frequency(
    seconds: Option<f64>,
    hz: Option<f64>,
    last: LastEdited,
) -> Option<TimeFreqReadout> {
    let seconds = match (last, seconds, hz) {
        (LastEdited::Period, Some(s), _) => s,
        (LastEdited::Frequency, _, Some(f)) => frequency_to_period(f),
        (_, Some(s), None) => s,
        (_, None, Some(f)) => frequency_to_period(f),
        (_, None, None) => return None,
    };
    Some(TimeFreqReadout {
        frequencies: spread(period_to_frequency(seconds), FREQ_UNITS),
        periods: spread(seconds, TIME_UNITS),
    })
}

/// Data rate of a bus moving `width_bits` per clock cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throughput {
    pub bits_per_sec: f64,
    pub gbps: f64,
    pub mbps: f64,
    pub megabytes_per_sec: f64,
    pub mebibytes_per_sec: f64,
}

pub fn throughput(width_bits: f64, clock: f64, clock_unit: &str) -> Option<Throughput> {
    let hz = to_base(clock, clock_unit, FREQ_UNITS)?;
    if !width_bits.is_finite() {
        return None;
    }
    let bits_per_sec = width_bits * hz;
    let bytes_per_sec = bits_per_sec / 8.0;
    Some(Throughput {
        bits_per_sec,
        gbps: bits_per_sec / 1e9,
        mbps: bits_per_sec / 1e6,
        megabytes_per_sec: bytes_per_sec / 1e6,
        mebibytes_per_sec: bytes_per_sec / (1024.0 * 1024.0),
    })
}

/// Human-oriented rendering of a measurement.
///
/// Very small and very large magnitudes use scientific notation with six
/// fractional digits (`1.500000e+9`); everything else gets up to nine
/// fractional digits and `,` thousands grouping. Non-finite values render
/// empty.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return String::new();
    }
    let abs = n.abs();
    if abs != 0.0 && !(1e-3..1e6).contains(&abs) {
        return format_scientific(n);
    }

    let fixed = format!("{abs:.9}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if n < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn format_scientific(n: f64) -> String {
    let formatted = format!("{n:.6e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_in(conversions: &[Conversion], key: &str) -> f64 {
        conversions
            .iter()
            .find(|c| c.unit == key)
            .map(|c| c.value)
            .unwrap()
    }

    #[test]
    fn test_gib_to_mib() {
        let out = convert_unit(1.0, "GiB", SIZE_UNITS_BINARY).unwrap();
        assert_eq!(value_in(&out, "MiB"), 1024.0);
        assert_eq!(value_in(&out, "B"), 1024.0 * 1024.0 * 1024.0);
    }

    #[test]
    fn test_unknown_unit_and_non_finite() {
        assert!(convert_unit(1.0, "furlong", TIME_UNITS).is_none());
        assert!(convert_unit(f64::NAN, "s", TIME_UNITS).is_none());
        assert!(convert_unit(f64::INFINITY, "s", TIME_UNITS).is_none());
    }

    #[test]
    fn test_size_crosses_prefix_families() {
        let out = convert_size(1.0, "kB").unwrap();
        assert_eq!(value_in(&out.binary, "B"), 1000.0);
        assert_eq!(value_in(&out.decimal, "kb"), 8.0);
        assert!(convert_size(-1.0, "B").is_none());
        assert!(convert_size(0.0, "B").is_some());
    }

    #[test]
    fn test_period_drives_frequency() {
        let seconds = period_seconds(10.0, "ns");
        let out = time_frequency(seconds, None, LastEdited::Period).unwrap();
        let mhz = value_in(&out.frequencies, "MHz");
        assert!((mhz - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_last_edited_frequency_wins() {
        let seconds = period_seconds(1.0, "s");
        let hz = frequency_hz(2.0, "Hz");
        let out = time_frequency(seconds, hz, LastEdited::Frequency).unwrap();
        assert_eq!(value_in(&out.periods, "s"), 0.5);

        let out = time_frequency(seconds, hz, LastEdited::Period).unwrap();
        assert_eq!(value_in(&out.frequencies, "Hz"), 1.0);
    }

    #[test]
    fn test_non_positive_period_is_rejected() {
        assert!(period_seconds(0.0, "s").is_none());
        assert!(period_seconds(-1.0, "s").is_none());
        assert!(frequency_hz(0.0, "Hz").is_none());
        assert!(time_frequency(None, None, LastEdited::Period).is_none());
    }

    #[test]
    fn test_invalid_last_edited_falls_back() {
        let hz = frequency_hz(4.0, "Hz");
        let out = time_frequency(None, hz, LastEdited::Period).unwrap();
        assert_eq!(value_in(&out.periods, "s"), 0.25);
    }

    #[test]
    fn test_throughput() {
        let t = throughput(32.0, 100.0, "MHz").unwrap();
        assert_eq!(t.gbps, 3.2);
        assert_eq!(t.megabytes_per_sec, 400.0);
        assert!(throughput(32.0, 1.0, "THz").is_none());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 2.5 "), Some(2.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(1024.0), "1,024");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-12.25), "-12.25");
        assert_eq!(format_number(1.5e9), "1.500000e+9");
        assert_eq!(format_number(2.5e-6), "2.500000e-6");
        assert_eq!(format_number(f64::NAN), "");
    }
}
