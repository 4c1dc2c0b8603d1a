//! Measurement calculators: time ↔ frequency, data sizes and bus throughput.

use crate::core::modules::ModuleKey;
use crate::core::units::{
    Conversion, FREQ_UNITS, LastEdited, SIZE_UNITS_BINARY, SIZE_UNITS_DECIMAL, TIME_UNITS, Throughput,
    convert_size, format_number, frequency_hz, parse_number, period_seconds, throughput,
    time_frequency,
};
use crate::tui::components::card::{Calculator, ReadoutLine};
use crate::tui::components::field::Field;

const TIME_KEYS: &[&str] = &["s", "ms", "us", "ns", "ps"];
const FREQ_KEYS: &[&str] = &["Hz", "kHz", "MHz", "GHz"];
const SIZE_KEYS: &[&str] = &[
    "b", "B", "KiB", "MiB", "GiB", "TiB", "kb", "kB", "MB", "GB", "TB",
];

/// `12.5 ns · 0.0125 us · ...`
fn join_conversions(conversions: &[Conversion]) -> String {
    conversions
        .iter()
        .map(|c| format!("{} {}", format_number(c.value), c.unit))
        .collect::<Vec<_>>()
        .join(" · ")
}

// ============================================================================
// Time ↔ Frequency
// ============================================================================

pub struct TimeFreq {
    fields: [Field; 4],
    last: LastEdited,
}

impl TimeFreq {
    pub fn new() -> Self {
        Self {
            fields: [
                Field::text("Period", ""),
                Field::choice("Period Unit", TIME_KEYS, 3),
                Field::text("Frequency", ""),
                Field::choice("Frequency Unit", FREQ_KEYS, 2),
            ],
            last: LastEdited::Period,
        }
    }
}

impl Calculator for TimeFreq {
    fn key(&self) -> ModuleKey {
        ModuleKey::TimeFreq
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    fn edited(&mut self, index: usize) {
        self.last = if index < 2 {
            LastEdited::Period
        } else {
            LastEdited::Frequency
        };
    }

    fn readout(&self) -> Vec<ReadoutLine> {
        let seconds = parse_number(self.fields[0].value())
            .and_then(|v| period_seconds(v, self.fields[1].value()));
        let hz = parse_number(self.fields[2].value())
            .and_then(|v| frequency_hz(v, self.fields[3].value()));

        match time_frequency(seconds, hz, self.last) {
            Some(out) => vec![
                ReadoutLine::pair("Frequency", join_conversions(&out.frequencies)),
                ReadoutLine::pair("Period", join_conversions(&out.periods)),
            ],
            None => vec![
                ReadoutLine::maybe("Frequency", None),
                ReadoutLine::maybe("Period", None),
                ReadoutLine::Hint("Example: 10 ns ↔ 100 MHz".into()),
            ],
        }
    }
}

// ============================================================================
// Size Converter
// ============================================================================

pub struct SizeCard {
    fields: [Field; 2],
}

impl SizeCard {
    pub fn new() -> Self {
        Self {
            fields: [Field::text("Value", ""), Field::choice("Unit", SIZE_KEYS, 1)],
        }
    }
}

impl Calculator for SizeCard {
    fn key(&self) -> ModuleKey {
        ModuleKey::Size
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    fn readout(&self) -> Vec<ReadoutLine> {
        let out = parse_number(self.fields[0].value())
            .and_then(|v| convert_size(v, self.fields[1].value()));
        match out {
            Some(out) => {
                let mut lines = Vec::with_capacity(out.binary.len() + out.decimal.len() + 2);
                lines.push(ReadoutLine::Text("Binary (IEC)".into()));
                lines.extend(
                    out.binary
                        .iter()
                        .map(|c| ReadoutLine::pair(c.unit, format_number(c.value))),
                );
                lines.push(ReadoutLine::Text("Decimal (SI)".into()));
                lines.extend(
                    out.decimal
                        .iter()
                        .map(|c| ReadoutLine::pair(c.unit, format_number(c.value))),
                );
                lines
            }
            None => {
                let mut lines: Vec<ReadoutLine> = SIZE_UNITS_BINARY
                    .iter()
                    .chain(SIZE_UNITS_DECIMAL)
                    .map(|u| ReadoutLine::maybe(u.key, None))
                    .collect();
                lines.push(ReadoutLine::Hint("Sizes must be zero or positive".into()));
                lines
            }
        }
    }
}

// ============================================================================
// Throughput
// ============================================================================

pub struct ThroughputCard {
    fields: [Field; 3],
}

impl ThroughputCard {
    pub fn new() -> Self {
        Self {
            fields: [
                Field::text("Bus Width (bits)", "32"),
                Field::text("Clock", "100"),
                Field::choice("Clock Unit", FREQ_KEYS, 2),
            ],
        }
    }
}

impl Calculator for ThroughputCard {
    fn key(&self) -> ModuleKey {
        ModuleKey::Throughput
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    fn readout(&self) -> Vec<ReadoutLine> {
        let width = parse_number(self.fields[0].value());
        let clock = parse_number(self.fields[1].value());
        let rate = width
            .zip(clock)
            .and_then(|(w, c)| throughput(w, c, self.fields[2].value()));
        let show = |f: fn(&Throughput) -> f64| {
            rate.as_ref().map(|r| format_number(f(r)))
        };
        vec![
            ReadoutLine::maybe("bit/s", show(|r| r.bits_per_sec)),
            ReadoutLine::maybe("Gb/s", show(|r| r.gbps)),
            ReadoutLine::maybe("Mb/s", show(|r| r.mbps)),
            ReadoutLine::maybe("MB/s", show(|r| r.megabytes_per_sec)),
            ReadoutLine::maybe("MiB/s", show(|r| r.mebibytes_per_sec)),
            ReadoutLine::Hint("Example: 32-bit @ 100 MHz = 3.2 Gb/s = 400 MB/s".into()),
        ]
    }
}
