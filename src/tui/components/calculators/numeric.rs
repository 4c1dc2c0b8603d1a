//! Integer calculators: bit reversal, powers of two, base conversion,
//! binary padding, XOR and ASCII ↔ hex.

use crate::core::ascii::{ascii_to_hex, hex_to_ascii};
use crate::core::bits::{PadSide, inferred_width, pad_binary, reverse_bits, xor_values};
use crate::core::modules::ModuleKey;
use crate::core::pow2::{MAX_EXPONENT, Pow2};
use crate::core::radix::{
    BaseReadout, MAX_BASE, MIN_BASE, check_width, format_grouped_decimal, parse_integer,
    signed_readout,
};
use crate::tui::components::card::{Calculator, ReadoutLine};
use crate::tui::components::field::Field;

pub const BASES: &[&str] = &["2", "8", "10", "16"];
const BASES_WITH_CUSTOM: &[&str] = &["2", "8", "10", "16", "custom"];
const ON_OFF: &[&str] = &["off", "on"];
const SIDES: &[&str] = &["left", "right"];

fn base_of(field: &Field) -> u32 {
    field.value().parse().unwrap_or(10)
}

/// Parse a width-like field; blank or invalid gives `None`.
fn parse_count(field: &Field) -> Option<usize> {
    field.value().trim().parse().ok()
}

/// Like [`parse_count`], but a width over the limit becomes an error line.
fn parse_width(field: &Field) -> Result<Option<usize>, ReadoutLine> {
    parse_count(field)
        .map(check_width)
        .transpose()
        .map_err(|e| ReadoutLine::Error(format!("{}: {e}", field.label)))
}

fn base_lines(readout: &BaseReadout) -> Vec<ReadoutLine> {
    vec![
        ReadoutLine::pair("Binary", &readout.binary),
        ReadoutLine::pair("Octal", &readout.octal),
        ReadoutLine::pair("Decimal", &readout.decimal),
        ReadoutLine::pair("Hex", &readout.hex),
        ReadoutLine::pair("Binary (padded)", &readout.padded_binary),
    ]
}

// ============================================================================
// Bit Inverter
// ============================================================================

pub struct Inverter {
    fields: [Field; 3],
}

impl Inverter {
    pub fn new() -> Self {
        Self {
            fields: [
                Field::text("Input", ""),
                Field::choice("Base", BASES, 0),
                Field::text("Bit Width (optional)", ""),
            ],
        }
    }
}

impl Calculator for Inverter {
    fn key(&self) -> ModuleKey {
        ModuleKey::Inverter
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    fn readout(&self) -> Vec<ReadoutLine> {
        let input = self.fields[0].value();
        let base = base_of(&self.fields[1]);
        let width = match parse_width(&self.fields[2]) {
            Ok(width) => width,
            Err(line) => return vec![line],
        };

        let mut lines = vec![ReadoutLine::pair(
            "Inferred Width",
            inferred_width(input, base).to_string(),
        )];
        if input.trim().is_empty() {
            lines.push(ReadoutLine::Hint("Enter a value to reverse its bit order".into()));
            return lines;
        }
        match reverse_bits(input, base, width) {
            Ok(reversed) => {
                lines.push(ReadoutLine::pair("Width Used", reversed.width.to_string()));
                lines.push(ReadoutLine::pair("Reversed (binary)", reversed.binary));
                lines.push(ReadoutLine::pair("Reversed (same base)", reversed.same_base));
            }
            Err(e) => lines.push(ReadoutLine::Error(e.to_string())),
        }
        lines
    }
}

// ============================================================================
// 2^n Calculator
// ============================================================================

pub struct Pow2Card {
    fields: [Field; 1],
}

impl Pow2Card {
    pub fn new() -> Self {
        Self {
            fields: [Field::text("n", "10")],
        }
    }
}

impl Calculator for Pow2Card {
    fn key(&self) -> ModuleKey {
        ModuleKey::Pow2
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    fn readout(&self) -> Vec<ReadoutLine> {
        let n = match self.fields[0].value().trim().parse::<u32>() {
            Ok(n) if n <= MAX_EXPONENT => n,
            _ => {
                return vec![ReadoutLine::Error(format!(
                    "n must be a whole number from 0 to {MAX_EXPONENT}"
                ))];
            }
        };
        let p = Pow2::new(n);
        let sizes = p
            .sizes()
            .iter()
            .map(|(unit, v)| format!("{} {unit}", format_grouped_decimal(v)))
            .collect::<Vec<_>>()
            .join(" · ");
        vec![
            ReadoutLine::pair("2^n (decimal)", p.decimal()),
            ReadoutLine::pair("2^n (hex)", p.hex()),
            ReadoutLine::pair("2^n − 1", p.max_unsigned_decimal()),
            ReadoutLine::pair("Binary", p.binary()),
            ReadoutLine::pair("Signed range", p.signed_range()),
            ReadoutLine::pair("2^n bits", sizes),
            ReadoutLine::Hint("2^10 ≈ 1 Ki, 2^20 ≈ 1 Mi, 2^30 ≈ 1 Gi".into()),
        ]
    }
}

// ============================================================================
// Base Converter
// ============================================================================

pub struct BaseConverter {
    fields: [Field; 5],
}

impl BaseConverter {
    pub fn new(pad_bits: usize) -> Self {
        Self {
            fields: [
                Field::text("Input", ""),
                Field::choice("Input Base", BASES_WITH_CUSTOM, 0),
                Field::text("Custom Base (2..36)", "10"),
                Field::choice("Two's Complement", ON_OFF, 0),
                Field::text("Target Bits", &pad_bits.to_string()),
            ],
        }
    }

    fn base(&self) -> u32 {
        match self.fields[1].value() {
            "custom" => self.fields[2]
                .value()
                .trim()
                .parse::<u32>()
                .map_or(10, |b| b.clamp(MIN_BASE, MAX_BASE)),
            other => other.parse().unwrap_or(10),
        }
    }
}

impl Calculator for BaseConverter {
    fn key(&self) -> ModuleKey {
        ModuleKey::Base
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    fn readout(&self) -> Vec<ReadoutLine> {
        let input = self.fields[0].value();
        if input.trim().is_empty() {
            return vec![ReadoutLine::Hint(
                "Example: 255 (dec) → 11111111 (bin) → ff (hex)".into(),
            )];
        }
        let base = self.base();
        let value = match parse_integer(input, base) {
            Ok(v) => v,
            Err(e) => return vec![ReadoutLine::Error(e.to_string())],
        };
        let pad_bits = match parse_width(&self.fields[4]) {
            Ok(pad_bits) => pad_bits.unwrap_or(0),
            Err(line) => return vec![line],
        };
        let mut lines = base_lines(&BaseReadout::from_value(&value, pad_bits));

        if self.fields[3].value() == "on" {
            if base != 2 {
                lines.push(ReadoutLine::Hint("Two's complement applies to binary input".into()));
            } else {
                match signed_readout(input) {
                    Ok(signed) => {
                        lines.push(ReadoutLine::pair(
                            format!("Signed ({}-bit)", signed.width),
                            signed.decimal,
                        ));
                        lines.push(ReadoutLine::pair("Signed hex", signed.hex));
                    }
                    Err(_) => lines.push(ReadoutLine::maybe("Signed", None)),
                }
            }
        }
        lines
    }
}

// ============================================================================
// Pad Binary
// ============================================================================

pub struct PadCard {
    fields: [Field; 3],
}

impl PadCard {
    pub fn new() -> Self {
        Self {
            fields: [
                Field::text("Binary Input", ""),
                Field::text("Target Length", "8"),
                Field::choice("Direction", SIDES, 0),
            ],
        }
    }
}

impl Calculator for PadCard {
    fn key(&self) -> ModuleKey {
        ModuleKey::Pad
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    fn readout(&self) -> Vec<ReadoutLine> {
        let len = match parse_width(&self.fields[1]) {
            Ok(len) => len.unwrap_or(0),
            Err(line) => return vec![line],
        };
        let side = if self.fields[2].selected() == 1 {
            PadSide::Right
        } else {
            PadSide::Left
        };
        vec![ReadoutLine::pair(
            "Output",
            pad_binary(self.fields[0].value(), len, side),
        )]
    }
}

// ============================================================================
// XOR Calculator
// ============================================================================

pub struct XorCard {
    fields: [Field; 5],
}

impl XorCard {
    pub fn new(pad_bits: usize) -> Self {
        Self {
            fields: [
                Field::text("Value 1", ""),
                Field::choice("Base 1", BASES, 0),
                Field::text("Value 2", ""),
                Field::choice("Base 2", BASES, 0),
                Field::text("Bit Width", &pad_bits.to_string()),
            ],
        }
    }
}

impl Calculator for XorCard {
    fn key(&self) -> ModuleKey {
        ModuleKey::Xor
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    fn readout(&self) -> Vec<ReadoutLine> {
        let first = self.fields[0].value();
        let second = self.fields[2].value();
        if first.trim().is_empty() || second.trim().is_empty() {
            return vec![ReadoutLine::Hint("Enter both values to XOR them".into())];
        }
        let pad_bits = match parse_width(&self.fields[4]) {
            Ok(pad_bits) => pad_bits.unwrap_or(32),
            Err(line) => return vec![line],
        };
        match xor_values(
            (first, base_of(&self.fields[1])),
            (second, base_of(&self.fields[3])),
            pad_bits,
        ) {
            Ok(xor) => base_lines(&xor.readout),
            Err(e) => vec![ReadoutLine::Error(e.to_string())],
        }
    }
}

// ============================================================================
// ASCII ↔ Hex
// ============================================================================

pub struct AsciiCard {
    fields: [Field; 2],
}

impl AsciiCard {
    pub fn new() -> Self {
        Self {
            fields: [Field::text("ASCII → Hex", ""), Field::text("Hex → ASCII", "")],
        }
    }
}

impl Calculator for AsciiCard {
    fn key(&self) -> ModuleKey {
        ModuleKey::Ascii
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    fn readout(&self) -> Vec<ReadoutLine> {
        // Control characters render as middle dots
        let printable: String = hex_to_ascii(self.fields[1].value())
            .chars()
            .map(|c| if c.is_control() { '·' } else { c })
            .collect();
        vec![
            ReadoutLine::pair("Hex", ascii_to_hex(self.fields[0].value())),
            ReadoutLine::pair("ASCII", printable),
            ReadoutLine::Hint("Example: \"Hello\" → 48 65 6c 6c 6f".into()),
        ]
    }
}
