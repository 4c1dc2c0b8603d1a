//! # Bit Manipulation
//!
//! Bit-order reversal, zero padding of binary strings, and bitwise XOR of two
//! values typed in (possibly different) bases.

use num_bigint::BigInt;
use num_traits::Signed;
use thiserror::Error;

use super::radix::{
    self, BaseReadout, RadixError, check_width, pad_left, pad_right, parse_integer, render_integer,
};

/// Bits carried by one digit of `base`, when the base is a power of two.
pub fn bits_per_digit(base: u32) -> Option<usize> {
    (base >= 2 && base.is_power_of_two()).then(|| base.trailing_zeros() as usize)
}

/// Width implied by how many digits were typed. Only meaningful for
/// power-of-two bases; zero otherwise.
pub fn inferred_width(text: &str, base: u32) -> usize {
    let Some(per_digit) = bits_per_digit(base) else {
        return 0;
    };
    let digits = radix::strip_separators(text)
        .chars()
        .filter(|c| radix::digit_value(*c).is_some_and(|d| d < base))
        .count();
    digits * per_digit
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reversed {
    /// Width the value was padded to before reversing.
    pub width: usize,
    pub binary: String,
    /// Reversed value re-encoded in the input base.
    pub same_base: String,
}

/// Reverse the bit order of `text` (read in `base`) at the given width.
///
/// A width of `None` or `Some(0)` falls back to [`inferred_width`]. The value
/// is never truncated: the effective width is at least the magnitude's own
/// binary length. The sign of negative input is discarded. A requested width
/// above [`radix::MAX_WIDTH`] is an error.
pub fn reverse_bits(text: &str, base: u32, width: Option<usize>) -> Result<Reversed, RadixError> {
    if let Some(w) = width {
        check_width(w)?;
    }
    let value = parse_integer(text, base)?;
    let raw = render_integer(&value.abs(), 2);

    let requested = match width {
        Some(w) if w > 0 => w,
        _ => inferred_width(text, base),
    };
    let width = requested.max(raw.len());

    let binary: String = pad_left(&raw, width).chars().rev().collect();
    let same_base = reencode(&binary, base);

    Ok(Reversed {
        width,
        binary,
        same_base,
    })
}

/// Re-encode a bit string in `base`. Power-of-two bases keep one output digit
/// per chunk so leading zeros survive; other bases get the plain value.
fn reencode(binary: &str, base: u32) -> String {
    let value = BigInt::parse_bytes(binary.as_bytes(), 2).unwrap_or_default();
    match bits_per_digit(base) {
        Some(1) => binary.to_string(),
        Some(per_digit) => {
            let digit_count = binary.len().div_ceil(per_digit);
            pad_left(&render_integer(&value, base), digit_count)
        }
        None => render_integer(&value, base),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadSide {
    #[default]
    Left,
    Right,
}

/// Keep only `0`/`1` characters, then zero-pad to `len` on the chosen side.
/// Longer input is returned as-is.
pub fn pad_binary(text: &str, len: usize, side: PadSide) -> String {
    let cleaned: String = text.chars().filter(|c| matches!(c, '0' | '1')).collect();
    match side {
        PadSide::Left => pad_left(&cleaned, len),
        PadSide::Right => pad_right(&cleaned, len),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperandError {
    #[error("Invalid Value 1 format for selected base: {0}")]
    First(RadixError),
    #[error("Invalid Value 2 format for selected base: {0}")]
    Second(RadixError),
    #[error(transparent)]
    Width(RadixError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorReadout {
    pub first: BigInt,
    pub second: BigInt,
    pub result: BigInt,
    pub readout: BaseReadout,
}

/// XOR two values, each parsed in its own base. `pad_bits` below 1 is
/// treated as 1; above [`radix::MAX_WIDTH`] it is an error.
pub fn xor_values(
    first: (&str, u32),
    second: (&str, u32),
    pad_bits: usize,
) -> Result<XorReadout, OperandError> {
    check_width(pad_bits).map_err(OperandError::Width)?;
    let a = parse_integer(first.0, first.1).map_err(OperandError::First)?;
    let b = parse_integer(second.0, second.1).map_err(OperandError::Second)?;
    let result = &a ^ &b;
    let readout = BaseReadout::from_value(&result, pad_bits.max(1));
    Ok(XorReadout {
        first: a,
        second: b,
        result,
        readout,
    })
}
