//! # Radix Codec
//!
//! Arbitrary-precision integers in any base from 2 to 36.
//!
//! Parsing is forgiving about presentation (underscores and whitespace are
//! ignored, digits are case-insensitive) and strict about content: any digit
//! outside the base's alphabet rejects the whole input.
//!
//! ```text
//! "-ff_ff" (base 16)  →  parse_integer  →  BigInt(-65535)
//! BigInt(-65535)      →  render_integer →  "-ffff"
//! ```

use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};
use thiserror::Error;

use crate::core::twos::decode_twos_complement;

/// Digit characters in value order. Index = digit value.
pub const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

/// Largest bit width accepted for padding and reversal.
pub const MAX_WIDTH: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RadixError {
    #[error("base {0} is outside 2..=36")]
    BaseOutOfRange(u32),
    #[error("no digits to parse")]
    Empty,
    #[error("'{digit}' is not a valid base-{base} digit")]
    InvalidDigit { digit: char, base: u32 },
    #[error("'{0}' is not a binary digit")]
    NotBinary(char),
    #[error("width {0} is above the {MAX_WIDTH}-bit limit")]
    WidthTooLarge(usize),
}

/// Accept `width` if it is at most [`MAX_WIDTH`].
pub fn check_width(width: usize) -> Result<usize, RadixError> {
    if width > MAX_WIDTH {
        Err(RadixError::WidthTooLarge(width))
    } else {
        Ok(width)
    }
}

/// Value of a single digit character, if it belongs to the 0-9a-z alphabet.
pub fn digit_value(c: char) -> Option<u32> {
    c.to_digit(36)
}

/// Removes the separators users type for readability (`_` and whitespace).
pub fn strip_separators(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .collect()
}

/// Parse a signed digit string in `base`.
pub fn parse_integer(text: &str, base: u32) -> Result<BigInt, RadixError> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(RadixError::BaseOutOfRange(base));
    }

    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let digits = strip_separators(rest).to_lowercase();
    if digits.is_empty() {
        return Err(RadixError::Empty);
    }

    let mut value = BigInt::zero();
    for c in digits.chars() {
        let d = match digit_value(c) {
            Some(d) if d < base => d,
            _ => return Err(RadixError::InvalidDigit { digit: c, base }),
        };
        value = value * base + d;
    }

    Ok(if negative { -value } else { value })
}

/// Render `value` in `base` using lowercase digits. Zero is `"0"`.
///
/// A base outside 2..=36 is clamped to the nearest end of that range.
pub fn render_integer(value: &BigInt, base: u32) -> String {
    let base = base.clamp(MIN_BASE, MAX_BASE);

    if value.is_zero() {
        return "0".to_string();
    }

    let mut magnitude = value.abs();
    let divisor = BigInt::from(base);
    let mut out = Vec::new();
    while !magnitude.is_zero() {
        let rem = (&magnitude % &divisor).to_usize().unwrap_or_default();
        out.push(DIGITS[rem] as char);
        magnitude /= &divisor;
    }
    if value.sign() == Sign::Minus {
        out.push('-');
    }
    out.iter().rev().collect()
}

/// Decimal rendering with `,` every three digits: `-1234567` → `-1,234,567`.
pub fn format_grouped_decimal(value: &BigInt) -> String {
    let digits = value.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value.is_negative() {
        out.insert(0, '-');
    }
    out
}

/// The four standard renderings of a value plus a zero-padded binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseReadout {
    pub binary: String,
    pub octal: String,
    pub decimal: String,
    pub hex: String,
    pub padded_binary: String,
}

impl BaseReadout {
    pub fn from_value(value: &BigInt, pad_bits: usize) -> Self {
        let binary = render_integer(value, 2);
        Self {
            padded_binary: pad_left(&binary, pad_bits),
            octal: render_integer(value, 8),
            decimal: value.to_string(),
            hex: render_integer(value, 16),
            binary,
        }
    }
}

/// Signed reading of a binary input under two's complement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedReadout {
    pub width: usize,
    pub decimal: String,
    pub hex: String,
}

/// Interpret raw binary input as two's complement. A leading `-` is ignored
/// (the bits alone carry the sign).
pub fn signed_readout(text: &str) -> Result<SignedReadout, RadixError> {
    let clean = strip_separators(text);
    let bits = clean.strip_prefix('-').unwrap_or(&clean);
    let signed = decode_twos_complement(bits)?;
    let hex = if signed.value.is_negative() {
        format!("-0x{}", render_integer(&-&signed.value, 16))
    } else {
        format!("0x{}", render_integer(&signed.value, 16))
    };
    Ok(SignedReadout {
        width: signed.width,
        decimal: signed.value.to_string(),
        hex,
    })
}

/// Left-pad with zeros to `width`. Never truncates. A leading `-` stays in
/// front of the padding.
pub fn pad_left(digits: &str, width: usize) -> String {
    match digits.strip_prefix('-') {
        Some(rest) => format!("-{}", pad_left(rest, width)),
        None => zeros(width.saturating_sub(digits.chars().count())) + digits,
    }
}

/// Right-pad with zeros to `width`. Never truncates.
pub fn pad_right(digits: &str, width: usize) -> String {
    digits.to_string() + &zeros(width.saturating_sub(digits.chars().count()))
}

fn zeros(n: usize) -> String {
    "0".repeat(n)
}
