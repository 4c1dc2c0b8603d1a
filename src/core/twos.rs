//! Two's-complement decoding of fixed-width bit strings.
//!
//! The width is the length of the string: `"1111"` is a 4-bit `-1`,
//! `"01111"` is a 5-bit `15`.

use num_bigint::BigInt;
use num_traits::{One, Signed as _, Zero};

use super::radix::{RadixError, pad_left};

/// A decoded signed value together with the width it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signed {
    pub value: BigInt,
    pub width: usize,
}

pub fn decode_twos_complement(bits: &str) -> Result<Signed, RadixError> {
    if bits.is_empty() {
        return Err(RadixError::Empty);
    }

    let mut value = BigInt::zero();
    for c in bits.chars() {
        let bit = match c {
            '0' => 0u32,
            '1' => 1u32,
            other => return Err(RadixError::NotBinary(other)),
        };
        value = (value << 1usize) + bit;
    }

    let width = bits.len();
    if bits.starts_with('1') {
        value -= BigInt::one() << width;
    }
    Ok(Signed { value, width })
}

/// Encode `value` as an `width`-bit two's-complement string, or `None` when
/// it does not fit.
pub fn encode_twos_complement(value: &BigInt, width: usize) -> Option<String> {
    if width == 0 {
        return None;
    }
    let half = BigInt::one() << (width - 1);
    if *value >= half || *value < -&half {
        return None;
    }
    let unsigned = if value.is_negative() {
        value + (BigInt::one() << width)
    } else {
        value.clone()
    };
    Some(pad_left(&unsigned.to_str_radix(2), width))
}
