//! Powers of two and the limits derived from them.

use num_bigint::BigInt;

use super::radix::{format_grouped_decimal, render_integer};

/// Largest exponent the dashboard and command line accept.
pub const MAX_EXPONENT: u32 = 4096;

/// Everything the power-of-two card shows for one exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pow2 {
    pub n: u32,
    pub value: BigInt,
    pub max_unsigned: BigInt,
    pub signed_min: BigInt,
    pub signed_max: BigInt,
}

impl Pow2 {
    pub fn new(n: u32) -> Self {
        let value = BigInt::from(1) << n;
        let (signed_min, signed_max) = if n == 0 {
            (BigInt::from(0), BigInt::from(0))
        } else {
            let half = BigInt::from(1) << (n - 1);
            (-&half, half - 1)
        };
        Self {
            n,
            max_unsigned: &value - 1,
            value,
            signed_min,
            signed_max,
        }
    }

    pub fn decimal(&self) -> String {
        format_grouped_decimal(&self.value)
    }

    pub fn hex(&self) -> String {
        render_integer(&self.value, 16)
    }

    /// `1` followed by `n` zeros.
    pub fn binary(&self) -> String {
        format!("1{}", "0".repeat(self.n as usize))
    }

    pub fn max_unsigned_decimal(&self) -> String {
        format_grouped_decimal(&self.max_unsigned)
    }

    pub fn signed_range(&self) -> String {
        format!(
            "min {}  |  max {}",
            format_grouped_decimal(&self.signed_min),
            format_grouped_decimal(&self.signed_max)
        )
    }

    /// Size of 2^n bits in bytes, KiB, MiB and GiB. Units larger than the
    /// whole quantity report 0.
    pub fn sizes(&self) -> [(&'static str, BigInt); 4] {
        let shifted = |by: u32| {
            self.n
                .checked_sub(by)
                .map_or_else(|| BigInt::from(0), |s| BigInt::from(1) << s)
        };
        [
            ("bytes", shifted(3)),
            ("KiB", shifted(13)),
            ("MiB", shifted(23)),
            ("GiB", shifted(33)),
        ]
    }
}
