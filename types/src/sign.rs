//! Sign and comparator arguments and their slot codes.

use serde::{Deserialize, Serialize};

/// Offset that lifts a small signed integer into the unsigned slot range.
pub const SIGN_OFFSET: i32 = 127;

/// Slot code for a negative exact sign. Lies outside the codes that
/// [`normalize_sign`] produces for `{-1, 0, 1}`.
pub const NEGATIVE_SIGN_CODE: u32 = 255;

/// Map a small signed integer to an unsigned slot code.
///
/// `-1 -> 126`, `0 -> 127`, `1 -> 128`. Wraps for out-of-range inputs, which
/// keeps distinct inputs distinct.
#[must_use]
pub const fn normalize_sign(sign: i32) -> u32 {
    sign.wrapping_add(SIGN_OFFSET) as u32
}

/// Sign of an exact (rational) quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Negative,
    #[default]
    Zero,
    Positive,
}

impl Sign {
    /// `Positive -> 1`, `Negative -> 255`, `Zero -> 0`.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Positive => 1,
            Self::Negative => NEGATIVE_SIGN_CODE,
            Self::Zero => 0,
        }
    }
}

/// Comparison between two monomial values in an order lemma.
///
/// Discriminants match the engine's comparator encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum Comparator {
    #[serde(rename = "<=")]
    Le = -2,
    #[serde(rename = "<")]
    Lt = -1,
    #[serde(rename = "=")]
    Eq = 0,
    #[serde(rename = ">")]
    Gt = 1,
    #[serde(rename = ">=")]
    Ge = 2,
    #[serde(rename = "!=")]
    Ne = 3,
}

impl Comparator {
    /// Low byte of the two's-complement discriminant.
    #[must_use]
    pub const fn code(self) -> u32 {
        (self as i8 as i32 as u32) & 0xFF
    }
}
