//! Lemma shapes known to the throttle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every lemma shape the throttle can key.
///
/// The discriminant is the numeric code written into slot 0 of a
/// [`Signature`](crate::Signature), so the declaration order is part of the
/// signature format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum ThrottleKind {
    Order = 0,
    BinomialSign = 1,
    Monotone = 2,
    Tangent = 3,
    BasicSign = 4,
    Powers = 5,
    Division = 6,
    Grobner = 7,
    Horner = 8,
    FactorZero = 9,
    FactorNeutral = 10,
}

impl ThrottleKind {
    pub const COUNT: usize = 11;

    pub const ALL: [ThrottleKind; Self::COUNT] = [
        Self::Order,
        Self::BinomialSign,
        Self::Monotone,
        Self::Tangent,
        Self::BasicSign,
        Self::Powers,
        Self::Division,
        Self::Grobner,
        Self::Horner,
        Self::FactorZero,
        Self::FactorNeutral,
    ];

    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Dense index for per-kind tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decode a slot-0 value. Unknown codes yield `None`.
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        if (code as usize) < Self::COUNT {
            Some(Self::ALL[code as usize])
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::BinomialSign => "binomial_sign",
            Self::Monotone => "monotone",
            Self::Tangent => "tangent",
            Self::BasicSign => "basic_sign",
            Self::Powers => "powers",
            Self::Division => "division",
            Self::Grobner => "grobner",
            Self::Horner => "horner",
            Self::FactorZero => "factor_zero",
            Self::FactorNeutral => "factor_neutral",
        }
    }

    /// Parse the snake_case name; dashes are accepted in place of underscores.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
    }
}

impl fmt::Display for ThrottleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
