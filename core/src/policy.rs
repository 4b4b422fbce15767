//! Promotion policy: when a repeated signature becomes a permanent ban.

use thiserror::Error;

use throttle_types::ThrottleKind;

/// Threshold for kind codes outside [`ThrottleKind`].
pub const DEFAULT_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("threshold for {kind} must be at least 1")]
    Zero { kind: ThrottleKind },
}

/// Per-kind repeat count at which a signature is banned for the rest of the
/// search.
///
/// Kinds whose repeats follow from fixed structure (a monic's sign once its
/// factors are fixed) ban almost immediately; context-dependent kinds
/// tolerate more repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdTable([u32; ThrottleKind::COUNT]);

impl ThresholdTable {
    /// Indexed by [`ThrottleKind::index`].
    const REFERENCE: [u32; ThrottleKind::COUNT] = [
        4, // order
        3, // binomial sign
        3, // monotone
        4, // tangent
        2, // basic sign
        3, // powers
        3, // division
        5, // grobner
        4, // horner
        1, // factor zero
        1, // factor neutral
    ];

    #[must_use]
    pub const fn reference() -> Self {
        Self(Self::REFERENCE)
    }

    #[must_use]
    pub const fn get(&self, kind: ThrottleKind) -> u32 {
        self.0[kind.index()]
    }

    /// Threshold for a decoded slot-0 value; unknown kinds get
    /// [`DEFAULT_THRESHOLD`].
    #[must_use]
    pub const fn for_kind(&self, kind: Option<ThrottleKind>) -> u32 {
        match kind {
            Some(kind) => self.get(kind),
            None => DEFAULT_THRESHOLD,
        }
    }

    /// Copy with one threshold replaced.
    pub fn with(mut self, kind: ThrottleKind, threshold: u32) -> Result<Self, ThresholdError> {
        if threshold == 0 {
            return Err(ThresholdError::Zero { kind });
        }
        self.0[kind.index()] = threshold;
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ThrottleKind, u32)> + '_ {
        ThrottleKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::reference()
    }
}

/// Whether repeats may escalate to permanent bans at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionMode {
    #[default]
    Enabled,
    /// Branch-scoped dedup only.
    Disabled,
}

/// Immutable promotion settings handed to a [`Throttle`](crate::Throttle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThrottlePolicy {
    thresholds: ThresholdTable,
    promotion: PromotionMode,
}

impl ThrottlePolicy {
    #[must_use]
    pub const fn new(thresholds: ThresholdTable, promotion: PromotionMode) -> Self {
        Self {
            thresholds,
            promotion,
        }
    }

    #[must_use]
    pub const fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    #[must_use]
    pub const fn promotion(&self) -> PromotionMode {
        self.promotion
    }

    /// True once `count` repeats reach the kind's threshold.
    #[must_use]
    pub const fn authorizes_ban(&self, kind: Option<ThrottleKind>, count: u32) -> bool {
        match self.promotion {
            PromotionMode::Enabled => count >= self.thresholds.for_kind(kind),
            PromotionMode::Disabled => false,
        }
    }
}
