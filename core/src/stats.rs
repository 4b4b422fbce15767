//! Throttle statistics.

use std::fmt;
use std::iter;

use throttle_types::ThrottleKind;

/// Increment-only counter sink for suppressed proposals.
pub trait StatsSink {
    /// One suppressed proposal. `None` means slot 0 held an unknown kind
    /// code; only the aggregate counter moves.
    fn record_throttled(&mut self, kind: Option<ThrottleKind>);
}

impl<T: StatsSink + ?Sized> StatsSink for &mut T {
    fn record_throttled(&mut self, kind: Option<ThrottleKind>) {
        (**self).record_throttled(kind);
    }
}

pub const TOTAL_COUNTER_NAME: &str = "nla throttled lemmas";

/// Counter names, indexed by [`ThrottleKind::index`].
const KIND_COUNTER_NAMES: [&str; ThrottleKind::COUNT] = [
    "nla throttled order lemmas",
    "nla throttled binomial sign lemmas",
    "nla throttled monotone lemmas",
    "nla throttled tangent lemmas",
    "nla throttled basic sign lemmas",
    "nla throttled powers lemmas",
    "nla throttled division lemmas",
    "nla throttled grobner lemmas",
    "nla throttled horner lemmas",
    "nla throttled factor zero lemmas",
    "nla throttled factor neutral lemmas",
];

#[must_use]
pub const fn counter_name(kind: ThrottleKind) -> &'static str {
    KIND_COUNTER_NAMES[kind.index()]
}

/// Aggregate plus per-kind suppression counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThrottleStats {
    throttled: u64,
    by_kind: [u64; ThrottleKind::COUNT],
}

impl ThrottleStats {
    #[must_use]
    pub const fn throttled(&self) -> u64 {
        self.throttled
    }

    #[must_use]
    pub const fn throttled_kind(&self, kind: ThrottleKind) -> u64 {
        self.by_kind[kind.index()]
    }

    /// `(name, value)` pairs, aggregate first, then kinds in code order.
    pub fn counters(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        iter::once((TOTAL_COUNTER_NAME, self.throttled)).chain(
            ThrottleKind::ALL
                .into_iter()
                .map(|kind| (counter_name(kind), self.throttled_kind(kind))),
        )
    }
}

impl StatsSink for ThrottleStats {
    fn record_throttled(&mut self, kind: Option<ThrottleKind>) {
        self.throttled += 1;
        if let Some(kind) = kind {
            self.by_kind[kind.index()] += 1;
        }
    }
}

impl fmt::Display for ThrottleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.counters().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}
