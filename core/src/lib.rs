//! Lemma throttling for backtracking search.
//!
//! This crate contains the stateful half of the throttle:
//!
//! - **`trail`**: the engine-owned undo log with nested branch scopes
//! - **`policy`**: per-kind promotion thresholds
//! - **`stats`**: increment-only suppression counters
//! - **`throttle`**: the decision facade tying them together

pub mod policy;
pub mod stats;
pub mod throttle;
pub mod trail;

pub use policy::{DEFAULT_THRESHOLD, PromotionMode, ThresholdError, ThresholdTable, ThrottlePolicy};
pub use stats::{StatsSink, TOTAL_COUNTER_NAME, ThrottleStats, counter_name};
pub use throttle::{Throttle, ThrottleUndo};
pub use trail::{Trail, Undo, UndoLog};
