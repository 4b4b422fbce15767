//! Shared test utilities and fixtures
//!
//! A miniature search engine: one trail shared by the throttle and a second
//! backtrackable component, plus engine-owned statistics.

#![allow(dead_code)]

use throttle_core::{
    StatsSink, Throttle, ThrottlePolicy, ThrottleStats, ThrottleUndo, Trail, Undo, UndoLog,
};
use throttle_types::{ThrottleKind, VarId};

pub fn v(id: u32) -> VarId {
    VarId::new(id)
}

/// Undo actions of every component sharing the engine trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineUndo {
    Throttle(ThrottleUndo),
    /// Restore the bound count of a variable.
    Bound(u32),
}

impl From<ThrottleUndo> for EngineUndo {
    fn from(action: ThrottleUndo) -> Self {
        EngineUndo::Throttle(action)
    }
}

/// Counters the engine owns; the throttle only increments them.
#[derive(Debug, Default)]
pub struct EngineStats {
    pub throttled: ThrottleStats,
    pub conflicts: u64,
}

impl StatsSink for EngineStats {
    fn record_throttled(&mut self, kind: Option<ThrottleKind>) {
        self.throttled.record_throttled(kind);
    }
}

/// Everything the trail can undo, minus the trail itself.
#[derive(Debug)]
pub struct Components {
    pub throttle: Throttle,
    pub bounds: Vec<u32>,
}

impl Undo<EngineUndo> for Components {
    fn undo(&mut self, action: EngineUndo) {
        match action {
            EngineUndo::Throttle(action) => self.throttle.undo(action),
            EngineUndo::Bound(var) => {
                let popped = self.bounds.pop();
                assert_eq!(popped, Some(var), "bounds undone out of order");
            }
        }
    }
}

#[derive(Debug)]
pub struct Engine {
    pub trail: Trail<EngineUndo>,
    pub parts: Components,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_policy(ThrottlePolicy::default())
    }

    pub fn with_policy(policy: ThrottlePolicy) -> Self {
        Self {
            trail: Trail::new(),
            parts: Components {
                throttle: Throttle::with_policy(policy),
                bounds: Vec::new(),
            },
        }
    }

    pub fn decide(&mut self) {
        self.trail.push_scope();
    }

    pub fn backtrack(&mut self, levels: usize) -> usize {
        self.trail.pop_scopes(levels, &mut self.parts)
    }

    pub fn bound(&mut self, var: u32) {
        self.parts.bounds.push(var);
        self.trail.record(EngineUndo::Bound(var));
    }
}
