//! Proposal traces and their replay.
//!
//! A trace is JSON lines, one event per line:
//!
//! ```text
//! {"op":"push"}
//! {"op":"propose","kind":"factor_zero","lemma":{"shape":"factor","monic":4,"factor":5,"is_zero":true}}
//! {"op":"raw","slots":[9,4,5,1,0,0,0,0]}
//! {"op":"pop","levels":1}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. `kind` is optional on
//! `propose` and defaults to the shape's natural kind.

use std::fmt;
use std::io::{self, BufRead};

use serde::Deserialize;
use thiserror::Error;

use throttle_core::{Throttle, ThrottlePolicy, ThrottleStats, ThrottleUndo, Trail};
use throttle_types::{LemmaShape, Signature, SignatureError, ThrottleKind};

const fn one() -> usize {
    1
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
    #[error("line {line}: {source}")]
    Signature {
        line: usize,
        source: SignatureError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum RawEvent {
    Push,
    Pop {
        #[serde(default = "one")]
        levels: usize,
    },
    Propose {
        #[serde(default)]
        kind: Option<ThrottleKind>,
        lemma: LemmaShape,
    },
    Raw {
        slots: Vec<u32>,
    },
}

/// One validated trace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    Push,
    Pop(usize),
    Propose(Signature),
}

/// A trace event with its 1-based source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceStep {
    pub line: usize,
    pub event: TraceEvent,
}

pub fn parse_trace<R: BufRead>(reader: R) -> Result<Vec<TraceStep>, TraceError> {
    let mut steps = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let raw: RawEvent = serde_json::from_str(trimmed).map_err(|source| TraceError::Json {
            line: line_no,
            source,
        })?;
        let event = match raw {
            RawEvent::Push => TraceEvent::Push,
            RawEvent::Pop { levels } => TraceEvent::Pop(levels),
            RawEvent::Propose { kind, lemma } => {
                let kind = kind.unwrap_or_else(|| lemma.natural_kind());
                TraceEvent::Propose(lemma.signature(kind))
            }
            RawEvent::Raw { slots } => {
                let sig = Signature::try_from(slots.as_slice()).map_err(|source| {
                    TraceError::Signature {
                        line: line_no,
                        source,
                    }
                })?;
                TraceEvent::Propose(sig)
            }
        };
        steps.push(TraceStep {
            line: line_no,
            event,
        });
    }
    Ok(steps)
}

/// Verdict for one proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub line: usize,
    pub signature: Signature,
    pub throttled: bool,
    pub banned: bool,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self
            .signature
            .kind()
            .map_or("unknown", ThrottleKind::as_str);
        let verdict = match (self.throttled, self.banned) {
            (false, _) => "accepted",
            (true, false) => "throttled",
            (true, true) => "banned",
        };
        write!(
            f,
            "{line:>5} {kind:<14} {sig} {verdict}",
            line = self.line,
            sig = self.signature
        )
    }
}

/// A throttle driven by its own trail, standing in for the search engine.
#[derive(Debug, Default)]
pub struct Replay {
    throttle: Throttle,
    trail: Trail<ThrottleUndo>,
}

impl Replay {
    #[must_use]
    pub fn new(policy: ThrottlePolicy) -> Self {
        Self {
            throttle: Throttle::with_policy(policy),
            trail: Trail::new(),
        }
    }

    /// Apply one step; proposals yield a [`Decision`].
    pub fn apply(&mut self, step: &TraceStep) -> Option<Decision> {
        match step.event {
            TraceEvent::Push => {
                self.trail.push_scope();
                None
            }
            TraceEvent::Pop(levels) => {
                self.trail.pop_scopes(levels, &mut self.throttle);
                None
            }
            TraceEvent::Propose(signature) => {
                let throttled = self.throttle.insert_new(&mut self.trail, signature);
                Some(Decision {
                    line: step.line,
                    signature,
                    throttled,
                    banned: self.throttle.is_banned(&signature),
                })
            }
        }
    }

    #[must_use]
    pub fn policy(&self) -> &ThrottlePolicy {
        self.throttle.policy()
    }

    /// End the replay, keeping only the counters.
    #[must_use]
    pub fn into_stats(self) -> ThrottleStats {
        self.throttle.into_stats()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.trail.num_scopes()
    }
}
