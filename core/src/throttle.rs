//! The throttle: branch-scoped dedup with escalation to permanent bans.
//!
//! Every proposal goes through [`Throttle::insert_new`]:
//!
//! 1. a banned signature is suppressed outright;
//! 2. a signature already seen in this branch is suppressed, its repeat count
//!    bumped, and it is banned once the count reaches its kind's threshold;
//! 3. anything else is accepted, remembered for the branch, and an undo
//!    action that forgets it is recorded on the engine's trail.
//!
//! Repeat counts and bans outlive backtracking; only the "seen" set is
//! branch-scoped.

use std::collections::{HashMap, HashSet};

use throttle_types::{
    Comparator, EquationId, LemmaShape, Sign, Signature, TermId, ThrottleKind, VarId,
};

use crate::policy::ThrottlePolicy;
use crate::stats::{StatsSink, ThrottleStats};
use crate::trail::{Undo, UndoLog};

/// Undo action the throttle records on the engine's trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleUndo {
    /// Drop this signature from the branch-scoped set. Removing an absent
    /// signature is a no-op.
    ForgetSeen(Signature),
}

#[derive(Debug)]
pub struct Throttle<S = ThrottleStats> {
    seen: HashSet<Signature>,
    banned: HashSet<Signature>,
    /// Not rolled back with `seen`; counts accumulate over the whole search.
    repeats: HashMap<Signature, u32>,
    policy: ThrottlePolicy,
    stats: S,
}

impl Default for Throttle<ThrottleStats> {
    fn default() -> Self {
        Self::new()
    }
}

impl Throttle<ThrottleStats> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_stats(ThrottlePolicy::default(), ThrottleStats::default())
    }

    #[must_use]
    pub fn with_policy(policy: ThrottlePolicy) -> Self {
        Self::with_stats(policy, ThrottleStats::default())
    }
}

impl<S: StatsSink> Throttle<S> {
    /// Throttle that reports into a caller-provided sink, e.g. `&mut EngineStats`.
    #[must_use]
    pub fn with_stats(policy: ThrottlePolicy, stats: S) -> Self {
        Self {
            seen: HashSet::new(),
            banned: HashSet::new(),
            repeats: HashMap::new(),
            policy,
            stats,
        }
    }

    /// Decide one proposal. Returns `true` when it must be suppressed.
    pub fn insert_new<L>(&mut self, log: &mut L, sig: Signature) -> bool
    where
        L: UndoLog<ThrottleUndo> + ?Sized,
    {
        let kind = sig.kind();
        if kind.is_none() {
            tracing::warn!(code = sig.kind_code(), %sig, "unexpected throttle kind");
        }

        if self.banned.contains(&sig) {
            tracing::trace!(kind = sig.kind_code(), %sig, "permanently throttled lemma");
            self.stats.record_throttled(kind);
            return true;
        }

        if self.seen.contains(&sig) {
            let count = self
                .repeats
                .entry(sig)
                .and_modify(|count| *count = count.saturating_add(1))
                .or_insert(1);
            let count = *count;
            self.stats.record_throttled(kind);
            tracing::trace!(kind = sig.kind_code(), count, %sig, "throttled lemma");

            if self.policy.authorizes_ban(kind, count) {
                let inserted = self.banned.insert(sig);
                debug_assert!(inserted, "banned signature reached the seen check");
                tracing::debug!(
                    kind = sig.kind_code(),
                    count,
                    %sig,
                    "banned lemma for the rest of the search"
                );
            }
            return true;
        }

        tracing::trace!(kind = sig.kind_code(), %sig, "new lemma");
        self.seen.insert(sig);
        log.record(ThrottleUndo::ForgetSeen(sig));
        false
    }

    /// Encode `shape` under `kind` and decide it.
    pub fn insert_new_lemma<L>(&mut self, log: &mut L, kind: ThrottleKind, shape: &LemmaShape) -> bool
    where
        L: UndoLog<ThrottleUndo> + ?Sized,
    {
        self.insert_new(log, shape.signature(kind))
    }

    pub fn insert_new_monotone<L>(
        &mut self,
        log: &mut L,
        kind: ThrottleKind,
        var: VarId,
        strict: bool,
    ) -> bool
    where
        L: UndoLog<ThrottleUndo> + ?Sized,
    {
        self.insert_new(log, Signature::monotone(kind, var, strict))
    }

    pub fn insert_new_binomial_sign<L>(
        &mut self,
        log: &mut L,
        kind: ThrottleKind,
        xy: VarId,
        x: VarId,
        y: VarId,
        sign: i32,
        sy: i32,
    ) -> bool
    where
        L: UndoLog<ThrottleUndo> + ?Sized,
    {
        self.insert_new(log, Signature::binomial_sign(kind, xy, x, y, sign, sy))
    }

    pub fn insert_new_order<L>(
        &mut self,
        log: &mut L,
        kind: ThrottleKind,
        ac: VarId,
        a: VarId,
        c_sign: Sign,
        c: VarId,
        bd: VarId,
        b: VarId,
        d_sign: Sign,
        d: VarId,
        cmp: Comparator,
    ) -> bool
    where
        L: UndoLog<ThrottleUndo> + ?Sized,
    {
        self.insert_new(
            log,
            Signature::order(kind, ac, a, c_sign, c, bd, b, d_sign, d, cmp),
        )
    }

    pub fn insert_new_tangent<L>(
        &mut self,
        log: &mut L,
        kind: ThrottleKind,
        monic: VarId,
        x: VarId,
        y: VarId,
        below: bool,
        plane_type: Option<i32>,
    ) -> bool
    where
        L: UndoLog<ThrottleUndo> + ?Sized,
    {
        self.insert_new(log, Signature::tangent(kind, monic, x, y, below, plane_type))
    }

    pub fn insert_new_powers<L>(
        &mut self,
        log: &mut L,
        kind: ThrottleKind,
        r: VarId,
        x: VarId,
        y: VarId,
        subtype: u32,
    ) -> bool
    where
        L: UndoLog<ThrottleUndo> + ?Sized,
    {
        self.insert_new(log, Signature::powers(kind, r, x, y, subtype))
    }

    pub fn insert_new_division<L>(
        &mut self,
        log: &mut L,
        kind: ThrottleKind,
        q: VarId,
        x: VarId,
        y: VarId,
        subtype: u32,
    ) -> bool
    where
        L: UndoLog<ThrottleUndo> + ?Sized,
    {
        self.insert_new(log, Signature::division(kind, q, x, y, subtype))
    }

    pub fn insert_new_grobner<L>(
        &mut self,
        log: &mut L,
        kind: ThrottleKind,
        v1: VarId,
        v2: VarId,
        eq: EquationId,
    ) -> bool
    where
        L: UndoLog<ThrottleUndo> + ?Sized,
    {
        self.insert_new(log, Signature::grobner(kind, v1, v2, eq))
    }

    pub fn insert_new_basic_sign<L>(
        &mut self,
        log: &mut L,
        kind: ThrottleKind,
        monic: VarId,
        sign: i32,
    ) -> bool
    where
        L: UndoLog<ThrottleUndo> + ?Sized,
    {
        self.insert_new(log, Signature::basic_sign(kind, monic, sign))
    }

    pub fn insert_new_horner<L>(
        &mut self,
        log: &mut L,
        kind: ThrottleKind,
        var: VarId,
        term: TermId,
    ) -> bool
    where
        L: UndoLog<ThrottleUndo> + ?Sized,
    {
        self.insert_new(log, Signature::horner(kind, var, term))
    }

    pub fn insert_new_factor<L>(
        &mut self,
        log: &mut L,
        kind: ThrottleKind,
        monic: VarId,
        factor: VarId,
        is_zero: bool,
    ) -> bool
    where
        L: UndoLog<ThrottleUndo> + ?Sized,
    {
        self.insert_new(log, Signature::factor(kind, monic, factor, is_zero))
    }
}

impl<S> Throttle<S> {
    #[must_use]
    pub fn policy(&self) -> &ThrottlePolicy {
        &self.policy
    }

    #[must_use]
    pub fn stats(&self) -> &S {
        &self.stats
    }

    pub fn into_stats(self) -> S {
        self.stats
    }

    #[must_use]
    pub fn is_seen(&self, sig: &Signature) -> bool {
        self.seen.contains(sig)
    }

    #[must_use]
    pub fn is_banned(&self, sig: &Signature) -> bool {
        self.banned.contains(sig)
    }

    /// Times `sig` was suppressed as a branch repeat, across all branches.
    #[must_use]
    pub fn repeat_count(&self, sig: &Signature) -> u32 {
        self.repeats.get(sig).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn seen_len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn banned_len(&self) -> usize {
        self.banned.len()
    }
}

impl<S> Undo<ThrottleUndo> for Throttle<S> {
    fn undo(&mut self, action: ThrottleUndo) {
        match action {
            ThrottleUndo::ForgetSeen(sig) => {
                if !self.seen.remove(&sig) {
                    tracing::trace!(%sig, "signature already forgotten");
                }
            }
        }
    }
}
