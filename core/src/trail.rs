//! Undo trail for backtracking search.
//!
//! The search engine owns a [`Trail`]. Components record undo actions on it
//! while a branch is explored; when the engine abandons branches it pops
//! scopes, and every action recorded since the matching
//! [`push_scope`](Trail::push_scope) is handed back to an [`Undo`] target,
//! newest first.
//!
//! Actions recorded before the first scope belong to the root and are never
//! replayed.

/// Something that can revert an action it previously recorded.
pub trait Undo<A> {
    fn undo(&mut self, action: A);
}

/// Write side of an undo log, as seen by a component.
///
/// Components record their own action type; any trail whose action type can
/// be built from it accepts the record.
pub trait UndoLog<A> {
    fn record(&mut self, action: A);
}

/// Append-only log of undo actions partitioned into nested scopes.
#[derive(Debug, Clone)]
pub struct Trail<A> {
    actions: Vec<A>,
    /// `actions.len()` at each open scope.
    scopes: Vec<usize>,
}

impl<A> Default for Trail<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Trail<A> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            actions: Vec::new(),
            scopes: Vec::new(),
        }
    }

    /// Open a new branch scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(self.actions.len());
    }

    #[inline]
    #[must_use]
    pub fn num_scopes(&self) -> usize {
        self.scopes.len()
    }

    /// Number of recorded actions still pending.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Close the innermost `n` scopes, replaying their actions into `target`
    /// in reverse recording order. Returns the number of actions replayed.
    ///
    /// Asking for more scopes than are open closes all of them.
    pub fn pop_scopes<T>(&mut self, n: usize, target: &mut T) -> usize
    where
        T: Undo<A> + ?Sized,
    {
        if n == 0 {
            return 0;
        }
        if n > self.scopes.len() {
            tracing::warn!(
                requested = n,
                open = self.scopes.len(),
                "pop_scopes past the root scope"
            );
        }
        let keep = self.scopes.len().saturating_sub(n);
        let Some(&mark) = self.scopes.get(keep) else {
            return 0;
        };
        self.scopes.truncate(keep);

        let mut replayed = 0;
        while self.actions.len() > mark {
            let Some(action) = self.actions.pop() else {
                break;
            };
            target.undo(action);
            replayed += 1;
        }
        tracing::trace!(scopes = n, replayed, "trail popped");
        replayed
    }
}

impl<A, B> UndoLog<A> for Trail<B>
where
    B: From<A>,
{
    fn record(&mut self, action: A) {
        self.actions.push(B::from(action));
    }
}
