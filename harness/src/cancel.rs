//! Cooperative cancellation through the expand-predicate checkpoint.
//!
//! The engine has no cancellation API of its own. It polls
//! [`SearchProblem::should_expand`] once per popped non-goal node, so a
//! problem wrapper that answers `false` after a flag is raised drains the
//! fringe without expanding anything further and the search ends as
//! `FringeExhausted`.

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use treesearch::{NodeOf, SearchProblem};

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Idempotent; safe to call from any thread.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// A problem that stops expanding once its [`CancelFlag`] is raised.
///
/// Everything else forwards to the inner problem. `P` is usually a
/// reference (`&World`), which implements [`SearchProblem`] itself.
#[derive(Debug)]
pub struct Cancellable<P> {
    inner: P,
    flag: CancelFlag,
}

impl<P: SearchProblem> Cancellable<P> {
    #[must_use]
    pub fn new(inner: P, flag: CancelFlag) -> Self {
        Self { inner, flag }
    }

    #[must_use]
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: SearchProblem> SearchProblem for Cancellable<P> {
    type State = P::State;
    type Action = P::Action;

    fn successors(&self, node: &Rc<NodeOf<Self>>) -> Vec<NodeOf<Self>> {
        self.inner.successors(node)
    }

    fn is_goal(&self, node: &NodeOf<Self>) -> bool {
        self.inner.is_goal(node)
    }

    fn heuristic(&self, state: &Self::State) -> f64 {
        self.inner.heuristic(state)
    }

    fn should_expand(&self, node: &NodeOf<Self>) -> bool {
        if self.flag.is_cancelled() {
            tracing::trace!(depth = node.depth(), "expansion refused: search cancelled");
            return false;
        }
        self.inner.should_expand(node)
    }
}
