//! Duplicate elimination for freshly generated successors.
//!
//! A candidate is dropped when its state equals the state of the node being
//! expanded or any of that node's ancestors (cycle prevention), or when an
//! equal state is already queued on the fringe at no greater cost.
//! Candidates are not compared against each other.
//!
//! States that were expanded earlier but are neither ancestors nor queued are
//! NOT filtered here. [`ClosedSet`] layers that check on top when the search
//! policy selects [`DuplicateFilter::ClosedSet`]. Under
//! [`DuplicateFilter::AncestorsAndFringeStrict`] any queued entry with an
//! equal state drops the candidate, cost notwithstanding.

use std::rc::Rc;

use crate::frontier::{Fringe, FringeCheck};
use crate::node::Node;
use crate::policy::DuplicateFilter;

/// Per-expansion duplicate suppression counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuppressionCounts {
    /// Candidates whose state appears on the expanded node's lineage.
    pub ancestor: u64,
    /// Candidates dropped because a queued entry has an equal state.
    pub fringe: u64,
    /// Queued entries evicted because a candidate reached their state cheaper.
    pub fringe_replaced: u64,
    /// Candidates whose state was already expanded (closed-set mode only).
    pub closed: u64,
}

impl SuppressionCounts {
    /// Candidates dropped (evictions are not counted).
    #[must_use]
    pub fn total(&self) -> u64 {
        self.ancestor + self.fringe + self.closed
    }

    pub(crate) fn accumulate(&mut self, other: &Self) {
        self.ancestor += other.ancestor;
        self.fringe += other.fringe;
        self.fringe_replaced += other.fringe_replaced;
        self.closed += other.closed;
    }
}

/// States of every node expanded so far in one search.
///
/// `State` only promises equality, so membership is a linear scan.
pub struct ClosedSet<S, A> {
    expanded: Vec<Rc<Node<S, A>>>,
}

impl<S: PartialEq, A> ClosedSet<S, A> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            expanded: Vec::new(),
        }
    }

    /// Record `node` as expanded.
    pub fn insert(&mut self, node: Rc<Node<S, A>>) {
        if !self.contains(node.state()) {
            self.expanded.push(node);
        }
    }

    /// Forget every recorded state.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    #[must_use]
    pub fn contains(&self, state: &S) -> bool {
        self.expanded.iter().any(|n| n.state() == state)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

impl<S: PartialEq, A> Default for ClosedSet<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop `successors` already represented on `node`'s lineage or the fringe.
///
/// Queued entries that a candidate reaches strictly cheaper are evicted from
/// `fringe` so the candidate can take their place.
pub fn remove_duplicates<S: PartialEq, A>(
    successors: Vec<Node<S, A>>,
    node: &Node<S, A>,
    fringe: &mut Fringe<S, A>,
) -> Vec<Node<S, A>> {
    let mut counts = SuppressionCounts::default();
    filter_successors(
        successors,
        node,
        fringe,
        DuplicateFilter::AncestorsAndFringe,
        None,
        &mut counts,
    )
}

/// Drop `successors` whose state is on `node`'s lineage or queued at all.
///
/// The fringe is never modified: the first path queued to a state wins.
pub fn remove_duplicates_strict<S: PartialEq, A>(
    successors: Vec<Node<S, A>>,
    node: &Node<S, A>,
    fringe: &mut Fringe<S, A>,
) -> Vec<Node<S, A>> {
    let mut counts = SuppressionCounts::default();
    filter_successors(
        successors,
        node,
        fringe,
        DuplicateFilter::AncestorsAndFringeStrict,
        None,
        &mut counts,
    )
}

/// Duplicate elimination under `filter`, with counters.
///
/// `closed` is consulted whenever it is given; the driver passes one only in
/// closed-set mode.
pub(crate) fn filter_successors<S: PartialEq, A>(
    successors: Vec<Node<S, A>>,
    node: &Node<S, A>,
    fringe: &mut Fringe<S, A>,
    filter: DuplicateFilter,
    closed: Option<&ClosedSet<S, A>>,
    counts: &mut SuppressionCounts,
) -> Vec<Node<S, A>> {
    let mut kept = Vec::with_capacity(successors.len());
    for candidate in successors {
        if node.lineage_contains(candidate.state()) {
            counts.ancestor += 1;
            tracing::trace!(depth = candidate.depth(), "successor repeats an ancestor state");
            continue;
        }
        if closed.is_some_and(|c| c.contains(candidate.state())) {
            counts.closed += 1;
            tracing::trace!(depth = candidate.depth(), "successor state already expanded");
            continue;
        }
        if filter == DuplicateFilter::AncestorsAndFringeStrict {
            if fringe.contains_state(candidate.state()) {
                counts.fringe += 1;
                tracing::trace!(depth = candidate.depth(), "successor state already queued");
                continue;
            }
        } else {
            match fringe.check_candidate(candidate.state(), candidate.cost()) {
                FringeCheck::Dominated => {
                    counts.fringe += 1;
                    tracing::trace!(
                        depth = candidate.depth(),
                        cost = candidate.cost(),
                        "successor dominated by queued entry"
                    );
                    continue;
                }
                FringeCheck::Replaced { evicted } => {
                    counts.fringe_replaced += evicted as u64;
                    tracing::trace!(
                        depth = candidate.depth(),
                        cost = candidate.cost(),
                        evicted,
                        "successor replaces costlier queued entry"
                    );
                }
                FringeCheck::Absent => {}
            }
        }
        kept.push(candidate);
    }
    kept
}
