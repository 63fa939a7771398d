//! The fringe (open list): an ordered sequence of nodes awaiting expansion.
//!
//! The fringe itself performs no priority comparison on `pop_front`; ordering
//! is the responsibility of whichever [`crate::strategy::Strategy`] inserts
//! into it. [`Fringe::insert_sorted`] is the merge used by the A* family.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::node::Node;

/// A fringe entry: a node plus its cached heuristic value.
///
/// The heuristic is computed once at insertion and kept alongside the node so
/// ordering never re-invokes the caller's heuristic.
pub struct FringeEntry<S, A> {
    node: Rc<Node<S, A>>,
    heuristic: f64,
}

impl<S, A> FringeEntry<S, A> {
    #[must_use]
    pub fn new(node: Rc<Node<S, A>>, heuristic: f64) -> Self {
        Self { node, heuristic }
    }

    #[must_use]
    pub fn node(&self) -> &Rc<Node<S, A>> {
        &self.node
    }

    #[must_use]
    pub fn heuristic(&self) -> f64 {
        self.heuristic
    }

    /// Priority key `f = cost + h`.
    #[must_use]
    pub fn f_cost(&self) -> f64 {
        self.node.cost() + self.heuristic
    }

    #[must_use]
    pub fn into_node(self) -> Rc<Node<S, A>> {
        self.node
    }
}

/// Result of checking a candidate state against the fringe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FringeCheck {
    /// No entry with an equal state.
    Absent,
    /// An entry with an equal state and no greater cost is already queued.
    Dominated,
    /// Costlier entries with an equal state were evicted; `evicted` of them.
    Replaced { evicted: usize },
}

/// Total order on `f` keys. Every NaN, whatever its sign bit, sorts after
/// `+inf` and ties with other NaNs.
fn cmp_f(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.total_cmp(&b),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

/// Ordered open list, exclusively owned by one search invocation.
pub struct Fringe<S, A> {
    entries: VecDeque<FringeEntry<S, A>>,
}

impl<S, A> Fringe<S, A> {
    /// Create an empty fringe.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Append an entry at the back without any ordering.
    pub fn push_back(&mut self, entry: FringeEntry<S, A>) {
        self.entries.push_back(entry);
    }

    /// Remove and return the front entry.
    pub fn pop_front(&mut self) -> Option<FringeEntry<S, A>> {
        self.entries.pop_front()
    }

    #[must_use]
    pub fn front(&self) -> Option<&FringeEntry<S, A>> {
        self.entries.front()
    }

    /// Merge `batch` into the fringe, keeping it ascending by `f`.
    ///
    /// The batch is stably sorted first, then each entry is placed before any
    /// existing entry with an equal `f`. Entries from the same batch keep
    /// their generation order among equal `f`. NaN keys of either sign sort
    /// last.
    ///
    /// Assumes the fringe is already ascending by `f`.
    pub fn insert_sorted(&mut self, mut batch: Vec<FringeEntry<S, A>>) {
        batch.sort_by(|a, b| cmp_f(a.f_cost(), b.f_cost()));

        let mut cursor = 0;
        for entry in batch {
            let f = entry.f_cost();
            let offset = self
                .entries
                .range(cursor..)
                .take_while(|e| cmp_f(e.f_cost(), f) == Ordering::Less)
                .count();
            let at = cursor + offset;
            self.entries.insert(at, entry);
            cursor = at + 1;
        }
    }

    /// Keep only the first `max_len` entries. Returns how many were dropped.
    pub fn truncate(&mut self, max_len: usize) -> usize {
        let dropped = self.entries.len().saturating_sub(max_len);
        self.entries.truncate(max_len);
        dropped
    }

    /// Current fringe length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the fringe is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries front to back.
    pub fn iter(&self) -> impl Iterator<Item = &FringeEntry<S, A>> {
        self.entries.iter()
    }

    /// Whether the fringe is ascending by `f` (NaN last).
    #[must_use]
    pub fn is_sorted_by_f(&self) -> bool {
        self.entries
            .iter()
            .zip(self.entries.iter().skip(1))
            .all(|(a, b)| cmp_f(a.f_cost(), b.f_cost()) != Ordering::Greater)
    }
}

impl<S: PartialEq, A> Fringe<S, A> {
    /// Whether any queued node has a state equal to `state`.
    #[must_use]
    pub fn contains_state(&self, state: &S) -> bool {
        self.entries.iter().any(|e| e.node.state() == state)
    }

    /// Check a candidate against the fringe, keeping the cheaper path.
    ///
    /// If an entry with an equal state and cost `<= cost` is queued, the
    /// candidate is dominated and the fringe is left alone. Otherwise every
    /// entry with an equal state is strictly costlier and is evicted.
    pub fn check_candidate(&mut self, state: &S, cost: f64) -> FringeCheck {
        let mut found = false;
        for e in &self.entries {
            if e.node.state() == state {
                if e.node.cost() <= cost {
                    return FringeCheck::Dominated;
                }
                found = true;
            }
        }
        if !found {
            return FringeCheck::Absent;
        }

        let before = self.entries.len();
        self.entries.retain(|e| e.node.state() != state);
        FringeCheck::Replaced {
            evicted: before - self.entries.len(),
        }
    }
}

impl<S, A> Default for Fringe<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
