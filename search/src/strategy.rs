//! Fringe ordering strategies: A* and A*-beam.

use std::rc::Rc;

use crate::contract::SearchProblem;
use crate::error::SearchError;
use crate::frontier::{Fringe, FringeEntry};
use crate::node::Node;

/// Default beam width for [`Beam::default_width`].
pub const DEFAULT_BEAM_WIDTH: usize = 100;

/// An insertion/ordering policy for the search driver.
///
/// The driver pops whatever sits at the front of the fringe, so `insert` is
/// responsible for keeping the best candidate there.
pub trait Strategy<P: SearchProblem + ?Sized> {
    /// Stable identifier recorded in search graph metadata.
    fn strategy_id(&self) -> String;

    /// Merge already-filtered `successors` into `fringe` in place.
    ///
    /// Returns the number of fringe entries the strategy discarded.
    fn insert(
        &self,
        successors: Vec<Node<P::State, P::Action>>,
        fringe: &mut Fringe<P::State, P::Action>,
        problem: &P,
    ) -> usize;

    /// Strategy-level expand predicate, checked before the problem's.
    fn should_expand(&self, _node: &Node<P::State, P::Action>) -> bool {
        true
    }

    /// Called when the fringe runs dry without reaching a goal.
    ///
    /// Receives the exhausted fringe, the problem, and the start node. The
    /// default finishes with no solution.
    fn on_exhausted(
        &self,
        _fringe: &Fringe<P::State, P::Action>,
        _problem: &P,
        _start: &Rc<Node<P::State, P::Action>>,
    ) -> Exhaustion<'_, P> {
        Exhaustion::Finish(None)
    }
}

/// What the driver does once the fringe runs dry.
pub enum Exhaustion<'a, P: SearchProblem + ?Sized> {
    /// End the search with this result.
    Finish(Option<Rc<Node<P::State, P::Action>>>),
    /// Reseed the fringe with the start node and carry on under another
    /// strategy, inside the same policy budget, depth cutoff, duplicate
    /// filter, and audit log. Honoured once per search; a second request
    /// finishes with no solution.
    Restart(&'a dyn Strategy<P>),
}

/// Pair each successor with its heuristic value.
fn score<P: SearchProblem + ?Sized>(
    successors: Vec<Node<P::State, P::Action>>,
    problem: &P,
) -> Vec<FringeEntry<P::State, P::Action>> {
    successors
        .into_iter()
        .map(|n| {
            let h = problem.heuristic(n.state());
            FringeEntry::new(Rc::new(n), h)
        })
        .collect()
}

/// A* ordering: fringe ascending by `cost + heuristic`, always expand.
///
/// Optimal when the heuristic is admissible (never overestimates).
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl<P: SearchProblem + ?Sized> Strategy<P> for AStar {
    fn strategy_id(&self) -> String {
        "astar".into()
    }

    fn insert(
        &self,
        successors: Vec<Node<P::State, P::Action>>,
        fringe: &mut Fringe<P::State, P::Action>,
        problem: &P,
    ) -> usize {
        fringe.insert_sorted(score(successors, problem));
        0
    }
}

/// A*-beam: A* ordering with the fringe cut to `width` entries after each
/// insertion.
///
/// Memory and per-step work are bounded by the width. In exchange the search
/// is neither complete nor optimal: a path to a goal can be pruned before its
/// turn comes. Entries tied on `f` at the cut boundary are kept in fringe
/// order (most recently inserted first).
#[derive(Debug, Clone, Copy)]
pub struct Beam {
    width: usize,
    fallback: bool,
}

impl Beam {
    /// A beam keeping at most `width` fringe entries.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidBeamWidth`] if `width` is zero.
    pub fn new(width: usize) -> Result<Self, SearchError> {
        if width == 0 {
            return Err(SearchError::InvalidBeamWidth { width });
        }
        Ok(Self {
            width,
            fallback: false,
        })
    }

    /// A beam of [`DEFAULT_BEAM_WIDTH`].
    #[must_use]
    pub fn default_width() -> Self {
        Self {
            width: DEFAULT_BEAM_WIDTH,
            fallback: false,
        }
    }

    /// When the beam exhausts, restart from the start node under A*.
    ///
    /// Restores completeness on finite spaces at the cost of one A* pass
    /// whenever the beam comes up empty. The restart spends what is left of
    /// the search's expansion budget.
    #[must_use]
    pub fn with_astar_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.fallback
    }
}

impl<P: SearchProblem + ?Sized> Strategy<P> for Beam {
    fn strategy_id(&self) -> String {
        if self.fallback {
            format!("astar_beam:{}+astar_fallback", self.width)
        } else {
            format!("astar_beam:{}", self.width)
        }
    }

    fn insert(
        &self,
        successors: Vec<Node<P::State, P::Action>>,
        fringe: &mut Fringe<P::State, P::Action>,
        problem: &P,
    ) -> usize {
        fringe.insert_sorted(score(successors, problem));
        fringe.truncate(self.width)
    }

    fn on_exhausted(
        &self,
        _fringe: &Fringe<P::State, P::Action>,
        _problem: &P,
        _start: &Rc<Node<P::State, P::Action>>,
    ) -> Exhaustion<'_, P> {
        if self.fallback {
            Exhaustion::Restart(&AStar)
        } else {
            Exhaustion::Finish(None)
        }
    }
}
