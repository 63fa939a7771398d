//! Search policy types.

use crate::error::SearchError;

/// Budget and duplicate-filter configuration for one search.
///
/// The default policy is unbounded and uses ancestor + fringe duplicate
/// elimination only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Hard cap on node expansions. `None` is unbounded.
    ///
    /// Checked at the expand-predicate site, after the goal test: the search
    /// stops with `ExpansionBudgetExceeded` when a node would be expanded past
    /// the cap.
    pub max_expansions: Option<u64>,
    /// Nodes at this depth are popped and goal-tested but not expanded.
    pub max_depth: Option<u32>,
    /// Which states a fresh successor is checked against.
    pub duplicate_filter: DuplicateFilter,
}

impl SearchPolicy {
    /// Validate the policy before a search starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_expansions` is
    /// `Some(0)`: such a search could never expand the start node.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1 when set".into(),
            });
        }
        Ok(())
    }

    /// Whether a node at `depth` may be expanded under `max_depth`.
    #[must_use]
    pub fn depth_allows_expansion(&self, depth: u32) -> bool {
        match self.max_depth {
            Some(max) => depth < max,
            None => true,
        }
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_expansions: None,
            max_depth: None,
            duplicate_filter: DuplicateFilter::AncestorsAndFringe,
        }
    }
}

/// Duplicate elimination mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateFilter {
    /// Drop successors repeating an ancestor's state or dominated by a queued
    /// entry. Previously expanded states may be expanded again.
    #[default]
    AncestorsAndFringe,
    /// Drop successors repeating an ancestor's state or whose state is queued
    /// at all, whatever the queued cost.
    ///
    /// The first path queued to a state wins, so A* can return a costlier
    /// route than the optimum (450 instead of 418 on the Romania map).
    AncestorsAndFringeStrict,
    /// Additionally drop successors whose state was already expanded, and
    /// skip popped nodes whose state was expanded earlier in the search.
    ///
    /// Saves re-expansion on graphs with converging paths. With an admissible
    /// but inconsistent heuristic this can discard a cheaper path found later.
    ClosedSet,
}

impl DuplicateFilter {
    /// Stable identifier used in search graph metadata.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AncestorsAndFringe => "ancestors_and_fringe",
            Self::AncestorsAndFringeStrict => "ancestors_and_fringe_strict",
            Self::ClosedSet => "closed_set",
        }
    }
}
