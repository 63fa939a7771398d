//! `SearchGraph`: expansion-event audit log.
//!
//! The ordered list of `ExpandEvent` entries is the record of what the search
//! decided. Metadata carries totals, the termination reason, and an echo of
//! the policy the search ran under.

use crate::canon::{canonical_json_bytes, float_repr, CanonError};
use crate::dedup::SuppressionCounts;
use crate::hash::{canonical_hash, ContentHash, HashDomain};
use crate::policy::DuplicateFilter;

/// The complete search audit trail.
#[derive(Debug, Clone)]
pub struct SearchGraph {
    /// Ordered expansion events.
    pub expansions: Vec<ExpandEvent>,
    /// Aggregate metadata.
    pub metadata: SearchGraphMetadata,
}

/// One fringe pop that led to an expansion.
#[derive(Debug, Clone)]
pub struct ExpandEvent {
    /// Index among expansions (0-based).
    pub expansion_order: u64,
    /// Index among all fringe pops, including goal tests and discards.
    pub pop_order: u64,
    pub depth: u32,
    pub cost: f64,
    pub heuristic: f64,
    /// Successors returned by the problem before duplicate elimination.
    pub candidates_generated: u64,
    pub suppressed: SuppressionCounts,
    /// Successors handed to the strategy.
    pub inserted: u64,
    /// Fringe entries the strategy discarded after inserting.
    pub pruned: u64,
    pub fringe_len_after: u64,
}

impl ExpandEvent {
    /// Priority key at pop time.
    #[must_use]
    pub fn f_cost(&self) -> f64 {
        self.cost + self.heuristic
    }
}

/// Aggregate metadata.
#[derive(Debug, Clone)]
pub struct SearchGraphMetadata {
    pub strategy_id: String,

    // Counters
    pub total_pops: u64,
    pub total_expansions: u64,
    /// Popped non-goal nodes that were not expanded.
    pub total_not_expanded: u64,
    pub total_candidates_generated: u64,
    pub total_suppressed: SuppressionCounts,
    pub total_pruned: u64,
    pub fringe_high_water: u64,
    /// Pop count at which the fringe first ran dry and the strategy's
    /// fallback took over. `None` if no restart happened.
    pub fallback_started_at_pop: Option<u64>,
    pub termination_reason: TerminationReason,

    // Policy echo
    pub duplicate_filter: DuplicateFilter,
    pub max_expansions: Option<u64>,
    pub max_depth: Option<u32>,
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A popped node passed the goal test.
    GoalReached { pop_order: u64, depth: u32 },
    /// The fringe emptied. `recovered` is true when a fallback restart then
    /// reached a goal.
    FringeExhausted { recovered: bool },
    /// `max_expansions` was reached before a goal was found.
    ExpansionBudgetExceeded,
}

impl TerminationReason {
    /// Stable identifier used in serialized artifacts.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::FringeExhausted { .. } => "fringe_exhausted",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchGraph {
    /// Serialize the graph to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Domain-separated digest of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchGraph, &bytes))
    }

    /// Convert to a `serde_json::Value` (floats as decimal strings).
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
        })
    }
}

fn expand_event_to_json(e: &ExpandEvent) -> serde_json::Value {
    serde_json::json!({
        "candidates_generated": e.candidates_generated,
        "cost": float_repr(e.cost),
        "depth": e.depth,
        "expansion_order": e.expansion_order,
        "f_cost": float_repr(e.f_cost()),
        "fringe_len_after": e.fringe_len_after,
        "heuristic": float_repr(e.heuristic),
        "inserted": e.inserted,
        "pop_order": e.pop_order,
        "pruned": e.pruned,
        "suppressed": suppression_to_json(&e.suppressed),
    })
}

fn suppression_to_json(s: &SuppressionCounts) -> serde_json::Value {
    serde_json::json!({
        "ancestor": s.ancestor,
        "closed": s.closed,
        "fringe": s.fringe,
        "fringe_replaced": s.fringe_replaced,
    })
}

fn termination_reason_to_json(r: &TerminationReason) -> serde_json::Value {
    match r {
        TerminationReason::GoalReached { pop_order, depth } => {
            serde_json::json!({"depth": depth, "pop_order": pop_order, "type": r.as_str()})
        }
        TerminationReason::FringeExhausted { recovered } => {
            serde_json::json!({"recovered": recovered, "type": r.as_str()})
        }
        TerminationReason::ExpansionBudgetExceeded => serde_json::json!({"type": r.as_str()}),
    }
}

fn metadata_to_json(m: &SearchGraphMetadata) -> serde_json::Value {
    serde_json::json!({
        "duplicate_filter": m.duplicate_filter.as_str(),
        "fallback_started_at_pop": m.fallback_started_at_pop,
        "fringe_high_water": m.fringe_high_water,
        "max_depth": m.max_depth,
        "max_expansions": m.max_expansions,
        "strategy_id": m.strategy_id,
        "termination_reason": termination_reason_to_json(&m.termination_reason),
        "total_candidates_generated": m.total_candidates_generated,
        "total_expansions": m.total_expansions,
        "total_not_expanded": m.total_not_expanded,
        "total_pops": m.total_pops,
        "total_pruned": m.total_pruned,
        "total_suppressed": suppression_to_json(&m.total_suppressed),
    })
}
