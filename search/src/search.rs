//! Search entry points and the expansion loop.

use std::rc::Rc;

use crate::contract::SearchProblem;
use crate::dedup::{filter_successors, ClosedSet, SuppressionCounts};
use crate::error::SearchError;
use crate::frontier::{Fringe, FringeEntry};
use crate::graph::{ExpandEvent, SearchGraph, SearchGraphMetadata, TerminationReason};
use crate::node::Node;
use crate::policy::{DuplicateFilter, SearchPolicy};
use crate::strategy::{AStar, Beam, Exhaustion, Strategy};

/// Result of a search execution.
///
/// Always carries the `SearchGraph` audit trail, whatever the outcome.
pub struct SearchResult<S, A> {
    /// The goal node, if one was popped.
    pub goal: Option<Rc<Node<S, A>>>,
    /// The complete search audit trail.
    pub graph: SearchGraph,
}

impl<S, A> SearchResult<S, A> {
    /// Returns `true` if the search stopped on a popped goal node.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(
            self.graph.metadata.termination_reason,
            TerminationReason::GoalReached { .. }
        )
    }

    /// Chronological path from the start node to the result, if any.
    #[must_use]
    pub fn solution_path(&self) -> Option<Vec<&Node<S, A>>> {
        self.goal.as_deref().map(Node::path)
    }
}

/// Running totals for one search.
#[derive(Default)]
struct Counters {
    pops: u64,
    expansions: u64,
    not_expanded: u64,
    candidates_generated: u64,
    suppressed: SuppressionCounts,
    pruned: u64,
    fringe_high_water: u64,
}

/// The strategy currently ordering the fringe.
enum Active<'s, P: SearchProblem + ?Sized, St: ?Sized> {
    Primary(&'s St),
    Fallback(&'s dyn Strategy<P>),
}

impl<'s, P, St> Active<'s, P, St>
where
    P: SearchProblem + ?Sized,
    St: Strategy<P> + ?Sized,
{
    fn should_expand(&self, node: &Node<P::State, P::Action>) -> bool {
        match self {
            Self::Primary(s) => s.should_expand(node),
            Self::Fallback(s) => s.should_expand(node),
        }
    }

    fn insert(
        &self,
        successors: Vec<Node<P::State, P::Action>>,
        fringe: &mut Fringe<P::State, P::Action>,
        problem: &P,
    ) -> usize {
        match self {
            Self::Primary(s) => s.insert(successors, fringe, problem),
            Self::Fallback(s) => s.insert(successors, fringe, problem),
        }
    }

    fn on_exhausted(
        &self,
        fringe: &Fringe<P::State, P::Action>,
        problem: &P,
        start: &Rc<Node<P::State, P::Action>>,
    ) -> Exhaustion<'s, P> {
        match *self {
            Self::Primary(s) => s.on_exhausted(fringe, problem, start),
            Self::Fallback(s) => s.on_exhausted(fringe, problem, start),
        }
    }
}

/// Run a best-first tree search from `start`.
///
/// The fringe starts as `[(start, 0)]`. Each round pops the front entry,
/// returns it if it is a goal, and otherwise (if the strategy, the policy and
/// the problem all allow it) expands it: successors are generated, filtered
/// for duplicates, and handed to `strategy.insert`. When the fringe runs dry
/// the strategy's [`Strategy::on_exhausted`] hook either finishes the search
/// with its result or asks for one [`Exhaustion::Restart`]: the fringe is
/// reseeded with `start` and the search carries on under the named strategy
/// with the same counters and budget.
///
/// In closed-set mode a popped non-goal node whose state was already
/// expanded is skipped and counted as not expanded.
///
/// Termination is only guaranteed on finite state spaces or under a policy
/// budget.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] for pre-flight policy validation
/// failures. No search step is taken in that case.
pub fn search<P, St>(
    start: impl Into<Rc<Node<P::State, P::Action>>>,
    problem: &P,
    strategy: &St,
    policy: &SearchPolicy,
) -> Result<SearchResult<P::State, P::Action>, SearchError>
where
    P: SearchProblem + ?Sized,
    St: Strategy<P> + ?Sized,
{
    policy.validate()?;

    let start = start.into();
    let strategy_id = strategy.strategy_id();
    let mut active: Active<'_, P, St> = Active::Primary(strategy);
    let mut fallback_started_at_pop = None;
    let mut fringe = Fringe::new();
    fringe.push_back(FringeEntry::new(Rc::clone(&start), 0.0));

    let mut closed = match policy.duplicate_filter {
        DuplicateFilter::ClosedSet => Some(ClosedSet::new()),
        DuplicateFilter::AncestorsAndFringe | DuplicateFilter::AncestorsAndFringeStrict => None,
    };
    let mut expansions: Vec<ExpandEvent> = Vec::new();
    let mut counters = Counters {
        fringe_high_water: 1,
        ..Counters::default()
    };

    tracing::debug!(strategy = %strategy_id, "search started");

    let (goal, termination_reason) = loop {
        let Some(entry) = fringe.pop_front() else {
            match active.on_exhausted(&fringe, problem, &start) {
                Exhaustion::Restart(next) if fallback_started_at_pop.is_none() => {
                    tracing::debug!(
                        pops = counters.pops,
                        expansions = counters.expansions,
                        fallback = %next.strategy_id(),
                        "fringe exhausted; restarting from the start node"
                    );
                    fallback_started_at_pop = Some(counters.pops);
                    active = Active::Fallback(next);
                    if let Some(closed) = closed.as_mut() {
                        closed.clear();
                    }
                    fringe.push_back(FringeEntry::new(Rc::clone(&start), 0.0));
                    continue;
                }
                Exhaustion::Restart(_) => {
                    tracing::debug!("second restart request ignored");
                    break (None, TerminationReason::FringeExhausted { recovered: false });
                }
                Exhaustion::Finish(result) => {
                    let recovered = result.is_some();
                    break (result, TerminationReason::FringeExhausted { recovered });
                }
            }
        };
        let pop_order = counters.pops;
        counters.pops += 1;

        let heuristic = entry.heuristic();
        let node = entry.into_node();

        if problem.is_goal(&node) {
            let depth = node.depth();
            let reason = if fallback_started_at_pop.is_some() {
                TerminationReason::FringeExhausted { recovered: true }
            } else {
                TerminationReason::GoalReached { pop_order, depth }
            };
            break (Some(node), reason);
        }

        if closed.as_ref().is_some_and(|c| c.contains(node.state())) {
            counters.not_expanded += 1;
            tracing::trace!(pop_order, depth = node.depth(), "popped state already expanded");
            continue;
        }

        // Expand-predicate site: strategy, depth cutoff, then the problem's
        // own predicate (the cancellation checkpoint).
        let expand = active.should_expand(&node)
            && policy.depth_allows_expansion(node.depth())
            && problem.should_expand(&node);
        if !expand {
            counters.not_expanded += 1;
            tracing::trace!(pop_order, depth = node.depth(), "node discarded without expansion");
            continue;
        }

        if policy
            .max_expansions
            .is_some_and(|max| counters.expansions >= max)
        {
            break (None, TerminationReason::ExpansionBudgetExceeded);
        }

        let candidates = problem.successors(&node);
        let generated = candidates.len() as u64;
        let mut suppressed = SuppressionCounts::default();
        let kept = filter_successors(
            candidates,
            &node,
            &mut fringe,
            policy.duplicate_filter,
            closed.as_ref(),
            &mut suppressed,
        );
        if let Some(closed) = closed.as_mut() {
            closed.insert(Rc::clone(&node));
        }

        let inserted = kept.len() as u64;
        let pruned = active.insert(kept, &mut fringe, problem) as u64;
        let fringe_len = fringe.len() as u64;

        tracing::debug!(
            expansion = counters.expansions,
            depth = node.depth(),
            cost = node.cost(),
            generated,
            inserted,
            suppressed = suppressed.total(),
            pruned,
            fringe_len,
            "expanded node"
        );

        expansions.push(ExpandEvent {
            expansion_order: counters.expansions,
            pop_order,
            depth: node.depth(),
            cost: node.cost(),
            heuristic,
            candidates_generated: generated,
            suppressed,
            inserted,
            pruned,
            fringe_len_after: fringe_len,
        });

        counters.expansions += 1;
        counters.candidates_generated += generated;
        counters.suppressed.accumulate(&suppressed);
        counters.pruned += pruned;
        counters.fringe_high_water = counters.fringe_high_water.max(fringe_len);
    };

    tracing::debug!(
        strategy = %strategy_id,
        termination = termination_reason.as_str(),
        pops = counters.pops,
        expansions = counters.expansions,
        solved = goal.is_some(),
        "search finished"
    );

    let graph = SearchGraph {
        expansions,
        metadata: SearchGraphMetadata {
            strategy_id,
            total_pops: counters.pops,
            total_expansions: counters.expansions,
            total_not_expanded: counters.not_expanded,
            total_candidates_generated: counters.candidates_generated,
            total_suppressed: counters.suppressed,
            total_pruned: counters.pruned,
            fringe_high_water: counters.fringe_high_water,
            fallback_started_at_pop,
            termination_reason,
            duplicate_filter: policy.duplicate_filter,
            max_expansions: policy.max_expansions,
            max_depth: policy.max_depth,
        },
    };

    Ok(SearchResult { goal, graph })
}

/// Canonical A* search under the default (unbounded) policy.
///
/// Returns the first goal node popped, or `None` once the fringe is
/// exhausted.
pub fn astar<P>(
    start: impl Into<Rc<Node<P::State, P::Action>>>,
    problem: &P,
) -> Option<Rc<Node<P::State, P::Action>>>
where
    P: SearchProblem + ?Sized,
{
    search(start, problem, &AStar, &SearchPolicy::default())
        .ok()
        .and_then(|result| result.goal)
}

/// A*-beam search keeping at most `beam_width` fringe entries.
///
/// Neither complete nor optimal; see [`Beam`].
///
/// # Errors
///
/// Returns [`SearchError::InvalidBeamWidth`] if `beam_width` is zero.
pub fn astar_beam<P>(
    start: impl Into<Rc<Node<P::State, P::Action>>>,
    problem: &P,
    beam_width: usize,
) -> Result<Option<Rc<Node<P::State, P::Action>>>, SearchError>
where
    P: SearchProblem + ?Sized,
{
    let beam = Beam::new(beam_width)?;
    let result = search(start, problem, &beam, &SearchPolicy::default())?;
    Ok(result.goal)
}
