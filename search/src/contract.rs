//! Search problem contract trait.

use std::rc::Rc;

use crate::node::Node;

/// Node type of a [`SearchProblem`].
pub type NodeOf<P> = Node<<P as SearchProblem>::State, <P as SearchProblem>::Action>;

/// The caller side of a search: transitions, goal test, and heuristic.
///
/// Implemented once per problem domain. The engine is domain-agnostic and
/// calls these methods only from the search driver.
///
/// # Contract
///
/// - `successors` must build children with [`Node::child`] from the node it
///   is given, so costs and depths stay consistent along the path.
/// - Step costs must be non-negative.
/// - `heuristic` must never overestimate the true remaining cost for A* to
///   return an optimal solution. The engine does not check this.
/// - The engine makes no finiteness guarantee. An infinite state space needs a
///   `should_expand` cutoff (or a search policy budget) to terminate.
pub trait SearchProblem {
    /// World configuration. Value equality is the only identity assumed.
    type State: PartialEq;
    /// Transition label, opaque to the engine.
    type Action;

    /// Generate the candidate children of `node`.
    fn successors(
        &self,
        node: &Rc<Node<Self::State, Self::Action>>,
    ) -> Vec<Node<Self::State, Self::Action>>;

    /// Whether `node` satisfies the goal.
    fn is_goal(&self, node: &Node<Self::State, Self::Action>) -> bool;

    /// Estimated remaining cost from `state` to a goal.
    fn heuristic(&self, state: &Self::State) -> f64;

    /// Whether a popped, non-goal node should be expanded.
    ///
    /// Polled exactly once per popped non-goal node that the strategy and
    /// policy allow to expand. This is the cancellation checkpoint: an
    /// implementation can observe an external flag here.
    fn should_expand(&self, _node: &Node<Self::State, Self::Action>) -> bool {
        true
    }
}

impl<P: SearchProblem + ?Sized> SearchProblem for &P {
    type State = P::State;
    type Action = P::Action;

    fn successors(&self, node: &Rc<NodeOf<Self>>) -> Vec<NodeOf<Self>> {
        (**self).successors(node)
    }

    fn is_goal(&self, node: &NodeOf<Self>) -> bool {
        (**self).is_goal(node)
    }

    fn heuristic(&self, state: &Self::State) -> f64 {
        (**self).heuristic(state)
    }

    fn should_expand(&self, node: &NodeOf<Self>) -> bool {
        (**self).should_expand(node)
    }
}
