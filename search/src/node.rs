//! Core search node type and parent-chain traversal.

use std::fmt;
use std::iter::FusedIterator;
use std::rc::Rc;

/// An immutable node in the search tree.
///
/// Parent links are shared (`Rc`), so fringe entries that descend from the
/// same expansion share their common ancestors. Each expansion still creates
/// fresh nodes, even when a state recurs elsewhere in the tree.
///
/// `depth` is fixed at construction: `0` for [`Node::root`], `parent.depth + 1`
/// for [`Node::child`]. There is no other way to build a node, so the depth
/// always equals the number of parent links between the node and its root.
pub struct Node<S, A> {
    state: S,
    cost: f64,
    action: Option<A>,
    parent: Option<Rc<Node<S, A>>>,
    depth: u32,
}

impl<S, A> Node<S, A> {
    /// A root node with zero cost and no producing action.
    #[must_use]
    pub fn root(state: S) -> Self {
        Self {
            state,
            cost: 0.0,
            action: None,
            parent: None,
            depth: 0,
        }
    }

    /// A root node with an explicit starting cost and action label.
    #[must_use]
    pub fn root_with(state: S, cost: f64, action: Option<A>) -> Self {
        Self {
            state,
            cost,
            action,
            parent: None,
            depth: 0,
        }
    }

    /// A child of `parent` reached by `action` at an additional `step_cost`.
    ///
    /// The child's cost is `parent.cost() + step_cost`. Step costs must be
    /// non-negative for path costs to stay non-decreasing; this is not checked.
    #[must_use]
    pub fn child(parent: &Rc<Self>, state: S, step_cost: f64, action: A) -> Self {
        Self {
            state,
            cost: parent.cost + step_cost,
            action: Some(action),
            parent: Some(Rc::clone(parent)),
            depth: parent.depth + 1,
        }
    }

    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Cumulative path cost from the root.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[must_use]
    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Rc<Self>> {
        self.parent.as_ref()
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Walk from this node to the root: `self`, `self.parent`, ...
    ///
    /// The iterator is re-derived from parent links on every call, so it can
    /// be restarted any number of times.
    #[must_use]
    pub fn ancestors(&self) -> Ancestors<'_, S, A> {
        Ancestors { next: Some(self) }
    }

    /// The chronological path from the root to this node (inclusive).
    #[must_use]
    pub fn path(&self) -> Vec<&Self> {
        let mut path: Vec<&Self> = self.ancestors().collect();
        path.reverse();
        path
    }

    /// Producing actions along the chronological path, skipping the root's
    /// action (if any).
    #[must_use]
    pub fn actions(&self) -> Vec<&A> {
        self.path()
            .into_iter()
            .filter(|n| !n.is_root())
            .filter_map(Node::action)
            .collect()
    }
}

impl<S: PartialEq, A> Node<S, A> {
    /// Whether `state` equals the state of this node or any of its ancestors.
    #[must_use]
    pub fn lineage_contains(&self, state: &S) -> bool {
        self.ancestors().any(|n| n.state == *state)
    }
}

// Long parent chains would otherwise drop recursively, one stack frame per
// link. Unlink iteratively while this node holds the last reference.
impl<S, A> Drop for Node<S, A> {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(rc) = next {
            match Rc::try_unwrap(rc) {
                Ok(mut node) => next = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl<S: fmt::Debug, A: fmt::Debug> fmt::Debug for Node<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("state", &self.state)
            .field("cost", &self.cost)
            .field("action", &self.action)
            .field("depth", &self.depth)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

impl<S: fmt::Debug, A: fmt::Debug> fmt::Display for Node<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Node: state={:?}, action={:?}, depth={}, cost={}>",
            self.state, self.action, self.depth, self.cost
        )
    }
}

/// Iterator over a node and its ancestors, nearest first.
pub struct Ancestors<'a, S, A> {
    next: Option<&'a Node<S, A>>,
}

impl<'a, S, A> Iterator for Ancestors<'a, S, A> {
    type Item = &'a Node<S, A>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}

impl<S, A> FusedIterator for Ancestors<'_, S, A> {}

impl<S, A> Clone for Ancestors<'_, S, A> {
    fn clone(&self) -> Self {
        Self { next: self.next }
    }
}
