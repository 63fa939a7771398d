//! treesearch: generic best-first tree search with pluggable strategies.
//!
//! The engine is domain-agnostic. A caller describes a problem through
//! [`SearchProblem`] (successors, goal test, heuristic, expand predicate) and
//! picks an ordering [`Strategy`]; the driver owns the fringe and runs until a
//! goal is popped or the fringe is exhausted.
//!
//! # Key types
//!
//! - [`Node`]: immutable state node with a shared parent link
//! - [`Fringe`]: the ordered open list
//! - [`AStar`] / [`Beam`]: ordering strategies
//! - [`SearchPolicy`]: budgets and duplicate-filter mode
//! - [`SearchGraph`]: expansion-event audit log with a canonical digest
//!
//! ```
//! use std::rc::Rc;
//! use treesearch::{astar, Node, SearchProblem};
//!
//! /// Count up from 0 to 5 in steps of 1 or 2.
//! struct CountTo5;
//!
//! impl SearchProblem for CountTo5 {
//!     type State = u32;
//!     type Action = u32;
//!
//!     fn successors(&self, node: &Rc<Node<u32, u32>>) -> Vec<Node<u32, u32>> {
//!         [1, 2]
//!             .into_iter()
//!             .map(|step| Node::child(node, node.state() + step, 1.0, step))
//!             .filter(|n| *n.state() <= 5)
//!             .collect()
//!     }
//!
//!     fn is_goal(&self, node: &Node<u32, u32>) -> bool {
//!         *node.state() == 5
//!     }
//!
//!     fn heuristic(&self, state: &u32) -> f64 {
//!         f64::from(5 - state) / 2.0
//!     }
//! }
//!
//! let goal = astar(Node::root(0), &CountTo5).unwrap();
//! assert_eq!(goal.depth(), 3);
//! ```

#![forbid(unsafe_code)]

pub mod canon;
pub mod contract;
pub mod dedup;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod hash;
pub mod node;
pub mod policy;
pub mod search;
pub mod strategy;

pub use contract::{NodeOf, SearchProblem};
pub use dedup::{remove_duplicates, remove_duplicates_strict};
pub use error::SearchError;
pub use frontier::{Fringe, FringeEntry};
pub use graph::{SearchGraph, TerminationReason};
pub use node::Node;
pub use policy::{DuplicateFilter, SearchPolicy};
pub use search::{astar, astar_beam, search, SearchResult};
pub use strategy::{AStar, Beam, Exhaustion, Strategy};
