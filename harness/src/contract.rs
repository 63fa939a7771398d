//! World contract: the trait a world implements to be run by the runner.
//!
//! A world is a [`SearchProblem`] plus a start node and a way to render its
//! states and actions for reports. Worlds do not run searches, hash
//! artifacts, or write files; those are runner concerns.

use treesearch::{NodeOf, SearchProblem};

/// A named, runnable search problem.
pub trait SearchWorld: SearchProblem {
    /// Unique world identifier (e.g., `"romania"`).
    fn world_id(&self) -> &str;

    /// The start node. Called once per run.
    fn start(&self) -> NodeOf<Self>;

    /// Human-readable state label used in reports.
    fn render_state(&self, state: &Self::State) -> String;

    /// Human-readable action label used in reports.
    fn render_action(&self, action: &Self::Action) -> String;
}
