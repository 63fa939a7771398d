//! Harness runner: runs a world through the engine and packages the outcome
//! as a `SearchReport`.
//!
//! # Pipeline
//!
//! ```text
//! policy.validate() → build strategy → world.start()
//!   → search() → render solution path
//!   → SearchGraph canonical bytes + digest
//!   → report canonical bytes + digest
//! ```
//!
//! The runner owns hashing and rendering. Worlds only describe the problem.

use treesearch::canon::{canonical_json_bytes, float_repr, CanonError};
use treesearch::hash::{canonical_hash, ContentHash, HashDomain};
use treesearch::strategy::DEFAULT_BEAM_WIDTH;
use treesearch::{
    search, AStar, Beam, NodeOf, SearchError, SearchPolicy, SearchProblem, SearchResult,
};

use crate::cancel::{CancelFlag, Cancellable};
use crate::contract::SearchWorld;

/// Schema tag written into every report.
pub const REPORT_SCHEMA_VERSION: &str = "search_report.v1";

/// Which ordering strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyConfig {
    /// Unbounded A*.
    #[default]
    AStar,
    /// A*-beam keeping at most `width` fringe entries. With `fallback`, an
    /// exhausted beam restarts from the start node under A* within the same
    /// policy.
    Beam { width: usize, fallback: bool },
}

impl StrategyConfig {
    /// Beam of the given width without fallback.
    #[must_use]
    pub fn beam(width: usize) -> Self {
        Self::Beam {
            width,
            fallback: false,
        }
    }

    /// Beam of [`DEFAULT_BEAM_WIDTH`] without fallback.
    #[must_use]
    pub fn default_beam() -> Self {
        Self::beam(DEFAULT_BEAM_WIDTH)
    }

    fn to_json_value(self) -> serde_json::Value {
        match self {
            Self::AStar => serde_json::json!({"kind": "astar"}),
            Self::Beam { width, fallback } => {
                serde_json::json!({"fallback": fallback, "kind": "astar_beam", "width": width})
            }
        }
    }
}

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// Pre-flight validation of the strategy or policy failed.
    Search(SearchError),
    /// Canonical JSON serialization failed.
    Canon(CanonError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search(e) => write!(f, "search failed: {e}"),
            Self::Canon(e) => write!(f, "report serialization failed: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search(e) => Some(e),
            Self::Canon(e) => Some(e),
        }
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<CanonError> for RunError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

/// One node on the rendered solution path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    pub depth: u32,
    pub state: String,
    /// `None` for a start node built without an action.
    pub action: Option<String>,
    /// Cumulative cost at this node.
    pub cost: f64,
}

/// The packaged outcome of one run.
///
/// `report_bytes` is the canonical JSON of everything except the search
/// graph itself, which it binds by digest.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub world_id: String,
    pub strategy_id: String,
    /// Stable identifier of the termination reason.
    pub termination: &'static str,
    /// Rendered path from the start to the result node; empty if unsolved.
    pub path: Vec<PathStep>,
    /// Cost of the result node, if any.
    pub cost: Option<f64>,
    /// Canonical JSON of the search graph (`search_graph.json`).
    pub graph_bytes: Vec<u8>,
    pub graph_digest: ContentHash,
    /// Digest of the run configuration (world, strategy, policy).
    pub config_digest: ContentHash,
    /// Canonical JSON of the report (`report.json`).
    pub report_bytes: Vec<u8>,
    pub report_digest: ContentHash,
}

impl SearchReport {
    /// Whether the run produced a solution node.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.cost.is_some()
    }

    /// Rendered states along the path.
    #[must_use]
    pub fn route(&self) -> Vec<&str> {
        self.path.iter().map(|s| s.state.as_str()).collect()
    }
}

/// Run `world` under `strategy` and `policy`.
///
/// # Errors
///
/// Returns [`RunError::Search`] for an invalid beam width or policy (no search
/// step is taken), or [`RunError::Canon`] if report serialization fails.
pub fn run_search<W>(
    world: &W,
    strategy: StrategyConfig,
    policy: &SearchPolicy,
) -> Result<SearchReport, RunError>
where
    W: SearchWorld + ?Sized,
{
    let result = execute(world, world, strategy, policy)?;
    package(world, strategy, policy, &result)
}

/// Like [`run_search`], but stops expanding once `cancel` is raised.
///
/// A cancelled run drains its fringe and reports `fringe_exhausted` (or
/// `goal_reached` if a goal was already queued at the front).
///
/// # Errors
///
/// Same as [`run_search`].
pub fn run_search_cancellable<W>(
    world: &W,
    strategy: StrategyConfig,
    policy: &SearchPolicy,
    cancel: &CancelFlag,
) -> Result<SearchReport, RunError>
where
    W: SearchWorld,
{
    let problem = Cancellable::new(world, cancel.clone());
    let result = execute(world, &problem, strategy, policy)?;
    if cancel.is_cancelled() {
        tracing::info!(world = world.world_id(), "search run cancelled");
    }
    package(world, strategy, policy, &result)
}

/// Build the strategy and run the engine on `problem`.
fn execute<W, P>(
    world: &W,
    problem: &P,
    strategy: StrategyConfig,
    policy: &SearchPolicy,
) -> Result<SearchResult<W::State, W::Action>, SearchError>
where
    W: SearchWorld + ?Sized,
    P: SearchProblem<State = W::State, Action = W::Action> + ?Sized,
{
    let start: NodeOf<W> = world.start();
    match strategy {
        StrategyConfig::AStar => search(start, problem, &AStar, policy),
        StrategyConfig::Beam { width, fallback } => {
            let beam = Beam::new(width)?;
            let beam = if fallback {
                beam.with_astar_fallback()
            } else {
                beam
            };
            search(start, problem, &beam, policy)
        }
    }
}

fn package<W>(
    world: &W,
    strategy: StrategyConfig,
    policy: &SearchPolicy,
    result: &SearchResult<W::State, W::Action>,
) -> Result<SearchReport, RunError>
where
    W: SearchWorld + ?Sized,
{
    let path: Vec<PathStep> = result
        .solution_path()
        .unwrap_or_default()
        .into_iter()
        .map(|node| PathStep {
            depth: node.depth(),
            state: world.render_state(node.state()),
            action: node.action().map(|a| world.render_action(a)),
            cost: node.cost(),
        })
        .collect();
    let cost = result.goal.as_ref().map(|g| g.cost());
    let metadata = &result.graph.metadata;

    let graph_bytes = result.graph.to_canonical_json_bytes()?;
    let graph_digest = canonical_hash(HashDomain::SearchGraph, &graph_bytes);

    let config = serde_json::json!({
        "policy": policy_to_json(policy),
        "strategy": strategy.to_json_value(),
        "world_id": world.world_id(),
    });
    let config_bytes = canonical_json_bytes(&config)?;
    let config_digest = canonical_hash(HashDomain::RunConfig, &config_bytes);

    let report = serde_json::json!({
        "config": config,
        "config_digest": config_digest.as_str(),
        "cost": cost.map(float_repr),
        "path": path.iter().map(path_step_to_json).collect::<Vec<_>>(),
        "schema_version": REPORT_SCHEMA_VERSION,
        "search_graph_digest": graph_digest.as_str(),
        "strategy_id": metadata.strategy_id,
        "termination": metadata.termination_reason.as_str(),
        "total_expansions": metadata.total_expansions,
        "world_id": world.world_id(),
    });
    let report_bytes = canonical_json_bytes(&report)?;
    let report_digest = canonical_hash(HashDomain::SearchReport, &report_bytes);

    tracing::info!(
        world = world.world_id(),
        strategy = %metadata.strategy_id,
        termination = metadata.termination_reason.as_str(),
        expansions = metadata.total_expansions,
        cost = ?cost,
        digest = %report_digest,
        "search run finished"
    );

    Ok(SearchReport {
        world_id: world.world_id().to_string(),
        strategy_id: metadata.strategy_id.clone(),
        termination: metadata.termination_reason.as_str(),
        path,
        cost,
        graph_bytes,
        graph_digest,
        config_digest,
        report_bytes,
        report_digest,
    })
}

fn policy_to_json(policy: &SearchPolicy) -> serde_json::Value {
    serde_json::json!({
        "duplicate_filter": policy.duplicate_filter.as_str(),
        "max_depth": policy.max_depth,
        "max_expansions": policy.max_expansions,
    })
}

fn path_step_to_json(step: &PathStep) -> serde_json::Value {
    serde_json::json!({
        "action": step.action,
        "cost": float_repr(step.cost),
        "depth": step.depth,
        "state": step.state,
    })
}
