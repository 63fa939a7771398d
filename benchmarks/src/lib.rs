//! Shared helpers for treesearch benchmark suites.

use treesearch::{search, AStar, Beam, DuplicateFilter, SearchPolicy, SearchResult};
use treesearch_harness::contract::SearchWorld;
use treesearch_harness::runner::StrategyConfig;
use treesearch_harness::worlds::grid_maze::{Cell, GridMaze, Move};

/// A named maze + strategy + policy combination.
pub struct Regime {
    pub name: &'static str,
    pub maze: GridMaze,
    pub strategy: StrategyConfig,
    pub policy: SearchPolicy,
}

fn closed_set() -> SearchPolicy {
    SearchPolicy {
        duplicate_filter: DuplicateFilter::ClosedSet,
        ..SearchPolicy::default()
    }
}

/// The standard regime set.
///
/// - `open_astar`: wide fringe, many equal-`f` ties
/// - `open_beam`: same maze with the fringe capped
/// - `open_closed_set`: same maze with expanded-state filtering
/// - `serpentine_astar`: long single corridor, deep lineage checks
/// - `serpentine_beam`: corridor under a width-1 beam
#[must_use]
pub fn regimes() -> Vec<Regime> {
    vec![
        Regime {
            name: "open_astar",
            maze: GridMaze::open(24, 24),
            strategy: StrategyConfig::AStar,
            policy: SearchPolicy::default(),
        },
        Regime {
            name: "open_beam",
            maze: GridMaze::open(24, 24),
            strategy: StrategyConfig::beam(16),
            policy: SearchPolicy::default(),
        },
        Regime {
            name: "open_closed_set",
            maze: GridMaze::open(24, 24),
            strategy: StrategyConfig::AStar,
            policy: closed_set(),
        },
        Regime {
            name: "serpentine_astar",
            maze: GridMaze::serpentine(32, 12),
            strategy: StrategyConfig::AStar,
            policy: SearchPolicy::default(),
        },
        Regime {
            name: "serpentine_beam",
            maze: GridMaze::serpentine(32, 12),
            strategy: StrategyConfig::beam(1),
            policy: SearchPolicy::default(),
        },
    ]
}

/// Run the engine alone, skipping report rendering and hashing.
///
/// # Panics
///
/// Panics if the regime's strategy or policy is invalid. Benchmark regimes
/// are expected to be well-formed.
#[must_use]
pub fn run_engine_only(regime: &Regime) -> SearchResult<Cell, Move> {
    let start = regime.maze.start();
    let result = match regime.strategy {
        StrategyConfig::AStar => search(start, &regime.maze, &AStar, &regime.policy),
        StrategyConfig::Beam { width, fallback } => {
            let beam = Beam::new(width).expect("valid beam width");
            let beam = if fallback {
                beam.with_astar_fallback()
            } else {
                beam
            };
            search(start, &regime.maze, &beam, &regime.policy)
        }
    };
    result.expect("search should succeed in benchmarks")
}
