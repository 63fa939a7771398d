//! Cancellation through the expand predicate: a raised flag stops an
//! otherwise unbounded search, and the report says so.

use std::rc::Rc;

use treesearch::{Node, NodeOf, SearchPolicy, SearchProblem};
use treesearch_harness::cancel::CancelFlag;
use treesearch_harness::contract::SearchWorld;
use treesearch_harness::runner::{run_search_cancellable, StrategyConfig};
use treesearch_harness::worlds::grid_maze::{Cell, GridMaze, Move};

/// A maze whose goal is unreachable; raises the flag after `limit`
/// expansions.
struct Tripwire {
    maze: GridMaze,
    flag: CancelFlag,
    limit: usize,
    expanded: std::cell::Cell<usize>,
}

impl SearchProblem for Tripwire {
    type State = Cell;
    type Action = Move;

    fn successors(&self, node: &Rc<NodeOf<Self>>) -> Vec<NodeOf<Self>> {
        self.expanded.set(self.expanded.get() + 1);
        if self.expanded.get() == self.limit {
            self.flag.cancel();
        }
        self.maze.successors(node)
    }

    fn is_goal(&self, node: &NodeOf<Self>) -> bool {
        self.maze.is_goal(node)
    }

    fn heuristic(&self, state: &Cell) -> f64 {
        self.maze.heuristic(state)
    }
}

impl SearchWorld for Tripwire {
    fn world_id(&self) -> &str {
        "tripwire"
    }

    fn start(&self) -> Node<Cell, Move> {
        self.maze.start()
    }

    fn render_state(&self, state: &Cell) -> String {
        self.maze.render_state(state)
    }

    fn render_action(&self, action: &Move) -> String {
        self.maze.render_action(action)
    }
}

fn walled_off() -> GridMaze {
    // The goal sits behind a full wall column.
    GridMaze::parse(
        "walled_off",
        "
        S.....#G
        ......#.
        ......#.
        ......#.
        ",
    )
    .unwrap()
}

#[test]
fn flag_stops_search_after_limit() {
    let flag = CancelFlag::new();
    let world = Tripwire {
        maze: walled_off(),
        flag: flag.clone(),
        limit: 5,
        expanded: std::cell::Cell::new(0),
    };
    let report =
        run_search_cancellable(&world, StrategyConfig::AStar, &SearchPolicy::default(), &flag)
            .unwrap();

    assert!(flag.is_cancelled());
    assert!(!report.is_solved());
    assert_eq!(report.termination, "fringe_exhausted");
    assert_eq!(world.expanded.get(), 5);

    let graph: serde_json::Value = serde_json::from_slice(&report.graph_bytes).unwrap();
    assert_eq!(graph["metadata"]["total_expansions"], 5);
}

#[test]
fn unraised_flag_changes_nothing() {
    let flag = CancelFlag::new();
    let maze = GridMaze::serpentine(6, 3);
    let plain = treesearch_harness::runner::run_search(
        &maze,
        StrategyConfig::AStar,
        &SearchPolicy::default(),
    )
    .unwrap();
    let guarded =
        run_search_cancellable(&maze, StrategyConfig::AStar, &SearchPolicy::default(), &flag)
            .unwrap();
    assert_eq!(plain.graph_bytes, guarded.graph_bytes);
    assert_eq!(plain.report_digest, guarded.report_digest);
}
