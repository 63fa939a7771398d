//! A*-beam locks: the fringe never exceeds the beam width after an
//! insertion, pruning is accounted for, and the fallback restores
//! completeness.

use lock_tests::random_graph::{HeuristicScale, RandomGraph};
use treesearch::{astar, search, Beam, Node, SearchPolicy, TerminationReason};
use treesearch_harness::contract::SearchWorld;
use treesearch_harness::worlds::grid_maze::GridMaze;

#[test]
fn fringe_never_exceeds_width_after_insert() {
    for seed in 0..40 {
        for width in 1..=4 {
            let graph = RandomGraph::generate(seed, 9, true, HeuristicScale::RandomFraction);
            let beam = Beam::new(width).unwrap();
            let result = search(Node::root(0), &graph, &beam, &SearchPolicy::default()).unwrap();
            for event in &result.graph.expansions {
                assert!(
                    event.fringe_len_after <= width as u64,
                    "seed {seed}, width {width}: fringe {}",
                    event.fringe_len_after
                );
            }
        }
    }
}

#[test]
fn pruned_entries_are_counted() {
    let maze = GridMaze::open(10, 10);
    let beam = Beam::new(2).unwrap();
    let result = search(maze.start(), &maze, &beam, &SearchPolicy::default()).unwrap();
    let meta = &result.graph.metadata;
    let per_event: u64 = result.graph.expansions.iter().map(|e| e.pruned).sum();
    assert_eq!(meta.total_pruned, per_event);
    assert!(meta.total_pruned > 0);
    assert!(meta.fringe_high_water <= 2);
}

#[test]
fn beam_cost_is_never_below_astar() {
    for seed in 0..40 {
        let graph = RandomGraph::generate(seed, 9, false, HeuristicScale::RandomFraction);
        let Some(optimal) = astar(Node::root(0), &graph) else {
            continue;
        };
        let beam = Beam::new(1).unwrap();
        let result = search(Node::root(0), &graph, &beam, &SearchPolicy::default()).unwrap();
        if let Some(found) = result.goal {
            assert!(found.cost() >= optimal.cost(), "seed {seed}");
        }
    }
}

#[test]
fn fallback_recovers_whenever_astar_succeeds() {
    for seed in 0..40 {
        let graph = RandomGraph::generate(seed, 9, false, HeuristicScale::Zero);
        let beam = Beam::new(1).unwrap().with_astar_fallback();
        let result = search(Node::root(0), &graph, &beam, &SearchPolicy::default()).unwrap();
        assert_eq!(
            result.goal.is_some(),
            graph.brute_force_cost().is_some(),
            "seed {seed}"
        );
        if let TerminationReason::FringeExhausted { recovered } = result.graph.metadata.termination_reason {
            assert_eq!(recovered, result.goal.is_some());
        }
    }
}

#[test]
fn narrow_beam_walks_the_serpentine() {
    // The corridor never branches usefully, so a width-1 beam still solves it.
    let maze = GridMaze::serpentine(8, 4);
    let goal = treesearch::astar_beam(maze.start(), &maze, 1).unwrap().unwrap();
    let optimal = astar(maze.start(), &maze).unwrap();
    assert!((goal.cost() - optimal.cost()).abs() < f64::EPSILON);
}
