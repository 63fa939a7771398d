//! Engine properties over seeded random graphs: optimality, termination,
//! ancestor-free paths, and the depth / path-reconstruction invariants.

use lock_tests::random_graph::{HeuristicScale, RandomGraph};
use treesearch::{
    search, AStar, DuplicateFilter, Node, SearchPolicy, SearchResult, TerminationReason,
};

const SEEDS: std::ops::Range<u64> = 0..60;

fn run(graph: &RandomGraph, policy: &SearchPolicy) -> SearchResult<usize, (usize, usize)> {
    search(Node::root(0), graph, &AStar, policy).unwrap()
}

#[test]
fn astar_is_optimal_on_dags_with_admissible_heuristics() {
    for seed in SEEDS {
        for scale in [
            HeuristicScale::Zero,
            HeuristicScale::RandomFraction,
            HeuristicScale::Exact,
        ] {
            let graph = RandomGraph::generate(seed, 8, false, scale);
            let result = run(&graph, &SearchPolicy::default());
            let found = result.goal.as_ref().map(|g| g.cost());
            assert_eq!(found, graph.brute_force_cost(), "seed {seed}, {scale:?}");
        }
    }
}

#[test]
fn astar_is_optimal_on_cyclic_graphs() {
    for seed in SEEDS {
        let graph = RandomGraph::generate(seed, 7, true, HeuristicScale::RandomFraction);
        let result = run(&graph, &SearchPolicy::default());
        let found = result.goal.as_ref().map(|g| g.cost());
        assert_eq!(found, graph.brute_force_cost(), "seed {seed}");
    }
}

#[test]
fn closed_set_is_optimal_with_consistent_heuristic() {
    let policy = SearchPolicy {
        duplicate_filter: DuplicateFilter::ClosedSet,
        ..SearchPolicy::default()
    };
    for seed in SEEDS {
        let graph = RandomGraph::generate(seed, 8, true, HeuristicScale::Exact);
        let result = run(&graph, &policy);
        let found = result.goal.as_ref().map(|g| g.cost());
        assert_eq!(found, graph.brute_force_cost(), "seed {seed}");
    }
}

#[test]
fn search_terminates_on_finite_cyclic_spaces() {
    for seed in SEEDS {
        let graph = RandomGraph::generate(seed, 7, true, HeuristicScale::Zero);
        let result = run(&graph, &SearchPolicy::default());
        let meta = &result.graph.metadata;
        match meta.termination_reason {
            TerminationReason::GoalReached { .. } => assert!(result.goal.is_some()),
            TerminationReason::FringeExhausted { recovered } => {
                assert!(!recovered);
                assert!(result.goal.is_none());
            }
            TerminationReason::ExpansionBudgetExceeded => panic!("no budget was set"),
        }
        assert_eq!(
            meta.total_pops,
            meta.total_expansions + meta.total_not_expanded + u64::from(result.goal.is_some())
        );
    }
}

#[test]
fn solution_paths_never_repeat_a_state() {
    for seed in SEEDS {
        let graph = RandomGraph::generate(seed, 8, true, HeuristicScale::RandomFraction);
        let Some(goal) = run(&graph, &SearchPolicy::default()).goal else {
            continue;
        };
        let states: Vec<usize> = goal.ancestors().map(|n| *n.state()).collect();
        for (i, s) in states.iter().enumerate() {
            assert!(!states[i + 1..].contains(s), "seed {seed}: state {s} repeats");
        }
    }
}

#[test]
fn parent_walk_reaches_root_in_depth_steps() {
    for seed in SEEDS {
        let graph = RandomGraph::generate(seed, 8, true, HeuristicScale::Exact);
        let Some(goal) = run(&graph, &SearchPolicy::default()).goal else {
            continue;
        };
        let mut steps = 0;
        let mut node = goal.as_ref();
        while let Some(parent) = node.parent() {
            assert_eq!(node.depth(), parent.depth() + 1);
            assert!(node.cost() >= parent.cost());
            node = parent.as_ref();
            steps += 1;
        }
        assert!(node.is_root());
        assert_eq!(node.depth(), 0);
        assert_eq!(steps, goal.depth());
        assert_eq!(goal.path().len(), goal.depth() as usize + 1);
    }
}

#[test]
fn expansion_events_are_ordered_and_counted() {
    for seed in SEEDS {
        let graph = RandomGraph::generate(seed, 8, true, HeuristicScale::RandomFraction);
        let result = run(&graph, &SearchPolicy::default());
        let meta = &result.graph.metadata;
        assert_eq!(result.graph.expansions.len() as u64, meta.total_expansions);
        for (i, event) in result.graph.expansions.iter().enumerate() {
            assert_eq!(event.expansion_order, i as u64);
            assert_eq!(
                event.candidates_generated,
                event.inserted + event.suppressed.total(),
                "seed {seed}"
            );
            assert!(event.fringe_len_after <= meta.fringe_high_water);
        }
    }
}

#[test]
fn expansion_budget_caps_work() {
    for seed in SEEDS {
        let graph = RandomGraph::generate(seed, 8, true, HeuristicScale::Zero);
        let policy = SearchPolicy {
            max_expansions: Some(3),
            ..SearchPolicy::default()
        };
        let result = run(&graph, &policy);
        assert!(result.graph.metadata.total_expansions <= 3);
    }
}
