//! Romania route lock: Arad → Bucharest under every engine configuration
//! that is supposed to find the optimum.

use std::rc::Rc;

use treesearch::{astar, search, AStar, Beam, DuplicateFilter, Node, SearchPolicy, SearchProblem};
use treesearch_harness::contract::SearchWorld;
use treesearch_harness::worlds::romania::{romania, ROMANIA_OPTIMAL_COST};
use treesearch_harness::worlds::weighted_graph::{LocationId, Road, WeightedGraphWorld};

const OPTIMAL_ROUTE: [&str; 5] = ["Arad", "Sibiu", "Rimnicu Vilcea", "Pitesti", "Bucharest"];

fn route(world: &WeightedGraphWorld, goal: &Node<LocationId, Road>) -> Vec<String> {
    goal.path()
        .iter()
        .map(|n| world.render_state(n.state()))
        .collect()
}

fn assert_optimal(world: &WeightedGraphWorld, goal: &Node<LocationId, Road>) {
    assert!(
        (goal.cost() - ROMANIA_OPTIMAL_COST).abs() < f64::EPSILON,
        "cost {} != 418",
        goal.cost()
    );
    assert_eq!(route(world, goal), OPTIMAL_ROUTE);
}

/// Romania with the heuristic switched off (uniform-cost search).
struct Blind(WeightedGraphWorld);

impl SearchProblem for Blind {
    type State = LocationId;
    type Action = Road;

    fn successors(&self, node: &Rc<Node<LocationId, Road>>) -> Vec<Node<LocationId, Road>> {
        self.0.successors(node)
    }

    fn is_goal(&self, node: &Node<LocationId, Road>) -> bool {
        self.0.is_goal(node)
    }

    fn heuristic(&self, _state: &LocationId) -> f64 {
        0.0
    }
}

#[test]
fn astar_finds_418() {
    let world = romania();
    let goal = astar(world.start(), &world).unwrap();
    assert_optimal(&world, &goal);
    assert_eq!(goal.depth(), 4);
}

#[test]
fn actions_name_each_road() {
    let world = romania();
    let goal = astar(world.start(), &world).unwrap();
    let actions: Vec<String> = goal
        .actions()
        .into_iter()
        .map(|a| world.render_action(a))
        .collect();
    assert_eq!(
        actions,
        vec![
            "Arad to Sibiu",
            "Sibiu to Rimnicu Vilcea",
            "Rimnicu Vilcea to Pitesti",
            "Pitesti to Bucharest",
        ]
    );
}

#[test]
fn cheaper_bucharest_replaces_fagaras_route_on_fringe() {
    // Bucharest is first queued via Fagaras at 450; the Pitesti route at 418
    // must evict it rather than be dropped as a duplicate.
    let world = romania();
    let result = search(world.start(), &world, &AStar, &SearchPolicy::default()).unwrap();
    assert!(result.graph.metadata.total_suppressed.fringe_replaced >= 1);
    assert_optimal(&world, result.goal.as_ref().unwrap());
}

#[test]
fn default_beam_matches_astar() {
    let world = romania();
    let result = search(
        world.start(),
        &world,
        &Beam::default_width(),
        &SearchPolicy::default(),
    )
    .unwrap();
    assert_optimal(&world, result.goal.as_ref().unwrap());
    assert_eq!(result.graph.metadata.total_pruned, 0);
}

#[test]
fn uniform_cost_search_also_finds_418() {
    let blind = Blind(romania());
    let goal = astar(blind.0.start(), &blind).unwrap();
    assert_optimal(&blind.0, &goal);
}

#[test]
fn closed_set_with_consistent_heuristic_finds_418() {
    let world = romania();
    let policy = SearchPolicy {
        duplicate_filter: DuplicateFilter::ClosedSet,
        ..SearchPolicy::default()
    };
    let result = search(world.start(), &world, &AStar, &policy).unwrap();
    assert_optimal(&world, result.goal.as_ref().unwrap());
}

#[test]
fn start_at_bucharest_is_immediate() {
    let world = romania();
    let bucharest = world.goal_location();
    let world = world.with_start(bucharest);
    let result = search(world.start(), &world, &AStar, &SearchPolicy::default()).unwrap();
    assert!(result.is_goal_reached());
    assert_eq!(result.graph.metadata.total_pops, 1);
    assert_eq!(result.graph.metadata.total_expansions, 0);
}

#[test]
fn strict_fringe_rule_settles_for_the_first_route_queued() {
    // Fagaras queues Bucharest at 450 before Pitesti reaches it at 418; the
    // strict rule drops the cheaper candidate.
    let world = romania();
    let policy = SearchPolicy {
        duplicate_filter: DuplicateFilter::AncestorsAndFringeStrict,
        ..SearchPolicy::default()
    };
    let result = search(world.start(), &world, &AStar, &policy).unwrap();
    let goal = result.goal.as_ref().unwrap();
    assert!((goal.cost() - 450.0).abs() < f64::EPSILON, "cost {}", goal.cost());
    assert_eq!(route(&world, goal), ["Arad", "Sibiu", "Fagaras", "Bucharest"]);
    assert_eq!(result.graph.metadata.total_suppressed.fringe_replaced, 0);
}
