//! `WeightedGraphWorld`: route finding over named locations joined by
//! undirected roads, with a per-location heuristic table.
//!
//! Locations are referred to by [`LocationId`] handles issued by the
//! [`GraphBuilder`]. A handle from a different world is not rejected by the
//! type system, so lookups on a built world return `Option` or an empty
//! neighbor list instead of indexing blindly.

use std::rc::Rc;

use treesearch::{Node, SearchProblem};

use crate::contract::SearchWorld;

/// Handle to a location in one [`WeightedGraphWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(usize);

impl LocationId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Travel along one road.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Road {
    pub from: LocationId,
    pub to: LocationId,
}

#[derive(Debug, Clone)]
struct Location {
    name: String,
    /// Estimated remaining cost to the goal.
    estimate: f64,
    /// Outgoing roads in declaration order.
    neighbors: Vec<(LocationId, f64)>,
}

/// Incrementally declares locations and roads.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    world_id: String,
    locations: Vec<Location>,
}

impl GraphBuilder {
    #[must_use]
    pub fn new(world_id: impl Into<String>) -> Self {
        Self {
            world_id: world_id.into(),
            locations: Vec::new(),
        }
    }

    /// Declare a location with its heuristic estimate to the goal.
    pub fn location(&mut self, name: impl Into<String>, estimate: f64) -> LocationId {
        self.locations.push(Location {
            name: name.into(),
            estimate,
            neighbors: Vec::new(),
        });
        LocationId(self.locations.len() - 1)
    }

    /// Declare an undirected road of length `cost` (must be non-negative).
    ///
    /// Each endpoint lists the other in the order roads are declared, which
    /// fixes successor order.
    ///
    /// # Panics
    ///
    /// Panics if either id was not issued by this builder.
    pub fn road(&mut self, a: LocationId, b: LocationId, cost: f64) -> &mut Self {
        self.locations[a.0].neighbors.push((b, cost));
        self.locations[b.0].neighbors.push((a, cost));
        self
    }

    /// Finish the graph with a route from `start` to `goal`.
    #[must_use]
    pub fn build(self, start: LocationId, goal: LocationId) -> WeightedGraphWorld {
        WeightedGraphWorld {
            world_id: self.world_id,
            locations: self.locations,
            start,
            goal,
        }
    }
}

/// A route-finding world over a weighted undirected graph.
#[derive(Debug, Clone)]
pub struct WeightedGraphWorld {
    world_id: String,
    locations: Vec<Location>,
    start: LocationId,
    goal: LocationId,
}

impl WeightedGraphWorld {
    /// Look a location up by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<LocationId> {
        self.locations
            .iter()
            .position(|l| l.name == name)
            .map(LocationId)
    }

    /// Name of `id`, or `None` if this world never issued it.
    #[must_use]
    pub fn name(&self, id: LocationId) -> Option<&str> {
        self.locations.get(id.0).map(|l| l.name.as_str())
    }

    #[must_use]
    pub fn start_location(&self) -> LocationId {
        self.start
    }

    #[must_use]
    pub fn goal_location(&self) -> LocationId {
        self.goal
    }

    /// Outgoing roads from `id` with their lengths. Unknown ids have none.
    pub fn neighbors(&self, id: LocationId) -> impl Iterator<Item = (LocationId, f64)> + '_ {
        self.locations
            .get(id.0)
            .into_iter()
            .flat_map(|l| l.neighbors.iter().copied())
    }

    fn label(&self, id: LocationId) -> String {
        match self.name(id) {
            Some(name) => name.to_string(),
            None => format!("#{}", id.0),
        }
    }

    #[must_use]
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// The same graph with a different start location.
    #[must_use]
    pub fn with_start(mut self, start: LocationId) -> Self {
        self.start = start;
        self
    }
}

impl SearchProblem for WeightedGraphWorld {
    type State = LocationId;
    type Action = Road;

    fn successors(&self, node: &Rc<Node<LocationId, Road>>) -> Vec<Node<LocationId, Road>> {
        let from = *node.state();
        self.neighbors(from)
            .map(|(to, cost)| Node::child(node, to, cost, Road { from, to }))
            .collect()
    }

    fn is_goal(&self, node: &Node<LocationId, Road>) -> bool {
        *node.state() == self.goal
    }

    fn heuristic(&self, state: &LocationId) -> f64 {
        self.locations.get(state.0).map_or(0.0, |l| l.estimate)
    }
}

impl SearchWorld for WeightedGraphWorld {
    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn start(&self) -> Node<LocationId, Road> {
        Node::root(self.start)
    }

    fn render_state(&self, state: &LocationId) -> String {
        self.label(*state)
    }

    fn render_action(&self, action: &Road) -> String {
        format!("{} to {}", self.label(action.from), self.label(action.to))
    }
}
