//! The Romania road map: the classic route-finding benchmark.
//!
//! Twenty cities, road lengths in kilometres, and the straight-line distance
//! to Bucharest as the (admissible) heuristic. The optimal Arad → Bucharest
//! route is Arad, Sibiu, Rimnicu Vilcea, Pitesti, Bucharest at 418 km.

use super::weighted_graph::{GraphBuilder, WeightedGraphWorld};

/// Straight-line distance to Bucharest.
const CITIES: [(&str, f64); 20] = [
    ("Arad", 366.0),
    ("Bucharest", 0.0),
    ("Craiova", 160.0),
    ("Dobreta", 242.0),
    ("Eforie", 161.0),
    ("Fagaras", 176.0),
    ("Giurgiu", 77.0),
    ("Hirsova", 151.0),
    ("Iasi", 226.0),
    ("Lugoj", 244.0),
    ("Mehadia", 241.0),
    ("Neamt", 234.0),
    ("Oradea", 380.0),
    ("Pitesti", 100.0),
    ("Rimnicu Vilcea", 193.0),
    ("Sibiu", 253.0),
    ("Timisoara", 329.0),
    ("Urziceni", 80.0),
    ("Vaslui", 199.0),
    ("Zerind", 374.0),
];

/// Undirected roads, as indices into [`CITIES`].
const ROADS: [(usize, usize, f64); 23] = [
    (0, 19, 75.0),   // Arad - Zerind
    (0, 15, 140.0),  // Arad - Sibiu
    (0, 16, 118.0),  // Arad - Timisoara
    (12, 19, 71.0),  // Oradea - Zerind
    (12, 15, 151.0), // Oradea - Sibiu
    (15, 14, 80.0),  // Sibiu - Rimnicu Vilcea
    (15, 5, 99.0),   // Sibiu - Fagaras
    (5, 1, 211.0),   // Fagaras - Bucharest
    (16, 9, 111.0),  // Timisoara - Lugoj
    (9, 10, 70.0),   // Lugoj - Mehadia
    (10, 3, 75.0),   // Mehadia - Dobreta
    (3, 2, 120.0),   // Dobreta - Craiova
    (2, 14, 146.0),  // Craiova - Rimnicu Vilcea
    (2, 13, 138.0),  // Craiova - Pitesti
    (14, 13, 97.0),  // Rimnicu Vilcea - Pitesti
    (13, 1, 101.0),  // Pitesti - Bucharest
    (1, 6, 90.0),    // Bucharest - Giurgiu
    (1, 17, 85.0),   // Bucharest - Urziceni
    (17, 7, 98.0),   // Urziceni - Hirsova
    (17, 18, 142.0), // Urziceni - Vaslui
    (7, 4, 86.0),    // Hirsova - Eforie
    (18, 8, 92.0),   // Vaslui - Iasi
    (8, 11, 87.0),   // Iasi - Neamt
];

const START: usize = 0; // Arad
const GOAL: usize = 1; // Bucharest

/// World id of [`romania`].
pub const ROMANIA_WORLD_ID: &str = "romania";

/// Optimal Arad → Bucharest distance.
pub const ROMANIA_OPTIMAL_COST: f64 = 418.0;

/// The Romania map with the Arad → Bucharest route.
#[must_use]
pub fn romania() -> WeightedGraphWorld {
    let mut g = GraphBuilder::new(ROMANIA_WORLD_ID);
    let ids: Vec<_> = CITIES
        .iter()
        .map(|&(name, estimate)| g.location(name, estimate))
        .collect();
    for &(a, b, km) in &ROADS {
        g.road(ids[a], ids[b], km);
    }
    g.build(ids[START], ids[GOAL])
}
