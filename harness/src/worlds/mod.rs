pub mod grid_maze;
pub mod romania;
pub mod weighted_graph;
