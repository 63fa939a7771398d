//! Seeded random weighted graphs with a brute-force oracle.
//!
//! Costs are small whole numbers so path sums compare exactly. The
//! heuristic is a fraction of the exact remaining distance, which keeps it
//! admissible; `HeuristicScale::Exact` is also consistent.

use std::rc::Rc;

use treesearch::{Node, SearchProblem};

/// xorshift64*: deterministic, dependency-free, good enough for fixtures.
#[derive(Debug, Clone)]
pub struct Rng(u64);

impl Rng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform-ish in `0..bound`.
    pub fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

/// How much of the exact remaining distance the heuristic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicScale {
    Zero,
    /// A per-node fraction in quarters, chosen by the seed. Admissible but
    /// generally inconsistent.
    RandomFraction,
    Exact,
}

/// A directed graph over `0..n`, searched from 0 to `n - 1`.
#[derive(Debug, Clone)]
pub struct RandomGraph {
    pub edges: Vec<Vec<(usize, f64)>>,
    pub heuristic: Vec<f64>,
}

impl RandomGraph {
    /// `n` nodes. Forward edges `i -> j` (`i < j`) appear with probability
    /// about one half; with `cyclic`, each also gets a reverse edge with the
    /// same probability.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn generate(seed: u64, n: usize, cyclic: bool, scale: HeuristicScale) -> Self {
        let mut rng = Rng::new(seed);
        let mut edges = vec![Vec::new(); n];
        for i in 0..n {
            for j in i + 1..n {
                if rng.below(2) == 0 {
                    edges[i].push((j, (1 + rng.below(9)) as f64));
                }
                if cyclic && rng.below(2) == 0 {
                    edges[j].push((i, (1 + rng.below(9)) as f64));
                }
            }
        }

        let mut graph = Self {
            edges,
            heuristic: vec![0.0; n],
        };
        let exact = graph.distances_to_goal();
        graph.heuristic = exact
            .iter()
            .map(|d| match (scale, d) {
                (HeuristicScale::Zero, _) | (_, None) => 0.0,
                (HeuristicScale::Exact, Some(d)) => *d,
                (HeuristicScale::RandomFraction, Some(d)) => {
                    (d * rng.below(5) as f64 / 4.0).floor()
                }
            })
            .collect();
        graph
    }

    #[must_use]
    pub fn goal(&self) -> usize {
        self.edges.len() - 1
    }

    /// Exact shortest distance from each node to the goal (Bellman-Ford).
    #[must_use]
    pub fn distances_to_goal(&self) -> Vec<Option<f64>> {
        let n = self.edges.len();
        let mut dist: Vec<Option<f64>> = vec![None; n];
        dist[self.goal()] = Some(0.0);
        for _ in 0..n {
            for from in 0..n {
                for &(to, cost) in &self.edges[from] {
                    if let Some(d) = dist[to] {
                        if !dist[from].is_some_and(|cur| cur <= d + cost) {
                            dist[from] = Some(d + cost);
                        }
                    }
                }
            }
        }
        dist
    }

    /// Cheapest cost from 0 to the goal over all simple paths.
    #[must_use]
    pub fn brute_force_cost(&self) -> Option<f64> {
        fn walk(g: &RandomGraph, at: usize, cost: f64, seen: &mut Vec<bool>, best: &mut Option<f64>) {
            if at == g.goal() {
                if !best.is_some_and(|b| b <= cost) {
                    *best = Some(cost);
                }
                return;
            }
            for &(to, step) in &g.edges[at] {
                if !seen[to] {
                    seen[to] = true;
                    walk(g, to, cost + step, seen, best);
                    seen[to] = false;
                }
            }
        }

        let mut seen = vec![false; self.edges.len()];
        seen[0] = true;
        let mut best = None;
        walk(self, 0, 0.0, &mut seen, &mut best);
        best
    }
}

impl SearchProblem for RandomGraph {
    type State = usize;
    type Action = (usize, usize);

    fn successors(&self, node: &Rc<Node<usize, (usize, usize)>>) -> Vec<Node<usize, (usize, usize)>> {
        let from = *node.state();
        self.edges[from]
            .iter()
            .map(|&(to, cost)| Node::child(node, to, cost, (from, to)))
            .collect()
    }

    fn is_goal(&self, node: &Node<usize, (usize, usize)>) -> bool {
        *node.state() == self.goal()
    }

    fn heuristic(&self, state: &usize) -> f64 {
        self.heuristic[*state]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_seeded() {
        let a = RandomGraph::generate(7, 8, true, HeuristicScale::RandomFraction);
        let b = RandomGraph::generate(7, 8, true, HeuristicScale::RandomFraction);
        assert_eq!(a.edges, b.edges);
        assert_eq!(a.heuristic, b.heuristic);
    }

    #[test]
    fn heuristic_is_admissible() {
        for seed in 0..20 {
            let g = RandomGraph::generate(seed, 8, true, HeuristicScale::RandomFraction);
            for (h, d) in g.heuristic.iter().zip(g.distances_to_goal()) {
                assert!(*h <= d.unwrap_or(f64::INFINITY), "seed {seed}");
            }
        }
    }

    #[test]
    fn exact_distance_matches_brute_force_from_start() {
        for seed in 0..20 {
            let g = RandomGraph::generate(seed, 7, false, HeuristicScale::Exact);
            assert_eq!(g.distances_to_goal()[0], g.brute_force_cost(), "seed {seed}");
        }
    }
}
