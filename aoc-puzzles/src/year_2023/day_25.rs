//! Snowverload
//!
//! Three wires split the machine, so some pair of components has a maximum
//! flow of exactly three between them. Unit capacity Edmonds-Karp finds such
//! a pair and the residual graph gives one side of the cut.

use crate::utils::text::{lines, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::{HashMap, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2023, day = 25, tags = ["graph", "flow"])]
pub struct Solver;

/// Undirected graph as an edge list plus, per node, `(neighbour, edge)`
pub struct Wiring {
    ends: Vec<(usize, usize)>,
    adjacent: Vec<Vec<(usize, usize)>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Wiring;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut id = |name| {
            let next = index.len();
            *index.entry(name).or_insert(next)
        };
        let mut ends = Vec::new();
        for line in lines(input) {
            let (from, others) = split_once_or(line, ": ")?;
            let a = id(from);
            for to in others.split_whitespace() {
                ends.push((a, id(to)));
            }
        }
        let nodes = index.len();
        let mut adjacent = vec![Vec::new(); nodes];
        for (e, &(a, b)) in ends.iter().enumerate() {
            adjacent[a].push((b, e));
            adjacent[b].push((a, e));
        }
        Ok(Wiring { ends, adjacent })
    }
}

impl Wiring {
    /// Spare capacity from `u` across edge `e`; flow is positive from the
    /// edge's first end to its second
    fn spare(&self, flow: &[i8], u: usize, e: usize) -> i8 {
        if self.ends[e].0 == u { 1 - flow[e] } else { 1 + flow[e] }
    }

    /// Shortest path with spare capacity, as the parent edge of every node
    /// reached. Stops early once `sink` is reached.
    fn search(&self, flow: &[i8], source: usize, sink: Option<usize>) -> Vec<Option<(usize, usize)>> {
        let mut parent = vec![None; self.adjacent.len()];
        let mut seen = vec![false; self.adjacent.len()];
        seen[source] = true;
        let mut queue = VecDeque::from([source]);
        while let Some(u) = queue.pop_front() {
            if Some(u) == sink {
                break;
            }
            for &(v, e) in &self.adjacent[u] {
                if !seen[v] && self.spare(flow, u, e) > 0 {
                    seen[v] = true;
                    parent[v] = Some((u, e));
                    queue.push_back(v);
                }
            }
        }
        parent
    }

    /// Size of the source side if the max flow to `sink` is exactly `cut`
    fn cut_side(&self, source: usize, sink: usize, cut: usize) -> Option<usize> {
        let mut flow = vec![0i8; self.ends.len()];
        for _ in 0..cut {
            let parent = self.search(&flow, source, Some(sink));
            parent[sink]?;
            let mut v = sink;
            while let Some((u, e)) = parent[v] {
                flow[e] += if self.ends[e].0 == u { 1 } else { -1 };
                v = u;
            }
        }
        // anything still reachable means the flow exceeds `cut`
        let parent = self.search(&flow, source, None);
        if parent[sink].is_some() {
            return None;
        }
        Some(1 + parent.iter().filter(|p| p.is_some()).count())
    }
}

impl PartSolver<1> for Solver {
    /// The source has the most wires, so with more than three the cut around
    /// it alone is no answer. Cuts around a lone sink are skipped.
    fn solve(wiring: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let nodes = wiring.adjacent.len();
        let source = (0..nodes)
            .max_by_key(|&n| wiring.adjacent[n].len())
            .ok_or_else(|| SolveError::failed("no components"))?;
        for sink in (0..nodes).filter(|&n| n != source) {
            match wiring.cut_side(source, sink, 3) {
                Some(side) if side > 1 && side + 1 < nodes => {
                    tracing::debug!(sink, side, "three wire cut found");
                    return Ok((side * (nodes - side)).to_string());
                }
                _ => {}
            }
        }
        Err(SolveError::failed("no three wire cut splits the machine"))
    }
}
