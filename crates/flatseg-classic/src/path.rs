use std::{cmp::Reverse, collections::BinaryHeap};

use crate::Error;

/// Weighted directed graph stored as an adjacency list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<(usize, u64)>>,
}

impl Graph {
    /// Creates a graph with `nodes` nodes and no edges
    pub fn new(nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); nodes],
        }
    }

    /// Adds a directed edge `from -> to` with the given weight
    pub fn add_edge(&mut self, from: usize, to: usize, weight: u64) -> Result<(), Error> {
        Error::check_node(from, self.len())?;
        Error::check_node(to, self.len())?;
        self.adjacency[from].push((to, weight));
        Ok(())
    }

    /// Adds an edge in both directions
    pub fn add_undirected_edge(&mut self, a: usize, b: usize, weight: u64) -> Result<(), Error> {
        self.add_edge(a, b, weight)?;
        self.add_edge(b, a, weight)
    }

    /// Returns the outgoing `(neighbour, weight)` pairs of `node`
    pub fn neighbours(&self, node: usize) -> &[(usize, u64)] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the number of nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns `true` if the graph has no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// Single-source shortest path costs using Dijkstra's algorithm
///
/// Returns the minimum cost from `source` to every node, or `None` for unreachable nodes.
/// Runs in `O((V + E) log V)` time. Path costs saturate at `u64::MAX`.
///
/// ```
/// use flatseg_classic::{dijkstra, Graph};
///
/// let mut graph = Graph::new(4);
/// graph.add_edge(0, 1, 4).unwrap();
/// graph.add_edge(0, 2, 1).unwrap();
/// graph.add_edge(2, 1, 2).unwrap();
/// assert_eq!(dijkstra(&graph, 0).unwrap(), vec![Some(0), Some(3), Some(1), None]);
/// ```
pub fn dijkstra(graph: &Graph, source: usize) -> Result<Vec<Option<u64>>, Error> {
    let search = Search::run(graph, source, None)?;
    Ok(search.cost)
}

/// Finds the cheapest path between `source` and `target`
///
/// The search stops as soon as `target` is settled. Returns the path cost together
/// with the visited nodes from `source` to `target`, or `None` if `target` is unreachable.
pub fn shortest_path(
    graph: &Graph,
    source: usize,
    target: usize,
) -> Result<Option<(u64, Vec<usize>)>, Error> {
    Error::check_node(target, graph.len())?;
    let search = Search::run(graph, source, Some(target))?;
    let Some(cost) = search.cost[target] else {
        return Ok(None);
    };

    let mut path = vec![target];
    let mut node = target;
    while let Some(prev) = search.previous[node] {
        path.push(prev);
        node = prev;
    }
    path.reverse();
    Ok(Some((cost, path)))
}

struct Search {
    cost: Vec<Option<u64>>,
    previous: Vec<Option<usize>>,
}

impl Search {
    fn run(graph: &Graph, source: usize, target: Option<usize>) -> Result<Self, Error> {
        Error::check_node(source, graph.len())?;

        let mut cost = vec![None; graph.len()];
        let mut previous = vec![None; graph.len()];
        let mut heap = BinaryHeap::new();
        cost[source] = Some(0);
        heap.push(Reverse((0u64, source)));

        while let Some(Reverse((current, u))) = heap.pop() {
            // stale entry, a cheaper cost was already settled
            if cost[u].is_some_and(|c| current > c) {
                continue;
            }
            if target == Some(u) {
                break;
            }
            for &(v, weight) in graph.neighbours(u) {
                let next = current.saturating_add(weight);
                if cost[v].is_none_or(|c| next < c) {
                    cost[v] = Some(next);
                    previous[v] = Some(u);
                    heap.push(Reverse((next, v)));
                }
            }
        }
        Ok(Self { cost, previous })
    }
}
