/*!
# Explicit Graphs

Most searches in this crate run on implicit graphs given by a neighbor function.
If the graph is known up front (e.g. parsed from an input listing), it can be stored in an
[`AdjacencyMap`] (unweighted) or a [`WeightedAdjacencyMap`] and handed to any algorithm via
`neighbor_fn()`.

Both containers are directed and allow parallel edges. Nodes are kept in insertion order,
which is the order `nodes()` reports them in.
*/

use std::{iter::Cloned, slice};

use fxhash::FxHashMap;
use itertools::Itertools;

use crate::node::*;

/// Provides getters pertaining to the nodes of a graph
pub trait GraphNodeOrder<N> {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> usize;

    /// Returns *true* if `u` is a node of the graph
    fn contains_node(&self, u: &N) -> bool;

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.number_of_nodes() == 0
    }
}

/// Provides getters pertaining to the edges of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph (parallel edges are counted individually)
    fn number_of_edges(&self) -> usize;

    /// Returns *true* if the graph has no edges
    fn is_singleton(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Shared bookkeeping of both containers: `$entry` is the type stored per outgoing edge
/// and `$target` extracts the head of such an entry.
macro_rules! impl_adjacency {
    ($graph:ident<$($param:ident),*>, $entry:ty, |$e:ident| $target:expr) => {
        impl<$($param),*> Default for $graph<$($param),*> {
            fn default() -> Self {
                Self {
                    nodes: Vec::new(),
                    index: FxHashMap::default(),
                    successors: Vec::new(),
                    number_of_edges: 0,
                }
            }
        }

        impl<$($param),*> $graph<$($param),*>
        where
            N: NodeKey,
        {
            /// Creates an empty graph
            pub fn new() -> Self {
                Self::default()
            }

            /// Adds `u` as an isolated node and returns *true* if it was not present before
            pub fn add_node(&mut self, u: N) -> bool {
                if self.index.contains_key(&u) {
                    return false;
                }
                self.index.insert(u.clone(), self.nodes.len());
                self.nodes.push(u);
                self.successors.push(Vec::new());
                true
            }

            /// Adds multiple nodes, see [`Self::add_node`]
            pub fn add_nodes<I>(&mut self, nodes: I)
            where
                I: IntoIterator<Item = N>,
            {
                for u in nodes {
                    self.add_node(u);
                }
            }

            /// Returns an iterator over all nodes in insertion order
            pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
                self.nodes.iter()
            }

            /// Returns the out-degree of `u` (0 for unknown nodes)
            pub fn out_degree_of(&self, u: &N) -> usize {
                self.successor_entries(u).len()
            }

            /// Returns an iterator over all nodes `v` with an edge `(u, v)`.
            /// Unknown nodes have no successors.
            pub fn successors_of(&self, u: &N) -> impl Iterator<Item = &N> + '_ {
                self.successor_entries(u).iter().map(|$e| $target)
            }

            /// Returns the position of `u` in insertion order
            pub fn position_of(&self, u: &N) -> Option<usize> {
                self.index.get(u).copied()
            }

            fn slot_of(&mut self, u: N) -> usize {
                self.add_node(u.clone());
                self.index[&u]
            }

            fn successor_entries(&self, u: &N) -> &[$entry] {
                self.index
                    .get(u)
                    .map_or(&[][..], |&i| self.successors[i].as_slice())
            }
        }

        impl<$($param),*> GraphNodeOrder<N> for $graph<$($param),*>
        where
            N: NodeKey,
        {
            fn number_of_nodes(&self) -> usize {
                self.nodes.len()
            }

            fn contains_node(&self, u: &N) -> bool {
                self.index.contains_key(u)
            }
        }

        impl<$($param),*> GraphEdgeOrder for $graph<$($param),*> {
            fn number_of_edges(&self) -> usize {
                self.number_of_edges
            }
        }
    };
}

/// Directed, unweighted graph over arbitrary node keys.
///
/// # Examples
/// ```
/// use searchkit::prelude::*;
///
/// let graph = AdjacencyMap::from_edges([("a", "b"), ("a", "c"), ("b", "d")]);
/// assert_eq!(graph.number_of_nodes(), 4);
/// assert_eq!(graph.number_of_edges(), 3);
/// assert_eq!(graph.successors_of(&"a").collect::<Vec<_>>(), vec![&"b", &"c"]);
/// ```
#[derive(Debug, Clone)]
pub struct AdjacencyMap<N> {
    nodes: Vec<N>,
    index: FxHashMap<N, usize>,
    successors: Vec<Vec<N>>,
    number_of_edges: usize,
}

impl_adjacency!(AdjacencyMap<N>, N, |v| v);

impl<N> AdjacencyMap<N>
where
    N: NodeKey,
{
    /// Creates a graph from a list of edges; nodes are inserted in order of first appearance
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Self::new();
        graph.add_edges(edges);
        graph
    }

    /// Creates a graph containing all `nodes` (in that order) and `edges`
    pub fn from_nodes_and_edges<I, E>(nodes: I, edges: E) -> Self
    where
        I: IntoIterator<Item = N>,
        E: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Self::new();
        graph.add_nodes(nodes);
        graph.add_edges(edges);
        graph
    }

    /// Adds the directed edge `(u, v)`, inserting missing endpoints
    pub fn add_edge(&mut self, u: N, v: N) {
        let slot = self.slot_of(u);
        self.add_node(v.clone());
        self.successors[slot].push(v);
        self.number_of_edges += 1;
    }

    /// Adds multiple edges, see [`AdjacencyMap::add_edge`]
    pub fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (N, N)>,
    {
        for (u, v) in edges {
            self.add_edge(u, v);
        }
    }

    /// Returns an iterator over all edges `(u, v)` grouped by `u` in node order
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.nodes
            .iter()
            .zip(self.successors.iter())
            .flat_map(|(u, succ)| succ.iter().map(move |v| (u, v)))
    }

    /// Returns the graph with all edges reversed
    pub fn reversed(&self) -> Self {
        let mut graph = Self::new();
        graph.add_nodes(self.nodes.iter().cloned());
        graph.add_edges(self.edges().map(|(u, v)| (v.clone(), u.clone())));
        graph
    }

    /// Returns a neighbor function suitable for the unweighted algorithms in [`crate::algo`]
    pub fn neighbor_fn<'a>(&'a self) -> impl FnMut(&N) -> Cloned<slice::Iter<'a, N>> + 'a {
        move |u: &N| self.successor_entries(u).iter().cloned()
    }
}

impl<N> FromIterator<(N, N)> for AdjacencyMap<N>
where
    N: NodeKey,
{
    fn from_iter<I: IntoIterator<Item = (N, N)>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

/// Directed graph over arbitrary node keys with a cost attached to every edge.
///
/// # Examples
/// ```
/// use searchkit::prelude::*;
///
/// let graph = WeightedAdjacencyMap::from_edges([(0, 1, 4), (0, 2, 1), (2, 1, 2)]);
/// assert_eq!(graph.number_of_edges(), 3);
/// assert_eq!(graph.cost_of(&0, &1), Some(4));
/// assert_eq!(graph.cost_of(&1, &0), None);
/// ```
#[derive(Debug, Clone)]
pub struct WeightedAdjacencyMap<N, C> {
    nodes: Vec<N>,
    index: FxHashMap<N, usize>,
    successors: Vec<Vec<(N, C)>>,
    number_of_edges: usize,
}

impl_adjacency!(WeightedAdjacencyMap<N, C>, (N, C), |e| &e.0);

impl<N, C> WeightedAdjacencyMap<N, C>
where
    N: NodeKey,
    C: Cost,
{
    /// Creates a graph from a list of `(u, v, cost)` triples
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N, C)>,
    {
        let mut graph = Self::new();
        graph.add_edges(edges);
        graph
    }

    /// Creates a graph from an unweighted one, assigning `cost` to every edge
    pub fn from_unweighted(graph: &AdjacencyMap<N>, cost: C) -> Self {
        let mut weighted = Self::new();
        weighted.add_nodes(graph.nodes.iter().cloned());
        weighted.add_edges(graph.edges().map(|(u, v)| (u.clone(), v.clone(), cost)));
        weighted
    }

    /// Adds the directed edge `(u, v)` with the given cost, inserting missing endpoints
    pub fn add_edge(&mut self, u: N, v: N, cost: C) {
        let slot = self.slot_of(u);
        self.add_node(v.clone());
        self.successors[slot].push((v, cost));
        self.number_of_edges += 1;
    }

    /// Adds both `(u, v)` and `(v, u)` with the same cost
    pub fn add_undirected_edge(&mut self, u: N, v: N, cost: C) {
        self.add_edge(u.clone(), v.clone(), cost);
        self.add_edge(v, u, cost);
    }

    /// Adds multiple edges, see [`WeightedAdjacencyMap::add_edge`]
    pub fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (N, N, C)>,
    {
        for (u, v, c) in edges {
            self.add_edge(u, v, c);
        }
    }

    /// Returns an iterator over all `(u, v, cost)` grouped by `u` in node order
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, C)> + '_ {
        self.nodes
            .iter()
            .zip(self.successors.iter())
            .flat_map(|(u, succ)| succ.iter().map(move |(v, c)| (u, v, *c)))
    }

    /// Returns the cheapest cost of an edge `(u, v)`, if any
    pub fn cost_of(&self, u: &N, v: &N) -> Option<C> {
        self.successor_entries(u)
            .iter()
            .filter(|(w, _)| w == v)
            .map(|(_, c)| *c)
            .reduce(|a, b| if b < a { b } else { a })
    }

    /// Returns *true* if some edge carries a negative cost
    pub fn has_negative_costs(&self) -> bool {
        self.successors.iter().flatten().any(|(_, c)| c.is_below_zero())
    }

    /// Drops the costs
    pub fn to_unweighted(&self) -> AdjacencyMap<N> {
        let mut graph = AdjacencyMap::new();
        graph.add_nodes(self.nodes.iter().cloned());
        graph.add_edges(self.edges().map(|(u, v, _)| (u.clone(), v.clone())));
        graph
    }

    /// Returns a neighbor function suitable for the weighted algorithms in [`crate::algo`]
    pub fn neighbor_fn<'a>(&'a self) -> impl FnMut(&N) -> Cloned<slice::Iter<'a, (N, C)>> + 'a {
        move |u: &N| self.successor_entries(u).iter().cloned()
    }
}

impl<N, C> FromIterator<(N, N, C)> for WeightedAdjacencyMap<N, C>
where
    N: NodeKey,
    C: Cost,
{
    fn from_iter<I: IntoIterator<Item = (N, N, C)>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

/// Sorted edge list, handy when comparing graphs regardless of insertion order
pub fn sorted_edges<N>(graph: &AdjacencyMap<N>) -> Vec<(N, N)>
where
    N: NodeKey + Ord,
{
    graph
        .edges()
        .map(|(u, v)| (u.clone(), v.clone()))
        .sorted()
        .collect()
}
