/*!
Topological ordering with Kahn's algorithm.

Nodes of in-degree zero are kept in a FIFO queue seeded in node order; every output node
decrements the in-degree of its successors. If the queue runs dry before all nodes were output,
the remaining nodes lie on or behind a cycle and no ordering exists.

Among independent nodes the produced order follows the queue, which is an implementation
detail and should not be relied upon.
*/

use std::collections::VecDeque;

use super::*;

/// Iterator yielding the nodes of an [`AdjacencyMap`] in topological order.
///
/// If the graph contains a cycle the iterator ends early, i.e. without yielding the nodes
/// on (or only reachable via) a cycle.
pub struct TopoSearch<'a, N> {
    graph: &'a AdjacencyMap<N>,
    in_degs: Vec<usize>,
    queue: VecDeque<&'a N>,
}

impl<'a, N> TopoSearch<'a, N>
where
    N: NodeKey,
{
    /// Counts the in-degrees of all nodes and enqueues those without incoming edges
    pub fn new(graph: &'a AdjacencyMap<N>) -> Self {
        let mut in_degs = vec![0; graph.number_of_nodes()];
        for (_, v) in graph.edges() {
            if let Some(i) = graph.position_of(v) {
                in_degs[i] += 1;
            }
        }

        let queue = graph
            .nodes()
            .zip(in_degs.iter())
            .filter_map(|(u, &d)| (d == 0).then_some(u))
            .collect();

        Self {
            graph,
            in_degs,
            queue,
        }
    }
}

impl<'a, N> Iterator for TopoSearch<'a, N>
where
    N: NodeKey,
{
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;

        for v in self.graph.successors_of(u) {
            let Some(i) = self.graph.position_of(v) else {
                continue;
            };
            self.in_degs[i] -= 1;
            if self.in_degs[i] == 0 {
                self.queue.push_back(v);
            }
        }

        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.graph.number_of_nodes()))
    }
}

impl<N> AdjacencyMap<N>
where
    N: NodeKey,
{
    /// Returns an iterator yielding nodes in topological order, see [`TopoSearch`].
    ///
    /// # Examples
    /// ```
    /// use searchkit::{prelude::*, algo::*};
    ///
    /// let graph = AdjacencyMap::from_edges([(0, 1), (1, 2)]);
    /// let order: Vec<_> = graph.topo_search().copied().collect();
    /// assert_eq!(order, vec![0, 1, 2]);
    /// ```
    pub fn topo_search(&self) -> TopoSearch<'_, N> {
        TopoSearch::new(self)
    }

    /// Returns all nodes in topological order or `None` if the graph contains a cycle
    pub fn topological_order(&self) -> Option<Vec<N>> {
        let order: Vec<N> = self.topo_search().cloned().collect();
        let acyclic = order.len() == self.number_of_nodes();

        tracing::debug!(
            nodes = self.number_of_nodes(),
            ordered = order.len(),
            acyclic,
            "topological sort finished"
        );

        acyclic.then_some(order)
    }

    /// Returns *true* if the graph contains no directed cycle (self-loops included)
    pub fn is_acyclic(&self) -> bool {
        self.topo_search().count() == self.number_of_nodes()
    }
}

/// Orders `nodes` such that for every edge `(u, v)`, `u` appears before `v`.
/// Returns `None` if the edges form a cycle.
///
/// The result always contains exactly the given `nodes`. `None` is also returned if no such
/// ordering exists because an edge names a node missing from `nodes` or a node is listed twice.
/// Repeated edges are harmless.
///
/// # Examples
/// ```
/// use searchkit::algo::*;
///
/// let order = topological_sort(["a", "b", "c", "d"], [("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
/// assert_eq!(order, Some(vec!["a", "b", "c", "d"]));
///
/// assert_eq!(topological_sort(["a", "b"], [("a", "b"), ("b", "a")]), None);
/// ```
pub fn topological_sort<N, I, E>(nodes: I, edges: E) -> Option<Vec<N>>
where
    N: NodeKey,
    I: IntoIterator<Item = N>,
    E: IntoIterator<Item = (N, N)>,
{
    let mut listed = 0;
    let mut graph = AdjacencyMap::new();
    graph.add_nodes(nodes.into_iter().inspect(|_| listed += 1));

    if graph.number_of_nodes() != listed {
        tracing::debug!(
            listed,
            distinct = graph.number_of_nodes(),
            "topological sort got repeated nodes"
        );
        return None;
    }

    for (u, v) in edges {
        if !graph.contains_node(&u) || !graph.contains_node(&v) {
            tracing::debug!("topological sort got an edge to an unlisted node");
            return None;
        }
        graph.add_edge(u, v);
    }

    graph.topological_order()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use fxhash::FxHashMap;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn is_valid_order<N: NodeKey>(order: &[N], edges: &[(N, N)]) -> bool {
        let position: FxHashMap<&N, usize> = order.iter().enumerate().map(|(i, u)| (u, i)).collect();
        edges.iter().all(|(u, v)| position[u] < position[v])
    }

    #[test]
    fn diamond() {
        let edges = [("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")];
        let order = topological_sort(["a", "b", "c", "d"], edges).unwrap();

        assert!(is_valid_order(&order, &edges));
        assert_eq!(order[0], "a");
        assert_eq!(order[3], "d");

        // node order does not matter for validity
        let order = topological_sort(["d", "c", "b", "a"], edges).unwrap();
        assert!(is_valid_order(&order, &edges));
    }

    #[test]
    fn cycles() {
        assert_eq!(
            topological_sort(["a", "b", "c"], [("a", "b"), ("b", "c"), ("c", "a")]),
            None
        );
        assert_eq!(topological_sort([1], [(1, 1)]), None);

        // nodes before the cycle can be ordered but no partial order is returned
        assert_eq!(
            topological_sort([0, 1, 2, 3], [(0, 1), (1, 2), (2, 1), (2, 3)]),
            None
        );
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(topological_sort(Vec::<u8>::new(), []), Some(vec![]));
        assert_eq!(topological_sort([3, 1, 2], []), Some(vec![3, 1, 2]));

        assert_eq!(
            topological_sort(["b", "a"], [("a", "b"), ("a", "b")]),
            Some(vec!["a", "b"])
        );
    }

    #[test]
    fn nodes_must_cover_edges_exactly() {
        // the cycle a -> b -> z -> a runs through an unlisted node
        assert_eq!(
            topological_sort(["a", "b"], [("a", "b"), ("b", "z"), ("z", "a")]),
            None
        );
        assert_eq!(topological_sort(["a"], [("z", "a")]), None);
        assert_eq!(topological_sort(["a"], [("a", "z")]), None);

        // an order of 2 nodes cannot cover 3 listed ones
        assert_eq!(
            topological_sort(["b", "a", "b"], [("a", "b"), ("a", "b")]),
            None
        );
        assert_eq!(topological_sort([7, 7], []), None);
    }

    #[test]
    fn topo_search_stops_at_cycle() {
        let graph = AdjacencyMap::from_edges([(0, 1), (1, 2), (2, 1), (0, 3)]);
        assert_eq!(graph.topo_search().copied().collect_vec(), vec![0, 3]);
        assert!(!graph.is_acyclic());
        assert_eq!(graph.topological_order(), None);

        let graph = AdjacencyMap::from_nodes_and_edges([5, 4], [(0, 1), (4, 0)]);
        assert!(graph.is_acyclic());
        assert_eq!(graph.topological_order(), Some(vec![5, 4, 0, 1]));
    }

    #[test]
    fn random_dags() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [1u32, 5, 20, 50] {
            for m in [0, n, n * 4] {
                for _ in 0..20 {
                    let (_, edges) = random_dag(rng, n, m);
                    let order = topological_sort(0..n, edges.iter().copied()).unwrap();

                    assert_eq!(order.len(), n as usize);
                    assert!(order.iter().all_unique());
                    assert!(is_valid_order(&order, &edges));

                    // adding the reverse of any edge closes a cycle
                    if let Some(&(u, v)) = edges.first() {
                        let cyclic = edges.iter().copied().chain([(v, u)]);
                        assert_eq!(topological_sort(0..n, cyclic), None);
                    }
                }
            }
        }
    }
}
