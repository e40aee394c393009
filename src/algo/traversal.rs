/*!
Breadth-first traversal and traversal-derived utilities.

This module provides:
- [`BreadthFirstSearch`], a lazy iterator yielding nodes in discovery order together with their
  distance (number of edges) from the start node,
- [`bfs`], computing the distance to every reachable node,
- [`bfs_path`], reconstructing a shortest (fewest edges) path between two nodes.

Edge weights are not supported; a weighted graph traversed here has its weights silently ignored.
Use [`dijkstra`](super::dijkstra) instead.
*/

use std::{collections::VecDeque, iter::Cloned, slice};

use fxhash::{FxHashMap, FxHashSet};

use super::*;

/// BFS iterator over an implicit graph.
///
/// Each node is yielded exactly once as `(node, distance)`. As nodes leave a FIFO queue in
/// discovery order and every edge counts as 1, a node is always discovered via a shortest path
/// and distances are final as soon as they are recorded.
///
/// # Examples
/// ```
/// use searchkit::algo::*;
///
/// // 0 -> 1 -> 2 -> ... -> 9
/// let order: Vec<_> = BreadthFirstSearch::new(0, |u: &u32| (*u < 9).then_some(u + 1))
///     .stop_at(3)
///     .collect();
/// assert_eq!(order, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
/// ```
pub struct BreadthFirstSearch<N, F> {
    neighbors: F,
    distances: DistanceMap<N, usize>,
    queue: VecDeque<N>,
    excluded: FxHashSet<N>,
    predecessors: Option<FxHashMap<N, N>>,
    stop_at: Option<N>,
    max_depth: Option<usize>,
}

impl<N, F, I> BreadthFirstSearch<N, F>
where
    N: NodeKey,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
{
    /// Creates a new traversal starting from `start`.
    pub fn new(start: N, neighbors: F) -> Self {
        let mut distances = DistanceMap::default();
        distances.insert(start.clone(), 0);
        Self {
            neighbors,
            distances,
            queue: VecDeque::from(vec![start]),
            excluded: FxHashSet::default(),
            predecessors: None,
            stop_at: None,
            max_depth: None,
        }
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn stop_at(mut self, stopper: N) -> Self {
        self.stop_at = Some(stopper);
        self
    }

    /// Nodes at distance `depth` are still yielded but not expanded any further.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Excludes nodes from the search. They will be treated as if they were already visited,
    /// i.e. no edges to or from them will be taken.
    ///
    /// # Warning
    /// Excluding the start node has no effect as it is already on the queue.
    pub fn with_nodes_excluded<E>(mut self, nodes: E) -> Self
    where
        E: IntoIterator<Item = N>,
    {
        self.excluded.extend(nodes);
        self
    }

    /// Records the predecessor of every discovered node, enabling [`BreadthFirstSearch::path_to`].
    pub fn track_predecessors(mut self) -> Self {
        self.predecessors.get_or_insert_with(FxHashMap::default);
        self
    }

    /// Returns the distance of `u` if it was discovered already
    pub fn distance_of(&self, u: &N) -> Option<usize> {
        self.distances.get(u).copied()
    }

    /// Returns *true* if `u` was discovered already
    pub fn did_visit_node(&self, u: &N) -> bool {
        self.distances.contains_key(u)
    }

    /// Reconstructs the path from the start node to an already discovered `goal`,
    /// including both endpoints.
    ///
    /// Returns `None` if `goal` was not discovered or predecessors are not tracked.
    pub fn path_to(&self, goal: &N) -> Option<Vec<N>> {
        let predecessors = self.predecessors.as_ref()?;
        if !self.distances.contains_key(goal) {
            return None;
        }

        let mut path = vec![goal.clone()];
        let mut node = goal;
        while let Some(pred) = predecessors.get(node) {
            path.push(pred.clone());
            node = pred;
        }

        path.reverse();
        Some(path)
    }

    /// Consumes the traversal and returns the distances of all discovered nodes
    /// (which are all reachable nodes unless a stopper, a depth limit or excluded nodes were set).
    pub fn into_distances(mut self) -> DistanceMap<N, usize> {
        self.by_ref().for_each(drop);
        tracing::debug!(discovered = self.distances.len(), "bfs finished");
        self.distances
    }
}

impl<N, F, I> Iterator for BreadthFirstSearch<N, F>
where
    N: NodeKey,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
{
    type Item = (N, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;
        let dist = self.distances[&u];

        if self.stop_at.as_ref() == Some(&u) {
            self.queue.clear();
        } else if self.max_depth.is_none_or(|max| dist < max) {
            for v in (self.neighbors)(&u) {
                if self.distances.contains_key(&v) || self.excluded.contains(&v) {
                    continue;
                }

                self.distances.insert(v.clone(), dist + 1);
                if let Some(predecessors) = self.predecessors.as_mut() {
                    predecessors.insert(v.clone(), u.clone());
                }
                self.queue.push_back(v);
            }
        }

        Some((u, dist))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), None)
    }
}

/// Computes the minimal number of edges from `start` to every node reachable from it.
///
/// # Examples
/// ```
/// use searchkit::algo::*;
///
/// // 0 -- 1 -- 2
/// // |
/// // 3
/// let distances = bfs(0, |u: &u32| match u {
///     0 => vec![1, 3],
///     1 => vec![0, 2],
///     2 => vec![1],
///     _ => vec![0],
/// });
///
/// assert_eq!(distances.len(), 4);
/// assert_eq!((distances[&0], distances[&1], distances[&2], distances[&3]), (0, 1, 2, 1));
/// ```
pub fn bfs<N, F, I>(start: N, neighbors: F) -> DistanceMap<N, usize>
where
    N: NodeKey,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
{
    BreadthFirstSearch::new(start, neighbors).into_distances()
}

/// Computes a path with the fewest edges from `start` to `goal`, including both endpoints.
///
/// Returns `Some(vec![start])` if `start == goal` and `None` if `goal` is unreachable.
///
/// # Examples
/// ```
/// use searchkit::algo::*;
///
/// let path = bfs_path(1, 10, |u: &u32| [u + 1, u * 2].into_iter().filter(|&v| v <= 10));
/// assert_eq!(path.map(|p| p.len()), Some(5)); // e.g. 1, 2, 4, 5, 10
/// ```
pub fn bfs_path<N, F, I>(start: N, goal: N, neighbors: F) -> Option<Vec<N>>
where
    N: NodeKey,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
{
    let mut search = BreadthFirstSearch::new(start, neighbors)
        .track_predecessors()
        .stop_at(goal.clone());

    let found = search.by_ref().any(|(u, _)| u == goal);
    tracing::debug!(found, discovered = search.distances.len(), "bfs path search finished");

    if found { search.path_to(&goal) } else { None }
}

impl<N> AdjacencyMap<N>
where
    N: NodeKey,
{
    /// Returns a BFS iterator over the graph starting from `start`
    pub fn bfs<'a>(
        &'a self,
        start: N,
    ) -> BreadthFirstSearch<N, impl FnMut(&N) -> Cloned<slice::Iter<'a, N>> + 'a> {
        BreadthFirstSearch::new(start, self.neighbor_fn())
    }

    /// Computes the minimal number of edges from `start` to every reachable node
    pub fn distances_from(&self, start: N) -> DistanceMap<N, usize> {
        self.bfs(start).into_distances()
    }

    /// Returns *true* if there is a directed path from `u` to `v`
    pub fn is_reachable(&self, u: N, v: &N) -> bool {
        self.bfs(u).any(|(w, _)| &w == v)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::testing::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn small_graph() -> AdjacencyMap<u32> {
        // 0 -- 1 -- 2
        // |
        // 3
        AdjacencyMap::from_edges([(0, 1), (0, 3), (1, 0), (1, 2), (2, 1), (3, 0)])
    }

    #[test]
    fn bfs_distances() {
        let distances = bfs(0, small_graph().neighbor_fn());
        assert_eq!(
            distances.into_iter().sorted().collect_vec(),
            vec![(0, 0), (1, 1), (2, 2), (3, 1)]
        );
    }

    #[test]
    fn bfs_order() {
        //  / 2 --- \
        // 1         4 - 3
        //  \ 0 - 5 /
        let graph = AdjacencyMap::from_edges([(1, 2), (1, 0), (4, 3), (0, 5), (2, 4), (5, 4)]);

        let order = graph.bfs(1).collect_vec();
        assert_eq!(order.len(), 6);
        assert_eq!(order[0], (1, 0));
        assert_eq!(order[1..3].iter().sorted().collect_vec(), vec![&(0, 1), &(2, 1)]);
        assert_eq!(order[3..5].iter().sorted().collect_vec(), vec![&(4, 2), &(5, 2)]);
        assert_eq!(order[5], (3, 3));

        assert_eq!(graph.bfs(5).collect_vec(), vec![(5, 0), (4, 1), (3, 2)]);
    }

    #[test]
    fn unreachable_nodes_are_absent() {
        let graph = AdjacencyMap::from_edges([(0, 1), (2, 0)]);
        let distances = graph.distances_from(0);
        assert_eq!(distances.len(), 2);
        assert!(!distances.contains_key(&2));
        assert!(graph.is_reachable(2, &1));
        assert!(!graph.is_reachable(1, &2));
    }

    #[test]
    fn test_stopper() {
        let graph = AdjacencyMap::from_edges([(0, 1), (1, 2), (2, 3)]);
        assert_eq!(graph.bfs(0).map(|(u, _)| u).collect_vec(), vec![0, 1, 2, 3]);
        assert_eq!(graph.bfs(0).stop_at(1).map(|(u, _)| u).collect_vec(), vec![0, 1]);
    }

    #[test]
    fn test_max_depth() {
        let graph = AdjacencyMap::from_edges([(0, 1), (1, 2), (2, 3), (0, 4)]);
        let distances = graph.bfs(0).max_depth(1).into_distances();
        assert_eq!(
            distances.into_iter().sorted().collect_vec(),
            vec![(0, 0), (1, 1), (4, 1)]
        );
        assert_eq!(graph.bfs(0).max_depth(0).count(), 1);
    }

    #[test]
    fn test_excluded() {
        // 0 -> 1 -> 3
        //  \-> 2 -/
        let graph = AdjacencyMap::from_edges([(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)]);
        let search = graph.bfs(0).with_nodes_excluded([1]);
        let distances = search.into_distances();
        assert!(!distances.contains_key(&1));
        assert_eq!(distances[&3], 2);

        let distances = graph.bfs(0).with_nodes_excluded([1, 2]).into_distances();
        assert_eq!(distances.len(), 1);
    }

    #[test]
    fn shortest_paths() {
        let graph = AdjacencyMap::from_edges([(0, 1), (1, 2), (0, 3), (3, 4), (4, 2), (2, 5)]);
        assert_eq!(bfs_path(0, 5, graph.neighbor_fn()), Some(vec![0, 1, 2, 5]));
        assert_eq!(bfs_path(0, 0, graph.neighbor_fn()), Some(vec![0]));
        assert_eq!(bfs_path(5, 0, graph.neighbor_fn()), None);
        assert_eq!(bfs_path(0, 42, graph.neighbor_fn()), None);

        let mut search = graph.bfs(0);
        search.by_ref().for_each(drop);
        assert_eq!(search.path_to(&5), None); // predecessors not tracked
    }

    #[test]
    fn implicit_infinite_graph() {
        // every integer is connected to its neighbors; BFS must stop at the goal
        let path = bfs_path(0i64, 7, |u: &i64| [u - 1, u + 1]).unwrap();
        assert_eq!(path, (0..=7).collect_vec());
    }

    #[test]
    fn random_graphs_match_reference() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [5u32, 10, 30] {
            for m in [n, n * 2, n * 4] {
                for _ in 0..10 {
                    let edges = random_edges(rng, n, m);
                    let graph = AdjacencyMap::from_nodes_and_edges(0..n, edges.iter().copied());
                    let weighted = edges.iter().map(|&(u, v)| (u, v, 1u64)).collect_vec();

                    for start in 0..n {
                        let distances = graph.distances_from(start);
                        let reference = bellman_ford(n, &weighted, start);

                        for v in 0..n {
                            assert_eq!(
                                distances.get(&v).map(|&d| d as u64),
                                reference[v as usize]
                            );
                        }

                        for goal in [0, n / 2, n - 1] {
                            match (bfs_path(start, goal, graph.neighbor_fn()), reference[goal as usize]) {
                                (Some(path), Some(d)) => {
                                    assert_eq!(path.len() as u64, d + 1);
                                    assert_eq!(path[0], start);
                                    assert_eq!(*path.last().unwrap(), goal);
                                    assert!(path.iter().tuple_windows().all(|(u, v)| {
                                        graph.successors_of(u).contains(v)
                                    }));
                                }
                                (None, None) => {}
                                (path, d) => panic!("path {path:?} vs distance {d:?}"),
                            }
                        }
                    }
                }
            }
        }
    }
}
