/*!
Single-source shortest paths with non-negative edge costs.

The search keeps a [`PriorityQueue`] of `(distance, node)` entries and never updates entries in place:
an improved distance simply pushes a new entry and superseded ones are skipped when popped
(*lazy invalidation*). Once a node is popped for the first time, its distance is final.

# Preconditions
Edge costs must be non-negative. [`dijkstra`] and [`Dijkstra::run`] do not check this and silently
produce a (possibly non-minimal) distance map otherwise; [`Dijkstra::try_run`] fails fast instead.
*/

use std::{convert::Infallible, iter::Cloned, slice};

use fxhash::{FxHashMap, FxHashSet};

use super::*;

/// Configurable Dijkstra search over an implicit weighted graph.
///
/// # Examples
/// ```
/// use searchkit::algo::*;
///
/// // 0 -4-> 1, 0 -1-> 2 -1-> 1
/// let paths = Dijkstra::new(|u: &u32| match u {
///     0 => vec![(1, 4), (2, 1)],
///     2 => vec![(1, 1)],
///     _ => vec![],
/// })
/// .run(0);
///
/// assert_eq!(paths.distance(&1), Some(2));
/// assert_eq!(paths.path_to(&1), Some(vec![0, 2, 1]));
/// ```
pub struct Dijkstra<N, F> {
    neighbors: F,
    stop_at: Option<N>,
}

impl<N, C, F, I> Dijkstra<N, F>
where
    N: NodeKey,
    C: Cost,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
{
    /// Creates a new search using the given weighted neighbor function
    pub fn new(neighbors: F) -> Self {
        Self {
            neighbors,
            stop_at: None,
        }
    }

    /// Finishes the search as soon as `goal` is finalized.
    /// The result then only contains nodes finalized up to that point.
    pub fn stop_at(mut self, goal: N) -> Self {
        self.stop_at = Some(goal);
        self
    }

    /// Runs the search from `start` without checking edge costs
    pub fn run(mut self, start: N) -> ShortestPaths<N, C> {
        let Ok(paths) = self.search(start, |_| Ok::<(), Infallible>(()));
        paths
    }

    /// Runs the search from `start` and fails with [`Error::NegativeCost`] on the first
    /// enumerated edge whose cost is below zero.
    pub fn try_run(mut self, start: N) -> Result<ShortestPaths<N, C>> {
        self.search(start, |cost: C| {
            if cost.is_below_zero() {
                tracing::debug!("dijkstra aborted on negative edge cost");
                Err(Error::NegativeCost)
            } else {
                Ok(())
            }
        })
    }

    fn search<E>(
        &mut self,
        start: N,
        mut check_cost: impl FnMut(C) -> std::result::Result<(), E>,
    ) -> std::result::Result<ShortestPaths<N, C>, E> {
        let mut paths = ShortestPaths::new(start.clone());
        let mut finalized = FxHashSet::default();

        let mut queue = PriorityQueue::new();
        queue.push(C::zero(), start);

        let mut pushes = 1usize;
        let mut stale_pops = 0usize;
        let mut stopped = false;

        while let Some((dist, u)) = queue.pop() {
            if finalized.contains(&u) {
                stale_pops += 1;
                continue;
            }
            finalized.insert(u.clone());

            if self.stop_at.as_ref() == Some(&u) {
                stopped = true;
                break;
            }

            for (v, cost) in (self.neighbors)(&u) {
                check_cost(cost)?;

                let candidate = dist + cost;
                if paths.distances.get(&v).is_none_or(|&d| candidate < d) {
                    paths.distances.insert(v.clone(), candidate);
                    paths.predecessors.insert(v.clone(), u.clone());
                    queue.push(candidate, v);
                    pushes += 1;
                }
            }
        }

        if stopped {
            paths.distances.retain(|u, _| finalized.contains(u));
            paths.predecessors.retain(|u, _| finalized.contains(u));
        }

        tracing::debug!(
            finalized = finalized.len(),
            pushes,
            stale_pops,
            stopped,
            "dijkstra finished"
        );

        Ok(paths)
    }
}

/// Result of a [`Dijkstra`] search: final distances plus the predecessor of every node on
/// one of its shortest paths.
#[derive(Debug, Clone)]
pub struct ShortestPaths<N, C> {
    start: N,
    distances: DistanceMap<N, C>,
    predecessors: FxHashMap<N, N>,
}

impl<N, C> ShortestPaths<N, C>
where
    N: NodeKey,
    C: Cost,
{
    fn new(start: N) -> Self {
        let mut distances = DistanceMap::default();
        distances.insert(start.clone(), C::zero());
        Self {
            start,
            distances,
            predecessors: FxHashMap::default(),
        }
    }

    /// The node the search started from
    pub fn start(&self) -> &N {
        &self.start
    }

    /// Minimal distance from the start to `u` or `None` if `u` was not reached
    pub fn distance(&self, u: &N) -> Option<C> {
        self.distances.get(u).copied()
    }

    /// Returns *true* if `u` was reached
    pub fn contains(&self, u: &N) -> bool {
        self.distances.contains_key(u)
    }

    /// All reached nodes with their distances
    pub fn distances(&self) -> &DistanceMap<N, C> {
        &self.distances
    }

    /// Consumes the result and returns only the distance map
    pub fn into_distances(self) -> DistanceMap<N, C> {
        self.distances
    }

    /// Number of reached nodes (including the start)
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Always *false* as the start node is always reached
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Reconstructs a shortest path from the start to `goal` including both endpoints.
    ///
    /// Returns `None` if `goal` was not reached. As negative costs may produce cyclic
    /// predecessor chains, `None` is also returned if the chain does not lead back to the start.
    pub fn path_to(&self, goal: &N) -> Option<Vec<N>> {
        if !self.distances.contains_key(goal) {
            return None;
        }

        let mut path = vec![goal.clone()];
        let mut node = goal;
        while *node != self.start {
            node = self.predecessors.get(node)?;
            path.push(node.clone());
            if path.len() > self.distances.len() {
                return None;
            }
        }

        path.reverse();
        Some(path)
    }
}

/// Computes the minimal cumulative cost from `start` to every node reachable from it.
///
/// Edge costs must be non-negative; this is **not** checked (see [`Dijkstra::try_run`]).
///
/// # Examples
/// ```
/// use searchkit::algo::*;
///
/// let distances = dijkstra('a', |u: &char| match u {
///     'a' => vec![('b', 7), ('c', 2)],
///     'c' => vec![('b', 3)],
///     _ => vec![],
/// });
/// assert_eq!(distances[&'b'], 5);
/// ```
pub fn dijkstra<N, C, F, I>(start: N, neighbors: F) -> DistanceMap<N, C>
where
    N: NodeKey,
    C: Cost,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
{
    Dijkstra::new(neighbors).run(start).into_distances()
}

impl<N, C> WeightedAdjacencyMap<N, C>
where
    N: NodeKey,
    C: Cost,
{
    /// Returns a [`Dijkstra`] search over this graph
    pub fn dijkstra<'a>(
        &'a self,
    ) -> Dijkstra<N, impl FnMut(&N) -> Cloned<slice::Iter<'a, (N, C)>> + 'a> {
        Dijkstra::new(self.neighbor_fn())
    }

    /// Computes shortest paths from `start` to all reachable nodes without checking costs
    pub fn shortest_paths_from(&self, start: N) -> ShortestPaths<N, C> {
        self.dijkstra().run(start)
    }
}
