/*!
Heuristic-guided shortest path to a single goal.

A* uses the same bookkeeping as [`Dijkstra`](super::Dijkstra) (lazy invalidation, finalized set) but orders
the queue by `g(u) + h(u)`, where `g` is the best known cost from the start and `h` the caller's
estimate of the remaining cost. The search ends as soon as the goal is popped.

# Preconditions
For the returned cost to be minimal, edge costs must be non-negative and the heuristic must be
*admissible* (never overestimate) and *consistent* (`h(u) <= cost(u, v) + h(v)`), since finalized
nodes are never reopened. With `h = 0` this is exactly Dijkstra.
[`astar`] and [`AStar::search`] do not check any of this; [`AStar::try_search`] checks everything
that can be observed locally.
*/

use std::{convert::Infallible, iter::Cloned, slice};

use fxhash::{FxHashMap, FxHashSet};

use super::*;

/// A shortest path found by [`AStar`] together with its cost
#[derive(Debug, Clone, PartialEq)]
pub struct Route<N, C> {
    /// Sum of the edge costs along `path`
    pub cost: C,
    /// All nodes from the start to the goal (both included)
    pub path: Vec<N>,
}

/// Violations the search is able to observe while running
enum Violation {
    NegativeCost,
    InconsistentHeuristic,
    NonZeroGoalHeuristic,
}

/// Configurable A* search over an implicit weighted graph.
///
/// # Examples
/// ```
/// use searchkit::{algo::*, grid::*};
///
/// // 4-connected 10x10 grid with a wall in column 5 (open in the last row)
/// let free = |&(r, c): &Point| (0..10).contains(&r) && (0..10).contains(&c) && (c != 5 || r == 9);
/// let route = AStar::new(
///     |p: &Point| neighbors_4(*p).into_iter().filter(free).map(|q| (q, 1i64)),
///     |p: &Point| manhattan_distance(*p, (0, 9)),
/// )
/// .search((0, 0), (0, 9))
/// .unwrap();
///
/// assert_eq!(route.cost, 27);
/// assert_eq!(route.path.len(), 28);
/// ```
pub struct AStar<F, H> {
    neighbors: F,
    heuristic: H,
}

impl<F, H> AStar<F, H> {
    /// Creates a new search from a weighted neighbor function and a heuristic
    pub fn new(neighbors: F, heuristic: H) -> Self {
        Self {
            neighbors,
            heuristic,
        }
    }

    /// Searches a cheapest route from `start` to `goal` without checking any preconditions.
    /// Returns `None` if `goal` is unreachable.
    pub fn search<N, C, I>(&mut self, start: N, goal: N) -> Option<Route<N, C>>
    where
        N: NodeKey,
        C: Cost,
        F: FnMut(&N) -> I,
        I: IntoIterator<Item = (N, C)>,
        H: FnMut(&N) -> C,
    {
        let Ok(route) = self.explore(start, goal, |_| Ok::<(), Infallible>(()));
        route
    }

    /// As [`AStar::search`] but fails fast with
    /// - [`Error::NegativeCost`] if an enumerated edge has a cost below zero,
    /// - [`Error::InconsistentHeuristic`] if `h(u) > cost(u, v) + h(v)` for an explored edge,
    /// - [`Error::NonZeroGoalHeuristic`] if `h(goal) != 0`.
    ///
    /// Admissibility itself cannot be verified locally and remains the caller's responsibility.
    pub fn try_search<N, C, I>(&mut self, start: N, goal: N) -> Result<Option<Route<N, C>>>
    where
        N: NodeKey,
        C: Cost,
        F: FnMut(&N) -> I,
        I: IntoIterator<Item = (N, C)>,
        H: FnMut(&N) -> C,
    {
        self.explore(start, goal, |violation| {
            tracing::debug!("astar aborted on precondition violation");
            Err(match violation {
                Violation::NegativeCost => Error::NegativeCost,
                Violation::InconsistentHeuristic => Error::InconsistentHeuristic,
                Violation::NonZeroGoalHeuristic => Error::NonZeroGoalHeuristic,
            })
        })
    }

    fn explore<N, C, I, E>(
        &mut self,
        start: N,
        goal: N,
        mut report: impl FnMut(Violation) -> std::result::Result<(), E>,
    ) -> std::result::Result<Option<Route<N, C>>, E>
    where
        N: NodeKey,
        C: Cost,
        F: FnMut(&N) -> I,
        I: IntoIterator<Item = (N, C)>,
        H: FnMut(&N) -> C,
    {
        let mut g_scores: DistanceMap<N, C> = DistanceMap::default();
        let mut h_scores: FxHashMap<N, C> = FxHashMap::default();
        let mut predecessors: FxHashMap<N, N> = FxHashMap::default();
        let mut finalized: FxHashSet<N> = FxHashSet::default();

        let h_start = (self.heuristic)(&start);
        g_scores.insert(start.clone(), C::zero());
        h_scores.insert(start.clone(), h_start);

        let mut queue = PriorityQueue::new();
        queue.push(h_start, start.clone());

        let mut pushes = 1usize;
        let mut stale_pops = 0usize;

        while let Some((_, u)) = queue.pop() {
            if finalized.contains(&u) {
                stale_pops += 1;
                continue;
            }

            let g_u = g_scores[&u];
            let h_u = h_scores[&u];

            if u == goal {
                if h_u != C::zero() {
                    report(Violation::NonZeroGoalHeuristic)?;
                }

                tracing::debug!(finalized = finalized.len(), pushes, stale_pops, "astar reached goal");
                let path = trace_back(&predecessors, &start, u);
                return Ok(Some(Route { cost: g_u, path }));
            }

            finalized.insert(u.clone());

            for (v, cost) in (self.neighbors)(&u) {
                if cost.is_below_zero() {
                    report(Violation::NegativeCost)?;
                }

                let h_v = *h_scores
                    .entry(v.clone())
                    .or_insert_with(|| (self.heuristic)(&v));

                if h_u > cost + h_v {
                    report(Violation::InconsistentHeuristic)?;
                }

                if finalized.contains(&v) {
                    continue;
                }

                let tentative = g_u + cost;
                if g_scores.get(&v).is_none_or(|&g| tentative < g) {
                    g_scores.insert(v.clone(), tentative);
                    predecessors.insert(v.clone(), u.clone());
                    queue.push(tentative + h_v, v);
                    pushes += 1;
                }
            }
        }

        tracing::debug!(finalized = finalized.len(), pushes, stale_pops, "astar exhausted");
        Ok(None)
    }
}

/// Follows the predecessors from `goal` back to `start`; the chain is acyclic as a node only
/// becomes a predecessor once it is finalized and finalized nodes are never expanded again.
fn trace_back<N: NodeKey>(predecessors: &FxHashMap<N, N>, start: &N, goal: N) -> Vec<N> {
    let mut path = vec![goal];
    while let Some(pred) = path.last().filter(|u| *u != start).and_then(|u| predecessors.get(u)) {
        path.push(pred.clone());
    }
    path.reverse();
    path
}

/// Returns the minimal cost from `start` to `goal` or `None` if `goal` is unreachable.
///
/// `heuristic` must be admissible (and should be consistent) for the result to be minimal;
/// this is **not** checked (see [`AStar::try_search`]).
///
/// # Examples
/// ```
/// use searchkit::algo::*;
///
/// // walk along the number line in steps of +1 (cost 1) or +5 (cost 3)
/// let cost = astar(
///     0u32,
///     12,
///     |u: &u32| [(u + 1, 1u32), (u + 5, 3)].into_iter().filter(|(v, _)| *v <= 12),
///     |u: &u32| (12 - u).div_ceil(5),
/// );
/// assert_eq!(cost, Some(8)); // 0 -> 5 -> 10 -> 11 -> 12
/// ```
pub fn astar<N, C, F, I, H>(start: N, goal: N, neighbors: F, heuristic: H) -> Option<C>
where
    N: NodeKey,
    C: Cost,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
    H: FnMut(&N) -> C,
{
    AStar::new(neighbors, heuristic)
        .search(start, goal)
        .map(|route| route.cost)
}

impl<N, C> WeightedAdjacencyMap<N, C>
where
    N: NodeKey,
    C: Cost,
{
    /// Returns an [`AStar`] search over this graph using the given heuristic
    pub fn astar<'a, H>(
        &'a self,
        heuristic: H,
    ) -> AStar<impl FnMut(&N) -> Cloned<slice::Iter<'a, (N, C)>> + 'a, H>
    where
        H: FnMut(&N) -> C,
    {
        AStar::new(self.neighbor_fn(), heuristic)
    }
}
