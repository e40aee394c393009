//! Random instances and slow reference implementations for cross-checking the algorithms.

use itertools::Itertools;
use rand::Rng;

/// Creates a list of at most `m_ub` random directed edges for nodes `0..n`
pub fn random_edges<R: Rng>(rng: &mut R, n: u32, m_ub: u32) -> Vec<(u32, u32)> {
    let mut edges = (0..m_ub)
        .map(|_| (rng.random_range(0..n), rng.random_range(0..n)))
        .collect_vec();
    edges.sort_unstable();
    edges.dedup();
    edges
}

/// Creates a list of at most `m_ub` random directed edges with costs in `0..=max_cost`
pub fn random_weighted_edges<R: Rng>(
    rng: &mut R,
    n: u32,
    m_ub: u32,
    max_cost: u64,
) -> Vec<(u32, u32, u64)> {
    random_edges(rng, n, m_ub)
        .into_iter()
        .map(|(u, v)| (u, v, rng.random_range(0..=max_cost)))
        .collect()
}

/// Creates a random DAG on `0..n`: edges only go from a smaller to a larger rank in a random permutation
pub fn random_dag<R: Rng>(rng: &mut R, n: u32, m_ub: u32) -> (Vec<u32>, Vec<(u32, u32)>) {
    use rand::seq::SliceRandom;

    let mut ranks = (0..n).collect_vec();
    ranks.shuffle(rng);

    let edges = random_edges(rng, n, m_ub)
        .into_iter()
        .filter(|&(u, v)| u != v)
        .map(|(u, v)| {
            if ranks[u as usize] < ranks[v as usize] {
                (u, v)
            } else {
                (v, u)
            }
        })
        .collect();

    (ranks, edges)
}

/// Bellman-Ford on nodes `0..n`; `None` marks unreachable nodes.
/// Only valid for graphs without negative cycles.
pub fn bellman_ford(n: u32, edges: &[(u32, u32, u64)], start: u32) -> Vec<Option<u64>> {
    let mut dist = vec![None; n as usize];
    dist[start as usize] = Some(0);

    for _ in 0..n {
        let mut changed = false;
        for &(u, v, c) in edges {
            if let Some(du) = dist[u as usize]
                && dist[v as usize].is_none_or(|dv| du + c < dv)
            {
                dist[v as usize] = Some(du + c);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    dist
}

/// Applies `transition` exactly `n` times
pub fn simulate<S, F>(initial: S, n: usize, mut transition: F) -> S
where
    F: FnMut(&S) -> S,
{
    (0..n).fold(initial, |state, _| transition(&state))
}
