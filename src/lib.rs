/*!
`searchkit` is a small graph-search and cycle-detection toolkit for puzzle-sized state spaces.
Nodes are **not** numbered: any `Clone + Eq + Hash` value can act as a node, be it a scalar,
a coordinate pair or a whole simulation state. The graph itself is usually never materialized;
instead, the caller supplies a *neighbor function* and the algorithms explore lazily.

# Representation

- A **node** is any type implementing [`NodeKey`](crate::node::NodeKey) (blanket-implemented for `Clone + Eq + Hash`).
- A **cost** is any type implementing [`Cost`](crate::node::Cost) (blanket-implemented for all primitive numbers).
- A **neighbor function** is an `FnMut(&N) -> I` where `I` yields either `N` (unweighted) or `(N, C)` (weighted).

If the graph is known up front, [`AdjacencyMap`](crate::ops::AdjacencyMap) and
[`WeightedAdjacencyMap`](crate::ops::WeightedAdjacencyMap) store it explicitly and hand out matching
neighbor functions.

# Design

Every algorithm is available in two forms:
- a plain function (`bfs`, `dijkstra`, `astar`, `topological_sort`, `detect_cycle`, `fast_forward`)
  covering the common case, and
- a configurable struct (`BreadthFirstSearch`, `Dijkstra`, `AStar`, `TopoSearch`, `CycleDetector`) that can be
  altered using the *Builder* / *Setter* pattern before running it.

Nothing is retained between calls: every invocation owns its queue, visited set and distance map.
Expected "not found" outcomes (empty queue, unreachable goal, cyclic graph) are reported as `None`;
only the opt-in validating entry points (`try_*`) return a [`Result`](crate::error::Result).

# Usage

There are *3* core submodules you probably want to interact with:
- [`prelude`] includes node/cost traits, the adjacency containers, the priority queue and the error type,
- [`algo`] includes the search algorithms, topological ordering and cycle detection,
- [`grid`] includes helpers for the ubiquitous 2D grid puzzles (directions, neighborhoods, distances).

In most use-cases, `use searchkit::{prelude::*, algo::*};` suffices for your needs.

```
use searchkit::{prelude::*, algo::*};

let graph = AdjacencyMap::from_edges([(0, 1), (1, 2), (0, 3)]);
let distances = bfs(0, graph.neighbor_fn());
assert_eq!(distances[&2], 2);
```
*/

pub mod algo;
pub mod error;
pub mod grid;
pub mod node;
pub mod ops;
#[cfg(test)]
pub(crate) mod testing;
pub mod utils;

pub use error::{Error, Result};

/// `searchkit::prelude` includes node and cost traits, the adjacency containers, the priority queue and the error type.
pub mod prelude {
    pub use super::{error::*, node::*, ops::*, utils::*};
}
