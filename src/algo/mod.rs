/*!
# Search Algorithms

This module provides the **graph search** and **cycle detection** routines of this crate.
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use searchkit::algo::*;
```
and gain access to BFS, Dijkstra, A*, topological ordering and cycle detection.

Every algorithm works on an implicit graph given by a neighbor function `FnMut(&N) -> I`.
If possible, algorithms are also provided as **iterators**, making it easy to consume results lazily.
*/

mod astar;
mod cycle;
mod dijkstra;
mod topological;
mod traversal;

use crate::prelude::*;

pub use astar::*;
pub use cycle::*;
pub use dijkstra::*;
pub use topological::*;
pub use traversal::*;
