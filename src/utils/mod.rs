/*!
# Utilities

Provides the data structures the search algorithms are built on, most importantly
the [`PriorityQueue`](self::priority_queue::PriorityQueue) used by Dijkstra and A*.

You probably only need to interact with this module directly if you implement a search of your own.
*/

pub mod priority_queue;

pub use priority_queue::PriorityQueue;
