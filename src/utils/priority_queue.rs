/*!
# Priority Queue

An array-backed binary min-heap over `(priority, item)` pairs.

In contrast to [`std::collections::BinaryHeap`], neither priorities nor items need to be `Ord`:
priorities only require `PartialOrd` (so `f64` works out of the box) and items are never compared at all.
There is no decrease-key operation; searches push a fresh entry instead and skip stale ones on pop.

Entries with equal priorities are popped in an **unspecified** order. In particular, ties are
neither FIFO nor LIFO and callers must not rely on any order among them.
*/

/// Binary min-heap of `(priority, item)` pairs.
///
/// # Examples
/// ```
/// use searchkit::prelude::*;
///
/// let mut queue = PriorityQueue::new();
/// queue.push(5, "five");
/// queue.push(1, "one");
/// queue.push(3, "three");
///
/// assert_eq!(queue.pop(), Some((1, "one")));
/// assert_eq!(queue.pop(), Some((3, "three")));
/// assert_eq!(queue.pop(), Some((5, "five")));
/// assert_eq!(queue.pop(), None);
/// ```
#[derive(Debug, Clone)]
pub struct PriorityQueue<P, T> {
    heap: Vec<(P, T)>,
}

impl<P, T> Default for PriorityQueue<P, T> {
    fn default() -> Self {
        Self { heap: Vec::new() }
    }
}

impl<P, T> PriorityQueue<P, T>
where
    P: PartialOrd,
{
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with space for at least `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    /// Inserts `item` with the given `priority` in `O(log n)`.
    /// Duplicates (even of the same item) are allowed.
    pub fn push(&mut self, priority: P, item: T) {
        self.heap.push((priority, item));
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes and returns the entry with the smallest priority in `O(log n)`,
    /// or `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<(P, T)> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let min = self.heap.pop();

        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        min
    }

    /// Returns the entry with the smallest priority without removing it
    pub fn peek(&self) -> Option<(&P, &T)> {
        self.heap.first().map(|(p, t)| (p, t))
    }

    /// Number of entries currently stored (including duplicates)
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns *true* if there are no entries left
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Removes all entries
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Consumes the queue and returns all entries in ascending priority
    pub fn into_sorted_vec(mut self) -> Vec<(P, T)> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(entry) = self.pop() {
            sorted.push(entry);
        }
        sorted
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].0 < self.heap[parent].0 {
                self.heap.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.heap[left].0 < self.heap[smallest].0 {
                smallest = left;
            }
            if right < len && self.heap[right].0 < self.heap[smallest].0 {
                smallest = right;
            }

            if smallest == index {
                break;
            }

            self.heap.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<P, T> FromIterator<(P, T)> for PriorityQueue<P, T>
where
    P: PartialOrd,
{
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<P, T> Extend<(P, T)> for PriorityQueue<P, T>
where
    P: PartialOrd,
{
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.heap.reserve(iter.size_hint().0);
        for (priority, item) in iter {
            self.push(priority, item);
        }
    }
}
