/*!
Cycle detection for deterministic state machines.

Iterating a deterministic `transition` over a finite state space eventually revisits a state;
from then on the sequence of states is periodic. [`detect_cycle`] finds the step at which the
period begins and its length, [`fast_forward`] uses both to compute the state after an arbitrary
(astronomically large) number of steps while only simulating `start + length` of them.

Neither terminates for state sequences that never repeat; [`CycleDetector::step_limit`] together
with the `try_*` methods puts a bound on the work done.
*/

use std::{convert::Infallible, hash::Hash};

use fxhash::FxHashMap;

use super::*;

/// Periodic tail of a state sequence `x_0, x_1 = f(x_0), ...`:
/// `x_i == x_{i + length}` for all `i >= start` and both values are minimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cycle<S> {
    /// Index of the first state that is part of the cycle
    pub start: usize,
    /// Number of steps after which states repeat (at least 1)
    pub length: usize,
    /// The state `x_start`
    pub state: S,
}

impl<S> Cycle<S> {
    /// Returns the smallest step `< start + length` whose state equals the state at step `n`
    ///
    /// # Examples
    /// ```
    /// use searchkit::algo::Cycle;
    ///
    /// let cycle = Cycle { start: 3, length: 4, state: () };
    /// assert_eq!(cycle.equivalent_step(2), 2);
    /// assert_eq!(cycle.equivalent_step(7), 3);
    /// assert_eq!(cycle.equivalent_step(1_000_000_002), 6);
    /// ```
    pub fn equivalent_step(&self, n: usize) -> usize {
        if n < self.start {
            n
        } else {
            self.start + (n - self.start) % self.length
        }
    }
}

/// Cycle detection by remembering the step at which every state was first seen.
///
/// # Examples
/// ```
/// use searchkit::{algo::*, Error};
///
/// let mut detector = CycleDetector::new(|x: &u64| (x * x + 1) % 1_000);
/// let cycle = detector.detect(2);
/// assert_eq!(detector.fast_forward(2, 1 << 40), detector.fast_forward(2, cycle.equivalent_step(1 << 40)));
///
/// let mut counter = CycleDetector::new(|x: &u64| x + 1).step_limit(100);
/// assert_eq!(counter.try_detect(0), Err(Error::StepLimitExceeded { limit: 100 }));
/// ```
pub struct CycleDetector<F> {
    transition: F,
    step_limit: Option<usize>,
}

impl<F> CycleDetector<F> {
    /// Creates a new detector for a deterministic `transition`
    pub fn new(transition: F) -> Self {
        Self {
            transition,
            step_limit: None,
        }
    }

    /// Bounds the number of transitions the `try_*` methods may apply.
    /// [`CycleDetector::detect`] and [`CycleDetector::fast_forward`] ignore the limit.
    pub fn step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Iterates from `initial` until a state repeats. Does not terminate if no state ever repeats.
    pub fn detect<S>(&mut self, initial: S) -> Cycle<S>
    where
        S: Clone + Eq + Hash,
        F: FnMut(&S) -> S,
    {
        let Ok(cycle) = self.search(initial, |_| Ok::<(), Infallible>(()));
        cycle
    }

    /// As [`CycleDetector::detect`] but fails with [`Error::StepLimitExceeded`] if no state
    /// repeated within the configured step limit
    pub fn try_detect<S>(&mut self, initial: S) -> Result<Cycle<S>>
    where
        S: Clone + Eq + Hash,
        F: FnMut(&S) -> S,
    {
        let step_limit = self.step_limit;
        self.search(initial, |steps| match step_limit {
            Some(limit) if steps >= limit => {
                tracing::debug!(limit, "cycle detection hit its step limit");
                Err(Error::StepLimitExceeded { limit })
            }
            _ => Ok(()),
        })
    }

    /// Returns the state after exactly `n` transitions from `initial`
    pub fn fast_forward<S>(&mut self, initial: S, n: usize) -> S
    where
        S: Clone + Eq + Hash,
        F: FnMut(&S) -> S,
    {
        let cycle = self.detect(initial.clone());
        self.replay(initial, cycle.equivalent_step(n))
    }

    /// As [`CycleDetector::fast_forward`] but bounded by the step limit, see [`CycleDetector::try_detect`]
    pub fn try_fast_forward<S>(&mut self, initial: S, n: usize) -> Result<S>
    where
        S: Clone + Eq + Hash,
        F: FnMut(&S) -> S,
    {
        let cycle = self.try_detect(initial.clone())?;
        Ok(self.replay(initial, cycle.equivalent_step(n)))
    }

    /// `check` is consulted with the number of transitions applied so far before each new one
    fn search<S, E>(
        &mut self,
        initial: S,
        mut check: impl FnMut(usize) -> std::result::Result<(), E>,
    ) -> std::result::Result<Cycle<S>, E>
    where
        S: Clone + Eq + Hash,
        F: FnMut(&S) -> S,
    {
        let mut first_seen: FxHashMap<S, usize> = FxHashMap::default();
        let mut state = initial;
        let mut steps = 0;

        loop {
            check(steps)?;
            let next = (self.transition)(&state);
            first_seen.insert(state, steps);
            steps += 1;

            if let Some(&start) = first_seen.get(&next) {
                let length = steps - start;
                tracing::trace!(start, length, "found repeated state");
                tracing::debug!(steps, "cycle detection finished");

                return Ok(Cycle {
                    start,
                    length,
                    state: next,
                });
            }

            state = next;
        }
    }

    fn replay<S>(&mut self, initial: S, steps: usize) -> S
    where
        F: FnMut(&S) -> S,
    {
        tracing::debug!(steps, "replaying transitions");
        (0..steps).fold(initial, |state, _| (self.transition)(&state))
    }
}

/// Finds the cycle of the state sequence starting in `initial`.
/// Does not terminate if no state ever repeats.
///
/// # Examples
/// ```
/// use searchkit::algo::*;
///
/// let cycle = detect_cycle(0, |x: &u32| (x + 3) % 4);
/// assert_eq!(cycle, Cycle { start: 0, length: 4, state: 0 });
///
/// // 5 -> 6 -> 7 -> 8 -> 6
/// let cycle = detect_cycle(5, |x: &u32| if *x == 8 { 6 } else { x + 1 });
/// assert_eq!(cycle, Cycle { start: 1, length: 3, state: 6 });
/// ```
pub fn detect_cycle<S, F>(initial: S, transition: F) -> Cycle<S>
where
    S: Clone + Eq + Hash,
    F: FnMut(&S) -> S,
{
    CycleDetector::new(transition).detect(initial)
}

/// Returns the state reached after exactly `n` applications of `transition` to `initial`,
/// simulating at most `start + length` steps of the underlying cycle (twice).
///
/// # Examples
/// ```
/// use searchkit::algo::*;
///
/// assert_eq!(fast_forward(0u32, 1_000_000_001, |x: &u32| (x + 3) % 4), 3);
/// ```
pub fn fast_forward<S, F>(initial: S, n: usize, transition: F) -> S
where
    S: Clone + Eq + Hash,
    F: FnMut(&S) -> S,
{
    CycleDetector::new(transition).fast_forward(initial, n)
}

/// Brent's cycle detection. Produces the same result as [`detect_cycle`] but only keeps a
/// constant number of states around (and needs no hashing) at the cost of more transitions.
pub fn brent<S, F>(initial: S, mut transition: F) -> Cycle<S>
where
    S: Clone + Eq,
    F: FnMut(&S) -> S,
{
    // find the length: the tortoise teleports to the hare at every power of two
    let mut power = 1;
    let mut length = 1;
    let mut tortoise = initial.clone();
    let mut hare = transition(&initial);
    while tortoise != hare {
        if power == length {
            tortoise = hare.clone();
            power *= 2;
            length = 0;
        }
        hare = transition(&hare);
        length += 1;
    }

    // find the start: move two pointers `length` apart in lockstep until they meet
    let mut tortoise = initial.clone();
    let mut hare = initial;
    for _ in 0..length {
        hare = transition(&hare);
    }

    let mut start = 0;
    while tortoise != hare {
        tortoise = transition(&tortoise);
        hare = transition(&hare);
        start += 1;
    }

    tracing::trace!(start, length, "found repeated state");

    Cycle {
        start,
        length,
        state: tortoise,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    /// 0 -> 1 -> ... -> 9 -> 10 -> ... -> 16 -> 10
    fn rho(x: &u64) -> u64 {
        if *x < 10 { x + 1 } else { 10 + (x - 9) % 7 }
    }

    #[test]
    fn modular_counter() {
        let step = |x: &u32| (x + 3) % 4;
        assert_eq!(
            detect_cycle(0, step),
            Cycle {
                start: 0,
                length: 4,
                state: 0
            }
        );
        assert_eq!(
            fast_forward(0, 1_000_000, step),
            simulate(0, 1_000_000, step)
        );
        assert_eq!(brent(0, step), detect_cycle(0, step));
    }

    #[test]
    fn tail_and_cycle() {
        let cycle = detect_cycle(0, rho);
        assert_eq!(
            cycle,
            Cycle {
                start: 10,
                length: 7,
                state: 10
            }
        );
        assert_eq!(brent(0, rho), cycle);
        assert_eq!(detect_cycle(12, rho), Cycle { start: 0, length: 7, state: 12 });

        for n in (0..40).chain([100, 1_000, 54_321]) {
            assert_eq!(fast_forward(0, n, rho), simulate(0, n, rho), "n = {n}");
        }
        assert_eq!(fast_forward(0, usize::MAX, rho), simulate(0, cycle.equivalent_step(usize::MAX), rho));
    }

    #[test]
    fn memory_banks() {
        // redistribute the largest bank (lowest index on ties) round-robin
        let redistribute = |banks: &Vec<u32>| {
            let mut banks = banks.clone();
            let (i, blocks) = banks
                .iter()
                .copied()
                .enumerate()
                .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
                .unwrap();

            banks[i] = 0;
            for k in 1..=blocks as usize {
                let len = banks.len();
                banks[(i + k) % len] += 1;
            }
            banks
        };

        let cycle = detect_cycle(vec![0, 2, 7, 0], redistribute);
        assert_eq!(cycle.start + cycle.length, 5);
        assert_eq!(cycle.length, 4);
        assert_eq!(cycle.state, vec![2, 4, 1, 2]);
        assert_eq!(brent(vec![0, 2, 7, 0], redistribute), cycle);
    }

    #[test]
    fn step_limit() {
        let step = |x: &u32| (x + 3) % 4;

        let mut detector = CycleDetector::new(step).step_limit(3);
        assert_eq!(
            detector.try_detect(0),
            Err(Error::StepLimitExceeded { limit: 3 })
        );
        assert_eq!(
            detector.try_fast_forward(0, 10),
            Err(Error::StepLimitExceeded { limit: 3 })
        );
        // the limit only affects the fallible methods
        assert_eq!(detector.detect(0).length, 4);

        let mut detector = CycleDetector::new(step).step_limit(4);
        assert_eq!(detector.try_detect(0).map(|c| c.length), Ok(4));
        assert_eq!(detector.try_fast_forward(0, 10), Ok(2));

        let mut unbounded = CycleDetector::new(|x: &u64| x + 1).step_limit(1000);
        assert_eq!(
            unbounded.try_fast_forward(0, 5),
            Err(Error::StepLimitExceeded { limit: 1000 })
        );
    }

    #[test]
    fn random_functional_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for size in [1usize, 2, 10, 100, 1000] {
            for _ in 0..20 {
                let table = (0..size).map(|_| rng.random_range(0..size)).collect_vec();
                let step = |x: &usize| table[*x];
                let initial = rng.random_range(0..size);

                let cycle = detect_cycle(initial, step);
                assert_eq!(brent(initial, step), cycle);

                let prefix = itertools::iterate(initial, step)
                    .take(cycle.start + cycle.length)
                    .collect_vec();
                assert!(prefix.iter().all_unique());
                assert_eq!(prefix[cycle.start], cycle.state);
                assert_eq!(simulate(initial, cycle.start + cycle.length, step), cycle.state);

                for n in [0, 1, cycle.start, cycle.start + cycle.length, 3 * size + 1, 10 * size + 7] {
                    assert_eq!(fast_forward(initial, n, step), simulate(initial, n, step));
                }
            }
        }
    }
}
