//! A bounded collection of the best nearest-neighbor candidates seen so far.

use std::cmp::Ordering;

use crate::error::{invalid_argument, Result};

/// Candidate slots reserved up front. Larger queues grow as candidates arrive.
const MAX_PREALLOCATED: usize = 1024;

/// An image index together with its squared distance to the query.
///
/// Candidates are totally ordered by [`f64::total_cmp`] on the distance, then by lower index,
/// and two candidates are equal exactly when that order says so. A NaN distance ranks after
/// every other distance.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    /// Image index of the matched point.
    pub index: usize,
    /// Squared distance between the matched point and the query.
    pub distance: f64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    /// Closer candidates first, equal distances by lower index.
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.index.cmp(&other.index))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Keeps at most `capacity` candidates, sorted from best to worst.
///
/// Once full, a new candidate is only accepted if it ranks before the current worst one, which
/// is then evicted.
///
/// ```
/// use feature_kdtree::kdtree::{BoundedQueue, Candidate};
///
/// let mut queue = BoundedQueue::try_new(2).unwrap();
/// queue.push(Candidate { index: 0, distance: 4. });
/// queue.push(Candidate { index: 1, distance: 1. });
/// queue.push(Candidate { index: 2, distance: 2. });
/// let indices: Vec<_> = queue.iter().map(|c| c.index).collect();
/// assert_eq!(indices, vec![1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedQueue {
    items: Vec<Candidate>,
    capacity: usize,
}

impl BoundedQueue {
    /// Create an empty queue. Fails if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return invalid_argument("queue capacity must be positive");
        }
        let mut items = Vec::new();
        items.try_reserve_exact(capacity.min(MAX_PREALLOCATED) + 1)?;
        Ok(Self { items, capacity })
    }

    /// Offer a candidate. Returns `true` if it was kept.
    pub fn push(&mut self, candidate: Candidate) -> bool {
        if self.is_full() && self.items.last().is_some_and(|worst| candidate >= *worst) {
            return false;
        }
        let at = self.items.partition_point(|c| *c <= candidate);
        self.items.insert(at, candidate);
        if self.items.len() > self.capacity {
            self.items.pop();
        }
        true
    }

    /// The best candidate.
    pub fn peek(&self) -> Option<&Candidate> {
        self.items.first()
    }

    /// The worst kept candidate.
    pub fn peek_last(&self) -> Option<&Candidate> {
        self.items.last()
    }

    /// Remove and return the best candidate.
    pub fn pop(&mut self) -> Option<Candidate> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    /// Distance of the worst kept candidate.
    pub fn max_distance(&self) -> Option<f64> {
        self.items.last().map(|c| c.distance)
    }

    /// The number of kept candidates.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no candidate is kept.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` once `capacity` candidates are kept.
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    /// The maximum number of kept candidates.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remove every candidate.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate from best to worst.
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.items.iter()
    }

    /// Consume the queue, returning the candidates from best to worst.
    pub fn into_sorted_vec(self) -> Vec<Candidate> {
        self.items
    }
}
