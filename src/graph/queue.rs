use std::cmp::Ordering;

use crate::error::Error;

/// Binary min-heap over the point ids `0..capacity` with decrease-key.
///
/// Priorities and heap positions are stored in dense arrays indexed by point id,
/// so looking up where a point sits in the heap is O(1) and every mutation is O(log n).
///
/// Invariant: `position[heap[i]] == Some(i)` for every live slot `i`.
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue {
    /// Live point ids in heap order
    heap: Vec<usize>,
    /// Last priority recorded for each point, kept after extraction
    priority: Vec<f64>,
    /// Slot of each point in `heap`, `None` when the point is not queued
    position: Vec<Option<usize>>,
}

impl IndexedPriorityQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            priority: vec![f64::INFINITY; capacity],
            position: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.position.len()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, point: usize) -> bool {
        self.position.get(point).copied().flatten().is_some()
    }

    /// Last priority given to the point, if it is in range.
    pub fn priority(&self, point: usize) -> Option<f64> {
        self.priority.get(point).copied()
    }

    pub fn insert(&mut self, point: usize, priority: f64) -> Result<(), Error> {
        if point >= self.capacity() {
            return Err(Error::PointOutOfRange {
                point,
                capacity: self.capacity(),
            });
        }
        if self.contains(point) {
            return Err(Error::PointAlreadyQueued(point));
        }
        if priority.is_nan() {
            return Err(Error::NanPriority(point));
        }
        let index = self.heap.len();
        self.heap.push(point);
        self.position[point] = Some(index);
        self.priority[point] = priority;
        self.bubble_up(index);
        Ok(())
    }

    /// Lower the priority of a queued point.
    ///
    /// Returns false without changing anything if the new priority is not
    /// strictly lower (including NaN) or the point is not queued.
    pub fn decrease_key(&mut self, point: usize, priority: f64) -> bool {
        let index = match self.position.get(point).copied().flatten() {
            Some(index) => index,
            None => return false,
        };
        if priority.partial_cmp(&self.priority[point]) != Some(Ordering::Less) {
            return false;
        }
        self.priority[point] = priority;
        self.bubble_up(index);
        true
    }

    pub fn extract_min(&mut self) -> Result<usize, Error> {
        if self.heap.is_empty() {
            return Err(Error::EmptyQueue);
        }
        let min = self.heap.swap_remove(0);
        self.position[min] = None;
        if let Some(&moved) = self.heap.first() {
            self.position[moved] = Some(0);
            self.bubble_down(0);
        }
        Ok(min)
    }

    fn key(&self, index: usize) -> f64 {
        self.priority[self.heap[index]]
    }

    /// The root is its own parent, which stops the upward bubble there.
    fn bubble_up(&mut self, mut index: usize) {
        while self.key(index) < self.key(parent(index)) {
            self.swap(index, parent(index));
            index = parent(index);
        }
    }

    fn bubble_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            // A node may have only a left child
            let mut smallest = index;
            for child in [left(index), right(index)] {
                if child < len && self.key(child) < self.key(smallest) {
                    smallest = child;
                }
            }
            if smallest == index {
                break;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }
}

fn parent(index: usize) -> usize {
    index.saturating_sub(1) / 2
}

fn left(index: usize) -> usize {
    2 * index + 1
}

fn right(index: usize) -> usize {
    2 * index + 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn drain(queue: &mut IndexedPriorityQueue) -> Vec<usize> {
        let mut out = vec![];
        while !queue.is_empty() {
            out.push(queue.extract_min().unwrap());
        }
        out
    }

    fn assert_positions_consistent(queue: &IndexedPriorityQueue) {
        for (i, point) in queue.heap.iter().enumerate() {
            assert_eq!(queue.position[*point], Some(i));
        }
        assert_eq!(
            queue.position.iter().filter(|p| p.is_some()).count(),
            queue.len()
        );
    }

    #[test]
    fn extracts_in_priority_order() {
        let mut queue = IndexedPriorityQueue::with_capacity(3);
        queue.insert(0, 5.).unwrap();
        queue.insert(1, 1.).unwrap();
        queue.insert(2, 3.).unwrap();
        assert_eq!(drain(&mut queue), vec![1, 2, 0]);
    }

    #[test]
    fn bubbles_down_past_a_single_child() {
        // After the first extraction the root has only a left child with a smaller priority
        let mut queue = IndexedPriorityQueue::with_capacity(3);
        queue.insert(0, 1.).unwrap();
        queue.insert(1, 2.).unwrap();
        queue.insert(2, 3.).unwrap();
        assert_eq!(queue.extract_min(), Ok(0));
        assert_positions_consistent(&queue);
        assert_eq!(queue.extract_min(), Ok(1));
        assert_eq!(queue.extract_min(), Ok(2));
    }

    #[test]
    fn bubbles_down_in_odd_sized_queue() {
        let mut queue = IndexedPriorityQueue::with_capacity(5);
        for (point, priority) in [(0, 0.), (1, 4.), (2, 1.), (3, 5.), (4, 2.)] {
            queue.insert(point, priority).unwrap();
        }
        assert_eq!(drain(&mut queue), vec![0, 2, 4, 1, 3]);
    }

    #[test]
    fn decrease_key_only_lowers() {
        let mut queue = IndexedPriorityQueue::with_capacity(2);
        queue.insert(0, 2.).unwrap();
        queue.insert(1, 3.).unwrap();
        assert!(!queue.decrease_key(1, 3.));
        assert!(!queue.decrease_key(1, 10.));
        assert!(!queue.decrease_key(1, f64::NAN));
        assert_eq!(queue.priority(1), Some(3.));
        assert!(queue.decrease_key(1, 1.));
        assert_eq!(queue.priority(1), Some(1.));
        assert_eq!(drain(&mut queue), vec![1, 0]);
    }

    #[test]
    fn decrease_key_from_infinity_discovers() {
        let mut queue = IndexedPriorityQueue::with_capacity(3);
        for point in 0..3 {
            queue.insert(point, f64::INFINITY).unwrap();
        }
        assert!(queue.decrease_key(2, 7.));
        assert_eq!(queue.extract_min(), Ok(2));
    }

    #[test]
    fn decrease_key_ignores_points_not_queued() {
        let mut queue = IndexedPriorityQueue::with_capacity(2);
        queue.insert(0, 1.).unwrap();
        assert!(!queue.decrease_key(1, 0.));
        assert!(!queue.decrease_key(5, 0.));
        assert_eq!(queue.extract_min(), Ok(0));
        assert!(!queue.decrease_key(0, -1.));
    }

    #[test]
    fn insert_rejects_bad_points() {
        let mut queue = IndexedPriorityQueue::with_capacity(2);
        assert_eq!(
            queue.insert(2, 0.),
            Err(Error::PointOutOfRange {
                point: 2,
                capacity: 2
            })
        );
        queue.insert(1, 0.).unwrap();
        assert_eq!(queue.insert(1, 4.), Err(Error::PointAlreadyQueued(1)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn insert_rejects_nan_priority() {
        let mut queue = IndexedPriorityQueue::with_capacity(4);
        assert_eq!(queue.insert(0, f64::NAN), Err(Error::NanPriority(0)));
        assert!(!queue.contains(0));
        for (point, priority) in [(1, 3.), (2, 1.), (3, 2.)] {
            queue.insert(point, priority).unwrap();
        }
        assert_eq!(drain(&mut queue), vec![2, 3, 1]);
    }

    #[test]
    fn extract_from_empty_queue_fails() {
        let mut queue = IndexedPriorityQueue::with_capacity(1);
        assert_eq!(queue.extract_min(), Err(Error::EmptyQueue));
        queue.insert(0, 0.).unwrap();
        assert_eq!(queue.extract_min(), Ok(0));
        assert_eq!(queue.extract_min(), Err(Error::EmptyQueue));
    }

    #[test]
    fn extracted_points_can_be_queued_again() {
        let mut queue = IndexedPriorityQueue::with_capacity(2);
        queue.insert(0, 1.).unwrap();
        queue.insert(1, 2.).unwrap();
        assert_eq!(queue.extract_min(), Ok(0));
        queue.insert(0, 3.).unwrap();
        assert_eq!(drain(&mut queue), vec![1, 0]);
    }

    #[test]
    fn always_extracts_global_minimum() {
        let mut rng = StdRng::seed_from_u64(2020);
        let capacity = 64;
        let mut queue = IndexedPriorityQueue::with_capacity(capacity);
        let mut expected: Vec<Option<f64>> = vec![None; capacity];

        for _ in 0..5000 {
            match rng.gen_range(0..3) {
                0 => {
                    let point = rng.gen_range(0..capacity);
                    let priority = rng.gen_range(0.0..100.);
                    if expected[point].is_none() {
                        queue.insert(point, priority).unwrap();
                        expected[point] = Some(priority);
                    }
                }
                1 => {
                    let point = rng.gen_range(0..capacity);
                    let priority = rng.gen_range(0.0..100.);
                    let improves = matches!(expected[point], Some(current) if priority < current);
                    assert_eq!(queue.decrease_key(point, priority), improves);
                    if improves {
                        expected[point] = Some(priority);
                    }
                }
                _ => {
                    let min = expected
                        .iter()
                        .filter_map(|priority| *priority)
                        .fold(f64::INFINITY, f64::min);
                    match queue.extract_min() {
                        Ok(point) => {
                            assert_eq!(expected[point], Some(min));
                            expected[point] = None;
                        }
                        Err(e) => {
                            assert_eq!(e, Error::EmptyQueue);
                            assert!(expected.iter().all(Option::is_none));
                        }
                    }
                }
            }
            assert_positions_consistent(&queue);
        }
    }
}
