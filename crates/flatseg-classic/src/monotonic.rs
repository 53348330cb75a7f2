use std::collections::VecDeque;

/// Which extreme a [MonotonicQueue] keeps at its front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    /// Values are kept in decreasing order, the front is the window maximum
    Max,
    /// Values are kept in increasing order, the front is the window minimum
    Min,
}

impl Extreme {
    /// Returns `true` if `incoming` makes `kept` useless for all future windows
    #[inline]
    fn dominates<T: PartialOrd>(&self, incoming: &T, kept: &T) -> bool {
        match self {
            Extreme::Max => incoming >= kept,
            Extreme::Min => incoming <= kept,
        }
    }
}

/// A deque of `(index, value)` candidates for sliding window extremes
///
/// Each value is pushed and popped at most once, so a full scan runs in `O(n)` time.
#[derive(Debug, Clone)]
pub struct MonotonicQueue<T> {
    deque: VecDeque<(usize, T)>,
    extreme: Extreme,
}

impl<T: PartialOrd> MonotonicQueue<T> {
    /// Creates an empty queue
    pub fn new(extreme: Extreme) -> Self {
        Self {
            deque: VecDeque::new(),
            extreme,
        }
    }

    /// Pushes the value at `index`, dropping every candidate it dominates
    pub fn push(&mut self, index: usize, value: T) {
        while self
            .deque
            .back()
            .is_some_and(|(_, kept)| self.extreme.dominates(&value, kept))
        {
            self.deque.pop_back();
        }
        self.deque.push_back((index, value));
    }

    /// Drops every candidate whose index is below `start`
    pub fn evict_before(&mut self, start: usize) {
        while self.deque.front().is_some_and(|(i, _)| *i < start) {
            self.deque.pop_front();
        }
    }

    /// Returns the current extreme
    pub fn front(&self) -> Option<&T> {
        self.deque.front().map(|(_, v)| v)
    }

    /// Returns the number of candidates
    pub fn len(&self) -> usize {
        self.deque.len()
    }

    /// Returns `true` if there are no candidates
    pub fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }
}

/// Maximum of every window of `k` consecutive values
///
/// Returns an empty vec if `k == 0` or `k > values.len()`.
///
/// ```
/// use flatseg_classic::monotonic::sliding_window_max;
///
/// assert_eq!(sliding_window_max(&[1, 3, -1, -3, 5, 3, 6, 7], 3), vec![3, 3, 5, 5, 6, 7]);
/// ```
pub fn sliding_window_max<T: PartialOrd + Clone>(values: &[T], k: usize) -> Vec<T> {
    sliding_window(values, k, Extreme::Max)
}

/// Minimum of every window of `k` consecutive values
///
/// Returns an empty vec if `k == 0` or `k > values.len()`.
pub fn sliding_window_min<T: PartialOrd + Clone>(values: &[T], k: usize) -> Vec<T> {
    sliding_window(values, k, Extreme::Min)
}

fn sliding_window<T: PartialOrd + Clone>(values: &[T], k: usize, extreme: Extreme) -> Vec<T> {
    if k == 0 || k > values.len() {
        return Vec::new();
    }
    let mut queue = MonotonicQueue::new(extreme);
    let mut res = Vec::with_capacity(values.len() - k + 1);
    for (i, v) in values.iter().enumerate() {
        queue.evict_before((i + 1).saturating_sub(k));
        queue.push(i, v.clone());
        if i + 1 >= k {
            if let Some(front) = queue.front() {
                res.push(front.clone());
            }
        }
    }
    res
}

/// Index of the nearest strictly greater value to the right of every position
pub fn next_greater<T: PartialOrd>(values: &[T]) -> Vec<Option<usize>> {
    scan(values, (0..values.len()).collect(), |cur, top| cur > top)
}

/// Index of the nearest strictly smaller value to the right of every position
pub fn next_smaller<T: PartialOrd>(values: &[T]) -> Vec<Option<usize>> {
    scan(values, (0..values.len()).collect(), |cur, top| cur < top)
}

/// Index of the nearest strictly greater value to the left of every position
pub fn previous_greater<T: PartialOrd>(values: &[T]) -> Vec<Option<usize>> {
    let order = (0..values.len()).rev().collect();
    scan(values, order, |cur, top| cur > top)
}

/// Index of the nearest strictly smaller value to the left of every position
pub fn previous_smaller<T: PartialOrd>(values: &[T]) -> Vec<Option<usize>> {
    let order = (0..values.len()).rev().collect();
    scan(values, order, |cur, top| cur < top)
}

/// Walks `values` in `order` with a monotonic stack of pending indices.
///
/// Whenever the current value `breaks` the value on top of the stack, the current index
/// is the answer for the popped index.
fn scan<T, F>(values: &[T], order: Vec<usize>, breaks: F) -> Vec<Option<usize>>
where
    F: Fn(&T, &T) -> bool,
{
    let mut res = vec![None; values.len()];
    let mut stack: Vec<usize> = Vec::with_capacity(values.len());
    for i in order {
        while let Some(&top) = stack.last() {
            if !breaks(&values[i], &values[top]) {
                break;
            }
            res[top] = Some(i);
            stack.pop();
        }
        stack.push(i);
    }
    res
}
