use std::collections::VecDeque;

/// Fixed-capacity FIFO of scores with an O(1) running mean
///
/// The running sum is rebuilt from the stored values once per full turnover
/// of the buffer so floating-point drift stays bounded.
#[derive(Debug, Clone)]
pub struct RollingHistory {
    values: VecDeque<f64>,
    capacity: usize,
    sum: f64,
    evictions: usize,
}

impl RollingHistory {
    /// A capacity of 0 is raised to 1
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
            sum: 0.0,
            evictions: 0,
        }
    }

    /// Append a value, evicting the oldest one when full
    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            if let Some(oldest) = self.values.pop_front() {
                self.sum -= oldest;
                self.evictions += 1;
            }
        }
        self.values.push_back(value);
        self.sum += value;

        if self.evictions >= self.capacity {
            self.evictions = 0;
            self.sum = self.values.iter().sum();
        }
    }

    /// Arithmetic mean of the stored values; 0 when empty
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.sum / self.values.len() as f64
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_exceeds_capacity() {
        let mut history = RollingHistory::new(5);
        for i in 0..1000 {
            history.push(i as f64);
            assert!(history.len() <= 5);
        }
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn test_mean_reflects_most_recent_values() {
        let mut history = RollingHistory::new(3);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            history.push(v);
        }
        let kept: Vec<f64> = history.iter().copied().collect();
        assert_eq!(kept, vec![3.0, 4.0, 5.0]);
        assert!((history.mean() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_mean_is_zero() {
        let history = RollingHistory::new(30);
        assert!(history.is_empty());
        assert_eq!(history.mean(), 0.0);
    }

    #[test]
    fn test_zero_capacity_holds_one_value() {
        let mut history = RollingHistory::new(0);
        history.push(1.0);
        history.push(2.0);
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.mean(), 2.0);
    }

    #[test]
    fn test_running_sum_does_not_drift() {
        let mut history = RollingHistory::new(30);
        for i in 0..100_000 {
            history.push(0.1 * (i % 7) as f64);
        }
        let exact: f64 = history.iter().sum::<f64>() / history.len() as f64;
        assert!((history.mean() - exact).abs() < 1e-9);
    }
}
