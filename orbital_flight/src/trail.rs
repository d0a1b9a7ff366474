//! Bounded history of past ship positions, for display only

use std::collections::VecDeque;

use glam::DVec2;

#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<DVec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, dropping the oldest once full
    pub fn push(&mut self, point: DVec2) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Points in chronological order, newest last
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &DVec2> + '_ {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<DVec2> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_most_recent_points_in_order() {
        let mut trail = Trail::new(1000);
        for i in 0..2500 {
            trail.push(DVec2::new(i as f64, 0.0));
        }

        assert_eq!(trail.len(), 1000);
        let xs: Vec<f64> = trail.iter().map(|p| p.x).collect();
        let expected: Vec<f64> = (1500..2500).map(|i| i as f64).collect();
        assert_eq!(xs, expected);
        assert_eq!(trail.latest(), Some(DVec2::new(2499.0, 0.0)));
    }

    #[test]
    fn below_capacity_keeps_everything() {
        let mut trail = Trail::new(1000);
        for i in 0..10 {
            trail.push(DVec2::splat(i as f64));
        }
        assert_eq!(trail.len(), 10);
        assert_eq!(trail.iter().next(), Some(&DVec2::ZERO));
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut trail = Trail::new(0);
        trail.push(DVec2::ONE);
        assert!(trail.is_empty());
    }
}
