use serde::{Deserialize, Serialize};
use std::fmt;

/// Square detection centred at (`row`, `col`) with side `size`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub row: f32,
    pub col: f32,
    pub size: f32,
    pub score: f32,
}

impl Detection {
    pub fn new(row: f32, col: f32, size: f32, score: f32) -> Self {
        Self {
            row,
            col,
            size,
            score,
        }
    }

    /// Copy with the geometry multiplied by `factor`; the score is untouched.
    #[inline]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            row: self.row * factor,
            col: self.col * factor,
            size: self.size * factor,
            score: self.score,
        }
    }

    /// Axis-aligned bounds as `(top, left, bottom, right)`.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let half = 0.5 * self.size;
        (
            self.row - half,
            self.col - half,
            self.row + half,
            self.col + half,
        )
    }
}

/// One line per detection: integer row, col and size followed by the score.
impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {:.6}",
            self.row as i32, self.col as i32, self.size as i32, self.score
        )
    }
}

/// Ordered sequence of detections that never grows past its capacity.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DetectionBatch {
    capacity: usize,
    items: Vec<Detection>,
}

impl DetectionBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Build from `items`, keeping at most `capacity` of them in order.
    pub fn from_vec(capacity: usize, mut items: Vec<Detection>) -> Self {
        items.truncate(capacity);
        Self { capacity, items }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.items.len()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Append one detection. Returns it back when the batch is full.
    pub fn push(&mut self, detection: Detection) -> Result<(), Detection> {
        if self.is_full() {
            return Err(detection);
        }
        self.items.push(detection);
        Ok(())
    }

    /// Append as many items from `iter` as fit; returns how many were taken.
    pub fn extend_bounded<I>(&mut self, iter: I) -> usize
    where
        I: IntoIterator<Item = Detection>,
    {
        let room = self.remaining();
        let before = self.items.len();
        self.items.extend(iter.into_iter().take(room));
        self.items.len() - before
    }

    /// Drop everything past `len`.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// Keep the detections matching `keep`, preserving order.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Detection) -> bool,
    {
        self.items.retain(keep);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Detection> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Detection] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Detection> {
        self.items
    }
}

impl<'a> IntoIterator for &'a DetectionBatch {
    type Item = &'a Detection;
    type IntoIter = std::slice::Iter<'a, Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for DetectionBatch {
    type Item = Detection;
    type IntoIter = std::vec::IntoIter<Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_refuses_past_capacity() {
        let mut batch = DetectionBatch::with_capacity(2);
        assert!(batch.push(Detection::new(1.0, 1.0, 4.0, 0.5)).is_ok());
        assert!(batch.push(Detection::new(2.0, 2.0, 4.0, 0.5)).is_ok());
        let extra = Detection::new(3.0, 3.0, 4.0, 0.5);
        assert_eq!(batch.push(extra), Err(extra));
        assert_eq!(batch.len(), 2);
        assert!(batch.is_full());
    }

    #[test]
    fn extend_bounded_takes_only_what_fits() {
        let mut batch = DetectionBatch::with_capacity(3);
        let taken = batch.extend_bounded((0..10).map(|i| Detection::new(i as f32, 0.0, 1.0, 0.0)));
        assert_eq!(taken, 3);
        assert_eq!(batch.as_slice()[2].row, 2.0);
        assert_eq!(batch.remaining(), 0);
    }

    #[test]
    fn display_truncates_geometry() {
        let d = Detection::new(12.9, 7.2, 31.99, 4.25);
        assert_eq!(d.to_string(), "12 7 31 4.250000");
    }

    #[test]
    fn scaled_keeps_score() {
        let d = Detection::new(3.0, 5.0, 7.0, -1.5).scaled(4.0);
        assert_eq!(d, Detection::new(12.0, 20.0, 28.0, -1.5));
        assert_eq!(d.bounds(), (-2.0, 6.0, 26.0, 34.0));
    }
}
