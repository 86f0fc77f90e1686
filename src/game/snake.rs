use std::collections::VecDeque;

use super::grid::Coordinate;

/// Body tracker for the snake
///
/// Segments are stored tail first, head last. Growth is deferred: each unit of
/// pending growth makes one future [`Snake::walk`] keep the tail instead of
/// dropping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coordinate>,
    pending_growth: u32,
}

impl Snake {
    /// Create a one-segment snake at `start`
    pub fn new(start: Coordinate) -> Self {
        Self {
            body: VecDeque::from([start]),
            pending_growth: 0,
        }
    }

    /// Push `coord` as the new head
    ///
    /// Returns the tail that was dropped, or `None` if pending growth kept it.
    /// Clearing the returned cell on the grid is the caller's job.
    pub fn walk(&mut self, coord: Coordinate) -> Option<Coordinate> {
        self.body.push_back(coord);

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
            None
        } else {
            self.body.pop_front()
        }
    }

    pub fn grow(&mut self, amount: u32) {
        self.pending_growth = self.pending_growth.saturating_add(amount);
    }

    /// Get the head position
    pub fn head(&self) -> Coordinate {
        // Never empty: walk always pushes before it pops.
        self.body[self.body.len() - 1]
    }

    /// Get the tail position (next to be dropped)
    pub fn tail(&self) -> Coordinate {
        self.body[0]
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    /// Body segments from tail to head
    pub fn body(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
