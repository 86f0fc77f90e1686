//! Lock-free handoff between the input task and the game loop
//!
//! The input task overwrites the latest requested direction; the game loop
//! reads whatever is there when it ticks. Directions entered between two
//! ticks are lost, last write wins.

use std::sync::{
    atomic::{AtomicBool, AtomicU8, Ordering},
    Arc,
};

use crate::game::Direction;

const NONE: u8 = 0;

fn encode(direction: Direction) -> u8 {
    match direction {
        Direction::North => 1,
        Direction::South => 2,
        Direction::East => 3,
        Direction::West => 4,
    }
}

fn decode(raw: u8) -> Option<Direction> {
    match raw {
        1 => Some(Direction::North),
        2 => Some(Direction::South),
        3 => Some(Direction::East),
        4 => Some(Direction::West),
        _ => None,
    }
}

/// Single-slot, latest-value cell holding the requested direction
#[derive(Debug, Clone, Default)]
pub struct DirectionSlot(Arc<AtomicU8>);

impl DirectionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, direction: Direction) {
        self.0.store(encode(direction), Ordering::Relaxed);
    }

    /// Latest requested direction, or `None` before the first key press
    pub fn load(&self) -> Option<Direction> {
        decode(self.0.load(Ordering::Relaxed))
    }

    pub fn clear(&self) {
        self.0.store(NONE, Ordering::Relaxed);
    }
}

/// Quit and restart requests raised by the input task
#[derive(Debug, Clone, Default)]
pub struct ControlFlags {
    quit: Arc<AtomicBool>,
    restart: Arc<AtomicBool>,
}

impl ControlFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_quit(&self) {
        self.quit.store(true, Ordering::Relaxed);
    }

    pub fn should_quit(&self) -> bool {
        self.quit.load(Ordering::Relaxed)
    }

    pub fn request_restart(&self) {
        self.restart.store(true, Ordering::Relaxed);
    }

    /// Consume a pending restart request
    pub fn take_restart(&self) -> bool {
        self.restart.swap(false, Ordering::Relaxed)
    }
}
