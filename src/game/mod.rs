//! Core game logic module for Snake
//!
//! This module contains all the simulation logic without any I/O or rendering dependencies.
//! The driver feeds it one direction per tick and renders the returned change list.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod grid;
pub mod rng;
pub mod snake;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, StepOutcome, TileChange};
pub use error::GameError;
pub use grid::{Coordinate, Grid, TileKind};
pub use rng::{RandRange, RangeRng};
pub use snake::Snake;
