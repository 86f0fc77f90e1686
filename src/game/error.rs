use thiserror::Error;

use super::grid::Coordinate;

/// Reasons a game cannot be set up
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("grid must be at least 1x1, got {height}x{width}")]
    EmptyGrid { height: usize, width: usize },

    #[error("snake origin ({}, {}) is outside the {height}x{width} grid", .origin.row, .origin.col)]
    IllegalOrigin {
        origin: Coordinate,
        height: usize,
        width: usize,
    },

    #[error("fruit at ({}, {}) is outside the {height}x{width} grid", .fruit.row, .fruit.col)]
    IllegalFruit {
        fruit: Coordinate,
        height: usize,
        width: usize,
    },

    #[error("fruit at ({}, {}) overlaps the snake origin", .0.row, .0.col)]
    FruitOnSnake(Coordinate),
}
