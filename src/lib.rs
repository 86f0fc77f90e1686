//! Grid Snake - a classic snake game on a bounded grid
//!
//! This library provides:
//! - Core simulation (game module): grid, snake body tracker and the step engine
//! - Terminal input capture (input module)
//! - TUI rendering driven by per-tick change lists (render module)
//! - Session metrics (metrics module)
//! - The interactive human mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
