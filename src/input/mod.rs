pub mod handler;
pub mod slot;

pub use handler::{InputHandler, KeyAction};
pub use slot::{ControlFlags, DirectionSlot};
