//! Per-tick logic that operates on components.

mod exchange;
mod movement;
mod perish;

pub use exchange::*;
pub use movement::*;
pub use perish::*;
