//! Shared value types used by every cubeview crate.

mod color;
mod types;

pub use color::{Color, ColorParseError};
pub use types::Transform;
