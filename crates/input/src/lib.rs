//! Pointer input: raw button/cursor/wheel events become camera actions.
//!
//! # Invariants
//! - The orbit controls consume actions, never raw window events.
//! - A drag only produces actions while its button is held.

pub mod action;
pub mod pointer;

pub use action::Action;
pub use pointer::{Modifiers, PointerButton, PointerTracker};
