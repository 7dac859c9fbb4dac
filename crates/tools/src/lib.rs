//! Developer tooling: an egui debug panel bound to a scene mesh.
//!
//! # Invariants
//! - Every numeric edit is clamped to its slider range and snapped to its
//!   step before it reaches the mesh.
//! - Edits are immediate; there is no apply button and no undo.

mod panel;

pub use panel::{CubeField, DebugPanel, Folder, NumberBinding, PanelEntry};
