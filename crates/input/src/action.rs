/// A camera action produced by pointer input.
///
/// Deltas are in physical pixels; the orbit controls scale them by the
/// viewport height so behaviour does not depend on window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Orbit around the target.
    Rotate { dx: f32, dy: f32 },
    /// Slide the target and camera in screen space.
    Pan { dx: f32, dy: f32 },
    /// Dolly towards (positive) or away from (negative) the target, in wheel steps.
    Zoom(f32),
}

impl Action {
    /// Zero-length actions carry no information.
    pub fn is_noop(&self) -> bool {
        match *self {
            Action::Rotate { dx, dy } | Action::Pan { dx, dy } => dx == 0.0 && dy == 0.0,
            Action::Zoom(steps) => steps == 0.0,
        }
    }
}
