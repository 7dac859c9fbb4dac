use crate::action::Action;
use glam::Vec2;

/// Middle-drag distance worth one wheel step is 100 pixels.
const DOLLY_STEPS_PER_PIXEL: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    fn any(self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Rotate,
    Pan,
    Dolly,
}

/// Tracks button and cursor state and emits actions.
///
/// Mapping: primary drag rotates, secondary drag pans, middle drag dollies,
/// wheel dollies. Holding a modifier turns primary and middle drags into pans.
#[derive(Debug, Default)]
pub struct PointerTracker {
    cursor: Option<Vec2>,
    drag: Option<(PointerButton, Drag)>,
    modifiers: Modifiers,
}

impl PointerTracker {
    /// Tracker with no drag in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest modifier state. Read when a drag starts.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Whether a button is currently held in a drag.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Press starts a drag if none is active; releasing the dragging
    /// button ends it. Other buttons are ignored mid-drag.
    pub fn button(&mut self, button: PointerButton, pressed: bool) {
        if !pressed {
            if self.drag.is_some_and(|(held, _)| held == button) {
                self.drag = None;
            }
            return;
        }
        if self.drag.is_some() {
            return;
        }
        let mode = match button {
            PointerButton::Primary if self.modifiers.any() => Drag::Pan,
            PointerButton::Primary => Drag::Rotate,
            PointerButton::Secondary => Drag::Pan,
            PointerButton::Middle if self.modifiers.any() => Drag::Pan,
            PointerButton::Middle => Drag::Dolly,
            PointerButton::Other => return,
        };
        tracing::debug!("drag start: {button:?} -> {mode:?}");
        self.drag = Some((button, mode));
    }

    /// Record a new cursor position; returns an action while dragging.
    pub fn cursor_moved(&mut self, position: Vec2) -> Option<Action> {
        let previous = self.cursor.replace(position)?;
        let (_, mode) = self.drag?;
        let delta = position - previous;
        let action = match mode {
            Drag::Rotate => Action::Rotate {
                dx: delta.x,
                dy: delta.y,
            },
            Drag::Pan => Action::Pan {
                dx: delta.x,
                dy: delta.y,
            },
            // Dragging down moves away from the target.
            Drag::Dolly => Action::Zoom(-delta.y * DOLLY_STEPS_PER_PIXEL),
        };
        (!action.is_noop()).then_some(action)
    }

    /// The cursor left the surface: forget the anchor and any drag.
    pub fn cursor_left(&mut self) {
        self.cursor = None;
        self.drag = None;
    }

    /// Wheel input in line steps, positive away from the user.
    pub fn wheel(&mut self, steps: f32) -> Option<Action> {
        let action = Action::Zoom(steps);
        (!action.is_noop()).then_some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(tracker: &mut PointerTracker, button: PointerButton, to: Vec2) -> Option<Action> {
        tracker.cursor_moved(Vec2::new(100.0, 100.0));
        tracker.button(button, true);
        tracker.cursor_moved(to)
    }

    #[test]
    fn primary_drag_rotates() {
        let mut t = PointerTracker::new();
        let a = drag(&mut t, PointerButton::Primary, Vec2::new(110.0, 95.0));
        assert_eq!(a, Some(Action::Rotate { dx: 10.0, dy: -5.0 }));
    }

    #[test]
    fn secondary_drag_pans() {
        let mut t = PointerTracker::new();
        let a = drag(&mut t, PointerButton::Secondary, Vec2::new(90.0, 100.0));
        assert_eq!(a, Some(Action::Pan { dx: -10.0, dy: 0.0 }));
    }

    #[test]
    fn modifier_turns_primary_into_pan() {
        let mut t = PointerTracker::new();
        t.set_modifiers(Modifiers {
            shift: true,
            ..Modifiers::default()
        });
        let a = drag(&mut t, PointerButton::Primary, Vec2::new(101.0, 102.0));
        assert_eq!(a, Some(Action::Pan { dx: 1.0, dy: 2.0 }));
    }

    fn zoom_steps(action: Option<Action>) -> f32 {
        match action {
            Some(Action::Zoom(steps)) => steps,
            other => panic!("expected zoom, got {other:?}"),
        }
    }

    #[test]
    fn middle_drag_dollies_by_direction() {
        let mut t = PointerTracker::new();
        let out = zoom_steps(drag(&mut t, PointerButton::Middle, Vec2::new(100.0, 130.0)));
        assert!((out + 0.3).abs() < 1e-6);
        let back = zoom_steps(t.cursor_moved(Vec2::new(100.0, 120.0)));
        assert!((back - 0.1).abs() < 1e-6);
        assert_eq!(t.cursor_moved(Vec2::new(140.0, 120.0)), None);
    }

    #[test]
    fn middle_drag_zoom_ignores_event_rate() {
        let mut fine = PointerTracker::new();
        let mut total = zoom_steps(drag(&mut fine, PointerButton::Middle, Vec2::new(100.0, 101.0)));
        for y in 102..=150 {
            total += zoom_steps(fine.cursor_moved(Vec2::new(100.0, y as f32)));
        }

        let mut coarse = PointerTracker::new();
        let once = zoom_steps(drag(&mut coarse, PointerButton::Middle, Vec2::new(100.0, 150.0)));
        assert!((total - once).abs() < 1e-4);
        assert!((once + 0.5).abs() < 1e-6);
    }

    #[test]
    fn shift_middle_drag_pans() {
        let mut t = PointerTracker::new();
        t.set_modifiers(Modifiers {
            shift: true,
            ..Modifiers::default()
        });
        let a = drag(&mut t, PointerButton::Middle, Vec2::new(100.0, 130.0));
        assert_eq!(a, Some(Action::Pan { dx: 0.0, dy: 30.0 }));
    }

    #[test]
    fn moves_without_button_do_nothing() {
        let mut t = PointerTracker::new();
        assert_eq!(t.cursor_moved(Vec2::new(1.0, 1.0)), None);
        assert_eq!(t.cursor_moved(Vec2::new(5.0, 5.0)), None);
        assert!(!t.is_dragging());
    }

    #[test]
    fn release_ends_only_the_owning_drag() {
        let mut t = PointerTracker::new();
        drag(&mut t, PointerButton::Primary, Vec2::new(101.0, 100.0));
        t.button(PointerButton::Secondary, false);
        assert!(t.is_dragging());
        t.button(PointerButton::Primary, false);
        assert!(!t.is_dragging());
        assert_eq!(t.cursor_moved(Vec2::new(150.0, 150.0)), None);
    }

    #[test]
    fn cursor_left_cancels_drag() {
        let mut t = PointerTracker::new();
        drag(&mut t, PointerButton::Primary, Vec2::new(101.0, 100.0));
        t.cursor_left();
        assert!(!t.is_dragging());
        // First move after re-entering only sets the anchor.
        assert_eq!(t.cursor_moved(Vec2::new(0.0, 0.0)), None);
    }

    #[test]
    fn wheel_zooms() {
        let mut t = PointerTracker::new();
        assert_eq!(t.wheel(1.0), Some(Action::Zoom(1.0)));
        assert_eq!(t.wheel(0.0), None);
    }
}
