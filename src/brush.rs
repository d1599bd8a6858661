//! Interactive brush state.
//!
//! The brush is a small state machine driven by normalized pointer events:
//! press activates it at a position, move updates the position while
//! active, release (or the pointer leaving the window) deactivates it. The
//! step kernel consumes the state once per step via [`Brush::stamp`]; an
//! inactive brush produces no stamp and therefore has no effect on the
//! field at all.
//!
//! Positions are normalized to [0, 1] x [0, 1] with Y growing **up**, the
//! grid's convention. Window code delivering cursor positions (where Y
//! grows down) must invert the Y coordinate before calling in; the winit
//! layer in `simulation` does this.

use glam::Vec2;

/// A circular brush that injects chemical B where the pointer is held.
///
/// Radius and strength are configuration constants; only the active flag
/// and position change during an interaction.
#[derive(Debug, Clone, Copy)]
pub struct Brush {
    active: bool,
    position: Vec2,
    radius: f32,
    strength: f32,
}

/// An immutable snapshot of an active brush, consumed by the step kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushStamp {
    /// Normalized center of the brush.
    pub position: Vec2,
    /// Normalized radius of the circular falloff.
    pub radius: f32,
    /// Peak blend strength at the brush center.
    pub strength: f32,
}

impl Brush {
    pub fn new(radius: f32, strength: f32) -> Self {
        Self {
            active: false,
            position: Vec2::new(0.5, 0.5),
            radius,
            strength,
        }
    }

    /// Pointer went down: activate at the given position.
    pub fn press(&mut self, position: Vec2) {
        self.active = true;
        self.position = position;
    }

    /// Pointer moved: update the position. No-op while inactive.
    pub fn moved(&mut self, position: Vec2) {
        if self.active {
            self.position = position;
        }
    }

    /// Pointer went up or left the window: deactivate.
    pub fn release(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Snapshot for the kernel: `Some` while active, `None` otherwise.
    ///
    /// Returning `None` removes the brush code path from the step entirely,
    /// so an inactive brush is indistinguishable from no brush.
    pub fn stamp(&self) -> Option<BrushStamp> {
        self.active.then(|| BrushStamp {
            position: self.position,
            radius: self.radius,
            strength: self.strength,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_activates_and_positions() {
        let mut brush = Brush::new(0.03, 0.9);
        assert!(!brush.is_active());
        assert!(brush.stamp().is_none());

        brush.press(Vec2::new(0.25, 0.75));
        assert!(brush.is_active());
        let stamp = brush.stamp().unwrap();
        assert_eq!(stamp.position, Vec2::new(0.25, 0.75));
        assert_eq!(stamp.radius, 0.03);
        assert_eq!(stamp.strength, 0.9);
    }

    #[test]
    fn test_move_updates_only_while_active() {
        let mut brush = Brush::new(0.03, 0.9);

        // Moves before a press are ignored.
        brush.moved(Vec2::new(0.9, 0.9));
        assert_eq!(brush.position(), Vec2::new(0.5, 0.5));
        assert!(!brush.is_active());

        brush.press(Vec2::new(0.1, 0.1));
        brush.moved(Vec2::new(0.2, 0.3));
        assert_eq!(brush.position(), Vec2::new(0.2, 0.3));
    }

    #[test]
    fn test_release_deactivates() {
        let mut brush = Brush::new(0.03, 0.9);
        brush.press(Vec2::new(0.5, 0.5));
        brush.release();
        assert!(!brush.is_active());
        assert!(brush.stamp().is_none());

        // A move after release must not reposition.
        brush.moved(Vec2::new(0.0, 0.0));
        assert_eq!(brush.position(), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_repeated_press_repositions() {
        let mut brush = Brush::new(0.03, 0.9);
        brush.press(Vec2::new(0.1, 0.1));
        brush.press(Vec2::new(0.8, 0.2));
        assert!(brush.is_active());
        assert_eq!(brush.position(), Vec2::new(0.8, 0.2));
    }
}
