// Pointer gesture state: tells a pan apart from a click.
use super::camera::ScreenPoint;

#[derive(Default, Debug, Clone, PartialEq)]
pub enum PointerState {
    #[default]
    Idle,
    Dragging {
        down: ScreenPoint,
        last: ScreenPoint,
        /// Sticky: once the pointer strays past the threshold the gesture is a pan.
        moved: bool,
    },
}

/// What a pointer-up resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Up without a matching down.
    Ignored,
    Pan,
    Click(ScreenPoint),
}

impl PointerState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, PointerState::Dragging { .. })
    }

    pub fn press(&mut self, at: ScreenPoint) {
        *self = PointerState::Dragging {
            down: at,
            last: at,
            moved: false,
        };
    }

    /// Returns the screen delta since the previous move, or `None` when idle.
    pub fn drag_to(&mut self, at: ScreenPoint, threshold: f64) -> Option<(f64, f64)> {
        match self {
            PointerState::Idle => None,
            PointerState::Dragging { down, last, moved } => {
                let delta = (at.x - last.x, at.y - last.y);
                *last = at;
                if down.distance_to(&at) > threshold {
                    *moved = true;
                }
                Some(delta)
            }
        }
    }

    pub fn release(&mut self, at: ScreenPoint, threshold: f64) -> Release {
        let state = std::mem::take(self);
        match state {
            PointerState::Idle => Release::Ignored,
            PointerState::Dragging { down, moved, .. } => {
                if moved || down.distance_to(&at) > threshold {
                    Release::Pan
                } else {
                    Release::Click(at)
                }
            }
        }
    }

    pub fn cancel(&mut self) {
        *self = PointerState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_wiggle_is_a_click() {
        let mut p = PointerState::default();
        p.press(ScreenPoint::new(10.0, 10.0));
        assert_eq!(p.drag_to(ScreenPoint::new(12.0, 11.0), 4.0), Some((2.0, 1.0)));
        assert_eq!(
            p.release(ScreenPoint::new(13.0, 12.0), 4.0),
            Release::Click(ScreenPoint::new(13.0, 12.0))
        );
        assert!(!p.is_dragging());
    }

    #[test]
    fn straying_past_threshold_sticks() {
        let mut p = PointerState::default();
        p.press(ScreenPoint::new(0.0, 0.0));
        p.drag_to(ScreenPoint::new(10.0, 0.0), 4.0);
        p.drag_to(ScreenPoint::new(1.0, 0.0), 4.0);
        assert_eq!(p.release(ScreenPoint::new(0.0, 0.0), 4.0), Release::Pan);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut p = PointerState::default();
        assert_eq!(p.drag_to(ScreenPoint::new(1.0, 1.0), 4.0), None);
        assert_eq!(p.release(ScreenPoint::new(1.0, 1.0), 4.0), Release::Ignored);
    }
}
