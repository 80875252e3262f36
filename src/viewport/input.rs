// Host-facing input capability. The web host maps DOM events onto these
// calls; tests call them directly.
use super::MapViewport;
use crate::state::{Release, ScreenPoint, ViewSize, WorldPoint};

pub trait MapInput {
    fn on_pointer_down(&mut self, x: f64, y: f64);
    fn on_pointer_move(&mut self, x: f64, y: f64);
    /// Returns the placed guess when the gesture was a click rather than a pan.
    fn on_pointer_up(&mut self, x: f64, y: f64) -> Option<WorldPoint>;
    fn on_pointer_leave(&mut self);
    fn on_wheel(&mut self, x: f64, y: f64, delta_y: f64);
    /// `width`/`height` in CSS pixels.
    fn on_resize(&mut self, width: f64, height: f64, pixel_ratio: f64);
}

impl MapInput for MapViewport {
    fn on_pointer_down(&mut self, x: f64, y: f64) {
        self.pointer.press(ScreenPoint::new(x, y));
        // Grabbing the map stops any flight in progress.
        self.flight = None;
    }

    fn on_pointer_move(&mut self, x: f64, y: f64) {
        let threshold = self.options.drag_threshold;
        let Some((dx, dy)) = self.pointer.drag_to(ScreenPoint::new(x, y), threshold) else {
            return;
        };
        self.camera.pan_by(dx, dy);
        // The anchored world point travels with the drag.
        if let Some(anchor) = self.anchor.as_mut() {
            anchor.screen.x += dx;
            anchor.screen.y += dy;
        }
    }

    fn on_pointer_up(&mut self, x: f64, y: f64) -> Option<WorldPoint> {
        match self
            .pointer
            .release(ScreenPoint::new(x, y), self.options.drag_threshold)
        {
            Release::Click(_) if !self.guess_enabled => None,
            Release::Click(at) => {
                let guess = self.screen_to_world(at.x, at.y);
                self.guess_marker = Some(guess);
                log::debug!("guess placed at ({:.1}, {:.1})", guess.x, guess.y);
                Some(guess)
            }
            Release::Pan | Release::Ignored => None,
        }
    }

    fn on_pointer_leave(&mut self) {
        self.pointer.cancel();
    }

    fn on_wheel(&mut self, x: f64, y: f64, delta_y: f64) {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }
        self.zoom_at(ScreenPoint::new(x, y), delta_y < 0.0);
    }

    fn on_resize(&mut self, width: f64, height: f64, pixel_ratio: f64) {
        let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        self.view = ViewSize {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio: ratio,
        };
        self.fit_region();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::tests::viewport;

    #[test]
    fn wheel_up_zooms_in_until_max() {
        let mut vp = viewport();
        let mut last = vp.camera().target_zoom;
        for _ in 0..40 {
            vp.on_wheel(400.0, 300.0, -1.0);
            let z = vp.camera().target_zoom;
            if last < 8.0 {
                assert!(z > last);
            } else {
                assert_eq!(z, 8.0);
            }
            last = z;
        }
        assert_eq!(last, 8.0);
    }

    #[test]
    fn wheel_down_zooms_out_until_min() {
        let mut vp = viewport();
        for _ in 0..5 {
            vp.on_wheel(400.0, 300.0, -1.0);
        }
        let mut last = vp.camera().target_zoom;
        for _ in 0..20 {
            vp.on_wheel(10.0, 20.0, 53.0);
            let z = vp.camera().target_zoom;
            if last > 0.21 {
                assert!(z < last);
            } else {
                assert_eq!(z, 0.21);
            }
            last = z;
        }
        assert_eq!(last, 0.21);
    }

    #[test]
    fn zero_wheel_delta_is_ignored() {
        let mut vp = viewport();
        vp.on_wheel(400.0, 300.0, 0.0);
        assert!(vp.zoom_anchor().is_none());
        assert_eq!(vp.camera().target_zoom, 0.21);
    }

    #[test]
    fn click_within_threshold_places_guess() {
        let mut vp = viewport();
        vp.on_pointer_down(200.0, 100.0);
        vp.on_pointer_move(202.0, 102.0);
        let placed = vp.on_pointer_up(202.0, 103.0);
        let expected = vp.screen_to_world(202.0, 103.0);
        assert_eq!(placed, Some(expected));
        assert_eq!(vp.guess_marker(), Some(expected));
    }

    #[test]
    fn drag_pans_and_leaves_guess_alone() {
        let mut vp = viewport();
        vp.on_pointer_down(400.0, 300.0);
        vp.on_pointer_up(400.0, 300.0);
        let guess = vp.guess_marker();
        let before = vp.camera().position();

        vp.on_pointer_down(400.0, 300.0);
        vp.on_pointer_move(442.0, 279.0);
        assert_eq!(vp.on_pointer_up(442.0, 279.0), None);
        assert_eq!(vp.guess_marker(), guess);
        let after = vp.camera().position();
        let zoom = vp.camera().zoom;
        assert!((after.x - (before.x - 42.0 / zoom)).abs() < 1e-9);
        assert!((after.y - (before.y - 21.0 / zoom)).abs() < 1e-9);
    }

    #[test]
    fn leaving_canvas_cancels_the_gesture() {
        let mut vp = viewport();
        vp.on_pointer_down(10.0, 10.0);
        vp.on_pointer_leave();
        assert_eq!(vp.on_pointer_up(10.0, 10.0), None);
        assert_eq!(vp.guess_marker(), None);
    }

    #[test]
    fn resize_refits_and_tracks_pixel_ratio() {
        let mut vp = viewport();
        vp.on_wheel(0.0, 0.0, -1.0);
        vp.on_resize(8192.0, 1000.0, 2.0);
        assert_eq!(vp.view().device_size(), (16384, 2000));
        assert_eq!(vp.camera().zoom, 2.0);
        assert_eq!(vp.camera().target_zoom, 2.0);
        assert!(vp.zoom_anchor().is_none());
    }

    #[test]
    fn pointer_down_stops_flight() {
        let mut vp = viewport();
        vp.fly_to_world(100.0, 0.0, None, Default::default()).unwrap();
        vp.on_pointer_down(1.0, 1.0);
        assert!(!vp.is_flying());
    }

    #[test]
    fn locked_viewport_pans_but_ignores_clicks() {
        let mut vp = viewport();
        vp.set_guess_enabled(false);
        vp.on_pointer_down(300.0, 300.0);
        assert_eq!(vp.on_pointer_up(300.0, 300.0), None);
        assert_eq!(vp.guess_marker(), None);

        let before = vp.camera().position();
        vp.on_pointer_down(300.0, 300.0);
        vp.on_pointer_move(350.0, 300.0);
        vp.on_pointer_up(350.0, 300.0);
        assert!(vp.camera().position().x < before.x);

        vp.set_guess_enabled(true);
        vp.on_pointer_down(300.0, 300.0);
        assert!(vp.on_pointer_up(300.0, 300.0).is_some());
    }
}
