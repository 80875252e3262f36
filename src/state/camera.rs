// Camera state and the screen <-> world transforms for the map viewport.
use serde::{Deserialize, Serialize};

/// A point in map (world) space. `y` grows upwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &WorldPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A point on the canvas in CSS pixels. `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Sub-rectangle of the world the camera fits to on resize and map change.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Region {
    /// The whole square world `[min, max] x [min, max]`.
    pub fn square(min: f64, max: f64) -> Self {
        Self {
            min_x: min,
            max_x: max,
            min_y: min,
            max_y: max,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    pub fn contains(&self, p: &WorldPoint) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Canvas size in CSS pixels plus the device pixel ratio of the backing store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewSize {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Default for ViewSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            pixel_ratio: 1.0,
        }
    }
}

impl ViewSize {
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width * 0.5, self.height * 0.5)
    }

    /// Backing store size in device pixels.
    pub fn device_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio.max(0.0);
        (
            (self.width * ratio).max(0.0).round() as u32,
            (self.height * ratio).max(0.0).round() as u32,
        )
    }
}

/// Zoom-anchored position: `world` must stay under `screen` while zoom changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomAnchor {
    pub screen: ScreenPoint,
    pub world: WorldPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World-space focal point, drawn at the canvas center.
    pub x: f64,
    pub y: f64,
    /// Current scale (screen px per world unit), possibly mid-interpolation.
    pub zoom: f64,
    pub target_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
            target_zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    pub fn screen_to_world(&self, view: ViewSize, sx: f64, sy: f64) -> WorldPoint {
        let c = view.center();
        WorldPoint::new(
            (sx - c.x) / self.zoom + self.x,
            self.y - (sy - c.y) / self.zoom,
        )
    }

    pub fn world_to_screen(&self, view: ViewSize, wx: f64, wy: f64) -> ScreenPoint {
        let c = view.center();
        ScreenPoint::new(
            (wx - self.x) * self.zoom + c.x,
            (self.y - wy) * self.zoom + c.y,
        )
    }

    /// Screen-space drag. Inverse-scaled by zoom so the map follows the pointer.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.x -= dx / self.zoom;
        self.y += dy / self.zoom;
    }

    /// Re-solve the camera position so `anchor.world` maps to `anchor.screen`
    /// at the current zoom.
    pub fn pin(&mut self, view: ViewSize, anchor: &ZoomAnchor) {
        let under = self.screen_to_world(view, anchor.screen.x, anchor.screen.y);
        self.x += anchor.world.x - under.x;
        self.y += anchor.world.y - under.y;
    }

    pub fn clamp_zoom(&mut self, min_zoom: f64, max_zoom: f64) {
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
        self.target_zoom = self.target_zoom.clamp(min_zoom, max_zoom);
    }

    /// Cover fit: fill the view with `region`, cropping whatever overflows.
    pub fn fit_cover(&mut self, view: ViewSize, region: &Region, min_zoom: f64, max_zoom: f64) {
        let zoom = cover_zoom(view, region, min_zoom, max_zoom);
        let center = region.center();
        self.x = center.x;
        self.y = center.y;
        self.zoom = zoom;
        self.target_zoom = zoom;
    }
}

pub fn cover_zoom(view: ViewSize, region: &Region, min_zoom: f64, max_zoom: f64) -> f64 {
    let rw = region.width().abs().max(f64::EPSILON);
    let rh = region.height().abs().max(f64::EPSILON);
    (view.width / rw).max(view.height / rh).clamp(min_zoom, max_zoom)
}
