// Fly-to animation state: a timed, eased transition between two camera states.
use serde::Deserialize;
use serde_json::Value;

use super::camera::WorldPoint;
use crate::error::MapError;

pub const DEFAULT_DURATION_SECS: f64 = 0.5;
pub const MIN_DURATION_SECS: f64 = 0.01;
pub const DEFAULT_EASE_LINEARITY: f64 = 0.25;

pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// `linearity` 0 is fully eased, 1 is fully linear.
pub fn blend(t: f64, linearity: f64) -> f64 {
    linearity * t + (1.0 - linearity) * ease_in_out_cubic(t)
}

/// Where a flight should end. The pair form is `[y, x]`, matching how
/// locations are written as `[lat, lng]` style pairs.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlyTarget {
    Pair([f64; 2]),
    Point { x: f64, y: f64 },
}

impl FlyTarget {
    /// Accept untyped input (e.g. from JS or a JSON config) and reject any
    /// other shape or non-finite coordinates.
    pub fn from_value(value: &Value) -> Result<Self, MapError> {
        let target = FlyTarget::deserialize(value)
            .map_err(|_| MapError::InvalidFlyTarget(value.to_string()))?;
        let p = target.point();
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(MapError::InvalidFlyTarget(value.to_string()));
        }
        Ok(target)
    }

    pub fn point(&self) -> WorldPoint {
        match *self {
            FlyTarget::Pair([y, x]) => WorldPoint::new(x, y),
            FlyTarget::Point { x, y } => WorldPoint::new(x, y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlyOptions {
    pub duration_secs: f64,
    pub ease_linearity: f64,
}

impl Default for FlyOptions {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            ease_linearity: DEFAULT_EASE_LINEARITY,
        }
    }
}

/// Camera values produced by one flight sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightSample {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
    pub done: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Flight {
    pub start_x: f64,
    pub start_y: f64,
    pub start_zoom: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub end_zoom: f64,
    /// Latched by the first sample so the flight starts on the next frame.
    pub start_time: Option<f64>,
    pub duration_ms: f64,
    pub ease_linearity: f64,
}

impl Flight {
    pub fn new(start: (f64, f64, f64), end: (f64, f64, f64), opts: FlyOptions) -> Self {
        let duration_secs = if opts.duration_secs.is_finite() {
            opts.duration_secs.max(MIN_DURATION_SECS)
        } else {
            DEFAULT_DURATION_SECS
        };
        let ease_linearity = if opts.ease_linearity.is_finite() {
            opts.ease_linearity.clamp(0.0, 1.0)
        } else {
            DEFAULT_EASE_LINEARITY
        };
        Self {
            start_x: start.0,
            start_y: start.1,
            start_zoom: start.2,
            end_x: end.0,
            end_y: end.1,
            end_zoom: end.2,
            start_time: None,
            duration_ms: duration_secs * 1000.0,
            ease_linearity,
        }
    }

    pub fn progress(&self, now_ms: f64) -> f64 {
        let start = self.start_time.unwrap_or(now_ms);
        ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn sample(&mut self, now_ms: f64) -> FlightSample {
        if self.start_time.is_none() {
            self.start_time = Some(now_ms);
        }
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return FlightSample {
                x: self.end_x,
                y: self.end_y,
                zoom: self.end_zoom,
                done: true,
            };
        }
        let k = blend(t, self.ease_linearity);
        FlightSample {
            x: self.start_x + (self.end_x - self.start_x) * k,
            y: self.start_y + (self.end_y - self.start_y) * k,
            zoom: self.start_zoom + (self.end_zoom - self.start_zoom) * k,
            done: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ease_curve_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_eq!(ease_in_out_cubic(0.25), 0.0625);
        assert_eq!(blend(0.25, 0.0), 0.0625);
        assert_eq!(blend(0.25, 1.0), 0.25);
    }

    #[test]
    fn sample_follows_blend() {
        let mut f = Flight::new(
            (0.0, 0.0, 1.0),
            (100.0, -200.0, 3.0),
            FlyOptions {
                duration_secs: 1.0,
                ease_linearity: 0.5,
            },
        );
        let s0 = f.sample(1000.0);
        assert_eq!((s0.x, s0.y, s0.zoom, s0.done), (0.0, 0.0, 1.0, false));
        let s = f.sample(1250.0);
        let k = 0.5 * 0.25 + 0.5 * 0.0625;
        assert!((s.x - 100.0 * k).abs() < 1e-12);
        assert!((s.y + 200.0 * k).abs() < 1e-12);
        assert!((s.zoom - (1.0 + 2.0 * k)).abs() < 1e-12);
        let end = f.sample(2400.0);
        assert_eq!((end.x, end.y, end.zoom, end.done), (100.0, -200.0, 3.0, true));
    }

    #[test]
    fn options_are_clamped() {
        let f = Flight::new(
            (0.0, 0.0, 1.0),
            (0.0, 0.0, 1.0),
            FlyOptions {
                duration_secs: 0.0,
                ease_linearity: 4.0,
            },
        );
        assert_eq!(f.duration_ms, 10.0);
        assert_eq!(f.ease_linearity, 1.0);
    }

    #[test]
    fn target_shapes() {
        let pair = FlyTarget::from_value(&json!([10.0, 20.0])).unwrap();
        assert_eq!(pair.point(), WorldPoint::new(20.0, 10.0));
        let obj = FlyTarget::from_value(&json!({"x": 1.5, "y": -2})).unwrap();
        assert_eq!(obj.point(), WorldPoint::new(1.5, -2.0));
        for bad in [
            json!([1.0]),
            json!([1.0, 2.0, 3.0]),
            json!({"x": 1.0}),
            json!("here"),
            json!(null),
            json!(["a", "b"]),
        ] {
            assert!(matches!(
                FlyTarget::from_value(&bad),
                Err(MapError::InvalidFlyTarget(_))
            ));
        }
    }
}
