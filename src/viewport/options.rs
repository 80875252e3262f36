use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::model::GameCoords;
use crate::state::{Region, WorldPoint};

/// Sprite drawn in place of the fallback circle for a marker.
/// The image is drawn at the marker's screen position plus the offsets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkerSprite {
    pub src: String,
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for MarkerSprite {
    fn default() -> Self {
        // Bottom-center pin: the tip sits on the marker.
        Self {
            src: String::new(),
            width: 32.0,
            height: 32.0,
            offset_x: -16.0,
            offset_y: -32.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapOptions {
    pub world_min: f64,
    pub world_max: f64,
    /// Game coordinates at the image's left/bottom edge (`game_min`) and
    /// right/top edge (`game_max`), on both axes.
    pub game_min: f64,
    pub game_max: f64,
    /// Multiplier applied to the target zoom per wheel notch.
    pub zoom_speed: f64,
    /// Fraction of the remaining zoom distance covered each frame.
    pub zoom_lerp_speed: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Pointer travel (CSS px) beyond which a press becomes a pan.
    pub drag_threshold: f64,
    /// Fit region; the whole world when absent.
    pub region: Option<Region>,
    pub image_src: String,
    pub guess_sprite: Option<MarkerSprite>,
    pub actual_sprite: Option<MarkerSprite>,
    pub draw_actual_marker: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            world_min: -2048.0,
            world_max: 2048.0,
            game_min: -2000.0,
            game_max: 2000.0,
            zoom_speed: 1.25,
            zoom_lerp_speed: 0.15,
            min_zoom: 0.21,
            max_zoom: 8.0,
            drag_threshold: 4.0,
            region: None,
            image_src: "images/map.png".to_string(),
            guess_sprite: None,
            actual_sprite: None,
            draw_actual_marker: true,
        }
    }
}

impl MapOptions {
    pub fn world(&self) -> Region {
        Region::square(self.world_min, self.world_max)
    }

    pub fn region(&self) -> Region {
        self.region.unwrap_or_else(|| self.world())
    }

    /// Game `(x, z)` to world. Game `z` grows up the map, as world `y` does,
    /// so `(game_min, game_max)` is the image's top-left corner.
    pub fn game_to_world(&self, g: GameCoords) -> WorldPoint {
        let to_world = |v: f64| {
            let t = (v - self.game_min) / (self.game_max - self.game_min);
            self.world_min + t * (self.world_max - self.world_min)
        };
        WorldPoint::new(to_world(g.x), to_world(g.z))
    }

    pub fn world_to_game(&self, p: WorldPoint) -> GameCoords {
        let to_game = |v: f64| {
            let t = (v - self.world_min) / (self.world_max - self.world_min);
            self.game_min + t * (self.game_max - self.game_min)
        };
        GameCoords::new(to_game(p.x), to_game(p.y))
    }

    pub fn validated(self) -> Result<Self, MapError> {
        let finite = [
            self.world_min,
            self.world_max,
            self.game_min,
            self.game_max,
            self.zoom_speed,
            self.zoom_lerp_speed,
            self.min_zoom,
            self.max_zoom,
            self.drag_threshold,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(MapError::InvalidOptions("non-finite value".into()));
        }
        if self.world_min >= self.world_max {
            return Err(MapError::InvalidOptions(format!(
                "world_min {} must be below world_max {}",
                self.world_min, self.world_max
            )));
        }
        if self.game_min >= self.game_max {
            return Err(MapError::InvalidOptions(format!(
                "game_min {} must be below game_max {}",
                self.game_min, self.game_max
            )));
        }
        if self.min_zoom <= 0.0 || self.min_zoom > self.max_zoom {
            return Err(MapError::InvalidOptions(format!(
                "zoom range [{}, {}] is empty or non-positive",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.zoom_speed <= 1.0 {
            return Err(MapError::InvalidOptions(format!(
                "zoom_speed {} must be greater than 1",
                self.zoom_speed
            )));
        }
        if self.zoom_lerp_speed <= 0.0 || self.zoom_lerp_speed > 1.0 {
            return Err(MapError::InvalidOptions(format!(
                "zoom_lerp_speed {} must be in (0, 1]",
                self.zoom_lerp_speed
            )));
        }
        if self.drag_threshold < 0.0 {
            return Err(MapError::InvalidOptions("negative drag_threshold".into()));
        }
        if let Some(r) = &self.region {
            if r.width() <= 0.0 || r.height() <= 0.0 {
                return Err(MapError::InvalidOptions("region has no area".into()));
            }
        }
        Ok(self)
    }
}
