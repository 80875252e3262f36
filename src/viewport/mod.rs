//! Pannable, zoomable 2D map viewport.
//!
//! The viewport owns the camera, the two markers and the image readiness
//! state. It never touches the DOM: the host feeds it pointer/wheel/resize
//! input through [`MapInput`], advances it with [`MapViewport::tick`] and
//! draws it onto any [`MapSurface`].

pub mod input;
pub mod options;
pub mod render;
pub mod resource;

use serde_json::Value;

use crate::error::MapError;
use crate::model::GameCoords;
use crate::state::{
    Camera, FlyOptions, FlyTarget, Flight, PointerState, Region, ScreenPoint, ViewSize,
    WorldPoint, ZoomAnchor,
};

pub use input::MapInput;
pub use options::{MapOptions, MarkerSprite};
pub use render::MapSurface;
pub use resource::{ImageLayer, ImageSlot, ImageStatus};

/// Below this gap the zoom lerp is considered settled.
const ZOOM_EPSILON: f64 = 1e-3;

/// Request to swap the background image and/or the fit region.
#[derive(Clone, Debug, PartialEq)]
pub struct MapChange {
    pub image_src: Option<String>,
    pub region: Option<Region>,
    pub recenter: bool,
}

impl Default for MapChange {
    fn default() -> Self {
        Self {
            image_src: None,
            region: None,
            recenter: true,
        }
    }
}

/// An image the host must start loading, tagged with the generation to report back.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageRequest {
    pub layer: ImageLayer,
    pub src: String,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct MapViewport {
    options: MapOptions,
    region: Region,
    view: ViewSize,
    camera: Camera,
    pointer: PointerState,
    anchor: Option<ZoomAnchor>,
    flight: Option<Flight>,
    guess_marker: Option<WorldPoint>,
    actual_marker: Option<WorldPoint>,
    draw_actual_marker: bool,
    /// Clicks place guesses only while this is set.
    guess_enabled: bool,
    background: ImageSlot,
    guess_sprite: Option<ImageSlot>,
    actual_sprite: Option<ImageSlot>,
    started: bool,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self::build(MapOptions::default())
    }
}

impl MapViewport {
    pub fn new(options: MapOptions) -> Result<Self, MapError> {
        options.validated().map(Self::build)
    }

    fn build(options: MapOptions) -> Self {
        let region = options.region();
        let sprite_slot = |s: &Option<MarkerSprite>| {
            s.as_ref()
                .filter(|s| !s.src.is_empty())
                .map(|s| ImageSlot::new(s.src.clone()))
        };
        let mut vp = Self {
            region,
            view: ViewSize::default(),
            camera: Camera::default(),
            pointer: PointerState::default(),
            anchor: None,
            flight: None,
            guess_marker: None,
            actual_marker: None,
            draw_actual_marker: options.draw_actual_marker,
            guess_enabled: true,
            background: ImageSlot::new(options.image_src.clone()),
            guess_sprite: sprite_slot(&options.guess_sprite),
            actual_sprite: sprite_slot(&options.actual_sprite),
            started: false,
            options,
        };
        vp.fit_region();
        vp
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn view(&self) -> ViewSize {
        self.view
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn guess_marker(&self) -> Option<WorldPoint> {
        self.guess_marker
    }

    pub fn actual_marker(&self) -> Option<WorldPoint> {
        self.actual_marker
    }

    pub fn draw_actual_marker(&self) -> bool {
        self.draw_actual_marker
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    pub fn zoom_anchor(&self) -> Option<ZoomAnchor> {
        self.anchor
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn image(&self, layer: ImageLayer) -> Option<&ImageSlot> {
        match layer {
            ImageLayer::Background => Some(&self.background),
            ImageLayer::GuessSprite => self.guess_sprite.as_ref(),
            ImageLayer::ActualSprite => self.actual_sprite.as_ref(),
        }
    }

    fn image_mut(&mut self, layer: ImageLayer) -> Option<&mut ImageSlot> {
        match layer {
            ImageLayer::Background => Some(&mut self.background),
            ImageLayer::GuessSprite => self.guess_sprite.as_mut(),
            ImageLayer::ActualSprite => self.actual_sprite.as_mut(),
        }
    }

    /// Every image still waiting for its first load.
    pub fn pending_images(&self) -> Vec<ImageRequest> {
        [
            ImageLayer::Background,
            ImageLayer::GuessSprite,
            ImageLayer::ActualSprite,
        ]
        .into_iter()
        .filter_map(|layer| {
            self.image(layer)
                .filter(|slot| slot.status == ImageStatus::Loading)
                .map(|slot| ImageRequest {
                    layer,
                    src: slot.src.clone(),
                    generation: slot.generation,
                })
        })
        .collect()
    }

    /// Record a load completion. Returns true exactly once: the first time the
    /// background settles, which is when the host should start its frame loop.
    pub fn on_image_settled(&mut self, layer: ImageLayer, generation: u64, ok: bool) -> bool {
        let Some(slot) = self.image_mut(layer) else {
            return false;
        };
        if !slot.settle(generation, ok) {
            log::debug!("dropping stale load of {:?} generation {}", layer, generation);
            return false;
        }
        if !ok {
            log::warn!("failed to load {:?} image {}", layer, slot.src);
        }
        if layer == ImageLayer::Background && !self.started {
            self.started = true;
            return true;
        }
        false
    }

    pub fn screen_to_world(&self, sx: f64, sy: f64) -> WorldPoint {
        self.camera.screen_to_world(self.view, sx, sy)
    }

    pub fn world_to_screen(&self, wx: f64, wy: f64) -> ScreenPoint {
        self.camera.world_to_screen(self.view, wx, wy)
    }

    pub fn game_to_world(&self, g: GameCoords) -> WorldPoint {
        self.options.game_to_world(g)
    }

    pub fn world_to_game(&self, p: WorldPoint) -> GameCoords {
        self.options.world_to_game(p)
    }

    pub fn set_actual_marker(&mut self, x: f64, y: f64) {
        self.actual_marker = Some(WorldPoint::new(x, y));
    }

    pub fn clear_actual_marker(&mut self) {
        self.actual_marker = None;
    }

    pub fn clear_guess_marker(&mut self) {
        self.guess_marker = None;
    }

    pub fn set_draw_actual_marker(&mut self, on: bool) {
        self.draw_actual_marker = on;
    }

    pub fn guess_enabled(&self) -> bool {
        self.guess_enabled
    }

    /// Lock or unlock guess placement; panning and zooming are unaffected.
    pub fn set_guess_enabled(&mut self, on: bool) {
        self.guess_enabled = on;
    }

    /// Swap the background and/or fit region. Returns the image the host has
    /// to load when the source changed.
    pub fn set_map(&mut self, change: MapChange) -> Option<ImageRequest> {
        let request = change
            .image_src
            .filter(|src| *src != self.background.src)
            .map(|src| {
                let generation = self.background.replace(src.clone());
                ImageRequest {
                    layer: ImageLayer::Background,
                    src,
                    generation,
                }
            });
        if let Some(region) = change.region {
            self.region = region;
        }
        if change.recenter {
            self.fit_region();
        }
        request
    }

    /// One zoom notch around the view center, as the on-map buttons do.
    pub fn zoom_step(&mut self, zoom_in: bool) {
        let center = self.view.center();
        self.zoom_at(center, zoom_in);
    }

    /// Step the target zoom by one notch, keeping `at` pinned while the lerp runs.
    fn zoom_at(&mut self, at: ScreenPoint, zoom_in: bool) {
        let world = self.screen_to_world(at.x, at.y);
        let o = &self.options;
        let next = if zoom_in {
            self.camera.target_zoom * o.zoom_speed
        } else {
            self.camera.target_zoom / o.zoom_speed
        };
        self.camera.target_zoom = next.clamp(o.min_zoom, o.max_zoom);
        self.anchor = Some(ZoomAnchor { screen: at, world });
        self.flight = None;
    }

    /// Cover-fit the camera onto the current region.
    pub fn fit_region(&mut self) {
        let (min, max) = (self.options.min_zoom, self.options.max_zoom);
        self.camera.fit_cover(self.view, &self.region, min, max);
        self.anchor = None;
        self.flight = None;
    }

    pub fn fly_to(
        &mut self,
        target: FlyTarget,
        zoom: Option<f64>,
        opts: FlyOptions,
    ) -> Result<(), MapError> {
        let end = target.point();
        if !end.x.is_finite() || !end.y.is_finite() {
            return Err(MapError::InvalidFlyTarget(format!("{:?}", target)));
        }
        let end_zoom = zoom
            .filter(|z| z.is_finite())
            .unwrap_or(self.camera.target_zoom)
            .clamp(self.options.min_zoom, self.options.max_zoom);
        let cam = &self.camera;
        self.flight = Some(Flight::new(
            (cam.x, cam.y, cam.zoom),
            (end.x, end.y, end_zoom),
            opts,
        ));
        // Keeps the zoom lerp from pulling against the flight.
        self.camera.target_zoom = end_zoom;
        self.anchor = None;
        Ok(())
    }

    /// Untyped entry point: `target` must be `[y, x]` or `{"x": .., "y": ..}`.
    pub fn fly_to_value(
        &mut self,
        target: &Value,
        zoom: Option<f64>,
        opts: FlyOptions,
    ) -> Result<(), MapError> {
        let target = FlyTarget::from_value(target)?;
        self.fly_to(target, zoom, opts)
    }

    pub fn fly_to_world(
        &mut self,
        x: f64,
        y: f64,
        zoom: Option<f64>,
        opts: FlyOptions,
    ) -> Result<(), MapError> {
        self.fly_to(FlyTarget::Point { x, y }, zoom, opts)
    }

    /// Advance camera animation to `now_ms`; call once per frame.
    pub fn tick(&mut self, now_ms: f64) {
        if let Some(flight) = self.flight.as_mut() {
            let s = flight.sample(now_ms);
            self.camera.x = s.x;
            self.camera.y = s.y;
            self.camera.zoom = s.zoom;
            if s.done {
                self.camera.target_zoom = s.zoom;
                self.flight = None;
            }
            return;
        }

        let cam = &mut self.camera;
        cam.zoom += (cam.target_zoom - cam.zoom) * self.options.zoom_lerp_speed;
        let settled = (cam.target_zoom - cam.zoom).abs() < ZOOM_EPSILON;
        if settled {
            cam.zoom = cam.target_zoom;
        }
        if let Some(anchor) = self.anchor {
            cam.pin(self.view, &anchor);
            if settled {
                self.anchor = None;
            }
        }
    }
}
