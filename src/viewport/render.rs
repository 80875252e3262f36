use super::{ImageLayer, MapViewport, MarkerSprite};
use crate::state::{ScreenPoint, ViewSize, WorldPoint};

pub const GUESS_COLOR: &str = "cyan";
pub const GUESS_OUTLINE: &str = "#003333";
pub const GUESS_RADIUS: f64 = 5.0;
pub const ACTUAL_COLOR: &str = "red";
pub const ACTUAL_OUTLINE: &str = "#440000";
pub const ACTUAL_RADIUS: f64 = 6.0;
pub const LINK_COLOR: &str = "rgba(255,255,255,0.85)";
pub const LINK_WIDTH: f64 = 2.0;

/// Drawing target for one frame. Coordinates are CSS pixels; the surface
/// handles device pixel scaling.
pub trait MapSurface {
    fn begin_frame(&mut self, view: ViewSize);
    fn draw_image(&mut self, layer: ImageLayer, x: f64, y: f64, width: f64, height: f64);
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: &str, width: f64);
    fn draw_circle(
        &mut self,
        center: ScreenPoint,
        radius: f64,
        fill: &str,
        outline: Option<(&str, f64)>,
    );
}

impl MapViewport {
    pub fn render(&self, surface: &mut impl MapSurface) {
        surface.begin_frame(self.view);

        if self.background.is_ready() {
            let o = &self.options;
            let top_left = self.world_to_screen(o.world_min, o.world_max);
            let side = (o.world_max - o.world_min) * self.camera.zoom;
            surface.draw_image(ImageLayer::Background, top_left.x, top_left.y, side, side);
        }

        // Markers are only meaningful inside the configured world.
        let world = self.options.world();
        let guess = self.guess_marker.filter(|p| world.contains(p));
        let actual = self
            .actual_marker
            .filter(|p| self.draw_actual_marker && world.contains(p));

        if let (Some(g), Some(a)) = (guess, actual) {
            let from = self.world_to_screen(g.x, g.y);
            let to = self.world_to_screen(a.x, a.y);
            surface.draw_line(from, to, LINK_COLOR, LINK_WIDTH);
        }
        if let Some(g) = guess {
            self.draw_marker(
                surface,
                g,
                ImageLayer::GuessSprite,
                self.options.guess_sprite.as_ref(),
                (GUESS_COLOR, GUESS_OUTLINE, GUESS_RADIUS),
            );
        }
        if let Some(a) = actual {
            self.draw_marker(
                surface,
                a,
                ImageLayer::ActualSprite,
                self.options.actual_sprite.as_ref(),
                (ACTUAL_COLOR, ACTUAL_OUTLINE, ACTUAL_RADIUS),
            );
        }
    }

    fn draw_marker(
        &self,
        surface: &mut impl MapSurface,
        at: WorldPoint,
        layer: ImageLayer,
        sprite: Option<&MarkerSprite>,
        (fill, outline, radius): (&str, &str, f64),
    ) {
        let p = self.world_to_screen(at.x, at.y);
        let ready = self.image(layer).is_some_and(|slot| slot.is_ready());
        match sprite {
            Some(s) if ready => {
                surface.draw_image(layer, p.x + s.offset_x, p.y + s.offset_y, s.width, s.height)
            }
            _ => surface.draw_circle(p, radius, fill, Some((outline, 1.0))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::tests::viewport;
    use crate::model::GameCoords;
    use crate::viewport::{MapInput, MapOptions};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Begin(f64, f64),
        Image(ImageLayer, f64, f64, f64, f64),
        Line,
        Circle(String, f64, f64),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl MapSurface for Recorder {
        fn begin_frame(&mut self, view: ViewSize) {
            self.0.push(Op::Begin(view.width, view.height));
        }
        fn draw_image(&mut self, layer: ImageLayer, x: f64, y: f64, w: f64, h: f64) {
            self.0.push(Op::Image(layer, x, y, w, h));
        }
        fn draw_line(&mut self, _from: ScreenPoint, _to: ScreenPoint, _c: &str, _w: f64) {
            self.0.push(Op::Line);
        }
        fn draw_circle(&mut self, c: ScreenPoint, _r: f64, fill: &str, _o: Option<(&str, f64)>) {
            self.0.push(Op::Circle(fill.to_string(), c.x, c.y));
        }
    }

    #[test]
    fn background_skipped_until_loaded() {
        let mut vp = viewport();
        let mut rec = Recorder::default();
        vp.render(&mut rec);
        assert_eq!(rec.0, vec![Op::Begin(800.0, 600.0)]);

        vp.on_image_settled(ImageLayer::Background, 0, true);
        let mut rec = Recorder::default();
        vp.render(&mut rec);
        let side = 4096.0 * 0.21;
        assert_eq!(
            rec.0[1],
            Op::Image(ImageLayer::Background, 400.0 - side / 2.0, 300.0 - side / 2.0, side, side)
        );
    }

    #[test]
    fn markers_line_and_fallback_circles() {
        let mut vp = viewport();
        vp.on_pointer_down(400.0, 300.0);
        vp.on_pointer_up(400.0, 300.0);
        vp.set_actual_marker(100.0, 0.0);
        let mut rec = Recorder::default();
        vp.render(&mut rec);
        assert_eq!(
            rec.0[1..],
            [
                Op::Line,
                Op::Circle(GUESS_COLOR.into(), 400.0, 300.0),
                Op::Circle(ACTUAL_COLOR.into(), 400.0 + 100.0 * 0.21, 300.0),
            ]
        );

        vp.set_draw_actual_marker(false);
        let mut rec = Recorder::default();
        vp.render(&mut rec);
        assert_eq!(rec.0.len(), 2);
    }

    #[test]
    fn out_of_world_markers_are_skipped() {
        let mut vp = MapViewport::new(MapOptions {
            world_min: -100.0,
            world_max: 100.0,
            ..Default::default()
        })
        .unwrap();
        vp.set_actual_marker(150.0, 0.0);
        let mut rec = Recorder::default();
        vp.render(&mut rec);
        assert_eq!(rec.0.len(), 1);
    }

    #[test]
    fn sprite_used_once_loaded() {
        let sprite = MarkerSprite {
            src: "pin.png".into(),
            ..Default::default()
        };
        let mut vp = MapViewport::new(MapOptions {
            actual_sprite: Some(sprite),
            ..Default::default()
        })
        .unwrap();
        vp.set_actual_marker(0.0, 0.0);

        let mut rec = Recorder::default();
        vp.render(&mut rec);
        assert!(matches!(rec.0[1], Op::Circle(..)));

        vp.on_image_settled(ImageLayer::ActualSprite, 0, true);
        let mut rec = Recorder::default();
        vp.render(&mut rec);
        assert_eq!(
            rec.0[1],
            Op::Image(ImageLayer::ActualSprite, 400.0 - 16.0, 300.0 - 32.0, 32.0, 32.0)
        );
    }

    #[test]
    fn game_corners_land_on_image_corners() {
        let mut vp = viewport();
        vp.on_image_settled(ImageLayer::Background, 0, true);
        let tl = vp.game_to_world(GameCoords::new(-2000.0, 2000.0));
        vp.set_actual_marker(tl.x, tl.y);
        let mut rec = Recorder::default();
        vp.render(&mut rec);
        let Op::Image(ImageLayer::Background, x, y, side, _) = rec.0[1] else {
            panic!("background not drawn: {:?}", rec.0);
        };
        assert_eq!(rec.0[2], Op::Circle(ACTUAL_COLOR.into(), x, y));

        let br = vp.game_to_world(GameCoords::new(2000.0, -2000.0));
        vp.set_actual_marker(br.x, br.y);
        let mut rec = Recorder::default();
        vp.render(&mut rec);
        let Op::Circle(_, cx, cy) = rec.0[2].clone() else {
            panic!("marker not drawn: {:?}", rec.0);
        };
        assert!((cx - (x + side)).abs() < 1e-9 && (cy - (y + side)).abs() < 1e-9);
    }
}
