// Canvas 2D backend for the viewport plus image loading.
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::state::{ScreenPoint, ViewSize};
use crate::viewport::{ImageLayer, MapSurface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<ImageLayer, HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            images: HashMap::new(),
        })
    }

    pub fn set_image(&mut self, layer: ImageLayer, img: HtmlImageElement) {
        self.images.insert(layer, img);
    }

    /// Match the backing store to the view's device-pixel size.
    pub fn apply_size(&self, view: ViewSize) {
        let (w, h) = view.device_size();
        if self.canvas.width() != w {
            self.canvas.set_width(w);
        }
        if self.canvas.height() != h {
            self.canvas.set_height(h);
        }
    }
}

impl MapSurface for CanvasSurface {
    fn begin_frame(&mut self, view: ViewSize) {
        self.apply_size(view);
        let ctx = &self.ctx;
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        let r = view.pixel_ratio;
        ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0).ok();
    }

    fn draw_image(&mut self, layer: ImageLayer, x: f64, y: f64, width: f64, height: f64) {
        if let Some(img) = self.images.get(&layer) {
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, width, height)
                .ok();
        }
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: &str, width: f64) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width);
        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.stroke();
    }

    fn draw_circle(
        &mut self,
        center: ScreenPoint,
        radius: f64,
        fill: &str,
        outline: Option<(&str, f64)>,
    ) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.set_fill_style_str(fill);
        ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::PI * 2.0)
            .ok();
        ctx.fill();
        if let Some((color, width)) = outline {
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(width);
            ctx.stroke();
        }
    }
}

/// Start loading `src`; `on_settled(true)` on load, `on_settled(false)` on error.
/// Returns the element so the caller can draw it once settled.
pub fn load_image(src: &str, on_settled: Rc<dyn Fn(bool)>) -> Option<HtmlImageElement> {
    let img = HtmlImageElement::new().ok()?;
    let ok_cb = on_settled.clone();
    let onload = Closure::once_into_js(move || ok_cb(true));
    // The viewport logs the failure when it settles the slot.
    let onerror = Closure::once_into_js(move || on_settled(false));
    img.set_onload(Some(onload.unchecked_ref()));
    img.set_onerror(Some(onerror.unchecked_ref()));
    img.set_src(src);
    Some(img)
}
