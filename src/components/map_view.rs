use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent, Window};
use yew::prelude::*;

use super::camera_controls::CameraControls;
use crate::canvas::{CanvasSurface, load_image};
use crate::model::GameCoords;
use crate::state::FlyOptions;
use crate::viewport::{ImageRequest, MapInput, MapOptions, MapViewport};

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    #[prop_or_default]
    pub options: MapOptions,
    /// Changes whenever a new round starts.
    pub round_id: u64,
    /// True location to reveal, in game coordinates; `None` while guessing.
    pub actual: Option<GameCoords>,
    pub show_actual: bool,
    /// Whether a click places a guess.
    pub can_guess: bool,
    pub on_guess: Callback<GameCoords>,
}

type SharedViewport = Rc<RefCell<MapViewport>>;
type SharedSurface = Rc<RefCell<Option<CanvasSurface>>>;
type FrameCell = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let viewport = {
        let options = props.options.clone();
        use_mut_ref(move || {
            MapViewport::new(options).unwrap_or_else(|e| {
                log::error!("invalid map options, using defaults: {}", e);
                MapViewport::default()
            })
        })
    };
    let surface: SharedSurface = use_mut_ref(|| None);
    let on_guess = use_mut_ref(|| props.on_guess.clone());
    *on_guess.borrow_mut() = props.on_guess.clone();

    // Mount: canvas surface, image loads, frame loop and listeners
    {
        let canvas_ref = canvas_ref.clone();
        let viewport = viewport.clone();
        let surface = surface.clone();
        let on_guess = on_guess.clone();
        use_effect_with((), move |_| {
            let cleanup = mount(canvas_ref, viewport, surface, on_guess);
            if cleanup.is_none() {
                log::error!("map canvas unavailable");
            }
            move || {
                if let Some(cleanup) = cleanup {
                    cleanup();
                }
            }
        });
    }
    // New round: wipe both markers and zoom back out
    {
        let viewport = viewport.clone();
        use_effect_with(props.round_id, move |_| {
            let mut vp = viewport.borrow_mut();
            vp.clear_guess_marker();
            vp.clear_actual_marker();
            vp.fit_region();
            || ()
        });
    }
    // Reveal: place the actual marker and fly to it
    {
        let viewport = viewport.clone();
        use_effect_with(props.actual, move |actual| {
            let mut vp = viewport.borrow_mut();
            match actual {
                Some(g) => {
                    let p = vp.game_to_world(*g);
                    vp.set_actual_marker(p.x, p.y);
                    if let Err(e) = vp.fly_to_world(p.x, p.y, None, FlyOptions::default()) {
                        log::warn!("cannot fly to revealed location: {}", e);
                    }
                }
                None => vp.clear_actual_marker(),
            }
            || ()
        });
    }
    {
        let viewport = viewport.clone();
        use_effect_with(props.show_actual, move |show| {
            viewport.borrow_mut().set_draw_actual_marker(*show);
            || ()
        });
    }
    {
        let viewport = viewport.clone();
        use_effect_with(props.can_guess, move |on| {
            viewport.borrow_mut().set_guess_enabled(*on);
            || ()
        });
    }

    let on_zoom_in = {
        let viewport = viewport.clone();
        Callback::from(move |()| viewport.borrow_mut().zoom_step(true))
    };
    let on_zoom_out = {
        let viewport = viewport.clone();
        Callback::from(move |()| viewport.borrow_mut().zoom_step(false))
    };
    let on_center = {
        let viewport = viewport.clone();
        Callback::from(move |()| viewport.borrow_mut().fit_region())
    };

    html! {<div style="position:relative; width:100%; height:100%;">
        <canvas ref={canvas_ref} id="map-canvas" style="display:block; width:100%; height:100%; cursor:crosshair;"></canvas>
        <CameraControls {on_zoom_in} {on_zoom_out} {on_center} />
    </div>}
}

/// Canvas-local CSS pixel position of a mouse event.
fn local_point(canvas: &HtmlCanvasElement, e: &MouseEvent) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (
        e.client_x() as f64 - rect.left(),
        e.client_y() as f64 - rect.top(),
    )
}

fn request_frame(window: &Window, cell: &FrameCell) -> Option<i32> {
    let cell = cell.borrow();
    let cb = cell.as_ref()?;
    window.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}

fn start_loads(
    requests: Vec<ImageRequest>,
    viewport: &SharedViewport,
    surface: &SharedSurface,
    start: &Rc<dyn Fn()>,
) {
    for req in requests {
        let on_settled: Rc<dyn Fn(bool)> = {
            let viewport = viewport.clone();
            let start = start.clone();
            let (layer, generation) = (req.layer, req.generation);
            Rc::new(move |ok| {
                let first = viewport
                    .borrow_mut()
                    .on_image_settled(layer, generation, ok);
                if first {
                    start();
                }
            })
        };
        if let Some(img) = load_image(&req.src, on_settled) {
            if let Some(s) = surface.borrow_mut().as_mut() {
                s.set_image(req.layer, img);
            }
        }
    }
}

fn mount(
    canvas_ref: NodeRef,
    viewport: SharedViewport,
    surface: SharedSurface,
    on_guess: Rc<RefCell<Callback<GameCoords>>>,
) -> Option<impl FnOnce()> {
    let window = web_sys::window()?;
    let canvas = canvas_ref.cast::<HtmlCanvasElement>()?;
    *surface.borrow_mut() = Some(CanvasSurface::new(canvas.clone())?);

    let apply_size: Rc<dyn Fn()> = {
        let canvas = canvas.clone();
        let window = window.clone();
        let viewport = viewport.clone();
        let surface = surface.clone();
        Rc::new(move || {
            let rect = canvas.get_bounding_client_rect();
            let mut vp = viewport.borrow_mut();
            vp.on_resize(rect.width(), rect.height(), window.device_pixel_ratio());
            if let Some(s) = surface.borrow().as_ref() {
                s.apply_size(vp.view());
            }
        })
    };
    apply_size();

    // Frame loop
    let raf_id = Rc::new(RefCell::new(None::<i32>));
    let frame_cell: FrameCell = Rc::new(RefCell::new(None));
    {
        let viewport = viewport.clone();
        let surface = surface.clone();
        let window_loop = window.clone();
        let frame_cell_loop = frame_cell.clone();
        let raf_id = raf_id.clone();
        *frame_cell.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            {
                let mut vp = viewport.borrow_mut();
                vp.tick(now);
                if let Some(s) = surface.borrow_mut().as_mut() {
                    vp.render(s);
                }
            }
            *raf_id.borrow_mut() = request_frame(&window_loop, &frame_cell_loop);
        }) as Box<dyn FnMut(f64)>));
    }
    let start_loop: Rc<dyn Fn()> = {
        let window = window.clone();
        let frame_cell = frame_cell.clone();
        let raf_id = raf_id.clone();
        Rc::new(move || {
            log::info!("map ready, starting frame loop");
            *raf_id.borrow_mut() = request_frame(&window, &frame_cell);
        })
    };
    let requests = viewport.borrow().pending_images();
    start_loads(requests, &viewport, &surface, &start_loop);

    // Pointer input
    let mousedown_cb = {
        let canvas_cb = canvas.clone();
        let viewport = viewport.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            if e.button() != 0 {
                return;
            }
            let (x, y) = local_point(&canvas_cb, &e);
            viewport.borrow_mut().on_pointer_down(x, y);
        }) as Box<dyn FnMut(_)>)
    };
    canvas
        .add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
        .ok();
    let mousemove_cb = {
        let canvas_cb = canvas.clone();
        let viewport = viewport.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            let (x, y) = local_point(&canvas_cb, &e);
            viewport.borrow_mut().on_pointer_move(x, y);
        }) as Box<dyn FnMut(_)>)
    };
    canvas
        .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
        .ok();
    let mouseup_cb = {
        let canvas_cb = canvas.clone();
        let viewport = viewport.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            let (x, y) = local_point(&canvas_cb, &e);
            let guess = {
                let mut vp = viewport.borrow_mut();
                vp.on_pointer_up(x, y).map(|p| vp.world_to_game(p))
            };
            if let Some(g) = guess {
                on_guess.borrow().emit(g);
            }
        }) as Box<dyn FnMut(_)>)
    };
    canvas
        .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
        .ok();
    let mouseleave_cb = {
        let viewport = viewport.clone();
        Closure::wrap(Box::new(move |_e: MouseEvent| {
            viewport.borrow_mut().on_pointer_leave();
        }) as Box<dyn FnMut(_)>)
    };
    canvas
        .add_event_listener_with_callback("mouseleave", mouseleave_cb.as_ref().unchecked_ref())
        .ok();
    let wheel_cb = {
        let canvas_cb = canvas.clone();
        let viewport = viewport.clone();
        Closure::wrap(Box::new(move |e: WheelEvent| {
            e.prevent_default();
            let (x, y) = local_point(&canvas_cb, &e);
            viewport.borrow_mut().on_wheel(x, y, e.delta_y());
        }) as Box<dyn FnMut(_)>)
    };
    canvas
        .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
        .ok();
    let contextmenu_cb = Closure::wrap(Box::new(move |e: web_sys::Event| {
        e.prevent_default();
    }) as Box<dyn FnMut(_)>);
    canvas
        .add_event_listener_with_callback("contextmenu", contextmenu_cb.as_ref().unchecked_ref())
        .ok();
    let resize_cb = {
        let apply_size = apply_size.clone();
        Closure::wrap(Box::new(move |_e: web_sys::Event| {
            apply_size();
        }) as Box<dyn FnMut(_)>)
    };
    window
        .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
        .ok();

    Some(move || {
        let listeners = [
            ("mousedown", &mousedown_cb),
            ("mousemove", &mousemove_cb),
            ("mouseup", &mouseup_cb),
            ("mouseleave", &mouseleave_cb),
        ];
        for (name, cb) in listeners {
            let _ = canvas.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
        }
        let _ = canvas
            .remove_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref());
        let _ = canvas.remove_event_listener_with_callback(
            "contextmenu",
            contextmenu_cb.as_ref().unchecked_ref(),
        );
        let _ = window
            .remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
        if let Some(id) = raf_id.borrow_mut().take() {
            let _ = window.cancel_animation_frame(id);
        }
        // Breaks the frame closure's reference to itself.
        frame_cell.borrow_mut().take();
        *surface.borrow_mut() = None;
    })
}
