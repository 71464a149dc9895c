//! Browser binding
//!
//! `ParticleBackground` mounts a backdrop on a `<canvas>` and wires window
//! resize and pointer events plus the `requestAnimationFrame` loop to it.
//! Page script owns the object:
//!
//! ```js
//! const bg = new ParticleBackground();
//! bg.mount("particle-bg");
//! // ...
//! bg.dispose();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, Window};

use crate::config::FieldConfig;
use crate::driver::Backdrop;
use crate::error::BackdropError;
use crate::renderer::CanvasSurface;
use crate::sim::{FieldEvent, Viewport};

type SharedBackdrop = Rc<RefCell<Backdrop<CanvasSurface>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type Listener = Closure<dyn FnMut(Event)>;

/// Canvas sits behind sibling content and never takes clicks
const MOUNT_STYLE: [(&str, &str); 5] = [
    ("position", "absolute"),
    ("inset", "0"),
    ("z-index", "0"),
    ("pointer-events", "none"),
    ("opacity", "0.7"),
];

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already set if the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Particle background component
#[wasm_bindgen]
#[derive(Default)]
pub struct ParticleBackground {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl ParticleBackground {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount on the canvas with id `canvas_id`, replacing any earlier mount.
    ///
    /// A canvas without a 2D context leaves the component idle.
    pub fn mount(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        self.dispose();
        self.mounted = mount_canvas(canvas_id)?;
        Ok(())
    }

    /// Detach listeners and stop the frame loop
    pub fn dispose(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.teardown();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|m| m.backdrop.borrow().is_running())
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Everything registered with the browser for one mount
struct Mounted {
    window: Window,
    backdrop: SharedBackdrop,
    frame_callback: FrameCallback,
    listeners: Vec<(&'static str, Listener)>,
}

impl Mounted {
    fn listen(&mut self, name: &'static str, listener: Listener) -> Result<(), BackdropError> {
        self.window
            .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
        self.listeners.push((name, listener));
        Ok(())
    }

    fn attach(&mut self, canvas: &HtmlCanvasElement) -> Result<(), BackdropError> {
        // Resize: match the canvas to the window, reseed on the next tick
        {
            let backdrop = self.backdrop.clone();
            let window = self.window.clone();
            let canvas = canvas.clone();
            let listener = Listener::new(move |_event: Event| {
                let viewport = window_viewport(&window);
                size_canvas(&canvas, viewport);
                backdrop.borrow_mut().dispatch(FieldEvent::Resize(viewport));
            });
            self.listen("resize", listener)?;
        }

        // Pointer move
        {
            let backdrop = self.backdrop.clone();
            let listener = Listener::new(move |event: Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                    backdrop.borrow_mut().dispatch(FieldEvent::PointerMove(pos));
                }
            });
            self.listen("mousemove", listener)?;
        }

        // Pointer leave: mouseout bubbles between elements, only a null
        // related target means the pointer left the page
        {
            let backdrop = self.backdrop.clone();
            let listener = Listener::new(move |event: Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    if event.related_target().is_none() {
                        backdrop.borrow_mut().dispatch(FieldEvent::PointerLeave);
                    }
                }
            });
            self.listen("mouseout", listener)?;
        }

        self.start_loop()
    }

    fn start_loop(&self) -> Result<(), BackdropError> {
        {
            let backdrop = self.backdrop.clone();
            let window = self.window.clone();
            let callback = self.frame_callback.clone();
            *self.frame_callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                let mut b = backdrop.borrow_mut();
                if b.tick(time).is_none() {
                    return;
                }
                if let Some(next) = callback.borrow().as_ref() {
                    match window.request_animation_frame(next.as_ref().unchecked_ref()) {
                        Ok(id) => b.set_pending_frame(id),
                        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                    }
                }
            }));
        }

        let id = match self.frame_callback.borrow().as_ref() {
            Some(callback) => self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())?,
            None => return Ok(()),
        };
        self.backdrop.borrow_mut().set_pending_frame(id);
        Ok(())
    }

    fn teardown(self) {
        for (name, listener) in &self.listeners {
            let _ = self
                .window
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
        if let Some(id) = self.backdrop.borrow_mut().dispose() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // Breaks the callback's reference to itself
        drop(self.frame_callback.borrow_mut().take());
    }
}

fn mount_canvas(canvas_id: &str) -> Result<Option<Mounted>, BackdropError> {
    let window = web_sys::window().ok_or(BackdropError::NoWindow)?;
    let document = window.document().ok_or(BackdropError::NoDocument)?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| BackdropError::CanvasNotFound(canvas_id.to_string()))?
        .dyn_into()
        .map_err(|_| BackdropError::NotACanvas(canvas_id.to_string()))?;

    let style = canvas.style();
    for (name, value) in MOUNT_STYLE {
        style.set_property(name, value)?;
    }

    let viewport = window_viewport(&window);
    size_canvas(&canvas, viewport);

    let seed = js_sys::Date::now() as u64;
    let backdrop = Backdrop::init(CanvasSurface::new(&canvas), viewport, FieldConfig::default(), seed);
    if !backdrop.is_running() {
        return Ok(None);
    }

    let mut mounted = Mounted {
        window,
        backdrop: Rc::new(RefCell::new(backdrop)),
        frame_callback: Rc::new(RefCell::new(None)),
        listeners: Vec::new(),
    };
    if let Err(e) = mounted.attach(&canvas) {
        mounted.teardown();
        return Err(e);
    }
    Ok(Some(mounted))
}

fn window_viewport(window: &Window) -> Viewport {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(width as f32, height as f32)
}

fn size_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
    canvas.set_width(viewport.width as u32);
    canvas.set_height(viewport.height as u32);
}
