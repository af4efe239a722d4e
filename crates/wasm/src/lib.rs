#![deny(unsafe_code)]
//! Browser bindings.
//!
//! [`LiquidLab`] wraps a [`Session`] that schedules itself with
//! `requestAnimationFrame` and draws into a 2D canvas context. The canvas
//! backing store is expected to be sized in device pixels (CSS size times
//! `devicePixelRatio`); pointer coordinates are passed in CSS pixels.

use liquid_lab_core::error::LabError;
use liquid_lab_core::{DrawCommand, RenderSurface, Srgb, TrailFade};
use liquid_lab_field::{
    FieldMode, FieldTuning, FrameHost, FrameToken, LoopState, Session, SimulationConfig,
    SurfaceSize,
};
use log::debug;
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Schedules frames with `requestAnimationFrame`; the frame id is the token.
struct RafHost {
    window: Window,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameHost for RafHost {
    fn request_frame(&mut self) -> Result<FrameToken, LabError> {
        let callback = self.callback.borrow();
        let callback = callback
            .as_ref()
            .ok_or_else(|| LabError::Schedule("frame callback not installed".into()))?;
        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| LabError::Schedule(format!("{e:?}")))?;
        u64::try_from(id)
            .map(FrameToken)
            .map_err(|_| LabError::Schedule(format!("negative frame id {id}")))
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if let Ok(id) = i32::try_from(token.0) {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

/// Paints frames into a 2D canvas context with a translucent trail fill.
struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    fade_style: String,
}

impl CanvasSurface {
    fn new(ctx: CanvasRenderingContext2d, size: SurfaceSize, fade: TrailFade) -> Self {
        Self {
            ctx,
            width: size.width(),
            height: size.height(),
            fade_style: fade.color.to_css_rgba(fade.alpha),
        }
    }

    fn set_size(&mut self, size: SurfaceSize) {
        self.width = size.width();
        self.height = size.height();
    }
}

impl RenderSurface for CanvasSurface {
    fn present(&mut self, frame: &[DrawCommand]) -> Result<(), LabError> {
        self.ctx.set_fill_style_str(&self.fade_style);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        let mut current: Option<Srgb> = None;
        for cmd in frame {
            if current != Some(cmd.color) {
                self.ctx.set_fill_style_str(&cmd.color.to_hex());
                current = Some(cmd.color);
            }
            self.ctx.begin_path();
            self.ctx
                .arc(cmd.center.x, cmd.center.y, cmd.radius, 0.0, TAU)
                .map_err(|e| LabError::Surface(format!("{e:?}")))?;
            self.ctx.fill();
        }
        Ok(())
    }
}

type BrowserSession = Session<RafHost, CanvasSurface>;

fn to_js(e: LabError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// An interactive particle field bound to one canvas.
#[wasm_bindgen]
pub struct LiquidLab {
    session: Rc<RefCell<BrowserSession>>,
    canvas: HtmlCanvasElement,
    density: f64,
}

#[wasm_bindgen]
impl LiquidLab {
    /// Binds to `canvas`. The loop stays idle until [`LiquidLab::start`].
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, density: f64, seed: u32) -> Result<LiquidLab, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let size = canvas_size(&canvas).map_err(to_js)?;

        let callback = Rc::new(RefCell::new(None));
        let host = RafHost {
            window,
            callback: Rc::clone(&callback),
        };
        let surface = CanvasSurface::new(ctx, size, TrailFade::default());
        let session = Rc::new(RefCell::new(Session::new(
            host,
            surface,
            size,
            FieldTuning::for_density(density),
            u64::from(seed),
        )));

        let weak = Rc::downgrade(&session);
        let on_frame: FrameCallback = Closure::new(move |timestamp_ms: f64| {
            let Some(session) = weak.upgrade() else {
                return;
            };
            let mut session = session.borrow_mut();
            if let LoopState::Running { pending } = session.state() {
                session.tick(pending, timestamp_ms);
            }
        });
        *callback.borrow_mut() = Some(on_frame);

        Ok(LiquidLab {
            session,
            canvas,
            density,
        })
    }

    /// Starts (or restarts) with `count` particles in `mode`
    /// (`attract`/`magnet` or `repel`/`fluid`).
    pub fn start(&self, count: usize, mode: &str) -> Result<(), JsValue> {
        let mode: FieldMode = mode.parse().map_err(to_js)?;
        let size = canvas_size(&self.canvas).map_err(to_js)?;
        let mut session = self.session.borrow_mut();
        session.surface_mut().set_size(size);
        session
            .start(SimulationConfig::new(count, mode), size)
            .map_err(to_js)
    }

    pub fn stop(&self) {
        self.session.borrow_mut().stop();
    }

    /// New random layout with the current settings.
    pub fn refresh(&self) -> Result<(), JsValue> {
        self.session.borrow_mut().refresh().map_err(to_js)
    }

    pub fn set_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode: FieldMode = mode.parse().map_err(to_js)?;
        let mut session = self.session.borrow_mut();
        let config = SimulationConfig {
            mode,
            ..session.config()
        };
        session.reconfigure(config).map_err(to_js)
    }

    pub fn set_particle_count(&self, count: usize) -> Result<(), JsValue> {
        let mut session = self.session.borrow_mut();
        let config = SimulationConfig {
            particle_count: count,
            ..session.config()
        };
        session.reconfigure(config).map_err(to_js)
    }

    /// Re-reads the canvas backing size; restarts the layout if running.
    pub fn resize(&self) -> Result<(), JsValue> {
        let size = canvas_size(&self.canvas).map_err(to_js)?;
        let mut session = self.session.borrow_mut();
        session.surface_mut().set_size(size);
        session.resize(size).map_err(to_js)
    }

    /// Pointer at `(x, y)` CSS pixels relative to the canvas.
    pub fn pointer_move(&self, x: f64, y: f64) {
        self.session
            .borrow_mut()
            .pointer_move(x * self.density, y * self.density);
    }

    pub fn pointer_leave(&self) {
        self.session.borrow_mut().pointer_leave();
    }

    pub fn is_running(&self) -> bool {
        self.session.borrow().is_running()
    }

    pub fn mode(&self) -> String {
        self.session.borrow().config().mode.name().to_string()
    }

    pub fn particle_count(&self) -> usize {
        self.session.borrow().particles().len()
    }

    /// Ticks run so far (as f64 for JS).
    pub fn ticks(&self) -> f64 {
        self.session.borrow().stats().ticks as f64
    }

    pub fn dropped_frames(&self) -> f64 {
        self.session.borrow().stats().dropped_frames as f64
    }

    /// Tuning knobs as a JSON string.
    pub fn params(&self) -> String {
        self.session.borrow().tuning().params().to_string()
    }
}

impl Drop for LiquidLab {
    fn drop(&mut self) {
        debug!("releasing canvas session");
        self.session.borrow_mut().stop();
    }
}

fn canvas_size(canvas: &HtmlCanvasElement) -> Result<SurfaceSize, LabError> {
    SurfaceSize::new(f64::from(canvas.width()), f64::from(canvas.height()))
}
