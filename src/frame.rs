use crate::constants::{EDITOR_HELP_ID, MAX_FRAME_DT_SEC, OVERLAY_REFRESH_SEC};
use crate::overlay;
use crate::render;
use instant::Instant;
use scrollpath_core::{LineVertex, SceneKey, SharedContext};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub ctx: SharedContext,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
    overlay_accum: f32,
    lines_key: Option<SceneKey>,
    lines: Vec<LineVertex>,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        ctx: SharedContext,
        canvas: web::HtmlCanvasElement,
        document: web::Document,
        gpu: Option<render::GpuState<'a>>,
    ) -> Self {
        Self {
            ctx,
            canvas,
            document,
            gpu,
            last_instant: Instant::now(),
            // Force an overlay refresh on the first frame
            overlay_accum: OVERLAY_REFRESH_SEC,
            lines_key: None,
            lines: Vec::new(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let width = self.canvas.width();
        let height = self.canvas.height();

        let view_proj = {
            let mut ctx = self.ctx.borrow_mut();
            ctx.camera
                .set_aspect(width.max(1) as f32 / height.max(1) as f32);
            ctx.frame();
            if ctx.camera.take_projection_dirty() {
                log::debug!(
                    "[gpu] projection aspect={:.3} fov={:?}",
                    ctx.camera.aspect,
                    ctx.camera.fov()
                );
            }

            let key = ctx.scene_key();
            if self.lines_key != Some(key) {
                self.lines = ctx.scene_lines();
                self.lines_key = Some(key);
            }

            self.overlay_accum += dt_sec;
            if self.overlay_accum >= OVERLAY_REFRESH_SEC {
                self.overlay_accum = 0.0;
                overlay::set_debug_lines(&self.document, &ctx.report().lines());
                overlay::set_visible(&self.document, EDITOR_HELP_ID, ctx.debug());
            }

            ctx.camera.view_proj()
        };

        if let Some(g) = self.gpu.as_mut() {
            g.resize_if_needed(width, height);
            match g.render(view_proj, &self.lines) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("[gpu] render error: {:?}", e),
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(tick: &TickClosure) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
