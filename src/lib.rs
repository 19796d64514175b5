#![cfg(target_arch = "wasm32")]
use scrollpath_core::{Camera, CameraPathContext, ContextHandle, KeyframeStore, INITIAL_FOV_DEG};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scrollpath-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::wire_canvas_resize(&canvas);
    overlay::init_editor_help(&document);

    let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;
    let store = KeyframeStore::new();
    log::info!("[keyframes] loaded {} keyframes", store.len());
    let ctx = CameraPathContext::new(store, Camera::perspective(INITIAL_FOV_DEG, aspect))
        .into_shared();

    events::wire_global_keydown(ContextHandle::new(&ctx));
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        ctx: ContextHandle::new(&ctx),
    });

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        ctx, canvas, document, gpu,
    )));
    frame::start_loop(frame_ctx);
    Ok(())
}
