use scrollpath_core::{wheel_delta_px, ContextHandle};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::input;

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub ctx: ContextHandle,
}

fn report(result: scrollpath_core::Result<()>) {
    if let Err(e) = result {
        log::error!("[input] {}", e);
    }
}

pub fn wire_input_handlers(w: InputWiring) {
    let Some(window) = web::window() else {
        return;
    };

    // pointermove
    {
        let ctx = w.ctx.clone();
        let canvas = w.canvas.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let px = input::pointer_canvas_px(&ev, &canvas);
            let ndc = input::pointer_viewport_ndc(&ev);
            report(ctx.with(|c| c.on_pointer_move(px, ndc)));
        }) as Box<dyn FnMut(_)>);
        let _ = window
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerdown
    {
        let ctx = w.ctx.clone();
        let canvas = w.canvas.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let px = input::pointer_canvas_px(&ev, &canvas);
            report(ctx.with(|c| c.on_pointer_down(px)));
            let _ = canvas.set_pointer_capture(ev.pointer_id());
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup
    {
        let ctx = w.ctx.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            report(ctx.with(|c| c.on_pointer_up()));
        }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // wheel (non-passive so the page itself does not scroll)
    {
        let ctx = w.ctx.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            let delta = wheel_delta_px(ev.delta_y(), ev.delta_mode());
            report(ctx.with(|c| c.on_wheel(delta)));
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(false);
        let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            closure.as_ref().unchecked_ref(),
            &opts,
        );
        closure.forget();
    }
}
