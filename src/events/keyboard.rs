use scrollpath_core::{command_for_key, ContextHandle, EditorCommand};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Route a key press to the session. Keys combined with Ctrl/Meta/Alt are
/// left to the browser.
pub fn handle_global_keydown(ev: &web::KeyboardEvent, ctx: &ContextHandle) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(command) = command_for_key(&ev.key()) else {
        return;
    };
    // Ignored editor keys (arrows outside debug) keep their browser default.
    let applied = ctx.with(|c| {
        let live = c.debug() || !command.requires_debug();
        c.apply_command(command).map(|()| live)
    });
    match applied {
        Ok(Ok(false)) => {}
        Ok(Ok(true)) => {
            if command != EditorCommand::ToggleDebug {
                log::debug!("[input] {:?}", command);
            }
            ev.prevent_default();
        }
        Ok(Err(e)) => log::warn!("[input] {:?} rejected: {}", command, e),
        Err(e) => log::error!("[input] {}", e),
    }
}

pub fn wire_global_keydown(ctx: ContextHandle) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &ctx);
            }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
