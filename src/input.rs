use glam::Vec2;
use web_sys as web;

use scrollpath_core::pointer_ndc;

/// Pointer position in the canvas' backing store pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w > 0.0 && h > 0.0 {
        Vec2::new(
            x_css / w * canvas.width() as f32,
            y_css / h * canvas.height() as f32,
        )
    } else {
        Vec2::ZERO
    }
}

/// Pointer position relative to the whole viewport, in \[-1, 1\]².
#[inline]
pub fn pointer_viewport_ndc(ev: &web::MouseEvent) -> Vec2 {
    let (w, h) = crate::dom::viewport_size();
    pointer_ndc(ev.client_x() as f32, ev.client_y() as f32, w, h)
}
