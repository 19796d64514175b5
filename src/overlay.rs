use web_sys as web;

use crate::constants::{DEBUG_MENU_ID, EDITOR_HELP_ID, EDITOR_HELP_LINES};

#[inline]
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document, id: &str) -> bool {
    document
        .get_element_by_id(id)
        .and_then(|el| el.get_attribute("style"))
        .map(|s| s.contains("display:none"))
        .unwrap_or(false)
}

#[inline]
pub fn set_visible(document: &web::Document, id: &str, visible: bool) {
    if visible == is_hidden(document, id) {
        if visible {
            show(document, id);
        } else {
            hide(document, id);
        }
    }
}

/// Replace the debug menu text, one line per entry.
pub fn set_debug_lines(document: &web::Document, lines: &[String]) {
    if let Some(el) = document.get_element_by_id(DEBUG_MENU_ID) {
        el.set_text_content(Some(&lines.join("\n")));
    }
}

/// Fill the editor help panel once at start-up; it is shown only in debug mode.
pub fn init_editor_help(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(EDITOR_HELP_ID) {
        el.set_text_content(Some(&EDITOR_HELP_LINES.join("\n")));
    }
    hide(document, EDITOR_HELP_ID);
}
