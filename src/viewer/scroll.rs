//! Scroll handling for `XlGrid`.
//!
//! The browser owns the scroll position; the grid only follows it and
//! re-renders when the first visible row changes.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::HtmlDivElement;

use super::{flush, HostQueue, SharedState, XlGrid};

fn scroll_f64(element: &HtmlDivElement, property: &str) -> f64 {
    Reflect::get(element.as_ref(), &JsValue::from_str(property))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

impl XlGrid {
    pub(crate) fn internal_scroll(state: &Rc<RefCell<SharedState>>, queue: &HostQueue) {
        {
            let Ok(mut s) = state.try_borrow_mut() else {
                return;
            };
            let top = scroll_f64(&s.container, "scrollTop");
            let left = scroll_f64(&s.container, "scrollLeft");
            s.grid.set_scroll_left(left);
            s.grid.scroll_to(top);
        }
        flush(queue);
    }
}
