//! Page-wide clipboard and outside-click handling.
//!
//! Copy, paste and mousedown listeners are installed on the document once
//! per page. Copy and paste go to the grid holding focus; a mousedown goes
//! to every grid it landed outside of.

#[cfg(target_arch = "wasm32")]
use std::cell::{Cell, RefCell};
#[cfg(target_arch = "wasm32")]
use std::rc::Weak;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{ClipboardEvent, HtmlDivElement, MouseEvent, Node};

#[cfg(target_arch = "wasm32")]
use super::{flush, HostCall, SharedState};
use crate::focus;
#[cfg(target_arch = "wasm32")]
use crate::focus::GridId;
use crate::grid::Grid;

/// Selection text for a page copy, if this grid owns it. An open editor
/// keeps the browser's own copy of its text.
pub(crate) fn copy_from_focused(grid: &Grid) -> Option<String> {
    if !focus::is_focused(grid.id()) || grid.is_editing() {
        return None;
    }
    grid.copy_selection()
}

/// Apply a page paste if this grid owns it. Returns `None` when the paste
/// belongs to someone else.
pub(crate) fn paste_into_focused(grid: &mut Grid, text: &str) -> Option<usize> {
    if !focus::is_focused(grid.id()) || grid.is_editing() || grid.selection().is_none() {
        return None;
    }
    Some(grid.paste(text))
}

/// A pointer went down somewhere other than this grid.
pub(crate) fn click_outside(grid: &mut Grid) {
    if grid.is_editing() {
        grid.end_cell_edit();
    }
    grid.cancel_filter();
    grid.clear_selection();
    grid.pointer_up();
}

#[cfg(target_arch = "wasm32")]
struct PageEntry {
    id: GridId,
    state: Weak<RefCell<SharedState>>,
    queue: Weak<RefCell<Vec<HostCall>>>,
    container: HtmlDivElement,
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static GRIDS: RefCell<Vec<PageEntry>> = const { RefCell::new(Vec::new()) };
    static INSTALLED: Cell<bool> = const { Cell::new(false) };
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn register(
    id: GridId,
    state: Weak<RefCell<SharedState>>,
    queue: Weak<RefCell<Vec<HostCall>>>,
    container: HtmlDivElement,
) {
    GRIDS.with(|grids| {
        let mut grids = grids.borrow_mut();
        grids.retain(|g| g.state.strong_count() > 0);
        grids.push(PageEntry {
            id,
            state,
            queue,
            container,
        });
    });
    install_page_listeners();
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn unregister(id: GridId) {
    GRIDS.with(|grids| grids.borrow_mut().retain(|g| g.id != id));
    focus::clear_focus(id);
}

#[cfg(target_arch = "wasm32")]
type LiveGrid = (
    GridId,
    std::rc::Rc<RefCell<SharedState>>,
    Weak<RefCell<Vec<HostCall>>>,
    HtmlDivElement,
);

/// Live grids, collected so no registry borrow is held while handling.
#[cfg(target_arch = "wasm32")]
fn live_grids() -> Vec<LiveGrid> {
    GRIDS.with(|grids| {
        grids
            .borrow()
            .iter()
            .filter_map(|g| {
                Some((g.id, g.state.upgrade()?, g.queue.clone(), g.container.clone()))
            })
            .collect()
    })
}

#[cfg(target_arch = "wasm32")]
fn finish(queue: &Weak<RefCell<Vec<HostCall>>>) {
    if let Some(queue) = queue.upgrade() {
        flush(&queue);
    }
}

#[cfg(target_arch = "wasm32")]
fn handle_copy(event: &ClipboardEvent) {
    let Some(id) = focus::focused() else {
        return;
    };
    for (gid, state, _, _) in live_grids() {
        if gid != id {
            continue;
        }
        let Ok(s) = state.try_borrow() else {
            return;
        };
        if let (Some(text), Some(data)) = (copy_from_focused(&s.grid), event.clipboard_data()) {
            if data.set_data("text/plain", &text).is_ok() {
                event.prevent_default();
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn handle_paste(event: &ClipboardEvent) {
    let Some(id) = focus::focused() else {
        return;
    };
    let Some(text) = event
        .clipboard_data()
        .and_then(|data| data.get_data("text").ok())
    else {
        return;
    };
    for (gid, state, queue, _) in live_grids() {
        if gid != id {
            continue;
        }
        {
            let Ok(mut s) = state.try_borrow_mut() else {
                return;
            };
            if paste_into_focused(&mut s.grid, &text).is_some() {
                event.prevent_default();
            }
            s.sync_overlays();
        }
        finish(&queue);
    }
}

#[cfg(target_arch = "wasm32")]
fn handle_outside_click(event: &MouseEvent) {
    let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
    for (_, state, queue, container) in live_grids() {
        if container.contains(target.as_ref()) {
            continue;
        }
        {
            let Ok(mut s) = state.try_borrow_mut() else {
                continue;
            };
            click_outside(&mut s.grid);
            s.sync_overlays();
        }
        finish(&queue);
    }
}

#[cfg(target_arch = "wasm32")]
fn install_page_listeners() {
    if INSTALLED.with(|i| i.replace(true)) {
        return;
    }
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let copy = Closure::wrap(Box::new(move |event: ClipboardEvent| {
        handle_copy(&event);
    }) as Box<dyn FnMut(ClipboardEvent)>);
    let paste = Closure::wrap(Box::new(move |event: ClipboardEvent| {
        handle_paste(&event);
    }) as Box<dyn FnMut(ClipboardEvent)>);
    let mouse_down = Closure::wrap(Box::new(move |event: MouseEvent| {
        handle_outside_click(&event);
    }) as Box<dyn FnMut(MouseEvent)>);

    document
        .add_event_listener_with_callback("copy", copy.as_ref().unchecked_ref())
        .ok();
    document
        .add_event_listener_with_callback("paste", paste.as_ref().unchecked_ref())
        .ok();
    document
        .add_event_listener_with_callback("mousedown", mouse_down.as_ref().unchecked_ref())
        .ok();

    // Page-lifetime listeners.
    copy.forget();
    paste.forget();
    mouse_down.forget();
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::dataset::Scope;
    use crate::grid::tests::people;
    use crate::types::CellRange;

    #[test]
    fn test_page_clipboard_goes_to_focused_grid() {
        let mut a = people();
        let mut b = people();
        a.select_cells(CellRange::cell(0, 0));
        b.select_cells(CellRange::cell(0, 0));

        focus::set_focused(b.id());
        assert_eq!(copy_from_focused(&a), None);
        assert_eq!(copy_from_focused(&b).as_deref(), Some("A\r\n"));

        assert_eq!(paste_into_focused(&mut a, "Q"), None);
        assert_eq!(paste_into_focused(&mut b, "Q"), Some(1));
        assert_eq!(a.text_at(Scope::All, 0, 0), Some("A"));
        assert_eq!(b.text_at(Scope::All, 0, 0), Some("Q"));
        focus::clear_focus(b.id());
    }

    #[test]
    fn test_click_outside_commits_edit_and_clears_selection() {
        let mut grid = people();
        grid.start_cell_edit(1, 0);
        grid.set_edit_value("Bea");
        click_outside(&mut grid);
        assert!(!grid.is_editing());
        assert_eq!(grid.text_at(Scope::All, 1, 0), Some("Bea"));
        assert_eq!(grid.selection(), None);
    }
}
