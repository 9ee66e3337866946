//! `XlGrid` - the JavaScript-facing grid.
//!
//! On wasm32 the grid owns its DOM: a scroll container painted by the DOM
//! renderer, a cell editor overlay and a filter panel, with every event
//! listener registered by the constructor. No manual JavaScript wiring is
//! needed beyond creating the grid and feeding it columns and rows.
//!
//! Host callbacks never run while the grid is borrowed: hooks queue their
//! calls and the queue is flushed once the triggering operation returns, so
//! a callback may call back into the grid.
//!
//! The non-wasm build exposes the same operations over a headless
//! [`Grid`] for tests and host-side tools.

mod clipboard;
pub mod events;
#[cfg(target_arch = "wasm32")]
mod filter_panel;
#[cfg(target_arch = "wasm32")]
mod scroll;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use js_sys::{Array, Function};
#[cfg(target_arch = "wasm32")]
use serde::Serialize;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use web_sys::{Event, FocusEvent, HtmlDivElement, HtmlElement, KeyboardEvent, MouseEvent, Node};

use crate::config::GridConfig;
use crate::dataset::Scope;
#[cfg(target_arch = "wasm32")]
use crate::callbacks::CellChange;
#[cfg(target_arch = "wasm32")]
use crate::drag::RowMove;
#[cfg(target_arch = "wasm32")]
use crate::editor::input::InputOverlay;
#[cfg(target_arch = "wasm32")]
use crate::editor::MutationRequest;
#[cfg(target_arch = "wasm32")]
use crate::error::GridError;
use crate::grid::Grid;
#[cfg(target_arch = "wasm32")]
use crate::render::{CellRenderData, DomRenderer, RenderFrame};
#[cfg(target_arch = "wasm32")]
use crate::types::{CellRange, ColumnSpec};
#[cfg(target_arch = "wasm32")]
use filter_panel::PanelView;

#[cfg(not(target_arch = "wasm32"))]
use crate::focus::{self, GridId};
#[cfg(not(target_arch = "wasm32"))]
use events::KeyOutcome;

/// Scope names accepted from hosts: `"all"`, anything else is rendered.
pub fn parse_scope(scope: &str) -> Scope {
    if scope.eq_ignore_ascii_case("all") {
        Scope::All
    } else {
        Scope::Rendered
    }
}

/// A host callback with its arguments, waiting to be invoked.
#[cfg(target_arch = "wasm32")]
pub(crate) struct HostCall {
    callback: Function,
    args: Array,
}

#[cfg(target_arch = "wasm32")]
pub(crate) type HostQueue = Rc<RefCell<Vec<HostCall>>>;

#[cfg(target_arch = "wasm32")]
fn enqueue(queue: &HostQueue, callback: &Function, args: Array) {
    if let Ok(mut q) = queue.try_borrow_mut() {
        q.push(HostCall {
            callback: callback.clone(),
            args,
        });
    }
}

/// Invoke queued host callbacks. Must not be called while state is borrowed.
#[cfg(target_arch = "wasm32")]
pub(crate) fn flush(queue: &HostQueue) {
    let calls: Vec<HostCall> = match queue.try_borrow_mut() {
        Ok(mut q) => q.drain(..).collect(),
        Err(_) => return,
    };
    for call in calls {
        let _ = call.callback.apply(&JsValue::NULL, &call.args);
    }
}

#[cfg(target_arch = "wasm32")]
fn busy() -> JsValue {
    JsValue::from_str("grid is busy handling an event")
}

#[cfg(target_arch = "wasm32")]
fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// An in-progress column resize from the header's right edge.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnResize {
    pub(crate) column: usize,
    pub(crate) start_x: f64,
    pub(crate) start_width: f64,
}

/// Shared state that can be accessed by event handlers (wasm32 only)
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub(crate) grid: Grid,
    pub(crate) container: HtmlDivElement,
    pub(crate) header_height: f64,
    pub(crate) input: InputOverlay,
    pub(crate) panel: PanelView,
    pub(crate) resize: Option<ColumnResize>,
    pub(crate) row_drag: bool,
}

#[cfg(target_arch = "wasm32")]
impl SharedState {
    /// Show, move or hide the editor and filter panel to match the grid.
    pub(crate) fn sync_overlays(&mut self) {
        let SharedState {
            grid,
            container,
            header_height,
            input,
            panel,
            ..
        } = self;
        match grid.edit_session() {
            Some(session) if !input.is_shown() => {
                let left = grid.layout().left(session.col).unwrap_or_default();
                let width = grid.layout().width(session.col).unwrap_or_default();
                let top = *header_height + grid.viewport().row_top(session.row);
                let rect = [left, top, width, grid.viewport().row_height()];
                input.show(session, rect, &grid.config().date_format, container);
            }
            None if input.is_shown() => {
                input.hide();
                let _ = container.focus();
            }
            _ => {}
        }
        if grid.filter_panel().is_none() && panel.is_open() {
            panel.hide();
        }
    }
}

/// The grid exported to JavaScript
#[wasm_bindgen]
pub struct XlGrid {
    #[cfg(target_arch = "wasm32")]
    state: Rc<RefCell<SharedState>>,
    #[cfg(target_arch = "wasm32")]
    queue: HostQueue,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    key_closure: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    focus_closures: Vec<Closure<dyn FnMut(FocusEvent)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    event_closures: Vec<Closure<dyn FnMut(Event)>>,
    #[cfg(target_arch = "wasm32")]
    id: crate::focus::GridId,

    // Non-wasm32 fields
    #[cfg(not(target_arch = "wasm32"))]
    grid: Grid,
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl XlGrid {
    /// Create a grid inside the element with id `container_id`.
    ///
    /// `config` is an optional plain object with any `GridConfig` fields,
    /// e.g. `{ draggableRows: true, viewportHeight: 300 }`.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, config: JsValue) -> Result<XlGrid, JsValue> {
        console_error_panic_hook::set_once();

        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| GridError::Config(e.to_string()))?
        };

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| GridError::Dom("no document".into()))?;
        let host = document
            .get_element_by_id(container_id)
            .ok_or_else(|| GridError::Dom(format!("no element with id {container_id:?}")))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| GridError::Dom(format!("#{container_id} is not an HTML element")))?;

        let renderer = DomRenderer::new(&document, &host, &config)?;
        let container = renderer.container().clone();
        let header_height = renderer.header_height();

        let mut grid = Grid::new(config)?;
        grid.set_backend(Box::new(renderer));
        let id = grid.id();

        let mut input = InputOverlay::new(format!("xlgrid-options-{id}"));
        let input_element = input.ensure(&document, &container).cloned();
        let panel = PanelView::new(&document, &container)?;
        let panel_root = panel.root().clone();
        let search = panel.search_input().clone();

        let state = Rc::new(RefCell::new(SharedState {
            grid,
            container: container.clone(),
            header_height,
            input,
            panel,
            resize: None,
            row_drag: false,
        }));
        let queue = HostQueue::default();

        let mut view = XlGrid {
            state,
            queue,
            closures: Vec::new(),
            key_closure: None,
            focus_closures: Vec::new(),
            event_closures: Vec::new(),
            id,
        };

        view.install_pointer_listeners(&container);
        view.install_key_listener(&container);
        view.install_focus_listeners(&container);
        view.install_scroll_listener(&container);
        if let Some(input) = input_element {
            view.install_editor_listener(&input);
        }
        view.install_panel_listeners(&panel_root, &search);

        clipboard::register(
            id,
            Rc::downgrade(&view.state),
            Rc::downgrade(&view.queue),
            container,
        );

        view.with_grid(|g| {
            g.render();
        });
        Ok(view)
    }

    /// Register a column from `{ name, kind: { type, options? }, width?,
    /// disabled?, filterable?, summary? }`.
    pub fn add_column(&self, spec: JsValue) -> Result<usize, JsValue> {
        let spec: ColumnSpec =
            serde_wasm_bindgen::from_value(spec).map_err(|e| GridError::Config(e.to_string()))?;
        self.with_grid(|g| g.add_column(spec.into()))
            .ok_or_else(busy)?
            .map_err(JsValue::from)
    }

    /// Append a row; returns false if it was rejected.
    pub fn add_row(&self, values: Vec<String>) -> bool {
        self.with_grid(|g| g.add_row(&values))
            .unwrap_or(false)
    }

    pub fn update_cell_at(
        &self,
        row: usize,
        column: usize,
        value: &str,
        scope: &str,
        suppress_callback: bool,
    ) -> bool {
        self.with_grid(|g| {
            g.update_cell_at(row, column, value, parse_scope(scope), suppress_callback)
        })
        .unwrap_or(false)
    }

    pub fn text_at(&self, row: usize, column: usize, scope: &str) -> Option<String> {
        let s = self.state.try_borrow().ok()?;
        s.grid
            .text_at(parse_scope(scope), row, column)
            .map(str::to_string)
    }

    pub fn choice_value_at(&self, row: usize, column: usize, scope: &str) -> Option<String> {
        let s = self.state.try_borrow().ok()?;
        s.grid
            .choice_value_at(parse_scope(scope), row, column)
            .map(str::to_string)
    }

    pub fn row_count(&self, scope: &str) -> usize {
        self.state
            .try_borrow()
            .map(|s| s.grid.row_count(parse_scope(scope)))
            .unwrap_or(0)
    }

    pub fn clear_data(&self) {
        self.with_grid(Grid::clear_data);
    }

    pub fn set_style_at(&self, row: usize, column: usize, style: &str) -> bool {
        self.with_grid(|g| g.set_style_at(row, column, style))
            .unwrap_or(false)
    }

    pub fn disable_cell_at(&self, row: usize, column: usize) -> bool {
        self.with_grid(|g| g.disable_cell_at(row, column))
            .unwrap_or(false)
    }

    pub fn enable_cell_at(&self, row: usize, column: usize) -> bool {
        self.with_grid(|g| g.enable_cell_at(row, column))
            .unwrap_or(false)
    }

    pub fn resize_column(&self, column: usize, width: f64) -> bool {
        self.with_grid(|g| g.resize_column(column, width))
            .unwrap_or(false)
    }

    /// Apply a `{ row, column, mutation: { kind, payload } }` request.
    pub fn apply_mutation(&self, request: JsValue) -> Result<bool, JsValue> {
        let request: MutationRequest = serde_wasm_bindgen::from_value(request)?;
        Ok(self
            .with_grid(|g| g.apply_mutation(&request))
            .unwrap_or(false))
    }

    /// Select `values` on a filterable column; returns the rendered count.
    pub fn apply_filter(&self, column: usize, values: Vec<String>) -> Result<usize, JsValue> {
        self.with_grid(|g| g.apply_filter(column, &values))
            .ok_or_else(busy)?
            .map_err(JsValue::from)
    }

    pub fn clear_all_filters(&self) -> bool {
        self.with_grid(Grid::clear_all_filters).unwrap_or(false)
    }

    /// Open a column's filter panel below its header.
    pub fn open_filter(&self, column: usize) -> Result<(), JsValue> {
        let result = {
            let Ok(mut s) = self.state.try_borrow_mut() else {
                return Ok(());
            };
            Self::show_filter_panel(&mut s, column)
        };
        flush(&self.queue);
        result.map_err(JsValue::from)
    }

    pub fn select_cells(
        &self,
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
    ) -> bool {
        self.with_grid(|g| g.select_cells(CellRange::new(start_row, start_col, end_row, end_col)))
            .unwrap_or(false)
    }

    pub fn select_all(&self) -> bool {
        self.with_grid(Grid::select_all).unwrap_or(false)
    }

    pub fn clear_selection(&self) -> bool {
        self.with_grid(Grid::clear_selection).unwrap_or(false)
    }

    /// Current selection as `{ startRow, startCol, endRow, endCol }`, or null.
    pub fn selection(&self) -> JsValue {
        self.state
            .try_borrow()
            .ok()
            .and_then(|s| s.grid.selection())
            .map_or(JsValue::NULL, |r| to_js(&r))
    }

    pub fn start_cell_edit(&self, row: usize, column: usize) -> bool {
        self.with_grid(|g| g.start_cell_edit(row, column))
            .unwrap_or(false)
    }

    pub fn end_cell_edit(&self) -> bool {
        self.with_grid(Grid::end_cell_edit).unwrap_or(false)
    }

    pub fn copy_selection(&self) -> Option<String> {
        self.state.try_borrow().ok()?.grid.copy_selection()
    }

    pub fn paste(&self, text: &str) -> usize {
        self.with_grid(|g| g.paste(text)).unwrap_or(0)
    }

    /// Column summaries as `[{ column, total, subtotal }]`.
    pub fn summaries(&self) -> JsValue {
        self.state
            .try_borrow()
            .map_or(JsValue::NULL, |s| to_js(&s.grid.summaries()))
    }

    pub fn calculate_summary(&self) {
        self.with_grid(Grid::calculate_summary);
    }

    pub fn render(&self) {
        self.with_grid(|g| {
            g.render();
        });
    }

    pub fn focus(&self) {
        if let Ok(s) = self.state.try_borrow() {
            let _ = s.container.focus();
        }
    }

    // ---- Host callbacks ----

    /// `callback(change)` with `{ row, column, oldValue, newValue, scope, filterChanged }`.
    pub fn set_after_change_cell_data(&self, callback: Function) {
        let queue = self.queue.clone();
        self.set_hook(move |g| {
            g.callbacks.after_change_cell_data = Some(Box::new(move |change: &CellChange| {
                enqueue(&queue, &callback, Array::of1(&to_js(change)));
            }));
        });
    }

    /// `callback(windowStart, windowEnd)` after every render.
    pub fn set_after_render_grid(&self, callback: Function) {
        let queue = self.queue.clone();
        self.set_hook(move |g| {
            g.callbacks.after_render_grid = Some(Box::new(move |frame: &RenderFrame| {
                enqueue(
                    &queue,
                    &callback,
                    Array::of2(
                        &JsValue::from(frame.window.start),
                        &JsValue::from(frame.window.end),
                    ),
                );
            }));
        });
    }

    /// `callback(cell)` for every painted cell.
    pub fn set_after_render_cell(&self, callback: Function) {
        let queue = self.queue.clone();
        self.set_hook(move |g| {
            g.callbacks.after_render_cell = Some(Box::new(move |cell: &CellRenderData| {
                enqueue(&queue, &callback, Array::of1(&to_js(cell)));
            }));
        });
    }

    /// `callback(from, to)` after a row drag.
    pub fn set_after_move_row(&self, callback: Function) {
        let queue = self.queue.clone();
        self.set_hook(move |g| {
            g.callbacks.after_move_row = Some(Box::new(move |row_move: RowMove| {
                enqueue(
                    &queue,
                    &callback,
                    Array::of2(&JsValue::from(row_move.from), &JsValue::from(row_move.to)),
                );
            }));
        });
    }

    /// `callback(range)` after the selection changes.
    pub fn set_after_select_cells(&self, callback: Function) {
        let queue = self.queue.clone();
        self.set_hook(move |g| {
            g.callbacks.after_select_cells = Some(Box::new(move |range: CellRange| {
                enqueue(&queue, &callback, Array::of1(&to_js(&range)));
            }));
        });
    }

    /// `callback(column, width)` after a column resize.
    pub fn set_after_resize_column(&self, callback: Function) {
        let queue = self.queue.clone();
        self.set_hook(move |g| {
            g.callbacks.after_resize_column = Some(Box::new(move |column: usize, width: f64| {
                enqueue(
                    &queue,
                    &callback,
                    Array::of2(&JsValue::from(column), &JsValue::from_f64(width)),
                );
            }));
        });
    }
}

#[cfg(target_arch = "wasm32")]
impl XlGrid {
    fn install_pointer_listeners(&mut self, container: &HtmlDivElement) {
        type Handler = fn(&Rc<RefCell<SharedState>>, &HostQueue, &MouseEvent);
        let handlers: [(&str, Handler); 4] = [
            ("mousedown", XlGrid::internal_mouse_down),
            ("mousemove", XlGrid::internal_mouse_move),
            ("mouseup", XlGrid::internal_mouse_up),
            ("dblclick", XlGrid::internal_double_click),
        ];
        for (name, handler) in handlers {
            let state = Rc::downgrade(&self.state);
            let queue = self.queue.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                if let Some(state) = state.upgrade() {
                    handler(&state, &queue, &event);
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            container
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .ok();
            self.closures.push(closure);
        }
    }

    fn install_key_listener(&mut self, container: &HtmlDivElement) {
        let state = Rc::downgrade(&self.state);
        let queue = self.queue.clone();
        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if let Some(state) = state.upgrade() {
                XlGrid::internal_key_down(&state, &queue, &event);
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        container
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .ok();
        self.key_closure = Some(closure);
    }

    fn install_focus_listeners(&mut self, container: &HtmlDivElement) {
        let id = self.id;
        let focus_in = Closure::wrap(Box::new(move |_event: FocusEvent| {
            crate::focus::set_focused(id);
        }) as Box<dyn FnMut(FocusEvent)>);

        let inside = container.clone();
        let focus_out = Closure::wrap(Box::new(move |event: FocusEvent| {
            let next = event.related_target().and_then(|t| t.dyn_into::<Node>().ok());
            if !inside.contains(next.as_ref()) {
                crate::focus::clear_focus(id);
            }
        }) as Box<dyn FnMut(FocusEvent)>);

        container
            .add_event_listener_with_callback("focusin", focus_in.as_ref().unchecked_ref())
            .ok();
        container
            .add_event_listener_with_callback("focusout", focus_out.as_ref().unchecked_ref())
            .ok();
        self.focus_closures.push(focus_in);
        self.focus_closures.push(focus_out);
    }

    fn install_scroll_listener(&mut self, container: &HtmlDivElement) {
        let state = Rc::downgrade(&self.state);
        let queue = self.queue.clone();
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            if let Some(state) = state.upgrade() {
                XlGrid::internal_scroll(&state, &queue);
            }
        }) as Box<dyn FnMut(Event)>);
        container
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
            .ok();
        self.event_closures.push(closure);
    }

    fn install_editor_listener(&mut self, input: &web_sys::HtmlInputElement) {
        let state = Rc::downgrade(&self.state);
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            if let Some(state) = state.upgrade() {
                if let Ok(mut s) = state.try_borrow_mut() {
                    let date_format = s.grid.config().date_format.clone();
                    if let Some(value) = s.input.value(&date_format) {
                        s.grid.set_edit_value(&value);
                    }
                }
            }
        }) as Box<dyn FnMut(Event)>);
        // "change" covers date pickers that do not fire "input".
        for name in ["input", "change"] {
            input
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .ok();
        }
        self.event_closures.push(closure);
    }

    fn install_panel_listeners(
        &mut self,
        panel_root: &HtmlDivElement,
        search: &web_sys::HtmlInputElement,
    ) {
        let state = Rc::downgrade(&self.state);
        let queue = self.queue.clone();
        let click = Closure::wrap(Box::new(move |event: MouseEvent| {
            if let Some(state) = state.upgrade() {
                XlGrid::internal_panel_click(&state, &queue, &event);
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        panel_root
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
            .ok();
        self.closures.push(click);

        let state = Rc::downgrade(&self.state);
        let typed = Closure::wrap(Box::new(move |_event: Event| {
            if let Some(state) = state.upgrade() {
                XlGrid::internal_panel_search(&state);
            }
        }) as Box<dyn FnMut(Event)>);
        search
            .add_event_listener_with_callback("input", typed.as_ref().unchecked_ref())
            .ok();
        self.event_closures.push(typed);
    }

    /// Run `f` on the grid, then sync overlays and flush host callbacks.
    /// `None` if the grid is already borrowed by a running handler.
    fn with_grid<R>(&self, f: impl FnOnce(&mut Grid) -> R) -> Option<R> {
        let result = {
            let Ok(mut s) = self.state.try_borrow_mut() else {
                return None;
            };
            let result = f(&mut s.grid);
            s.sync_overlays();
            result
        };
        flush(&self.queue);
        Some(result)
    }

    fn set_hook(&self, install: impl FnOnce(&mut Grid)) {
        if let Ok(mut s) = self.state.try_borrow_mut() {
            install(&mut s.grid);
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for XlGrid {
    fn drop(&mut self) {
        clipboard::unregister(self.id);
    }
}

// ============================================================================
// Non-WASM32 Implementation (for testing/CLI)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl XlGrid {
    /// Create a headless grid (non-wasm version for testing)
    pub fn new_test(config: GridConfig) -> crate::error::Result<Self> {
        Ok(XlGrid {
            grid: Grid::new(config)?,
        })
    }

    pub fn id(&self) -> GridId {
        self.grid.id()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Focus-in: this grid receives page copy and paste.
    pub fn focus(&self) {
        focus::set_focused(self.grid.id());
    }

    /// Focus-out.
    pub fn blur(&self) {
        focus::clear_focus(self.grid.id());
    }

    pub fn is_focused(&self) -> bool {
        focus::is_focused(self.grid.id())
    }

    /// A key pressed on the grid surface or inside its editor.
    pub fn key_down(&mut self, key: &str, ctrl: bool, shift: bool) -> KeyOutcome {
        events::key_down(&mut self.grid, key, ctrl, shift)
    }

    /// A page-level copy event; answered only by the focused grid.
    pub fn page_copy(&self) -> Option<String> {
        clipboard::copy_from_focused(&self.grid)
    }

    /// A page-level paste event; applied only by the focused grid.
    pub fn page_paste(&mut self, text: &str) -> Option<usize> {
        clipboard::paste_into_focused(&mut self.grid, text)
    }

    /// A pointer went down outside this grid.
    pub fn click_outside(&mut self) {
        clipboard::click_outside(&mut self.grid);
    }

    pub fn update_cell_at(
        &mut self,
        row: usize,
        column: usize,
        value: &str,
        scope: &str,
        suppress_callback: bool,
    ) -> bool {
        self.grid
            .update_cell_at(row, column, value, parse_scope(scope), suppress_callback)
    }

    pub fn text_at(&self, row: usize, column: usize, scope: &str) -> Option<String> {
        self.grid
            .text_at(parse_scope(scope), row, column)
            .map(str::to_string)
    }

    pub fn row_count(&self, scope: &str) -> usize {
        self.grid.row_count(parse_scope(scope))
    }
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

    #[test]
    fn test_parse_scope() {
        assert_eq!(parse_scope("all"), Scope::All);
        assert_eq!(parse_scope("ALL"), Scope::All);
        assert_eq!(parse_scope("rendered"), Scope::Rendered);
        assert_eq!(parse_scope(""), Scope::Rendered);
    }
}
