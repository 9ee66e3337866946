//! DOM painter: absolutely positioned divs inside a scroll container.
//!
//! Structure:
//! ```text
//! div.xlgrid (scroll container, focusable)
//!   div.xlgrid-header   (sticky top)
//!   div.xlgrid-body     (full content height)
//!     div.xlgrid-rows   (only the window's rows)
//!     div.xlgrid-selection
//!   div.xlgrid-footer   (sticky bottom, summaries)
//! ```

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlDivElement, HtmlElement};

use super::backend::RenderBackend;
use super::frame::{CellRenderData, HeaderRenderData, RenderFrame};
use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::summary::ColumnSummary;

const CELL_STYLE: &str = "position:absolute;box-sizing:border-box;overflow:hidden;\
white-space:nowrap;text-overflow:ellipsis;padding:0 4px;border-right:1px solid #e0e0e0;\
border-bottom:1px solid #e0e0e0;";

fn dom_err(e: JsValue) -> GridError {
    GridError::Dom(format!("{e:?}"))
}

fn create_div(document: &Document, class: &str) -> Result<HtmlDivElement> {
    let div = document
        .create_element("div")
        .map_err(dom_err)?
        .dyn_into::<HtmlDivElement>()
        .map_err(|_| GridError::Dom("created element is not a div".into()))?;
    div.set_class_name(class);
    Ok(div)
}

fn px(v: f64) -> String {
    format!("{v}px")
}

fn set_box(el: &HtmlElement, left: f64, top: f64, width: f64, height: f64) {
    let style = el.style();
    let _ = style.set_property("left", &px(left));
    let _ = style.set_property("top", &px(top));
    let _ = style.set_property("width", &px(width));
    let _ = style.set_property("height", &px(height));
}

pub struct DomRenderer {
    document: Document,
    container: HtmlDivElement,
    header: HtmlDivElement,
    body: HtmlDivElement,
    rows: HtmlDivElement,
    selection: HtmlDivElement,
    footer: HtmlDivElement,
    header_height: f64,
}

impl DomRenderer {
    /// Build the grid's DOM skeleton inside `host`.
    pub fn new(document: &Document, host: &HtmlElement, config: &GridConfig) -> Result<Self> {
        let container = create_div(document, "xlgrid")?;
        let _ = container.set_attribute("tabindex", "0");
        let style = container.style();
        let _ = style.set_property("position", "relative");
        let _ = style.set_property("overflow", "auto");
        let _ = style.set_property("outline", "none");
        let _ = style.set_property("font-size", "13px");
        let _ = style.set_property("width", &px(config.viewport_width));
        let _ = style.set_property("height", &px(config.viewport_height + config.header_height));

        let header = create_div(document, "xlgrid-header")?;
        let style = header.style();
        let _ = style.set_property("position", "sticky");
        let _ = style.set_property("top", "0");
        let _ = style.set_property("z-index", "2");
        let _ = style.set_property("height", &px(config.header_height));
        let _ = style.set_property("background", "#f3f3f3");
        let _ = style.set_property("font-weight", "600");

        let body = create_div(document, "xlgrid-body")?;
        let _ = body.style().set_property("position", "relative");

        let rows = create_div(document, "xlgrid-rows")?;

        let selection = create_div(document, "xlgrid-selection")?;
        let style = selection.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("box-sizing", "border-box");
        let _ = style.set_property("border", "2px solid #4285f4");
        let _ = style.set_property("background", "rgba(66, 133, 244, 0.08)");
        let _ = style.set_property("pointer-events", "none");
        let _ = style.set_property("z-index", "1");
        let _ = style.set_property("display", "none");

        let footer = create_div(document, "xlgrid-footer")?;
        let style = footer.style();
        let _ = style.set_property("position", "sticky");
        let _ = style.set_property("bottom", "0");
        let _ = style.set_property("z-index", "2");
        let _ = style.set_property("background", "#fafafa");
        let _ = style.set_property("display", "none");

        body.append_child(&rows).map_err(dom_err)?;
        body.append_child(&selection).map_err(dom_err)?;
        container.append_child(&header).map_err(dom_err)?;
        container.append_child(&body).map_err(dom_err)?;
        container.append_child(&footer).map_err(dom_err)?;
        host.append_child(&container).map_err(dom_err)?;

        Ok(Self {
            document: document.clone(),
            container,
            header,
            body,
            rows,
            selection,
            footer,
            header_height: config.header_height,
        })
    }

    /// The focusable scroll container; event listeners attach here.
    pub fn container(&self) -> &HtmlDivElement {
        &self.container
    }

    /// Height of the sticky header, subtracted when hit testing the body.
    pub fn header_height(&self) -> f64 {
        self.header_height
    }

    pub fn scroll_top(&self) -> f64 {
        Reflect::get(self.container.as_ref(), &JsValue::from_str("scrollTop"))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    pub fn scroll_left(&self) -> f64 {
        Reflect::get(self.container.as_ref(), &JsValue::from_str("scrollLeft"))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn paint_header(&self, headers: &[HeaderRenderData], content_width: f64) -> Result<()> {
        self.header.set_inner_html("");
        let _ = self.header.style().set_property("width", &px(content_width));
        for h in headers {
            let cell = create_div(&self.document, "xlgrid-header-cell")?;
            let _ = cell.set_attribute("style", CELL_STYLE);
            let _ = cell.set_attribute("data-col", &h.col.to_string());
            set_box(&cell, h.left, 0.0, h.width, self.header_height);
            let _ = cell
                .style()
                .set_property("line-height", &px(self.header_height));
            cell.set_text_content(Some(&h.name));
            if h.filterable {
                let opener = create_div(&self.document, "xlgrid-filter")?;
                let _ = opener.set_attribute("data-col", &h.col.to_string());
                let style = opener.style();
                let _ = style.set_property("position", "absolute");
                let _ = style.set_property("right", "2px");
                let _ = style.set_property("top", "0");
                let _ = style.set_property("cursor", "pointer");
                let _ = style.set_property("color", if h.filtered { "#4285f4" } else { "#888" });
                opener.set_text_content(Some(if h.filtered { "\u{25BC}" } else { "\u{25BE}" }));
                cell.append_child(&opener).map_err(dom_err)?;
            }
            self.header.append_child(&cell).map_err(dom_err)?;
        }
        Ok(())
    }

    fn paint_cell(&self, cell: &CellRenderData, row_height: f64) -> Result<HtmlDivElement> {
        let div = create_div(
            &self.document,
            if cell.disabled {
                "xlgrid-cell xlgrid-disabled"
            } else {
                "xlgrid-cell"
            },
        )?;
        // Overlay style goes last so it wins over the defaults.
        let _ = div.set_attribute("style", &format!("{CELL_STYLE}{}", cell.style));
        set_box(&div, cell.left, 0.0, cell.width, row_height);
        let style = div.style();
        let _ = style.set_property("line-height", &px(row_height));
        if cell.numeric {
            let _ = style.set_property("text-align", "right");
        }
        if cell.disabled {
            let _ = style.set_property("color", "#999");
        }
        div.set_text_content(Some(&cell.text));
        Ok(div)
    }

    fn paint_rows(&self, frame: &RenderFrame) -> Result<()> {
        self.rows.set_inner_html("");
        for row in &frame.rows {
            let line = create_div(&self.document, "xlgrid-row")?;
            let style = line.style();
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("left", "0");
            let _ = style.set_property("top", &px(row.top));
            let _ = style.set_property("height", &px(frame.row_height));
            let _ = style.set_property("width", &px(frame.content_width));
            if frame.row_header_width > 0.0 {
                let handle = create_div(&self.document, "xlgrid-handle")?;
                let _ = handle.set_attribute("style", CELL_STYLE);
                set_box(&handle, 0.0, 0.0, frame.row_header_width, frame.row_height);
                let _ = handle.style().set_property("cursor", "grab");
                handle.set_text_content(Some("\u{2261}"));
                line.append_child(&handle).map_err(dom_err)?;
            }
            for cell in &row.cells {
                let div = self.paint_cell(cell, frame.row_height)?;
                line.append_child(&div).map_err(dom_err)?;
            }
            self.rows.append_child(&line).map_err(dom_err)?;
        }
        Ok(())
    }

    fn paint_footer(&self, frame: &RenderFrame) -> Result<()> {
        self.footer.set_inner_html("");
        if frame.summaries.is_empty() {
            let _ = self.footer.style().set_property("display", "none");
            return Ok(());
        }
        let style = self.footer.style();
        let _ = style.set_property("display", "block");
        let _ = style.set_property("height", &px(self.header_height * 2.0));
        let _ = style.set_property("width", &px(frame.content_width));
        for ColumnSummary {
            column,
            total,
            subtotal,
        } in &frame.summaries
        {
            let Some(h) = frame.headers.iter().find(|h| h.col == *column) else {
                continue;
            };
            for (line, label, value) in [(0.0, "Total", total), (1.0, "Subtotal", subtotal)] {
                let cell = create_div(&self.document, "xlgrid-summary")?;
                let _ = cell.set_attribute("style", CELL_STYLE);
                set_box(
                    &cell,
                    h.left,
                    line * self.header_height,
                    h.width,
                    self.header_height,
                );
                let style = cell.style();
                let _ = style.set_property("text-align", "right");
                let _ = style.set_property("line-height", &px(self.header_height));
                let _ = cell.set_attribute("title", label);
                cell.set_text_content(Some(value));
                self.footer.append_child(&cell).map_err(dom_err)?;
            }
        }
        Ok(())
    }
}

impl RenderBackend for DomRenderer {
    fn paint(&mut self, frame: &RenderFrame) -> Result<()> {
        let style = self.body.style();
        let _ = style.set_property("height", &px(frame.content_height));
        let _ = style.set_property("width", &px(frame.content_width));

        self.paint_header(&frame.headers, frame.content_width)?;
        self.paint_rows(frame)?;
        self.paint_footer(frame)?;

        match frame.selection {
            Some(rect) => {
                set_box(&self.selection, rect.x, rect.y, rect.w, rect.h);
                let _ = self.selection.style().set_property("display", "block");
            }
            None => {
                let _ = self.selection.style().set_property("display", "none");
            }
        }
        Ok(())
    }

    fn set_scroll_top(&mut self, scroll_top: f64) {
        let _ = Reflect::set(
            self.container.as_ref(),
            &JsValue::from_str("scrollTop"),
            &JsValue::from_f64(scroll_top),
        );
    }
}

impl Drop for DomRenderer {
    fn drop(&mut self) {
        self.container.remove();
    }
}
