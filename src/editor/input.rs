//! DOM input overlay for cell editing.
//!
//! One `<input>` element per grid, positioned over the editing cell. Choice
//! columns attach a `<datalist>` of option labels; date columns switch the
//! input to `type="date"`, whose value is always ISO and is converted to
//! and from the grid's date format here.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use super::{date_from_iso, date_to_iso, EditSession, EditorKind};

pub(crate) struct InputOverlay {
    input: Option<HtmlInputElement>,
    datalist: Option<HtmlElement>,
    list_id: String,
    kind: Option<EditorKind>,
}

impl InputOverlay {
    pub(crate) fn new(list_id: String) -> Self {
        InputOverlay {
            input: None,
            datalist: None,
            list_id,
            kind: None,
        }
    }

    pub(crate) fn is_shown(&self) -> bool {
        self.kind.is_some()
    }

    /// The input element, once created (for attaching listeners).
    pub(crate) fn element(&self) -> Option<&HtmlInputElement> {
        self.input.as_ref()
    }

    /// Show the editor for `session` over the box `[x, y, w, h]`, in
    /// pixels relative to `container`.
    pub(crate) fn show(
        &mut self,
        session: &EditSession,
        rect: [f64; 4],
        date_format: &str,
        container: &HtmlElement,
    ) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let [x, y, w, h] = rect;
        let Some(input) = self.ensure(&document, container).cloned() else {
            return;
        };

        let style = input.style();
        let _ = style.set_property("display", "block");
        let _ = style.set_property("left", &format!("{x}px"));
        let _ = style.set_property("top", &format!("{y}px"));
        let _ = style.set_property("width", &format!("{w}px"));
        let _ = style.set_property("height", &format!("{h}px"));

        match &session.kind {
            EditorKind::TextInput => {
                input.set_type("text");
                let _ = input.remove_attribute("list");
                input.set_value(&session.value);
            }
            EditorKind::OptionList(options) => {
                input.set_type("text");
                let _ = input.set_attribute("list", &self.list_id);
                input.set_value(&session.value);
                if let Some(list) = self.datalist.as_ref() {
                    list.set_inner_html("");
                    for option in options {
                        if let Ok(el) = document.create_element("option") {
                            let _ = el.set_attribute("value", &option.label);
                            let _ = list.append_child(&el);
                        }
                    }
                }
            }
            EditorKind::Calendar => {
                input.set_type("date");
                let _ = input.remove_attribute("list");
                input.set_value(&date_to_iso(&session.value, date_format));
            }
        }

        let _ = input.focus();
        if !matches!(session.kind, EditorKind::Calendar) {
            // Caret at the end, so a typed seed is not replaced by the next key.
            let end = u32::try_from(session.value.encode_utf16().count()).unwrap_or(u32::MAX);
            let _ = input.set_selection_range(end, end);
        }
        self.kind = Some(session.kind.clone());
    }

    pub(crate) fn hide(&mut self) {
        if let Some(ref input) = self.input {
            let _ = input.style().set_property("display", "none");
            let _ = input.blur();
        }
        self.kind = None;
    }

    /// Current value in the grid's string encoding.
    pub(crate) fn value(&self, date_format: &str) -> Option<String> {
        let raw = self.input.as_ref()?.value();
        Some(match self.kind {
            Some(EditorKind::Calendar) => date_from_iso(&raw, date_format),
            _ => raw,
        })
    }

    /// Create the input element (once) inside `container`.
    pub(crate) fn ensure(
        &mut self,
        document: &Document,
        container: &HtmlElement,
    ) -> Option<&HtmlInputElement> {
        if self.input.is_none() {
            let input = document
                .create_element("input")
                .ok()?
                .dyn_into::<HtmlInputElement>()
                .ok()?;
            input.set_class_name("xlgrid-editor");
            let style = input.style();
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("z-index", "1000");
            let _ = style.set_property("box-sizing", "border-box");
            let _ = style.set_property("border", "2px solid #4285f4");
            let _ = style.set_property("outline", "none");
            let _ = style.set_property("padding", "0 4px");
            let _ = style.set_property("font-family", "inherit");
            let _ = style.set_property("font-size", "13px");
            let _ = style.set_property("background", "#fff");
            let _ = style.set_property("display", "none");
            let _ = container.append_child(&input);

            if let Ok(list) = document.create_element("datalist") {
                list.set_id(&self.list_id);
                let _ = container.append_child(&list);
                self.datalist = list.dyn_into::<HtmlElement>().ok();
            }
            self.input = Some(input);
        }
        self.input.as_ref()
    }
}

impl Drop for InputOverlay {
    fn drop(&mut self) {
        if let Some(ref input) = self.input {
            input.remove();
        }
        if let Some(ref list) = self.datalist {
            list.remove();
        }
    }
}
