//! DOM filter panel: search box, option list and the OK / Cancel /
//! Clear all actions.
//!
//! The panel only mirrors [`FilterPanel`] state. Clicks are handled by one
//! delegated listener (wired in `mod.rs`) that reads `data-action` or
//! `data-handle` off the clicked element.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlDivElement, HtmlElement, HtmlInputElement};

use crate::error::{GridError, Result};
use crate::filter::FilterPanel;
use crate::option_list::{NodeTag, OptionList};

/// What a click inside the panel hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PanelClick {
    Ok,
    Cancel,
    ClearAll,
    Node(NodeTag),
}

fn create<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T> {
    let el = document
        .create_element(tag)
        .map_err(|e| GridError::Dom(format!("{e:?}")))?;
    el.set_class_name(class);
    el.dyn_into::<T>()
        .map_err(|_| GridError::Dom(format!("<{tag}> has an unexpected type")))
}

/// Option list widget backed by plain divs.
pub(crate) struct DomOptionList {
    document: Document,
    list: HtmlDivElement,
    pending: Vec<Element>,
    tags: Vec<NodeTag>,
}

impl DomOptionList {
    pub(crate) fn tag(&self, handle: usize) -> Option<&NodeTag> {
        self.tags.get(handle)
    }

    fn node(&self, content: &str, tag: &NodeTag, handle: usize) -> Option<Element> {
        let node = self.document.create_element("div").ok()?;
        node.set_class_name("xlgrid-option");
        let _ = node.set_attribute("data-handle", &handle.to_string());
        let _ = node.set_attribute("style", "cursor:pointer;padding:2px 4px;white-space:nowrap;");
        let check = self
            .document
            .create_element("input")
            .ok()?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        check.set_type("checkbox");
        check.set_checked(tag.checked);
        let _ = check.style().set_property("pointer-events", "none");
        let text = self.document.create_element("span").ok()?;
        text.set_text_content(Some(content));
        let _ = node.append_child(&check);
        let _ = node.append_child(&text);
        Some(node)
    }
}

impl OptionList for DomOptionList {
    fn create_node(&mut self, content: &str, tag: NodeTag) -> usize {
        let handle = self.tags.len();
        if let Some(node) = self.node(content, &tag, handle) {
            self.pending.push(node);
        }
        self.tags.push(tag);
        handle
    }

    fn render(&mut self) {
        for node in self.pending.drain(..) {
            let _ = self.list.append_child(&node);
        }
    }

    fn clear(&mut self) {
        self.list.set_inner_html("");
        self.pending.clear();
        self.tags.clear();
    }
}

pub(crate) struct PanelView {
    root: HtmlDivElement,
    search: HtmlInputElement,
    options: DomOptionList,
    clear_all: HtmlDivElement,
}

impl PanelView {
    pub(crate) fn new(document: &Document, container: &HtmlElement) -> Result<Self> {
        let root: HtmlDivElement = create(document, "div", "xlgrid-filter-panel")?;
        let _ = root.set_attribute(
            "style",
            "position:absolute;z-index:1100;display:none;width:200px;background:#fff;\
             border:1px solid #ccc;box-shadow:0 2px 6px rgba(0,0,0,0.2);padding:4px;",
        );

        let search: HtmlInputElement = create(document, "input", "xlgrid-filter-search")?;
        search.set_type("text");
        search.set_placeholder("Search");
        let _ = search.style().set_property("width", "100%");

        let list: HtmlDivElement = create(document, "div", "xlgrid-filter-options")?;
        let _ = list.set_attribute("style", "max-height:200px;overflow:auto;margin:4px 0;");

        let buttons: HtmlDivElement = create(document, "div", "xlgrid-filter-buttons")?;
        let _ = buttons.style().set_property("display", "flex");
        let mut clear_all = None;
        for (action, label) in [("ok", "OK"), ("cancel", "Cancel"), ("clear", "Clear all")] {
            let button: HtmlDivElement = create(document, "div", "xlgrid-filter-button")?;
            let _ = button.set_attribute("data-action", action);
            let _ = button.set_attribute(
                "style",
                "cursor:pointer;padding:2px 6px;margin-right:4px;border:1px solid #ccc;",
            );
            button.set_text_content(Some(label));
            let _ = buttons.append_child(&button);
            if action == "clear" {
                clear_all = Some(button);
            }
        }
        let clear_all =
            clear_all.ok_or_else(|| GridError::Dom("clear-all button missing".into()))?;

        let _ = root.append_child(&search);
        let _ = root.append_child(&list);
        let _ = root.append_child(&buttons);
        container
            .append_child(&root)
            .map_err(|e| GridError::Dom(format!("{e:?}")))?;

        Ok(Self {
            root,
            search,
            options: DomOptionList {
                document: document.clone(),
                list,
                pending: Vec::new(),
                tags: Vec::new(),
            },
            clear_all,
        })
    }

    pub(crate) fn root(&self) -> &HtmlDivElement {
        &self.root
    }

    pub(crate) fn search_input(&self) -> &HtmlInputElement {
        &self.search
    }

    pub(crate) fn search_value(&self) -> String {
        self.search.value()
    }

    pub(crate) fn is_open(&self) -> bool {
        self.root
            .style()
            .get_property_value("display")
            .is_ok_and(|d| d != "none")
    }

    /// Show the panel below a header cell at content position `(left, top)`.
    pub(crate) fn show(&mut self, panel: &FilterPanel, left: f64, top: f64) {
        let style = self.root.style();
        let _ = style.set_property("left", &format!("{left}px"));
        let _ = style.set_property("top", &format!("{top}px"));
        let _ = style.set_property("display", "block");
        self.search.set_value(panel.search());
        self.refresh(panel);
        let _ = self.search.focus();
    }

    /// Re-populate the list from the panel state.
    pub(crate) fn refresh(&mut self, panel: &FilterPanel) {
        panel.populate(&mut self.options);
        let _ = self.clear_all.style().set_property(
            "opacity",
            if panel.clear_all_enabled() { "1" } else { "0.4" },
        );
        let _ = self.clear_all.set_attribute(
            "aria-disabled",
            if panel.clear_all_enabled() { "false" } else { "true" },
        );
    }

    pub(crate) fn hide(&self) {
        let _ = self.root.style().set_property("display", "none");
    }

    /// Resolve a click target inside the panel.
    pub(crate) fn click_target(&self, target: &Element) -> Option<PanelClick> {
        if let Ok(Some(button)) = target.closest("[data-action]") {
            return match button.get_attribute("data-action")?.as_str() {
                "ok" => Some(PanelClick::Ok),
                "cancel" => Some(PanelClick::Cancel),
                "clear" if button.get_attribute("aria-disabled").as_deref() != Some("true") => {
                    Some(PanelClick::ClearAll)
                }
                _ => None,
            };
        }
        let node = target.closest("[data-handle]").ok()??;
        let handle = node.get_attribute("data-handle")?.parse::<usize>().ok()?;
        self.options.tag(handle).cloned().map(PanelClick::Node)
    }
}

impl Drop for PanelView {
    fn drop(&mut self) {
        self.root.remove();
    }
}
