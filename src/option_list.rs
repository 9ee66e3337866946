//! The list widget used to present filter options.
//!
//! The grid only needs three things from it: create a node for some
//! content, render the list, and be told about every node it instantiated
//! so per-node toggles can be wired back into the filter panel.

/// Distinguished rows at the top of the option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlNode {
    SelectAll,
    IncludeCurrent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Control(ControlNode),
    Item,
}

/// Data attached to each node, handed back on render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTag {
    pub kind: NodeKind,
    pub checked: bool,
    /// Filter value for item nodes, empty for controls.
    pub value: String,
}

/// Hook invoked once per instantiated node after a render.
pub type AfterRenderNode = Box<dyn FnMut(usize, &NodeTag)>;

pub trait OptionList {
    /// Add a node and return its handle (its position in the list).
    fn create_node(&mut self, content: &str, tag: NodeTag) -> usize;

    /// Instantiate the nodes and run the after-render hook on each.
    fn render(&mut self);

    /// Drop every node.
    fn clear(&mut self);
}

/// Headless list used by tests and non-browser hosts.
#[derive(Default)]
pub struct MemoryOptionList {
    nodes: Vec<(String, NodeTag)>,
    after_render_node: Option<AfterRenderNode>,
    renders: usize,
}

impl MemoryOptionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_after_render_node(&mut self, hook: AfterRenderNode) {
        self.after_render_node = Some(hook);
    }

    pub fn nodes(&self) -> &[(String, NodeTag)] {
        &self.nodes
    }

    /// Number of completed renders.
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl OptionList for MemoryOptionList {
    fn create_node(&mut self, content: &str, tag: NodeTag) -> usize {
        self.nodes.push((content.to_string(), tag));
        self.nodes.len() - 1
    }

    fn render(&mut self) {
        if let Some(hook) = self.after_render_node.as_mut() {
            for (handle, (_, tag)) in self.nodes.iter().enumerate() {
                hook(handle, tag);
            }
        }
        self.renders += 1;
    }

    fn clear(&mut self) {
        self.nodes.clear();
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
    use crate::filter::FilterPanel;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_panel_populates_controls_then_items() {
        let possible = vec!["Eng".to_string(), "Sales".to_string()];
        let mut panel = FilterPanel::open(2, &possible, vec![], |_| true, false);
        panel.set_search("s");

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut list = MemoryOptionList::new();
        list.set_after_render_node(Box::new(move |handle: usize, tag: &NodeTag| {
            sink.borrow_mut().push((handle, tag.kind));
        }));
        panel.populate(&mut list);

        assert_eq!(list.render_count(), 1);
        assert_eq!(
            *seen.borrow(),
            [
                (0, NodeKind::Control(ControlNode::SelectAll)),
                (1, NodeKind::Control(ControlNode::IncludeCurrent)),
                (2, NodeKind::Item),
            ]
        );
        assert_eq!(list.nodes()[2].0, "sales");

        let tag = list.nodes()[2].1.clone();
        panel.toggle_node(&tag);
        assert!(!panel.select_all_checked());
    }
}
