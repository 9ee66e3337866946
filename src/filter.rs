//! Multi-column filter composition.
//!
//! A filterable column is *active* while its selection narrows its possible
//! values. A row is rendered iff every active column accepts it, and each
//! row's `filtered_by` set records exactly the active columns it passes.
//!
//! Possible values for a column are computed across the other active
//! columns only, so opening column C's panel shows every value reachable
//! if C's own filter were lifted.

use std::collections::{BTreeSet, HashSet};

use crate::dataset::Dataset;
use crate::option_list::{ControlNode, NodeKind, NodeTag, OptionList};
use crate::types::{Cell, Column};

/// Indices of filterable columns that currently narrow the dataset.
pub fn active_columns(columns: &[Column]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_filter_active())
        .map(|(i, _)| i)
        .collect()
}

/// Membership of a set of cells against the active filters.
///
/// Returns the active columns that accept the cells and whether all of
/// them do.
pub fn membership(columns: &[Column], cells: &[Cell]) -> (BTreeSet<usize>, bool) {
    let mut passed = BTreeSet::new();
    let mut visible = true;
    for (index, column) in columns.iter().enumerate() {
        let Some(filter) = column.filter.as_ref().filter(|f| f.is_filtered) else {
            continue;
        };
        let text = cells.get(index).map_or("", Cell::text);
        if filter.accepts(text) {
            passed.insert(index);
        } else {
            visible = false;
        }
    }
    (passed, visible)
}

/// Distinct values of `column` over rows that pass every *other* active
/// filter, sorted by the column's kind.
///
/// Values are deduplicated case-insensitively; the first spelling seen wins.
pub fn possible_values(
    columns: &[Column],
    dataset: &Dataset,
    column: usize,
    date_format: &str,
) -> Vec<String> {
    let Some(target) = columns.get(column) else {
        return Vec::new();
    };
    let others: Vec<usize> = active_columns(columns)
        .into_iter()
        .filter(|&c| c != column)
        .collect();

    let mut seen = HashSet::new();
    let mut values: Vec<String> = dataset
        .all_rows()
        .iter()
        .filter(|row| row.passes_all(&others))
        .map(|row| row.text(column))
        .filter(|text| seen.insert(text.to_lowercase()))
        .map(str::to_string)
        .collect();
    values.sort_by(|a, b| target.kind.compare(a, b, date_format));
    values
}

/// Recompute every row's membership and the rendered subsequence in one
/// pass over `all`. Returns the new rendered length.
pub fn rebuild_rendered(columns: &[Column], dataset: &mut Dataset) -> usize {
    let mut rendered = Vec::with_capacity(dataset.len(crate::dataset::Scope::All));
    for (index, row) in dataset.all_rows_mut().iter_mut().enumerate() {
        let (passed, visible) = membership(columns, &row.cells);
        row.filtered_by = passed;
        if visible {
            rendered.push(index);
        }
    }
    let len = rendered.len();
    dataset.set_rendered(rendered);
    len
}

/// Outcome of the filter panel's OK action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCommit {
    /// Replace the column's selection.
    Select { column: usize, values: Vec<String> },
    /// Reset every filter and deactivate all of them.
    ClearAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelItem {
    /// Value as stored in the cells.
    pub value: String,
    /// Lowercase form shown in the list and matched by search.
    pub label: String,
    pub checked: bool,
}

/// State of an open filter panel for one column.
///
/// Items are the column's possible values. A non-empty search narrows the
/// visible items, checks all of them, and offers the option of adding the
/// matches to the previous selection instead of replacing it.
#[derive(Debug, Clone)]
pub struct FilterPanel {
    column: usize,
    items: Vec<PanelItem>,
    search: String,
    select_all: bool,
    include_current: Option<bool>,
    previous: Vec<String>,
    clear_all_enabled: bool,
}

impl FilterPanel {
    /// Build the panel from a column's freshly computed filter state.
    pub fn open(
        column: usize,
        possible: &[String],
        previous: Vec<String>,
        accepts: impl Fn(&str) -> bool,
        any_filtered: bool,
    ) -> Self {
        let items = possible
            .iter()
            .map(|v| PanelItem {
                value: v.clone(),
                label: v.to_lowercase(),
                checked: accepts(v),
            })
            .collect();
        let mut panel = Self {
            column,
            items,
            search: String::new(),
            select_all: false,
            include_current: None,
            previous,
            clear_all_enabled: any_filtered,
        };
        panel.sync_select_all();
        panel
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn select_all_checked(&self) -> bool {
        self.select_all
    }

    /// `Some` only while a search is active.
    pub fn include_current(&self) -> Option<bool> {
        self.include_current
    }

    pub fn clear_all_enabled(&self) -> bool {
        self.clear_all_enabled
    }

    fn is_visible(&self, item: &PanelItem) -> bool {
        self.search.is_empty() || item.label.contains(&self.search)
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &PanelItem> {
        self.items.iter().filter(|i| self.is_visible(i))
    }

    /// Narrow the list by a case-insensitive contains match.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_lowercase();
        if self.search.is_empty() {
            self.include_current = None;
        } else {
            let search = self.search.clone();
            for item in &mut self.items {
                if item.label.contains(&search) {
                    item.checked = true;
                }
            }
            self.include_current = Some(self.include_current.unwrap_or(false));
        }
        self.sync_select_all();
    }

    pub fn toggle_select_all(&mut self) {
        let checked = !self.select_all;
        let search = self.search.clone();
        for item in &mut self.items {
            if search.is_empty() || item.label.contains(&search) {
                item.checked = checked;
            }
        }
        self.select_all = checked;
    }

    /// Toggle an item by its value. Unknown or hidden values are ignored.
    pub fn toggle_item(&mut self, value: &str) {
        let search = self.search.clone();
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.value == value && (search.is_empty() || i.label.contains(&search)))
        {
            item.checked = !item.checked;
        }
        self.sync_select_all();
    }

    pub fn toggle_include_current(&mut self) {
        if let Some(include) = self.include_current.as_mut() {
            *include = !*include;
        }
    }

    fn sync_select_all(&mut self) {
        let all_checked = {
            let mut visible = self.visible_items().peekable();
            visible.peek().is_some() && visible.all(|i| i.checked)
        };
        self.select_all = all_checked;
    }

    /// Values the OK action would select.
    pub fn checked_values(&self) -> Vec<String> {
        let mut values = if self.include_current == Some(true) {
            self.previous.clone()
        } else {
            Vec::new()
        };
        values.extend(
            self.visible_items()
                .filter(|i| i.checked)
                .map(|i| i.value.clone()),
        );
        values
    }

    pub fn commit(&self) -> FilterCommit {
        FilterCommit::Select {
            column: self.column,
            values: self.checked_values(),
        }
    }

    /// Present the panel through an external list widget: control nodes
    /// first, then one node per visible item.
    pub fn populate<L: OptionList>(&self, list: &mut L) {
        list.clear();
        list.create_node(
            "(Select all)",
            NodeTag {
                kind: NodeKind::Control(ControlNode::SelectAll),
                checked: self.select_all,
                value: String::new(),
            },
        );
        if let Some(include) = self.include_current {
            list.create_node(
                "Add current selection to filter",
                NodeTag {
                    kind: NodeKind::Control(ControlNode::IncludeCurrent),
                    checked: include,
                    value: String::new(),
                },
            );
        }
        for item in self.visible_items() {
            list.create_node(
                &item.label,
                NodeTag {
                    kind: NodeKind::Item,
                    checked: item.checked,
                    value: item.value.clone(),
                },
            );
        }
        list.render();
    }

    /// Apply a toggle coming back from a rendered node.
    pub fn toggle_node(&mut self, tag: &NodeTag) {
        match tag.kind {
            NodeKind::Control(ControlNode::SelectAll) => self.toggle_select_all(),
            NodeKind::Control(ControlNode::IncludeCurrent) => self.toggle_include_current(),
            NodeKind::Item => self.toggle_item(&tag.value),
        }
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

    fn panel(values: &[&str], selected: &[&str]) -> FilterPanel {
        let possible: Vec<String> = values.iter().map(|s| (*s).to_string()).collect();
        let previous: Vec<String> = selected.iter().map(|s| (*s).to_string()).collect();
        let lookup: Vec<String> = previous.iter().map(|s| s.to_lowercase()).collect();
        FilterPanel::open(
            0,
            &possible,
            previous,
            |v| lookup.contains(&v.to_lowercase()),
            false,
        )
    }

    #[test]
    fn test_items_checked_from_selection() {
        let p = panel(&["Eng", "Sales"], &["Eng"]);
        let checked: Vec<_> = p.visible_items().map(|i| i.checked).collect();
        assert_eq!(checked, [true, false]);
        assert!(!p.select_all_checked());
        assert_eq!(p.include_current(), None);
    }

    #[test]
    fn test_select_all_tracks_items() {
        let mut p = panel(&["a", "b"], &["a"]);
        p.toggle_item("b");
        assert!(p.select_all_checked());
        p.toggle_select_all();
        assert!(p.visible_items().all(|i| !i.checked));
        assert_eq!(
            p.commit(),
            FilterCommit::Select {
                column: 0,
                values: vec![]
            }
        );
    }

    #[test]
    fn test_select_all_unchecks_when_search_hides_everything() {
        let mut p = panel(&["a", "b"], &["a", "b"]);
        assert!(p.select_all_checked());
        p.set_search("zzz");
        assert_eq!(p.visible_items().count(), 0);
        p.toggle_item("a");
        assert!(!p.select_all_checked());
        p.set_search("");
        p.toggle_item("a");
        assert!(!p.select_all_checked());
    }

    #[test]
    fn test_search_checks_matches_and_offers_include() {
        let mut p = panel(&["Alpha", "Beta", "Gamma"], &["Beta"]);
        p.set_search("MA");
        let labels: Vec<_> = p.visible_items().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["gamma"]);
        assert!(p.select_all_checked());
        assert_eq!(p.include_current(), Some(false));
        assert_eq!(p.checked_values(), ["Gamma"]);

        p.toggle_include_current();
        assert_eq!(p.checked_values(), ["Beta", "Gamma"]);

        p.set_search("");
        assert_eq!(p.include_current(), None);
    }
}
