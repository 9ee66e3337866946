//! Per-column filter state.

use std::collections::HashSet;

/// Filter state of one filterable column.
///
/// `selected_values` keeps the values as the user picked them; matching is
/// done through `lookup`, which holds their lowercase forms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    /// Distinct values reachable under the other columns' active filters,
    /// as computed the last time the filter panel was opened.
    pub possible_values: Vec<String>,
    pub selected_values: Vec<String>,
    lookup: HashSet<String>,
    /// Whether this column currently narrows the dataset.
    pub is_filtered: bool,
    /// Selection as it was when the panel was opened.
    pub previous_selected: Vec<String>,
}

impl Filter {
    /// Replace the selection and rebuild the lookup set.
    pub fn set_selected(&mut self, values: Vec<String>) {
        self.lookup = values.iter().map(|v| v.to_lowercase()).collect();
        self.selected_values = values;
    }

    /// Case-insensitive membership test of a cell's string encoding.
    pub fn accepts(&self, text: &str) -> bool {
        self.lookup.contains(&text.to_lowercase())
    }

    /// Recompute `is_filtered`: active iff fewer possible values are
    /// selected than exist.
    pub fn refresh_active(&mut self) {
        let selected = self
            .possible_values
            .iter()
            .filter(|v| self.accepts(v))
            .count();
        self.is_filtered = selected < self.possible_values.len();
    }

    /// Select every possible value and deactivate.
    pub fn reset(&mut self) {
        self.set_selected(self.possible_values.clone());
        self.is_filtered = false;
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

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut f = Filter::default();
        f.set_selected(strings(&["Eng"]));
        assert!(f.accepts("eng"));
        assert!(f.accepts("ENG"));
        assert!(!f.accepts("Sales"));
    }

    #[test]
    fn test_active_only_when_narrowing() {
        let mut f = Filter {
            possible_values: strings(&["Eng", "Sales"]),
            ..Filter::default()
        };
        f.set_selected(strings(&["eng", "sales"]));
        f.refresh_active();
        assert!(!f.is_filtered);

        f.set_selected(strings(&["eng"]));
        f.refresh_active();
        assert!(f.is_filtered);

        f.reset();
        assert!(!f.is_filtered);
        assert_eq!(f.selected_values, strings(&["Eng", "Sales"]));
    }

    #[test]
    fn test_empty_possible_values_never_active() {
        let mut f = Filter::default();
        f.refresh_active();
        assert!(!f.is_filtered);
    }
}
