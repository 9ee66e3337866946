//! Shared grid fixtures for the integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use xlgrid::{ChoiceOption, Column, ColumnKind, Grid, GridConfig, Scope};

/// Name / Age / Dept / Joined columns.
pub fn staff_columns() -> Vec<Column> {
    vec![
        Column::new("Name", ColumnKind::Text, 120.0),
        Column::new("Age", ColumnKind::Integer, 60.0)
            .filterable(true)
            .with_summary(true),
        Column::new(
            "Dept",
            ColumnKind::Choice(vec![
                ChoiceOption::new("Eng", "e"),
                ChoiceOption::new("Sales", "s"),
                ChoiceOption::new("Ops", "o"),
            ]),
            80.0,
        )
        .filterable(true),
        Column::new("Joined", ColumnKind::Date, 100.0),
    ]
}

/// Empty staff grid with a 600x200 viewport.
pub fn empty_staff(config: GridConfig) -> Grid {
    let mut grid = Grid::new(config).expect("valid config");
    for column in staff_columns() {
        grid.add_column(column).expect("column before rows");
    }
    grid
}

/// Five staff rows:
///
/// | Name | Age | Dept  | Joined     |
/// |------|-----|-------|------------|
/// | Ann  | 30  | Eng   | 01-15-2020 |
/// | Bob  | 25  | Sales | 03-01-2021 |
/// | Cid  | 40  | Eng   | 07-04-2019 |
/// | Dee  | 25  | Ops   | 11-30-2022 |
/// | Eve  | 35  | Sales | 02-28-2018 |
pub fn staff() -> Grid {
    staff_with(GridConfig::with_viewport(600.0, 200.0))
}

pub fn staff_with(config: GridConfig) -> Grid {
    let mut grid = empty_staff(config);
    for row in [
        ["Ann", "30", "Eng", "01-15-2020"],
        ["Bob", "25", "Sales", "03-01-2021"],
        ["Cid", "40", "Eng", "07-04-2019"],
        ["Dee", "25", "Ops", "11-30-2022"],
        ["Eve", "35", "Sales", "02-28-2018"],
    ] {
        assert!(grid.add_row(&row), "fixture row rejected: {row:?}");
    }
    grid
}

/// A grid of `rows` text rows named `r0`, `r1`, ...
pub fn numbered(rows: usize) -> Grid {
    let mut grid = Grid::new(GridConfig::with_viewport(600.0, 200.0)).unwrap();
    grid.add_column(Column::new("Id", ColumnKind::Text, 80.0))
        .unwrap();
    for i in 0..rows {
        assert!(grid.add_row(&[format!("r{i}")]));
    }
    grid
}

/// Column 0 of every rendered row.
pub fn rendered_names(grid: &Grid) -> Vec<String> {
    (0..grid.row_count(Scope::Rendered))
        .filter_map(|r| grid.text_at(Scope::Rendered, r, 0).map(str::to_string))
        .collect()
}

/// Column 0 of every row in insertion order.
pub fn all_names(grid: &Grid) -> Vec<String> {
    (0..grid.row_count(Scope::All))
        .filter_map(|r| grid.text_at(Scope::All, r, 0).map(str::to_string))
        .collect()
}

/// Shared log a callback can push into.
pub fn recorder<T>() -> Rc<RefCell<Vec<T>>> {
    Rc::new(RefCell::new(Vec::new()))
}
