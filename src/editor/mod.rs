//! Single-cell edit state machine.
//!
//! `Idle -> Editing(session) -> Idle`, left by commit or cancel. At most
//! one session exists per grid, and the focus registry makes the focused
//! grid the only one receiving edit keys, so only one cell on the page is
//! ever in edit state.

#[cfg(target_arch = "wasm32")]
pub(crate) mod input;
pub mod mutation;

use chrono::NaiveDate;

use crate::types::{ChoiceOption, ColumnKind};

pub use mutation::{Mutation, MutationRequest};

/// Which editor a column kind opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorKind {
    TextInput,
    /// Option list sourced from a choice column.
    OptionList(Vec<ChoiceOption>),
    /// Calendar popup for date columns.
    Calendar,
}

impl EditorKind {
    pub fn for_column(kind: &ColumnKind) -> Self {
        match kind {
            ColumnKind::Choice(options) => Self::OptionList(options.clone()),
            ColumnKind::Date => Self::Calendar,
            ColumnKind::Text | ColumnKind::Integer | ColumnKind::Float => Self::TextInput,
        }
    }
}

/// The cell being edited and the value typed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    /// Index into the rendered rows.
    pub row: usize,
    pub col: usize,
    pub value: String,
    pub kind: EditorKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(EditSession),
}

#[derive(Debug, Clone, Default)]
pub struct EditController {
    state: EditState,
}

impl EditController {
    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn session(&self) -> Option<&EditSession> {
        match &self.state {
            EditState::Editing(session) => Some(session),
            EditState::Idle => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    /// Enter editing. Refused while another session is open.
    pub fn start(&mut self, session: EditSession) -> bool {
        if self.is_editing() {
            return false;
        }
        tracing::debug!(row = session.row, col = session.col, "edit started");
        self.state = EditState::Editing(session);
        true
    }

    /// Replace the editable value. Ignored when idle.
    pub fn set_value(&mut self, value: &str) {
        if let EditState::Editing(session) = &mut self.state {
            session.value = value.to_string();
        }
    }

    /// Leave editing, handing back the session for the commit.
    pub fn finish(&mut self) -> Option<EditSession> {
        match std::mem::take(&mut self.state) {
            EditState::Editing(session) => Some(session),
            EditState::Idle => None,
        }
    }

    /// Keep the session on its row after a row was inserted into the
    /// rendered rows at `pos`.
    pub fn shift_rows_from(&mut self, pos: usize) {
        if let EditState::Editing(session) = &mut self.state {
            if session.row >= pos {
                session.row += 1;
            }
        }
    }

    /// Leave editing, discarding the value.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.finish().is_some();
        if cancelled {
            tracing::debug!("edit cancelled");
        }
        cancelled
    }
}

const ISO_DATE: &str = "%Y-%m-%d";

/// A date cell's text in the ISO form a calendar widget expects
/// (empty when it does not parse).
pub fn date_to_iso(text: &str, date_format: &str) -> String {
    NaiveDate::parse_from_str(text.trim(), date_format)
        .map(|d| d.format(ISO_DATE).to_string())
        .unwrap_or_default()
}

/// A calendar widget's ISO value in the grid's date format.
pub fn date_from_iso(value: &str, date_format: &str) -> String {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE)
        .map(|d| d.format(date_format).to_string())
        .unwrap_or_default()
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

    fn session(row: usize) -> EditSession {
        EditSession {
            row,
            col: 0,
            value: "x".into(),
            kind: EditorKind::TextInput,
        }
    }

    #[test]
    fn test_one_session_at_a_time() {
        let mut ed = EditController::default();
        assert!(ed.start(session(0)));
        assert!(!ed.start(session(1)));
        assert_eq!(ed.session().unwrap().row, 0);

        ed.set_value("typed");
        let done = ed.finish().unwrap();
        assert_eq!(done.value, "typed");
        assert!(!ed.is_editing());
        assert!(ed.finish().is_none());
    }

    #[test]
    fn test_shift_follows_inserted_rows() {
        let mut ed = EditController::default();
        ed.shift_rows_from(0);
        assert!(!ed.is_editing());

        ed.start(session(2));
        ed.shift_rows_from(3);
        assert_eq!(ed.session().unwrap().row, 2);
        ed.shift_rows_from(2);
        assert_eq!(ed.session().unwrap().row, 3);
    }

    #[test]
    fn test_cancel() {
        let mut ed = EditController::default();
        assert!(!ed.cancel());
        ed.start(session(2));
        assert!(ed.cancel());
        assert_eq!(ed.state(), &EditState::Idle);
    }

    #[test]
    fn test_editor_kind_per_column() {
        assert_eq!(EditorKind::for_column(&ColumnKind::Date), EditorKind::Calendar);
        assert_eq!(
            EditorKind::for_column(&ColumnKind::Float),
            EditorKind::TextInput
        );
        let opts = vec![ChoiceOption::new("A", "1")];
        assert_eq!(
            EditorKind::for_column(&ColumnKind::Choice(opts.clone())),
            EditorKind::OptionList(opts)
        );
    }

    #[test]
    fn test_calendar_date_conversion() {
        assert_eq!(date_to_iso("03-15-2024", "%m-%d-%Y"), "2024-03-15");
        assert_eq!(date_from_iso("2024-03-15", "%m-%d-%Y"), "03-15-2024");
        assert_eq!(date_to_iso("", "%m-%d-%Y"), "");
        assert_eq!(date_from_iso("", "%m-%d-%Y"), "");
    }
}
