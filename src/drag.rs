//! Row reorder state machine: `Idle -> Dragging(source) -> Idle`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { source: usize },
}

/// A completed move: the row at `from` now sits at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMove {
    pub from: usize,
    pub to: usize,
}

/// Final index of a row dropped after row `target` (`-1` = before the
/// first row), once the row has been removed from `source`.
pub fn insert_index(source: usize, target: isize) -> usize {
    let Ok(target) = usize::try_from(target) else {
        return 0;
    };
    if source <= target {
        target
    } else {
        target.saturating_add(1)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RowDrag {
    state: DragState,
}

impl RowDrag {
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Start dragging `source`. Refused while another drag is running or
    /// when `allowed` is false.
    pub fn begin(&mut self, source: usize, allowed: bool) -> bool {
        if !allowed || self.state != DragState::Idle {
            return false;
        }
        self.state = DragState::Dragging { source };
        true
    }

    /// Finish the drag on `target`. Always returns to idle; yields a move
    /// only if the row actually changes position.
    pub fn drop_on(&mut self, target: isize, row_count: usize) -> Option<RowMove> {
        let DragState::Dragging { source } = std::mem::take(&mut self.state) else {
            return None;
        };
        if source >= row_count {
            return None;
        }
        let to = insert_index(source, target).min(row_count.saturating_sub(1));
        (to != source).then_some(RowMove { from: source, to })
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 2, 2; "down past two rows")]
    #[test_case(3, 0, 1; "up after first row")]
    #[test_case(3, -1, 0; "before first row")]
    #[test_case(2, 2, 2; "onto itself")]
    fn test_insert_index(source: usize, target: isize, expected: usize) {
        assert_eq!(insert_index(source, target), expected);
    }

    #[test]
    fn test_drag_cycle() {
        let mut d = RowDrag::default();
        assert!(!d.begin(1, false));
        assert!(d.begin(1, true));
        assert!(!d.begin(2, true));
        assert_eq!(d.drop_on(3, 5), Some(RowMove { from: 1, to: 3 }));
        assert_eq!(d.state(), DragState::Idle);
        assert_eq!(d.drop_on(3, 5), None);
    }

    #[test]
    fn test_drop_in_place_is_no_move() {
        let mut d = RowDrag::default();
        d.begin(2, true);
        assert_eq!(d.drop_on(1, 5), None);
        assert_eq!(d.state(), DragState::Idle);
    }
}
