//! Which grid owns keyboard and clipboard input.
//!
//! Page-wide copy, paste and outside-click listeners consult this registry
//! instead of walking the event path. The page is single-threaded, so the
//! registry is thread-local.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one grid instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(u64);

impl GridId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for GridId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

thread_local! {
    static FOCUSED: Cell<Option<GridId>> = const { Cell::new(None) };
}

/// Make `id` the focused grid (focus-in).
pub fn set_focused(id: GridId) {
    FOCUSED.with(|f| f.set(Some(id)));
}

/// Clear focus if `id` holds it (focus-out). Another grid's focus is left
/// alone.
pub fn clear_focus(id: GridId) {
    FOCUSED.with(|f| {
        if f.get() == Some(id) {
            f.set(None);
        }
    });
}

pub fn focused() -> Option<GridId> {
    FOCUSED.with(Cell::get)
}

pub fn is_focused(id: GridId) -> bool {
    focused() == Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_moves_between_grids() {
        let a = GridId::next();
        let b = GridId::next();
        assert_ne!(a, b);

        set_focused(a);
        assert!(is_focused(a));
        set_focused(b);
        clear_focus(a);
        assert_eq!(focused(), Some(b));
        clear_focus(b);
        assert_eq!(focused(), None);
    }
}
