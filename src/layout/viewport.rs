//! Viewport state for the virtualized row window.

use std::ops::Range;

use crate::config::GridConfig;

/// Scroll state of the grid body (the rows area under the header).
///
/// Rows have a fixed height `H`. With scroll offset `S` the first visible
/// row is `floor(S / H)` and the window holds `ceil(height / H) + overscan`
/// rows from there. `level` is the first row of the last rendered window;
/// a scroll only asks for a re-render when it changes.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Vertical scroll offset in pixels.
    pub scroll_top: f64,
    /// Horizontal scroll offset in pixels.
    pub scroll_left: f64,
    /// Body width in pixels.
    pub width: f64,
    /// Body height in pixels.
    pub height: f64,
    row_height: f64,
    overscan: usize,
    level: usize,
}

impl Viewport {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            scroll_top: 0.0,
            scroll_left: 0.0,
            width: config.viewport_width,
            height: config.viewport_height,
            row_height: config.row_height,
            overscan: config.overscan,
            level: 0,
        }
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// First row of the last rendered window.
    pub fn level(&self) -> usize {
        self.level
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn first_visible_row(&self) -> usize {
        (self.scroll_top.max(0.0) / self.row_height).floor() as usize
    }

    /// Rows per window: enough to fill the body plus the overscan.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn window_len(&self) -> usize {
        let fill = (self.height.max(0.0) / self.row_height).ceil() as usize;
        fill.saturating_add(self.overscan)
    }

    /// Rendered-row range of the current window, cut at `row_count`.
    pub fn window(&self, row_count: usize) -> Range<usize> {
        let start = self.level.min(row_count);
        let end = start.saturating_add(self.window_len()).min(row_count);
        start..end
    }

    pub fn content_height(&self, row_count: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let rows = row_count as f64;
        rows * self.row_height
    }

    pub fn row_top(&self, row: usize) -> f64 {
        self.content_height(row)
    }

    fn max_scroll_top(&self, row_count: usize) -> f64 {
        (self.content_height(row_count) - self.height).max(0.0)
    }

    /// Scroll to `top` (clamped). Returns true if the window moved to a new
    /// level, in which case the caller re-renders once.
    pub fn scroll_to(&mut self, top: f64, row_count: usize) -> bool {
        self.scroll_top = top.clamp(0.0, self.max_scroll_top(row_count));
        self.sync_level()
    }

    /// Re-clamp after the rendered row count changed. The level is kept
    /// unless it fell out of range.
    pub fn clamp(&mut self, row_count: usize) -> bool {
        let max = self.max_scroll_top(row_count);
        if self.scroll_top > max {
            self.scroll_top = max;
        }
        self.sync_level()
    }

    /// Scroll the least amount that brings `row` fully into view.
    pub fn ensure_row_visible(&mut self, row: usize, row_count: usize) -> bool {
        let top = self.row_top(row);
        let bottom = top + self.row_height;
        if top < self.scroll_top {
            self.scroll_to(top, row_count)
        } else if bottom > self.scroll_top + self.height {
            self.scroll_to(bottom - self.height, row_count)
        } else {
            false
        }
    }

    /// Horizontal counterpart of [`Viewport::ensure_row_visible`] for the
    /// span `[left, right)` in content pixels.
    pub fn ensure_x_visible(&mut self, left: f64, right: f64) {
        if left < self.scroll_left {
            self.scroll_left = left;
        } else if right > self.scroll_left + self.width {
            self.scroll_left = (right - self.width).min(left);
        }
    }

    /// Rendered row under a y offset measured from the top of the body.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn row_at_y(&self, y: f64, row_count: usize) -> Option<usize> {
        let content_y = y + self.scroll_top;
        if content_y < 0.0 {
            return None;
        }
        let row = (content_y / self.row_height).floor() as usize;
        (row < row_count).then_some(row)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn sync_level(&mut self) -> bool {
        let level = self.first_visible_row();
        if level == self.level {
            return false;
        }
        tracing::trace!(from = self.level, to = level, "viewport level changed");
        self.level = level;
        true
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

    fn viewport(height: f64) -> Viewport {
        Viewport::new(&GridConfig::with_viewport(600.0, height))
    }

    #[test]
    fn test_window_at_top() {
        let vp = viewport(200.0);
        assert_eq!(vp.window_len(), 16);
        assert_eq!(vp.window(1000), 0..16);
        assert_eq!(vp.window(5), 0..5);
    }

    #[test]
    fn test_scroll_changes_level_once() {
        let mut vp = viewport(200.0);
        assert!(vp.scroll_to(100.0, 1000));
        assert_eq!(vp.level(), 4);
        assert_eq!(vp.window(1000), 4..20);
        assert!(!vp.scroll_to(110.0, 1000), "still row 4");
        assert!(vp.scroll_to(120.0, 1000));
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut vp = viewport(200.0);
        vp.scroll_to(2400.0, 1000);
        assert_eq!(vp.level(), 100);
        assert!(vp.clamp(20));
        // 20 rows * 24 - 200 = 280 -> row 11
        assert_eq!(vp.scroll_top, 280.0);
        assert_eq!(vp.level(), 11);
        assert_eq!(vp.window(20), 11..20);
    }

    #[test]
    fn test_ensure_visible_scrolls_minimally() {
        let mut vp = viewport(200.0);
        assert!(!vp.ensure_row_visible(3, 100));
        vp.ensure_row_visible(10, 100);
        // row 10 bottom = 264, so scroll_top = 64
        assert_eq!(vp.scroll_top, 64.0);
        vp.ensure_row_visible(1, 100);
        assert_eq!(vp.scroll_top, 24.0);
    }

    #[test]
    fn test_row_hit_testing() {
        let mut vp = viewport(200.0);
        vp.scroll_to(48.0, 100);
        assert_eq!(vp.row_at_y(0.0, 100), Some(2));
        assert_eq!(vp.row_at_y(30.0, 100), Some(3));
        assert_eq!(vp.row_at_y(30.0, 3), None);
    }
}
