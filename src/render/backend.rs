//! Render backend trait.
//!
//! The grid engine produces a [`RenderFrame`]; a backend turns it into
//! pixels or DOM. Keeping the two apart lets the engine run headless.

use std::cell::RefCell;
use std::rc::Rc;

use super::frame::RenderFrame;
use crate::error::Result;

pub trait RenderBackend {
    /// Paint a complete frame, replacing whatever the previous one drew.
    fn paint(&mut self, frame: &RenderFrame) -> Result<()>;

    /// Move the scroll surface to `scroll_top` without repainting.
    fn set_scroll_top(&mut self, _scroll_top: f64) {}
}

#[derive(Debug, Default)]
struct Recording {
    frames: Vec<RenderFrame>,
    scroll_top: f64,
}

/// Headless backend that remembers what it was asked to paint.
///
/// Clones share one recording, so a test can keep a handle after giving
/// the backend to a grid.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    log: Rc<RefCell<Recording>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paint_count(&self) -> usize {
        self.log.borrow().frames.len()
    }

    pub fn last_frame(&self) -> Option<RenderFrame> {
        self.log.borrow().frames.last().cloned()
    }

    pub fn scroll_top(&self) -> f64 {
        self.log.borrow().scroll_top
    }
}

impl RenderBackend for RecordingBackend {
    fn paint(&mut self, frame: &RenderFrame) -> Result<()> {
        self.log.borrow_mut().frames.push(frame.clone());
        Ok(())
    }

    fn set_scroll_top(&mut self, scroll_top: f64) {
        self.log.borrow_mut().scroll_top = scroll_top;
    }
}
