//! Keeping the two views scrolled to the same line
//!
//! When the caret changes line in the focused view, the other view is
//! scrolled so the caret line sits at the same height in both. The source
//! view's line position is only accurate after it has painted, so a
//! reconciliation that cannot run yet becomes a [`ReconcileTask`] queued on
//! the event loop and retried a bounded number of times.

use std::collections::VecDeque;

use super::document::Projection;

/// Attempts after the first before a reconciliation gives up
pub const MAX_RETRIES: u32 = 2;

/// Pixel geometry of one view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewGeometry {
    pub line_height: i32,
    pub client_height: i32,
    pub top_pixel: i32,
    pub line_count: usize,
}

impl ViewGeometry {
    /// Pixel of `line` relative to the top of the client area
    pub fn line_pixel(&self, line: usize) -> i32 {
        line as i32 * self.line_height - self.top_pixel
    }

    /// Whether `line` is fully inside the client area
    pub fn shows_line(&self, line: usize) -> bool {
        let pixel = self.line_pixel(line);
        pixel >= 0 && pixel + self.line_height <= self.client_height
    }
}

/// New scroll positions for both views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollAdjustment {
    pub source_top_pixel: i32,
    pub other_top_pixel: i32,
}

/// Scroll `other` so `caret_line` appears at the height it has in `source`.
///
/// When that would scroll `other` before its first line, leave the caret
/// line partly below its client area, or scroll past its last line, the
/// source view is scrolled by the same amount instead.
pub fn adjust_other(
    source: &ViewGeometry,
    other: &ViewGeometry,
    caret_line: usize,
) -> ScrollAdjustment {
    let source_line_pixel = source.line_pixel(caret_line);
    let mut other_top = caret_line as i32 * other.line_height - source_line_pixel;
    let mut source_top = source.top_pixel;

    let other_line_below = other.client_height - (source_line_pixel + other.line_height);
    let other_lines_below = other.line_count as i32 - caret_line as i32;
    let other_bottom_gap =
        other.client_height - (source_line_pixel + other_lines_below * other.line_height);

    if other_top < 0 {
        source_top -= other_top;
        other_top = 0;
    } else if other_line_below < 0 {
        source_top -= other_line_below;
        other_top -= other_line_below;
    } else if other_bottom_gap > 0 {
        source_top -= other_bottom_gap;
        other_top -= other_bottom_gap;
    }

    ScrollAdjustment {
        source_top_pixel: source_top,
        other_top_pixel: other_top,
    }
}

/// A deferred reconciliation waiting for the source view to paint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileTask {
    pub source: Projection,
    attempts: u32,
}

/// What running a [`ReconcileTask`] decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStep {
    /// The source view has painted, reconcile now
    Ready(Projection),
    /// Not painted yet, run this again on the next turn of the event loop
    Retry(ReconcileTask),
    /// Retries exhausted
    GaveUp(Projection),
}

impl ReconcileTask {
    pub fn new(source: Projection) -> Self {
        Self {
            source,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Check the completion condition once
    pub fn run(self, painted: bool) -> TaskStep {
        if painted {
            return TaskStep::Ready(self.source);
        }
        let attempts = self.attempts + 1;
        tracing::debug!(source = %self.source, attempt = attempts, "view not painted yet");
        if attempts >= MAX_RETRIES {
            tracing::error!(source = %self.source, "adjusting other view failed");
            return TaskStep::GaveUp(self.source);
        }
        TaskStep::Retry(Self { attempts, ..self })
    }
}

/// Outcome of asking for a reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncRequest {
    /// The caret line is on screen, reconcile right away
    Immediate,
    /// Queued until the source view paints
    Deferred,
    /// A reconciliation is already waiting
    AlreadyPending,
}

/// Event-loop side of scroll reconciliation: a queue of deferred tasks
#[derive(Debug, Clone, Default)]
pub struct ScrollSync {
    queue: VecDeque<ReconcileTask>,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for the other view to follow `source` whose caret is on
    /// `caret_line`
    pub fn request(
        &mut self,
        source: Projection,
        geometry: &ViewGeometry,
        caret_line: usize,
    ) -> SyncRequest {
        if geometry.shows_line(caret_line) {
            return SyncRequest::Immediate;
        }
        if !self.queue.is_empty() {
            tracing::warn!("already waiting to adjust other view");
            return SyncRequest::AlreadyPending;
        }
        self.queue.push_back(ReconcileTask::new(source));
        SyncRequest::Deferred
    }

    pub fn is_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Run the tasks queued before this turn of the event loop. `painted`
    /// reports whether a view has painted since the request. Returns the
    /// source views ready to reconcile.
    pub fn run_pending(&mut self, painted: impl Fn(Projection) -> bool) -> Vec<Projection> {
        let mut ready = Vec::new();
        for task in std::mem::take(&mut self.queue) {
            match task.run(painted(task.source)) {
                TaskStep::Ready(source) => ready.push(source),
                TaskStep::Retry(task) => self.queue.push_back(task),
                TaskStep::GaveUp(_) => {}
            }
        }
        ready
    }
}
