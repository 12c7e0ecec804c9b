use crate::nav::ScrollSurface;

/// Fraction of the remaining distance covered per frame at 60 fps.
const EASE_PER_FRAME: f32 = 0.15;
const REFERENCE_FPS: f32 = 60.0;
/// Distance (px) under which an animation is considered settled.
const SETTLE_EPSILON: f32 = 0.5;
/// Idle time after manual scrolling before snapping to a slide boundary.
const SNAP_DELAY: f32 = 0.12;

/// A vertically stacked column of full-viewport slides with mandatory snapping.
///
/// Slide `i` occupies `[i * h, (i + 1) * h)` of the content, where `h` is the
/// viewport height.
#[derive(Debug, Clone)]
pub struct SnapScroller {
    offset: f32,
    target: Option<f32>,
    viewport_height: f32,
    slide_count: usize,
    /// Seconds since the last manual scroll input.
    idle: f32,
}

impl SnapScroller {
    pub fn new(slide_count: usize, viewport_height: f32) -> Self {
        Self {
            offset: 0.0,
            target: None,
            viewport_height: viewport_height.max(1.0),
            slide_count,
            idle: SNAP_DELAY,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn max_offset(&self) -> f32 {
        self.slide_count.saturating_sub(1) as f32 * self.viewport_height
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// True when no animation is running and the offset sits on a slide boundary.
    pub fn is_settled(&self) -> bool {
        self.target.is_none() && (self.nearest_boundary() - self.offset).abs() < f32::EPSILON
    }

    /// Offset of the slide boundary closest to the current offset.
    pub fn nearest_boundary(&self) -> f32 {
        let last = self.slide_count.saturating_sub(1) as f32;
        (self.offset / self.viewport_height).round().clamp(0.0, last) * self.viewport_height
    }

    /// Rescale the offset so the same slide position stays in view.
    pub fn set_viewport_height(&mut self, height: f32) -> bool {
        if height <= 0.0 || (height - self.viewport_height).abs() < f32::EPSILON {
            return false;
        }
        let ratio = height / self.viewport_height;
        tracing::trace!(from = self.viewport_height, to = height, "viewport resized");
        self.viewport_height = height;
        self.offset *= ratio;
        if let Some(target) = self.target.as_mut() {
            *target *= ratio;
        }
        true
    }

    pub fn set_slide_count(&mut self, slide_count: usize) {
        self.slide_count = slide_count;
        let max = self.max_offset();
        self.offset = self.offset.clamp(0.0, max);
        if let Some(target) = self.target.as_mut() {
            *target = target.clamp(0.0, max);
        }
    }

    /// Manual (wheel, touch) scrolling. Cancels any programmatic animation.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        self.target = None;
        self.idle = 0.0;
        let next = (self.offset + delta).clamp(0.0, self.max_offset());
        let moved = next != self.offset;
        self.offset = next;
        moved
    }

    /// Move instantly, without animation.
    pub fn jump_to(&mut self, offset: f32) {
        self.target = None;
        self.idle = SNAP_DELAY;
        self.offset = offset.clamp(0.0, self.max_offset());
    }

    /// Advance animation and snapping by `dt` seconds. Returns whether the offset moved.
    pub fn step(&mut self, dt: f32) -> bool {
        let before = self.offset;

        if self.target.is_none() {
            self.idle += dt;
            if self.idle >= SNAP_DELAY {
                let snap = self.nearest_boundary();
                if (snap - self.offset).abs() >= SETTLE_EPSILON {
                    self.target = Some(snap);
                } else {
                    self.offset = snap;
                }
            }
        }

        if let Some(target) = self.target {
            let diff = target - self.offset;
            if diff.abs() < SETTLE_EPSILON {
                self.offset = target;
                self.target = None;
            } else {
                let factor = 1.0 - (1.0 - EASE_PER_FRAME).powf(dt * REFERENCE_FPS);
                self.offset += diff * factor;
            }
        }

        self.offset != before
    }
}

impl ScrollSurface for SnapScroller {
    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn smooth_scroll_to(&mut self, offset: f32) {
        self.idle = SNAP_DELAY;
        self.target = Some(offset.clamp(0.0, self.max_offset()));
    }
}
