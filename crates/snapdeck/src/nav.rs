/// The scrolling container the navigator drives.
///
/// The container's offset is the authoritative position; the navigator only
/// mirrors it.
pub trait ScrollSurface {
    fn viewport_height(&self) -> f32;
    fn scroll_offset(&self) -> f32;
    /// Start an animated scroll toward `offset`. Does not wait for it to settle.
    fn smooth_scroll_to(&mut self, offset: f32);
}

/// Tracks which slide is showing and issues scroll commands to reach others.
#[derive(Debug, Clone)]
pub struct SlideNavigator {
    current: usize,
    slide_count: usize,
}

impl SlideNavigator {
    pub fn new(slide_count: usize) -> Self {
        Self {
            current: 0,
            slide_count,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.slide_count
    }

    /// Fraction of the deck reached, `(current + 1) / count`.
    pub fn progress(&self) -> f32 {
        if self.slide_count == 0 {
            return 0.0;
        }
        (self.current + 1) as f32 / self.slide_count as f32
    }

    /// Scroll to slide `index`. Out-of-range targets are ignored.
    ///
    /// The index is updated right before the scroll command is issued so that
    /// repeated next/previous presses chain from the requested slide.
    pub fn go_to(&mut self, index: usize, surface: &mut impl ScrollSurface) -> bool {
        if index >= self.slide_count {
            tracing::debug!(index, count = self.slide_count, "ignoring out-of-range slide");
            return false;
        }
        tracing::debug!(from = self.current, to = index, "navigating");
        self.current = index;
        surface.smooth_scroll_to(index as f32 * surface.viewport_height());
        true
    }

    /// Move by `delta` slides. Targets before the first or past the last slide are ignored.
    pub fn go_relative(&mut self, delta: isize, surface: &mut impl ScrollSurface) -> bool {
        match self.current.checked_add_signed(delta) {
            Some(index) => self.go_to(index, surface),
            None => false,
        }
    }

    pub fn go_next(&mut self, surface: &mut impl ScrollSurface) -> bool {
        self.go_relative(1, surface)
    }

    pub fn go_previous(&mut self, surface: &mut impl ScrollSurface) -> bool {
        self.go_relative(-1, surface)
    }

    /// Scroll-sync handler: recompute the index from the container's offset.
    ///
    /// Must be given the viewport height at the time of the event. Both bounds
    /// are clamped, so overscroll past either end maps to the first or last slide.
    pub fn sync_to_scroll(&mut self, offset: f32, viewport_height: f32) -> bool {
        if self.slide_count == 0 || viewport_height <= 0.0 {
            return false;
        }
        let nearest = (offset / viewport_height).round();
        let index = if nearest.is_nan() || nearest <= 0.0 {
            0
        } else {
            (nearest as usize).min(self.slide_count - 1)
        };
        if index == self.current {
            return false;
        }
        tracing::trace!(from = self.current, to = index, offset, "scroll moved slide");
        self.current = index;
        true
    }

    /// Resize after a deck reload; the index is clamped into the new range.
    pub fn set_slide_count(&mut self, slide_count: usize) {
        self.slide_count = slide_count;
        self.current = self.current.min(slide_count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A container that records scroll commands and jumps on `settle`.
    struct FakeSurface {
        height: f32,
        offset: f32,
        requested: Vec<f32>,
    }

    impl FakeSurface {
        fn new(height: f32) -> Self {
            Self {
                height,
                offset: 0.0,
                requested: Vec::new(),
            }
        }

        fn settle(&mut self, nav: &mut SlideNavigator) {
            if let Some(&target) = self.requested.last() {
                self.offset = target;
                nav.sync_to_scroll(self.offset, self.height);
            }
        }
    }

    impl ScrollSurface for FakeSurface {
        fn viewport_height(&self) -> f32 {
            self.height
        }

        fn scroll_offset(&self) -> f32 {
            self.offset
        }

        fn smooth_scroll_to(&mut self, offset: f32) {
            self.requested.push(offset);
        }
    }

    #[test]
    fn go_to_every_valid_slide() {
        for i in 0..24 {
            let mut nav = SlideNavigator::new(24);
            let mut surface = FakeSurface::new(800.0);
            assert!(nav.go_to(i, &mut surface));
            surface.settle(&mut nav);
            assert_eq!(nav.current(), i);
            assert_eq!(surface.scroll_offset(), i as f32 * 800.0);
        }
    }

    #[test]
    fn go_to_out_of_range_is_ignored() {
        let mut nav = SlideNavigator::new(5);
        let mut surface = FakeSurface::new(600.0);
        nav.go_to(2, &mut surface);
        assert!(!nav.go_to(5, &mut surface));
        assert!(!nav.go_to(usize::MAX, &mut surface));
        assert_eq!(nav.current(), 2);
        assert_eq!(surface.requested.len(), 1);
    }

    #[test]
    fn negative_relative_target_is_ignored() {
        let mut nav = SlideNavigator::new(5);
        let mut surface = FakeSurface::new(600.0);
        nav.go_to(1, &mut surface);
        assert!(!nav.go_relative(-2, &mut surface));
        assert!(!nav.go_relative(isize::MIN, &mut surface));
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn next_and_previous_stop_at_boundaries() {
        let mut nav = SlideNavigator::new(3);
        let mut surface = FakeSurface::new(600.0);

        assert!(!nav.go_previous(&mut surface));
        assert_eq!(nav.current(), 0);
        assert!(surface.requested.is_empty());

        nav.go_next(&mut surface);
        nav.go_next(&mut surface);
        assert!(nav.is_last());
        assert!(!nav.go_next(&mut surface));
        assert_eq!(nav.current(), 2);
        assert_eq!(surface.requested, vec![600.0, 1200.0]);
    }

    #[test]
    fn scroll_sync_rounds_to_nearest_slide() {
        let mut nav = SlideNavigator::new(10);
        for k in 0..10 {
            nav.sync_to_scroll(k as f32 * 700.0, 700.0);
            assert_eq!(nav.current(), k);
        }
        nav.sync_to_scroll(3.0 * 700.0 + 349.0, 700.0);
        assert_eq!(nav.current(), 3);
        nav.sync_to_scroll(3.0 * 700.0 + 351.0, 700.0);
        assert_eq!(nav.current(), 4);
    }

    #[test]
    fn scroll_sync_clamps_both_ends() {
        let mut nav = SlideNavigator::new(4);
        nav.sync_to_scroll(50.0 * 500.0, 500.0);
        assert_eq!(nav.current(), 3);
        nav.sync_to_scroll(-2.0 * 500.0, 500.0);
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn scroll_sync_uses_current_height() {
        let mut nav = SlideNavigator::new(10);
        // Offset of slide 3 at 600px, then the window grows to 900px.
        nav.sync_to_scroll(1800.0, 600.0);
        assert_eq!(nav.current(), 3);
        nav.sync_to_scroll(1800.0, 900.0);
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn scroll_sync_ignores_degenerate_height() {
        let mut nav = SlideNavigator::new(10);
        nav.sync_to_scroll(1800.0, 600.0);
        assert!(!nav.sync_to_scroll(1800.0, 0.0));
        assert_eq!(nav.current(), 3);
    }

    #[test]
    fn progress_fraction() {
        let mut nav = SlideNavigator::new(4);
        assert_eq!(nav.progress(), 0.25);
        nav.sync_to_scroll(3000.0, 1000.0);
        assert_eq!(nav.progress(), 1.0);
        assert_eq!(SlideNavigator::new(0).progress(), 0.0);
    }

    #[test]
    fn set_slide_count_clamps() {
        let mut nav = SlideNavigator::new(10);
        nav.sync_to_scroll(9.0, 1.0);
        nav.set_slide_count(4);
        assert_eq!(nav.current(), 3);
        nav.set_slide_count(0);
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn empty_navigator_is_inert() {
        let mut nav = SlideNavigator::new(0);
        let mut surface = FakeSurface::new(600.0);
        assert!(!nav.go_next(&mut surface));
        assert!(!nav.go_to(0, &mut surface));
        assert!(!nav.sync_to_scroll(600.0, 600.0));
    }
}
