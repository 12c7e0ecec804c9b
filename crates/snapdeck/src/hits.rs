use eframe::egui::{Pos2, Rect};

/// Something a pointer click can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Previous,
    Next,
    Dot(usize),
    /// An annotated element: note `note` of slide `slide` (both 0-based).
    Note { slide: usize, note: usize },
    /// Opaque chrome that swallows clicks so they never reach the slide below.
    Inert,
}

/// Clickable regions collected while painting a frame.
///
/// Regions pushed later are painted later and therefore sit on top.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, rect: Rect, target: HitTarget) {
        self.regions.push((rect, target));
    }

    /// The topmost target under `pos`.
    pub fn hit(&self, pos: Pos2) -> Option<HitTarget> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(pos))
            .map(|&(_, target)| target)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect::from_min_max(pos2(x0, y0), pos2(x1, y1))
    }

    #[test]
    fn miss_returns_none() {
        let mut hits = HitMap::default();
        hits.push(rect(0.0, 0.0, 10.0, 10.0), HitTarget::Next);
        assert_eq!(hits.hit(pos2(50.0, 50.0)), None);
    }

    #[test]
    fn later_regions_win() {
        let mut hits = HitMap::default();
        hits.push(rect(0.0, 0.0, 100.0, 100.0), HitTarget::Note { slide: 0, note: 0 });
        hits.push(rect(40.0, 40.0, 60.0, 60.0), HitTarget::Dot(3));
        assert_eq!(hits.hit(pos2(50.0, 50.0)), Some(HitTarget::Dot(3)));
        assert_eq!(
            hits.hit(pos2(10.0, 10.0)),
            Some(HitTarget::Note { slide: 0, note: 0 })
        );
    }

    #[test]
    fn inert_region_shadows_targets_below() {
        let mut hits = HitMap::default();
        hits.push(rect(0.0, 0.0, 100.0, 100.0), HitTarget::Note { slide: 1, note: 0 });
        hits.push(rect(0.0, 80.0, 100.0, 100.0), HitTarget::Inert);
        assert_eq!(hits.hit(pos2(50.0, 90.0)), Some(HitTarget::Inert));
        assert_eq!(hits.hit(pos2(50.0, 50.0)), Some(HitTarget::Note { slide: 1, note: 0 }));
    }

    #[test]
    fn clear_empties() {
        let mut hits = HitMap::default();
        hits.push(rect(0.0, 0.0, 1.0, 1.0), HitTarget::Previous);
        hits.clear();
        assert!(hits.is_empty());
        assert_eq!(hits.hit(pos2(0.5, 0.5)), None);
    }
}
