use eframe::egui::{self, FontId, Pos2, Rect, Stroke, StrokeKind};

use crate::hits::{HitMap, HitTarget};
use crate::nav::SlideNavigator;
use crate::theme::Theme;

pub const PROGRESS_HEIGHT: f32 = 4.0;
const BUTTON: f32 = 36.0;
const DOT: f32 = 8.0;
const ACTIVE_DOT: f32 = 24.0;
const DOT_GAP: f32 = 6.0;
const GAP: f32 = 12.0;
const PAD_X: f32 = 16.0;
const PAD_Y: f32 = 8.0;
const BOTTOM_MARGIN: f32 = 28.0;
const COUNTER_SIZE: f32 = 14.0;

/// `NN / total`, with the 1-based current slide zero-padded to two digits.
pub fn counter_label(current: usize, count: usize) -> String {
    format!("{:02} / {}", current + 1, count)
}

/// Geometry of the bottom navigation cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLayout {
    pub panel: Rect,
    pub previous: Rect,
    pub dots: Vec<Rect>,
    pub next: Rect,
    pub divider_x: f32,
    pub counter: Pos2,
}

impl NavLayout {
    pub fn new(screen: Rect, count: usize, current: usize, counter_width: f32) -> Self {
        let dots_width = if count == 0 {
            0.0
        } else {
            (count - 1) as f32 * (DOT + DOT_GAP) + ACTIVE_DOT
        };
        let inner = BUTTON + GAP + dots_width + GAP + BUTTON + GAP + 1.0 + GAP + counter_width;
        let size = egui::vec2(inner + PAD_X * 2.0, BUTTON + PAD_Y * 2.0);
        let panel = Rect::from_min_size(
            egui::pos2(
                screen.center().x - size.x / 2.0,
                screen.bottom() - BOTTOM_MARGIN - size.y,
            ),
            size,
        );
        let mid_y = panel.center().y;
        let mut x = panel.left() + PAD_X;

        let previous = Rect::from_min_size(egui::pos2(x, mid_y - BUTTON / 2.0), egui::vec2(BUTTON, BUTTON));
        x += BUTTON + GAP;

        let mut dots = Vec::with_capacity(count);
        for i in 0..count {
            let w = if i == current { ACTIVE_DOT } else { DOT };
            dots.push(Rect::from_min_size(egui::pos2(x, mid_y - DOT / 2.0), egui::vec2(w, DOT)));
            x += w + DOT_GAP;
        }
        if count > 0 {
            x -= DOT_GAP;
        }
        x += GAP;

        let next = Rect::from_min_size(egui::pos2(x, mid_y - BUTTON / 2.0), egui::vec2(BUTTON, BUTTON));
        x += BUTTON + GAP;
        let divider_x = x;
        x += 1.0 + GAP;

        Self {
            panel,
            previous,
            dots,
            next,
            divider_x,
            counter: egui::pos2(x, mid_y),
        }
    }
}

/// Progress bar, navigation cluster and key hint. Returns true when the
/// pointer is over something clickable.
pub fn paint(
    painter: &egui::Painter,
    screen: Rect,
    nav: &SlideNavigator,
    theme: &Theme,
    hover: Option<Pos2>,
    hits: &mut HitMap,
) -> bool {
    paint_progress(painter, screen, nav.progress(), theme);
    paint_key_hint(painter, screen, theme);
    paint_nav_cluster(painter, screen, nav, theme, hover, hits)
}

fn paint_progress(painter: &egui::Painter, screen: Rect, progress: f32, theme: &Theme) {
    let track = Rect::from_min_size(screen.min, egui::vec2(screen.width(), PROGRESS_HEIGHT));
    painter.rect_filled(track, 0.0, theme.surface);
    let fill = Rect::from_min_size(
        screen.min,
        egui::vec2(screen.width() * progress.clamp(0.0, 1.0), PROGRESS_HEIGHT),
    );
    painter.rect_filled(fill, 0.0, theme.accent);
}

fn paint_key_hint(painter: &egui::Painter, screen: Rect, theme: &Theme) {
    let galley = painter.layout_no_wrap(
        "Use ← → keys".to_string(),
        FontId::proportional(13.0),
        theme.muted,
    );
    let pad = egui::vec2(12.0, 6.0);
    let size = galley.rect.size() + pad * 2.0;
    let rect = Rect::from_min_size(
        egui::pos2(screen.right() - 24.0 - size.x, screen.top() + 24.0),
        size,
    );
    painter.rect_filled(rect, rect.height() / 2.0, theme.surface);
    painter.rect_stroke(rect, rect.height() / 2.0, Stroke::new(1.0, theme.surface_edge), StrokeKind::Inside);
    painter.galley(rect.min + pad, galley, theme.muted);
}

fn paint_nav_cluster(
    painter: &egui::Painter,
    screen: Rect,
    nav: &SlideNavigator,
    theme: &Theme,
    hover: Option<Pos2>,
    hits: &mut HitMap,
) -> bool {
    let counter = painter.layout_no_wrap(
        counter_label(nav.current(), nav.slide_count()),
        FontId::monospace(COUNTER_SIZE),
        theme.muted,
    );
    let layout = NavLayout::new(screen, nav.slide_count(), nav.current(), counter.rect.width());
    let is_hovered = |r: Rect| hover.is_some_and(|p| r.contains(p));

    painter.rect_filled(layout.panel, layout.panel.height() / 2.0, theme.panel);
    painter.rect_stroke(
        layout.panel,
        layout.panel.height() / 2.0,
        Stroke::new(1.0, theme.surface_edge),
        StrokeKind::Inside,
    );

    paint_arrow_button(painter, layout.previous, true, !nav.is_first(), is_hovered(layout.previous), theme);
    paint_arrow_button(painter, layout.next, false, !nav.is_last(), is_hovered(layout.next), theme);

    for (i, &dot) in layout.dots.iter().enumerate() {
        let color = if i == nav.current() {
            theme.accent
        } else if is_hovered(dot_hit_rect(dot)) {
            Theme::with_opacity(theme.foreground, 0.6)
        } else {
            Theme::with_opacity(theme.foreground, 0.25)
        };
        painter.rect_filled(dot, DOT / 2.0, color);
    }

    let mut over_clickable = false;
    for (rect, target) in nav_hits(&layout, nav) {
        over_clickable |= target != HitTarget::Inert && is_hovered(rect);
        hits.push(rect, target);
    }

    let half = BUTTON / 2.0 - 6.0;
    painter.line_segment(
        [
            egui::pos2(layout.divider_x, layout.panel.center().y - half),
            egui::pos2(layout.divider_x, layout.panel.center().y + half),
        ],
        Stroke::new(1.0, theme.surface_edge),
    );
    painter.galley(
        layout.counter - egui::vec2(0.0, counter.rect.height() / 2.0),
        counter,
        theme.muted,
    );
    over_clickable
}

fn dot_hit_rect(dot: Rect) -> Rect {
    dot.expand2(egui::vec2(DOT_GAP / 2.0, 8.0))
}

/// Clickable regions of the cluster, bottom first. The panel itself is inert,
/// as are buttons that cannot move.
fn nav_hits(layout: &NavLayout, nav: &SlideNavigator) -> Vec<(Rect, HitTarget)> {
    let mut out = Vec::with_capacity(layout.dots.len() + 3);
    out.push((layout.panel, HitTarget::Inert));
    if !nav.is_first() {
        out.push((layout.previous, HitTarget::Previous));
    }
    out.extend(
        layout
            .dots
            .iter()
            .enumerate()
            .map(|(i, &dot)| (dot_hit_rect(dot), HitTarget::Dot(i))),
    );
    if !nav.is_last() {
        out.push((layout.next, HitTarget::Next));
    }
    out
}

fn paint_arrow_button(
    painter: &egui::Painter,
    rect: Rect,
    left: bool,
    enabled: bool,
    hovered: bool,
    theme: &Theme,
) {
    let opacity = if enabled { 1.0 } else { 0.3 };
    let fill = if enabled && hovered {
        Theme::with_opacity(theme.accent, 0.2)
    } else {
        theme.surface
    };
    painter.circle_filled(rect.center(), rect.width() / 2.0, fill);

    let c = rect.center();
    let (dx, dy) = (4.0, 7.0);
    let tip = if left { c.x - dx } else { c.x + dx };
    let tail = if left { c.x + dx } else { c.x - dx };
    let stroke = Stroke::new(2.0, Theme::with_opacity(theme.foreground, opacity));
    painter.line_segment([egui::pos2(tail, c.y - dy), egui::pos2(tip, c.y)], stroke);
    painter.line_segment([egui::pos2(tip, c.y), egui::pos2(tail, c.y + dy)], stroke);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::from_min_size(Pos2::ZERO, egui::vec2(1280.0, 720.0))
    }

    #[test]
    fn counter_is_zero_padded() {
        assert_eq!(counter_label(0, 24), "01 / 24");
        assert_eq!(counter_label(9, 24), "10 / 24");
        assert_eq!(counter_label(23, 24), "24 / 24");
        assert_eq!(counter_label(99, 120), "100 / 120");
    }

    #[test]
    fn cluster_is_centered_at_bottom() {
        let layout = NavLayout::new(screen(), 24, 0, 50.0);
        assert!((layout.panel.center().x - 640.0).abs() < 0.01);
        assert_eq!(layout.panel.bottom(), 720.0 - BOTTOM_MARGIN);
        assert!(layout.previous.right() < layout.dots[0].left());
        assert!(layout.dots[23].right() < layout.next.left());
        assert!(layout.next.right() < layout.divider_x);
        assert!(layout.divider_x < layout.counter.x);
        assert!(layout.counter.x + 50.0 <= layout.panel.right() - PAD_X + 0.01);
    }

    #[test]
    fn current_dot_is_a_pill() {
        let layout = NavLayout::new(screen(), 5, 2, 40.0);
        assert_eq!(layout.dots.len(), 5);
        assert_eq!(layout.dots[2].width(), ACTIVE_DOT);
        for i in [0, 1, 3, 4] {
            assert_eq!(layout.dots[i].width(), DOT);
        }
        // Dots never overlap.
        for pair in layout.dots.windows(2) {
            assert!(pair[0].right() < pair[1].left());
        }
    }

    #[test]
    fn cluster_width_does_not_depend_on_current() {
        let a = NavLayout::new(screen(), 10, 0, 40.0);
        let b = NavLayout::new(screen(), 10, 9, 40.0);
        assert_eq!(a.panel, b.panel);
        assert_eq!(a.next, b.next);
    }

    #[test]
    fn first_and_last_slides_disable_buttons() {
        let mut nav = SlideNavigator::new(3);
        let layout = NavLayout::new(screen(), 3, 0, 40.0);
        let targets: Vec<_> = nav_hits(&layout, &nav).into_iter().map(|(_, t)| t).collect();
        assert_eq!(
            targets,
            vec![
                HitTarget::Inert,
                HitTarget::Dot(0),
                HitTarget::Dot(1),
                HitTarget::Dot(2),
                HitTarget::Next
            ]
        );

        nav.sync_to_scroll(2.0, 1.0);
        let layout = NavLayout::new(screen(), 3, 2, 40.0);
        let targets: Vec<_> = nav_hits(&layout, &nav).into_iter().map(|(_, t)| t).collect();
        assert_eq!(targets.get(1), Some(&HitTarget::Previous));
        assert!(!targets.contains(&HitTarget::Next));
    }

    #[test]
    fn panel_padding_swallows_clicks() {
        let nav = SlideNavigator::new(24);
        let layout = NavLayout::new(screen(), 24, 0, 40.0);
        let mut hits = HitMap::default();
        hits.push(screen(), HitTarget::Note { slide: 0, note: 0 });
        for (rect, target) in nav_hits(&layout, &nav) {
            hits.push(rect, target);
        }

        let padding = egui::pos2(layout.panel.left() + 4.0, layout.panel.center().y);
        assert_eq!(hits.hit(padding), Some(HitTarget::Inert));
        let divider = egui::pos2(layout.divider_x, layout.panel.center().y);
        assert_eq!(hits.hit(divider), Some(HitTarget::Inert));
        // Disabled previous button on the first slide.
        assert_eq!(hits.hit(layout.previous.center()), Some(HitTarget::Inert));
        assert_eq!(hits.hit(layout.next.center()), Some(HitTarget::Next));
    }

    #[test]
    fn dot_hit_areas_do_not_overlap() {
        let layout = NavLayout::new(screen(), 24, 5, 40.0);
        for pair in layout.dots.windows(2) {
            let (a, b) = (dot_hit_rect(pair[0]), dot_hit_rect(pair[1]));
            assert!(a.right() <= b.left() + 0.01);
        }
    }
}
