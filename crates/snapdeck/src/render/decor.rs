use eframe::egui::{self, Color32, Pos2, Rect, Stroke};

use crate::deck::SlideKind;
use crate::theme::Theme;

/// Node positions of the network illustration, in unit coordinates.
const NODES: [(f32, f32); 9] = [
    (0.08, 0.22),
    (0.20, 0.10),
    (0.28, 0.34),
    (0.14, 0.58),
    (0.34, 0.72),
    (0.72, 0.18),
    (0.86, 0.36),
    (0.78, 0.66),
    (0.92, 0.84),
];

const EDGES: [(usize, usize); 10] = [
    (0, 1),
    (1, 2),
    (0, 2),
    (2, 3),
    (3, 4),
    (2, 4),
    (5, 6),
    (6, 7),
    (7, 8),
    (5, 7),
];

pub fn paint_background(painter: &egui::Painter, rect: Rect, kind: SlideKind, theme: &Theme) {
    painter.rect_filled(rect, 0.0, theme.background);
    let tint = theme.slide_tint(kind);
    if tint != Color32::TRANSPARENT {
        painter.rect_filled(rect, 0.0, tint);
    }
    match kind {
        SlideKind::Title | SlideKind::Final => paint_network(painter, rect, theme),
        SlideKind::Case => {
            let stripe = Rect::from_min_size(rect.min, egui::vec2(6.0, rect.height()));
            painter.rect_filled(stripe, 0.0, Theme::with_opacity(theme.danger, 0.5));
        }
        SlideKind::Content | SlideKind::Summary => {}
    }
}

fn node_pos(rect: Rect, (x, y): (f32, f32)) -> Pos2 {
    rect.min + egui::vec2(rect.width() * x, rect.height() * y)
}

fn paint_network(painter: &egui::Painter, rect: Rect, theme: &Theme) {
    let line = Stroke::new(1.5, Theme::with_opacity(theme.accent, 0.18));
    for &(a, b) in &EDGES {
        painter.line_segment([node_pos(rect, NODES[a]), node_pos(rect, NODES[b])], line);
    }
    let radius = (rect.height() * 0.008).max(3.0);
    for (i, &node) in NODES.iter().enumerate() {
        let alpha = if i % 3 == 0 { 0.5 } else { 0.3 };
        painter.circle_filled(node_pos(rect, node), radius, Theme::with_opacity(theme.accent, alpha));
    }
}
