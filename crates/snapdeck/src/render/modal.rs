use eframe::egui::{self, Align, Pos2, Rect, Stroke, StrokeKind};

use crate::modal::{CLOSE_BUTTON_SIZE, ModalLayout, PANEL_PADDING};
use crate::notes::NoteOverlay;
use crate::theme::Theme;

use super::text::plain_job;

const OVERLINE_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 22.0;
const BODY_SIZE: f32 = 16.0;
const FOOTER_SIZE: f32 = 12.0;

/// Paint the note modal when the overlay is open.
///
/// Returns the layout used, so clicks in the same frame can be resolved
/// against what is on screen.
pub fn paint(
    painter: &egui::Painter,
    screen: Rect,
    overlay: &NoteOverlay,
    theme: &Theme,
    hover: Option<Pos2>,
) -> Option<ModalLayout> {
    let NoteOverlay::Open { title, body } = overlay else {
        return None;
    };

    let text_width = ModalLayout::text_width(screen);
    let mut overline = plain_job("SPEAKER NOTE", OVERLINE_SIZE, theme.accent, text_width);
    if let Some(section) = overline.sections.first_mut() {
        section.format.extra_letter_spacing = 1.5;
    }
    let overline = painter.layout_job(overline);
    let title = painter.layout_job(plain_job(
        title,
        TITLE_SIZE,
        theme.heading_color,
        text_width - CLOSE_BUTTON_SIZE - 8.0,
    ));
    let body = painter.layout_job(plain_job(body, BODY_SIZE, theme.foreground, text_width));
    let mut footer = plain_job("Click anywhere to close", FOOTER_SIZE, theme.muted, text_width);
    footer.halign = Align::Center;
    let footer = painter.layout_job(footer);

    let (gap_s, gap_m, gap_l) = (6.0, 16.0, 24.0);
    let header_height = (overline.rect.height() + gap_s + title.rect.height()).max(CLOSE_BUTTON_SIZE);
    let content_height = header_height + gap_m + body.rect.height() + gap_l + footer.rect.height();
    let layout = ModalLayout::new(screen, content_height);

    painter.rect_filled(screen, 0.0, theme.backdrop);
    painter.rect_filled(layout.panel, 16.0, theme.panel);
    painter.rect_stroke(
        layout.panel,
        16.0,
        Stroke::new(1.0, Theme::with_opacity(theme.accent, 0.3)),
        StrokeKind::Inside,
    );

    let inner = layout.panel.shrink(PANEL_PADDING);
    let content = painter.with_clip_rect(inner);
    let mut y = inner.top();
    let overline_h = overline.rect.height();
    content.galley(egui::pos2(inner.left(), y), overline, theme.accent);
    y += overline_h + gap_s;

    let title_h = title.rect.height();
    content.galley(egui::pos2(inner.left(), y), title, theme.heading_color);
    y = (y + title_h).max(inner.top() + CLOSE_BUTTON_SIZE) + gap_m;

    let body_h = body.rect.height();
    content.galley(egui::pos2(inner.left(), y), body, theme.foreground);
    y += body_h + gap_l;
    content.galley(egui::pos2(inner.center().x, y), footer, theme.muted);

    paint_close_button(painter, layout.close_button, theme, hover);
    Some(layout)
}

fn paint_close_button(painter: &egui::Painter, rect: Rect, theme: &Theme, hover: Option<Pos2>) {
    let hovered = hover.is_some_and(|p| rect.contains(p));
    let fill = if hovered {
        Theme::with_opacity(theme.accent, 0.2)
    } else {
        theme.surface
    };
    painter.rect_filled(rect, 8.0, fill);
    let c = rect.center();
    let d = rect.width() * 0.2;
    let stroke = Stroke::new(2.0, if hovered { theme.accent } else { theme.muted });
    painter.line_segment([c + egui::vec2(-d, -d), c + egui::vec2(d, d)], stroke);
    painter.line_segment([c + egui::vec2(d, -d), c + egui::vec2(-d, d)], stroke);
}
