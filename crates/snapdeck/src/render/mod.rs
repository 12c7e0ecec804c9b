pub mod chrome;
pub mod decor;
pub mod modal;
pub mod text;

use eframe::egui::{self, Color32, FontId, Pos2, Rect, Stroke, StrokeKind};

use crate::deck::{Block, Inline, Slide};
use crate::hits::{HitMap, HitTarget};
use crate::theme::Theme;

use text::TextBlock;

const REF_WIDTH: f32 = 1920.0;
const REF_HEIGHT: f32 = 1080.0;
const MAX_CONTENT_WIDTH: f32 = 1400.0;

/// Scale factor relative to a 1920x1080 reference layout.
pub fn compute_scale(rect: Rect) -> f32 {
    (rect.width() / REF_WIDTH).min(rect.height() / REF_HEIGHT)
}

/// Everything needed to paint slides into one frame.
pub struct SlidePainter<'a> {
    pub painter: &'a egui::Painter,
    pub theme: &'a Theme,
    pub scale: f32,
    /// The visible part of the window; hit regions are clipped to it.
    pub clip: Rect,
    pub hover: Option<Pos2>,
}

enum Piece {
    Eyebrow(TextBlock),
    Badge(TextBlock, Color32),
    Title(TextBlock),
    Text {
        text: TextBlock,
        note: Option<usize>,
    },
    Callout {
        text: TextBlock,
        note: Option<usize>,
    },
    Item {
        marker: Marker,
        text: TextBlock,
        note: Option<usize>,
    },
    Gap(f32),
}

enum Marker {
    Bullet,
    Number(usize),
}

impl SlidePainter<'_> {
    fn s(&self, v: f32) -> f32 {
        v * self.scale
    }

    fn layout(&self, inlines: &[Inline], size: f32, color: Color32, width: f32, centered: bool) -> TextBlock {
        TextBlock::layout(
            self.painter,
            inlines,
            self.s(size),
            color,
            self.theme.accent,
            width,
            centered,
        )
    }

    fn plain(&self, text: &str, size: f32, color: Color32) -> TextBlock {
        TextBlock::layout(
            self.painter,
            &[Inline::Text(text.to_string())],
            self.s(size),
            color,
            color,
            f32::INFINITY,
            false,
        )
    }

    fn card_padding(&self) -> f32 {
        self.s(16.0)
    }

    fn item_indent(&self) -> f32 {
        self.s(36.0)
    }

    fn pieces(&self, slide: &Slide, width: f32) -> Vec<Piece> {
        let theme = self.theme;
        let centered = slide.kind.is_centered();
        let inner = width - self.card_padding() * 2.0;
        let mut pieces = Vec::new();

        if let Some(eyebrow) = &slide.eyebrow {
            pieces.push(Piece::Eyebrow(self.plain(
                &eyebrow.to_uppercase(),
                theme.small_size,
                theme.accent,
            )));
            pieces.push(Piece::Gap(self.s(12.0)));
        }
        if let Some(badge) = &slide.badge {
            let color = theme.badge_color(slide.kind);
            pieces.push(Piece::Badge(self.plain(badge, theme.small_size, color), color));
            pieces.push(Piece::Gap(self.s(16.0)));
        }
        if !slide.title.is_empty() {
            let size = theme.heading_size(if centered { 1 } else { 2 });
            pieces.push(Piece::Title(self.layout(
                &slide.title,
                size,
                theme.heading_color,
                width,
                centered,
            )));
            pieces.push(Piece::Gap(self.s(40.0)));
        }

        for block in &slide.blocks {
            match block {
                Block::Subheading { inlines, note } => pieces.push(Piece::Text {
                    text: self.layout(inlines, theme.heading_size(3), theme.heading_color, inner, centered),
                    note: *note,
                }),
                Block::Paragraph { inlines, note } => pieces.push(Piece::Text {
                    text: self.layout(inlines, theme.body_size, theme.foreground, inner, centered),
                    note: *note,
                }),
                Block::Callout { inlines, note } => pieces.push(Piece::Callout {
                    text: self.layout(
                        inlines,
                        theme.body_size,
                        theme.foreground,
                        inner - self.s(8.0),
                        false,
                    ),
                    note: *note,
                }),
                Block::List { ordered, items } => {
                    for (i, item) in items.iter().enumerate() {
                        let marker = if *ordered {
                            Marker::Number(i + 1)
                        } else {
                            Marker::Bullet
                        };
                        pieces.push(Piece::Item {
                            marker,
                            text: self.layout(
                                &item.inlines,
                                theme.body_size,
                                theme.foreground,
                                inner - self.item_indent(),
                                false,
                            ),
                            note: item.note,
                        });
                        pieces.push(Piece::Gap(self.s(10.0)));
                    }
                }
            }
            pieces.push(Piece::Gap(self.s(18.0)));
        }
        pieces
    }

    fn piece_height(&self, piece: &Piece) -> f32 {
        let pad = self.card_padding();
        match piece {
            Piece::Eyebrow(text) | Piece::Title(text) => text.height(),
            Piece::Badge(text, _) => text.height() + self.s(12.0),
            Piece::Text { text, .. } | Piece::Item { text, .. } | Piece::Callout { text, .. } => {
                text.height() + pad * 2.0
            }
            Piece::Gap(h) => *h,
        }
    }

    /// Paint slide `index` into `rect`. Returns true when the pointer is over
    /// one of its annotated elements.
    pub fn paint_slide(&self, slide: &Slide, index: usize, rect: Rect, hits: &mut HitMap) -> bool {
        let painter = self.painter.with_clip_rect(rect.intersect(self.clip));
        decor::paint_background(&painter, rect, slide.kind, self.theme);

        let width = (rect.width() - self.s(96.0) * 2.0).min(self.s(MAX_CONTENT_WIDTH)).max(1.0);
        let left = rect.center().x - width / 2.0;
        let pieces = self.pieces(slide, width);
        let total: f32 = pieces.iter().map(|p| self.piece_height(p)).sum();

        let top_margin = self.s(150.0);
        let mut y = if slide.kind.is_centered() {
            (rect.center().y - total / 2.0).max(rect.top() + top_margin)
        } else {
            rect.top() + top_margin
        };

        let centered = slide.kind.is_centered();
        let mut hovering = false;
        for piece in &pieces {
            let height = self.piece_height(piece);
            let row = Rect::from_min_size(egui::pos2(left, y), egui::vec2(width, height));
            match piece {
                Piece::Eyebrow(text) => {
                    let x = if centered {
                        rect.center().x - text.width() / 2.0
                    } else {
                        left
                    };
                    text.paint(&painter, egui::pos2(x, y));
                }
                Piece::Title(text) => text.paint(&painter, text.origin(left, width, y)),
                Piece::Badge(text, color) => {
                    let pad = egui::vec2(self.s(14.0), self.s(6.0));
                    let x = if centered {
                        rect.center().x - text.width() / 2.0 - pad.x
                    } else {
                        left
                    };
                    let pill = Rect::from_min_size(
                        egui::pos2(x, y),
                        egui::vec2(text.width() + pad.x * 2.0, height),
                    );
                    painter.rect_filled(pill, pill.height() / 2.0, Theme::with_opacity(*color, 0.15));
                    painter.rect_stroke(
                        pill,
                        pill.height() / 2.0,
                        Stroke::new(1.0, Theme::with_opacity(*color, 0.4)),
                        StrokeKind::Inside,
                    );
                    text.paint(&painter, pill.min + pad);
                }
                Piece::Text { text, note } => {
                    hovering |= self.paint_card(&painter, row, *note, index, hits);
                    let inner_left = left + self.card_padding();
                    let inner_width = width - self.card_padding() * 2.0;
                    text.paint(&painter, text.origin(inner_left, inner_width, y + self.card_padding()));
                }
                Piece::Callout { text, note } => {
                    painter.rect_filled(row, self.s(12.0), Theme::with_opacity(self.theme.accent, 0.08));
                    let bar = Rect::from_min_size(row.min, egui::vec2(self.s(4.0), row.height()));
                    painter.rect_filled(bar, 0.0, self.theme.accent);
                    hovering |= self.paint_card(&painter, row, *note, index, hits);
                    let origin = egui::pos2(left + self.card_padding() + self.s(8.0), y + self.card_padding());
                    text.paint(&painter, origin);
                }
                Piece::Item { marker, text, note } => {
                    hovering |= self.paint_card(&painter, row, *note, index, hits);
                    let text_top = y + self.card_padding();
                    let marker_x = left + self.card_padding();
                    let first_line = self.s(self.theme.body_size) * 0.6;
                    match marker {
                        Marker::Bullet => {
                            painter.circle_filled(
                                egui::pos2(marker_x + self.s(8.0), text_top + first_line),
                                self.s(5.0),
                                self.theme.accent,
                            );
                        }
                        Marker::Number(n) => {
                            painter.text(
                                egui::pos2(marker_x, text_top),
                                egui::Align2::LEFT_TOP,
                                format!("{n}."),
                                FontId::proportional(self.s(self.theme.body_size)),
                                self.theme.accent,
                            );
                        }
                    }
                    text.paint(&painter, egui::pos2(marker_x + self.item_indent(), text_top));
                }
                Piece::Gap(_) => {}
            }
            y += height;
        }

        hovering
    }

    /// Card behind an annotated element, plus its hit region and hover
    /// indicator. Plain elements get nothing.
    fn paint_card(
        &self,
        painter: &egui::Painter,
        row: Rect,
        note: Option<usize>,
        slide: usize,
        hits: &mut HitMap,
    ) -> bool {
        let Some(note) = note else {
            return false;
        };
        let theme = self.theme;
        let visible = row.intersect(self.clip);
        let hovered = visible.is_positive() && self.hover.is_some_and(|p| visible.contains(p));
        let radius = self.s(12.0);

        let (fill, edge) = if hovered {
            (
                Theme::with_opacity(theme.accent, 0.08),
                Theme::with_opacity(theme.accent, 0.5),
            )
        } else {
            (theme.surface, theme.surface_edge)
        };
        painter.rect_filled(row, radius, fill);
        painter.rect_stroke(row, radius, Stroke::new(1.0, edge), StrokeKind::Inside);

        if hovered {
            let r = self.s(13.0).max(9.0);
            let center = egui::pos2(row.right() - self.card_padding() - r, row.center().y);
            painter.circle_filled(center, r, Theme::with_opacity(theme.accent, 0.2));
            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                "i",
                FontId::proportional(r * 1.3),
                theme.accent,
            );
        }
        if visible.is_positive() {
            hits.push(visible, HitTarget::Note { slide, note });
        }
        hovered
    }
}
