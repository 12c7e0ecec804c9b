use std::sync::Arc;

use eframe::egui::{self, Align, Color32, FontFamily, FontId, Galley, Pos2};

use crate::deck::Inline;

/// Create a LayoutJob from inline spans. Strong text is drawn in `accent`.
pub fn inlines_to_job(
    inlines: &[Inline],
    font_size: f32,
    color: Color32,
    accent: Color32,
    max_width: f32,
    centered: bool,
) -> egui::text::LayoutJob {
    let mut job = egui::text::LayoutJob::default();
    job.wrap.max_width = max_width;
    if centered {
        job.halign = Align::Center;
    }
    for inline in inlines {
        let (text, size, color, italics) = match inline {
            Inline::Text(s) => (s, font_size, color, false),
            Inline::Strong(s) => (s, font_size + 1.0, accent, false),
            Inline::Emphasis(s) => (s, font_size, color, true),
        };
        let format = egui::text::TextFormat {
            font_id: FontId::new(size, FontFamily::Proportional),
            color,
            italics,
            ..Default::default()
        };
        job.append(text, 0.0, format);
    }
    job
}

/// Plain text with a single style.
pub fn plain_job(text: &str, font_size: f32, color: Color32, max_width: f32) -> egui::text::LayoutJob {
    let mut job = egui::text::LayoutJob::default();
    job.wrap.max_width = max_width;
    job.append(
        text,
        0.0,
        egui::text::TextFormat {
            font_id: FontId::proportional(font_size),
            color,
            ..Default::default()
        },
    );
    job
}

/// A laid-out block of text ready to paint.
pub struct TextBlock {
    pub galley: Arc<Galley>,
    centered: bool,
}

impl TextBlock {
    #[allow(clippy::too_many_arguments)]
    pub fn layout(
        painter: &egui::Painter,
        inlines: &[Inline],
        font_size: f32,
        color: Color32,
        accent: Color32,
        max_width: f32,
        centered: bool,
    ) -> Self {
        let job = inlines_to_job(inlines, font_size, color, accent, max_width, centered);
        Self {
            galley: painter.layout_job(job),
            centered,
        }
    }

    pub fn height(&self) -> f32 {
        self.galley.rect.height()
    }

    pub fn width(&self) -> f32 {
        self.galley.rect.width()
    }

    /// Position to hand to `Painter::galley`. Centred jobs are anchored on
    /// their horizontal centre, so `left`/`width` describe the column.
    pub fn origin(&self, left: f32, width: f32, top: f32) -> Pos2 {
        if self.centered {
            egui::pos2(left + width / 2.0, top)
        } else {
            egui::pos2(left, top)
        }
    }

    /// Screen rect covered by the text when painted at `origin`.
    pub fn rect_at(&self, origin: Pos2) -> egui::Rect {
        self.galley.rect.translate(origin.to_vec2())
    }

    pub fn paint(&self, painter: &egui::Painter, origin: Pos2) {
        painter.galley(origin, self.galley.clone(), Color32::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_spans_use_accent() {
        let inlines = vec![
            Inline::Text("Stop ".into()),
            Inline::Strong("verify".into()),
            Inline::Emphasis(" now".into()),
        ];
        let job = inlines_to_job(&inlines, 20.0, Color32::WHITE, Color32::YELLOW, 300.0, true);
        assert_eq!(job.text, "Stop verify now");
        assert_eq!(job.sections.len(), 3);
        assert_eq!(job.sections[0].format.color, Color32::WHITE);
        assert_eq!(job.sections[1].format.color, Color32::YELLOW);
        assert_eq!(job.sections[1].format.font_id.size, 21.0);
        assert!(job.sections[2].format.italics);
        assert_eq!(job.halign, Align::Center);
        assert_eq!(job.wrap.max_width, 300.0);
    }

    #[test]
    fn plain_job_is_single_section() {
        let job = plain_job("SPEAKER NOTE", 12.0, Color32::RED, 200.0);
        assert_eq!(job.sections.len(), 1);
        assert_eq!(job.halign, Align::LEFT);
    }
}
