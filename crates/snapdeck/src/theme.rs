use eframe::egui::Color32;

use crate::deck::SlideKind;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub muted: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub danger: Color32,
    pub surface: Color32,
    pub surface_edge: Color32,
    pub panel: Color32,
    pub backdrop: Color32,
    pub h1_size: f32,
    pub h2_size: f32,
    pub h3_size: f32,
    pub body_size: f32,
    pub small_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x0F, 0x17, 0x2A),
            foreground: Color32::from_rgb(0xE2, 0xE8, 0xF0),
            muted: Color32::from_rgb(0x94, 0xA3, 0xB8),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0xFB, 0xBF, 0x24),
            danger: Color32::from_rgb(0xF8, 0x71, 0x71),
            surface: Color32::from_rgba_unmultiplied(0xFF, 0xFF, 0xFF, 13),
            surface_edge: Color32::from_rgba_unmultiplied(0xFF, 0xFF, 0xFF, 26),
            panel: Color32::from_rgb(0x1E, 0x29, 0x3B),
            backdrop: Color32::from_rgba_unmultiplied(0x00, 0x00, 0x00, 178),
            h1_size: 88.0,
            h2_size: 64.0,
            h3_size: 40.0,
            body_size: 32.0,
            small_size: 22.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xF8, 0xFA, 0xFC),
            foreground: Color32::from_rgb(0x1E, 0x29, 0x3B),
            muted: Color32::from_rgb(0x64, 0x74, 0x8B),
            heading_color: Color32::from_rgb(0x0F, 0x17, 0x2A),
            accent: Color32::from_rgb(0xB4, 0x53, 0x09),
            danger: Color32::from_rgb(0xB9, 0x1C, 0x1C),
            surface: Color32::from_rgba_unmultiplied(0x0F, 0x17, 0x2A, 10),
            surface_edge: Color32::from_rgba_unmultiplied(0x0F, 0x17, 0x2A, 31),
            panel: Color32::WHITE,
            backdrop: Color32::from_rgba_unmultiplied(0x0F, 0x17, 0x2A, 140),
            h1_size: 88.0,
            h2_size: 64.0,
            h3_size: 40.0,
            body_size: 32.0,
            small_size: 22.0,
        }
    }

    /// Unknown names fall back to dark.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn is_valid_name(name: &str) -> bool {
        matches!(name, "dark" | "light")
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        let alpha = (color.a() as f32 * opacity.clamp(0.0, 1.0)) as u8;
        let [r, g, b, _] = color.to_srgba_unmultiplied();
        Color32::from_rgba_unmultiplied(r, g, b, alpha)
    }

    pub fn heading_size(&self, level: u8) -> f32 {
        match level {
            1 => self.h1_size,
            2 => self.h2_size,
            3 => self.h3_size,
            _ => self.body_size,
        }
    }

    /// Background tint painted over the base colour for each slide kind.
    pub fn slide_tint(&self, kind: SlideKind) -> Color32 {
        let dark = self.name == "dark";
        let (r, g, b) = match kind {
            SlideKind::Title | SlideKind::Final => (0xF5, 0x9E, 0x0B),
            SlideKind::Case => (0x7F, 0x1D, 0x1D),
            SlideKind::Summary => (0x06, 0x4E, 0x3B),
            SlideKind::Content => return Color32::TRANSPARENT,
        };
        Color32::from_rgba_unmultiplied(r, g, b, if dark { 36 } else { 22 })
    }

    /// Colour of the badge pill for a slide kind.
    pub fn badge_color(&self, kind: SlideKind) -> Color32 {
        match kind {
            SlideKind::Case => self.danger,
            _ => self.accent,
        }
    }
}
