use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, ColorImage, FontId, Rect, TextureHandle, TextureOptions};

use crate::theme::Theme;

/// Decode an image file into an egui image.
pub fn load_color_image(path: &Path) -> Result<ColorImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to load logo {}", path.display()))?
        .into_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}

enum LogoState {
    Pending(PathBuf),
    Loaded(TextureHandle),
    Placeholder,
}

/// The corner logo. Loads its texture on first paint and falls back to a
/// drawn badge if there is no image or it cannot be decoded.
pub struct LogoBadge {
    state: LogoState,
}

impl LogoBadge {
    pub fn new(path: Option<PathBuf>) -> Self {
        let state = match path {
            Some(path) => LogoState::Pending(path),
            None => LogoState::Placeholder,
        };
        Self { state }
    }

    pub fn paint(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: Rect, theme: &Theme) {
        if let LogoState::Pending(path) = &self.state {
            self.state = match load_color_image(path) {
                Ok(image) => {
                    tracing::debug!(path = %path.display(), "logo loaded");
                    LogoState::Loaded(ctx.load_texture("logo", image, TextureOptions::LINEAR))
                }
                Err(e) => {
                    tracing::warn!("{e:#}; using placeholder logo");
                    LogoState::Placeholder
                }
            };
        }

        match &self.state {
            LogoState::Loaded(texture) => {
                let size = texture.size_vec2();
                let fit = (rect.width() / size.x).min(rect.height() / size.y);
                let image_rect = Rect::from_center_size(rect.center(), size * fit);
                let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(
                    texture.id(),
                    image_rect,
                    uv,
                    Theme::with_opacity(Color32::WHITE, 0.9),
                );
            }
            LogoState::Placeholder | LogoState::Pending(_) => paint_placeholder(painter, rect, theme),
        }
    }
}

fn paint_placeholder(painter: &egui::Painter, rect: Rect, theme: &Theme) {
    let radius = rect.width().min(rect.height()) / 2.0;
    painter.circle_filled(rect.center(), radius, Theme::with_opacity(theme.accent, 0.15));
    painter.circle_stroke(
        rect.center(),
        radius - 1.0,
        egui::Stroke::new(2.0, Theme::with_opacity(theme.accent, 0.6)),
    );
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "S",
        FontId::proportional(radius),
        theme.accent,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("logo.png");
        let mut img = image::RgbaImage::new(4, 3);
        img.put_pixel(1, 1, image::Rgba([255, 0, 0, 255]));
        img.save(&path).expect("save png");

        let color = load_color_image(&path).expect("decodes");
        assert_eq!(color.size, [4, 3]);
        assert_eq!(color.pixels[4 + 1], Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn missing_file_names_path() {
        let err = load_color_image(Path::new("/nonexistent/logo.png")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/logo.png"));
    }

    #[test]
    fn garbage_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"not an image").expect("write");
        assert!(load_color_image(&path).is_err());
    }
}
