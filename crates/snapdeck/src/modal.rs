use eframe::egui::{Pos2, Rect, pos2, vec2};

use crate::notes::NoteOverlay;

pub const MAX_PANEL_WIDTH: f32 = 512.0;
pub const SCREEN_MARGIN: f32 = 16.0;
pub const PANEL_PADDING: f32 = 24.0;
pub const CLOSE_BUTTON_SIZE: f32 = 32.0;

/// Where a click landed relative to the note modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalHit {
    /// Inside the panel. Never dismisses.
    Panel,
    CloseButton,
    /// Anywhere outside the panel.
    Backdrop,
}

/// Geometry of the note modal for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalLayout {
    pub screen: Rect,
    pub panel: Rect,
    pub close_button: Rect,
}

impl ModalLayout {
    /// Centre a panel holding `content_height` points of content on `screen`.
    pub fn new(screen: Rect, content_height: f32) -> Self {
        let width = MAX_PANEL_WIDTH.min(screen.width() - SCREEN_MARGIN * 2.0).max(0.0);
        let height = (content_height + PANEL_PADDING * 2.0)
            .min(screen.height() - SCREEN_MARGIN * 2.0)
            .max(0.0);
        let panel = Rect::from_center_size(screen.center(), vec2(width, height));
        let close_button = Rect::from_min_size(
            pos2(
                panel.right() - PANEL_PADDING - CLOSE_BUTTON_SIZE,
                panel.top() + PANEL_PADDING,
            ),
            vec2(CLOSE_BUTTON_SIZE, CLOSE_BUTTON_SIZE),
        );
        Self {
            screen,
            panel,
            close_button,
        }
    }

    /// Width available for wrapped text inside the panel.
    pub fn text_width(screen: Rect) -> f32 {
        (MAX_PANEL_WIDTH.min(screen.width() - SCREEN_MARGIN * 2.0) - PANEL_PADDING * 2.0).max(1.0)
    }

    pub fn hit(&self, pos: Pos2) -> ModalHit {
        if self.close_button.contains(pos) {
            ModalHit::CloseButton
        } else if self.panel.contains(pos) {
            ModalHit::Panel
        } else {
            ModalHit::Backdrop
        }
    }
}

/// Apply a click to an open note: the backdrop and close button dismiss it,
/// a click inside the panel stops there.
pub fn handle_click(notes: &mut NoteOverlay, layout: &ModalLayout, pos: Pos2) -> ModalHit {
    let hit = layout.hit(pos);
    match hit {
        ModalHit::Panel => {}
        ModalHit::CloseButton | ModalHit::Backdrop => notes.hide(),
    }
    hit
}
