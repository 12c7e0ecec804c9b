use eframe::egui::{Key, Pos2};

use crate::deck::Deck;
use crate::hits::{HitMap, HitTarget};
use crate::input::{KeyAction, route_key};
use crate::modal::{self, ModalLayout};
use crate::nav::{ScrollSurface, SlideNavigator};
use crate::notes::NoteOverlay;
use crate::scroll::SnapScroller;

/// Requests the session cannot fulfil itself and hands back to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    Quit,
    ToggleFullscreen,
    ToggleTheme,
}

/// The interactive state of one presentation: deck, scroll container,
/// navigator and note overlay.
///
/// Everything here runs on the UI thread and is driven by the frame loop, so it
/// can be exercised without a window by feeding it events and a clock.
pub struct Session {
    deck: Deck,
    navigator: SlideNavigator,
    scroller: SnapScroller,
    notes: NoteOverlay,
}

impl Session {
    /// `start_slide` is 0-based and clamped to the deck.
    pub fn new(deck: Deck, start_slide: usize, viewport_height: f32) -> Self {
        let count = deck.slide_count();
        let mut scroller = SnapScroller::new(count, viewport_height);
        let mut navigator = SlideNavigator::new(count);
        let start = start_slide.min(count.saturating_sub(1));
        scroller.jump_to(start as f32 * scroller.viewport_height());
        navigator.sync_to_scroll(scroller.scroll_offset(), scroller.viewport_height());
        Self {
            deck,
            navigator,
            scroller,
            notes: NoteOverlay::default(),
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn navigator(&self) -> &SlideNavigator {
        &self.navigator
    }

    pub fn scroller(&self) -> &SnapScroller {
        &self.scroller
    }

    pub fn notes(&self) -> &NoteOverlay {
        &self.notes
    }

    pub fn current_slide(&self) -> usize {
        self.navigator.current()
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        self.navigator.go_to(index, &mut self.scroller)
    }

    pub fn go_next(&mut self) -> bool {
        self.navigator.go_next(&mut self.scroller)
    }

    pub fn go_previous(&mut self) -> bool {
        self.navigator.go_previous(&mut self.scroller)
    }

    pub fn handle_key(&mut self, key: Key) -> Option<WindowAction> {
        match route_key(key, self.notes.is_open())? {
            KeyAction::Next => {
                self.go_next();
                None
            }
            KeyAction::Previous => {
                self.go_previous();
                None
            }
            KeyAction::CloseNote => {
                self.notes.hide();
                None
            }
            KeyAction::ToggleFullscreen => Some(WindowAction::ToggleFullscreen),
            KeyAction::ToggleTheme => Some(WindowAction::ToggleTheme),
            KeyAction::Quit => Some(WindowAction::Quit),
        }
    }

    /// Manual scrolling by `delta` points; positive moves toward later slides.
    /// Ignored while a note is open.
    pub fn handle_wheel(&mut self, delta: f32) -> bool {
        if self.notes.is_open() || delta == 0.0 {
            return false;
        }
        let moved = self.scroller.scroll_by(delta);
        if moved {
            self.sync();
        }
        moved
    }

    /// Advance one frame. Returns true while the scroller still needs frames.
    pub fn tick(&mut self, dt: f32, viewport_height: f32) -> bool {
        let resized = self.scroller.set_viewport_height(viewport_height);
        let moved = self.scroller.step(dt);
        if resized || moved {
            self.sync();
        }
        !self.scroller.is_settled()
    }

    fn sync(&mut self) {
        self.navigator
            .sync_to_scroll(self.scroller.scroll_offset(), self.scroller.viewport_height());
    }

    /// Resolve a primary click. While a note is open only the modal sees it.
    pub fn handle_click(&mut self, pos: Pos2, hits: &HitMap, modal_layout: Option<&ModalLayout>) {
        if self.notes.is_open() {
            if let Some(layout) = modal_layout {
                modal::handle_click(&mut self.notes, layout, pos);
            }
            return;
        }
        if let Some(target) = hits.hit(pos) {
            self.activate(target);
        }
    }

    pub fn activate(&mut self, target: HitTarget) {
        match target {
            HitTarget::Previous => {
                self.go_previous();
            }
            HitTarget::Next => {
                self.go_next();
            }
            HitTarget::Dot(index) => {
                self.go_to(index);
            }
            HitTarget::Note { slide, note } => match self.deck.note(slide, note) {
                Some(n) => self.notes.show(n.title.clone(), n.body.clone()),
                None => tracing::warn!(slide, note, "note target no longer exists"),
            },
            HitTarget::Inert => {}
        }
    }

    /// Swap in a reloaded deck, keeping the position where possible.
    pub fn replace_deck(&mut self, deck: Deck) {
        let count = deck.slide_count();
        tracing::info!(slides = count, notes = deck.note_count(), "deck replaced");
        self.deck = deck;
        self.notes.hide();
        self.scroller.set_slide_count(count);
        self.navigator.set_slide_count(count);
        self.sync();
    }
}
