use std::path::{Path, PathBuf};
use std::time::Instant;

use eframe::egui;

use crate::config::Config;
use crate::deck::{self, Deck};
use crate::hits::HitMap;
use crate::logo::LogoBadge;
use crate::modal::ModalLayout;
use crate::render::{self, SlidePainter, chrome};
use crate::session::{Session, WindowAction};
use crate::theme::Theme;
use crate::watch::DeckWatcher;

const LOGO_SIZE: f32 = 64.0;
const LOGO_MARGIN: f32 = 24.0;
/// Upper bound on a single frame step, so a stalled frame does not skip the animation.
const MAX_FRAME_DT: f32 = 0.1;

/// What the user asked for on the command line.
#[derive(Debug, Default)]
pub struct LaunchOptions {
    pub file: Option<PathBuf>,
    pub windowed: bool,
    /// 1-indexed.
    pub start_slide: Option<usize>,
    pub logo: Option<PathBuf>,
}

/// Launch settings after applying CLI flags, then config, then front matter.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub theme: String,
    pub windowed: bool,
    /// 0-indexed.
    pub start_slide: usize,
    pub logo: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(options: &LaunchOptions, config: &Config, deck: &Deck) -> Self {
        let valid = |name: &&str| Theme::is_valid_name(name);
        let theme = config
            .theme()
            .filter(valid)
            .or(deck.meta.theme.as_deref().filter(valid))
            .unwrap_or("dark")
            .to_string();
        let windowed = options.windowed || config.windowed().unwrap_or(false);
        let start_slide = options
            .start_slide
            .or(config.start_slide())
            .unwrap_or(1)
            .saturating_sub(1)
            .min(deck.slide_count().saturating_sub(1));

        let deck_dir = options
            .file
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(Path::new("."));
        let logo = options
            .logo
            .clone()
            .or_else(|| config.logo().map(Path::to_path_buf))
            .or_else(|| deck.meta.logo.as_ref().map(|logo| deck_dir.join(logo)));

        Self {
            theme,
            windowed,
            start_slide,
            logo,
        }
    }
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let duration = 2.5;
        let fade_start = 2.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / (duration - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= 2.5
    }
}

struct SnapdeckApp {
    session: Session,
    theme: Theme,
    hits: HitMap,
    logo: LogoBadge,
    toast: Option<Toast>,
    watcher: Option<DeckWatcher>,
}

/// Input gathered for one frame.
struct FrameInput {
    keys: Vec<egui::Key>,
    wheel: f32,
    click: Option<egui::Pos2>,
    hover: Option<egui::Pos2>,
    dt: f32,
    fullscreen: bool,
}

impl SnapdeckApp {
    fn new(session: Session, theme: Theme, logo: LogoBadge, watcher: Option<DeckWatcher>) -> Self {
        Self {
            session,
            theme,
            hits: HitMap::default(),
            logo,
            toast: None,
            watcher,
        }
    }

    fn read_input(ctx: &egui::Context) -> FrameInput {
        ctx.input(|i| FrameInput {
            keys: i
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => Some(*key),
                    _ => None,
                })
                .collect(),
            wheel: i.smooth_scroll_delta.y,
            click: i
                .pointer
                .primary_clicked()
                .then(|| i.pointer.interact_pos())
                .flatten(),
            hover: i.pointer.hover_pos(),
            dt: i.stable_dt.min(MAX_FRAME_DT),
            fullscreen: i.viewport().fullscreen.unwrap_or(false),
        })
    }

    fn poll_reload(&mut self) {
        let Some(watcher) = &self.watcher else {
            return;
        };
        if !watcher.poll() {
            return;
        }
        let path = watcher.path().to_path_buf();
        match deck::load(&path) {
            Ok(deck) => {
                self.session.replace_deck(deck);
                self.toast = Some(Toast::new("Reloaded"));
            }
            Err(e) => {
                tracing::error!("reload of {} failed: {e:#}", path.display());
                self.toast = Some(Toast::new(format!("Reload failed: {e:#}")));
            }
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::debug!(theme = %self.theme.name, "theme toggled");
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
    }

    /// Paint the slides that intersect the window. Returns true when the
    /// pointer is over an annotated element.
    fn paint_slides(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: egui::Rect,
        hover: Option<egui::Pos2>,
    ) -> bool {
        let h = rect.height();
        if h <= 0.0 {
            return false;
        }
        let offset = self.session.scroller().offset();
        let count = self.session.deck().slide_count();
        let first = (offset / h).floor().max(0.0) as usize;
        let last = (((offset + h) / h).ceil() as usize).min(count);

        let slide_painter = SlidePainter {
            painter,
            theme: &self.theme,
            scale: render::compute_scale(rect),
            clip: rect,
            hover,
        };
        let mut hovering = false;
        for index in first..last {
            let Some(slide) = self.session.deck().slides.get(index) else {
                break;
            };
            let slide_rect = egui::Rect::from_min_size(
                egui::pos2(rect.left(), rect.top() + index as f32 * h - offset),
                rect.size(),
            );
            hovering |= slide_painter.paint_slide(slide, index, slide_rect, &mut self.hits);

            let logo_rect = egui::Rect::from_min_size(
                slide_rect.min + egui::vec2(LOGO_MARGIN, LOGO_MARGIN),
                egui::vec2(LOGO_SIZE, LOGO_SIZE),
            );
            if logo_rect.intersects(rect) {
                self.logo
                    .paint(ctx, &painter.with_clip_rect(rect), logo_rect, &self.theme);
            }
        }
        hovering
    }

    fn paint_toast(&self, painter: &egui::Painter, rect: egui::Rect) -> bool {
        let Some(toast) = &self.toast else {
            return false;
        };
        let opacity = toast.opacity();
        if opacity <= 0.0 {
            return false;
        }
        let toast_color = Theme::with_opacity(self.theme.foreground, opacity * 0.9);
        let toast_bg = Theme::with_opacity(self.theme.panel, opacity * 0.95);
        let galley = painter.layout(
            toast.message.clone(),
            egui::FontId::proportional(16.0),
            toast_color,
            (rect.width() * 0.8).max(1.0),
        );
        let padding = 14.0;
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.top() + 24.0,
            ),
            galley.rect.size() + egui::vec2(padding * 2.0, padding * 2.0),
        );
        painter.rect_filled(toast_rect, 8.0, toast_bg);
        painter.galley(toast_rect.min + egui::vec2(padding, padding), galley, toast_color);
        true
    }
}

impl eframe::App for SnapdeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_reload();
        let input = Self::read_input(ctx);

        // Viewport commands are sent after input handling; sending inside
        // `ctx.input()` deadlocks.
        let mut viewport_cmds = Vec::new();
        for key in &input.keys {
            match self.session.handle_key(*key) {
                Some(WindowAction::Quit) => viewport_cmds.push(egui::ViewportCommand::Close),
                Some(WindowAction::ToggleFullscreen) => {
                    viewport_cmds.push(egui::ViewportCommand::Fullscreen(!input.fullscreen))
                }
                Some(WindowAction::ToggleTheme) => self.toggle_theme(),
                None => {}
            }
        }
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
        self.session.handle_wheel(-input.wheel);

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let animating = self.session.tick(input.dt, rect.height());

                self.hits.clear();
                let note_open = self.session.notes().is_open();
                let deck_hover = if note_open { None } else { input.hover };

                let painter = ui.painter().clone();
                let over_note = self.paint_slides(ctx, &painter, rect, deck_hover);
                let over_chrome = chrome::paint(
                    &painter,
                    rect,
                    self.session.navigator(),
                    &self.theme,
                    deck_hover,
                    &mut self.hits,
                );

                let overlay = self.session.notes().clone();
                let modal_painter = ctx.layer_painter(egui::LayerId::new(
                    egui::Order::Foreground,
                    egui::Id::new("note-modal"),
                ));
                let modal_layout: Option<ModalLayout> =
                    render::modal::paint(&modal_painter, rect, &overlay, &self.theme, input.hover);
                let toast_visible = self.paint_toast(&modal_painter, rect);

                let over_close = modal_layout
                    .as_ref()
                    .zip(input.hover)
                    .is_some_and(|(layout, pos)| layout.close_button.contains(pos));
                if over_note || over_chrome || over_close {
                    ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                }

                if let Some(pos) = input.click {
                    self.session
                        .handle_click(pos, &self.hits, modal_layout.as_ref());
                    ctx.request_repaint();
                }
                if animating || toast_visible {
                    ctx.request_repaint();
                }
            });
    }
}

pub fn run(options: LaunchOptions) -> anyhow::Result<()> {
    let deck = match &options.file {
        Some(path) => deck::load(path)?,
        None => deck::builtin()?,
    };
    let config = Config::load_or_default();
    let settings = Settings::resolve(&options, &config, &deck);

    let title = deck.meta.title.clone().unwrap_or_else(|| match &options.file {
        Some(path) => format!(
            "snapdeck - {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        ),
        None => "snapdeck".to_string(),
    });
    tracing::info!(
        slides = deck.slide_count(),
        notes = deck.note_count(),
        theme = %settings.theme,
        start = settings.start_slide + 1,
        "starting presentation"
    );

    let viewport = if settings.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let file = options.file;
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| {
            let watcher = file.as_deref().and_then(|path| {
                let ctx = cc.egui_ctx.clone();
                match DeckWatcher::spawn(path, move || ctx.request_repaint()) {
                    Ok(watcher) => Some(watcher),
                    Err(e) => {
                        tracing::warn!("hot reload disabled: {e:#}");
                        None
                    }
                }
            });
            let session = Session::new(deck, settings.start_slide, 720.0);
            let app = SnapdeckApp::new(
                session,
                Theme::from_name(&settings.theme),
                LogoBadge::new(settings.logo),
                watcher,
            );
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck_with_meta(front_matter: &str) -> Deck {
        deck::parse(&format!("---\n{front_matter}---\n\n# One\n\n---\n\n## Two\n\n---\n\n## Three\n"))
            .expect("parses")
    }

    #[test]
    fn defaults_without_config_or_flags() {
        let deck = deck::builtin().expect("builtin");
        let settings = Settings::resolve(&LaunchOptions::default(), &Config::default(), &deck);
        assert_eq!(settings.theme, "dark");
        assert!(!settings.windowed);
        assert_eq!(settings.start_slide, 0);
        assert_eq!(settings.logo, None);
    }

    #[test]
    fn front_matter_supplies_theme_and_logo() {
        let deck = deck_with_meta("theme: light\nlogo: img/logo.png\n");
        let options = LaunchOptions {
            file: Some(PathBuf::from("talks/deck.md")),
            ..Default::default()
        };
        let settings = Settings::resolve(&options, &Config::default(), &deck);
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.logo, Some(PathBuf::from("talks/img/logo.png")));
    }

    #[test]
    fn config_overrides_front_matter() {
        let deck = deck_with_meta("theme: light\nlogo: img/logo.png\n");
        let mut config = Config::default();
        config.set("defaults.theme", "dark").expect("theme");
        config.set("defaults.logo", "/etc/logo.png").expect("logo");
        config.set("defaults.start_slide", "2").expect("start");
        config.set("defaults.windowed", "true").expect("windowed");
        let settings = Settings::resolve(&LaunchOptions::default(), &config, &deck);
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.logo, Some(PathBuf::from("/etc/logo.png")));
        assert_eq!(settings.start_slide, 1);
        assert!(settings.windowed);
    }

    #[test]
    fn flags_override_config() {
        let deck = deck_with_meta("title: Talk\n");
        let mut config = Config::default();
        config.set("defaults.start_slide", "2").expect("start");
        config.set("defaults.logo", "/etc/logo.png").expect("logo");
        let options = LaunchOptions {
            start_slide: Some(3),
            logo: Some(PathBuf::from("mine.png")),
            windowed: true,
            ..Default::default()
        };
        let settings = Settings::resolve(&options, &config, &deck);
        assert_eq!(settings.start_slide, 2);
        assert_eq!(settings.logo, Some(PathBuf::from("mine.png")));
        assert!(settings.windowed);
    }

    #[test]
    fn start_slide_is_clamped_to_deck() {
        let deck = deck_with_meta("title: Talk\n");
        let options = LaunchOptions {
            start_slide: Some(50),
            ..Default::default()
        };
        assert_eq!(Settings::resolve(&options, &Config::default(), &deck).start_slide, 2);
        let options = LaunchOptions {
            start_slide: Some(0),
            ..Default::default()
        };
        assert_eq!(Settings::resolve(&options, &Config::default(), &deck).start_slide, 0);
    }

    #[test]
    fn invalid_config_theme_defers_to_front_matter() {
        let deck = deck_with_meta("theme: light\n");
        let config: Config =
            serde_yaml::from_str("defaults:\n  theme: neon\n").expect("config yaml");
        let settings = Settings::resolve(&LaunchOptions::default(), &config, &deck);
        assert_eq!(settings.theme, "light");
    }

    #[test]
    fn invalid_theme_falls_back_to_dark() {
        let deck = deck_with_meta("theme: neon\n");
        let settings = Settings::resolve(&LaunchOptions::default(), &Config::default(), &deck);
        assert_eq!(settings.theme, "dark");
    }
}
