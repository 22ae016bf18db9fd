use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use carousel_core::{Activation, AppConfig, Carousel, Position, RenderSurface, SavedCenter};

use crate::deck::{CardDeck, CardSlot};
use crate::input::Action;
use crate::theme::{load_theme, Theme};

const SCALE_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Application state
pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    pub carousel: Carousel<CardSlot>,
    pub deck: CardDeck,
    pub mode: Mode,
    pub should_quit: bool,
    /// First key of a pending multi-key sequence
    pub pending_key: Option<char>,
    pub status_message: Option<String>,
    /// Last card selected by activating the centered card
    pub selected: Option<Position>,
    /// Time of the last scroll input not yet followed by a snap
    last_scroll_input: Option<Instant>,
    /// File re-read by the reload action
    config_path: Option<PathBuf>,
}

impl App {
    pub fn new(config: AppConfig, theme: Theme, saved_center: Option<Position>) -> Self {
        let deck = CardDeck::with_count(
            config.ui.item_count,
            config.ui.card_width,
            config.ui.card_height,
        );
        let mut carousel = Carousel::new(&config.carousel, config.scroll.clone());
        carousel.load(saved_center);
        Self {
            config,
            theme,
            carousel,
            deck,
            mode: Mode::Normal,
            should_quit: false,
            pending_key: None,
            status_message: None,
            selected: None,
            last_scroll_input: None,
            config_path: None,
        }
    }

    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Adopt a new configuration. Carousel options go through the engine
    /// setters, so out-of-range values are clamped there; the deck keeps
    /// its cards.
    pub fn apply_config(&mut self, config: AppConfig) -> Result<()> {
        self.last_scroll_input = None;
        self.carousel.set_scroll_config(config.scroll.clone());
        config.carousel.apply(&mut self.carousel, &mut self.deck)?;
        self.theme = load_theme(&config.ui.theme);
        self.config = config;
        Ok(())
    }

    /// Adopt the size of the carousel area and lay the cards out again.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        let viewport = self.deck.viewport();
        if viewport.width == width as i32 && viewport.height == height as i32 {
            return Ok(());
        }
        tracing::debug!("Carousel area resized to {}x{}", width, height);
        self.deck.set_area(width, height);
        self.carousel.layout(&mut self.deck)?;
        Ok(())
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn centered_title(&self) -> Option<&str> {
        if self.deck.is_empty() {
            return None;
        }
        self.deck.title(self.carousel.centered_position())
    }

    /// Distance of one scroll step: configured, or one card
    pub fn scroll_step(&self) -> i32 {
        match self.config.scroll.scroll_step {
            0 => self.carousel.slot_size().width.max(1),
            step => step,
        }
    }

    fn half_page(&self) -> i32 {
        (self.deck.viewport().horizontal_space() / 2).max(1)
    }

    /// Whether the event loop should poll at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.carousel.is_animating() || self.last_scroll_input.is_some()
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) -> Result<()> {
        if action != Action::PendingG {
            self.pending_key = None;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollLeft => self.scroll(-self.scroll_step(), now),
            Action::ScrollRight => self.scroll(self.scroll_step(), now),
            Action::PageLeft => self.scroll(-self.half_page(), now),
            Action::PageRight => self.scroll(self.half_page(), now),
            Action::JumpToFirst => self.jump_to(0)?,
            Action::JumpToLast => {
                if let Some(last) = self.deck.len().checked_sub(1) {
                    self.jump_to(last)?;
                }
            }
            Action::PendingG => self.pending_key = Some('g'),
            Action::Select => self.activate(self.carousel.centered_position(), now)?,
            Action::ActivateAt(column) => {
                if let Some(position) = self.position_at_column(column) {
                    self.activate(position, now)?;
                }
            }
            Action::ToggleLoop => {
                let loop_mode = !self.carousel.is_loop_mode();
                self.last_scroll_input = None;
                self.carousel.set_loop_mode(&mut self.deck, loop_mode)?;
                self.set_status(if loop_mode { "Loop mode" } else { "Bounded mode" });
            }
            Action::ScaleUp => self.adjust_min_scale(SCALE_STEP),
            Action::ScaleDown => self.adjust_min_scale(-SCALE_STEP),
            Action::ReloadConfig => self.reload_config()?,
            Action::ToggleHelp => {
                self.mode = match self.mode {
                    Mode::Help => Mode::Normal,
                    Mode::Normal => Mode::Help,
                };
            }
            Action::ExitMode => {
                self.mode = Mode::Normal;
                self.status_message = None;
            }
            Action::None => {}
        }
        Ok(())
    }

    /// Advance animations, and snap once scrolling has been idle long enough.
    pub fn on_tick(&mut self, now: Instant) {
        if self.carousel.is_animating() {
            self.carousel.tick(&mut self.deck, now);
        } else if let Some(last) = self.last_scroll_input {
            if now.saturating_duration_since(last) >= self.config.scroll.idle_threshold() {
                self.last_scroll_input = None;
                let centered = self.carousel.snap_on_idle(now);
                tracing::trace!("Idle snap to {}", centered);
            }
        }

        if let Some(centered) = self.carousel.take_centered_change() {
            tracing::trace!("Centered card is now {}", centered);
        }
    }

    /// Return every card to the deck and report the state to persist.
    pub fn shutdown(&mut self) -> SavedCenter {
        SavedCenter::new(self.carousel.detach(&mut self.deck))
    }

    fn scroll(&mut self, delta: i32, now: Instant) {
        let applied = self.carousel.scroll_by(&mut self.deck, delta);
        if applied != delta {
            tracing::trace!("Scroll clamped: {} of {}", applied, delta);
        }
        self.last_scroll_input = Some(now);
    }

    fn jump_to(&mut self, position: Position) -> Result<()> {
        if self.deck.is_empty() {
            return Ok(());
        }
        self.last_scroll_input = None;
        self.carousel.jump_to(&mut self.deck, position)?;
        Ok(())
    }

    fn activate(&mut self, position: Position, now: Instant) -> Result<()> {
        if self.deck.is_empty() {
            return Ok(());
        }
        self.last_scroll_input = None;
        match self.carousel.on_slot_activated(position, now)? {
            Activation::Selected(position) => {
                self.selected = Some(position);
                let title = self.deck.title(position).unwrap_or_default().to_string();
                self.set_status(format!("Selected: {}", title));
            }
            Activation::Centering(position) => {
                tracing::debug!("Centering card {}", position);
            }
        }
        Ok(())
    }

    fn reload_config(&mut self) -> Result<()> {
        let Some(path) = self.config_path.clone() else {
            self.set_status("No configuration file to reload");
            return Ok(());
        };
        match AppConfig::load_from(&path) {
            Ok(config) => {
                self.apply_config(config)?;
                tracing::info!("Reloaded configuration from {}", path.display());
                self.set_status(format!("Reloaded {}", path.display()));
            }
            Err(e) => {
                tracing::warn!("Failed to reload {}: {}", path.display(), e);
                self.set_status(format!("Config error: {}", e));
            }
        }
        Ok(())
    }

    fn adjust_min_scale(&mut self, delta: f32) {
        let current = self.carousel.emphasis_settings().min_scale();
        self.carousel
            .set_min_scale(&mut self.deck, (current + delta).clamp(0.0, 1.0));
        let min_scale = self.carousel.emphasis_settings().min_scale();
        self.config.carousel.min_scale = min_scale;
        self.set_status(format!("Minimum scale: {:.1}", min_scale));
    }

    /// Card under a column of the carousel area
    fn position_at_column(&self, column: u16) -> Option<Position> {
        let column = column as i32;
        self.carousel
            .attached()
            .iter()
            .find(|a| a.rect().left <= column && column < a.rect().right)
            .map(|a| a.position())
    }
}
