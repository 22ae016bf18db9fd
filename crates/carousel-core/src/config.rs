use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::emphasis::EmphasisSettings;
use crate::engine::Carousel;
use crate::host::CarouselHost;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file, saved center)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Engine options. Values outside their valid range are accepted here and
/// clamped by the engine setters when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Endless circular indexing instead of clamping at the edges
    #[serde(default)]
    pub loop_mode: bool,
    /// Scale floor for off-center slots, [0, 1]
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,
    /// Alpha floor for off-center slots, [0, 1]
    #[serde(default = "default_min_alpha")]
    pub min_alpha: f32,
    /// Depth of the centered slot, >= 0
    #[serde(default)]
    pub max_depth: f32,
    /// Distance divisor; larger values flatten the emphasis falloff
    #[serde(default = "default_scale_divider")]
    pub scale_divider: i64,
    /// Margin added on the left and right of every slot
    #[serde(default)]
    pub horizontal_inset: i32,
    /// Margin added above and below every slot
    #[serde(default)]
    pub vertical_inset: i32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            loop_mode: false,
            min_scale: default_min_scale(),
            min_alpha: default_min_alpha(),
            max_depth: 0.0,
            scale_divider: default_scale_divider(),
            horizontal_inset: 0,
            vertical_inset: 0,
        }
    }
}

impl CarouselConfig {
    /// Emphasis settings with every value passed through the clamping setters
    pub fn emphasis_settings(&self) -> EmphasisSettings {
        let mut settings = EmphasisSettings::default();
        settings.set_min_scale(self.min_scale);
        settings.set_min_alpha(self.min_alpha);
        settings.set_max_depth(self.max_depth);
        settings.set_scale_divider(self.scale_divider);
        settings
    }

    /// Push these options into a live engine through its setters.
    pub fn apply<S, H>(&self, carousel: &mut Carousel<S>, host: &mut H) -> crate::Result<()>
    where
        H: CarouselHost<S>,
    {
        carousel.set_insets(host, self.horizontal_inset, self.vertical_inset)?;
        carousel.set_min_scale(host, self.min_scale);
        carousel.set_min_alpha(host, self.min_alpha);
        carousel.set_max_depth(host, self.max_depth);
        carousel.set_scale_divider(host, self.scale_divider);
        if carousel.is_loop_mode() != self.loop_mode {
            carousel.set_loop_mode(host, self.loop_mode)?;
        }
        Ok(())
    }
}

/// Easing curve for smooth scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the animation
    None,
    Linear,
    /// 1 - (1-t)^3
    #[default]
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// 1 - 2^(-10t)
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate centering moves instead of jumping
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of a smooth scroll in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Distance of one step scroll; 0 means one slot width
    #[serde(default)]
    pub scroll_step: i32,
    /// Quiet period after the last scroll input before snapping to center
    #[serde(default = "default_idle_threshold")]
    pub idle_threshold_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
            scroll_step: 0,
            idle_threshold_ms: default_idle_threshold(),
        }
    }
}

impl ScrollConfig {
    #[inline]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Tick duration while animating
    #[inline]
    pub fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    pub fn idle_threshold(&self) -> Duration {
        Duration::from_millis(self.idle_threshold_ms)
    }

    #[inline]
    pub fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Card width in terminal cells
    #[serde(default = "default_card_width")]
    pub card_width: u16,
    /// Card height in terminal rows
    #[serde(default = "default_card_height")]
    pub card_height: u16,
    /// Number of demo cards
    #[serde(default = "default_item_count")]
    pub item_count: usize,
    /// Theme name ("gruvbox-dark", "nord", "dracula")
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            card_width: default_card_width(),
            card_height: default_card_height(),
            item_count: default_item_count(),
            theme: default_theme_name(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "h", "<C-d>" (Ctrl+d), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Scroll one step toward the start
    #[serde(default = "default_key_scroll_left")]
    pub scroll_left: String,
    /// Scroll one step toward the end
    #[serde(default = "default_key_scroll_right")]
    pub scroll_right: String,
    /// Scroll half a viewport toward the start
    #[serde(default = "default_key_page_left")]
    pub page_left: String,
    /// Scroll half a viewport toward the end
    #[serde(default = "default_key_page_right")]
    pub page_right: String,
    /// Center the first item
    #[serde(default = "default_key_jump_to_first")]
    pub jump_to_first: String,
    /// Center the last item
    #[serde(default = "default_key_jump_to_last")]
    pub jump_to_last: String,
    /// Activate the centered item
    #[serde(default = "default_key_select")]
    pub select: String,
    /// Switch between bounded and loop mode
    #[serde(default = "default_key_toggle_loop")]
    pub toggle_loop: String,
    /// Raise the minimum scale
    #[serde(default = "default_key_scale_up")]
    pub scale_up: String,
    /// Lower the minimum scale
    #[serde(default = "default_key_scale_down")]
    pub scale_down: String,
    /// Re-read the configuration file
    #[serde(default = "default_key_reload_config")]
    pub reload_config: String,
    /// Show key bindings
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_left: default_key_scroll_left(),
            scroll_right: default_key_scroll_right(),
            page_left: default_key_page_left(),
            page_right: default_key_page_right(),
            jump_to_first: default_key_jump_to_first(),
            jump_to_last: default_key_jump_to_last(),
            select: default_key_select(),
            toggle_loop: default_key_toggle_loop(),
            scale_up: default_key_scale_up(),
            scale_down: default_key_scale_down(),
            reload_config: default_key_reload_config(),
            help: default_key_help(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_scroll_left() -> String { "h".to_string() }
fn default_key_scroll_right() -> String { "l".to_string() }
fn default_key_page_left() -> String { "<C-u>".to_string() }
fn default_key_page_right() -> String { "<C-d>".to_string() }
fn default_key_jump_to_first() -> String { "gg".to_string() }
fn default_key_jump_to_last() -> String { "G".to_string() }
fn default_key_select() -> String { "<CR>".to_string() }
fn default_key_toggle_loop() -> String { "o".to_string() }
fn default_key_scale_up() -> String { "+".to_string() }
fn default_key_scale_down() -> String { "-".to_string() }
fn default_key_reload_config() -> String { "r".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("carousel")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_min_scale() -> f32 {
    0.8
}

fn default_min_alpha() -> f32 {
    1.0
}

fn default_scale_divider() -> i64 {
    4
}

fn default_animation_duration() -> u64 {
    250
}

fn default_animation_fps() -> u32 {
    60
}

fn default_idle_threshold() -> u64 {
    150
}

fn default_tick_rate() -> u64 {
    100
}

fn default_card_width() -> u16 {
    24
}

fn default_card_height() -> u16 {
    9
}

fn default_item_count() -> usize {
    24
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaulting when absent
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/carousel/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("carousel")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// File holding the last centered position between sessions
    pub fn state_path(&self) -> PathBuf {
        self.data_dir().join("state.toml")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("carousel.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(!config.carousel.loop_mode);
        assert_eq!(config.carousel.min_scale, 0.8);
        assert_eq!(config.carousel.min_alpha, 1.0);
        assert_eq!(config.carousel.max_depth, 0.0);
        assert_eq!(config.carousel.scale_divider, 4);
        assert_eq!(config.carousel.horizontal_inset, 0);
        assert!(config.scroll.smooth_enabled);
        assert_eq!(config.scroll.easing, EasingType::Cubic);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [carousel]
            loop_mode = true
            max_depth = 5.0

            [scroll]
            easing = "ease_out"
            "#,
        )
        .unwrap();
        assert!(config.carousel.loop_mode);
        assert_eq!(config.carousel.max_depth, 5.0);
        assert_eq!(config.carousel.min_scale, 0.8);
        assert_eq!(config.scroll.easing, EasingType::EaseOut);
        assert_eq!(config.scroll.animation_duration_ms, 250);
        assert_eq!(config.keymap.quit, "q");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[carousel]\nloop_mode = \"yes\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_out_of_range_values_clamp_when_applied() {
        let config = CarouselConfig {
            min_scale: 3.0,
            min_alpha: -1.0,
            max_depth: -2.0,
            scale_divider: 0,
            ..Default::default()
        };
        let settings = config.emphasis_settings();
        assert_eq!(settings.min_scale(), 1.0);
        assert_eq!(settings.min_alpha(), 0.0);
        assert_eq!(settings.max_depth(), 0.0);
        assert_eq!(settings.scale_divider(), 1);
    }

    #[test]
    fn test_toml_roundtrip_keeps_engine_options() {
        let mut config = AppConfig::default();
        config.carousel.loop_mode = true;
        config.carousel.horizontal_inset = 3;
        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.carousel, config.carousel);
    }

    #[test]
    fn test_apply_pushes_options_into_live_engine() {
        use crate::testing::FakeHost;

        let mut host = FakeHost::new(12, 800, 180);
        let mut carousel = Carousel::new(&CarouselConfig::default(), ScrollConfig::default());
        carousel.layout(&mut host).unwrap();
        carousel.jump_to(&mut host, 5).unwrap();

        let config = CarouselConfig {
            loop_mode: true,
            max_depth: 3.0,
            horizontal_inset: 10,
            ..Default::default()
        };
        config.apply(&mut carousel, &mut host).unwrap();

        assert!(carousel.is_loop_mode());
        assert_eq!(carousel.slot_size().width, 200);
        assert_eq!(carousel.emphasis_settings().max_depth(), 3.0);
        assert_eq!(carousel.centered_position(), 5);
    }

    #[test]
    fn test_is_smooth() {
        let mut config = ScrollConfig::default();
        assert!(config.is_smooth());

        config.smooth_enabled = false;
        assert!(!config.is_smooth());

        config.smooth_enabled = true;
        config.animation_duration_ms = 0;
        assert!(!config.is_smooth());
    }
}
