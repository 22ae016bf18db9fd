use ratatui::style::Color;

/// Runtime theme
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Semantic colors
    pub accent: Color,
    pub highlight: Color,
    pub info: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::gruvbox_dark()
    }
}

impl Theme {
    pub fn gruvbox_dark() -> Self {
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            highlight: Color::Rgb(0xd8, 0xa6, 0x57),
            info: Color::Rgb(0x7d, 0xae, 0xa3),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            error: Color::Rgb(0xea, 0x69, 0x62),
        }
    }

    pub fn nord() -> Self {
        Self {
            bg0: Color::Rgb(0x2e, 0x34, 0x40),
            bg1: Color::Rgb(0x3b, 0x42, 0x52),
            bg2: Color::Rgb(0x43, 0x4c, 0x5e),
            fg0: Color::Rgb(0xd8, 0xde, 0xe9),
            fg1: Color::Rgb(0xe5, 0xe9, 0xf0),
            grey0: Color::Rgb(0x4c, 0x56, 0x6a),
            grey1: Color::Rgb(0x61, 0x6e, 0x88),
            grey2: Color::Rgb(0x81, 0x8c, 0xa0),
            accent: Color::Rgb(0x88, 0xc0, 0xd0),
            highlight: Color::Rgb(0xeb, 0xcb, 0x8b),
            info: Color::Rgb(0x81, 0xa1, 0xc1),
            warning: Color::Rgb(0xd0, 0x87, 0x70),
            error: Color::Rgb(0xbf, 0x61, 0x6a),
        }
    }

    pub fn dracula() -> Self {
        Self {
            bg0: Color::Rgb(0x28, 0x2a, 0x36),
            bg1: Color::Rgb(0x34, 0x37, 0x46),
            bg2: Color::Rgb(0x44, 0x47, 0x5a),
            fg0: Color::Rgb(0xf8, 0xf8, 0xf2),
            fg1: Color::Rgb(0xff, 0xff, 0xff),
            grey0: Color::Rgb(0x4d, 0x50, 0x66),
            grey1: Color::Rgb(0x62, 0x72, 0xa4),
            grey2: Color::Rgb(0x7e, 0x8b, 0xb8),
            accent: Color::Rgb(0xbd, 0x93, 0xf9),
            highlight: Color::Rgb(0xf1, 0xfa, 0x8c),
            info: Color::Rgb(0x8b, 0xe9, 0xfd),
            warning: Color::Rgb(0xff, 0xb8, 0x6c),
            error: Color::Rgb(0xff, 0x55, 0x55),
        }
    }

    /// Blend `color` toward the background by `alpha` (1.0 keeps it as-is).
    /// Non-RGB colors are returned unchanged.
    pub fn fade(&self, color: Color, alpha: f32) -> Color {
        let alpha = alpha.clamp(0.0, 1.0);
        match (color, self.bg0) {
            (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
                let mix = |fg: u8, base: u8| {
                    (base as f32 + (fg as f32 - base as f32) * alpha).round() as u8
                };
                Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
            }
            _ => color,
        }
    }
}

/// Load a theme by name, falling back to gruvbox-dark
pub fn load_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "gruvbox-dark" | "gruvbox" => Theme::gruvbox_dark(),
        "nord" => Theme::nord(),
        "dracula" => Theme::dracula(),
        other => {
            tracing::warn!("Unknown theme '{}', using gruvbox-dark", other);
            Theme::gruvbox_dark()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_blends_toward_background() {
        let theme = Theme::gruvbox_dark();
        assert_eq!(theme.fade(theme.fg0, 1.0), theme.fg0);
        assert_eq!(theme.fade(theme.fg0, 0.0), theme.bg0);
        assert_eq!(theme.fade(Color::Reset, 0.3), Color::Reset);
    }

    #[test]
    fn test_load_theme_by_name() {
        assert_eq!(load_theme("Nord").bg0, Theme::nord().bg0);
        assert_eq!(load_theme("no-such-theme").bg0, Theme::gruvbox_dark().bg0);
    }
}
