use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::truncate_to_width;
use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match app.mode {
            Mode::Help => "HELP",
            Mode::Normal if app.carousel.is_loop_mode() => "LOOP",
            Mode::Normal => "BOUNDED",
        };

        let count = app.deck.len();
        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode_str, msg)
        } else {
            let center = if count == 0 {
                "-".to_string()
            } else {
                (app.carousel.centered_position() + 1).to_string()
            };
            let stats = app.deck.stats();
            format!(
                " {} | {}/{} | attached: {} | pool: {} created, {} reused, {} idle",
                mode_str,
                center,
                count,
                app.carousel.attached().len(),
                stats.created,
                stats.reused,
                app.deck.pooled()
            )
        };

        let help_hint = " h/l:scroll o:loop ?:help q:quit ";
        let width = area.width as usize;
        let status_text = truncate_to_width(&status_text, width);
        let used = status_text.width();
        let hint = if used + help_hint.width() <= width {
            help_hint
        } else {
            ""
        };
        let padding_len = width.saturating_sub(used + hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
