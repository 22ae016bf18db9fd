use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::input::Action;
use crate::keymap::Keymap;

const ENTRIES: &[(Action, &str)] = &[
    (Action::ScrollLeft, "Scroll left"),
    (Action::ScrollRight, "Scroll right"),
    (Action::PageLeft, "Half page left"),
    (Action::PageRight, "Half page right"),
    (Action::JumpToFirst, "First card"),
    (Action::JumpToLast, "Last card"),
    (Action::Select, "Select centered card"),
    (Action::ToggleLoop, "Toggle loop mode"),
    (Action::ScaleUp, "Raise minimum scale"),
    (Action::ScaleDown, "Lower minimum scale"),
    (Action::ReloadConfig, "Reload configuration"),
    (Action::ToggleHelp, "Toggle this help"),
    (Action::Quit, "Quit"),
];

pub struct HelpPopup;

impl HelpPopup {
    pub fn render(frame: &mut Frame, app: &App, keymap: &Keymap) {
        let theme = &app.theme;
        let area = frame.area();

        let popup_width = 44u16.min(area.width.saturating_sub(4));
        let popup_height = (ENTRIES.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let mut lines: Vec<Line> = ENTRIES
            .iter()
            .map(|(action, description)| {
                let key = keymap.label(*action).unwrap_or("-");
                Line::from(vec![
                    Span::styled(
                        format!("{:>8}  ", key),
                        Style::default()
                            .fg(theme.highlight)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*description, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "wheel scrolls, click centers a card",
            Style::default().fg(theme.grey1),
        )));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(44, 16, area), Rect::new(28, 12, 44, 16));
        let tiny = Rect::new(5, 5, 10, 4);
        assert_eq!(centered_rect(44, 16, tiny).x, 5);
    }

    #[test]
    fn test_every_entry_has_a_default_key() {
        let keymap = Keymap::default();
        for (action, _) in ENTRIES {
            assert!(keymap.label(*action).is_some(), "{:?}", action);
        }
    }
}
