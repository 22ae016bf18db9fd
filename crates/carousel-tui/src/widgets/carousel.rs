use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::truncate_to_width;
use crate::app::App;

pub struct CarouselWidget;

impl CarouselWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg0)), area);

        if app.deck.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No items",
                Style::default().fg(theme.grey1),
            )))
            .alignment(Alignment::Center);
            let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1.min(area.height));
            frame.render_widget(empty, row);
            return;
        }

        let centered = app.carousel.centered_position();
        let max_depth = app.carousel.emphasis_settings().max_depth();

        for attached in app.carousel.attached() {
            let card = attached.slot();
            let Some(bounds) = card.area else {
                continue;
            };
            let Some((cells, borders)) = card_cells(bounds, card.emphasis.scale, area) else {
                continue;
            };

            let is_centered = attached.position() == centered;
            let alpha = card.emphasis.alpha;
            let raised = max_depth > 0.0 && card.emphasis.depth > max_depth / 2.0;

            let border_color = if is_centered {
                theme.highlight
            } else {
                theme.fade(theme.grey1, alpha)
            };
            let mut border_style = Style::default().fg(border_color);
            if raised {
                border_style = border_style.add_modifier(Modifier::BOLD);
            }

            let block = Block::default()
                .borders(borders)
                .border_type(if raised {
                    BorderType::Thick
                } else {
                    BorderType::Rounded
                })
                .border_style(border_style)
                .title(format!(" {} ", attached.position() + 1))
                .title_alignment(Alignment::Center)
                .style(Style::default().bg(theme.bg1));

            let inner_width = cells.width.saturating_sub(2) as usize;
            let mut title_style = Style::default().fg(theme.fade(theme.fg0, alpha));
            if is_centered {
                title_style = title_style
                    .fg(theme.fg1)
                    .add_modifier(Modifier::BOLD);
            }
            let mut lines = Vec::new();
            let inner_height = cells.height.saturating_sub(2);
            for _ in 0..inner_height.saturating_sub(1) / 2 {
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(
                truncate_to_width(&card.title, inner_width),
                title_style,
            )));
            if app.selected == Some(attached.position()) && inner_height > 2 {
                lines.push(Line::from(Span::styled(
                    "selected",
                    Style::default().fg(theme.fade(theme.accent, alpha)),
                )));
            }

            let paragraph = Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, cells);
        }
    }
}

/// Screen cells for a card, shrunk vertically by `scale` and clipped to
/// `area`. Borders on a clipped side are dropped.
fn card_cells(bounds: carousel_core::Rect, scale: f32, area: Rect) -> Option<(Rect, Borders)> {
    let height = bounds.height();
    if height <= 0 {
        return None;
    }
    let scaled = ((height as f32 * scale).round() as i32).clamp(1, height);
    let top = (bounds.top + (height - scaled) / 2).max(0);
    let bottom = (top + scaled).min(area.height as i32);
    let left = bounds.left.max(0);
    let right = bounds.right.min(area.width as i32);
    if right <= left || bottom <= top {
        return None;
    }

    let mut borders = Borders::ALL;
    if bounds.left < 0 {
        borders.remove(Borders::LEFT);
    }
    if bounds.right > area.width as i32 {
        borders.remove(Borders::RIGHT);
    }

    let cells = Rect::new(
        area.x + left as u16,
        area.y + top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    );
    Some((cells, borders))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_scale_card_inside_area() {
        let area = Rect::new(2, 1, 100, 20);
        let bounds = carousel_core::Rect::new(38, 5, 24, 9);
        let (cells, borders) = card_cells(bounds, 1.0, area).unwrap();
        assert_eq!(cells, Rect::new(40, 6, 24, 9));
        assert_eq!(borders, Borders::ALL);
    }

    #[test]
    fn test_scaled_card_shrinks_around_its_middle() {
        let area = Rect::new(0, 0, 100, 20);
        let bounds = carousel_core::Rect::new(10, 5, 24, 10);
        let (cells, _) = card_cells(bounds, 0.6, area).unwrap();
        assert_eq!(cells.height, 6);
        assert_eq!(cells.y, 7);
        assert_eq!(cells.width, 24);
    }

    #[test]
    fn test_clipped_cards_lose_the_clipped_border() {
        let area = Rect::new(0, 0, 100, 20);
        let (cells, borders) =
            card_cells(carousel_core::Rect::new(-10, 0, 24, 9), 1.0, area).unwrap();
        assert_eq!(cells.x, 0);
        assert_eq!(cells.width, 14);
        assert!(!borders.contains(Borders::LEFT));
        assert!(borders.contains(Borders::RIGHT));

        let (_, borders) = card_cells(carousel_core::Rect::new(90, 0, 24, 9), 1.0, area).unwrap();
        assert!(!borders.contains(Borders::RIGHT));

        assert!(card_cells(carousel_core::Rect::new(100, 0, 24, 9), 1.0, area).is_none());
        assert!(card_cells(carousel_core::Rect::new(-24, 0, 24, 9), 1.0, area).is_none());
    }
}
