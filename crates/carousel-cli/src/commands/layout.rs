use anyhow::Result;
use clap::Args;
use serde::Serialize;

use carousel_core::{AppConfig, Carousel, Emphasis, Position, Rect, ScrollConfig};
use carousel_tui::{CardDeck, CardSlot};

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Number of items
    #[arg(short = 'n', long, default_value_t = 12)]
    pub count: usize,
    /// Viewport width
    #[arg(long, default_value_t = 800)]
    pub viewport: u16,
    /// Viewport height
    #[arg(long, default_value_t = 400)]
    pub height: u16,
    #[arg(long, default_value_t = 200)]
    pub slot_width: u16,
    #[arg(long, default_value_t = 100)]
    pub slot_height: u16,
    /// Wrap around at both ends
    #[arg(long = "loop")]
    pub loop_mode: bool,
    /// Scroll delta, applied in order (repeatable)
    #[arg(long = "scroll", allow_negative_numbers = true)]
    pub scrolls: Vec<i32>,
    /// Center this position before scrolling
    #[arg(long)]
    pub center: Option<Position>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct SlotReport {
    pub position: Position,
    pub title: String,
    pub rect: Rect,
    pub emphasis: Emphasis,
}

#[derive(Debug, Serialize)]
pub struct LayoutReport {
    pub count: usize,
    pub loop_mode: bool,
    pub visible_count: usize,
    pub anchor: Position,
    pub centered: Option<Position>,
    /// Distance actually applied for each requested scroll
    pub applied: Vec<i32>,
    pub slots: Vec<SlotReport>,
}

pub fn run(args: &LayoutArgs, config: &AppConfig) -> Result<()> {
    let report = build_report(args, config)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }
    Ok(())
}

/// Lay out an in-memory deck and replay the requested moves.
pub fn build_report(args: &LayoutArgs, config: &AppConfig) -> Result<LayoutReport> {
    let mut deck = CardDeck::with_count(args.count, args.slot_width, args.slot_height);
    deck.set_area(args.viewport, args.height);

    let mut carousel_config = config.carousel.clone();
    carousel_config.loop_mode = args.loop_mode;
    let scroll = ScrollConfig {
        smooth_enabled: false,
        ..config.scroll.clone()
    };
    let mut carousel: Carousel<CardSlot> = Carousel::new(&carousel_config, scroll);
    carousel.layout(&mut deck)?;

    if let Some(center) = args.center {
        carousel.jump_to(&mut deck, center)?;
    }
    let applied = args
        .scrolls
        .iter()
        .map(|delta| carousel.scroll_by(&mut deck, *delta))
        .collect();

    let slots = carousel
        .attached()
        .iter()
        .map(|attached| SlotReport {
            position: attached.position(),
            title: attached.slot().title.clone(),
            rect: attached.rect(),
            emphasis: attached.emphasis(),
        })
        .collect();

    Ok(LayoutReport {
        count: args.count,
        loop_mode: carousel.is_loop_mode(),
        visible_count: carousel.visible_count(),
        anchor: carousel.anchor(),
        centered: (args.count > 0).then(|| carousel.centered_position()),
        applied,
        slots,
    })
}

fn print_table(report: &LayoutReport) {
    println!(
        "{} items, {} mode, {} visible, anchor {}, centered {}",
        report.count,
        if report.loop_mode { "loop" } else { "bounded" },
        report.visible_count,
        report.anchor,
        report
            .centered
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    if !report.applied.is_empty() {
        let applied: Vec<String> = report.applied.iter().map(i32::to_string).collect();
        println!("applied scrolls: {}", applied.join(", "));
    }
    println!();
    println!(
        "{:>8}  {:>7}  {:>7}  {:>6}  {:>6}  {:>6}  title",
        "position", "left", "right", "scale", "alpha", "depth"
    );
    for slot in &report.slots {
        println!(
            "{:>8}  {:>7}  {:>7}  {:>6.3}  {:>6.3}  {:>6.2}  {}",
            slot.position,
            slot.rect.left,
            slot.rect.right,
            slot.emphasis.scale,
            slot.emphasis.alpha,
            slot.emphasis.depth,
            slot.title
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(count: usize, viewport: u16, slot_width: u16, loop_mode: bool) -> LayoutArgs {
        LayoutArgs {
            count,
            viewport,
            height: 400,
            slot_width,
            slot_height: 100,
            loop_mode,
            scrolls: Vec::new(),
            center: None,
            json: false,
        }
    }

    fn positions(report: &LayoutReport) -> Vec<Position> {
        report.slots.iter().map(|s| s.position).collect()
    }

    #[test]
    fn test_loop_layout_wraps_left_of_first_item() {
        let report = build_report(&args(12, 800, 200, true), &AppConfig::default()).unwrap();
        assert_eq!(report.visible_count, 5);
        assert_eq!(positions(&report), vec![10, 11, 0, 1, 2]);
        assert_eq!(report.centered, Some(0));
    }

    #[test]
    fn test_full_loop_scroll() {
        let mut a = args(12, 800, 200, true);
        a.scrolls = vec![2400];
        let report = build_report(&a, &AppConfig::default()).unwrap();
        assert_eq!(report.applied, vec![2400]);
        assert_eq!(report.centered, Some(0));
    }

    #[test]
    fn test_small_bounded_set_does_not_scroll() {
        let mut a = args(3, 900, 300, false);
        a.scrolls = vec![500, -500];
        let report = build_report(&a, &AppConfig::default()).unwrap();
        assert_eq!(report.visible_count, 3);
        assert_eq!(report.applied, vec![0, 0]);
        assert_eq!(report.slots[0].rect.left, 0);
    }

    #[test]
    fn test_center_then_scroll_and_json_shape() {
        let mut a = args(20, 800, 200, false);
        a.center = Some(10);
        a.scrolls = vec![-200];
        let report = build_report(&a, &AppConfig::default()).unwrap();
        assert_eq!(report.centered, Some(9));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["centered"], 9);
        assert_eq!(json["slots"][0]["rect"]["left"], -100);
        assert!(json["slots"][0]["emphasis"]["scale"].is_number());
    }

    #[test]
    fn test_empty_and_out_of_range() {
        let report = build_report(&args(0, 800, 200, true), &AppConfig::default()).unwrap();
        assert!(report.slots.is_empty());
        assert_eq!(report.centered, None);

        let mut a = args(5, 800, 200, false);
        a.center = Some(5);
        assert!(build_report(&a, &AppConfig::default()).is_err());
    }
}
