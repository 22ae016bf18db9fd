use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};

use carousel_core::{AppConfig, SavedCenter};
use carousel_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event, Action},
    keymap::Keymap,
    load_theme,
    widgets::{CarouselWidget, HelpPopup, StatusBarWidget},
};

pub fn run(config: AppConfig, config_path: PathBuf) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);
    let theme = load_theme(&config.ui.theme);
    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.scroll.animation_fps);

    let state_path = config.state_path();
    let saved = SavedCenter::load_from(&state_path).unwrap_or_else(|e| {
        tracing::warn!("Ignoring saved state at {}: {}", state_path.display(), e);
        SavedCenter::default()
    });
    tracing::info!(
        "Starting carousel: {} cards, loop={}",
        config.ui.item_count,
        config.carousel.loop_mode
    );

    let mut app = App::new(config, theme, saved.center).with_config_path(config_path);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Carousel"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &keymap, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    let saved = app.shutdown();
    if let Err(e) = saved.save_to(&state_path) {
        tracing::warn!("Failed to save state: {}", e);
    }

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    keymap: &Keymap,
    events: &EventHandler,
) -> Result<()> {
    loop {
        app.on_tick(Instant::now());

        let size = terminal.size()?;
        let [carousel_area, status_area] = split(Rect::new(0, 0, size.width, size.height));
        app.resize(carousel_area.width, carousel_area.height)?;

        terminal.draw(|frame| {
            CarouselWidget::render(frame, carousel_area, app);
            StatusBarWidget::render(frame, status_area, app);
            if app.mode == Mode::Help {
                HelpPopup::render(frame, app, keymap);
            }
        })?;

        // Poll faster while something is moving or a snap is pending
        let event = if app.needs_fast_update() {
            events.next_animation()?
        } else {
            events.next()?
        };

        if let Some(event) = event {
            let action = match event {
                AppEvent::Key(key) => handle_key_event(key, app, keymap),
                AppEvent::Mouse(mouse) if mouse.row < carousel_area.bottom() => {
                    handle_mouse_event(mouse, carousel_area.x)
                }
                // Resizes are picked up before the next draw
                AppEvent::Mouse(_) | AppEvent::Resize(_, _) | AppEvent::Tick => Action::None,
            };
            app.handle_action(action, Instant::now())?;
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Carousel above, one-line status bar below
fn split(area: Rect) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    [chunks[0], chunks[1]]
}
