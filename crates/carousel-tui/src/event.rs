use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    /// Poll interval while an animation is running
    animation_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    pub fn with_animation_fps(tick_rate_ms: u64, fps: u32) -> Self {
        let fps = fps.max(1) as u64;
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_rate: Duration::from_millis((1000 / fps).max(1)),
        }
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll for the next event at the animation frame rate
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_rate)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if !event::poll(timeout)? {
            return Ok(Some(AppEvent::Tick));
        }
        match event::read()? {
            // Only key presses; some terminals also report releases
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(AppEvent::Key(key))),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp
                | MouseEventKind::ScrollDown
                | MouseEventKind::ScrollLeft
                | MouseEventKind::ScrollRight
                | MouseEventKind::Down(_) => Ok(Some(AppEvent::Mouse(mouse))),
                _ => Ok(None),
            },
            Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
            _ => Ok(None),
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Wheel or click
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}
