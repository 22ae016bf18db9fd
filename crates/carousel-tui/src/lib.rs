pub mod app;
pub mod deck;
pub mod event;
pub mod input;
pub mod keymap;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use deck::{CardDeck, CardSlot, PoolStats};
pub use theme::{load_theme, Theme};
