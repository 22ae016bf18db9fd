pub mod config;
pub mod emphasis;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod host;
pub mod mapper;
pub mod motion;
pub mod state;
pub mod window;

#[cfg(test)]
mod testing;

pub use config::{AppConfig, CarouselConfig, EasingType, ScrollConfig};
pub use emphasis::{Emphasis, EmphasisSettings};
pub use engine::{Activation, AttachedSlot, Carousel, FillDirection};
pub use error::{Error, Result};
pub use geometry::{Padding, Rect, Size, Viewport};
pub use host::{CarouselHost, DataSource, RenderSurface, SlotProvider};
pub use mapper::{Position, PositionMapper};
pub use state::SavedCenter;
pub use window::ViewportWindow;
