use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Position {position} is out of range (item count is {count})")]
    PositionOutOfRange { position: usize, count: usize },

    #[error("Render surface measured an unusable slot size: {width}x{height}")]
    InvalidSlotSize { width: i32, height: i32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
