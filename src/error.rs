use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlanetDeckError>;

#[derive(Error, Debug)]
pub enum PlanetDeckError {
    #[error("canvas dimensions must be non-zero, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("canvas {width}x{height} exceeds the raster size limit")]
    CanvasTooLarge { width: u32, height: u32 },

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("viewer not initialized")]
    NotInitialized,
}
