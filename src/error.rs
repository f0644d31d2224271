use thiserror::Error;

/// Errors surfaced by configuration, interpolation tables and the rasterizer.
///
/// The button itself never fails once constructed; these only come from
/// building it with a custom [`ButtonConfig`](crate::ButtonConfig) or from
/// rendering a frame on the CPU.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid button configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid interpolation table: {0}")]
    InvalidInterpolation(String),
    #[error("rasterization failed: {0}")]
    Raster(String),
    #[error("failed to parse icon: {0}")]
    Icon(String),
}

pub type Result<T> = std::result::Result<T, Error>;
