//! Render output of widgets: draw commands, the render tree and a CPU
//! rasterizer for it.

pub mod commands;
pub mod raster;
pub mod text;
pub mod tree;
pub mod types;

pub use commands::DrawCommand;
pub use raster::{rasterize, to_image};
pub use tree::{ClipRegion, FlattenedCommand, NodeId, RenderNode, WorldClip};
pub use types::{Shadow, TextAlign};
