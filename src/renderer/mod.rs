//! Rendering module
//!
//! `scene` decides what to draw; `pipeline` draws the rectangles with WebGPU.
//! Text is handed to the platform layer.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{ColoredRect, Scene, TextItem, TextSlot, build_scene};
pub use vertex::{Palette, Vertex};
