//! Rendering module
//!
//! `Renderer` draws a read-only view of the world onto any `Surface`. The
//! `VertexBatch` surface tessellates into triangles for the WebGPU pipeline
//! and collects overlay text for the page.

pub mod batch;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use batch::VertexBatch;
pub use pipeline::RenderState;
pub use scene::Renderer;
pub use surface::{Align, Surface, TextLabel};
