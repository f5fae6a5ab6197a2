//! Renderer module - draws a landmark frame onto a 2D surface
//!
//! Re-exports only. All logic in submodules.

mod canvas;
#[cfg(target_arch = "wasm32")]
mod gpu;
mod shapes;
mod skeleton;
mod surface;

pub use canvas::Canvas2dSurface;
#[cfg(target_arch = "wasm32")]
pub use gpu::GpuSurface;
pub use shapes::{create_circle_vertices, create_line_vertices, to_clip_space, Vertex};
pub use skeleton::{render_skeleton, SkeletonStyle};
pub use surface::{Color, DrawSurface};
