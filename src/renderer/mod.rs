//! WebGPU rendering module
//!
//! Flat-colored quads for the arena, falling grades, fallback sprites and the
//! end-of-run overlay. Text (HUD, grade strip, overlay messages) lives in the DOM.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, arena_to_ndc};
pub use scene::{BLOCK_LABEL_FONT_PX, BlockLabel, SceneOptions, block_labels, build_scene};
pub use vertex::Vertex;
