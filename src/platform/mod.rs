//! Platform abstraction layer
//!
//! Browser-facing glue that can still be reasoned about headlessly:
//! - Input: keyboard and touch merged into held left/right signals
//! - Assets: the gate that starts the loop once both images settle
//! - Layout: desktop/mobile canvas sizing

pub mod assets;
pub mod input;
pub mod layout;

pub use assets::{AssetGate, AssetStatus, ImageAsset};
pub use input::{Controls, Side, touch_side};
pub use layout::{CanvasLayout, canvas_layout};
