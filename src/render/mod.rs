//! Rendering: pure layout math plus 2D canvas painters
//!
//! `layout` computes where everything goes and is fully testable without a
//! drawing surface; `canvas` (wasm only) pushes that layout through a
//! `CanvasRenderingContext2d`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod layout;

pub use layout::{Glyph, polygon_points, tornado_glyphs};
