//! Filigree renders generative line-art sketches on a CPU canvas.
//!
//! The core is a pair of stateless per-frame painters: a rotated multi-stop
//! linear gradient background and a "golden line" fan pattern radiating from
//! a row of nodes. A host hands in a [`SketchParams`] snapshot each frame and
//! gets pixels back; nothing is retained between frames.
#![forbid(unsafe_code)]

pub mod animation;
pub mod foundation;
pub mod render;
pub mod sketch;

pub use animation::ease::Ease;
pub use foundation::core::{Canvas, FrameRgba, Rgba8};
pub use foundation::error::{FiligreeError, FiligreeResult};
pub use render::raster::PixelSurface;
pub use render::target::RenderTarget;
pub use sketch::gradient::{GradientSpec, GradientStep, render_background, rotation_cover_scale};
pub use sketch::golden::{GoldenLineConfig, render_golden_lines};
pub use sketch::scene::{SketchParams, render_frame};
