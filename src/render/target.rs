use kurbo::{Affine, Point};

use crate::foundation::core::{Canvas, Rgba8};

/// Abstract 2D stroke surface the sketch painters draw into.
///
/// The current transform applies to every subsequent stroke: implementations
/// map endpoints through it and scale stroke weight by its uniform scale.
/// Coordinates are in canvas units; the painters never read pixels back.
pub trait RenderTarget {
    /// Dimensions of the drawing area.
    fn canvas(&self) -> Canvas;

    /// Replace the current transform.
    fn set_transform(&mut self, transform: Affine);

    /// Restore the identity transform.
    fn reset_transform(&mut self) {
        self.set_transform(Affine::IDENTITY);
    }

    /// Stroke a straight segment from `from` to `to`.
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba8, weight: f64);

    /// Stamp a square point marker centered at `at`.
    fn stroke_point(&mut self, at: Point, color: Rgba8, weight: f64);
}
