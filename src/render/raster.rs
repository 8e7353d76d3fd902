use kurbo::{Affine, Point};

use crate::foundation::core::{Canvas, FrameRgba, Rgba8};
use crate::foundation::error::{FiligreeError, FiligreeResult};
use crate::render::target::RenderTarget;

/// CPU raster surface: straight-alpha RGBA8, row-major, source-over strokes.
///
/// The buffer starts fully transparent. Strokes are stepped along their major
/// axis and each stamped pixel is alpha-composited; out-of-bounds pixels are
/// clipped.
pub struct PixelSurface {
    canvas: Canvas,
    transform: Affine,
    data: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> FiligreeResult<Self> {
        if width == 0 || height == 0 {
            return Err(FiligreeError::validation(
                "surface width/height must be > 0",
            ));
        }
        let len = (width as usize) * (height as usize) * 4;
        Ok(Self {
            canvas: Canvas { width, height },
            transform: Affine::IDENTITY,
            data: vec![0u8; len],
        })
    }

    /// Color at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let idx = ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4;
        Some(Rgba8::new(
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ))
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the surface into a finished frame buffer.
    pub fn into_frame(self) -> FrameRgba {
        FrameRgba {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.data,
        }
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba8) {
        if color.a == 0 || x < 0 || y < 0 {
            return;
        }
        let (w, h) = (i64::from(self.canvas.width), i64::from(self.canvas.height));
        if x >= w || y >= h {
            return;
        }
        let idx = ((y * w + x) as usize) * 4;

        if color.a == 255 {
            self.data[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
            return;
        }

        // Straight-alpha source-over. `sa > 0` here, so `oa > 0`.
        let sa = f64::from(color.a) / 255.0;
        let da = f64::from(self.data[idx + 3]) / 255.0;
        let oa = sa + da * (1.0 - sa);
        let src = [color.r, color.g, color.b];
        for c in 0..3 {
            let sc = f64::from(src[c]);
            let dc = f64::from(self.data[idx + c]);
            let out = (sc * sa + dc * da * (1.0 - sa)) / oa;
            self.data[idx + c] = out.round().clamp(0.0, 255.0) as u8;
        }
        self.data[idx + 3] = (oa * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    /// Stamp a `span × span` square brush centered at `(x, y)`.
    fn stamp(&mut self, x: f64, y: f64, color: Rgba8, weight: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        let span = weight.max(1.0).round() as i64;
        let x0 = (x - ((span - 1) as f64) / 2.0).round() as i64;
        let y0 = (y - ((span - 1) as f64) / 2.0).round() as i64;
        for yy in y0..y0 + span {
            for xx in x0..x0 + span {
                self.blend_pixel(xx, yy, color);
            }
        }
    }

    fn device_weight(&self, weight: f64) -> f64 {
        weight * self.transform.determinant().abs().sqrt()
    }
}

impl RenderTarget for PixelSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba8, weight: f64) {
        let a = self.transform * from;
        let b = self.transform * to;
        if !a.x.is_finite() || !a.y.is_finite() || !b.x.is_finite() || !b.y.is_finite() {
            return;
        }
        let w = self.device_weight(weight);
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let steps = dx.abs().max(dy.abs()).ceil() as i64;

        let mut last: Option<(i64, i64)> = None;
        for i in 0..=steps {
            let t = if steps == 0 {
                0.0
            } else {
                (i as f64) / (steps as f64)
            };
            let x = a.x + dx * t;
            let y = a.y + dy * t;

            // Thin translucent strokes must not blend the same pixel twice.
            if w <= 1.0 {
                let px = (x.round() as i64, y.round() as i64);
                if last == Some(px) {
                    continue;
                }
                last = Some(px);
            }
            self.stamp(x, y, color, w);
        }
    }

    fn stroke_point(&mut self, at: Point, color: Rgba8, weight: f64) {
        let p = self.transform * at;
        self.stamp(p.x, p.y, color, self.device_weight(weight));
    }
}
