use kurbo::{Affine, Point};

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{FiligreeError, FiligreeResult};
use crate::render::target::RenderTarget;

/// One stop of a piecewise-linear multi-color gradient.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStep {
    /// Stop color.
    pub color: Rgba8,
    /// Normalized start position in `[0, 1]`.
    pub start: f64,
}

/// A multi-stop linear gradient, optionally rotated about the canvas center.
///
/// Steps are read in array order and must be sorted ascending by `start`.
/// An empty step list is valid-but-degenerate: rendering logs a diagnostic
/// and leaves the surface untouched.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct GradientSpec {
    pub steps: Vec<GradientStep>,
    /// Sweep rotation in degrees (0 = left-to-right).
    #[serde(default)]
    pub rotation_degrees: f64,
}

impl GradientSpec {
    pub fn validate(&self) -> FiligreeResult<()> {
        if !self.rotation_degrees.is_finite() {
            return Err(FiligreeError::validation(
                "rotation_degrees must be finite",
            ));
        }
        if self.steps.iter().any(|s| !s.start.is_finite()) {
            return Err(FiligreeError::validation(
                "gradient step starts must be finite",
            ));
        }
        if !self.steps.windows(2).all(|w| w[0].start <= w[1].start) {
            return Err(FiligreeError::validation(
                "gradient steps must be sorted ascending by start",
            ));
        }
        Ok(())
    }
}

/// Minimum uniform scale at which the canvas rectangle, rotated by `degrees`
/// about its center, still fully covers its own footprint.
///
/// Exactly 1 at 0 degrees; never below 1.
pub fn rotation_cover_scale(canvas: Canvas, degrees: f64) -> f64 {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let angle = degrees.to_radians();
    let rotated_w = (w * angle.cos()).abs() + (h * angle.sin()).abs();
    let rotated_h = (h * angle.cos()).abs() + (w * angle.sin()).abs();
    (rotated_w / w).max(rotated_h / h)
}

/// Paint the full canvas with `spec`, one vertical column per integer `x`.
///
/// The column sweep happens in a frame rotated by `spec.rotation_degrees`
/// and scaled by [`rotation_cover_scale`] so every visible pixel is covered
/// regardless of the angle.
pub fn render_background(
    target: &mut impl RenderTarget,
    spec: &GradientSpec,
) -> FiligreeResult<()> {
    spec.validate()?;

    if spec.steps.is_empty() {
        tracing::warn!("no gradient steps provided; leaving surface untouched");
        return Ok(());
    }

    let canvas = target.canvas();
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);

    let scale = rotation_cover_scale(canvas, spec.rotation_degrees);
    let transform = Affine::translate((w / 2.0, h / 2.0))
        * Affine::rotate(spec.rotation_degrees.to_radians())
        * Affine::scale(scale)
        * Affine::translate((-w / 2.0, -h / 2.0));
    target.set_transform(transform);

    for i in 0..canvas.width {
        let t = f64::from(i) / w;
        let x = f64::from(i);
        target.stroke_line(
            Point::new(x, 0.0),
            Point::new(x, h),
            color_at(&spec.steps, t),
            1.0,
        );
    }

    target.reset_transform();
    Ok(())
}

/// Sampled gradient color at normalized position `t`.
///
/// The active stop is the last one with `start <= t`, blended linearly
/// toward the next stop inside `[start, next.start)`. Before the first
/// stop the sweep is opaque black; at and beyond the last stop it is that
/// stop's flat color.
fn color_at(steps: &[GradientStep], t: f64) -> Rgba8 {
    let idx = steps.partition_point(|s| s.start <= t);
    if idx == 0 {
        return Rgba8::opaque(0, 0, 0);
    }
    let active = steps[idx - 1];
    if idx >= steps.len() {
        return active.color;
    }
    let next = steps[idx];
    let span = next.start - active.start;
    if span <= 0.0 {
        return active.color;
    }
    active.color.lerp(next.color, (t - active.start) / span)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: u32, height: u32) -> Canvas {
        Canvas { width, height }
    }

    #[test]
    fn cover_scale_is_one_without_rotation() {
        assert_eq!(rotation_cover_scale(canvas(800, 800), 0.0), 1.0);
        assert_eq!(rotation_cover_scale(canvas(1280, 720), 0.0), 1.0);
    }

    #[test]
    fn cover_scale_never_shrinks() {
        for deg in [-300, -45, 10, 33, 90, 135, 270, 700] {
            let s = rotation_cover_scale(canvas(640, 360), f64::from(deg));
            assert!(s >= 1.0, "deg={deg} s={s}");
        }
    }

    #[test]
    fn cover_scale_symmetries() {
        let c = canvas(640, 360);
        for deg in [13.0, 45.0, 77.5, 120.0] {
            let s = rotation_cover_scale(c, deg);
            assert!((s - rotation_cover_scale(c, deg + 180.0)).abs() < 1e-12);
            assert!((s - rotation_cover_scale(c, -deg)).abs() < 1e-12);
        }
    }

    #[test]
    fn square_canvas_quarter_turn_needs_no_scale() {
        assert_eq!(rotation_cover_scale(canvas(800, 800), 90.0), 1.0);
    }

    #[test]
    fn two_stop_endpoints_and_midpoint() {
        let a = Rgba8::opaque(10, 20, 30);
        let b = Rgba8::opaque(20, 40, 60);
        let steps = [
            GradientStep { color: a, start: 0.0 },
            GradientStep { color: b, start: 1.0 },
        ];
        assert_eq!(color_at(&steps, 0.0), a);
        assert_eq!(color_at(&steps, 1.0), b);
        assert_eq!(color_at(&steps, 0.5), Rgba8::opaque(15, 30, 45));
    }

    #[test]
    fn single_stop_is_a_flat_fill() {
        let c = Rgba8::opaque(5, 6, 7);
        let steps = [GradientStep { color: c, start: 0.0 }];
        assert_eq!(color_at(&steps, 0.0), c);
        assert_eq!(color_at(&steps, 0.4), c);
        assert_eq!(color_at(&steps, 1.0), c);
    }

    #[test]
    fn before_first_stop_is_black() {
        let steps = [GradientStep {
            color: Rgba8::opaque(200, 200, 200),
            start: 0.5,
        }];
        assert_eq!(color_at(&steps, 0.2), Rgba8::opaque(0, 0, 0));
        assert_eq!(color_at(&steps, 0.5), Rgba8::opaque(200, 200, 200));
    }

    #[test]
    fn beyond_last_stop_holds_flat_color() {
        let steps = [
            GradientStep {
                color: Rgba8::opaque(0, 0, 0),
                start: 0.0,
            },
            GradientStep {
                color: Rgba8::opaque(80, 90, 100),
                start: 0.25,
            },
        ];
        assert_eq!(color_at(&steps, 0.25), Rgba8::opaque(80, 90, 100));
        assert_eq!(color_at(&steps, 0.9), Rgba8::opaque(80, 90, 100));
    }

    #[test]
    fn unsorted_steps_are_rejected() {
        let spec = GradientSpec {
            steps: vec![
                GradientStep {
                    color: Rgba8::opaque(0, 0, 0),
                    start: 0.6,
                },
                GradientStep {
                    color: Rgba8::opaque(9, 9, 9),
                    start: 0.1,
                },
            ],
            rotation_degrees: 0.0,
        };
        assert!(spec.validate().is_err());
    }
}
