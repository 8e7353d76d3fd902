use kurbo::{Affine, Point};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{FiligreeError, FiligreeResult};
use crate::foundation::math::lerp;
use crate::render::target::RenderTarget;

/// Dark blue-violet at the fan anchor.
const FAN_START_COLOR: Rgba8 = Rgba8::new(24, 26, 64, 255);
/// Translucent warm gray toward the node boundary; also the spine color.
const FAN_END_COLOR: Rgba8 = Rgba8::new(104, 94, 94, 204);

const DEBUG_BOUNDARY_COLOR: Rgba8 = Rgba8::opaque(255, 0, 0);
const DEBUG_CENTER_COLOR: Rgba8 = Rgba8::opaque(0, 255, 0);
const DEBUG_MARKER_COLOR: Rgba8 = Rgba8::opaque(255, 255, 255);
const DEBUG_MARKER_WEIGHT: f64 = 7.0;

/// Parameters of the golden-line fan pattern.
///
/// All fields are plain value data; the host recreates or merges the struct
/// on every parameter change and the renderer keeps no state between frames.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct GoldenLineConfig {
    /// Number of visual node segments across the canvas width.
    pub node_count: u32,
    /// Lines emitted per node; each side fan draws half of these.
    pub emitted_lines_per_node: u32,
    /// Power-curve exponent easing fan spacing toward the node boundary.
    #[serde(default = "default_factor")]
    pub curve_shape_exponent: f64,
    /// Second-tier exponent applied on top of the first for the anchor end.
    #[serde(default = "default_factor")]
    pub curve_shape_exponent_secondary: f64,
    /// Vertical distance accumulated between consecutive node anchors.
    pub node_vertical_offset: f64,
    /// Multiplier on the per-node vertical drift.
    #[serde(default = "default_factor")]
    pub node_vertical_offset_factor: f64,
    /// Multiplier on the fan color blend ratio; values above 1 extrapolate.
    #[serde(default = "default_factor")]
    pub line_color_blend_factor: f64,
    /// Draw node boundary/center guides and anchor markers.
    #[serde(default)]
    pub debug_overlay: bool,
}

fn default_factor() -> f64 {
    1.0
}

impl GoldenLineConfig {
    /// Config with unit factors and no debug overlay.
    pub fn new(node_count: u32, emitted_lines_per_node: u32, node_vertical_offset: f64) -> Self {
        Self {
            node_count,
            emitted_lines_per_node,
            curve_shape_exponent: 1.0,
            curve_shape_exponent_secondary: 1.0,
            node_vertical_offset,
            node_vertical_offset_factor: 1.0,
            line_color_blend_factor: 1.0,
            debug_overlay: false,
        }
    }

    pub fn validate(&self) -> FiligreeResult<()> {
        if self.node_count == 0 {
            return Err(FiligreeError::validation("node_count must be >= 1"));
        }
        if !self.curve_shape_exponent.is_finite() || self.curve_shape_exponent <= 0.0 {
            return Err(FiligreeError::validation(
                "curve_shape_exponent must be > 0",
            ));
        }
        if !self.curve_shape_exponent_secondary.is_finite()
            || self.curve_shape_exponent_secondary <= 0.0
        {
            return Err(FiligreeError::validation(
                "curve_shape_exponent_secondary must be > 0",
            ));
        }
        if !self.node_vertical_offset.is_finite()
            || !self.node_vertical_offset_factor.is_finite()
            || !self.line_color_blend_factor.is_finite()
        {
            return Err(FiligreeError::validation(
                "offset and blend factors must be finite",
            ));
        }
        Ok(())
    }
}

/// Paint the golden-line pattern: a row of node spines, each emitting two
/// symmetric fans of eased lines toward its neighbors' boundaries.
///
/// The row is shifted left by half a node width and gains one extra boundary
/// column, so `node_count` visual segments are anchored at `node_count + 1`
/// sample points.
pub fn render_golden_lines(
    target: &mut impl RenderTarget,
    config: &GoldenLineConfig,
) -> FiligreeResult<()> {
    config.validate()?;

    let canvas = target.canvas();
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);

    let node_width = w / f64::from(config.node_count);
    let half_node_width = node_width / 2.0;
    let boundary_count = config.node_count + 1;
    let half_fan = config.emitted_lines_per_node / 2;

    target.set_transform(Affine::translate((-half_node_width, 0.0)));

    let mut center_y =
        h / 2.0 - f64::from(boundary_count) / 2.0 * config.node_vertical_offset;
    for i in 0..boundary_count {
        let left_max = f64::from(i) * node_width;
        let right_max = f64::from(i + 1) * node_width;
        let center_x = (left_max + right_max) / 2.0;
        center_y += config.node_vertical_offset * config.node_vertical_offset_factor;

        if config.debug_overlay {
            draw_debug_overlay(target, left_max, right_max, center_x, center_y, h);
        }

        target.stroke_line(
            Point::new(center_x, 0.0),
            Point::new(center_x, h),
            FAN_END_COLOR,
            1.0,
        );
        draw_fan(target, config, left_max, center_x, center_y, h, half_fan);
        draw_fan(target, config, right_max, center_x, center_y, h, half_fan);
    }

    target.reset_transform();
    Ok(())
}

/// One fan: lines from the node anchor out toward `edge`, with two-tier
/// power-curve spacing and blended color.
fn draw_fan(
    target: &mut impl RenderTarget,
    config: &GoldenLineConfig,
    edge: f64,
    center_x: f64,
    center_y: f64,
    h: f64,
    half_fan: u32,
) {
    for j in 0..half_fan {
        let u = f64::from(j) / f64::from(half_fan);
        let adjust = u.powf(config.curve_shape_exponent);
        let adjust_secondary =
            u.powf(config.curve_shape_exponent * config.curve_shape_exponent_secondary);
        // The outer endpoint eases from the boundary toward the spine; the
        // anchor endpoint then eases from that point toward the spine again.
        // Collapsing the two stages into one exponent changes the curvature.
        let p = lerp(edge, center_x, adjust);
        let q = lerp(p, center_x, adjust_secondary);
        let color = FAN_START_COLOR.lerp(FAN_END_COLOR, adjust * config.line_color_blend_factor);
        target.stroke_line(Point::new(q, center_y), Point::new(p, 0.0), color, 1.0);
        target.stroke_line(Point::new(q, center_y), Point::new(p, h), color, 1.0);
    }
}

fn draw_debug_overlay(
    target: &mut impl RenderTarget,
    left_max: f64,
    right_max: f64,
    center_x: f64,
    center_y: f64,
    h: f64,
) {
    target.stroke_line(
        Point::new(left_max, 0.0),
        Point::new(left_max, h),
        DEBUG_BOUNDARY_COLOR,
        1.0,
    );
    target.stroke_line(
        Point::new(right_max, 0.0),
        Point::new(right_max, h),
        DEBUG_BOUNDARY_COLOR,
        1.0,
    );
    target.stroke_line(
        Point::new(center_x, 0.0),
        Point::new(center_x, h),
        DEBUG_CENTER_COLOR,
        1.0,
    );
    target.stroke_point(
        Point::new(center_x, center_y),
        DEBUG_MARKER_COLOR,
        DEBUG_MARKER_WEIGHT,
    );
}
