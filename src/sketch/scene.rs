use crate::foundation::core::Rgba8;
use crate::foundation::error::FiligreeResult;
use crate::render::target::RenderTarget;
use crate::sketch::golden::{GoldenLineConfig, render_golden_lines};
use crate::sketch::gradient::{GradientSpec, GradientStep, render_background};

/// Full parameter snapshot for one frame of the sketch.
///
/// The host rebuilds (or shallow-merges) this on every parameter change and
/// hands it to [`render_frame`]; nothing inside survives the frame.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SketchParams {
    pub background: GradientSpec,
    pub lines: GoldenLineConfig,
}

impl SketchParams {
    /// Reproduction defaults for the FR-121 artwork: a quarter-turned
    /// blue-violet gradient under six nodes of golden-line fans.
    pub fn fr121() -> Self {
        Self {
            background: GradientSpec {
                steps: vec![
                    GradientStep {
                        color: Rgba8::opaque(15, 16, 48),
                        start: 0.0,
                    },
                    GradientStep {
                        color: Rgba8::opaque(24, 26, 64),
                        start: 0.5,
                    },
                    GradientStep {
                        color: Rgba8::opaque(17, 20, 53),
                        start: 1.0,
                    },
                ],
                rotation_degrees: 90.0,
            },
            lines: GoldenLineConfig {
                node_count: 6,
                emitted_lines_per_node: 26,
                curve_shape_exponent: 1.95,
                curve_shape_exponent_secondary: 1.0,
                node_vertical_offset: 40.0,
                node_vertical_offset_factor: 0.8,
                line_color_blend_factor: 1.5,
                debug_overlay: false,
            },
        }
    }

    pub fn validate(&self) -> FiligreeResult<()> {
        self.background.validate()?;
        self.lines.validate()
    }
}

/// Paint one frame: gradient background first, golden-line pattern on top.
///
/// Synchronous and run-to-completion; the host invokes this once per
/// animation frame with a fresh parameter snapshot.
#[tracing::instrument(skip(target, params))]
pub fn render_frame(
    target: &mut impl RenderTarget,
    params: &SketchParams,
) -> FiligreeResult<()> {
    params.validate()?;
    render_background(target, &params.background)?;
    render_golden_lines(target, &params.lines)
}
