use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use filigree::{
    Canvas, GradientSpec, GradientStep, PixelSurface, Rgba8, render_background,
    rotation_cover_scale,
};
use tracing_subscriber::layer::SubscriberExt as _;

fn step(color: Rgba8, start: f64) -> GradientStep {
    GradientStep { color, start }
}

#[test]
fn horizontal_two_stop_gradient_samples_expected_columns() {
    let a = Rgba8::opaque(10, 20, 30);
    let b = Rgba8::opaque(20, 40, 60);
    let spec = GradientSpec {
        steps: vec![step(a, 0.0), step(b, 1.0)],
        rotation_degrees: 0.0,
    };

    let mut surface = PixelSurface::new(10, 4).unwrap();
    render_background(&mut surface, &spec).unwrap();

    assert_eq!(surface.pixel(0, 0).unwrap(), a);
    assert_eq!(surface.pixel(0, 3).unwrap(), a);
    // Column 5 of 10 samples t = 0.5: the channel-wise midpoint.
    assert_eq!(surface.pixel(5, 2).unwrap(), Rgba8::opaque(15, 30, 45));
}

#[test]
fn single_stop_fills_flat() {
    let c = Rgba8::opaque(90, 91, 92);
    let spec = GradientSpec {
        steps: vec![step(c, 0.0)],
        rotation_degrees: 0.0,
    };

    let mut surface = PixelSurface::new(16, 16).unwrap();
    render_background(&mut surface, &spec).unwrap();

    for y in 0..16 {
        for x in 0..16 {
            assert_eq!(surface.pixel(x, y).unwrap(), c, "({x},{y})");
        }
    }
}

/// Counts events at WARN level or above.
#[derive(Clone, Default)]
struct WarnCounter(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarnCounter {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if *event.metadata().level() <= tracing::Level::WARN {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[test]
fn empty_steps_leave_surface_untouched_with_one_diagnostic() {
    let spec = GradientSpec {
        steps: vec![],
        rotation_degrees: 45.0,
    };

    let counter = WarnCounter::default();
    let warnings = counter.0.clone();
    let subscriber = tracing_subscriber::registry().with(counter);

    let mut surface = PixelSurface::new(32, 32).unwrap();
    tracing::subscriber::with_default(subscriber, || {
        render_background(&mut surface, &spec).unwrap();
    });

    assert!(surface.data().iter().all(|&b| b == 0));
    assert_eq!(warnings.load(Ordering::Relaxed), 1);
}

#[test]
fn quarter_turned_square_scene_needs_no_scale_and_starts_on_first_stop() {
    // The FR-121 background: three blue-violet stops swept at 90 degrees.
    let spec = GradientSpec {
        steps: vec![
            step(Rgba8::opaque(15, 16, 48), 0.0),
            step(Rgba8::opaque(24, 26, 64), 0.5),
            step(Rgba8::opaque(17, 20, 53), 1.0),
        ],
        rotation_degrees: 90.0,
    };

    let canvas = Canvas {
        width: 800,
        height: 800,
    };
    assert_eq!(rotation_cover_scale(canvas, spec.rotation_degrees), 1.0);

    let mut surface = PixelSurface::new(800, 800).unwrap();
    render_background(&mut surface, &spec).unwrap();

    // The quarter turn maps the first sweep column onto the top row.
    assert_eq!(surface.pixel(0, 0).unwrap(), Rgba8::opaque(15, 16, 48));
    assert_eq!(surface.pixel(799, 0).unwrap(), Rgba8::opaque(15, 16, 48));

    // Every pixel is covered despite the rotation.
    let opaque = surface
        .data()
        .chunks_exact(4)
        .all(|px| px[3] == 255);
    assert!(opaque);
}

#[test]
fn unsorted_steps_are_rejected_without_drawing() {
    let spec = GradientSpec {
        steps: vec![
            step(Rgba8::opaque(1, 1, 1), 0.9),
            step(Rgba8::opaque(2, 2, 2), 0.1),
        ],
        rotation_degrees: 0.0,
    };
    let mut surface = PixelSurface::new(8, 8).unwrap();
    assert!(render_background(&mut surface, &spec).is_err());
    assert!(surface.data().iter().all(|&b| b == 0));
}
