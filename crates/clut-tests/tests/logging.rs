//! Log volume on the hot paths
//!
//! Events belong to construction and to the parallel split, never to single
//! pixels. Each test installs a thread-local subscriber that only counts.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use clut_tests::patterns::{InputPattern, generate_pattern};
use clut_tests::reference::smooth_table;
use tetraclut_core::{
    GridSamples, Prelin8Transform, TetrahedralInterpolator, ToneCurve16, TransformOptions,
    interpolate,
};
use tracing::subscriber::with_default;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Default, Clone)]
struct EventCounter {
    all: Arc<AtomicUsize>,
    warnings: Arc<AtomicUsize>,
}

impl EventCounter {
    fn all(&self) -> usize {
        self.all.load(Ordering::Relaxed)
    }

    fn warnings(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }
}

impl<S: Subscriber> Layer<S> for EventCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.all.fetch_add(1, Ordering::Relaxed);
        if *event.metadata().level() == Level::WARN {
            self.warnings.fetch_add(1, Ordering::Relaxed);
        }
    }
}

fn counting<T>(f: impl FnOnce() -> T) -> (T, EventCounter) {
    let counter = EventCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let out = with_default(subscriber, f);
    (out, counter)
}

#[test]
fn test_mismatched_samples_do_not_log_per_pixel() -> anyhow::Result<()> {
    // Coarser samples over a finer table stay addressable
    let table = smooth_table([17; 3], 3, 5);
    let samples = GridSamples::uniform(9, None)?;
    let src = generate_pattern(InputPattern::Random(5), 100);

    let (results, counter) = counting(|| {
        src.chunks_exact(3)
            .map(|px| interpolate([px[0], px[1], px[2]], &table, &samples))
            .collect::<Vec<_>>()
    });
    assert_eq!(results.len(), 100);
    for r in results {
        r?;
    }
    assert_eq!(counter.all(), 0);

    let (matched, counter) = counting(|| TetrahedralInterpolator::new(&table, &samples).is_matched());
    assert!(!matched);
    assert_eq!(counter.all(), 0);
    Ok(())
}

#[test]
fn test_serial_transform_is_silent() -> anyhow::Result<()> {
    let transform = Prelin8Transform::new(
        smooth_table([17; 3], 3, 6),
        None,
        TransformOptions::new().with_parallel(false),
    )?;
    let src = generate_pattern(InputPattern::Random(6), 10_000);

    let (out, counter) = counting(|| transform.transform_to_vec(&src));
    assert_eq!(out?.len(), 30_000);
    assert_eq!(counter.all(), 0);
    Ok(())
}

#[test]
fn test_parallel_transform_logs_once_per_call() -> anyhow::Result<()> {
    let transform = Prelin8Transform::new(
        smooth_table([17; 3], 3, 7),
        None,
        TransformOptions::new().with_min_pixels_per_task(64),
    )?;
    let src = generate_pattern(InputPattern::Random(7), 10_000);

    let (out, counter) = counting(|| transform.transform_to_vec(&src));
    assert_eq!(out?.len(), 30_000);
    assert_eq!(counter.all(), 1);
    Ok(())
}

#[test]
fn test_non_monotonic_curve_warns_at_construction() -> anyhow::Result<()> {
    let wobble = ToneCurve16::from_table(vec![0, 40000, 30000, 65535])?;
    let curves = [wobble, ToneCurve16::identity(), ToneCurve16::identity()];

    let (transform, counter) = counting(|| {
        Prelin8Transform::new(smooth_table([9; 3], 3, 8), Some(&curves), TransformOptions::default())
    });
    let transform = transform?;
    assert_eq!(counter.warnings(), 1);

    let src = generate_pattern(InputPattern::Random(8), 1000);
    let (out, counter) = counting(|| transform.transform_to_vec(&src));
    out?;
    assert_eq!(counter.all(), 0);
    Ok(())
}
