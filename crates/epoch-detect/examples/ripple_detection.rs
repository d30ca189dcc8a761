//! Ripple-style event detection on a synthetic power envelope
//!
//! Run with: cargo run --example ripple_detection

use epoch_detect::{Bounds, PeakDetector};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn main() -> anyhow::Result<()> {
    // 4 seconds of envelope at 1250 Hz with three injected events
    let fs = 1250.0;
    let n = (4.0 * fs) as usize;
    let mut rng = StdRng::seed_from_u64(7);
    let mut envelope: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..0.5)).collect();

    for (center, height, half_width) in [(1000, 6.0, 30), (2000, 9.0, 45), (2090, 4.5, 25)] {
        for offset in 0..=(2 * half_width) {
            let i = center - half_width + offset;
            let x = (offset as f64 - half_width as f64) / half_width as f64;
            envelope[i] += height * (1.0 - x * x);
        }
    }

    let detector = PeakDetector::new(
        Bounds::at_least(3.0),
        Bounds::between(0.01, 0.5),
    )
    .with_floor(1.0)
    .with_separation(0.05)
    .with_sample_rate(fs);

    let ripples = detector.detect(&envelope)?;

    println!("detected {} ripple epochs", ripples.len());
    for (i, iv) in ripples.epochs().iter().enumerate() {
        println!(
            "  {:>5.3}s - {:>5.3}s  peak {:>5.3}s  height {:.2}",
            iv.start,
            iv.stop,
            ripples.peak_times()[i],
            ripples.peak_heights()[i]
        );
    }

    Ok(())
}
