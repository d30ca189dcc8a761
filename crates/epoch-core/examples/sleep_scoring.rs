//! Sleep-state bookkeeping with categorical epochs
//!
//! Run with: cargo run --example sleep_scoring

use epoch_core::Epoch;

fn main() -> anyhow::Result<()> {
    // one state sample every 10 seconds from a (toy) scored session
    let states = [
        "wake", "wake", "wake", "nrem", "nrem", "nrem", "nrem", "rem", "rem", "nrem", "nrem",
        "wake",
    ];
    let epochs = Epoch::from_categorical_signal(&states, 10.0, None)?;

    println!("{epochs}");
    for iv in epochs.iter() {
        println!("  {iv}");
    }

    let totals = epochs.durations_by_label();
    println!("time per state:");
    for (label, seconds) in &totals {
        println!("  {label:>5}: {seconds:>5.0}s");
    }

    // fraction of the first half of the session spent in each state
    let budget = epochs.proportion_by_label(Some(0.0), Some(55.0))?;
    println!("first-half proportions:");
    for (label, fraction) in &budget {
        println!("  {label:>5}: {fraction:.2}");
    }

    Ok(())
}
