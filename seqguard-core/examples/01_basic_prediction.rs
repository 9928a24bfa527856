//! Basic Prediction Example
//!
//! Feeds a repeating pattern into a processor, breaks the pattern once, and
//! prints what the processor predicted and how it scored at every step.
//!
//! ## What You'll Learn
//!
//! - Building a processor with the builder
//! - Reading predictions and accuracy counters
//! - Spotting a pattern break from the scoring outcome
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_prediction
//! ```

use seqguard_core::{ConfigResult, Observation, Outcome, StreamProcessor};

fn main() -> ConfigResult<()> {
    println!("SeqGuard Basic Prediction Example");
    println!("=================================\n");

    let mut processor = StreamProcessor::builder().window_capacity(3).build()?;

    // A daily on/off cycle with one glitch near the end
    let samples = [
        0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 7.0, 0.0, 1.0, 1.0,
    ];

    for (step, &value) in samples.iter().enumerate() {
        let expected = processor.current_prediction().value;

        match processor.observe(value) {
            Observation::Processed { outcome: Some(outcome), .. } => {
                let marker = match outcome {
                    Outcome::Correct => "ok",
                    Outcome::Incorrect => "PATTERN BREAK",
                    Outcome::NoPrediction => "learning",
                };
                println!(
                    "step {:2}: value {:4.1}  expected {:>5}  {}",
                    step,
                    value,
                    expected.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v)),
                    marker
                );
            }
            Observation::Processed { outcome: None, .. } => {
                println!("step {:2}: value {:4.1}  (filling window)", step, value);
            }
            other => println!("step {:2}: {:?}", step, other),
        }
    }

    let accuracy = processor.current_accuracy();
    println!("\nNext value: {}", processor.current_prediction());
    println!(
        "Correct: {}  Incorrect: {}  No prediction: {}",
        accuracy.correct, accuracy.incorrect, accuracy.no_prediction
    );
    if let Some(rate) = accuracy.accuracy() {
        println!("Accuracy: {:.1}%", rate * 100.0);
    }
    println!(
        "Learned {} distinct sequences ({} trie nodes)",
        processor.trie().sequence_count(),
        processor.trie().node_count()
    );

    Ok(())
}
