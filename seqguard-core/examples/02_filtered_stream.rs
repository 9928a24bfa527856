//! Filtered Stream Example
//!
//! Noisy readings are smoothed and quantized before the processor learns from
//! them. Without the filter chain every reading is unique and nothing repeats;
//! with it, the underlying cycle becomes predictable.
//!
//! ## What You'll Learn
//!
//! - Loading a filter chain from JSON configuration
//! - Writing a custom filter stage
//! - Draining a sample source
//! - Reading distribution statistics and a serializable snapshot
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_filtered_stream
//! ```

use seqguard_core::{
    stream::MemorySource, FilterPipeline, FilterStage, ProcessorConfig, Sample, StreamProcessor,
};

/// Drops readings outside a plausible range by clamping them to its bounds
struct ClampStage {
    min: f64,
    max: f64,
    pending: Option<Sample>,
}

impl FilterStage for ClampStage {
    fn accept(&mut self, value: Sample) {
        self.pending = Some(value.clamp(self.min, self.max));
    }

    fn is_ready(&self) -> bool {
        self.pending.is_some()
    }

    fn emit(&mut self) -> Option<Sample> {
        self.pending.take()
    }

    fn name(&self) -> &'static str {
        "ClampStage"
    }

    fn reset(&mut self) {
        self.pending = None;
    }
}

fn readings(len: usize) -> Vec<f64> {
    let cycle = [20.0, 40.0, 60.0, 40.0];
    let mut seed: u32 = 0x5eed;
    (0..len)
        .map(|i| {
            seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
            let noise = (seed as f64 / u32::MAX as f64 - 0.5) * 6.0;
            // Each level holds for two readings
            cycle[(i / 2) % cycle.len()] + noise
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("SeqGuard Filtered Stream Example");
    println!("================================\n");

    let config: ProcessorConfig = serde_json::from_str(
        r#"{
            "window_capacity": 4,
            "filter_chain": [
                { "type": "average", "period": 2 },
                { "type": "bucket", "granularity": 10.0 }
            ]
        }"#,
    )?;
    config.validate()?;

    let samples = readings(400);

    // Raw stream, no conditioning
    let mut raw = StreamProcessor::builder().window_capacity(4).build()?;
    raw.observe_all(samples.iter().copied());

    // Configured chain, with a clamp stage in front of it
    let mut pipeline = FilterPipeline::builder().add_stage(ClampStage {
        min: 0.0,
        max: 100.0,
        pending: None,
    });
    for filter in &config.filter_chain {
        pipeline = pipeline.add_boxed(filter.build()?);
    }
    let mut filtered = StreamProcessor::with_pipeline(config.window_capacity, pipeline.build()?)?;

    let mut source = MemorySource::new(&samples);
    let pulled = filtered.process_source(&mut source, usize::MAX)?;

    println!("Pulled {} samples through {:?}", pulled, filtered.pipeline());
    for (label, processor) in [("raw", &raw), ("filtered", &filtered)] {
        let accuracy = processor.current_accuracy();
        let distribution = processor.current_distribution();
        println!(
            "{:>8}: accuracy {:>6}  coverage {:>6}  distinct {:3}  richness {:.3}",
            label,
            accuracy
                .accuracy()
                .map_or_else(|| "-".to_string(), |a| format!("{:.1}%", a * 100.0)),
            accuracy
                .coverage()
                .map_or_else(|| "-".to_string(), |c| format!("{:.1}%", c * 100.0)),
            distribution.distinct(),
            distribution.richness().unwrap_or(0.0),
        );
    }

    println!("\nFiltered value frequencies:");
    for (value, count) in filtered.current_distribution().frequencies() {
        println!("  {:6.1}: {}", value, count);
    }

    println!("\nSnapshot:");
    println!("{}", serde_json::to_string_pretty(&filtered.snapshot())?);

    Ok(())
}
