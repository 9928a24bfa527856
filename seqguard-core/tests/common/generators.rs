//! Deterministic stream generators
//!
//! Everything here is seeded so failing tests replay exactly.

/// Repeat `pattern` until `len` samples have been produced
pub fn repeating(pattern: &[f64], len: usize) -> Vec<f64> {
    pattern.iter().copied().cycle().take(len).collect()
}

/// Sawtooth from 0 to `period - 1` in unit steps
pub fn sawtooth(period: u32, len: usize) -> Vec<f64> {
    (0..len).map(|i| (i as u32 % period) as f64).collect()
}

/// Linear congruential generator, same constants as Numerical Recipes
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Seeded generator
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Uniform in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Uniform in [-amplitude, amplitude)
    pub fn noise(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() - 0.5) * 2.0 * amplitude
    }
}

/// Repeating pattern with bounded uniform noise added to every sample
pub fn noisy_pattern(pattern: &[f64], amplitude: f64, len: usize, seed: u32) -> Vec<f64> {
    let mut rng = Lcg::new(seed);
    repeating(pattern, len)
        .into_iter()
        .map(|v| v + rng.noise(amplitude))
        .collect()
}

/// Pattern that switches to `second` after `switch_at` samples
pub fn regime_change(first: &[f64], second: &[f64], switch_at: usize, len: usize) -> Vec<f64> {
    let mut samples = repeating(first, switch_at);
    samples.extend(repeating(second, len.saturating_sub(switch_at)));
    samples
}
