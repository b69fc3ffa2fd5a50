//! Single-pole exponential smoothing filter.
//!
//! `y' = y·(1 − α) + x·α`, the classic IIR low-pass used on every noisy
//! analog channel.  The output is always a convex combination of the
//! previous output and the new sample, so a bounded input gives a bounded
//! output and a constant input is approached monotonically.

/// Exponential smoothing state for one signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpFilter {
    alpha: f32,
    value: f32,
}

impl ExpFilter {
    /// Seed the filter with an unfiltered first reading.
    pub fn new(alpha: f32, first: f32) -> Self {
        Self {
            alpha,
            value: first,
        }
    }

    /// Blend one raw sample into the state and return the new value.
    pub fn update(&mut self, raw: f32) -> f32 {
        if raw.is_nan() {
            return self.value;
        }
        if self.value.is_nan() {
            self.value = raw;
            return raw;
        }
        let next = self.value * (1.0 - self.alpha) + raw * self.alpha;
        // Rounding must not carry the result past the input.
        let (lo, hi) = if self.value <= raw {
            (self.value, raw)
        } else {
            (raw, self.value)
        };
        self.value = next.clamp(lo, hi);
        self.value
    }

    /// Current filtered value.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}
