//! Sine oscillator with a per-sample settable frequency.

use std::f64::consts::PI;

/// A phase-accumulator sine oscillator.
///
/// The frequency may be changed between samples without a phase
/// discontinuity, which is what the ambient tone's vibrato relies on.
#[derive(Debug, Clone)]
pub struct SineOscillator {
    frequency: f64,
    phase: f64,
    sample_rate: f64,
}

impl SineOscillator {
    pub fn new(frequency: f64, sample_rate: f64) -> Self {
        SineOscillator {
            frequency,
            phase: 0.0,
            sample_rate,
        }
    }

    /// Retune the oscillator; takes effect on the next sample.
    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Phase increment per sample.
    fn phase_inc(&self) -> f64 {
        self.frequency / self.sample_rate
    }

    /// Generate the next sample in [-1, 1].
    pub fn next_sample(&mut self) -> f64 {
        let sample = (2.0 * PI * self.phase).sin();
        self.phase += self.phase_inc();
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        sample
    }

    /// Reset oscillator phase.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let mut osc = SineOscillator::new(440.0, 44100.0);
        let s = osc.next_sample();
        assert!(s.abs() < 1e-10, "Sine should start near 0, got {s}");
    }

    #[test]
    fn stays_in_range() {
        let mut osc = SineOscillator::new(1200.0, 44100.0);
        for _ in 0..44100 {
            let s = osc.next_sample();
            assert!((-1.0..=1.0).contains(&s), "Sine out of range: {s}");
        }
    }

    #[test]
    fn retune_changes_period() {
        let mut slow = SineOscillator::new(220.0, 44100.0);
        let mut fast = SineOscillator::new(220.0, 44100.0);
        fast.set_frequency(440.0);

        // The doubled frequency crosses zero twice as often.
        let crossings = |osc: &mut SineOscillator| {
            let mut prev = osc.next_sample();
            let mut n = 0;
            for _ in 0..44100 {
                let s = osc.next_sample();
                if prev < 0.0 && s >= 0.0 {
                    n += 1;
                }
                prev = s;
            }
            n
        };
        let slow_n = crossings(&mut slow);
        let fast_n = crossings(&mut fast);
        assert!(
            (fast_n as i32 - 2 * slow_n as i32).abs() <= 1,
            "440 Hz should cross ~2x as often as 220 Hz: {fast_n} vs {slow_n}"
        );
    }

    #[test]
    fn reset_restarts_phase() {
        let mut osc = SineOscillator::new(440.0, 44100.0);
        for _ in 0..37 {
            osc.next_sample();
        }
        osc.reset();
        let s = osc.next_sample();
        assert!(s.abs() < 1e-10, "Phase should restart at 0, got {s}");
    }
}
