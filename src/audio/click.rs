//! One-shot click voice — percussive interaction feedback.

use super::oscillator::SineOscillator;

/// Click tone frequency in Hz.
pub const CLICK_FREQ: f64 = 1200.0;
/// Envelope floor the attack ramps up from.
const ATTACK_FLOOR: f64 = 0.0001;
/// Peak level reached at the end of the attack.
const PEAK_LEVEL: f64 = 0.18;
/// Level the decay ramps down to.
const DECAY_FLOOR: f64 = 0.001;
/// Attack duration in seconds.
const ATTACK_SECS: f64 = 0.005;
/// End of the decay ramp in seconds.
const DECAY_END_SECS: f64 = 0.12;
/// Total voice lifetime in seconds.
pub const CLICK_SECS: f64 = 0.14;

/// A fire-and-forget click: 1200 Hz sine under a fast exponential attack
/// and exponential decay. The voice ends on its own after 140 ms.
#[derive(Debug, Clone)]
pub struct ClickVoice {
    oscillator: SineOscillator,
    sample_rate: f64,
    /// Samples generated so far.
    position: usize,
    total_samples: usize,
}

impl ClickVoice {
    pub fn new(sample_rate: f64) -> Self {
        ClickVoice {
            oscillator: SineOscillator::new(CLICK_FREQ, sample_rate),
            sample_rate,
            position: 0,
            total_samples: (CLICK_SECS * sample_rate) as usize,
        }
    }

    /// Envelope level at time `t` seconds: exponential ramp from the floor
    /// to the peak over the attack, then exponential decay.
    fn envelope_at(&self, t: f64) -> f64 {
        if t < ATTACK_SECS {
            exp_ramp(ATTACK_FLOOR, PEAK_LEVEL, t / ATTACK_SECS)
        } else if t < DECAY_END_SECS {
            let u = (t - ATTACK_SECS) / (DECAY_END_SECS - ATTACK_SECS);
            exp_ramp(PEAK_LEVEL, DECAY_FLOOR, u)
        } else {
            DECAY_FLOOR
        }
    }

    /// Generate the next sample; 0.0 once the voice has finished.
    pub fn next_sample(&mut self) -> f64 {
        if self.is_finished() {
            return 0.0;
        }
        let t = self.position as f64 / self.sample_rate;
        let sample = self.oscillator.next_sample() * self.envelope_at(t);
        self.position += 1;
        sample
    }

    /// Has the voice played out its full envelope?
    pub fn is_finished(&self) -> bool {
        self.position >= self.total_samples
    }
}

/// Exponential interpolation from `from` to `to` at fraction `u` in [0, 1],
/// matching WebAudio's `exponentialRampToValueAtTime` curve.
fn exp_ramp(from: f64, to: f64, u: f64) -> f64 {
    from * (to / from).powf(u)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peaks_at_end_of_attack() {
        let v = ClickVoice::new(44100.0);
        let peak = v.envelope_at(ATTACK_SECS);
        assert!(
            (peak - PEAK_LEVEL).abs() < 1e-9,
            "Envelope should hit {PEAK_LEVEL} at 5 ms, got {peak}"
        );
    }

    #[test]
    fn decays_to_floor() {
        let v = ClickVoice::new(44100.0);
        let tail = v.envelope_at(DECAY_END_SECS + 0.001);
        assert!(
            (tail - DECAY_FLOOR).abs() < 1e-9,
            "Envelope should sit at {DECAY_FLOOR} after 120 ms, got {tail}"
        );
    }

    #[test]
    fn envelope_never_exceeds_peak() {
        let v = ClickVoice::new(44100.0);
        for n in 0..6174 {
            let t = n as f64 / 44100.0;
            let level = v.envelope_at(t);
            assert!(
                level <= PEAK_LEVEL + 1e-12,
                "Envelope above peak at t={t}: {level}"
            );
        }
    }

    #[test]
    fn finishes_after_140ms() {
        let mut v = ClickVoice::new(44100.0);
        let expected = (CLICK_SECS * 44100.0) as usize;
        let mut n = 0;
        while !v.is_finished() {
            v.next_sample();
            n += 1;
            assert!(n <= expected, "Voice ran past its lifetime");
        }
        assert_eq!(n, expected);
        assert_eq!(v.next_sample(), 0.0, "Finished voice must be silent");
    }

    #[test]
    fn produces_audible_output() {
        let mut v = ClickVoice::new(44100.0);
        let mut max = 0.0_f64;
        while !v.is_finished() {
            max = max.max(v.next_sample().abs());
        }
        assert!(max > 0.05, "Click should be audible, peak was {max}");
        assert!(max <= PEAK_LEVEL, "Click peak {max} above envelope peak");
    }
}
