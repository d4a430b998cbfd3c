//! Ambient background tone — a slow vibrato drone.

use super::oscillator::SineOscillator;

/// Carrier frequency in Hz.
pub const CARRIER_FREQ: f64 = 220.0;
/// Vibrato rate in Hz.
pub const LFO_FREQ: f64 = 0.12;
/// Vibrato depth in Hz (peak deviation from the carrier frequency).
pub const VIBRATO_DEPTH: f64 = 20.0;
/// Gain of the ambient bus feeding the master output.
pub const AMBIENT_BUS_GAIN: f64 = 0.02;

/// The looping ambient tone: a 220 Hz sine carrier whose frequency is
/// modulated ±20 Hz by a 0.12 Hz LFO. Runs until dropped.
#[derive(Debug, Clone)]
pub struct AmbientTone {
    carrier: SineOscillator,
    lfo: SineOscillator,
}

impl AmbientTone {
    pub fn new(sample_rate: f64) -> Self {
        AmbientTone {
            carrier: SineOscillator::new(CARRIER_FREQ, sample_rate),
            lfo: SineOscillator::new(LFO_FREQ, sample_rate),
        }
    }

    /// Generate the next sample, already scaled by the ambient bus gain.
    pub fn next_sample(&mut self) -> f64 {
        let modulation = self.lfo.next_sample() * VIBRATO_DEPTH;
        self.carrier.set_frequency(CARRIER_FREQ + modulation);
        self.carrier.next_sample() * AMBIENT_BUS_GAIN
    }

    /// Instantaneous carrier frequency, for inspection.
    pub fn carrier_frequency(&self) -> f64 {
        self.carrier.frequency()
    }
}
