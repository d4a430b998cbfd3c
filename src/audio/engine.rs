//! Audio Engine — mixes click one-shots and the ambient tone into
//! f32 sample blocks for AudioWorklet playback.
//!
//! Initialization is an explicit state machine: the engine starts
//! `Uninitialized` and `ensure()` moves it to `Ready` exactly once,
//! mirroring the lazy-on-first-gesture audio context of the browser host.

use super::ambient::AmbientTone;
use super::click::ClickVoice;

/// Master output gain applied to the mixed signal.
pub const MASTER_GAIN: f64 = 0.9;

/// Engine lifecycle. `Ready` owns the live mixing bus.
#[derive(Debug)]
enum EngineState {
    Uninitialized,
    Ready(Bus),
}

/// The live mixing bus: active one-shot clicks plus at most one ambient tone.
#[derive(Debug, Default)]
struct Bus {
    clicks: Vec<ClickVoice>,
    ambient: Option<AmbientTone>,
}

#[derive(Debug)]
pub struct AudioEngine {
    sample_rate: f64,
    state: EngineState,
}

impl AudioEngine {
    pub fn new(sample_rate: f64) -> Self {
        AudioEngine {
            sample_rate,
            state: EngineState::Uninitialized,
        }
    }

    /// Idempotent initialization. First call creates the mixing bus;
    /// subsequent calls are no-ops.
    pub fn ensure(&mut self) {
        if matches!(self.state, EngineState::Uninitialized) {
            self.state = EngineState::Ready(Bus::default());
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    fn bus_mut(&mut self) -> &mut Bus {
        self.ensure();
        match &mut self.state {
            EngineState::Ready(bus) => bus,
            EngineState::Uninitialized => unreachable!("ensure() just ran"),
        }
    }

    /// Fire a one-shot click. The voice is reaped automatically once its
    /// envelope completes.
    pub fn click(&mut self) {
        let sample_rate = self.sample_rate;
        self.bus_mut().clicks.push(ClickVoice::new(sample_rate));
    }

    /// Start the ambient tone. No-op if it is already running.
    pub fn start_music(&mut self) {
        let sample_rate = self.sample_rate;
        let bus = self.bus_mut();
        if bus.ambient.is_none() {
            bus.ambient = Some(AmbientTone::new(sample_rate));
        }
    }

    /// Stop the ambient tone. No-op if nothing is running.
    pub fn stop_music(&mut self) {
        if let EngineState::Ready(bus) = &mut self.state {
            bus.ambient = None;
        }
    }

    pub fn is_music_playing(&self) -> bool {
        matches!(&self.state, EngineState::Ready(bus) if bus.ambient.is_some())
    }

    /// Number of click voices still sounding.
    pub fn active_clicks(&self) -> usize {
        match &self.state {
            EngineState::Ready(bus) => bus.clicks.len(),
            EngineState::Uninitialized => 0,
        }
    }

    /// Fill `out` with the next block of mono samples. An uninitialized
    /// engine renders silence.
    pub fn render(&mut self, out: &mut [f32]) {
        let EngineState::Ready(bus) = &mut self.state else {
            out.fill(0.0);
            return;
        };

        for slot in out.iter_mut() {
            let mut sum = 0.0;
            if let Some(tone) = &mut bus.ambient {
                sum += tone.next_sample();
            }
            for voice in bus.clicks.iter_mut() {
                sum += voice.next_sample();
            }
            *slot = soft_clip(sum * MASTER_GAIN) as f32;
        }
        bus.clicks.retain(|v| !v.is_finished());
    }
}

/// Soft clipper using tanh to prevent harsh digital clipping.
fn soft_clip(x: f64) -> f64 {
    x.tanh()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized_and_silent() {
        let mut engine = AudioEngine::new(44100.0);
        assert!(!engine.is_ready());
        let mut block = [1.0_f32; 128];
        engine.render(&mut block);
        assert!(block.iter().all(|&s| s == 0.0));
        assert!(!engine.is_ready(), "Rendering must not initialize");
    }

    #[test]
    fn ensure_is_idempotent() {
        let mut engine = AudioEngine::new(44100.0);
        engine.ensure();
        assert!(engine.is_ready());
        engine.start_music();
        engine.ensure();
        assert!(engine.is_music_playing(), "Re-ensure must not reset the bus");
    }

    #[test]
    fn start_music_at_most_once() {
        let mut engine = AudioEngine::new(44100.0);
        engine.start_music();
        assert!(engine.is_music_playing());

        // Advance the tone, then confirm a second start does not restart it.
        let mut block = [0.0_f32; 256];
        engine.render(&mut block);
        let advanced = block[255];
        engine.start_music();
        engine.render(&mut block);
        assert!(
            block[0] != 0.0 || advanced != 0.0,
            "Ambient tone should keep running"
        );
        assert!(engine.is_music_playing());
    }

    #[test]
    fn stop_music_is_benign_when_stopped() {
        let mut engine = AudioEngine::new(44100.0);
        engine.stop_music();
        assert!(!engine.is_music_playing());
        engine.start_music();
        engine.stop_music();
        engine.stop_music();
        assert!(!engine.is_music_playing());
    }

    #[test]
    fn clicks_are_reaped() {
        let mut engine = AudioEngine::new(44100.0);
        engine.click();
        engine.click();
        assert_eq!(engine.active_clicks(), 2);

        // 0.14 s at 44.1 kHz is 6174 samples; render past that.
        let mut block = vec![0.0_f32; 8192];
        engine.render(&mut block);
        assert_eq!(engine.active_clicks(), 0, "Finished clicks should be reaped");
        assert!(
            block.iter().any(|&s| s.abs() > 0.01),
            "Clicks should be audible in the block"
        );
    }

    #[test]
    fn output_stays_in_range() {
        let mut engine = AudioEngine::new(44100.0);
        engine.start_music();
        for _ in 0..8 {
            engine.click();
        }
        let mut block = vec![0.0_f32; 44100];
        engine.render(&mut block);
        assert!(
            block.iter().all(|&s| (-1.0..=1.0).contains(&s)),
            "Soft clip should keep output within [-1, 1]"
        );
    }
}
