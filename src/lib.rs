pub mod audio;
pub mod error;
pub mod gate;
pub mod panel;
pub mod state;
pub mod toast;

use wasm_bindgen::prelude::*;

use crate::audio::click::CLICK_SECS;
use crate::audio::engine::AudioEngine;
use crate::gate::LoginOutcome;
use crate::panel::{Feature, PanelController, VisualKind};

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the switchboard-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: render a standalone click buffer (mono f32) for hosts that
/// play feedback through a plain AudioBuffer instead of the worklet.
#[wasm_bindgen]
pub fn render_click_samples(sample_rate: u32) -> Vec<f32> {
    let mut engine = AudioEngine::new(sample_rate as f64);
    engine.click();
    let mut out = vec![0.0_f32; (CLICK_SECS * sample_rate as f64) as usize];
    engine.render(&mut out);
    out
}

/// WASM-exposed panel controller. The host constructs one from its switch
/// markup, forwards every UI event to it, and re-renders from `status()`,
/// `toasts()` and the `tick()` transitions. Timestamps are host milliseconds
/// (`performance.now()`).
#[wasm_bindgen]
pub struct Panel {
    inner: PanelController,
}

#[wasm_bindgen]
impl Panel {
    /// `features` is a JS array of `{ key, label }` objects in DOM order.
    #[wasm_bindgen(constructor)]
    pub fn new(features: JsValue, sample_rate: f64) -> Result<Panel, JsValue> {
        let features: Vec<Feature> = serde_wasm_bindgen::from_value(features)
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        Ok(Panel {
            inner: PanelController::new(features, sample_rate),
        })
    }

    /// Flip one switch; returns `{ key, on, pulse }`.
    pub fn toggle(&mut self, key: &str, now_ms: f64) -> Result<JsValue, JsValue> {
        let outcome = self
            .inner
            .toggle(key, now_ms as u64)
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    pub fn reset_all(&mut self, now_ms: f64) {
        self.inner.reset_all(now_ms as u64);
    }

    /// Formatted JSON for the host's clipboard write.
    pub fn export_state(&self) -> String {
        self.inner.export_state()
    }

    /// Report the clipboard write result back; emits the outcome toast.
    pub fn export_finished(&mut self, ok: bool, now_ms: f64) {
        self.inner.export_finished(ok, now_ms as u64);
    }

    /// Returns an error (and emits the failure toast) on malformed JSON.
    pub fn import_state(&mut self, text: &str, now_ms: f64) -> Result<(), JsValue> {
        self.inner
            .import_state(text, now_ms as u64)
            .map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    /// Returns true when access is granted; the host then reveals the panel.
    pub fn attempt_login(&mut self, input: &str, now_ms: f64) -> bool {
        self.inner.attempt_login(input, now_ms as u64) == LoginOutcome::Granted
    }

    pub fn is_unlocked(&self) -> bool {
        self.inner.is_unlocked()
    }

    /// Digit shortcut ('1'..'3'); returns the toggle outcome or `undefined`.
    pub fn handle_digit_shortcut(&mut self, digit: char, now_ms: f64) -> Result<JsValue, JsValue> {
        match self.inner.handle_digit_shortcut(digit, now_ms as u64) {
            Some(outcome) => serde_wasm_bindgen::to_value(&outcome)
                .map_err(|e| JsValue::from_str(&format!("{e}"))),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// `{ badge, active_count, rows: [{ key, label, on }] }`.
    pub fn status(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.status())
            .map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    pub fn demo_notification(&mut self, now_ms: f64) {
        self.inner.demo_notification(now_ms as u64);
    }

    pub fn help_text(&self) -> String {
        self.inner.help_text().to_string()
    }

    /// `kind` is one of "particles", "snow", "rainbow"; anything else is
    /// ignored, matching the absent-collaborator behavior.
    pub fn set_visual(&mut self, kind: &str, enabled: bool) {
        let kind = match kind {
            "particles" => VisualKind::Particles,
            "snow" => VisualKind::Snow,
            "rainbow" => VisualKind::Rainbow,
            _ => return,
        };
        self.inner.set_visual(kind, enabled);
    }

    /// `{ particles, snow, rainbow }`.
    pub fn visuals(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.visuals())
            .map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    /// Advance toast timers; returns `[{ kind: "fade"|"remove", id }]`.
    pub fn tick(&mut self, now_ms: f64) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.tick(now_ms as u64))
            .map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    /// The toasts currently on screen, oldest first.
    pub fn toasts(&self) -> Result<JsValue, JsValue> {
        let visible: Vec<_> = self.inner.visible_toasts().collect();
        serde_wasm_bindgen::to_value(&visible).map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    /// Render the next mono block for AudioWorklet playback.
    pub fn render_audio(&mut self, len: usize) -> Vec<f32> {
        let mut out = vec![0.0_f32; len];
        self.inner.render_audio(&mut out);
        out
    }

    pub fn is_music_playing(&self) -> bool {
        self.inner.is_music_playing()
    }

    pub fn stop_music(&mut self) {
        self.inner.stop_music();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_buffer_covers_full_envelope() {
        let buf = render_click_samples(44100);
        assert_eq!(buf.len(), (CLICK_SECS * 44100.0) as usize);
        assert!(buf.iter().any(|&s| s.abs() > 0.01));
        // The tail sits at the envelope floor, effectively silent.
        let tail = buf[buf.len() - 1].abs();
        assert!(tail < 0.01, "Click should have decayed, tail was {tail}");
    }
}
