//! Panel controller — owns all mutable panel state and wires the pieces
//! together: toggle store, login gate, toast queue, audio engine, and the
//! cosmetic visual flags.
//!
//! The controller never touches presentation. Every operation mutates state
//! and queues effects (toasts, sounds); the host re-renders from
//! [`StatusSummary`] and the visible toast list after each call.

use serde::{Deserialize, Serialize};

use crate::audio::engine::AudioEngine;
use crate::error::PanelError;
use crate::gate::{LoginGate, LoginOutcome};
use crate::state::ToggleState;
use crate::toast::{Toast, ToastEvent, ToastId, ToastQueue};

/// One switch in the panel: its wire key and the label shown to the user.
/// The host builds these from its markup, in DOM order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub key: String,
    pub label: String,
}

/// User-facing strings. Hosts that render in another language replace the
/// whole struct; the defaults are English.
#[derive(Debug, Clone)]
pub struct Messages {
    pub enabled: String,
    pub disabled: String,
    pub reset_done: String,
    pub export_ok: String,
    pub export_fail: String,
    pub import_ok: String,
    pub import_fail: String,
    pub login_ok: String,
    pub login_fail: String,
    pub demo: String,
    pub help: String,
}

impl Default for Messages {
    fn default() -> Self {
        Messages {
            enabled: "enabled".to_string(),
            disabled: "disabled".to_string(),
            reset_done: "All features reset".to_string(),
            export_ok: "State copied to clipboard".to_string(),
            export_fail: "Could not copy".to_string(),
            import_ok: "State restored".to_string(),
            import_fail: "Invalid JSON".to_string(),
            login_ok: "Unlocked!".to_string(),
            login_fail: "Wrong key — please try again".to_string(),
            demo: "Test notification — OK".to_string(),
            help: "Guide:\n- Enter the correct key to open the panel.\n\
                   - Flip switches to enable features.\n\
                   - Reset All turns everything off.\n\
                   - Export/Import to back up the state."
                .to_string(),
        }
    }
}

/// Summary badge: Online while at least one feature is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusBadge {
    Online,
    Idle,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusRow {
    pub key: String,
    pub label: String,
    pub on: bool,
}

/// Everything the host needs to redraw the status column.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSummary {
    pub badge: StatusBadge,
    pub active_count: usize,
    pub rows: Vec<StatusRow>,
}

/// Result of a toggle: the new value plus whether the host should run the
/// scale-pulse animation (only on the off→on transition).
#[derive(Debug, Clone, Serialize)]
pub struct ToggleOutcome {
    pub key: String,
    pub on: bool,
    pub pulse: bool,
}

/// The three cosmetic checkboxes. The host mirrors these onto its optional
/// particle-effects collaborator; when that object is absent the flags are
/// stored but have no visual effect.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct VisualToggles {
    pub particles: bool,
    pub snow: bool,
    pub rainbow: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    Particles,
    Snow,
    Rainbow,
}

pub struct PanelController {
    features: Vec<Feature>,
    state: ToggleState,
    gate: LoginGate,
    toasts: ToastQueue,
    engine: AudioEngine,
    messages: Messages,
    visuals: VisualToggles,
}

impl PanelController {
    pub fn new(features: Vec<Feature>, sample_rate: f64) -> Self {
        let state = ToggleState::new(features.iter().map(|f| f.key.clone()));
        PanelController {
            features,
            state,
            gate: LoginGate::new(),
            toasts: ToastQueue::new(),
            engine: AudioEngine::new(sample_rate),
            messages: Messages::default(),
            visuals: VisualToggles::default(),
        }
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.features
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.label.as_str())
            .unwrap_or(key)
    }

    /// Flip one switch: click sound, toast describing the new state, and a
    /// pulse hint for the off→on transition.
    pub fn toggle(&mut self, key: &str, now_ms: u64) -> Result<ToggleOutcome, PanelError> {
        let on = self.state.toggle(key)?;
        self.engine.click();
        let word = if on {
            &self.messages.enabled
        } else {
            &self.messages.disabled
        };
        let text = format!("{} {}", self.label(key), word);
        self.toasts.push(text, on, now_ms);
        Ok(ToggleOutcome {
            key: key.to_string(),
            on,
            pulse: on,
        })
    }

    /// Turn everything off: one click, one confirmation toast.
    pub fn reset_all(&mut self, now_ms: u64) {
        self.state.reset_all();
        self.engine.click();
        self.toasts
            .push(self.messages.reset_done.clone(), true, now_ms);
    }

    /// Serialize the current state for the host's clipboard write. The write
    /// itself is asynchronous on the host side; its continuation reports
    /// back through [`export_finished`](Self::export_finished).
    pub fn export_state(&self) -> String {
        self.state.export_json()
    }

    /// Continuation of the clipboard write: emits the success/failure toast.
    pub fn export_finished(&mut self, ok: bool, now_ms: u64) {
        let text = if ok {
            self.messages.export_ok.clone()
        } else {
            self.messages.export_fail.clone()
        };
        self.toasts.push(text, ok, now_ms);
    }

    /// Restore a pasted snapshot. On a parse failure the state is untouched
    /// and a failure toast is shown; the error is also returned for hosts
    /// that want details.
    pub fn import_state(&mut self, text: &str, now_ms: u64) -> Result<(), PanelError> {
        match self.state.import_json(text) {
            Ok(()) => {
                self.toasts
                    .push(self.messages.import_ok.clone(), true, now_ms);
                Ok(())
            }
            Err(e) => {
                self.toasts
                    .push(self.messages.import_fail.clone(), false, now_ms);
                Err(e)
            }
        }
    }

    /// One login attempt. Granted: ambient audio starts (idempotently) and a
    /// success toast is shown; the host reveals the panel. Denied: click
    /// sound plus failure toast; the host clears and refocuses the input.
    pub fn attempt_login(&mut self, input: &str, now_ms: u64) -> LoginOutcome {
        match self.gate.attempt(input) {
            LoginOutcome::Granted => {
                self.engine.start_music();
                self.toasts
                    .push(self.messages.login_ok.clone(), true, now_ms);
                LoginOutcome::Granted
            }
            LoginOutcome::Denied => {
                self.engine.click();
                self.toasts
                    .push(self.messages.login_fail.clone(), false, now_ms);
                LoginOutcome::Denied
            }
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.gate.is_unlocked()
    }

    /// Digit shortcuts: '1', '2', '3' toggle the first three switches in
    /// panel order. Anything else is ignored, as is a digit with no switch.
    pub fn handle_digit_shortcut(
        &mut self,
        digit: char,
        now_ms: u64,
    ) -> Option<ToggleOutcome> {
        let index = match digit {
            '1' => 0,
            '2' => 1,
            '3' => 2,
            _ => return None,
        };
        let key = self.state.keys().nth(index)?.to_string();
        self.toggle(&key, now_ms).ok()
    }

    /// Snapshot for the status column: badge, active count, one row per
    /// switch in panel order.
    pub fn status(&self) -> StatusSummary {
        let active_count = self.state.active_count();
        StatusSummary {
            badge: if active_count > 0 {
                StatusBadge::Online
            } else {
                StatusBadge::Idle
            },
            active_count,
            rows: self
                .state
                .iter()
                .map(|(key, on)| StatusRow {
                    key: key.to_string(),
                    label: self.label(key).to_string(),
                    on,
                })
                .collect(),
        }
    }

    pub fn demo_notification(&mut self, now_ms: u64) -> ToastId {
        self.toasts.push(self.messages.demo.clone(), true, now_ms)
    }

    pub fn help_text(&self) -> &str {
        &self.messages.help
    }

    pub fn set_visual(&mut self, kind: VisualKind, enabled: bool) {
        match kind {
            VisualKind::Particles => self.visuals.particles = enabled,
            VisualKind::Snow => self.visuals.snow = enabled,
            VisualKind::Rainbow => self.visuals.rainbow = enabled,
        }
    }

    pub fn visuals(&self) -> VisualToggles {
        self.visuals
    }

    /// Advance toast timers; returns the transitions the host must apply.
    pub fn tick(&mut self, now_ms: u64) -> Vec<ToastEvent> {
        self.toasts.tick(now_ms)
    }

    pub fn visible_toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.visible()
    }

    /// Fill `out` with the next block of audio for worklet playback.
    pub fn render_audio(&mut self, out: &mut [f32]) {
        self.engine.render(out);
    }

    pub fn is_music_playing(&self) -> bool {
        self.engine.is_music_playing()
    }

    /// Stop the ambient tone (e.g. the host's mute control).
    pub fn stop_music(&mut self) {
        self.engine.stop_music();
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &AudioEngine {
        &self.engine
    }
}
