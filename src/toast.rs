//! Toast scheduler — transient notifications as a timer queue.
//!
//! The browser original leaned on two fire-and-forget `setTimeout`s per
//! message. Here each toast carries explicit fade/remove deadlines and the
//! host drives `tick(now_ms)`, applying the transitions it gets back. That
//! keeps the lifecycle testable without a timer runtime.

use serde::Serialize;

/// Delay before a toast starts its fade-out transition.
pub const FADE_AFTER_MS: u64 = 2800;
/// Delay before a toast is removed outright.
pub const REMOVE_AFTER_MS: u64 = 3600;

pub type ToastId = u64;

/// One visible toast. `success` selects the accent color on the host side.
#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub text: String,
    pub success: bool,
    pub shown_at_ms: u64,
    /// Whether the fade transition has been emitted.
    #[serde(skip)]
    fading: bool,
}

/// A lifecycle transition the host must apply to its toast elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ToastEvent {
    /// Begin the fade/slide-out transition.
    Fade(ToastId),
    /// Remove the element from the container.
    Remove(ToastId),
}

/// The toast queue. Multiple toasts may be visible concurrently; there is
/// no cap and no deduplication.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: ToastId,
}

impl ToastQueue {
    pub fn new() -> Self {
        ToastQueue::default()
    }

    /// Show a new toast; returns its id.
    pub fn push(&mut self, text: impl Into<String>, success: bool, now_ms: u64) -> ToastId {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            text: text.into(),
            success,
            shown_at_ms: now_ms,
            fading: false,
        });
        id
    }

    /// Advance the queue to `now_ms`. Each toast emits `Fade` once at
    /// +2.8 s and `Remove` once at +3.6 s, then leaves the queue.
    pub fn tick(&mut self, now_ms: u64) -> Vec<ToastEvent> {
        let mut events = Vec::new();
        for toast in &mut self.toasts {
            if !toast.fading && now_ms >= toast.shown_at_ms + FADE_AFTER_MS {
                toast.fading = true;
                events.push(ToastEvent::Fade(toast.id));
            }
        }
        self.toasts.retain(|t| {
            if now_ms >= t.shown_at_ms + REMOVE_AFTER_MS {
                events.push(ToastEvent::Remove(t.id));
                false
            } else {
                true
            }
        });
        events
    }

    /// Toasts still on screen, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
