//! Demo login gate.
//!
//! This is NOT a security boundary: the secret is a compile-time constant
//! shipped to every client, exactly like the original. It gates the demo
//! panel behind a magic string and nothing more. There is no lockout, no
//! rate limiting, and no attempt counting.

/// The access key the panel ships with.
pub const ACCESS_KEY: &str = "KEY-LIVECHULATRUNG1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Granted,
    Denied,
}

/// Compares trimmed input against the fixed key and latches open on match.
#[derive(Debug, Default)]
pub struct LoginGate {
    unlocked: bool,
}

impl LoginGate {
    pub fn new() -> Self {
        LoginGate::default()
    }

    /// Check one attempt. Whitespace around the input is ignored. A correct
    /// key on an already-unlocked gate still returns `Granted`; idempotence
    /// of the follow-on effects is the caller's concern.
    pub fn attempt(&mut self, input: &str) -> LoginOutcome {
        if input.trim() == ACCESS_KEY {
            self.unlocked = true;
            LoginOutcome::Granted
        } else {
            LoginOutcome::Denied
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}
