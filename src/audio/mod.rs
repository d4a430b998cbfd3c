//! Audio synthesis — Pure Rust, no sound assets.
//!
//! All sound in the panel is parametric synthesis: a short percussive click
//! for interaction feedback and a looping ambient tone with slow vibrato.
//! The same code powers WebAudio playback (via AudioWorklet + WASM) and the
//! native test suite.

pub mod ambient;
pub mod click;
pub mod engine;
pub mod oscillator;
