//! Test doubles for vaani crates.

mod engine;

pub use engine::{CallLog, EngineCall, MockSpeechEngine, bilingual_voices};
