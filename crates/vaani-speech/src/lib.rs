//! # Vaani Speech
//!
//! Reads mixed-script text aloud through a pluggable speech engine, switching
//! voice and language at every script boundary.
//!
//! ## Architecture
//!
//! - `SegmentClassifier`: splits text into ordered runs of primary (Latin-style)
//!   and secondary (Devanagari by default) script
//! - `VoiceCatalog`: the engine's voice list, replaced atomically on refresh
//! - `build_plan`: binds each segment to a voice, language, rate, pitch and volume
//! - `SpeechEngine`: capability trait implemented by the actual renderer
//! - `SpeechSession`: dispatches one unit at a time and folds engine callbacks into
//!   `speaking` / `paused` / `error` state
//!
//! Engine callbacks travel through an [`EngineEventSink`] and are applied by the
//! session, so an engine may report them synchronously from inside `speak`.
//!
//! ## Example
//!
//! ```rust
//! use vaani_speech::{
//!     EngineEventSink, PlaybackUnit, SpeakOptions, SpeechEngine, SpeechSession,
//!     UtteranceId, VoiceDescriptor,
//! };
//!
//! struct PrintEngine {
//!     sink: Option<EngineEventSink>,
//! }
//!
//! impl SpeechEngine for PrintEngine {
//!     fn is_available(&self) -> bool {
//!         true
//!     }
//!
//!     fn voices(&self) -> Vec<VoiceDescriptor> {
//!         vec![VoiceDescriptor::new("Lekha", "hi-IN")]
//!     }
//!
//!     fn subscribe(&mut self, sink: EngineEventSink) {
//!         self.sink = Some(sink);
//!     }
//!
//!     fn speak(&mut self, id: UtteranceId, unit: &PlaybackUnit) {
//!         println!("[{}] {}", unit.lang, unit.text);
//!         if let Some(sink) = &self.sink {
//!             sink.started(id);
//!             sink.ended(id);
//!         }
//!     }
//!
//!     fn pause(&mut self) {}
//!     fn resume(&mut self) {}
//!     fn cancel(&mut self) {}
//! }
//!
//! let mut session = SpeechSession::with_defaults(PrintEngine { sink: None });
//! session.speak("नमस्ते! Hello", &SpeakOptions::new());
//! while session.speaking() {
//!     session.process_events();
//! }
//! assert!(session.error().is_none());
//! ```

mod catalog;
mod classifier;
pub mod config;
mod engine;
pub mod error;
mod plan;
mod session;
pub mod types;

pub use catalog::VoiceCatalog;
pub use classifier::{SegmentClassifier, classify};
pub use config::{ScriptRange, SessionConfig, SpeakOptions};
pub use engine::{EngineEvent, EngineEventSink, SpeechEngine, UtteranceEvent};
pub use error::{ConfigError, ConfigResult, SessionError};
pub use plan::build_plan;
pub use session::{ActiveUtterance, PlaybackPhase, SpeechSession};
pub use types::{
    PlaybackUnit, Script, Segment, SessionState, UtteranceId, VoiceDescriptor, primary_subtag,
};
