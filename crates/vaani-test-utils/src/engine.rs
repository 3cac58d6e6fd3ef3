use std::sync::{Arc, Mutex};
use vaani_speech::{EngineEventSink, PlaybackUnit, SpeechEngine, UtteranceId, VoiceDescriptor};

/// Every call a session made on the engine, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Speak(UtteranceId, PlaybackUnit),
    Pause,
    Resume,
    Cancel,
    Unsubscribe,
}

/// Call history shared between a mock engine and the test that owns it.
///
/// Clones see the same history, so a handle taken before the session is
/// dropped still shows what the session did on teardown.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<EngineCall>>>);

impl CallLog {
    fn push(&self, call: EngineCall) {
        self.0.lock().unwrap().push(call);
    }

    pub fn snapshot(&self) -> Vec<EngineCall> {
        self.0.lock().unwrap().clone()
    }

    pub fn contains(&self, call: &EngineCall) -> bool {
        self.0.lock().unwrap().contains(call)
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scripted speech engine for tests.
///
/// Records every call and only reports callbacks when told to, unless
/// `auto_complete` is set, in which case every unit starts and ends as soon as it
/// is spoken.
#[derive(Debug)]
pub struct MockSpeechEngine {
    pub available: bool,
    pub voices: Vec<VoiceDescriptor>,
    pub auto_complete: bool,
    sink: Option<EngineEventSink>,
    calls: CallLog,
    active: Option<UtteranceId>,
}

impl MockSpeechEngine {
    pub fn new(voices: Vec<VoiceDescriptor>) -> Self {
        Self {
            available: true,
            voices,
            auto_complete: false,
            sink: None,
            calls: CallLog::default(),
            active: None,
        }
    }

    /// Engine that reports itself absent.
    pub fn unavailable() -> Self {
        let mut engine = Self::new(Vec::new());
        engine.available = false;
        engine
    }

    pub fn with_auto_complete(mut self, auto_complete: bool) -> Self {
        self.auto_complete = auto_complete;
        self
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.snapshot()
    }

    /// Handle on the call history that outlives the engine.
    pub fn call_log(&self) -> CallLog {
        self.calls.clone()
    }

    pub fn spoken(&self) -> Vec<PlaybackUnit> {
        self.calls
            .snapshot()
            .into_iter()
            .filter_map(|call| match call {
                EngineCall::Speak(_, unit) => Some(unit),
                _ => None,
            })
            .collect()
    }

    pub fn spoken_texts(&self) -> Vec<String> {
        self.spoken().into_iter().map(|u| u.text).collect()
    }

    pub fn cancel_count(&self) -> usize {
        self.calls
            .snapshot()
            .iter()
            .filter(|call| matches!(call, EngineCall::Cancel))
            .count()
    }

    /// Utterance in flight, if any.
    pub fn active(&self) -> Option<UtteranceId> {
        self.active
    }

    pub fn is_subscribed(&self) -> bool {
        self.sink.is_some()
    }

    pub fn sink(&self) -> Option<&EngineEventSink> {
        self.sink.as_ref()
    }

    /// Report start then end for the active utterance.
    pub fn finish_active(&mut self) -> Option<UtteranceId> {
        let id = self.active.take()?;
        if let Some(sink) = &self.sink {
            sink.started(id);
            sink.ended(id);
        }
        Some(id)
    }

    /// Report start then an error for the active utterance.
    pub fn fail_active(&mut self, message: &str) -> Option<UtteranceId> {
        let id = self.active.take()?;
        if let Some(sink) = &self.sink {
            sink.started(id);
            sink.failed(id, message);
        }
        Some(id)
    }

    /// Replace the voice list and announce the change.
    pub fn announce_voices(&mut self, voices: Vec<VoiceDescriptor>) {
        self.voices = voices;
        if let Some(sink) = &self.sink {
            sink.voices_changed();
        }
    }

    pub fn report_unavailable(&mut self) {
        self.available = false;
        if let Some(sink) = &self.sink {
            sink.unavailable();
        }
    }
}

impl Default for MockSpeechEngine {
    fn default() -> Self {
        Self::new(bilingual_voices())
    }
}

impl SpeechEngine for MockSpeechEngine {
    fn is_available(&self) -> bool {
        self.available
    }

    fn voices(&self) -> Vec<VoiceDescriptor> {
        self.voices.clone()
    }

    fn subscribe(&mut self, sink: EngineEventSink) {
        self.sink = Some(sink);
    }

    fn unsubscribe(&mut self) {
        self.calls.push(EngineCall::Unsubscribe);
        self.sink = None;
    }

    fn speak(&mut self, id: UtteranceId, unit: &PlaybackUnit) {
        self.calls.push(EngineCall::Speak(id, unit.clone()));
        self.active = Some(id);
        if self.auto_complete {
            self.finish_active();
        }
    }

    fn pause(&mut self) {
        self.calls.push(EngineCall::Pause);
        if let (Some(sink), Some(id)) = (&self.sink, self.active) {
            sink.paused(id);
        }
    }

    fn resume(&mut self) {
        self.calls.push(EngineCall::Resume);
        if let (Some(sink), Some(id)) = (&self.sink, self.active) {
            sink.resumed(id);
        }
    }

    fn cancel(&mut self) {
        self.calls.push(EngineCall::Cancel);
        self.active = None;
    }
}

/// English and Hindi voices as a browser typically lists them.
pub fn bilingual_voices() -> Vec<VoiceDescriptor> {
    vec![
        VoiceDescriptor::new("Samantha", "en-US").with_default(true),
        VoiceDescriptor::new("Daniel", "en-GB"),
        VoiceDescriptor::new("Google हिन्दी", "hi-IN").with_local(false),
        VoiceDescriptor::new("Lekha", "hi-IN"),
    ]
}
