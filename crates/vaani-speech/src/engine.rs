use crate::types::{PlaybackUnit, UtteranceId, VoiceDescriptor};
use tokio::sync::mpsc;

/// Lifecycle callback for one dispatched unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtteranceEvent {
    Start,
    End,
    Error(String),
    Pause,
    Resume,
}

/// Everything an engine can report back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Utterance {
        id: UtteranceId,
        event: UtteranceEvent,
    },
    /// The voice list changed; the session re-reads `voices()`
    VoicesChanged,
    /// The engine went away and will not come back
    Unavailable,
}

/// Where an engine delivers its callbacks.
///
/// Sending never blocks. Events sent after the session is dropped are discarded.
#[derive(Debug, Clone)]
pub struct EngineEventSink {
    tx: mpsc::UnboundedSender<EngineEvent>,
}

impl EngineEventSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns false once the receiving session is gone.
    pub fn send(&self, event: EngineEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    pub fn started(&self, id: UtteranceId) -> bool {
        self.utterance(id, UtteranceEvent::Start)
    }

    pub fn ended(&self, id: UtteranceId) -> bool {
        self.utterance(id, UtteranceEvent::End)
    }

    pub fn failed(&self, id: UtteranceId, message: impl Into<String>) -> bool {
        self.utterance(id, UtteranceEvent::Error(message.into()))
    }

    pub fn paused(&self, id: UtteranceId) -> bool {
        self.utterance(id, UtteranceEvent::Pause)
    }

    pub fn resumed(&self, id: UtteranceId) -> bool {
        self.utterance(id, UtteranceEvent::Resume)
    }

    pub fn voices_changed(&self) -> bool {
        self.send(EngineEvent::VoicesChanged)
    }

    pub fn unavailable(&self) -> bool {
        self.send(EngineEvent::Unavailable)
    }

    fn utterance(&self, id: UtteranceId, event: UtteranceEvent) -> bool {
        self.send(EngineEvent::Utterance { id, event })
    }
}

/// Capability interface of an external speech engine.
///
/// The session keeps at most one unit in flight. An engine must report exactly one
/// terminal callback (`End` or `Error`) per unit it was asked to speak, unless the
/// unit is cancelled first.
pub trait SpeechEngine: Send {
    fn is_available(&self) -> bool;

    /// Current voice list. May be empty until the engine finishes loading.
    fn voices(&self) -> Vec<VoiceDescriptor>;

    /// Register the callback sink. Called once, when the session is created.
    fn subscribe(&mut self, sink: EngineEventSink);

    /// Drop the callback sink. Called when the session is dropped.
    fn unsubscribe(&mut self) {}

    /// Begin rendering one unit.
    fn speak(&mut self, id: UtteranceId, unit: &PlaybackUnit);

    fn pause(&mut self);

    fn resume(&mut self);

    /// Stop whatever is in flight without waiting for its callbacks.
    fn cancel(&mut self);
}

impl<E: SpeechEngine + ?Sized> SpeechEngine for Box<E> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn voices(&self) -> Vec<VoiceDescriptor> {
        (**self).voices()
    }

    fn subscribe(&mut self, sink: EngineEventSink) {
        (**self).subscribe(sink)
    }

    fn unsubscribe(&mut self) {
        (**self).unsubscribe()
    }

    fn speak(&mut self, id: UtteranceId, unit: &PlaybackUnit) {
        (**self).speak(id, unit)
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn resume(&mut self) {
        (**self).resume()
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }
}
