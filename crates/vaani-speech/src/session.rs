use crate::catalog::VoiceCatalog;
use crate::classifier::SegmentClassifier;
use crate::config::{SessionConfig, SpeakOptions};
use crate::engine::{EngineEvent, EngineEventSink, SpeechEngine, UtteranceEvent};
use crate::error::{ConfigResult, SessionError};
use crate::plan::build_plan;
use crate::types::{PlaybackUnit, SessionState, UtteranceId, VoiceDescriptor};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Playback phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackPhase {
    Idle,
    Speaking,
    Paused,
}

/// The unit currently handed to the engine.
#[derive(Debug, Clone)]
pub struct ActiveUtterance {
    pub id: UtteranceId,
    pub unit: PlaybackUnit,
}

/// Speaks mixed-script text through one engine, one unit at a time.
///
/// Control calls and engine callbacks are both transitions on the same state.
/// Callbacks arrive through the channel handed to the engine at construction and
/// are applied by [`process_events`](Self::process_events),
/// [`run_until_idle`](Self::run_until_idle) or directly via
/// [`handle_event`](Self::handle_event).
pub struct SpeechSession<E: SpeechEngine> {
    engine: E,
    config: SessionConfig,
    classifier: SegmentClassifier,
    catalog: VoiceCatalog,
    events: mpsc::UnboundedReceiver<EngineEvent>,
    supported: bool,
    phase: PlaybackPhase,
    queue: VecDeque<PlaybackUnit>,
    active: Option<ActiveUtterance>,
    generation: u64,
    next_index: usize,
    error: Option<SessionError>,
}

impl<E: SpeechEngine> SpeechSession<E> {
    pub fn new(engine: E, config: SessionConfig) -> ConfigResult<Self> {
        config.validate()?;
        let classifier = SegmentClassifier::new(config.secondary_script)?;
        Ok(Self::with_classifier(engine, config, classifier))
    }

    /// Session with the default configuration (English + Hindi).
    pub fn with_defaults(engine: E) -> Self {
        Self::with_classifier(
            engine,
            SessionConfig::default(),
            SegmentClassifier::devanagari(),
        )
    }

    fn with_classifier(mut engine: E, config: SessionConfig, classifier: SegmentClassifier) -> Self {
        let (sink, events) = EngineEventSink::channel();
        let supported = engine.is_available();
        let mut catalog = VoiceCatalog::default();
        let mut error = None;

        if supported {
            catalog.replace(engine.voices());
            engine.subscribe(sink);
            debug!("Speech engine available with {} voice(s)", catalog.len());
        } else {
            warn!("Speech engine is not available; session controls are disabled");
            error = Some(SessionError::CapabilityUnavailable);
        }

        Self {
            engine,
            config,
            classifier,
            catalog,
            events,
            supported,
            phase: PlaybackPhase::Idle,
            queue: VecDeque::new(),
            active: None,
            generation: 0,
            next_index: 0,
            error,
        }
    }

    /// Speak `text`, replacing anything currently playing.
    pub fn speak(&mut self, text: &str, options: &SpeakOptions) {
        if !self.supported {
            self.error = Some(SessionError::CapabilityUnavailable);
            return;
        }
        if text.trim().is_empty() {
            self.error = Some(SessionError::EmptyInput);
            return;
        }

        let plan = self.plan(text, options);
        if plan.is_empty() {
            debug!("Nothing to speak after segmentation");
            return;
        }

        self.cancel_sequence();
        self.error = None;
        info!(
            "Speaking {} unit(s), generation {}",
            plan.len(),
            self.generation
        );
        self.queue = plan.into();
        self.phase = PlaybackPhase::Speaking;
        self.dispatch_next();
    }

    /// Units `speak` would dispatch for `text`, without touching the engine.
    pub fn plan(&self, text: &str, options: &SpeakOptions) -> Vec<PlaybackUnit> {
        build_plan(&self.classifier, &self.catalog, &self.config, text, options)
    }

    pub fn pause(&mut self) {
        if !self.supported || self.phase != PlaybackPhase::Speaking {
            return;
        }
        self.engine.pause();
        self.phase = PlaybackPhase::Paused;
    }

    pub fn resume(&mut self) {
        if !self.supported || self.phase != PlaybackPhase::Paused {
            return;
        }
        self.engine.resume();
        self.phase = PlaybackPhase::Speaking;
    }

    /// Cancel the engine and discard every queued unit.
    pub fn stop(&mut self) {
        if !self.supported {
            return;
        }
        if self.phase != PlaybackPhase::Idle {
            info!("Stopping speech, {} unit(s) discarded", self.queue.len());
        }
        self.cancel_sequence();
        self.phase = PlaybackPhase::Idle;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Apply every callback already delivered by the engine.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Wait for engine callbacks until the session is idle.
    ///
    /// Does not return while paused unless something else resumes or stops the
    /// session through the engine.
    pub async fn run_until_idle(&mut self) {
        while self.phase != PlaybackPhase::Idle {
            match self.events.recv().await {
                Some(event) => self.handle_event(event),
                None => {
                    warn!("Speech engine dropped its event sink mid-sequence");
                    self.lose_capability();
                }
            }
        }
    }

    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::VoicesChanged => self.refresh_voices(),
            EngineEvent::Unavailable => self.lose_capability(),
            EngineEvent::Utterance { id, event } => {
                if self.active_id() != Some(id) {
                    debug!("Ignoring {event:?} for stale utterance {id}");
                    return;
                }
                self.handle_utterance_event(event);
            }
        }
    }

    fn handle_utterance_event(&mut self, event: UtteranceEvent) {
        match event {
            UtteranceEvent::Start => {
                if self.phase == PlaybackPhase::Paused {
                    self.phase = PlaybackPhase::Speaking;
                }
            }
            UtteranceEvent::End => self.complete_active(),
            UtteranceEvent::Error(message) => {
                warn!("Speech engine failed a unit: {message}");
                self.error = Some(SessionError::UnitPlayback(message));
                self.complete_active();
            }
            UtteranceEvent::Pause => {
                if self.phase == PlaybackPhase::Speaking {
                    self.phase = PlaybackPhase::Paused;
                }
            }
            UtteranceEvent::Resume => {
                if self.phase == PlaybackPhase::Paused {
                    self.phase = PlaybackPhase::Speaking;
                }
            }
        }
    }

    fn complete_active(&mut self) {
        if let Some(active) = self.active.take() {
            debug!("Utterance {} finished", active.id);
        }
        self.dispatch_next();
    }

    fn dispatch_next(&mut self) {
        let Some(unit) = self.queue.pop_front() else {
            self.active = None;
            self.phase = PlaybackPhase::Idle;
            debug!("Speech queue exhausted");
            return;
        };

        let id = UtteranceId::new(self.generation, self.next_index);
        self.next_index += 1;
        debug!(
            "Dispatching utterance {id} ({}, {} chars, voice {:?})",
            unit.lang,
            unit.text.chars().count(),
            unit.voice.as_ref().map(|v| v.name.as_str())
        );
        self.engine.speak(id, &unit);
        self.active = Some(ActiveUtterance { id, unit });
    }

    fn cancel_sequence(&mut self) {
        self.engine.cancel();
        self.queue.clear();
        self.active = None;
        self.generation += 1;
        self.next_index = 0;
    }

    fn refresh_voices(&mut self) {
        if !self.supported {
            return;
        }
        self.catalog.replace(self.engine.voices());
        debug!("Voice catalog refreshed: {} voice(s)", self.catalog.len());
    }

    fn lose_capability(&mut self) {
        if self.supported {
            warn!("Speech engine became unavailable");
            self.engine.unsubscribe();
        }
        self.supported = false;
        self.queue.clear();
        self.active = None;
        self.generation += 1;
        self.next_index = 0;
        self.phase = PlaybackPhase::Idle;
        self.error = Some(SessionError::CapabilityUnavailable);
    }

    fn active_id(&self) -> Option<UtteranceId> {
        self.active.as_ref().map(|active| active.id)
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            speaking: self.speaking(),
            paused: self.paused(),
            error: self.error(),
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn speaking(&self) -> bool {
        self.phase != PlaybackPhase::Idle
    }

    pub fn paused(&self) -> bool {
        self.phase == PlaybackPhase::Paused
    }

    /// Message of the latest error.
    pub fn error(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn voices(&self) -> Arc<[VoiceDescriptor]> {
        self.catalog.snapshot()
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn active(&self) -> Option<&ActiveUtterance> {
        self.active.as_ref()
    }

    /// Units still waiting behind the active one.
    pub fn pending_units(&self) -> usize {
        self.queue.len()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

impl<E: SpeechEngine> Drop for SpeechSession<E> {
    fn drop(&mut self) {
        if self.supported {
            self.engine.unsubscribe();
        }
    }
}
