use serde::{Deserialize, Serialize};
use std::fmt;

/// Script class of a text segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    /// Default (Latin-style) text
    Primary,
    /// The designated alternate script (Devanagari by default)
    Secondary,
}

/// A maximal run of text classified into one script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Trimmed, never empty
    pub text: String,
    pub script: Script,
}

impl Segment {
    pub fn new(text: impl Into<String>, script: Script) -> Self {
        Self {
            text: text.into(),
            script,
        }
    }
}

/// A voice offered by the speech engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    /// Engine voice name (e.g., "Google हिन्दी")
    pub name: String,
    /// BCP-47 language tag (e.g., "hi-IN")
    pub lang: String,
    /// Whether the engine marks this voice as its default
    #[serde(default)]
    pub is_default: bool,
    /// Whether the voice renders locally rather than through a remote service
    #[serde(default = "default_local")]
    pub local: bool,
}

fn default_local() -> bool {
    true
}

impl VoiceDescriptor {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
            is_default: false,
            local: true,
        }
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    pub fn with_local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    /// Primary language subtag of this voice ("hi" for "hi-IN").
    pub fn primary_subtag(&self) -> &str {
        primary_subtag(&self.lang)
    }
}

impl fmt::Display for VoiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.lang)
    }
}

/// Primary subtag of a language tag. Accepts both `-` and `_` separators.
pub fn primary_subtag(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

/// One segment bound to everything the engine needs to render it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlaybackUnit {
    pub text: String,
    pub script: Script,
    /// Resolved voice; `None` leaves the choice to the engine default
    pub voice: Option<VoiceDescriptor>,
    /// Target language tag
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

/// Identifies one dispatched unit. The generation changes on every `speak` and
/// `stop`, so callbacks from a cancelled sequence never match the active unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtteranceId {
    pub generation: u64,
    pub index: usize,
}

impl UtteranceId {
    pub fn new(generation: u64, index: usize) -> Self {
        Self { generation, index }
    }
}

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.generation, self.index)
    }
}

/// Public snapshot of a speech session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub speaking: bool,
    pub paused: bool,
    pub error: Option<String>,
}
