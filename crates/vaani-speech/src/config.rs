use crate::error::{ConfigError, ConfigResult};
use crate::types::{VoiceDescriptor, primary_subtag};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_LANG: &str = "en-US";
pub const DEFAULT_SECONDARY_LOCALE: &str = "hi-IN";

pub const MIN_RATE: f32 = 0.1;
pub const MAX_RATE: f32 = 3.0;
pub const MIN_PITCH: f32 = 0.0;
pub const MAX_PITCH: f32 = 2.0;
pub const MIN_VOLUME: f32 = 0.0;
pub const MAX_VOLUME: f32 = 1.0;
const NEUTRAL: f32 = 1.0;

/// Inclusive code point range that makes up the secondary script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRange {
    pub start: char,
    pub end: char,
}

impl ScriptRange {
    pub const DEVANAGARI: ScriptRange = ScriptRange {
        start: '\u{0900}',
        end: '\u{097F}',
    };

    pub fn new(start: char, end: char) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&c)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.start > self.end {
            return Err(ConfigError::InvalidScriptRange {
                start: self.start as u32,
                end: self.end as u32,
            });
        }
        Ok(())
    }
}

impl Default for ScriptRange {
    fn default() -> Self {
        Self::DEVANAGARI
    }
}

/// Configuration for a speech session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Language for primary-script units when the caller gives none
    pub default_lang: String,
    /// Locale forced onto secondary-script units
    pub secondary_locale: String,
    pub secondary_script: ScriptRange,
}

impl SessionConfig {
    /// Load a configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        validate_tag("default_lang", &self.default_lang)?;
        validate_tag("secondary_locale", &self.secondary_locale)?;
        self.secondary_script.validate()
    }

    pub fn with_default_lang(mut self, lang: impl Into<String>) -> Self {
        self.default_lang = lang.into();
        self
    }

    pub fn with_secondary_locale(mut self, locale: impl Into<String>) -> Self {
        self.secondary_locale = locale.into();
        self
    }

    pub fn with_secondary_script(mut self, range: ScriptRange) -> Self {
        self.secondary_script = range;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_lang: DEFAULT_LANG.to_string(),
            secondary_locale: DEFAULT_SECONDARY_LOCALE.to_string(),
            secondary_script: ScriptRange::DEVANAGARI,
        }
    }
}

fn validate_tag(field: &'static str, value: &str) -> ConfigResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() != value.len() || primary_subtag(value).is_empty() {
        return Err(ConfigError::InvalidLanguageTag {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Per-call options for `speak`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeakOptions {
    /// Voice for primary-script text; `None` lets the engine choose
    pub voice: Option<VoiceDescriptor>,
    pub rate: Option<f32>,
    pub pitch: Option<f32>,
    pub volume: Option<f32>,
    /// Language for primary-script text
    pub lang: Option<String>,
}

impl SpeakOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voice(mut self, voice: VoiceDescriptor) -> Self {
        self.voice = Some(voice);
        self
    }

    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Rate clamped to 0.1..=3.0, neutral when absent.
    pub fn resolved_rate(&self) -> f32 {
        resolve(self.rate, MIN_RATE, MAX_RATE)
    }

    /// Pitch clamped to 0.0..=2.0, neutral when absent.
    pub fn resolved_pitch(&self) -> f32 {
        resolve(self.pitch, MIN_PITCH, MAX_PITCH)
    }

    /// Volume clamped to 0.0..=1.0, full when absent.
    pub fn resolved_volume(&self) -> f32 {
        resolve(self.volume, MIN_VOLUME, MAX_VOLUME)
    }
}

fn resolve(value: Option<f32>, min: f32, max: f32) -> f32 {
    match value {
        Some(v) if v.is_finite() => v.clamp(min, max),
        _ => NEUTRAL,
    }
}
