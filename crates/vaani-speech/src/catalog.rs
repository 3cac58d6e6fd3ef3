use crate::types::{VoiceDescriptor, primary_subtag};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Ordered list of the voices the engine currently offers.
///
/// Refreshes replace the whole list at once. Snapshots handed out before a
/// refresh keep pointing at the old list.
#[derive(Debug, Clone)]
pub struct VoiceCatalog {
    voices: Arc<[VoiceDescriptor]>,
}

impl VoiceCatalog {
    pub fn new(voices: Vec<VoiceDescriptor>) -> Self {
        Self {
            voices: voices.into(),
        }
    }

    pub fn snapshot(&self) -> Arc<[VoiceDescriptor]> {
        Arc::clone(&self.voices)
    }

    pub fn replace(&mut self, voices: Vec<VoiceDescriptor>) {
        self.voices = voices.into();
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoiceDescriptor> {
        self.voices.iter()
    }

    pub fn by_name(&self, name: &str) -> Option<&VoiceDescriptor> {
        self.voices.iter().find(|voice| voice.name == name)
    }

    /// Voice for a locale: exact tag match first, then any voice sharing the
    /// locale's primary subtag.
    pub fn resolve_for_locale(&self, locale: &str) -> Option<&VoiceDescriptor> {
        let subtag = primary_subtag(locale);
        self.voices
            .iter()
            .find(|voice| voice.lang.eq_ignore_ascii_case(locale))
            .or_else(|| {
                self.voices
                    .iter()
                    .find(|voice| voice.primary_subtag().eq_ignore_ascii_case(subtag))
            })
    }

    /// Picker default for a language: the first exact match, otherwise the first
    /// voice in the catalog.
    pub fn preferred_for(&self, lang: &str) -> Option<&VoiceDescriptor> {
        self.voices
            .iter()
            .find(|voice| voice.lang == lang)
            .or_else(|| self.voices.first())
    }

    /// Voices grouped by lowercased primary subtag, keeping catalog order
    /// within each group.
    pub fn by_language(&self) -> BTreeMap<String, Vec<&VoiceDescriptor>> {
        let mut groups: BTreeMap<String, Vec<&VoiceDescriptor>> = BTreeMap::new();
        for voice in self.voices.iter() {
            groups
                .entry(voice.primary_subtag().to_ascii_lowercase())
                .or_default()
                .push(voice);
        }
        groups
    }

    /// Number of distinct base languages in the catalog.
    pub fn language_count(&self) -> usize {
        self.by_language().len()
    }
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> VoiceCatalog {
        VoiceCatalog::new(vec![
            VoiceDescriptor::new("Samantha", "en-US").with_default(true),
            VoiceDescriptor::new("Daniel", "en-GB"),
            VoiceDescriptor::new("Hindi Generic", "hi"),
            VoiceDescriptor::new("Lekha", "hi-IN"),
        ])
    }

    #[test]
    fn exact_locale_wins_over_subtag() {
        let catalog = catalog();
        assert_eq!(catalog.resolve_for_locale("hi-IN").unwrap().name, "Lekha");
    }

    #[test]
    fn falls_back_to_primary_subtag() {
        let catalog = VoiceCatalog::new(vec![
            VoiceDescriptor::new("Samantha", "en-US"),
            VoiceDescriptor::new("Android Hindi", "hi_IN_x"),
        ]);
        assert_eq!(
            catalog.resolve_for_locale("hi-IN").unwrap().name,
            "Android Hindi"
        );
    }

    #[test]
    fn subtag_match_is_not_a_prefix_match() {
        let catalog = VoiceCatalog::new(vec![VoiceDescriptor::new("Hiligaynon", "hil-PH")]);
        assert!(catalog.resolve_for_locale("hi-IN").is_none());
    }

    #[test]
    fn preferred_falls_back_to_first_voice() {
        let catalog = catalog();
        assert_eq!(catalog.preferred_for("en-GB").unwrap().name, "Daniel");
        assert_eq!(catalog.preferred_for("ja-JP").unwrap().name, "Samantha");
        assert!(VoiceCatalog::default().preferred_for("en-US").is_none());
    }

    #[test]
    fn groups_voices_by_base_language() {
        let mut voices = catalog().snapshot().to_vec();
        voices.push(VoiceDescriptor::new("Android Hindi", "HI_in"));
        let catalog = VoiceCatalog::new(voices);

        let groups = catalog.by_language();
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["en", "hi"]);

        let hindi: Vec<&str> = groups["hi"].iter().map(|v| v.name.as_str()).collect();
        assert_eq!(hindi, vec!["Hindi Generic", "Lekha", "Android Hindi"]);
        assert_eq!(catalog.language_count(), 2);
        assert_eq!(VoiceCatalog::default().language_count(), 0);
    }

    #[test]
    fn snapshots_survive_replace() {
        let mut catalog = catalog();
        let before = catalog.snapshot();
        catalog.replace(vec![VoiceDescriptor::new("Kyoko", "ja-JP")]);

        assert_eq!(before.len(), 4);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.by_name("Kyoko").is_some());
        assert!(catalog.by_name("Lekha").is_none());
    }
}
