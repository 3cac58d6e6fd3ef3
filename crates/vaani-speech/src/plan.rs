use crate::catalog::VoiceCatalog;
use crate::classifier::SegmentClassifier;
use crate::config::{SessionConfig, SpeakOptions};
use crate::types::{PlaybackUnit, Script, Segment};

/// Builds the ordered playback units for `text`.
///
/// Secondary-script units get a voice resolved from the catalog and the configured
/// secondary locale, whatever the caller asked for. Primary-script units use the
/// caller's voice and language as given.
pub fn build_plan(
    classifier: &SegmentClassifier,
    catalog: &VoiceCatalog,
    config: &SessionConfig,
    text: &str,
    options: &SpeakOptions,
) -> Vec<PlaybackUnit> {
    classifier
        .classify(text)
        .into_iter()
        .filter(|segment| !segment.text.trim().is_empty())
        .map(|segment| bind_unit(segment, catalog, config, options))
        .collect()
}

fn bind_unit(
    segment: Segment,
    catalog: &VoiceCatalog,
    config: &SessionConfig,
    options: &SpeakOptions,
) -> PlaybackUnit {
    let (voice, lang) = match segment.script {
        Script::Secondary => (
            catalog
                .resolve_for_locale(&config.secondary_locale)
                .cloned(),
            config.secondary_locale.clone(),
        ),
        Script::Primary => (
            options.voice.clone(),
            options
                .lang
                .clone()
                .unwrap_or_else(|| config.default_lang.clone()),
        ),
    };

    PlaybackUnit {
        text: segment.text,
        script: segment.script,
        voice,
        lang,
        rate: options.resolved_rate(),
        pitch: options.resolved_pitch(),
        volume: options.resolved_volume(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VoiceDescriptor;

    fn catalog() -> VoiceCatalog {
        VoiceCatalog::new(vec![
            VoiceDescriptor::new("Samantha", "en-US"),
            VoiceDescriptor::new("Lekha", "hi-IN"),
        ])
    }

    #[test]
    fn secondary_units_ignore_caller_voice_and_lang() {
        let english = VoiceDescriptor::new("Daniel", "en-GB");
        let options = SpeakOptions::new()
            .with_voice(english.clone())
            .with_lang("en-GB")
            .with_rate(1.5);

        let plan = build_plan(
            &SegmentClassifier::devanagari(),
            &catalog(),
            &SessionConfig::default(),
            "नमस्ते! Hello there",
            &options,
        );

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].script, Script::Secondary);
        assert_eq!(plan[0].lang, "hi-IN");
        assert_eq!(plan[0].voice.as_ref().unwrap().name, "Lekha");
        assert_eq!(plan[0].rate, 1.5);

        assert_eq!(plan[1].text, "Hello there");
        assert_eq!(plan[1].lang, "en-GB");
        assert_eq!(plan[1].voice, Some(english));
    }

    #[test]
    fn primary_units_fall_back_to_default_lang_and_engine_voice() {
        let plan = build_plan(
            &SegmentClassifier::devanagari(),
            &catalog(),
            &SessionConfig::default(),
            "Hello",
            &SpeakOptions::new(),
        );

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].lang, "en-US");
        assert!(plan[0].voice.is_none());
        assert_eq!((plan[0].rate, plan[0].pitch, plan[0].volume), (1.0, 1.0, 1.0));
    }

    #[test]
    fn unresolved_secondary_voice_uses_engine_default() {
        let catalog = VoiceCatalog::new(vec![VoiceDescriptor::new("Samantha", "en-US")]);
        let plan = build_plan(
            &SegmentClassifier::devanagari(),
            &catalog,
            &SessionConfig::default(),
            "नमस्ते",
            &SpeakOptions::new(),
        );

        assert_eq!(plan.len(), 1);
        assert!(plan[0].voice.is_none());
        assert_eq!(plan[0].lang, "hi-IN");
    }

    #[test]
    fn blank_text_plans_nothing() {
        let plan = build_plan(
            &SegmentClassifier::devanagari(),
            &catalog(),
            &SessionConfig::default(),
            " \n ",
            &SpeakOptions::new(),
        );
        assert!(plan.is_empty());
    }
}
