use crate::config::ScriptRange;
use crate::error::ConfigResult;
use crate::types::{Script, Segment};
use once_cell::sync::Lazy;
use regex::Regex;

static DEVANAGARI: Lazy<SegmentClassifier> = Lazy::new(|| {
    SegmentClassifier::new(ScriptRange::DEVANAGARI).expect("Devanagari segment pattern is valid")
});

/// Split `text` into Devanagari and non-Devanagari segments.
pub fn classify(text: &str) -> Vec<Segment> {
    DEVANAGARI.classify(text)
}

/// Partitions text into ordered runs of primary and secondary script.
///
/// Whitespace and the punctuation `. , ! ?` are shared: they extend whichever run
/// is being matched and never start a new one on their own.
#[derive(Debug, Clone)]
pub struct SegmentClassifier {
    range: ScriptRange,
    pattern: Regex,
}

impl SegmentClassifier {
    pub fn new(range: ScriptRange) -> ConfigResult<Self> {
        range.validate()?;
        let (start, end) = (range.start as u32, range.end as u32);
        let pattern = Regex::new(&format!(
            r"[\x{{{start:X}}}-\x{{{end:X}}}\s.,!?]+|[^\x{{{start:X}}}-\x{{{end:X}}}]+"
        ))?;
        Ok(Self { range, pattern })
    }

    /// The shared Devanagari classifier.
    pub fn devanagari() -> Self {
        DEVANAGARI.clone()
    }

    pub fn range(&self) -> ScriptRange {
        self.range
    }

    /// Script of a raw run: secondary if any code point falls in the range.
    pub fn script_of(&self, text: &str) -> Script {
        if text.chars().any(|c| self.range.contains(c)) {
            Script::Secondary
        } else {
            Script::Primary
        }
    }

    pub fn classify(&self, text: &str) -> Vec<Segment> {
        let mut runs: Vec<(Script, String)> = Vec::new();

        for found in self.pattern.find_iter(text) {
            let raw = found.as_str();
            if raw.trim().is_empty() {
                // Bare whitespace belongs to the run before it.
                if let Some((_, buffer)) = runs.last_mut() {
                    buffer.push_str(raw);
                }
                continue;
            }

            let script = self.script_of(raw);
            match runs.last_mut() {
                Some((last, buffer)) if *last == script => buffer.push_str(raw),
                _ => runs.push((script, raw.to_string())),
            }
        }

        runs.into_iter()
            .filter_map(|(script, raw)| {
                let text = raw.trim();
                (!text.is_empty()).then(|| Segment::new(text, script))
            })
            .collect()
    }
}

impl Default for SegmentClassifier {
    fn default() -> Self {
        Self::devanagari()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_whitespace(text: &str) -> String {
        text.chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn assert_well_formed(input: &str, segments: &[Segment]) {
        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(strip_whitespace(&joined), strip_whitespace(input));
        for segment in segments {
            assert!(!segment.text.is_empty());
            assert_eq!(segment.text, segment.text.trim());
        }
        for pair in segments.windows(2) {
            assert_ne!(pair[0].script, pair[1].script, "adjacent runs share a script");
        }
    }

    #[test]
    fn latin_only_is_one_primary_segment() {
        assert_eq!(classify("Hello"), vec![Segment::new("Hello", Script::Primary)]);
    }

    #[test]
    fn devanagari_then_latin() {
        let segments = classify("नमस्ते! Hello");
        assert_eq!(
            segments,
            vec![
                Segment::new("नमस्ते!", Script::Secondary),
                Segment::new("Hello", Script::Primary),
            ]
        );
    }

    #[test]
    fn latin_keeps_trailing_punctuation_before_devanagari() {
        let segments = classify("Hello, नमस्ते");
        assert_eq!(
            segments,
            vec![
                Segment::new("Hello,", Script::Primary),
                Segment::new("नमस्ते", Script::Secondary),
            ]
        );
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(classify("").is_empty());
        assert!(classify("   \n\t ").is_empty());
    }

    #[test]
    fn leading_punctuation_merges_into_primary_run() {
        let segments = classify(". Hello");
        assert_eq!(segments, vec![Segment::new(". Hello", Script::Primary)]);
    }

    #[test]
    fn devanagari_only_is_one_secondary_segment() {
        let input = "यह एक टेक्स्ट टू स्पीच एप्लिकेशन है।";
        let segments = classify(input);
        assert_eq!(segments, vec![Segment::new(input, Script::Secondary)]);
    }

    #[test]
    fn mixed_sample_alternates_scripts() {
        let input =
            "नमस्ते! यह एक टेक्स्ट टू स्पीच एप्लिकेशन है। Hello, this supports mixed languages too!";
        let segments = classify(input);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].script, Script::Secondary);
        assert_eq!(segments[1].script, Script::Primary);
        assert_eq!(segments[1].text, "Hello, this supports mixed languages too!");
        assert_well_formed(input, &segments);
    }

    #[test]
    fn well_formed_for_assorted_inputs() {
        let inputs = [
            "Hello",
            "  नमस्ते  ",
            "a न b म c",
            "!!! नमस्ते ??? world ...",
            "123 नमस्ते 456",
            "Bonjour! こんにちは नमस्ते",
            "\n\nनमस्ते\n\nHello\n\n",
        ];
        for input in inputs {
            assert_well_formed(input, &classify(input));
        }
    }

    #[test]
    fn custom_range_classifies_bengali() {
        let classifier = SegmentClassifier::new(ScriptRange::new('\u{0980}', '\u{09FF}')).unwrap();
        let segments = classifier.classify("Hi নমস্কার");
        assert_eq!(
            segments,
            vec![
                Segment::new("Hi", Script::Primary),
                Segment::new("নমস্কার", Script::Secondary),
            ]
        );
        assert_eq!(classifier.script_of("नमस्ते"), Script::Primary);
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(SegmentClassifier::new(ScriptRange::new('\u{097F}', '\u{0900}')).is_err());
    }
}
