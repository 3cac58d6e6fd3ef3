//! Engine that renders each unit as a line of text instead of audio.

use std::io::Write;
use vaani_speech::{EngineEventSink, PlaybackUnit, SpeechEngine, UtteranceId, VoiceDescriptor};

pub struct TranscriptEngine<W: Write + Send> {
    out: W,
    voices: Vec<VoiceDescriptor>,
    sink: Option<EngineEventSink>,
}

impl<W: Write + Send> TranscriptEngine<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            voices: builtin_voices(),
            sink: None,
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write + Send> SpeechEngine for TranscriptEngine<W> {
    fn is_available(&self) -> bool {
        true
    }

    fn voices(&self) -> Vec<VoiceDescriptor> {
        self.voices.clone()
    }

    fn subscribe(&mut self, sink: EngineEventSink) {
        self.sink = Some(sink);
    }

    fn unsubscribe(&mut self) {
        self.sink = None;
    }

    fn speak(&mut self, id: UtteranceId, unit: &PlaybackUnit) {
        let Some(sink) = &self.sink else {
            return;
        };
        sink.started(id);

        let voice = unit
            .voice
            .as_ref()
            .map(|v| v.name.as_str())
            .unwrap_or("default");
        match writeln!(
            self.out,
            "[{} | {} | rate {:.2} pitch {:.2}] {}",
            unit.lang, voice, unit.rate, unit.pitch, unit.text
        ) {
            Ok(()) => sink.ended(id),
            Err(err) => sink.failed(id, err.to_string()),
        };
    }

    fn pause(&mut self) {
        log::debug!("Transcript engine ignores pause");
    }

    fn resume(&mut self) {
        log::debug!("Transcript engine ignores resume");
    }

    fn cancel(&mut self) {
        if let Err(err) = self.out.flush() {
            log::warn!("Failed to flush transcript output: {err}");
        }
    }
}

pub fn builtin_voices() -> Vec<VoiceDescriptor> {
    vec![
        VoiceDescriptor::new("Samantha", "en-US").with_default(true),
        VoiceDescriptor::new("Daniel", "en-GB"),
        VoiceDescriptor::new("Lekha", "hi-IN"),
        VoiceDescriptor::new("Thomas", "fr-FR"),
        VoiceDescriptor::new("Mónica", "es-ES"),
        VoiceDescriptor::new("Kyoko", "ja-JP"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use vaani_speech::{SpeakOptions, SpeechSession};

    #[derive(Default)]
    struct BrokenPipe {
        flushes: usize,
    }

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn writes_one_line_per_unit() {
        let mut session = SpeechSession::with_defaults(TranscriptEngine::new(Vec::new()));
        session.speak("Hello नमस्ते", &SpeakOptions::new());
        while session.speaking() {
            session.process_events();
        }

        let text = String::from_utf8(session.engine().output().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[en-US | default | rate 1.00 pitch 1.00] Hello",
                "[hi-IN | Lekha | rate 1.00 pitch 1.00] नमस्ते",
            ]
        );
    }

    #[test]
    fn cancel_survives_a_failing_flush() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut engine = TranscriptEngine::new(BrokenPipe::default());

        engine.cancel();
        engine.cancel();

        assert_eq!(engine.output().flushes, 2);
    }
}
