mod samples;
mod transcript;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use transcript::TranscriptEngine;
use vaani_speech::{SessionConfig, SpeakOptions, SpeechSession, VoiceCatalog};

#[derive(Parser)]
#[command(name = "vaani")]
#[command(about = "Vaani CLI - Read mixed Hindi/English text aloud", long_about = None)]
struct Cli {
    /// Path to a session config TOML file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how text splits into script segments
    Segments {
        /// Text to classify (reads stdin when omitted)
        text: Option<String>,

        /// Print segments as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the voices offered by the engine
    Voices,
    /// List the bundled sample texts
    Samples,
    /// Speak text through the transcript engine
    Speak {
        /// Text to speak (reads stdin when omitted)
        #[arg(conflicts_with = "sample")]
        text: Option<String>,

        /// Speak a bundled sample by number
        #[arg(short, long)]
        sample: Option<usize>,

        /// Voice name for non-Hindi text
        #[arg(short, long)]
        voice: Option<String>,

        /// BCP-47 language for non-Hindi text
        #[arg(short, long)]
        lang: Option<String>,

        /// Speaking rate (0.1 - 3.0)
        #[arg(short, long)]
        rate: Option<f32>,

        /// Voice pitch (0 - 2)
        #[arg(short, long)]
        pitch: Option<f32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("Loading config from {}", path.display()))?,
        None => SessionConfig::default(),
    };

    match cli.command {
        Commands::Segments { text, json } => print_segments(&config, text, json)?,
        Commands::Voices => {
            let session = new_session(config)?;
            list_voices(session.catalog(), &mut io::stdout().lock())?;
        }
        Commands::Samples => {
            for (index, text) in samples::SAMPLE_TEXTS.iter().enumerate() {
                println!("{:>2}. {}", index + 1, text);
            }
        }
        Commands::Speak {
            text,
            sample,
            voice,
            lang,
            rate,
            pitch,
        } => {
            let text = match sample {
                Some(number) => samples::sample(number)
                    .with_context(|| format!("No sample number {number}"))?
                    .to_string(),
                None => read_text(text)?,
            };
            speak(config, &text, voice, lang, rate, pitch).await?;
        }
    }

    Ok(())
}

fn new_session(config: SessionConfig) -> Result<SpeechSession<TranscriptEngine<io::Stdout>>> {
    SpeechSession::new(TranscriptEngine::new(io::stdout()), config)
        .context("Invalid session config")
}

fn list_voices(catalog: &VoiceCatalog, out: &mut impl Write) -> Result<()> {
    for (language, voices) in catalog.by_language() {
        writeln!(out, "{language}:")?;
        for voice in voices {
            let marker = if voice.is_default { " (default)" } else { "" };
            writeln!(out, "  {:<12} {}{}", voice.lang, voice.name, marker)?;
        }
    }
    writeln!(
        out,
        "Available voices: {} ({} languages)",
        catalog.len(),
        catalog.language_count()
    )?;
    Ok(())
}

fn print_segments(config: &SessionConfig, text: Option<String>, json: bool) -> Result<()> {
    let classifier = vaani_speech::SegmentClassifier::new(config.secondary_script)?;
    let segments = classifier.classify(&read_text(text)?);

    if json {
        println!("{}", serde_json::to_string_pretty(&segments)?);
    } else {
        for segment in &segments {
            println!("{:?}\t{}", segment.script, segment.text);
        }
    }
    Ok(())
}

async fn speak(
    config: SessionConfig,
    text: &str,
    voice: Option<String>,
    lang: Option<String>,
    rate: Option<f32>,
    pitch: Option<f32>,
) -> Result<()> {
    let mut session = new_session(config)?;
    let lang = lang.unwrap_or_else(|| session.config().default_lang.clone());

    let voice = match voice {
        Some(name) => session
            .catalog()
            .by_name(&name)
            .cloned()
            .with_context(|| format!("Unknown voice '{name}'. Run `vaani voices` to list them"))?,
        None => session
            .catalog()
            .preferred_for(&lang)
            .cloned()
            .context("Engine offers no voices")?,
    };
    log::info!("Using voice {voice} for {lang}");

    let mut options = SpeakOptions::new().with_voice(voice).with_lang(lang);
    options.rate = rate;
    options.pitch = pitch;

    session.speak(text, &options);
    session.run_until_idle().await;

    match session.error() {
        Some(error) => anyhow::bail!(error),
        None => Ok(()),
    }
}

fn read_text(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Reading text from stdin")?;
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_speak_arguments() {
        let cli = Cli::try_parse_from([
            "vaani", "speak", "नमस्ते", "--lang", "en-GB", "--rate", "1.5", "-v", "Daniel",
        ])
        .unwrap();

        match cli.command {
            Commands::Speak {
                text,
                lang,
                rate,
                voice,
                sample,
                pitch,
            } => {
                assert_eq!(text.as_deref(), Some("नमस्ते"));
                assert_eq!(lang.as_deref(), Some("en-GB"));
                assert_eq!(rate, Some(1.5));
                assert_eq!(voice.as_deref(), Some("Daniel"));
                assert!(sample.is_none());
                assert!(pitch.is_none());
            }
            _ => panic!("expected speak command"),
        }
    }

    #[test]
    fn text_and_sample_conflict() {
        assert!(Cli::try_parse_from(["vaani", "speak", "hi", "--sample", "2"]).is_err());
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["vaani", "voices", "--config", "vaani.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("vaani.toml")));
    }

    #[test]
    fn voices_are_listed_by_language_with_a_summary() {
        let catalog = VoiceCatalog::new(transcript::builtin_voices());
        let mut out = Vec::new();
        list_voices(&catalog, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "en:");
        assert_eq!(lines[1], "  en-US        Samantha (default)");
        assert_eq!(lines[2], "  en-GB        Daniel");
        assert_eq!(lines[3], "es:");
        assert_eq!(
            lines.last().copied(),
            Some("Available voices: 6 (5 languages)")
        );
    }

    #[test]
    fn samples_are_one_based() {
        assert!(samples::sample(0).is_none());
        assert!(samples::sample(2).unwrap().starts_with("नमस्ते"));
        assert!(samples::sample(6).is_none());
    }
}
