pub const SAMPLE_TEXTS: &[&str] = &[
    "Hello! This is a text to speech application that supports multiple languages.",
    "नमस्ते! यह एक टेक्स्ट टू स्पीच एप्लिकेशन है। Hello, this supports mixed languages too!",
    "Bonjour! Ceci est une application de synthèse vocale.",
    "¡Hola! Esta es una aplicación de texto a voz.",
    "こんにちは！これはテキスト読み上げアプリケーションです。",
];

/// Sample by 1-based index, as listed by `vaani samples`.
pub fn sample(number: usize) -> Option<&'static str> {
    number
        .checked_sub(1)
        .and_then(|index| SAMPLE_TEXTS.get(index))
        .copied()
}
