//! Song language detection from title keywords

use super::text_case::title_case;

/// Language keywords, scanned in this (alphabetical) order. First hit wins.
pub static LANGUAGES: [&str; 9] = [
    "bangla",
    "bengali",
    "english",
    "hindi",
    "kannada",
    "malayalam",
    "punjabi",
    "tamil",
    "telugu",
];

/// Canonical name for a keyword (`bangla` is an alias of `bengali`)
fn canonical(language: &str) -> &str {
    match language {
        "bangla" => "bengali",
        other => other,
    }
}

/// Infer the song language from the raw title.
///
/// Falls back to the channel's configured language when the title names
/// none. The result is title-cased (`"Hindi"`).
pub fn detect_language(raw_title: &str, channel_default: &str) -> String {
    let title = raw_title.to_lowercase();
    let language = LANGUAGES
        .iter()
        .find(|language| title.contains(*language))
        .map(|language| canonical(language))
        .unwrap_or(channel_default);
    title_case(language)
}
