//! Title Normalizer
//!
//! Splits a raw video title into (track, album, artists).
//!
//! # Algorithm
//! 1. Apply [`noise_rules`] strictly in order, replacing every match with `|`
//! 2. Collapse runs of pipes (and the whitespace around them) into one `|`
//! 3. Split on `|` into at most three parts: track, album, artists
//! 4. A parenthesized clause left in the track becomes the album
//! 5. Title-case all three fields
//!
//! The rewrite is lossy and order-sensitive: an earlier rule can consume
//! text a later rule would have matched. Rule order is part of the contract.

use super::text_case::title_case;
use once_cell::sync::Lazy;
use regex::Regex;

/// A single noise pattern, replaced by a `|` separator
#[derive(Debug)]
pub struct NoiseRule {
    /// Stable rule name (used in tests and debug logs)
    pub name: &'static str,
    /// Case-insensitive pattern
    pub pattern: Regex,
}

/// Ordered noise rules. Earlier rules run first.
static NOISE_RULES: Lazy<Vec<NoiseRule>> = Lazy::new(|| {
    [
        // "Simple Ukulele Playalong Tutorial with playalong"
        (
            "tutorial_boilerplate",
            r"((simple|playalong) )*ukulele(\s+playalong)* tutot*rial\s*(with playalong)*",
        ),
        ("play_along", r"(with)*\s*play\s*along"),
        // "Valentine's Day Special", "Diwali Special"
        ("day_special", r"[\w']+ (day\s+)*special"),
        ("fro", r"\bfro\b"),
        ("branding", r"sayali tank|bollyuke"),
        ("skill_level", r"\b(advanced?|level|fingerpicking)\b"),
        (
            "language_marker",
            r"\((hindi|english|telugu|tamil|malayalam|kannada|bengali|bangla|punjabi)\)",
        ),
        ("youtube_live", r"youtube live"),
        ("simple_chords", r"simple chords( & strumming)*"),
        ("simple_n_chords", r"simple \d chords only"),
        // "Only 3 Chords?", "only 4-5 basic chords"
        (
            "only_n_chords",
            r"(simple )*only \d+(-\d)* ((simple|basic)\s)*chords\?*",
        ),
        ("intermediate", r"intermediate"),
        ("beginners", r"(for )*(complete )*beginners*"),
        ("easy", r"easy( tutorial)*"),
        ("tabs", r"(with\s)*tabs"),
        // Leftover select words once the long forms above are gone
        ("lesson_words", r"\b(ukulele\s+)?(tutorial|lesson|with chords)\b"),
    ]
    .into_iter()
    .map(|(name, pattern)| NoiseRule {
        name,
        pattern: Regex::new(&format!("(?i){}", pattern)).unwrap(),
    })
    .collect()
});

static PIPE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\|+(\s*\|)*\s*").unwrap());

static PAREN_CLAUSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^()]*)\)").unwrap());

/// Ordered noise rules applied by [`normalize_title`]
pub fn noise_rules() -> &'static [NoiseRule] {
    &NOISE_RULES
}

/// Candidate fields derived from a title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleFields {
    pub track: String,
    pub album: String,
    pub artists: String,
}

/// Run the noise rules and pipe collapsing, without splitting.
///
/// Leading and trailing separators are dropped.
pub fn strip_noise(raw_title: &str) -> String {
    let mut title = raw_title.to_string();
    for rule in noise_rules() {
        title = rule.pattern.replace_all(&title, "|").into_owned();
    }
    let title = PIPE_RUN.replace_all(&title, "|");
    title
        .trim_matches(|c: char| c == '|' || c.is_whitespace())
        .to_string()
}

/// Split a raw title into title-cased (track, album, artists)
pub fn normalize_title(raw_title: &str) -> TitleFields {
    let stripped = strip_noise(raw_title);

    let mut parts = stripped.split('|').map(clean_part);
    let mut track = parts.next().unwrap_or_default();
    let mut album = parts.next().map(|p| unwrap_parens(&p)).unwrap_or_default();
    let artists = parts.next().map(|p| unwrap_parens(&p)).unwrap_or_default();

    if let Some(caps) = PAREN_CLAUSE.captures(&track) {
        album = caps[1].trim().to_string();
        track = clean_part(&PAREN_CLAUSE.replace_all(&track, ""));
    }

    tracing::trace!(raw = raw_title, stripped = %stripped, "Normalized title");

    TitleFields {
        track: title_case(&track),
        album: title_case(&album),
        artists: title_case(&artists),
    }
}

/// Trim whitespace and dangling separators left behind by removed noise
fn clean_part(part: &str) -> String {
    part.trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '–' | '—' | ':' | ','))
        .to_string()
}

/// `"(Aashiqui 2)"` → `"Aashiqui 2"`
fn unwrap_parens(part: &str) -> String {
    let inner = part
        .strip_prefix('(')
        .and_then(|p| p.strip_suffix(')'))
        .or_else(|| part.strip_prefix('[').and_then(|p| p.strip_suffix(']')));
    match inner {
        Some(inner) => inner.trim().to_string(),
        None => part.to_string(),
    }
}
