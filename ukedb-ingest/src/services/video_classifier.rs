//! Video Classifier
//!
//! Decides whether a video belongs in the catalog at all.
//!
//! **Policy** (evaluated in order, on the lower-cased title):
//! 1. Any drop word → ignore. Always wins.
//! 2. Any select word → keep.
//! 3. Otherwise → ignore (default-deny).

/// Titles containing any of these are never catalogued
pub const DROP_WORDS: [&str; 7] = [
    "mashup",
    "medley",
    "unboxing",
    "how to practise",
    "what is",
    "ukebox",
    "introduction",
];

/// Titles containing any of these are song tutorials
pub const SELECT_WORDS: [&str; 4] = ["tutorial", "playalong", "lesson", "with chords"];

/// Outcome of classifying a title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Matched a drop word
    Dropped(&'static str),
    /// Matched a select word
    Selected(&'static str),
    /// Matched nothing
    Unmatched,
}

impl Classification {
    /// Whether the entry is excluded from the catalog
    pub fn is_ignored(self) -> bool {
        !matches!(self, Classification::Selected(_))
    }
}

/// Classify a title, reporting which keyword decided it
pub fn classify_title(raw_title: &str) -> Classification {
    let title = raw_title.to_lowercase();

    if let Some(word) = DROP_WORDS.iter().copied().find(|w| title.contains(w)) {
        return Classification::Dropped(word);
    }
    if let Some(word) = SELECT_WORDS.iter().copied().find(|w| title.contains(w)) {
        return Classification::Selected(word);
    }
    Classification::Unmatched
}

/// `true` when the video should be ignored
pub fn classify(raw_title: &str) -> bool {
    classify_title(raw_title).is_ignored()
}
