//! Field extractors
//!
//! Deterministic text normalization turning a noisy title/description pair
//! into structured song fields:
//! - [`title_normalizer`]: (track, album, artists) from the title
//! - [`description_extractor`]: labeled chords/album/artists/composers
//! - [`language_detector`]: song language from title keywords

pub mod description_extractor;
pub mod language_detector;
pub mod text_case;
pub mod title_normalizer;

pub use description_extractor::{extract_from_description, DescriptionFields};
pub use language_detector::detect_language;
pub use text_case::title_case;
pub use title_normalizer::{normalize_title, NoiseRule, TitleFields};
