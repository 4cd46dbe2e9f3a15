//! Description Extractor
//!
//! Scans a free-text video description for labeled song information:
//! - `Chords used: C, G, Am and F`
//! - `Movie: ...` / `Film - ...` / `Album: ...`
//! - `Singers: ...` / `Artist: ...`
//! - `Music: ...` / `Composed by: ...` / `Recreated by - ...`
//!
//! Every field has its own pattern, searched against the whole description
//! (first match wins). A field without a match keeps its title-derived
//! default (album, artists) or stays empty (chords, composers); extraction
//! never fails.
//!
//! Labels often arrive packed on one line (`..., Music: X, Singers: Y`), so
//! a newline is inserted before any known label that follows a comma before
//! the field patterns run.

use super::text_case::{chord_case, title_case};
use super::title_normalizer::TitleFields;
use once_cell::sync::Lazy;
use regex::Regex;

static PACKED_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i),[ \t]*(music director|music|lyrics|singers?|singer\(s\)|artists?|movie|film|album|composer|composed)\b",
    )
    .unwrap()
});

static CHORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)chords(?: used)*\s*:\s*((?:\w|,|\.|#|/| )+)$").unwrap()
});

static ALBUM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)(?:movie|film|album)\s*(?:–|:|-)+\s*((?:\w| )+)").unwrap()
});

static ARTISTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)(?:singer\(*s*\)*|artists*)\s*(?:–|:|-)+\s*((?:[A-Za-z0-9]| |\.|&|,)+)")
        .unwrap()
});

static COMPOSERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)(?:music(?: director)*|compose(?:r|d)|arranged|reprised|recreated)\s*(?: by)?\s*(?:–|:|-)+\s*((?:\w| |\.|&|,|-)+)",
    )
    .unwrap()
});

static AMPERSAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*&\s*").unwrap());

/// Song information found in a description, merged over title defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionFields {
    /// Comma-delimited chord names, empty when not declared
    pub chords: String,
    pub album: String,
    pub artists: String,
    /// Comma-delimited composer names, empty when not declared
    pub composers: String,
}

/// Insert a newline before labels packed onto one line after a comma
pub fn split_packed_labels(description: &str) -> String {
    let unix = description.replace("\r\n", "\n");
    PACKED_LABEL.replace_all(&unix, ",\n${1}").into_owned()
}

/// Extract song information, falling back to `defaults` for album and artists
pub fn extract_from_description(description: &str, defaults: &TitleFields) -> DescriptionFields {
    let text = split_packed_labels(description);

    let chords = first_capture(&CHORDS, &text)
        .map(|raw| clean_chords(&raw))
        .unwrap_or_default();

    let album = first_capture(&ALBUM, &text)
        .map(|raw| title_case(&raw))
        .unwrap_or_else(|| defaults.album.clone());

    let artists = first_capture(&ARTISTS, &text)
        .map(|raw| title_case(&clean_names(&raw)))
        .filter(|names| !names.is_empty())
        .unwrap_or_else(|| defaults.artists.clone());

    let composers = first_capture(&COMPOSERS, &text)
        .map(|raw| title_case(&clean_names(&raw)))
        .unwrap_or_default();

    tracing::trace!(
        chords = %chords,
        album = %album,
        artists = %artists,
        composers = %composers,
        "Extracted description fields"
    );

    DescriptionFields {
        chords,
        album,
        artists,
        composers,
    }
}

/// Trimmed first capture group, `None` when absent or blank
fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// `"C, G. Am and F,"` → `"C,G,Am,F"`
fn clean_chords(raw: &str) -> String {
    raw.split(|c: char| c == ',' || c == '.' || c.is_whitespace())
        .filter(|token| !token.is_empty() && !token.eq_ignore_ascii_case("and"))
        .map(chord_case)
        .collect::<Vec<_>>()
        .join(",")
}

/// Trim separators and turn ampersands into commas
fn clean_names(raw: &str) -> String {
    let trimmed = raw.trim_matches(|c: char| c == ',' || c.is_whitespace());
    AMPERSAND
        .replace_all(trimmed, ", ")
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> TitleFields {
        TitleFields {
            track: "Tum Hi Ho".to_string(),
            album: "Title Album".to_string(),
            artists: "Title Artist".to_string(),
        }
    }

    #[test]
    fn test_no_labels_keeps_defaults() {
        let fields = extract_from_description("Hope you enjoy! Subscribe.", &defaults());
        assert_eq!(
            fields,
            DescriptionFields {
                chords: String::new(),
                album: "Title Album".to_string(),
                artists: "Title Artist".to_string(),
                composers: String::new(),
            }
        );
    }

    #[test]
    fn test_singers_override_title_artists() {
        let fields = extract_from_description("Singers: Arijit Singh", &TitleFields::default());
        assert_eq!(fields.artists, "Arijit Singh");
    }

    #[test]
    fn test_packed_labels() {
        let text = "Original song info - Movie: Aashiqui 2, Music: Mithoon, Singers: Arijit Singh";
        let fields = extract_from_description(text, &defaults());
        assert_eq!(fields.album, "Aashiqui 2");
        assert_eq!(fields.composers, "Mithoon");
        assert_eq!(fields.artists, "Arijit Singh");
    }

    #[test]
    fn test_split_packed_labels() {
        assert_eq!(
            split_packed_labels("Movie: X, Music: Y, Lyrics: Z"),
            "Movie: X,\nMusic: Y,\nLyrics: Z"
        );
        assert_eq!(split_packed_labels("a, musically"), "a, musically");
    }

    #[test]
    fn test_chords_cleanup() {
        let fields = extract_from_description(
            "Learn this song!\nChords used: c, G. am and F\nThanks",
            &defaults(),
        );
        assert_eq!(fields.chords, "C,G,Am,F");
    }

    #[test]
    fn test_chords_with_sharps_and_slash() {
        let fields = extract_from_description("Chords: F#m, D, A/C#, E7", &defaults());
        assert_eq!(fields.chords, "F#m,D,A/C#,E7");
    }

    #[test]
    fn test_chords_stop_at_next_label() {
        let fields = extract_from_description("Chords used: C, G, Am, Music: Pritam", &defaults());
        assert_eq!(fields.chords, "C,G,Am");
        assert_eq!(fields.composers, "Pritam");
    }

    #[test]
    fn test_artists_ampersand() {
        let fields = extract_from_description(
            "Singer(s) - arijit singh & shreya ghoshal,",
            &defaults(),
        );
        assert_eq!(fields.artists, "Arijit Singh, Shreya Ghoshal");
    }

    #[test]
    fn test_composer_labels() {
        let cases = [
            ("Music Director: Vishal-Shekhar", "Vishal-Shekhar"),
            ("Composed by: A.R. Rahman", "A.R. Rahman"),
            ("Recreated by - Tanishk Bagchi", "Tanishk Bagchi"),
            ("Arranged: Salim & Sulaiman", "Salim, Sulaiman"),
        ];
        for (text, expected) in cases {
            let fields = extract_from_description(text, &defaults());
            assert_eq!(fields.composers, expected, "description {:?}", text);
        }
    }

    #[test]
    fn test_film_with_en_dash() {
        let fields = extract_from_description("Film – kal ho naa ho", &defaults());
        assert_eq!(fields.album, "Kal Ho Naa Ho");
    }

    #[test]
    fn test_first_match_wins() {
        let fields = extract_from_description("Album: First\nAlbum: Second", &defaults());
        assert_eq!(fields.album, "First");
    }

    #[test]
    fn test_crlf_description() {
        let fields = extract_from_description("Chords: C, G\r\nSingers: Someone\r\n", &defaults());
        assert_eq!(fields.chords, "C,G");
        assert_eq!(fields.artists, "Someone");
    }
}
