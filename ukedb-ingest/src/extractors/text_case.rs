//! Casing helpers shared by the extractors

/// Title-case a free-text field.
///
/// A letter starts a word when the previous character is neither
/// alphanumeric nor an apostrophe; word starts are upper-cased and every
/// other letter lower-cased. `"don't STOP 2nd"` becomes `"Don't Stop 2nd"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;

    for c in text.chars() {
        let word_start = match prev {
            None => true,
            Some(p) => !(p.is_alphanumeric() || p == '\''),
        };
        if word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        prev = Some(c);
    }

    out
}

/// Normalize a chord name: root letter upper-case, quality lower-case.
///
/// A slash bass note is upper-cased too (`"am7/g"` → `"Am7/G"`).
pub fn chord_case(chord: &str) -> String {
    let mut out = String::with_capacity(chord.len());
    let mut upper_next = true;

    for c in chord.chars() {
        if upper_next {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        upper_next = c == '/';
    }

    out
}
