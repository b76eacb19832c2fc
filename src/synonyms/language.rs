//! Single-token language guess used when the caller sends no `lang`.

const CYRILLIC: std::ops::RangeInclusive<char> = '\u{0400}'..='\u{04FF}';

/// `"ru"` when Cyrillic letters outnumber ASCII Latin ones, `"en"` otherwise.
#[must_use]
pub fn detect_language(text: &str) -> &'static str {
    let (cyrillic, latin) = text.chars().fold((0usize, 0usize), |(cyr, lat), c| {
        if CYRILLIC.contains(&c) {
            (cyr + 1, lat)
        } else if c.is_ascii_alphabetic() {
            (cyr, lat + 1)
        } else {
            (cyr, lat)
        }
    });

    if cyrillic > latin { "ru" } else { "en" }
}
