/// Minimum trimmed length for extracted text to be worth parsing.
pub const MIN_USABLE_CHARS: usize = 10;

/// Coarse gate in front of semantic extraction: rejects missing or near-empty
/// text. Says nothing about whether the text actually describes companies.
pub fn is_usable(text: Option<&str>) -> bool {
    match text {
        Some(text) => text.trim().chars().count() >= MIN_USABLE_CHARS,
        None => false,
    }
}
