pub const PREVIEW_CHARS: usize = 500;
pub const NO_TEXT_PLACEHOLDER: &str = "Professional sample data loaded";

/// Extracted text as shown to the client: the first 500 characters with an
/// ellipsis when longer, or a placeholder when nothing was extracted.
pub fn display_text(text: Option<&str>) -> String {
    match text {
        None | Some("") => NO_TEXT_PLACEHOLDER.to_string(),
        Some(text) => {
            let mut chars = text.chars();
            let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
            if chars.next().is_some() {
                format!("{}...", head)
            } else {
                head
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        assert_eq!(display_text(None), NO_TEXT_PLACEHOLDER);
        assert_eq!(display_text(Some("")), NO_TEXT_PLACEHOLDER);
    }

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(display_text(Some("Holding Company\n")), "Holding Company\n");
    }

    #[test]
    fn test_exactly_limit_is_not_truncated() {
        let text = "x".repeat(PREVIEW_CHARS);
        assert_eq!(display_text(Some(&text)), text);
    }

    #[test]
    fn test_long_text_truncated_with_ellipsis() {
        let text = "y".repeat(PREVIEW_CHARS + 1);
        let shown = display_text(Some(&text));
        assert_eq!(shown.len(), PREVIEW_CHARS + 3);
        assert!(shown.ends_with("y..."));
    }

    #[test]
    fn test_truncates_on_char_boundaries() {
        let text = "é".repeat(PREVIEW_CHARS + 10);
        let shown = display_text(Some(&text));
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
    }
}
