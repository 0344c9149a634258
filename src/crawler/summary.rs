//! Leading-sentence summarizer
//!
//! This is a naive heuristic, not real summarization: text is split on the
//! literal `". "` and the first three pieces are kept. It has no notion of
//! sentence boundaries, so abbreviations ("e.g. ") and similar split early.
//! The exact output is kept stable because stored results depend on it.

/// Number of leading segments kept by [`summarize`]
pub const SUMMARY_SENTENCES: usize = 3;

/// Reduces `text` to its first three `". "`-delimited segments
///
/// Text with three or fewer segments is returned unchanged; otherwise the
/// first three are joined with `". "` and followed by `"..."`.
///
/// # Examples
///
/// ```
/// use sumi_scrape::summarize;
///
/// assert_eq!(summarize("A. B. C. D."), "A. B. C...");
/// assert_eq!(summarize("A. B. C."), "A. B. C.");
/// ```
pub fn summarize(text: &str) -> String {
    let sentences: Vec<&str> = text.split(". ").collect();
    if sentences.len() > SUMMARY_SENTENCES {
        format!("{}...", sentences[..SUMMARY_SENTENCES].join(". "))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_segments() {
        assert_eq!(summarize("A. B. C. D."), "A. B. C...");
    }

    #[test]
    fn test_three_segments_unchanged() {
        assert_eq!(summarize("One. Two. Three."), "One. Two. Three.");
    }

    #[test]
    fn test_single_segment_unchanged() {
        assert_eq!(summarize("No delimiter here"), "No delimiter here");
        assert_eq!(summarize(""), "");
    }

    #[test]
    fn test_many_segments() {
        let text = "First one. Second one. Third one. Fourth one. Fifth one.";
        assert_eq!(summarize(text), "First one. Second one. Third one...");
    }

    #[test]
    fn test_period_without_space_is_not_a_delimiter() {
        let text = "Pi is 3.14. It is irrational. Really. Truly.";
        assert_eq!(summarize(text), "Pi is 3.14. It is irrational. Really...");
        assert_eq!(summarize("a.b.c.d.e"), "a.b.c.d.e");
    }

    #[test]
    fn test_abbreviations_split_early() {
        let text = "See e.g. the docs. Then more. And more.";
        assert_eq!(summarize(text), "See e.g. the docs. Then more...");
    }

    #[test]
    fn test_empty_trailing_segment_counts() {
        assert_eq!(summarize("A. B. C. "), "A. B. C...");
    }
}
