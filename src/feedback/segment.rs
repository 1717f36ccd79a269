//! Sentence segmentation.
//!
//! Splits learner text on runs of sentence-terminal punctuation (`.`, `!`,
//! `?`).  A run such as `"?!"` or `"..."` counts as a single boundary.

/// Split `text` into trimmed, non-empty sentences in input order.
///
/// ```rust
/// use english_coach::feedback::segment;
///
/// assert_eq!(segment("Hi there! How are you?"), vec!["Hi there", "How are you"]);
/// assert!(segment("...!!!").is_empty());
/// ```
pub fn segment(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
