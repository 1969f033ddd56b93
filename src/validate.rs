use crate::error::ValidationError;

/// Words a post or thread title may not contain.
pub const FORBIDDEN_WORDS: &[&str] = &[
    "アダルト",
    "エロ",
    "セックス",
    "暴力",
    "差別",
    "殺害",
    "麻薬",
    "違法",
];

fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// First forbidden word found in `text`, in list order.
pub fn find_forbidden_word(text: &str) -> Option<&'static str> {
    let text = normalize(text);
    FORBIDDEN_WORDS
        .iter()
        .copied()
        .find(|word| text.contains(&normalize(word)))
}

/// Check user-supplied text before it is sent to the board.
pub fn validate_content(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    match find_forbidden_word(text) {
        Some(word) => Err(ValidationError::Forbidden(word.to_string())),
        None => Ok(()),
    }
}
