//! Input validation for summarize requests.

use crate::error::ValidationError;

use super::types::SummarizeRequest;

/// Minimum number of space-separated words accepted.
pub const MIN_WORDS: usize = 10;

/// Validate a request and return the text to summarize.
///
/// Checks run in order and stop at the first failure: presence, non-blank,
/// then word count. Words are counted by splitting on single spaces, so runs
/// of spaces contribute empty words.
pub fn validate(request: &SummarizeRequest) -> Result<&str, ValidationError> {
    let text = request.text.as_deref().ok_or(ValidationError::MissingText)?;

    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }

    if text.split(' ').count() < MIN_WORDS {
        return Err(ValidationError::TooShort {
            min_words: MIN_WORDS,
        });
    }

    Ok(text)
}
