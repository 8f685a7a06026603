//! Local summaries for running without a Hugging Face token.

/// Words kept from the input.
pub const MOCK_SUMMARY_WORDS: usize = 50;

/// Marker appended to every mock summary.
pub const MOCK_SUFFIX: &str = "... (mock summary - set HF_API_TOKEN for real summaries)";

/// First [`MOCK_SUMMARY_WORDS`] whitespace-separated words, single-spaced, plus [`MOCK_SUFFIX`].
pub fn mock_summary(text: &str) -> String {
    let mut summary = text
        .split_whitespace()
        .take(MOCK_SUMMARY_WORDS)
        .collect::<Vec<_>>()
        .join(" ");
    summary.push_str(MOCK_SUFFIX);
    summary
}
