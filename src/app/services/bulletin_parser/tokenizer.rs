//! Bulletin body tokenization
//!
//! Splits a whitespace-delimited report body into an ordered token sequence.
//! Repeated whitespace is collapsed and leading/trailing whitespace trimmed,
//! so no token is ever empty. This is a pure function with no failure mode:
//! malformed input yields an empty sequence, never an error.

/// Split a bulletin body into ordered, non-empty tokens
pub fn tokenize(body: &str) -> Vec<&str> {
    body.split_whitespace().collect()
}
