//! Token count approximation.

/// Approximate the token count of `text` as `floor(chars / 4)`.
///
/// Counts Unicode scalar values, not bytes. Not billing-accurate.
pub fn estimate_tokens(text: &str) -> u32 {
    u32::try_from(text.chars().count() / 4).unwrap_or(u32::MAX)
}
