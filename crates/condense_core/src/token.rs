/// Deterministic token-length oracle.
///
/// Implementations must return the same count for the same text every time.
pub trait TokenCounter: Send + Sync {
    fn count(&self, text: &str) -> u32;
}
