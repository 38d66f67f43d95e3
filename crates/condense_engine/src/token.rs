use condense_core::TokenCounter;

/// Simple, deterministic whitespace tokenizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenCounter;

impl TokenCounter for WhitespaceTokenCounter {
    fn count(&self, text: &str) -> u32 {
        text.split_whitespace().count() as u32
    }
}

/// Character-ratio estimate, closer to sub-word tokenizers than word counts.
#[derive(Debug, Clone, Copy)]
pub struct CharEstimateTokenCounter {
    chars_per_token: u32,
}

impl CharEstimateTokenCounter {
    pub fn new(chars_per_token: u32) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }
}

impl Default for CharEstimateTokenCounter {
    fn default() -> Self {
        Self::new(4)
    }
}

impl TokenCounter for CharEstimateTokenCounter {
    fn count(&self, text: &str) -> u32 {
        let chars = text.chars().count() as u32;
        chars.div_ceil(self.chars_per_token)
    }
}
