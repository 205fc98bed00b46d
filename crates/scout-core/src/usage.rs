//! Per-invocation token usage counters.
//!
//! Providers report prompt/completion token counts alongside each response.
//! [`TokenUsage`] is the uniform in-memory form; session-level accumulation
//! lives in `scout-tokens`.

use serde::{Deserialize, Serialize};

/// Token counts reported for one capability invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenUsage {
    /// Prompt-side tokens.
    pub input_tokens: u64,
    /// Completion-side tokens.
    pub output_tokens: u64,
}

impl TokenUsage {
    /// Construct from explicit counts.
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    /// Add another usage record into this one (saturating).
    pub fn add(&mut self, other: Self) {
        self.input_tokens = self.input_tokens.saturating_add(other.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(other.output_tokens);
    }

    /// Combined input + output tokens.
    pub fn total(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates() {
        let mut usage = TokenUsage::new(100, 20);
        usage.add(TokenUsage::new(50, 5));
        assert_eq!(usage, TokenUsage::new(150, 25));
        assert_eq!(usage.total(), 175);
    }

    #[test]
    fn add_saturates_instead_of_overflowing() {
        let mut usage = TokenUsage::new(u64::MAX - 1, 0);
        usage.add(TokenUsage::new(10, 0));
        assert_eq!(usage.input_tokens, u64::MAX);
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_value(TokenUsage::new(12, 3)).unwrap();
        assert_eq!(json["inputTokens"], 12);
        assert_eq!(json["outputTokens"], 3);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let usage: TokenUsage = serde_json::from_str("{}").unwrap();
        assert_eq!(usage, TokenUsage::default());
    }
}
