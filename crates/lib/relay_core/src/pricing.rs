//! Usage-based cost estimate for a completed run.

use crate::models::Usage;

/// Per-1K-token prices in US dollars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub prompt_per_1k: f64,
    pub completion_per_1k: f64,
}

impl Pricing {
    /// $0.01 per 1K prompt tokens, $0.03 per 1K completion tokens.
    pub const DEFAULT: Pricing = Pricing {
        prompt_per_1k: 0.01,
        completion_per_1k: 0.03,
    };

    /// Estimated cost of a run's token usage.
    pub fn estimate(&self, usage: &Usage) -> f64 {
        (usage.prompt_tokens as f64 / 1000.0) * self.prompt_per_1k
            + (usage.completion_tokens as f64 / 1000.0) * self.completion_per_1k
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Self::DEFAULT
    }
}
