//! Cost calculation — pricing tables and per-run cost computation.
//!
//! Pricing tiers are per-million tokens. The table is static: no network
//! lookups, no runtime registration. Unknown models price to `None` so the
//! caller can flag the estimate as partial instead of silently charging $0
//! without telling anyone.

use scout_core::TokenUsage;

/// Pricing tier per million tokens.
struct PricingTier {
    input_per_million: f64,
    output_per_million: f64,
}

// ─── OpenAI ──────────────────────────────────────────────────────────────────

const GPT_4O: PricingTier = PricingTier {
    input_per_million: 2.5,
    output_per_million: 10.0,
};

const GPT_4O_MINI: PricingTier = PricingTier {
    input_per_million: 0.15,
    output_per_million: 0.6,
};

const GPT_4_1: PricingTier = PricingTier {
    input_per_million: 2.0,
    output_per_million: 8.0,
};

const GPT_4_1_MINI: PricingTier = PricingTier {
    input_per_million: 0.4,
    output_per_million: 1.6,
};

const GPT_4_TURBO: PricingTier = PricingTier {
    input_per_million: 10.0,
    output_per_million: 30.0,
};

const GPT_4: PricingTier = PricingTier {
    input_per_million: 30.0,
    output_per_million: 60.0,
};

const GPT_35_TURBO: PricingTier = PricingTier {
    input_per_million: 0.5,
    output_per_million: 1.5,
};

/// Look up the pricing tier for a model.
///
/// Tries exact match first, then pattern-matches on model family
/// substrings. Returns `None` for unknown models (no implicit fallback
/// pricing).
fn get_pricing_tier(model: &str) -> Option<&'static PricingTier> {
    // Exact match
    match model {
        "gpt-4o" => return Some(&GPT_4O),
        "gpt-4o-mini" => return Some(&GPT_4O_MINI),
        "gpt-4.1" => return Some(&GPT_4_1),
        "gpt-4.1-mini" => return Some(&GPT_4_1_MINI),
        "gpt-4-turbo" => return Some(&GPT_4_TURBO),
        "gpt-4" => return Some(&GPT_4),
        "gpt-3.5-turbo" => return Some(&GPT_35_TURBO),
        _ => {}
    }

    // Pattern matching on model family substrings
    let lower = model.to_lowercase();

    if lower.contains("gpt-4o-mini") {
        return Some(&GPT_4O_MINI);
    }
    if lower.contains("gpt-4o") {
        return Some(&GPT_4O);
    }
    if lower.contains("gpt-4.1-mini") {
        return Some(&GPT_4_1_MINI);
    }
    if lower.contains("gpt-4.1") {
        return Some(&GPT_4_1);
    }
    if lower.contains("gpt-4-turbo") {
        return Some(&GPT_4_TURBO);
    }
    if lower.contains("gpt-4") {
        return Some(&GPT_4);
    }
    if lower.contains("gpt-3.5") {
        return Some(&GPT_35_TURBO);
    }

    None
}

/// Calculate cost for accumulated usage under a model's rates.
///
/// `total_cost = input_tokens * rate_in + output_tokens * rate_out`, with
/// rates expressed per million tokens. Returns `None` when the model has
/// no pricing entry.
pub fn calculate_cost(model: &str, usage: &TokenUsage) -> Option<f64> {
    let pricing = get_pricing_tier(model)?;

    let input_tokens = usage.input_tokens as f64;
    let output_tokens = usage.output_tokens as f64;

    let input_cost = (input_tokens / 1_000_000.0) * pricing.input_per_million;
    let output_cost = (output_tokens / 1_000_000.0) * pricing.output_per_million;

    Some(input_cost + output_cost)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
