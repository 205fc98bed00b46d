//! Text utilities: markdown code-fence stripping and UTF-8–safe truncation.
//!
//! Models frequently wrap JSON payloads in ```-fenced blocks even when asked
//! for bare output. [`strip_code_fences`] recovers the inner payload so the
//! structural parse sees only the data.

/// Strip a single surrounding markdown code fence, if present.
///
/// Handles ```` ``` ```` and ```` ```json ```` style openers (any language
/// tag). Input without a surrounding fence is returned unchanged. Leading
/// and trailing whitespace is trimmed either way.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line.
    let body = match body.split_once('\n') {
        Some((first_line, tail)) if !first_line.trim().contains(char::is_whitespace) => tail,
        _ => body,
    };
    body.trim()
}

/// Truncate a string to at most `max_bytes` bytes at a char boundary.
///
/// Returns the longest prefix of `s` whose byte length is ≤ `max_bytes`
/// and that does not split a multi-byte character.
#[inline]
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Truncate `s` and append a suffix (e.g. `"..."`) if the original exceeds
/// `max_bytes`. The result is at most `max_bytes` bytes including the suffix.
pub fn truncate_with_suffix(s: &str, max_bytes: usize, suffix: &str) -> String {
    if s.len() <= max_bytes {
        return s.to_owned();
    }
    let body_budget = max_bytes.saturating_sub(suffix.len());
    let prefix = truncate_str(s, body_budget);
    format!("{prefix}{suffix}")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
