//! Conversion between whole currency amounts and their grouped text form.
//!
//! The domain currency has no subdivision, so amounts are whole units and
//! `parse(format(n)) == n` holds for every `u64`.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DECIMAL_SEPARATOR, DEFAULT_GROUPING_SEPARATOR};

/// Separator pair used to render and read amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberLocale {
    pub grouping: char,
    pub decimal: char,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::es_cl()
    }
}

impl NumberLocale {
    /// `1.234.567`
    pub const fn es_cl() -> Self {
        Self {
            grouping: DEFAULT_GROUPING_SEPARATOR,
            decimal: DEFAULT_DECIMAL_SEPARATOR,
        }
    }

    /// `1,234,567`
    pub const fn en_us() -> Self {
        Self {
            grouping: ',',
            decimal: '.',
        }
    }

    /// Renders an amount with thousands grouping and no decimal places
    pub fn format(&self, amount: u64) -> String {
        let digits = amount.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.grouping);
            }
            out.push(ch);
        }

        out
    }

    /// Like `format`, but an absent amount renders as the empty string
    pub fn format_optional(&self, amount: Option<u64>) -> String {
        amount.map(|a| self.format(a)).unwrap_or_default()
    }

    /// Reads an amount typed or displayed in this locale
    /// Never fails: anything unreadable, negative or out of range yields 0
    pub fn parse(&self, text: &str) -> u64 {
        let cleaned: String = text
            .trim()
            .chars()
            .filter(|c| *c != self.grouping && *c != '$' && !c.is_whitespace())
            .collect();
        let cleaned = strip_leading_zeros(&cleaned, self.decimal);

        if cleaned.is_empty() {
            return 0;
        }

        if cleaned.contains(self.decimal) {
            // Fractional input rounds to the nearest whole unit
            return cleaned
                .replace(self.decimal, ".")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0 && *v < u64::MAX as f64)
                .map(|v| v.round() as u64)
                .unwrap_or(0);
        }

        cleaned.parse::<u64>().unwrap_or(0)
    }
}

/// Drops redundant leading zeros from raw input (`"0450000"` -> `"450000"`)
/// A lone zero and a zero directly before the decimal marker are kept
pub fn strip_leading_zeros(raw: &str, decimal: char) -> &str {
    if raw.starts_with(decimal) {
        return raw;
    }

    let mut rest = raw;
    while rest.len() > 1 && rest.starts_with('0') {
        let next = rest[1..].chars().next();
        match next {
            Some(c) if c.is_ascii_digit() => rest = &rest[1..],
            _ => break,
        }
    }
    rest
}
