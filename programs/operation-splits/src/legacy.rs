//! Four-bucket distribution editor.
//!
//! Older records split revenue into exactly four named buckets (company,
//! pilot, helper, expenses) that must sum to 100 before they can be saved.
//! Edits that would push the sum past 100 are rejected outright.

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        LEGACY_DEFAULT_AYUDANTE, LEGACY_DEFAULT_EMPRESA, LEGACY_DEFAULT_GASTOS,
        LEGACY_DEFAULT_PILOTO, LEGACY_REQUIRED_TOTAL,
    },
    errors::{require, AllocationError, Result},
    reconciler::amount_for,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyBucket {
    Empresa,
    Piloto,
    Ayudante,
    Gastos,
}

impl LegacyBucket {
    pub const ALL: [LegacyBucket; 4] = [
        LegacyBucket::Empresa,
        LegacyBucket::Piloto,
        LegacyBucket::Ayudante,
        LegacyBucket::Gastos,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyDistribution {
    pub empresa: u32,
    pub piloto: u32,
    pub ayudante: u32,
    pub gastos: u32,
}

impl Default for LegacyDistribution {
    fn default() -> Self {
        Self {
            empresa: LEGACY_DEFAULT_EMPRESA,
            piloto: LEGACY_DEFAULT_PILOTO,
            ayudante: LEGACY_DEFAULT_AYUDANTE,
            gastos: LEGACY_DEFAULT_GASTOS,
        }
    }
}

impl LegacyDistribution {
    pub fn get(&self, bucket: LegacyBucket) -> u32 {
        match bucket {
            LegacyBucket::Empresa => self.empresa,
            LegacyBucket::Piloto => self.piloto,
            LegacyBucket::Ayudante => self.ayudante,
            LegacyBucket::Gastos => self.gastos,
        }
    }

    fn slot(&mut self, bucket: LegacyBucket) -> &mut u32 {
        match bucket {
            LegacyBucket::Empresa => &mut self.empresa,
            LegacyBucket::Piloto => &mut self.piloto,
            LegacyBucket::Ayudante => &mut self.ayudante,
            LegacyBucket::Gastos => &mut self.gastos,
        }
    }

    /// Applies a typed value to one bucket
    ///
    /// Input is read as a leading integer (`"12.7"` -> 12). Non-numeric or
    /// negative input leaves the bucket unchanged and returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// `ExceedsFullAllocation` if the four buckets would total more than 100.
    pub fn update(&mut self, bucket: LegacyBucket, raw: &str) -> Result<bool> {
        let Some(value) = leading_integer(raw) else {
            tracing::debug!(?bucket, raw, "ignoring non-numeric bucket input");
            return Ok(false);
        };

        let others = self.total().saturating_sub(self.get(bucket));
        let attempted = others.saturating_add(value);

        require!(
            attempted <= LEGACY_REQUIRED_TOTAL,
            AllocationError::ExceedsFullAllocation { attempted }
        );

        *self.slot(bucket) = value;
        Ok(true)
    }

    pub fn total(&self) -> u32 {
        LegacyBucket::ALL
            .iter()
            .fold(0u32, |acc, b| acc.saturating_add(self.get(*b)))
    }

    /// Only a distribution totalling exactly 100 may be saved
    pub fn is_balanced(&self) -> bool {
        self.total() == LEGACY_REQUIRED_TOTAL
    }

    pub fn amount_for(&self, bucket: LegacyBucket, total_amount: u64) -> u64 {
        amount_for(f64::from(self.get(bucket)), total_amount)
    }
}

/// Leading non-negative integer of `raw`, ignoring surrounding whitespace
fn leading_integer(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    if end == 0 {
        return None;
    }
    // Absurdly long input saturates and is then rejected by the 100 cap
    Some(digits[..end].parse::<u32>().unwrap_or(u32::MAX))
}
