use serde::{Deserialize, Serialize};

use crate::{Error, Result, SizeKb};

/// Conventional upper bound on a batch payload, in KB.
pub const DEFAULT_MAX_BATCH_KB: f64 = 256.0;

/// Numeric constraints a destination puts on each batch.
///
/// All bounds are inclusive. Sizes are in KB and compared at two-decimal
/// precision, the same precision records are measured at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitProfile {
    pub min_records_per_batch: usize,
    pub max_records_per_batch: usize,
    pub max_batch_kb: f64,
    pub max_record_kb: f64,
}

impl LimitProfile {
    pub fn new(
        min_records_per_batch: usize,
        max_records_per_batch: usize,
        max_batch_kb: f64,
        max_record_kb: f64,
    ) -> Result<Self> {
        let profile = Self {
            min_records_per_batch,
            max_records_per_batch,
            max_batch_kb,
            max_record_kb,
        };
        profile.check()?;
        Ok(profile)
    }

    /// Reject profiles no batch could ever satisfy.
    pub fn check(&self) -> Result<()> {
        if self.max_records_per_batch == 0 {
            return Err(Error::InvalidLimits(
                "max_records_per_batch must be at least 1".into(),
            ));
        }
        if self.min_records_per_batch > self.max_records_per_batch {
            return Err(Error::InvalidLimits(format!(
                "min_records_per_batch ({}) exceeds max_records_per_batch ({})",
                self.min_records_per_batch, self.max_records_per_batch
            )));
        }
        for (name, kb) in [
            ("max_batch_kb", self.max_batch_kb),
            ("max_record_kb", self.max_record_kb),
        ] {
            if !kb.is_finite() || kb <= 0.0 {
                return Err(Error::InvalidLimits(format!(
                    "{name} must be a positive number of KB, got {kb}"
                )));
            }
        }
        Ok(())
    }

    pub fn batch_limit(&self) -> SizeKb {
        SizeKb::from_kb(self.max_batch_kb)
    }

    pub fn record_limit(&self) -> SizeKb {
        SizeKb::from_kb(self.max_record_kb)
    }
}
