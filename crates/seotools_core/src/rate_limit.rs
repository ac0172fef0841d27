use serde::{Deserialize, Serialize};

/// Default request budget shown when a quota response carries no limit.
pub const DEFAULT_QUOTA_LIMIT: u32 = 10;
/// Default reset window, in seconds, when a quota response carries none.
pub const DEFAULT_QUOTA_RESET_SECS: u64 = 3600;
/// Remaining-request count at or below which the badge turns to a warning.
pub const LOW_REMAINING_THRESHOLD: u32 = 2;

/// Remaining request budget as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitState {
    pub remaining: u32,
    pub limit: u32,
}

impl RateLimitState {
    pub fn is_low(&self) -> bool {
        self.remaining <= LOW_REMAINING_THRESHOLD
    }
}

/// Details of a rejected submission once the budget is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaExceeded {
    pub limit: u32,
    pub reset_in_secs: u64,
}

impl QuotaExceeded {
    /// Builds the quota details, substituting defaults for missing or zero
    /// values.
    pub fn from_parts(limit: Option<u32>, reset_in_secs: Option<u64>) -> Self {
        Self {
            limit: limit.filter(|v| *v > 0).unwrap_or(DEFAULT_QUOTA_LIMIT),
            reset_in_secs: reset_in_secs
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_QUOTA_RESET_SECS),
        }
    }

    pub fn reset_minutes(&self) -> u64 {
        self.reset_in_secs.div_ceil(60)
    }
}

impl Default for QuotaExceeded {
    fn default() -> Self {
        Self::from_parts(None, None)
    }
}
