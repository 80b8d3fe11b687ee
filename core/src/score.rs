use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Seconds spent per memorized digit; lower is better. Persisted as the
/// two-decimal string the progress bar shows, e.g. `"4.50"`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Score(f64);

impl Score {
    pub fn from_round(elapsed: Millis, config: GameConfig) -> Self {
        let secs = elapsed as f64 / 1000.0;
        Self(secs / config.total_digits() as f64)
    }

    pub const fn from_secs_per_digit(secs_per_digit: f64) -> Self {
        Self(secs_per_digit)
    }

    pub const fn secs_per_digit(self) -> f64 {
        self.0
    }

    /// Strict improvement; the stored best never moves up.
    pub fn improves_on(self, best: Option<Score>) -> bool {
        best.is_none_or(|best| self.0 < best.0)
    }

    /// Reads a score back from its storage string. A missing or malformed
    /// value means "no record yet".
    pub fn parse(stored: &str) -> Option<Self> {
        stored
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(Self)
    }

    pub fn to_storage(self) -> String {
        alloc::format!("{self}")
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
