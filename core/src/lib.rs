#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use score::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod score;
mod types;

/// Time allowed per digit during the recall phase, in seconds. The deadline
/// is the same in every mode.
pub const RECALL_SECS_PER_DIGIT: Millis = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Revealed values stay visible and accumulate across the board.
    Normal,
    /// Each value is concealed again before the next one is shown.
    Pro,
    /// Like `Pro`, but the reveal order is a random permutation.
    Chaotic,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Normal, Mode::Pro, Mode::Chaotic];

    pub const fn label(self) -> &'static str {
        use Mode::*;
        match self {
            Normal => "normal",
            Pro => "pro",
            Chaotic => "chaotic",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.label() == label)
    }

    /// Whether a shown value is hidden again before advancing to the next.
    pub const fn conceals_between_steps(self) -> bool {
        matches!(self, Self::Pro | Self::Chaotic)
    }

    /// Whether the reveal order is shuffled instead of creation order.
    pub const fn shuffles_display(self) -> bool {
        matches!(self, Self::Chaotic)
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::Normal
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: Mode,
    pub count: SlotCount,
    pub digits: DigitWidth,
}

impl GameConfig {
    pub const fn new_unchecked(mode: Mode, count: SlotCount, digits: DigitWidth) -> Self {
        Self {
            mode,
            count,
            digits,
        }
    }

    pub fn new(mode: Mode, count: SlotCount, digits: DigitWidth) -> Self {
        let count = count.clamp(1, MAX_SLOTS);
        let digits = digits.clamp(1, MAX_DIGIT_WIDTH);
        Self::new_unchecked(mode, count, digits)
    }

    pub const fn total_digits(&self) -> u32 {
        (self.count as u32) * (self.digits as u32)
    }

    /// Recall deadline, fixed at round start.
    pub const fn deadline_millis(&self) -> Millis {
        (self.total_digits() as Millis) * RECALL_SECS_PER_DIGIT * 1000
    }
}

/// Ordered run of generated values. Immutable once constructed; a round keeps
/// referring to it by slot identity even when the reveal order is shuffled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    values: Vec<Value>,
    digits: DigitWidth,
}

impl Sequence {
    /// Validates that every value has exactly `digits` decimal digits, so a
    /// full-width entry can never be ambiguous against a target.
    pub fn from_values(values: Vec<Value>, digits: DigitWidth) -> Result<Self> {
        if digits < 1 || digits > MAX_DIGIT_WIDTH {
            return Err(GameError::WidthMismatch);
        }
        if values.iter().any(|&value| digit_len(value) != digits) {
            return Err(GameError::WidthMismatch);
        }
        Ok(Self { values, digits })
    }

    pub fn len(&self) -> SlotCount {
        self.values.len() as SlotCount
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn digits(&self) -> DigitWidth {
        self.digits
    }

    pub fn value_at(&self, slot: SlotIndex) -> Option<Value> {
        self.values.get(slot as usize).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        self.values.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn config_new_clamps_count_and_digits() {
        let config = GameConfig::new(Mode::Normal, 0, 0);
        assert_eq!(config.count, 1);
        assert_eq!(config.digits, 1);

        let config = GameConfig::new(Mode::Pro, 200, 42);
        assert_eq!(config.count, MAX_SLOTS);
        assert_eq!(config.digits, MAX_DIGIT_WIDTH);
    }

    #[test]
    fn deadline_is_three_seconds_per_digit() {
        let config = GameConfig::new(Mode::Normal, 3, 2);
        assert_eq!(config.total_digits(), 6);
        assert_eq!(config.deadline_millis(), 18_000);
    }

    #[test]
    fn sequence_rejects_wrong_width_values() {
        assert_eq!(
            Sequence::from_values(vec![42, 7, 89], 2),
            Err(GameError::WidthMismatch)
        );
        assert_eq!(
            Sequence::from_values(vec![42, 170], 2),
            Err(GameError::WidthMismatch)
        );
        assert_eq!(Sequence::from_values(vec![], 0), Err(GameError::WidthMismatch));
    }

    #[test]
    fn sequence_keeps_order_and_identity() {
        let seq = Sequence::from_values(vec![42, 17, 89], 2).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.value_at(0), Some(42));
        assert_eq!(seq.value_at(2), Some(89));
        assert_eq!(seq.value_at(3), None);
    }

    #[test]
    fn mode_labels_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_label(mode.label()), Some(mode));
        }
        assert_eq!(Mode::from_label("nightmare"), None);
    }
}
