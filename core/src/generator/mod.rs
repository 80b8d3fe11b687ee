use crate::*;
pub use random::*;

mod random;

/// Strategy for producing the round's value sequence. Implementations consume
/// themselves so a generator cannot accidentally be reused across rounds.
pub trait SequenceGenerator {
    fn generate(self, config: GameConfig) -> Sequence;
}
