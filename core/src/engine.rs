use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// How long each value stays face-up during the reveal sequence.
pub const REVEAL_DWELL_MS: Millis = 1000;
/// Extra pause after a value is concealed again (pro/chaotic only).
pub const CONCEAL_PAUSE_MS: Millis = 600;
/// Pause between concealing the whole board and the recall phase.
pub const SETTLE_MS: Millis = 3000;
/// A rejected entry is wiped once, this long after the mismatch.
pub const ENTRY_CLEAR_MS: Millis = 200;
/// The incorrect marker is cleared this long after the mismatch.
pub const REJECT_MARK_MS: Millis = 400;
/// Fraction of the deadline past which the timer should signal urgency.
pub const URGENCY_FRACTION: f32 = 0.9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotState {
    Hidden,
    Revealed,
    AwaitingInput,
    Correct,
    Incorrect,
}

impl SlotState {
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }

    /// Whether the player can currently edit this slot.
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::AwaitingInput | Self::Incorrect)
    }
}

/// One reveal/input position. Identity is the index into the round's slot
/// vector, which equals the value's original position in the sequence no
/// matter how the reveal order was shuffled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    target: Value,
    state: SlotState,
    entry: String,
    rejected_at: Option<Millis>,
    entry_clear_at: Option<Millis>,
}

impl Slot {
    fn new(target: Value) -> Self {
        Self {
            target,
            state: SlotState::Hidden,
            entry: String::new(),
            rejected_at: None,
            entry_clear_at: None,
        }
    }

    pub fn target(&self) -> Value {
        self.target
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    /// The player's current text, owned here so the clear-after-reject rule
    /// stays testable without a DOM.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Set while the transient shake/incorrect feedback is active.
    pub fn is_shaking(&self) -> bool {
        self.rejected_at.is_some()
    }
}

/// Sub-state of the reveal sequencer. `Lead` covers the pause between round
/// start and the first flip; `Shown`/`Concealed` carry the position in the
/// display order, not the slot identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealStep {
    Lead,
    Shown(SlotCount),
    Concealed(SlotCount),
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    Revealing { step: RevealStep },
    Settling,
    Recall { started_at: Millis, deadline_at: Millis },
    Won { elapsed: Millis },
    Failed,
}

impl Phase {
    pub const fn is_recall(self) -> bool {
        matches!(self, Self::Recall { .. })
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won { .. } | Self::Failed)
    }
}

/// Outcome of feeding one value-changed event into the evaluator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// The slot is locked; nothing happened.
    Ignored,
    /// Still typing: fewer digits than the configured width, or not numeric.
    Pending,
    Matched,
    Rejected,
}

impl InputOutcome {
    pub const fn has_update(self) -> bool {
        use InputOutcome::*;
        match self {
            Ignored => false,
            Pending => true,
            Matched => true,
            Rejected => true,
        }
    }
}

/// One round of the game, driven entirely by injected instants: `tick(now)`
/// is the single scheduler entry point, and every deferred action of the
/// original design (reveal steps, entry clears, the deadline) is a stored
/// deadline it compares against. A restart is a new engine; there is no
/// partial cancellation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundEngine {
    config: GameConfig,
    slots: Vec<Slot>,
    display_order: Vec<SlotIndex>,
    phase: Phase,
    next_step_at: Millis,
}

impl RoundEngine {
    /// Builds the board: one hidden slot per sequence value, creation order =
    /// sequence order. The display permutation is fixed here and never
    /// revisits a slot before all have been shown once.
    pub fn new(config: GameConfig, sequence: Sequence, seed: u64, now: Millis) -> Result<Self> {
        // a hand-built config can carry count 0 past the equality check
        if sequence.is_empty() || sequence.len() != config.count {
            return Err(GameError::LengthMismatch);
        }
        if sequence.digits() != config.digits {
            return Err(GameError::WidthMismatch);
        }

        let slots: Vec<Slot> = sequence.iter().map(Slot::new).collect();
        let mut display_order: Vec<SlotIndex> = (0..config.count).collect();
        if config.mode.shuffles_display() {
            use rand::prelude::*;
            let mut rng = SmallRng::seed_from_u64(seed);
            display_order.shuffle(&mut rng);
        }

        Ok(Self {
            config,
            slots,
            display_order,
            phase: Phase::Revealing {
                step: RevealStep::Lead,
            },
            next_step_at: now + REVEAL_DWELL_MS,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn len(&self) -> SlotCount {
        self.slots.len() as SlotCount
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_at(&self, slot: SlotIndex) -> Option<&Slot> {
        self.slots.get(slot as usize)
    }

    pub fn display_order(&self) -> &[SlotIndex] {
        &self.display_order
    }

    /// The single slot input should go to: the lowest identity not yet
    /// correct. `None` outside the recall phase or once all are correct.
    pub fn focused_slot(&self) -> Option<SlotIndex> {
        if !self.phase.is_recall() {
            return None;
        }
        self.slots
            .iter()
            .position(|slot| !slot.state.is_correct())
            .map(|ix| ix as SlotIndex)
    }

    pub fn score(&self) -> Option<Score> {
        match self.phase {
            Phase::Won { elapsed } => Some(Score::from_round(elapsed, self.config)),
            _ => None,
        }
    }

    pub fn elapsed_millis(&self) -> Option<Millis> {
        match self.phase {
            Phase::Won { elapsed } => Some(elapsed),
            _ => None,
        }
    }

    /// Fraction of the recall deadline consumed, clamped to `0..=1`.
    pub fn progress(&self, now: Millis) -> f32 {
        match self.phase {
            Phase::Recall {
                started_at,
                deadline_at,
            } => {
                let total = (deadline_at - started_at) as f32;
                let elapsed = now.saturating_sub(started_at) as f32;
                (elapsed / total).clamp(0.0, 1.0)
            }
            Phase::Won { .. } | Phase::Failed => 1.0,
            _ => 0.0,
        }
    }

    pub fn is_urgent(&self, now: Millis) -> bool {
        self.phase.is_recall() && self.progress(now) > URGENCY_FRACTION
    }

    /// Advances every due timer up to `now`. Steps fire off their scheduled
    /// instant, not the observed tick time, so a late tick cannot stretch the
    /// reveal timeline. Returns whether anything observable changed.
    pub fn tick(&mut self, now: Millis) -> bool {
        let mut updated = false;

        while self.step_due(now) {
            self.advance_step();
            updated = true;
        }

        updated |= self.tick_penalties(now);
        updated |= self.tick_deadline(now);
        updated
    }

    /// Evaluates one value-changed event for the slot with the given
    /// identity. Short or non-numeric text is "still typing"; full-width
    /// text is compared against the slot's target, including width-exact
    /// values with leading zeros (which can never match a generated target).
    pub fn input_changed(&mut self, slot: SlotIndex, text: &str, now: Millis) -> Result<InputOutcome> {
        match self.phase {
            Phase::Recall { .. } => {}
            Phase::Won { .. } | Phase::Failed => return Err(GameError::AlreadyEnded),
            _ => return Err(GameError::NotAcceptingInput),
        }

        let digits = self.config.digits as usize;
        let slot = self
            .slots
            .get_mut(slot as usize)
            .ok_or(GameError::InvalidSlot)?;

        if slot.state.is_correct() {
            return Ok(InputOutcome::Ignored);
        }

        let text = text.trim();
        slot.entry.clear();
        slot.entry.push_str(text);

        if text.len() < digits || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(InputOutcome::Pending);
        }
        let Ok(value) = text.parse::<Value>() else {
            return Ok(InputOutcome::Pending);
        };

        let outcome = if value == slot.target {
            slot.state = SlotState::Correct;
            slot.rejected_at = None;
            slot.entry_clear_at = None;
            InputOutcome::Matched
        } else {
            slot.state = SlotState::Incorrect;
            slot.rejected_at = Some(now);
            slot.entry_clear_at = Some(now + ENTRY_CLEAR_MS);
            InputOutcome::Rejected
        };

        // every evaluation feeds the win check; it is idempotent
        self.check_win(now);
        Ok(outcome)
    }

    /// Round is won iff every slot is correct. Safe to call repeatedly; once
    /// won the recorded elapsed time never changes.
    pub fn check_win(&mut self, now: Millis) -> bool {
        match self.phase {
            Phase::Won { .. } => true,
            Phase::Recall { started_at, .. } => {
                if self.slots.iter().all(|slot| slot.state.is_correct()) {
                    let elapsed = now.saturating_sub(started_at).max(1);
                    self.phase = Phase::Won { elapsed };
                    log::debug!("round won after {}ms", elapsed);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn step_due(&self, now: Millis) -> bool {
        matches!(self.phase, Phase::Revealing { .. } | Phase::Settling) && now >= self.next_step_at
    }

    fn advance_step(&mut self) {
        use RevealStep::*;

        let at = self.next_step_at;
        let last = self.len() - 1;

        match self.phase {
            Phase::Revealing { step } => match step {
                Lead => {
                    self.show_step(0);
                    self.schedule(Shown(0), at + REVEAL_DWELL_MS);
                }
                Shown(pos) if pos == last => {
                    // last dwell ends: conceal everything at once and settle
                    for slot in &mut self.slots {
                        slot.state = SlotState::Hidden;
                    }
                    self.phase = Phase::Settling;
                    self.next_step_at = at + SETTLE_MS;
                }
                Shown(pos) if self.config.mode.conceals_between_steps() => {
                    self.conceal_step(pos);
                    self.schedule(Concealed(pos), at + CONCEAL_PAUSE_MS);
                }
                Shown(pos) => {
                    self.show_step(pos + 1);
                    self.schedule(Shown(pos + 1), at + REVEAL_DWELL_MS);
                }
                Concealed(pos) => {
                    self.show_step(pos + 1);
                    self.schedule(Shown(pos + 1), at + REVEAL_DWELL_MS);
                }
            },
            Phase::Settling => self.begin_recall(at),
            _ => {}
        }
    }

    fn schedule(&mut self, step: RevealStep, at: Millis) {
        self.phase = Phase::Revealing { step };
        self.next_step_at = at;
    }

    fn show_step(&mut self, pos: SlotCount) {
        let slot = self.display_order[pos as usize];
        self.slots[slot as usize].state = SlotState::Revealed;
    }

    fn conceal_step(&mut self, pos: SlotCount) {
        let slot = self.display_order[pos as usize];
        self.slots[slot as usize].state = SlotState::Hidden;
    }

    fn begin_recall(&mut self, at: Millis) {
        for slot in &mut self.slots {
            slot.state = SlotState::AwaitingInput;
            slot.entry.clear();
            slot.rejected_at = None;
            slot.entry_clear_at = None;
        }
        self.phase = Phase::Recall {
            started_at: at,
            deadline_at: at + self.config.deadline_millis(),
        };
        log::debug!(
            "recall phase started, deadline in {}ms",
            self.config.deadline_millis()
        );
    }

    fn tick_penalties(&mut self, now: Millis) -> bool {
        if !self.phase.is_recall() {
            return false;
        }

        let mut updated = false;
        for slot in &mut self.slots {
            // the entry clear is one-shot: consumed on first firing so a
            // retry typed afterwards survives later ticks
            if slot.entry_clear_at.is_some_and(|at| now >= at) {
                slot.entry_clear_at = None;
                if !slot.entry.is_empty() {
                    slot.entry.clear();
                    updated = true;
                }
            }
            if slot.rejected_at.is_some_and(|at| now >= at + REJECT_MARK_MS) {
                slot.state = SlotState::AwaitingInput;
                slot.rejected_at = None;
                updated = true;
            }
        }
        updated
    }

    fn tick_deadline(&mut self, now: Millis) -> bool {
        let Phase::Recall { deadline_at, .. } = self.phase else {
            return false;
        };
        if now < deadline_at {
            return false;
        }

        // one final check catches a completion on the deadline instant
        if !self.check_win(now) {
            self.phase = Phase::Failed;
            log::debug!("deadline reached, round failed");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn engine(mode: Mode) -> RoundEngine {
        let config = GameConfig::new(mode, 3, 2);
        let sequence = Sequence::from_values(vec![42, 17, 89], 2).unwrap();
        RoundEngine::new(config, sequence, 0, 0).unwrap()
    }

    fn states(engine: &RoundEngine) -> Vec<SlotState> {
        engine.slots().iter().map(|slot| slot.state()).collect()
    }

    fn into_recall(mode: Mode) -> (RoundEngine, Millis) {
        let mut engine = engine(mode);
        let mut now = 0;
        while !engine.phase().is_recall() {
            now += 100;
            engine.tick(now);
            assert!(now < 60_000, "never reached recall");
        }
        (engine, now)
    }

    #[test]
    fn normal_reveal_accumulates_then_conceals_all() {
        use SlotState::*;
        let mut engine = engine(Mode::Normal);

        assert!(!engine.tick(999));
        assert_eq!(states(&engine), vec![Hidden, Hidden, Hidden]);

        assert!(engine.tick(1000));
        assert_eq!(states(&engine), vec![Revealed, Hidden, Hidden]);

        assert!(engine.tick(2000));
        assert_eq!(states(&engine), vec![Revealed, Revealed, Hidden]);

        assert!(engine.tick(3000));
        assert_eq!(states(&engine), vec![Revealed, Revealed, Revealed]);

        assert!(engine.tick(4000));
        assert_eq!(states(&engine), vec![Hidden, Hidden, Hidden]);
        assert_eq!(engine.phase(), Phase::Settling);

        assert!(!engine.tick(6999));
        assert!(engine.tick(7000));
        assert_eq!(
            engine.phase(),
            Phase::Recall {
                started_at: 7000,
                deadline_at: 25_000,
            }
        );
        assert_eq!(states(&engine), vec![AwaitingInput; 3]);
        assert_eq!(engine.focused_slot(), Some(0));
    }

    #[test]
    fn pro_reveal_conceals_between_steps() {
        use SlotState::*;
        let mut engine = engine(Mode::Pro);

        engine.tick(1000);
        assert_eq!(states(&engine), vec![Revealed, Hidden, Hidden]);

        engine.tick(2000);
        assert_eq!(states(&engine), vec![Hidden, Hidden, Hidden]);

        engine.tick(2600);
        assert_eq!(states(&engine), vec![Hidden, Revealed, Hidden]);

        engine.tick(3600);
        engine.tick(4200);
        assert_eq!(states(&engine), vec![Hidden, Hidden, Revealed]);

        engine.tick(5200);
        assert_eq!(engine.phase(), Phase::Settling);

        engine.tick(8200);
        assert_eq!(
            engine.phase(),
            Phase::Recall {
                started_at: 8200,
                deadline_at: 26_200,
            }
        );
    }

    #[test]
    fn late_tick_fast_forwards_without_stretching_the_timeline() {
        let mut engine = engine(Mode::Normal);
        assert!(engine.tick(10_000));
        // the whole reveal collapsed into one tick; recall still starts at
        // the scheduled instant
        assert_eq!(
            engine.phase(),
            Phase::Recall {
                started_at: 7000,
                deadline_at: 25_000,
            }
        );
    }

    #[test]
    fn chaotic_display_order_is_a_seeded_permutation() {
        let config = GameConfig::new(Mode::Chaotic, 8, 2);
        let values = vec![42, 17, 89, 10, 99, 55, 23, 71];
        let sequence = Sequence::from_values(values, 2).unwrap();

        let a = RoundEngine::new(config, sequence.clone(), 99, 0).unwrap();
        let b = RoundEngine::new(config, sequence, 99, 0).unwrap();
        assert_eq!(a.display_order(), b.display_order());

        let mut seen: Vec<SlotIndex> = a.display_order().to_vec();
        seen.sort_unstable();
        assert_eq!(seen, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn chaotic_reveals_each_slot_exactly_once() {
        use SlotState::*;
        let mut engine = engine(Mode::Chaotic);
        let mut reveals: Vec<SlotIndex> = Vec::new();

        for now in (0..10_000).step_by(100) {
            engine.tick(now);
            for (ix, slot) in engine.slots().iter().enumerate() {
                let ix = ix as SlotIndex;
                if slot.state() == Revealed && reveals.last() != Some(&ix) {
                    reveals.push(ix);
                }
            }
        }

        let mut sorted = reveals.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
        assert_eq!(reveals, engine.display_order());
    }

    #[test]
    fn correct_entries_in_order_win_the_round() {
        let (mut engine, _) = into_recall(Mode::Normal);

        assert_eq!(engine.input_changed(0, "42", 8000), Ok(InputOutcome::Matched));
        assert_eq!(engine.focused_slot(), Some(1));
        assert_eq!(engine.input_changed(1, "17", 9000), Ok(InputOutcome::Matched));
        assert_eq!(engine.input_changed(2, "89", 10_000), Ok(InputOutcome::Matched));

        assert_eq!(engine.phase(), Phase::Won { elapsed: 3000 });
        assert!(engine.slots().iter().all(|slot| slot.state().is_correct()));
        assert_eq!(engine.score(), Some(Score::from_secs_per_digit(0.5)));
        assert_eq!(engine.focused_slot(), None);
    }

    #[test]
    fn mismatch_marks_incorrect_then_clears_in_two_stages() {
        use SlotState::*;
        let (mut engine, _) = into_recall(Mode::Normal);

        engine.input_changed(0, "42", 8000).unwrap();
        assert_eq!(engine.input_changed(1, "99", 9000), Ok(InputOutcome::Rejected));

        let slot = engine.slot_at(1).unwrap();
        assert_eq!(slot.state(), Incorrect);
        assert_eq!(slot.entry(), "99");
        assert!(slot.is_shaking());
        assert!(!engine.check_win(9000));

        assert!(!engine.tick(9199));
        assert!(engine.tick(9200));
        let slot = engine.slot_at(1).unwrap();
        assert_eq!(slot.state(), Incorrect);
        assert_eq!(slot.entry(), "");

        assert!(engine.tick(9400));
        let slot = engine.slot_at(1).unwrap();
        assert_eq!(slot.state(), AwaitingInput);
        assert!(!slot.is_shaking());

        // the slot can be retried and the round still won
        engine.input_changed(1, "17", 9500).unwrap();
        engine.input_changed(2, "89", 9600).unwrap();
        assert!(matches!(engine.phase(), Phase::Won { .. }));
    }

    #[test]
    fn retry_typed_after_the_entry_clear_survives_later_ticks() {
        use SlotState::*;
        let (mut engine, _) = into_recall(Mode::Normal);

        engine.input_changed(0, "42", 8000).unwrap();
        engine.input_changed(1, "99", 9000).unwrap();

        assert!(engine.tick(9205));
        assert_eq!(engine.slot_at(1).unwrap().entry(), "");

        // retry while the incorrect marker is still up
        engine.input_changed(1, "1", 9250).unwrap();
        assert!(!engine.tick(9255));
        assert_eq!(engine.slot_at(1).unwrap().entry(), "1");

        // the marker still clears on schedule, the retry intact
        assert!(engine.tick(9400));
        let slot = engine.slot_at(1).unwrap();
        assert_eq!(slot.state(), AwaitingInput);
        assert_eq!(slot.entry(), "1");

        engine.input_changed(1, "17", 9500).unwrap();
        engine.input_changed(2, "89", 9600).unwrap();
        assert!(matches!(engine.phase(), Phase::Won { .. }));
    }

    #[test]
    fn zero_count_round_fails_to_start() {
        let config = GameConfig {
            mode: Mode::Normal,
            count: 0,
            digits: 2,
        };
        let sequence = Sequence::from_values(vec![], 2).unwrap();
        assert_eq!(
            RoundEngine::new(config, sequence, 0, 0),
            Err(GameError::LengthMismatch)
        );
    }

    #[test]
    fn short_or_non_numeric_entries_are_still_typing() {
        use SlotState::*;
        let (mut engine, _) = into_recall(Mode::Normal);

        assert_eq!(engine.input_changed(0, "4", 8000), Ok(InputOutcome::Pending));
        assert_eq!(engine.slot_at(0).unwrap().state(), AwaitingInput);
        assert_eq!(engine.slot_at(0).unwrap().entry(), "4");

        assert_eq!(engine.input_changed(0, "4x", 8100), Ok(InputOutcome::Pending));
        assert_eq!(engine.slot_at(0).unwrap().state(), AwaitingInput);
    }

    #[test]
    fn width_exact_leading_zero_entry_is_rejected() {
        let (mut engine, _) = into_recall(Mode::Normal);
        // "07" is two characters but numerically 7; targets never look like
        // this, so it must evaluate and fail rather than be ignored
        assert_eq!(engine.input_changed(0, "07", 8000), Ok(InputOutcome::Rejected));
    }

    #[test]
    fn correct_slot_is_locked_against_further_edits() {
        let (mut engine, _) = into_recall(Mode::Normal);

        engine.input_changed(0, "42", 8000).unwrap();
        assert_eq!(engine.input_changed(0, "99", 8100), Ok(InputOutcome::Ignored));
        assert_eq!(engine.slot_at(0).unwrap().entry(), "42");
        assert!(engine.slot_at(0).unwrap().state().is_correct());
    }

    #[test]
    fn win_check_is_idempotent() {
        let (mut engine, _) = into_recall(Mode::Normal);

        assert!(!engine.check_win(8000));
        assert_eq!(engine.focused_slot(), Some(0));

        engine.input_changed(0, "42", 8000).unwrap();
        engine.input_changed(1, "17", 8500).unwrap();
        engine.input_changed(2, "89", 9000).unwrap();
        let won_phase = engine.phase();

        assert!(engine.check_win(20_000));
        assert_eq!(engine.phase(), won_phase);
        assert_eq!(engine.elapsed_millis(), Some(2000));
    }

    #[test]
    fn deadline_without_completion_fails_the_round() {
        let (mut engine, _) = into_recall(Mode::Normal);

        engine.input_changed(0, "42", 8000).unwrap();
        assert!(!engine.tick(24_999));
        assert!(engine.tick(25_000));
        assert_eq!(engine.phase(), Phase::Failed);
        assert_eq!(
            engine.input_changed(1, "17", 25_100),
            Err(GameError::AlreadyEnded)
        );
    }

    #[test]
    fn completion_on_the_deadline_instant_still_wins() {
        let (mut engine, _) = into_recall(Mode::Normal);

        engine.input_changed(0, "42", 8000).unwrap();
        engine.input_changed(1, "17", 9000).unwrap();
        engine.input_changed(2, "89", 24_999).unwrap();

        engine.tick(25_000);
        assert_eq!(engine.phase(), Phase::Won { elapsed: 17_999 });
    }

    #[test]
    fn won_elapsed_is_never_zero() {
        let (mut engine, _) = into_recall(Mode::Normal);
        let Phase::Recall { started_at, .. } = engine.phase() else {
            unreachable!();
        };

        engine.input_changed(0, "42", started_at).unwrap();
        engine.input_changed(1, "17", started_at).unwrap();
        engine.input_changed(2, "89", started_at).unwrap();
        assert_eq!(engine.phase(), Phase::Won { elapsed: 1 });
    }

    #[test]
    fn progress_tracks_the_deadline_and_flags_urgency() {
        let (mut engine, _) = into_recall(Mode::Normal);
        let Phase::Recall { started_at, .. } = engine.phase() else {
            unreachable!();
        };

        assert_eq!(engine.progress(started_at), 0.0);
        assert_eq!(engine.progress(started_at + 9000), 0.5);
        assert!(!engine.is_urgent(started_at + 9000));
        assert!(engine.is_urgent(started_at + 17_000));

        engine.tick(started_at + 18_000);
        assert_eq!(engine.progress(started_at + 18_000), 1.0);
        // urgency is a recall-phase signal only
        assert!(!engine.is_urgent(started_at + 18_000));
    }

    #[test]
    fn input_outside_recall_is_an_error() {
        let mut engine = engine(Mode::Normal);
        assert_eq!(
            engine.input_changed(0, "42", 500),
            Err(GameError::NotAcceptingInput)
        );

        let (mut engine, _) = into_recall(Mode::Normal);
        assert_eq!(
            engine.input_changed(9, "42", 8000),
            Err(GameError::InvalidSlot)
        );
    }

    #[test]
    fn engine_rejects_sequence_config_mismatch() {
        let config = GameConfig::new(Mode::Normal, 3, 2);
        let short = Sequence::from_values(vec![42, 17], 2).unwrap();
        assert_eq!(
            RoundEngine::new(config, short, 0, 0),
            Err(GameError::LengthMismatch)
        );

        let wide = Sequence::from_values(vec![420, 170, 890], 3).unwrap();
        assert_eq!(
            RoundEngine::new(config, wide, 0, 0),
            Err(GameError::WidthMismatch)
        );
    }
}
