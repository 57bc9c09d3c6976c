use serde::{Deserialize, Serialize};

use crate::{ControlChannel, ControlVector};

/// The fallback action once an evolved sequence is exhausted: keep moving
/// forward.
pub const DEFAULT_ACTION: ControlVector = ControlVector::EMPTY.with(ControlChannel::Right);

/// Replays an evolved input sequence tick by tick.
///
/// This is the final-artifact interface of the search: the best chromosome's
/// sequence, queried by a playback consumer one tick at a time. Queries past
/// the end of the sequence return [`DEFAULT_ACTION`] instead of erroring, so
/// a consumer with a longer tick budget than the sequence keeps receiving
/// valid input.
///
/// # Example
///
/// ```
/// use oxiplat_sim::{ActionPlayer, ControlChannel, ControlVector, DEFAULT_ACTION};
///
/// let jump = ControlVector::EMPTY.with(ControlChannel::Jump);
/// let mut player = ActionPlayer::new(vec![jump]);
///
/// assert_eq!(player.next_action(), jump);
/// assert_eq!(player.next_action(), DEFAULT_ACTION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlayer {
    inputs: Vec<ControlVector>,
    cursor: usize,
}

impl ActionPlayer {
    /// Creates a player over an evolved sequence, cursor at tick 0.
    #[must_use]
    pub const fn new(inputs: Vec<ControlVector>) -> Self {
        Self { inputs, cursor: 0 }
    }

    /// Returns the action for an arbitrary tick without moving the cursor.
    #[must_use]
    pub fn action_at(&self, tick: usize) -> ControlVector {
        self.inputs.get(tick).copied().unwrap_or(DEFAULT_ACTION)
    }

    /// Returns the action at the cursor and advances it by one tick.
    pub fn next_action(&mut self) -> ControlVector {
        let action = self.action_at(self.cursor);
        self.cursor += 1;
        action
    }

    /// Resets the cursor to tick 0.
    pub const fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Length of the backing sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Whether the backing sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// The backing sequence.
    #[must_use]
    pub fn inputs(&self) -> &[ControlVector] {
        &self.inputs
    }
}
