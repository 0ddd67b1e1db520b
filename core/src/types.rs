use serde::{Deserialize, Serialize};

/// Number of cards on every board.
pub const BOARD_SIZE: usize = 25;

/// Every board carries exactly this many trap cards.
pub const TRAP_COUNT: u8 = 1;

/// Count type used for role counts, hint counts, and the guess budget.
pub type CardCount = u8;

/// Seconds left on a countdown.
pub type Seconds = u32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Target,
    Opposing,
    Neutral,
    Trap,
}

impl Role {
    /// Wrong guesses end the turn in the turn-based rules.
    pub const fn is_wrong_guess(self) -> bool {
        matches!(self, Self::Opposing | Self::Neutral)
    }

    pub const fn class_name(self) -> &'static str {
        use Role::*;
        match self {
            Target => "target",
            Opposing => "opposing",
            Neutral => "neutral",
            Trap => "trap",
        }
    }
}
