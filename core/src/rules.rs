use serde::{Deserialize, Serialize};

use crate::*;

/// Per-turn settings, only present in the turn-based rule set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRules {
    pub seconds: Seconds,
    /// Unused guesses move into a pool that is added to the next hint.
    pub carry_over: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rules {
    pub targets: CardCount,
    pub opposing: CardCount,
    pub neutrals: CardCount,
    pub game_seconds: Seconds,
    pub turn: Option<TurnRules>,
    pub exclude_used_categories: bool,
    pub allow_end_game: bool,
    pub hint_prefix_chars: usize,
    pub hint_delay_ms: u32,
}

impl Rules {
    pub const GAME_SECONDS: Seconds = 20 * 60;
    pub const TURN_SECONDS: Seconds = 2 * 60;
    pub const HINT_PREFIX_CHARS: usize = 3;
    pub const HINT_DELAY_MS: u32 = 500;

    /// Wrong guesses end the turn, a per-turn timer runs, and unused guesses
    /// carry over to the next hint.
    pub const fn turn_based() -> Self {
        Self {
            targets: 8,
            opposing: 0,
            neutrals: 16,
            game_seconds: Self::GAME_SECONDS,
            turn: Some(TurnRules {
                seconds: Self::TURN_SECONDS,
                carry_over: true,
            }),
            exclude_used_categories: false,
            allow_end_game: false,
            hint_prefix_chars: Self::HINT_PREFIX_CHARS,
            hint_delay_ms: Self::HINT_DELAY_MS,
        }
    }

    /// No turns: guesses are only spent, never carried, and a category is
    /// never hinted twice in the same game.
    pub const fn free_play() -> Self {
        Self {
            targets: 9,
            opposing: 0,
            neutrals: 15,
            game_seconds: Self::GAME_SECONDS,
            turn: None,
            exclude_used_categories: true,
            allow_end_game: true,
            hint_prefix_chars: Self::HINT_PREFIX_CHARS,
            hint_delay_ms: Self::HINT_DELAY_MS,
        }
    }

    /// Turn-based play against an opposing word set that decides time-ups.
    pub const fn duel() -> Self {
        Self {
            targets: 8,
            opposing: 7,
            neutrals: 9,
            ..Self::turn_based()
        }
    }

    pub const fn is_turn_based(&self) -> bool {
        self.turn.is_some()
    }

    pub const fn carries_over(&self) -> bool {
        matches!(
            self.turn,
            Some(TurnRules {
                carry_over: true,
                ..
            })
        )
    }

    pub const fn turn_seconds(&self) -> Option<Seconds> {
        match self.turn {
            Some(turn) => Some(turn.seconds),
            None => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let total = usize::from(self.targets)
            + usize::from(self.opposing)
            + usize::from(self.neutrals)
            + usize::from(TRAP_COUNT);

        if total != BOARD_SIZE || self.targets == 0 {
            return Err(GameError::InvalidRules);
        }
        if self.game_seconds == 0 || self.turn_seconds() == Some(0) {
            return Err(GameError::InvalidRules);
        }

        Ok(())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::turn_based()
    }
}
