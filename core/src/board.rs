use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub word: String,
    pub role: Role,
    pub revealed: bool,
}

impl Card {
    pub fn new(word: impl Into<String>, role: Role) -> Self {
        Self {
            word: word.into(),
            role,
            revealed: false,
        }
    }

    pub const fn is_hidden_target(&self) -> bool {
        !self.revealed && matches!(self.role, Role::Target)
    }
}

/// The 25 cards in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Builds a board from an explicit layout, checking it against `rules`.
    pub fn from_cards(cards: Vec<Card>, rules: &Rules) -> Result<Self> {
        let board = Self { cards };
        board.validate(rules)?;
        Ok(board)
    }

    pub(crate) fn from_cards_unchecked(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn validate(&self, rules: &Rules) -> Result<()> {
        if self.cards.len() != BOARD_SIZE {
            return Err(GameError::InvalidBoard);
        }

        let distinct: BTreeSet<&str> = self.cards.iter().map(|card| card.word.as_str()).collect();
        if distinct.len() != self.cards.len() {
            return Err(GameError::InvalidBoard);
        }

        let expected = [
            (Role::Target, rules.targets),
            (Role::Opposing, rules.opposing),
            (Role::Neutral, rules.neutrals),
            (Role::Trap, TRAP_COUNT),
        ];
        for (role, count) in expected {
            if self.count_role(role) != usize::from(count) {
                return Err(GameError::InvalidBoard);
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Result<&Card> {
        self.cards.get(index).ok_or(GameError::InvalidCard)
    }

    pub(crate) fn reveal(&mut self, index: usize) -> Result<&Card> {
        let card = self.cards.get_mut(index).ok_or(GameError::InvalidCard)?;
        card.revealed = true;
        Ok(card)
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.cards.iter().filter(|card| card.role == role).count()
    }

    pub fn count_revealed(&self, role: Role) -> usize {
        self.cards
            .iter()
            .filter(|card| card.role == role && card.revealed)
            .count()
    }

    pub fn unrevealed_targets(&self) -> impl Iterator<Item = &str> {
        self.cards
            .iter()
            .filter(|card| card.is_hidden_target())
            .map(|card| card.word.as_str())
    }

    pub fn all_targets_revealed(&self) -> bool {
        self.unrevealed_targets().next().is_none()
    }

    pub fn position_of(&self, word: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.word == word)
    }
}

impl Index<usize> for Board {
    type Output = Card;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cards[index]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloc::format;

    /// `targets` words named `t0..`, then opposing `o0..`, neutrals `n0..`,
    /// and the trap last.
    pub(crate) fn layout(rules: &Rules) -> Board {
        let mut cards = Vec::new();
        cards.extend((0..rules.targets).map(|i| Card::new(format!("t{i}"), Role::Target)));
        cards.extend((0..rules.opposing).map(|i| Card::new(format!("o{i}"), Role::Opposing)));
        cards.extend((0..rules.neutrals).map(|i| Card::new(format!("n{i}"), Role::Neutral)));
        cards.push(Card::new("trap", Role::Trap));
        Board::from_cards(cards, rules).unwrap()
    }

    #[test]
    fn from_cards_rejects_second_trap() {
        let rules = Rules::free_play();
        let mut cards = layout(&rules).cards;
        cards[0].role = Role::Trap;

        assert_eq!(Board::from_cards(cards, &rules), Err(GameError::InvalidBoard));
    }

    #[test]
    fn from_cards_rejects_duplicate_words() {
        let rules = Rules::free_play();
        let mut cards = layout(&rules).cards;
        cards[1].word = cards[0].word.clone();

        assert_eq!(Board::from_cards(cards, &rules), Err(GameError::InvalidBoard));
    }

    #[test]
    fn unrevealed_targets_skip_revealed_cards() {
        let mut board = layout(&Rules::turn_based());
        board.reveal(0).unwrap();

        assert_eq!(board.unrevealed_targets().count(), 7);
        assert_eq!(board.count_revealed(Role::Target), 1);
        assert!(!board.all_targets_revealed());
    }
}
