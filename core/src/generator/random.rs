use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::{SliceRandom, index};

use super::*;

/// Samples the board words without regard to role, hands out roles by sample
/// position, then shuffles the display order.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn role_at(position: usize, rules: &Rules) -> Role {
        let targets = usize::from(rules.targets);
        let opposing = targets + usize::from(rules.opposing);
        let neutrals = opposing + usize::from(rules.neutrals);

        match position {
            p if p < targets => Role::Target,
            p if p < opposing => Role::Opposing,
            p if p < neutrals => Role::Neutral,
            _ => Role::Trap,
        }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, words: &[String], rules: &Rules) -> Result<Board> {
        rules.validate()?;

        if words.len() < BOARD_SIZE {
            return Err(GameError::InsufficientWordBank {
                language: String::new(),
                found: words.len(),
            });
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut cards: Vec<Card> = index::sample(&mut rng, words.len(), BOARD_SIZE)
            .into_iter()
            .enumerate()
            .map(|(position, word_index)| {
                Card::new(words[word_index].clone(), Self::role_at(position, rules))
            })
            .collect();
        cards.shuffle(&mut rng);

        let board = Board::from_cards_unchecked(cards);
        if let Err(err) = board.validate(rules) {
            log::warn!("Generated board does not match rules: {}", err);
            return Err(err);
        }

        log::debug!("Generated board from {} words, seed {}", words.len(), self.seed);
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::format;

    fn words(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("word{i}")).collect()
    }

    #[test]
    fn generated_boards_follow_role_counts() {
        let words = words(60);
        for rules in [Rules::turn_based(), Rules::free_play(), Rules::duel()] {
            for seed in 0..32 {
                let board = RandomBoardGenerator::new(seed).generate(&words, &rules).unwrap();

                assert_eq!(board.len(), BOARD_SIZE);
                assert_eq!(board.count_role(Role::Trap), 1);
                assert_eq!(board.count_role(Role::Target), usize::from(rules.targets));
                assert_eq!(board.count_role(Role::Opposing), usize::from(rules.opposing));
                assert_eq!(board.count_role(Role::Neutral), usize::from(rules.neutrals));

                let distinct: BTreeSet<_> = board.cards().iter().map(|c| &c.word).collect();
                assert_eq!(distinct.len(), BOARD_SIZE);
                assert!(board.cards().iter().all(|c| !c.revealed));
            }
        }
    }

    #[test]
    fn same_seed_gives_same_board() {
        let words = words(40);
        let rules = Rules::free_play();

        let a = RandomBoardGenerator::new(7).generate(&words, &rules).unwrap();
        let b = RandomBoardGenerator::new(7).generate(&words, &rules).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn exact_word_count_uses_every_word() {
        let words = words(BOARD_SIZE);
        let board = RandomBoardGenerator::new(3)
            .generate(&words, &Rules::turn_based())
            .unwrap();

        let used: BTreeSet<_> = board.cards().iter().map(|c| c.word.clone()).collect();
        let all: BTreeSet<_> = words.into_iter().collect();
        assert_eq!(used, all);
    }

    #[test]
    fn short_word_list_is_rejected() {
        let err = RandomBoardGenerator::new(0)
            .generate(&words(24), &Rules::turn_based())
            .unwrap_err();

        assert!(matches!(err, GameError::InsufficientWordBank { found: 24, .. }));
    }
}
