use alloc::collections::BTreeSet;
use alloc::string::String;
use core::fmt;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// Appended to a word fragment when no category fits.
pub const FRAGMENT_MARKER: &str = "...";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub label: String,
    pub count: CardCount,
}

impl Hint {
    pub fn new(label: impl Into<String>, count: CardCount) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }

    /// Stand-in hint that gives away the first `prefix_chars` characters of `word`.
    pub fn fragment(word: &str, prefix_chars: usize) -> Self {
        let mut label: String = word.chars().take(prefix_chars).collect();
        label.push_str(FRAGMENT_MARKER);
        Self::new(label, 1)
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.count)
    }
}

/// Greedy pick: the unused category covering the most hidden targets, first
/// declared wins ties. Falls back to a fragment of a random hidden target when
/// nothing matches. `None` only when no hidden targets are left.
pub fn select_hint<R: Rng + ?Sized>(
    unrevealed_targets: &[&str],
    categories: &[Category],
    used: &BTreeSet<String>,
    prefix_chars: usize,
    rng: &mut R,
) -> Option<Hint> {
    if unrevealed_targets.is_empty() {
        return None;
    }

    let mut best: Option<(&Category, usize)> = None;
    for category in categories.iter().filter(|c| !used.contains(&c.name)) {
        let matches = unrevealed_targets
            .iter()
            .filter(|&&word| category.contains(word))
            .count();
        if matches > best.map_or(0, |(_, count)| count) {
            best = Some((category, matches));
        }
    }

    if let Some((category, count)) = best {
        log::debug!("hint {:?} covers {} targets", category.name, count);
        return Some(Hint::new(category.name.clone(), count as CardCount));
    }

    let word = unrevealed_targets.choose(rng)?;
    log::debug!("no category fits, falling back to a fragment of {:?}", word);
    Some(Hint::fragment(word, prefix_chars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn category(name: &str, words: &[&str]) -> Category {
        Category {
            name: String::from(name),
            words: words.iter().map(|&w| String::from(w)).collect(),
        }
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(11)
    }

    #[test]
    fn picks_category_with_most_matches() {
        let categories = vec![
            category("Food", &["Apple", "Bread"]),
            category("Animals", &["Lion", "Tiger", "Eagle", "Shark"]),
        ];
        let targets = ["Lion", "Tiger", "Eagle", "Apple", "Moon"];

        let hint = select_hint(&targets, &categories, &BTreeSet::new(), 3, &mut rng());

        assert_eq!(hint, Some(Hint::new("Animals", 3)));
    }

    #[test]
    fn ties_go_to_first_declared_category() {
        let categories = vec![
            category("Space", &["Moon", "Star"]),
            category("Music", &["Star", "Drum"]),
        ];
        let targets = ["Moon", "Star", "Drum"];

        let hint = select_hint(&targets, &categories, &BTreeSet::new(), 3, &mut rng());

        assert_eq!(hint, Some(Hint::new("Space", 2)));
    }

    #[test]
    fn used_categories_are_skipped() {
        let categories = vec![
            category("Animals", &["Lion", "Tiger"]),
            category("Sports", &["Horse"]),
        ];
        let used = BTreeSet::from([String::from("Animals")]);
        let targets = ["Lion", "Tiger", "Horse"];

        let hint = select_hint(&targets, &categories, &used, 3, &mut rng());

        assert_eq!(hint, Some(Hint::new("Sports", 1)));
    }

    #[test]
    fn falls_back_to_fragment_of_a_target() {
        let categories = vec![category("Food", &["Apple"])];
        let targets = ["Mountain", "Volcano"];

        let hint = select_hint(&targets, &categories, &BTreeSet::new(), 3, &mut rng()).unwrap();

        assert_eq!(hint.count, 1);
        assert!(["Mou...", "Vol..."].contains(&hint.label.as_str()));
    }

    #[test]
    fn falls_back_when_every_category_is_used() {
        let categories = vec![category("Animals", &["Lion"])];
        let used = BTreeSet::from([String::from("Animals")]);

        let hint = select_hint(&["Lion"], &categories, &used, 3, &mut rng());

        assert_eq!(hint, Some(Hint::new("Lio...", 1)));
    }

    #[test]
    fn fragment_counts_characters_not_bytes() {
        assert_eq!(Hint::fragment("Đại bàng", 3).label, "Đại...");
        assert_eq!(Hint::fragment("Ô", 3).label, "Ô...");
    }

    #[test]
    fn nothing_to_hint_without_targets() {
        let categories: Vec<Category> = vec![category("Animals", &["Lion"])];

        assert_eq!(select_hint(&[], &categories, &BTreeSet::new(), 3, &mut rng()), None);
    }

    #[test]
    fn display_matches_history_format() {
        assert_eq!(alloc::format!("{}", Hint::new("Animals", 3)), "Animals: 3");
    }
}
