use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

const BUNDLED: &str = include_str!("../data/wordbank.json");

/// A named group of words a hint can point at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
}

impl Category {
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|member| member == word)
    }
}

/// Words and hint categories for one language. Categories keep their declared
/// order, which decides ties during hint selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePack {
    pub code: String,
    pub name: String,
    pub words: Vec<String>,
    pub categories: Vec<Category>,
}

impl LanguagePack {
    pub fn validate(&self) -> Result<()> {
        let distinct: BTreeSet<&str> = self.words.iter().map(String::as_str).collect();
        if distinct.len() != self.words.len() {
            return Err(GameError::MalformedWordBank(format!(
                "duplicate words in {:?}",
                self.code
            )));
        }

        if self.words.len() < BOARD_SIZE {
            return Err(GameError::InsufficientWordBank {
                language: self.code.clone(),
                found: self.words.len(),
            });
        }

        for category in &self.categories {
            for word in category.words.iter().filter(|w| !distinct.contains(w.as_str())) {
                log::warn!(
                    "[{}] category {:?} lists {:?} which is not in the word list",
                    self.code,
                    category.name,
                    word
                );
            }
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBank {
    pub languages: Vec<LanguagePack>,
}

impl WordBank {
    pub fn new(languages: Vec<LanguagePack>) -> Result<Self> {
        let bank = Self { languages };
        bank.validate()?;
        Ok(bank)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let bank: Self = serde_json::from_str(json)
            .map_err(|err| GameError::MalformedWordBank(format!("{err}")))?;
        bank.validate()?;
        Ok(bank)
    }

    /// The word bank shipped with the game: Vietnamese, English, French and German.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED)
    }

    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(GameError::MalformedWordBank(String::from("no languages")));
        }

        let codes: BTreeSet<&str> = self.languages.iter().map(|l| l.code.as_str()).collect();
        if codes.len() != self.languages.len() {
            return Err(GameError::MalformedWordBank(String::from(
                "duplicate language codes",
            )));
        }

        self.languages.iter().try_for_each(LanguagePack::validate)
    }

    pub fn language(&self, code: &str) -> Result<&LanguagePack> {
        self.languages
            .iter()
            .find(|pack| pack.code == code)
            .ok_or_else(|| GameError::UnknownLanguage(String::from(code)))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(|pack| pack.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_bank_supports_every_language() {
        let bank = WordBank::bundled().unwrap();

        assert_eq!(bank.codes().collect::<Vec<_>>(), ["vi", "en", "fr", "de"]);
        for pack in &bank.languages {
            assert!(pack.words.len() >= BOARD_SIZE, "{} is too small", pack.code);
            assert!(!pack.categories.is_empty());
        }
    }

    #[test]
    fn bundled_categories_only_name_known_words() {
        let bank = WordBank::bundled().unwrap();

        for pack in &bank.languages {
            for category in &pack.categories {
                for word in &category.words {
                    assert!(
                        pack.words.contains(word),
                        "[{}] {} lists unknown word {}",
                        pack.code,
                        category.name,
                        word
                    );
                }
            }
        }
    }

    #[test]
    fn short_word_list_is_rejected() {
        let json = r#"{"languages":[{"code":"xx","name":"Tiny","words":["a","b"],"categories":[]}]}"#;

        assert_eq!(
            WordBank::from_json(json),
            Err(GameError::InsufficientWordBank {
                language: String::from("xx"),
                found: 2,
            })
        );
    }

    #[test]
    fn unknown_language_is_an_error() {
        let bank = WordBank::bundled().unwrap();

        assert_eq!(
            bank.language("tlh"),
            Err(GameError::UnknownLanguage(String::from("tlh")))
        );
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn bundled_bank_loads_on_wasm() {
        let bank = WordBank::bundled().unwrap();

        for code in ["vi", "en", "fr", "de"] {
            let pack = bank.language(code).unwrap();
            assert!(pack.words.len() >= BOARD_SIZE);
        }
    }

    #[wasm_bindgen_test]
    fn session_deals_on_wasm() {
        let bank = WordBank::bundled().unwrap();
        let session = GameSession::new(Rules::turn_based(), bank.language("en").unwrap(), 7).unwrap();

        assert_eq!(session.board().len(), BOARD_SIZE);
        assert!(session.hint().is_some());
    }
}
