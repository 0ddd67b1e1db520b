use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

/// Local storage key of the single save slot.
pub const STORAGE_KEY: &str = "wordspy:game:v1";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Could not read saved game: {0}")]
    Read(String),
    #[error("Could not write saved game: {0}")]
    Write(String),
    #[error("Saved game is corrupt: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = core::result::Result<T, StoreError>;

/// A single durable string slot, `localStorage` in the browser.
pub trait SessionStore {
    fn read(&self) -> StoreResult<Option<String>>;
    fn write(&mut self, value: &str) -> StoreResult<()>;
    fn clear(&mut self) -> StoreResult<()>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn with_contents(value: impl Into<String>) -> Self {
        Self {
            slot: Some(value.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl SessionStore for MemoryStore {
    fn read(&self) -> StoreResult<Option<String>> {
        Ok(self.slot.clone())
    }

    fn write(&mut self, value: &str) -> StoreResult<()> {
        self.slot = Some(String::from(value));
        Ok(())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.slot = None;
        Ok(())
    }
}

/// On-disk shape of a session. The revealed-word set is stored as a list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub rules: Rules,
    pub language: String,
    pub seed: u64,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub revealed_cards: Vec<String>,
    pub phase: Phase,
    pub current_hint: Option<Hint>,
    #[serde(default)]
    pub hint_history: Vec<Hint>,
    #[serde(default)]
    pub used_categories: Vec<String>,
    pub current_guesses: CardCount,
    pub stored_guesses: CardCount,
    pub total_time_left: Seconds,
    pub turn_time_left: Option<Seconds>,
    #[serde(default)]
    pub spymaster_mode: bool,
    pub game_over: bool,
}

impl SessionRecord {
    pub fn is_resumable(&self) -> bool {
        !self.game_over && !self.cards.is_empty()
    }
}

impl From<&GameSession> for SessionRecord {
    fn from(session: &GameSession) -> Self {
        Self {
            rules: session.rules,
            language: session.language.clone(),
            seed: session.seed,
            cards: session.board.cards().to_vec(),
            revealed_cards: session.revealed.iter().cloned().collect(),
            phase: session.phase,
            current_hint: session.hint.clone(),
            hint_history: session.history.clone(),
            used_categories: session.used_categories.iter().cloned().collect(),
            current_guesses: session.guesses,
            stored_guesses: session.carry_over,
            total_time_left: session.total_time_left,
            turn_time_left: session.turn_time_left,
            spymaster_mode: session.spymaster,
            game_over: session.phase.is_finished(),
        }
    }
}

impl TryFrom<SessionRecord> for GameSession {
    type Error = GameError;

    fn try_from(record: SessionRecord) -> Result<Self> {
        if record.phase.is_finished() {
            return Err(GameError::AlreadyEnded);
        }

        let revealed: BTreeSet<String> = record.revealed_cards.into_iter().collect();
        let cards = record
            .cards
            .into_iter()
            .map(|mut card| {
                card.revealed |= revealed.contains(&card.word);
                card
            })
            .collect();
        let board = Board::from_cards(cards, &record.rules)?;

        let mut session = GameSession::with_board(record.rules, record.language, board, record.seed)?;
        session.phase = record.phase;
        session.hint = record.current_hint;
        session.history = record.hint_history;
        session.used_categories = record.used_categories.into_iter().collect();
        session.guesses = record.current_guesses;
        session.carry_over = record.stored_guesses;
        session.total_time_left = record.total_time_left;
        session.turn_time_left = record.turn_time_left;
        session.spymaster = record.spymaster_mode;
        session.stop_clock();

        Ok(session)
    }
}

pub fn encode_session(session: &GameSession) -> StoreResult<String> {
    serde_json::to_string(&SessionRecord::from(session))
        .map_err(|err| StoreError::Write(format!("{err}")))
}

pub fn decode_session(raw: &str) -> StoreResult<SessionRecord> {
    serde_json::from_str(raw).map_err(|err| StoreError::Corrupt(format!("{err}")))
}

/// Writes `session` to the slot. Failures are logged and otherwise ignored.
pub fn save_session(store: &mut impl SessionStore, session: &GameSession) {
    if let Err(err) = encode_session(session).and_then(|raw| store.write(&raw)) {
        log::error!("Failed to save game state: {}", err);
    }
}

/// Restores a game that was still in progress. The clock of the returned
/// session is stopped until the caller starts it again.
pub fn load_session(store: &impl SessionStore) -> Option<GameSession> {
    let raw = match store.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            log::error!("Failed to load game state: {}", err);
            return None;
        }
    };

    let record = match decode_session(&raw) {
        Ok(record) => record,
        Err(err) => {
            log::error!("Failed to load game state: {}", err);
            return None;
        }
    };

    if !record.is_resumable() {
        log::debug!("saved game is over or empty, not resuming");
        return None;
    }

    match GameSession::try_from(record) {
        Ok(session) => {
            log::info!("resumed game in {}", session.language());
            Some(session)
        }
        Err(err) => {
            log::error!("Failed to restore game state: {}", err);
            None
        }
    }
}

pub fn clear_session(store: &mut impl SessionStore) {
    if let Err(err) = store.clear() {
        log::error!("Failed to clear game state: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::layout;
    use alloc::vec;

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn read(&self) -> StoreResult<Option<String>> {
            Err(StoreError::Read(String::from("storage disabled")))
        }

        fn write(&mut self, _value: &str) -> StoreResult<()> {
            Err(StoreError::Write(String::from("quota exceeded")))
        }

        fn clear(&mut self) -> StoreResult<()> {
            Err(StoreError::Write(String::from("storage disabled")))
        }
    }

    fn played_session() -> GameSession {
        let rules = Rules::turn_based();
        let mut session = GameSession::with_board(rules, "fr", layout(&rules), 9).unwrap();
        let categories = vec![Category {
            name: String::from("Animaux"),
            words: vec![String::from("t0"), String::from("t1"), String::from("t2")],
        }];
        session.request_hint(&categories).unwrap();
        session.reveal(0).unwrap();
        session.tick(&categories);
        session.toggle_spymaster();
        session
    }

    #[test]
    fn saved_session_resumes_with_clock_stopped() {
        let session = played_session();
        let mut store = MemoryStore::default();

        save_session(&mut store, &session);
        let restored = load_session(&store).unwrap();

        assert!(!restored.is_clock_running());
        assert_eq!(restored.snapshot(), session.snapshot());
        assert_eq!(restored.revealed_words(), session.revealed_words());
        assert_eq!(restored.history(), session.history());

        let mut resumed = restored;
        resumed.start_clock();
        assert_eq!(resumed, session);
    }

    #[test]
    fn revealed_words_are_stored_as_a_list() {
        let mut store = MemoryStore::default();
        save_session(&mut store, &played_session());

        let record = decode_session(store.contents().unwrap()).unwrap();

        assert_eq!(record.revealed_cards, vec![String::from("t0")]);
        assert!(!record.game_over);
        assert!(store.contents().unwrap().contains("\"revealedCards\":[\"t0\"]"));
    }

    #[test]
    fn revealed_list_is_folded_back_into_cards() {
        let mut record = SessionRecord::from(&played_session());
        record.revealed_cards.push(String::from("n3"));

        let session = GameSession::try_from(record).unwrap();

        let index = session.board().position_of("n3").unwrap();
        assert!(session.board()[index].revealed);
        assert!(session.revealed_words().contains("n3"));
    }

    #[test]
    fn finished_game_is_not_resumed() {
        let mut session = played_session();
        session.start_clock();
        let trap = session.board().position_of("trap").unwrap();
        session.reveal(trap).unwrap();
        let mut store = MemoryStore::default();

        save_session(&mut store, &session);

        assert!(decode_session(store.contents().unwrap()).unwrap().game_over);
        assert_eq!(load_session(&store), None);
    }

    #[test]
    fn empty_board_is_not_resumed() {
        let mut record = SessionRecord::from(&played_session());
        record.cards.clear();
        let store = MemoryStore::with_contents(serde_json::to_string(&record).unwrap());

        assert_eq!(load_session(&store), None);
    }

    #[test]
    fn corrupt_or_missing_save_is_ignored() {
        assert_eq!(load_session(&MemoryStore::default()), None);
        assert_eq!(load_session(&MemoryStore::with_contents("{not json")), None);
        assert_eq!(load_session(&BrokenStore), None);
    }

    #[test]
    fn write_failures_do_not_escape() {
        let mut store = BrokenStore;

        save_session(&mut store, &played_session());
        clear_session(&mut store);
    }
}
