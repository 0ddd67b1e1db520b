use alloc::string::String;

use crate::*;

/// The action surface a presentation layer drives: owns the word bank, the
/// selected rules and language, and the game in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    bank: WordBank,
    rules: Rules,
    language: String,
    session: Option<GameSession>,
}

impl Game {
    pub fn new(bank: WordBank, rules: Rules, language: &str) -> Result<Self> {
        rules.validate()?;
        bank.language(language)?;

        Ok(Self {
            bank,
            rules,
            language: String::from(language),
            session: None,
        })
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn rules(&self) -> &Rules {
        self.session.as_ref().map_or(&self.rules, GameSession::rules)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Rules for the next new game; the game in progress keeps its own.
    pub fn set_rules(&mut self, rules: Rules) -> Result<()> {
        rules.validate()?;
        self.rules = rules;
        Ok(())
    }

    /// Replaces any game in progress with a freshly dealt one.
    pub fn new_game(&mut self, seed: u64) -> Result<&GameSession> {
        let pack = self.bank.language(&self.language)?;
        let session = GameSession::new(self.rules, pack, seed)?;
        Ok(&*self.session.insert(session))
    }

    pub fn end_game(&mut self) -> Result<()> {
        if !self.rules().allow_end_game {
            return Err(GameError::NotSupported);
        }

        match self.session.take() {
            Some(session) => {
                log::info!(
                    "game ended by player with {}/{} targets found",
                    session.targets_found(),
                    session.rules().targets
                );
                Ok(())
            }
            None => Err(GameError::NoSession),
        }
    }

    /// Switches language and deals a new game in it.
    pub fn set_language(&mut self, code: &str, seed: u64) -> Result<&GameSession> {
        self.bank.language(code)?;
        self.language = String::from(code);
        self.new_game(seed)
    }

    pub fn request_hint(&mut self) -> Result<Option<Hint>> {
        let (session, pack) = self.parts()?;
        session.request_hint(&pack.categories)
    }

    pub fn end_turn(&mut self) -> Result<Option<Hint>> {
        let (session, pack) = self.parts()?;
        session.end_turn(&pack.categories)
    }

    pub fn toggle_spymaster_view(&mut self) -> Result<bool> {
        let session = self.session.as_mut().ok_or(GameError::NoSession)?;
        Ok(session.toggle_spymaster())
    }

    pub fn click_card(&mut self, index: usize) -> Result<RevealOutcome> {
        let session = self.session.as_mut().ok_or(GameError::NoSession)?;
        session.reveal(index)
    }

    /// Issues the hint a previous click scheduled, if it is still due.
    pub fn resolve_pending(&mut self) -> Result<Option<Hint>> {
        let (session, pack) = self.parts()?;
        session.resolve_pending(&pack.categories)
    }

    /// One second of wall-clock time.
    pub fn tick(&mut self) -> TickOutcome {
        match self.parts() {
            Ok((session, pack)) => session.tick(&pack.categories),
            Err(_) => TickOutcome::NoChange,
        }
    }

    pub fn start_clock(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.start_clock();
        }
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.session.as_ref().map(GameSession::snapshot)
    }

    /// Picks up a saved game in progress. Returns whether one was found; its
    /// clock stays stopped until `start_clock`.
    pub fn resume(&mut self, store: &impl SessionStore) -> bool {
        let Some(session) = load_session(store) else {
            return false;
        };

        if let Err(err) = self.bank.language(session.language()) {
            log::warn!("Discarding saved game: {}", err);
            return false;
        }

        self.language = String::from(session.language());
        self.session = Some(session);
        true
    }

    pub fn save(&self, store: &mut impl SessionStore) {
        match &self.session {
            Some(session) => save_session(store, session),
            None => clear_session(store),
        }
    }

    fn parts(&mut self) -> Result<(&mut GameSession, &LanguagePack)> {
        let session = self.session.as_mut().ok_or(GameError::NoSession)?;
        let pack = self.bank.language(&session.language)?;
        Ok((session, pack))
    }
}
