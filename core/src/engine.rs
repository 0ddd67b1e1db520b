use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::mem;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// How many of the latest hints the history line shows.
pub const HISTORY_SHOWN: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    WaitingForHint,
    AwaitingGuesses,
    /// A wrong guess or the turn timer ended the turn, a new hint is due.
    TurnExpired,
    /// The guess budget ran out on a correct guess, a new hint is due.
    HintExhausted,
    Won,
    LostToTrap,
    TimeUp {
        won: bool,
    },
}

impl Phase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::LostToTrap | Self::TimeUp { .. })
    }

    pub const fn is_hint_pending(self) -> bool {
        matches!(self, Self::TurnExpired | Self::HintExhausted)
    }

    pub const fn is_win(self) -> bool {
        matches!(self, Self::Won | Self::TimeUp { won: true })
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::WaitingForHint
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    NoGuessesLeft,
    Revealed(Role),
    /// The turn is over; the driver should call `resolve_pending` after
    /// `Rules::hint_delay_ms`.
    HintScheduled(Role),
    Won,
    HitTrap,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            NoGuessesLeft => false,
            Revealed(_) => true,
            HintScheduled(_) => true,
            Won => true,
            HitTrap => true,
        }
    }

    pub const fn is_hint_scheduled(self) -> bool {
        matches!(self, Self::HintScheduled(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    NoChange,
    Ticked,
    /// The turn timer ran out and a new hint was issued.
    TurnRolled,
    TimeUp,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub word: String,
    pub revealed: bool,
    /// Only known when the card is revealed, the spymaster view is on, or the
    /// game is over.
    pub role: Option<Role>,
}

/// Everything a presentation layer needs to draw the current state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub language: String,
    pub cards: Vec<CardView>,
    pub hint: Option<Hint>,
    pub history: Vec<String>,
    pub guesses_left: CardCount,
    pub carry_over: CardCount,
    pub targets_found: CardCount,
    pub targets_total: CardCount,
    pub opposing_found: CardCount,
    pub opposing_total: CardCount,
    pub total_time_left: Seconds,
    pub turn_time_left: Option<Seconds>,
    pub spymaster: bool,
    pub phase: Phase,
}

impl Snapshot {
    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }
}

/// One game in progress: the board plus the hint and guess bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub(crate) rules: Rules,
    pub(crate) language: String,
    pub(crate) seed: u64,
    pub(crate) board: Board,
    pub(crate) revealed: BTreeSet<String>,
    pub(crate) phase: Phase,
    pub(crate) hint: Option<Hint>,
    pub(crate) history: Vec<Hint>,
    pub(crate) used_categories: BTreeSet<String>,
    pub(crate) guesses: CardCount,
    pub(crate) carry_over: CardCount,
    pub(crate) total_time_left: Seconds,
    pub(crate) turn_time_left: Option<Seconds>,
    pub(crate) spymaster: bool,
    pub(crate) clock_running: bool,
}

impl GameSession {
    /// Deals a fresh board for `pack`, starts the clock and issues the first hint.
    pub fn new(rules: Rules, pack: &LanguagePack, seed: u64) -> Result<Self> {
        let board = RandomBoardGenerator::new(seed)
            .generate(&pack.words, &rules)
            .map_err(|err| match err {
                GameError::InsufficientWordBank { found, .. } => GameError::InsufficientWordBank {
                    language: pack.code.clone(),
                    found,
                },
                err => err,
            })?;

        let mut session = Self::with_board(rules, pack.code.as_str(), board, seed)?;
        session.request_hint(&pack.categories)?;
        log::info!("new game: language {}, seed {}", pack.code, seed);
        Ok(session)
    }

    /// Starts a game on a fixed board. No hint is issued yet.
    pub fn with_board(
        rules: Rules,
        language: impl Into<String>,
        board: Board,
        seed: u64,
    ) -> Result<Self> {
        rules.validate()?;
        board.validate(&rules)?;

        let revealed = board
            .cards()
            .iter()
            .filter(|card| card.revealed)
            .map(|card| card.word.clone())
            .collect();

        Ok(Self {
            rules,
            language: language.into(),
            seed,
            board,
            revealed,
            phase: Phase::WaitingForHint,
            hint: None,
            history: Vec::new(),
            used_categories: BTreeSet::new(),
            guesses: 0,
            carry_over: 0,
            total_time_left: rules.game_seconds,
            turn_time_left: rules.turn_seconds(),
            spymaster: false,
            clock_running: true,
        })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn hint(&self) -> Option<&Hint> {
        self.hint.as_ref()
    }

    pub fn history(&self) -> &[Hint] {
        &self.history
    }

    pub fn used_categories(&self) -> &BTreeSet<String> {
        &self.used_categories
    }

    pub fn revealed_words(&self) -> &BTreeSet<String> {
        &self.revealed
    }

    pub fn guesses_left(&self) -> CardCount {
        self.guesses
    }

    pub fn carry_over(&self) -> CardCount {
        self.carry_over
    }

    pub fn total_time_left(&self) -> Seconds {
        self.total_time_left
    }

    pub fn turn_time_left(&self) -> Option<Seconds> {
        self.turn_time_left
    }

    pub fn is_spymaster(&self) -> bool {
        self.spymaster
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock_running
    }

    pub fn targets_found(&self) -> CardCount {
        self.board.count_revealed(Role::Target) as CardCount
    }

    pub fn opposing_found(&self) -> CardCount {
        self.board.count_revealed(Role::Opposing) as CardCount
    }

    pub fn start_clock(&mut self) {
        if !self.phase.is_finished() {
            self.clock_running = true;
        }
    }

    pub fn stop_clock(&mut self) {
        self.clock_running = false;
    }

    pub fn toggle_spymaster(&mut self) -> bool {
        self.spymaster = !self.spymaster;
        self.spymaster
    }

    /// Picks and issues the next hint. Returns `None` without touching the
    /// state when there is nothing left to hint.
    pub fn request_hint(&mut self, categories: &[Category]) -> Result<Option<Hint>> {
        self.check_not_finished()?;

        let hint = {
            let targets: Vec<&str> = self.board.unrevealed_targets().collect();
            let no_exclusions = BTreeSet::new();
            let used = if self.rules.exclude_used_categories {
                &self.used_categories
            } else {
                &no_exclusions
            };
            let mut rng = SmallRng::seed_from_u64(self.seed.wrapping_add(self.history.len() as u64));
            select_hint(
                &targets,
                categories,
                used,
                self.rules.hint_prefix_chars,
                &mut rng,
            )
        };

        let Some(hint) = hint else {
            log::warn!("hint requested with no hidden targets left");
            return Ok(None);
        };

        self.issue_hint(hint.clone());
        Ok(Some(hint))
    }

    /// Issues the hint scheduled by a wrong or exhausting guess. Does nothing
    /// if the game moved on in the meantime.
    pub fn resolve_pending(&mut self, categories: &[Category]) -> Result<Option<Hint>> {
        if self.phase.is_finished() || !self.phase.is_hint_pending() {
            return Ok(None);
        }
        self.request_hint(categories)
    }

    pub fn end_turn(&mut self, categories: &[Category]) -> Result<Option<Hint>> {
        if !self.rules.is_turn_based() {
            return Err(GameError::NotSupported);
        }
        self.check_not_finished()?;

        self.expire_turn();
        self.request_hint(categories)
    }

    pub fn reveal(&mut self, index: usize) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let card = self.board.get(index)?;
        self.check_not_finished()?;

        if card.revealed {
            return Ok(NoChange);
        }
        if self.guesses == 0 {
            return Ok(NoGuessesLeft);
        }

        let role = card.role;
        let word = card.word.clone();
        self.board.reveal(index)?;
        log::trace!("revealed {:?} ({:?})", word, role);
        self.revealed.insert(word);

        let outcome = match role {
            Role::Trap => {
                self.guesses -= 1;
                self.finish(Phase::LostToTrap);
                HitTrap
            }
            Role::Target => {
                self.guesses -= 1;
                if self.board.all_targets_revealed() {
                    self.finish(Phase::Won);
                    Won
                } else if self.guesses == 0 {
                    self.phase = Phase::HintExhausted;
                    HintScheduled(role)
                } else {
                    Revealed(role)
                }
            }
            Role::Opposing | Role::Neutral if self.rules.is_turn_based() => {
                self.flush_guesses();
                self.phase = Phase::TurnExpired;
                HintScheduled(role)
            }
            Role::Opposing | Role::Neutral => {
                self.guesses -= 1;
                if self.guesses == 0 {
                    self.phase = Phase::HintExhausted;
                    HintScheduled(role)
                } else {
                    Revealed(role)
                }
            }
        };

        Ok(outcome)
    }

    /// Advances both countdowns by one second.
    pub fn tick(&mut self, categories: &[Category]) -> TickOutcome {
        if self.phase.is_finished() || !self.clock_running {
            return TickOutcome::NoChange;
        }

        self.total_time_left = self.total_time_left.saturating_sub(1);
        if self.total_time_left == 0 {
            let won = self.targets_found() > self.opposing_found();
            self.finish(Phase::TimeUp { won });
            return TickOutcome::TimeUp;
        }

        let Some(left) = self.turn_time_left else {
            return TickOutcome::Ticked;
        };
        let left = left.saturating_sub(1);
        self.turn_time_left = Some(left);
        if left > 0 {
            return TickOutcome::Ticked;
        }

        log::debug!("turn timer ran out with {} guesses left", self.guesses);
        self.expire_turn();
        if let Err(err) = self.request_hint(categories) {
            log::warn!("could not issue hint after turn timeout: {}", err);
        }
        TickOutcome::TurnRolled
    }

    pub fn snapshot(&self) -> Snapshot {
        let show_roles = self.spymaster || self.phase.is_finished();
        let cards = self
            .board
            .cards()
            .iter()
            .map(|card| CardView {
                word: card.word.clone(),
                revealed: card.revealed,
                role: (card.revealed || show_roles).then_some(card.role),
            })
            .collect();

        let skip = self.history.len().saturating_sub(HISTORY_SHOWN);
        let history = self.history[skip..].iter().map(|hint| hint.to_string()).collect();

        Snapshot {
            language: self.language.clone(),
            cards,
            hint: self.hint.clone(),
            history,
            guesses_left: self.guesses,
            carry_over: self.carry_over,
            targets_found: self.targets_found(),
            targets_total: self.rules.targets,
            opposing_found: self.opposing_found(),
            opposing_total: self.rules.opposing,
            total_time_left: self.total_time_left,
            turn_time_left: self.turn_time_left,
            spymaster: self.spymaster,
            phase: self.phase,
        }
    }

    fn issue_hint(&mut self, hint: Hint) {
        let carried = if self.rules.carries_over() {
            mem::take(&mut self.carry_over)
        } else {
            0
        };
        self.guesses = hint.count.saturating_add(carried);
        if self.rules.exclude_used_categories {
            self.used_categories.insert(hint.label.clone());
        }
        self.turn_time_left = self.rules.turn_seconds();
        log::debug!("hint {} (+{} carried)", hint, carried);

        self.history.push(hint.clone());
        self.hint = Some(hint);
        self.phase = Phase::AwaitingGuesses;
    }

    /// Ends the current turn, moving any unused guesses into the carry-over pool.
    fn expire_turn(&mut self) {
        self.flush_guesses();
        self.turn_time_left = self.rules.turn_seconds();
        self.phase = Phase::TurnExpired;
    }

    fn flush_guesses(&mut self) {
        let left = mem::take(&mut self.guesses);
        if self.rules.carries_over() {
            self.carry_over = self.carry_over.saturating_add(left);
        }
    }

    fn finish(&mut self, phase: Phase) {
        if self.phase.is_finished() {
            return;
        }

        self.phase = phase;
        self.stop_clock();
        log::info!(
            "game over: {:?}, {}/{} targets found",
            phase,
            self.targets_found(),
            self.rules.targets
        );
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.phase.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
