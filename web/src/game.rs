use crate::RuleSet;
use crate::i18n::{self, Labels};
use crate::storage::{LanguagePreference, LocalSlot};
use crate::utils::*;
use gloo::timers::callback::{Interval, Timeout};
use web_sys::HtmlSelectElement;
use wordspy_core as game;
use yew::prelude::*;

const TOTAL_WARNING_SECS: game::Seconds = 60;
const TURN_WARNING_SECS: game::Seconds = 30;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    NewGame,
    EndGame,
    RequestHint,
    EndTurn,
    ToggleSpymaster,
    ClickCard(usize),
    SetLanguage(String),
    Tick,
    ResolvePending,
    DismissNotice,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub rules: RuleSet,
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: usize,
    card: game::CardView,
    spymaster: bool,
    callback: Callback<usize>,
}

#[function_component(CardTile)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        index,
        card,
        spymaster,
        callback,
    } = props.clone();

    let mut class = classes!("card");
    if card.revealed {
        class.push("revealed");
    } else if spymaster {
        class.push("spymaster-mode");
    }
    if let Some(role) = card.role {
        class.push(role.class_name());
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", index);
        callback.emit(index);
    });

    html! {
        <div {class} {onclick}>{card.word}</div>
    }
}

fn history_line(history: &[String]) -> String {
    history.join(" • ")
}

fn clock_class(seconds: game::Seconds, warn_below: game::Seconds) -> Classes {
    if seconds < warn_below {
        classes!("timer", "warning")
    } else {
        classes!("timer")
    }
}

/// Headline and detail of the game-over modal.
fn outcome_text(labels: &Labels, snapshot: &game::Snapshot) -> (&'static str, String) {
    use game::Phase::*;
    match snapshot.phase {
        Won => (labels.you_win, labels.win_message.to_string()),
        LostToTrap => (labels.you_lose, labels.lose_assassin.to_string()),
        TimeUp { won: true } => (labels.time_up, labels.win_message.to_string()),
        TimeUp { won: false } => {
            let detail = format!(
                "{} {}/{} {}",
                labels.lose_time, snapshot.targets_found, snapshot.targets_total, labels.cards_found
            );
            (labels.time_up_short(), detail)
        }
        _ => ("", String::new()),
    }
}

/// Browser timer handles. Dropping a handle cancels it.
#[derive(Default)]
struct Timers {
    clock: Option<Interval>,
    pending_hint: Option<Timeout>,
}

impl Timers {
    fn clear(&mut self) {
        self.clock = None;
        self.pending_hint = None;
    }

    fn cancel_hint(&mut self) {
        self.pending_hint = None;
    }

    fn schedule_hint(&mut self, timeout: Timeout) {
        self.pending_hint = Some(timeout);
    }

    /// Starts a clock with `make` unless one is running. Returns whether it did.
    fn keep_clock(&mut self, make: impl FnOnce() -> Interval) -> bool {
        if self.clock.is_some() {
            return false;
        }
        self.clock = Some(make());
        true
    }
}

pub(crate) struct GameView {
    game: game::Game,
    seed: Option<u64>,
    no_guesses_notice: bool,
    timers: Timers,
}

impl GameView {
    /// A forced seed is used once, for the first game dealt.
    fn next_seed(&mut self) -> u64 {
        self.seed.take().unwrap_or_else(js_random_seed)
    }

    fn start_new_game(&mut self) {
        self.timers.clear();
        self.no_guesses_notice = false;
        let seed = self.next_seed();
        match self.game.new_game(seed) {
            Ok(_) => log::debug!("new game with seed {}", seed),
            Err(err) => log::error!("Could not start a new game: {}", err),
        }
    }

    fn create_clock(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1000, move || link.send_message(Msg::Tick))
    }

    fn schedule_hint(&mut self, ctx: &Context<Self>) {
        let link = ctx.link().clone();
        let delay = self.game.rules().hint_delay_ms;
        self.timers.schedule_hint(Timeout::new(delay, move || {
            link.send_message(Msg::ResolvePending)
        }));
    }

    /// Keeps the interval alive exactly while a game is being played.
    fn sync_clock(&mut self, ctx: &Context<Self>) {
        let playing = self
            .game
            .session()
            .is_some_and(|session| !session.is_finished());
        if !playing {
            self.timers.clear();
        } else if self.timers.keep_clock(|| GameView::create_clock(ctx)) {
            log::trace!("clock started");
        }
    }

    fn view_stats(&self, labels: &Labels, snapshot: &game::Snapshot) -> Html {
        let total = snapshot.total_time_left;
        html! {
            <nav class="stats">
                <span>{format!("{}: {}/{}", labels.targets_found, snapshot.targets_found, snapshot.targets_total)}</span>
                <span>{format!("{}: {}", labels.guesses_left, snapshot.guesses_left)}</span>
                <span class={clock_class(total, TOTAL_WARNING_SECS)}>
                    {format!("{}: {}", labels.timer_total, format_clock(total))}
                </span>
                {
                    match snapshot.turn_time_left {
                        Some(turn) => html! {
                            <span class={clock_class(turn, TURN_WARNING_SECS)}>
                                {format!("{}: {}", labels.timer_turn, format_clock(turn))}
                            </span>
                        },
                        None => html! {},
                    }
                }
            </nav>
        }
    }

    fn view_hint(&self, labels: &Labels, snapshot: &game::Snapshot) -> Html {
        let hint = snapshot
            .hint
            .as_ref()
            .map_or_else(String::new, |hint| hint.to_string());
        html! {
            <section class="hint">
                <div>{format!("{}: ", labels.ai_hint)}<strong>{hint}</strong></div>
                <small>{format!("{} {}", labels.hint_history, history_line(&snapshot.history))}</small>
            </section>
        }
    }

    fn view_buttons(&self, ctx: &Context<Self>, labels: &Labels) -> Html {
        use Msg::*;

        let rules = self.game.rules();
        let end_turn = if rules.is_turn_based() {
            html! { <button onclick={ctx.link().callback(|_| EndTurn)}>{labels.btn_end_turn}</button> }
        } else {
            html! {}
        };
        let end_game = if rules.allow_end_game {
            html! { <button onclick={ctx.link().callback(|_| EndGame)}>{labels.btn_end_game}</button> }
        } else {
            html! {}
        };

        html! {
            <div class="buttons">
                <button onclick={ctx.link().callback(|_| RequestHint)}>{labels.btn_new_hint}</button>
                {end_turn}
                <button onclick={ctx.link().callback(|_| ToggleSpymaster)}>{labels.btn_spymaster}</button>
                <button onclick={ctx.link().callback(|_| NewGame)}>{labels.btn_new_game}</button>
                {end_game}
            </div>
        }
    }

    fn view_language_select(&self, ctx: &Context<Self>) -> Html {
        let current = self.game.language().to_string();
        let onchange = ctx.link().callback(|e: Event| {
            let select = e.target_unchecked_into::<HtmlSelectElement>();
            Msg::SetLanguage(select.value())
        });

        html! {
            <select class="language" {onchange}>
                {
                    for self.game.bank().languages.iter().map(|pack| html! {
                        <option value={pack.code.clone()} selected={pack.code == current}>{pack.name.clone()}</option>
                    })
                }
            </select>
        }
    }

    fn view_game_over(&self, ctx: &Context<Self>, labels: &Labels, snapshot: &game::Snapshot) -> Html {
        if !snapshot.is_finished() {
            return html! {};
        }
        let (headline, detail) = outcome_text(labels, snapshot);
        let class = classes!("game-over", if snapshot.phase.is_win() { "win" } else { "lose" });

        html! {
            <Modal>
                <dialog {class} open={true}>
                    <h2>{headline}</h2>
                    <p>{detail}</p>
                    <button onclick={ctx.link().callback(|_| Msg::NewGame)}>{labels.btn_play_again}</button>
                </dialog>
            </Modal>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { rules, seed } = ctx.props().clone();
        let bank = game::WordBank::bundled().expect("Bundled word bank should be valid");
        let LanguagePreference(language) = LanguagePreference::local_or_default();
        let game = game::Game::new(bank.clone(), rules.rules(), &language).unwrap_or_else(|err| {
            log::warn!("Ignoring saved language {:?}: {}", language, err);
            game::Game::new(bank, rules.rules(), LanguagePreference::DEFAULT)
                .expect("Default language should be bundled")
        });

        let mut view = Self {
            game,
            seed,
            no_guesses_notice: false,
            timers: Timers::default(),
        };

        if view.game.resume(&LocalSlot) {
            view.game.start_clock();
            if view
                .game
                .session()
                .is_some_and(|session| session.phase().is_hint_pending())
            {
                view.schedule_hint(ctx);
            }
        } else {
            view.start_new_game();
        }
        view.sync_clock(ctx);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            NewGame => {
                self.start_new_game();
                true
            }
            EndGame => match self.game.end_game() {
                Ok(()) => true,
                Err(err) => {
                    log::debug!("end game ignored: {}", err);
                    false
                }
            },
            RequestHint | EndTurn => {
                let result = if msg == RequestHint {
                    self.game.request_hint()
                } else {
                    self.game.end_turn()
                };
                match result {
                    Ok(hint) => {
                        self.timers.cancel_hint();
                        self.no_guesses_notice = false;
                        hint.is_some()
                    }
                    Err(err) => {
                        log::debug!("{:?} ignored: {}", msg, err);
                        false
                    }
                }
            }
            ToggleSpymaster => self.game.toggle_spymaster_view().is_ok(),
            ClickCard(index) => match self.game.click_card(index) {
                Ok(game::RevealOutcome::NoGuessesLeft) => {
                    let changed = !self.no_guesses_notice;
                    self.no_guesses_notice = true;
                    changed
                }
                Ok(outcome) => {
                    log::debug!("card {}: {:?}", index, outcome);
                    if outcome.is_hint_scheduled() {
                        self.schedule_hint(ctx);
                    }
                    outcome.has_update()
                }
                Err(err) => {
                    log::debug!("click on card {} ignored: {}", index, err);
                    false
                }
            },
            SetLanguage(code) => {
                self.timers.clear();
                self.no_guesses_notice = false;
                let seed = self.next_seed();
                match self.game.set_language(&code, seed) {
                    Ok(_) => {
                        LanguagePreference(code).local_save();
                        true
                    }
                    Err(err) => {
                        log::warn!("Could not switch language: {}", err);
                        false
                    }
                }
            }
            Tick => {
                let outcome = self.game.tick();
                log::trace!("tick: {:?}", outcome);
                if outcome == game::TickOutcome::TurnRolled {
                    self.timers.cancel_hint();
                }
                outcome.has_update()
            }
            ResolvePending => {
                self.timers.cancel_hint();
                match self.game.resolve_pending() {
                    Ok(hint) => hint.is_some(),
                    Err(err) => {
                        log::debug!("pending hint dropped: {}", err);
                        false
                    }
                }
            }
            DismissNotice => std::mem::take(&mut self.no_guesses_notice),
        };

        self.sync_clock(ctx);
        if updated {
            self.game.save(&mut LocalSlot);
        }
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let labels = i18n::labels(self.game.language());

        let Some(snapshot) = self.game.snapshot() else {
            return html! {
                <div class="wordspy">
                    <h1>{labels.game_title}</h1>
                    {self.view_language_select(ctx)}
                    <p>{labels.no_game}</p>
                    <button onclick={ctx.link().callback(|_| Msg::NewGame)}>{labels.btn_new_game}</button>
                </div>
            };
        };

        let notice = if self.no_guesses_notice {
            let text = if self.game.rules().is_turn_based() {
                labels.no_guesses
            } else {
                labels.no_guesses_free_play
            };
            html! {
                <p class="notice" onclick={ctx.link().callback(|_| Msg::DismissNotice)}>{text}</p>
            }
        } else {
            html! {}
        };
        let callback = ctx.link().callback(Msg::ClickCard);
        let spymaster = snapshot.spymaster;

        html! {
            <div class="wordspy">
                <header>
                    <h1>{labels.game_title}</h1>
                    {self.view_language_select(ctx)}
                </header>
                {self.view_stats(labels, &snapshot)}
                {self.view_hint(labels, &snapshot)}
                {self.view_buttons(ctx, labels)}
                <div class="board">
                    {
                        for snapshot.cards.iter().cloned().enumerate().map(|(index, card)| html! {
                            <CardTile {index} {card} {spymaster} callback={callback.clone()}/>
                        })
                    }
                </div>
                {notice}
                {self.view_game_over(ctx, labels, &snapshot)}
            </div>
        }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn idle_clock(made: &mut u32) -> Interval {
        *made += 1;
        Interval::new(1000, || ())
    }

    #[wasm_bindgen_test]
    fn cleared_timers_start_a_fresh_clock() {
        let mut timers = Timers::default();
        let mut made = 0;

        assert!(timers.keep_clock(|| idle_clock(&mut made)));
        assert!(!timers.keep_clock(|| idle_clock(&mut made)));
        assert_eq!(made, 1);

        timers.clear();
        assert!(timers.pending_hint.is_none());
        assert!(timers.keep_clock(|| idle_clock(&mut made)));
        assert_eq!(made, 2);
    }
}
