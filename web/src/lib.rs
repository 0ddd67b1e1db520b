use clap::{Parser, ValueEnum};
use wasm_bindgen::prelude::*;
use wordspy_core::Rules;

mod game;
mod i18n;
mod storage;
mod utils;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum RuleSet {
    /// Wrong guesses end the turn, unused guesses carry over
    TurnBased,
    /// No turns, every category is hinted at most once
    FreePlay,
    /// Turn-based against an opposing word set
    Duel,
}

impl RuleSet {
    pub(crate) const fn rules(self) -> Rules {
        use RuleSet::*;
        match self {
            TurnBased => Rules::turn_based(),
            FreePlay => Rules::free_play(),
            Duel => Rules::duel(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Rules for new games
    #[arg(short, long, value_enum, default_value_t = RuleSet::TurnBased)]
    rules: RuleSet,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("rules: {:?}, seed: {:?}", args.rules, args.seed);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    let props = game::GameProps {
        rules: args.rules,
        seed: args.seed,
    };

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_arguments_select_rules_and_seed() {
        let args = Args::try_parse_from("#&--rules=free-play&--seed=42".split(['#', '&'])).unwrap();

        assert_eq!(args.rules, RuleSet::FreePlay);
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn empty_hash_uses_turn_based_rules() {
        let args = Args::try_parse_from("".split(['#', '&'])).unwrap();

        assert_eq!(args.rules, RuleSet::TurnBased);
        assert_eq!(args.rules.rules(), Rules::turn_based());
    }
}
