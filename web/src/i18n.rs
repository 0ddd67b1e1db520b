/// Interface strings for one language.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Labels {
    pub game_title: &'static str,
    pub targets_found: &'static str,
    pub guesses_left: &'static str,
    pub timer_total: &'static str,
    pub timer_turn: &'static str,
    pub ai_hint: &'static str,
    pub hint_history: &'static str,
    pub btn_new_hint: &'static str,
    pub btn_end_turn: &'static str,
    pub btn_spymaster: &'static str,
    pub btn_new_game: &'static str,
    pub btn_end_game: &'static str,
    pub btn_play_again: &'static str,
    pub you_win: &'static str,
    pub win_message: &'static str,
    pub you_lose: &'static str,
    pub lose_assassin: &'static str,
    pub time_up: &'static str,
    pub lose_time: &'static str,
    pub cards_found: &'static str,
    pub no_guesses: &'static str,
    pub no_guesses_free_play: &'static str,
    pub no_game: &'static str,
}

impl Labels {
    /// Headline of `time_up` without its trailing exclamation.
    pub(crate) fn time_up_short(&self) -> &'static str {
        self.time_up.trim_end_matches('!').trim_end()
    }
}

static VI: Labels = Labels {
    game_title: "Mật Danh",
    targets_found: "Từ đã tìm",
    guesses_left: "Lượt đoán còn",
    timer_total: "Thời gian",
    timer_turn: "Thời gian lượt",
    ai_hint: "Gợi ý AI",
    hint_history: "Lịch sử:",
    btn_new_hint: "Gợi ý mới",
    btn_end_turn: "Kết thúc lượt",
    btn_spymaster: "Chế độ trưởng nhóm",
    btn_new_game: "Ván mới",
    btn_end_game: "Kết thúc ván",
    btn_play_again: "Chơi lại",
    you_win: "Bạn thắng!",
    win_message: "Bạn đã tìm ra tất cả các từ.",
    you_lose: "Bạn thua!",
    lose_assassin: "Bạn đã chọn phải sát thủ.",
    time_up: "Hết giờ!",
    lose_time: "Hết thời gian. Số từ đã tìm:",
    cards_found: "thẻ",
    no_guesses: "Hết lượt đoán! Nhấn \"Gợi ý mới\" hoặc \"Kết thúc lượt\".",
    no_guesses_free_play: "Hết lượt đoán! Nhấn \"Gợi ý mới\".",
    no_game: "Chưa có ván nào.",
};

static EN: Labels = Labels {
    game_title: "Word Spy",
    targets_found: "Words found",
    guesses_left: "Guesses left",
    timer_total: "Game time",
    timer_turn: "Turn time",
    ai_hint: "AI hint",
    hint_history: "History:",
    btn_new_hint: "New Hint",
    btn_end_turn: "End Turn",
    btn_spymaster: "Spymaster View",
    btn_new_game: "New Game",
    btn_end_game: "End Game",
    btn_play_again: "Play Again",
    you_win: "You win!",
    win_message: "You found every word.",
    you_lose: "You lose!",
    lose_assassin: "You revealed the assassin.",
    time_up: "Time's up!",
    lose_time: "Time ran out. Words found:",
    cards_found: "cards",
    no_guesses: "No guesses left! Click \"New Hint\" or \"End Turn\".",
    no_guesses_free_play: "No guesses left! Click \"New Hint\".",
    no_game: "No game in progress.",
};

static FR: Labels = Labels {
    game_title: "Mots Codés",
    targets_found: "Mots trouvés",
    guesses_left: "Tentatives restantes",
    timer_total: "Temps de jeu",
    timer_turn: "Temps du tour",
    ai_hint: "Indice IA",
    hint_history: "Historique :",
    btn_new_hint: "Nouvel Indice",
    btn_end_turn: "Fin du Tour",
    btn_spymaster: "Vue Maître-espion",
    btn_new_game: "Nouvelle Partie",
    btn_end_game: "Terminer la Partie",
    btn_play_again: "Rejouer",
    you_win: "Vous gagnez !",
    win_message: "Vous avez trouvé tous les mots.",
    you_lose: "Vous perdez !",
    lose_assassin: "Vous avez révélé l'assassin.",
    time_up: "Temps écoulé !",
    lose_time: "Le temps est écoulé. Mots trouvés :",
    cards_found: "cartes",
    no_guesses: "Plus de tentatives! Cliquez sur \"Nouvel Indice\" ou \"Fin du Tour\".",
    no_guesses_free_play: "Plus de tentatives! Cliquez sur \"Nouvel Indice\".",
    no_game: "Aucune partie en cours.",
};

static DE: Labels = Labels {
    game_title: "Wortspion",
    targets_found: "Gefundene Wörter",
    guesses_left: "Verbleibende Versuche",
    timer_total: "Spielzeit",
    timer_turn: "Rundenzeit",
    ai_hint: "KI-Hinweis",
    hint_history: "Verlauf:",
    btn_new_hint: "Neuer Hinweis",
    btn_end_turn: "Runde Beenden",
    btn_spymaster: "Spionmeister-Ansicht",
    btn_new_game: "Neues Spiel",
    btn_end_game: "Spiel Beenden",
    btn_play_again: "Nochmal spielen",
    you_win: "Gewonnen!",
    win_message: "Du hast alle Wörter gefunden.",
    you_lose: "Verloren!",
    lose_assassin: "Du hast den Attentäter aufgedeckt.",
    time_up: "Zeit abgelaufen!",
    lose_time: "Die Zeit ist abgelaufen. Gefundene Wörter:",
    cards_found: "Karten",
    no_guesses: "Keine Versuche mehr! Klicken Sie auf \"Neuer Hinweis\" oder \"Runde Beenden\".",
    no_guesses_free_play: "Keine Versuche mehr! Klicken Sie auf \"Neuer Hinweis\".",
    no_game: "Kein laufendes Spiel.",
};

pub(crate) fn labels_for(code: &str) -> Option<&'static Labels> {
    match code {
        "vi" => Some(&VI),
        "en" => Some(&EN),
        "fr" => Some(&FR),
        "de" => Some(&DE),
        _ => None,
    }
}

/// Labels for `code`, English when the language has none.
pub(crate) fn labels(code: &str) -> &'static Labels {
    labels_for(code).unwrap_or(&EN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordspy_core::WordBank;

    #[test]
    fn every_bundled_language_has_labels() {
        let bank = WordBank::bundled().unwrap();

        for code in bank.codes() {
            assert!(labels_for(code).is_some(), "missing labels for {code}");
        }
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(labels("tlh"), &EN);
    }

    #[test]
    fn short_time_up_drops_the_exclamation() {
        assert_eq!(EN.time_up_short(), "Time's up");
        assert_eq!(FR.time_up_short(), "Temps écoulé");
    }
}
