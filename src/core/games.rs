//! Games tab: catalog of mini-games and the playable Emoji Charades.
//!
//! After an answer the correct option is revealed and the round advances on a
//! timer owned by the caller; each game run carries a session number so a
//! timer that fires after the player left (or restarted) is ignored.

use super::quests::Difficulty;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GameInfo {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub age_range: String,
    pub difficulty: Difficulty,
    pub icon: String,
    pub playable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CharadesRound {
    pub emojis: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameCatalog {
    pub games: Vec<GameInfo>,
    pub charades: Vec<CharadesRound>,
}

/// How an option is shown once the result is revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// Result not revealed yet
    Open,
    Correct,
    /// The player's wrong pick
    Wrong,
    /// Neither picked nor correct
    Dimmed,
}

/// One run of Emoji Charades
#[derive(Debug, Clone)]
pub struct EmojiCharades {
    session: u64,
    rounds: Vec<CharadesRound>,
    current: usize,
    score: usize,
    cursor: usize,
    picked: Option<usize>,
    complete: bool,
}

impl EmojiCharades {
    pub fn new(session: u64, rounds: Vec<CharadesRound>) -> Self {
        Self {
            session,
            complete: rounds.is_empty(),
            rounds,
            current: 0,
            score: 0,
            cursor: 0,
            picked: None,
        }
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn round_number(&self) -> usize {
        self.current + 1
    }

    pub fn total_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn showing_result(&self) -> bool {
        self.picked.is_some()
    }

    pub fn current_round(&self) -> Option<&CharadesRound> {
        if self.complete {
            None
        } else {
            self.rounds.get(self.current)
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.current_round().map(|r| r.options.len()).unwrap_or(0);
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// Answer with the option under the cursor.
    /// Returns whether it was right, or `None` if answering is not allowed now.
    pub fn answer(&mut self) -> Option<bool> {
        if self.showing_result() {
            return None;
        }
        let round = self.current_round()?;
        let option = round.options.get(self.cursor)?;
        let correct = *option == round.correct;

        self.picked = Some(self.cursor);
        if correct {
            self.score += 1;
        }
        tracing::debug!(round = self.current, correct, score = self.score, "Charades answer");
        Some(correct)
    }

    /// Timer callback: move past the revealed result
    pub fn advance_round(&mut self, session: u64) {
        if session != self.session || !self.showing_result() {
            return;
        }
        self.picked = None;
        self.cursor = 0;
        if self.current + 1 < self.rounds.len() {
            self.current += 1;
        } else {
            self.complete = true;
            tracing::info!(score = self.score, total = self.rounds.len(), "Charades complete");
        }
    }

    pub fn option_mark(&self, index: usize) -> OptionMark {
        let (Some(picked), Some(round)) = (self.picked, self.current_round()) else {
            return OptionMark::Open;
        };
        match round.options.get(index) {
            Some(opt) if *opt == round.correct => OptionMark::Correct,
            Some(_) if index == picked => OptionMark::Wrong,
            _ => OptionMark::Dimmed,
        }
    }

    /// Achievement line for the final score
    pub fn achievement(&self) -> &'static str {
        achievement_for(self.score, self.rounds.len())
    }
}

pub fn achievement_for(score: usize, total: usize) -> &'static str {
    if score == total {
        "🌟 Perfect Score Master!"
    } else if score * 10 >= total * 8 {
        "⭐ Emoji Detective!"
    } else if score * 10 >= total * 6 {
        "🎯 Good Guesser!"
    } else {
        "🎮 Game Player!"
    }
}

/// What the Games tab is showing
#[derive(Debug, Clone)]
pub enum GameScreen {
    Menu,
    Playing(EmojiCharades),
}

/// State for the Games tab
#[derive(Debug, Clone)]
pub struct GamesTab {
    catalog: GameCatalog,
    selected: usize,
    screen: GameScreen,
    next_session: u64,
}

impl GamesTab {
    pub fn new(catalog: GameCatalog) -> Self {
        Self {
            catalog,
            selected: 0,
            screen: GameScreen::Menu,
            next_session: 0,
        }
    }

    pub fn games(&self) -> &[GameInfo] {
        &self.catalog.games
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn screen(&self) -> &GameScreen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut GameScreen {
        &mut self.screen
    }

    pub fn charades_mut(&mut self) -> Option<&mut EmojiCharades> {
        match &mut self.screen {
            GameScreen::Playing(game) => Some(game),
            GameScreen::Menu => None,
        }
    }

    pub fn select_next(&mut self) {
        if !self.catalog.games.is_empty() {
            self.selected = (self.selected + 1).min(self.catalog.games.len() - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Start the selected game; returns a notice when it is not playable yet
    pub fn play_selected(&mut self) -> Option<String> {
        let game = self.catalog.games.get(self.selected)?;
        if !game.playable {
            return Some(format!(
                "🎮 \"{}\" is coming soon! Stay tuned for more amazing games!",
                game.title
            ));
        }
        tracing::info!(game = %game.title, "Game started");
        self.start_charades();
        None
    }

    /// Fresh run (also used by "Play Again")
    pub fn start_charades(&mut self) {
        let session = self.next_session;
        self.next_session += 1;
        self.screen = GameScreen::Playing(EmojiCharades::new(
            session,
            self.catalog.charades.clone(),
        ));
    }

    pub fn back_to_menu(&mut self) {
        self.screen = GameScreen::Menu;
    }

    /// Timer callback for a finished result display
    pub fn advance_round(&mut self, session: u64) {
        if let Some(game) = self.charades_mut() {
            game.advance_round(session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPack;

    fn tab() -> GamesTab {
        GamesTab::new(ContentPack::embedded().unwrap().games)
    }

    fn answer_correctly(game: &mut EmojiCharades) {
        let round = game.current_round().unwrap().clone();
        let idx = round.options.iter().position(|o| *o == round.correct).unwrap();
        while game.cursor() != idx {
            game.move_cursor(1);
        }
        assert_eq!(game.answer(), Some(true));
    }

    #[test]
    fn test_only_charades_playable() {
        let mut tab = tab();
        assert!(tab.play_selected().is_none());
        assert!(matches!(tab.screen(), GameScreen::Playing(_)));

        tab.back_to_menu();
        tab.select_next();
        let notice = tab.play_selected().unwrap();
        assert!(notice.contains("3 Truths and a Lie"));
        assert!(notice.contains("coming soon"));
        assert!(matches!(tab.screen(), GameScreen::Menu));
    }

    #[test]
    fn test_perfect_run() {
        let mut tab = tab();
        tab.start_charades();
        let game = tab.charades_mut().unwrap();
        let session = game.session();
        for _ in 0..5 {
            answer_correctly(game);
            game.advance_round(session);
        }
        assert!(game.is_complete());
        assert_eq!(game.score(), 5);
        assert_eq!(game.achievement(), "🌟 Perfect Score Master!");
    }

    #[test]
    fn test_result_reveal_and_double_answer_ignored() {
        let mut tab = tab();
        tab.start_charades();
        let game = tab.charades_mut().unwrap();

        // First round's correct answer is option 0
        game.move_cursor(1);
        assert_eq!(game.answer(), Some(false));
        assert_eq!(game.answer(), None);
        assert_eq!(game.score(), 0);
        assert_eq!(game.option_mark(0), OptionMark::Correct);
        assert_eq!(game.option_mark(1), OptionMark::Wrong);
        assert_eq!(game.option_mark(2), OptionMark::Dimmed);
        assert_eq!(game.round_number(), 1);

        let session = game.session();
        game.advance_round(session);
        assert_eq!(game.round_number(), 2);
        assert_eq!(game.option_mark(0), OptionMark::Open);
    }

    #[test]
    fn test_stale_timer_ignored_after_restart() {
        let mut tab = tab();
        tab.start_charades();
        let old_session = tab.charades_mut().unwrap().session();
        tab.charades_mut().unwrap().answer();

        tab.start_charades();
        let game = tab.charades_mut().unwrap();
        game.answer();
        game.advance_round(old_session);
        assert!(game.showing_result());
        assert_eq!(game.round_number(), 1);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut tab = tab();
        tab.start_charades();
        let game = tab.charades_mut().unwrap();
        game.move_cursor(-1);
        assert_eq!(game.cursor(), 3);
        game.move_cursor(1);
        assert_eq!(game.cursor(), 0);
    }

    #[test]
    fn test_achievement_tiers() {
        assert_eq!(achievement_for(5, 5), "🌟 Perfect Score Master!");
        assert_eq!(achievement_for(4, 5), "⭐ Emoji Detective!");
        assert_eq!(achievement_for(3, 5), "🎯 Good Guesser!");
        assert_eq!(achievement_for(2, 5), "🎮 Game Player!");
        assert_eq!(achievement_for(0, 5), "🎮 Game Player!");
    }
}
