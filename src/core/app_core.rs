use crate::config::Config;
use crate::content::ContentPack;
use crate::core::access_code::{CodeEntry, CodeEntryOutcome};
use crate::core::chat::{ChatEvent, ChatSession, Role};
use crate::core::error::FlowError;
use crate::core::games::GameScreen;
use crate::core::main_app::{MainApp, MainTab};
use crate::core::orchestrator::{FlowInput, Orchestrator, ScreenState};
use crate::core::profile::ProfileDraft;
use crate::core::responder::Responder;
use crate::core::scheduler::{Clock, Timers};
use crate::data::{SetupField, UiState};
use crate::frontend::FrontendEvent;
use crate::tts::SpeechManager;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;

/// Work waiting on the timer queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Chat(ChatEvent),
    /// Leave the charades result display of game run `session`
    AdvanceRound { session: u64 },
}

impl From<ChatEvent> for Task {
    fn from(event: ChatEvent) -> Self {
        Task::Chat(event)
    }
}

/// Core application state (frontend-agnostic)
///
/// AppCore is the composition root: it owns the screen state machine, every
/// screen's model, the timer queue and the speech output. Frontends feed it
/// `FrontendEvent`s, call [`AppCore::tick`] once per frame and render from
/// its fields.
pub struct AppCore {
    /// Application configuration
    pub config: Config,

    /// Screen state machine plus the profile and access code it collected
    pub orchestrator: Orchestrator,

    /// Focus and text-input state
    pub ui: UiState,

    /// Profile setup form values
    pub draft: ProfileDraft,

    /// Inline error under the profile setup form
    pub setup_error: Option<FlowError>,

    /// Two-step PIN pad on the code-setup screen
    pub code_entry: CodeEntry,

    /// Tabs and panels of the main screen (built on first entry)
    pub main: Option<MainApp>,

    /// Read-aloud output
    pub speech: SpeechManager,

    /// Weekday name used in greetings
    pub weekday: String,

    /// Application running flag
    pub running: bool,

    content: ContentPack,
    responder: Option<Responder>,
    timers: Timers<Task>,
    clock: Box<dyn Clock>,
    rng: StdRng,
}

impl AppCore {
    pub fn new(
        config: Config,
        content: ContentPack,
        speech: SpeechManager,
        clock: Box<dyn Clock>,
        rng: StdRng,
        weekday: String,
    ) -> Result<Self> {
        // Fails here, at startup, if the reply table is unusable
        let responder = Responder::new(content.responses.clone())?;
        let code_entry = CodeEntry::new(config.ui.show_code_default);

        Ok(Self {
            config,
            orchestrator: Orchestrator::new(),
            ui: UiState::new(),
            draft: ProfileDraft::default(),
            setup_error: None,
            code_entry,
            main: None,
            speech,
            weekday,
            running: true,
            content,
            responder: Some(responder),
            timers: Timers::new(),
            clock,
            rng,
        })
    }

    /// Number of timer tasks still waiting
    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    /// Fire due timers and collect speech callbacks; call once per frame
    pub fn tick(&mut self) {
        let now = self.clock.now();
        for task in self.timers.drain_due(now) {
            let Some(main) = self.main.as_mut() else {
                continue;
            };
            match task {
                Task::Chat(event) => {
                    let speak = main.chat.handle(event, now, &mut self.timers, &mut self.rng);
                    if let Some(request) = speak {
                        self.speech.speak(request.message_id, &request.text);
                    }
                }
                Task::AdvanceRound { session } => main.games.advance_round(session),
            }
        }
        self.speech.poll();
    }

    pub fn handle_event(&mut self, event: FrontendEvent) {
        match event {
            FrontendEvent::Quit => self.quit(),
            FrontendEvent::Key { code, modifiers } => self.handle_key(code, modifiers),
            FrontendEvent::Paste { text } => self.handle_paste(&text),
            FrontendEvent::Resize { .. } => {}
        }
    }

    fn quit(&mut self) {
        tracing::info!("Quit requested");
        self.running = false;
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.quit();
            return;
        }

        match self.orchestrator.state() {
            ScreenState::InitialSetup => self.handle_setup_key(code, modifiers),
            ScreenState::Confirmation => {
                if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.apply(FlowInput::ConfirmProfile);
                }
            }
            ScreenState::CodeSetup => self.handle_code_key(code),
            ScreenState::Main => self.handle_main_key(code, modifiers),
            ScreenState::ParentView => self.handle_parent_key(code),
        }
    }

    /// Feed the orchestrator and log what it refused
    fn apply(&mut self, input: FlowInput) -> Option<FlowError> {
        let transition = self.orchestrator.advance(input);
        if let Some(error) = &transition.error {
            tracing::debug!(state = %transition.next, %error, "Transition refused");
        }
        transition.error
    }

    fn handle_setup_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Tab | KeyCode::Down => {
                self.ui.setup_focus = self.ui.setup_focus.next();
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.ui.setup_focus = self.ui.setup_focus.previous();
                return;
            }
            KeyCode::Enter => {
                self.submit_profile();
                return;
            }
            _ => {}
        }

        match self.ui.setup_focus {
            SetupField::Nickname => {
                if matches!(code, KeyCode::Char(_)) && self.ui.nickname_full() {
                    return;
                }
                self.ui.nickname_input.input(KeyEvent::new(code, modifiers));
                self.draft.set_nickname(&self.ui.nickname());
                self.setup_error = None;
            }
            SetupField::Gender => match code {
                KeyCode::Left => self.draft.gender = self.draft.gender.previous(),
                KeyCode::Right | KeyCode::Char(' ') => self.draft.gender = self.draft.gender.next(),
                _ => {}
            },
            SetupField::Age => match code {
                KeyCode::Left | KeyCode::Char('-') => self.draft.decrement_age(),
                KeyCode::Right | KeyCode::Char('+') => self.draft.increment_age(),
                _ => {}
            },
            SetupField::Submit => {
                if code == KeyCode::Char(' ') {
                    self.submit_profile();
                }
            }
        }
    }

    fn submit_profile(&mut self) {
        self.draft.set_nickname(&self.ui.nickname());
        self.setup_error = self.apply(FlowInput::Profile(self.draft.clone()));
    }

    fn handle_code_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => self.code_entry.push_digit(c),
            KeyCode::Backspace => self.code_entry.backspace(),
            KeyCode::Tab => self.code_entry.toggle_show_digits(),
            KeyCode::Esc => self.code_entry.reset(),
            KeyCode::Enter => match self.code_entry.submit() {
                CodeEntryOutcome::Confirmed(code) => {
                    let code = code.as_str().to_string();
                    let input = FlowInput::AccessCode {
                        confirmation: Some(code.clone()),
                        code,
                    };
                    match self.apply(input) {
                        Some(error) => self.code_entry.set_error(error),
                        None => self.enter_main(),
                    }
                }
                CodeEntryOutcome::AwaitingConfirmation | CodeEntryOutcome::Rejected(_) => {}
            },
            _ => {}
        }
    }

    /// Build the main screen the first time it is shown
    fn enter_main(&mut self) {
        if self.main.is_some() {
            return;
        }
        let (Some(profile), Some(responder)) = (self.orchestrator.profile(), self.responder.take())
        else {
            tracing::error!("Main screen entered without profile or responder");
            return;
        };
        let chat = ChatSession::new(
            responder,
            self.config.chat.settings(),
            profile.display_name(),
            &self.weekday,
            &mut self.rng,
        );
        self.main = Some(MainApp::new(chat, &self.content));
    }

    fn handle_main_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let Some(main) = self.main.as_mut() else {
            return;
        };

        // Any key dismisses a notice
        if main.notice.take().is_some() {
            return;
        }

        if main.panel.is_open() {
            self.handle_panel_key(code);
            return;
        }

        match code {
            KeyCode::Tab => {
                main.tab = main.tab.next();
                return;
            }
            KeyCode::BackTab => {
                main.tab = main.tab.previous();
                return;
            }
            KeyCode::F(2) => {
                main.panel.open();
                return;
            }
            _ => {}
        }

        match main.tab {
            MainTab::Chat => self.handle_chat_key(code, modifiers),
            MainTab::Creatives => match code {
                KeyCode::Left | KeyCode::Right => main.creatives.toggle_kind(),
                KeyCode::Enter | KeyCode::Char('n') => {
                    let notice = main.creatives.create_notice();
                    main.set_notice(notice);
                }
                _ => {}
            },
            MainTab::Quests => match code {
                KeyCode::Left => main.quests.previous_category(),
                KeyCode::Right => main.quests.next_category(),
                KeyCode::Up => main.quests.select_previous(),
                KeyCode::Down => main.quests.select_next(),
                KeyCode::Enter => {
                    if let Some(notice) = main.quests.start_selected() {
                        main.set_notice(notice);
                    }
                }
                _ => {}
            },
            MainTab::Games => self.handle_games_key(code),
        }
    }

    fn handle_panel_key(&mut self, code: KeyCode) {
        let Some(main) = self.main.as_mut() else {
            return;
        };

        let Some(prompt) = main.panel.prompt_mut() else {
            match code {
                KeyCode::Esc | KeyCode::F(2) => main.panel.close(),
                KeyCode::Enter | KeyCode::Char('p') => main.panel.open_prompt(),
                _ => {}
            }
            return;
        };

        match code {
            KeyCode::Char(c) => prompt.push_digit(c),
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Esc => main.panel.cancel_prompt(),
            KeyCode::Enter => {
                let orchestrator = &mut self.orchestrator;
                let result = main
                    .panel
                    .verify(|attempt| orchestrator.unlock_parent_view(attempt));
                if result.is_ok() {
                    tracing::info!("Parent view unlocked");
                }
            }
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let Some(main) = self.main.as_mut() else {
            return;
        };
        let now = self.clock.now();
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        match code {
            KeyCode::Up if ctrl => self.ui.message_cursor = step_buddy_message(&main.chat, self.ui.message_cursor, -1),
            KeyCode::Down if ctrl => self.ui.message_cursor = step_buddy_message(&main.chat, self.ui.message_cursor, 1),
            KeyCode::Char('s') if ctrl => {
                let target = match self.ui.message_cursor {
                    Some(id) => main.chat.message(id),
                    None => main.chat.last_buddy_message(),
                };
                if let Some(message) = target {
                    self.speech.toggle(message.id, &message.text);
                }
            }
            KeyCode::Char('r') if ctrl => self.speech.set_enabled(!self.speech.is_enabled()),
            KeyCode::Up => self.ui.move_chip_cursor(-1, main.chat.suggestions().len()),
            KeyCode::Down => self.ui.move_chip_cursor(1, main.chat.suggestions().len()),
            KeyCode::Esc => self.ui.chip_cursor = None,
            KeyCode::Enter => {
                let sent = match self.ui.chip_cursor {
                    Some(index) => main.chat.pick_suggestion(index, now, &mut self.timers, &mut self.rng),
                    None => {
                        let text = self.ui.chat_text();
                        let sent = main.chat.send(&text, now, &mut self.timers, &mut self.rng);
                        if sent {
                            self.ui.clear_chat_input();
                        }
                        sent
                    }
                };
                if sent {
                    self.ui.chip_cursor = None;
                    self.ui.message_cursor = None;
                }
            }
            _ => {
                self.ui.chip_cursor = None;
                self.ui.chat_input.input(KeyEvent::new(code, modifiers));
            }
        }
    }

    fn handle_games_key(&mut self, code: KeyCode) {
        let Some(main) = self.main.as_mut() else {
            return;
        };
        let now = self.clock.now();

        match main.games.screen_mut() {
            GameScreen::Menu => match code {
                KeyCode::Up => main.games.select_previous(),
                KeyCode::Down => main.games.select_next(),
                KeyCode::Enter => {
                    if let Some(notice) = main.games.play_selected() {
                        main.set_notice(notice);
                    }
                }
                _ => {}
            },
            GameScreen::Playing(game) if game.is_complete() => match code {
                KeyCode::Enter | KeyCode::Char('r') => main.games.start_charades(),
                KeyCode::Esc | KeyCode::Char('b') => main.games.back_to_menu(),
                _ => {}
            },
            GameScreen::Playing(game) => {
                match code {
                    KeyCode::Left | KeyCode::Up => game.move_cursor(-1),
                    KeyCode::Right | KeyCode::Down => game.move_cursor(1),
                    KeyCode::Char(c @ '1'..='4') => {
                        let target = c as usize - '1' as usize;
                        let delta = target as isize - game.cursor() as isize;
                        game.move_cursor(delta);
                        if game.cursor() == target {
                            self.answer(now);
                        }
                        return;
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        self.answer(now);
                        return;
                    }
                    KeyCode::Esc => main.games.back_to_menu(),
                    _ => {}
                }
            }
        }
    }

    /// Answer the current charades round and schedule the round advance
    fn answer(&mut self, now: std::time::Instant) {
        let Some(game) = self.main.as_mut().and_then(|m| m.games.charades_mut()) else {
            return;
        };
        if game.answer().is_some() {
            let session = game.session();
            self.timers.schedule(
                now,
                self.config.games.round_advance(),
                Task::AdvanceRound { session },
            );
        }
    }

    fn handle_parent_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('b') => {
                self.apply(FlowInput::ExitParentView);
            }
            KeyCode::Char('c') => {
                if let Some(main) = self.main.as_mut() {
                    main.dashboard.next_child();
                }
            }
            KeyCode::Char('t') => {
                if let Some(main) = self.main.as_mut() {
                    main.dashboard.cycle_time_limit();
                }
            }
            _ => {}
        }
    }

    fn handle_paste(&mut self, text: &str) {
        let text = text.replace(['\r', '\n'], " ");
        match self.orchestrator.state() {
            ScreenState::InitialSetup if self.ui.setup_focus == SetupField::Nickname => {
                let room = crate::core::profile::NAME_MAX_CHARS
                    .saturating_sub(self.ui.nickname().chars().count());
                let clipped: String = text.chars().take(room).collect();
                self.ui.nickname_input.insert_str(clipped);
                self.draft.set_nickname(&self.ui.nickname());
            }
            ScreenState::Main => {
                if let Some(main) = self.main.as_ref() {
                    if main.tab == MainTab::Chat && !main.panel.is_open() {
                        self.ui.chat_input.insert_str(text);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Move the read-aloud cursor across buddy messages; `None` tracks the latest
fn step_buddy_message(chat: &ChatSession, current: Option<u64>, delta: isize) -> Option<u64> {
    let ids: Vec<u64> = chat
        .messages()
        .iter()
        .filter(|m| m.role == Role::Buddy)
        .map(|m| m.id)
        .collect();
    let last = ids.len().checked_sub(1)?;
    let pos = current
        .and_then(|id| ids.iter().position(|&i| i == id))
        .unwrap_or(last) as isize;
    let next = pos + delta;
    if next > last as isize {
        None
    } else {
        ids.get(next.max(0) as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scheduler::ManualClock;
    use crate::tts::testing::{fake_manager, EngineLog};
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    struct Harness {
        app: AppCore,
        clock: ManualClock,
        speech: Rc<RefCell<EngineLog>>,
    }

    fn harness() -> Harness {
        let clock = ManualClock::new();
        let (speech_manager, speech) = fake_manager();
        let app = AppCore::new(
            Config::default(),
            ContentPack::embedded().unwrap(),
            speech_manager,
            Box::new(clock.clone()),
            StdRng::seed_from_u64(42),
            "Monday".to_string(),
        )
        .unwrap();
        Harness { app, clock, speech }
    }

    impl Harness {
        fn key(&mut self, code: KeyCode) {
            self.app.handle_event(FrontendEvent::key(code, KeyModifiers::NONE));
        }

        fn ctrl(&mut self, c: char) {
            self.app
                .handle_event(FrontendEvent::key(KeyCode::Char(c), KeyModifiers::CONTROL));
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.key(KeyCode::Char(c));
            }
        }

        fn wait(&mut self, ms: u64) {
            self.clock.advance(Duration::from_millis(ms));
            self.app.tick();
        }

        fn state(&self) -> ScreenState {
            self.app.orchestrator.state()
        }

        fn main(&mut self) -> &mut MainApp {
            self.app.main.as_mut().unwrap()
        }

        /// Mia, girl, 8, PIN 1234
        fn onboard(&mut self) {
            self.type_text("Mia");
            self.key(KeyCode::Tab);
            self.key(KeyCode::Right);
            self.key(KeyCode::Enter);
            assert_eq!(self.state(), ScreenState::Confirmation);
            self.key(KeyCode::Enter);
            assert_eq!(self.state(), ScreenState::CodeSetup);
            self.type_text("1234");
            self.key(KeyCode::Enter);
            self.type_text("1234");
            self.key(KeyCode::Enter);
            assert_eq!(self.state(), ScreenState::Main);
        }
    }

    #[test]
    fn test_onboarding_by_keyboard() {
        let mut h = harness();
        h.onboard();

        let profile = h.app.orchestrator.profile().unwrap();
        assert_eq!(profile.display_name(), "Mia");
        assert_eq!(profile.avatar(), "👧");
        assert_eq!(profile.age(), 8);
        assert_eq!(h.app.orchestrator.access_code().unwrap().as_str(), "1234");
        assert!(h.main().chat.messages()[0].text.starts_with("Happy Monday, Mia!"));
    }

    #[test]
    fn test_empty_name_blocks_setup() {
        let mut h = harness();
        h.type_text("   ");
        h.key(KeyCode::Enter);
        assert_eq!(h.state(), ScreenState::InitialSetup);
        assert_eq!(h.app.setup_error, Some(FlowError::EmptyName));

        // Typing clears the message
        h.type_text("Z");
        assert_eq!(h.app.setup_error, None);
    }

    #[test]
    fn test_nickname_capped() {
        let mut h = harness();
        h.type_text("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(h.app.ui.nickname(), "abcdefghijklmnopqrst");
        assert_eq!(h.app.draft.nickname, "abcdefghijklmnopqrst");
    }

    #[test]
    fn test_age_stepper_bounds() {
        let mut h = harness();
        h.key(KeyCode::Tab);
        h.key(KeyCode::Tab);
        for _ in 0..10 {
            h.key(KeyCode::Left);
        }
        assert_eq!(h.app.draft.age, 6);
        for _ in 0..10 {
            h.key(KeyCode::Right);
        }
        assert_eq!(h.app.draft.age, 12);
    }

    #[test]
    fn test_short_code_stays_on_code_setup() {
        let mut h = harness();
        h.type_text("Leo");
        h.key(KeyCode::Enter);
        h.key(KeyCode::Enter);
        h.type_text("12");
        h.key(KeyCode::Enter);
        assert_eq!(h.state(), ScreenState::CodeSetup);
        assert!(matches!(h.app.code_entry.error(), Some(FlowError::CodeFormat(_))));
    }

    #[test]
    fn test_mismatched_confirmation_reenters() {
        let mut h = harness();
        h.type_text("Leo");
        h.key(KeyCode::Enter);
        h.key(KeyCode::Enter);
        h.type_text("1234");
        h.key(KeyCode::Enter);
        h.type_text("4321");
        h.key(KeyCode::Enter);
        assert_eq!(h.state(), ScreenState::CodeSetup);
        assert_eq!(h.app.code_entry.error(), Some(&FlowError::CodeMismatch));
        assert_eq!(h.app.code_entry.current().as_str(), "");
    }

    #[test]
    fn test_chat_reply_after_delay_and_spoken() {
        let mut h = harness();
        h.onboard();

        h.type_text("I love space rockets");
        h.key(KeyCode::Enter);
        assert!(h.main().chat.is_waiting());
        assert_eq!(h.app.ui.chat_text(), "");

        h.wait(500);
        assert_eq!(h.main().chat.messages().len(), 2);

        h.wait(1500);
        let reply = h.main().chat.messages().last().unwrap().clone();
        assert_eq!(reply.role, Role::Buddy);
        assert!(reply.text.starts_with("Rockets are super cool!"));
        assert_eq!(h.app.speech.playing(), Some(reply.id));
        assert_eq!(h.speech.borrow().spoken.len(), 1);

        h.wait(800);
        assert_eq!(h.main().chat.suggestions().len(), 3);
    }

    #[test]
    fn test_reply_lands_after_switching_tabs() {
        let mut h = harness();
        h.onboard();
        h.type_text("hello");
        h.key(KeyCode::Enter);
        h.key(KeyCode::Tab);
        h.wait(2000);
        assert_eq!(h.main().tab, MainTab::Creatives);
        assert_eq!(h.main().chat.messages().len(), 3);
    }

    #[test]
    fn test_suggestion_chip_sends() {
        let mut h = harness();
        h.onboard();
        let chip = h.main().chat.suggestions()[0].clone();
        h.key(KeyCode::Down);
        h.key(KeyCode::Enter);
        assert_eq!(h.main().chat.messages().last().unwrap().text, chip);
        assert_eq!(h.app.ui.chip_cursor, None);
    }

    #[test]
    fn test_read_aloud_toggle() {
        let mut h = harness();
        h.onboard();
        h.ctrl('s');
        assert_eq!(h.app.speech.playing(), Some(0));
        h.ctrl('s');
        assert_eq!(h.app.speech.playing(), None);
    }

    #[test]
    fn test_voice_switch_stops_and_mutes() {
        let mut h = harness();
        h.onboard();
        h.ctrl('s');
        assert_eq!(h.app.speech.playing(), Some(0));

        h.ctrl('r');
        assert!(!h.app.speech.is_enabled());
        assert_eq!(h.app.speech.playing(), None);
        h.ctrl('s');
        assert_eq!(h.app.speech.playing(), None);
        assert_eq!(h.speech.borrow().spoken.len(), 1);

        h.ctrl('r');
        assert!(h.app.speech.is_enabled());
        h.ctrl('s');
        assert_eq!(h.app.speech.playing(), Some(0));
    }

    #[test]
    fn test_reply_timer_pending_until_due() {
        let mut h = harness();
        h.onboard();
        assert_eq!(h.app.pending_tasks(), 0);
        h.type_text("rockets");
        h.key(KeyCode::Enter);
        assert_eq!(h.app.pending_tasks(), 1);
        h.wait(2_000);
        // Reply fired, suggestion reveal now queued
        assert_eq!(h.app.pending_tasks(), 1);
        h.wait(800);
        assert_eq!(h.app.pending_tasks(), 0);
    }

    #[test]
    fn test_charades_round_advances_on_timer() {
        let mut h = harness();
        h.onboard();
        for _ in 0..3 {
            h.key(KeyCode::Tab);
        }
        assert_eq!(h.main().tab, MainTab::Games);
        h.key(KeyCode::Enter);

        // Round one: "Cat drinking milk" is option 1
        h.key(KeyCode::Char('1'));
        {
            let main = h.main();
            let game = main.games.charades_mut().unwrap();
            assert_eq!(game.score(), 1);
            assert!(game.showing_result());
        }

        h.wait(1999);
        assert_eq!(h.main().games.charades_mut().unwrap().round_number(), 1);
        h.wait(1);
        assert_eq!(h.main().games.charades_mut().unwrap().round_number(), 2);
    }

    #[test]
    fn test_coming_soon_notice_dismissed_by_any_key() {
        let mut h = harness();
        h.onboard();
        h.key(KeyCode::BackTab);
        h.key(KeyCode::Down);
        h.key(KeyCode::Enter);
        assert!(h.main().notice.as_deref().unwrap().contains("coming soon"));
        h.key(KeyCode::Char('x'));
        assert!(h.main().notice.is_none());
        assert!(matches!(h.main().games.screen(), GameScreen::Menu));
    }

    #[test]
    fn test_parent_gate_round_trip() {
        let mut h = harness();
        h.onboard();

        h.key(KeyCode::F(2));
        h.key(KeyCode::Char('p'));
        h.type_text("9999");
        h.key(KeyCode::Enter);
        assert_eq!(h.state(), ScreenState::Main);
        let error = h.main().panel.prompt().unwrap().error().unwrap().to_string();
        assert_eq!(error, "Incorrect PIN. Please try again.");

        for _ in 0..4 {
            h.key(KeyCode::Backspace);
        }
        h.type_text("1234");
        h.key(KeyCode::Enter);
        assert_eq!(h.state(), ScreenState::ParentView);
        assert!(!h.main().panel.is_open());

        h.key(KeyCode::Char('t'));
        assert_eq!(h.main().dashboard.daily_limit_minutes(), Some(60));

        h.key(KeyCode::Esc);
        assert_eq!(h.state(), ScreenState::Main);
        assert_eq!(h.app.orchestrator.profile().unwrap().display_name(), "Mia");
        assert_eq!(h.app.orchestrator.access_code().unwrap().as_str(), "1234");
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut h = harness();
        h.ctrl('c');
        assert!(!h.app.running);
    }

    #[test]
    fn test_step_buddy_message() {
        let mut h = harness();
        h.onboard();
        h.type_text("space");
        h.key(KeyCode::Enter);
        h.wait(2000);
        // Buddy messages are ids 0 and 2
        let chat = &h.main().chat;
        assert_eq!(step_buddy_message(chat, None, -1), Some(0));
        assert_eq!(step_buddy_message(chat, Some(0), 1), Some(2));
        assert_eq!(step_buddy_message(chat, Some(2), 1), None);
        assert_eq!(step_buddy_message(chat, Some(0), -1), Some(0));
    }
}
