//! Conversation with the chat buddy.
//!
//! Replies are never immediate: `send` queues a [`ChatEvent::Reply`] behind a
//! random "thinking" delay and the reply's suggestion chips appear a little
//! after the reply itself. Both go through the caller's [`Timers`] queue.

use super::responder::Responder;
use super::scheduler::Timers;
use chrono::{DateTime, Local};
use rand::Rng;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Buddy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub text: String,
    pub suggestions: Vec<String>,
    /// Wall-clock time the message was added
    pub sent_at: DateTime<Local>,
}

/// Delayed work produced by the chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Thinking is over; answer `prompt`
    Reply { prompt: String },
    /// Show these chips under the last reply
    RevealSuggestions(Vec<String>),
}

/// A reply the caller should read aloud
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakRequest {
    pub message_id: u64,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub think_min: Duration,
    pub think_max: Duration,
    pub suggestion_delay: Duration,
    pub suggestion_count: usize,
    pub auto_speak: bool,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            think_min: Duration::from_millis(1000),
            think_max: Duration::from_millis(2000),
            suggestion_delay: Duration::from_millis(800),
            suggestion_count: 3,
            auto_speak: true,
        }
    }
}

pub struct ChatSession {
    responder: Responder,
    settings: ChatSettings,
    messages: Vec<ChatMessage>,
    suggestions: Vec<String>,
    waiting: bool,
    next_id: u64,
}

impl ChatSession {
    /// Start a conversation with the weekday greeting
    pub fn new<R: Rng + ?Sized>(
        responder: Responder,
        settings: ChatSettings,
        name: &str,
        weekday: &str,
        rng: &mut R,
    ) -> Self {
        let starters = responder.topic_suggestions(settings.suggestion_count, rng);
        let mut session = Self {
            responder,
            settings,
            messages: Vec::new(),
            suggestions: starters.clone(),
            waiting: false,
            next_id: 0,
        };
        session.push(
            Role::Buddy,
            format!(
                "Happy {}, {}! 🌟 What would you like to talk about today? I have some fun ideas:",
                weekday, name
            ),
            starters,
        );
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Chips currently offered to the child
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub fn message(&self, id: u64) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Latest buddy message, the default target for "read aloud"
    pub fn last_buddy_message(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.role == Role::Buddy)
    }

    /// Send a message; returns false when it was ignored
    pub fn send<T, R>(&mut self, text: &str, now: Instant, timers: &mut Timers<T>, rng: &mut R) -> bool
    where
        T: From<ChatEvent>,
        R: Rng + ?Sized,
    {
        let text = text.trim();
        if text.is_empty() || self.waiting {
            return false;
        }

        self.push(Role::User, text.to_string(), Vec::new());
        self.suggestions.clear();
        self.waiting = true;

        let delay = self.think_delay(rng);
        timers.schedule(
            now,
            delay,
            ChatEvent::Reply {
                prompt: text.to_string(),
            }
            .into(),
        );
        true
    }

    /// Send the chip at `index`
    pub fn pick_suggestion<T, R>(
        &mut self,
        index: usize,
        now: Instant,
        timers: &mut Timers<T>,
        rng: &mut R,
    ) -> bool
    where
        T: From<ChatEvent>,
        R: Rng + ?Sized,
    {
        match self.suggestions.get(index).cloned() {
            Some(text) => self.send(&text, now, timers, rng),
            None => false,
        }
    }

    /// Apply a fired timer event
    pub fn handle<T, R>(
        &mut self,
        event: ChatEvent,
        now: Instant,
        timers: &mut Timers<T>,
        rng: &mut R,
    ) -> Option<SpeakRequest>
    where
        T: From<ChatEvent>,
        R: Rng + ?Sized,
    {
        match event {
            ChatEvent::Reply { prompt } => {
                let reply = self.responder.respond(&prompt, rng);
                let chips = if reply.suggestions.is_empty() {
                    self.responder.follow_up_prompts(rng)
                } else {
                    reply.suggestions
                };

                let id = self.push(Role::Buddy, reply.text.clone(), chips.clone());
                self.waiting = false;
                timers.schedule(
                    now,
                    self.settings.suggestion_delay,
                    ChatEvent::RevealSuggestions(chips).into(),
                );

                self.settings.auto_speak.then_some(SpeakRequest {
                    message_id: id,
                    text: reply.text,
                })
            }
            ChatEvent::RevealSuggestions(chips) => {
                // A newer message already replaced these
                if !self.waiting {
                    self.suggestions = chips;
                }
                None
            }
        }
    }

    fn think_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let min = self.settings.think_min.as_millis() as u64;
        let max = (self.settings.think_max.as_millis() as u64).max(min);
        Duration::from_millis(rng.gen_range(min..=max))
    }

    fn push(&mut self, role: Role, text: String, suggestions: Vec<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            role,
            text,
            suggestions,
            sent_at: Local::now(),
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPack;
    use crate::core::scheduler::{Clock, ManualClock};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(rng: &mut StdRng) -> ChatSession {
        let responder = Responder::new(ContentPack::embedded().unwrap().responses).unwrap();
        ChatSession::new(responder, ChatSettings::default(), "Mia", "Monday", rng)
    }

    fn fire(
        chat: &mut ChatSession,
        timers: &mut Timers<ChatEvent>,
        clock: &ManualClock,
        rng: &mut StdRng,
    ) -> Vec<SpeakRequest> {
        timers
            .drain_due(clock.now())
            .into_iter()
            .filter_map(|event| chat.handle(event, clock.now(), timers, rng))
            .collect()
    }

    #[test]
    fn test_greeting() {
        let mut rng = StdRng::seed_from_u64(1);
        let chat = session(&mut rng);
        let first = &chat.messages()[0];
        assert_eq!(first.role, Role::Buddy);
        assert_eq!(
            first.text,
            "Happy Monday, Mia! 🌟 What would you like to talk about today? I have some fun ideas:"
        );
        assert_eq!(first.suggestions.len(), 3);
        assert_eq!(chat.suggestions(), first.suggestions.as_slice());
    }

    #[test]
    fn test_reply_arrives_after_thinking_delay() {
        let mut rng = StdRng::seed_from_u64(2);
        let clock = ManualClock::new();
        let mut timers = Timers::new();
        let mut chat = session(&mut rng);

        assert!(chat.send("Tell me about dinosaurs", clock.now(), &mut timers, &mut rng));
        assert!(chat.is_waiting());
        assert!(chat.suggestions().is_empty());
        assert_eq!(chat.messages().len(), 2);

        clock.advance(Duration::from_millis(999));
        assert!(fire(&mut chat, &mut timers, &clock, &mut rng).is_empty());
        assert_eq!(chat.messages().len(), 2);

        clock.advance(Duration::from_millis(1001));
        let spoken = fire(&mut chat, &mut timers, &clock, &mut rng);
        assert_eq!(chat.messages().len(), 3);
        assert!(!chat.is_waiting());
        assert!(chat.messages()[2].text.contains("dinosaur"));
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].message_id, chat.messages()[2].id);

        // Chips show up only after the reveal delay
        assert!(chat.suggestions().is_empty());
        clock.advance(Duration::from_millis(800));
        fire(&mut chat, &mut timers, &clock, &mut rng);
        assert_eq!(chat.suggestions(), chat.messages()[2].suggestions.as_slice());
    }

    #[test]
    fn test_send_ignored_while_waiting_or_blank() {
        let mut rng = StdRng::seed_from_u64(3);
        let clock = ManualClock::new();
        let mut timers: Timers<ChatEvent> = Timers::new();
        let mut chat = session(&mut rng);

        assert!(!chat.send("   ", clock.now(), &mut timers, &mut rng));
        assert!(chat.send("hi", clock.now(), &mut timers, &mut rng));
        assert!(!chat.send("again", clock.now(), &mut timers, &mut rng));
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn test_pick_suggestion_sends_it() {
        let mut rng = StdRng::seed_from_u64(4);
        let clock = ManualClock::new();
        let mut timers: Timers<ChatEvent> = Timers::new();
        let mut chat = session(&mut rng);

        let chip = chat.suggestions()[1].clone();
        assert!(chat.pick_suggestion(1, clock.now(), &mut timers, &mut rng));
        assert_eq!(chat.messages().last().unwrap().text, chip);
        assert!(!chat.pick_suggestion(7, clock.now(), &mut timers, &mut rng));
    }

    #[test]
    fn test_ids_increase_and_auto_speak_off() {
        let mut rng = StdRng::seed_from_u64(5);
        let clock = ManualClock::new();
        let mut timers = Timers::new();
        let responder = Responder::new(ContentPack::embedded().unwrap().responses).unwrap();
        let settings = ChatSettings {
            auto_speak: false,
            ..ChatSettings::default()
        };
        let mut chat = ChatSession::new(responder, settings, "Leo", "Friday", &mut rng);

        for text in ["space", "whales", "xyz"] {
            chat.send(text, clock.now(), &mut timers, &mut rng);
            clock.advance(Duration::from_secs(3));
            assert!(fire(&mut chat, &mut timers, &clock, &mut rng).is_empty());
        }
        let ids: Vec<u64> = chat.messages().iter().map(|m| m.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ids.len(), 7);
    }
}
