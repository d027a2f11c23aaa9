//! Text-to-Speech for chat replies
//!
//! Replies can be read aloud automatically and any buddy message can be
//! toggled on or off by the child. At most one message plays at a time.
//! Features:
//! - Cross-platform TTS (Windows SAPI, macOS AVSpeechSynthesizer, Linux Speech Dispatcher)
//! - Rate and pitch relative to the engine's normal voice
//! - Zero cost when disabled; a failed engine start only disables speech

use anyhow::Result;
use std::sync::mpsc::{channel, Receiver, Sender};
use tts::{Tts, UtteranceId};

use crate::config::TtsConfig;

/// Seam between the speech manager and the platform engine
pub trait SpeechEngine {
    /// Start speaking `text`, interrupting anything in progress
    fn speak(&mut self, text: &str) -> Result<()>;

    fn stop(&mut self) -> Result<()>;

    /// True once the most recent utterance has finished on its own
    fn poll_finished(&mut self) -> bool;
}

/// Events sent from TTS callbacks to the main event loop
#[derive(Debug, Clone)]
pub enum TtsEvent {
    UtteranceEnded(UtteranceId),
}

/// [`SpeechEngine`] backed by the `tts` crate
pub struct TtsEngine {
    tts: Tts,
    current_utterance_id: Option<UtteranceId>,
    event_rx: Receiver<TtsEvent>,
}

impl TtsEngine {
    pub fn new(config: &TtsConfig) -> Result<Self> {
        tracing::info!("Initializing TTS engine...");
        let mut tts = Tts::default()?;

        let rate = scale_around_normal(
            config.rate,
            tts.min_rate(),
            tts.normal_rate(),
            tts.max_rate(),
        );
        let pitch = scale_around_normal(
            config.pitch,
            tts.min_pitch(),
            tts.normal_pitch(),
            tts.max_pitch(),
        );
        let volume = normalize_volume(config.volume, tts.min_volume(), tts.max_volume());

        // Not every backend supports every knob
        if let Err(e) = tts.set_rate(rate) {
            tracing::warn!("TTS rate not applied: {}", e);
        }
        if let Err(e) = tts.set_pitch(pitch) {
            tracing::warn!("TTS pitch not applied: {}", e);
        }
        if let Err(e) = tts.set_volume(volume) {
            tracing::warn!("TTS volume not applied: {}", e);
        }
        tracing::info!(
            "TTS configured: rate {} -> {}, pitch {} -> {}, volume {} -> {}",
            config.rate,
            rate,
            config.pitch,
            pitch,
            config.volume,
            volume
        );

        let (event_tx, event_rx): (Sender<TtsEvent>, Receiver<TtsEvent>) = channel();
        tts.on_utterance_end(Some(Box::new(move |id| {
            let _ = event_tx.send(TtsEvent::UtteranceEnded(id));
        })))?;

        Ok(Self {
            tts,
            current_utterance_id: None,
            event_rx,
        })
    }
}

impl SpeechEngine for TtsEngine {
    fn speak(&mut self, text: &str) -> Result<()> {
        self.current_utterance_id = self.tts.speak(text, true)?;
        if self.current_utterance_id.is_none() {
            tracing::warn!("TTS speak() returned no UtteranceId");
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.tts.stop()?;
        self.current_utterance_id = None;
        Ok(())
    }

    fn poll_finished(&mut self) -> bool {
        let mut finished = false;
        while let Ok(TtsEvent::UtteranceEnded(id)) = self.event_rx.try_recv() {
            // Ends of interrupted utterances are stale
            if self.current_utterance_id == Some(id) {
                self.current_utterance_id = None;
                finished = true;
            }
        }
        finished
    }
}

/// Map a relative value (1.0 = normal) onto a backend range with its own
/// normal point, so 0.5 lands halfway to the minimum and 2.0 at the maximum.
fn scale_around_normal(value: f32, min: f32, normal: f32, max: f32) -> f32 {
    let value = value.clamp(0.0, 2.0);
    if value < 1.0 {
        normal - (1.0 - value) * (normal - min)
    } else {
        normal + (value - 1.0) * (max - normal)
    }
}

/// Config volume is 0.0 to 1.0; map it onto the backend's range
fn normalize_volume(volume: f32, min: f32, max: f32) -> f32 {
    min + volume.clamp(0.0, 1.0) * (max - min)
}

/// Speech for chat messages
///
/// When disabled every call is a no-op.
pub struct SpeechManager {
    engine: Option<Box<dyn SpeechEngine>>,
    config: TtsConfig,
    enabled: bool,

    /// Message currently being read aloud
    playing: Option<u64>,
}

impl SpeechManager {
    /// Create a manager; the engine starts on first use
    pub fn new(config: TtsConfig) -> Self {
        Self {
            enabled: config.enabled,
            engine: None,
            config,
            playing: None,
        }
    }

    /// Create a manager around an already running engine
    #[cfg(test)]
    pub fn with_engine(engine: Box<dyn SpeechEngine>) -> Self {
        Self {
            engine: Some(engine),
            config: TtsConfig::default(),
            enabled: true,
            playing: None,
        }
    }

    /// Start the engine (lazy initialization); failure disables speech
    fn ensure_initialized(&mut self) -> bool {
        if self.enabled && self.engine.is_none() {
            match TtsEngine::new(&self.config) {
                Ok(engine) => {
                    self.engine = Some(Box::new(engine));
                    tracing::info!("TTS engine initialized successfully with callbacks");
                }
                Err(e) => {
                    tracing::warn!("TTS unavailable, speech disabled: {}", e);
                    self.enabled = false;
                }
            }
        }
        self.enabled && self.engine.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            if !enabled {
                self.stop();
            }
            self.enabled = enabled;
            tracing::info!("TTS {}", if enabled { "enabled" } else { "disabled" });
        }
    }

    /// Id of the message being read, if any
    pub fn playing(&self) -> Option<u64> {
        self.playing
    }

    /// Read a message, interrupting whatever is playing
    pub fn speak(&mut self, message_id: u64, text: &str) {
        if !self.ensure_initialized() {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        match engine.speak(text) {
            Ok(()) => {
                tracing::debug!(message_id, "Speaking message");
                self.playing = Some(message_id);
            }
            Err(e) => {
                tracing::warn!("TTS speak failed: {}", e);
                self.playing = None;
            }
        }
    }

    /// Stop the message if it is playing, otherwise play it instead
    pub fn toggle(&mut self, message_id: u64, text: &str) {
        if !self.enabled {
            return;
        }
        if self.playing == Some(message_id) {
            self.stop();
        } else {
            self.stop();
            self.speak(message_id, text);
        }
    }

    pub fn stop(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            if let Err(e) = engine.stop() {
                tracing::warn!("TTS stop failed: {}", e);
            }
        }
        self.playing = None;
    }

    /// Pick up utterance-end callbacks; call once per frame
    pub fn poll(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            if engine.poll_finished() {
                tracing::debug!(message_id = ?self.playing, "Finished speaking");
                self.playing = None;
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// What a fake engine was asked to do
    #[derive(Debug, Default)]
    pub struct EngineLog {
        pub spoken: Vec<String>,
        pub stops: usize,
        pub finish_next_poll: bool,
    }

    /// In-memory engine; tests keep the log handle to inspect and drive it
    pub struct FakeEngine(pub Rc<RefCell<EngineLog>>);

    impl SpeechEngine for FakeEngine {
        fn speak(&mut self, text: &str) -> Result<()> {
            self.0.borrow_mut().spoken.push(text.to_string());
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.0.borrow_mut().stops += 1;
            Ok(())
        }

        fn poll_finished(&mut self) -> bool {
            std::mem::take(&mut self.0.borrow_mut().finish_next_poll)
        }
    }

    pub fn fake_manager() -> (SpeechManager, Rc<RefCell<EngineLog>>) {
        let log = Rc::new(RefCell::new(EngineLog::default()));
        let manager = SpeechManager::with_engine(Box::new(FakeEngine(log.clone())));
        (manager, log)
    }
}
