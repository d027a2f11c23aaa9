//! Core business logic layer
//!
//! Screen state machine, onboarding forms, chat, tab models and timers.
//! NO imports from frontend rendering code.
//! Core updates data structures, frontends read and render.

pub mod access_code;
pub mod app_core;
pub mod chat;
pub mod creatives;
pub mod dashboard;
pub mod error;
pub mod games;
pub mod main_app;
pub mod orchestrator;
pub mod profile;
pub mod profile_panel;
pub mod quests;
pub mod responder;
pub mod scheduler;

pub use app_core::AppCore;
pub use error::FlowError;
pub use orchestrator::{Orchestrator, Screen, ScreenState};
