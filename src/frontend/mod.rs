//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the terminal frontend implements.
//! It provides a unified interface for event polling, rendering, and cleanup.

pub mod events;
pub mod tui;

use crate::core::AppCore;
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

/// Frontend trait
///
/// The Frontend trait separates rendering concerns from business logic.
/// The core never draws; a frontend reads `AppCore` and renders it.
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events converted to the frontend-agnostic
    /// `FrontendEvent` enum (empty if nothing happened before the timeout).
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state, called once per frame
    fn render(&mut self, core: &AppCore) -> Result<()>;

    /// Restore the terminal before the application exits
    fn cleanup(&mut self) -> Result<()>;
}
