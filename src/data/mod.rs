//! Data layer - Pure state without UI coupling
//!
//! Focus, selection and text-input state for every screen.
//! NO imports from frontend/ or any rendering code.

pub mod ui_state;

pub use ui_state::*;
