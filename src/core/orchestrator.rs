//! View orchestration: which screen is showing and what earlier screens produced.
//!
//! The onboarding chain is strictly linear
//! (initial-setup → confirmation → code-setup → main) with a side branch
//! main ↔ parent-view. The orchestrator owns the Profile and AccessCode for the
//! session and hands screens borrowed views of them through [`Screen`].

use super::access_code::AccessCode;
use super::error::FlowError;
use super::profile::{Profile, ProfileDraft};
use std::fmt;

/// The sole piece of orchestration state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenState {
    #[default]
    InitialSetup,
    Confirmation,
    CodeSetup,
    Main,
    ParentView,
}

impl ScreenState {
    /// Position in the three-step onboarding indicator, if shown
    pub fn onboarding_step(self) -> Option<u8> {
        match self {
            ScreenState::InitialSetup => Some(1),
            ScreenState::Confirmation => Some(2),
            ScreenState::CodeSetup => Some(3),
            ScreenState::Main | ScreenState::ParentView => None,
        }
    }
}

impl fmt::Display for ScreenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreenState::InitialSetup => "initial-setup",
            ScreenState::Confirmation => "confirmation",
            ScreenState::CodeSetup => "code-setup",
            ScreenState::Main => "main",
            ScreenState::ParentView => "parent-view",
        };
        f.write_str(name)
    }
}

/// Screen to render, with the data it needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen<'a> {
    ProfileSetup,
    Confirmation {
        profile: &'a Profile,
    },
    CodeSetup {
        profile: &'a Profile,
    },
    Main {
        profile: &'a Profile,
        access_code: &'a AccessCode,
    },
    ParentView {
        profile: &'a Profile,
        access_code: &'a AccessCode,
    },
}

/// Input accepted by [`Orchestrator::advance`]
#[derive(Debug, Clone)]
pub enum FlowInput {
    /// Submit the profile setup form
    Profile(ProfileDraft),
    /// Continue from the confirmation card
    ConfirmProfile,
    /// Finish code setup; `confirmation` is the re-entered code when the
    /// confirm step was used
    AccessCode {
        code: String,
        confirmation: Option<String>,
    },
    /// Open the parent view without a code check
    EnterParentView,
    /// Open the parent view if `attempt` equals the stored code
    UnlockParentView(String),
    /// Leave the parent view
    ExitParentView,
}

/// Result of [`Orchestrator::advance`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: ScreenState,
    pub error: Option<FlowError>,
}

/// Session-scoped state machine owned by the composition root
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    state: ScreenState,
    profile: Option<Profile>,
    access_code: Option<AccessCode>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn access_code(&self) -> Option<&AccessCode> {
        self.access_code.as_ref()
    }

    /// Single dispatch entry point; never panics on bad input
    pub fn advance(&mut self, input: FlowInput) -> Transition {
        let result = match input {
            FlowInput::Profile(draft) => self.complete_profile(&draft),
            FlowInput::ConfirmProfile => self.confirm_profile(),
            FlowInput::AccessCode { code, confirmation } => match confirmation {
                Some(confirmation) if confirmation != code => {
                    // State first, then format, then the mismatch
                    self.expect_state(ScreenState::CodeSetup)
                        .and_then(|()| AccessCode::parse(&code))
                        .and(Err(FlowError::CodeMismatch))
                }
                _ => self.complete_code_setup(&code),
            },
            FlowInput::EnterParentView => self.enter_parent_view(),
            FlowInput::UnlockParentView(attempt) => self.unlock_parent_view(&attempt),
            FlowInput::ExitParentView => self.exit_parent_view(),
        };

        Transition {
            next: self.state,
            error: result.err(),
        }
    }

    /// initial-setup → confirmation
    pub fn complete_profile(&mut self, draft: &ProfileDraft) -> Result<(), FlowError> {
        self.expect_state(ScreenState::InitialSetup)?;
        let profile = draft.build()?;
        tracing::info!(
            name = profile.display_name(),
            age = profile.age(),
            "Profile created"
        );
        self.profile = Some(profile);
        self.transition(ScreenState::Confirmation);
        Ok(())
    }

    /// confirmation → code-setup
    pub fn confirm_profile(&mut self) -> Result<(), FlowError> {
        self.expect_state(ScreenState::Confirmation)?;
        self.transition(ScreenState::CodeSetup);
        Ok(())
    }

    /// code-setup → main
    pub fn complete_code_setup(&mut self, code: &str) -> Result<(), FlowError> {
        self.expect_state(ScreenState::CodeSetup)?;
        let code = AccessCode::parse(code)?;
        self.access_code = Some(code);
        self.transition(ScreenState::Main);
        Ok(())
    }

    /// main → parent-view
    pub fn enter_parent_view(&mut self) -> Result<(), FlowError> {
        self.expect_state(ScreenState::Main)?;
        self.transition(ScreenState::ParentView);
        Ok(())
    }

    /// main → parent-view, gated on the stored access code
    pub fn unlock_parent_view(&mut self, attempt: &str) -> Result<(), FlowError> {
        self.expect_state(ScreenState::Main)?;
        let unlocked = self
            .access_code
            .as_ref()
            .is_some_and(|code| code.matches(attempt));
        if !unlocked {
            tracing::info!("Parent view unlock rejected");
            return Err(FlowError::IncorrectCode);
        }
        self.enter_parent_view()
    }

    /// parent-view → main
    pub fn exit_parent_view(&mut self) -> Result<(), FlowError> {
        self.expect_state(ScreenState::ParentView)?;
        self.transition(ScreenState::Main);
        Ok(())
    }

    /// Resolve the current state to exactly one screen
    pub fn screen(&self) -> Screen<'_> {
        match (self.state, &self.profile, &self.access_code) {
            (ScreenState::InitialSetup, _, _) => Screen::ProfileSetup,
            (ScreenState::Confirmation, Some(profile), _) => Screen::Confirmation { profile },
            (ScreenState::CodeSetup, Some(profile), _) => Screen::CodeSetup { profile },
            (ScreenState::Main, Some(profile), Some(access_code)) => Screen::Main {
                profile,
                access_code,
            },
            (ScreenState::ParentView, Some(profile), Some(access_code)) => Screen::ParentView {
                profile,
                access_code,
            },
            (state, profile, code) => {
                // Transitions always run in order, so this is a bug
                debug_assert!(
                    false,
                    "screen guard violated: {} with profile={} code={}",
                    state,
                    profile.is_some(),
                    code.is_some()
                );
                tracing::error!(
                    %state,
                    has_profile = profile.is_some(),
                    has_code = code.is_some(),
                    "Screen guard violated, falling back to profile setup"
                );
                Screen::ProfileSetup
            }
        }
    }

    fn expect_state(&self, expected: ScreenState) -> Result<(), FlowError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(FlowError::OutOfOrder {
                expected,
                actual: self.state,
            })
        }
    }

    fn transition(&mut self, next: ScreenState) {
        tracing::info!(from = %self.state, to = %next, "Screen transition");
        self.state = next;
    }
}
