//! The modal overlay state machine.
//!
//! The login/registration overlay is the one part of the storefront with
//! genuine lifecycle structure, so its sequencing lives in an explicit
//! state machine rather than in ad-hoc call ordering:
//!
//! ```text
//! Closed ──open──► OpeningAuth ──[modal visible]──► AuthVisible
//! AuthVisible ──switch tab──► SwitchingToRegistration ──[fields visible]──► RegistrationVisible
//! {Auth|Registration}Visible ──submit──► Submitting ──[success | error markup]──► ResultVisible(_)
//! ResultVisible(Success) ──[auto-dismiss observed]──► Closed
//! any visible state ──close button──► Closing ──[modal gone]──► Closed
//! ```
//!
//! Every transition's wait is one bounded poll. A transition that does not
//! observe its post-condition within policy fails once and is reported to
//! the caller; nothing here retries indefinitely.

use crate::regions::{AuthModal, HeaderTop, ModalTab};
use escaparate::conditions::{clickable, visible};
use escaparate::{
    wait_for, wait_until_absent, Condition, Document, Locator, Node, Probe, Result,
};
use thiserror::Error;
use tracing::{debug, info};

/// Where the overlay currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    /// No overlay shown; both the initial and the terminal state
    Closed,
    /// Open trigger issued, waiting for the window
    OpeningAuth,
    /// Authorization tab rendered
    AuthVisible,
    /// Tab switch issued, waiting for registration fields
    SwitchingToRegistration,
    /// Registration tab rendered
    RegistrationVisible,
    /// Submit issued, waiting for the server's verdict markup
    Submitting,
    /// Success or error markup rendered
    ResultVisible(SubmitResult),
    /// Close trigger issued, waiting for the window to go
    Closing,
}

/// How a submit settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitResult {
    /// Success markup appeared
    Success,
    /// Error or validation markup appeared
    Error,
}

/// Why a flow step did not complete
#[derive(Debug, Error)]
pub enum FlowError {
    /// The trigger fired but the expected post-condition never appeared
    #[error("transition {trigger:?} from {from:?} did not reach its post-condition within policy")]
    FailedTransition {
        /// State the transition started from
        from: ModalState,
        /// What was triggered
        trigger: &'static str,
    },

    /// The requested trigger is not legal in the current state
    #[error("trigger {trigger:?} is not valid in state {from:?}")]
    InvalidTrigger {
        /// Current state
        from: ModalState,
        /// What was requested
        trigger: &'static str,
    },

    /// A capability fault from the engine
    #[error(transparent)]
    Engine(#[from] escaparate::Error),
}

/// A submit settles on whichever verdict markup renders first
#[derive(Debug)]
struct SubmitSettled {
    success: Locator,
    error: Locator,
}

impl<D: Document> Condition<D> for SubmitSettled {
    type Output = SubmitResult;

    fn probe(&self, doc: &D) -> Result<Probe<SubmitResult>> {
        if let Some(node) = doc.find_one(&self.success)? {
            if node.is_visible()? {
                return Ok(Probe::Satisfied(SubmitResult::Success));
            }
        }
        if let Some(node) = doc.find_one(&self.error)? {
            if node.is_visible()? {
                return Ok(Probe::Satisfied(SubmitResult::Error));
            }
        }
        Ok(Probe::Pending)
    }

    fn describe(&self) -> String {
        format!("submit settled on {} or {}", self.success, self.error)
    }
}

/// Driver for one modal lifecycle instance
#[derive(Debug)]
pub struct ModalFlow<'d, D: Document> {
    modal: AuthModal<'d, D>,
    doc: &'d D,
    state: ModalState,
}

impl<'d, D: Document> ModalFlow<'d, D> {
    /// Open the overlay from the top bar and wait for the authorization tab.
    ///
    /// # Errors
    ///
    /// [`FlowError::FailedTransition`] when the login button cannot be
    /// clicked or the window never renders.
    pub fn open(
        header: &HeaderTop<'d, D>,
        modal: AuthModal<'d, D>,
    ) -> std::result::Result<Self, FlowError> {
        let doc = modal.document();
        if !header.click_login_button()? {
            return Err(FlowError::FailedTransition {
                from: ModalState::Closed,
                trigger: "open login modal",
            });
        }
        debug!("modal open triggered");
        let appeared = wait_for(
            doc,
            &visible(modal.window_locator().clone()),
            modal.policy(),
        )?;
        if !appeared.is_success() {
            return Err(FlowError::FailedTransition {
                from: ModalState::OpeningAuth,
                trigger: "open login modal",
            });
        }
        info!("auth modal visible");
        Ok(Self {
            modal,
            doc,
            state: ModalState::AuthVisible,
        })
    }

    /// The current state
    #[must_use]
    pub const fn state(&self) -> ModalState {
        self.state
    }

    /// The tab the flow believes is rendered
    #[must_use]
    pub const fn tab(&self) -> ModalTab {
        match self.state {
            ModalState::RegistrationVisible => ModalTab::Registration,
            _ => ModalTab::Authorization,
        }
    }

    /// The wrapped modal region, for layout queries between transitions
    #[must_use]
    pub const fn modal(&self) -> &AuthModal<'d, D> {
        &self.modal
    }

    /// Switch to the registration tab and wait for its fields.
    ///
    /// On return the registration form is rendered and queryable; the call
    /// does not complete before its post-condition holds.
    ///
    /// # Errors
    ///
    /// [`FlowError::InvalidTrigger`] outside `AuthVisible`;
    /// [`FlowError::FailedTransition`] when the fields never render.
    pub fn switch_to_registration(&mut self) -> std::result::Result<(), FlowError> {
        if self.state != ModalState::AuthVisible {
            return Err(FlowError::InvalidTrigger {
                from: self.state,
                trigger: "switch to registration",
            });
        }
        if !self.modal.click_registration_tab()? {
            return Err(FlowError::FailedTransition {
                from: self.state,
                trigger: "switch to registration",
            });
        }
        self.state = ModalState::SwitchingToRegistration;
        let rendered = wait_for(
            self.doc,
            &clickable(self.modal.registration_marker().clone()),
            self.modal.policy(),
        )?;
        if !rendered.is_success() {
            return Err(FlowError::FailedTransition {
                from: ModalState::SwitchingToRegistration,
                trigger: "switch to registration",
            });
        }
        info!("registration tab visible");
        self.state = ModalState::RegistrationVisible;
        Ok(())
    }

    /// Submit the visible tab and wait for the verdict markup.
    ///
    /// # Errors
    ///
    /// [`FlowError::InvalidTrigger`] unless a tab is visible;
    /// [`FlowError::FailedTransition`] when neither success nor error
    /// markup renders within policy.
    pub fn submit(&mut self) -> std::result::Result<SubmitResult, FlowError> {
        let tab = match self.state {
            ModalState::AuthVisible => ModalTab::Authorization,
            ModalState::RegistrationVisible => ModalTab::Registration,
            _ => {
                return Err(FlowError::InvalidTrigger {
                    from: self.state,
                    trigger: "submit",
                })
            }
        };
        let from = self.state;
        let submit = self.modal.submit_locator(tab).clone();
        let settled_on = {
            let clickable_check = wait_for(self.doc, &clickable(submit.clone()), self.modal.policy())?;
            if !clickable_check.is_success() {
                return Err(FlowError::FailedTransition {
                    from,
                    trigger: "submit",
                });
            }
            match self.doc.find_one(&submit)? {
                Some(button) => button.click()?,
                None => {
                    return Err(FlowError::FailedTransition {
                        from,
                        trigger: "submit",
                    })
                }
            }
            self.state = ModalState::Submitting;
            let (success, error) = self.modal.submit_markers(tab);
            wait_for(
                self.doc,
                &SubmitSettled { success, error },
                self.modal.policy(),
            )?
        };
        match settled_on.into_option() {
            Some(result) => {
                info!(?result, "submit settled");
                self.state = ModalState::ResultVisible(result);
                Ok(result)
            }
            None => Err(FlowError::FailedTransition {
                from: ModalState::Submitting,
                trigger: "submit",
            }),
        }
    }

    /// Close the overlay with the close button and wait for it to go.
    ///
    /// # Errors
    ///
    /// [`FlowError::InvalidTrigger`] when nothing is visible;
    /// [`FlowError::FailedTransition`] when the window outlives the wait.
    pub fn close(&mut self) -> std::result::Result<(), FlowError> {
        match self.state {
            ModalState::AuthVisible
            | ModalState::RegistrationVisible
            | ModalState::ResultVisible(_) => {}
            _ => {
                return Err(FlowError::InvalidTrigger {
                    from: self.state,
                    trigger: "close",
                })
            }
        }
        let from = self.state;
        if !self.modal.click_close()? {
            return Err(FlowError::FailedTransition {
                from,
                trigger: "close",
            });
        }
        self.state = ModalState::Closing;
        let gone = wait_until_absent(
            self.doc,
            &visible(self.modal.window_locator().clone()),
            self.modal.policy(),
        )?;
        if !gone.is_success() {
            return Err(FlowError::FailedTransition {
                from: ModalState::Closing,
                trigger: "close",
            });
        }
        info!("modal closed");
        self.state = ModalState::Closed;
        Ok(())
    }

    /// After a successful submit, wait for the overlay to dismiss itself.
    ///
    /// # Errors
    ///
    /// [`FlowError::InvalidTrigger`] unless the success result is visible;
    /// [`FlowError::FailedTransition`] when the window never goes.
    pub fn await_auto_dismiss(&mut self) -> std::result::Result<(), FlowError> {
        if self.state != ModalState::ResultVisible(SubmitResult::Success) {
            return Err(FlowError::InvalidTrigger {
                from: self.state,
                trigger: "await auto-dismiss",
            });
        }
        let gone = wait_until_absent(
            self.doc,
            &visible(self.modal.window_locator().clone()),
            self.modal.policy(),
        )?;
        if !gone.is_success() {
            return Err(FlowError::FailedTransition {
                from: self.state,
                trigger: "await auto-dismiss",
            });
        }
        self.state = ModalState::Closed;
        Ok(())
    }
}
