//! Edit-flow state machine for presentation code.
//!
//! One session gates which operations are legal while an entity is being
//! edited: `Viewing` (resting), `Editing` (holds the snapshot of the entity
//! under edit plus a working draft), `Submitting` (a store call is in
//! flight), and `Failed` (terminal for display, recoverable by retry or
//! acknowledgement). The machine is independent of any rendering framework
//! and makes no store calls itself - presentation code feeds it events and
//! performs the store call while the machine is `Submitting`.

use std::mem;

use thiserror::Error;

/// Illegal session transitions, reported as values rather than panics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot {event} while {state}")]
    InvalidTransition {
        /// The rejected event.
        event: &'static str,
        /// The state the session was in.
        state: &'static str,
    },
}

/// Edit-session states. Only one `Editing`/`Submitting` session is active per
/// page: the machine itself is that session, and beginning a new edit
/// implicitly cancels whatever was active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSession<E, D> {
    /// No edit in progress.
    Viewing,
    /// An entity is being edited.
    Editing {
        /// Copy of the entity as it was when the edit began.
        snapshot: E,
        /// The working draft the operator is changing.
        draft: D,
    },
    /// The draft has been submitted; a store call is in flight.
    Submitting {
        /// Preserved so a failure can return to `Editing` unchanged.
        snapshot: E,
        /// The draft that was submitted.
        draft: D,
    },
    /// The submission failed.
    Failed {
        /// Operator-facing failure message.
        message: String,
        /// Preserved for retry.
        snapshot: E,
        /// Preserved for retry.
        draft: D,
    },
}

impl<E, D> Default for EditSession<E, D> {
    fn default() -> Self {
        Self::Viewing
    }
}

impl<E: Clone, D: Clone> EditSession<E, D> {
    /// A fresh session in `Viewing`.
    #[must_use]
    pub const fn new() -> Self {
        Self::Viewing
    }

    /// Stable state name for diagnostics and error messages.
    #[must_use]
    pub const fn state_name(&self) -> &'static str {
        match self {
            Self::Viewing => "viewing",
            Self::Editing { .. } => "editing",
            Self::Submitting { .. } => "submitting",
            Self::Failed { .. } => "failed",
        }
    }

    /// Begin editing an entity. Allowed from any state: beginning a new edit
    /// while one is active implicitly cancels the prior one, discarding its
    /// unsaved draft.
    pub fn begin_edit(&mut self, snapshot: E, draft: D) {
        *self = Self::Editing { snapshot, draft };
    }

    /// The working draft, while one exists.
    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            Self::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// The snapshot of the entity under edit, while one exists.
    #[must_use]
    pub fn snapshot(&self) -> Option<&E> {
        match self {
            Self::Editing { snapshot, .. }
            | Self::Submitting { snapshot, .. }
            | Self::Failed { snapshot, .. } => Some(snapshot),
            Self::Viewing => None,
        }
    }

    /// Submit the draft: `Editing -> Submitting`. Returns a clone of the
    /// draft for the caller to hand to the store.
    ///
    /// # Errors
    ///
    /// Rejected unless the session is `Editing`.
    pub fn submit(&mut self) -> Result<D, SessionError> {
        match mem::replace(self, Self::Viewing) {
            Self::Editing { snapshot, draft } => {
                *self = Self::Submitting {
                    snapshot,
                    draft: draft.clone(),
                };
                Ok(draft)
            }
            other => {
                let state = other.state_name();
                *self = other;
                Err(SessionError::InvalidTransition {
                    event: "submit",
                    state,
                })
            }
        }
    }

    /// The store confirmed the submission: `Submitting -> Viewing`.
    ///
    /// # Errors
    ///
    /// Rejected unless the session is `Submitting`.
    pub fn confirm(&mut self) -> Result<(), SessionError> {
        self.expect_submitting("confirm")?;
        *self = Self::Viewing;
        Ok(())
    }

    /// The store reported a failure: `Submitting -> Failed`.
    ///
    /// # Errors
    ///
    /// Rejected unless the session is `Submitting`.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), SessionError> {
        match mem::replace(self, Self::Viewing) {
            Self::Submitting { snapshot, draft } => {
                *self = Self::Failed {
                    message: message.into(),
                    snapshot,
                    draft,
                };
                Ok(())
            }
            other => {
                let state = other.state_name();
                *self = other;
                Err(SessionError::InvalidTransition {
                    event: "fail",
                    state,
                })
            }
        }
    }

    /// Abandon the edit: `Editing -> Viewing`, draft discarded, no store call.
    ///
    /// # Errors
    ///
    /// Rejected unless the session is `Editing`.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        match self {
            Self::Editing { .. } => {
                *self = Self::Viewing;
                Ok(())
            }
            other => Err(SessionError::InvalidTransition {
                event: "cancel",
                state: other.state_name(),
            }),
        }
    }

    /// Return to editing after a failure: `Failed -> Editing`, snapshot and
    /// draft preserved.
    ///
    /// # Errors
    ///
    /// Rejected unless the session is `Failed`.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        match mem::replace(self, Self::Viewing) {
            Self::Failed {
                snapshot, draft, ..
            } => {
                *self = Self::Editing { snapshot, draft };
                Ok(())
            }
            other => {
                let state = other.state_name();
                *self = other;
                Err(SessionError::InvalidTransition {
                    event: "retry",
                    state,
                })
            }
        }
    }

    /// Dismiss a failure: `Failed -> Viewing`.
    ///
    /// # Errors
    ///
    /// Rejected unless the session is `Failed`.
    pub fn acknowledge(&mut self) -> Result<(), SessionError> {
        match self {
            Self::Failed { .. } => {
                *self = Self::Viewing;
                Ok(())
            }
            other => Err(SessionError::InvalidTransition {
                event: "acknowledge",
                state: other.state_name(),
            }),
        }
    }

    /// The failure message, while in `Failed`.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    fn expect_submitting(&self, event: &'static str) -> Result<(), SessionError> {
        match self {
            Self::Submitting { .. } => Ok(()),
            other => Err(SessionError::InvalidTransition {
                event,
                state: other.state_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Session = EditSession<&'static str, String>;

    fn editing() -> Session {
        let mut session = Session::new();
        session.begin_edit("entity-1", "draft-1".to_string());
        session
    }

    #[test]
    fn test_happy_path_edit_submit_confirm() {
        let mut session = editing();
        assert_eq!(session.state_name(), "editing");

        let draft = session.submit().expect("submit from editing");
        assert_eq!(draft, "draft-1");
        assert_eq!(session.state_name(), "submitting");

        session.confirm().expect("confirm from submitting");
        assert_eq!(session, Session::Viewing);
    }

    #[test]
    fn test_failure_then_retry_preserves_snapshot_and_draft() {
        let mut session = editing();
        session.submit().expect("submit");
        session.fail("HTTP 502: no error message").expect("fail");

        assert_eq!(session.failure_message(), Some("HTTP 502: no error message"));
        assert_eq!(session.snapshot(), Some(&"entity-1"));

        session.retry().expect("retry from failed");
        assert_eq!(
            session,
            Session::Editing {
                snapshot: "entity-1",
                draft: "draft-1".to_string()
            }
        );
    }

    #[test]
    fn test_failure_then_acknowledge_returns_to_viewing() {
        let mut session = editing();
        session.submit().expect("submit");
        session.fail("boom").expect("fail");
        session.acknowledge().expect("acknowledge");
        assert_eq!(session, Session::Viewing);
    }

    #[test]
    fn test_cancel_discards_draft_without_store_call() {
        let mut session = editing();
        session.cancel().expect("cancel from editing");
        assert_eq!(session, Session::Viewing);
        assert_eq!(session.draft_mut(), None);
    }

    #[test]
    fn test_begin_edit_implicitly_cancels_active_session() {
        let mut session = editing();
        session.begin_edit("entity-2", "draft-2".to_string());

        assert_eq!(
            session,
            Session::Editing {
                snapshot: "entity-2",
                draft: "draft-2".to_string()
            }
        );
    }

    #[test]
    fn test_illegal_transitions_are_values_not_panics() {
        let mut session = Session::new();

        assert_eq!(
            session.submit(),
            Err(SessionError::InvalidTransition {
                event: "submit",
                state: "viewing"
            })
        );
        assert_eq!(
            session.confirm(),
            Err(SessionError::InvalidTransition {
                event: "confirm",
                state: "viewing"
            })
        );
        assert_eq!(
            session.retry(),
            Err(SessionError::InvalidTransition {
                event: "retry",
                state: "viewing"
            })
        );

        // A rejected event leaves the state unchanged.
        let mut session = editing();
        assert!(session.confirm().is_err());
        assert_eq!(session.state_name(), "editing");
    }
}
