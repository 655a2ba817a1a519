use crate::identifier::Identifier;
use crate::storage::UploadFile;

use super::wallet::Address;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated {
        address: Address,
        /// Files chosen but not yet uploaded
        selection: Vec<UploadFile>,
    },
}

/// Everything that can happen to a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignInSucceeded { address: Address },
    SignInFailed { reason: String },
    FilesSelected(Vec<UploadFile>),
    UploadSucceeded(Identifier),
    UploadFailed { reason: String },
    SignedOut,
}

impl SessionState {
    /// The session's transition function
    pub fn transition(self, event: SessionEvent) -> SessionState {
        match (self, event) {
            (SessionState::Anonymous, SessionEvent::SignInSucceeded { address }) => {
                SessionState::Authenticated {
                    address,
                    selection: Vec::new(),
                }
            }
            // nothing but a successful sign in leaves the anonymous state
            (SessionState::Anonymous, _) => SessionState::Anonymous,

            (_, SessionEvent::SignedOut) => SessionState::Anonymous,
            (
                SessionState::Authenticated { selection, .. },
                SessionEvent::SignInSucceeded { address },
            ) => SessionState::Authenticated { address, selection },
            (
                SessionState::Authenticated {
                    address,
                    mut selection,
                },
                SessionEvent::FilesSelected(files),
            ) => {
                selection.extend(files);
                SessionState::Authenticated { address, selection }
            }
            (SessionState::Authenticated { address, .. }, SessionEvent::UploadSucceeded(_)) => {
                SessionState::Authenticated {
                    address,
                    selection: Vec::new(),
                }
            }
            (
                state @ SessionState::Authenticated { .. },
                SessionEvent::SignInFailed { .. } | SessionEvent::UploadFailed { .. },
            ) => state,
        }
    }
}

/// Ephemeral per-run session, driven by [`SessionEvent`]s
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn apply(&mut self, event: SessionEvent) -> &SessionState {
        tracing::trace!(?event, "session event");
        let state = std::mem::take(&mut self.state);
        self.state = state.transition(event);
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub fn address(&self) -> Option<&Address> {
        match &self.state {
            SessionState::Authenticated { address, .. } => Some(address),
            SessionState::Anonymous => None,
        }
    }

    pub fn selection(&self) -> &[UploadFile] {
        match &self.state {
            SessionState::Authenticated { selection, .. } => selection.as_slice(),
            SessionState::Anonymous => &[],
        }
    }

    pub fn has_pending_selection(&self) -> bool {
        !self.selection().is_empty()
    }
}
