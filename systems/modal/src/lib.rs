#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Suspend/resume bridge between blocking dialogs and sequential editor logic.
//!
//! A caller that needs the author's decision opens a dialog and hands over the
//! continuation it wants to run afterwards. The controller keeps exactly one
//! such continuation. Resolving the dialog moves the continuation back out, so
//! it can only ever be resumed once.

use tank_editor_core::{Answer, Modal};
use thiserror::Error;

/// Kind of dialog, used to report mismatched resolutions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DialogKind {
    /// Acknowledge-only dialog.
    Alert,
    /// Accept/decline dialog.
    Confirm,
}

impl DialogKind {
    fn of(modal: &Modal) -> Self {
        match modal {
            Modal::Alert { .. } => Self::Alert,
            Modal::Confirm { .. } => Self::Confirm,
        }
    }

    fn expected_by(answer: Answer) -> Self {
        match answer {
            Answer::Acknowledged => Self::Alert,
            Answer::Accepted | Answer::Declined => Self::Confirm,
        }
    }
}

/// Reasons a dialog request or resolution was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ModalError {
    /// Another dialog is still waiting for the author.
    #[error("a {0:?} dialog is already waiting for the author")]
    Busy(DialogKind),
    /// No dialog is waiting, so there is nothing to resolve.
    #[error("no dialog is waiting for the author")]
    NothingPending,
    /// The answer does not fit the open dialog.
    #[error("cannot answer a {found:?} dialog as a {expected:?} dialog")]
    WrongKind {
        /// Kind of dialog the answer belongs to.
        expected: DialogKind,
        /// Kind of dialog that is open.
        found: DialogKind,
    },
}

#[derive(Debug)]
struct Pending<K> {
    modal: Modal,
    continuation: K,
}

/// Owner of the single open dialog and the continuation waiting on it.
#[derive(Debug)]
pub struct ModalController<K> {
    pending: Option<Pending<K>>,
}

impl<K> Default for ModalController<K> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<K> ModalController<K> {
    /// Creates a controller with no dialog open.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Reports whether a dialog is waiting for the author.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Dialog currently shown, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Modal> {
        self.pending.as_ref().map(|pending| &pending.modal)
    }

    /// Opens an alert and parks `continuation` until it is acknowledged.
    pub fn show_alert(
        &mut self,
        message: impl Into<String>,
        continuation: K,
    ) -> Result<(), ModalError> {
        self.open(
            Modal::Alert {
                message: message.into(),
            },
            continuation,
        )
    }

    /// Opens a confirm and parks `continuation` until it is accepted or declined.
    pub fn show_confirm(
        &mut self,
        message: impl Into<String>,
        continuation: K,
    ) -> Result<(), ModalError> {
        self.open(
            Modal::Confirm {
                message: message.into(),
            },
            continuation,
        )
    }

    /// Opens an arbitrary dialog and parks `continuation` until it resolves.
    ///
    /// Fails with [`ModalError::Busy`] while another dialog is open; the
    /// rejected continuation is dropped and the open dialog is left untouched.
    pub fn open(&mut self, modal: Modal, continuation: K) -> Result<(), ModalError> {
        if let Some(pending) = &self.pending {
            return Err(ModalError::Busy(DialogKind::of(&pending.modal)));
        }

        self.pending = Some(Pending {
            modal,
            continuation,
        });
        Ok(())
    }

    /// Closes the open dialog with `answer` and hands back its continuation.
    ///
    /// Alerts only accept [`Answer::Acknowledged`]; confirms only accept
    /// [`Answer::Accepted`] or [`Answer::Declined`]. A mismatched answer leaves
    /// the dialog open.
    pub fn resolve(&mut self, answer: Answer) -> Result<K, ModalError> {
        let pending = self.pending.as_ref().ok_or(ModalError::NothingPending)?;
        let found = DialogKind::of(&pending.modal);
        let expected = DialogKind::expected_by(answer);
        if found != expected {
            return Err(ModalError::WrongKind { expected, found });
        }

        self.pending
            .take()
            .map(|pending| pending.continuation)
            .ok_or(ModalError::NothingPending)
    }

    /// Acknowledges the open alert.
    pub fn acknowledge(&mut self) -> Result<K, ModalError> {
        self.resolve(Answer::Acknowledged)
    }

    /// Accepts (`true`) or declines (`false`) the open confirm.
    pub fn confirm(&mut self, accepted: bool) -> Result<K, ModalError> {
        self.resolve(if accepted {
            Answer::Accepted
        } else {
            Answer::Declined
        })
    }
}
