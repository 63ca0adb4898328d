//! Reason list store.
//!
//! # Responsibility
//! - Hold the ordered reason list and the single-slot edit state.
//! - Apply add/delete/edit/reorder operations.
//! - Hand the full snapshot to the injected persist hook after each
//!   successful mutation.
//!
//! # Invariants
//! - Ids stay unique; fresh ids never collide with existing ones.
//! - Mutated text is trimmed and non-empty.
//! - Rejected input leaves list and edit state untouched.
//! - Boundary or unknown-target requests are no-ops, never errors.

use crate::model::edit::EditState;
use crate::model::reason::{normalize_text, seed_reasons, Reason, ReasonId, ReasonValidationError};
use crate::store::persistence::PersistHook;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The only condition a list operation reports back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonListError {
    /// Add or commit-edit attempted with blank text.
    EmptyInput,
}

impl Display for ReasonListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "reason text cannot be empty"),
        }
    }
}

impl Error for ReasonListError {}

impl From<ReasonValidationError> for ReasonListError {
    fn from(value: ReasonValidationError) -> Self {
        match value {
            ReasonValidationError::EmptyText => Self::EmptyInput,
        }
    }
}

/// Ordered reason list with write-through persistence.
pub struct ReasonListStore<P: PersistHook> {
    reasons: Vec<Reason>,
    edit: EditState,
    persist: P,
}

impl<P: PersistHook> ReasonListStore<P> {
    /// Creates a store over an already hydrated list.
    ///
    /// Nothing is persisted until the first mutation.
    pub fn new(reasons: Vec<Reason>, persist: P) -> Self {
        Self {
            reasons,
            edit: EditState::NoEdit,
            persist,
        }
    }

    pub fn reasons(&self) -> &[Reason] {
        &self.reasons
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn get(&self, id: &ReasonId) -> Option<&Reason> {
        self.reasons.iter().find(|reason| &reason.id == id)
    }

    pub fn persistence(&self) -> &P {
        &self.persist
    }

    /// Appends a reason built from `text`.
    ///
    /// # Errors
    /// - `EmptyInput` when `text` is blank after trimming; nothing changes.
    pub fn add(&mut self, text: &str) -> Result<ReasonId, ReasonListError> {
        let reason = Reason::with_id(self.fresh_id(), text).inspect_err(|_| {
            debug!("event=reason_add module=service status=rejected reason=empty_input");
        })?;
        let id = reason.id.clone();
        self.reasons.push(reason);
        info!(
            "event=reason_add module=service status=ok count={}",
            self.reasons.len()
        );
        self.flush();
        Ok(id)
    }

    /// Removes the reason with `id`.
    ///
    /// Returns whether a reason was removed. The list is persisted either
    /// way. Deleting the reason under edit also ends the edit.
    pub fn delete(&mut self, id: &ReasonId) -> bool {
        let before = self.reasons.len();
        self.reasons.retain(|reason| &reason.id != id);
        let removed = self.reasons.len() != before;
        if removed && self.edit.is_editing_id(id) {
            self.edit = EditState::NoEdit;
        }
        info!(
            "event=reason_delete module=service status=ok removed={removed} count={}",
            self.reasons.len()
        );
        self.flush();
        removed
    }

    /// Opens the edit slot on `id`, seeding the buffer with its text.
    ///
    /// Replaces any edit already in progress. Returns `false` and leaves the
    /// slot alone when `id` is unknown.
    pub fn begin_edit(&mut self, id: &ReasonId) -> bool {
        let Some(reason) = self.get(id) else {
            return false;
        };
        self.edit = EditState::Editing {
            id: reason.id.clone(),
            buffer: reason.text.clone(),
        };
        true
    }

    /// Replaces the draft text. Ignored when nothing is being edited.
    pub fn set_edit_buffer(&mut self, text: impl Into<String>) -> bool {
        match &mut self.edit {
            EditState::NoEdit => false,
            EditState::Editing { buffer, .. } => {
                *buffer = text.into();
                true
            }
        }
    }

    /// Writes the draft text into the reason under edit.
    ///
    /// Returns the updated id, or `None` when no edit was open or the
    /// edited reason no longer exists.
    ///
    /// # Errors
    /// - `EmptyInput` when the draft is blank; the edit stays open.
    pub fn commit_edit(&mut self) -> Result<Option<ReasonId>, ReasonListError> {
        let EditState::Editing { id, buffer } = &self.edit else {
            return Ok(None);
        };
        let text = normalize_text(buffer).inspect_err(|_| {
            debug!("event=reason_edit_commit module=service status=rejected reason=empty_input");
        })?;
        let id = id.clone();
        self.edit = EditState::NoEdit;

        let Some(reason) = self.reasons.iter_mut().find(|reason| reason.id == id) else {
            debug!("event=reason_edit_commit module=service status=skipped reason=missing_target");
            return Ok(None);
        };
        reason.text = text;
        info!("event=reason_edit_commit module=service status=ok");
        self.flush();
        Ok(Some(id))
    }

    /// Closes the edit slot without touching the list.
    pub fn cancel_edit(&mut self) {
        self.edit = EditState::NoEdit;
    }

    /// Swaps the reason at `index` with its predecessor.
    ///
    /// No-op for index 0 or out-of-range indexes.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.reasons.len() {
            return false;
        }
        self.reasons.swap(index - 1, index);
        info!("event=reason_move module=service status=ok direction=up from={index}");
        self.flush();
        true
    }

    /// Swaps the reason at `index` with its successor.
    ///
    /// No-op for the last index or out-of-range indexes.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index >= self.reasons.len().saturating_sub(1) {
            return false;
        }
        self.reasons.swap(index, index + 1);
        info!("event=reason_move module=service status=ok direction=down from={index}");
        self.flush();
        true
    }

    /// Replaces the list with the seed set and ends any edit.
    pub fn reset_to_seed(&mut self) {
        self.reasons = seed_reasons();
        self.edit = EditState::NoEdit;
        info!("event=reasons_reset module=service status=ok");
        self.flush();
    }

    fn fresh_id(&self) -> ReasonId {
        loop {
            let candidate = ReasonId::generate();
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }

    fn flush(&mut self) {
        self.persist.persist(&self.reasons);
    }
}
