//! Single-slot edit state for renaming one reason at a time.

use crate::model::reason::ReasonId;

/// Whether a reason is currently being renamed, and its draft text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    NoEdit,
    Editing {
        id: ReasonId,
        buffer: String,
    },
}

impl EditState {
    /// Returns the id under edit, if any.
    pub fn editing_id(&self) -> Option<&ReasonId> {
        match self {
            Self::NoEdit => None,
            Self::Editing { id, .. } => Some(id),
        }
    }

    /// Returns the draft text, if any.
    pub fn buffer(&self) -> Option<&str> {
        match self {
            Self::NoEdit => None,
            Self::Editing { buffer, .. } => Some(buffer.as_str()),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Whether `id` is the reason currently being edited.
    pub fn is_editing_id(&self, id: &ReasonId) -> bool {
        self.editing_id() == Some(id)
    }
}
