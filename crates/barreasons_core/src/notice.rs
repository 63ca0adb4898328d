//! User-facing outcome messages for list operations.
//!
//! Front ends decide how to present these; the wording is shared so every
//! surface tells staff the same thing.

use crate::service::reason_list::ReasonListError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One transient message for the person at the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: &'static str,
}

impl Notice {
    const fn success(message: &'static str) -> Self {
        Self {
            level: NoticeLevel::Success,
            message,
        }
    }

    const fn error(message: &'static str) -> Self {
        Self {
            level: NoticeLevel::Error,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

pub const REASON_ADDED: Notice = Notice::success("Reason added");
pub const REASON_DELETED: Notice = Notice::success("Reason deleted");
pub const REASON_UPDATED: Notice = Notice::success("Reason updated");
pub const ADD_EMPTY_INPUT: Notice = Notice::error("Please enter a reason");
pub const EDIT_EMPTY_INPUT: Notice = Notice::error("Reason cannot be empty");

/// Notice for an add attempt.
pub fn add_notice<T>(outcome: &Result<T, ReasonListError>) -> Notice {
    match outcome {
        Ok(_) => REASON_ADDED,
        Err(ReasonListError::EmptyInput) => ADD_EMPTY_INPUT,
    }
}

/// Notice for a commit-edit attempt.
pub fn commit_notice<T>(outcome: &Result<T, ReasonListError>) -> Notice {
    match outcome {
        Ok(_) => REASON_UPDATED,
        Err(ReasonListError::EmptyInput) => EDIT_EMPTY_INPUT,
    }
}

/// Notice for a delete request; shown whether or not the id existed.
pub fn delete_notice() -> Notice {
    REASON_DELETED
}
