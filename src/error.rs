//! Typed errors for tab ownership violations.
//!
//! These are returned when a caller names a tab or popup that is not where
//! the operation requires it to be. They indicate a bug in the caller, not a
//! condition the user can fix.

use crate::popup::PopupId;
use crate::tab::TabId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TabError {
    /// The tab is not in the main window's tab strip.
    #[error("tab {0} is not docked in the main window")]
    NotDocked(TabId),

    /// No registered popup holds the tab.
    #[error("tab {0} is not held by any detached window")]
    NotDetached(TabId),

    /// The popup is not registered.
    #[error("detached window {0} is not registered")]
    UnknownPopup(PopupId),
}
