//! Registry of live detached windows

use super::{DetachedWindow, PopupId};
use crate::tab::TabId;

/// The controller's list of open popups, in registration order
#[derive(Debug, Default)]
pub struct PopupRegistry {
    windows: Vec<DetachedWindow>,
}

impl PopupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, window: DetachedWindow) {
        debug_assert!(
            !self.contains(window.id()),
            "popup {} registered twice",
            window.id()
        );
        self.windows.push(window);
    }

    /// Remove a popup. Removing an unknown popup is a no-op.
    pub fn unregister(&mut self, id: PopupId) -> Option<DetachedWindow> {
        let idx = self.windows.iter().position(|w| w.id() == id)?;
        Some(self.windows.remove(idx))
    }

    pub fn contains(&self, id: PopupId) -> bool {
        self.windows.iter().any(|w| w.id() == id)
    }

    pub fn get(&self, id: PopupId) -> Option<&DetachedWindow> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn get_mut(&mut self, id: PopupId) -> Option<&mut DetachedWindow> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    /// The popup currently holding `tab`
    pub fn find_by_tab(&self, tab: TabId) -> Option<PopupId> {
        self.windows.iter().find(|w| w.holds(tab)).map(|w| w.id())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetachedWindow> {
        self.windows.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DetachedWindow> {
        self.windows.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
