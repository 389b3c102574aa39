//! Selection primitives on the main tab strip.

use super::TabController;
use crate::error::TabError;
use crate::tab::{TabHandle, TabId};

impl TabController {
    /// Select a docked tab, or clear the selection with `None`.
    ///
    /// Popups are unaffected; their single tab is always selected.
    pub fn select(&mut self, tab: Option<TabId>) -> Result<(), TabError> {
        if let Some(id) = tab
            && !self.main.contains(id)
        {
            return Err(TabError::NotDocked(id));
        }
        self.main.set_selected(tab);
        debug_log!("SELECT", "Selected {:?}", tab);
        Ok(())
    }

    pub fn unselect(&mut self) {
        self.main.set_selected(None);
    }

    /// Append a tab to the main strip and select it
    pub fn add_and_select(&mut self, tab: TabHandle) -> TabId {
        let id = tab.id();
        self.main.with_batched_mutation(|main| {
            main.push(tab);
            main.set_selected(Some(id));
        });
        debug_info!("SELECT", "Added and selected tab {} (total: {})", id, self.main.len());
        id
    }

    /// Remove a tab from the main strip and clear the selection.
    ///
    /// The selection is cleared even when `tab` is not docked. The tab is
    /// handed back with its session still open; tearing the session down is
    /// the caller's job.
    pub fn remove_and_unselect(&mut self, tab: TabId) -> Option<TabHandle> {
        let removed = self.main.with_batched_mutation(|main| {
            let removed = main.remove(tab);
            main.set_selected(None);
            removed
        });
        if removed.is_some() {
            debug_info!("SELECT", "Removed tab {} (total: {})", tab, self.main.len());
        }
        removed
    }

    /// Currently selected tab of the main strip
    pub fn selected(&self) -> Option<&TabHandle> {
        self.main.selected()
    }

    pub fn selected_mut(&mut self) -> Option<&mut TabHandle> {
        self.main.selected_mut()
    }

    pub fn has_selected(&self) -> bool {
        self.main.selected_id().is_some()
    }
}
