//! Opening and closing docked session tabs

use super::TabController;
use crate::connection::Connection;
use crate::error::TabError;
use crate::tab::{TabHandle, TabId};
use anyhow::{Context, Result};
use termtabs_config::Profile;

impl TabController {
    /// Open a session for `profile` in a new, selected main-window tab.
    ///
    /// If the session fails to connect no tab is added.
    pub fn open_profile(
        &mut self,
        profile: &Profile,
        mut session: Box<dyn Connection>,
    ) -> Result<TabId> {
        session
            .connect()
            .with_context(|| format!("Failed to connect to favorite '{}'", profile.name))?;

        let tab = TabHandle::from_profile(profile).with_session(session);
        let id = self.add_and_select(tab);
        self.main_window.update_controls();

        log::info!(
            "Opened tab {} for favorite '{}' (total: {})",
            id,
            profile.name,
            self.main.len()
        );
        Ok(id)
    }

    /// Close a docked tab and disconnect its session
    pub fn close_tab(&mut self, tab: TabId) -> Result<(), TabError> {
        let removed = self.remove_and_unselect(tab).ok_or(TabError::NotDocked(tab))?;
        log::info!("Closing tab {} ({})", tab, removed.title);
        self.dispose_tab(removed);
        self.main_window.update_controls();
        Ok(())
    }

    /// Tear a tab down for good, releasing what the main window holds for it
    pub(super) fn dispose_tab(&mut self, tab: TabHandle) {
        if tab.is_capture_manager() {
            self.main_window.unregister_double_click(tab.id());
        }
        tab.dispose();
    }
}
