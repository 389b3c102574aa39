//! The singleton capture manager tab
//!
//! At most one tab with `TabRole::CaptureManager` lives in the main strip.
//! It is created lazily and brought to front when a capture asks for it.

use super::TabController;
use crate::tab::{TabHandle, TabId};
use anyhow::{Context, Result};

impl TabController {
    /// Refresh the capture manager, creating its tab when wanted.
    ///
    /// Creation is skipped when `open_manager_tab` is false and captures are
    /// not configured to switch to the capture manager. Returns the capture
    /// manager's tab, if one exists afterwards.
    pub fn refresh_capture_manager_and_create_tab_if_needed(
        &mut self,
        open_manager_tab: bool,
    ) -> Option<TabId> {
        if self.refresh_capture_manager(true) {
            return self.capture_manager_tab();
        }

        let settings = self.settings();
        if !open_manager_tab
            && (!settings.enable_capture_to_folder || !settings.auto_switch_on_capture)
        {
            debug_log!("CAPTURE", "Capture manager not open and not requested");
            return None;
        }

        self.create_capture_manager_tab()
    }

    /// Refresh the capture manager's view if its tab exists.
    ///
    /// With `set_focus`, and captures configured to switch to the capture
    /// manager, the view is raised, redrawn and its tab selected. Returns
    /// whether the tab was found, whether or not focus moved.
    pub fn refresh_capture_manager(&mut self, set_focus: bool) -> bool {
        let switch = self.settings.read().switches_to_capture_manager();

        let Some(tab) = self
            .main
            .tabs_mut()
            .iter_mut()
            .find(|t| t.is_capture_manager())
        else {
            return false;
        };
        let tab_id = tab.id();

        if let Some(session) = tab.session_mut() {
            session.refresh_view();
            if set_focus && switch {
                session.bring_to_front();
                session.redraw();
            }
        }
        if set_focus && switch {
            self.main.set_selected(Some(tab_id));
            debug_log!("CAPTURE", "Focused capture manager tab {}", tab_id);
        }
        true
    }

    /// Push the capture trigger state to every popup
    pub fn update_capture_button_on_detached_popups(&mut self) {
        let enabled = self.capture_button_enabled();
        for window in self.popups.iter_mut() {
            window.update_capture_button_enabled(enabled);
        }
        debug_log!(
            "CAPTURE",
            "Capture button {} on {} popup(s)",
            if enabled { "enabled" } else { "disabled" },
            self.popups.len()
        );
    }

    pub(super) fn capture_button_enabled(&self) -> bool {
        self.settings
            .read()
            .enabled_capture_to_folder_and_clipboard()
    }

    fn capture_manager_tab(&self) -> Option<TabId> {
        self.main
            .tabs()
            .iter()
            .find(|t| t.is_capture_manager())
            .map(|t| t.id())
    }

    /// Build, show and connect the capture manager tab.
    ///
    /// On failure the half-built tab is removed and disposed, and the
    /// previous selection is restored.
    fn create_capture_manager_tab(&mut self) -> Option<TabId> {
        let previous = self.main.selected_id();

        let tab = TabHandle::capture_manager(&self.localizer);
        let tab_id = tab.id();
        self.main_window.register_double_click(tab_id);
        self.add_and_select(tab);
        self.main_window.update_controls();

        match self.open_capture_session(tab_id) {
            Ok(()) => {
                log::info!("Opened capture manager in tab {}", tab_id);
                Some(tab_id)
            }
            Err(e) => {
                log::error!("Capture manager setup failed: {:#}", e);
                debug_error!("CAPTURE", "Capture manager setup failed: {:#}", e);
                match self.remove_and_unselect(tab_id) {
                    Some(tab) => self.dispose_tab(tab),
                    None => self.main_window.unregister_double_click(tab_id),
                }
                if previous.is_some() {
                    self.main.set_selected(previous);
                }
                self.main_window.update_controls();
                None
            }
        }
    }

    fn open_capture_session(&mut self, tab_id: TabId) -> Result<()> {
        let session = self
            .capture_sessions
            .create()
            .context("Failed to create capture manager session")?;

        let tab = self
            .main
            .get_mut(tab_id)
            .context("Capture manager tab disappeared during setup")?;
        let session = tab.attach_session(session);
        session
            .connect()
            .context("Failed to connect capture manager session")?;
        session.bring_to_front();
        session.redraw();

        self.main_window.update_controls();
        Ok(())
    }
}
