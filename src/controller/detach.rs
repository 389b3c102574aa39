//! Moving tabs between the main strip and detached popups

use super::TabController;
use crate::error::TabError;
use crate::popup::{DetachedWindow, PopupEvent, PopupId, PopupRequests};
use crate::tab::TabId;

impl TabController {
    /// Move a docked tab (the selected one if `tab` is `None`) into a new popup.
    ///
    /// Returns `Ok(None)` when there is nothing to detach. Removal from the
    /// main strip and insertion into the popup happen inside one batched
    /// mutation, so strip listeners see a single change.
    pub fn detach_to_new_window(
        &mut self,
        tab: Option<TabId>,
    ) -> Result<Option<PopupId>, TabError> {
        let Some(tab_id) = tab.or(self.main.selected_id()) else {
            return Ok(None);
        };
        if !self.main.contains(tab_id) {
            return Err(TabError::NotDocked(tab_id));
        }

        let popup_id = self.next_popup_id;
        self.next_popup_id += 1;
        let requests = PopupRequests::new(popup_id, self.popup_tx.clone());

        let window = {
            let mut main = self.main.batch();
            let mut window = DetachedWindow::new(popup_id, self.popup_chrome.create(requests));
            let handle = main.remove(tab_id).ok_or(TabError::NotDocked(tab_id))?;
            window.add_terminal(handle);
            window
        };

        self.popups.register(window);
        let capture_enabled = self.capture_button_enabled();
        if let Some(window) = self.popups.get_mut(popup_id) {
            window.update_capture_button_enabled(capture_enabled);
            window.show();
        }
        self.main_window.update_controls();

        log::info!(
            "Detached tab {} into popup {} ({} popup(s) open)",
            tab_id,
            popup_id,
            self.popups.len()
        );
        Ok(Some(popup_id))
    }

    /// Dock a popup's tab back into the main strip and select it.
    ///
    /// The popup is unregistered; it closes its frame once its tab is gone.
    pub fn attach_from_window(&mut self, tab: TabId) -> Result<(), TabError> {
        let popup_id = self
            .popups
            .find_by_tab(tab)
            .ok_or(TabError::NotDetached(tab))?;
        let mut window = self
            .unregister_popup(popup_id)
            .ok_or(TabError::UnknownPopup(popup_id))?;
        let handle = window.take_terminal().ok_or(TabError::NotDetached(tab))?;

        self.add_and_select(handle);
        self.main_window.update_controls();

        log::info!("Attached tab {} from popup {}", tab, popup_id);
        Ok(())
    }

    /// Forget a popup. Unknown popups are ignored.
    pub fn unregister_popup(&mut self, popup: PopupId) -> Option<DetachedWindow> {
        let window = self.popups.unregister(popup);
        if window.is_some() {
            debug_info!("POPUP", "Unregistered popup {}", popup);
        }
        window
    }

    /// The user closed a popup: forget it and close its tab.
    ///
    /// The frame is already closed, so it is not closed again.
    pub fn close_popup(&mut self, popup: PopupId) -> Result<(), TabError> {
        let window = self
            .unregister_popup(popup)
            .ok_or(TabError::UnknownPopup(popup))?;
        if let Some(tab) = window.into_terminal() {
            log::info!("Closing tab {} with its popup {}", tab.id(), popup);
            self.dispose_tab(tab);
        }
        Ok(())
    }

    pub(super) fn handle_popup_event(&mut self, event: PopupEvent) {
        let result = match event {
            PopupEvent::AttachRequested(popup) => {
                match self.popups.get(popup).and_then(|w| w.tab()).map(|t| t.id()) {
                    Some(tab) => self.attach_from_window(tab),
                    None => Err(TabError::UnknownPopup(popup)),
                }
            }
            PopupEvent::Closed(popup) => self.close_popup(popup),
        };
        // A popup may race its own removal (closed right after attaching)
        if let Err(e) = result {
            log::warn!("Ignoring {:?}: {}", event, e);
        }
    }
}
