//! Detached popup windows
//!
//! A `DetachedWindow` owns a single-entry `TabContainer` and a
//! `PopupChrome` (the native frame, supplied by the embedding UI). Popups
//! never move tabs themselves: they raise `PopupEvent`s through their
//! `PopupRequests` sender and the controller performs the move.

mod registry;

pub use registry::PopupRegistry;

use crate::tab::{TabContainer, TabHandle, TabId};
use std::sync::mpsc::Sender;

/// Unique identifier for a detached window
pub type PopupId = u64;

/// Messages a popup raises to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEvent {
    /// The user asked to dock the popup's tab back into the main window
    AttachRequested(PopupId),
    /// The user closed the popup
    Closed(PopupId),
}

/// Sending half handed to each popup's chrome
#[derive(Debug, Clone)]
pub struct PopupRequests {
    popup: PopupId,
    tx: Sender<PopupEvent>,
}

impl PopupRequests {
    pub(crate) fn new(popup: PopupId, tx: Sender<PopupEvent>) -> Self {
        Self { popup, tx }
    }

    pub fn popup(&self) -> PopupId {
        self.popup
    }

    /// Ask the controller to dock this popup's tab into the main window
    pub fn request_attach(&self) {
        self.send(PopupEvent::AttachRequested(self.popup));
    }

    /// Tell the controller the user closed this popup
    pub fn notify_closed(&self) {
        self.send(PopupEvent::Closed(self.popup));
    }

    fn send(&self, event: PopupEvent) {
        if self.tx.send(event).is_err() {
            log::warn!("Dropped {:?}: tab controller is gone", event);
        }
    }
}

/// Native frame of a popup window
pub trait PopupChrome {
    fn show(&mut self);

    fn set_title(&mut self, title: &str);

    /// Enable or disable the popup's capture trigger
    fn set_capture_button_enabled(&mut self, enabled: bool);

    /// Close the frame; called once the popup has lost its tab
    fn close(&mut self);
}

/// Creates the native frame for a new popup
pub trait PopupChromeFactory {
    fn create(&mut self, requests: PopupRequests) -> Box<dyn PopupChrome>;
}

/// A popup window holding exactly one tab
pub struct DetachedWindow {
    id: PopupId,
    container: TabContainer,
    chrome: Box<dyn PopupChrome>,
}

impl std::fmt::Debug for DetachedWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetachedWindow")
            .field("id", &self.id)
            .field("container", &self.container)
            .finish_non_exhaustive()
    }
}

impl DetachedWindow {
    pub fn new(id: PopupId, chrome: Box<dyn PopupChrome>) -> Self {
        Self {
            id,
            container: TabContainer::new(),
            chrome,
        }
    }

    pub fn id(&self) -> PopupId {
        self.id
    }

    /// Take ownership of `tab` and show its title in the frame
    pub fn add_terminal(&mut self, tab: TabHandle) {
        debug_assert!(self.container.is_empty(), "popup {} already holds a tab", self.id);
        let tab_id = tab.id();
        self.container.push(tab);
        self.container.set_selected(Some(tab_id));
        self.update_title();
    }

    /// The popup's tab
    pub fn tab(&self) -> Option<&TabHandle> {
        self.container.selected()
    }

    pub fn tab_mut(&mut self) -> Option<&mut TabHandle> {
        self.container.selected_mut()
    }

    pub fn holds(&self, tab: TabId) -> bool {
        self.container.contains(tab)
    }

    pub fn show(&mut self) {
        self.chrome.show();
    }

    /// Copy the tab's title into the frame
    pub fn update_title(&mut self) {
        if let Some(tab) = self.container.selected() {
            self.chrome.set_title(&tab.title);
        }
    }

    pub fn update_capture_button_enabled(&mut self, enabled: bool) {
        self.chrome.set_capture_button_enabled(enabled);
    }

    /// Give up the tab. The frame closes once the popup is empty.
    pub fn take_terminal(&mut self) -> Option<TabHandle> {
        let tab_id = self.container.selected_id()?;
        let tab = self.container.remove(tab_id);
        if self.container.is_empty() {
            self.chrome.close();
        }
        tab
    }

    /// Give up the tab of a popup whose frame is already gone.
    ///
    /// Unlike `take_terminal`, the chrome is not asked to close again.
    pub fn into_terminal(mut self) -> Option<TabHandle> {
        let tab_id = self.container.selected_id()?;
        self.container.remove(tab_id)
    }
}
