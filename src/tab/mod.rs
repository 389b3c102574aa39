//! Tab handles and the containers that own them
//!
//! This module provides:
//! - `TabHandle`: one logical session's tab (title, role, profile link, session)
//! - `TabContainer`: an ordered tab strip with a selection pointer
//! - `TabId`: process-unique identifier for each tab

mod container;

pub use container::{BatchedMutation, ContainerChange, TabContainer};

use crate::connection::Connection;
use crate::i18n::{LabelKey, Localizer};
use std::sync::atomic::{AtomicU64, Ordering};
use termtabs_config::{Profile, ProfileId};

/// Unique identifier for a tab
pub type TabId = u64;

static NEXT_TAB_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a tab ID that no other tab in this process has used
pub fn next_tab_id() -> TabId {
    NEXT_TAB_ID.fetch_add(1, Ordering::Relaxed)
}

/// What a tab is for. Identity checks use this, never the displayed title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabRole {
    /// A terminal session the user opened
    UserSession,
    /// The singleton view over captured output
    CaptureManager,
}

impl TabRole {
    /// Label key for roles whose title comes from the UI language
    pub fn label_key(self) -> Option<LabelKey> {
        match self {
            TabRole::UserSession => None,
            TabRole::CaptureManager => Some(LabelKey::CaptureManager),
        }
    }
}

/// A single tab: the visual identity of one logical session
pub struct TabHandle {
    /// Fixed at construction; containers index tabs by it
    id: TabId,
    role: TabRole,
    /// Displayed title
    pub title: String,
    /// Hover text
    pub tooltip: String,
    /// Favorite this tab was opened from, if any
    pub profile: Option<ProfileId>,
    /// Whether files may be dropped onto the tab
    pub allow_drop: bool,
    session: Option<Box<dyn Connection>>,
}

impl std::fmt::Debug for TabHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabHandle")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("title", &self.title)
            .field("profile", &self.profile)
            .field("allow_drop", &self.allow_drop)
            .field("has_session", &self.session.is_some())
            .finish()
    }
}

impl TabHandle {
    /// Create a user session tab with the given title and no session yet
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: next_tab_id(),
            role: TabRole::UserSession,
            tooltip: title.clone(),
            title,
            profile: None,
            allow_drop: true,
            session: None,
        }
    }

    /// Create a tab for a session opened from a favorite
    pub fn from_profile(profile: &Profile) -> Self {
        let mut tab = Self::new(profile.name.clone());
        tab.tooltip = profile.tooltip();
        tab.profile = Some(profile.id);
        tab
    }

    /// Create the capture manager tab, titled in the current UI language
    ///
    /// Drops are disabled and the tab is not linked to any favorite.
    pub fn capture_manager(localizer: &Localizer) -> Self {
        let title = localizer.label(LabelKey::CaptureManager);
        Self {
            id: next_tab_id(),
            role: TabRole::CaptureManager,
            tooltip: title.clone(),
            title,
            profile: None,
            allow_drop: false,
            session: None,
        }
    }

    /// Builder method to attach a session at construction
    pub fn with_session(mut self, session: Box<dyn Connection>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn role(&self) -> TabRole {
        self.role
    }

    pub fn is_capture_manager(&self) -> bool {
        self.role == TabRole::CaptureManager
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Re-derive the title of role-titled tabs after a language change
    ///
    /// User session titles are left alone.
    pub fn retitle_for_locale(&mut self, localizer: &Localizer) -> bool {
        match self.role.label_key() {
            Some(key) => {
                self.title = localizer.label(key);
                self.tooltip = self.title.clone();
                true
            }
            None => false,
        }
    }

    /// Attach a session, replacing (and disconnecting) any previous one
    pub fn attach_session(
        &mut self,
        session: Box<dyn Connection>,
    ) -> &mut (dyn Connection + 'static) {
        if let Some(mut previous) = self.session.take() {
            previous.disconnect();
        }
        self.session.insert(session).as_mut()
    }

    pub fn session(&self) -> Option<&dyn Connection> {
        self.session.as_deref()
    }

    pub fn session_mut(&mut self) -> Option<&mut (dyn Connection + 'static)> {
        self.session.as_deref_mut()
    }

    /// Release the tab's resources, disconnecting its session
    pub fn dispose(mut self) {
        if let Some(mut session) = self.session.take() {
            if session.is_connected() {
                session.disconnect();
            }
            debug_info!("TAB", "Disposed session of tab {} ({})", self.id, self.title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingSession {
        connected: bool,
        disconnects: Rc<Cell<u32>>,
    }

    impl Connection for CountingSession {
        fn connect(&mut self) -> Result<()> {
            self.connected = true;
            Ok(())
        }

        fn disconnect(&mut self) {
            self.connected = false;
            self.disconnects.set(self.disconnects.get() + 1);
        }

        fn is_connected(&self) -> bool {
            self.connected
        }
    }

    #[test]
    fn tab_ids_are_unique() {
        let a = TabHandle::new("a");
        let b = TabHandle::new("b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn from_profile_links_profile() {
        let profile = Profile::new("Router").host("10.0.0.1");
        let tab = TabHandle::from_profile(&profile);
        assert_eq!(tab.title, "Router");
        assert_eq!(tab.tooltip, "10.0.0.1");
        assert_eq!(tab.profile, Some(profile.id));
        assert_eq!(tab.role(), TabRole::UserSession);
        assert!(tab.allow_drop);
    }

    #[test]
    fn capture_manager_tab_shape() {
        let tab = TabHandle::capture_manager(&Localizer::new("de"));
        assert!(tab.is_capture_manager());
        assert_eq!(tab.title, "Aufnahme-Manager");
        assert!(!tab.allow_drop);
        assert!(tab.profile.is_none());
    }

    #[test]
    fn retitle_only_touches_role_titled_tabs() {
        let mut capture = TabHandle::capture_manager(&Localizer::default());
        let mut user = TabHandle::new("Capture Manager");

        assert!(capture.retitle_for_locale(&Localizer::new("fr")));
        assert!(!user.retitle_for_locale(&Localizer::new("fr")));
        assert_eq!(capture.title, "Gestionnaire de captures");
        assert_eq!(user.title, "Capture Manager");
        assert!(!user.is_capture_manager());
    }

    #[test]
    fn attach_replaces_and_disconnects_previous_session() {
        let disconnects = Rc::new(Cell::new(0));
        let mut tab = TabHandle::new("t").with_session(Box::new(CountingSession {
            connected: true,
            disconnects: Rc::clone(&disconnects),
        }));

        tab.attach_session(Box::new(CountingSession {
            connected: false,
            disconnects: Rc::clone(&disconnects),
        }));
        assert_eq!(disconnects.get(), 1);
        assert!(!tab.session().is_some_and(|s| s.is_connected()));
    }

    #[test]
    fn dispose_disconnects_open_session() {
        let disconnects = Rc::new(Cell::new(0));
        let mut tab = TabHandle::new("t").with_session(Box::new(CountingSession {
            connected: false,
            disconnects: Rc::clone(&disconnects),
        }));
        tab.session_mut().unwrap().connect().unwrap();

        tab.dispose();
        assert_eq!(disconnects.get(), 1);
    }
}
