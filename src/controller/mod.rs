//! The selection/attach-detach controller
//!
//! `TabController` is the only code that moves tabs between the main
//! window's tab strip and detached popups. The implementation is split
//! across sub-modules:
//! - `selection`: select / add / remove primitives on the main strip
//! - `sessions`: opening and closing docked session tabs
//! - `detach`: popup creation, reattachment and popup messages
//! - `favorites_sync`: retitling tabs when favorites are renamed
//! - `capture`: the singleton capture manager tab
//! - `settings`: applying (hot-reloaded) settings

mod capture;
mod detach;
mod favorites_sync;
mod selection;
mod sessions;
mod settings;

use crate::connection::CaptureSessionFactory;
use crate::favorites::{FavoritesNotifier, Subscription};
use crate::i18n::Localizer;
use crate::popup::{PopupChromeFactory, PopupEvent, PopupId, PopupRegistry};
use crate::tab::{ContainerChange, TabContainer};
use crate::window::MainWindow;
use std::sync::mpsc::{Receiver, Sender, channel};
use termtabs_config::{Settings, SharedSettings};

/// Collaborators a `TabController` is built from
pub struct TabControllerParams {
    /// Hooks into the main window
    pub main_window: Box<dyn MainWindow>,
    /// Creates native frames for detached popups
    pub popup_chrome: Box<dyn PopupChromeFactory>,
    /// Builds the capture manager session on demand
    pub capture_sessions: Box<dyn CaptureSessionFactory>,
    /// Favorites bus; the controller subscribes for its whole lifetime
    pub favorites: FavoritesNotifier,
    /// Capture flags and UI locale
    pub settings: SharedSettings,
}

/// Owns the main tab strip and the detached popup registry
pub struct TabController {
    /// Tab strip of the main window
    main: TabContainer,
    /// Live detached popups
    popups: PopupRegistry,
    main_window: Box<dyn MainWindow>,
    popup_chrome: Box<dyn PopupChromeFactory>,
    capture_sessions: Box<dyn CaptureSessionFactory>,
    settings: SharedSettings,
    localizer: Localizer,
    favorites: FavoritesNotifier,
    /// `None` only after teardown
    subscription: Option<Subscription>,
    popup_tx: Sender<PopupEvent>,
    popup_rx: Receiver<PopupEvent>,
    /// Counter for generating unique popup IDs
    next_popup_id: PopupId,
}

impl TabController {
    /// Create a controller and subscribe it to favorite changes
    pub fn new(params: TabControllerParams) -> Self {
        let subscription = params.favorites.subscribe();
        let localizer = Localizer::new(params.settings.read().locale.clone());
        let (popup_tx, popup_rx) = channel();

        log::info!(
            "Tab controller started (locale {}, capture manager label {:?})",
            localizer.locale(),
            localizer.label(crate::i18n::LabelKey::CaptureManager)
        );

        Self {
            main: TabContainer::new(),
            popups: PopupRegistry::new(),
            main_window: params.main_window,
            popup_chrome: params.popup_chrome,
            capture_sessions: params.capture_sessions,
            settings: params.settings,
            localizer,
            favorites: params.favorites,
            subscription: Some(subscription),
            popup_tx,
            popup_rx,
            next_popup_id: 1,
        }
    }

    /// Tab strip of the main window
    pub fn main_container(&self) -> &TabContainer {
        &self.main
    }

    /// Observe structural changes of the main tab strip
    pub fn subscribe_main(&mut self, listener: impl FnMut(&ContainerChange) + 'static) {
        self.main.subscribe(listener);
    }

    /// Registered detached popups
    pub fn popups(&self) -> &PopupRegistry {
        &self.popups
    }

    /// Snapshot of the current settings
    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    /// Handle everything queued by popups and the favorites notifier.
    ///
    /// Call from the UI loop. Returns the number of messages handled.
    pub fn process_pending_events(&mut self) -> usize {
        let mut handled = 0;

        while let Some(change) = self.subscription.as_ref().and_then(|s| s.try_recv()) {
            self.on_favorites_changed(&change);
            handled += 1;
        }

        while let Ok(event) = self.popup_rx.try_recv() {
            self.handle_popup_event(event);
            handled += 1;
        }

        handled
    }
}

impl Drop for TabController {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.favorites.unsubscribe(&subscription);
            debug_info!("CONTROLLER", "Unsubscribed from favorites notifier");
        }
    }
}
