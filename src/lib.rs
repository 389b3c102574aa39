//! Tab and popup-window orchestration for multi-session terminal clients.
//!
//! A `TabController` owns the main window's tab strip (`TabContainer`) and
//! the registry of detached popup windows. Every operation that creates,
//! moves, selects or removes a tab goes through it, and it keeps tab titles
//! in sync with favorite renames delivered by a `FavoritesNotifier`.
//!
//! Everything runs on the UI thread. Popups and the favorites notifier talk
//! back to the controller through channels drained by
//! `TabController::process_pending_events`.

#[macro_use]
pub mod debug;

pub mod connection;
pub mod controller;
pub mod error;
pub mod favorites;
pub mod i18n;
pub mod popup;
pub mod tab;
pub mod window;

pub use termtabs_config as config;

pub use connection::{CaptureSessionFactory, Connection};
pub use controller::{TabController, TabControllerParams};
pub use error::TabError;
pub use favorites::{FavoritesChanged, FavoritesNotifier, Subscription};
pub use i18n::{LabelKey, Localizer};
pub use popup::{
    DetachedWindow, PopupChrome, PopupChromeFactory, PopupEvent, PopupId, PopupRegistry,
    PopupRequests,
};
pub use tab::{ContainerChange, TabContainer, TabHandle, TabId, TabRole};
pub use window::MainWindow;
