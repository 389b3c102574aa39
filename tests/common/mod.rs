//! Shared integration test helpers for termtabs.
//!
//! Provides recording fakes for every collaborator a `TabController` talks
//! to, a `Harness` that wires them together, and a `log` capture so tests
//! can assert on logged errors.
//!
//! Include with `mod common;` at the top of each test file. The
//! `#[allow(dead_code)]` suppresses warnings when a file uses only a subset.

#![allow(dead_code)]

use anyhow::{Result, anyhow};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Mutex;
use termtabs::config::{Settings, SharedSettings};
use termtabs::{
    Connection, FavoritesNotifier, MainWindow, PopupChrome, PopupChromeFactory, PopupId,
    PopupRequests, TabController, TabControllerParams, TabId,
};

// ============================================================================
// Main window
// ============================================================================

#[derive(Debug, Default)]
pub struct MainWindowLog {
    pub update_controls: usize,
    /// Tabs with a live double-click route
    pub double_click_tabs: Vec<TabId>,
}

pub struct FakeMainWindow(pub Rc<RefCell<MainWindowLog>>);

impl MainWindow for FakeMainWindow {
    fn update_controls(&mut self) {
        self.0.borrow_mut().update_controls += 1;
    }

    fn register_double_click(&mut self, tab: TabId) {
        self.0.borrow_mut().double_click_tabs.push(tab);
    }

    fn unregister_double_click(&mut self, tab: TabId) {
        self.0.borrow_mut().double_click_tabs.retain(|t| *t != tab);
    }
}

// ============================================================================
// Sessions
// ============================================================================

#[derive(Debug, Default)]
pub struct SessionLog {
    pub connected: bool,
    pub connects: usize,
    pub disconnects: usize,
    pub refreshes: usize,
    pub brought_to_front: usize,
    pub redraws: usize,
}

pub struct FakeSession {
    pub log: Rc<RefCell<SessionLog>>,
    pub fail_connect: bool,
}

impl FakeSession {
    pub fn new() -> (Self, Rc<RefCell<SessionLog>>) {
        let log = Rc::new(RefCell::new(SessionLog::default()));
        let session = Self {
            log: Rc::clone(&log),
            fail_connect: false,
        };
        (session, log)
    }

    pub fn failing() -> (Self, Rc<RefCell<SessionLog>>) {
        let (mut session, log) = Self::new();
        session.fail_connect = true;
        (session, log)
    }
}

impl Connection for FakeSession {
    fn connect(&mut self) -> Result<()> {
        if self.fail_connect {
            return Err(anyhow!("connection refused"));
        }
        let mut log = self.log.borrow_mut();
        log.connected = true;
        log.connects += 1;
        Ok(())
    }

    fn disconnect(&mut self) {
        let mut log = self.log.borrow_mut();
        log.connected = false;
        log.disconnects += 1;
    }

    fn is_connected(&self) -> bool {
        self.log.borrow().connected
    }

    fn refresh_view(&mut self) {
        self.log.borrow_mut().refreshes += 1;
    }

    fn bring_to_front(&mut self) {
        self.log.borrow_mut().brought_to_front += 1;
    }

    fn redraw(&mut self) {
        self.log.borrow_mut().redraws += 1;
    }
}

/// How the capture session factory behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Sessions are created and connect
    Working,
    /// The factory itself fails with the given message
    FailCreate(&'static str),
    /// Sessions are created but refuse to connect
    FailConnect,
}

// ============================================================================
// Popup chrome
// ============================================================================

#[derive(Debug, Default)]
pub struct ChromeLog {
    pub shown: bool,
    pub closed: bool,
    pub close_calls: usize,
    pub titles: Vec<String>,
    pub capture_button: Vec<bool>,
}

impl ChromeLog {
    pub fn title(&self) -> Option<&str> {
        self.titles.last().map(String::as_str)
    }
}

pub struct FakeChrome(Rc<RefCell<ChromeLog>>);

impl PopupChrome for FakeChrome {
    fn show(&mut self) {
        self.0.borrow_mut().shown = true;
    }

    fn set_title(&mut self, title: &str) {
        self.0.borrow_mut().titles.push(title.to_string());
    }

    fn set_capture_button_enabled(&mut self, enabled: bool) {
        self.0.borrow_mut().capture_button.push(enabled);
    }

    fn close(&mut self) {
        let mut log = self.0.borrow_mut();
        log.closed = true;
        log.close_calls += 1;
    }
}

/// Chromes created so far, with the request sender each was handed
#[derive(Default)]
pub struct ChromeRecord {
    pub chromes: Vec<(PopupId, Rc<RefCell<ChromeLog>>)>,
    pub requests: Vec<PopupRequests>,
}

pub struct FakeChromeFactory(Rc<RefCell<ChromeRecord>>);

impl PopupChromeFactory for FakeChromeFactory {
    fn create(&mut self, requests: PopupRequests) -> Box<dyn PopupChrome> {
        let log = Rc::new(RefCell::new(ChromeLog::default()));
        let mut record = self.0.borrow_mut();
        record.chromes.push((requests.popup(), Rc::clone(&log)));
        record.requests.push(requests);
        Box::new(FakeChrome(log))
    }
}

// ============================================================================
// Harness
// ============================================================================

pub struct Harness {
    pub controller: TabController,
    pub main_window: Rc<RefCell<MainWindowLog>>,
    pub chromes: Rc<RefCell<ChromeRecord>>,
    pub capture_sessions: Rc<RefCell<Vec<Rc<RefCell<SessionLog>>>>>,
    pub favorites: FavoritesNotifier,
    pub settings: SharedSettings,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(Settings::default(), CaptureMode::Working)
    }

    pub fn with(settings: Settings, mode: CaptureMode) -> Self {
        let main_window = Rc::new(RefCell::new(MainWindowLog::default()));
        let chromes = Rc::new(RefCell::new(ChromeRecord::default()));
        let capture_sessions: Rc<RefCell<Vec<Rc<RefCell<SessionLog>>>>> =
            Rc::new(RefCell::new(Vec::new()));
        let favorites = FavoritesNotifier::new();
        let settings = settings.into_shared();

        let created = Rc::clone(&capture_sessions);
        let capture_factory = move || -> Result<Box<dyn Connection>> {
            let (session, log) = match mode {
                CaptureMode::Working => FakeSession::new(),
                CaptureMode::FailCreate(message) => return Err(anyhow!(message)),
                CaptureMode::FailConnect => FakeSession::failing(),
            };
            created.borrow_mut().push(log);
            Ok(Box::new(session))
        };

        let controller = TabController::new(TabControllerParams {
            main_window: Box::new(FakeMainWindow(Rc::clone(&main_window))),
            popup_chrome: Box::new(FakeChromeFactory(Rc::clone(&chromes))),
            capture_sessions: Box::new(capture_factory),
            favorites: favorites.clone(),
            settings: settings.clone(),
        });

        Self {
            controller,
            main_window,
            chromes,
            capture_sessions,
            favorites,
            settings,
        }
    }

    /// Chrome log of a popup created by this harness
    pub fn chrome(&self, popup: PopupId) -> Rc<RefCell<ChromeLog>> {
        self.chromes
            .borrow()
            .chromes
            .iter()
            .find(|(id, _)| *id == popup)
            .map(|(_, log)| Rc::clone(log))
            .expect("no chrome was created for this popup")
    }

    /// Request sender handed to a popup's chrome
    pub fn requests(&self, popup: PopupId) -> PopupRequests {
        self.chromes
            .borrow()
            .requests
            .iter()
            .find(|r| r.popup() == popup)
            .cloned()
            .expect("no chrome was created for this popup")
    }

    /// Number of capture manager tabs docked in the main window
    pub fn capture_tab_count(&self) -> usize {
        self.controller
            .main_container()
            .tabs()
            .iter()
            .filter(|t| t.is_capture_manager())
            .count()
    }
}

// ============================================================================
// Log capture
// ============================================================================

struct CaptureLogger;

static RECORDS: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());
static LOGGER: CaptureLogger = CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if let Ok(mut records) = RECORDS.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

/// Route `log` output into an in-memory buffer (idempotent)
pub fn init_log_capture() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(log::LevelFilter::Trace);
}

/// Whether a record at `level` containing `needle` was logged
pub fn was_logged(level: log::Level, needle: &str) -> bool {
    RECORDS
        .lock()
        .map(|records| records.iter().any(|(l, msg)| *l == level && msg.contains(needle)))
        .unwrap_or(false)
}
