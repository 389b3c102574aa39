//! The main window as seen from the tab controller.

use crate::tab::TabId;

/// Hooks the controller calls on the main window.
pub trait MainWindow {
    /// Recompute UI state that depends on the tab strip (menus, toolbar).
    fn update_controls(&mut self);

    /// Route double-clicks on `tab` to the window's capture manager action.
    fn register_double_click(&mut self, tab: TabId);

    /// Drop the double-click route of a tab that is going away.
    fn unregister_double_click(&mut self, tab: TabId);
}
