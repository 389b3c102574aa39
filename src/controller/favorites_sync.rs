//! Keeping tab titles in step with renamed favorites.
//!
//! Only the title follows the favorite. Host, port and credentials of an
//! open session stay as they were when it connected.

use super::TabController;
use crate::favorites::FavoritesChanged;
use termtabs_config::Profile;

impl TabController {
    /// Apply a batch of favorite edits to open tabs
    pub fn on_favorites_changed(&mut self, change: &FavoritesChanged) {
        for profile in &change.updated {
            self.retitle_main_tab(profile);
            self.retitle_popups(profile);
        }
    }

    fn retitle_main_tab(&mut self, profile: &Profile) {
        // A favorite is open in at most one docked tab
        if let Some(tab) = self
            .main
            .tabs_mut()
            .iter_mut()
            .find(|t| t.profile == Some(profile.id))
        {
            debug_info!(
                "FAVORITES",
                "Retitling tab {} from {:?} to {:?}",
                tab.id(),
                tab.title,
                profile.name
            );
            tab.set_title(profile.name.clone());
        }
    }

    fn retitle_popups(&mut self, profile: &Profile) {
        for window in self.popups.iter_mut() {
            let Some(tab) = window.tab_mut() else {
                continue;
            };
            if tab.profile != Some(profile.id) {
                continue;
            }
            tab.set_title(profile.name.clone());
            window.update_title();
            debug_info!(
                "FAVORITES",
                "Retitled popup {} to {:?}",
                window.id(),
                profile.name
            );
        }
    }
}
