//! Applying new settings to open tabs and popups

use super::TabController;
use crate::i18n::Localizer;
use anyhow::Result;
use std::path::Path;
use termtabs_config::{Settings, SettingsWatcher};

impl TabController {
    /// Replace the shared settings and bring open UI in line with them.
    ///
    /// A locale change retitles the capture manager tab wherever it lives.
    pub fn apply_settings(&mut self, settings: Settings) {
        let locale_changed = self.settings.read().locale != settings.locale;
        if locale_changed {
            self.localizer = Localizer::new(settings.locale.clone());
        }
        *self.settings.write() = settings;

        if locale_changed {
            log::info!("UI locale changed to {}", self.localizer.locale());
            for tab in self.main.tabs_mut() {
                tab.retitle_for_locale(&self.localizer);
            }
            for window in self.popups.iter_mut() {
                let retitled = window
                    .tab_mut()
                    .is_some_and(|tab| tab.retitle_for_locale(&self.localizer));
                if retitled {
                    window.update_title();
                }
            }
            self.main_window.update_controls();
        }

        self.update_capture_button_on_detached_popups();
    }

    /// Apply any settings reloads the watcher has queued.
    ///
    /// Returns whether settings were applied. A file that fails to load is
    /// reported and the current settings stay in effect.
    pub fn reload_settings(&mut self, watcher: &SettingsWatcher) -> Result<bool> {
        let Some(event) = last_queued(|| watcher.try_recv()) else {
            return Ok(false);
        };

        self.reload_settings_from(&event.path)?;
        Ok(true)
    }

    /// Load settings from `path` and apply them.
    ///
    /// On error nothing is applied.
    pub fn reload_settings_from(&mut self, path: &Path) -> Result<()> {
        let settings = Settings::load_from(path)?;
        log::info!("Reloaded settings from {:?}", path);
        self.apply_settings(settings);
        Ok(())
    }
}

/// Drain a queue, keeping only its newest entry
fn last_queued<T>(mut next: impl FnMut() -> Option<T>) -> Option<T> {
    let mut latest = None;
    while let Some(item) = next() {
        latest = Some(item);
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_newest_queued_event_counts() {
        let mut queue = vec![3, 2, 1];
        assert_eq!(last_queued(|| queue.pop()), Some(3));
        assert!(queue.is_empty());

        let mut empty: Vec<u8> = Vec::new();
        assert_eq!(last_queued(|| empty.pop()), None);
    }
}
