//! Ordered tab strip with a selection pointer and change notification

use super::{TabHandle, TabId};
use std::ops::{Deref, DerefMut};

/// Snapshot delivered to listeners after a structural change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerChange {
    /// Monotonic mutation counter at the time of the snapshot
    pub revision: u64,
    /// Tab IDs in display order
    pub tabs: Vec<TabId>,
    /// Selected tab, if any
    pub selected: Option<TabId>,
}

type ChangeListener = Box<dyn FnMut(&ContainerChange)>;

/// Ordered collection of tabs owned by one window
///
/// Invariant: `selected`, when set, names a tab in `tabs`.
#[derive(Default)]
pub struct TabContainer {
    /// All tabs, in display order
    tabs: Vec<TabHandle>,
    /// Currently selected tab ID
    selected: Option<TabId>,
    /// Bumped on every structural change
    revision: u64,
    /// Open `BatchedMutation` guards
    batch_depth: u32,
    /// A change happened while batched and has not been announced yet
    pending: bool,
    listeners: Vec<ChangeListener>,
}

impl std::fmt::Debug for TabContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabContainer")
            .field("tabs", &self.tabs)
            .field("selected", &self.selected)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl TabContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for structural changes (insert, remove, selection)
    pub fn subscribe(&mut self, listener: impl FnMut(&ContainerChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Append a tab without changing the selection
    pub fn push(&mut self, tab: TabHandle) {
        debug_assert!(
            !self.contains(tab.id),
            "tab {} is already in this container",
            tab.id
        );
        debug_trace!("TAB", "Appending tab {} at index {}", tab.id, self.tabs.len());
        self.tabs.push(tab);
        self.changed();
    }

    /// Remove a tab by ID and hand it back to the caller.
    ///
    /// If the removed tab was selected, the tab now at the same index (or the
    /// new last tab) becomes selected.
    pub fn remove(&mut self, id: TabId) -> Option<TabHandle> {
        let idx = self.position(id)?;
        let tab = self.tabs.remove(idx);

        if self.selected == Some(id) {
            self.selected = if self.tabs.is_empty() {
                None
            } else {
                let new_idx = idx.min(self.tabs.len() - 1);
                Some(self.tabs[new_idx].id)
            };
        }

        debug_trace!("TAB", "Removed tab {} from index {}", id, idx);
        self.changed();
        Some(tab)
    }

    /// Set the selection. Returns false if `id` is not in this container.
    pub fn set_selected(&mut self, id: Option<TabId>) -> bool {
        if let Some(id) = id
            && !self.contains(id)
        {
            return false;
        }
        if self.selected != id {
            self.selected = id;
            self.changed();
        }
        true
    }

    pub fn selected_id(&self) -> Option<TabId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&TabHandle> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn selected_mut(&mut self) -> Option<&mut TabHandle> {
        let id = self.selected?;
        self.get_mut(id)
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.tabs.iter().any(|t| t.id == id)
    }

    /// Index of a tab in display order
    pub fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn get(&self, id: TabId) -> Option<&TabHandle> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut TabHandle> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    /// All tabs in display order
    pub fn tabs(&self) -> &[TabHandle] {
        &self.tabs
    }

    /// Mutable access for in-place edits such as retitling.
    ///
    /// Edits through this slice are not structural and raise no notification.
    pub fn tabs_mut(&mut self) -> &mut [TabHandle] {
        &mut self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Start a batched mutation.
    ///
    /// Listeners are not called while the returned guard is alive; when the
    /// outermost guard drops, a single change is announced if anything
    /// changed. Dropping also happens on early return or unwind, so the
    /// announcement cannot be lost.
    pub fn batch(&mut self) -> BatchedMutation<'_> {
        self.batch_depth += 1;
        BatchedMutation { container: self }
    }

    /// Run `f` inside a batched mutation
    pub fn with_batched_mutation<R>(&mut self, f: impl FnOnce(&mut TabContainer) -> R) -> R {
        let mut batch = self.batch();
        f(&mut *batch)
    }

    fn changed(&mut self) {
        self.revision += 1;
        if self.batch_depth > 0 {
            self.pending = true;
        } else {
            self.notify();
        }
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let change = ContainerChange {
            revision: self.revision,
            tabs: self.tabs.iter().map(|t| t.id).collect(),
            selected: self.selected,
        };
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in &mut listeners {
            listener(&change);
        }
        self.listeners = listeners;
    }
}

/// Scoped batch over a `TabContainer`, see [`TabContainer::batch`]
pub struct BatchedMutation<'a> {
    container: &'a mut TabContainer,
}

impl Deref for BatchedMutation<'_> {
    type Target = TabContainer;

    fn deref(&self) -> &TabContainer {
        self.container
    }
}

impl DerefMut for BatchedMutation<'_> {
    fn deref_mut(&mut self) -> &mut TabContainer {
        self.container
    }
}

impl Drop for BatchedMutation<'_> {
    fn drop(&mut self) {
        self.container.batch_depth -= 1;
        if self.container.batch_depth == 0 && self.container.pending {
            self.container.pending = false;
            debug_log!(
                "TAB",
                "Batched mutation finished at revision {}",
                self.container.revision
            );
            self.container.notify();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn container_with(titles: &[&str]) -> (TabContainer, Vec<TabId>) {
        let mut container = TabContainer::new();
        let mut ids = Vec::new();
        for title in titles {
            let tab = TabHandle::new(*title);
            ids.push(tab.id);
            container.push(tab);
        }
        (container, ids)
    }

    fn record(container: &mut TabContainer) -> Rc<RefCell<Vec<ContainerChange>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        container.subscribe(move |change| sink.borrow_mut().push(change.clone()));
        seen
    }

    #[test]
    fn push_does_not_select() {
        let (container, ids) = container_with(&["a", "b"]);
        assert_eq!(container.len(), 2);
        assert_eq!(container.position(ids[1]), Some(1));
        assert!(container.selected().is_none());
    }

    #[test]
    fn set_selected_rejects_foreign_tab() {
        let (mut container, ids) = container_with(&["a"]);
        let stranger = TabHandle::new("x");

        assert!(!container.set_selected(Some(stranger.id)));
        assert!(container.set_selected(Some(ids[0])));
        assert_eq!(container.selected().map(|t| t.title.as_str()), Some("a"));
        assert!(container.set_selected(None));
        assert!(container.selected_id().is_none());
    }

    #[test]
    fn removing_selected_tab_selects_neighbour() {
        let (mut container, ids) = container_with(&["a", "b", "c"]);
        container.set_selected(Some(ids[1]));

        let removed = container.remove(ids[1]).expect("tab present");
        assert_eq!(removed.title, "b");
        assert_eq!(container.selected_id(), Some(ids[2]));

        container.remove(ids[2]);
        assert_eq!(container.selected_id(), Some(ids[0]));

        container.remove(ids[0]);
        assert!(container.selected_id().is_none());
        assert!(container.is_empty());
    }

    #[test]
    fn removing_unselected_tab_keeps_selection() {
        let (mut container, ids) = container_with(&["a", "b"]);
        container.set_selected(Some(ids[0]));
        container.remove(ids[1]);
        assert_eq!(container.selected_id(), Some(ids[0]));
        assert!(container.remove(ids[1]).is_none());
    }

    #[test]
    fn each_unbatched_change_notifies() {
        let (mut container, ids) = container_with(&["a"]);
        let seen = record(&mut container);

        container.push(TabHandle::new("b"));
        container.set_selected(Some(ids[0]));
        // Re-selecting the same tab is not a change
        container.set_selected(Some(ids[0]));

        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[1].selected, Some(ids[0]));
    }

    #[test]
    fn batch_announces_once_with_final_state() {
        let (mut container, ids) = container_with(&["a", "b"]);
        let seen = record(&mut container);

        {
            let mut batch = container.batch();
            batch.remove(ids[0]);
            batch.push(TabHandle::new("c"));
            batch.set_selected(Some(ids[1]));
            assert!(seen.borrow().is_empty());
        }

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].tabs.len(), 2);
        assert_eq!(seen[0].tabs[0], ids[1]);
        assert_eq!(seen[0].selected, Some(ids[1]));
        assert_eq!(seen[0].revision, container.revision());
    }

    #[test]
    fn nested_batches_announce_at_outermost_drop() {
        let (mut container, _) = container_with(&[]);
        let seen = record(&mut container);

        container.with_batched_mutation(|outer| {
            outer.push(TabHandle::new("a"));
            outer.with_batched_mutation(|inner| inner.push(TabHandle::new("b")));
        });

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].tabs.len(), 2);
    }

    #[test]
    fn batch_without_changes_is_silent() {
        let (mut container, _) = container_with(&["a"]);
        let seen = record(&mut container);
        container.with_batched_mutation(|c| c.len());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn early_exit_from_batch_still_announces() {
        let (mut container, ids) = container_with(&["a"]);
        let seen = record(&mut container);

        let result: Option<()> = container.with_batched_mutation(|c| {
            c.remove(ids[0])?;
            c.remove(ids[0])?;
            Some(())
        });

        assert!(result.is_none());
        assert_eq!(seen.borrow().len(), 1);
        assert!(seen.borrow()[0].tabs.is_empty());
    }
}
