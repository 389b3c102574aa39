//! Publish/subscribe channel for favorite (profile) changes.
//!
//! The notifier is a cheap, cloneable handle. Each subscriber gets its own
//! queue; a batch published once is delivered to every live subscriber and
//! drained on the subscriber's own thread.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use termtabs_config::{Profile, ProfileId};

/// One batch of favorite edits
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesChanged {
    /// New favorites
    pub added: Vec<Profile>,
    /// Edited favorites, carrying their current values
    pub updated: Vec<Profile>,
    /// Deleted favorites
    pub removed: Vec<ProfileId>,
}

impl FavoritesChanged {
    /// A batch holding only updated records
    pub fn updated(updated: Vec<Profile>) -> Self {
        Self {
            updated,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

#[derive(Default)]
struct NotifierState {
    next_id: u64,
    subscribers: HashMap<u64, Sender<FavoritesChanged>>,
}

/// Fan-out of `FavoritesChanged` batches to subscribers
#[derive(Clone, Default)]
pub struct FavoritesNotifier {
    state: Arc<Mutex<NotifierState>>,
}

impl std::fmt::Debug for FavoritesNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl FavoritesNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start receiving batches published from now on
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = channel();
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.insert(id, tx);
        Subscription { id, receiver: rx }
    }

    /// Stop delivering to `subscription`. Unknown subscriptions are ignored.
    pub fn unsubscribe(&self, subscription: &Subscription) {
        self.state.lock().subscribers.remove(&subscription.id);
    }

    /// Deliver `change` to every subscriber; returns how many received it.
    ///
    /// Subscribers whose receiver was dropped are pruned.
    pub fn publish(&self, change: FavoritesChanged) -> usize {
        if change.is_empty() {
            return 0;
        }
        let mut state = self.state.lock();
        state
            .subscribers
            .retain(|_, tx| tx.send(change.clone()).is_ok());
        log::debug!(
            "Published favorites change ({} updated) to {} subscriber(s)",
            change.updated.len(),
            state.subscribers.len()
        );
        state.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }
}

/// Receiving end of a `FavoritesNotifier` subscription
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    receiver: Receiver<FavoritesChanged>,
}

impl Subscription {
    /// Next queued batch, if any (non-blocking)
    pub fn try_recv(&self) -> Option<FavoritesChanged> {
        self.receiver.try_recv().ok()
    }
}
