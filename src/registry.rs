//! Change notification registry.
//!
//! Maps pane handles to subscriber callbacks and delivers normalized
//! geometry changes synchronously. The registry is an owned value, not
//! global state; independent managers carry independent registries.

use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::GeometryDelta;

pub type ChangeCallback = Box<dyn FnMut(&GeometryDelta)>;

/// Outcome of one dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    /// No subscriber for the handle; the event was dropped. Expected when
    /// the producing pane was torn down mid-gesture, so this is a
    /// diagnostic, not an error.
    NoSubscriber,
}

/// Handle-to-subscriber map with replace-on-register semantics.
///
/// At most one callback per handle; re-registering replaces the prior
/// entry. Entries leave the map only on explicit `unregister` — dropping a
/// pane without unregistering leaves a dangling subscriber behind.
///
/// Dispatch borrows the registry mutably for the duration of the callback,
/// so re-entrant `register`/`unregister` from inside a callback does not
/// compile; that restriction is load-bearing, not incidental.
pub struct ChangeRegistry<H> {
    entries: BTreeMap<H, ChangeCallback>,
    delivered: u64,
    dropped: u64,
}

impl<H> Default for ChangeRegistry<H> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            delivered: 0,
            dropped: 0,
        }
    }
}

impl<H: Ord + fmt::Debug> ChangeRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `callback` to changes for `handle`, replacing any prior
    /// subscriber for the same handle.
    pub fn register(&mut self, handle: H, callback: ChangeCallback) {
        if self.entries.contains_key(&handle) {
            tracing::debug!(handle = ?handle, "replacing change subscriber");
        }
        self.entries.insert(handle, callback);
    }

    /// Remove the subscriber for `handle`; no-op when absent.
    pub fn unregister(&mut self, handle: &H) {
        self.entries.remove(handle);
    }

    pub fn is_registered(&self, handle: &H) -> bool {
        self.entries.contains_key(handle)
    }

    /// Deliver `delta` to the subscriber for `handle`, synchronously.
    ///
    /// A missing subscriber drops the event and records a diagnostic; the
    /// pane may have been detached while its gesture was still in flight.
    pub fn dispatch(&mut self, handle: &H, delta: &GeometryDelta) -> DispatchOutcome {
        match self.entries.get_mut(handle) {
            Some(callback) => {
                callback(delta);
                self.delivered += 1;
                DispatchOutcome::Delivered
            }
            None => {
                self.dropped += 1;
                tracing::warn!(handle = ?handle, "dropped change event: no subscriber");
                DispatchOutcome::NoSubscriber
            }
        }
    }

    /// Total changes delivered to subscribers.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Total changes dropped for lack of a subscriber.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
