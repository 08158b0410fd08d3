//! Keyed debounce timers.
//!
//! Each key owns at most one pending timer. Arming a key aborts the timer that was
//! pending for it, so a burst of arms for one key runs the action once, after the
//! last arm plus the quiet period.
//!
//! Once a timer has fired its action is detached: cancelling or re-arming the key
//! afterwards does not stop an action that is already running.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct Debouncer<K> {
    timers: Mutex<HashMap<K, JoinHandle<()>>>,
}

impl<K> Default for Debouncer<K> {
    fn default() -> Self {
        Self {
            timers: Mutex::new(HashMap::new()),
        }
    }
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, JoinHandle<()>>> {
        self.timers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// (Re)arms the timer for `key`. `action` runs after `delay` unless the key is
    /// armed again or cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm<F>(&self, key: K, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action);
        });

        let mut timers = self.lock();
        timers.retain(|_, handle| !handle.is_finished());
        if let Some(previous) = timers.insert(key, timer) {
            previous.abort();
        }
    }

    /// Cancels the pending timer for `key`. Returns whether one was pending.
    pub fn cancel(&self, key: &K) -> bool {
        match self.lock().remove(key) {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                pending
            }
            None => false,
        }
    }

    /// Cancels every pending timer, returning the keys that were still pending.
    pub fn cancel_all(&self) -> Vec<K> {
        self.lock()
            .drain()
            .filter_map(|(key, handle)| {
                let pending = !handle.is_finished();
                handle.abort();
                pending.then_some(key)
            })
            .collect()
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.lock()
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn pending_count(&self) -> usize {
        self.lock()
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        let timers = self
            .timers
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for (_, handle) in timers.drain() {
            handle.abort();
        }
    }
}
