//! Bounded FIFO set of recently superseded tokens

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct RevocationState {
    order: VecDeque<String>,
    members: HashSet<String>,
}

/// Remembers the last `capacity` superseded tokens
///
/// Eviction is strictly by insertion order. A token pushed out of the cache
/// is forgotten even if it has not expired yet; signature and expiry checks
/// still apply to it.
pub struct RevocationCache {
    capacity: usize,
    state: Mutex<RevocationState>,
}

impl RevocationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(RevocationState::default()),
        }
    }

    /// Records a superseded token, evicting the oldest entries beyond capacity
    pub fn add(&self, token: &str) {
        if self.capacity == 0 {
            return;
        }

        let mut state = self.lock();
        if state.members.contains(token) {
            return;
        }

        state.order.push_back(token.to_string());
        state.members.insert(token.to_string());

        while state.order.len() > self.capacity {
            if let Some(evicted) = state.order.pop_front() {
                state.members.remove(&evicted);
            }
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.lock().members.contains(token)
    }

    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Poisoning is ignored: no code path panics between the paired updates.
    fn lock(&self) -> MutexGuard<'_, RevocationState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for RevocationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevocationCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}
