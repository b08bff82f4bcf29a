//! Death listeners
//!
//! Several independent systems react to one death (population bookkeeping,
//! mission progress, kill counters). Each subscribes a callback and gets a
//! handle back to unsubscribe with.

use super::context::DeathNotice;

/// Handle returned by [`DeathListeners::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&DeathNotice)>;

#[derive(Default)]
pub struct DeathListeners {
    next_id: u64,
    listeners: Vec<(ListenerId, Callback)>,
}

impl DeathListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&DeathNotice) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the handle was already gone
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    /// Call every listener, in subscription order
    pub fn notify(&mut self, notice: &DeathNotice) {
        for (_, callback) in &mut self.listeners {
            callback(notice);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for DeathListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeathListeners")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
