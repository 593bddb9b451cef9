//! History environment.
//!
//! # Responsibilities
//! - Abstract the host history (current path, push, replace)
//! - Deliver back/forward notifications to subscribers
//! - Provide an in-memory history for tests and the CLI
//!
//! # Design Decisions
//! - Methods take `&self`: a history is an environment handle shared by
//!   the host and the controller
//! - Pop notifications use a broadcast channel; dropping the receiver is
//!   the deregistration
//! - Push and replace never notify, matching browser popstate semantics

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Default capacity of the pop notification channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Externally triggered traversal (back/forward) to `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopEvent {
    pub path: String,
}

/// The host's session history.
pub trait History {
    /// Path of the active entry, as the host reports it.
    fn current_path(&self) -> String;

    /// Add an entry after the active one and activate it.
    fn push(&self, path: &str);

    /// Overwrite the active entry.
    fn replace(&self, path: &str);

    /// Register for back/forward notifications.
    fn subscribe(&self) -> broadcast::Receiver<PopEvent>;
}

/// One history slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub path: String,
    /// Fresh for every push and replace.
    pub key: Uuid,
}

impl HistoryEntry {
    fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            key: Uuid::new_v4(),
        }
    }
}

#[derive(Debug)]
struct Stack {
    entries: Vec<HistoryEntry>,
    index: usize,
    mutations: usize,
}

/// In-memory session history with back/forward traversal.
///
/// Clones share the same stack.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    stack: Arc<Mutex<Stack>>,
    events: broadcast::Sender<PopEvent>,
}

impl MemoryHistory {
    pub fn new(initial_path: &str) -> Self {
        Self::with_capacity(initial_path, DEFAULT_EVENT_CAPACITY)
    }

    /// `capacity` bounds undelivered pop notifications; zero is raised to one.
    pub fn with_capacity(initial_path: &str, capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            stack: Arc::new(Mutex::new(Stack {
                entries: vec![HistoryEntry::new(initial_path)],
                index: 0,
                mutations: 0,
            })),
            events,
        }
    }

    pub fn back(&self) -> bool {
        self.go(-1)
    }

    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Traverse `delta` entries. Returns false, without notifying, if the
    /// target lies outside the stack.
    pub fn go(&self, delta: isize) -> bool {
        let path = {
            let mut stack = self.lock();
            let target = match stack.index.checked_add_signed(delta) {
                Some(target) if delta != 0 && target < stack.entries.len() => target,
                _ => return false,
            };
            stack.index = target;
            stack.entries[target].path.clone()
        };

        tracing::debug!(path = %path, delta, "History traversal");
        // No subscribers is fine; nobody is listening yet
        let _ = self.events.send(PopEvent { path });
        true
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.lock().entries.clone()
    }

    pub fn current_entry(&self) -> HistoryEntry {
        let stack = self.lock();
        stack.entries[stack.index].clone()
    }

    /// Index of the active entry.
    pub fn index(&self) -> usize {
        self.lock().index
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Push and replace calls so far.
    pub fn mutations(&self) -> usize {
        self.lock().mutations
    }

    /// Live pop subscriptions.
    pub fn listener_count(&self) -> usize {
        self.events.receiver_count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Stack> {
        self.stack.lock().expect("history mutex poisoned")
    }
}

impl History for MemoryHistory {
    fn current_path(&self) -> String {
        self.current_entry().path
    }

    fn push(&self, path: &str) {
        let mut stack = self.lock();
        let keep = stack.index + 1;
        stack.entries.truncate(keep);
        stack.entries.push(HistoryEntry::new(path));
        stack.index = keep;
        stack.mutations += 1;
    }

    fn replace(&self, path: &str) {
        let mut stack = self.lock();
        let index = stack.index;
        stack.entries[index] = HistoryEntry::new(path);
        stack.mutations += 1;
    }

    fn subscribe(&self) -> broadcast::Receiver<PopEvent> {
        self.events.subscribe()
    }
}
