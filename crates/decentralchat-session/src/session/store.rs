/*
[INPUT]:  Session transitions from the manager
[OUTPUT]: State snapshots and synchronous listener notifications
[POS]:    Session layer - single source of truth for authentication state
[UPDATE]: When adding new transitions or changing the subscribe contract
*/

use std::sync::{Arc, RwLock, Weak};

use crate::types::{Session, SessionState};

type Listener = Arc<dyn Fn(&SessionState) + Send + Sync>;

struct StoreInner {
    state: SessionState,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

/// Thread-safe session state store
///
/// Cloning yields another handle to the same store. Mutated only by the
/// session manager; read and subscribed to by any number of consumers.
/// Listeners run synchronously after every transition, in registration
/// order. Writing to the store from inside a listener is undefined and must
/// be avoided by callers.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl SessionStore {
    /// Create a store in the initializing state
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                state: SessionState::initializing(),
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
        }
    }

    /// Synchronous snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.inner.read().unwrap().state.clone()
    }

    /// Transition to an authenticated state holding `session`
    pub fn set_authenticated(&self, session: Session) {
        self.transition(SessionState::authenticated(session));
    }

    /// Transition to the settled unauthenticated state
    pub fn set_unauthenticated(&self) {
        self.transition(SessionState::unauthenticated());
    }

    /// Register a listener invoked after every state transition
    ///
    /// The returned handle deregisters the listener when dropped or when
    /// `unsubscribe` is called.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        let mut guard = self.inner.write().unwrap();
        let id = guard.next_listener_id;
        guard.next_listener_id += 1;
        guard.listeners.push((id, Arc::new(listener)));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn transition(&self, next: SessionState) {
        // Listeners are invoked outside the lock so they can read the store
        let (snapshot, listeners) = {
            let mut guard = self.inner.write().unwrap();
            guard.state = next;
            let listeners: Vec<Listener> = guard
                .listeners
                .iter()
                .map(|(_, listener)| listener.clone())
                .collect();
            (guard.state.clone(), listeners)
        };

        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Deregistration handle returned by `SessionStore::subscribe`
///
/// The listener stays registered for the lifetime of this handle.
pub struct Subscription {
    id: u64,
    inner: Weak<RwLock<StoreInner>>,
}

impl Subscription {
    /// Deregister the listener now
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut guard = inner.write().unwrap();
            guard.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
