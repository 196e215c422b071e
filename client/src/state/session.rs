//! Session Store and the reactive session context.
//!
//! SYSTEM CONTEXT
//! ==============
//! At most one `Session` exists per browser. It lives in a persistent slot
//! (`localStorage["userSession"]`) and is mirrored into a `RwSignal` that the
//! router guard and dashboards read through `SessionContext`.
//!
//! LIFECYCLE
//! =========
//! `SessionContext::new` starts empty so SSR and the first hydrated render
//! agree. `restore` reads the slot exactly once after hydration. `login` and
//! `logout` are the only setters and write the slot in the same step, so the
//! signal and storage never drift apart.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex};

use leptos::prelude::*;

use crate::net::types::{Role, Session};
use crate::state::login::email_local_part;
use crate::util::storage;

/// Storage key holding the serialized session.
pub const SESSION_KEY: &str = "userSession";

/// A single persistent string slot.
pub trait SessionSlot: Send + Sync {
    fn read(&self) -> Option<String>;
    fn write(&self, value: &str);
    fn remove(&self);
}

/// Slot backed by browser `localStorage`.
#[derive(Clone, Copy, Debug)]
pub struct LocalStorageSlot {
    key: &'static str,
}

impl Default for LocalStorageSlot {
    fn default() -> Self {
        Self { key: SESSION_KEY }
    }
}

impl SessionSlot for LocalStorageSlot {
    fn read(&self) -> Option<String> {
        storage::read_item(self.key)
    }

    fn write(&self, value: &str) {
        storage::write_item(self.key, value);
    }

    fn remove(&self) {
        storage::remove_item(self.key);
    }
}

/// Process-local slot, used where no browser storage exists.
#[derive(Clone, Debug, Default)]
pub struct MemorySlot {
    value: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.value.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionSlot for MemorySlot {
    fn read(&self) -> Option<String> {
        self.lock().clone()
    }

    fn write(&self, value: &str) {
        *self.lock() = Some(value.to_owned());
    }

    fn remove(&self) {
        *self.lock() = None;
    }
}

/// Typed load/save/clear over a `SessionSlot`.
#[derive(Clone, Debug, Default)]
pub struct SessionStore<S> {
    slot: S,
}

impl<S: SessionSlot> SessionStore<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    /// Current persisted session. Undecodable slot contents load as empty; a
    /// missing or blank display name falls back to the email's local part.
    pub fn load(&self) -> Option<Session> {
        let raw = self.slot.read()?;
        match serde_json::from_str::<Session>(&raw) {
            Ok(mut session) => {
                let user = &mut session.user;
                if user.display_name.is_empty() {
                    user.display_name = email_local_part(&user.email).to_owned();
                }
                Some(session)
            }
            Err(e) => {
                leptos::logging::warn!("discarding unreadable session: {e}");
                None
            }
        }
    }

    pub fn save(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(raw) => self.slot.write(&raw),
            Err(e) => leptos::logging::error!("session encode failed: {e}"),
        }
    }

    pub fn clear(&self) {
        self.slot.remove();
    }
}

impl<T: SessionSlot + ?Sized> SessionSlot for Arc<T> {
    fn read(&self) -> Option<String> {
        (**self).read()
    }

    fn write(&self, value: &str) {
        (**self).write(value);
    }

    fn remove(&self) {
        (**self).remove();
    }
}

/// Reactive handle to the current session, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct SessionContext {
    session: RwSignal<Option<Session>>,
    restored: RwSignal<bool>,
    store: StoredValue<SessionStore<Arc<dyn SessionSlot>>>,
}

impl SessionContext {
    /// Context persisting to browser `localStorage`.
    pub fn browser() -> Self {
        Self::new(LocalStorageSlot::default())
    }

    pub fn new(slot: impl SessionSlot + 'static) -> Self {
        let slot: Arc<dyn SessionSlot> = Arc::new(slot);
        Self {
            session: RwSignal::new(None),
            restored: RwSignal::new(false),
            store: StoredValue::new(SessionStore::new(slot)),
        }
    }

    /// Load the persisted session into the signal. Only the first call reads.
    pub fn restore(&self) {
        if self.restored.get_untracked() {
            return;
        }
        let loaded = self.store.with_value(|store| store.load());
        self.session.set(loaded);
        self.restored.set(true);
    }

    /// Whether the persisted session has been read (or superseded by a login).
    pub fn is_restored(&self) -> bool {
        self.restored.get()
    }

    pub fn get(&self) -> Option<Session> {
        self.session.get()
    }

    /// Borrow the current session (tracked).
    pub fn session_with<R>(&self, f: impl FnOnce(Option<&Session>) -> R) -> R {
        self.session.with(|s| f(s.as_ref()))
    }

    pub fn get_untracked(&self) -> Option<Session> {
        self.session.get_untracked()
    }

    pub fn role(&self) -> Option<Role> {
        self.session_with(|s| s.map(|s| s.role))
    }

    /// Establish a new session and persist it.
    pub fn login(&self, session: Session) {
        if session.user.email.is_empty() {
            leptos::logging::error!("Invalid login credentials");
            return;
        }
        self.store.with_value(|store| store.save(&session));
        self.session.set(Some(session));
        self.restored.set(true);
    }

    /// Drop the session and its persisted copy.
    pub fn logout(&self) {
        self.store.with_value(|store| store.clear());
        self.session.set(None);
    }
}
