//! Networking and external-collaborator bindings.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` and `firestore` define the seams the login flow depends on,
//! `firebase` binds them to the real provider in the browser, and `types`
//! holds the identity/session DTOs.

pub mod firebase;
pub mod firestore;
pub mod identity;
pub mod types;
