//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `login`, `allow_list`) so the
//! guard, login screen, and dashboards each depend on a small focused model.

pub mod allow_list;
pub mod login;
pub mod session;
