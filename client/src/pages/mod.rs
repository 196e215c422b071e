//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its screen's orchestration and delegates shared chrome to
//! `components`. Which page mounts is decided by the guard in `app`.

pub mod admin;
pub mod employee;
pub mod login;
