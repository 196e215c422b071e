//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome for the login screen and dashboards and
//! report user intent back through callbacks.

pub mod dashboard_header;
pub mod role_toggle;
