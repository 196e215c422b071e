//! Route guard: which view a path renders for the current session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route component asks `resolve_view` what to mount, so gating is
//! re-evaluated on each render and navigation. The post-login hop from `/`
//! to the role dashboard is an effect over the same session signal rather
//! than a one-shot location write.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::{Role, Session};
use crate::state::session::SessionContext;

/// The screens the router can mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Login,
    AdminDashboard,
    EmployeeDashboard,
    NotFound,
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Whether `path` is the login root (`/`).
pub fn is_root(path: &str) -> bool {
    normalize(path) == "/"
}

/// Map `(path, session)` to the view to render.
///
/// `/` is always the login screen, even with a session; the redirect effect
/// moves signed-in users off it.
pub fn resolve_view(path: &str, session: Option<&Session>) -> AppView {
    let role = session.map(|s| s.role);
    match normalize(path) {
        "/" => AppView::Login,
        "/admin" if role == Some(Role::Admin) => AppView::AdminDashboard,
        "/employee" if role == Some(Role::Employee) => AppView::EmployeeDashboard,
        "/admin" | "/employee" => AppView::Login,
        _ => AppView::NotFound,
    }
}

/// Where to send a signed-in user who is sitting on `/`, if anywhere.
pub fn redirect_target(path: &str, session: Option<&Session>) -> Option<&'static str> {
    if !is_root(path) {
        return None;
    }
    session.map(|s| s.role.home_path())
}

/// Replace `/` with the role dashboard whenever a session appears there.
pub fn install_role_redirect<F>(session: SessionContext, pathname: Memo<String>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let current = session.get();
        let path = pathname.get();
        if let Some(target) = redirect_target(&path, current.as_ref()) {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Read the persisted session once the app is running in the browser.
pub fn install_session_restore(session: SessionContext) {
    Effect::new(move || session.restore());
}
