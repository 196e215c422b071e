//! Login flow: sign in with the identity provider, then gate by domain and role.
//!
//! SYSTEM CONTEXT
//! ==============
//! `attempt_login` is the single user-triggered operation behind the login
//! button. Every rejection signs the principal back out of the provider so a
//! refused account does not linger there.
//!
//! KNOWN GAPS
//! ==========
//! The admin check compares against `ADMIN_EMAIL`, not the loaded
//! `AllowList`, and employee sign-in is refused outright. Both mirror current
//! product behavior and stay until the intended policy is confirmed.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use crate::net::identity::IdentityProvider;
use crate::net::types::{Principal, Role, Session, SessionUser};
use crate::state::allow_list::{AllowList, AllowListError};

/// Organization domain every account must belong to.
pub const ORG_EMAIL_SUFFIX: &str = "@citchennai.net";

/// The one account allowed to sign in as admin.
pub const ADMIN_EMAIL: &str = "thirupathip.aiml2023@citchennai.net";

/// Everything the login screen can report. `Display` is the user-facing text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Please use your organization email to sign in.")]
    WrongDomain,

    #[error("Only the specified admin account is allowed.")]
    AdminNotPermitted,

    #[error("Employee login is not allowed.")]
    EmployeeLoginDisabled,

    /// Sign-in itself failed; carries the provider's message verbatim.
    #[error("{0}")]
    Provider(String),

    #[error("Failed to initialize user roles. Please try again.\n{0}")]
    RolesInit(String),
}

/// Local part of an email address.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Decide whether `principal` may hold `role`.
///
/// # Errors
///
/// `WrongDomain` when the email is missing or outside `ORG_EMAIL_SUFFIX`,
/// `AdminNotPermitted` for any admin other than `ADMIN_EMAIL`, and
/// `EmployeeLoginDisabled` for every employee.
pub fn authorize(principal: &Principal, role: Role) -> Result<Session, LoginError> {
    let email = principal.email.as_deref().unwrap_or_default();
    if !email.ends_with(ORG_EMAIL_SUFFIX) {
        return Err(LoginError::WrongDomain);
    }

    let email = email.to_lowercase();
    match role {
        Role::Admin if email == ADMIN_EMAIL => {
            let display_name = principal
                .display_name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| email_local_part(&email).to_owned());
            Ok(Session { user: SessionUser { email, display_name }, role: Role::Admin })
        }
        Role::Admin => Err(LoginError::AdminNotPermitted),
        Role::Employee => Err(LoginError::EmployeeLoginDisabled),
    }
}

/// Run interactive sign-in and authorize the result for `role`.
///
/// # Errors
///
/// `Provider` if sign-in fails, otherwise whatever `authorize` rejects with.
/// A failed sign-out after a rejection is logged, not reported.
pub async fn attempt_login<P>(provider: &P, role: Role) -> Result<Session, LoginError>
where
    P: IdentityProvider + ?Sized,
{
    let principal = provider.sign_in().await.map_err(|e| LoginError::Provider(e.to_string()))?;

    match authorize(&principal, role) {
        Ok(session) => Ok(session),
        Err(err) => {
            if let Err(e) = provider.sign_out().await {
                leptos::logging::warn!("sign-out after rejected login failed: {e}");
            }
            Err(err)
        }
    }
}

/// Login screen state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginState {
    pub role: Role,
    pub error: String,
    pub loading: bool,
    /// Loaded on mount; not consulted by `authorize`.
    pub allowed: AllowList,
}

impl LoginState {
    /// Enter the loading state. Returns `false` if an attempt is already running.
    pub fn begin(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.error.clear();
        self.loading = true;
        true
    }

    /// Leave the loading state, surfacing any failure.
    pub fn finish(&mut self, result: &Result<Session, LoginError>) {
        if let Err(e) = result {
            self.error = e.to_string();
        }
        self.loading = false;
    }

    /// Record the outcome of allow-list initialization.
    pub fn roles_loaded(&mut self, result: Result<AllowList, AllowListError>) {
        match result {
            Ok(allowed) => self.allowed = allowed,
            Err(e) => {
                leptos::logging::error!("allow-list initialization failed: {e}");
                self.error = LoginError::RolesInit(e.to_string()).to_string();
            }
        }
    }

    pub fn button_label(&self) -> String {
        if self.loading {
            "Signing in...".to_owned()
        } else {
            format!("Continue with Google as {}", self.role)
        }
    }
}
