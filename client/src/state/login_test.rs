use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use futures::executor::block_on;

use super::*;
use crate::net::firestore::StoreError;
use crate::net::identity::ProviderError;

struct FakeProvider {
    result: RefCell<Option<Result<Principal, ProviderError>>>,
    sign_outs: Cell<usize>,
    fail_sign_out: bool,
}

impl FakeProvider {
    fn returning(email: &str, display_name: Option<&str>) -> Self {
        Self::with_result(Ok(Principal {
            email: Some(email.to_owned()),
            display_name: display_name.map(str::to_owned),
        }))
    }

    fn with_result(result: Result<Principal, ProviderError>) -> Self {
        Self { result: RefCell::new(Some(result)), sign_outs: Cell::new(0), fail_sign_out: false }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FakeProvider {
    async fn sign_in(&self) -> Result<Principal, ProviderError> {
        self.result.borrow_mut().take().unwrap_or(Err(ProviderError::Unavailable))
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.sign_outs.set(self.sign_outs.get() + 1);
        if self.fail_sign_out { Err(ProviderError::SignOut("offline".to_owned())) } else { Ok(()) }
    }
}

fn principal(email: &str) -> Principal {
    Principal { email: Some(email.to_owned()), display_name: None }
}

// =============================================================
// authorize
// =============================================================

#[test]
fn authorize_rejects_foreign_domains_for_every_role() {
    for email in ["anyone@gmail.com", "x@citchennai.net.evil.com", "citchennai.net", ""] {
        for role in [Role::Admin, Role::Employee] {
            assert_eq!(authorize(&principal(email), role), Err(LoginError::WrongDomain), "{email} as {role}");
        }
    }
}

#[test]
fn authorize_rejects_missing_email() {
    assert_eq!(authorize(&Principal::default(), Role::Admin), Err(LoginError::WrongDomain));
}

#[test]
fn authorize_domain_suffix_is_case_sensitive() {
    assert_eq!(
        authorize(&principal("THIRUPATHIP.AIML2023@CITCHENNAI.NET"), Role::Admin),
        Err(LoginError::WrongDomain)
    );
}

#[test]
fn authorize_admin_match_ignores_local_part_case() {
    let session = authorize(&principal("Thirupathip.AIML2023@citchennai.net"), Role::Admin).unwrap();
    assert_eq!(session.role, Role::Admin);
    assert_eq!(session.user.email, ADMIN_EMAIL);
}

#[test]
fn authorize_admin_defaults_display_name_to_local_part() {
    let session = authorize(&principal(ADMIN_EMAIL), Role::Admin).unwrap();
    assert_eq!(
        session,
        Session {
            user: SessionUser { email: ADMIN_EMAIL.to_owned(), display_name: "thirupathip.aiml2023".to_owned() },
            role: Role::Admin,
        }
    );
}

#[test]
fn authorize_admin_keeps_provider_display_name() {
    let p = Principal { email: Some(ADMIN_EMAIL.to_owned()), display_name: Some("Thirupathi P".to_owned()) };
    assert_eq!(authorize(&p, Role::Admin).unwrap().user.display_name, "Thirupathi P");
}

#[test]
fn authorize_admin_empty_display_name_falls_back() {
    let p = Principal { email: Some(ADMIN_EMAIL.to_owned()), display_name: Some(String::new()) };
    assert_eq!(authorize(&p, Role::Admin).unwrap().user.display_name, "thirupathip.aiml2023");
}

#[test]
fn authorize_other_admin_is_denied() {
    let err = authorize(&principal("random.person@citchennai.net"), Role::Admin).unwrap_err();
    assert_eq!(err, LoginError::AdminNotPermitted);
    assert_eq!(err.to_string(), "Only the specified admin account is allowed.");
}

#[test]
fn authorize_employee_is_always_denied() {
    for email in [ADMIN_EMAIL, "vengi@citchennai.net", "random.person@citchennai.net"] {
        assert_eq!(authorize(&principal(email), Role::Employee), Err(LoginError::EmployeeLoginDisabled));
    }
}

// =============================================================
// attempt_login
// =============================================================

#[test]
fn attempt_login_admin_succeeds_without_sign_out() {
    let provider = FakeProvider::returning(ADMIN_EMAIL, None);
    let session = block_on(attempt_login(&provider, Role::Admin)).unwrap();
    assert_eq!(session.role, Role::Admin);
    assert_eq!(provider.sign_outs.get(), 0);
}

#[test]
fn attempt_login_wrong_domain_signs_out() {
    let provider = FakeProvider::returning("anyone@gmail.com", Some("Anyone"));
    let err = block_on(attempt_login(&provider, Role::Employee)).unwrap_err();
    assert_eq!(err.to_string(), "Please use your organization email to sign in.");
    assert_eq!(provider.sign_outs.get(), 1);
}

#[test]
fn attempt_login_employee_signs_out() {
    let provider = FakeProvider::returning("vengi@citchennai.net", None);
    let err = block_on(attempt_login(&provider, Role::Employee)).unwrap_err();
    assert_eq!(err.to_string(), "Employee login is not allowed.");
    assert_eq!(provider.sign_outs.get(), 1);
}

#[test]
fn attempt_login_reports_provider_message_verbatim() {
    let provider = FakeProvider::with_result(Err(ProviderError::SignIn(
        "Firebase: Error (auth/popup-closed-by-user).".to_owned(),
    )));
    let err = block_on(attempt_login(&provider, Role::Admin)).unwrap_err();
    assert_eq!(err.to_string(), "Firebase: Error (auth/popup-closed-by-user).");
    assert_eq!(provider.sign_outs.get(), 0);
}

#[test]
fn attempt_login_other_admin_signs_out() {
    let provider = FakeProvider::returning("random.person@citchennai.net", None);
    let err = block_on(attempt_login(&provider, Role::Admin)).unwrap_err();
    assert_eq!(err.to_string(), "Only the specified admin account is allowed.");
    assert_eq!(provider.sign_outs.get(), 1);
}

#[test]
fn attempt_login_sign_out_failure_keeps_rejection() {
    let mut provider = FakeProvider::returning("random.person@citchennai.net", None);
    provider.fail_sign_out = true;
    let err = block_on(attempt_login(&provider, Role::Admin)).unwrap_err();
    assert_eq!(err, LoginError::AdminNotPermitted);
}

// =============================================================
// LoginState
// =============================================================

#[test]
fn login_state_defaults_to_employee_idle() {
    let state = LoginState::default();
    assert_eq!(state.role, Role::Employee);
    assert!(!state.loading);
    assert!(state.error.is_empty());
    assert_eq!(state.button_label(), "Continue with Google as employee");
}

#[test]
fn begin_clears_error_and_blocks_reentry() {
    let mut state = LoginState { error: "old".to_owned(), ..LoginState::default() };
    assert!(state.begin());
    assert!(state.error.is_empty());
    assert_eq!(state.button_label(), "Signing in...");
    assert!(!state.begin());
}

#[test]
fn finish_surfaces_error_and_stops_loading() {
    let mut state = LoginState::default();
    state.begin();
    state.finish(&Err(LoginError::EmployeeLoginDisabled));
    assert!(!state.loading);
    assert_eq!(state.error, "Employee login is not allowed.");
}

#[test]
fn finish_success_leaves_error_empty() {
    let mut state = LoginState { role: Role::Admin, ..LoginState::default() };
    state.begin();
    state.finish(&authorize(&principal(ADMIN_EMAIL), Role::Admin));
    assert!(state.error.is_empty());
    assert_eq!(state.button_label(), "Continue with Google as admin");
}

#[test]
fn roles_loaded_failure_prefixes_message() {
    let mut state = LoginState::default();
    state.roles_loaded(Err(AllowListError::Malformed));
    assert_eq!(
        state.error,
        "Failed to initialize user roles. Please try again.\nRoles data missing or malformed in Firestore"
    );
}

#[test]
fn roles_loaded_store_failure_keeps_store_message() {
    let mut state = LoginState::default();
    state.roles_loaded(Err(AllowListError::Store(StoreError::Status(403))));
    assert!(state.error.ends_with("document request failed: status 403"));
}

#[test]
fn roles_loaded_success_stores_lists() {
    let mut state = LoginState::default();
    let allowed = AllowList { admins: vec![ADMIN_EMAIL.to_owned()], employees: Vec::new() };
    state.roles_loaded(Ok(allowed.clone()));
    assert_eq!(state.allowed, allowed);
    assert!(state.error.is_empty());
}

#[test]
fn email_local_part_splits_at_first_at_sign() {
    assert_eq!(email_local_part("a.b@citchennai.net"), "a.b");
    assert_eq!(email_local_part("no-at-sign"), "no-at-sign");
}
