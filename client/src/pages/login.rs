//! Login page: role toggle plus Google sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted at `/` and in place of any dashboard the session does not permit.
//! On mount it loads (and on first run seeds) the role allow-lists; the
//! button runs `attempt_login` and hands a successful session to the
//! `SessionContext`, after which the router guard takes over.

use leptos::prelude::*;

use crate::components::role_toggle::RoleToggle;
use crate::net::types::Role;
use crate::state::login::LoginState;
use crate::state::session::SessionContext;

pub const TITLE: &str = "EPICAL LAYOUTS";
pub const SUBTITLE: &str =
    "Access your HR workspace securely with your Google account. Choose your role to continue.";
pub const FOOTER_COPYRIGHT: &str = "© 2025 EPICAL LAYOUTS PVT LTD. All rights reserved.";
pub const FOOTER_TAGLINE: &str = "Secure • Professional • Efficient";

#[cfg(feature = "hydrate")]
async fn load_allow_list() -> Result<crate::state::allow_list::AllowList, crate::state::allow_list::AllowListError> {
    use crate::net::firebase::FirebaseConfig;
    use crate::net::firestore::{FirestoreRest, StoreError};

    let config = FirebaseConfig::from_document().ok_or(StoreError::Unavailable)?;
    crate::state::allow_list::init_allow_list(&FirestoreRest::new(&config)).await
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let state = RwSignal::new(LoginState::default());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = load_allow_list().await;
        state.update(|s| s.roles_loaded(result));
    });

    let selected = Signal::derive(move || state.with(|s| s.role));
    let on_role_change = Callback::new(move |role: Role| state.update(|s| s.role = role));

    let on_login = move |_| {
        let mut started = false;
        state.update(|s| started = s.begin());
        if !started {
            return;
        }
        let role = state.with_untracked(|s| s.role);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::state::login::attempt_login(&crate::net::firebase::FirebaseAuth, role).await;
            state.update(|s| s.finish(&result));
            if let Ok(new_session) = result {
                leptos::logging::log!("signed in as {role}");
                session.login(new_session);
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (role, session);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-card__logo" aria-hidden="true"></div>
                <h1>{TITLE}</h1>
                <p class="login-card__subtitle">{SUBTITLE}</p>
                <RoleToggle selected=selected on_change=on_role_change/>
                <Show when=move || state.with(|s| !s.error.is_empty())>
                    <p class="login-message login-message--error">{move || state.with(|s| s.error.clone())}</p>
                </Show>
                <button
                    type="button"
                    class="login-button"
                    disabled=move || state.with(|s| s.loading)
                    on:click=on_login
                >
                    {move || state.with(LoginState::button_label)}
                </button>
                <footer class="login-card__footer">
                    <p>{FOOTER_COPYRIGHT}</p>
                    <p>{FOOTER_TAGLINE}</p>
                </footer>
            </div>
        </div>
    }
}
