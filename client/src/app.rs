//! Root application component with routing and the session context.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::net::firebase::{CONFIG_META_NAME, FirebaseConfig, bootstrap_script, sdk_script_urls};
use crate::pages::{admin::AdminPage, employee::EmployeePage, login::LoginPage};
use crate::state::session::SessionContext;
use crate::util::auth::{AppView, install_role_redirect, install_session_restore, is_root, resolve_view};

/// HTML shell rendered on the server for SSR + hydration.
///
/// `firebase` is embedded for the SDK bootstrap and the hydrated client.
pub fn shell(options: LeptosOptions, firebase: FirebaseConfig) -> impl IntoView {
    let [app_sdk, auth_sdk] = sdk_script_urls();

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=CONFIG_META_NAME content=firebase.to_meta_content()/>
                <script src=app_sdk></script>
                <script src=auth_sdk></script>
                <script inner_html=bootstrap_script()></script>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session context and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionContext::browser();
    provide_context(session);
    install_session_restore(session);

    view! {
        <Stylesheet id="leptos" href="/pkg/portal.css"/>
        <Title text="EPICAL LAYOUTS"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=GuardedView/>
                <Route path=StaticSegment("admin") view=GuardedView/>
                <Route path=StaticSegment("employee") view=GuardedView/>
            </Routes>
        </Router>
    }
}

/// Mounts whichever screen the guard allows for the current path.
///
/// Gated paths render nothing until the persisted session has been read, so
/// a returning user does not see the login screen flash first.
#[component]
fn GuardedView() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let pathname = use_location().pathname;
    install_role_redirect(session, pathname, use_navigate());

    let current_view = Memo::new(move |_| {
        let path = pathname.get();
        if !session.is_restored() && !is_root(&path) {
            return None;
        }
        Some(session.session_with(|s| resolve_view(&path, s)))
    });
    let on_logout = Callback::new(move |()| session.logout());

    move || {
        let user = session.get_untracked().map(|s| s.user);
        match (current_view.get(), user) {
            (None, _) => ().into_any(),
            (Some(AppView::AdminDashboard), Some(user)) => view! { <AdminPage user=user on_logout=on_logout/> }.into_any(),
            (Some(AppView::EmployeeDashboard), Some(user)) => view! { <EmployeePage user=user on_logout=on_logout/> }.into_any(),
            (Some(AppView::NotFound), _) => "Page not found.".into_any(),
            _ => view! { <LoginPage/> }.into_any(),
        }
    }
}
