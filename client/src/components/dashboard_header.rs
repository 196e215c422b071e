//! Dashboard title bar with the logout control.

#[cfg(test)]
#[path = "dashboard_header_test.rs"]
mod dashboard_header_test;

use leptos::prelude::*;

/// Greeting line shown under the dashboard header.
pub fn welcome_message(display_name: &str) -> String {
    format!("Welcome, {display_name}")
}

#[component]
pub fn DashboardHeader(title: &'static str, on_logout: Callback<()>) -> impl IntoView {
    view! {
        <header class="dashboard__header">
            <h1>{title}</h1>
            <button type="button" class="dashboard__logout" on:click=move |_| on_logout.run(())>
                "Logout"
            </button>
        </header>
    }
}
