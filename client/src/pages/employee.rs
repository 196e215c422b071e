//! Employee dashboard placeholder.

use leptos::prelude::*;

use crate::components::dashboard_header::{DashboardHeader, welcome_message};
use crate::net::types::SessionUser;

#[component]
pub fn EmployeePage(user: SessionUser, on_logout: Callback<()>) -> impl IntoView {
    view! {
        <div class="dashboard dashboard--employee">
            <DashboardHeader title="Employee Dashboard" on_logout=on_logout/>
            <p>{welcome_message(&user.display_name)}</p>
        </div>
    }
}
