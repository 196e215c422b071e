//! Two-option role selector shown above the sign-in button.

#[cfg(test)]
#[path = "role_toggle_test.rs"]
mod role_toggle_test;

use leptos::prelude::*;

use crate::net::types::Role;

/// Options in display order.
pub const ROLE_OPTIONS: [Role; 2] = [Role::Employee, Role::Admin];

fn option_class(active: bool) -> &'static str {
    if active { "role-toggle__option role-toggle__option--active" } else { "role-toggle__option" }
}

#[component]
pub fn RoleToggle(#[prop(into)] selected: Signal<Role>, on_change: Callback<Role>) -> impl IntoView {
    view! {
        <div class="role-toggle" role="tablist">
            {ROLE_OPTIONS
                .into_iter()
                .map(|role| {
                    view! {
                        <button
                            type="button"
                            role="tab"
                            class=move || option_class(selected.get() == role)
                            aria-selected=move || (selected.get() == role).to_string()
                            on:click=move |_| on_change.run(role)
                        >
                            {role.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
