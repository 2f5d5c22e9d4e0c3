//! Dashboard: the authenticated landing route.
//!
//! Lists the modules the signed-in user holds any permission for.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::pages::modules::module_title;
use crate::routes::{RouteDescriptor, module_routes};
use crate::state::auth::AuthState;
use crate::state::gate::Gate;
use crate::util::store::CookieStore;

/// Modules where the user holds at least one of the route's permissions.
pub fn accessible_modules(gate: &Gate) -> Vec<&'static RouteDescriptor> {
    module_routes()
        .filter(|route| gate.check_any(route.required_permissions, None))
        .collect()
}

pub fn greeting(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => format!("Welcome, {name}"),
        _ => "Welcome".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let modules = Memo::new(move |_| {
        auth.with(|s| s.revision);
        accessible_modules(&Gate::load(&CookieStore))
    });

    view! {
        <section class="dashboard">
            <h1>{move || greeting(auth.with(|s| s.user.as_ref().map(|u| u.name.clone())).as_deref())}</h1>
            <Show
                when=move || !modules.get().is_empty()
                fallback=|| view! { <p>"No modules are assigned to your account yet."</p> }
            >
                <ul class="dashboard__modules">
                    {move || {
                        modules
                            .get()
                            .into_iter()
                            .map(|route| {
                                view! {
                                    <li>
                                        <A href=route.path>{module_title(route.view)}</A>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </section>
    }
}
