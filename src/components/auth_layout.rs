//! Layout for every protected route: header chrome plus the auth guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Leptos' router has no before-resolve hook, so the guard runs from an effect
//! keyed on the location pathname. The nested route renders only after the
//! guard for that navigation has settled as authenticated.

use leptos::prelude::*;
use leptos_router::components::{A, Outlet};
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::PortalClient;
use crate::components::user_badge::UserBadge;
use crate::config::PortalConfig;
use crate::pages::modules::module_title;
use crate::routes::{RouteDescriptor, module_routes, resolve};
use crate::state::auth::AuthState;
use crate::util::guard::GuardState;
use crate::util::navigator::BrowserNavigator;

#[component]
pub fn AuthLayout() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let client = expect_context::<StoredValue<PortalClient, LocalStorage>>();
    let config = expect_context::<PortalConfig>();
    let navigator = BrowserNavigator::new(use_navigate());
    let location = use_location();

    Effect::new(move || {
        let path = location.pathname.get();
        let Some(route) = resolve(&path) else {
            return;
        };
        auth.update(AuthState::begin_exchange);
        spawn_guard(route, auth, client.get_value(), navigator.clone(), config.clone());
    });

    view! {
        <div class="portal">
            <header class="portal-header">
                <A href="/dashboard">"Planning Portal"</A>
                <nav class="portal-header__nav">
                    {module_routes()
                        .map(|route| view! { <A href=route.path>{module_title(route.view)}</A> })
                        .collect_view()}
                </nav>
                <UserBadge/>
            </header>
            <main class="portal-main">
                <Show
                    when=move || auth.with(|s| s.guard.allows_render())
                    fallback=move || {
                        if auth.with(AuthState::loading) {
                            view! { <p class="portal-loading">"Checking your session..."</p> }.into_any()
                        } else {
                            view! {
                                <p class="portal-error">
                                    {move || session_error_message(auth.with(|s| s.guard))}
                                </p>
                                <p class="portal-error__detail">{move || auth.with(|s| s.error.clone())}</p>
                            }
                            .into_any()
                        }
                    }
                >
                    <Outlet/>
                </Show>
            </main>
        </div>
    }
}

fn spawn_guard(
    route: &'static RouteDescriptor,
    auth: RwSignal<AuthState>,
    client: PortalClient,
    navigator: BrowserNavigator,
    config: PortalConfig,
) {
    #[cfg(feature = "csr")]
    {
        use crate::util::guard::run_guard;
        use crate::util::store::CookieStore;

        leptos::task::spawn_local(async move {
            let store = CookieStore;
            let result = run_guard(route, &store, &client, &navigator, &config).await;
            auth.update(|s| s.finish(&result, &store));
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (route, auth, client, navigator, config);
    }
}

/// Text shown in place of the outlet once the guard has settled without
/// letting the route render.
pub fn session_error_message(guard: GuardState) -> &'static str {
    match guard {
        GuardState::RedirectedToLogin => "Redirecting to sign in...",
        GuardState::RedirectedToError(_) => "Something went wrong loading this page.",
        _ => "Could not verify your session. Please try again.",
    }
}
