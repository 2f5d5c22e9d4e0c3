//! Root application component with routing and context providers.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
    hooks::use_navigate,
};

use crate::components::auth_layout::AuthLayout;
use crate::config::PortalConfig;
use crate::net::http::{FetchTransport, HttpClient};
use crate::pages::dashboard::DashboardPage;
use crate::pages::errors::ErrorPage;
use crate::pages::modules::{AppsPage, FundSourcesPage, PpmpsPage, WfpsPage};
use crate::state::auth::AuthState;
use crate::util::guard::install_response_interceptor;
use crate::util::navigator::BrowserNavigator;
use crate::util::store::CookieStore;

/// HTTP client shared by every page.
pub type PortalClient = HttpClient<FetchTransport>;

/// Root application component.
///
/// Provides config, auth state, and the shared HTTP client, then sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = PortalConfig::from_build_env();
    let auth = RwSignal::new(AuthState::from_store(&CookieStore));
    let client: StoredValue<PortalClient, LocalStorage> = StoredValue::new_local(HttpClient::new(FetchTransport));

    provide_context(config);
    provide_context(auth);
    provide_context(client);

    view! {
        <Title text="Planning Portal"/>

        <Router>
            <ResponseInterceptor/>
            <Routes fallback=|| view! { <ErrorPage status=404/> }>
                <ParentRoute path=StaticSegment("") view=AuthLayout>
                    <Route path=StaticSegment("") view=DashboardPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("fund_sources") view=FundSourcesPage/>
                    <Route path=StaticSegment("wfps") view=WfpsPage/>
                    <Route path=StaticSegment("ppmps") view=PpmpsPage/>
                    <Route path=StaticSegment("apps") view=AppsPage/>
                </ParentRoute>
                <Route path=StaticSegment("403") view=|| view! { <ErrorPage status=403/> }/>
                <Route path=StaticSegment("404") view=|| view! { <ErrorPage status=404/> }/>
                <Route path=StaticSegment("409") view=|| view! { <ErrorPage status=409/> }/>
                <Route path=StaticSegment("500") view=|| view! { <ErrorPage status=500/> }/>
            </Routes>
        </Router>
    }
}

/// Installs the response interceptor once, inside the router so in-app
/// pushes can use its navigate handle. Renders nothing.
#[component]
fn ResponseInterceptor() -> impl IntoView {
    let client = expect_context::<StoredValue<PortalClient, LocalStorage>>();
    let config = expect_context::<PortalConfig>();
    let navigator = Rc::new(BrowserNavigator::new(use_navigate()));

    client.with_value(|client| {
        if !client.has_interceptor() {
            install_response_interceptor(client, navigator, config.portal_url.clone());
        }
    });
}
