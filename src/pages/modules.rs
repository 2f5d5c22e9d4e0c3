//! Module pages (fund sources, WFPs, PPMPs, APPs).
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page reads the permission gate for its route's required permissions,
//! shows what the user may do and for which offices, and lists the module's
//! records through the HTTP helper.

#[cfg(test)]
#[path = "modules_test.rs"]
mod modules_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use serde::Deserialize;
use serde_json::Value;

use crate::app::PortalClient;
use crate::config::PortalConfig;
use crate::routes::{RouteDescriptor, ViewKind, route_for};
use crate::state::auth::AuthState;
use crate::state::gate::{Gate, parse_office_id};
use crate::util::formatter::{format_currency, format_date, parse_timestamp};
use crate::util::store::CookieStore;

pub fn module_title(view: ViewKind) -> &'static str {
    match view {
        ViewKind::Dashboard => "Dashboard",
        ViewKind::FundSources => "Fund Sources",
        ViewKind::Wfps => "Work and Financial Plans",
        ViewKind::Ppmps => "Project Procurement Management Plans",
        ViewKind::Apps => "Annual Procurement Plans",
        ViewKind::Forbidden => "Forbidden",
        ViewKind::NotFound => "Not Found",
        ViewKind::Conflict => "Conflict",
        ViewKind::ServerError => "Server Error",
    }
}

/// API resource behind a module route (`/wfps` → `wfps`).
pub fn module_resource(route: &RouteDescriptor) -> &'static str {
    route.path.trim_start_matches('/')
}

/// What the current user may do in a module.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleAccess {
    pub can_manage: bool,
    pub can_evaluate_l1: bool,
    pub can_evaluate_l2: bool,
    pub offices: Vec<i64>,
}

impl ModuleAccess {
    pub fn any(&self) -> bool {
        self.can_manage || self.can_evaluate_l1 || self.can_evaluate_l2
    }
}

/// Office id from the `?office=` query parameter; anything without a
/// leading integer is no filter.
pub fn office_filter(raw: Option<&str>) -> Option<i64> {
    raw.and_then(parse_office_id)
}

/// Access to `route` for the user, limited to `office` when one is given.
pub fn module_access(gate: &Gate, route: &RouteDescriptor, office: Option<i64>) -> ModuleAccess {
    let holds = |suffix: &str| {
        route
            .required_permissions
            .iter()
            .find(|name| name.ends_with(suffix))
            .is_some_and(|name| gate.check_one(name, office))
    };
    ModuleAccess {
        can_manage: holds(":manage"),
        can_evaluate_l1: holds(":eval_l1"),
        can_evaluate_l2: holds(":eval_l2"),
        offices: gate.offices_of_any(route.required_permissions),
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ModuleRecord {
    pub id: i64,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Accept either a bare array or a paginated `{ "data": [...] }` body.
/// Entries that do not decode are skipped.
pub fn parse_module_records(body: &Value) -> Vec<ModuleRecord> {
    let items = match body {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };
    items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect()
}

/// Display cells for a record: title, amount, last update.
pub fn record_cells(record: &ModuleRecord) -> (String, String, String) {
    let amount = record.amount.map(format_currency).unwrap_or_default();
    let updated = match record.updated_at.as_deref() {
        Some(raw) => parse_timestamp(raw).map_or_else(|_| raw.to_owned(), |ts| format_date(&ts)),
        None => String::new(),
    };
    (record.title.clone(), amount, updated)
}

#[component]
pub fn ModulePage(kind: ViewKind) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let client = expect_context::<StoredValue<PortalClient, LocalStorage>>();
    let config = expect_context::<PortalConfig>();
    let route = route_for(kind);
    let query = use_query_map();
    let office = Memo::new(move |_| query.with(|q| office_filter(q.get("office").as_deref())));

    let access = Memo::new(move |_| {
        // Re-read the gate after every exchange.
        auth.with(|s| s.revision);
        module_access(&Gate::load(&CookieStore), route, office.get())
    });

    let records = RwSignal::new(Vec::<ModuleRecord>::new());
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "csr")]
    {
        let url = crate::net::api::endpoint(&config.api_url, module_resource(route));
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            client
                .get_record(
                    &url,
                    move |resp| records.set(parse_module_records(&resp.body)),
                    Some(Box::new(move |e| error.set(Some(e.to_string())))),
                )
                .await;
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (client, config);
    }

    view! {
        <section class="module-page">
            <h1>{module_title(kind)}</h1>
            {move || office.get().map(|id| view! { <p class="module-page__filter">{format!("Office {id}")}</p> })}
            <Show
                when=move || access.get().any()
                fallback=|| view! { <p class="module-page__denied">"You do not have access to this module."</p> }
            >
                <ul class="module-page__access">
                    <Show when=move || access.get().can_manage>
                        <li>"Manage"</li>
                    </Show>
                    <Show when=move || access.get().can_evaluate_l1>
                        <li>"Evaluate (level 1)"</li>
                    </Show>
                    <Show when=move || access.get().can_evaluate_l2>
                        <li>"Evaluate (level 2)"</li>
                    </Show>
                </ul>
                <p class="module-page__offices">
                    {move || {
                        let offices = access.get().offices;
                        if offices.is_empty() {
                            "All offices".to_owned()
                        } else {
                            let ids: Vec<String> = offices.iter().map(ToString::to_string).collect();
                            format!("Offices: {}", ids.join(", "))
                        }
                    }}
                </p>
                <Show when=move || error.get().is_some()>
                    <p class="module-page__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <table class="module-page__records">
                    <tbody>
                        <For each=move || records.get() key=|r| r.id let:record>
                            {
                                let (title, amount, updated) = record_cells(&record);
                                view! {
                                    <tr>
                                        <td>{title}</td>
                                        <td class="amount">{amount}</td>
                                        <td>{updated}</td>
                                    </tr>
                                }
                            }
                        </For>
                    </tbody>
                </table>
            </Show>
        </section>
    }
}

#[component]
pub fn FundSourcesPage() -> impl IntoView {
    view! { <ModulePage kind=ViewKind::FundSources/> }
}

#[component]
pub fn WfpsPage() -> impl IntoView {
    view! { <ModulePage kind=ViewKind::Wfps/> }
}

#[component]
pub fn PpmpsPage() -> impl IntoView {
    view! { <ModulePage kind=ViewKind::Ppmps/> }
}

#[component]
pub fn AppsPage() -> impl IntoView {
    view! { <ModulePage kind=ViewKind::Apps/> }
}
