//! Static route table.
//!
//! DESIGN
//! ======
//! Routes are declared once as `'static` descriptors. The auth guard reads
//! `requires_auth` and `required_permissions`; the latter only shapes which
//! office scopes are kept after an exchange; views enforce it through the
//! permission gate.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    FundSources,
    Wfps,
    Ppmps,
    Apps,
    Forbidden,
    NotFound,
    Conflict,
    ServerError,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    pub view: ViewKind,
    pub requires_auth: bool,
    pub required_permissions: &'static [&'static str],
}

impl RouteDescriptor {
    pub fn requires(&self, permission: &str) -> bool {
        self.required_permissions.contains(&permission)
    }
}

/// Path the dashboard is also reachable at.
pub const DASHBOARD_ALIAS: &str = "/";

pub static ROUTES: [RouteDescriptor; 9] = [
    RouteDescriptor {
        path: "/dashboard",
        name: "dashboard",
        view: ViewKind::Dashboard,
        requires_auth: true,
        required_permissions: &[],
    },
    RouteDescriptor {
        path: "/fund_sources",
        name: "fund sources",
        view: ViewKind::FundSources,
        requires_auth: true,
        required_permissions: &["fund_sources:manage"],
    },
    RouteDescriptor {
        path: "/wfps",
        name: "wfps",
        view: ViewKind::Wfps,
        requires_auth: true,
        required_permissions: &["wfps:manage", "wfps:eval_l1", "wfps:eval_l2"],
    },
    RouteDescriptor {
        path: "/ppmps",
        name: "ppmps",
        view: ViewKind::Ppmps,
        requires_auth: true,
        required_permissions: &["ppmps:manage", "ppmps:eval_l1", "ppmps:eval_l2"],
    },
    RouteDescriptor {
        path: "/apps",
        name: "apps",
        view: ViewKind::Apps,
        requires_auth: true,
        required_permissions: &["apps:manage", "apps:eval_l1", "apps:eval_l2"],
    },
    RouteDescriptor {
        path: "/403",
        name: "forbidden",
        view: ViewKind::Forbidden,
        requires_auth: false,
        required_permissions: &[],
    },
    RouteDescriptor {
        path: "/404",
        name: "not found",
        view: ViewKind::NotFound,
        requires_auth: false,
        required_permissions: &[],
    },
    RouteDescriptor {
        path: "/409",
        name: "conflict",
        view: ViewKind::Conflict,
        requires_auth: false,
        required_permissions: &[],
    },
    RouteDescriptor {
        path: "/500",
        name: "server error",
        view: ViewKind::ServerError,
        requires_auth: false,
        required_permissions: &[],
    },
];

/// Resolve a location pathname to its descriptor. A trailing slash is
/// ignored and `/` resolves to the dashboard.
pub fn resolve(path: &str) -> Option<&'static RouteDescriptor> {
    let trimmed = path.trim_end_matches('/');
    let path = if trimmed.is_empty() { DASHBOARD_ALIAS } else { trimmed };
    if path == DASHBOARD_ALIAS {
        return Some(route_for(ViewKind::Dashboard));
    }
    ROUTES.iter().find(|r| r.path == path)
}

pub fn route_for(view: ViewKind) -> &'static RouteDescriptor {
    ROUTES
        .iter()
        .find(|r| r.view == view)
        .unwrap_or(&ROUTES[0])
}

/// In-app error view for an HTTP status, if one exists.
pub fn error_path(status: u16) -> Option<&'static str> {
    match status {
        403 => Some("/403"),
        404 => Some("/404"),
        409 => Some("/409"),
        500 => Some("/500"),
        _ => None,
    }
}

/// Module routes shown in navigation (everything behind auth except the
/// dashboard itself).
pub fn module_routes() -> impl Iterator<Item = &'static RouteDescriptor> {
    ROUTES
        .iter()
        .filter(|r| r.requires_auth && r.view != ViewKind::Dashboard)
}
