//! Error views for statuses the response interceptor maps in-app.

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;

use leptos::prelude::*;
use leptos_router::components::A;

/// Heading and explanation for an error status. Unmapped statuses fall back
/// to the not-found copy.
pub fn error_copy(status: u16) -> (&'static str, &'static str) {
    match status {
        403 => ("Forbidden", "You do not have permission to view this page."),
        409 => ("Conflict", "The record was changed by someone else. Reload and try again."),
        500 => ("Server Error", "Something went wrong on our end. Please try again later."),
        _ => ("Page Not Found", "The page you are looking for does not exist."),
    }
}

#[component]
pub fn ErrorPage(status: u16) -> impl IntoView {
    let (title, message) = error_copy(status);
    let code = if matches!(status, 403 | 409 | 500) { status } else { 404 };
    view! {
        <section class="error-page">
            <p class="error-page__code">{code}</p>
            <h1>{title}</h1>
            <p>{message}</p>
            <A href="/">"Back to dashboard"</A>
        </section>
    }
}
