//! Avatar and display name of the signed-in user.

use leptos::prelude::*;

use crate::state::auth::AuthState;

/// Up to two uppercase initials, used when the avatar URL is empty.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[component]
pub fn UserBadge() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let user = move || auth.with(|s| s.user.clone());

    view! {
        {move || {
            user()
                .map(|user| {
                    let avatar = if user.avatar.is_empty() {
                        view! { <span class="user-badge__initials">{initials(&user.name)}</span> }.into_any()
                    } else {
                        view! { <img class="user-badge__avatar" src=user.avatar.clone() alt=""/> }.into_any()
                    };
                    view! {
                        <div class="user-badge">
                            {avatar}
                            <span class="user-badge__name">{user.name.clone()}</span>
                        </div>
                    }
                })
        }}
    }
}
