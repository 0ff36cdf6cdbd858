//! Profile page shared by students and companies.
//!
//! New accounts land here right after registration; later visits edit the
//! same fields.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use session::{Role, UserPatch, UserRecord};

use crate::state::auth::expect_auth;

/// Build a patch holding only the fields that differ from `current`.
pub fn profile_patch(current: &UserRecord, name: &str, email: &str) -> Result<UserPatch, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() {
        return Err("Name and email cannot be empty.");
    }
    let patch = UserPatch {
        display_name: (name != current.display_name).then(|| name.to_owned()),
        email: (email != current.email).then(|| email.to_owned()),
    };
    if patch.is_empty() {
        return Err("Nothing to save.");
    }
    Ok(patch)
}

pub fn profile_heading(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Company) => "Company Profile",
        Some(Role::Student) => "Student Profile",
        Some(Role::Admin) | None => "Profile",
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_auth();
    let initial = auth.session.get_untracked().user().cloned();
    let name = RwSignal::new(initial.as_ref().map(|u| u.display_name.clone()).unwrap_or_default());
    let email = RwSignal::new(initial.map(|u| u.email).unwrap_or_default());
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = auth.session.get_untracked().user().cloned() else {
            return;
        };
        let patch = match profile_patch(&current, &name.get(), &email.get()) {
            Ok(patch) => patch,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        info.set(String::new());

        let container = auth.container();
        leptos::task::spawn_local(async move {
            if container.update_user(&patch).await.is_ok() {
                info.set("Saved.".to_owned());
            }
        });
    };

    let message = move || {
        let local = info.get();
        if local.is_empty() {
            auth.session.get().error().unwrap_or_default().to_owned()
        } else {
            local
        }
    };

    view! {
        <div class="profile-page">
            <h1>{move || profile_heading(auth.session.get().role())}</h1>
            <form class="profile-form" on:submit=on_submit>
                <label class="profile-form__label">
                    {move || if auth.session.get().role() == Some(Role::Company) { "Company name" } else { "Full name" }}
                    <input
                        class="auth-input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class="profile-form__label">
                    "Email"
                    <input
                        class="auth-input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <button class="btn btn--primary" type="submit" disabled=move || auth.session.get().is_loading()>
                    {move || if auth.session.get().is_loading() { "Saving..." } else { "Save Changes" }}
                </button>
            </form>
            <Show when=move || !message().is_empty()>
                <p class="auth-message">{message}</p>
            </Show>
        </div>
    }
}
