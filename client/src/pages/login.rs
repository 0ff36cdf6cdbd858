//! Login page: email + password against the auth service.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::nav::REGISTER_PATH;

use crate::state::auth::expect_auth;
use crate::util::auth::follow;

/// Trim the email and require both fields.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_auth();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(input) => input,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        info.set(String::new());

        let container = auth.container();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            if let Ok(navigation) = container.login(&email_value, &password_value).await {
                follow(navigation, &navigate);
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
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign in"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary" type="submit" disabled=move || auth.session.get().is_loading()>
                        {move || if auth.session.get().is_loading() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || !message().is_empty()>
                    <p class="auth-message">{message}</p>
                </Show>
                <p class="auth-card__footer">
                    "No account yet? "
                    <a href=REGISTER_PATH>"Register"</a>
                </p>
            </div>
        </div>
    }
}
