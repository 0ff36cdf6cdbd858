//! Registration page: account details plus the student/company choice.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::Role;
use session::nav::LOGIN_PATH;

use crate::state::auth::expect_auth;
use crate::util::auth::follow;

/// Validated registration form values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Role chosen in the form's select. Only student and company are offered.
pub fn parse_role_choice(value: &str) -> Role {
    match value.parse() {
        Ok(Role::Company) => Role::Company,
        _ => Role::Student,
    }
}

pub fn validate_register_input(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
    role: Role,
) -> Result<RegisterInput, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Fill in name, email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(RegisterInput { name: name.to_owned(), email: email.to_owned(), password: password.to_owned(), role })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_auth();
    let navigate = use_navigate();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Student);
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let input = match validate_register_input(&name.get(), &email.get(), &password.get(), &confirm.get(), role.get()) {
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
            let result = container.register(&input.email, &input.password, &input.name, input.role).await;
            if let Ok(navigation) = result {
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
                <h1>"Create an account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <select
                        class="auth-input"
                        prop:value=move || role.get().as_str()
                        on:change=move |ev| role.set(parse_role_choice(&event_target_value(&ev)))
                    >
                        <option value="student">"I am a student"</option>
                        <option value="company">"I am hiring"</option>
                    </select>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder=move || if role.get() == Role::Company { "Company name" } else { "Full name" }
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
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
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Confirm password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary" type="submit" disabled=move || auth.session.get().is_loading()>
                        {move || if auth.session.get().is_loading() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <Show when=move || !message().is_empty()>
                    <p class="auth-message">{message}</p>
                </Show>
                <p class="auth-card__footer">
                    "Already registered? "
                    <a href=LOGIN_PATH>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
