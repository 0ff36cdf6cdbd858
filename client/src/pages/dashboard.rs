//! Role dashboards shown after login.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use session::Role;

use crate::components::site_header::role_links;
use crate::state::auth::expect_auth;

pub fn greeting(name: &str, role: Role) -> String {
    match role {
        Role::Company => format!("Welcome back, {name}. Review your postings and find candidates."),
        Role::Student | Role::Admin => format!("Welcome back, {name}. Find your next internship."),
    }
}

#[component]
fn Dashboard(role: Role) -> impl IntoView {
    let auth = expect_auth();
    let text = move || {
        let name = auth.session.get().user().map(|u| u.display_name.clone()).unwrap_or_default();
        greeting(&name, role)
    };

    view! {
        <div class="dashboard">
            <h1>"Dashboard"</h1>
            <p class="dashboard__greeting">{text}</p>
            <ul class="dashboard__links">
                {role_links(role)
                    .iter()
                    .skip(1)
                    .map(|(label, href)| view! { <li><a href=*href>{*label}</a></li> })
                    .collect_view()}
            </ul>
        </div>
    }
}

#[component]
pub fn StudentDashboard() -> impl IntoView {
    view! { <Dashboard role=Role::Student/> }
}

#[component]
pub fn CompanyDashboard() -> impl IntoView {
    view! { <Dashboard role=Role::Company/> }
}
