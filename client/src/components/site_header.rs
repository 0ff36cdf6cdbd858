//! Top bar with the signed-in user's links and a logout button.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered above every page. Links follow the session role so students and
//! companies only see their own sections.

#[cfg(test)]
#[path = "site_header_test.rs"]
mod site_header_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::guard::{COMPANY_INTERNSHIPS_PATH, COMPANY_STUDENTS_PATH, STUDENT_APPLICATIONS_PATH, STUDENT_INTERNSHIPS_PATH};
use session::nav::{self, home_path};
use session::{Role, Session};

use crate::state::auth::expect_auth;
use crate::util::auth::follow;

/// Header links for a signed-in role: (label, path).
pub fn role_links(role: Role) -> &'static [(&'static str, &'static str)] {
    match role {
        Role::Student => &[
            ("Dashboard", nav::STUDENT_DASHBOARD_PATH),
            ("Internships", STUDENT_INTERNSHIPS_PATH),
            ("Applications", STUDENT_APPLICATIONS_PATH),
            ("Messages", session::guard::MESSAGES_PATH),
            ("Profile", nav::STUDENT_PROFILE_PATH),
        ],
        Role::Company => &[
            ("Dashboard", nav::COMPANY_DASHBOARD_PATH),
            ("Internships", COMPANY_INTERNSHIPS_PATH),
            ("Students", COMPANY_STUDENTS_PATH),
            ("Messages", session::guard::MESSAGES_PATH),
            ("Profile", nav::COMPANY_PROFILE_PATH),
        ],
        Role::Admin => &[("Messages", session::guard::MESSAGES_PATH)],
    }
}

/// Where the brand link points for this session.
pub fn brand_href(session: &Session) -> &'static str {
    session.role().map_or(nav::LANDING_PATH, home_path)
}

#[component]
pub fn SiteHeader() -> impl IntoView {
    let auth = expect_auth();
    let navigate = use_navigate();

    let on_logout = move |_| {
        let navigation = auth.logout();
        follow(Some(navigation), &navigate);
    };

    let display_name = move || {
        auth.session
            .get()
            .user()
            .map(|u| u.display_name.clone())
            .unwrap_or_default()
    };

    view! {
        <header class="site-header">
            <a href=move || brand_href(&auth.session.get()) class="site-header__brand">"InternMatch"</a>
            <nav class="site-header__links">
                {move || match auth.session.get().role() {
                    Some(role) => role_links(role)
                        .iter()
                        .map(|(label, href)| view! { <a href=*href>{*label}</a> })
                        .collect_view()
                        .into_any(),
                    None => view! {
                        <a href=nav::LOGIN_PATH>"Sign in"</a>
                        <a href=nav::REGISTER_PATH>"Register"</a>
                    }
                    .into_any(),
                }}
            </nav>
            <span class="site-header__spacer"></span>
            <span class="site-header__user">{display_name}</span>
            <button
                class="btn site-header__logout"
                class:hidden=move || !auth.session.get().is_authenticated()
                on:click=on_logout
                title="Logout"
            >
                "Log out"
            </button>
        </header>
    }
}
