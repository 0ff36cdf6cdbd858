//! Pages whose content lives outside the session layer.
//!
//! These routes exist so the guard and navigation can be exercised end to
//! end; each renders a titled placeholder.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use session::nav::LANDING_PATH;

#[component]
fn Section(title: &'static str, blurb: &'static str) -> impl IntoView {
    view! {
        <div class="section-page">
            <h1>{title}</h1>
            <p>{blurb}</p>
        </div>
    }
}

#[component]
pub fn StudentInternshipsPage() -> impl IntoView {
    view! { <Section title="Internships" blurb="Browse open internships."/> }
}

#[component]
pub fn StudentApplicationsPage() -> impl IntoView {
    view! { <Section title="Applications" blurb="Track the internships you applied to."/> }
}

#[component]
pub fn CompanyInternshipsPage() -> impl IntoView {
    view! { <Section title="Manage Internships" blurb="Your posted internships."/> }
}

#[component]
pub fn CreateInternshipPage() -> impl IntoView {
    view! { <Section title="Post an Internship" blurb="Describe the role you are hiring for."/> }
}

#[component]
pub fn StudentSearchPage() -> impl IntoView {
    view! { <Section title="Find Students" blurb="Search student profiles."/> }
}

#[component]
pub fn MessagesPage() -> impl IntoView {
    view! { <Section title="Messages" blurb="Conversations between students and companies."/> }
}

#[component]
pub fn InternshipDetailsPage() -> impl IntoView {
    let params = use_params_map();
    let id = move || params.get().get("id").unwrap_or_default();

    view! {
        <div class="section-page">
            <h1>"Internship"</h1>
            <p class="section-page__id">"Posting " {id}</p>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="section-page">
            <h1>"Page not found"</h1>
            <a href=LANDING_PATH>"Back to the start"</a>
        </div>
    }
}
