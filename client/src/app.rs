//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::protected_route::ProtectedRoute;
use crate::components::site_header::SiteHeader;
use crate::pages::dashboard::{CompanyDashboard, StudentDashboard};
use crate::pages::landing::LandingPage;
use crate::pages::login::LoginPage;
use crate::pages::profile::ProfilePage;
use crate::pages::register::RegisterPage;
use crate::pages::sections::{
    CompanyInternshipsPage, CreateInternshipPage, InternshipDetailsPage, MessagesPage, NotFoundPage,
    StudentApplicationsPage, StudentInternshipsPage, StudentSearchPage,
};
use crate::state::auth::AuthState;

/// Root application component.
///
/// Builds the session container, restores the stored session, and sets up
/// client-side routing. Every route renders through [`ProtectedRoute`],
/// which looks up its requirement in the shared route table.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthState::new();
    provide_context(auth);
    auth.start();

    view! {
        <Title text="InternMatch"/>

        <Router>
            <SiteHeader/>
            <main class="page">
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=StaticSegment("") view=LandingPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("404") view=NotFoundPage/>

                    <Route
                        path=(StaticSegment("student"), StaticSegment("dashboard"))
                        view=|| view! { <ProtectedRoute><StudentDashboard/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("student"), StaticSegment("profile"))
                        view=|| view! { <ProtectedRoute><ProfilePage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("student"), StaticSegment("internships"))
                        view=|| view! { <ProtectedRoute><StudentInternshipsPage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("student"), StaticSegment("applications"))
                        view=|| view! { <ProtectedRoute><StudentApplicationsPage/></ProtectedRoute> }
                    />

                    <Route
                        path=(StaticSegment("company"), StaticSegment("dashboard"))
                        view=|| view! { <ProtectedRoute><CompanyDashboard/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("company"), StaticSegment("profile"))
                        view=|| view! { <ProtectedRoute><ProfilePage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("company"), StaticSegment("internships"), StaticSegment("new"))
                        view=|| view! { <ProtectedRoute><CreateInternshipPage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("company"), StaticSegment("internships"))
                        view=|| view! { <ProtectedRoute><CompanyInternshipsPage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("company"), StaticSegment("students"))
                        view=|| view! { <ProtectedRoute><StudentSearchPage/></ProtectedRoute> }
                    />

                    <Route path=(StaticSegment("internships"), ParamSegment("id")) view=InternshipDetailsPage/>
                    <Route
                        path=StaticSegment("messages")
                        view=|| view! { <ProtectedRoute><MessagesPage/></ProtectedRoute> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
