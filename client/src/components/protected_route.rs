//! Guard wrapper rendered around every routed page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The requirement comes from the shared route table for the current path, so
//! adding a protected page means adding a row there, not touching the view.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use session::guard::{self, GuardDecision};

use crate::state::auth::expect_auth;
use crate::util::auth::{install_guard_redirect, settled_decision};

/// Render `children` only while the session satisfies the current route.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_auth();
    let location = use_location();
    let access = guard::access_for(&location.pathname.get_untracked());
    let navigate = use_navigate();
    install_guard_redirect(auth.session, access, move |path, options| navigate(path, options));

    // Memoised so children re-render only when the decision changes.
    let decision = Memo::new(move |previous: Option<&GuardDecision>| {
        settled_decision(previous.copied(), &auth.session.get(), access)
    });

    move || match decision.get() {
        GuardDecision::Allow => children().into_any(),
        GuardDecision::Pending => view! { <p class="guard-pending">"Loading..."</p> }.into_any(),
        GuardDecision::RedirectToLogin | GuardDecision::Forbidden { .. } => ().into_any(),
    }
}
