//! Public landing page.

use leptos::prelude::*;
use session::nav::{LOGIN_PATH, REGISTER_PATH, home_path};

use crate::state::auth::expect_auth;

#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = expect_auth();

    view! {
        <div class="landing">
            <h1>"InternMatch"</h1>
            <p class="landing__tagline">"Students meet the companies hiring interns."</p>
            {move || match auth.session.get().role() {
                Some(role) => view! {
                    <a class="btn btn--primary" href=home_path(role)>"Go to your dashboard"</a>
                }
                .into_any(),
                None => view! {
                    <div class="landing__actions">
                        <a class="btn btn--primary" href=REGISTER_PATH>"Get started"</a>
                        <a class="btn" href=LOGIN_PATH>"Sign in"</a>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
