//! Dashboard landing page for a signed-in user.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::app::SessionHandle;
use crate::net::types::User;
use crate::state::auth::{AuthState, MutationKind};

const UPCOMING_TOOLS: [(&str, &str); 4] = [
    ("Apply for a Loan", "Start your loan application process with our streamlined form."),
    ("View Applications", "Track the status of your existing loan applications."),
    ("Assessment Tools", "Access risk assessment and evaluation tools."),
    ("Reports & Analytics", "View detailed reports and analytics on loan performance."),
];

fn welcome_line(user: Option<&User>) -> String {
    match user {
        Some(user) => format!("Welcome back, {}", user.full_name()),
        None => "Welcome back".to_owned(),
    }
}

fn status_label(user: &User) -> &'static str {
    if user.is_active { "Active" } else { "Inactive" }
}

fn sign_out_label(pending: bool) -> &'static str {
    if pending { "Signing out..." } else { "Sign out" }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    #[cfg(feature = "hydrate")]
    let session = expect_context::<SessionHandle>();

    let user = Memo::new(move |_| auth.with(|s| s.user.clone()));
    let signing_out = Memo::new(move |_| auth.with(|s| s.is_pending(MutationKind::Logout)));

    let on_logout = move |_| {
        if signing_out.get_untracked() {
            return;
        }
        // Logout always ends signed out; the route gate takes it from there.
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let controller = session.get_value();
            let _ = controller.logout().await;
        });
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <div>
                    <h1>"Loan Assessment Portal"</h1>
                    <p class="dashboard-page__welcome">{move || user.with(|u| welcome_line(u.as_ref()))}</p>
                </div>
                <button class="btn btn--outline" on:click=on_logout disabled=move || signing_out.get()>
                    {move || sign_out_label(signing_out.get())}
                </button>
            </header>

            <main class="dashboard-page__main">
                {move || {
                    user.get()
                        .map(|u| {
                            view! {
                                <div class="dashboard-page__cards">
                                    <section class="dashboard-card">
                                        <h2 class="dashboard-card__title">"Profile"</h2>
                                        <div class="dashboard-card__value">{u.full_name()}</div>
                                        <p class="dashboard-card__hint">{u.email.clone()}</p>
                                    </section>
                                    <section class="dashboard-card">
                                        <h2 class="dashboard-card__title">"Role"</h2>
                                        <div class="dashboard-card__value">{u.role.label()}</div>
                                        <p class="dashboard-card__hint">"Access level"</p>
                                    </section>
                                    <section class="dashboard-card">
                                        <h2 class="dashboard-card__title">"Status"</h2>
                                        <div class="dashboard-card__value">{status_label(&u)}</div>
                                        <p class="dashboard-card__hint">"Account status"</p>
                                    </section>
                                </div>
                            }
                        })
                }}

                <section class="dashboard-page__getting-started">
                    <h2>"Getting Started"</h2>
                    <p>"Welcome to the Loan Assessment Portal. Here's what you can do:"</p>
                    <div class="dashboard-page__tools">
                        {UPCOMING_TOOLS
                            .iter()
                            .map(|(title, blurb)| {
                                view! {
                                    <div class="dashboard-tool">
                                        <h3>{*title}</h3>
                                        <p>{*blurb}</p>
                                        <button class="btn btn--outline btn--small" disabled=true>
                                            "Coming Soon"
                                        </button>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </div>
                </section>
            </main>
        </div>
    }
}
