//! Route wrappers that enforce sign-in state.
//!
//! The session controller applies the `util::auth` rules to the token store;
//! these components only turn its decisions into markup and navigation. A protected view remembers the requested location
//! on the session controller before bouncing to `/login`, and a public-only
//! page consumes it once the user is signed in.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::SessionHandle;
use crate::state::auth::AuthState;
use crate::util::auth::{GateDecision, post_login_target};

fn replace() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Renders `children` only for a signed-in user.
///
/// The decision is read from the token store on every evaluation; the
/// `AuthState` signal and the location only tell it when to look again. A
/// lapsed access token is refreshed silently before anything redirects.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<SessionHandle>();
    let location = use_location();
    let navigate = use_navigate();

    let requested = Memo::new(move |_| {
        let path = location.pathname.get();
        let search = location.search.get();
        match search.as_str() {
            "" => path,
            s if s.starts_with('?') => format!("{path}{s}"),
            s => format!("{path}?{s}"),
        }
    });

    let decision = Memo::new(move |_| {
        auth.track();
        let requested = requested.get();
        session.with_value(|controller| controller.protected_decision(&requested))
    });

    Effect::new(move || {
        auth.track();
        requested.track();
        let controller = session.get_value();
        if controller.needs_revalidation() {
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                controller.revalidate().await;
            });
            return;
        }
        if let GateDecision::Redirect { to, return_to } = decision.get() {
            log::debug!("protected route requires sign-in, redirecting to {to}");
            controller.remember_return_to(return_to);
            navigate(to, replace());
        }
    });

    move || match decision.get() {
        GateDecision::Loading => view! {
            <div class="route-gate route-gate--loading">
                <div class="route-gate__spinner" aria-hidden="true"></div>
                <p>"Loading..."</p>
            </div>
        }
        .into_any(),
        GateDecision::Render => children().into_any(),
        GateDecision::Redirect { .. } => ().into_any(),
    }
}

/// Sign-in and recovery pages. A signed-in user is sent on to the location a
/// protected route remembered, or the dashboard.
#[component]
pub fn PublicOnlyRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<SessionHandle>();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| {
        auth.track();
        session.with_value(|controller| controller.public_only_decision())
    });

    Effect::new(move || {
        if let GateDecision::Redirect { .. } = decision.get() {
            let target = session.with_value(|controller| post_login_target(controller.take_return_to()));
            navigate(&target, replace());
        }
    });

    move || match decision.get() {
        GateDecision::Redirect { .. } => ().into_any(),
        GateDecision::Loading | GateDecision::Render => children().into_any(),
    }
}
