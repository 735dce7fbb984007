//! Root application component with routing and context providers.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::route_gate::{ProtectedRoute, PublicOnlyRoute};
use crate::config::PortalConfig;
use crate::gateway;
use crate::pages::{
    dashboard::DashboardPage, forgot_password::ForgotPasswordPage, login::LoginPage, register::RegisterPage,
    reset_password::ResetPasswordPage,
};
use crate::session::controller::SessionController;
#[cfg(feature = "hydrate")]
use crate::session::storage::BrowserStore;
use crate::session::storage::KeyValueStore;
#[cfg(not(feature = "hydrate"))]
use crate::session::storage::MemoryStore;
use crate::session::token_store::TokenStore;
use crate::util::auth::DASHBOARD_PATH;

/// Context handle for the session controller. The controller is
/// single-threaded, so it lives in local arena storage.
pub type SessionHandle = StoredValue<Rc<SessionController>, LocalStorage>;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

fn session_backend() -> Rc<dyn KeyValueStore> {
    #[cfg(feature = "hydrate")]
    {
        Rc::new(BrowserStore)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Rc::new(MemoryStore::new())
    }
}

/// Root application component.
///
/// Builds the session controller once, mirrors its snapshots into an
/// `RwSignal<AuthState>`, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = PortalConfig::from_build_env().unwrap_or_else(|e| {
        log::warn!("{e}; falling back to default portal config");
        PortalConfig::default()
    });
    let store = Rc::new(TokenStore::new(session_backend()));
    let gateway = gateway::connect(&config, store.clone());
    let controller = Rc::new(SessionController::new(gateway, store));

    let auth = RwSignal::new(controller.snapshot());
    controller.subscribe(move |state| auth.set(state.clone()));
    let session: SessionHandle = StoredValue::new_local(controller);

    provide_context(auth);
    provide_context(session);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let controller = session.get_value();
        controller.bootstrap().await;
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/loan-portal.css"/>
        <Title text="Loan Assessment Portal"/>

        <Router>
            <Routes fallback=|| view! { <Redirect path=DASHBOARD_PATH/> }>
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <PublicOnlyRoute><LoginPage/></PublicOnlyRoute> }
                />
                <Route
                    path=StaticSegment("register")
                    view=|| view! { <PublicOnlyRoute><RegisterPage/></PublicOnlyRoute> }
                />
                <Route
                    path=StaticSegment("forgot-password")
                    view=|| view! { <PublicOnlyRoute><ForgotPasswordPage/></PublicOnlyRoute> }
                />
                <Route
                    path=StaticSegment("reset-password")
                    view=|| view! { <PublicOnlyRoute><ResetPasswordPage/></PublicOnlyRoute> }
                />
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                />
                <Route path=StaticSegment("") view=|| view! { <Redirect path=DASHBOARD_PATH/> }/>
            </Routes>
        </Router>
    }
}
