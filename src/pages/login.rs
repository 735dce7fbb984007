//! Sign-in page for e-mail and password.

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::app::SessionHandle;
use crate::components::auth_layout::{AuthLayout, FieldMessage, FormAlert};
use crate::state::auth::{AuthState, MutationKind};
use crate::util::auth::{FORGOT_PASSWORD_PATH, REGISTER_PATH};
use crate::util::validation::{ValidationErrors, validate_login};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    #[cfg(feature = "hydrate")]
    let session = expect_context::<SessionHandle>();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::default());
    let busy = Memo::new(move |_| auth.with(|s| s.is_pending(MutationKind::Login)));
    let failure = Signal::derive(move || auth.with(|s| super::failure_text(s, MutationKind::Login)));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = match validate_login(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(ValidationErrors::default());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let controller = session.get_value();
            // Failure lands in the login slot; the gate handles success.
            let _ = controller.login(credentials).await;
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = credentials;
    };

    view! {
        <AuthLayout title="Welcome back" description="Sign in to your account to continue">
            <form class="auth-form" on:submit=on_submit>
                <FormAlert message=failure/>
                <label class="auth-form__label" for="email">"Email"</label>
                <input
                    id="email"
                    class="auth-form__input"
                    type="email"
                    autocomplete="email"
                    placeholder="Enter your email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <FieldMessage errors=errors field="email"/>
                <div class="auth-form__row">
                    <label class="auth-form__label" for="password">"Password"</label>
                    <a class="auth-form__link" href=FORGOT_PASSWORD_PATH>"Forgot password?"</a>
                </div>
                <input
                    id="password"
                    class="auth-form__input"
                    type="password"
                    autocomplete="current-password"
                    placeholder="Enter your password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <FieldMessage errors=errors field="password"/>
                <button class="auth-form__submit" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
                <p class="auth-form__footer">
                    "Don't have an account? "
                    <a class="auth-form__link" href=REGISTER_PATH>"Sign up"</a>
                </p>
            </form>
        </AuthLayout>
    }
}
