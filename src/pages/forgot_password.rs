//! Password recovery request page.
//!
//! The confirmation is shown for any well-formed address; whether an account
//! exists is never revealed.

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::app::SessionHandle;
use crate::components::auth_layout::{AuthLayout, FieldMessage, FormAlert};
use crate::state::auth::{AuthState, MutationKind, MutationState};
use crate::util::auth::LOGIN_PATH;
use crate::util::validation::{ValidationErrors, validate_forgot_password};

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    #[cfg(feature = "hydrate")]
    let session = expect_context::<SessionHandle>();

    let email = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::default());
    let submitted = RwSignal::new(false);
    let busy = Memo::new(move |_| auth.with(|s| s.is_pending(MutationKind::ForgotPassword)));
    let failure = Signal::derive(move || {
        if submitted.get() { auth.with(|s| super::failure_text(s, MutationKind::ForgotPassword)) } else { None }
    });
    let sent = Memo::new(move |_| {
        submitted.get() && auth.with(|s| matches!(s.mutation(MutationKind::ForgotPassword), MutationState::Succeeded { .. }))
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let data = match validate_forgot_password(&email.get_untracked()) {
            Ok(data) => data,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(ValidationErrors::default());
        submitted.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let controller = session.get_value();
            let _ = controller.forgot_password(data).await;
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = data;
    };

    view! {
        <AuthLayout title="Forgot your password?" description="Enter your email and we'll send you reset instructions">
            <Show
                when=move || sent.get()
                fallback=move || {
                    view! {
                        <form class="auth-form" on:submit=on_submit>
                            <FormAlert message=failure/>
                            <label class="auth-form__label" for="email">"Email Address"</label>
                            <input
                                id="email"
                                class="auth-form__input"
                                type="email"
                                autocomplete="email"
                                placeholder="Enter your email address"
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                            />
                            <FieldMessage errors=errors field="email"/>
                            <p class="auth-form__hint">"We'll send password reset instructions to this email address."</p>
                            <button class="auth-form__submit" type="submit" disabled=move || busy.get()>
                                {move || if busy.get() { "Sending..." } else { "Send Reset Instructions" }}
                            </button>
                            <a class="auth-form__link" href=LOGIN_PATH>"Back to Sign In"</a>
                        </form>
                    }
                }
            >
                <div class="auth-confirmation">
                    <h3>"Check your email"</h3>
                    <p>
                        "We've sent password reset instructions to your email address. "
                        "Please check your inbox and follow the link to reset your password."
                    </p>
                    <p class="auth-confirmation__hint">"Didn't receive the email? Check your spam folder or try again."</p>
                    <button class="auth-form__secondary" on:click=move |_| submitted.set(false)>"Resend Email"</button>
                    <a class="auth-form__link" href=LOGIN_PATH>"Back to Sign In"</a>
                </div>
            </Show>
        </AuthLayout>
    }
}
