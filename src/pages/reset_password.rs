//! Reset-password page reached from the recovery e-mail link
//! (`/reset-password?token=...`).

#[cfg(test)]
#[path = "reset_password_test.rs"]
mod reset_password_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

#[cfg(feature = "hydrate")]
use crate::app::SessionHandle;
use crate::components::auth_layout::{AuthLayout, FieldMessage, FormAlert};
use crate::state::auth::{AuthState, MutationKind, MutationState};
use crate::util::auth::{FORGOT_PASSWORD_PATH, LOGIN_PATH};
use crate::util::validation::{ValidationErrors, validate_reset_password};

/// Token query value, ignoring surrounding whitespace; `None` when blank.
fn reset_token(raw: Option<String>) -> Option<String> {
    raw.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty())
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    #[cfg(feature = "hydrate")]
    let session = expect_context::<SessionHandle>();
    let query = use_query_map();
    let token = Memo::new(move |_| reset_token(query.with(|q| q.get("token"))));

    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::default());
    let submitted = RwSignal::new(false);
    let busy = Memo::new(move |_| auth.with(|s| s.is_pending(MutationKind::ResetPassword)));
    let failure = Signal::derive(move || {
        if submitted.get() { auth.with(|s| super::failure_text(s, MutationKind::ResetPassword)) } else { None }
    });
    let done = Memo::new(move |_| {
        submitted.get() && auth.with(|s| matches!(s.mutation(MutationKind::ResetPassword), MutationState::Succeeded { .. }))
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let raw_token = token.get_untracked().unwrap_or_default();
        let data = match validate_reset_password(&raw_token, &password.get_untracked(), &confirm_password.get_untracked()) {
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
            let _ = controller.reset_password(data.token, data.password).await;
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = data;
    };

    let form = move || {
        view! {
            <form class="auth-form" on:submit=on_submit>
                <FormAlert message=failure/>
                <FieldMessage errors=errors field="token"/>
                <label class="auth-form__label" for="password">"New password"</label>
                <input
                    id="password"
                    class="auth-form__input"
                    type="password"
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <FieldMessage errors=errors field="password"/>
                <label class="auth-form__label" for="confirmPassword">"Confirm new password"</label>
                <input
                    id="confirmPassword"
                    class="auth-form__input"
                    type="password"
                    autocomplete="new-password"
                    prop:value=move || confirm_password.get()
                    on:input=move |ev| confirm_password.set(event_target_value(&ev))
                />
                <FieldMessage errors=errors field="confirmPassword"/>
                <button class="auth-form__submit" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Resetting..." } else { "Reset password" }}
                </button>
            </form>
        }
    };

    view! {
        <AuthLayout title="Reset your password" description="Choose a new password for your account">
            {move || {
                if done.get() {
                    let message = auth
                        .with(|s| s.mutation(MutationKind::ResetPassword).message().map(str::to_owned))
                        .unwrap_or_default();
                    view! {
                        <div class="auth-confirmation">
                            <p>{message}</p>
                            <a class="auth-form__link" href=LOGIN_PATH>"Back to Sign In"</a>
                        </div>
                    }
                        .into_any()
                } else if token.get().is_none() {
                    view! {
                        <div class="auth-confirmation">
                            <p>"This reset link is missing its token or has been cut short."</p>
                            <a class="auth-form__link" href=FORGOT_PASSWORD_PATH>"Request a new link"</a>
                        </div>
                    }
                        .into_any()
                } else {
                    form().into_any()
                }
            }}
        </AuthLayout>
    }
}
