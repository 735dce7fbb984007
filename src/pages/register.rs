//! Account registration page.

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::app::SessionHandle;
use crate::components::auth_layout::{AuthLayout, FieldMessage, FormAlert};
use crate::net::types::RegisterData;
use crate::state::auth::{AuthState, MutationKind};
use crate::util::auth::LOGIN_PATH;
use crate::util::validation::{ValidationErrors, validate_register};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    #[cfg(feature = "hydrate")]
    let session = expect_context::<SessionHandle>();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let accept_terms = RwSignal::new(false);
    let errors = RwSignal::new(ValidationErrors::default());
    let busy = Memo::new(move |_| auth.with(|s| s.is_pending(MutationKind::Register)));
    let failure = Signal::derive(move || auth.with(|s| super::failure_text(s, MutationKind::Register)));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let form = RegisterData {
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            email: email.get_untracked(),
            phone: Some(phone.get_untracked()),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
            accept_terms: accept_terms.get_untracked(),
        };
        let data = match validate_register(form) {
            Ok(data) => data,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(ValidationErrors::default());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let controller = session.get_value();
            let _ = controller.register(data).await;
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = data;
    };

    let text_field = move |id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <label class="auth-form__label" for=id>{label}</label>
            <input
                id=id
                class="auth-form__input"
                type=kind
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <FieldMessage errors=errors field=id/>
        }
    };

    view! {
        <AuthLayout title="Create an account" description="Enter your details to get started">
            <form class="auth-form" on:submit=on_submit>
                <FormAlert message=failure/>
                <div class="auth-form__pair">
                    <div>{text_field("firstName", "First name", "text", first_name)}</div>
                    <div>{text_field("lastName", "Last name", "text", last_name)}</div>
                </div>
                {text_field("email", "Email", "email", email)}
                {text_field("phone", "Phone (optional)", "tel", phone)}
                {text_field("password", "Password", "password", password)}
                {text_field("confirmPassword", "Confirm password", "password", confirm_password)}
                <label class="auth-form__check">
                    <input
                        type="checkbox"
                        prop:checked=move || accept_terms.get()
                        on:change=move |ev| accept_terms.set(event_target_checked(&ev))
                    />
                    " I agree to the terms of service and privacy policy"
                </label>
                <FieldMessage errors=errors field="acceptTerms"/>
                <button class="auth-form__submit" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Creating account..." } else { "Create account" }}
                </button>
                <p class="auth-form__footer">
                    "Already have an account? "
                    <a class="auth-form__link" href=LOGIN_PATH>"Sign in"</a>
                </p>
            </form>
        </AuthLayout>
    }
}
