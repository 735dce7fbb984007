//! Card chrome shared by the sign-in and recovery pages.

use leptos::prelude::*;

use crate::util::validation::ValidationErrors;

#[component]
pub fn AuthLayout(
    #[prop(into)] title: String,
    #[prop(optional, into)] description: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="auth-layout">
            <div class="auth-layout__column">
                <header class="auth-layout__brand">
                    <h1>"Loan Assessment Portal"</h1>
                    <p>"Streamline your loan application process"</p>
                </header>
                <section class="auth-card">
                    <h2 class="auth-card__title">{title}</h2>
                    {description.map(|d| view! { <p class="auth-card__description">{d}</p> })}
                    <div class="auth-card__body">{children()}</div>
                </section>
                <footer class="auth-layout__footer">
                    <p>"© 2024 Loan Assessment Portal. All rights reserved."</p>
                </footer>
            </div>
        </div>
    }
}

/// Destructive banner for a failed submission.
#[component]
pub fn FormAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class="form-alert" role="alert">
                {move || message.get().unwrap_or_default()}
            </div>
        </Show>
    }
}

/// Inline message under one form field.
#[component]
pub fn FieldMessage(errors: RwSignal<ValidationErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors
            .with(|e| e.for_field(field))
            .map(|message| view! { <p class="field-message">{message}</p> })
    }
}
