use contracts::shared::validation::{email as check_email, required, ValidationError};
use contracts::system::auth::RegisterRequest;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::http::ApiClient;
use crate::system::auth::api;

const REDIRECT_DELAY_MS: u32 = 2000;

fn validate(request: &RegisterRequest) -> Result<(), ValidationError> {
    required("nombre", &request.name)?;
    required("correo", &request.email)?;
    required("contraseña", &request.password)?;
    check_email(&request.email)
}

#[component]
pub fn RegisterPage(on_back: Callback<()>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (success_message, set_success_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_error_message.set(None);
        set_success_message.set(None);

        let request = RegisterRequest {
            name: name.get().trim().to_string(),
            email: email.get().trim().to_string(),
            password: password.get(),
            rol: RegisterRequest::DEFAULT_ROLE.to_string(),
        };
        if let Err(e) = validate(&request) {
            set_error_message.set(Some(e.to_string()));
            return;
        }

        set_is_loading.set(true);
        spawn_local(async move {
            match api::register(&ApiClient::anonymous(), request).await {
                Ok(message) => {
                    set_success_message.set(Some(message));
                    TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                    on_back.run(());
                }
                Err(e) => {
                    log::warn!("registration failed: {}", e);
                    set_error_message.set(Some(e.to_string()));
                }
            }
            let _ = set_is_loading.try_set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Melarium"</h1>
                <h2>"Crear cuenta"</h2>

                {move || error_message.get().map(|e| view! { <div class="error-message">{e}</div> })}
                {move || success_message.get().map(|m| view! { <div class="success-message">{m}</div> })}

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="name">"Nombre"</label>
                        <input
                            type="text"
                            id="name"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>
                    <div class="form-group">
                        <label for="reg-email">"Correo electrónico"</label>
                        <input
                            type="email"
                            id="reg-email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>
                    <div class="form-group">
                        <label for="reg-password">"Contraseña"</label>
                        <input
                            type="password"
                            id="reg-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>
                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || if is_loading.get() { "Registrando..." } else { "Registrarse" }}
                    </button>
                </form>

                <div class="login-info">
                    <a href="#" on:click=move |ev| {
                        ev.prevent_default();
                        on_back.run(());
                    }>"Volver al inicio de sesión"</a>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            rol: RegisterRequest::DEFAULT_ROLE.into(),
        }
    }

    #[test]
    fn all_fields_required() {
        assert_eq!(
            validate(&request("", "a@b.mx", "x")),
            Err(ValidationError::Required("nombre"))
        );
        assert_eq!(
            validate(&request("Ana", "a@b.mx", "")),
            Err(ValidationError::Required("contraseña"))
        );
        assert!(validate(&request("Ana", "ana@melarium.com", "secreta")).is_ok());
    }
}
