use leptos::prelude::*;
use thaw::*;

use super::context::{do_logout, use_session};

/// Renders children only for an authenticated admin session
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.is_admin()
            fallback=move || view! { <AccessDenied /> }
        >
            {children()}
        </Show>
    }
}

#[component]
fn AccessDenied() -> impl IntoView {
    let session = use_session();
    let name = move || session.user_name().unwrap_or_default();

    view! {
        <div class="login-container">
            <div class="login-box">
                <h2>"Acceso denegado"</h2>
                <p>{move || format!("{}, esta consola requiere privilegios de administrador.", name())}</p>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| do_logout(session)>
                    "Cerrar sesión"
                </Button>
            </div>
        </div>
    }
}
