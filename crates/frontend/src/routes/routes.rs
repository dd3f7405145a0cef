use crate::layout::center::tabs::Tabs;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::sidebar::Sidebar;
use crate::layout::Shell;
use crate::system::auth::context::use_session;
use crate::system::auth::guard::RequireAdmin;
use crate::system::pages::login::LoginPage;
use crate::system::pages::register::RegisterPage;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Login,
    Register,
}

#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    // Runs once, when the shell is first mounted after sign-in.
    tabs_store.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Tabs /> }.into_any()
        />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let session = use_session();
    let gate = RwSignal::new(Gate::Login);

    let anonymous = move || match gate.get() {
        Gate::Login => view! {
            <LoginPage on_register=Callback::new(move |_: ()| gate.set(Gate::Register)) />
        }
        .into_any(),
        Gate::Register => view! {
            <RegisterPage on_back=Callback::new(move |_: ()| gate.set(Gate::Login)) />
        }
        .into_any(),
    };

    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=anonymous
        >
            <RequireAdmin>
                <MainLayout />
            </RequireAdmin>
        </Show>
    }
}
