use crate::domain::a001_product::store::CatalogStore;
use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Tab state and the product catalog live for the whole app.
    provide_context(AppGlobalContext::new());
    provide_context(CatalogStore::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
