//! Maps a tab key to its view.

use super::tab_labels::*;
use crate::domain::a001_product::ui::details::ProductDetails;
use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a002_sale::ui::details::SaleDetails;
use crate::domain::a002_sale::ui::form::SaleForm;
use crate::domain::a002_sale::ui::list::SaleList;
use crate::layout::global_context::AppGlobalContext;
use leptos::logging::log;
use leptos::prelude::*;

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let close = Callback::new(move |_: ()| tabs_store.close_tab(&key_for_close));

    match key {
        PRODUCTS_TAB => view! { <ProductList /> }.into_any(),
        PRODUCT_NEW_TAB => view! { <ProductDetails id=None on_close=close /> }.into_any(),
        k if k.starts_with(PRODUCT_DETAIL_PREFIX) => {
            let id = k[PRODUCT_DETAIL_PREFIX.len()..].to_string();
            view! { <ProductDetails id=Some(id) on_close=close /> }.into_any()
        }

        SALES_TAB => view! { <SaleList /> }.into_any(),
        SALE_NEW_TAB => view! { <SaleForm on_close=close /> }.into_any(),
        k if k.starts_with(SALE_DETAIL_PREFIX) => {
            let id = k[SALE_DETAIL_PREFIX.len()..].to_string();
            view! { <SaleDetails id=id on_close=close /> }.into_any()
        }

        _ => {
            log!("unknown tab key: '{}'", key);
            view! {
                <div class="placeholder">{format!("Sección desconocida: {}", key)}</div>
            }
            .into_any()
        }
    }
}
