use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::tabs::is_pinned;
use leptos::ev;
use leptos::prelude::*;

/// One entry of the tab strip. Pinned tabs render without a close button.
#[component]
pub fn Tab(tab: TabData) -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let key = StoredValue::new(tab.key);
    let title = tab.title;
    let hint = title.clone();
    let is_active = Memo::new(move |_| {
        let current = tabs_store.active.get();
        key.with_value(|k| current.as_deref() == Some(k.as_str()))
    });

    let close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        tabs_store.close_tab(&key.get_value());
    };

    view! {
        <div
            class="tab"
            class:active=is_active
            title=hint
            on:click=move |_| tabs_store.activate_tab(&key.get_value())
        >
            <span>{title}</span>
            <Show when=move || !key.with_value(|k| is_pinned(k))>
                <button class="tab-close" title="Cerrar" on:click=close>"×"</button>
            </Show>
        </div>
    }
}
