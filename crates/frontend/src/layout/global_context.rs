use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use super::tabs::{is_pinned, tab_label_for_key, HOME_TAB};

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// Restores the active tab from `?active=` and keeps the query string in
    /// sync afterwards.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        match active_from_query(&search) {
            Some(active_key) => {
                let title = tab_label_for_key(&active_key);
                self.open_tab(&active_key, &title);
            }
            None => self.open_tab(HOME_TAB, &tab_label_for_key(HOME_TAB)),
        }

        let this = *self;
        Effect::new(move |_| {
            if let Some(active_key) = this.active.get() {
                let new_url = format!("?{}", query_for_active(&active_key));

                let current_search = window()
                    .and_then(|w| w.location().search().ok())
                    .unwrap_or_default();

                if current_search != new_url {
                    if let Some(w) = window() {
                        if let Ok(history) = w.history() {
                            let _ = history.replace_state_with_url(
                                &wasm_bindgen::JsValue::NULL,
                                "",
                                Some(&new_url),
                            );
                        }
                    }
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        leptos::logging::log!("open_tab: key='{}', title='{}'", key, title);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            let tab = Tab {
                key: key.to_string(),
                title: title.to_string(),
            };
            self.opened.update(|tabs| tabs.push(tab));
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        if is_pinned(key) {
            return;
        }
        leptos::logging::log!("close_tab: key='{}'", key);
        let was_active = self
            .active
            .with_untracked(|active| active.as_deref() == Some(key));
        let next = self
            .opened
            .with_untracked(|tabs| neighbour_of(tabs, key));
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if was_active {
            self.active.set(next);
        }
    }

    /// Closes every tab; used on logout so the next session starts clean.
    pub fn reset(&self) {
        self.opened.set(vec![]);
        self.active.set(None);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// Tab to activate after `key` closes: the one to its left, else the one to
/// its right.
fn neighbour_of(tabs: &[Tab], key: &str) -> Option<String> {
    let index = tabs.iter().position(|t| t.key == key)?;
    index
        .checked_sub(1)
        .and_then(|i| tabs.get(i))
        .or_else(|| tabs.get(index + 1))
        .map(|t| t.key.clone())
}

fn active_from_query(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").filter(|k| !k.is_empty()).cloned()
}

fn query_for_active(key: &str) -> String {
    serde_qs::to_string(&HashMap::from([("active".to_string(), key.to_string())]))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_tab_round_trips_through_query() {
        let query = query_for_active("a002_sale_detail_S001");
        assert_eq!(query, "active=a002_sale_detail_S001");
        assert_eq!(
            active_from_query(&format!("?{}", query)).as_deref(),
            Some("a002_sale_detail_S001")
        );
        assert_eq!(active_from_query(""), None);
        assert_eq!(active_from_query("?active="), None);
    }

    #[test]
    fn closing_prefers_the_left_neighbour() {
        let tabs: Vec<Tab> = ["a001_product", "a002_sale", "a002_sale_new"]
            .into_iter()
            .map(|k| Tab {
                key: k.to_string(),
                title: k.to_string(),
            })
            .collect();
        assert_eq!(neighbour_of(&tabs, "a002_sale").as_deref(), Some("a001_product"));
        assert_eq!(neighbour_of(&tabs, "a001_product").as_deref(), Some("a002_sale"));
        assert_eq!(neighbour_of(&tabs[..1], "a001_product"), None);
        assert_eq!(neighbour_of(&tabs, "missing"), None);
    }
}
