use contracts::domain::a001_product::filter::{ProductFilter, Selection, ALL};
use leptos::prelude::*;

/// Filter inputs of the product list. `search` holds the committed
/// (debounced) term.
#[derive(Clone, Copy)]
pub struct ProductListState {
    pub search: RwSignal<String>,
    pub category: RwSignal<String>,
    pub provider: RwSignal<String>,
}

impl ProductListState {
    pub fn new() -> Self {
        Self {
            search: RwSignal::new(String::new()),
            category: RwSignal::new(ALL.to_string()),
            provider: RwSignal::new(ALL.to_string()),
        }
    }

    /// Current criteria; tracks all three inputs.
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            search: self.search.get(),
            category: Selection::from_option(&self.category.get()),
            provider: Selection::from_option(&self.provider.get()),
        }
    }

    pub fn active_count(&self) -> usize {
        let filter = self.filter();
        usize::from(!filter.search.is_empty())
            + usize::from(filter.category != Selection::All)
            + usize::from(filter.provider != Selection::All)
    }

    pub fn reset(&self) {
        self.search.set(String::new());
        self.category.set(ALL.to_string());
        self.provider.set(ALL.to_string());
    }
}

impl Default for ProductListState {
    fn default() -> Self {
        Self::new()
    }
}
