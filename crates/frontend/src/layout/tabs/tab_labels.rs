//! Tab keys and their titles.

pub const PRODUCTS_TAB: &str = "a001_product";
pub const PRODUCT_NEW_TAB: &str = "a001_product_new";
pub const PRODUCT_DETAIL_PREFIX: &str = "a001_product_detail_";
pub const SALES_TAB: &str = "a002_sale";
pub const SALE_NEW_TAB: &str = "a002_sale_new";
pub const SALE_DETAIL_PREFIX: &str = "a002_sale_detail_";

/// Tab opened when the URL names none.
pub const HOME_TAB: &str = PRODUCTS_TAB;

/// Pinned tabs have no close button and survive `close_tab`.
pub fn is_pinned(key: &str) -> bool {
    key == HOME_TAB
}

pub fn product_detail_key(id: &str) -> String {
    format!("{}{}", PRODUCT_DETAIL_PREFIX, id)
}

pub fn sale_detail_key(id: &str) -> String {
    format!("{}{}", SALE_DETAIL_PREFIX, id)
}

/// Title for a tab restored from its key alone. Detail tabs only know the id.
pub fn tab_label_for_key(key: &str) -> String {
    match key {
        PRODUCTS_TAB => "Productos".to_string(),
        PRODUCT_NEW_TAB => "Nuevo producto".to_string(),
        SALES_TAB => "Ventas".to_string(),
        SALE_NEW_TAB => "Nueva venta".to_string(),
        k => {
            if let Some(id) = k.strip_prefix(PRODUCT_DETAIL_PREFIX) {
                detail_tab_label("Producto", id)
            } else if let Some(id) = k.strip_prefix(SALE_DETAIL_PREFIX) {
                detail_tab_label("Venta", id)
            } else {
                k.to_string()
            }
        }
    }
}

/// «<entity> · <identifier>»
pub fn detail_tab_label(entity_label: &'static str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_and_detail_titles() {
        assert_eq!(tab_label_for_key(PRODUCTS_TAB), "Productos");
        assert_eq!(tab_label_for_key(SALE_NEW_TAB), "Nueva venta");
        assert_eq!(tab_label_for_key(&sale_detail_key("V-9")), "Venta · V-9");
        assert_eq!(tab_label_for_key(&product_detail_key("p1")), "Producto · p1");
        assert_eq!(tab_label_for_key("otra_cosa"), "otra_cosa");
    }

    #[test]
    fn only_home_is_pinned() {
        assert!(is_pinned(PRODUCTS_TAB));
        assert!(!is_pinned(SALES_TAB));
        assert!(!is_pinned(&product_detail_key("p1")));
    }
}
