//! Display-only projection of the catalog by search term, category and supplier.

use super::aggregate::Product;
use serde::{Deserialize, Serialize};

/// Value used by the filter dropdowns for "no restriction".
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Maps a dropdown value; `"all"` and blank mean no restriction.
    pub fn from_option(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }

    pub fn as_option(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(v) => v,
        }
    }

    fn admits(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    pub search: String,
    pub category: Selection,
    pub provider: Selection,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.category == Selection::All
            && self.provider == Selection::All
    }

    fn matches_search(product: &Product, needle: &str) -> bool {
        product.name.to_lowercase().contains(needle)
            || product.code.to_lowercase().contains(needle)
            || product
                .presentations
                .iter()
                .any(|p| p.sku.to_lowercase().contains(needle))
    }

    /// Applies the filter to `products`, preserving their relative order.
    ///
    /// Category is an exact match, search is a case-insensitive substring on
    /// name, code or any SKU, using the term exactly as typed (surrounding
    /// spaces included). Presentations are then narrowed to the selected
    /// supplier and products left without presentations are dropped.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let needle = self.search.to_lowercase();
        products
            .iter()
            .filter(|p| self.category.admits(&p.category))
            .filter(|p| needle.is_empty() || Self::matches_search(p, &needle))
            .filter_map(|p| {
                let presentations: Vec<_> = p
                    .presentations
                    .iter()
                    .filter(|pres| self.provider.admits(&pres.supplier))
                    .cloned()
                    .collect();
                if presentations.is_empty() {
                    None
                } else {
                    Some(Product {
                        presentations,
                        ..p.clone()
                    })
                }
            })
            .collect()
    }
}

/// Distinct dropdown values, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub providers: Vec<String>,
}

impl FilterOptions {
    pub fn from_products(products: &[Product]) -> Self {
        let mut options = FilterOptions::default();
        for product in products {
            push_unique(&mut options.categories, &product.category);
            for pres in &product.presentations {
                push_unique(&mut options.providers, &pres.supplier);
            }
        }
        options
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::aggregate::Presentation;

    fn pres(id: &str, sku: &str, supplier: &str) -> Presentation {
        Presentation {
            id: id.into(),
            sku: sku.into(),
            format: "Frasco".into(),
            capacity: "500g".into(),
            sale_price: 100.0,
            purchase_price: 50.0,
            stock: 10,
            min_stock: 2,
            lot: "L1".into(),
            intake_date: "2024-01-01".into(),
            expiry_date: "N/A".into(),
            supplier: supplier.into(),
            location: "A1".into(),
            notes: String::new(),
        }
    }

    fn product(id: &str, code: &str, name: &str, category: &str, presentations: Vec<Presentation>) -> Product {
        Product {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            description: String::new(),
            kind: "Miel".into(),
            category: category.into(),
            subcategory: String::new(),
            status: "Activo".into(),
            created_at: "2024-01-01".into(),
            presentations,
            images: vec![],
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(
                "p1",
                "MIEL-PUR-500",
                "Miel Pura de Abeja",
                "Miel",
                vec![
                    pres("a", "MIEL-PUR-500-FR", "Apícola de los Altos"),
                    pres("b", "MIEL-PUR-1000-FR", "Apiario Sur"),
                ],
            ),
            product(
                "p2",
                "JAB-MIEL-AVN",
                "Jabón Artesanal",
                "Cosméticos",
                vec![pres("c", "JAB-100", "Cosmética Natural Bee")],
            ),
            product(
                "p3",
                "VEL-CER-ABE",
                "Vela de Cera",
                "Velas",
                vec![pres("d", "VEL-MED", "Apícola de los Altos")],
            ),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let products = catalog();
        assert_eq!(ProductFilter::default().apply(&products), products);
    }

    #[test]
    fn category_is_exact_match() {
        let filter = ProductFilter {
            category: Selection::from_option("Miel"),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&catalog())), vec!["p1"]);

        let filter = ProductFilter {
            category: Selection::from_option("miel"),
            ..Default::default()
        };
        assert!(filter.apply(&catalog()).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_on_name_code_and_sku() {
        let by_name = ProductFilter {
            search: "miel".into(),
            ..Default::default()
        };
        // "Miel Pura de Abeja" by name, "JAB-MIEL-AVN" by code.
        assert_eq!(ids(&by_name.apply(&catalog())), vec!["p1", "p2"]);

        let by_sku = ProductFilter {
            search: "vel-med".into(),
            ..Default::default()
        };
        assert_eq!(ids(&by_sku.apply(&catalog())), vec!["p3"]);
    }

    #[test]
    fn search_term_is_matched_as_typed() {
        let spaced = ProductFilter {
            search: " de ".into(),
            ..Default::default()
        };
        // "Miel Pura de Abeja" and "Vela de Cera"; "JAB-MIEL-AVN" has no spaces.
        assert_eq!(ids(&spaced.apply(&catalog())), vec!["p1", "p3"]);
        assert!(!spaced.is_empty());

        let leading = ProductFilter {
            search: "  miel".into(),
            ..Default::default()
        };
        assert!(leading.apply(&catalog()).is_empty());
    }

    #[test]
    fn provider_narrows_presentations_and_drops_empty_products() {
        let filter = ProductFilter {
            provider: Selection::from_option("Apícola de los Altos"),
            ..Default::default()
        };
        let out = filter.apply(&catalog());
        assert_eq!(ids(&out), vec!["p1", "p3"]);
        assert_eq!(out[0].presentations.len(), 1);
        assert_eq!(out[0].presentations[0].id, "a");

        let absent = ProductFilter {
            provider: Selection::from_option("Nadie"),
            ..Default::default()
        };
        assert!(absent.apply(&catalog()).is_empty());
    }

    #[test]
    fn filtering_is_idempotent_and_order_preserving() {
        let products = catalog();
        let filters = [
            ProductFilter {
                search: "a".into(),
                ..Default::default()
            },
            ProductFilter {
                provider: Selection::from_option("Apícola de los Altos"),
                ..Default::default()
            },
            ProductFilter {
                search: "e".into(),
                category: Selection::All,
                provider: Selection::from_option("Apiario Sur"),
            },
        ];
        for filter in filters {
            let once = filter.apply(&products);
            let twice = filter.apply(&once);
            assert_eq!(once, twice);

            let positions: Vec<usize> = once
                .iter()
                .map(|p| products.iter().position(|src| src.id == p.id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn options_are_distinct_in_first_seen_order() {
        let options = FilterOptions::from_products(&catalog());
        assert_eq!(options.categories, vec!["Miel", "Cosméticos", "Velas"]);
        assert_eq!(
            options.providers,
            vec!["Apícola de los Altos", "Apiario Sur", "Cosmética Natural Bee"]
        );
    }

    #[test]
    fn selection_parses_all() {
        assert_eq!(Selection::from_option("all"), Selection::All);
        assert_eq!(Selection::from_option(""), Selection::All);
        assert_eq!(Selection::from_option("Miel").as_option(), "Miel");
    }
}
