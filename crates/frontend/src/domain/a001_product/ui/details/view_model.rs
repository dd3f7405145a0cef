use contracts::domain::a001_product::dto::{PresentationDraft, ProductDraft};
use contracts::domain::a001_product::taxonomy::subcategories_of;
use contracts::domain::a001_product::Product;
use contracts::shared::validation::ValidationError;
use leptos::prelude::*;

use crate::domain::a001_product::ui::presentation::view_model::PresentationInput;

pub const STATUS_OPTIONS: &[&str] = &["Activo", "Inactivo"];

/// Product header fields as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub code: String,
    pub name: String,
    pub description: String,
    pub kind: String,
    pub category: String,
    pub subcategory: String,
    pub status: String,
}

impl Default for ProductInput {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            description: String::new(),
            kind: String::new(),
            category: String::new(),
            subcategory: String::new(),
            status: STATUS_OPTIONS[0].to_string(),
        }
    }
}

impl ProductInput {
    pub fn from_product(p: &Product) -> Self {
        Self {
            code: p.code.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
            kind: p.kind.clone(),
            category: p.category.clone(),
            subcategory: p.subcategory.clone(),
            status: p.status.clone(),
        }
    }

    /// Changing the category drops a subcategory that no longer belongs to it.
    pub fn select_category(&mut self, category: String) {
        let subcategories = subcategories_of(&category);
        if !subcategories.contains(&self.subcategory.as_str()) {
            self.subcategory.clear();
        }
        self.category = category;
    }

    pub fn to_draft(&self, presentations: &[PresentationInput]) -> Result<ProductDraft, ValidationError> {
        let presentations = presentations
            .iter()
            .enumerate()
            .map(|(index, p)| p.to_draft().map_err(|e| ValidationError::at(index, e)))
            .collect::<Result<Vec<PresentationDraft>, _>>()?;
        Ok(ProductDraft {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            kind: self.kind.clone(),
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            status: self.status.clone(),
            presentations,
        })
    }

    /// `product` with the header fields replaced; presentations untouched.
    pub fn apply_to(&self, product: &Product) -> Product {
        Product {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            kind: self.kind.clone(),
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            status: self.status.clone(),
            ..product.clone()
        }
    }
}

/// Form state for the product page, in both create and edit mode.
#[derive(Clone, Copy)]
pub struct ProductDetailsVm {
    pub form: RwSignal<ProductInput>,
    /// Presentations typed in create mode.
    pub presentations: RwSignal<Vec<PresentationInput>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl ProductDetailsVm {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ProductInput::default()),
            presentations: RwSignal::new(vec![PresentationInput::default()]),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn add_presentation_row(&self) {
        self.presentations.update(|rows| rows.push(PresentationInput::default()));
    }

    pub fn remove_presentation_row(&self, index: usize) {
        self.presentations.update(|rows| {
            if rows.len() > 1 && index < rows.len() {
                rows.remove(index);
            }
        });
    }
}

impl Default for ProductDetailsVm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::ui::presentation::view_model::PresentationField;

    fn header() -> ProductInput {
        ProductInput {
            code: " MIEL-01 ".into(),
            name: "Miel Pura de Abeja".into(),
            description: String::new(),
            kind: "Miel".into(),
            category: "Miel".into(),
            subcategory: String::new(),
            status: "Activo".into(),
        }
    }

    fn row(sku: &str) -> PresentationInput {
        let mut p = PresentationInput::default();
        p.set(PresentationField::Sku, sku.into());
        p.set(PresentationField::Format, "Frasco".into());
        p.set(PresentationField::Capacity, "500g".into());
        p.set(PresentationField::SalePrice, "150".into());
        p
    }

    #[test]
    fn draft_trims_header_and_parses_rows() {
        let draft = header().to_draft(&[row("M-500")]).expect("valid");
        assert_eq!(draft.code, "MIEL-01");
        assert_eq!(draft.presentations.len(), 1);
        assert_eq!(draft.presentations[0].sale_price, 150.0);
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn unparsable_row_is_reported_by_position() {
        let mut bad = row("M-1000");
        bad.set(PresentationField::Stock, "muchos".into());
        let err = header().to_draft(&[row("M-500"), bad]).unwrap_err();
        assert_eq!(err, ValidationError::at(1, ValidationError::NotANumber("stock")));
        assert!(err.to_string().starts_with("Elemento 2:"));
    }

    #[test]
    fn category_change_resets_foreign_subcategory() {
        let mut input = header();
        input.subcategory = "Miel".into();
        input.select_category("Productos Apícolas".into());
        assert_eq!(input.subcategory, "Miel");

        input.select_category("Productos Derivados".into());
        assert_eq!(input.subcategory, "");
        assert_eq!(input.category, "Productos Derivados");
    }
}
