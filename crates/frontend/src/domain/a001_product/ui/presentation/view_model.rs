use contracts::domain::a001_product::dto::PresentationDraft;
use contracts::domain::a001_product::Presentation;
use contracts::shared::validation::ValidationError;
use leptos::prelude::*;

/// Editable presentation field, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationField {
    Sku,
    Format,
    Capacity,
    SalePrice,
    PurchasePrice,
    Stock,
    MinStock,
    Lot,
    IntakeDate,
    ExpiryDate,
    Supplier,
    Location,
    Notes,
}

impl PresentationField {
    pub const ALL: [PresentationField; 13] = [
        Self::Sku,
        Self::Format,
        Self::Capacity,
        Self::SalePrice,
        Self::PurchasePrice,
        Self::Stock,
        Self::MinStock,
        Self::Lot,
        Self::IntakeDate,
        Self::ExpiryDate,
        Self::Supplier,
        Self::Location,
        Self::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sku => "SKU",
            Self::Format => "Formato",
            Self::Capacity => "Capacidad",
            Self::SalePrice => "Precio de venta",
            Self::PurchasePrice => "Precio de compra",
            Self::Stock => "Stock",
            Self::MinStock => "Stock mínimo",
            Self::Lot => "Lote",
            Self::IntakeDate => "Fecha de ingreso",
            Self::ExpiryDate => "Fecha de vencimiento",
            Self::Supplier => "Proveedor",
            Self::Location => "Ubicación",
            Self::Notes => "Observaciones",
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            Self::SalePrice | Self::PurchasePrice | Self::Stock | Self::MinStock => "number",
            Self::IntakeDate | Self::ExpiryDate => "date",
            _ => "text",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Self::Sku | Self::Format | Self::Capacity)
    }
}

/// Presentation form contents exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentationInput {
    pub sku: String,
    pub format: String,
    pub capacity: String,
    pub sale_price: String,
    pub purchase_price: String,
    pub stock: String,
    pub min_stock: String,
    pub lot: String,
    pub intake_date: String,
    pub expiry_date: String,
    pub supplier: String,
    pub location: String,
    pub notes: String,
}

impl PresentationInput {
    pub fn from_presentation(p: &Presentation) -> Self {
        Self {
            sku: p.sku.clone(),
            format: p.format.clone(),
            capacity: p.capacity.clone(),
            sale_price: p.sale_price.to_string(),
            purchase_price: p.purchase_price.to_string(),
            stock: p.stock.to_string(),
            min_stock: p.min_stock.to_string(),
            lot: p.lot.clone(),
            intake_date: date_input_value(&p.intake_date),
            expiry_date: date_input_value(&p.expiry_date),
            supplier: p.supplier.clone(),
            location: p.location.clone(),
            notes: p.notes.clone(),
        }
    }

    pub fn get(&self, field: PresentationField) -> &str {
        match field {
            PresentationField::Sku => &self.sku,
            PresentationField::Format => &self.format,
            PresentationField::Capacity => &self.capacity,
            PresentationField::SalePrice => &self.sale_price,
            PresentationField::PurchasePrice => &self.purchase_price,
            PresentationField::Stock => &self.stock,
            PresentationField::MinStock => &self.min_stock,
            PresentationField::Lot => &self.lot,
            PresentationField::IntakeDate => &self.intake_date,
            PresentationField::ExpiryDate => &self.expiry_date,
            PresentationField::Supplier => &self.supplier,
            PresentationField::Location => &self.location,
            PresentationField::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: PresentationField, value: String) {
        let slot = match field {
            PresentationField::Sku => &mut self.sku,
            PresentationField::Format => &mut self.format,
            PresentationField::Capacity => &mut self.capacity,
            PresentationField::SalePrice => &mut self.sale_price,
            PresentationField::PurchasePrice => &mut self.purchase_price,
            PresentationField::Stock => &mut self.stock,
            PresentationField::MinStock => &mut self.min_stock,
            PresentationField::Lot => &mut self.lot,
            PresentationField::IntakeDate => &mut self.intake_date,
            PresentationField::ExpiryDate => &mut self.expiry_date,
            PresentationField::Supplier => &mut self.supplier,
            PresentationField::Location => &mut self.location,
            PresentationField::Notes => &mut self.notes,
        };
        *slot = value;
    }

    /// Parses the numeric fields; range checks are left to the draft.
    pub fn to_draft(&self) -> Result<PresentationDraft, ValidationError> {
        Ok(PresentationDraft {
            sku: self.sku.trim().to_string(),
            format: self.format.trim().to_string(),
            capacity: self.capacity.trim().to_string(),
            sale_price: parse_amount("precio_venta", &self.sale_price)?,
            purchase_price: parse_amount("precio_compra", &self.purchase_price)?,
            stock: parse_count("stock", &self.stock)?,
            min_stock: parse_count("stock_minimo", &self.min_stock)?,
            lot: self.lot.trim().to_string(),
            intake_date: self.intake_date.clone(),
            expiry_date: self.expiry_date.clone(),
            supplier: self.supplier.trim().to_string(),
            location: self.location.trim().to_string(),
            notes: self.notes.clone(),
        })
    }

    /// The edited version of `original`, keeping its identifier.
    pub fn apply_to(&self, original: &Presentation) -> Result<Presentation, ValidationError> {
        let draft = self.to_draft()?;
        Ok(Presentation {
            id: original.id.clone(),
            sku: draft.sku,
            format: draft.format,
            capacity: draft.capacity,
            sale_price: draft.sale_price,
            purchase_price: draft.purchase_price,
            stock: draft.stock,
            min_stock: draft.min_stock,
            lot: draft.lot,
            intake_date: or_na(draft.intake_date),
            expiry_date: or_na(draft.expiry_date),
            supplier: draft.supplier,
            location: draft.location,
            notes: draft.notes,
        })
    }
}

impl From<PresentationDraft> for PresentationInput {
    fn from(d: PresentationDraft) -> Self {
        Self {
            sku: d.sku,
            format: d.format,
            capacity: d.capacity,
            sale_price: d.sale_price.to_string(),
            purchase_price: d.purchase_price.to_string(),
            stock: d.stock.to_string(),
            min_stock: d.min_stock.to_string(),
            lot: d.lot,
            intake_date: d.intake_date,
            expiry_date: d.expiry_date,
            supplier: d.supplier,
            location: d.location,
            notes: d.notes,
        }
    }
}

/// Decimal amount; accepts a comma separator, blank means 0.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return Ok(0.0);
    }
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::NotANumber(field)),
    }
}

/// Whole units; blank means 0.
pub fn parse_count(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber(field))
}

/// `<input type=date>` wants `YYYY-MM-DD`; sentinels and timestamps are cut.
fn date_input_value(stored: &str) -> String {
    let date = stored.split('T').next().unwrap_or_default();
    if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() {
        date.to_string()
    } else {
        String::new()
    }
}

fn or_na(value: String) -> String {
    if value.trim().is_empty() {
        "N/A".to_string()
    } else {
        value
    }
}

/// State of the presentation editor dialog.
#[derive(Clone, Copy)]
pub struct PresentationFormVm {
    pub form: RwSignal<PresentationInput>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl PresentationFormVm {
    pub fn new(initial: PresentationInput) -> Self {
        Self {
            form: RwSignal::new(initial),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Presentation {
        Presentation {
            id: "pres-1".into(),
            sku: "MIEL-500".into(),
            format: "Frasco".into(),
            capacity: "500g".into(),
            sale_price: 150.5,
            purchase_price: 90.0,
            stock: 20,
            min_stock: 10,
            lot: "L-01".into(),
            intake_date: "2024-03-01T00:00:00.000Z".into(),
            expiry_date: "N/A".into(),
            supplier: "Apiario Sur".into(),
            location: "Bodega".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn amounts_accept_comma_and_blank() {
        assert_eq!(parse_amount("precio_venta", "12,5"), Ok(12.5));
        assert_eq!(parse_amount("precio_venta", "  "), Ok(0.0));
        assert_eq!(
            parse_amount("precio_venta", "doce"),
            Err(ValidationError::NotANumber("precio_venta"))
        );
        assert_eq!(
            parse_amount("precio_venta", "inf"),
            Err(ValidationError::NotANumber("precio_venta"))
        );
    }

    #[test]
    fn counts_reject_fractions() {
        assert_eq!(parse_count("stock", "15"), Ok(15));
        assert_eq!(parse_count("stock", ""), Ok(0));
        assert_eq!(
            parse_count("stock", "1.5"),
            Err(ValidationError::NotANumber("stock"))
        );
    }

    #[test]
    fn form_shows_dates_as_input_values() {
        let input = PresentationInput::from_presentation(&stored());
        assert_eq!(input.intake_date, "2024-03-01");
        assert_eq!(input.expiry_date, "");
        assert_eq!(input.sale_price, "150.5");
        assert_eq!(input.get(PresentationField::Supplier), "Apiario Sur");
    }

    #[test]
    fn edit_keeps_identifier_and_restores_sentinels() {
        let original = stored();
        let mut input = PresentationInput::from_presentation(&original);
        input.set(PresentationField::SalePrice, "175".into());
        input.set(PresentationField::Stock, "5".into());

        let edited = input.apply_to(&original).expect("valid input");
        assert_eq!(edited.id, "pres-1");
        assert_eq!(edited.sale_price, 175.0);
        assert_eq!(edited.stock, 5);
        assert_eq!(edited.expiry_date, "N/A");
        assert_eq!(edited.intake_date, "2024-03-01");
    }

    #[test]
    fn negative_values_reach_draft_validation() {
        let mut input = PresentationInput::from_presentation(&stored());
        input.set(PresentationField::Stock, "-3".into());
        let draft = input.to_draft().expect("parses");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::Negative {
                field: "stock",
                value: -3.0
            })
        );
    }

    #[test]
    fn every_field_round_trips_through_set_and_get() {
        let mut input = PresentationInput::default();
        for field in PresentationField::ALL {
            input.set(field, field.label().to_string());
        }
        for field in PresentationField::ALL {
            assert_eq!(input.get(field), field.label());
        }
    }
}
