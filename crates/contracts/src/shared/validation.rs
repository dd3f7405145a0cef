use thiserror::Error;

/// Local validation failure raised before any request is sent
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("El campo «{0}» es obligatorio")]
    Required(&'static str),
    #[error("El campo «{field}» no puede ser negativo (valor: {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("El campo «{0}» debe ser un número válido")]
    NotANumber(&'static str),
    #[error("El campo «{field}» debe ser al menos {min}")]
    TooSmall { field: &'static str, min: f64 },
    #[error("Se requiere al menos un elemento en «{0}»")]
    Empty(&'static str),
    #[error("El correo electrónico «{0}» no es válido")]
    InvalidEmail(String),
    #[error("El descuento ({discount:.2}) excede el subtotal ({subtotal:.2})")]
    DiscountExceedsSubtotal { discount: f64, subtotal: f64 },
    #[error("Elemento {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    pub fn at(index: usize, source: ValidationError) -> Self {
        ValidationError::Item {
            index: index + 1,
            source: Box::new(source),
        }
    }
}

pub fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

pub fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        Err(ValidationError::NotANumber(field))
    } else if value < 0.0 {
        Err(ValidationError::Negative { field, value })
    } else {
        Ok(())
    }
}

pub fn at_least(field: &'static str, value: f64, min: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        Err(ValidationError::NotANumber(field))
    } else if value < min {
        Err(ValidationError::TooSmall { field, min })
    } else {
        Ok(())
    }
}

/// Same acceptance rule as a browser `type=email` input: one `@`, a non-empty
/// local part and a dotted domain.
pub fn email(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_rules() {
        assert!(non_negative("stock", 0.0).is_ok());
        assert_eq!(
            non_negative("stock", -1.0),
            Err(ValidationError::Negative { field: "stock", value: -1.0 })
        );
        assert_eq!(
            non_negative("precio", f64::NAN),
            Err(ValidationError::NotANumber("precio"))
        );
        assert!(at_least("cantidad", 0.0, 1.0).is_err());
    }

    #[test]
    fn email_rule() {
        assert!(email("admin@melarium.com").is_ok());
        assert!(email("admin@melarium").is_err());
        assert!(email("@melarium.com").is_err());
        assert!(email("a b@melarium.com").is_err());
    }

    #[test]
    fn item_errors_are_one_based() {
        let err = ValidationError::at(0, ValidationError::Required("sku"));
        assert_eq!(err.to_string(), "Elemento 1: El campo «sku» es obligatorio");
    }
}
