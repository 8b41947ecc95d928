//! Product rows - one line of the pricing worksheet

use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::validation::{check_amount, InputError};

/// A product as entered by the user
///
/// Row order is significant: results come back in the same order. Names are
/// labels only and need not be unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    /// Display name
    #[serde(default)]
    pub name: String,

    /// Units sold per month
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub volume: f64,

    /// Variable cost of one unit
    #[serde(default, alias = "variable_cost", deserialize_with = "blank_as_zero")]
    pub variable_cost_per_unit: f64,

    /// Current selling price of one unit; 0 means "not set yet"
    #[serde(
        default,
        alias = "current_price",
        alias = "price",
        deserialize_with = "blank_as_zero"
    )]
    pub current_price_per_unit: f64,
}

/// A blank CSV cell or a YAML `null` reads as 0 ("not set yet")
fn blank_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ProductInput {
    pub fn new(
        name: impl Into<String>,
        volume: f64,
        variable_cost_per_unit: f64,
        current_price_per_unit: f64,
    ) -> Self {
        Self {
            name: name.into(),
            volume,
            variable_cost_per_unit,
            current_price_per_unit,
        }
    }

    /// Default label for the product in 1-based row `row`
    pub fn placeholder_name(row: usize) -> String {
        format!("Product {}", row)
    }

    /// Whether a current price has been entered (0 is the "unset" sentinel)
    pub fn has_price(&self) -> bool {
        self.current_price_per_unit > 0.0
    }

    /// Check every numeric field; `row` is 1-based and only used in errors
    pub fn validate(&self, row: usize) -> Result<(), InputError> {
        let fields = [
            ("volume", self.volume),
            ("variable_cost_per_unit", self.variable_cost_per_unit),
            ("current_price_per_unit", self.current_price_per_unit),
        ];

        for (field, value) in fields {
            check_amount(value, field, |value| InputError::NegativeValue {
                row,
                name: self.name.clone(),
                field,
                value,
            })?;
        }

        Ok(())
    }
}

impl std::str::FromStr for ProductInput {
    type Err = InputError;

    /// Parse `NAME:VOLUME:VARIABLE_COST[:PRICE]`
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = spec.split(':').collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(InputError::ProductSpec {
                spec: spec.to_string(),
                reason: format!("expected 3 or 4 ':'-separated fields, found {}", parts.len()),
            });
        }

        let number = |label: &str, raw: &str| -> Result<f64, InputError> {
            raw.trim().parse::<f64>().map_err(|_| InputError::ProductSpec {
                spec: spec.to_string(),
                reason: format!("{} '{}' is not a number", label, raw.trim()),
            })
        };

        let volume = number("volume", parts[1])?;
        let variable_cost = number("variable cost", parts[2])?;
        let price = match parts.get(3) {
            Some(raw) => number("price", raw)?,
            None => 0.0,
        };

        Ok(Self::new(parts[0].trim(), volume, variable_cost, price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_name() {
        assert_eq!(ProductInput::placeholder_name(1), "Product 1");
        assert_eq!(ProductInput::placeholder_name(12), "Product 12");
    }

    #[test]
    fn test_has_price_treats_zero_as_unset() {
        assert!(!ProductInput::new("A", 10.0, 5.0, 0.0).has_price());
        assert!(ProductInput::new("A", 10.0, 5.0, 9.5).has_price());
    }

    #[test]
    fn test_validate_reports_row_and_field() {
        let product = ProductInput::new("Gadget", 10.0, -3.0, 0.0);
        let err = product.validate(2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "product 2 (Gadget): variable_cost_per_unit must be zero or positive, got -3"
        );
    }

    #[test]
    fn test_validate_accepts_all_zero() {
        assert!(ProductInput::default().validate(1).is_ok());
    }

    #[test]
    fn test_parse_spec_with_price() {
        let product: ProductInput = "Widget:1000:50:120".parse().unwrap();
        assert_eq!(product, ProductInput::new("Widget", 1000.0, 50.0, 120.0));
    }

    #[test]
    fn test_parse_spec_without_price_defaults_to_unset() {
        let product: ProductInput = "Widget: 700 : 12.5".parse().unwrap();
        assert_eq!(product.volume, 700.0);
        assert_eq!(product.variable_cost_per_unit, 12.5);
        assert_eq!(product.current_price_per_unit, 0.0);
    }

    #[test]
    fn test_parse_spec_rejects_bad_number() {
        let err = "Widget:lots:50".parse::<ProductInput>().unwrap_err();
        assert!(err.to_string().contains("volume 'lots' is not a number"));
    }

    #[test]
    fn test_parse_spec_rejects_wrong_arity() {
        assert!("Widget:10".parse::<ProductInput>().is_err());
        assert!("a:1:2:3:4".parse::<ProductInput>().is_err());
    }

    #[test]
    fn test_deserialize_accepts_short_aliases() {
        let yaml = "name: Widget\nvolume: 10\nvariable_cost: 4\nprice: 9";
        let product: ProductInput = serde_yml::from_str(yaml).unwrap();
        assert_eq!(product, ProductInput::new("Widget", 10.0, 4.0, 9.0));
    }

    #[test]
    fn test_deserialize_defaults_missing_numbers() {
        let product: ProductInput = serde_yml::from_str("name: Bare").unwrap();
        assert_eq!(product.volume, 0.0);
        assert_eq!(product.current_price_per_unit, 0.0);
    }
}
