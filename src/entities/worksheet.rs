//! Worksheet - the on-disk form holding global settings and product rows

use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;

use crate::entities::product::ProductInput;
use crate::entities::settings::GlobalSettings;
use crate::entities::validation::{check_amount, InputError};
use crate::yaml::{parse_yaml, parse_yaml_file, YamlError};

/// A pricing worksheet as stored in YAML or JSON
///
/// Global settings are optional so that a worksheet can inherit them from the
/// user config; products are required to be meaningful but may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    /// Monthly fixed cost shared by all products
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_cost: Option<f64>,

    /// Target gross margin as a fraction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_margin: Option<f64>,

    /// Display label for money amounts (no conversion is done)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Product rows in display order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub products: Vec<ProductInput>,
}

/// `products:` with no rows parses as null in YAML
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ProductInput>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<ProductInput>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Worksheet {
    /// Build a worksheet from already-resolved settings
    pub fn from_parts(
        settings: GlobalSettings,
        products: Vec<ProductInput>,
        currency: Option<String>,
    ) -> Self {
        Self {
            fixed_cost: Some(settings.fixed_cost),
            target_margin: Some(settings.target_margin),
            currency,
            products,
        }
    }

    /// Parse worksheet text; `filename` is only used in diagnostics
    pub fn parse(content: &str, filename: &str) -> Result<Self, YamlError> {
        let mut sheet: Worksheet = parse_yaml(content, filename)?;
        sheet.fill_placeholder_names();
        Ok(sheet)
    }

    /// Load a worksheet file
    pub fn load(path: &Path) -> Result<Self, YamlError> {
        let mut sheet: Worksheet = parse_yaml_file(path)?;
        sheet.fill_placeholder_names();
        Ok(sheet)
    }

    /// Resolve global settings, taking unset values from `fallback`
    pub fn settings(&self, fallback: GlobalSettings) -> GlobalSettings {
        GlobalSettings {
            fixed_cost: self.fixed_cost.unwrap_or(fallback.fixed_cost),
            target_margin: self.target_margin.unwrap_or(fallback.target_margin),
        }
    }

    /// Give unnamed products their row label ("Product 3")
    pub fn fill_placeholder_names(&mut self) {
        for (idx, product) in self.products.iter_mut().enumerate() {
            if product.name.trim().is_empty() {
                product.name = ProductInput::placeholder_name(idx + 1);
            }
        }
    }

    /// Append rows, keeping their order and labelling unnamed ones
    pub fn extend_products(&mut self, products: impl IntoIterator<Item = ProductInput>) {
        self.products.extend(products);
        self.fill_placeholder_names();
    }

    /// Check the values present in the worksheet
    pub fn validate(&self, max_margin: f64) -> Result<(), InputError> {
        if let Some(fixed_cost) = self.fixed_cost {
            check_amount(fixed_cost, "fixed_cost", InputError::NegativeFixedCost)?;
        }
        if let Some(margin) = self.target_margin {
            GlobalSettings::new(0.0, margin).validate(max_margin)?;
        }
        for (idx, product) in self.products.iter().enumerate() {
            product.validate(idx + 1)?;
        }

        // Volume shares divide by this sum
        let total_volume = self.products.iter().fold(0.0, |acc, p| acc + p.volume);
        if !total_volume.is_finite() {
            return Err(InputError::NotFinite {
                field: "total volume".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String, serde_yml::Error> {
        serde_yml::to_string(self)
    }
}

/// Read product rows from CSV with a header row
///
/// Columns follow the worksheet field names (aliases included); missing
/// numeric columns default to 0. `source` names the input in errors.
pub fn read_products_csv<R: Read>(reader: R, source: &str) -> Result<Vec<ProductInput>, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.deserialize::<ProductInput>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| InputError::Csv {
            path: source.to_string(),
            message: e.to_string(),
        })
}

/// Read product rows from a CSV file
pub fn read_products_csv_file(path: &Path) -> Result<Vec<ProductInput>, InputError> {
    let source = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| InputError::Csv {
        path: source.clone(),
        message: e.to_string(),
    })?;
    read_products_csv(file, &source)
}
