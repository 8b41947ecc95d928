//! Input types - settings, product rows and worksheets

pub mod product;
pub mod settings;
pub mod validation;
pub mod worksheet;

pub use product::ProductInput;
pub use settings::{margin_from_percent, GlobalSettings};
pub use validation::InputError;
pub use worksheet::{read_products_csv, read_products_csv_file, Worksheet};
