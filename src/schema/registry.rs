//! Schema registry - embedded JSON schemas

use rust_embed::Embed;
use std::collections::HashMap;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// Name of the worksheet schema
pub const WORKSHEET_SCHEMA: &str = "worksheet";

/// Registry of JSON schemas for input validation
pub struct SchemaRegistry {
    schemas: HashMap<String, String>,
}

impl SchemaRegistry {
    /// Create a new schema registry with embedded schemas
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        for file in EmbeddedSchemas::iter() {
            let filename = file.as_ref();
            let Some(name) = filename.strip_suffix(".schema.json") else {
                continue;
            };
            if let Some(file) = EmbeddedSchemas::get(filename) {
                if let Ok(content) = std::str::from_utf8(&file.data) {
                    schemas.insert(name.to_string(), content.to_string());
                }
            }
        }

        Self { schemas }
    }

    /// Get a JSON schema by name (e.g. "worksheet")
    pub fn get(&self, name: &str) -> Option<&str> {
        self.schemas.get(name).map(|s| s.as_str())
    }

    /// Check if a schema exists
    pub fn has_schema(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
