//! Template generation for new worksheets

use chrono::{DateTime, Local};
use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

use crate::entities::ProductInput;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const WORKSHEET_TEMPLATE: &str = "worksheet.yaml.tera";

/// Context for worksheet generation
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub fixed_cost: f64,
    pub target_margin: f64,
    pub currency: Option<String>,
    pub product_count: usize,
    pub created: DateTime<Local>,
}

impl TemplateContext {
    pub fn new(fixed_cost: f64, target_margin: f64) -> Self {
        Self {
            fixed_cost,
            target_margin,
            currency: None,
            product_count: 0,
            created: Local::now(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_product_count(mut self, count: usize) -> Self {
        self.product_count = count;
        self
    }

    /// Placeholder names, escaped for a double-quoted YAML scalar
    fn names(&self) -> Vec<String> {
        (1..=self.product_count)
            .map(|row| yaml_quoted(&ProductInput::placeholder_name(row)))
            .collect()
    }
}

fn yaml_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Template generator using Tera
pub struct TemplateGenerator {
    tera: Tera,
}

#[derive(Debug, Error, miette::Diagnostic)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    #[diagnostic(code(pricecalc::template::not_found))]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    #[diagnostic(code(pricecalc::template::render))]
    RenderError(String),
}

impl TemplateGenerator {
    /// Create a new template generator with embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Generate a worksheet with placeholder products
    pub fn generate_worksheet(&self, ctx: &TemplateContext) -> Result<String, TemplateError> {
        let mut context = tera::Context::new();
        context.insert("fixed_cost", &ctx.fixed_cost);
        context.insert("target_margin", &ctx.target_margin);
        context.insert(
            "currency",
            &ctx.currency.as_deref().map(yaml_quoted).unwrap_or_default(),
        );
        context.insert("created_date", &ctx.created.format("%Y-%m-%d").to_string());
        context.insert("names", &ctx.names());

        // Try to use embedded template, fall back to hardcoded
        if self.tera.get_template_names().any(|n| n == WORKSHEET_TEMPLATE) {
            self.tera
                .render(WORKSHEET_TEMPLATE, &context)
                .map_err(|e| TemplateError::RenderError(e.to_string()))
        } else {
            Ok(self.hardcoded_worksheet_template(ctx))
        }
    }

    fn hardcoded_worksheet_template(&self, ctx: &TemplateContext) -> String {
        let mut out = format!(
            "# Pricing worksheet (created {})\n\nfixed_cost: {}\ntarget_margin: {}\n",
            ctx.created.format("%Y-%m-%d"),
            ctx.fixed_cost,
            ctx.target_margin,
        );
        if let Some(currency) = &ctx.currency {
            out.push_str(&format!("currency: \"{}\"\n", yaml_quoted(currency)));
        }

        let names = ctx.names();
        if names.is_empty() {
            out.push_str("products: []\n");
        } else {
            out.push_str("products:\n");
            for name in names {
                out.push_str(&format!(
                    "  - name: \"{}\"\n    volume: 0\n    variable_cost_per_unit: 0\n    current_price_per_unit: 0\n",
                    name
                ));
            }
        }
        out
    }
}

impl Default for TemplateGenerator {
    fn default() -> Self {
        Self::new().expect("Failed to create template generator")
    }
}
