//! Diagnostic errors for YAML input

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors from reading and parsing YAML files
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("failed to read file: {0}")]
    #[diagnostic(code(pricecalc::yaml::io))]
    Io(#[from] std::io::Error),
}

/// A YAML parse failure pointing at the offending location
#[derive(Debug, Error, Diagnostic)]
#[error("invalid YAML in {filename}: {message}")]
#[diagnostic(
    code(pricecalc::yaml::syntax),
    help("check the indentation and that numeric fields hold plain numbers")
)]
pub struct YamlSyntaxError {
    pub filename: String,
    pub message: String,
    pub line: Option<usize>,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,
}

impl YamlSyntaxError {
    /// Wrap a serde_yml error with the source it came from
    pub fn from_serde_error(err: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let location = err.location();
        let span = location.as_ref().map(|loc| {
            let offset = loc.index().min(content.len());
            let len = usize::from(offset < content.len());
            SourceSpan::from((offset, len))
        });

        Self {
            filename: filename.to_string(),
            message: err.to_string(),
            line: location.map(|loc| loc.line()),
            src: NamedSource::new(filename, content.to_string()),
            span,
        }
    }
}
