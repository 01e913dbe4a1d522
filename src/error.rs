//! Error types for template rendering

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in template text
pub type Span = std::ops::Range<usize>;

/// Failure raised by a content producer.
///
/// A producer failure aborts the whole render before any buffer mutation
/// has been applied, so the previously rendered state stays visible.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ProducerError(String);

impl ProducerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Error)]
pub enum TemplateError {
    /// A content producer failed while computing the keyed content
    #[error("partial '{key}' failed: {source}")]
    Producer {
        key: String,
        #[source]
        source: ProducerError,
    },

    /// Strict mode only: a template placeholder has no registered partial
    #[error("no partial registered for placeholder '{key}' at {span:?}")]
    MissingPartial { key: String, span: Span },
}

impl TemplateError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            TemplateError::MissingPartial { key, span } => {
                let mut buf = Vec::new();
                Report::build(ReportKind::Error, filename, span.start)
                    .with_message(format!("no partial registered for '{}'", key))
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message("this placeholder has no content producer")
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf)
                    .unwrap();
                String::from_utf8(buf).unwrap()
            }
            other => other.to_string(),
        }
    }
}
