//! loomview - tracked template interpolation for editor interface views
//!
//! This library renders documents from templates with `{key}` placeholders
//! filled by named content producers ("partials"), and records the final
//! byte range of every substitution so interpolated sections remain
//! individually addressable and updatable after render. It is the engine
//! behind editor "interface" views: dashboards whose status lines and
//! sections can be point-updated without a full re-render.
//!
//! # Example
//!
//! ```rust
//! use loomview::render_str;
//!
//! let out = render_str("On branch {branch}.\n", &[("branch", "main")]);
//! assert_eq!(out.text, "On branch main.\n");
//!
//! let region = &out.regions[0];
//! assert_eq!(region.key, "branch");
//! assert_eq!(&out.text[region.start..region.end], "main");
//! ```

pub mod config;
pub mod error;
pub mod interface;
pub mod template;
pub mod view;

pub use config::{ConfigError, InterfaceConfig};
pub use error::{ProducerError, Span, TemplateError};
pub use interface::{preprocess_template, Interface, InterfaceBuilder};
pub use template::{
    adjust, render, render_strict, Content, Partial, PartialRegistry, Producer, Region, Rendered,
};
pub use view::{GetOrCreate, ScratchBuffer, ViewBinder, ViewId, ViewRegistry};

use thiserror::Error;

/// Errors surfacing from interface construction and rendering
#[derive(Debug, Error)]
pub enum InterfaceError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl InterfaceError {
    /// Format the error with template source context where available
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            InterfaceError::Template(err) => err.format(source, filename),
            other => other.to_string(),
        }
    }
}

/// Render a template against a literal key/value mapping.
///
/// Convenience entry point for callers that already have their content in
/// hand and do not need producers or a bound view.
///
/// # Example
///
/// ```rust
/// use loomview::render_str;
///
/// let out = render_str("{a}{b}", &[("a", "1"), ("b", "22")]);
/// assert_eq!(out.text, "122");
/// assert_eq!(out.regions.len(), 2);
/// ```
pub fn render_str(template: &str, pairs: &[(&str, &str)]) -> Rendered {
    let content: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    template::render(template, &content)
}
