//! Interface composition: a template, its partials, and a bound view
//!
//! An [`Interface`] is a reusable document rendered from a template whose
//! interpolated sections stay addressable and updatable after the initial
//! render. It is declared through [`InterfaceBuilder`] with an explicit,
//! ordered list of partials, and talks to the host editor only through its
//! [`ViewBinder`].

use crate::config::InterfaceConfig;
use crate::template::{render, render_strict, Partial, PartialRegistry, Region};
use crate::view::ViewBinder;
use crate::InterfaceError;

/// A templated document bound to a live view
pub struct Interface<B: ViewBinder> {
    type_tag: String,
    template: String,
    config: InterfaceConfig,
    registry: PartialRegistry,
    regions: Vec<Region>,
    binder: B,
}

/// Declarative construction of an [`Interface`]: a type tag, a template,
/// a config, and an ordered list of partials.
pub struct InterfaceBuilder {
    type_tag: String,
    template: String,
    config: InterfaceConfig,
    partials: Vec<Partial>,
}

impl InterfaceBuilder {
    pub fn new(type_tag: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            template: template.into(),
            config: InterfaceConfig::default(),
            partials: Vec::new(),
        }
    }

    pub fn config(mut self, config: InterfaceConfig) -> Self {
        self.config = config;
        self
    }

    /// Declare a partial. Declaration order is the content computation
    /// order; a repeated key replaces the earlier declaration.
    pub fn partial(mut self, partial: Partial) -> Self {
        self.partials.push(partial);
        self
    }

    /// Bind to a view and finish construction. The template is preprocessed
    /// here (skip_first_line, dedent); no render happens yet.
    pub fn build<B: ViewBinder>(self, binder: B) -> Interface<B> {
        let template = preprocess_template(&self.template, &self.config);
        let mut registry = PartialRegistry::new();
        for partial in self.partials {
            registry.register(partial);
        }
        Interface {
            type_tag: self.type_tag,
            template,
            config: self.config,
            registry,
            regions: Vec::new(),
            binder,
        }
    }
}

impl<B: ViewBinder> Interface<B> {
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// The preprocessed template this interface renders from
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn config(&self) -> &InterfaceConfig {
        &self.config
    }

    pub fn binder(&self) -> &B {
        &self.binder
    }

    pub fn binder_mut(&mut self) -> &mut B {
        &mut self.binder
    }

    /// Regions recorded by the last render, with raw (un-namespaced) keys
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Full re-render.
    ///
    /// All content is computed before any buffer mutation, so a failing
    /// producer aborts the render with the previously rendered state still
    /// visible. On success the text and its namespaced regions reach the
    /// binder in a single `apply`; prior region bookkeeping is replaced
    /// wholesale, never leaked across renders.
    pub fn render(&mut self, nuke_cursors: bool) -> Result<(), InterfaceError> {
        let content = self.registry.compute_all()?;
        let rendered = if self.config.strict {
            render_strict(&self.template, &content)?
        } else {
            render(&self.template, &content)
        };

        let tagged: Vec<Region> = rendered
            .regions
            .iter()
            .map(|r| Region::new(self.tag(&r.key), r.start, r.end))
            .collect();
        self.regions = rendered.regions;
        self.binder.apply(&rendered.text, &tagged, nuke_cursors);
        Ok(())
    }

    /// Point-update a single named section without a full re-render
    pub fn update(&mut self, key: &str, content: &str) {
        let tag = self.tag(key);
        self.binder.replace_named_region(&tag, content);
    }

    fn tag(&self, key: &str) -> String {
        format!("{}.{}", self.config.namespace, key)
    }
}

/// Apply skip_first_line and dedent to a raw template
pub fn preprocess_template(template: &str, config: &InterfaceConfig) -> String {
    let mut template = if config.skip_first_line {
        match template.find('\n') {
            Some(newline) => template[newline + 1..].to_string(),
            None => String::new(),
        }
    } else {
        template.to_string()
    };

    if config.dedent > 0 {
        template = template
            .split('\n')
            .map(|line| {
                // Dedent counts characters, not bytes, so indented columns
                // holding multibyte glyphs strip cleanly. Short lines pass
                // through untouched.
                if line.chars().count() >= config.dedent {
                    line.char_indices()
                        .nth(config.dedent)
                        .map(|(idx, _)| &line[idx..])
                        .unwrap_or("")
                } else {
                    line
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
    }

    template
}
