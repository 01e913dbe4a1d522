//! Partial registry: named content producers feeding template interpolation

use std::fmt;

use crate::error::{ProducerError, TemplateError};

/// Zero-argument content producer, invoked exactly once per render
pub type Producer = Box<dyn Fn() -> Result<Content, ProducerError>>;

/// Result of invoking a partial's producer
pub enum Content {
    /// Plain string, substituted directly into the template
    Text(String),
    /// A sub-template plus nested partials. The sub-template is substituted
    /// verbatim at the partial's placeholder; the nested partials' outputs
    /// join the same flat keyed mapping so the sub-template's own
    /// placeholders can be filled in the same pass.
    Composite {
        template: String,
        partials: Vec<Partial>,
    },
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Content::Composite { template, partials } => f
                .debug_struct("Composite")
                .field("template", template)
                .field("partials", &partials.iter().map(Partial::key).collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// A named content producer
pub struct Partial {
    key: String,
    producer: Producer,
}

impl fmt::Debug for Partial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partial").field("key", &self.key).finish()
    }
}

impl Partial {
    pub fn new(key: impl Into<String>, producer: Producer) -> Self {
        Self {
            key: key.into(),
            producer,
        }
    }

    /// Partial producing a plain string
    pub fn text<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> String + 'static,
    {
        Self::new(key, Box::new(move || Ok(Content::Text(f()))))
    }

    /// Partial producing a plain string, with a fallible producer
    pub fn try_text<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Result<String, ProducerError> + 'static,
    {
        Self::new(key, Box::new(move || f().map(Content::Text)))
    }

    /// Partial producing a sub-template with nested partials
    pub fn composite<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> (String, Vec<Partial>) + 'static,
    {
        Self::new(
            key,
            Box::new(move || {
                let (template, partials) = f();
                Ok(Content::Composite { template, partials })
            }),
        )
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Invoke the producer
    pub fn produce(&self) -> Result<Content, ProducerError> {
        (self.producer)()
    }
}

/// Ordered registry of partials for one interface definition.
///
/// Registration order is preserved and determines the order content is
/// computed in; substitution itself is keyed, not positional, so order does
/// not affect correctness. Registering a key twice silently replaces the
/// earlier producer, with the key keeping its original position.
#[derive(Debug, Default)]
pub struct PartialRegistry {
    partials: Vec<Partial>,
}

impl PartialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a partial. A duplicate key replaces the earlier producer.
    pub fn register(&mut self, partial: Partial) {
        match self.partials.iter_mut().find(|p| p.key == partial.key) {
            Some(existing) => *existing = partial,
            None => self.partials.push(partial),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.partials.iter().any(|p| p.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.partials.iter().map(|p| p.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.partials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }

    /// Invoke every producer once, in registry order, and flatten composite
    /// results one level deep.
    ///
    /// A composite's key maps to its sub-template verbatim; each nested
    /// partial is then invoked once and its output inserted under the nested
    /// key. Key collisions are resolved later-write-wins, with the colliding
    /// key keeping its original position. A nested producer that itself
    /// returns a composite contributes only its sub-template in this pass;
    /// deeper layers are reached by subsequent renders.
    pub fn compute_all(&self) -> Result<Vec<(String, String)>, TemplateError> {
        let mut content: Vec<(String, String)> = Vec::new();

        for partial in &self.partials {
            let produced = partial.produce().map_err(|source| TemplateError::Producer {
                key: partial.key.clone(),
                source,
            })?;

            match produced {
                Content::Text(text) => insert_keyed(&mut content, &partial.key, text),
                Content::Composite { template, partials } => {
                    insert_keyed(&mut content, &partial.key, template);
                    for nested in &partials {
                        let nested_out =
                            nested.produce().map_err(|source| TemplateError::Producer {
                                key: nested.key.clone(),
                                source,
                            })?;
                        let text = match nested_out {
                            Content::Text(text) => text,
                            Content::Composite { template, .. } => template,
                        };
                        insert_keyed(&mut content, &nested.key, text);
                    }
                }
            }
        }

        Ok(content)
    }
}

fn insert_keyed(content: &mut Vec<(String, String)>, key: &str, value: String) {
    match content.iter_mut().find(|(k, _)| k == key) {
        Some((_, existing)) => *existing = value,
        None => content.push((key.to_string(), value)),
    }
}
