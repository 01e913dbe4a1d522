//! Template interpolation with region tracking
//!
//! This module is the core of the crate: given a template string with
//! `{key}` placeholders and an ordered registry of content producers, it
//! computes all content, substitutes each placeholder, and records the final
//! byte range of every substitution so interpolated sections stay
//! individually addressable after render.
//!
//! # Example
//!
//! ```rust
//! use loomview::{Partial, PartialRegistry, render};
//!
//! let mut registry = PartialRegistry::new();
//! registry.register(Partial::text("branch", || "main".to_string()));
//!
//! let content = registry.compute_all().unwrap();
//! let out = render("On branch {branch}.\n", &content);
//! assert_eq!(out.text, "On branch main.\n");
//! assert_eq!(&out.text[out.regions[0].start..out.regions[0].end], "main");
//! ```

mod region;
mod registry;
mod renderer;

pub use region::{adjust, Region};
pub use registry::{Content, Partial, PartialRegistry, Producer};
pub use renderer::{render, render_strict, Rendered};
