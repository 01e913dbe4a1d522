//! View binding seam and the per-view singleton registry
//!
//! The rendering core never touches a live buffer directly: it hands the
//! rendered text and its tagged regions to a [`ViewBinder`], the seam behind
//! which a host editor lives. [`ScratchBuffer`] is the in-memory binder used
//! by tests and the CLI. [`ViewRegistry`] tracks live interface instances per
//! view so construction stays idempotent per (type, context) pair.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::template::{adjust, Region};

/// Seam to the host editor's buffer API.
pub trait ViewBinder {
    /// Atomically replace the buffer contents with `text` and mark each
    /// region's range as a named, queryable span. Spans from a previous
    /// apply are dropped first; regions never outlive the render that
    /// recorded them.
    fn apply(&mut self, text: &str, regions: &[Region], reset_cursor: bool);

    /// Replace the contents of every span tagged `key` in place, used for
    /// point-updates without a full re-render. An unknown tag is a silent
    /// no-op.
    fn replace_named_region(&mut self, key: &str, content: &str);
}

/// In-memory [`ViewBinder`]: a text buffer with tagged spans and a cursor.
#[derive(Debug, Clone, Default)]
pub struct ScratchBuffer {
    text: String,
    spans: Vec<Region>,
    cursor: Option<usize>,
}

impl ScratchBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Ranges of every span tagged `key`, in buffer order
    pub fn spans(&self, key: &str) -> Vec<(usize, usize)> {
        self.spans
            .iter()
            .filter(|r| r.key == key)
            .map(|r| (r.start, r.end))
            .collect()
    }

    /// Text of the first span tagged `key`
    pub fn span_text(&self, key: &str) -> Option<&str> {
        self.spans
            .iter()
            .find(|r| r.key == key)
            .map(|r| &self.text[r.start..r.end])
    }
}

impl ViewBinder for ScratchBuffer {
    fn apply(&mut self, text: &str, regions: &[Region], reset_cursor: bool) {
        self.text = text.to_string();
        self.spans = regions.to_vec();
        if reset_cursor || self.cursor.is_none() {
            self.cursor = Some(0);
        } else if let Some(cursor) = self.cursor {
            self.cursor = Some(cursor.min(self.text.len()));
        }
    }

    fn replace_named_region(&mut self, key: &str, content: &str) {
        // Same-key spans are recorded in ascending buffer order, so walking
        // the span list front to back keeps offsets consistent as each
        // splice shifts the spans behind it.
        for i in 0..self.spans.len() {
            if self.spans[i].key != key {
                continue;
            }
            let start = self.spans[i].start;
            let orig_len = self.spans[i].len();
            self.text.replace_range(start..start + orig_len, content);
            adjust(&mut self.spans, start, orig_len, content.len());
            self.spans[i].end = start + content.len();
        }
    }
}

/// Identity of a live host-editor view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(pub u64);

#[derive(Debug)]
struct ViewEntry<T> {
    type_tag: String,
    context: String,
    instance: T,
}

/// Outcome of [`ViewRegistry::get_or_create`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetOrCreate {
    /// A live instance for the (type, context) pair already existed
    Existing(ViewId),
    /// A new instance was created and registered
    Created(ViewId),
}

impl GetOrCreate {
    pub fn id(&self) -> ViewId {
        match self {
            GetOrCreate::Existing(id) | GetOrCreate::Created(id) => *id,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, GetOrCreate::Created(_))
    }
}

/// Registry of live interface instances, keyed by view identity.
///
/// Holds at most one entry per (type_tag, context) pair. The registry is an
/// explicit object passed by reference, not ambient global state; the host is
/// expected to serialize access on its single command path. `remove` is the
/// view-close hook.
#[derive(Debug)]
pub struct ViewRegistry<T> {
    entries: HashMap<ViewId, ViewEntry<T>>,
}

impl<T> Default for ViewRegistry<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> ViewRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        id: ViewId,
        type_tag: impl Into<String>,
        context: impl Into<String>,
        instance: T,
    ) {
        self.entries.insert(
            id,
            ViewEntry {
                type_tag: type_tag.into(),
                context: context.into(),
                instance,
            },
        );
    }

    pub fn lookup(&self, id: ViewId) -> Option<&T> {
        self.entries.get(&id).map(|e| &e.instance)
    }

    pub fn lookup_mut(&mut self, id: ViewId) -> Option<&mut T> {
        self.entries.get_mut(&id).map(|e| &mut e.instance)
    }

    /// Drop the entry for a closed view, returning its instance
    pub fn remove(&mut self, id: ViewId) -> Option<T> {
        self.entries.remove(&id).map(|e| e.instance)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the live view for a (type, context) pair, if one is open
    pub fn find_singleton(&self, type_tag: &str, context: &str) -> Option<ViewId> {
        self.entries
            .iter()
            .find(|(_, e)| e.type_tag == type_tag && e.context == context)
            .map(|(id, _)| *id)
    }

    /// Return the existing view for the pair, or create and register one.
    ///
    /// Construction is idempotent from the caller's perspective: at most one
    /// live instance per (type, context) pair at any time.
    pub fn get_or_create(
        &mut self,
        type_tag: &str,
        context: &str,
        create: impl FnOnce() -> (ViewId, T),
    ) -> GetOrCreate {
        if let Some(id) = self.find_singleton(type_tag, context) {
            return GetOrCreate::Existing(id);
        }
        let (id, instance) = create();
        self.register(id, type_tag, context, instance);
        GetOrCreate::Created(id)
    }
}
