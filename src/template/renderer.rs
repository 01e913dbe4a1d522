//! Substitute-and-track rendering: fills `{key}` placeholders from a keyed
//! content mapping and records the final range of every substitution.

use serde::{Deserialize, Serialize};

use super::region::{adjust, Region};
use crate::error::{Span, TemplateError};

/// Fully substituted text plus the regions each substitution occupies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    pub text: String,
    pub regions: Vec<Region>,
}

/// Render `template` against a keyed content mapping.
///
/// For each `(key, value)` pair in mapping order, every occurrence of the
/// literal placeholder `{key}` in the current text is replaced with `value`
/// and a region recorded for it. Because substitution is keyed rather than a
/// single left-to-right pass, each replacement first shifts the
/// already-recorded regions that sit after it, keeping every region valid in
/// the final coordinate space regardless of mapping order.
///
/// Placeholders with no entry in the mapping are left verbatim and record no
/// region. Substituted values are never re-scanned, so a value containing a
/// brace sequence does not trigger further expansion. Placeholder search is
/// literal, not a grammar: keys must not contain `{` or `}`.
pub fn render(template: &str, content: &[(String, String)]) -> Rendered {
    let mut text = template.to_string();
    let mut regions: Vec<Region> = Vec::new();

    for (key, value) in content {
        let token = format!("{{{}}}", key);
        let mut cursor = 0;
        while let Some(found) = text[cursor..].find(&token) {
            let idx = cursor + found;
            adjust(&mut regions, idx, token.len(), value.len());
            regions.push(Region::new(key.clone(), idx, idx + value.len()));
            text.replace_range(idx..idx + token.len(), value);
            // Resume after the substituted value so the value itself is
            // never re-scanned for the same placeholder.
            cursor = idx + value.len();
        }
    }

    Rendered { text, regions }
}

/// Like [`render`], but fails on the first placeholder in the original
/// template that has no entry in the content mapping.
///
/// Validation runs against the template, not the output, so values that
/// happen to contain brace sequences never trip it. The returned error
/// carries the placeholder's span for diagnostic formatting.
pub fn render_strict(
    template: &str,
    content: &[(String, String)],
) -> Result<Rendered, TemplateError> {
    if let Some((key, span)) = first_missing_placeholder(template, content) {
        return Err(TemplateError::MissingPartial { key, span });
    }
    Ok(render(template, content))
}

/// Scan `template` for `{identifier}` tokens without a mapping entry.
/// Identifiers are ASCII alphanumerics and underscores.
fn first_missing_placeholder(
    template: &str,
    content: &[(String, String)],
) -> Option<(String, Span)> {
    let bytes = template.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'{' {
            let mut j = i + 1;
            while j < bytes.len() && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'_') {
                j += 1;
            }
            if j > i + 1 && j < bytes.len() && bytes[j] == b'}' {
                let key = &template[i + 1..j];
                if !content.iter().any(|(k, _)| k == key) {
                    return Some((key.to_string(), i..j + 1));
                }
                i = j + 1;
                continue;
            }
        }
        i += 1;
    }
    None
}
