//! Regions: tagged ranges marking where substituted content landed

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` in rendered text, tagged with the
/// key of the partial whose content occupies it.
///
/// Offsets are byte offsets into the rendered string, so `&text[start..end]`
/// yields the substituted content directly. Regions are recomputed from
/// scratch on every render and only describe the text of the render that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub key: String,
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn new(key: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            key: key.into(),
            start,
            end,
        }
    }

    /// Length of the tagged range in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Shift previously recorded regions to account for an edit at `idx` that
/// replaced `orig_len` bytes with `new_len` bytes.
///
/// Every region whose start lies strictly after `idx` moves by the length
/// delta; regions starting at or before `idx` are untouched (they are either
/// unrelated earlier content or the substitution that produced `idx` itself,
/// recorded after this call). Region lengths are preserved. Runs in linear
/// time over `regions`.
pub fn adjust(regions: &mut [Region], idx: usize, orig_len: usize, new_len: usize) {
    let diff = new_len as isize - orig_len as isize;
    if diff == 0 {
        return;
    }
    for region in regions.iter_mut() {
        if region.start > idx {
            region.start = (region.start as isize + diff) as usize;
            region.end = (region.end as isize + diff) as usize;
        }
    }
}
