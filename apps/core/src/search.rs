use crate::model::IndexEntry;

pub const MAX_RESULTS: usize = 8;

/// Filters `index` down to the entries matching `query`, in index order.
///
/// An empty query means search is inactive and yields nothing. The query is not
/// trimmed, so whitespace is matched literally.
pub fn search(index: &[IndexEntry], query: &str) -> Vec<IndexEntry> {
    if query.is_empty() || index.is_empty() {
        return Vec::new();
    }

    let lowered_query = query.to_lowercase();
    index
        .iter()
        .filter(|entry| matches(entry, &lowered_query))
        .take(MAX_RESULTS)
        .cloned()
        .collect()
}

/// `lowered_query` must already be lowercase; keywords are compared as stored.
pub fn matches(entry: &IndexEntry, lowered_query: &str) -> bool {
    entry.lowered_title().contains(lowered_query)
        || entry
            .keywords
            .iter()
            .any(|keyword| keyword.contains(lowered_query))
}
