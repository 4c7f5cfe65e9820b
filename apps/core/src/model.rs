use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("index entry title must not be empty")]
    EmptyTitle,
    #[error("index entry href must not be empty (title: {0})")]
    EmptyHref(String),
}

/// Display grouping for an index entry. Never used for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Chapter,
    Tool,
    Type,
    Config,
    Feature,
    Hook,
    Output,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::Chapter => "Chapter",
            Self::Tool => "Tool",
            Self::Type => "Type",
            Self::Config => "Config",
            Self::Feature => "Feature",
            Self::Hook => "Hook",
            Self::Output => "Output",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIndexEntry", into = "RawIndexEntry")]
pub struct IndexEntry {
    pub title: String,
    pub href: String,
    pub category: Category,
    pub keywords: Vec<String>,
    lowered_title: String,
}

impl IndexEntry {
    pub fn new(
        title: &str,
        href: &str,
        category: Category,
        keywords: &[&str],
    ) -> Result<Self, ModelError> {
        Self::from_owned(
            title.to_string(),
            href.to_string(),
            category,
            keywords.iter().map(|k| k.to_string()).collect(),
        )
    }

    pub fn from_owned(
        title: String,
        href: String,
        category: Category,
        keywords: Vec<String>,
    ) -> Result<Self, ModelError> {
        if title.trim().is_empty() {
            return Err(ModelError::EmptyTitle);
        }
        if href.trim().is_empty() {
            return Err(ModelError::EmptyHref(title));
        }

        let lowered_title = title.to_lowercase();
        Ok(Self {
            title,
            href,
            category,
            keywords,
            lowered_title,
        })
    }

    pub fn lowered_title(&self) -> &str {
        &self.lowered_title
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawIndexEntry {
    title: String,
    href: String,
    category: Category,
    #[serde(default)]
    keywords: Vec<String>,
}

impl TryFrom<RawIndexEntry> for IndexEntry {
    type Error = ModelError;

    fn try_from(raw: RawIndexEntry) -> Result<Self, Self::Error> {
        IndexEntry::from_owned(raw.title, raw.href, raw.category, raw.keywords)
    }
}

impl From<IndexEntry> for RawIndexEntry {
    fn from(entry: IndexEntry) -> Self {
        Self {
            title: entry.title,
            href: entry.href,
            category: entry.category,
            keywords: entry.keywords,
        }
    }
}

/// Read-only, ordered corpus. Clones share one allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentIndex {
    entries: Arc<[IndexEntry]>,
}

impl DocumentIndex {
    pub fn new(entries: Vec<IndexEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn shares_storage_with(&self, other: &DocumentIndex) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl From<Vec<IndexEntry>> for DocumentIndex {
    fn from(entries: Vec<IndexEntry>) -> Self {
        Self::new(entries)
    }
}
