//! Categorized, filterable view over a flat container listing.
//!
//! Folders never appear in the explorer: they are left out of every bucket,
//! out of the `all` total, and out of every filtered list.

use shared::domain::{FileRecord, FileType};

pub const ALL_CATEGORY: &str = "all";
/// Selector emitted by the upload entry of the type menu. Never a filter value.
pub const UPLOAD_SENTINEL: &str = "upload";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLabels {
    pub all: String,
    pub image: String,
    pub document: String,
    pub other: String,
}

impl Default for CategoryLabels {
    fn default() -> Self {
        Self {
            all: "All".into(),
            image: "Images".into(),
            document: "Documents".into(),
            other: "Other".into(),
        }
    }
}

impl CategoryLabels {
    pub fn for_type(&self, kind: FileType) -> &str {
        match kind {
            FileType::Image => &self.image,
            FileType::Document => &self.document,
            FileType::Folder | FileType::Other => &self.other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub id: String,
    pub label: String,
    pub count: usize,
}

/// Active type filter. `All` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeSelector {
    #[default]
    All,
    Kind(FileType),
}

impl TypeSelector {
    /// Returns `None` for the upload sentinel and for names that are not a known category.
    pub fn parse(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_ascii_lowercase();
        match lower.as_str() {
            ALL_CATEGORY => Some(Self::All),
            UPLOAD_SENTINEL => None,
            other => FileType::ALL
                .iter()
                .copied()
                .find(|kind| kind.key() == other)
                .map(Self::Kind),
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::All => ALL_CATEGORY,
            Self::Kind(kind) => kind.key(),
        }
    }

    pub fn matches(self, record: &FileRecord) -> bool {
        if record.kind.is_folder() {
            return false;
        }
        match self {
            Self::All => true,
            Self::Kind(kind) => record.kind == kind,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub selector: TypeSelector,
    pub query: Option<String>,
}

/// Buckets the listing by type in first-seen order, `all` first.
pub fn categorize(listing: &[FileRecord], labels: &CategoryLabels) -> Vec<CategoryCount> {
    let mut buckets = vec![CategoryCount {
        id: ALL_CATEGORY.to_string(),
        label: labels.all.clone(),
        count: listing.len(),
    }];

    for record in listing {
        if record.kind.is_folder() {
            buckets[0].count = buckets[0].count.saturating_sub(1);
            continue;
        }

        let key = record.kind.key();
        match buckets.iter_mut().skip(1).find(|bucket| bucket.id == key) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(CategoryCount {
                id: key.to_string(),
                label: labels.for_type(record.kind).to_string(),
                count: 1,
            }),
        }
    }

    buckets
}

pub fn filter_by_type(listing: &[FileRecord], selector: TypeSelector) -> Vec<FileRecord> {
    listing
        .iter()
        .filter(|record| selector.matches(record))
        .cloned()
        .collect()
}

/// Case-insensitive match of `query` against the name stem. An empty query matches everything.
pub fn matches_query(record: &FileRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    record
        .name_stem()
        .to_lowercase()
        .contains(&query.to_lowercase())
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
