//! Category indexing and filtering over a cache snapshot.
//!
//! Both operations are read-only projections: they never mutate the
//! snapshot they are given. Category names are compared case-insensitively
//! throughout; listings keep the first-seen original casing and are ordered
//! by the case-folded name so repeated calls on the same snapshot are
//! reproducible.

use std::collections::BTreeMap;

use crate::models::{CacheSnapshot, CategoryList};

/// List the distinct categories present in `snapshot`.
pub fn list_categories(snapshot: &CacheSnapshot) -> CategoryList {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for record in &snapshot.summaries {
        for name in &record.category {
            seen.entry(name.to_lowercase()).or_insert_with(|| name.clone());
        }
    }

    let categories: Vec<String> = seen.into_values().collect();
    CategoryList {
        total: categories.len(),
        categories,
    }
}

/// Project `snapshot` down to the records matching `category`.
///
/// A record matches when any of its category names equals the requested one,
/// ignoring case. An absent category yields an empty snapshot, not an error.
/// The result is a fresh snapshot with `total_articles` recomputed.
pub fn filter_by_category(snapshot: &CacheSnapshot, category: &str) -> CacheSnapshot {
    let wanted = category.to_lowercase();
    CacheSnapshot::new(
        snapshot
            .summaries
            .iter()
            .filter(|record| record.category.iter().any(|c| c.to_lowercase() == wanted))
            .cloned()
            .collect(),
    )
}
