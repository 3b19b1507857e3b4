use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::debug;

use crate::classify::fold;
use crate::models::{Dataset, Domain, Record};

/// User-chosen constraints for one query. Ephemeral; owned by the caller and
/// passed by reference into `apply`. Both selections are inclusion filters:
/// an empty selection yields an empty result, not "everything".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub domains: BTreeSet<Domain>,
    pub categories: BTreeSet<String>,
    pub keyword: Option<String>,
}

impl FilterSpec {
    /// The dashboard default: every domain and category present in the
    /// dataset selected, no keyword.
    pub fn select_all(dataset: &Dataset) -> Self {
        let domains: BTreeSet<Domain> = dataset.records.iter().map(|r| r.domain).collect();
        let categories = available_categories(dataset, &domains);
        FilterSpec {
            domains,
            categories,
            keyword: None,
        }
    }

    /// Drop selected categories that are no longer reachable under the
    /// current domain selection; stale selections must not silently persist.
    pub fn pruned(mut self, dataset: &Dataset) -> Self {
        let available = available_categories(dataset, &self.domains);
        self.categories.retain(|c| available.contains(c));
        self
    }
}

/// Date-descending subsequence of a dataset satisfying one `FilterSpec`.
/// Recomputed per query; owns no state.
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    pub records: Vec<Record>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Categories a caller may offer for selection: exactly those present among
/// records whose domain is currently selected.
pub fn available_categories(dataset: &Dataset, domains: &BTreeSet<Domain>) -> BTreeSet<String> {
    dataset
        .records
        .iter()
        .filter(|r| domains.contains(&r.domain))
        .map(|r| r.category.clone())
        .collect()
}

/// Apply a filter spec: domain AND category inclusion, then the optional
/// case-insensitive keyword match on review text, then sort date-descending.
/// Records with a missing date sort last; source order is kept on ties.
pub fn apply(dataset: &Dataset, spec: &FilterSpec) -> FilteredView {
    let keyword = spec
        .keyword
        .as_deref()
        .map(|k| fold(k.trim()))
        .filter(|k| !k.is_empty());

    let mut records: Vec<Record> = dataset
        .records
        .iter()
        .filter(|r| spec.domains.contains(&r.domain) && spec.categories.contains(&r.category))
        .filter(|r| match &keyword {
            Some(k) => fold(&r.review).contains(k.as_str()),
            None => true,
        })
        .cloned()
        .collect();

    records.sort_by(|a, b| match (a.date, b.date) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    debug!(
        "Filter applied - domains={}, categories={}, keyword={}, matched={}/{}",
        spec.domains.len(),
        spec.categories.len(),
        keyword.as_deref().unwrap_or("-"),
        records.len(),
        dataset.len()
    );

    FilteredView { records }
}
