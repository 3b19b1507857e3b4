use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};
use xxhash_rust::xxh3::xxh3_64;

use crate::classify::{classify, fold};
use crate::models::{Dataset, Record};
use crate::normalize::normalize;
use crate::parse::parse_line;

/// Categories containing this phrase are removed from every assembled dataset.
pub const DEFAULT_EXCLUDED_PHRASE: &str = "Help Moving";

/// Read and assemble a dataset from a file. A missing or unreadable source
/// yields an empty dataset, never an error; callers must treat an empty
/// dataset as a valid, displayable state.
pub fn load_path(path: &Path) -> Dataset {
    match fs::read_to_string(path) {
        Ok(content) => {
            info!(
                "Loaded source - path={}, bytes={}",
                path.display(),
                content.len()
            );
            load_str(&content)
        }
        Err(e) => {
            warn!(
                "Source unavailable, serving empty dataset - path={}, error={}",
                path.display(),
                e
            );
            Dataset::default()
        }
    }
}

/// Assemble a dataset from raw file content with the default exclusion phrase.
pub fn load_str(content: &str) -> Dataset {
    load_str_with_exclusion(content, DEFAULT_EXCLUDED_PHRASE)
}

/// Full assembly pass: skip the header line, run parse → normalize → classify
/// per line, then apply the category exclusion rule as a whole-table filter.
/// Malformed lines are skipped and only tallied on `dropped_lines`.
pub fn load_str_with_exclusion(content: &str, excluded_phrase: &str) -> Dataset {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let excluded = fold(excluded_phrase);

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for line in content.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(parsed) => {
                let fields = normalize(parsed);
                let domain = classify(&fields.category);
                records.push(Record {
                    category: fields.category,
                    date: fields.date,
                    client_name: fields.client_name,
                    rating: fields.rating,
                    review: fields.review,
                    domain,
                });
            }
            None => dropped += 1,
        }
    }

    let before_exclusion = records.len();
    records.retain(|r| !fold(&r.category).contains(excluded.as_str()));
    debug!(
        "Dataset assembled - rows={}, excluded={}, dropped={}",
        records.len(),
        before_exclusion - records.len(),
        dropped
    );

    Dataset {
        records,
        dropped_lines: dropped,
    }
}

/// Memoizes assembled datasets keyed on an xxh3 hash of the raw content, so
/// repeated loads of unchanged content never re-parse.
#[derive(Default)]
pub struct DatasetCache {
    built: HashMap<u64, Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, content: &str) -> Arc<Dataset> {
        let key = xxh3_64(content.as_bytes());
        if let Some(ds) = self.built.get(&key) {
            debug!("Dataset cache hit - key={:016x}", key);
            return Arc::clone(ds);
        }
        let ds = Arc::new(load_str(content));
        self.built.insert(key, Arc::clone(&ds));
        ds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Domain;

    const SAMPLE: &str = "\
Category,Date,Client Name,Rating,Review
Computer Help,2024-03-01,Alice J.,5.0,\"Fast, efficient, and kind.\"
Help Moving Services,2024-02-15,Bob K.,4.5,No review
";

    #[test]
    fn assembles_and_excludes_help_moving() {
        let ds = load_str(SAMPLE);
        assert_eq!(ds.len(), 1);
        let rec = &ds.records[0];
        assert_eq!(rec.category, "Computer Help");
        assert_eq!(rec.date, chrono::NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(rec.rating, Some(5.0));
        assert_eq!(rec.domain, Domain::TechnicalSupport);
        assert_eq!(rec.review, "Fast, efficient, and kind.");
    }

    #[test]
    fn exclusion_is_case_insensitive() {
        let content = "\
Category,Date,Client Name,Rating,Review
HELP MOVING boxes,2024-02-15,Bob K.,4.5,ok
Errands,2024-02-16,Cara,4.0,fine
";
        let ds = load_str(content);
        assert_eq!(ds.len(), 1);
        assert!(ds
            .records
            .iter()
            .all(|r| !fold(&r.category).contains("help moving")));
    }

    #[test]
    fn malformed_lines_are_counted_not_fatal() {
        let content = "\
Category,Date,Client Name,Rating,Review
Errands,2024-02-16,Cara,4.0,fine
this line is garbage
Errands,not-a-row
";
        let ds = load_str(content);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.dropped_lines, 2);
    }

    #[test]
    fn unparseable_date_keeps_the_record_with_missing_field() {
        // "2024-13-45" fits the row pattern's digit shape but is not a
        // calendar date.
        let content = "\
Category,Date,Client Name,Rating,Review
Errands,2024-13-45,Cara,4.0,fine
";
        let ds = load_str(content);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].date, None);
        assert_eq!(ds.records[0].rating, Some(4.0));
    }

    #[test]
    fn tolerates_leading_bom() {
        let with_bom = format!("\u{feff}{}", SAMPLE);
        assert_eq!(load_str(&with_bom).len(), load_str(SAMPLE).len());
    }

    #[test]
    fn missing_file_yields_empty_dataset() {
        let ds = load_path(Path::new("/nonexistent/reviews.csv"));
        assert!(ds.is_empty());
        assert_eq!(ds.dropped_lines, 0);
    }

    #[test]
    fn cache_returns_same_dataset_for_same_content() {
        let mut cache = DatasetCache::new();
        let a = cache.load(SAMPLE);
        let b = cache.load(SAMPLE);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), 1);
    }
}
