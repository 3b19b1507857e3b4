use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use serde::Serialize;

use crate::classify::fold;
use crate::filter::FilteredView;

/// One point of the running review count over time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub total: usize,
}

/// Review count per calendar month, for the volume bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyVolume {
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

/// Count and mean of the ratings present in a view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    pub count: usize,
    pub mean: f32,
}

/// Sentiment/quality keyword table used by the analytics tab. Labels map to
/// the substrings tallied for them; treated as data so callers can swap it.
pub const DEFAULT_KEYWORD_GROUPS: &[(&str, &[&str])] = &[
    ("praise", &["great", "amazing", "excellent", "wonderful", "kind"]),
    ("speed", &["fast", "quick", "prompt", "on time"]),
    ("quality", &["professional", "thorough", "careful", "efficient"]),
    ("trust", &["reliable", "recommend", "trust"]),
];

/// Cumulative review count ascending by date, 1-based. Records with a missing
/// date are excluded from the series, so the final total equals the number of
/// dated records in the view.
pub fn cumulative_by_date(view: &FilteredView) -> Vec<CumulativePoint> {
    let mut dated: Vec<NaiveDate> = view.records.iter().filter_map(|r| r.date).collect();
    dated.sort();
    dated
        .into_iter()
        .enumerate()
        .map(|(i, date)| CumulativePoint { date, total: i + 1 })
        .collect()
}

/// Review count grouped by (year, month), ascending. Undated records are
/// excluded, same policy as `cumulative_by_date`.
pub fn monthly_volume(view: &FilteredView) -> Vec<MonthlyVolume> {
    let mut by_month: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for r in &view.records {
        if let Some(d) = r.date {
            *by_month.entry((d.year(), d.month())).or_insert(0) += 1;
        }
    }
    by_month
        .into_iter()
        .map(|((year, month), count)| MonthlyVolume { year, month, count })
        .collect()
}

/// Non-overlapping substring counts over the case-folded concatenation of all
/// review text, summed per label. Empty review text contributes nothing.
pub fn keyword_frequency(
    view: &FilteredView,
    groups: &[(&str, &[&str])],
) -> BTreeMap<String, usize> {
    let corpus = view.records.iter().map(|r| fold(&r.review)).join(" ");
    let mut out = BTreeMap::new();
    for (label, needles) in groups {
        let count: usize = needles
            .iter()
            .map(|n| {
                let needle = fold(n);
                corpus.matches(needle.as_str()).count()
            })
            .sum();
        out.insert((*label).to_string(), count);
    }
    out
}

/// Mean rating over records that carry one; `None` when no ratings survive
/// the filter.
pub fn rating_summary(view: &FilteredView) -> Option<RatingSummary> {
    let ratings: Vec<f32> = view.records.iter().filter_map(|r| r.rating).collect();
    if ratings.is_empty() {
        return None;
    }
    Some(RatingSummary {
        count: ratings.len(),
        mean: ratings.iter().sum::<f32>() / ratings.len() as f32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::load_str;
    use crate::filter::{apply, FilterSpec};

    const SAMPLE: &str = "\
Category,Date,Client Name,Rating,Review
Computer Help,2024-03-01,Alice J.,5.0,\"Fast, efficient, and kind.\"
Packing Services,2024-01-10,Bob K.,4.5,Careful with every box
Photo Shoots,2024-02-20,Cara L.,5.0,Creative and fast
Errands,2024-02-01,Dan M.,4.0,Reliable as always
";

    fn full_view() -> FilteredView {
        let ds = load_str(SAMPLE);
        apply(&ds, &FilterSpec::select_all(&ds))
    }

    #[test]
    fn cumulative_counts_ascend_to_view_size() {
        let view = full_view();
        let points = cumulative_by_date(&view);
        assert_eq!(points.len(), view.len());
        assert!(points.windows(2).all(|w| w[0].total < w[1].total
            && w[0].date <= w[1].date));
        assert_eq!(points.last().unwrap().total, view.len());
        assert_eq!(
            points.first().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
    }

    #[test]
    fn undated_records_are_left_out_of_the_series() {
        let content = "\
Category,Date,Client Name,Rating,Review
Errands,2024-13-45,A,4.0,undated
Errands,2024-02-01,B,4.0,dated
";
        let ds = load_str(content);
        let view = apply(&ds, &FilterSpec::select_all(&ds));
        assert_eq!(view.len(), 2);
        assert_eq!(cumulative_by_date(&view).len(), 1);
    }

    #[test]
    fn monthly_volume_groups_by_calendar_month() {
        let volumes = monthly_volume(&full_view());
        assert_eq!(
            volumes,
            [
                MonthlyVolume { year: 2024, month: 1, count: 1 },
                MonthlyVolume { year: 2024, month: 2, count: 2 },
                MonthlyVolume { year: 2024, month: 3, count: 1 },
            ]
        );
    }

    #[test]
    fn keyword_frequency_counts_substrings_case_folded() {
        let counts = keyword_frequency(&full_view(), DEFAULT_KEYWORD_GROUPS);
        // "fast" appears in two reviews; "kind" once
        assert_eq!(counts["speed"], 2);
        assert_eq!(counts["praise"], 1);
        assert_eq!(counts["quality"], 2); // "efficient" + "careful"
        assert_eq!(counts["trust"], 1); // "reliable"
    }

    #[test]
    fn empty_view_yields_zero_counts() {
        let view = FilteredView::default();
        assert!(cumulative_by_date(&view).is_empty());
        assert!(monthly_volume(&view).is_empty());
        let counts = keyword_frequency(&view, DEFAULT_KEYWORD_GROUPS);
        assert!(counts.values().all(|&c| c == 0));
        assert_eq!(rating_summary(&view), None);
    }

    #[test]
    fn rating_summary_averages_present_ratings() {
        let summary = rating_summary(&full_view()).unwrap();
        assert_eq!(summary.count, 4);
        assert!((summary.mean - 4.625).abs() < 1e-6);
    }
}
