use crate::filter::FilteredView;
use crate::models::Record;

/// Column order matches the source row pattern, so an exported table can be
/// read back by the same parser.
pub const CSV_HEADER: &str = "Category,Date,Client Name,Rating,Review";

/// Superset header carrying the derived domain, for display downloads.
pub const CSV_HEADER_WITH_DOMAIN: &str = "Category,Date,Client Name,Rating,Review,Domain";

/// Render the filtered view as a conventional CSV table. Dates are
/// `YYYY-MM-DD`, missing dates and ratings become empty fields, and fields
/// containing commas, quotes, or newlines are quoted with doubled inner
/// quotes.
pub fn to_csv(view: &FilteredView) -> String {
    render(view, false)
}

/// Same table with a trailing `Domain` column.
pub fn to_csv_with_domain(view: &FilteredView) -> String {
    render(view, true)
}

fn render(view: &FilteredView, with_domain: bool) -> String {
    let header = if with_domain {
        CSV_HEADER_WITH_DOMAIN
    } else {
        CSV_HEADER
    };
    let mut out = String::with_capacity(64 * (view.len() + 1));
    out.push_str(header);
    out.push('\n');
    for r in &view.records {
        out.push_str(&record_row(r, with_domain));
        out.push('\n');
    }
    out
}

fn record_row(r: &Record, with_domain: bool) -> String {
    let date = r
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let rating = r.rating.map(|v| format!("{:.1}", v)).unwrap_or_default();
    let mut fields = vec![
        escape(&r.category),
        date,
        escape(&r.client_name),
        rating,
        escape(&r.review),
    ];
    if with_domain {
        fields.push(escape(r.domain.label()));
    }
    fields.join(",")
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
