use chrono::NaiveDate;

use crate::models::ParsedRecord;

/// Typed fields coerced from one parsed row. Unparseable dates and ratings
/// become `None`; they never surface as errors.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFields {
    pub category: String,
    pub date: Option<NaiveDate>,
    pub client_name: String,
    pub rating: Option<f32>,
    pub review: String,
}

/// Coerce raw field text into typed values. Pure, and independent of the
/// classifier.
pub fn normalize(parsed: ParsedRecord) -> NormalizedFields {
    let date = NaiveDate::parse_from_str(&parsed.date_text, "%Y-%m-%d").ok();
    let rating = parsed.rating_text.parse::<f32>().ok();
    NormalizedFields {
        category: parsed.category,
        date,
        client_name: parsed.client_name,
        rating,
        review: parsed.review_text,
    }
}
