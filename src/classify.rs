use unicode_normalization::UnicodeNormalization;

use crate::models::Domain;

/// Keyword rules in priority order; the first containment match wins, so the
/// table must stay a slice, never an unordered map.
const DOMAIN_RULES: &[(Domain, &[&str])] = &[
    (Domain::TechnicalSupport, &["computer", "technical"]),
    (Domain::Logistics, &["packing", "moving", "organization"]),
    (Domain::Operations, &["assistant", "staffing"]),
    (Domain::VisualMedia, &["photo"]),
];

/// NFC-normalize and lowercase. Shared by classification, review search, and
/// keyword tallies so all text matching agrees on case folding.
pub fn fold(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

/// Map a raw task category to its business domain. Total and deterministic:
/// unmatched categories land in the `GeneralOps` catch-all.
pub fn classify(category: &str) -> Domain {
    let folded = fold(category);
    for (domain, keywords) in DOMAIN_RULES {
        if keywords.iter().any(|k| folded.contains(k)) {
            return *domain;
        }
    }
    Domain::GeneralOps
}
