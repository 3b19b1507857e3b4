use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// High-level business area derived from a raw task category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Domain {
    TechnicalSupport,
    Logistics,
    Operations,
    VisualMedia,
    GeneralOps,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::TechnicalSupport,
        Domain::Logistics,
        Domain::Operations,
        Domain::VisualMedia,
        Domain::GeneralOps,
    ];

    /// Display label used in exports and the category picker.
    pub fn label(&self) -> &'static str {
        match self {
            Domain::TechnicalSupport => "Technical Support",
            Domain::Logistics => "Logistics",
            Domain::Operations => "Operations",
            Domain::VisualMedia => "Visual Media",
            Domain::GeneralOps => "General Ops",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_'], "-").as_str() {
            "technical-support" => Ok(Domain::TechnicalSupport),
            "logistics" => Ok(Domain::Logistics),
            "operations" => Ok(Domain::Operations),
            "visual-media" => Ok(Domain::VisualMedia),
            "general-ops" => Ok(Domain::GeneralOps),
            other => Err(format!(
                "unknown domain '{}' (expected one of: technical-support, logistics, operations, visual-media, general-ops)",
                other
            )),
        }
    }
}

/// Raw capture groups from one source line, before any typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub category: String,
    pub date_text: String,
    pub client_name: String,
    pub rating_text: String,
    pub review_text: String,
}

/// One normalized review entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub category: String,
    pub date: Option<NaiveDate>,
    pub client_name: String,
    pub rating: Option<f32>,
    pub review: String,
    pub domain: Domain,
}

/// Assembled review table in source order. Immutable once built; rebuilt only
/// when the source content changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Lines that failed the row pattern and were skipped. Carried for
    /// auditability; skipping stays non-fatal.
    pub dropped_lines: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
