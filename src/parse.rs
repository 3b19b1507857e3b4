use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ParsedRecord;

/// Anchored row pattern: category, ISO date, client name, one-decimal rating,
/// then the free-text remainder (which may carry embedded commas and quotes).
static ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^,]+),(\d{4}-\d{2}-\d{2}),([^,]+),(\d\.\d),(.*)$").unwrap());

/// Fragment left behind by broken upstream quoting: a comma, an optional
/// quote, a decimal number, and everything after it.
static STRAY_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r#",\s*"?\d+\.\d.*$"#).unwrap());

/// Parse one raw line into its five fields. Lines that do not match the row
/// pattern yield `None` and are skipped by the assembler; there is no partial
/// recovery.
pub fn parse_line(line: &str) -> Option<ParsedRecord> {
    let caps = ROW.captures(line)?;
    Some(ParsedRecord {
        category: caps[1].trim().to_string(),
        date_text: caps[2].trim().to_string(),
        client_name: caps[3].trim().to_string(),
        rating_text: caps[4].trim().to_string(),
        review_text: clean_review_tail(&caps[5]),
    })
}

/// Best-effort cleanup of the free-text tail: drop a trailing stray rating
/// fragment, remove one outer quote pair, and undo CSV-style doubled quotes.
/// Idempotent on already-clean text.
pub fn clean_review_tail(raw: &str) -> String {
    let stripped = STRAY_TAIL.replace(raw, "");
    let trimmed = stripped.trim();
    strip_outer_quotes(trimmed).replace("\"\"", "\"").trim().to_string()
}

fn strip_outer_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_line() {
        let rec = parse_line("Computer Help,2024-03-01,Alice J.,5.0,No complaints").unwrap();
        assert_eq!(rec.category, "Computer Help");
        assert_eq!(rec.date_text, "2024-03-01");
        assert_eq!(rec.client_name, "Alice J.");
        assert_eq!(rec.rating_text, "5.0");
        assert_eq!(rec.review_text, "No complaints");
    }

    #[test]
    fn unquotes_review_with_embedded_commas() {
        let rec =
            parse_line(r#"Computer Help,2024-03-01,Alice J.,5.0,"Fast, efficient, and kind.""#)
                .unwrap();
        assert_eq!(rec.review_text, "Fast, efficient, and kind.");
    }

    #[test]
    fn strips_stray_rating_fragment() {
        let rec = parse_line(r#"Photo Shoots,2024-01-02,Carol,4.0,"Nice work",4.5,misquoted"#)
            .unwrap();
        assert_eq!(rec.review_text, "Nice work");

        let rec = parse_line(r#"Photo Shoots,2024-01-02,Carol,4.0,Great job,"4.5""#).unwrap();
        assert_eq!(rec.review_text, "Great job");
    }

    #[test]
    fn collapses_doubled_quotes() {
        let rec =
            parse_line(r#"Errands,2024-05-05,Dan,4.5,"She said ""wow"" twice""#).unwrap();
        assert_eq!(rec.review_text, r#"She said "wow" twice"#);
    }

    #[test]
    fn rejects_non_matching_lines() {
        assert!(parse_line("just some text").is_none());
        assert!(parse_line("Category,Date,Client Name,Rating,Review").is_none());
        // rating must be one digit, point, one digit
        assert!(parse_line("Errands,2024-05-05,Dan,10.0,fine").is_none());
        assert!(parse_line("").is_none());
    }

    #[test]
    fn tail_cleanup_is_idempotent() {
        for raw in [
            r#""Fast, efficient, and kind.""#,
            r#"Great job,"4.5""#,
            "plain text",
            r#""She said ""wow"" twice""#,
        ] {
            let once = clean_review_tail(raw);
            assert_eq!(clean_review_tail(&once), once);
        }
    }
}
