use std::sync::{Arc, LazyLock};

use regex::Regex;

/// `plus! <spent>/<target> <comment>`. The whole comment must follow the pattern.
static PLUS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\Aplus! (\d+(?:\.\d+)?)/(\d+(?:\.\d+)?)(?: (.*))?\z")
        .expect("plus! pattern should be a valid regex")
});

/// Time entry extracted from a single card comment.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    pub card_id: Arc<str>,
    pub comment: String,
    pub spent: f64,
    /// Planned hours from the denominator. Reports don't use it yet.
    pub target: f64,
}

/// Returns [None] when the comment isn't a time entry.
pub fn parse_comment(card_id: Arc<str>, text: &str) -> Option<TimeEntry> {
    let captures = PLUS_PATTERN.captures(text)?;
    let spent = captures.get(1)?.as_str().parse::<f64>().ok()?;
    let target = captures.get(2)?.as_str().parse::<f64>().ok()?;
    let comment = captures
        .get(3)
        .map(|v| v.as_str().to_string())
        .unwrap_or_default();
    Some(TimeEntry {
        card_id,
        comment,
        spent,
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::parse_comment;

    #[test]
    fn test_parse_with_comment() {
        let entry = parse_comment("c1".into(), "plus! 2/8 fixed bug").unwrap();
        assert_eq!(entry.spent, 2.0);
        assert_eq!(entry.target, 8.0);
        assert_eq!(entry.comment, "fixed bug");
        assert_eq!(&*entry.card_id, "c1");
    }

    #[test]
    fn test_parse_without_comment() {
        let entry = parse_comment("c1".into(), "plus! 1.5/4").unwrap();
        assert_eq!(entry.spent, 1.5);
        assert_eq!(entry.comment, "");

        let entry = parse_comment("c1".into(), "plus! 0.25/0.5 ").unwrap();
        assert_eq!(entry.spent, 0.25);
        assert_eq!(entry.comment, "");
    }

    #[test]
    fn test_parse_keeps_precision() {
        let entry = parse_comment("c1".into(), "plus! 0.333333/1 thinking").unwrap();
        assert_eq!(entry.spent, 0.333333);
    }

    #[test]
    fn test_parse_rejects_other_text() {
        for text in [
            "not a match",
            "",
            "plus! 2 fixed bug",
            "plus!2/8",
            "plus! -1/8",
            "plus! 2/8x",
            "well plus! 2/8 fixed bug",
            "plus! 2/8 fixed\nbug",
            "Plus! 2/8",
            "plus! .5/1",
        ] {
            assert_eq!(parse_comment("c1".into(), text), None, "{text:?}");
        }
    }
}
