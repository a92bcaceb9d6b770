//! Turns `plus! <spent>/<target> <comment>` card comments into a daily time report.
//!
//! The pipeline is synchronous and does no IO: actions go through [aggregate] into per card
//! spend, [classify] picks the project and category labels, [builder] folds everything into a
//! [DailyReport] and [render] writes it out.

pub mod aggregate;
pub mod builder;
pub mod classify;
pub mod comment;
pub mod entities;
pub mod error;
pub mod render;
pub mod tree;

use chrono::{DateTime, FixedOffset};
use tracing::{info, instrument};

use aggregate::aggregate_actions;
use builder::build_daily_report;
use classify::classify_labels;
use entities::{ActionRecord, CardIndex};
use error::ReportError;
use tree::DailyReport;

/// What the report is grouped by. Names are label texts, in the order they should be shown.
#[derive(Debug, Clone, Default)]
pub struct Grouping<'a> {
    pub projects: &'a [String],
    pub categories: &'a [String],
}

/// Runs the whole pipeline for the actions made at or after `start`. The report is titled with
/// the date of `start` in its own offset.
#[instrument(skip_all, fields(start = %start))]
pub fn generate_report(
    actions: &[ActionRecord],
    cards: &CardIndex,
    start: DateTime<FixedOffset>,
    grouping: Grouping<'_>,
) -> Result<DailyReport, ReportError> {
    let spends = aggregate_actions(actions, start)?;
    let targets = classify_labels(cards, &spends, grouping.projects, grouping.categories);
    let report = build_daily_report(start.date_naive(), &spends, cards, &targets);
    info!(
        "Built report with {} projects, {}h spent",
        report.projects.len(),
        report.spent
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use crate::utils::hours::Hours;

    use super::{
        entities::{index_cards, ActionRecord, CardRecord},
        error::ReportError,
        generate_report,
        render::render_outline,
        Grouping,
    };

    const ACTIONS: &str = r#"[
        {"id": "5", "type": "commentCard", "date": "2024-05-01T09:30:00.000000Z",
         "data": {"text": "plus! 0.75/1 triage", "card": {"id": "C", "name": "Inbox"}}},
        {"id": "4", "type": "commentCard", "date": "2024-05-01T08:00:00.000000Z",
         "data": {"text": "plus! 1.5/2 endpoint", "card": {"id": "B", "name": "API"}}},
        {"id": "3", "type": "commentCard", "date": "2024-05-01T07:00:00.000000Z",
         "data": {"text": "plus! 1/4", "card": {"id": "A", "name": "Design"}}},
        {"id": "2", "type": "commentCard", "date": "2024-05-01T01:00:00.000000Z",
         "data": {"text": "plus! 1/4 mockups", "card": {"id": "A", "name": "Design"}}},
        {"id": "1", "type": "commentCard", "date": "2024-04-30T10:00:00.000000Z",
         "data": {"text": "plus! 8/8 yesterday", "card": {"id": "A", "name": "Design"}}}
    ]"#;

    const CARDS: &str = r#"[
        {"id": "A", "name": "Design", "labels": [{"id": "lx", "name": "ProjectX"}]},
        {"id": "B", "name": "API", "labels": [{"id": "lx", "name": "ProjectX"},
                                              {"id": "ly", "name": "CategoryY"}]},
        {"id": "C", "name": "Inbox", "labels": []}
    ]"#;

    #[test]
    fn test_generate_report() -> anyhow::Result<()> {
        let actions: Vec<ActionRecord> = serde_json::from_str(ACTIONS)?;
        let cards = index_cards(serde_json::from_str::<Vec<CardRecord>>(CARDS)?);
        let start = FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 0, 0, 0)
            .unwrap();
        let projects = vec!["ProjectX".to_string()];
        let categories = vec!["CategoryY".to_string()];

        let report = generate_report(
            &actions,
            &cards,
            start,
            Grouping {
                projects: &projects,
                categories: &categories,
            },
        )?;

        assert_eq!(report.spent, Hours::from_hundredths(425));
        let expected = "\
# 2024/05/01 Daily Report (4.25h)

## ProjectX (3.50h)

- CategoryY (1.50h)
    - 1.50h API
        - endpoint
- Uncategorized (2.00h)
    - 2.00h Design
        - mockups

## Unassigned (0.75h)

- Uncategorized (0.75h)
    - 0.75h Inbox
        - triage
";
        assert_eq!(render_outline(&report), expected);
        Ok(())
    }

    #[test]
    fn test_generate_report_with_huge_spend() -> anyhow::Result<()> {
        let actions: Vec<ActionRecord> = serde_json::from_str(
            r#"[
            {"date": "2024-05-01T09:30:00.000000Z",
             "data": {"text": "plus! 99999999999999999999999/1", "card": {"id": "A"}}},
            {"date": "2024-05-01T09:00:00.000000Z",
             "data": {"text": "plus! 99999999999999999999999/1", "card": {"id": "B"}}}
        ]"#,
        )?;
        let cards = index_cards(serde_json::from_str::<Vec<CardRecord>>(CARDS)?);
        let start = FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 0, 0, 0)
            .unwrap();

        let result = generate_report(&actions, &cards, start, Grouping::default());
        assert!(matches!(
            result,
            Err(ReportError::SpendOutOfRange { ref card_id, .. }) if card_id == "A"
        ));
        Ok(())
    }
}
