use std::{collections::HashSet, sync::Arc};

use chrono::{DateTime, FixedOffset};
use tracing::{debug, instrument, trace};

use crate::utils::hours::Hours;

use super::{
    comment::{parse_comment, TimeEntry},
    entities::{ActionRecord, CardSpend},
    error::ReportError,
};

/// Turns comment actions into per card spend. Actions before `start` are ignored, an action made
/// exactly at `start` counts. Cards appear in the order their first time entry was seen.
#[instrument(skip(actions), fields(actions = actions.len()))]
pub fn aggregate_actions(
    actions: &[ActionRecord],
    start: DateTime<FixedOffset>,
) -> Result<Vec<CardSpend>, ReportError> {
    let mut entries = Vec::<TimeEntry>::new();
    for (index, action) in actions.iter().enumerate() {
        let moment = action_moment(index, action)?;
        let card_id = action_card_id(index, action)?;
        if moment < start {
            trace!("Skipping action #{index} from {moment}");
            continue;
        }
        match parse_comment(card_id, &action.data.text) {
            Some(entry) => entries.push(entry),
            None => trace!("Action #{index} is not a time entry"),
        }
    }
    debug!("Found {} time entries", entries.len());

    let mut seen = HashSet::new();
    let card_ids = entries
        .iter()
        .filter(|entry| seen.insert(entry.card_id.clone()))
        .map(|entry| entry.card_id.clone())
        .collect::<Vec<_>>();

    let mut total = Hours::ZERO;
    let mut spends = Vec::with_capacity(card_ids.len());
    for card_id in card_ids {
        let spend = card_spend(card_id, &entries)?;
        total = total
            .checked_add(spend.spent)
            .filter(|total| *total <= Hours::MAX)
            .ok_or_else(|| ReportError::SpendOutOfRange {
                card_id: spend.card_id.to_string(),
                hours: format!("{} + {}", total, spend.spent),
            })?;
        spends.push(spend);
    }
    Ok(spends)
}

fn card_spend(card_id: Arc<str>, entries: &[TimeEntry]) -> Result<CardSpend, ReportError> {
    let card_entries = entries
        .iter()
        .filter(|entry| entry.card_id == card_id)
        .collect::<Vec<_>>();
    let spent = card_entries.iter().map(|entry| entry.spent).sum::<f64>();
    let Some(spent) = Hours::try_from_hours(spent) else {
        return Err(ReportError::SpendOutOfRange {
            card_id: card_id.to_string(),
            hours: spent.to_string(),
        });
    };
    let comments = card_entries
        .iter()
        .filter(|entry| !entry.comment.is_empty())
        .map(|entry| entry.comment.clone())
        .collect();
    Ok(CardSpend {
        card_id,
        comments,
        spent,
    })
}

fn action_moment(
    index: usize,
    action: &ActionRecord,
) -> Result<DateTime<FixedOffset>, ReportError> {
    let date = action
        .date
        .as_deref()
        .ok_or(ReportError::MissingField {
            index,
            field: "date",
        })?;
    DateTime::parse_from_rfc3339(date).map_err(|e| ReportError::InputFormat {
        index,
        field: "date",
        value: date.to_string(),
        reason: e.to_string(),
    })
}

fn action_card_id(index: usize, action: &ActionRecord) -> Result<Arc<str>, ReportError> {
    action
        .data
        .card
        .as_ref()
        .and_then(|card| card.id.as_deref())
        .map(Arc::from)
        .ok_or(ReportError::MissingField {
            index,
            field: "data.card.id",
        })
}
