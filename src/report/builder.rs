use std::{collections::HashSet, sync::Arc};

use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

use super::{
    classify::{cards_with_label, TargetLabels},
    entities::{CardIndex, CardSpend, Label},
    tree::{
        CategoryReport, DailyReport, ProjectReport, TaskReport, UNASSIGNED_TITLE,
        UNCATEGORIZED_TITLE,
    },
};

/// Card ids that already went into a bucket. It's passed into every classification step and
/// handed back with the newly claimed ids, so a card is never counted twice.
#[derive(Debug, Default, Clone)]
pub struct Claimed(HashSet<Arc<str>>);

impl Claimed {
    pub fn contains(&self, card_id: &str) -> bool {
        self.0.contains(card_id)
    }

    fn claim<'a>(mut self, spends: impl IntoIterator<Item = &'a CardSpend>) -> Self {
        self.0
            .extend(spends.into_iter().map(|spend| spend.card_id.clone()));
        self
    }
}

/// Builds the Daily -> Project -> Category -> Task tree.
///
/// Spend on cards missing from `cards` is dropped before anything is classified. Projects and
/// categories follow the order of `targets`, fallback buckets come last and only show up when
/// they have tasks. A card carrying several project labels goes to the first one.
#[instrument(skip_all, fields(spends = spends.len()))]
pub fn build_daily_report(
    date: NaiveDate,
    spends: &[CardSpend],
    cards: &CardIndex,
    targets: &TargetLabels,
) -> DailyReport {
    let known = spends
        .iter()
        .filter(|spend| {
            let present = cards.contains_key(&spend.card_id);
            if !present {
                warn!(
                    "Dropping {} hours spent on unknown card {}",
                    spend.spent, spend.card_id
                );
            }
            present
        })
        .collect::<Vec<_>>();

    let mut claimed = Claimed::default();
    let mut projects = Vec::new();
    for label in &targets.projects {
        let project;
        (project, claimed) = build_project(label, &known, cards, &targets.categories, claimed);
        projects.extend(project);
    }

    let unassigned = known
        .iter()
        .filter(|spend| !claimed.contains(&spend.card_id))
        .copied()
        .collect::<Vec<_>>();
    if !unassigned.is_empty() {
        debug!("{} cards are not assigned to a project", unassigned.len());
        projects.push(ProjectReport::new(
            UNASSIGNED_TITLE,
            build_categories(&unassigned, cards, &targets.categories),
        ));
    }

    DailyReport::new(date, projects)
}

fn build_project(
    label: &Label,
    spends: &[&CardSpend],
    cards: &CardIndex,
    categories: &[Label],
    claimed: Claimed,
) -> (Option<ProjectReport>, Claimed) {
    let members = cards_with_label(cards, label);
    let selected = spends
        .iter()
        .filter(|spend| members.contains(&spend.card_id) && !claimed.contains(&spend.card_id))
        .copied()
        .collect::<Vec<_>>();
    let claimed = claimed.claim(selected.iter().copied());
    if selected.is_empty() {
        return (None, claimed);
    }
    let report = ProjectReport::new(
        label.text.to_string(),
        build_categories(&selected, cards, categories),
    );
    (Some(report), claimed)
}

/// Splits the spend of a single project into categories, with its own [Claimed] set.
fn build_categories(
    spends: &[&CardSpend],
    cards: &CardIndex,
    categories: &[Label],
) -> Vec<CategoryReport> {
    let mut claimed = Claimed::default();
    let mut reports = Vec::new();
    for label in categories {
        let members = cards_with_label(cards, label);
        let tasks;
        (tasks, claimed) = take_tasks(spends, cards, |id| members.contains(id), claimed);
        if !tasks.is_empty() {
            reports.push(CategoryReport::new(label.text.to_string(), tasks));
        }
    }

    let (rest, _) = take_tasks(spends, cards, |_| true, claimed);
    if !rest.is_empty() {
        reports.push(CategoryReport::new(UNCATEGORIZED_TITLE, rest));
    }
    reports
}

fn take_tasks(
    spends: &[&CardSpend],
    cards: &CardIndex,
    is_member: impl Fn(&str) -> bool,
    claimed: Claimed,
) -> (Vec<TaskReport>, Claimed) {
    let taken = spends
        .iter()
        .filter(|spend| !claimed.contains(&spend.card_id) && is_member(&spend.card_id))
        .filter_map(|spend| Some((*spend, cards.get(&spend.card_id)?)))
        .collect::<Vec<_>>();
    let tasks = taken
        .iter()
        .map(|(spend, card)| TaskReport::new(card, spend))
        .collect();
    (tasks, claimed.claim(taken.iter().map(|(spend, _)| *spend)))
}
