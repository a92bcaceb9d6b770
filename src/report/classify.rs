use std::{collections::HashSet, sync::Arc};

use tracing::debug;

use super::entities::{CardIndex, CardSpend, Label};

/// Labels of spending cards that match the configured project and category names. Both lists
/// follow the order of the configured names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetLabels {
    pub projects: Vec<Label>,
    pub categories: Vec<Label>,
}

/// Cards without spend are never looked at. A label named both as a project and as a category
/// ends up in both lists.
pub fn classify_labels(
    cards: &CardIndex,
    spends: &[CardSpend],
    projects: &[String],
    categories: &[String],
) -> TargetLabels {
    let targets = target_labels(cards, spends);
    let projects = select_labels(&targets, projects);
    let categories = select_labels(&targets, categories);
    debug!(
        "Target labels: {} total, {} projects, {} categories",
        targets.len(),
        projects.len(),
        categories.len()
    );
    TargetLabels {
        projects,
        categories,
    }
}

/// Distinct labels of cards with recorded spend, in order of first appearance.
fn target_labels(cards: &CardIndex, spends: &[CardSpend]) -> Vec<Label> {
    let mut seen = HashSet::new();
    spends
        .iter()
        .filter_map(|spend| cards.get(&spend.card_id))
        .flat_map(|card| card.labels.iter())
        .filter(|label| seen.insert((*label).clone()))
        .cloned()
        .collect()
}

fn select_labels(targets: &[Label], names: &[String]) -> Vec<Label> {
    let mut selected = Vec::<Label>::new();
    for name in names {
        for label in targets.iter().filter(|label| *label.text == **name) {
            if !selected.contains(label) {
                selected.push(label.clone());
            }
        }
    }
    selected
}

/// Ids of every card carrying `label`.
pub fn cards_with_label(cards: &CardIndex, label: &Label) -> HashSet<Arc<str>> {
    cards
        .values()
        .filter(|card| card.has_label(label))
        .map(|card| card.id.clone())
        .collect()
}
