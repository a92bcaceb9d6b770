use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap},
    hash::{Hash, Hasher},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::utils::hours::Hours;

/// A single `commentCard` action as returned by the board API. Everything is optional here so
/// that the aggregator can report exactly which field was missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActionRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub data: ActionData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActionData {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub card: Option<CardRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CardRef {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub labels: Vec<LabelRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Board label. Two labels are the same label when their ids match, whatever text they carry.
#[derive(Debug, Clone)]
pub struct Label {
    pub id: Arc<str>,
    pub text: Arc<str>,
}

impl Label {
    pub fn new(id: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Label {}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl From<LabelRecord> for Label {
    fn from(LabelRecord { id, name }: LabelRecord) -> Self {
        Label::new(id, name)
    }
}

#[derive(Debug, Clone)]
pub struct Card {
    pub id: Arc<str>,
    pub title: Arc<str>,
    pub labels: BTreeSet<Label>,
}

impl Card {
    pub fn has_label(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl From<CardRecord> for Card {
    fn from(CardRecord { id, name, labels }: CardRecord) -> Self {
        Card {
            id: id.into(),
            title: name.into(),
            labels: labels.into_iter().map(Label::from).collect(),
        }
    }
}

/// Every card of the board, keyed by card id.
pub type CardIndex = HashMap<Arc<str>, Card>;

pub fn index_cards(cards: impl IntoIterator<Item = CardRecord>) -> CardIndex {
    cards
        .into_iter()
        .map(Card::from)
        .map(|card| (card.id.clone(), card))
        .collect()
}

/// Total time spent on a single card within the reporting window.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSpend {
    pub card_id: Arc<str>,
    pub comments: Vec<String>,
    pub spent: Hours,
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{index_cards, ActionRecord, CardRecord, Label};

    #[test]
    fn test_label_identity_ignores_text() {
        let a = Label::new("l1", "Project");
        let b = Label::new("l1", "Renamed project");
        assert_eq!(a, b);
        assert_eq!(HashSet::from([a, b]).len(), 1);
        assert_ne!(Label::new("l1", "Project"), Label::new("l2", "Project"));
    }

    #[test]
    fn test_card_records_deserialize() -> anyhow::Result<()> {
        let cards: Vec<CardRecord> = serde_json::from_str(
            r#"[
                {"id": "c1", "name": "Fix login", "idList": "x",
                 "labels": [{"id": "l1", "name": "ProjectX", "color": "red"},
                            {"id": "l1", "name": "ProjectX"}]},
                {"id": "c2", "name": "Plain card"}
            ]"#,
        )?;
        let index = index_cards(cards);
        assert_eq!(index.len(), 2);
        assert_eq!(index["c1"].labels.len(), 1);
        assert!(index["c1"].has_label(&Label::new("l1", "")));
        assert!(index["c2"].labels.is_empty());
        assert_eq!(&*index["c2"].title, "Plain card");
        Ok(())
    }

    #[test]
    fn test_action_records_tolerate_missing_fields() -> anyhow::Result<()> {
        let actions: Vec<ActionRecord> = serde_json::from_str(
            r#"[
                {"id": "a1", "type": "commentCard", "date": "2024-05-01T01:02:03.456Z",
                 "data": {"text": "plus! 1/2", "card": {"id": "c1", "name": "Card"}}},
                {"id": "a2", "data": {}}
            ]"#,
        )?;
        assert_eq!(actions[0].data.card.as_ref().and_then(|c| c.id.as_deref()), Some("c1"));
        assert_eq!(actions[1].date, None);
        assert!(actions[1].data.card.is_none());
        assert_eq!(actions[1].data.text, "");
        Ok(())
    }
}
