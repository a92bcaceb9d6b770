use chrono::NaiveDate;
use serde::Serialize;

use crate::utils::hours::Hours;

use super::entities::{Card, CardSpend};

pub const UNASSIGNED_TITLE: &str = "Unassigned";
pub const UNCATEGORIZED_TITLE: &str = "Uncategorized";
pub const DAILY_TITLE_SUFFIX: &str = "Daily Report";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskReport {
    pub title: String,
    pub spent: Hours,
    pub sub_tasks: Vec<String>,
}

impl TaskReport {
    pub fn new(card: &Card, spend: &CardSpend) -> Self {
        Self {
            title: card.title.to_string(),
            spent: spend.spent,
            sub_tasks: spend.comments.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    pub title: String,
    pub spent: Hours,
    pub tasks: Vec<TaskReport>,
}

impl CategoryReport {
    pub fn new(title: impl Into<String>, tasks: Vec<TaskReport>) -> Self {
        Self {
            title: title.into(),
            spent: tasks.iter().map(|v| v.spent).sum(),
            tasks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectReport {
    pub title: String,
    pub spent: Hours,
    pub categories: Vec<CategoryReport>,
}

impl ProjectReport {
    pub fn new(title: impl Into<String>, categories: Vec<CategoryReport>) -> Self {
        Self {
            title: title.into(),
            spent: categories.iter().map(|v| v.spent).sum(),
            categories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    pub title: String,
    pub spent: Hours,
    pub projects: Vec<ProjectReport>,
}

impl DailyReport {
    pub fn new(date: NaiveDate, projects: Vec<ProjectReport>) -> Self {
        Self {
            title: daily_title(date),
            spent: projects.iter().map(|v| v.spent).sum(),
            projects,
        }
    }

    pub fn tasks(&self) -> impl Iterator<Item = &TaskReport> {
        self.projects
            .iter()
            .flat_map(|project| project.categories.iter())
            .flat_map(|category| category.tasks.iter())
    }
}

pub fn daily_title(date: NaiveDate) -> String {
    format!("{} {DAILY_TITLE_SUFFIX}", date.format("%Y/%m/%d"))
}
