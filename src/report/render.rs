use std::fmt::{self, Display};

use super::tree::DailyReport;

/// Markdown outline of a [DailyReport]:
///
/// ```txt
/// # 2024/05/01 Daily Report (4.25h)
///
/// ## ProjectX (3.50h)
///
/// - CategoryY (1.50h)
///     - 1.50h Fix login
///         - reproduced the bug
/// ```
pub struct Outline<'a>(pub &'a DailyReport);

impl Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "# {} ({}h)", report.title, report.spent)?;
        for project in &report.projects {
            writeln!(f)?;
            writeln!(f, "## {} ({}h)", project.title, project.spent)?;
            writeln!(f)?;
            for category in &project.categories {
                writeln!(f, "- {} ({}h)", category.title, category.spent)?;
                for task in &category.tasks {
                    writeln!(f, "    - {}h {}", task.spent, task.title)?;
                    for sub_task in &task.sub_tasks {
                        writeln!(f, "        - {sub_task}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

pub fn render_outline(report: &DailyReport) -> String {
    Outline(report).to_string()
}

/// JSON mirror of the tree with 2 space indentation. Keys keep field order: title, spent, then
/// the children.
pub fn render_structured(report: &DailyReport) -> serde_json::Result<String> {
    let mut text = serde_json::to_string_pretty(report)?;
    text.push('\n');
    Ok(text)
}
