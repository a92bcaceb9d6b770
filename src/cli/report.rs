use std::{fmt::Display, path::PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use clap::{CommandFactory, Parser, ValueEnum};
use serde_json::Value;
use tracing::info;

use crate::{
    board::{cache::SnapshotCache, BoardClient},
    report::{
        entities::{index_cards, ActionRecord, CardRecord},
        generate_report,
        render::{render_outline, render_structured},
    },
    settings::Settings,
    utils::{clock::Clock, time::report_start},
};

use super::{
    fetch::{fetch_board_snapshot, load_board_snapshot},
    Args,
};

pub const OUTLINE_FILE: &str = "report.md";
pub const STRUCTURED_FILE: &str = "report.json";

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum DateStyle {
    #[default]
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Default, Parser)]
pub struct ReportCommand {
    #[arg(
        long = "start",
        short,
        help = "Only count comments made after this moment. Examples are \"yesterday\", \
                \"15/03/2025\", \"12:00 16/03/2025\". Defaults to today's midnight"
    )]
    start_date: Option<String>,
    #[arg(
        long,
        default_value_t = DateStyle::Uk,
        help = "Style of dates used during parsing. For Uk it's day/month/year. \
                For Us it's month/day/year"
    )]
    date_style: DateStyle,
    #[arg(
        long = "days",
        default_value_t = false,
        help = "Take the start as a whole day. \
                For example \"yesterday\" becomes yesterday's midnight"
    )]
    treat_as_days: bool,
    #[arg(
        long,
        help = "Use the stored snapshots instead of fetching the board. \
                Fetch them with `cardspend actions`"
    )]
    mock: bool,
    #[arg(long, help = "Directory for report.md and report.json. Overrides outputDir")]
    output_dir: Option<PathBuf>,
}

/// Command to process `report`. Gets the board data, builds the report and writes both
/// renderings. Nothing is written if any step fails.
pub async fn process_report_command(
    ReportCommand {
        start_date,
        date_style,
        treat_as_days,
        mock,
        output_dir,
    }: ReportCommand,
    client: &impl BoardClient,
    cache: &SnapshotCache,
    settings: &Settings,
    clock: &impl Clock,
) -> Result<()> {
    let start = resolve_start(
        start_date.as_deref(),
        date_style,
        treat_as_days,
        settings.utc_offset()?,
        clock,
    )?;
    info!("Reporting spend since {start}");

    let snapshot = if mock {
        load_board_snapshot(cache).await?
    } else {
        fetch_board_snapshot(client, cache, settings).await?
    };
    let actions = parse_records::<ActionRecord>(snapshot.actions, "actions")?;
    let cards = index_cards(parse_records::<CardRecord>(snapshot.cards, "cards")?);

    let report = generate_report(&actions, &cards, start, settings.grouping())?;
    let outline = render_outline(&report);
    let structured = render_structured(&report)?;

    let output_dir = output_dir.unwrap_or_else(|| settings.output_dir.clone());
    tokio::fs::create_dir_all(&output_dir).await?;
    let outline_path = output_dir.join(OUTLINE_FILE);
    let structured_path = output_dir.join(STRUCTURED_FILE);
    tokio::fs::write(&outline_path, outline)
        .await
        .with_context(|| format!("Can't write {outline_path:?}"))?;
    tokio::fs::write(&structured_path, structured)
        .await
        .with_context(|| format!("Can't write {structured_path:?}"))?;
    println!(
        "{}h spent. Written {outline_path:?} and {structured_path:?}",
        report.spent
    );
    Ok(())
}

fn parse_records<T: serde::de::DeserializeOwned>(value: Value, name: &str) -> Result<Vec<T>> {
    serde_json::from_value(value).with_context(|| format!("Board {name} have an unexpected shape"))
}

/// Also provides the default start: midnight of today, in the configured offset or in local time.
fn resolve_start(
    start_date: Option<&str>,
    date_style: DateStyle,
    treat_as_days: bool,
    offset: Option<FixedOffset>,
    clock: &impl Clock,
) -> Result<DateTime<FixedOffset>> {
    let now = clock.time();
    let dialect = date_style.into();
    let start = match offset {
        Some(offset) => {
            report_start(start_date, now.with_timezone(&offset), dialect, treat_as_days)
        }
        None => report_start(start_date, now.with_timezone(&Local), dialect, treat_as_days),
    };
    start.map_err(|e| {
        Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate start date {e}"),
            )
            .into()
    })
}
