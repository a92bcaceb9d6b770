use anyhow::Result;
use serde_json::Value;
use tracing::info;

use crate::{
    board::{
        cache::{SnapshotCache, ACTIONS_SNAPSHOT, BOARDS_SNAPSHOT, CARDS_SNAPSHOT},
        BoardClient,
    },
    settings::Settings,
};

/// Actions and cards of a board as returned by the API.
pub struct BoardSnapshot {
    pub actions: Value,
    pub cards: Value,
}

/// Prints `id<TAB>name` for every board of the configured user.
pub async fn process_boards_command(
    client: &impl BoardClient,
    cache: &SnapshotCache,
    settings: &Settings,
) -> Result<()> {
    let boards = client.boards(&settings.trello_user_name).await?;
    cache.store(BOARDS_SNAPSHOT, &boards).await?;
    for line in board_lines(&boards) {
        println!("{line}");
    }
    Ok(())
}

pub async fn process_actions_command(
    client: &impl BoardClient,
    cache: &SnapshotCache,
    settings: &Settings,
) -> Result<()> {
    let snapshot = fetch_board_snapshot(client, cache, settings).await?;
    println!(
        "Stored {} actions and {} cards in {:?}",
        snapshot.actions.as_array().map_or(0, Vec::len),
        snapshot.cards.as_array().map_or(0, Vec::len),
        cache.path("")
    );
    Ok(())
}

/// Downloads actions and cards of the configured board and refreshes their snapshots.
pub async fn fetch_board_snapshot(
    client: &impl BoardClient,
    cache: &SnapshotCache,
    settings: &Settings,
) -> Result<BoardSnapshot> {
    let board_id = &settings.trello_board_id;
    let (actions, cards) = tokio::try_join!(
        client.actions(board_id, settings.actions_limit),
        client.cards(board_id),
    )?;
    info!("Fetched board {board_id}");
    cache.store(ACTIONS_SNAPSHOT, &actions).await?;
    cache.store(CARDS_SNAPSHOT, &cards).await?;
    Ok(BoardSnapshot { actions, cards })
}

pub async fn load_board_snapshot(cache: &SnapshotCache) -> Result<BoardSnapshot> {
    Ok(BoardSnapshot {
        actions: cache.load(ACTIONS_SNAPSHOT).await?,
        cards: cache.load(CARDS_SNAPSHOT).await?,
    })
}

fn board_lines(boards: &Value) -> Vec<String> {
    boards
        .as_array()
        .into_iter()
        .flatten()
        .map(|board| {
            format!(
                "{}\t{}",
                board["id"].as_str().unwrap_or_default(),
                board["name"].as_str().unwrap_or_default()
            )
        })
        .collect()
}
