use std::{io::ErrorKind, path::PathBuf};

use anyhow::{anyhow, Result};
use fs4::tokio::AsyncFileExt;
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncWriteExt},
};
use tracing::debug;

pub const BOARDS_SNAPSHOT: &str = "debug_boards.json";
pub const ACTIONS_SNAPSHOT: &str = "debug_actions.json";
pub const CARDS_SNAPSHOT: &str = "debug_cards.json";

/// Local copies of board API responses. Reports can be rebuilt from them without touching the
/// network.
pub struct SnapshotCache {
    dir: PathBuf,
}

impl SnapshotCache {
    pub fn new(dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Overwrites the snapshot `name`. Written with 4 space indentation, non ascii text is kept
    /// as is.
    pub async fn store(&self, name: &str, value: &Value) -> Result<()> {
        let mut buffer = Vec::<u8>::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        value.serialize(&mut serializer)?;
        buffer.push(b'\n');

        let path = self.path(name);
        debug!("Storing snapshot {path:?}");
        let mut file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .await?;

        file.lock_exclusive()?;
        let result = Self::overwrite(&mut file, &buffer).await;
        file.unlock_async().await?;
        result
    }

    async fn overwrite(file: &mut File, buffer: &[u8]) -> Result<()> {
        file.set_len(0).await?;
        file.write_all(buffer).await?;
        file.flush().await?;
        Ok(())
    }

    pub async fn load(&self, name: &str) -> Result<Value> {
        let path = self.path(name);
        debug!("Loading snapshot {path:?}");
        let mut file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(anyhow!(
                    "Snapshot {path:?} doesn't exist. Fetch it first with `cardspend actions`"
                ));
            }
            Err(e) => Err(e)?,
        };

        file.lock_shared()?;
        let mut text = String::new();
        let read = file.read_to_string(&mut text).await;
        file.unlock_async().await?;
        read?;

        serde_json::from_str(&text).map_err(|e| anyhow!("Snapshot {path:?} is corrupted: {e}"))
    }
}
