use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::event::Event;

/// 予定を読み込むためのリポジトリ。
#[cfg_attr(test, mockall::automock)]
pub trait EventRepository {
    /// すべての予定を取得する。
    fn read_events(&self) -> Result<Vec<Event>>;
}

/// JSONファイルから予定を読み込む。
///
/// ファイルは予定の配列で、各要素は次の形式とする。
///
/// ```json
/// { "title": "standup", "date": "2025-03-10", "startTime": "09:00", "endTime": "09:15" }
/// ```
pub struct JsonEventFile {
    path: PathBuf,
}

impl JsonEventFile {
    /// 新しい`JsonEventFile`を返す。
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventRepository for JsonEventFile {
    /// ファイルから予定を読み込む。
    ///
    /// ファイルが存在しない場合は予定がないものとして空の`Vec`を返す。
    fn read_events(&self) -> Result<Vec<Event>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    "Events file not found, showing calendar without events: {}",
                    self.path.display()
                );
                return Ok(vec![]);
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read events file: {}", self.path.display())
                })
            }
        };

        let events = parse_events(&content)
            .with_context(|| format!("Failed to parse events file: {}", self.path.display()))?;
        info!("Loaded {} events from {}", events.len(), self.path.display());

        Ok(events)
    }
}

/// JSON文字列から予定の配列をパースする。
pub fn parse_events(json: &str) -> Result<Vec<Event>> {
    let events = serde_json::from_str::<Vec<Event>>(json).context("Failed to deserialize events")?;

    Ok(events)
}
