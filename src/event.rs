use chrono::NaiveDate;
use serde::Deserialize;

/// イベントソースから読み込んだ1件の予定。
///
/// `start_time`と`end_time`はソースの`HH:MM`文字列をそのまま保持し、競合検出の時点でパースする。
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

/// 競合フラグを付与した予定。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotatedEvent {
    pub event: Event,
    pub conflict: bool,
}
