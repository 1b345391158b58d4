use std::collections::HashMap;

use chrono::NaiveDate;

use crate::event::Event;

/// 指定された日付の予定を返す。
///
/// 年月日が完全に一致する予定を、元の並び順のまま複製して返す。
/// 一致する予定がない場合は空の`Vec`を返す。
///
/// # Arguments
///
/// * `date` - 対象の日付
/// * `events` - すべての予定
pub fn events_on(date: NaiveDate, events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .filter(|event| event.date == date)
        .cloned()
        .collect()
}

/// 日付ごとに予定をまとめたインデックス。
///
/// 1ヶ月分の日付を順に引く場合に、日付ごとに全件を走査しないために使う。
/// 各日付の予定は元の並び順を保持する。
#[derive(Debug, Default)]
pub struct EventDayIndex {
    by_date: HashMap<NaiveDate, Vec<Event>>,
}

impl EventDayIndex {
    /// 新しい`EventDayIndex`を返す。
    pub fn new(events: &[Event]) -> Self {
        let by_date: HashMap<NaiveDate, Vec<Event>> =
            events.iter().fold(HashMap::new(), |mut acc, event| {
                acc.entry(event.date).or_default().push(event.clone());
                acc
            });

        Self { by_date }
    }

    /// 指定された日付の予定を返す。
    pub fn events_on(&self, date: NaiveDate) -> &[Event] {
        self.by_date
            .get(&date)
            .map(|events| events.as_slice())
            .unwrap_or_default()
    }
}
