use chrono::{NaiveDateTime, NaiveTime};
use log::{debug, warn};

use crate::error::{CalendarError, CalendarResult, TimeField};
use crate::event::{AnnotatedEvent, Event};

/// 時刻のフォーマット。
const TIME_FORMAT: &str = "%H:%M";

/// 時刻をパースできなかった予定。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedEvent {
    pub event: Event,
    pub error: CalendarError,
}

/// 1日分の競合検出の結果。
///
/// `events`は開始時刻順に並んだ予定、`malformed`は時刻をパースできず比較から外した予定を元の順序で持つ。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DaySchedule {
    pub events: Vec<AnnotatedEvent>,
    pub malformed: Vec<MalformedEvent>,
}

impl DaySchedule {
    /// 競合している予定が1件でもあるか。
    pub fn has_conflict(&self) -> bool {
        self.events.iter().any(|event| event.conflict)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.malformed.is_empty()
    }
}

/// 予定の日付と開始・終了時刻から求めた比較用の区間。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TimedInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimedInterval {
    fn of(event: &Event) -> CalendarResult<Self> {
        let start = parse_wall_clock(event, TimeField::Start)?;
        let end = parse_wall_clock(event, TimeField::End)?;

        Ok(Self {
            start: event.date.and_time(start),
            end: event.date.and_time(end),
        })
    }

    /// 区間が重なる、開始が同じ、または終了が同じ場合に競合とする。
    ///
    /// 一方の終了と他方の開始が一致するだけの場合は競合としない。
    fn conflicts_with(&self, other: &Self) -> bool {
        let overlaps = self.start < other.end && other.start < self.end;

        overlaps || self.start == other.start || self.end == other.end
    }
}

/// 予定の開始・終了時刻を`HH:MM`としてパースする。
fn parse_wall_clock(event: &Event, field: TimeField) -> CalendarResult<NaiveTime> {
    let value = match field {
        TimeField::Start => &event.start_time,
        TimeField::End => &event.end_time,
    };

    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| CalendarError::MalformedTime {
        title: event.title.clone(),
        field,
        value: value.clone(),
    })
}

/// 同じ日の予定同士の競合を検出する。
///
/// 予定を開始時刻で安定ソートし、すべての組み合わせを比較して競合する予定の両方にフラグを立てる。
/// 一度立てたフラグは戻さない。開始時刻が同じ予定は入力の順序を保つ。
///
/// 開始・終了時刻をパースできない予定は比較から外し、`DaySchedule::malformed`として返す。
/// 他の予定の検出は継続する。
///
/// 終了時刻が開始時刻より前の予定も補正せず、そのまま比較する。
///
/// # Arguments
///
/// * `events` - 同じ日付の予定
pub fn detect_conflicts(events: &[Event]) -> DaySchedule {
    let mut timed: Vec<(Event, TimedInterval)> = Vec::with_capacity(events.len());
    let mut malformed = Vec::new();
    for event in events {
        match TimedInterval::of(event) {
            Ok(interval) => timed.push((event.clone(), interval)),
            Err(error) => {
                warn!("Excluded from conflict detection: {}", error);
                malformed.push(MalformedEvent {
                    event: event.clone(),
                    error,
                });
            }
        }
    }

    timed.sort_by_key(|(_, interval)| interval.start);

    let mut conflicts = vec![false; timed.len()];
    for i in 0..timed.len() {
        for j in (i + 1)..timed.len() {
            if timed[i].1.conflicts_with(&timed[j].1) {
                conflicts[i] = true;
                conflicts[j] = true;
            }
        }
    }

    let events: Vec<AnnotatedEvent> = timed
        .into_iter()
        .zip(conflicts)
        .map(|((event, _), conflict)| AnnotatedEvent { event, conflict })
        .collect();
    debug!(
        "Detected conflicts: {} events, {} conflicting, {} malformed",
        events.len(),
        events.iter().filter(|event| event.conflict).count(),
        malformed.len()
    );

    DaySchedule { events, malformed }
}
