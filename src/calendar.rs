use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use chrono::{Datelike, Months, NaiveDate};
use log::info;

use crate::conflict::{detect_conflicts, DaySchedule};
use crate::datetime;
use crate::day_index::EventDayIndex;
use crate::error::{CalendarError, CalendarResult};
use crate::event::Event;
use crate::grid::{build_month_grid, first_day_of_month, DayCell, GridCell};

/// 表示対象の年月。
///
/// 生成時に妥当な年月であることを検証し、内部では月の1日として保持する。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// 新しい`YearMonth`を返す。
    ///
    /// 月が1〜12の範囲外の場合はエラーを返す。
    pub fn new(year: i32, month: u32) -> CalendarResult<Self> {
        let first = first_day_of_month(year, month)?;

        Ok(Self { first })
    }

    /// 指定された日付を含む年月を返す。
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// Localタイムゾーンで現在の年月を返す。
    pub fn current() -> Self {
        Self::from_date(datetime::today())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// 前の月を返す。
    pub fn prev(&self) -> CalendarResult<Self> {
        self.shift(-1)
    }

    /// 次の月を返す。
    pub fn next(&self) -> CalendarResult<Self> {
        self.shift(1)
    }

    /// `months`ヶ月ずらした年月を返す。負の値は過去の月を表す。
    pub fn shift(&self, months: i32) -> CalendarResult<Self> {
        let delta = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.first.checked_add_months(delta)
        } else {
            self.first.checked_sub_months(delta)
        };

        shifted.map(|first| Self { first }).ok_or_else(|| {
            CalendarError::InvalidInput(format!("cannot shift {} by {} months", self, months))
        })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%B %Y"))
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    /// `YYYY-MM`形式の文字列をパースする。
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let target_date = s.to_string() + "-01";
        let first = NaiveDate::parse_from_str(&target_date, "%Y-%m-%d")
            .with_context(|| format!("Failed to parse month: {}", s))?;

        Ok(Self { first })
    }
}

/// 組み立て済みの月のグリッドの1マス。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MonthCell {
    Empty,
    Day { day: DayCell, schedule: DaySchedule },
}

/// 表示用に組み立てた1ヶ月分のカレンダー。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthView {
    pub month: YearMonth,
    pub today: NaiveDate,
    pub cells: Vec<MonthCell>,
}

impl MonthView {
    /// 日付のセルとその日の予定を順に返す。
    pub fn days(&self) -> impl Iterator<Item = (&DayCell, &DaySchedule)> {
        self.cells.iter().filter_map(|cell| match cell {
            MonthCell::Day { day, schedule } => Some((day, schedule)),
            MonthCell::Empty => None,
        })
    }

    /// 指定された日付の予定を返す。
    pub fn schedule_on(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.days()
            .find(|(day, _)| day.date == date)
            .map(|(_, schedule)| schedule)
    }
}

/// 指定された年月のカレンダーを組み立てる。
///
/// 今日の日付は呼び出しごとに一度だけ取得するため、日付をまたいで実行されても結果は一貫する。
///
/// # Arguments
///
/// * `year` - 対象の年
/// * `month` - 対象の月(1〜12)
/// * `events` - すべての予定
pub fn assemble(year: i32, month: u32, events: &[Event]) -> CalendarResult<MonthView> {
    assemble_at(year, month, events, datetime::today())
}

/// 指定された今日の日付でカレンダーを組み立てる。
///
/// 日付のセルごとにその日の予定を引き、競合を検出した結果を付与する。
/// 時刻をパースできない予定はその日の`DaySchedule::malformed`に入り、月全体の組み立ては継続する。
pub fn assemble_at(
    year: i32,
    month: u32,
    events: &[Event],
    today: NaiveDate,
) -> CalendarResult<MonthView> {
    let target = YearMonth::new(year, month)?;
    let grid = build_month_grid(year, month, today)?;
    let index = EventDayIndex::new(events);

    let cells: Vec<MonthCell> = grid
        .into_iter()
        .map(|cell| match cell {
            GridCell::Empty => MonthCell::Empty,
            GridCell::Day(day) => MonthCell::Day {
                day,
                schedule: detect_conflicts(index.events_on(day.date)),
            },
        })
        .collect();

    let view = MonthView {
        month: target,
        today,
        cells,
    };
    info!(
        "Assembled {}: {} events, {} days with conflicts, {} malformed events",
        view.month,
        view.days().map(|(_, schedule)| schedule.events.len()).sum::<usize>(),
        view.days().filter(|(_, schedule)| schedule.has_conflict()).count(),
        view.days().map(|(_, schedule)| schedule.malformed.len()).sum::<usize>(),
    );

    Ok(view)
}
