use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::calendar::{MonthCell, MonthView};
use crate::conflict::DaySchedule;
use crate::grid::DayCell;

/// 曜日の見出し。日曜始まり。
const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// グリッドの1マスの幅。
const CELL_WIDTH: usize = 4;

/// Consoleにカレンダーを表示するためのtrait。
pub trait ConsolePresenter {
    /// 月のカレンダーを表示する。
    ///
    /// # Arguments
    ///
    /// * `view` - 表示する月のカレンダー
    fn show_month(&mut self, view: &MonthView) -> Result<()>;

    /// 1日分の予定を表示する。
    ///
    /// # Arguments
    ///
    /// * `date` - 表示する日付
    /// * `schedule` - その日の予定
    fn show_day(&mut self, date: NaiveDate, schedule: &DaySchedule) -> Result<()>;
}

/// カレンダーをテキストのグリッドとMarkdownのlist形式で表示する。
pub struct ConsoleText<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> ConsoleText<'a, W> {
    /// 新しい`ConsoleText`を返す。
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }

    /// 1日分の予定をlist形式で書き出す。
    fn write_schedule(&mut self, schedule: &DaySchedule) -> Result<()> {
        for annotated in &schedule.events {
            let event = &annotated.event;
            let marker = if annotated.conflict { " [conflict]" } else { "" };
            writeln!(
                self.writer,
                "- {} ~ {}: {}{}",
                event.start_time, event.end_time, event.title, marker
            )
            .with_context(|| format!("Failed to write event: {:?}", event))?;
        }
        for malformed in &schedule.malformed {
            writeln!(
                self.writer,
                "- (invalid time) {}: {}",
                malformed.event.title, malformed.error
            )
            .with_context(|| format!("Failed to write event: {:?}", malformed.event))?;
        }

        Ok(())
    }
}

impl<'a, W: Write> ConsolePresenter for ConsoleText<'a, W> {
    // 見出し、曜日、グリッドの順に表示し、その後に予定のある日の一覧を表示する。
    fn show_month(&mut self, view: &MonthView) -> Result<()> {
        let weekdays = WEEKDAY_NAMES
            .iter()
            .map(|name| format!("{:<width$}", name, width = CELL_WIDTH))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(self.writer, "{}", view.month).context("Failed to write month header")?;
        writeln!(self.writer, "{}", weekdays.trim_end()).context("Failed to write weekdays")?;

        let cells: Vec<String> = view.cells.iter().map(format_cell).collect();
        for week in cells.chunks(WEEKDAY_NAMES.len()) {
            writeln!(self.writer, "{}", week.join(" ").trim_end())
                .context("Failed to write week row")?;
        }

        for (day, schedule) in view.days().filter(|(_, schedule)| !schedule.is_empty()) {
            writeln!(self.writer).context("Failed to write separator")?;
            writeln!(self.writer, "## {}", day.date)
                .with_context(|| format!("Failed to write date: {}", day.date))?;
            self.write_schedule(schedule)?;
        }

        Ok(())
    }

    fn show_day(&mut self, _date: NaiveDate, schedule: &DaySchedule) -> Result<()> {
        self.write_schedule(schedule)
    }
}

/// グリッドの1マスを文字列にする。今日は`*`、競合のある日は`!`を付ける。
fn format_cell(cell: &MonthCell) -> String {
    match cell {
        MonthCell::Empty => " ".repeat(CELL_WIDTH),
        MonthCell::Day { day, schedule } => format_day(day, schedule),
    }
}

fn format_day(day: &DayCell, schedule: &DaySchedule) -> String {
    format!(
        "{:>2}{}{}",
        day.day,
        if day.is_today { "*" } else { " " },
        if schedule.has_conflict() { "!" } else { " " }
    )
}
