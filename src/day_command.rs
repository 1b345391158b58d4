use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;

use crate::conflict::{detect_conflicts, DaySchedule};
use crate::datetime;
use crate::day_index::events_on;
use crate::event_source::EventRepository;

/// 日毎の予定を出力するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct DayArgs {
    #[clap(
        short = 'd',
        long = "date",
        help = "Sets a custom date in the format YYYY-MM-DD",
        parse(try_from_str = parse_date),
    )]
    date: Option<NaiveDate>,
}

pub struct DayCommand<'a, R: EventRepository> {
    repository: &'a R,
}

impl<'a, R: EventRepository> DayCommand<'a, R> {
    /// 新しい`DayCommand`を返す。
    ///
    /// # Arguments
    /// * `repository` - 予定を読み込むためのリポジトリ
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// `day`サブコマンドの処理を行う。
    ///
    /// 指定された日付の予定を取得し、競合を検出した結果を返す。
    /// 日付が指定されていない場合は、Localタイムゾーンで現在の日付を利用する。
    ///
    /// # Arguments
    ///
    /// * `args` - `day`サブコマンドの引数
    pub fn run(&self, args: DayArgs) -> Result<(NaiveDate, DaySchedule)> {
        let date = args.date.unwrap_or_else(datetime::today);
        info!("Target date: {}", date);

        let events = self
            .repository
            .read_events()
            .context("Failed to read events")?;
        let schedule = detect_conflicts(&events_on(date, &events));
        info!("Events on {}: {}", date, schedule.events.len());

        Ok((date, schedule))
    }
}

/// 日付をパースする。
fn parse_date(s: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Failed to parse date: {}", s))?;

    Ok(date)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::{parse_date, DayArgs, DayCommand};
    use crate::datetime::mock_datetime;
    use crate::event::Event;
    use crate::event_source::MockEventRepository;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn dummy_events() -> Vec<Event> {
        [
            ("review", date(2025, 3, 10), "10:00", "11:00"),
            ("standup", date(2025, 3, 10), "09:00", "10:00"),
            ("sync", date(2025, 3, 10), "09:30", "10:00"),
            ("other day", date(2025, 3, 11), "09:00", "10:00"),
        ]
        .iter()
        .map(|(title, date, start, end)| Event {
            id: None,
            title: title.to_string(),
            date: *date,
            start_time: start.to_string(),
            end_time: end.to_string(),
        })
        .collect()
    }

    #[test]
    fn test_day_command_no_date() {
        mock_datetime::set_mock_date(date(2025, 3, 11));
        let args = DayArgs { date: None };
        let mut repository = MockEventRepository::new();
        repository
            .expect_read_events()
            .times(1)
            .returning(|| Ok(dummy_events()));

        let command = DayCommand::new(&repository);
        let (target, schedule) = command.run(args).unwrap();

        assert_eq!(target, date(2025, 3, 11));
        assert_eq!(schedule.events.len(), 1);
        assert_eq!(schedule.events[0].event.title, "other day");
        mock_datetime::clear_mock_date();
    }

    #[test]
    fn test_day_command_with_date() {
        let args = DayArgs {
            date: Some(date(2025, 3, 10)),
        };
        let mut repository = MockEventRepository::new();
        repository
            .expect_read_events()
            .times(1)
            .returning(|| Ok(dummy_events()));

        let command = DayCommand::new(&repository);
        let (_, schedule) = command.run(args).unwrap();

        let flags: Vec<(&str, bool)> = schedule
            .events
            .iter()
            .map(|annotated| (annotated.event.title.as_str(), annotated.conflict))
            .collect();
        assert_eq!(
            flags,
            vec![("standup", true), ("sync", true), ("review", false)]
        );
    }

    #[rstest]
    #[case("2025-03-10", Some(date(2025, 3, 10)))]
    #[case("2024-02-29", Some(date(2024, 2, 29)))]
    #[case("2023-02-29", None)]
    #[case("2025/03/10", None)]
    fn test_parse_date(#[case] input: &str, #[case] expected: Option<NaiveDate>) {
        assert_eq!(parse_date(input).ok(), expected);
    }
}
