use std::iter;

use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::error::{CalendarError, CalendarResult};

/// 月のグリッドにおける日付セル。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub is_today: bool,
}

/// 月のグリッドの1マス。
///
/// 月初より前の曜日を埋める`Empty`と、日付を持つ`Day`のいずれか。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridCell {
    Empty,
    Day(DayCell),
}

/// 指定された年月のグリッドを作成する。
///
/// 月初の曜日(日曜始まり)の数だけ`Empty`を並べ、その後に1日から月末までの`Day`を並べる。
/// 月末の後ろは埋めない。
///
/// # Arguments
///
/// * `year` - 対象の年
/// * `month` - 対象の月(1〜12)
/// * `today` - `is_today`の判定に利用する日付
pub fn build_month_grid(year: i32, month: u32, today: NaiveDate) -> CalendarResult<Vec<GridCell>> {
    let first = first_day_of_month(year, month)?;
    let leading = leading_blanks(first);

    let days = first
        .iter_days()
        .take_while(|date| date.month() == month)
        .map(|date| {
            GridCell::Day(DayCell {
                day: date.day(),
                date,
                is_today: date == today,
            })
        });
    let cells: Vec<GridCell> = iter::repeat(GridCell::Empty)
        .take(leading)
        .chain(days)
        .collect();
    debug!(
        "Built grid for {}-{:02}: {} leading blanks, {} cells",
        year,
        month,
        leading,
        cells.len()
    );

    Ok(cells)
}

/// 指定された年月の1日を返す。
///
/// 月が1〜12の範囲外、または年が表現できない場合はエラーを返す。
pub fn first_day_of_month(year: i32, month: u32) -> CalendarResult<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidInput(format!(
            "month must be between 1 and 12: {}",
            month
        )));
    }

    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CalendarError::InvalidInput(format!("year is out of range: {}", year)))
}

/// 月初より前に置く空白セルの数。日曜日を0とした曜日番号と一致する。
pub fn leading_blanks(first: NaiveDate) -> usize {
    first.weekday().num_days_from_sunday() as usize
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate};
    use rstest::rstest;

    use super::{build_month_grid, first_day_of_month, leading_blanks, GridCell};
    use crate::error::CalendarError;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// 空白セルの数と日数を確認する。
    #[rstest]
    #[case::starts_on_sunday(2026, 2, 0, 28)]
    #[case::starts_on_saturday(2025, 3, 6, 31)]
    #[case::leap_february(2024, 2, 4, 29)]
    #[case::common_february(2023, 2, 3, 28)]
    #[case::thirty_days(2024, 9, 0, 30)]
    #[case::century_not_leap(1900, 2, 4, 28)]
    #[case::quadricentennial_leap(2000, 2, 2, 29)]
    fn test_build_month_grid(
        #[case] year: i32,
        #[case] month: u32,
        #[case] expected_blanks: usize,
        #[case] expected_days: usize,
    ) {
        let grid = build_month_grid(year, month, date(1999, 1, 1)).unwrap();

        let blanks = grid.iter().take_while(|cell| **cell == GridCell::Empty).count();
        let days: Vec<u32> = grid
            .iter()
            .filter_map(|cell| match cell {
                GridCell::Day(day) => Some(day.day),
                GridCell::Empty => None,
            })
            .collect();
        assert_eq!(blanks, expected_blanks);
        assert_eq!(days.len(), expected_days);
        assert_eq!(days, (1..=expected_days as u32).collect::<Vec<_>>());
        assert_eq!(grid.len(), blanks + days.len());
    }

    /// すべての月で、グリッドの長さが空白の数と日数の和になり、空白は0〜6個であることを確認する。
    #[test]
    fn test_build_month_grid_length_for_all_months() {
        for year in [1970, 2023, 2024, 2100] {
            for month in 1..=12 {
                let grid = build_month_grid(year, month, date(1999, 1, 1)).unwrap();
                let first = first_day_of_month(year, month).unwrap();
                let blanks = leading_blanks(first);
                let days = grid
                    .iter()
                    .filter(|cell| matches!(cell, GridCell::Day(_)))
                    .count();

                assert!(blanks <= 6);
                assert_eq!(grid.len(), blanks + days);
                assert!(grid[..blanks].iter().all(|cell| *cell == GridCell::Empty));
                assert!(grid[blanks..]
                    .iter()
                    .all(|cell| matches!(cell, GridCell::Day(day) if day.date.month() == month)));
            }
        }
    }

    /// 各セルが自身の日付を持ち、当日のセルだけ`is_today`になることを確認する。
    #[test]
    fn test_build_month_grid_marks_today() {
        let today = date(2025, 3, 15);
        let grid = build_month_grid(2025, 3, today).unwrap();

        let todays: Vec<NaiveDate> = grid
            .iter()
            .filter_map(|cell| match cell {
                GridCell::Day(day) if day.is_today => Some(day.date),
                _ => None,
            })
            .collect();
        assert_eq!(todays, vec![today]);
        assert_eq!(
            grid[6],
            GridCell::Day(super::DayCell {
                day: 1,
                date: date(2025, 3, 1),
                is_today: false,
            })
        );
    }

    /// 別の月の今日はどのセルにも影響しないことを確認する。
    #[test]
    fn test_build_month_grid_today_in_other_month() {
        let grid = build_month_grid(2025, 3, date(2025, 4, 15)).unwrap();

        assert!(grid
            .iter()
            .all(|cell| !matches!(cell, GridCell::Day(day) if day.is_today)));
    }

    /// 範囲外の月は丸めずにエラーとすることを確認する。
    #[rstest]
    #[case::zero(0)]
    #[case::thirteen(13)]
    #[case::large(u32::MAX)]
    fn test_build_month_grid_invalid_month(#[case] month: u32) {
        let result = build_month_grid(2024, month, date(2024, 1, 1));

        assert!(matches!(result, Err(CalendarError::InvalidInput(_))));
    }

    #[test]
    fn test_first_day_of_month_year_out_of_range() {
        let result = first_day_of_month(i32::MAX, 1);

        assert!(matches!(result, Err(CalendarError::InvalidInput(_))));
    }
}
