use chrono::{Local, NaiveDate};

#[cfg(not(test))]
/// Localタイムゾーンで現在の日付を取得する。
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}


#[cfg(test)]
pub use mock_datetime::today;
