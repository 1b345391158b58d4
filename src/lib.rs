//! 月のカレンダーを組み立て、同じ日に重なる予定を検出する。

pub mod calendar;
pub mod config;
pub mod conflict;
pub mod console;
pub mod datetime;
pub mod day_command;
pub mod day_index;
pub mod error;
pub mod event;
pub mod event_source;
pub mod grid;
pub mod logger;
pub mod month_command;
