use std::fmt;

use thiserror::Error;

/// カレンダーの組み立て時に発生するエラー。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed {field} '{value}' for event '{title}', expected HH:MM")]
    MalformedTime {
        title: String,
        field: TimeField,
        value: String,
    },
}

/// パースに失敗した時刻の種別。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeField::Start => write!(f, "start time"),
            TimeField::End => write!(f, "end time"),
        }
    }
}

pub type CalendarResult<T> = Result<T, CalendarError>;
