use super::Value;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl Value {
    /// Interprets the value as a calendar date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(v) => Some(*v),
            Self::DateTime(v) => Some(v.date()),
            Self::String(v) => {
                let v = v.trim();
                NaiveDate::parse_from_str(v, "%Y-%m-%d")
                    .ok()
                    .or_else(|| parse_date_time(v).map(|dt| dt.date()))
            }
            _ => None,
        }
    }

    /// Interprets the value as a date and time. Dates map to midnight.
    pub fn to_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(v) => Some(*v),
            Self::Date(v) => Some(v.and_time(NaiveTime::MIN)),
            Self::String(v) => {
                let v = v.trim();
                parse_date_time(v).or_else(|| {
                    NaiveDate::parse_from_str(v, "%Y-%m-%d")
                        .ok()
                        .map(|date| date.and_time(NaiveTime::MIN))
                })
            }
            _ => None,
        }
    }
}

fn parse_date_time(src: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(src, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(src)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}
