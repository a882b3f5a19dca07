//! Display formatting for timestamps shown on pages.

use std::{fmt, str::FromStr};

use sea_orm::entity::prelude::DateTimeWithTimeZone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `Friday January, 5, 2024 at 6:00PM`
    Full,
    /// `Fri 01, 05, 2024 6:00PM`
    #[default]
    Medium,
}

impl DateFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            DateFormat::Full => "full",
            DateFormat::Medium => "medium",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
            DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown date format: {0}")]
pub struct UnknownDateFormat(pub String);

impl FromStr for DateFormat {
    type Err = UnknownDateFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "full" => Ok(DateFormat::Full),
            "medium" => Ok(DateFormat::Medium),
            other => Err(UnknownDateFormat(other.to_string())),
        }
    }
}

/// Renders `ts` in its own offset using the named layout.
pub fn format_datetime(ts: &DateTimeWithTimeZone, format: DateFormat) -> String {
    ts.format(format.pattern()).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;

    fn friday_evening() -> DateTimeWithTimeZone {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2024, 1, 5, 18, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    #[test]
    fn full_format_spells_out_day_and_month() {
        assert_eq!(
            format_datetime(&friday_evening(), DateFormat::Full),
            "Friday January, 5, 2024 at 6:00PM"
        );
    }

    #[test]
    fn medium_format_uses_numeric_month_and_padded_day() {
        assert_eq!(
            format_datetime(&friday_evening(), DateFormat::Medium),
            "Fri 01, 05, 2024 6:00PM"
        );
    }

    #[test]
    fn morning_hours_are_not_zero_padded() {
        let ts = FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2035, 4, 1, 9, 5, 0)
            .single()
            .expect("timestamp should be valid");
        assert_eq!(
            format_datetime(&ts, DateFormat::Full),
            "Sunday April, 1, 2035 at 9:05AM"
        );
    }

    #[test]
    fn format_names_parse_and_unknown_names_are_rejected() {
        assert_eq!("full".parse::<DateFormat>(), Ok(DateFormat::Full));
        assert_eq!("medium".parse::<DateFormat>(), Ok(DateFormat::Medium));
        assert_eq!(
            "short".parse::<DateFormat>(),
            Err(UnknownDateFormat("short".to_string()))
        );
    }
}
