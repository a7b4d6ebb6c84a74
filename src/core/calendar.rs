//! Business-day calendar: maps real-world instants onto store operating
//! days. A store's day does not flip at midnight but at a configured
//! rollover time (default 05:00); everything before that time still counts
//! as the previous day's business.

use crate::config::Config;
use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};

pub const DEFAULT_ROLLOVER_HOUR: u32 = 5;
pub const DEFAULT_ROLLOVER_MINUTE: u32 = 0;

/// Store-configured time of day at which one business day ends and the
/// next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloverTime {
    pub hour: u32,
    pub minute: u32,
}

impl Default for RolloverTime {
    fn default() -> Self {
        Self {
            hour: DEFAULT_ROLLOVER_HOUR,
            minute: DEFAULT_ROLLOVER_MINUTE,
        }
    }
}

impl RolloverTime {
    /// Lenient "HH:MM" parsing. Store configuration is trusted but may be
    /// incomplete: a missing or non-numeric hour falls back to 5, a missing
    /// or non-numeric minute to 0, out-of-range components likewise.
    pub fn parse(s: &str) -> Self {
        let mut parts = s.splitn(2, ':');
        let hour = parts
            .next()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|h| *h < 24)
            .unwrap_or(DEFAULT_ROLLOVER_HOUR);
        let minute = parts
            .next()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|m| *m < 60)
            .unwrap_or(DEFAULT_ROLLOVER_MINUTE);
        Self { hour, minute }
    }
}

/// Calendar for one store: fixed operating offset plus rollover time.
#[derive(Debug, Clone, Copy)]
pub struct StoreCalendar {
    offset: FixedOffset,
    rollover: RolloverTime,
}

impl StoreCalendar {
    pub fn new(offset: FixedOffset, rollover: RolloverTime) -> Self {
        Self { offset, rollover }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let offset = FixedOffset::east_opt(cfg.utc_offset_minutes * 60)
            .unwrap_or_else(|| FixedOffset::east_opt(9 * 3600).expect("valid fixed offset"));
        Self {
            offset,
            rollover: RolloverTime::parse(&cfg.day_rollover_time),
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn rollover(&self) -> RolloverTime {
        self.rollover
    }

    /// The business day an instant belongs to.
    ///
    /// Strictly before the rollover wall-clock time the instant is still
    /// part of the previous calendar date's business; at or after it, the
    /// current date. A rollover of 00:00 degenerates to plain calendar
    /// days.
    pub fn business_day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        let local = instant.with_timezone(&self.offset);
        let date = local.date_naive();
        if (local.hour(), local.minute()) < (self.rollover.hour, self.rollover.minute) {
            date.pred_opt().unwrap_or(date)
        } else {
            date
        }
    }

    /// The exact instant at which `day` began: the day's calendar date
    /// combined with the rollover time, in the store offset.
    pub fn business_day_start(&self, day: NaiveDate) -> DateTime<Utc> {
        self.instant_at(day, self.rollover.hour, self.rollover.minute)
    }

    /// Exclusive upper bound of `day`: the next rollover instant.
    pub fn business_day_end(&self, day: NaiveDate) -> DateTime<Utc> {
        self.business_day_start(day.succ_opt().unwrap_or(day))
    }

    fn instant_at(&self, date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
        let wall = date
            .and_hms_opt(hour, minute, 0)
            .unwrap_or_else(|| date.and_hms_opt(0, 0, 0).expect("midnight is always valid"));
        // A fixed offset maps every wall-clock time to exactly one instant.
        wall.and_local_timezone(self.offset)
            .unwrap()
            .with_timezone(&Utc)
    }
}
