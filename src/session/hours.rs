//! Texting-window policy.
//!
//! The session only consumes two answers from the policy: whether texting is
//! allowed right now, and how long until the window closes.

use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::models::{Campaign, TextingHours};

pub trait HoursPolicy {
    fn is_within_texting_hours(&self, campaign: &Campaign) -> bool;

    /// Milliseconds until the window closes. `None` or non-positive means no
    /// usable window.
    fn remaining_texting_millis(&self, campaign: &Campaign) -> Option<i64>;
}

/// What the policy said about a campaign at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowReading {
    pub within_hours: bool,
    pub remaining_millis: Option<i64>,
}

impl WindowReading {
    pub fn read(policy: &dyn HoursPolicy, campaign: &Campaign) -> Self {
        Self {
            within_hours: policy.is_within_texting_hours(campaign),
            remaining_millis: policy.remaining_texting_millis(campaign),
        }
    }
}

/// Campaigns that don't enforce hours report this much time left, far past
/// any realistic session, so neither timer ever fires for them.
const UNENFORCED_WINDOW_DAYS: i64 = 365;

/// Daily `[start_hour, end_hour)` window at the campaign's fixed UTC offset.
#[derive(Debug, Clone, Default)]
pub struct CampaignHoursPolicy {
    now: Option<DateTime<Utc>>,
}

impl CampaignHoursPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate against a fixed instant instead of the wall clock.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Some(now) }
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    /// Millis left in today's window, or `None` when outside it or the
    /// configured hours can't be interpreted.
    fn window_remaining(hours: &TextingHours, now: DateTime<Utc>) -> Option<i64> {
        if !hours.enforced {
            return Some(ChronoDuration::days(UNENFORCED_WINDOW_DAYS).num_milliseconds());
        }

        let offset = FixedOffset::east_opt(hours.utc_offset_minutes.checked_mul(60)?)?;
        let local = now.with_timezone(&offset);
        if hours.start_hour >= hours.end_hour || local.hour() < hours.start_hour {
            return None;
        }

        let midnight: NaiveDateTime = local.date_naive().and_hms_opt(0, 0, 0)?;
        let end = offset
            .from_local_datetime(&(midnight + ChronoDuration::hours(i64::from(hours.end_hour.min(24)))))
            .single()?;

        let remaining = (end - local).num_milliseconds();
        (remaining > 0).then_some(remaining)
    }
}

impl HoursPolicy for CampaignHoursPolicy {
    fn is_within_texting_hours(&self, campaign: &Campaign) -> bool {
        Self::window_remaining(&campaign.texting_hours, self.now()).is_some()
    }

    fn remaining_texting_millis(&self, campaign: &Campaign) -> Option<i64> {
        Self::window_remaining(&campaign.texting_hours, self.now())
    }
}
