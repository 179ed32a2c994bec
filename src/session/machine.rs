//! Pure transition functions for a texting session.
//!
//! Each function takes the current [`SessionState`] plus whatever the caller
//! observed (campaign flags, a reading of the texting window) and returns the
//! next state together with the [`Effect`]s the controller must carry out.
//! Nothing here touches the clock, spawns timers or navigates.

use std::time::Duration;

use crate::models::Campaign;

use super::hours::WindowReading;
use super::status::{SessionStatus, WarningReason};
use super::timers::TimerPurpose;

/// Lead time for the "five minutes left" warning.
pub const FIVE_MINUTES: Duration = Duration::from_millis(300_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The assignment list; used when the campaign turns out to be archived.
    Todos,
    /// Organization landing page; used when the texter leaves via the dialog.
    Home,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Arm { purpose: TimerPurpose, after: Duration },
    CancelAllTimers,
    Navigate(Exit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub status: SessionStatus,
    pub first_warning_acknowledged: bool,
}

impl SessionState {
    pub fn new(status: SessionStatus) -> Self {
        Self {
            status,
            first_warning_acknowledged: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn to(state: SessionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

fn positive(remaining_millis: Option<i64>) -> Option<Duration> {
    remaining_millis
        .filter(|ms| *ms > 0)
        .map(|ms| Duration::from_millis(ms as u64))
}

/// Evaluate a campaign at session start.
///
/// The hours check runs before the closed-status check, so a closed campaign
/// viewed outside texting hours reports `WarnOutsideHours`.
pub fn start(campaign: &Campaign, reading: WindowReading) -> Transition {
    if campaign.is_archived {
        return Transition::to(SessionState::new(SessionStatus::Ended)).with(Effect::Navigate(Exit::Todos));
    }

    if !reading.within_hours {
        return Transition::to(SessionState::new(SessionStatus::WarnOutsideHours));
    }
    if campaign.status.is_closed() {
        return Transition::to(SessionState::new(SessionStatus::BlockedCampaignClosed));
    }

    let Some(remaining) = positive(reading.remaining_millis) else {
        // Open, but with no time left to text.
        return Transition::to(SessionState::new(SessionStatus::WarnOutsideHours));
    };

    if remaining < FIVE_MINUTES {
        return Transition::to(SessionState::new(SessionStatus::WarnAlmostClosed));
    }

    let active = Transition::to(SessionState::new(SessionStatus::Active));
    match remaining.checked_sub(FIVE_MINUTES).filter(|d| !d.is_zero()) {
        Some(lead) => active.with(Effect::Arm {
            purpose: TimerPurpose::FiveMinuteWarning,
            after: lead,
        }),
        None => active.with(Effect::Arm {
            purpose: TimerPurpose::WindowClose,
            after: remaining,
        }),
    }
}

/// A scheduled delay elapsed. Ended and blocking states are left alone so a
/// late heads-up can't reopen texting.
pub fn timer_fired(state: SessionState, purpose: TimerPurpose) -> Transition {
    if matches!(
        state.status,
        SessionStatus::Ended | SessionStatus::BlockedCampaignClosed | SessionStatus::WarnOutsideHours
    ) {
        return Transition::to(state);
    }

    let reason = match purpose {
        TimerPurpose::FiveMinuteWarning => WarningReason::FiveMinutes,
        TimerPurpose::WindowClose => WarningReason::OutsideHours,
    };
    Transition::to(SessionState {
        status: SessionStatus::from_warning(reason),
        ..state
    })
}

/// The texter dismissed the dialog.
///
/// `remaining_millis` must be read at acknowledgment time; it is only used
/// when dismissing a heads-up warning, to arm the closing timer.
pub fn acknowledge(state: SessionState, remaining_millis: Option<i64>) -> Transition {
    let Some(reason) = state.status.warning() else {
        return Transition::to(state);
    };

    if reason.is_heads_up() {
        let acknowledged = SessionState {
            status: SessionStatus::Active,
            first_warning_acknowledged: true,
        };
        return match positive(remaining_millis) {
            Some(remaining) => Transition::to(acknowledged).with(Effect::Arm {
                purpose: TimerPurpose::WindowClose,
                after: remaining,
            }),
            None => Transition::to(SessionState {
                status: SessionStatus::WarnOutsideHours,
                ..acknowledged
            }),
        };
    }

    Transition::to(SessionState {
        status: SessionStatus::Ended,
        ..state
    })
    .with(Effect::CancelAllTimers)
    .with(Effect::Navigate(Exit::Home))
}

/// Something outside the session (the contact view, usually) found that
/// texting is no longer allowed.
pub fn show_closed(state: SessionState, reason: WarningReason) -> Transition {
    if state.status == SessionStatus::Ended {
        return Transition::to(state);
    }
    Transition::to(SessionState {
        status: SessionStatus::from_warning(reason),
        ..state
    })
    .with(Effect::CancelAllTimers)
}

pub fn dispose(state: SessionState) -> Transition {
    Transition::to(SessionState {
        status: SessionStatus::Ended,
        ..state
    })
    .with(Effect::CancelAllTimers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CampaignStatus;

    fn campaign() -> Campaign {
        serde_json::from_str(r#"{ "id": "c1", "title": "GOTV" }"#).unwrap()
    }

    fn open(remaining_millis: i64) -> WindowReading {
        WindowReading {
            within_hours: true,
            remaining_millis: Some(remaining_millis),
        }
    }

    #[test]
    fn test_start_long_window_arms_five_minute_warning() {
        let t = start(&campaign(), open(400_000));
        assert_eq!(t.state.status, SessionStatus::Active);
        assert_eq!(
            t.effects,
            vec![Effect::Arm {
                purpose: TimerPurpose::FiveMinuteWarning,
                after: Duration::from_millis(100_000),
            }]
        );
    }

    #[test]
    fn test_start_short_window_warns_immediately() {
        let t = start(&campaign(), open(200_000));
        assert_eq!(t.state.status, SessionStatus::WarnAlmostClosed);
        assert!(t.state.status.dialog_open());
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_start_exactly_five_minutes_arms_window_close() {
        let t = start(&campaign(), open(300_000));
        assert_eq!(t.state.status, SessionStatus::Active);
        assert_eq!(
            t.effects,
            vec![Effect::Arm {
                purpose: TimerPurpose::WindowClose,
                after: FIVE_MINUTES,
            }]
        );
    }

    #[test]
    fn test_start_non_positive_remaining_is_outside_hours() {
        for reading in [open(0), open(-5), WindowReading { within_hours: true, remaining_millis: None }] {
            let t = start(&campaign(), reading);
            assert_eq!(t.state.status, SessionStatus::WarnOutsideHours);
            assert!(t.effects.is_empty());
        }
    }

    #[test]
    fn test_start_outside_hours_takes_priority_over_closed() {
        let mut closed = campaign();
        closed.status = CampaignStatus::Closed;
        let reading = WindowReading {
            within_hours: false,
            remaining_millis: Some(0),
        };
        assert_eq!(start(&closed, reading).state.status, SessionStatus::WarnOutsideHours);
        assert_eq!(start(&closed, open(400_000)).state.status, SessionStatus::BlockedCampaignClosed);

        closed.status = CampaignStatus::Archived;
        let t = start(&closed, open(400_000));
        assert_eq!(t.state.status, SessionStatus::BlockedCampaignClosed);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_start_archived_navigates_to_todos() {
        let mut archived = campaign();
        archived.is_archived = true;
        let t = start(&archived, open(400_000));
        assert_eq!(t.state.status, SessionStatus::Ended);
        assert_eq!(t.effects, vec![Effect::Navigate(Exit::Todos)]);
    }

    #[test]
    fn test_timers_open_dialog() {
        let active = SessionState::new(SessionStatus::Active);
        let t = timer_fired(active, TimerPurpose::FiveMinuteWarning);
        assert_eq!(t.state.status, SessionStatus::WarnFiveMin);
        let t = timer_fired(active, TimerPurpose::WindowClose);
        assert_eq!(t.state.status, SessionStatus::WarnOutsideHours);
        let ended = SessionState::new(SessionStatus::Ended);
        assert_eq!(timer_fired(ended, TimerPurpose::WindowClose).state, ended);
    }

    #[test]
    fn test_timers_leave_blocking_states_alone() {
        for status in [SessionStatus::BlockedCampaignClosed, SessionStatus::WarnOutsideHours] {
            let blocked = SessionState::new(status);
            for purpose in [TimerPurpose::FiveMinuteWarning, TimerPurpose::WindowClose] {
                let t = timer_fired(blocked, purpose);
                assert_eq!(t.state, blocked);
                assert!(t.effects.is_empty());
            }
        }
    }

    #[test]
    fn test_show_closed_cancels_timers() {
        let t = show_closed(SessionState::new(SessionStatus::Active), WarningReason::CampaignClosed);
        assert_eq!(t.state.status, SessionStatus::BlockedCampaignClosed);
        assert_eq!(t.effects, vec![Effect::CancelAllTimers]);
    }

    #[test]
    fn test_acknowledge_heads_up_rearms_with_fresh_remaining() {
        for status in [SessionStatus::WarnFiveMin, SessionStatus::WarnAlmostClosed] {
            let t = acknowledge(SessionState::new(status), Some(290_000));
            assert_eq!(t.state.status, SessionStatus::Active);
            assert!(t.state.first_warning_acknowledged);
            assert_eq!(
                t.effects,
                vec![Effect::Arm {
                    purpose: TimerPurpose::WindowClose,
                    after: Duration::from_millis(290_000),
                }]
            );
        }
    }

    #[test]
    fn test_acknowledge_heads_up_after_window_gone() {
        let t = acknowledge(SessionState::new(SessionStatus::WarnFiveMin), Some(0));
        assert_eq!(t.state.status, SessionStatus::WarnOutsideHours);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_acknowledge_final_warnings_end_session() {
        for status in [SessionStatus::WarnOutsideHours, SessionStatus::BlockedCampaignClosed] {
            let t = acknowledge(SessionState::new(status), Some(400_000));
            assert_eq!(t.state.status, SessionStatus::Ended);
            assert_eq!(t.effects, vec![Effect::CancelAllTimers, Effect::Navigate(Exit::Home)]);
        }
    }

    #[test]
    fn test_acknowledge_without_dialog_is_noop() {
        let active = SessionState::new(SessionStatus::Active);
        let t = acknowledge(active, Some(1));
        assert_eq!(t.state, active);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_show_closed_and_dispose() {
        let active = SessionState::new(SessionStatus::Active);
        let t = show_closed(active, WarningReason::CampaignClosed);
        assert_eq!(t.state.status, SessionStatus::BlockedCampaignClosed);

        let t = dispose(t.state);
        assert_eq!(t.state.status, SessionStatus::Ended);
        assert_eq!(t.effects, vec![Effect::CancelAllTimers]);
        assert_eq!(show_closed(t.state, WarningReason::OutsideHours).state.status, SessionStatus::Ended);
    }
}
