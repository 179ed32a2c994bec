use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::models::{Assignment, Campaign};
use crate::navigation::{Navigator, Route};

use super::hours::{HoursPolicy, WindowReading};
use super::machine::{self, Effect, Exit, SessionState, Transition};
use super::status::{SessionStatus, WarningReason};
use super::timers::{TimerFired, TimerPurpose, TimerSet};

/// One texter's pass through an assignment, bounded by the campaign's
/// texting window.
///
/// Owns the session state and every timer armed on its behalf. Events that
/// arrive after [`TextingSession::dispose`] are dropped.
pub struct TextingSession {
    state: Option<SessionState>,
    timers: TimerSet,
    organization_override: Option<String>,
    organization_id: String,
    disposed: bool,
}

impl TextingSession {
    pub fn new(timer_tx: mpsc::UnboundedSender<TimerFired>, organization_override: Option<String>) -> Self {
        Self {
            state: None,
            timers: TimerSet::new(timer_tx),
            organization_override,
            organization_id: String::new(),
            disposed: false,
        }
    }

    /// Evaluate the campaign and arm the first timer. Does nothing until an
    /// assignment is available, and nothing once the session has started.
    pub fn start(&mut self, assignment: Option<&Assignment>, policy: &dyn HoursPolicy, nav: &mut dyn Navigator) {
        if self.disposed || self.state.is_some() {
            return;
        }
        let Some(assignment) = assignment else {
            debug!("no assignment yet, deferring session start");
            return;
        };

        let campaign = &assignment.campaign;
        self.organization_id = self
            .organization_override
            .clone()
            .unwrap_or_else(|| campaign.organization_id.clone());

        let reading = WindowReading::read(policy, campaign);
        let transition = machine::start(campaign, reading);
        info!(
            assignment = %assignment.id,
            campaign = %campaign.id,
            status = %transition.state.status,
            ?reading,
            "texting session started"
        );
        self.apply(transition, nav);
    }

    pub fn on_timer(&mut self, fired: TimerFired, nav: &mut dyn Navigator) {
        if self.disposed {
            debug!(?fired, "ignoring timer after disposal");
            return;
        }
        if !self.timers.accept(fired) {
            debug!(?fired, "ignoring stale timer");
            return;
        }
        let Some(state) = self.state else {
            return;
        };

        let transition = machine::timer_fired(state, fired.purpose);
        info!(purpose = ?fired.purpose, status = %transition.state.status, "timer fired");
        self.apply(transition, nav);
    }

    /// The texter dismissed the warning dialog. The remaining window is read
    /// from the policy now, not reused from session start.
    pub fn acknowledge(&mut self, campaign: Option<&Campaign>, policy: &dyn HoursPolicy, nav: &mut dyn Navigator) {
        if self.disposed {
            return;
        }
        let Some(state) = self.state else {
            return;
        };
        let Some(reason) = state.status.warning() else {
            return;
        };

        let remaining = if reason.is_heads_up() {
            campaign.and_then(|c| policy.remaining_texting_millis(c))
        } else {
            None
        };
        let transition = machine::acknowledge(state, remaining);
        info!(?reason, ?remaining, status = %transition.state.status, "warning acknowledged");
        self.apply(transition, nav);
    }

    pub fn show_closed(&mut self, reason: WarningReason, nav: &mut dyn Navigator) {
        if self.disposed {
            return;
        }
        let Some(state) = self.state else {
            return;
        };
        let transition = machine::show_closed(state, reason);
        info!(?reason, status = %transition.state.status, "texting closed by contact view");
        self.apply(transition, nav);
    }

    /// Cancel every timer and end the session. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        match self.state {
            Some(state) => self.apply(machine::dispose(state), &mut Stay),
            None => self.timers.cancel_all(),
        }
        info!("texting session disposed");
    }

    fn apply(&mut self, transition: Transition, nav: &mut dyn Navigator) {
        self.state = Some(transition.state);

        for effect in transition.effects {
            match effect {
                Effect::Arm { purpose, after } => self.timers.arm(purpose, after),
                Effect::CancelAllTimers => self.timers.cancel_all(),
                Effect::Navigate(exit) => {
                    let route = self.route_for(exit);
                    info!(%route, "leaving texting session");
                    nav.navigate(route);
                }
            }
        }
    }

    fn route_for(&self, exit: Exit) -> Route {
        let organization_id = self.organization_id.clone();
        match exit {
            Exit::Todos => Route::Todos { organization_id },
            Exit::Home => Route::Home { organization_id },
        }
    }

    #[cfg(test)]
    pub fn is_started(&self) -> bool {
        self.state.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn status(&self) -> Option<SessionStatus> {
        self.state.map(|s| s.status)
    }

    pub fn warning(&self) -> Option<WarningReason> {
        self.status().and_then(|s| s.warning())
    }

    pub fn dialog_open(&self) -> bool {
        self.warning().is_some()
    }

    #[cfg(test)]
    pub fn first_warning_acknowledged(&self) -> bool {
        self.state.is_some_and(|s| s.first_warning_acknowledged)
    }

    pub fn is_armed(&self, purpose: TimerPurpose) -> bool {
        self.timers.is_armed(purpose)
    }

    pub fn armed_count(&self) -> usize {
        self.timers.armed_count()
    }
}

/// Teardown never leaves the current screen.
struct Stay;

impl Navigator for Stay {
    fn navigate(&mut self, _route: Route) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CampaignStatus;
    use crate::navigation::RecordingNavigator;
    use std::cell::Cell;
    use std::time::Duration;

    struct FakePolicy {
        within: Cell<bool>,
        remaining: Cell<Option<i64>>,
    }

    impl FakePolicy {
        fn open(remaining: i64) -> Self {
            Self {
                within: Cell::new(true),
                remaining: Cell::new(Some(remaining)),
            }
        }
    }

    impl HoursPolicy for FakePolicy {
        fn is_within_texting_hours(&self, _campaign: &Campaign) -> bool {
            self.within.get()
        }

        fn remaining_texting_millis(&self, _campaign: &Campaign) -> Option<i64> {
            self.remaining.get()
        }
    }

    fn assignment() -> Assignment {
        serde_json::from_str(r#"{ "id": "a1", "campaign": { "id": "c1", "organizationId": "9" } }"#).unwrap()
    }

    fn session() -> (TextingSession, mpsc::UnboundedReceiver<TimerFired>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (TextingSession::new(tx, None), rx)
    }

    #[tokio::test]
    async fn test_five_minute_warning_then_close() {
        tokio::time::pause();
        let (mut session, mut rx) = session();
        let mut nav = RecordingNavigator::default();
        let assignment = assignment();
        let policy = FakePolicy::open(400_000);

        session.start(Some(&assignment), &policy, &mut nav);
        assert_eq!(session.status(), Some(SessionStatus::Active));
        assert!(session.is_armed(TimerPurpose::FiveMinuteWarning));
        assert!(!session.dialog_open());

        tokio::time::sleep(Duration::from_millis(99_000)).await;
        assert!(rx.try_recv().is_err());
        tokio::time::sleep(Duration::from_millis(1_001)).await;
        let fired = rx.try_recv().expect("five minute warning");
        session.on_timer(fired, &mut nav);
        assert_eq!(session.warning(), Some(WarningReason::FiveMinutes));
        assert!(session.dialog_open());

        policy.remaining.set(Some(290_000));
        session.acknowledge(Some(&assignment.campaign), &policy, &mut nav);
        assert_eq!(session.status(), Some(SessionStatus::Active));
        assert!(session.first_warning_acknowledged());
        assert_eq!(session.armed_count(), 1);
        assert!(session.is_armed(TimerPurpose::WindowClose));

        tokio::time::sleep(Duration::from_millis(290_001)).await;
        let fired = rx.try_recv().expect("window close");
        session.on_timer(fired, &mut nav);
        assert_eq!(session.warning(), Some(WarningReason::OutsideHours));

        session.acknowledge(Some(&assignment.campaign), &policy, &mut nav);
        assert_eq!(session.status(), Some(SessionStatus::Ended));
        assert_eq!(session.armed_count(), 0);
        assert_eq!(
            nav.routes,
            vec![Route::Home {
                organization_id: "9".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_almost_closed_opens_immediately() {
        let (mut session, _rx) = session();
        let mut nav = RecordingNavigator::default();
        let assignment = assignment();

        session.start(Some(&assignment), &FakePolicy::open(200_000), &mut nav);
        assert_eq!(session.status(), Some(SessionStatus::WarnAlmostClosed));
        assert_eq!(session.armed_count(), 0);

        session.acknowledge(Some(&assignment.campaign), &FakePolicy::open(150_000), &mut nav);
        assert_eq!(session.status(), Some(SessionStatus::Active));
        assert!(session.is_armed(TimerPurpose::WindowClose));
        assert!(nav.routes.is_empty());
    }

    #[tokio::test]
    async fn test_no_window_blocks_without_timers() {
        let (mut session, _rx) = session();
        let mut nav = RecordingNavigator::default();
        let assignment = assignment();

        session.start(Some(&assignment), &FakePolicy::open(0), &mut nav);
        assert_eq!(session.warning(), Some(WarningReason::OutsideHours));
        assert_eq!(session.armed_count(), 0);

        session.acknowledge(Some(&assignment.campaign), &FakePolicy::open(0), &mut nav);
        assert_eq!(session.status(), Some(SessionStatus::Ended));
        assert_eq!(nav.routes.len(), 1);
        assert_eq!(session.armed_count(), 0);
    }

    #[tokio::test]
    async fn test_closed_campaign_blocks() {
        let (mut session, _rx) = session();
        let mut nav = RecordingNavigator::default();
        let mut assignment = assignment();
        assignment.campaign.status = CampaignStatus::Closed;

        session.start(Some(&assignment), &FakePolicy::open(400_000), &mut nav);
        assert_eq!(session.warning(), Some(WarningReason::CampaignClosed));
        assert_eq!(session.armed_count(), 0);
    }

    #[tokio::test]
    async fn test_archived_campaign_navigates_to_todos() {
        let (mut session, _rx) = session();
        let mut nav = RecordingNavigator::default();
        let mut assignment = assignment();
        assignment.campaign.is_archived = true;

        session.start(Some(&assignment), &FakePolicy::open(400_000), &mut nav);
        assert_eq!(session.status(), Some(SessionStatus::Ended));
        assert_eq!(nav.routes[0].path(), "/app/9/todos");
    }

    #[tokio::test]
    async fn test_organization_override_wins() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut session = TextingSession::new(tx, Some("org-x".to_string()));
        let mut nav = RecordingNavigator::default();
        let mut assignment = assignment();
        assignment.campaign.is_archived = true;

        session.start(Some(&assignment), &FakePolicy::open(1), &mut nav);
        assert_eq!(nav.routes[0].path(), "/app/org-x/todos");
    }

    #[tokio::test]
    async fn test_start_defers_until_assignment_and_runs_once() {
        let (mut session, _rx) = session();
        let mut nav = RecordingNavigator::default();
        let policy = FakePolicy::open(400_000);

        session.start(None, &policy, &mut nav);
        assert!(!session.is_started());
        assert_eq!(session.armed_count(), 0);

        let assignment = assignment();
        session.start(Some(&assignment), &policy, &mut nav);
        assert!(session.is_started());

        policy.remaining.set(Some(100_000));
        session.start(Some(&assignment), &policy, &mut nav);
        assert_eq!(session.status(), Some(SessionStatus::Active));
    }

    #[tokio::test]
    async fn test_dispose_cancels_all_timers() {
        tokio::time::pause();
        let (mut session, mut rx) = session();
        let mut nav = RecordingNavigator::default();
        let assignment = assignment();

        session.start(Some(&assignment), &FakePolicy::open(400_000), &mut nav);
        session.timers.arm(TimerPurpose::WindowClose, Duration::from_millis(400_000));
        assert_eq!(session.armed_count(), 2);

        session.dispose();
        session.dispose();
        assert!(session.is_disposed());
        assert_eq!(session.armed_count(), 0);
        assert_eq!(session.status(), Some(SessionStatus::Ended));

        tokio::time::sleep(Duration::from_millis(500_000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_events_after_dispose_are_ignored() {
        tokio::time::pause();
        let (mut session, mut rx) = session();
        let mut nav = RecordingNavigator::default();
        let assignment = assignment();

        session.start(Some(&assignment), &FakePolicy::open(400_000), &mut nav);
        tokio::time::sleep(Duration::from_millis(100_001)).await;
        let fired = rx.try_recv().expect("timer fired before disposal");

        session.dispose();
        session.on_timer(fired, &mut nav);
        session.show_closed(WarningReason::CampaignClosed, &mut nav);
        assert_eq!(session.status(), Some(SessionStatus::Ended));
        assert!(!session.dialog_open());
        assert!(nav.routes.is_empty());
    }

    #[tokio::test]
    async fn test_show_closed_opens_dialog_and_ack_exits() {
        let (mut session, _rx) = session();
        let mut nav = RecordingNavigator::default();
        let assignment = assignment();
        let policy = FakePolicy::open(400_000);

        session.start(Some(&assignment), &policy, &mut nav);
        session.show_closed(WarningReason::CampaignClosed, &mut nav);
        assert_eq!(session.status(), Some(SessionStatus::BlockedCampaignClosed));

        session.acknowledge(Some(&assignment.campaign), &policy, &mut nav);
        assert_eq!(session.status(), Some(SessionStatus::Ended));
        assert_eq!(session.armed_count(), 0);
        assert_eq!(nav.routes[0].path(), "/app/9");
    }

    #[tokio::test]
    async fn test_closed_report_outlasts_pending_warning() {
        tokio::time::pause();
        let (mut session, mut rx) = session();
        let mut nav = RecordingNavigator::default();
        let assignment = assignment();
        let policy = FakePolicy::open(400_000);

        session.start(Some(&assignment), &policy, &mut nav);
        assert!(session.is_armed(TimerPurpose::FiveMinuteWarning));

        session.show_closed(WarningReason::CampaignClosed, &mut nav);
        assert_eq!(session.status(), Some(SessionStatus::BlockedCampaignClosed));
        assert_eq!(session.armed_count(), 0);

        tokio::time::sleep(Duration::from_millis(100_001)).await;
        assert!(rx.try_recv().is_err());

        session.acknowledge(Some(&assignment.campaign), &policy, &mut nav);
        assert_eq!(session.status(), Some(SessionStatus::Ended));
        assert_eq!(nav.routes[0].path(), "/app/9");
    }

    #[tokio::test]
    async fn test_late_warning_does_not_reopen_blocked_session() {
        tokio::time::pause();
        let (mut session, mut rx) = session();
        let mut nav = RecordingNavigator::default();
        let assignment = assignment();
        let policy = FakePolicy::open(400_000);

        session.start(Some(&assignment), &policy, &mut nav);
        tokio::time::sleep(Duration::from_millis(100_001)).await;
        let fired = rx.try_recv().expect("five minute warning queued");

        // Reported closed while the warning was still on the channel.
        session.show_closed(WarningReason::CampaignClosed, &mut nav);
        session.on_timer(fired, &mut nav);
        assert_eq!(session.status(), Some(SessionStatus::BlockedCampaignClosed));
        assert_eq!(session.armed_count(), 0);
    }
}
