//! Per-employee attendance session.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::backend::{AttendanceBackend, AttendanceClient, CheckInSubmission, CheckOutSubmission};
use super::clock::Clock;
use super::rules_store::RulesStore;
use crate::calculation::{
    DEFAULT_SHIFT_REMINDER_MINUTES, EligibilityAssessment, assess, check_in_status,
    compute_window, evaluate, week_start, week_summary,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceStatus, CheckAvailability, IneligibilityReason, LocationSample,
    ScheduledShift, WeekSummary,
};

/// Today's attendance for one employee.
///
/// Holds snapshots of the rules, the active shift, the employee's records and
/// the latest location sample. Eligibility is recomputed from the snapshots
/// on every call, so the answer follows the clock without a refresh.
///
/// The active shift is yesterday's while its window is still open, so an
/// overnight shift can be checked out after midnight; otherwise it is
/// today's.
pub struct AttendanceSession<B> {
    client: AttendanceClient<B>,
    clock: Arc<dyn Clock>,
    rules: Arc<RulesStore>,
    employee_id: String,
    reminder_lead_minutes: i64,
    shift: Option<ScheduledShift>,
    records: Vec<AttendanceRecord>,
    location: LocationSample,
}

impl<B: AttendanceBackend> AttendanceSession<B> {
    /// Creates an empty session; call [`refresh`](Self::refresh) to load it.
    pub fn new(
        client: AttendanceClient<B>,
        clock: Arc<dyn Clock>,
        rules: Arc<RulesStore>,
        employee_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            clock,
            rules,
            employee_id: employee_id.into(),
            reminder_lead_minutes: DEFAULT_SHIFT_REMINDER_MINUTES,
            shift: None,
            records: Vec::new(),
            location: LocationSample::Pending,
        }
    }

    /// Sets how long before shift start the starting-soon flag is raised.
    pub fn with_reminder_lead(mut self, minutes: i64) -> Self {
        self.reminder_lead_minutes = minutes;
        self
    }

    /// The employee this session belongs to.
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    /// The active shift, if one is scheduled.
    pub fn shift(&self) -> Option<&ScheduledShift> {
        self.shift.as_ref()
    }

    /// Every record loaded for the employee.
    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    /// The latest location sample.
    pub fn location(&self) -> &LocationSample {
        &self.location
    }

    /// The record for the active shift's date, or for today without a shift.
    pub fn active_record(&self) -> Option<&AttendanceRecord> {
        let date = self
            .shift
            .as_ref()
            .map_or_else(|| self.clock.today(), |shift| shift.date);
        self.records.iter().find(|r| r.date == date)
    }

    /// Reloads the rules, the active shift and the records.
    ///
    /// Everything is fetched before any snapshot is replaced; on error the
    /// session keeps what it had.
    pub async fn refresh(&mut self) -> EngineResult<()> {
        let now = self.clock.now();
        let today = now.date();
        let rules = self.client.fetch_rules().await?;
        let current = self.client.fetch_schedule(&self.employee_id, today).await?;
        let previous = match today.pred_opt() {
            Some(yesterday) => {
                self.client
                    .fetch_schedule(&self.employee_id, yesterday)
                    .await?
            }
            None => None,
        };
        let records = self.client.fetch_records(&self.employee_id).await?;

        let shift = match previous {
            Some(previous) if now <= compute_window(&previous, &rules).check_in_deadline => {
                Some(previous)
            }
            _ => current,
        };

        debug!(
            employee_id = %self.employee_id,
            has_shift = shift.is_some(),
            records = records.len(),
            "session refreshed"
        );
        self.rules.replace(rules);
        self.shift = shift;
        self.records = records;
        Ok(())
    }

    /// Records a new location sample.
    pub fn set_location(&mut self, sample: LocationSample) {
        self.location = sample;
    }

    /// What the employee may do right now.
    pub fn availability(&self) -> CheckAvailability {
        let rules = self.rules.snapshot();
        evaluate(
            self.clock.now(),
            self.shift.as_ref(),
            &rules,
            self.active_record(),
            &self.location,
        )
    }

    /// Availability with the derived state and audit trace.
    pub fn assessment(&self) -> EligibilityAssessment {
        let rules = self.rules.snapshot();
        assess(
            self.clock.now(),
            self.shift.as_ref(),
            &rules,
            self.active_record(),
            &self.location,
            self.reminder_lead_minutes,
        )
    }

    /// This week's hours, days and tips against `target_hours`.
    pub fn week_summary(&self, target_hours: Decimal) -> WeekSummary {
        week_summary(&self.records, week_start(self.clock.today()), target_hours)
    }

    /// Submits a check-in if one is currently permitted.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ActionUnavailable`] without contacting the
    /// backend when check-in is not permitted, or the client's error when
    /// the submission fails. The session is unchanged on error.
    pub async fn check_in(
        &mut self,
        proof_photo: Option<String>,
    ) -> EngineResult<AttendanceRecord> {
        let availability = self.availability();
        if !availability.can_check_in {
            return Err(unavailable("check-in", availability.check_in_reason));
        }

        let now = self.clock.now();
        let rules = self.rules.snapshot();
        let status = self
            .shift
            .as_ref()
            .map(|shift| check_in_status(now, &compute_window(shift, &rules)))
            .unwrap_or(AttendanceStatus::Present);

        let submission = CheckInSubmission {
            employee_id: self.employee_id.clone(),
            location: self.location.coordinate(),
            proof_photo,
            status,
        };
        let record = self.client.check_in(&submission).await?;
        info!(employee_id = %self.employee_id, status = %status, "session checked in");
        self.store_record(record.clone());
        Ok(record)
    }

    /// Submits a check-out if one is currently permitted.
    ///
    /// # Errors
    ///
    /// Same as [`check_in`](Self::check_in).
    pub async fn check_out(&mut self, tip: Option<Decimal>) -> EngineResult<AttendanceRecord> {
        let availability = self.availability();
        if !availability.can_check_out {
            return Err(unavailable("check-out", availability.check_out_reason));
        }

        let submission = CheckOutSubmission {
            employee_id: self.employee_id.clone(),
            location: self.location.coordinate(),
            tip,
        };
        let record = self.client.check_out(&submission).await?;
        info!(employee_id = %self.employee_id, "session checked out");
        self.store_record(record.clone());
        Ok(record)
    }

    fn store_record(&mut self, record: AttendanceRecord) {
        match self.records.iter_mut().find(|r| r.date == record.date) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }
}

fn unavailable(operation: &str, reason: Option<IneligibilityReason>) -> EngineError {
    EngineError::ActionUnavailable {
        operation: operation.to_string(),
        reason: reason.unwrap_or(IneligibilityReason::NoShiftScheduled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceRules, ShiftKind};
    use crate::services::backend::BackendError;
    use crate::services::clock::FixedClock;
    use crate::services::fake::FakeBackend;
    use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    async fn session_at(
        now: &str,
        shift: Option<ShiftKind>,
    ) -> (AttendanceSession<FakeBackend>, Arc<FixedClock>) {
        let backend = FakeBackend::default();
        if let Some(kind) = shift {
            backend
                .schedules
                .lock()
                .await
                .push(ScheduledShift::canonical("emp_001", today(), kind));
        }
        *backend.server_time.lock().await = make_datetime(now);

        let clock = Arc::new(FixedClock::new(make_datetime(now)));
        let client =
            AttendanceClient::new(backend, Duration::from_secs(1), AttendanceRules::default());
        let mut session = AttendanceSession::new(
            client,
            clock.clone(),
            Arc::new(RulesStore::default()),
            "emp_001",
        );
        session.refresh().await.unwrap();
        (session, clock)
    }

    fn at_office() -> LocationSample {
        LocationSample::Fix(AttendanceRules::default().office_location)
    }

    #[tokio::test]
    async fn test_check_in_inside_window() {
        let (mut session, _) = session_at("2026-01-15 08:45:00", Some(ShiftKind::Pagi)).await;
        session.set_location(at_office());

        let record = session.check_in(None).await.unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
        assert!(session.active_record().is_some_and(AttendanceRecord::has_checked_in));
        assert!(!session.availability().can_check_in);
    }

    #[tokio::test]
    async fn test_late_check_in_is_marked_late() {
        let (mut session, _) = session_at("2026-01-15 09:10:00", Some(ShiftKind::Pagi)).await;
        session.set_location(at_office());

        let record = session.check_in(None).await.unwrap();
        assert_eq!(record.status, AttendanceStatus::Late);
    }

    #[tokio::test]
    async fn test_check_in_refused_without_location() {
        let (mut session, _) = session_at("2026-01-15 08:45:00", Some(ShiftKind::Pagi)).await;

        let error = session.check_in(None).await.unwrap_err();
        assert!(matches!(
            error,
            EngineError::ActionUnavailable {
                reason: IneligibilityReason::AwaitingLocation,
                ..
            }
        ));
        // settings, today's and yesterday's schedule, records
        assert_eq!(session.client.backend().calls.load(Ordering::Relaxed), 4);
    }

    #[tokio::test]
    async fn test_no_shift_reports_no_shift() {
        let (mut session, _) = session_at("2026-01-15 08:45:00", None).await;
        session.set_location(at_office());

        let error = session.check_in(None).await.unwrap_err();
        assert!(matches!(
            error,
            EngineError::ActionUnavailable {
                reason: IneligibilityReason::NoShiftScheduled,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_failed_check_in_leaves_session_unchanged() {
        let (mut session, _) = session_at("2026-01-15 08:45:00", Some(ShiftKind::Pagi)).await;
        session.set_location(at_office());
        *session.client.backend().failure.lock().await = Some(BackendError::Rejected {
            message: Some("Server sibuk.".to_string()),
        });

        let error = session.check_in(None).await.unwrap_err();
        assert!(matches!(error, EngineError::Submission { .. }));
        assert!(session.active_record().is_none());
        assert!(session.availability().can_check_in);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_snapshots() {
        let (mut session, _) = session_at("2026-01-15 08:45:00", Some(ShiftKind::Pagi)).await;
        *session.client.backend().failure.lock().await =
            Some(BackendError::Transport("offline".to_string()));

        assert!(session.refresh().await.is_err());
        assert_eq!(session.shift().map(|s| s.shift), Some(ShiftKind::Pagi));
    }

    #[tokio::test]
    async fn test_check_out_after_shift_end() {
        let (mut session, clock) = session_at("2026-01-15 08:45:00", Some(ShiftKind::Pagi)).await;
        session.set_location(at_office());
        session.check_in(None).await.unwrap();

        assert!(session.check_out(None).await.is_err());

        clock.advance(ChronoDuration::hours(5) + ChronoDuration::minutes(30));
        *session.client.backend().server_time.lock().await = clock.now();

        let record = session.check_out(Some(Decimal::new(15000, 0))).await.unwrap();
        assert!(record.has_checked_out());
        assert_eq!(record.tip, Decimal::new(15000, 0));
        assert!(!session.availability().can_check_out);
        assert_eq!(session.week_summary(Decimal::new(40, 0)).days_worked, 1);
    }

    async fn malam_checked_in() -> (AttendanceSession<FakeBackend>, Arc<FixedClock>) {
        let (mut session, clock) = session_at("2026-01-15 18:50:00", Some(ShiftKind::Malam)).await;
        session.set_location(at_office());
        session.check_in(None).await.unwrap();

        clock.set(make_datetime("2026-01-16 00:15:00"));
        *session.client.backend().server_time.lock().await = clock.now();
        (session, clock)
    }

    #[tokio::test]
    async fn test_overnight_check_out_after_midnight() {
        let (mut session, _) = malam_checked_in().await;

        let availability = session.availability();
        assert!(availability.can_check_out);
        assert!(!availability.can_check_in);

        let record = session.check_out(None).await.unwrap();
        assert_eq!(record.date, today());
        assert!(record.has_checked_out());
    }

    #[tokio::test]
    async fn test_refresh_after_midnight_keeps_overnight_shift() {
        let (mut session, _) = malam_checked_in().await;

        session.refresh().await.unwrap();
        assert_eq!(session.shift().map(|s| s.date), Some(today()));
        assert!(session.active_record().is_some_and(AttendanceRecord::has_checked_in));
        assert!(!session.availability().can_check_in);
        assert!(session.check_out(None).await.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_after_overnight_window_moves_to_today() {
        let (mut session, clock) = malam_checked_in().await;
        clock.set(make_datetime("2026-01-16 00:31:00"));

        session.refresh().await.unwrap();
        assert!(session.shift().is_none());
        assert_eq!(
            session.assessment().state,
            crate::models::AttendanceState::NoSchedule
        );
    }

    #[tokio::test]
    async fn test_refresh_applies_backend_rules() {
        let backend = FakeBackend::default();
        *backend.settings.lock().await = serde_json::from_value(serde_json::json!({
            "radius_m": 0
        }))
        .unwrap();
        let store = Arc::new(RulesStore::default());
        let mut session = AttendanceSession::new(
            AttendanceClient::new(backend, Duration::from_secs(1), AttendanceRules::default()),
            Arc::new(FixedClock::new(make_datetime("2026-01-15 08:45:00"))),
            store.clone(),
            "emp_001",
        );

        session.refresh().await.unwrap();
        assert!(!store.snapshot().requires_geofence);
    }
}
