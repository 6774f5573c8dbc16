//! In-memory attendance backend for tests.
//!
//! Records are stamped with `server_time`, so tests control the recorded
//! check-in and check-out times independently of the session clock.

use super::backend::{AttendanceBackend, BackendError, CheckInSubmission, CheckOutSubmission};
use crate::models::{AttendanceRecord, ScheduledShift, SettingsPayload};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// Backend that keeps everything in memory.
pub struct FakeBackend {
    /// Returned by `settings`.
    pub settings: Mutex<SettingsPayload>,
    /// Looked up by employee and date.
    pub schedules: Mutex<Vec<ScheduledShift>>,
    /// Attendance records, appended on check-in and updated on check-out.
    pub records: Mutex<Vec<AttendanceRecord>>,
    /// Every shift passed to `save_schedule`.
    pub saved_schedules: Mutex<Vec<ScheduledShift>>,
    /// When set, every call fails with this error.
    pub failure: Mutex<Option<BackendError>>,
    /// Time stamped onto check-in and check-out.
    pub server_time: Mutex<NaiveDateTime>,
    /// Number of calls made, including failed ones.
    pub calls: AtomicU64,
    /// Sleep before answering each call.
    pub delay: Duration,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            settings: Mutex::new(SettingsPayload::default()),
            schedules: Mutex::new(Vec::new()),
            records: Mutex::new(Vec::new()),
            saved_schedules: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            server_time: Mutex::new(
                NaiveDate::from_ymd_opt(2026, 1, 15)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
            ),
            calls: AtomicU64::new(0),
            delay: Duration::ZERO,
        }
    }
}

impl FakeBackend {
    /// Counts the call, waits out the delay and applies any injected failure.
    async fn enter(&self) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.failure.lock().await.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AttendanceBackend for FakeBackend {
    async fn settings(&self) -> Result<SettingsPayload, BackendError> {
        self.enter().await?;
        Ok(self.settings.lock().await.clone())
    }

    async fn schedule(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<ScheduledShift>, BackendError> {
        self.enter().await?;
        Ok(self
            .schedules
            .lock()
            .await
            .iter()
            .find(|s| s.employee_id == employee_id && s.date == date)
            .cloned())
    }

    async fn attendance_records(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, BackendError> {
        self.enter().await?;
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn check_in(
        &self,
        submission: &CheckInSubmission,
    ) -> Result<AttendanceRecord, BackendError> {
        self.enter().await?;
        let now = *self.server_time.lock().await;
        let mut record = AttendanceRecord::new(submission.employee_id.clone(), now.date());
        record.check_in_time = Some(now.time());
        record.check_in_location = submission.location;
        record.status = submission.status;
        self.records.lock().await.push(record.clone());
        Ok(record)
    }

    async fn check_out(
        &self,
        submission: &CheckOutSubmission,
    ) -> Result<AttendanceRecord, BackendError> {
        self.enter().await?;
        let now = *self.server_time.lock().await;
        let mut records = self.records.lock().await;
        let record = records
            .iter_mut()
            .rev()
            .find(|r| r.employee_id == submission.employee_id && r.has_checked_in())
            .ok_or_else(|| BackendError::Rejected {
                message: Some("Belum check-in.".to_string()),
            })?;
        record.check_out_time = Some(now.time());
        record.tip = submission.tip.unwrap_or_default();
        Ok(record.clone())
    }

    async fn save_schedule(&self, shift: &ScheduledShift) -> Result<ScheduledShift, BackendError> {
        self.enter().await?;
        self.saved_schedules.lock().await.push(shift.clone());
        Ok(shift.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_check_out_without_check_in_is_rejected() {
        let backend = FakeBackend::default();
        let submission = CheckOutSubmission {
            employee_id: "emp_001".to_string(),
            location: None,
            tip: None,
        };

        let result = backend.check_out(&submission).await;
        assert!(matches!(
            result,
            Err(BackendError::Rejected { message: Some(ref m) }) if m == "Belum check-in."
        ));
        assert_eq!(backend.calls.load(Ordering::Relaxed), 1);
    }
}
