//! Appointment check-state machine.
//!
//! Lifecycle: `Active ⇄ Checked` via check/uncheck, `Active|Checked →
//! Deleted` via soft delete, `Deleted → Active` via restore. Routing
//! always reads the record's own flags ([`Appointment::check_state`]) —
//! never the tab or list a UI happens to be displaying, so a record whose
//! server state diverges from the screen cannot be pushed through the
//! wrong transition.
//!
//! Each desk owns its list and takes `&mut self` for every transition,
//! which makes a second in-flight mutation from the same screen session
//! unrepresentable. Two sessions on two devices can still race on the
//! same record; last write wins (no version token exists on the entity).

use crate::api::{ApiError, AppointmentApi, AppointmentUpdate, CheckRequest};
use crate::models::{
    Appointment, AppointmentFilter, CheckState, DeletedFilter, Page,
};
use crate::registration::{self, IntakeError};
use crate::vitals::{self, SubmitError, SubmitOutcome, VitalsReading};

/// Comment sent with every check; the backend requires one.
pub const REFERRAL_COMMENT: &str = "Referred to specialist";

/// Which dialog the "check" action should open for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckRoute {
    /// Active record: pick a disposition option, then check.
    SelectStatus,
    /// Checked record: confirm, then uncheck.
    ConfirmUncheck,
}

#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("'{trigger}' is not allowed while the appointment is {from:?}")]
    Illegal {
        from: CheckState,
        trigger: &'static str,
    },
    #[error("A deletion reason is required")]
    EmptyDeleteReason,
    #[error("Unknown status option: {0}")]
    UnknownStatusOption(String),
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Route the "check" action from the record's canonical state.
pub fn check_route(appointment: &Appointment) -> Result<CheckRoute, TransitionError> {
    match appointment.check_state() {
        CheckState::Active => Ok(CheckRoute::SelectStatus),
        CheckState::Checked => Ok(CheckRoute::ConfirmUncheck),
        CheckState::Deleted => Err(TransitionError::Illegal {
            from: CheckState::Deleted,
            trigger: "check",
        }),
    }
}

fn require_state(
    appointment: &Appointment,
    allowed: &[CheckState],
    trigger: &'static str,
) -> Result<(), TransitionError> {
    let from = appointment.check_state();
    if allowed.contains(&from) {
        Ok(())
    } else {
        Err(TransitionError::Illegal { from, trigger })
    }
}

// ═══════════════════════════════════════════════════════════
// AppointmentDesk — the active/checked screen
// ═══════════════════════════════════════════════════════════

/// Workflow over the active/checked appointment list.
pub struct AppointmentDesk<A: AppointmentApi> {
    api: A,
    pub filter: AppointmentFilter,
    appointments: Vec<Appointment>,
    total_count: u64,
}

impl<A: AppointmentApi> AppointmentDesk<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            filter: AppointmentFilter::default(),
            appointments: Vec::new(),
            total_count: 0,
        }
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// Refetch the list with the current filter.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let page = self.api.list_appointments(&self.filter).await?;
        self.apply(page);
        Ok(())
    }

    fn apply(&mut self, page: Page<Appointment>) {
        self.total_count = page.total_count;
        self.filter.page_no = page.current_page;
        self.appointments = page.items;
    }

    /// Refresh after a mutation that already succeeded; a refetch failure
    /// is logged rather than raised because the mutation did happen.
    async fn refresh_logged(&mut self) {
        if let Err(err) = self.refresh().await {
            tracing::warn!(error = %err, "list refresh after transition failed");
        }
    }

    /// `Active → Checked` with a disposition chosen from the server's
    /// option list; unknown options are rejected before any mutation.
    pub async fn check(&mut self, id: &str, option_name: &str) -> Result<(), TransitionError> {
        let appointment = self.require(id)?;
        require_state(appointment, &[CheckState::Active], "check")?;

        let options = self.api.list_status_options().await?;
        if !options.iter().any(|o| o.option_name == option_name) {
            return Err(TransitionError::UnknownStatusOption(option_name.to_string()));
        }

        let request = CheckRequest {
            appointment_checked_status: option_name.to_string(),
            comment_on_referred: REFERRAL_COMMENT.to_string(),
            schedule_notation: Vec::new(),
        };
        self.api.check_appointment(id, &request).await?;
        tracing::info!(appointment = id, status = option_name, "appointment checked");
        self.refresh_logged().await;
        Ok(())
    }

    /// `Checked → Active`, after the user confirmed.
    pub async fn uncheck(&mut self, id: &str) -> Result<(), TransitionError> {
        let appointment = self.require(id)?;
        require_state(appointment, &[CheckState::Checked], "uncheck")?;

        self.api.uncheck_appointment(id).await?;
        tracing::info!(appointment = id, "appointment unchecked");
        self.refresh_logged().await;
        Ok(())
    }

    /// Reschedule or rebill a listed appointment. Legal while the record
    /// is not deleted; the payload must pass the intake rules before
    /// anything is posted. Refetch on success only.
    pub async fn edit(
        &mut self,
        id: &str,
        update: &AppointmentUpdate,
    ) -> Result<(), TransitionError> {
        let appointment = self.require(id)?;
        require_state(
            appointment,
            &[CheckState::Active, CheckState::Checked],
            "edit",
        )?;
        registration::validate_appointment_update(update)?;

        self.api.update_appointment(id, update).await?;
        tracing::info!(appointment = id, "appointment updated");
        self.refresh_logged().await;
        Ok(())
    }

    /// `Active|Checked → Deleted` with a required reason. The list is
    /// refetched regardless of the call outcome.
    pub async fn delete(&mut self, id: &str, reason: &str) -> Result<(), TransitionError> {
        let appointment = self.require(id)?;
        require_state(
            appointment,
            &[CheckState::Active, CheckState::Checked],
            "delete",
        )?;
        if reason.trim().is_empty() {
            return Err(TransitionError::EmptyDeleteReason);
        }

        let result = self.api.delete_appointment(id, reason).await;
        self.refresh_logged().await;
        result?;
        tracing::info!(appointment = id, "appointment soft-deleted");
        Ok(())
    }

    /// Commit a vitals draft for a listed appointment, then refetch.
    pub async fn submit_vitals(
        &mut self,
        id: &str,
        reading: &VitalsReading,
    ) -> Result<SubmitOutcome, SubmitError> {
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(SubmitError::MissingAppointmentId)?;

        let outcome = vitals::submit(&self.api, appointment, reading).await?;
        self.refresh_logged().await;
        Ok(outcome)
    }

    fn require(&self, id: &str) -> Result<&Appointment, TransitionError> {
        self.appointment(id).ok_or(TransitionError::Api(
            ApiError::Rejected(format!("Appointment {id} is not in the current list")),
        ))
    }
}

// ═══════════════════════════════════════════════════════════
// DeleteHistoryDesk — the soft-delete history screen
// ═══════════════════════════════════════════════════════════

/// Workflow over the deleted-appointments list.
pub struct DeleteHistoryDesk<A: AppointmentApi> {
    api: A,
    pub filter: DeletedFilter,
    deleted: Vec<Appointment>,
    total_count: u64,
}

impl<A: AppointmentApi> DeleteHistoryDesk<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            filter: DeletedFilter::default(),
            deleted: Vec::new(),
            total_count: 0,
        }
    }

    pub fn deleted(&self) -> &[Appointment] {
        &self.deleted
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let page = self.api.list_deleted_appointments(&self.filter).await?;
        self.total_count = page.total_count;
        self.filter.page_no = page.current_page;
        self.deleted = page.items;
        Ok(())
    }

    /// `Deleted → Active`, after the user confirmed. The routing flag may
    /// be stale — a server response that the record is already active is
    /// still success. The list is refetched regardless of the outcome.
    pub async fn restore(&mut self, id: &str) -> Result<(), TransitionError> {
        let appointment = self
            .deleted
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| {
                TransitionError::Api(ApiError::Rejected(format!(
                    "Appointment {id} is not in the deleted list"
                )))
            })?;
        require_state(appointment, &[CheckState::Deleted], "restore")?;

        let result = self.api.restore_appointment(id).await;
        if let Err(err) = self.refresh().await {
            tracing::warn!(error = %err, "history refresh after restore failed");
        }
        result?;
        tracing::info!(appointment = id, "appointment restored");
        Ok(())
    }
}
