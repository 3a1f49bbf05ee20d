//! Vitals submission: SAVE vs UPDATE selection and the commit flow.
//!
//! Strict ordering for one submit: validate → classify → collaborator
//! call → merge into the local record. The caller refetches the list and
//! closes the form afterwards; on any failure the draft stays untouched
//! so nothing the user typed is lost.

use crate::api::{ApiError, AppointmentApi, NewVitals, VitalsUpdate};
use crate::models::{Appointment, VitalsRecord, VitalsState};

use super::emergency::{classify, EmergencyVerdict};
use super::reading::VitalsReading;
use super::validate::{validate, FieldErrors};

/// Which write operation a submit resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// Initial creation: no vitals have ever been committed.
    Save,
    /// Revision of the existing record.
    Update,
}

/// Result of a successful submit.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub mode: SubmitMode,
    pub verdict: EmergencyVerdict,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// One or more fields failed validation; no network call was made.
    #[error("Vitals validation failed")]
    Invalid(FieldErrors),
    #[error("Missing appointment ID")]
    MissingAppointmentId,
    #[error("Missing patient ID")]
    MissingPatientId,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Select the write operation from the recording state.
///
/// A committed record — emergency or not — is always revised through
/// UPDATE; only a never-committed facet takes the SAVE path.
pub fn submit_mode(state: &VitalsState) -> SubmitMode {
    match state {
        VitalsState::NotRecorded => SubmitMode::Save,
        VitalsState::RecordedNonEmergency | VitalsState::RecordedEmergency(_) => SubmitMode::Update,
    }
}

/// Commit a draft reading against the appointment.
///
/// The appointment is only mutated after the collaborator call succeeds.
pub async fn submit<A: AppointmentApi>(
    api: &A,
    appointment: &mut Appointment,
    reading: &VitalsReading,
) -> Result<SubmitOutcome, SubmitError> {
    let errors = validate(reading);
    if !errors.is_valid() {
        return Err(SubmitError::Invalid(errors));
    }

    let verdict = classify(reading);
    if appointment.id.is_empty() {
        return Err(SubmitError::MissingAppointmentId);
    }

    let mode = submit_mode(&appointment.vitals_state());
    match mode {
        SubmitMode::Save => {
            let patient_id = appointment
                .patient_id
                .as_ref()
                .map(|p| p.id.clone())
                .filter(|id| !id.is_empty())
                .ok_or(SubmitError::MissingPatientId)?;
            let payload = NewVitals::from_reading(&appointment.id, &patient_id, reading, &verdict);
            api.submit_vitals(&payload).await?;
        }
        SubmitMode::Update => {
            // Existing record id, falling back to the appointment id the
            // way the backend routes revisions.
            let vitals_id = appointment
                .vitals
                .as_ref()
                .and_then(|v| v.id.clone())
                .unwrap_or_else(|| appointment.id.clone());
            let payload = VitalsUpdate::from_reading(reading, &verdict);
            api.update_vitals(&vitals_id, &payload).await?;
        }
    }

    merge_reading(appointment, reading, &verdict);
    tracing::info!(
        appointment = %appointment.id,
        emergency = verdict.is_emergency,
        ?mode,
        "vitals committed"
    );

    Ok(SubmitOutcome { mode, verdict })
}

/// Merge the committed reading into the appointment's vitals facet.
fn merge_reading(appointment: &mut Appointment, reading: &VitalsReading, verdict: &EmergencyVerdict) {
    let vitals = appointment.vitals.get_or_insert_with(VitalsRecord::default);
    vitals.weight = present(&reading.weight);
    vitals.temperature = present(&reading.temperature);
    vitals.bp = present(&reading.bp);
    vitals.hr = present(&reading.hr);
    vitals.rr = present(&reading.rr);
    vitals.extra = reading.extra.clone();
    vitals.is_emergency_in_10_min = verdict.is_emergency;
    // An empty message is still a committed (non-emergency) record.
    vitals.message = Some(verdict.message.clone());
}

fn present(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
