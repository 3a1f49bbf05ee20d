//! In-memory [`AppointmentApi`] for tests.
//!
//! Records every call so workflow tests can assert which collaborator ran
//! (and with what), and can be scripted to fail the next call.

use std::sync::{Mutex, PoisonError};

use crate::models::{Appointment, AppointmentFilter, DeletedFilter, Doctor, Page};

use super::error::ApiError;
use super::types::{
    AppointmentUpdate, CheckRequest, DoctorQuery, NewVitals, PatientRegistration, StatusOption,
    VitalsUpdate,
};
use super::AppointmentApi;

/// One recorded collaborator invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    SubmitVitals {
        appointment_id: String,
        patient_id: String,
        message: String,
    },
    UpdateVitals {
        vitals_id: String,
        message: String,
    },
    ListStatusOptions,
    Check {
        id: String,
        status: String,
        comment: String,
    },
    Uncheck {
        id: String,
    },
    Edit {
        id: String,
        doctor_id: String,
        discount: f64,
    },
    Delete {
        id: String,
        reason: String,
    },
    Restore {
        id: String,
    },
    ListAppointments,
    ListDeleted,
    ListDoctors,
    RegisterPatient {
        patient_name: String,
    },
}

/// Scripted API double.
#[derive(Default)]
pub struct MockApi {
    calls: Mutex<Vec<ApiCall>>,
    appointments: Mutex<Vec<Appointment>>,
    deleted: Mutex<Vec<Appointment>>,
    doctors: Vec<Doctor>,
    status_options: Vec<StatusOption>,
    fail_next: Mutex<Option<ApiError>>,
    fail_matching: Mutex<Option<(fn(&ApiCall) -> bool, ApiError)>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status_options(mut self, names: &[&str]) -> Self {
        self.status_options = names
            .iter()
            .map(|n| StatusOption {
                id: None,
                option_name: n.to_string(),
            })
            .collect();
        self
    }

    pub fn with_appointments(self, appointments: Vec<Appointment>) -> Self {
        *self.appointments.lock().unwrap_or_else(PoisonError::into_inner) = appointments;
        self
    }

    pub fn with_deleted(self, deleted: Vec<Appointment>) -> Self {
        *self.deleted.lock().unwrap_or_else(PoisonError::into_inner) = deleted;
        self
    }

    pub fn with_doctors(mut self, doctors: Vec<Doctor>) -> Self {
        self.doctors = doctors;
        self
    }

    /// Fail the next call with the given error, then recover.
    pub fn fail_next(&self, error: ApiError) {
        *self.fail_next.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Fail the first call matching the predicate with the given error,
    /// then recover. Non-matching calls in between succeed normally, so a
    /// targeted mutation can fail while the fetches around it still work.
    pub fn fail_matching(&self, matches: fn(&ApiCall) -> bool, error: ApiError) {
        *self
            .fail_matching
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some((matches, error));
    }

    /// Everything invoked so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Calls excluding list refreshes, for transition assertions.
    pub fn mutation_calls(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|c| {
                !matches!(
                    c,
                    ApiCall::ListAppointments
                        | ApiCall::ListDeleted
                        | ApiCall::ListStatusOptions
                        | ApiCall::ListDoctors
                )
            })
            .collect()
    }

    fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        let mut targeted = self
            .fail_matching
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let scripted = match targeted.take() {
            Some((matches, err)) if matches(&call) => Some(err),
            other => {
                *targeted = other;
                None
            }
        };
        drop(targeted);

        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);

        if let Some(err) = scripted {
            return Err(err);
        }
        match self
            .fail_next
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppointmentApi for MockApi {
    async fn submit_vitals(&self, vitals: &NewVitals) -> Result<(), ApiError> {
        self.record(ApiCall::SubmitVitals {
            appointment_id: vitals.appointment_id.clone(),
            patient_id: vitals.patient_id.clone(),
            message: vitals.message.clone(),
        })
    }

    async fn update_vitals(&self, vitals_id: &str, update: &VitalsUpdate) -> Result<(), ApiError> {
        self.record(ApiCall::UpdateVitals {
            vitals_id: vitals_id.to_string(),
            message: update.message.clone(),
        })
    }

    async fn list_status_options(&self) -> Result<Vec<StatusOption>, ApiError> {
        self.record(ApiCall::ListStatusOptions)?;
        Ok(self.status_options.clone())
    }

    async fn check_appointment(&self, id: &str, request: &CheckRequest) -> Result<(), ApiError> {
        self.record(ApiCall::Check {
            id: id.to_string(),
            status: request.appointment_checked_status.clone(),
            comment: request.comment_on_referred.clone(),
        })
    }

    async fn uncheck_appointment(&self, id: &str) -> Result<(), ApiError> {
        self.record(ApiCall::Uncheck { id: id.to_string() })
    }

    async fn update_appointment(
        &self,
        id: &str,
        update: &AppointmentUpdate,
    ) -> Result<(), ApiError> {
        self.record(ApiCall::Edit {
            id: id.to_string(),
            doctor_id: update.doctor_id.clone(),
            discount: update.discount,
        })?;
        let mut appointments = self
            .appointments
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(appt) = appointments.iter_mut().find(|a| a.id == id) {
            appt.doctor_id = Some(update.doctor_id.clone());
            appt.services = update.services.clone();
            appt.fee_status = update.fee_status;
            appt.discount = update.discount;
            appt.discount_in_percentage = update.discount_in_percentage;
        }
        Ok(())
    }

    async fn delete_appointment(&self, id: &str, reason: &str) -> Result<(), ApiError> {
        self.record(ApiCall::Delete {
            id: id.to_string(),
            reason: reason.to_string(),
        })?;
        // Mirror the backend: move the record to the history list.
        let mut appointments = self
            .appointments
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(pos) = appointments.iter().position(|a| a.id == id) {
            let mut appt = appointments.remove(pos);
            appt.is_deleted = true;
            appt.delete_reason = Some(reason.to_string());
            self.deleted
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(appt);
        }
        Ok(())
    }

    async fn restore_appointment(&self, id: &str) -> Result<(), ApiError> {
        self.record(ApiCall::Restore { id: id.to_string() })?;
        let mut deleted = self.deleted.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pos) = deleted.iter().position(|a| a.id == id) {
            let mut appt = deleted.remove(pos);
            appt.is_deleted = false;
            appt.delete_reason = None;
            self.appointments
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(appt);
        }
        // An id that is already active still acknowledges as success.
        Ok(())
    }

    async fn list_appointments(
        &self,
        _filter: &AppointmentFilter,
    ) -> Result<Page<Appointment>, ApiError> {
        self.record(ApiCall::ListAppointments)?;
        let items = self
            .appointments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Ok(Page {
            total_count: items.len() as u64,
            current_page: 1,
            items,
        })
    }

    async fn list_deleted_appointments(
        &self,
        _filter: &DeletedFilter,
    ) -> Result<Page<Appointment>, ApiError> {
        self.record(ApiCall::ListDeleted)?;
        let items = self
            .deleted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Ok(Page {
            total_count: items.len() as u64,
            current_page: 1,
            items,
        })
    }

    async fn list_doctors(&self, _query: &DoctorQuery) -> Result<Page<Doctor>, ApiError> {
        self.record(ApiCall::ListDoctors)?;
        Ok(Page {
            total_count: self.doctors.len() as u64,
            current_page: 1,
            items: self.doctors.clone(),
        })
    }

    async fn register_patient(&self, registration: &PatientRegistration) -> Result<(), ApiError> {
        self.record(ApiCall::RegisterPatient {
            patient_name: registration.patient_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_in_order() {
        let api = MockApi::new().with_status_options(&["Referred"]);
        api.list_status_options().await.unwrap();
        api.uncheck_appointment("a1").await.unwrap();
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::ListStatusOptions,
                ApiCall::Uncheck { id: "a1".into() }
            ]
        );
    }

    #[tokio::test]
    async fn fail_matching_skips_non_matching_calls() {
        let api = MockApi::new().with_status_options(&["Referred"]);
        api.fail_matching(
            |c| matches!(c, ApiCall::Uncheck { .. }),
            ApiError::Timeout(30),
        );
        // A non-matching call passes through untouched.
        api.list_status_options().await.unwrap();
        assert!(api.uncheck_appointment("a1").await.is_err());
        // The hook is consumed by the matching call.
        assert!(api.uncheck_appointment("a1").await.is_ok());
    }

    #[tokio::test]
    async fn fail_next_affects_only_one_call() {
        let api = MockApi::new();
        api.fail_next(ApiError::Server {
            status: 500,
            message: "boom".into(),
        });
        assert!(api.uncheck_appointment("a1").await.is_err());
        assert!(api.uncheck_appointment("a1").await.is_ok());
    }
}
