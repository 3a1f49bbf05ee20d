//! Remote HIMS collaborator.
//!
//! [`AppointmentApi`] is the seam between the workflow/vitals core and the
//! backend: [`client::HttpApi`] implements it over HTTP, and
//! [`mock::MockApi`] implements it in memory so the decision logic can be
//! tested without a network.

pub mod client;
pub mod error;
pub mod mock;
pub mod types;

pub use client::HttpApi;
pub use error::ApiError;
pub use mock::{ApiCall, MockApi};
pub use types::{
    AppointmentUpdate, CheckRequest, DoctorQuery, NewVitals, PatientRegistration, StatusOption,
    VitalsUpdate,
};

use crate::models::{Appointment, AppointmentFilter, DeletedFilter, Doctor, Page};

/// Operations the backend exposes to this core.
///
/// Request/response shapes are owned by the backend (`types`); every
/// implementation attaches the caller's bearer token and maps failures
/// into [`ApiError`].
pub trait AppointmentApi {
    /// Initial vitals creation for an appointment.
    async fn submit_vitals(&self, vitals: &NewVitals) -> Result<(), ApiError>;

    /// Revision of an existing vitals record.
    async fn update_vitals(&self, vitals_id: &str, update: &VitalsUpdate) -> Result<(), ApiError>;

    /// Server-defined disposition options for the check-status selector.
    async fn list_status_options(&self) -> Result<Vec<StatusOption>, ApiError>;

    /// Mark an appointment checked with the chosen disposition.
    async fn check_appointment(&self, id: &str, request: &CheckRequest) -> Result<(), ApiError>;

    /// Revert a checked appointment to active.
    async fn uncheck_appointment(&self, id: &str) -> Result<(), ApiError>;

    /// Reschedule or rebill an existing appointment.
    async fn update_appointment(
        &self,
        id: &str,
        update: &AppointmentUpdate,
    ) -> Result<(), ApiError>;

    /// Soft-delete with a required reason.
    async fn delete_appointment(&self, id: &str, reason: &str) -> Result<(), ApiError>;

    /// Return a soft-deleted appointment to the active list.
    async fn restore_appointment(&self, id: &str) -> Result<(), ApiError>;

    /// Active/checked appointment list.
    async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Page<Appointment>, ApiError>;

    /// Soft-delete history list.
    async fn list_deleted_appointments(
        &self,
        filter: &DeletedFilter,
    ) -> Result<Page<Appointment>, ApiError>;

    /// Doctor→services reference catalog.
    async fn list_doctors(&self, query: &DoctorQuery) -> Result<Page<Doctor>, ApiError>;

    /// Register a patient together with their first appointment.
    async fn register_patient(&self, registration: &PatientRegistration) -> Result<(), ApiError>;
}
