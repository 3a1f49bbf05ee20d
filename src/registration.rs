//! Patient intake validation and fee/discount arithmetic.
//!
//! Everything here is local: the payload only goes out through
//! [`AppointmentApi::register_patient`] once [`validate_registration`]
//! passes.

use std::sync::LazyLock;

use regex::Regex;

use crate::api::{ApiError, AppointmentApi, AppointmentUpdate, DoctorQuery, PatientRegistration};
use crate::models::CatalogCache;

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^03\d{9}$").expect("invalid phone regex")
});

static OBJECT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{24}$").expect("invalid object id regex")
});

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("Patient name is required")]
    EmptyPatientName,
    #[error("Enter a valid phone number starting with 03 and 11 digits long")]
    InvalidPhone,
    #[error("Enter a valid 13 digit CNIC")]
    InvalidCnic,
    #[error("Invalid doctor id")]
    InvalidDoctorId,
    #[error("Invalid service id")]
    InvalidServiceId,
    #[error("At least one service is required")]
    NoServices,
    #[error("Fee must be greater than 0")]
    NonPositiveFee,
    #[error("Discount percent must be between 0 and 100")]
    PercentOutOfRange,
    #[error("Discount cannot be negative")]
    NegativeDiscount,
    #[error("Discount cannot exceed total fee")]
    DiscountExceedsFee,
}

/// CNIC digits after stripping separators (`35202-1234567-1` forms are
/// accepted); exactly 13 digits are required.
fn cnic_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn valid_phone(raw: &str) -> bool {
    PHONE_RE.is_match(raw)
}

pub fn valid_cnic(raw: &str) -> bool {
    cnic_digits(raw).len() == 13
}

pub fn valid_object_id(raw: &str) -> bool {
    OBJECT_ID_RE.is_match(raw)
}

// ─── Billing arithmetic ───────────────────────────────────────────────────────

/// Fee payable after discount.
pub fn payable_fee(total: f64, discount: f64) -> f64 {
    total - discount
}

/// Discount amount for a percentage of the total.
pub fn discount_from_percent(total: f64, percent: f64) -> Result<f64, IntakeError> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(IntakeError::PercentOutOfRange);
    }
    Ok(total * percent / 100.0)
}

/// Percentage a discount amount represents, rounded to two decimals.
pub fn percent_from_discount(total: f64, discount: f64) -> Result<f64, IntakeError> {
    if total <= 0.0 {
        return Err(IntakeError::NonPositiveFee);
    }
    if discount > total {
        return Err(IntakeError::DiscountExceedsFee);
    }
    let percent = discount / total * 100.0;
    Ok((percent * 100.0).round() / 100.0)
}

/// Check an intake payload before it is posted.
pub fn validate_registration(registration: &PatientRegistration) -> Result<(), IntakeError> {
    if registration.patient_name.trim().is_empty() {
        return Err(IntakeError::EmptyPatientName);
    }
    if !valid_phone(&registration.phone_number) {
        return Err(IntakeError::InvalidPhone);
    }
    if !valid_cnic(&registration.cnic) {
        return Err(IntakeError::InvalidCnic);
    }

    let appointment = &registration.appointment;
    if !valid_object_id(&appointment.doctor_id) {
        return Err(IntakeError::InvalidDoctorId);
    }
    if appointment.services.is_empty() {
        return Err(IntakeError::NoServices);
    }
    if appointment.services.iter().any(|s| !valid_object_id(s)) {
        return Err(IntakeError::InvalidServiceId);
    }
    if appointment.discount < 0.0 {
        return Err(IntakeError::NegativeDiscount);
    }
    if !(0.0..=100.0).contains(&appointment.discount_in_percentage) {
        return Err(IntakeError::PercentOutOfRange);
    }
    Ok(())
}

/// Check an appointment-edit payload before it is posted. Same rules as
/// the intake appointment: valid ids, at least one service, discount
/// invariants.
pub fn validate_appointment_update(update: &AppointmentUpdate) -> Result<(), IntakeError> {
    if !valid_object_id(&update.doctor_id) {
        return Err(IntakeError::InvalidDoctorId);
    }
    if update.services.is_empty() {
        return Err(IntakeError::NoServices);
    }
    if update.services.iter().any(|s| !valid_object_id(s)) {
        return Err(IntakeError::InvalidServiceId);
    }
    if update.discount < 0.0 {
        return Err(IntakeError::NegativeDiscount);
    }
    if !(0.0..=100.0).contains(&update.discount_in_percentage) {
        return Err(IntakeError::PercentOutOfRange);
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Fill the doctor→services catalog for a form session.
///
/// Fetches only when the cache is empty; an open form keeps its snapshot.
pub async fn load_catalog<A: AppointmentApi>(
    api: &A,
    cache: &mut CatalogCache,
) -> Result<(), ApiError> {
    if !cache.is_empty() {
        return Ok(());
    }
    let page = api
        .list_doctors(&DoctorQuery {
            count: Some(100),
            page_no: Some(1),
        })
        .await?;
    cache.fill(page.items);
    Ok(())
}

/// Validate locally, then post the intake payload.
pub async fn register<A: AppointmentApi>(
    api: &A,
    registration: &PatientRegistration,
) -> Result<(), RegistrationError> {
    validate_registration(registration)?;
    api.register_patient(registration).await?;
    tracing::info!(mrn = registration.mrn, "patient registered");
    Ok(())
}
