//! Wire shapes of the remote HIMS API.
//!
//! Field names follow the backend exactly, including its spellings
//! (`accending`, `commentOnReffered`, `helthId`, `isEmergencyIn10Mint`) —
//! these are load-bearing and must not be "fixed" here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{AppointmentTime, FeeStatus};
use crate::vitals::{EmergencyVerdict, VitalsReading};

// ─── Response envelopes ───────────────────────────────────────────────────────

/// `{ "data": ... }`
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// `{ "data": [...], "totalCount": n, "currentPage": p }`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "default_page")]
    pub current_page: u32,
}

fn default_page() -> u32 {
    1
}

/// `{ "isSuccess": bool, "message": ... }` acknowledgment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ack {
    #[serde(default)]
    pub is_success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the backend sends with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ─── Check status options ─────────────────────────────────────────────────────

/// Server-defined disposition option shown in the check-status selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOption {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub option_name: String,
}

/// Payload of `checkAppointment`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    pub appointment_checked_status: String,
    #[serde(rename = "commentOnReffered")]
    pub comment_on_referred: String,
    pub schedule_notation: Vec<Value>,
}

// ─── Vitals payloads ──────────────────────────────────────────────────────────

/// Payload of `addVitals` — initial vitals creation.
///
/// Absent measurements go out as `"N/A"`, matching what the backend
/// expects on creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVitals {
    pub weight: String,
    pub temperature: String,
    #[serde(rename = "BP")]
    pub bp: String,
    #[serde(rename = "HR")]
    pub hr: String,
    #[serde(rename = "RR")]
    pub rr: String,
    pub extra: serde_json::Map<String, Value>,
    pub appointment_id: String,
    pub patient_id: String,
    pub symptoms: String,
    #[serde(rename = "isEmergencyIn10Mint")]
    pub is_emergency_in_10_min: bool,
    #[serde(rename = "isEmergencyIn1Hr")]
    pub is_emergency_in_1_hr: bool,
    pub message: String,
}

impl NewVitals {
    pub fn from_reading(
        appointment_id: &str,
        patient_id: &str,
        reading: &VitalsReading,
        verdict: &EmergencyVerdict,
    ) -> Self {
        Self {
            weight: or_na(&reading.weight),
            temperature: or_na(&reading.temperature),
            bp: or_na(&reading.bp),
            hr: or_na(&reading.hr),
            rr: or_na(&reading.rr),
            extra: extra_map(reading),
            appointment_id: appointment_id.to_string(),
            patient_id: patient_id.to_string(),
            symptoms: "N/A".to_string(),
            is_emergency_in_10_min: verdict.is_emergency,
            is_emergency_in_1_hr: false,
            message: verdict.message.clone(),
        }
    }
}

/// Payload of `updateVitalById` — vitals revision.
///
/// Absent measurements go out as empty strings on update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsUpdate {
    #[serde(rename = "BP")]
    pub bp: String,
    #[serde(rename = "HR")]
    pub hr: String,
    #[serde(rename = "RR")]
    pub rr: String,
    pub symptoms: String,
    pub temperature: String,
    pub weight: String,
    pub extra: serde_json::Map<String, Value>,
    #[serde(rename = "isEmergencyIn1Hr")]
    pub is_emergency_in_1_hr: bool,
    #[serde(rename = "isEmergencyIn10Mint")]
    pub is_emergency_in_10_min: bool,
    pub message: String,
}

impl VitalsUpdate {
    pub fn from_reading(reading: &VitalsReading, verdict: &EmergencyVerdict) -> Self {
        Self {
            bp: reading.bp.clone(),
            hr: reading.hr.clone(),
            rr: reading.rr.clone(),
            symptoms: String::new(),
            temperature: reading.temperature.clone(),
            weight: reading.weight.clone(),
            extra: extra_map(reading),
            is_emergency_in_1_hr: false,
            is_emergency_in_10_min: verdict.is_emergency,
            message: verdict.message.clone(),
        }
    }
}

fn or_na(value: &str) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

/// Flatten the ordered extra list into the `{title: measurement}` object
/// the backend stores. Insertion order is preserved.
fn extra_map(reading: &VitalsReading) -> serde_json::Map<String, Value> {
    reading
        .extra
        .iter()
        .map(|e| (e.title.clone(), Value::String(e.measurement.clone())))
        .collect()
}

// ─── Patient intake ───────────────────────────────────────────────────────────

/// Payload of `registerPatient` — patient plus their first appointment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRegistration {
    pub mrn: u64,
    pub patient_name: String,
    pub guardians_name: String,
    pub gender: String,
    /// YYYY-MM-DD
    pub dob: String,
    pub phone_number: String,
    pub cnic: String,
    #[serde(rename = "helthId")]
    pub health_id: String,
    pub city: String,
    pub reference: String,
    pub appointment: NewAppointment,
}

/// First appointment created together with the patient.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub doctor_id: String,
    pub services: Vec<String>,
    pub fee_status: FeeStatus,
    /// YYYY-MM-DD
    pub appointment_date: String,
    pub appointment_time: AppointmentTime,
    pub discount: f64,
    pub discount_in_percentage: f64,
    pub returnable_amount: f64,
}

/// Payload of `updateAppointment` — rescheduling or rebilling an existing
/// appointment. Same field set the registration appointment carries, minus
/// the returnable amount (refunds are settled separately).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    pub doctor_id: String,
    pub services: Vec<String>,
    pub fee_status: FeeStatus,
    /// YYYY-MM-DD
    pub appointment_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_time: Option<AppointmentTime>,
    pub discount: f64,
    pub discount_in_percentage: f64,
}

/// Query parameters for the doctors catalog.
#[derive(Debug, Clone, Default)]
pub struct DoctorQuery {
    pub count: Option<u32>,
    pub page_no: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtraVital;

    #[test]
    fn new_vitals_defaults_missing_fields_to_na() {
        let reading = VitalsReading {
            temperature: "103".into(),
            ..Default::default()
        };
        let verdict = crate::vitals::classify(&reading);
        let payload = NewVitals::from_reading("a1", "p1", &reading, &verdict);
        assert_eq!(payload.weight, "N/A");
        assert_eq!(payload.temperature, "103");
        assert!(payload.is_emergency_in_10_min);
        assert_eq!(payload.message, "High temperature detected. ");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["BP"], "N/A");
        assert_eq!(json["isEmergencyIn10Mint"], true);
        assert_eq!(json["appointmentId"], "a1");
    }

    #[test]
    fn update_payload_uses_empty_strings_and_backend_names() {
        let reading = VitalsReading {
            hr: "72".into(),
            extra: vec![ExtraVital {
                title: "SpO2".into(),
                measurement: "97%".into(),
            }],
            ..Default::default()
        };
        let verdict = crate::vitals::classify(&reading);
        let payload = VitalsUpdate::from_reading(&reading, &verdict);
        assert_eq!(payload.weight, "");
        assert!(!payload.is_emergency_in_10_min);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["HR"], "72");
        assert_eq!(json["extra"]["SpO2"], "97%");
        assert_eq!(json["message"], "");
    }

    #[test]
    fn check_request_keeps_backend_spelling() {
        let req = CheckRequest {
            appointment_checked_status: "Referred".into(),
            comment_on_referred: "Referred to specialist".into(),
            schedule_notation: vec![],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("commentOnReffered").is_some());
        assert!(json.get("commentOnReferred").is_none());
    }

    #[test]
    fn appointment_update_omits_absent_time() {
        let update = AppointmentUpdate {
            doctor_id: "64a1f0c2e4b0a1b2c3d4e5f6".into(),
            services: vec!["64a1f0c2e4b0a1b2c3d4e5f7".into()],
            fee_status: FeeStatus::Paid,
            appointment_date: "2025-03-14".into(),
            appointment_time: None,
            discount: 250.0,
            discount_in_percentage: 12.5,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["doctorId"], "64a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(json["discountInPercentage"], 12.5);
        assert!(json.get("appointmentTime").is_none());
    }

    #[test]
    fn registration_renames_health_id() {
        let reg = PatientRegistration {
            mrn: 0,
            patient_name: "Test".into(),
            guardians_name: String::new(),
            gender: "Male".into(),
            dob: "1990-01-01".into(),
            phone_number: "03001234567".into(),
            cnic: "1234512345671".into(),
            health_id: String::new(),
            city: "Lahore".into(),
            reference: String::new(),
            appointment: NewAppointment {
                doctor_id: "64a1f0c2e4b0a1b2c3d4e5f6".into(),
                services: vec!["64a1f0c2e4b0a1b2c3d4e5f7".into()],
                fee_status: FeeStatus::Unpaid,
                appointment_date: "2025-03-14".into(),
                appointment_time: AppointmentTime {
                    from: "09:00:00".into(),
                    to: "09:30:00".into(),
                },
                discount: 0.0,
                discount_in_percentage: 0.0,
                returnable_amount: 0.0,
            },
        };
        let json = serde_json::to_value(&reg).unwrap();
        assert!(json.get("helthId").is_some());
        assert_eq!(json["appointment"]["feeStatus"], "unpaid");
    }
}
