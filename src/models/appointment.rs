use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{CheckState, FeeStatus};

/// One scheduled patient visit, as returned by the appointment list.
///
/// The record is the single source of truth for workflow routing: the
/// check-state machine reads `is_deleted` / `is_checked` here, never the
/// tab the UI happens to be displaying.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub patient_id: Option<PatientRef>,
    pub fee_status: FeeStatus,
    #[serde(default)]
    pub is_checked: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub appointment_date: Option<NaiveDate>,
    #[serde(default)]
    pub appointment_time: Option<AppointmentTime>,
    #[serde(default)]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub fee: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub discount_in_percentage: f64,
    /// Required on soft-deleted records.
    #[serde(default)]
    pub delete_reason: Option<String>,
    /// Zero-or-one vitals facet.
    #[serde(default)]
    pub vitals: Option<VitalsRecord>,
}

fn default_true() -> bool {
    true
}

impl Appointment {
    /// Lifecycle state derived from the record's own flags.
    pub fn check_state(&self) -> CheckState {
        if self.is_deleted {
            CheckState::Deleted
        } else if self.is_checked {
            CheckState::Checked
        } else {
            CheckState::Active
        }
    }

    /// Vitals recording state (see [`VitalsState`]).
    pub fn vitals_state(&self) -> VitalsState {
        match &self.vitals {
            None => VitalsState::NotRecorded,
            Some(v) => v.state(),
        }
    }
}

/// Reference to the registered patient on an appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub mrn: Option<u64>,
}

/// Scheduled time range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentTime {
    pub from: String,
    pub to: String,
}

/// Free-form extra measurement entered alongside the fixed vitals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraVital {
    pub title: String,
    pub measurement: String,
}

/// Persisted vitals facet of an appointment.
///
/// All measurements travel as strings on the wire; validation happens in
/// [`crate::vitals::validate`] before anything is sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub temperature: Option<String>,
    #[serde(rename = "BP", default)]
    pub bp: Option<String>,
    #[serde(rename = "HR", default)]
    pub hr: Option<String>,
    #[serde(rename = "RR", default)]
    pub rr: Option<String>,
    #[serde(default)]
    pub extra: Vec<ExtraVital>,
    #[serde(rename = "isEmergencyIn10Mint", default)]
    pub is_emergency_in_10_min: bool,
    #[serde(rename = "isEmergencyIn1Hr", default)]
    pub is_emergency_in_1_hr: bool,
    /// Emergency message as stored by the backend. Absent, empty, and
    /// non-empty are three distinct cases; read it through [`Self::state`].
    #[serde(default)]
    pub message: Option<String>,
}

impl VitalsRecord {
    pub fn state(&self) -> VitalsState {
        match self.message.as_deref() {
            None => VitalsState::NotRecorded,
            Some("") => VitalsState::RecordedNonEmergency,
            Some(msg) => VitalsState::RecordedEmergency(msg.to_string()),
        }
    }
}

/// Explicit three-state reading of the vitals facet.
///
/// Replaces the ambiguous "is `message` undefined or merely empty" check:
/// a facet with no message has never been committed, an empty message is a
/// committed non-emergency reading, and a non-empty message carries the
/// emergency text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VitalsState {
    NotRecorded,
    RecordedNonEmergency,
    RecordedEmergency(String),
}

impl VitalsState {
    pub fn is_emergency(&self) -> bool {
        matches!(self, VitalsState::RecordedEmergency(_))
    }
}
