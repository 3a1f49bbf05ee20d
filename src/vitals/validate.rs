//! Field-level validation of a vitals draft.
//!
//! Pure and synchronous: the map of field→message this produces is what
//! the form renders inline, and submission is blocked while any message
//! is present. Nothing here touches the network or raises notifications.

use std::sync::LazyLock;

use regex::Regex;

use super::reading::VitalsReading;

static WEIGHT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{1,3}$").unwrap());
static BP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2,3}/\d{2,3}$").unwrap());

pub const MSG_AT_LEAST_ONE: &str = "At least one vital is required.";
pub const MSG_WEIGHT: &str = "Weight must be a positive number with a maximum of 3 digits.";
pub const MSG_TEMPERATURE: &str = "Temperature must be between 92 and 110 Fahrenheit.";
pub const MSG_HR: &str = "Heart Rate must be between 50 and 250 per minute.";
pub const MSG_BP_FORMAT: &str = "Blood Pressure must be in format systolic/diastolic (e.g., 120/80).";
pub const MSG_SYSTOLIC: &str = "Systolic pressure should be between 70 and 220.";
pub const MSG_DIASTOLIC: &str = "Diastolic pressure should be between 40 and 130.";
pub const MSG_RR: &str = "Respiratory Rate must be between 0 and 80 per minute.";

/// Per-field validation messages; `None` means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub weight: Option<&'static str>,
    pub temperature: Option<&'static str>,
    pub bp: Option<&'static str>,
    pub hr: Option<&'static str>,
    pub rr: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_valid(&self) -> bool {
        self.weight.is_none()
            && self.temperature.is_none()
            && self.bp.is_none()
            && self.hr.is_none()
            && self.rr.is_none()
    }

    fn all(message: &'static str) -> Self {
        Self {
            weight: Some(message),
            temperature: Some(message),
            bp: Some(message),
            hr: Some(message),
            rr: Some(message),
        }
    }
}

/// Validate a draft against the clinical range/format rules.
///
/// Each rule applies only when its field is non-empty; an entirely empty
/// draft fails with the at-least-one message on every field.
pub fn validate(reading: &VitalsReading) -> FieldErrors {
    if reading.is_empty() {
        return FieldErrors::all(MSG_AT_LEAST_ONE);
    }

    let mut errors = FieldErrors::default();

    if !reading.weight.is_empty() {
        let positive = reading.weight.parse::<u32>().is_ok_and(|w| w > 0);
        if !WEIGHT_RE.is_match(&reading.weight) || !positive {
            errors.weight = Some(MSG_WEIGHT);
        }
    }

    if !reading.temperature.is_empty() {
        match reading.temperature.parse::<f64>() {
            Ok(t) if (92.0..=110.0).contains(&t) => {}
            _ => errors.temperature = Some(MSG_TEMPERATURE),
        }
    }

    if !reading.hr.is_empty() {
        match reading.hr.parse::<i64>() {
            Ok(hr) if (50..=250).contains(&hr) => {}
            _ => errors.hr = Some(MSG_HR),
        }
    }

    if !reading.bp.is_empty() {
        errors.bp = validate_bp(&reading.bp);
    }

    if !reading.rr.is_empty() {
        match reading.rr.parse::<i64>() {
            Ok(rr) if (0..=80).contains(&rr) => {}
            _ => errors.rr = Some(MSG_RR),
        }
    }

    errors
}

fn validate_bp(bp: &str) -> Option<&'static str> {
    if !BP_RE.is_match(bp) {
        return Some(MSG_BP_FORMAT);
    }
    // The regex guarantees two numeric halves.
    let (systolic, diastolic) = bp.split_once('/')?;
    let systolic: i64 = systolic.parse().ok()?;
    let diastolic: i64 = diastolic.parse().ok()?;
    if !(70..=220).contains(&systolic) {
        Some(MSG_SYSTOLIC)
    } else if !(40..=130).contains(&diastolic) {
        Some(MSG_DIASTOLIC)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(weight: &str, temperature: &str, bp: &str, hr: &str, rr: &str) -> VitalsReading {
        VitalsReading {
            weight: weight.into(),
            temperature: temperature.into(),
            bp: bp.into(),
            hr: hr.into(),
            rr: rr.into(),
            extra: vec![],
        }
    }

    #[test]
    fn all_empty_flags_every_field() {
        let errors = validate(&VitalsReading::default());
        assert!(!errors.is_valid());
        assert_eq!(errors.weight, Some(MSG_AT_LEAST_ONE));
        assert_eq!(errors.temperature, Some(MSG_AT_LEAST_ONE));
        assert_eq!(errors.bp, Some(MSG_AT_LEAST_ONE));
        assert_eq!(errors.hr, Some(MSG_AT_LEAST_ONE));
        assert_eq!(errors.rr, Some(MSG_AT_LEAST_ONE));
    }

    #[test]
    fn single_field_is_enough() {
        let errors = validate(&reading("", "103", "", "", ""));
        assert!(errors.is_valid());
    }

    #[test]
    fn weight_rules() {
        assert!(validate(&reading("70", "", "", "", "")).is_valid());
        assert_eq!(
            validate(&reading("0", "", "", "", "")).weight,
            Some(MSG_WEIGHT)
        );
        assert_eq!(
            validate(&reading("1234", "", "", "", "")).weight,
            Some(MSG_WEIGHT)
        );
        assert_eq!(
            validate(&reading("-5", "", "", "", "")).weight,
            Some(MSG_WEIGHT)
        );
        assert_eq!(
            validate(&reading("7kg", "", "", "", "")).weight,
            Some(MSG_WEIGHT)
        );
    }

    #[test]
    fn temperature_boundaries_inclusive() {
        assert!(validate(&reading("", "92", "", "", "")).is_valid());
        assert!(validate(&reading("", "110", "", "", "")).is_valid());
        assert_eq!(
            validate(&reading("", "91.9", "", "", "")).temperature,
            Some(MSG_TEMPERATURE)
        );
        assert_eq!(
            validate(&reading("", "110.1", "", "", "")).temperature,
            Some(MSG_TEMPERATURE)
        );
        assert_eq!(
            validate(&reading("", "warm", "", "", "")).temperature,
            Some(MSG_TEMPERATURE)
        );
    }

    #[test]
    fn heart_rate_range() {
        assert!(validate(&reading("", "", "", "50", "")).is_valid());
        assert!(validate(&reading("", "", "", "250", "")).is_valid());
        assert_eq!(validate(&reading("", "", "", "49", "")).hr, Some(MSG_HR));
        assert_eq!(validate(&reading("", "", "", "251", "")).hr, Some(MSG_HR));
    }

    #[test]
    fn bp_format_and_ranges() {
        assert!(validate(&reading("", "", "120/80", "", "")).is_valid());
        assert_eq!(
            validate(&reading("", "", "12080", "", "")).bp,
            Some(MSG_BP_FORMAT)
        );
        assert_eq!(
            validate(&reading("", "", "1/80", "", "")).bp,
            Some(MSG_BP_FORMAT)
        );
        assert_eq!(
            validate(&reading("", "", "250/80", "", "")).bp,
            Some(MSG_SYSTOLIC)
        );
        assert_eq!(
            validate(&reading("", "", "120/135", "", "")).bp,
            Some(MSG_DIASTOLIC)
        );
        // Systolic failure is reported before diastolic is looked at.
        assert_eq!(
            validate(&reading("", "", "69/135", "", "")).bp,
            Some(MSG_SYSTOLIC)
        );
    }

    #[test]
    fn respiratory_rate_range() {
        assert!(validate(&reading("", "", "", "", "0")).is_valid());
        assert!(validate(&reading("", "", "", "", "80")).is_valid());
        assert_eq!(validate(&reading("", "", "", "", "81")).rr, Some(MSG_RR));
        assert_eq!(validate(&reading("", "", "", "", "-1")).rr, Some(MSG_RR));
    }

    #[test]
    fn independent_fields_fail_independently() {
        let errors = validate(&reading("0", "98.6", "120/80", "300", ""));
        assert_eq!(errors.weight, Some(MSG_WEIGHT));
        assert!(errors.temperature.is_none());
        assert!(errors.bp.is_none());
        assert_eq!(errors.hr, Some(MSG_HR));
    }
}
