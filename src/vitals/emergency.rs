//! Emergency classification of a vitals reading.
//!
//! Threshold checks over temperature, respiratory rate, and heart rate.
//! The rules are not mutually exclusive — every matching phrase is
//! appended in the fixed order below. The verdict is derived data and is
//! always recomputed from the latest reading, never read back from the
//! stored record.

use super::reading::VitalsReading;

/// Derived emergency flag plus the human-readable reason string.
///
/// Each triggered phrase carries a trailing space, so the concatenated
/// message reads naturally and matches what the backend stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmergencyVerdict {
    pub is_emergency: bool,
    pub message: String,
}

pub const HIGH_TEMPERATURE: &str = "High temperature detected. ";
pub const LOW_TEMPERATURE: &str = "Low temperature detected. ";
pub const HIGH_RESPIRATORY: &str = "High respiratory rate detected. ";
pub const LOW_RESPIRATORY: &str = "Low respiratory rate detected. ";
pub const HIGH_HEART_RATE: &str = "High heart rate detected. ";
pub const LOW_HEART_RATE: &str = "Low heart rate detected. ";

/// Classify a reading. Fields that are absent or unparseable are skipped —
/// a missing measurement never triggers a condition (format problems are
/// the validator's concern, not the classifier's).
pub fn classify(reading: &VitalsReading) -> EmergencyVerdict {
    let temperature = parse_opt::<f64>(&reading.temperature);
    let rr = parse_opt::<i64>(&reading.rr);
    let hr = parse_opt::<i64>(&reading.hr);

    let mut message = String::new();

    if temperature.is_some_and(|t| t > 100.0) {
        message.push_str(HIGH_TEMPERATURE);
    }
    if temperature.is_some_and(|t| t < 92.0) {
        message.push_str(LOW_TEMPERATURE);
    }
    if rr.is_some_and(|v| v > 20) {
        message.push_str(HIGH_RESPIRATORY);
    }
    if rr.is_some_and(|v| v < 12) {
        message.push_str(LOW_RESPIRATORY);
    }
    if hr.is_some_and(|v| v > 180) {
        message.push_str(HIGH_HEART_RATE);
    }
    if hr.is_some_and(|v| v < 30) {
        message.push_str(LOW_HEART_RATE);
    }

    EmergencyVerdict {
        is_emergency: !message.is_empty(),
        message,
    }
}

fn parse_opt<T: std::str::FromStr>(raw: &str) -> Option<T> {
    if raw.is_empty() {
        return None;
    }
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: &str, hr: &str, rr: &str) -> VitalsReading {
        VitalsReading {
            temperature: temperature.into(),
            hr: hr.into(),
            rr: rr.into(),
            ..Default::default()
        }
    }

    #[test]
    fn high_temperature_alone() {
        let verdict = classify(&reading("103", "", ""));
        assert!(verdict.is_emergency);
        assert_eq!(verdict.message, "High temperature detected. ");
    }

    #[test]
    fn boundary_values_are_not_emergencies() {
        // 100 / 92 and 20 / 12 and 180 / 30 are all inside the safe band.
        assert!(!classify(&reading("100", "", "")).is_emergency);
        assert!(!classify(&reading("92", "", "")).is_emergency);
        assert!(!classify(&reading("", "180", "")).is_emergency);
        assert!(!classify(&reading("", "30", "")).is_emergency);
        assert!(!classify(&reading("", "", "20")).is_emergency);
        assert!(!classify(&reading("", "", "12")).is_emergency);
    }

    #[test]
    fn multiple_conditions_accumulate_in_order() {
        let verdict = classify(&reading("101", "200", ""));
        assert!(verdict.is_emergency);
        let high_temp = verdict.message.find("High temperature detected.").unwrap();
        let high_hr = verdict.message.find("High heart rate detected.").unwrap();
        assert!(high_temp < high_hr);
    }

    #[test]
    fn normal_reading_is_not_an_emergency() {
        let verdict = classify(&reading("98", "190", "15"));
        // HR 190 exceeds 180 — this one IS an emergency with a single phrase.
        assert!(verdict.is_emergency);
        assert_eq!(verdict.message, "High heart rate detected. ");

        let verdict = classify(&reading("98", "80", "15"));
        assert!(!verdict.is_emergency);
        assert!(verdict.message.is_empty());
    }

    #[test]
    fn absent_fields_never_trigger() {
        let verdict = classify(&VitalsReading::default());
        assert!(!verdict.is_emergency);
        assert!(verdict.message.is_empty());
    }

    #[test]
    fn unparseable_fields_are_skipped() {
        let verdict = classify(&reading("hot", "fast", "??"));
        assert!(!verdict.is_emergency);
    }

    #[test]
    fn low_extremes_trigger_low_phrases() {
        let verdict = classify(&reading("91", "25", "10"));
        assert_eq!(
            verdict.message,
            "Low temperature detected. Low respiratory rate detected. Low heart rate detected. "
        );
    }
}
