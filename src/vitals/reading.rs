use crate::models::ExtraVital;

/// A candidate set of measurements being entered or edited.
///
/// Form-local draft: raw strings exactly as typed, owned by the open
/// vitals editor and either merged into the appointment on save or
/// discarded on cancel. Empty strings mean "not entered".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VitalsReading {
    pub weight: String,
    pub temperature: String,
    pub bp: String,
    pub hr: String,
    pub rr: String,
    pub extra: Vec<ExtraVital>,
}

impl VitalsReading {
    /// True when no fixed field and no extra measurement is present.
    pub fn is_empty(&self) -> bool {
        self.weight.is_empty()
            && self.temperature.is_empty()
            && self.bp.is_empty()
            && self.hr.is_empty()
            && self.rr.is_empty()
            && self.extra.is_empty()
    }

    /// Pre-fill a draft from the persisted facet for editing.
    pub fn from_record(record: &crate::models::VitalsRecord) -> Self {
        Self {
            weight: record.weight.clone().unwrap_or_default(),
            temperature: record.temperature.clone().unwrap_or_default(),
            bp: record.bp.clone().unwrap_or_default(),
            hr: record.hr.clone().unwrap_or_default(),
            rr: record.rr.clone().unwrap_or_default(),
            extra: record.extra.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_by_default() {
        assert!(VitalsReading::default().is_empty());
    }

    #[test]
    fn extra_alone_counts_as_present() {
        let reading = VitalsReading {
            extra: vec![ExtraVital {
                title: "SpO2".into(),
                measurement: "97%".into(),
            }],
            ..Default::default()
        };
        assert!(!reading.is_empty());
    }
}
