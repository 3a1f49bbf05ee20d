//! Doctor/service reference data.
//!
//! Read-only catalog owned by the backend; fetched once per form session
//! and cached in memory for the lifetime of that session only.

use serde::{Deserialize, Serialize};

/// A billable service a doctor offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: String,
    pub service_name: String,
    pub fee: f64,
    #[serde(default)]
    pub hospital_charges_in_percentage: f64,
}

/// A doctor with their service list, as returned by the doctors endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub services: Vec<Service>,
}

/// Session-scoped cache of the doctor→services catalog.
///
/// Populated once when a registration or edit form opens; discarded with
/// the form. Not a source of truth — stale entries are refreshed by the
/// next form session, never mutated locally.
#[derive(Debug, Default)]
pub struct CatalogCache {
    doctors: Vec<Doctor>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached catalog with a fresh fetch.
    pub fn fill(&mut self, doctors: Vec<Doctor>) {
        self.doctors = doctors;
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn doctor(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == doctor_id)
    }

    /// Services offered by the given doctor; empty when unknown.
    pub fn services_for(&self, doctor_id: &str) -> &[Service] {
        self.doctor(doctor_id).map_or(&[], |d| d.services.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doctor() -> Doctor {
        Doctor {
            id: "64a1f0c2e4b0a1b2c3d4e5f6".into(),
            full_name: "Dr. Ayesha Khan".into(),
            services: vec![Service {
                id: "64a1f0c2e4b0a1b2c3d4e5f7".into(),
                service_name: "Consultation".into(),
                fee: 1500.0,
                hospital_charges_in_percentage: 20.0,
            }],
        }
    }

    #[test]
    fn lookup_by_doctor_id() {
        let mut cache = CatalogCache::new();
        cache.fill(vec![sample_doctor()]);
        let services = cache.services_for("64a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].service_name, "Consultation");
    }

    #[test]
    fn unknown_doctor_has_no_services() {
        let cache = CatalogCache::new();
        assert!(cache.services_for("missing").is_empty());
        assert!(cache.is_empty());
    }
}
