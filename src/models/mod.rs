pub mod appointment;
pub mod catalog;
pub mod enums;
pub mod filters;

pub use appointment::{Appointment, AppointmentTime, ExtraVital, PatientRef, VitalsRecord, VitalsState};
pub use catalog::{CatalogCache, Doctor, Service};
pub use enums::{CheckFilter, CheckState, FeeStatus, InvalidEnum, SortOrder};
pub use filters::{AppointmentFilter, DeletedFilter, Page};
