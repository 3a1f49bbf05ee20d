//! Vitals capture: draft reading, field validation, emergency
//! classification, and the submit flow that picks between initial
//! creation and revision of the persisted facet.

pub mod emergency;
pub mod reading;
pub mod submit;
pub mod validate;

pub use emergency::{classify, EmergencyVerdict};
pub use reading::VitalsReading;
pub use submit::{submit, submit_mode, SubmitError, SubmitMode, SubmitOutcome};
pub use validate::{validate, FieldErrors};
