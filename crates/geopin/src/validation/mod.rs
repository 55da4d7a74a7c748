//! Validation of untrusted GeoJSON input.

mod reason;
mod summary;
mod validators;

pub use reason::{RejectionReason, RejectionTally, TallyCategory, ValidationResult};
pub use summary::describe;
pub use validators::{CollectionValidation, validate_collection, validate_feature, validate_record};

pub(crate) use validators::read_feature;
