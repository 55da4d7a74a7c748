//! Validators for candidate features and feature collections.
//!
//! Every check runs independently, so one candidate can collect several
//! reasons. Only a malformed top-level document is a hard failure.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{GeopinError, Result};
use crate::feature::{Coordinates, PointRecord};

use super::reason::{RejectionReason, RejectionTally, ValidationResult};

const FEATURE_MEMBERS: [&str; 4] = ["type", "id", "geometry", "properties"];
const GEOMETRY_MEMBERS: [&str; 2] = ["type", "coordinates"];
const PROPERTY_MEMBERS: [&str; 2] = ["name", "category"];

/// Result of filtering a feature collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionValidation {
    /// Accepted records, in input order.
    pub accepted: Vec<PointRecord>,
    /// Why the other candidates were dropped.
    pub tally: RejectionTally,
}

/// Check one candidate feature.
pub fn validate_feature(candidate: &Value) -> ValidationResult {
    let (reasons, _) = inspect_feature(candidate);
    ValidationResult::from_reasons(reasons)
}

/// Check a typed record against the same rules as imported candidates.
pub fn validate_record(record: &PointRecord) -> ValidationResult {
    validate_feature(&record.to_value())
}

/// Check a candidate and, if it passes, convert it into a record.
pub(crate) fn read_feature(candidate: &Value) -> std::result::Result<PointRecord, Vec<RejectionReason>> {
    match inspect_feature(candidate) {
        (reasons, Some(record)) if reasons.is_empty() => Ok(record),
        (reasons, _) => Err(reasons),
    }
}

/// Filter a feature collection into accepted records and a rejection tally.
///
/// # Errors
///
/// Returns [`GeopinError::Schema`] if the document is not a
/// `FeatureCollection` or its `features` member is not an array. No partial
/// result is produced in that case.
pub fn validate_collection(document: &Value) -> Result<CollectionValidation> {
    if document.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        return Err(GeopinError::Schema(
            "Invalid GeoJSON: Must be a FeatureCollection".to_string(),
        ));
    }

    let Some(features) = document.get("features").and_then(Value::as_array) else {
        return Err(GeopinError::Schema(
            "Invalid GeoJSON: Features must be an array".to_string(),
        ));
    };

    let mut accepted = Vec::new();
    let mut tally = RejectionTally::new();

    for candidate in features {
        match read_feature(candidate) {
            Ok(record) => accepted.push(record),
            Err(reasons) => tally.record(&reasons),
        }
    }

    Ok(CollectionValidation { accepted, tally })
}

/// Run every check, returning the reasons and the record when all pass.
fn inspect_feature(candidate: &Value) -> (Vec<RejectionReason>, Option<PointRecord>) {
    let mut reasons = Vec::new();

    if candidate.get("type").and_then(Value::as_str) != Some("Feature") {
        reasons.push(RejectionReason::FeatureType);
    }

    let coordinates = match candidate.get("geometry") {
        Some(geometry) if !geometry.is_null() => {
            if geometry.get("type").and_then(Value::as_str) != Some("Point") {
                reasons.push(RejectionReason::Geometry);
            }
            inspect_coordinates(geometry.get("coordinates"), &mut reasons)
        }
        _ => {
            reasons.push(RejectionReason::Geometry);
            None
        }
    };

    let (name, category) = match candidate.get("properties") {
        Some(properties) if !properties.is_null() => {
            let name = non_blank(properties.get("name"));
            if name.is_none() {
                reasons.push(RejectionReason::Name);
            }
            let category = non_blank(properties.get("category"));
            if category.is_none() {
                reasons.push(RejectionReason::Category);
            }
            (name, category)
        }
        _ => {
            reasons.push(RejectionReason::Name);
            reasons.push(RejectionReason::Category);
            (None, None)
        }
    };

    let record = match (coordinates, name, category) {
        (Some(coordinates), Some(name), Some(category)) if reasons.is_empty() => {
            Some(build_record(candidate, coordinates, name, category))
        }
        _ => None,
    };

    (reasons, record)
}

fn inspect_coordinates(value: Option<&Value>, reasons: &mut Vec<RejectionReason>) -> Option<Coordinates> {
    let pair = match value.and_then(Value::as_array) {
        Some(items) if items.len() == 2 => (items[0].as_f64(), items[1].as_f64()),
        _ => {
            reasons.push(RejectionReason::Coordinates);
            return None;
        }
    };

    let (Some(longitude), Some(latitude)) = pair else {
        reasons.push(RejectionReason::Coordinates);
        return None;
    };

    let coordinates = Coordinates::new(longitude, latitude);
    if !coordinates.in_range() {
        reasons.push(RejectionReason::CoordinatesRange);
        return None;
    }

    Some(coordinates)
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn build_record(candidate: &Value, coordinates: Coordinates, name: &str, category: &str) -> PointRecord {
    let mut record = PointRecord::new(coordinates, name, category);
    record.id = candidate.get("id").and_then(read_id);
    record.foreign_members = extra_members(candidate.as_object(), &FEATURE_MEMBERS);
    record.geometry_members = extra_members(
        candidate.get("geometry").and_then(Value::as_object),
        &GEOMETRY_MEMBERS,
    );
    record.properties = extra_members(
        candidate.get("properties").and_then(Value::as_object),
        &PROPERTY_MEMBERS,
    );
    record
}

/// Strings and numbers are usable ids; empty strings and anything else are
/// treated as absent.
fn read_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn extra_members(object: Option<&Map<String, Value>>, known: &[&str]) -> IndexMap<String, Value> {
    object
        .map(|members| {
            members
                .iter()
                .filter(|(key, _)| !known.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}
