//! Feature collection document (snapshot and export format).

use serde::Serialize;

use super::types::PointRecord;

/// A GeoJSON `FeatureCollection` of point records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<PointRecord>,
}

impl FeatureCollection {
    /// Wrap a list of records.
    pub fn new(features: Vec<PointRecord>) -> Self {
        Self { features }
    }

    /// Compact JSON text, used for persisted snapshots.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Pretty-printed JSON text, used for export files.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
