//! Core type definitions for point-of-interest records.

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::validation::read_feature;

/// Longitude bounds in degrees.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Latitude bounds in degrees.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// A WGS84 position, stored in GeoJSON order (longitude first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    /// Create a coordinate pair. Range is not checked here.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Returns true if both values are finite and inside the WGS84 bounds.
    pub fn in_range(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&self.longitude)
            && (LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&self.latitude)
    }

    fn to_value(self) -> Value {
        Value::Array(vec![Value::from(self.longitude), Value::from(self.latitude)])
    }
}

/// A single point of interest, serialized as a GeoJSON `Feature`.
///
/// Members the core does not interpret are carried verbatim so that
/// accepted input survives an export/import cycle unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    /// Identity key. Always `Some` for records held by a
    /// [`Store`](crate::Store); may be `None` straight out of the validator.
    pub id: Option<String>,

    /// Point position.
    pub coordinates: Coordinates,

    /// Display name (non-blank).
    pub name: String,

    /// Category (non-blank, open vocabulary).
    pub category: String,

    /// Extra entries of the `properties` object, excluding name and category.
    pub properties: IndexMap<String, Value>,

    /// Extra members of the `geometry` object, excluding type and coordinates.
    pub geometry_members: IndexMap<String, Value>,

    /// Extra top-level members of the feature.
    pub foreign_members: IndexMap<String, Value>,
}

impl PointRecord {
    /// Create a record with no id and no extra attributes.
    pub fn new(coordinates: Coordinates, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: None,
            coordinates,
            name: name.into(),
            category: category.into(),
            properties: IndexMap::new(),
            geometry_members: IndexMap::new(),
            foreign_members: IndexMap::new(),
        }
    }

    /// Set the identity key.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add an extra property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The identity key, if assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Render this record as a GeoJSON feature object.
    pub fn to_value(&self) -> Value {
        let mut geometry = Map::new();
        geometry.insert("type".into(), Value::from("Point"));
        geometry.insert("coordinates".into(), self.coordinates.to_value());
        for (key, value) in &self.geometry_members {
            geometry.insert(key.clone(), value.clone());
        }

        let mut properties = Map::new();
        properties.insert("name".into(), Value::from(self.name.as_str()));
        properties.insert("category".into(), Value::from(self.category.as_str()));
        for (key, value) in &self.properties {
            properties.insert(key.clone(), value.clone());
        }

        let mut feature = Map::new();
        feature.insert("type".into(), Value::from("Feature"));
        if let Some(id) = &self.id {
            feature.insert("id".into(), Value::from(id.as_str()));
        }
        feature.insert("geometry".into(), Value::Object(geometry));
        feature.insert("properties".into(), Value::Object(properties));
        for (key, value) in &self.foreign_members {
            feature.insert(key.clone(), value.clone());
        }

        Value::Object(feature)
    }
}

impl Serialize for PointRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PointRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        read_feature(&value).map_err(|reasons| {
            let codes: Vec<&str> = reasons.iter().map(|r| r.code()).collect();
            de::Error::custom(format!("invalid point feature ({})", codes.join(", ")))
        })
    }
}

/// Partial update for an existing record.
///
/// Supplied fields overwrite the record's fields; `None` fields are kept.
/// The id cannot be patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointPatch {
    pub coordinates: Option<Coordinates>,
    pub name: Option<String>,
    pub category: Option<String>,
    /// Replaces the extra-properties map wholesale when present.
    pub properties: Option<IndexMap<String, Value>>,
}

impl PointPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the point.
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Rename the point.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Recategorize the point.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Replace the extra properties.
    pub fn with_properties(mut self, properties: IndexMap<String, Value>) -> Self {
        self.properties = Some(properties);
        self
    }

    /// True if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_none()
            && self.name.is_none()
            && self.category.is_none()
            && self.properties.is_none()
    }

    /// Shallow-merge this patch over `record`, returning the merged copy.
    pub fn apply_to(&self, record: &PointRecord) -> PointRecord {
        let mut merged = record.clone();
        if let Some(coordinates) = self.coordinates {
            merged.coordinates = coordinates;
        }
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(category) = &self.category {
            merged.category = category.clone();
        }
        if let Some(properties) = &self.properties {
            merged.properties = properties.clone();
        }
        merged
    }
}
