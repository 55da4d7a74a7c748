//! Rejection reasons and the per-batch tally.

use serde::{Deserialize, Serialize};

/// Why a candidate feature failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// `type` is not "Feature".
    FeatureType,
    /// Geometry missing, or its `type` is not "Point".
    Geometry,
    /// Coordinates missing, not a pair, or not numeric.
    Coordinates,
    /// Coordinates numeric but outside WGS84 bounds.
    CoordinatesRange,
    /// Name missing, not a string, or blank.
    Name,
    /// Category missing, not a string, or blank.
    Category,
}

impl RejectionReason {
    /// Short stable code for the reason.
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::FeatureType => "type",
            RejectionReason::Geometry => "geometry/point",
            RejectionReason::Coordinates => "coordinates",
            RejectionReason::CoordinatesRange => "coordinates/range",
            RejectionReason::Name => "name",
            RejectionReason::Category => "category",
        }
    }

    /// Human-readable description.
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::FeatureType => "Feature type must be \"Feature\"",
            RejectionReason::Geometry => "Geometry must be present with type \"Point\"",
            RejectionReason::Coordinates => "Coordinates must be a pair of numbers",
            RejectionReason::CoordinatesRange => "Coordinates out of valid range",
            RejectionReason::Name => "Missing or invalid name property",
            RejectionReason::Category => "Missing or invalid category property",
        }
    }

    /// Tally bucket this reason is counted under.
    pub fn category(&self) -> TallyCategory {
        match self {
            RejectionReason::Coordinates | RejectionReason::CoordinatesRange => {
                TallyCategory::InvalidCoordinates
            }
            RejectionReason::Name => TallyCategory::MissingName,
            RejectionReason::Category => TallyCategory::MissingCategory,
            RejectionReason::Geometry => TallyCategory::InvalidGeometry,
            RejectionReason::FeatureType => TallyCategory::InvalidType,
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Tally buckets, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TallyCategory {
    InvalidCoordinates,
    MissingName,
    MissingCategory,
    InvalidGeometry,
    InvalidType,
}

impl TallyCategory {
    /// Every bucket, in the order reports list them.
    pub const ALL: [TallyCategory; 5] = [
        TallyCategory::InvalidCoordinates,
        TallyCategory::MissingName,
        TallyCategory::MissingCategory,
        TallyCategory::InvalidGeometry,
        TallyCategory::InvalidType,
    ];

    /// Phrase used after the count in import reports.
    pub fn label(&self) -> &'static str {
        match self {
            TallyCategory::InvalidCoordinates => "with invalid coordinates",
            TallyCategory::MissingName => "without name",
            TallyCategory::MissingCategory => "without category",
            TallyCategory::InvalidGeometry => "with invalid geometry",
            TallyCategory::InvalidType => "with invalid type",
        }
    }
}

/// Outcome of checking one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<RejectionReason>,
}

impl ValidationResult {
    /// Build a result; valid iff no reasons were collected.
    pub fn from_reasons(errors: Vec<RejectionReason>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Counts of rejected candidates by reason.
///
/// One rejected candidate bumps `rejected` once and every bucket matching
/// one of its reasons once, so the bucket sum can exceed `rejected`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionTally {
    /// Number of rejected candidates.
    pub rejected: usize,
    pub invalid_coordinates: usize,
    pub missing_name: usize,
    pub missing_category: usize,
    pub invalid_geometry: usize,
    pub invalid_type: usize,
}

impl RejectionTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one rejected candidate with the given reasons.
    pub fn record(&mut self, reasons: &[RejectionReason]) {
        self.rejected += 1;
        for reason in reasons {
            *self.bucket_mut(reason.category()) += 1;
        }
    }

    /// Count for a bucket.
    pub fn count(&self, category: TallyCategory) -> usize {
        match category {
            TallyCategory::InvalidCoordinates => self.invalid_coordinates,
            TallyCategory::MissingName => self.missing_name,
            TallyCategory::MissingCategory => self.missing_category,
            TallyCategory::InvalidGeometry => self.invalid_geometry,
            TallyCategory::InvalidType => self.invalid_type,
        }
    }

    /// Sum over all buckets.
    pub fn total_reasons(&self) -> usize {
        TallyCategory::ALL.iter().map(|c| self.count(*c)).sum()
    }

    /// True if nothing was rejected.
    pub fn is_empty(&self) -> bool {
        self.rejected == 0
    }

    fn bucket_mut(&mut self, category: TallyCategory) -> &mut usize {
        match category {
            TallyCategory::InvalidCoordinates => &mut self.invalid_coordinates,
            TallyCategory::MissingName => &mut self.missing_name,
            TallyCategory::MissingCategory => &mut self.missing_category,
            TallyCategory::InvalidGeometry => &mut self.invalid_geometry,
            TallyCategory::InvalidType => &mut self.invalid_type,
        }
    }
}
