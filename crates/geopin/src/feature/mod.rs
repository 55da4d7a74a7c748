//! Point-of-interest data model and its GeoJSON representation.

mod collection;
mod types;

pub use collection::FeatureCollection;
pub use types::{Coordinates, LATITUDE_RANGE, LONGITUDE_RANGE, PointPatch, PointRecord};
