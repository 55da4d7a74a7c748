//! geopin: validated, persistent point-of-interest collections.
//!
//! geopin keeps a small collection of named, categorized points and moves it
//! in and out of GeoJSON. Untrusted input is checked feature by feature: the
//! good features are kept, the bad ones are counted by reason and reported.
//!
//! # Core Principles
//!
//! - **Accept the good, explain the bad**: only a malformed top-level
//!   document fails an import; individual features are filtered and tallied
//! - **One owner**: a [`Store`] holds the authoritative collection and tells
//!   every subscriber when it changes
//! - **Self-healing storage**: a corrupt snapshot is discarded on startup
//!   instead of surfacing an error
//!
//! # Example
//!
//! ```
//! use geopin::{MemoryPersistence, Store, StoreConfig};
//!
//! let mut store = Store::open(MemoryPersistence::new(), StoreConfig::default());
//! let outcome = store.import_text(r#"{
//!     "type": "FeatureCollection",
//!     "features": [
//!         {"type": "Feature",
//!          "geometry": {"type": "Point", "coordinates": [-70.6, -33.4]},
//!          "properties": {"name": "Plaza", "category": "landmark"}},
//!         {"type": "Feature",
//!          "geometry": {"type": "Point", "coordinates": [200, -33.4]},
//!          "properties": {"name": "", "category": "park"}}
//!     ]
//! }"#);
//!
//! assert!(outcome.ok);
//! assert_eq!(
//!     outcome.report,
//!     "Imported 1 / Discarded 1 (1 with invalid coordinates, 1 without name)"
//! );
//! assert_eq!(store.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod feature;
pub mod persistence;
pub mod store;
pub mod validation;

pub use config::StoreConfig;
pub use error::{GeopinError, Result};
pub use feature::{Coordinates, FeatureCollection, PointPatch, PointRecord};
pub use persistence::{DEFAULT_STORAGE_KEY, FilePersistence, MemoryPersistence, Persistence};
pub use store::{ImportOutcome, SharedStore, Store, SubscriberError, Subscription};
pub use validation::{
    CollectionValidation, RejectionReason, RejectionTally, TallyCategory, ValidationResult,
    describe, validate_collection, validate_feature, validate_record,
};
