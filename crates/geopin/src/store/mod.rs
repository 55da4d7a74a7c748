//! The authoritative point collection and its change notifications.
//!
//! # Usage
//!
//! ```
//! use geopin::{Coordinates, MemoryPersistence, PointPatch, Store, StoreConfig};
//!
//! let mut store = Store::open(MemoryPersistence::new(), StoreConfig::default());
//!
//! let subscription = store.subscribe(|records| {
//!     println!("{} points", records.len());
//!     Ok(())
//! });
//!
//! let plaza = store.add(Coordinates::new(-70.6, -33.4), "Plaza", "landmark").unwrap();
//! let id = plaza.id.unwrap();
//! store.update(&id, PointPatch::new().with_category("park")).unwrap();
//!
//! let outcome = store.import_text(r#"{"type":"FeatureCollection","features":[]}"#);
//! assert_eq!(outcome.report, "Successfully imported 0 points.");
//!
//! subscription.unsubscribe();
//! ```

mod ids;
mod observers;
mod shared;
mod state;

pub use observers::{SubscriberError, Subscription};
pub use shared::SharedStore;
pub use state::{ImportOutcome, Store};
