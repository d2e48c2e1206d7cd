//! Core module containing the facility pipeline: records, filtering,
//! projections and the controller that keeps the views in sync

pub mod category;
pub mod controller;
pub mod error;
pub mod events;
pub mod facility;
pub mod filter;
pub mod geolocation;
pub mod projection;
pub mod proximity;
pub mod render;
pub mod store;

pub use category::{Category, CategoryStyle, CategoryStyles};
pub use controller::{ViewState, ViewSnapshot, ViewSyncController};
pub use error::{ConfigError, GeolocationError, StorageError};
pub use events::{ChangeListener, EventBus, EventEnvelope, StoreEvent};
pub use facility::{Coordinate, Facility};
pub use filter::{FilterState, SearchOptions, compute_filtered};
pub use geolocation::{GeolocationProvider, LocationStatus, StaticGeolocation};
pub use projection::{InfoPanel, ListItem, MarkerDescriptor, ResultsList, project_markers};
pub use proximity::ProximityReporter;
pub use render::{ListRenderTarget, MapRenderTarget, SubscriptionId};
pub use store::{FacilityStore, RecordSource};
