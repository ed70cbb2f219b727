//! Core of bcscal: the catalog model and the reconciliation that turns it
//! into calendar inserts and deletes.
//!
//! - `catalog`: categories and items as loaded from YAML
//! - `event_id`: namespaced identifiers for events bcscal creates
//! - `time_window`: start/end instants for an item
//! - `conflict`: overlap test against existing events
//! - `reconcile`: per-category sync and prune passes
//! - `calendar`: the remote calendar seam

pub mod calendar;
pub mod catalog;
pub mod conflict;
pub mod error;
pub mod event;
pub mod event_id;
pub mod reconcile;
pub mod time_window;

pub use calendar::{CalendarMetadata, CalendarService, DryRunCalendar};
pub use catalog::{Catalog, Category, Item, ItemSpec};
pub use conflict::conflicts;
pub use error::{BcsError, BcsResult};
pub use event::{EventTime, NewEvent, RemoteEvent};
pub use event_id::{EventId, NAMESPACE};
pub use reconcile::{ReconcileOptions, ReconcileReport, Reconciler};
pub use time_window::{DEFAULT_TIMEZONE, TimeWindow, parse_timezone};
