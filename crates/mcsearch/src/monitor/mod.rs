//! Periodic refresh of many targets into a shared, grouped text cache.

pub mod store;
pub mod updater;

pub use store::StatusStore;
pub use updater::{RefreshReport, StatusUpdater, UpdaterHandle};
