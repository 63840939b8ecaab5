//! Application core: in-memory collections, pure derived views and the
//! [`tracker::Tracker`] controller that persists and mirrors them.

pub mod backup;
pub mod config;
pub mod form;
pub mod log;
pub mod records;
pub mod registry;
pub mod selection;
pub mod state;
pub mod summary;
pub mod tracker;

pub use state::{AppState, Collection};
pub use tracker::{PullResult, Tracker};
