//! Weekly training volume tracking: per-muscle set counts, per-week history
//! and weekly goals, persisted to a device-local key-value store.

pub mod calendar;
pub mod config;
pub mod error;
pub mod goals;
pub mod intensity;
pub mod ledger;
pub mod models;
pub mod store;

pub use config::Config;
pub use error::{ConfigError, Error, Result, StoreError};
pub use goals::GoalTable;
pub use intensity::{shade_for, Shade};
pub use ledger::VolumeLedger;
pub use models::{Category, Muscle, MuscleValues, WeekRecord};
pub use store::{FileStore, KeyValueStore, MemoryStore};
