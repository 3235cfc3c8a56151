pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::RosterConfig;

pub use crate::core::driver::{ListDriver, ListHandle};
pub use crate::core::gesture::{apply_gesture, Gesture, GestureOutcome};
pub use crate::core::RankedList;
pub use crate::domain::model::{CatProfile, Change, Item, ItemId, Movement, Snapshot};
pub use crate::domain::ports::{ListObserver, RosterProvider};
pub use crate::utils::error::{RankError, Result};
