pub mod driver;
pub mod gesture;
pub mod ranked_list;

pub use crate::domain::model::{CatProfile, Change, Item, ItemId, Movement, Snapshot};
pub use crate::domain::ports::{ListObserver, RosterProvider};
pub use crate::utils::error::Result;
pub use ranked_list::RankedList;
