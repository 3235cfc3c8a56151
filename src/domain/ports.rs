use crate::domain::model::{CatProfile, Change, Item};
use crate::utils::error::RankError;

/// Core → adapter contract.
///
/// `on_change` runs synchronously after the triggering operation has fully
/// settled; `items` is the canonical order at that point. Observers are
/// called in registration order.
pub trait ListObserver: Send {
    fn on_change(&mut self, change: &Change, items: &[Item]);

    fn on_rejected(&mut self, _error: &RankError) {}
}

/// 提供初始名單的來源 (TOML 或內建名單)
pub trait RosterProvider {
    fn title(&self) -> &str;
    fn initial_cats(&self) -> Vec<CatProfile>;
    /// Cats added after startup, each with an optional explicit rank.
    fn late_entries(&self) -> Vec<(CatProfile, Option<u32>)>;
}
