use crate::core::{CatProfile, Change, Item, ItemId, ListObserver, Movement, Snapshot};
use crate::utils::error::{RankError, Result};
use std::collections::HashSet;
use std::fmt;

/// An ordered collection whose ranks always form the dense range `1..=N`.
///
/// Items are stored sorted by rank, so the item at index `i` holds rank
/// `i + 1`. Every public mutation validates first and mutates second; a
/// rejected call leaves the list untouched.
pub struct RankedList {
    items: Vec<Item>,
    observers: Vec<Box<dyn ListObserver>>,
    last_id: u64,
}

impl RankedList {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            observers: Vec::new(),
            last_id: 0,
        }
    }

    /// 初始名單：依照給定順序指派 1..N 的排名
    pub fn from_items(items: Vec<Item>) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id) {
                return Err(RankError::DuplicateItemError { item: item.id });
            }
        }

        let mut list = Self::new();
        for (index, mut item) in items.into_iter().enumerate() {
            item.rank = Some(index as u32 + 1);
            list.last_id = list.last_id.max(item.id.0);
            list.items.push(item);
        }

        tracing::info!("Ranked list bootstrapped with {} items", list.items.len());
        Ok(list)
    }

    /// Mints ids `1..=N` for the given profiles.
    pub fn from_profiles(profiles: impl IntoIterator<Item = CatProfile>) -> Self {
        let mut list = Self::new();
        for (index, profile) in profiles.into_iter().enumerate() {
            let id = ItemId(index as u64 + 1);
            list.items.push(Item::new(id, profile).with_rank(index as u32 + 1));
            list.last_id = id.0;
        }
        tracing::info!("Ranked list bootstrapped with {} items", list.items.len());
        list
    }

    pub fn subscribe(&mut self, observer: Box<dyn ListObserver>) {
        self.observers.push(observer);
    }

    pub fn with_observer(mut self, observer: impl ListObserver + 'static) -> Self {
        self.subscribe(Box::new(observer));
        self
    }

    /// Id that has never been used by this list.
    pub fn next_id(&self) -> ItemId {
        ItemId(self.last_id + 1)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Members in canonical (ascending rank) order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn at_rank(&self, rank: u32) -> Option<&Item> {
        let index = (rank as usize).checked_sub(1)?;
        self.items.get(index).filter(|item| item.rank == Some(rank))
    }

    /// Current rank of a member. Unknown ids are reported to observers
    /// like any other rejected operation.
    pub fn require_rank(&mut self, id: ItemId) -> Result<u32> {
        let position = self.locate(id)?;
        self.member_rank(position)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            items: self.items.clone(),
        }
    }

    /// Adds an item at the bottom, assigning it rank `N + 1`.
    pub fn append(&mut self, mut item: Item) -> Result<u32> {
        self.check_new_member(item.id)?;

        let rank = self.next_rank();
        item.rank = Some(rank);
        self.admit(item);
        Ok(rank)
    }

    /// Adds an item that already carries its rank. The rank must be `N + 1`.
    pub fn insert(&mut self, item: Item) -> Result<u32> {
        self.check_new_member(item.id)?;

        let expected = self.next_rank();
        let rank = match item.rank {
            None => return Err(self.reject(RankError::MissingRankError { item: item.id })),
            Some(rank) if rank == 0 || rank != expected => {
                return Err(self.reject(RankError::InvalidRankError {
                    item: item.id,
                    rank,
                    expected,
                }))
            }
            Some(rank) => rank,
        };

        self.admit(item);
        Ok(rank)
    }

    /// Moves an item one position toward rank 1.
    pub fn promote(&mut self, id: ItemId) -> Result<Movement> {
        let position = self.locate(id)?;
        let rank = self.member_rank(position)?;

        if rank == 1 {
            tracing::debug!("{} is already at the top", id);
            return Ok(Movement::AtTop);
        }

        let neighbor = self.slot_for(rank - 1)?;
        self.swap_ranks(position, neighbor, rank, rank - 1);
        tracing::debug!("rank up: {} {} -> {}", id, rank, rank - 1);
        Ok(Movement::Moved {
            from: rank,
            to: rank - 1,
        })
    }

    /// Moves an item one position toward rank N.
    pub fn demote(&mut self, id: ItemId) -> Result<Movement> {
        let position = self.locate(id)?;
        let rank = self.member_rank(position)?;

        // 最後一名沒有可交換的鄰居
        if rank as usize == self.items.len() {
            tracing::debug!("{} is already at the bottom", id);
            return Ok(Movement::AtBottom);
        }

        let neighbor = self.slot_for(rank + 1)?;
        self.swap_ranks(position, neighbor, rank, rank + 1);
        tracing::debug!("rank down: {} {} -> {}", id, rank, rank + 1);
        Ok(Movement::Moved {
            from: rank,
            to: rank + 1,
        })
    }

    /// Drops an item and closes the gap it leaves. The returned item is
    /// detached (`rank == None`).
    pub fn remove(&mut self, id: ItemId) -> Result<Item> {
        let position = self.locate(id)?;
        let removed_rank = self.member_rank(position)?;

        let mut removed = self.items.remove(position);
        removed.rank = None;

        let mut compacted = 0;
        for item in self.items.iter_mut() {
            if let Some(rank) = item.rank {
                if rank > removed_rank {
                    item.rank = Some(rank - 1);
                    compacted += 1;
                }
            }
        }
        self.resort();

        tracing::debug!(
            "disqualified {} at rank {}, {} items moved up",
            id,
            removed_rank,
            compacted
        );
        self.notify(Change::Removed {
            item: id,
            rank: removed_rank,
            compacted,
        });
        Ok(removed)
    }

    /// Votes are informational and never reorder the list.
    pub fn add_vote(&mut self, id: ItemId) -> Result<u32> {
        let position = self.locate(id)?;
        let item = &mut self.items[position];
        item.votes = item.votes.saturating_add(1);
        let votes = item.votes;

        self.notify(Change::Voted { item: id, votes });
        Ok(votes)
    }

    /// Re-checks the dense rank invariant.
    pub fn verify(&self) -> Result<()> {
        for (index, item) in self.items.iter().enumerate() {
            let expected = index as u32 + 1;
            if item.rank != Some(expected) {
                return Err(RankError::InvariantViolationError {
                    message: format!(
                        "item {} at position {} has rank {:?}, expected {}",
                        item.id, index, item.rank, expected
                    ),
                });
            }
        }
        Ok(())
    }

    /// Like `verify`, but a violation is also reported to observers.
    pub fn ensure_consistent(&mut self) -> Result<()> {
        match self.verify() {
            Ok(()) => Ok(()),
            Err(error) => Err(self.reject(error)),
        }
    }

    #[cfg(test)]
    pub(crate) fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }

    fn next_rank(&self) -> u32 {
        self.items.len() as u32 + 1
    }

    fn check_new_member(&mut self, id: ItemId) -> Result<()> {
        if self.position_of(id).is_some() {
            return Err(self.reject(RankError::DuplicateItemError { item: id }));
        }
        Ok(())
    }

    fn admit(&mut self, item: Item) {
        let id = item.id;
        let rank = item.rank_or_zero();
        self.last_id = self.last_id.max(id.0);
        self.items.push(item);
        tracing::debug!("{} joined at rank {}", id, rank);
        self.notify(Change::Inserted { item: id, rank });
    }

    fn locate(&mut self, id: ItemId) -> Result<usize> {
        match self.position_of(id) {
            Some(position) => Ok(position),
            None => Err(self.reject(RankError::UnknownItemError { item: id })),
        }
    }

    fn member_rank(&mut self, position: usize) -> Result<u32> {
        let item = &self.items[position];
        match item.rank {
            Some(rank) if rank as usize == position + 1 => Ok(rank),
            other => {
                let message = format!(
                    "item {} at position {} has rank {:?}",
                    item.id, position, other
                );
                Err(self.reject(RankError::InvariantViolationError { message }))
            }
        }
    }

    /// Index of the member holding `rank`.
    fn slot_for(&mut self, rank: u32) -> Result<usize> {
        let index = rank as usize - 1;
        match self.items.get(index) {
            Some(item) if item.rank == Some(rank) => Ok(index),
            _ => {
                let message = format!("no member holds rank {}", rank);
                Err(self.reject(RankError::InvariantViolationError { message }))
            }
        }
    }

    fn swap_ranks(&mut self, position: usize, neighbor: usize, from: u32, to: u32) {
        self.items[position].rank = Some(to);
        self.items[neighbor].rank = Some(from);
        let item = self.items[position].id;
        let neighbor = self.items[neighbor].id;
        self.resort();
        self.notify(Change::Swapped {
            item,
            neighbor,
            from,
            to,
        });
    }

    fn resort(&mut self) {
        // sort_by_key is stable
        self.items.sort_by_key(Item::rank_or_zero);
    }

    fn notify(&mut self, change: Change) {
        let items = &self.items;
        for observer in self.observers.iter_mut() {
            observer.on_change(&change, items);
        }
    }

    fn reject(&mut self, error: RankError) -> RankError {
        tracing::warn!("❌ Rejected ranking operation: {}", error);
        for observer in self.observers.iter_mut() {
            observer.on_rejected(&error);
        }
        error
    }
}

impl Default for RankedList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RankedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankedList")
            .field("items", &self.items)
            .field("observers", &self.observers.len())
            .finish()
    }
}
