use serde::{Deserialize, Serialize};
use std::fmt;

/// 項目的穩定識別碼，在整個生命週期內不變
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display payload. The ranking core never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatProfile {
    pub name: String,
    pub image_path: String,
}

impl CatProfile {
    pub fn new(name: impl Into<String>, image_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_path: image_path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub profile: CatProfile,
    pub votes: u32,
    /// `None` until the item joins a list.
    pub rank: Option<u32>,
}

impl Item {
    pub fn new(id: ItemId, profile: CatProfile) -> Self {
        Self {
            id,
            profile,
            votes: 0,
            rank: None,
        }
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Members always carry a rank; 0 only shows up for detached items.
    pub fn rank_or_zero(&self) -> u32 {
        self.rank.unwrap_or(0)
    }
}

/// 排序後的完整快照，供畫面重新渲染
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub items: Vec<Item>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn at_rank(&self, rank: u32) -> Option<&Item> {
        self.items.iter().find(|item| item.rank == Some(rank))
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(Item::name).collect()
    }
}

/// What kind of mutation triggered a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Inserted { item: ItemId, rank: u32 },
    Swapped { item: ItemId, neighbor: ItemId, from: u32, to: u32 },
    Removed { item: ItemId, rank: u32, compacted: usize },
    Voted { item: ItemId, votes: u32 },
}

/// Result of a promote or demote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Moved { from: u32, to: u32 },
    AtTop,
    AtBottom,
}

impl Movement {
    pub fn is_boundary(&self) -> bool {
        matches!(self, Movement::AtTop | Movement::AtBottom)
    }
}
