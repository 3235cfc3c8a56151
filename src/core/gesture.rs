use crate::core::{Item, ItemId, Movement, RankedList};
use crate::utils::error::Result;

/// A user intent coming from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Up arrow: counts a vote, then promotes.
    RankUp(ItemId),
    /// Down arrow: counts a vote, then demotes.
    RankDown(ItemId),
    Disqualify(ItemId),
    Vote(ItemId),
}

impl Gesture {
    pub fn target(&self) -> ItemId {
        match *self {
            Gesture::RankUp(id)
            | Gesture::RankDown(id)
            | Gesture::Disqualify(id)
            | Gesture::Vote(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    Moved { votes: u32, movement: Movement },
    Disqualified { item: Item, rank: u32 },
    Voted { votes: u32 },
}

impl GestureOutcome {
    /// 是否改變了排名順序
    pub fn reordered(&self) -> bool {
        match self {
            GestureOutcome::Moved { movement, .. } => !movement.is_boundary(),
            GestureOutcome::Disqualified { .. } => true,
            GestureOutcome::Voted { .. } => false,
        }
    }
}

/// Translates a gesture into list operations.
///
/// The target is looked up, and for moves the ranks are checked, before
/// anything changes. A rejected gesture leaves both votes and ranks untouched.
pub fn apply_gesture(list: &mut RankedList, gesture: Gesture) -> Result<GestureOutcome> {
    let id = gesture.target();
    let rank = list.require_rank(id)?;

    match gesture {
        Gesture::RankUp(_) => {
            list.ensure_consistent()?;
            let votes = list.add_vote(id)?;
            let movement = list.promote(id)?;
            Ok(GestureOutcome::Moved { votes, movement })
        }
        Gesture::RankDown(_) => {
            list.ensure_consistent()?;
            let votes = list.add_vote(id)?;
            let movement = list.demote(id)?;
            Ok(GestureOutcome::Moved { votes, movement })
        }
        Gesture::Disqualify(_) => {
            let item = list.remove(id)?;
            Ok(GestureOutcome::Disqualified { item, rank })
        }
        Gesture::Vote(_) => {
            let votes = list.add_vote(id)?;
            Ok(GestureOutcome::Voted { votes })
        }
    }
}
