use angry_cats::{
    CatProfile, Change, Item, ItemId, ListObserver, Movement, RankError, RankedList,
};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Notifications(Arc<Mutex<Vec<Change>>>);

impl Notifications {
    fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl ListObserver for Notifications {
    fn on_change(&mut self, change: &Change, _items: &[Item]) {
        self.0.lock().unwrap().push(change.clone());
    }
}

fn list_of(names: &[&str]) -> (RankedList, Notifications) {
    let notifications = Notifications::default();
    let list = RankedList::from_profiles(
        names
            .iter()
            .map(|name| CatProfile::new(*name, format!("assets/images/{}.jpg", name))),
    )
    .with_observer(notifications.clone());
    (list, notifications)
}

fn rank_of(list: &RankedList, name: &str) -> u32 {
    list.items()
        .iter()
        .find(|item| item.name() == name)
        .and_then(|item| item.rank)
        .unwrap()
}

fn id_of(list: &RankedList, name: &str) -> ItemId {
    list.items()
        .iter()
        .find(|item| item.name() == name)
        .map(|item| item.id)
        .unwrap()
}

fn assert_dense(list: &RankedList) {
    let mut ranks: Vec<u32> = list.items().iter().map(|item| item.rank.unwrap()).collect();
    ranks.sort_unstable();
    let expected: Vec<u32> = (1..=list.len() as u32).collect();
    assert_eq!(ranks, expected);
    list.verify().unwrap();
}

/// 升級 B：A、B 交換位置，C 不變
#[test]
fn test_promote_second_item() -> Result<()> {
    let (mut list, notifications) = list_of(&["A", "B", "C"]);

    list.promote(id_of(&list, "B"))?;

    assert_eq!(rank_of(&list, "A"), 2);
    assert_eq!(rank_of(&list, "B"), 1);
    assert_eq!(rank_of(&list, "C"), 3);
    assert_eq!(notifications.count(), 1);
    Ok(())
}

#[test]
fn test_disqualify_compacts_following_ranks() -> Result<()> {
    let (mut list, notifications) = list_of(&["A", "B", "C", "D"]);

    let removed = list.remove(id_of(&list, "B"))?;

    assert_eq!(removed.name(), "B");
    assert_eq!(list.len(), 3);
    assert_eq!(rank_of(&list, "A"), 1);
    assert_eq!(rank_of(&list, "C"), 2);
    assert_eq!(rank_of(&list, "D"), 3);
    assert_eq!(notifications.count(), 1);
    assert_dense(&list);
    Ok(())
}

#[test]
fn test_demote_last_item_is_noop() -> Result<()> {
    let (mut list, notifications) = list_of(&["A", "B"]);
    let before = list.snapshot();

    let movement = list.demote(id_of(&list, "B"))?;

    assert_eq!(movement, Movement::AtBottom);
    assert_eq!(list.snapshot(), before);
    assert_eq!(notifications.count(), 0);
    Ok(())
}

#[test]
fn test_insert_with_wrong_rank_fails() {
    let (mut list, notifications) = list_of(&["A", "B", "C"]);
    let before = list.snapshot();

    let item = Item::new(list.next_id(), CatProfile::new("X", "x.jpg")).with_rank(2);
    let err = list.insert(item).unwrap_err();

    assert!(matches!(
        err,
        RankError::InvalidRankError {
            rank: 2,
            expected: 4,
            ..
        }
    ));
    assert_eq!(list.snapshot(), before);
    assert_eq!(notifications.count(), 0);
}

#[test]
fn test_append_after_startup_gets_next_rank() -> Result<()> {
    let (mut list, notifications) = list_of(&["Wet Cat", "Bitey Cat", "Surprised Cat"]);

    let cranky = Item::new(
        list.next_id(),
        CatProfile::new("Cranky Cat", "assets/images/cat4.jpg"),
    );
    let rank = list.append(cranky)?;

    assert_eq!(rank, 4);
    assert_eq!(rank_of(&list, "Cranky Cat"), 4);
    assert_eq!(notifications.count(), 1);
    assert_dense(&list);
    Ok(())
}

#[test]
fn test_promoting_top_twice_equals_once() -> Result<()> {
    let (mut list, _) = list_of(&["A", "B", "C"]);
    let a = id_of(&list, "A");

    list.promote(a)?;
    let once = list.snapshot();
    list.promote(a)?;

    assert_eq!(list.snapshot(), once);
    Ok(())
}

#[test]
fn test_promote_demote_round_trip_everywhere() -> Result<()> {
    let names = ["A", "B", "C", "D", "E"];
    for name in &names[1..] {
        let (mut list, _) = list_of(&names);
        let before = list.snapshot();
        let id = id_of(&list, name);

        list.promote(id)?;
        list.demote(id)?;

        assert_eq!(list.snapshot(), before, "round trip for {}", name);
    }
    Ok(())
}

#[test]
fn test_remove_preserves_relative_order() -> Result<()> {
    let names = ["A", "B", "C", "D", "E", "F"];
    for victim in names {
        let (mut list, _) = list_of(&names);
        list.promote(id_of(&list, "E"))?;
        list.demote(id_of(&list, "A"))?;

        let before: Vec<String> = list
            .items()
            .iter()
            .filter(|item| item.name() != victim)
            .map(|item| item.profile.name.clone())
            .collect();

        list.remove(id_of(&list, victim))?;

        let after: Vec<String> = list
            .items()
            .iter()
            .map(|item| item.profile.name.clone())
            .collect();
        assert_eq!(after, before, "removing {}", victim);
        assert_dense(&list);
    }
    Ok(())
}

/// 以固定種子的操作序列檢查排名永遠保持連續
#[test]
fn test_density_holds_across_long_operation_sequence() {
    let names: Vec<String> = (0..12).map(|i| format!("cat-{}", i)).collect();
    let mut list = RankedList::from_profiles(
        names
            .iter()
            .map(|name| CatProfile::new(name.clone(), format!("{}.jpg", name))),
    );

    let mut seed: u64 = 0x5eed_cafe;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) as usize
    };

    let mut votes: HashMap<ItemId, u32> = HashMap::new();
    for step in 0..2_000 {
        if list.is_empty() {
            break;
        }
        let target = list.items()[next() % list.len()].id;
        match next() % 20 {
            0 => {
                list.remove(target).unwrap();
                votes.remove(&target);
            }
            1 => {
                let id = list.next_id();
                let profile = CatProfile::new(format!("late-{}", step), "late.jpg");
                list.append(Item::new(id, profile)).unwrap();
            }
            2..=4 => {
                *votes.entry(target).or_default() += 1;
                list.add_vote(target).unwrap();
            }
            n if n % 2 == 0 => {
                list.promote(target).unwrap();
            }
            _ => {
                list.demote(target).unwrap();
            }
        }
        assert_dense(&list);
    }

    for item in list.items() {
        assert_eq!(item.votes, votes.get(&item.id).copied().unwrap_or(0));
    }
}
