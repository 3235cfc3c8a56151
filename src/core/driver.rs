use crate::core::gesture::{apply_gesture, Gesture, GestureOutcome};
use crate::core::{CatProfile, Item, ItemId, Movement, RankedList, Snapshot};
use crate::utils::error::{RankError, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

const COMMAND_BUFFER: usize = 64;

enum Request {
    AddCat {
        profile: CatProfile,
        reply: oneshot::Sender<Result<Item>>,
    },
    Insert {
        item: Item,
        reply: oneshot::Sender<Result<u32>>,
    },
    Promote {
        id: ItemId,
        reply: oneshot::Sender<Result<Movement>>,
    },
    Demote {
        id: ItemId,
        reply: oneshot::Sender<Result<Movement>>,
    },
    Remove {
        id: ItemId,
        reply: oneshot::Sender<Result<Item>>,
    },
    Vote {
        id: ItemId,
        reply: oneshot::Sender<Result<u32>>,
    },
    Gesture {
        gesture: Gesture,
        reply: oneshot::Sender<Result<GestureOutcome>>,
    },
    Snapshot {
        reply: oneshot::Sender<Snapshot>,
    },
}

/// Owns one `RankedList` inside a task and applies requests one at a time.
pub struct ListDriver {
    list: RankedList,
    receiver: mpsc::Receiver<Request>,
}

impl ListDriver {
    /// Moves the list into a background task. The task ends, handing the
    /// list back, once every handle has been dropped.
    pub fn spawn(list: RankedList) -> (ListHandle, JoinHandle<RankedList>) {
        let (sender, receiver) = mpsc::channel(COMMAND_BUFFER);
        let driver = ListDriver { list, receiver };
        let task = tokio::spawn(driver.run());
        (ListHandle { sender }, task)
    }

    async fn run(mut self) -> RankedList {
        tracing::debug!("List driver started with {} items", self.list.len());

        while let Some(request) = self.receiver.recv().await {
            self.handle(request);
        }

        tracing::debug!("List driver stopped");
        self.list
    }

    fn handle(&mut self, request: Request) {
        // 回覆端可能已經放棄等待，忽略送出失敗
        match request {
            Request::AddCat { profile, reply } => {
                let item = Item::new(self.list.next_id(), profile);
                let mut admitted = item.clone();
                let result = self.list.append(item).map(|rank| {
                    admitted.rank = Some(rank);
                    admitted
                });
                let _ = reply.send(result);
            }
            Request::Insert { item, reply } => {
                let _ = reply.send(self.list.insert(item));
            }
            Request::Promote { id, reply } => {
                let _ = reply.send(self.list.promote(id));
            }
            Request::Demote { id, reply } => {
                let _ = reply.send(self.list.demote(id));
            }
            Request::Remove { id, reply } => {
                let _ = reply.send(self.list.remove(id));
            }
            Request::Vote { id, reply } => {
                let _ = reply.send(self.list.add_vote(id));
            }
            Request::Gesture { gesture, reply } => {
                let _ = reply.send(apply_gesture(&mut self.list, gesture));
            }
            Request::Snapshot { reply } => {
                let _ = reply.send(self.list.snapshot());
            }
        }
    }
}

/// Cloneable sender side of a list's command channel.
#[derive(Clone)]
pub struct ListHandle {
    sender: mpsc::Sender<Request>,
}

impl ListHandle {
    /// Appends a new cat, minting its id inside the driver.
    pub async fn add_cat(&self, profile: CatProfile) -> Result<Item> {
        self.call(|reply| Request::AddCat { profile, reply }).await?
    }

    pub async fn insert(&self, item: Item) -> Result<u32> {
        self.call(|reply| Request::Insert { item, reply }).await?
    }

    pub async fn promote(&self, id: ItemId) -> Result<Movement> {
        self.call(|reply| Request::Promote { id, reply }).await?
    }

    pub async fn demote(&self, id: ItemId) -> Result<Movement> {
        self.call(|reply| Request::Demote { id, reply }).await?
    }

    pub async fn remove(&self, id: ItemId) -> Result<Item> {
        self.call(|reply| Request::Remove { id, reply }).await?
    }

    pub async fn vote(&self, id: ItemId) -> Result<u32> {
        self.call(|reply| Request::Vote { id, reply }).await?
    }

    pub async fn gesture(&self, gesture: Gesture) -> Result<GestureOutcome> {
        self.call(|reply| Request::Gesture { gesture, reply }).await?
    }

    pub async fn snapshot(&self) -> Result<Snapshot> {
        self.call(|reply| Request::Snapshot { reply }).await
    }

    async fn call<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Request) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(build(reply))
            .await
            .map_err(|_| RankError::ChannelClosedError)?;
        response.await.map_err(|_| RankError::ChannelClosedError)
    }
}
