//! Live views over the document collections.
//!
//! Every mutation of a live collection publishes a full revision-stamped
//! snapshot into a watch channel. Subscribers hold their own filter and
//! ordering, observe the complete record set for any snapshot (not deltas),
//! and unsubscribe by dropping their [`LiveQuery`]. The revision counter is
//! the database `meta` row, so a snapshot's revision totally orders writes
//! across both collections.

use std::cmp::Ordering as CmpOrdering;

use tokio::sync::watch;

use crate::errors::AppError;

/// A full copy of a collection at a point in time.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub revision: i64,
    pub records: Vec<T>,
}

/// Snapshot fan-out for one document collection.
pub struct LiveCollection<T> {
    tx: watch::Sender<Snapshot<T>>,
}

impl<T: Clone + Send + Sync + 'static> LiveCollection<T> {
    pub fn new(initial: Snapshot<T>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replace the current snapshot and wake all subscribers.
    ///
    /// Snapshots at or below the current revision are dropped, so
    /// out-of-order publishes cannot roll a view backwards.
    pub fn publish(&self, snapshot: Snapshot<T>) {
        self.tx.send_if_modified(|current| {
            if snapshot.revision > current.revision {
                *current = snapshot;
                true
            } else {
                false
            }
        });
    }

    /// Revision of the most recently published snapshot.
    pub fn revision(&self) -> i64 {
        self.tx.borrow().revision
    }

    /// Subscribe with a caller-supplied filter and ordering.
    ///
    /// The subscription delivers the full filtered, ordered record set for
    /// every snapshot. Dropping the returned query unsubscribes.
    pub fn subscribe<F>(&self, filter: F, order: fn(&T, &T) -> CmpOrdering) -> LiveQuery<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        LiveQuery {
            rx: self.tx.subscribe(),
            filter: Box::new(filter),
            order,
        }
    }
}

/// One subscriber's view of a live collection.
pub struct LiveQuery<T> {
    rx: watch::Receiver<Snapshot<T>>,
    filter: Box<dyn Fn(&T) -> bool + Send + Sync>,
    order: fn(&T, &T) -> CmpOrdering,
}

impl<T: Clone> LiveQuery<T> {
    /// The current filtered, ordered record set.
    pub fn snapshot(&mut self) -> Snapshot<T> {
        let current = self.rx.borrow_and_update();
        apply_view(self.filter.as_ref(), self.order, &current)
    }

    /// Wait for the first snapshot newer than `revision` and return it.
    ///
    /// Returns immediately when the current snapshot is already newer.
    pub async fn next_after(&mut self, revision: i64) -> Result<Snapshot<T>, AppError> {
        loop {
            {
                let current = self.rx.borrow_and_update();
                if current.revision > revision {
                    return Ok(apply_view(self.filter.as_ref(), self.order, &current));
                }
            }
            self.rx
                .changed()
                .await
                .map_err(|_| AppError::Internal("Live collection closed".to_string()))?;
        }
    }
}

fn apply_view<T: Clone>(
    filter: &(dyn Fn(&T) -> bool + Send + Sync),
    order: fn(&T, &T) -> CmpOrdering,
    snapshot: &Snapshot<T>,
) -> Snapshot<T> {
    let mut records: Vec<T> = snapshot
        .records
        .iter()
        .filter(|r| filter(r))
        .cloned()
        .collect();
    records.sort_by(|a, b| order(a, b));
    Snapshot {
        revision: snapshot.revision,
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Doc {
        id: String,
        owner: String,
    }

    fn doc(id: &str, owner: &str) -> Doc {
        Doc {
            id: id.to_string(),
            owner: owner.to_string(),
        }
    }

    fn by_id_desc(a: &Doc, b: &Doc) -> CmpOrdering {
        b.id.cmp(&a.id)
    }

    #[tokio::test]
    async fn test_subscriber_sees_filtered_ordered_snapshot() {
        let live = LiveCollection::new(Snapshot {
            revision: 1,
            records: vec![doc("1", "alice"), doc("3", "bob"), doc("2", "alice")],
        });

        let mut all = live.subscribe(|_| true, by_id_desc);
        let mut mine = live.subscribe(|d: &Doc| d.owner == "alice", by_id_desc);

        let snap = all.snapshot();
        assert_eq!(snap.revision, 1);
        let ids: Vec<&str> = snap.records.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);

        let snap = mine.snapshot();
        let ids: Vec<&str> = snap.records.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_next_after_returns_current_when_already_newer() {
        let live = LiveCollection::new(Snapshot {
            revision: 5,
            records: vec![doc("1", "alice")],
        });

        let mut query = live.subscribe(|_| true, by_id_desc);
        let snap = query.next_after(3).await.unwrap();
        assert_eq!(snap.revision, 5);
    }

    #[tokio::test]
    async fn test_next_after_waits_for_publish() {
        let live = std::sync::Arc::new(LiveCollection::new(Snapshot {
            revision: 1,
            records: Vec::new(),
        }));

        let mut query = live.subscribe(|_| true, by_id_desc);

        let publisher = live.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            publisher.publish(Snapshot {
                revision: 2,
                records: vec![doc("1", "alice")],
            });
        });

        let snap = tokio::time::timeout(Duration::from_secs(1), query.next_after(1))
            .await
            .expect("timed out")
            .unwrap();
        assert_eq!(snap.revision, 2);
        assert_eq!(snap.records.len(), 1);
    }
}
