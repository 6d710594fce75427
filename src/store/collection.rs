use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use super::backend::StorageBackend;
use crate::error::{Result, TaskError};

/// A record a [`Collection`] can manage.
pub trait Record: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> Uuid;
    fn validate(&self) -> Result<()>;
    /// Refresh the mutation timestamp.
    fn touch(&mut self, now: DateTime<Utc>);
}

/// What a mutation did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Inserted,
    Updated,
    Removed,
}

/// Payload delivered synchronously to subscribers after every effective
/// mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    /// Number of records the mutation touched.
    pub affected: usize,
}

/// Handle returned by [`Collection::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Read options for [`Collection::find`]: pagination over the filtered
/// sequence. Ordering is the query layer's concern.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindOptions {
    pub skip: usize,
    pub limit: Option<usize>,
}

/// Single source of truth for one record type.
///
/// Records live in memory in insertion order. Every effective mutation
/// persists the full snapshot to the backend, then notifies subscribers
/// in registration order, synchronously, before returning. A mutation
/// that matches nothing neither persists nor notifies.
///
/// A failed snapshot write does NOT roll the in-memory mutation back:
/// the store favors availability of the live session over durability
/// consistency. The error is surfaced so the caller can warn the user,
/// and subscribers are still notified since derived views must track
/// live state.
///
/// Notification runs in the caller's stack. A subscriber must not
/// re-enter a mutation on the same collection from its callback; the
/// store does not guard against that.
pub struct Collection<R: Record, B: StorageBackend> {
    backend: Rc<B>,
    key: &'static str,
    records: Vec<R>,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(&ChangeEvent)>)>,
    next_subscription: u64,
}

impl<R: Record, B: StorageBackend> Collection<R, B> {
    /// Loads the collection stored under `key`, or starts empty if
    /// nothing is stored. A snapshot that fails to parse (including an
    /// unparsable date) rejects the whole load rather than silently
    /// dropping records.
    pub fn open(backend: Rc<B>, key: &'static str) -> Result<Self> {
        let records = match backend.read(key)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        Ok(Self {
            backend,
            key,
            records,
            subscribers: Vec::new(),
            next_subscription: 0,
        })
    }

    // --- Reads ---

    pub fn get(&self, id: &Uuid) -> Option<R> {
        self.records.iter().find(|r| r.id() == *id).cloned()
    }

    pub fn find_one(&self, pred: impl Fn(&R) -> bool) -> Option<R> {
        self.records.iter().find(|r| pred(r)).cloned()
    }

    pub fn find(&self, pred: impl Fn(&R) -> bool, options: FindOptions) -> Vec<R> {
        let matching = self.records.iter().filter(|r| pred(r)).skip(options.skip);
        match options.limit {
            Some(limit) => matching.take(limit).cloned().collect(),
            None => matching.cloned().collect(),
        }
    }

    pub fn all(&self) -> Vec<R> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // --- Mutations ---

    /// Validates and inserts a record, returning its id.
    pub fn insert(&mut self, record: R) -> Result<Uuid> {
        record.validate()?;
        let id = record.id();
        if self.get(&id).is_some() {
            return Err(TaskError::Validation(format!(
                "a record with id {} already exists",
                id
            )));
        }
        self.records.push(record);
        self.finish_mutation(ChangeKind::Inserted, 1)?;
        Ok(id)
    }

    /// Applies `mutate` to the first matching record, re-validates the
    /// merged result, stamps `updated_at`, and commits. Returns the
    /// number of records changed (0 or 1); no match is not an error.
    /// A validation failure leaves the record untouched.
    pub fn update_one(
        &mut self,
        pred: impl Fn(&R) -> bool,
        mutate: impl FnOnce(&mut R) -> Result<()>,
    ) -> Result<usize> {
        let Some(pos) = self.records.iter().position(|r| pred(r)) else {
            return Ok(0);
        };

        // Mutate a copy so a validation failure cannot leave a
        // half-patched record behind.
        let mut draft = self.records[pos].clone();
        mutate(&mut draft)?;
        draft.validate()?;
        draft.touch(Utc::now());

        self.records[pos] = draft;
        self.finish_mutation(ChangeKind::Updated, 1)?;
        Ok(1)
    }

    /// [`Self::update_one`] semantics applied to every matching record.
    /// All drafts are validated before any is committed, so a failure
    /// mutates nothing.
    pub fn update_many(
        &mut self,
        pred: impl Fn(&R) -> bool,
        mutate: impl Fn(&mut R) -> Result<()>,
    ) -> Result<usize> {
        let now = Utc::now();
        let mut staged: Vec<(usize, R)> = Vec::new();
        for (pos, record) in self.records.iter().enumerate() {
            if pred(record) {
                let mut draft = record.clone();
                mutate(&mut draft)?;
                draft.validate()?;
                draft.touch(now);
                staged.push((pos, draft));
            }
        }

        if staged.is_empty() {
            return Ok(0);
        }

        let affected = staged.len();
        for (pos, draft) in staged {
            self.records[pos] = draft;
        }
        self.finish_mutation(ChangeKind::Updated, affected)?;
        Ok(affected)
    }

    /// Deletes the first matching record. Returns the count removed
    /// (0 or 1).
    pub fn remove_one(&mut self, pred: impl Fn(&R) -> bool) -> Result<usize> {
        let Some(pos) = self.records.iter().position(|r| pred(r)) else {
            return Ok(0);
        };
        self.records.remove(pos);
        self.finish_mutation(ChangeKind::Removed, 1)?;
        Ok(1)
    }

    /// Deletes every matching record, returning the count removed.
    pub fn remove_many(&mut self, pred: impl Fn(&R) -> bool) -> Result<usize> {
        let before = self.records.len();
        self.records.retain(|r| !pred(r));
        let removed = before - self.records.len();
        if removed == 0 {
            return Ok(0);
        }
        self.finish_mutation(ChangeKind::Removed, removed)?;
        Ok(removed)
    }

    // --- Subscriptions ---

    /// Registers a callback invoked synchronously after every effective
    /// mutation. Subscribers fire in registration order.
    pub fn subscribe(&mut self, callback: impl FnMut(&ChangeEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscriber. Returns false if the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() < before
    }

    // --- Internals ---

    /// Persist-then-notify. The persistence error, if any, is returned
    /// after notification so live-state consumers stay in sync.
    fn finish_mutation(&mut self, kind: ChangeKind, affected: usize) -> Result<()> {
        let persisted = self.persist();
        if let Err(e) = &persisted {
            warn!(collection = self.key, error = %e, "snapshot write failed; keeping in-memory state");
        }
        let event = ChangeEvent { kind, affected };
        for (_, callback) in &mut self.subscribers {
            callback(&event);
        }
        persisted
    }

    fn persist(&self) -> Result<()> {
        let payload = serde_json::to_string(&self.records)?;
        self.backend.write(self.key, &payload)
    }
}
