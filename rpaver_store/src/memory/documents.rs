// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Map;

use crate::document::check_key;
use crate::{
    Document, DocumentStore, Fields, Listener, Query, Snapshot, StoreError, Subscription, Watch,
};

/// Listener ids are unique across every store in the process.
static NEXT_LISTENER: AtomicU64 = AtomicU64::new(1);

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

struct ListenerSlot {
    id: u64,
    watch: Watch,
    active: Arc<AtomicBool>,
    callback: Arc<Mutex<Listener>>,
}

#[derive(Default)]
struct Inner {
    collections: BTreeMap<String, BTreeMap<String, Document>>,
    listeners: Vec<ListenerSlot>,
    next_doc: u64,
    /// Deliveries in write order, waiting to run outside the lock.
    queue: VecDeque<Delivery>,
    /// Set while some caller is draining `queue`.
    draining: bool,
}

impl Inner {
    fn snapshot(&self, watch: &Watch) -> Snapshot {
        match watch {
            Watch::Query(query) => Snapshot::Query(
                self.collections
                    .get(&query.collection)
                    .map_or_else(Vec::new, |docs| query.apply(docs.values())),
            ),
            Watch::Document { collection, id } => Snapshot::Document(
                self.collections
                    .get(collection)
                    .and_then(|docs| docs.get(id))
                    .cloned(),
            ),
        }
    }
}

/// A pending delivery, prepared under the store lock and run after it is released.
struct Delivery {
    id: u64,
    snapshot: Snapshot,
    active: Arc<AtomicBool>,
    callback: Arc<Mutex<Listener>>,
}

impl Delivery {
    fn run(self) {
        if !self.active.load(Ordering::Acquire) {
            return;
        }
        let Ok(mut callback) = self.callback.lock() else {
            crate::warn!(listener = self.id, "skipping poisoned listener");
            return;
        };
        (*callback)(&self.snapshot);
    }
}

/// Clears the draining flag if the drain loop is left early, by a panicking
/// listener or a poisoned lock.
struct DrainGuard<'a> {
    inner: &'a Mutex<Inner>,
    done: bool,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        inner.draining = false;
    }
}

/// A [`DocumentStore`] held entirely in memory.
///
/// Clones share the same data. Documents added with
/// [`add`](DocumentStore::add) receive zero-padded sequential ids, so they sort
/// in creation order.
#[derive(Clone)]
pub struct MemoryDocumentStore {
    inner: Arc<Mutex<Inner>>,
    clock: Clock,
}

impl MemoryDocumentStore {
    /// Creates an empty store stamping server timestamps with the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Creates an empty store stamping server timestamps with `clock`.
    #[must_use]
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            clock: Arc::new(clock),
        }
    }

    /// Number of listeners currently registered.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the store lock is poisoned.
    pub fn listener_count(&self) -> Result<usize, StoreError> {
        Ok(self.inner.lock()?.listeners.len())
    }

    fn now(&self) -> String {
        (self.clock)().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Runs `write` under the lock and, if it reports a change, queues a
    /// snapshot for every listener of `collection`.
    ///
    /// Snapshots are queued in write order. The outermost caller drains the
    /// queue; a write made from inside a listener only appends to it, so every
    /// listener sees snapshots in the order the writes happened.
    fn write<R>(
        &self,
        collection: &str,
        write: impl FnOnce(&mut Inner) -> Result<(R, bool), StoreError>,
    ) -> Result<R, StoreError> {
        let (result, drain) = {
            let mut inner = self.inner.lock()?;
            let (result, changed) = write(&mut inner)?;
            if changed {
                let deliveries: Vec<Delivery> = inner
                    .listeners
                    .iter()
                    .filter(|slot| slot.watch.collection() == collection)
                    .map(|slot| Delivery {
                        id: slot.id,
                        snapshot: inner.snapshot(&slot.watch),
                        active: Arc::clone(&slot.active),
                        callback: Arc::clone(&slot.callback),
                    })
                    .collect();
                crate::trace!(collection, listeners = deliveries.len(), "document write");
                inner.queue.extend(deliveries);
            }
            (result, claim_drain(&mut inner))
        };
        if drain {
            self.drain()?;
        }
        Ok(result)
    }

    /// Runs queued deliveries until the queue is empty.
    ///
    /// The draining flag is cleared under the same lock that finds the queue
    /// empty, so a concurrent write either lands before that point and is
    /// delivered here, or claims the drain itself.
    fn drain(&self) -> Result<(), StoreError> {
        let mut guard = DrainGuard {
            inner: &self.inner,
            done: false,
        };
        loop {
            let delivery = {
                let mut inner = self.inner.lock()?;
                match inner.queue.pop_front() {
                    Some(delivery) => delivery,
                    None => {
                        inner.draining = false;
                        guard.done = true;
                        return Ok(());
                    }
                }
            };
            delivery.run();
        }
    }
}

/// Marks the caller as the drainer if deliveries are queued and nobody is
/// draining yet.
fn claim_drain(inner: &mut Inner) -> bool {
    if inner.draining || inner.queue.is_empty() {
        return false;
    }
    inner.draining = true;
    true
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryDocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("MemoryDocumentStore");
        match self.inner.lock() {
            Ok(inner) => s
                .field("collections", &inner.collections.len())
                .field("listeners", &inner.listeners.len()),
            Err(_) => s.field("poisoned", &true),
        };
        s.finish_non_exhaustive()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        check_key("collection", collection)?;
        check_key("document id", id)?;
        let inner = self.inner.lock()?;
        Ok(inner
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        check_key("collection", &query.collection)?;
        let inner = self.inner.lock()?;
        Ok(inner
            .collections
            .get(&query.collection)
            .map_or_else(Vec::new, |docs| query.apply(docs.values())))
    }

    fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        check_key("collection", collection)?;
        check_key("document id", id)?;
        let now = self.now();
        self.write(collection, |inner| {
            let mut doc = Document {
                id: id.to_owned(),
                fields: Map::new(),
            };
            fields.apply_to(&mut doc.fields, &now);
            inner
                .collections
                .entry(collection.to_owned())
                .or_default()
                .insert(id.to_owned(), doc);
            Ok(((), true))
        })
    }

    fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        check_key("collection", collection)?;
        check_key("document id", id)?;
        let now = self.now();
        self.write(collection, |inner| {
            let doc = inner
                .collections
                .get_mut(collection)
                .and_then(|docs| docs.get_mut(id))
                .ok_or_else(|| StoreError::NotFound(format!("{collection}/{id}")))?;
            fields.apply_to(&mut doc.fields, &now);
            Ok(((), true))
        })
    }

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        check_key("collection", collection)?;
        check_key("document id", id)?;
        self.write(collection, |inner| {
            let removed = inner
                .collections
                .get_mut(collection)
                .and_then(|docs| docs.remove(id))
                .is_some();
            Ok(((), removed))
        })
    }

    fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        check_key("collection", collection)?;
        let now = self.now();
        self.write(collection, |inner| {
            let docs = inner.collections.entry(collection.to_owned()).or_default();
            let id = loop {
                inner.next_doc += 1;
                let candidate = format!("{:020}", inner.next_doc);
                if !docs.contains_key(&candidate) {
                    break candidate;
                }
            };
            let mut doc = Document {
                id: id.clone(),
                fields: Map::new(),
            };
            fields.apply_to(&mut doc.fields, &now);
            docs.insert(id.clone(), doc);
            Ok((id, true))
        })
    }

    fn subscribe(&self, watch: Watch, listener: Listener) -> Result<Subscription, StoreError> {
        check_key("collection", watch.collection())?;
        if let Watch::Document { id, .. } = &watch {
            check_key("document id", id)?;
        }

        let id = NEXT_LISTENER.fetch_add(1, Ordering::Relaxed);
        let active = Arc::new(AtomicBool::new(true));
        let callback = Arc::new(Mutex::new(listener));

        let drain = {
            let mut inner = self.inner.lock()?;
            let snapshot = inner.snapshot(&watch);
            inner.listeners.push(ListenerSlot {
                id,
                watch,
                active: Arc::clone(&active),
                callback: Arc::clone(&callback),
            });
            inner.queue.push_back(Delivery {
                id,
                snapshot,
                active: Arc::clone(&active),
                callback,
            });
            claim_drain(&mut inner)
        };
        crate::debug!(listener = id, "listener attached");
        if drain {
            self.drain()?;
        }

        let store: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        Ok(Subscription::new(move || {
            active.store(false, Ordering::Release);
            if let Some(inner) = store.upgrade() {
                if let Ok(mut inner) = inner.lock() {
                    inner.listeners.retain(|slot| slot.id != id);
                }
            }
            crate::debug!(listener = id, "listener released");
        }))
    }
}
