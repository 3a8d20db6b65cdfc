// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RPAVER Store: the client seams between gallery views and remote storage.
//!
//! Views in RPAVER read and write two remote services: a document database
//! holding characters, posts, items and history entries, and an object store
//! holding images. This crate describes both as plain traits so that views take
//! explicitly constructed clients instead of reaching for global singletons.
//!
//! - [`DocumentStore`]: get/query/set/update/delete/add over JSON documents,
//!   plus [`subscribe`](DocumentStore::subscribe) for live snapshots. The
//!   [`FieldValue::ServerTimestamp`] sentinel asks the backend to stamp a field
//!   at write time.
//! - [`BlobStore`]: list/download-url/upload/download/copy/delete over
//!   slash-delimited object paths.
//! - [`Subscription`]: the RAII handle returned by `subscribe`. Dropping it
//!   detaches the listener, so every exit path of a view releases its live
//!   query.
//! - [`transfer`]: copy, move and folder-move operations built on [`BlobStore`].
//! - [`album`]: a folder packed into one ZIP archive for download.
//! - [`memory`]: in-process backends implementing both traits.
//! - [`bootstrap`]: the one process-wide client initialisation.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use rpaver_store::memory::MemoryDocumentStore;
//! use rpaver_store::{DocumentStore, Fields, Query, Snapshot, Watch};
//! use serde_json::json;
//!
//! let store = MemoryDocumentStore::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! let subscription = store
//!     .subscribe(
//!         Watch::Query(Query::collection("character")),
//!         Box::new(move |snapshot: &Snapshot| {
//!             if let Snapshot::Query(docs) = snapshot {
//!                 sink.lock().unwrap().push(docs.len());
//!             }
//!         }),
//!     )
//!     .unwrap();
//!
//! store
//!     .set("character", "alice", Fields::new().with("name", json!("Alice")))
//!     .unwrap();
//!
//! // Initial snapshot, then one per write.
//! assert_eq!(*seen.lock().unwrap(), [0, 1]);
//!
//! // Releasing the handle detaches the listener.
//! drop(subscription);
//! store.delete("character", "alice").unwrap();
//! assert_eq!(seen.lock().unwrap().len(), 2);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit structured logs through `tracing`. Without it the logging
//!   macros in [`logging`] compile to nothing.

pub mod logging;

pub mod album;
pub mod blob;
pub mod bootstrap;
pub mod config;
pub mod document;
pub mod error;
pub mod memory;
pub mod subscription;
pub mod transfer;

// Re-export tracing macros at crate root so callers and sibling crates log the same way.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};

pub use album::download_album;
pub use blob::{BlobPath, BlobPrefix, BlobStore, Listing};
pub use bootstrap::Clients;
pub use config::StoreConfig;
pub use document::{
    Direction, Document, DocumentStore, FieldValue, Fields, Filter, FilterOp, Listener, OrderBy,
    Query, Snapshot, Watch, server_timestamp,
};
pub use error::StoreError;
pub use subscription::Subscription;
pub use transfer::{FileMove, TransferReport};
