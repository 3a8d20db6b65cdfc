// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-process backends for [`DocumentStore`](crate::DocumentStore) and
//! [`BlobStore`](crate::BlobStore).
//!
//! Both backends are `Send + Sync` and cheap to share behind an `Arc`. They are
//! used by tests, demos and offline tooling; the production clients talk to the
//! hosted services but honour the same contracts.

mod blobs;
mod documents;

pub use blobs::MemoryBlobStore;
pub use documents::MemoryDocumentStore;
