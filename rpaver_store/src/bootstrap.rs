// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide client initialisation.
//!
//! Views receive a [`Clients`] value explicitly. The process still needs one
//! place that builds those clients exactly once; [`init_clients`] is that
//! place. Calling it again returns the clients built by the first call and
//! ignores the new initialiser.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::memory::{MemoryBlobStore, MemoryDocumentStore};
use crate::{BlobStore, DocumentStore, StoreConfig};

/// The document and blob clients handed to every view.
#[derive(Clone)]
pub struct Clients {
    /// Document database client.
    pub documents: Arc<dyn DocumentStore>,
    /// Object store client.
    pub blobs: Arc<dyn BlobStore>,
}

impl Clients {
    /// Bundles explicitly constructed clients.
    pub fn new(documents: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { documents, blobs }
    }

    /// Builds in-memory clients addressing the bucket in `config`.
    #[must_use]
    pub fn in_memory(config: &StoreConfig) -> Self {
        Self {
            documents: Arc::new(MemoryDocumentStore::new()),
            blobs: Arc::new(MemoryBlobStore::new(config)),
        }
    }
}

impl fmt::Debug for Clients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clients").finish_non_exhaustive()
    }
}

static CLIENTS: OnceLock<Clients> = OnceLock::new();

/// Initialises the process-wide clients on first call and returns them.
///
/// Later calls do not run `init` and return the clients from the first call.
pub fn init_clients(init: impl FnOnce() -> Clients) -> &'static Clients {
    let mut ran = false;
    let clients = CLIENTS.get_or_init(|| {
        ran = true;
        init()
    });
    if ran {
        crate::info!("store clients initialised");
    } else {
        crate::debug!("store clients already initialised");
    }
    clients
}

/// Returns the process-wide clients if [`init_clients`] has run.
pub fn global_clients() -> Option<&'static Clients> {
    CLIENTS.get()
}
