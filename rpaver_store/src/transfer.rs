// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bulk copy and move operations over a [`BlobStore`].
//!
//! These back the file manager's "copy", "move" and "move folder" actions.
//! Object stores have no rename, so a move is a copy followed by a delete of
//! the source.

use crate::blob::normalize_prefix;
use crate::{BlobPath, BlobStore, StoreError};

/// One requested transfer, with raw (un-normalised) paths from the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMove {
    /// Source object path.
    pub from: String,
    /// Destination object path.
    pub to: String,
}

impl FileMove {
    /// Creates a transfer request.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Outcome of a bulk transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferReport {
    /// Destinations written, in request order.
    pub transferred: Vec<BlobPath>,
    /// Sources that did not exist and were skipped.
    pub missing: Vec<BlobPath>,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mode {
    Copy,
    Move,
}

/// Copies every `from` object to its `to` path.
///
/// Sources that do not exist are skipped and listed in
/// [`TransferReport::missing`].
///
/// # Errors
///
/// Returns [`StoreError::InvalidRequest`] for an empty request list,
/// [`StoreError::InvalidPath`] for a malformed path, or the first backend error.
pub fn copy_files(store: &dyn BlobStore, files: &[FileMove]) -> Result<TransferReport, StoreError> {
    transfer(store, files, Mode::Copy)
}

/// Moves every `from` object to its `to` path (copy, then delete the source).
///
/// Sources that do not exist are skipped and listed in
/// [`TransferReport::missing`].
///
/// # Errors
///
/// Returns [`StoreError::InvalidRequest`] for an empty request list,
/// [`StoreError::InvalidPath`] for a malformed path, or the first backend error.
pub fn move_files(store: &dyn BlobStore, files: &[FileMove]) -> Result<TransferReport, StoreError> {
    transfer(store, files, Mode::Move)
}

/// Moves every object below `folder`, at any depth, to the same relative path
/// below `target`.
///
/// Both arguments are folder prefixes; `"a/b"` and `"a/b/"` are equivalent
/// and neither matches `"a/bc/…"`.
///
/// # Errors
///
/// Returns [`StoreError::InvalidRequest`] if either folder is the root or they
/// are the same, [`StoreError::NotFound`] if `folder` holds no objects, or the
/// first backend error.
pub fn move_folder(
    store: &dyn BlobStore,
    folder: &str,
    target: &str,
) -> Result<TransferReport, StoreError> {
    let source = normalize_prefix(folder)?;
    let target = normalize_prefix(target)?;
    if source.is_empty() || target.is_empty() {
        return Err(StoreError::InvalidRequest(
            "folder moves need a non-root source and target".into(),
        ));
    }
    if source == target {
        return Err(StoreError::InvalidRequest(format!(
            "source and target are both {source:?}"
        )));
    }

    let files = store.list_recursive(&source)?;
    if files.is_empty() {
        return Err(StoreError::NotFound(source));
    }
    crate::info!(
        from = source.as_str(),
        to = target.as_str(),
        count = files.len(),
        "moving folder"
    );

    let mut report = TransferReport::default();
    for from in files {
        let relative = &from.as_str()[source.len()..];
        let to = BlobPath::parse(&format!("{target}{relative}"))?;
        store.copy(&from, &to)?;
        store.delete(&from)?;
        report.transferred.push(to);
    }
    Ok(report)
}

fn transfer(
    store: &dyn BlobStore,
    files: &[FileMove],
    mode: Mode,
) -> Result<TransferReport, StoreError> {
    if files.is_empty() {
        return Err(StoreError::InvalidRequest("no files to transfer".into()));
    }

    // Validate everything before touching the store.
    let pairs = files
        .iter()
        .map(|file| -> Result<_, StoreError> {
            Ok((BlobPath::parse(&file.from)?, BlobPath::parse(&file.to)?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = TransferReport::default();
    for (from, to) in pairs {
        if !store.exists(&from)? {
            crate::warn!(path = from.as_str(), "transfer source missing");
            report.missing.push(from);
            continue;
        }
        crate::debug!(from = from.as_str(), to = to.as_str(), "transferring");
        store.copy(&from, &to)?;
        if mode == Mode::Move && from != to {
            store.delete(&from)?;
        }
        report.transferred.push(to);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::{FileMove, copy_files, move_files, move_folder};
    use crate::memory::MemoryBlobStore;
    use crate::{BlobPath, BlobStore, StoreError};

    fn path(raw: &str) -> BlobPath {
        BlobPath::parse(raw).unwrap()
    }

    fn seeded(paths: &[&str]) -> MemoryBlobStore {
        let store = MemoryBlobStore::default();
        for raw in paths {
            store.upload(&path(raw), b"img", "image/png").unwrap();
        }
        store
    }

    #[test]
    fn copy_keeps_sources_and_reports_missing() {
        let store = seeded(&["ai/a.png"]);
        let report = copy_files(
            &store,
            &[
                FileMove::new("/ai/a.png", "/stock/a.png"),
                FileMove::new("ai/gone.png", "stock/gone.png"),
            ],
        )
        .unwrap();
        assert_eq!(report.transferred, [path("stock/a.png")]);
        assert_eq!(report.missing, [path("ai/gone.png")]);
        assert!(store.exists(&path("ai/a.png")).unwrap());
        assert!(store.exists(&path("stock/a.png")).unwrap());
    }

    #[test]
    fn move_deletes_sources() {
        let store = seeded(&["ai/a.png", "ai/b.png"]);
        let report = move_files(
            &store,
            &[
                FileMove::new("ai/a.png", "library/a.png"),
                FileMove::new("ai/b.png", "library/b.png"),
            ],
        )
        .unwrap();
        assert_eq!(report.transferred.len(), 2);
        assert!(store.list("ai").unwrap().items.is_empty());
        assert_eq!(store.list("library").unwrap().items.len(), 2);
    }

    #[test]
    fn move_onto_itself_keeps_the_object() {
        let store = seeded(&["ai/a.png"]);
        move_files(&store, &[FileMove::new("ai/a.png", "/ai/a.png")]).unwrap();
        assert!(store.exists(&path("ai/a.png")).unwrap());
    }

    #[test]
    fn empty_and_malformed_requests_are_rejected() {
        let store = seeded(&[]);
        assert!(matches!(
            copy_files(&store, &[]),
            Err(StoreError::InvalidRequest(_))
        ));
        assert!(matches!(
            move_files(&store, &[FileMove::new("a/../b", "c")]),
            Err(StoreError::InvalidPath(_))
        ));
    }

    #[test]
    fn folder_move_preserves_relative_layout() {
        let store = seeded(&[
            "charactersIMG/Alice/01.png",
            "charactersIMG/Alice/sketch/02.png",
            "charactersIMG/Alicia/01.png",
        ]);
        let report = move_folder(&store, "charactersIMG/Alice", "archive/Alice/").unwrap();
        assert_eq!(
            report.transferred,
            [path("archive/Alice/01.png"), path("archive/Alice/sketch/02.png")]
        );
        // A sibling sharing the name prefix is untouched.
        assert!(store.exists(&path("charactersIMG/Alicia/01.png")).unwrap());
        assert_eq!(store.len().unwrap(), 3);
    }

    #[test]
    fn folder_move_of_empty_folder_is_not_found() {
        let store = seeded(&["stock/a.png"]);
        assert_eq!(
            move_folder(&store, "ai", "stock"),
            Err(StoreError::NotFound("ai/".into()))
        );
        assert!(matches!(
            move_folder(&store, "stock", "/stock/"),
            Err(StoreError::InvalidRequest(_))
        ));
    }
}
