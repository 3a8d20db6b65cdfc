// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Album downloads: every object of a folder packed into one ZIP archive.

use std::collections::BTreeMap;
use std::io::{Cursor, Write as _};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::blob::normalize_prefix;
use crate::{BlobStore, StoreError};

/// Packs every object below `folder`, at any depth, into a ZIP archive and
/// returns its bytes.
///
/// Entries are named by the last path segment only, so the archive is flat.
/// When two objects share a name the one with the later path wins. Entries
/// are stored uncompressed.
///
/// # Errors
///
/// Returns [`StoreError::InvalidRequest`] for the root folder,
/// [`StoreError::NotFound`] if `folder` holds no objects,
/// [`StoreError::Archive`] if the archive cannot be written, or the first
/// backend error.
pub fn download_album(blobs: &dyn BlobStore, folder: &str) -> Result<Vec<u8>, StoreError> {
    let prefix = normalize_prefix(folder)?;
    if prefix.is_empty() {
        return Err(StoreError::InvalidRequest("albums need a non-root folder".into()));
    }
    let files = blobs.list_recursive(&prefix)?;
    if files.is_empty() {
        return Err(StoreError::NotFound(prefix));
    }

    // Sorted paths, so a later duplicate name replaces an earlier one.
    let entries: BTreeMap<&str, _> = files.iter().map(|path| (path.name(), path)).collect();

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, path) in &entries {
        let bytes = blobs.download(path)?;
        writer.start_file(*name, options)?;
        writer
            .write_all(&bytes)
            .map_err(|err| StoreError::Archive(err.to_string()))?;
    }
    let bytes = writer.finish()?.into_inner();
    crate::info!(
        folder = prefix.as_str(),
        entries = entries.len(),
        len = bytes.len(),
        "album packed"
    );
    Ok(bytes)
}
