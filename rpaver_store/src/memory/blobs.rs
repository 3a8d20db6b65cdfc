// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::sync::Mutex;

use crate::blob::normalize_prefix;
use crate::{BlobPath, BlobPrefix, BlobStore, Listing, StoreConfig, StoreError};

#[derive(Clone, Debug)]
struct Blob {
    bytes: Vec<u8>,
    content_type: String,
}

/// A [`BlobStore`] held entirely in memory.
///
/// Download URLs follow the hosted service's shape,
/// `{url_base}/{bucket}/o/{percent-encoded path}?alt=media`, so views can be
/// exercised against predictable URLs.
#[derive(Debug)]
pub struct MemoryBlobStore {
    bucket: String,
    url_base: String,
    objects: Mutex<BTreeMap<BlobPath, Blob>>,
}

impl MemoryBlobStore {
    /// Creates an empty store addressing the bucket in `config`.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            bucket: config.storage_bucket.clone(),
            url_base: config.url_base.trim_end_matches('/').to_owned(),
            objects: Mutex::new(BTreeMap::new()),
        }
    }

    /// Returns the content type recorded for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the object does not exist.
    pub fn content_type(&self, path: &BlobPath) -> Result<String, StoreError> {
        let objects = self.objects.lock()?;
        objects
            .get(path)
            .map(|blob| blob.content_type.clone())
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    /// Number of stored objects.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the store lock is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.objects.lock()?.len())
    }

    /// Returns `true` if no objects are stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the store lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.objects.lock()?.is_empty())
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new(&StoreConfig::default())
    }
}

impl BlobStore for MemoryBlobStore {
    fn list(&self, prefix: &str) -> Result<Listing, StoreError> {
        let prefix = normalize_prefix(prefix)?;
        let objects = self.objects.lock()?;
        let mut listing = Listing::default();
        let mut folders = BTreeSet::new();
        for path in objects.keys() {
            let Some(rest) = path.as_str().strip_prefix(prefix.as_str()) else {
                continue;
            };
            match rest.find('/') {
                Some(slash) => {
                    folders.insert(format!("{prefix}{}", &rest[..=slash]));
                }
                None => listing.items.push(path.clone()),
            }
        }
        listing.prefixes = folders
            .iter()
            .map(|folder| BlobPrefix::new(folder))
            .collect::<Result<_, _>>()?;
        Ok(listing)
    }

    fn list_recursive(&self, prefix: &str) -> Result<Vec<BlobPath>, StoreError> {
        let prefix = normalize_prefix(prefix)?;
        let objects = self.objects.lock()?;
        Ok(objects
            .keys()
            .filter(|path| path.as_str().starts_with(prefix.as_str()))
            .cloned()
            .collect())
    }

    fn download_url(&self, path: &BlobPath) -> Result<String, StoreError> {
        if !self.exists(path)? {
            return Err(StoreError::NotFound(path.to_string()));
        }
        Ok(format!(
            "{}/{}/o/{}?alt=media",
            self.url_base,
            self.bucket,
            percent_encode(path.as_str())
        ))
    }

    fn upload(&self, path: &BlobPath, bytes: &[u8], content_type: &str) -> Result<(), StoreError> {
        let mut objects = self.objects.lock()?;
        objects.insert(
            path.clone(),
            Blob {
                bytes: bytes.to_vec(),
                content_type: content_type.to_owned(),
            },
        );
        crate::trace!(path = path.as_str(), len = bytes.len(), "blob uploaded");
        Ok(())
    }

    fn download(&self, path: &BlobPath) -> Result<Vec<u8>, StoreError> {
        let objects = self.objects.lock()?;
        objects
            .get(path)
            .map(|blob| blob.bytes.clone())
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &BlobPath) -> Result<bool, StoreError> {
        Ok(self.objects.lock()?.contains_key(path))
    }

    fn copy(&self, from: &BlobPath, to: &BlobPath) -> Result<(), StoreError> {
        let mut objects = self.objects.lock()?;
        let blob = objects
            .get(from)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(from.to_string()))?;
        objects.insert(to.clone(), blob);
        Ok(())
    }

    fn delete(&self, path: &BlobPath) -> Result<(), StoreError> {
        let mut objects = self.objects.lock()?;
        objects
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }
}

/// Percent-encodes every byte outside the URL unreserved set, including `/`.
fn percent_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{MemoryBlobStore, percent_encode};
    use crate::{BlobPath, BlobStore, StoreError};

    fn path(raw: &str) -> BlobPath {
        BlobPath::parse(raw).unwrap()
    }

    fn seeded() -> MemoryBlobStore {
        let store = MemoryBlobStore::default();
        for raw in [
            "charactersIMG/Alice/01.png",
            "charactersIMG/Alice/02.png",
            "charactersIMG/Bob Stone/01.png",
            "charactersIMG/cover.png",
            "stock/tree.jpg",
        ] {
            store.upload(&path(raw), raw.as_bytes(), "image/png").unwrap();
        }
        store
    }

    #[test]
    fn list_splits_items_and_folders() {
        let store = seeded();
        let listing = store.list("charactersIMG/").unwrap();
        let items: Vec<_> = listing.items.iter().map(BlobPath::as_str).collect();
        let folders: Vec<_> = listing.prefixes.iter().map(|p| p.name()).collect();
        assert_eq!(items, ["charactersIMG/cover.png"]);
        assert_eq!(folders, ["Alice", "Bob Stone"]);

        let root = store.list("").unwrap();
        let folders: Vec<_> = root.prefixes.iter().map(|p| p.as_str()).collect();
        assert_eq!(folders, ["charactersIMG/", "stock/"]);
        assert!(root.items.is_empty());
    }

    #[test]
    fn list_without_trailing_slash_is_a_folder() {
        let store = seeded();
        // "charactersIMG/Al" must not match "charactersIMG/Alice/…".
        assert_eq!(store.list("charactersIMG/Al").unwrap().items.len(), 0);
        assert_eq!(store.list("/charactersIMG/Alice").unwrap().items.len(), 2);
    }

    #[test]
    fn recursive_listing_spans_depths() {
        let store = seeded();
        assert_eq!(store.list_recursive("charactersIMG").unwrap().len(), 4);
        assert_eq!(store.list_recursive("").unwrap().len(), 5);
    }

    #[test]
    fn download_url_encodes_the_path() {
        let store = seeded();
        let url = store.download_url(&path("charactersIMG/Bob Stone/01.png")).unwrap();
        assert_eq!(
            url,
            "https://firebasestorage.googleapis.com/v0/b/rp-encyclopedia.appspot.com/o/charactersIMG%2FBob%20Stone%2F01.png?alt=media"
        );
        assert!(matches!(
            store.download_url(&path("missing.png")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn copy_keeps_bytes_and_content_type() {
        let store = seeded();
        store.copy(&path("stock/tree.jpg"), &path("ai/tree.jpg")).unwrap();
        assert_eq!(store.download(&path("ai/tree.jpg")).unwrap(), b"stock/tree.jpg");
        assert_eq!(store.content_type(&path("ai/tree.jpg")).unwrap(), "image/png");
        assert!(store.exists(&path("stock/tree.jpg")).unwrap());
    }

    #[test]
    fn delete_missing_object_fails() {
        let store = seeded();
        store.delete(&path("stock/tree.jpg")).unwrap();
        assert_eq!(
            store.delete(&path("stock/tree.jpg")),
            Err(StoreError::NotFound("stock/tree.jpg".into()))
        );
    }

    #[test]
    fn percent_encoding_handles_multibyte_names() {
        assert_eq!(percent_encode("a b/한"), "a%20b%2F%ED%95%9C");
    }
}
