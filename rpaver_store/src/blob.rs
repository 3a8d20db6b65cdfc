// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blob-store model: object paths, listings and the client trait.

use std::fmt;

use crate::StoreError;

/// A normalised object path such as `charactersIMG/Alice/01.png`.
///
/// Leading slashes are stripped. Empty paths, empty segments and `..`
/// segments are rejected.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlobPath(String);

impl BlobPath {
    /// Parses and normalises `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPath`] if `raw` does not name an object.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let trimmed = raw.trim_start_matches('/');
        if trimmed.is_empty()
            || trimmed
                .split('/')
                .any(|segment| segment.is_empty() || segment == "..")
        {
            return Err(StoreError::InvalidPath(raw.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last path segment (the file name).
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Returns the containing folder as a prefix ending in `/`, or `""` at the root.
    #[must_use]
    pub fn folder(&self) -> &str {
        self.0.rfind('/').map_or("", |at| &self.0[..=at])
    }
}

impl fmt::Display for BlobPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalises a folder prefix: no leading slash, exactly one trailing slash,
/// `""` for the root.
///
/// # Errors
///
/// Returns [`StoreError::InvalidPath`] for `..` or empty inner segments.
pub fn normalize_prefix(raw: &str) -> Result<String, StoreError> {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if trimmed
        .split('/')
        .any(|segment| segment.is_empty() || segment == "..")
    {
        return Err(StoreError::InvalidPath(raw.to_owned()));
    }
    Ok(format!("{trimmed}/"))
}

/// A sub-folder reported by [`BlobStore::list`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlobPrefix(String);

impl BlobPrefix {
    /// Wraps a prefix, normalising it to end in `/`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPath`] for the root or a malformed prefix.
    pub fn new(raw: &str) -> Result<Self, StoreError> {
        let prefix = normalize_prefix(raw)?;
        if prefix.is_empty() {
            return Err(StoreError::InvalidPath(raw.to_owned()));
        }
        Ok(Self(prefix))
    }

    /// Returns the full prefix, ending in `/`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the folder name without parents or trailing slash.
    #[must_use]
    pub fn name(&self) -> &str {
        let inner = &self.0[..self.0.len() - 1];
        inner.rsplit('/').next().unwrap_or(inner)
    }
}

/// One level of a folder: the objects directly inside it and its sub-folders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    /// Objects directly inside the folder, sorted by path.
    pub items: Vec<BlobPath>,
    /// Sub-folders, sorted by path.
    pub prefixes: Vec<BlobPrefix>,
}

/// An object storage client.
pub trait BlobStore: Send + Sync {
    /// Lists one level below `prefix` (`/`-delimited).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPath`] for a malformed prefix, or a backend error.
    fn list(&self, prefix: &str) -> Result<Listing, StoreError>;

    /// Lists every object below `prefix`, at any depth, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPath`] for a malformed prefix, or a backend error.
    fn list_recursive(&self, prefix: &str) -> Result<Vec<BlobPath>, StoreError>;

    /// Returns a URL from which the object can be fetched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the object does not exist.
    fn download_url(&self, path: &BlobPath) -> Result<String, StoreError>;

    /// Stores `bytes` at `path`, replacing any existing object.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    fn upload(&self, path: &BlobPath, bytes: &[u8], content_type: &str) -> Result<(), StoreError>;

    /// Reads the object at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the object does not exist.
    fn download(&self, path: &BlobPath) -> Result<Vec<u8>, StoreError>;

    /// Returns `true` if an object exists at `path`.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    fn exists(&self, path: &BlobPath) -> Result<bool, StoreError>;

    /// Copies the object at `from` to `to`, keeping its content type.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `from` does not exist.
    fn copy(&self, from: &BlobPath, to: &BlobPath) -> Result<(), StoreError>;

    /// Deletes the object at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the object does not exist.
    fn delete(&self, path: &BlobPath) -> Result<(), StoreError>;
}
