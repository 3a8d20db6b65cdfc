// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Store errors.

use std::fmt;

/// Errors returned by document stores, blob stores and transfers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The addressed document, object or folder does not exist.
    NotFound(String),
    /// An object path was empty or contained a `..` segment.
    InvalidPath(String),
    /// A request was malformed (for example an empty transfer list).
    InvalidRequest(String),
    /// Client configuration could not be parsed or failed validation.
    InvalidConfig(String),
    /// A stored document could not be decoded into the requested type.
    Decode(String),
    /// An album archive could not be written.
    Archive(String),
    /// The backend reported a failure.
    Backend(String),
    /// A backend lock was poisoned by a panicking writer.
    Poisoned,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::InvalidPath(path) => write!(f, "invalid object path: {path:?}"),
            Self::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            Self::InvalidConfig(msg) => write!(f, "invalid store configuration: {msg}"),
            Self::Decode(msg) => write!(f, "document decode failed: {msg}"),
            Self::Archive(msg) => write!(f, "album archive failed: {msg}"),
            Self::Backend(msg) => write!(f, "backend failure: {msg}"),
            Self::Poisoned => write!(f, "store lock poisoned"),
        }
    }
}

impl std::error::Error for StoreError {}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

impl From<zip::result::ZipError> for StoreError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::StoreError;

    #[test]
    fn display_names_the_failure() {
        assert_eq!(
            StoreError::NotFound("character/alice".into()).to_string(),
            "not found: character/alice"
        );
        assert_eq!(
            StoreError::InvalidPath("a/../b".into()).to_string(),
            "invalid object path: \"a/../b\""
        );
        assert_eq!(StoreError::Poisoned.to_string(), "store lock poisoned");
        let archive = StoreError::from(zip::result::ZipError::FileNotFound);
        assert!(matches!(archive, StoreError::Archive(_)));
        assert!(archive.to_string().starts_with("album archive failed: "));
    }
}
