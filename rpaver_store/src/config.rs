// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Connection settings shared by the document and blob clients.
///
/// Field names follow the web app's configuration object, so an existing
/// `{"projectId": …, "storageBucket": …}` blob deserialises directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Project that owns the document database.
    pub project_id: String,
    /// Object-store bucket holding gallery images.
    #[serde(alias = "bucket")]
    pub storage_bucket: String,
    /// Base of generated download URLs, without a trailing slash.
    pub url_base: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: "rp-encyclopedia".to_owned(),
            storage_bucket: "rp-encyclopedia.appspot.com".to_owned(),
            url_base: "https://firebasestorage.googleapis.com/v0/b".to_owned(),
        }
    }
}

impl StoreConfig {
    /// Parses and validates a JSON configuration object.
    ///
    /// Missing fields take their [`Default`] values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] if the JSON is malformed or the
    /// resulting configuration fails [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| StoreError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can address a bucket.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] for an empty bucket or URL base.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.storage_bucket.trim().is_empty() {
            return Err(StoreError::InvalidConfig("storage bucket is empty".into()));
        }
        if self.url_base.trim().is_empty() {
            return Err(StoreError::InvalidConfig("url base is empty".into()));
        }
        Ok(())
    }
}
