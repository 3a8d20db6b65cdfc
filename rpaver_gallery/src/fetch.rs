// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rpaver_store::{BlobStore, StoreError};
use serde::Serialize;

/// Storage folder holding one sub-folder of images per character.
pub const CHARACTER_IMAGES: &str = "charactersIMG";

/// One storage folder and the download URLs of the images directly inside it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GalleryFolder {
    /// Folder name, without parents or trailing slash.
    pub name: String,
    /// Download URLs, in object-path order.
    pub images: Vec<String>,
}

impl GalleryFolder {
    /// Creates a folder entry.
    pub fn new(name: impl Into<String>, images: Vec<String>) -> Self {
        Self {
            name: name.into(),
            images,
        }
    }
}

/// Returns the download URLs of the objects directly inside `folder`.
///
/// Sub-folders are not descended into. A failing listing or URL lookup is
/// logged and yields an empty list, so a broken folder renders as empty
/// instead of failing the whole screen.
pub fn fetch_images(blobs: &dyn BlobStore, folder: &str) -> Vec<String> {
    try_fetch_images(blobs, folder).unwrap_or_else(|err| {
        rpaver_store::error!(folder, error = %err, "failed to load images");
        Vec::new()
    })
}

/// Returns the names of the folders directly below `base`.
///
/// Failures are logged and yield an empty list.
pub fn fetch_folders(blobs: &dyn BlobStore, base: &str) -> Vec<String> {
    match blobs.list(base) {
        Ok(listing) => listing
            .prefixes
            .iter()
            .map(|prefix| prefix.name().to_owned())
            .collect(),
        Err(err) => {
            rpaver_store::error!(base, error = %err, "failed to list folders");
            Vec::new()
        }
    }
}

/// Returns every folder directly below `base` together with its images.
///
/// Failures are logged and yield an empty list.
pub fn fetch_gallery(blobs: &dyn BlobStore, base: &str) -> Vec<GalleryFolder> {
    try_fetch_gallery(blobs, base).unwrap_or_else(|err| {
        rpaver_store::error!(base, error = %err, "failed to load gallery");
        Vec::new()
    })
}

fn try_fetch_images(blobs: &dyn BlobStore, folder: &str) -> Result<Vec<String>, StoreError> {
    blobs
        .list(folder)?
        .items
        .iter()
        .map(|path| blobs.download_url(path))
        .collect()
}

fn try_fetch_gallery(blobs: &dyn BlobStore, base: &str) -> Result<Vec<GalleryFolder>, StoreError> {
    let listing = blobs.list(base)?;
    listing
        .prefixes
        .iter()
        .map(|prefix| -> Result<_, StoreError> {
            Ok(GalleryFolder::new(
                prefix.name(),
                try_fetch_images(blobs, prefix.as_str())?,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rpaver_store::memory::MemoryBlobStore;
    use rpaver_store::{BlobPath, BlobStore};

    use super::{GalleryFolder, fetch_folders, fetch_gallery, fetch_images};

    fn seeded() -> MemoryBlobStore {
        let store = MemoryBlobStore::default();
        for raw in [
            "charactersIMG/Alice/01.png",
            "charactersIMG/Alice/02.png",
            "charactersIMG/Alice/sketches/03.png",
            "charactersIMG/Bob/01.png",
            "stock/tree.png",
        ] {
            store
                .upload(&BlobPath::parse(raw).unwrap(), b"img", "image/png")
                .unwrap();
        }
        store
    }

    #[test]
    fn images_are_one_level_deep() {
        let store = seeded();
        let urls = fetch_images(&store, "charactersIMG/Alice/");
        assert_eq!(urls.len(), 2);
        assert!(urls[0].ends_with("charactersIMG%2FAlice%2F01.png?alt=media"));
        assert!(urls[1].ends_with("charactersIMG%2FAlice%2F02.png?alt=media"));
    }

    #[test]
    fn folders_are_listed_by_name() {
        let store = seeded();
        assert_eq!(fetch_folders(&store, "/charactersIMG"), ["Alice", "Bob"]);
        assert!(fetch_folders(&store, "nothing/").is_empty());
    }

    #[test]
    fn gallery_pairs_folders_with_images() {
        let store = seeded();
        let gallery = fetch_gallery(&store, "charactersIMG/");
        let names: Vec<_> = gallery.iter().map(|folder| folder.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob"]);
        assert_eq!(gallery[0].images.len(), 2);
        assert_eq!(gallery[1].images.len(), 1);
    }

    #[test]
    fn malformed_prefixes_yield_empty_results() {
        let store = seeded();
        assert!(fetch_images(&store, "a/../b").is_empty());
        assert!(fetch_folders(&store, "a//b").is_empty());
        assert_eq!(fetch_gallery(&store, "a/../b"), Vec::<GalleryFolder>::new());
    }
}
