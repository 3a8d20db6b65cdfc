// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rpaver_store::{Clients, Document, DocumentStore, StoreError};
use serde::{Deserialize, Serialize};

use crate::{CHARACTER_IMAGES, GalleryFolder, GalleryView, fetch_images, format_character_name};

/// Collection of full character profiles.
pub const CHARACTER_DETAIL: &str = "character_detail";

/// Collection of character list entries, keyed like [`CHARACTER_DETAIL`].
pub const CHARACTER: &str = "character";

/// The profile fields a gallery needs. Other stored fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterDetail {
    /// Given name.
    pub name: String,
    /// Family name, possibly blank.
    pub family: Option<String>,
}

impl CharacterDetail {
    /// Name of the character's image folder below [`CHARACTER_IMAGES`].
    #[must_use]
    pub fn folder_name(&self) -> String {
        format_character_name(&self.name, self.family.as_deref())
    }
}

/// The image slider of a character's detail page.
#[derive(Clone, Debug)]
pub struct CharacterGallery {
    id: String,
    detail: CharacterDetail,
    view: GalleryView,
}

impl CharacterGallery {
    /// Loads character `id` and the images of its folder.
    ///
    /// A failing image listing yields an empty gallery, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the profile does not exist,
    /// [`StoreError::Decode`] if it is malformed, or a backend error.
    pub fn load(clients: &Clients, id: &str) -> Result<Self, StoreError> {
        let document = clients
            .documents
            .get(CHARACTER_DETAIL, id)?
            .ok_or_else(|| StoreError::NotFound(format!("{CHARACTER_DETAIL}/{id}")))?;
        let detail: CharacterDetail = document.decode()?;
        let folder = detail.folder_name();
        let images = if folder.is_empty() {
            rpaver_store::warn!(id, "character has no name; skipping image lookup");
            Vec::new()
        } else {
            fetch_images(clients.blobs.as_ref(), &format!("{CHARACTER_IMAGES}/{folder}/"))
        };
        rpaver_store::info!(
            id,
            folder = folder.as_str(),
            images = images.len(),
            "character gallery loaded"
        );
        Ok(Self {
            id: document.id,
            detail,
            view: GalleryView::single(GalleryFolder::new(folder, images)),
        })
    }

    /// Character id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Loaded profile fields.
    #[must_use]
    pub fn detail(&self) -> &CharacterDetail {
        &self.detail
    }

    /// Name of the image folder the gallery was loaded from.
    #[must_use]
    pub fn folder(&self) -> &str {
        self.view
            .active_folder()
            .map_or("", |folder| folder.name.as_str())
    }

    /// The slider state.
    #[must_use]
    pub fn view(&self) -> &GalleryView {
        &self.view
    }

    /// The slider state, for forwarding load events and viewer input.
    pub fn view_mut(&mut self) -> &mut GalleryView {
        &mut self.view
    }

    /// Deletes the character's list entry and profile. Images are kept.
    ///
    /// # Errors
    ///
    /// Returns the first backend error.
    pub fn delete(self, documents: &dyn DocumentStore) -> Result<(), StoreError> {
        documents.delete(CHARACTER, &self.id)?;
        documents.delete(CHARACTER_DETAIL, &self.id)?;
        rpaver_store::info!(id = self.id.as_str(), "character deleted");
        Ok(())
    }
}

/// Finds the id of the character whose image folder is `folder`.
///
/// `characters` are profile documents; names are compared in their
/// [`format_character_name`] form.
#[must_use]
pub fn character_for_folder<'a>(characters: &'a [Document], folder: &str) -> Option<&'a str> {
    characters
        .iter()
        .find(|doc| {
            let name = doc.get_str("name").unwrap_or_default();
            format_character_name(name, doc.get_str("family")) == folder
        })
        .map(|doc| doc.id.as_str())
}

#[cfg(test)]
mod tests {
    use rpaver_store::{
        BlobPath, BlobStore, Clients, DocumentStore, Fields, Query, StoreConfig, StoreError,
    };
    use serde_json::json;

    use super::{CHARACTER, CHARACTER_DETAIL, CharacterGallery, character_for_folder};
    use crate::OpenOutcome;

    fn clients() -> Clients {
        let clients = Clients::in_memory(&StoreConfig::default());
        let characters = [("c1", " Alice", "Liddell "), ("c2", "Bob", ""), ("c3", "", "")];
        for (id, name, family) in characters {
            clients
                .documents
                .set(
                    CHARACTER_DETAIL,
                    id,
                    Fields::new()
                        .with("name", json!(name))
                        .with("family", json!(family))
                        .with("age", json!(17)),
                )
                .unwrap();
            clients
                .documents
                .set(CHARACTER, id, Fields::new().with("name", json!(name)))
                .unwrap();
        }
        for raw in [
            "charactersIMG/Alice Liddell/01.png",
            "charactersIMG/Alice Liddell/02.png",
            "charactersIMG/Alice Liddell/03.png",
            "charactersIMG/Bob/01.png",
            "charactersIMG/loose.png",
        ] {
            clients
                .blobs
                .upload(&BlobPath::parse(raw).unwrap(), b"img", "image/png")
                .unwrap();
        }
        clients
    }

    #[test]
    fn load_lists_the_character_folder() {
        let clients = clients();
        let mut gallery = CharacterGallery::load(&clients, "c1").unwrap();
        assert_eq!(gallery.id(), "c1");
        assert_eq!(gallery.folder(), "Alice Liddell");
        assert_eq!(gallery.detail().family.as_deref(), Some("Liddell "));

        let view = gallery.view_mut();
        assert_eq!(view.open_image(0), OpenOutcome::StillRendering);
        while view.on_image_load(0).is_some() {}
        assert_eq!(view.open_image(2), OpenOutcome::Opened);
        assert_eq!(view.caption().as_deref(), Some("3 / 3"));
    }

    #[test]
    fn blank_family_uses_the_given_name() {
        let clients = clients();
        let gallery = CharacterGallery::load(&clients, "c2").unwrap();
        assert_eq!(gallery.folder(), "Bob");
        assert_eq!(gallery.view().folders()[0].images.len(), 1);
    }

    #[test]
    fn nameless_character_has_no_images() {
        let clients = clients();
        let gallery = CharacterGallery::load(&clients, "c3").unwrap();
        assert!(gallery.view().folders()[0].images.is_empty());
    }

    #[test]
    fn missing_character_is_not_found() {
        let clients = clients();
        assert_eq!(
            CharacterGallery::load(&clients, "nobody").unwrap_err(),
            StoreError::NotFound("character_detail/nobody".into())
        );
    }

    #[test]
    fn delete_removes_both_documents() {
        let clients = clients();
        let gallery = CharacterGallery::load(&clients, "c2").unwrap();
        gallery.delete(clients.documents.as_ref()).unwrap();
        assert!(clients.documents.get(CHARACTER, "c2").unwrap().is_none());
        assert!(clients.documents.get(CHARACTER_DETAIL, "c2").unwrap().is_none());
        let image = BlobPath::parse("charactersIMG/Bob/01.png").unwrap();
        assert!(clients.blobs.exists(&image).unwrap());
    }

    #[test]
    fn folders_resolve_to_character_ids() {
        let clients = clients();
        let characters = clients
            .documents
            .query(&Query::collection(CHARACTER_DETAIL))
            .unwrap();
        assert_eq!(character_for_folder(&characters, "Alice Liddell"), Some("c1"));
        assert_eq!(character_for_folder(&characters, "Bob"), Some("c2"));
        assert_eq!(character_for_folder(&characters, "Carol"), None);
    }
}
