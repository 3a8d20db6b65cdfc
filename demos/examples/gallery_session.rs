// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A gallery session against the in-memory backends.
//!
//! This example:
//! - bootstraps the process-wide clients from a JSON config,
//! - seeds a character profile and its image folder,
//! - loads the character slider, settles its images outside-in and steps the viewer,
//! - watches the profile live and reformats its timestamp on every change,
//! - moves the folder and shows the library view over the new layout.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p rpaver_demos --example gallery_session`

use rpaver_gallery::{
    CHARACTER_DETAIL, CHARACTER_IMAGES, CharacterGallery, GalleryView, OpenOutcome, Step,
    character_for_folder, fetch_gallery, format_timestamp_value,
};
use rpaver_store::bootstrap::init_clients;
use rpaver_store::{
    BlobPath, BlobStore, Clients, DocumentStore, Fields, Query, Snapshot, StoreConfig, StoreError,
    Watch, download_album, transfer,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), StoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config =
        StoreConfig::from_json(r#"{"projectId": "demo", "storageBucket": "demo.appspot.com"}"#)?;
    let clients = init_clients(|| Clients::in_memory(&config));

    clients.documents.set(
        CHARACTER_DETAIL,
        "alice",
        Fields::new()
            .with("name", json!("Alice"))
            .with("family", json!("Liddell"))
            .with_server_timestamp("createdAt"),
    )?;
    for i in 1..=5 {
        let path = BlobPath::parse(&format!("{CHARACTER_IMAGES}/Alice Liddell/{i:02}.png"))?;
        clients.blobs.upload(&path, b"png", "image/png")?;
    }

    // Live profile: every write re-renders the creation date.
    let watch = clients.documents.subscribe(
        Watch::document(CHARACTER_DETAIL, "alice"),
        Box::new(|snapshot: &Snapshot| {
            if let Snapshot::Document(Some(doc)) = snapshot {
                println!(
                    "profile {} created {}",
                    doc.id,
                    format_timestamp_value(doc.get("createdAt"))
                );
            }
        }),
    )?;

    let mut gallery = CharacterGallery::load(clients, "alice")?;
    let view = gallery.view_mut();
    println!("folder {:?}: {} images", gallery_folder(view), view.folders()[0].images.len());
    if view.open_image(0) == OpenOutcome::StillRendering {
        println!("viewer refused: still rendering ({:.0}%)", view.progress_percent());
    }
    let mut settled = 0;
    while let Some(index) = view.on_image_load(settled) {
        println!("admitted image {index} ({:.0}%)", view.progress_percent());
        settled = index;
    }
    assert_eq!(view.open_image(4), OpenOutcome::Opened, "every image is admitted");
    view.step(Step::Next);
    println!("viewer {} -> {:?}", view.caption().unwrap_or_default(), view.current_image());
    view.close();

    clients
        .documents
        .update(CHARACTER_DETAIL, "alice", Fields::new().with("title", json!("Wanderer")))?;
    drop(watch);

    let report = transfer::move_folder(
        clients.blobs.as_ref(),
        &format!("{CHARACTER_IMAGES}/Alice Liddell"),
        &format!("{CHARACTER_IMAGES}/Alice Liddell (old)"),
    )?;
    println!("moved {} images", report.transferred.len());
    let album = download_album(
        clients.blobs.as_ref(),
        &format!("{CHARACTER_IMAGES}/Alice Liddell (old)"),
    )?;
    println!("album archive: {} bytes", album.len());

    let library = GalleryView::new(fetch_gallery(clients.blobs.as_ref(), CHARACTER_IMAGES));
    let characters = clients.documents.query(&Query::collection(CHARACTER_DETAIL))?;
    for folder in library.folders() {
        let owner = character_for_folder(&characters, &folder.name).unwrap_or("unknown");
        println!(
            "library folder {:?} ({} images) -> character {owner}",
            folder.name,
            folder.images.len()
        );
    }
    Ok(())
}

fn gallery_folder(view: &GalleryView) -> &str {
    view.active_folder().map_or("", |folder| folder.name.as_str())
}
