// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RPAVER Gallery: the state behind RPAVER's image screens.
//!
//! A gallery screen lists storage folders, renders each folder's images a few
//! at a time and opens a full-screen viewer on click. This crate composes the
//! pieces that do this:
//!
//! - [`fetch_images`], [`fetch_folders`] and [`fetch_gallery`] read folder
//!   listings from a [`BlobStore`](rpaver_store::BlobStore) into
//!   [`GalleryFolder`]s.
//! - [`GalleryView`] owns the folders, a
//!   [`RenderScheduler`](rpaver_render_queue::RenderScheduler) for the active
//!   folder and a
//!   [`GroupedSelectionNavigator`](rpaver_navigator::GroupedSelectionNavigator)
//!   for the viewer.
//! - [`CharacterGallery`] loads a character profile and its image folder.
//! - [`format_character_name`] and [`format_created_at`] produce the strings
//!   the screens display.
//!
//! Views never reach for global clients; callers pass
//! [`Clients`](rpaver_store::Clients) or a store reference explicitly.
//!
//! ## Minimal example
//!
//! ```rust
//! use rpaver_gallery::{GalleryFolder, GalleryView, OpenOutcome};
//!
//! let urls = (0..4).map(|i| format!("https://img/{i}.png")).collect();
//! let mut view = GalleryView::single(GalleryFolder::new("Alice", urls));
//!
//! // Only the first image renders until it settles.
//! assert!(view.should_render(0) && !view.should_render(3));
//! assert_eq!(view.open_image(0), OpenOutcome::StillRendering);
//!
//! // Each settled image admits the next one, outside-in: 3, 1, 2.
//! assert_eq!(view.on_image_load(0), Some(3));
//! assert_eq!(view.on_image_error(3), Some(1));
//! assert_eq!(view.on_image_load(1), Some(2));
//! assert_eq!(view.on_image_load(2), None);
//!
//! assert_eq!(view.open_image(3), OpenOutcome::Opened);
//! view.next();
//! assert_eq!(view.current_image(), Some("https://img/0.png"));
//! assert_eq!(view.caption().as_deref(), Some("1 / 4"));
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit structured logs through `tracing` (forwards to
//!   `rpaver_store/tracing`).

mod character;
mod fetch;
mod names;
mod time;
mod view;

pub use character::{
    CHARACTER, CHARACTER_DETAIL, CharacterDetail, CharacterGallery, character_for_folder,
};
pub use fetch::{CHARACTER_IMAGES, GalleryFolder, fetch_folders, fetch_gallery, fetch_images};
pub use names::format_character_name;
pub use rpaver_navigator::Step;
pub use time::{NO_DATE, format_created_at, format_timestamp_value};
pub use view::{GalleryView, OpenOutcome};
