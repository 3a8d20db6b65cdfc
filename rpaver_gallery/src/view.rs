// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rpaver_navigator::{GroupedSelectionNavigator, Step};
use rpaver_render_queue::RenderScheduler;

use crate::GalleryFolder;

/// Result of [`GalleryView::open_image`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OpenOutcome {
    /// The viewer now shows the requested image.
    Opened,
    /// Some images of the active folder are not admitted yet; the viewer stays
    /// as it was.
    StillRendering,
    /// No folder is active or the index is out of range.
    Invalid,
}

/// State of one gallery screen: its folders, render admission for the active
/// folder, and the image viewer.
///
/// Exactly one folder is active at a time. Its images are admitted for
/// rendering outside-in, one per settled load, and the viewer can only be
/// opened once all of them are admitted.
#[derive(Clone, Debug)]
pub struct GalleryView {
    folders: Vec<GalleryFolder>,
    navigator: GroupedSelectionNavigator<String>,
    scheduler: RenderScheduler,
    active: Option<usize>,
}

impl GalleryView {
    /// Creates a view over `folders` with the first folder active.
    #[must_use]
    pub fn new(folders: Vec<GalleryFolder>) -> Self {
        let navigator = GroupedSelectionNavigator::new(groups_of(&folders));
        let mut view = Self {
            folders,
            navigator,
            scheduler: RenderScheduler::new(0),
            active: None,
        };
        view.select_folder(0);
        view
    }

    /// Creates a view over a single folder.
    #[must_use]
    pub fn single(folder: GalleryFolder) -> Self {
        Self::new(vec![folder])
    }

    /// Returns every folder of the view.
    #[must_use]
    pub fn folders(&self) -> &[GalleryFolder] {
        &self.folders
    }

    /// Index of the active folder, if any.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The active folder, if any.
    #[must_use]
    pub fn active_folder(&self) -> Option<&GalleryFolder> {
        self.folders.get(self.active?)
    }

    /// Makes folder `index` active and restarts render admission for it.
    ///
    /// An open viewer is closed. Returns `false`, changing nothing, if `index`
    /// is out of range.
    pub fn select_folder(&mut self, index: usize) -> bool {
        let Some(folder) = self.folders.get(index) else {
            return false;
        };
        self.active = Some(index);
        self.scheduler.initialize(folder.images.len());
        self.navigator.close();
        rpaver_store::debug!(
            folder = folder.name.as_str(),
            images = folder.images.len(),
            "gallery folder selected"
        );
        true
    }

    /// Replaces the folders, for example after a refetch.
    ///
    /// The active folder is kept by name when it still exists; otherwise the
    /// first folder becomes active. Render admission restarts either way, so
    /// the viewer is closed until the folder is fully admitted again.
    pub fn set_folders(&mut self, folders: Vec<GalleryFolder>) {
        let keep = self
            .active_folder()
            .and_then(|old| folders.iter().position(|folder| folder.name == old.name));
        self.navigator.set_groups(groups_of(&folders));
        self.folders = folders;
        let index = keep.unwrap_or(0);
        match self.folders.get(index) {
            Some(folder) => {
                self.active = Some(index);
                self.scheduler.initialize(folder.images.len());
            }
            None => {
                self.active = None;
                self.scheduler.initialize(0);
            }
        }
        self.navigator.close();
    }

    /// Returns `true` if image `index` of the active folder should be rendered.
    #[must_use]
    pub fn should_render(&self, index: usize) -> bool {
        self.scheduler.is_admitted(index)
    }

    /// Reports that image `index` of the active folder finished loading.
    ///
    /// Returns the index admitted in response, if any. Indices outside the
    /// active folder are ignored.
    pub fn on_image_load(&mut self, index: usize) -> Option<usize> {
        self.scheduler.on_load(index)
    }

    /// Reports that image `index` of the active folder failed to load.
    ///
    /// Failures advance admission exactly like loads.
    pub fn on_image_error(&mut self, index: usize) -> Option<usize> {
        rpaver_store::warn!(index, "gallery image failed to load");
        self.scheduler.on_error(index)
    }

    /// Admission progress of the active folder, in `0.0..=100.0`.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.scheduler.progress_fraction() * 100.0
    }

    /// Returns `true` once every image of a non-empty active folder is admitted.
    #[must_use]
    pub fn is_fully_rendered(&self) -> bool {
        self.scheduler.is_complete()
    }

    /// Opens the viewer on image `index` of the active folder.
    pub fn open_image(&mut self, index: usize) -> OpenOutcome {
        let Some(group) = self.active else {
            return OpenOutcome::Invalid;
        };
        if index >= self.scheduler.total() {
            return OpenOutcome::Invalid;
        }
        if !self.scheduler.is_complete() {
            return OpenOutcome::StillRendering;
        }
        if self.navigator.open(group, index) {
            OpenOutcome::Opened
        } else {
            OpenOutcome::Invalid
        }
    }

    /// Shows the following image, wrapping within the folder.
    pub fn next(&mut self) {
        self.navigator.next();
    }

    /// Shows the preceding image, wrapping within the folder.
    pub fn prev(&mut self) {
        self.navigator.prev();
    }

    /// Steps the viewer in `step`'s direction.
    pub fn step(&mut self, step: Step) {
        self.navigator.step(step);
    }

    /// Closes the viewer.
    pub fn close(&mut self) {
        self.navigator.close();
    }

    /// Returns `true` while the viewer is open.
    #[must_use]
    pub fn is_viewer_open(&self) -> bool {
        self.navigator.is_open()
    }

    /// URL of the image shown in the viewer.
    #[must_use]
    pub fn current_image(&self) -> Option<&str> {
        self.navigator.selected_item().map(String::as_str)
    }

    /// Viewer caption such as `"3 / 12"`.
    #[must_use]
    pub fn caption(&self) -> Option<String> {
        self.navigator
            .position()
            .map(|(position, len)| format!("{position} / {len}"))
    }
}

fn groups_of(folders: &[GalleryFolder]) -> Vec<Vec<String>> {
    folders.iter().map(|folder| folder.images.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::{GalleryView, OpenOutcome};
    use crate::GalleryFolder;

    fn folder(name: &str, len: usize) -> GalleryFolder {
        GalleryFolder::new(
            name,
            (0..len).map(|i| format!("https://img/{name}/{i}.png")).collect(),
        )
    }

    fn settle_all(view: &mut GalleryView) {
        while view.on_image_load(0).is_some() {}
    }

    #[test]
    fn admission_runs_outside_in() {
        let mut view = GalleryView::single(folder("Alice", 5));
        assert!(view.should_render(0));
        assert!(!view.should_render(4));
        assert_eq!(view.on_image_load(0), Some(4));
        assert_eq!(view.on_image_error(4), Some(1));
        assert_eq!(view.progress_percent(), 60.0);
        assert_eq!(view.on_image_load(1), Some(3));
        assert_eq!(view.on_image_load(3), Some(2));
        assert_eq!(view.on_image_load(2), None);
        assert!(view.is_fully_rendered());
        assert_eq!(view.progress_percent(), 100.0);
    }

    #[test]
    fn viewer_waits_for_full_admission() {
        let mut view = GalleryView::single(folder("Alice", 3));
        assert_eq!(view.open_image(1), OpenOutcome::StillRendering);
        assert!(!view.is_viewer_open());

        settle_all(&mut view);
        assert_eq!(view.open_image(1), OpenOutcome::Opened);
        assert_eq!(view.current_image(), Some("https://img/Alice/1.png"));
        assert_eq!(view.caption().as_deref(), Some("2 / 3"));

        view.next();
        view.next();
        assert_eq!(view.caption().as_deref(), Some("1 / 3"));
        view.prev();
        assert_eq!(view.current_image(), Some("https://img/Alice/2.png"));

        view.close();
        assert_eq!(view.current_image(), None);
        assert_eq!(view.caption(), None);
    }

    #[test]
    fn out_of_range_requests_are_ignored() {
        let mut view = GalleryView::single(folder("Alice", 2));
        assert_eq!(view.on_image_load(7), None);
        assert_eq!(view.progress_percent(), 50.0);
        settle_all(&mut view);
        assert_eq!(view.open_image(2), OpenOutcome::Invalid);
    }

    #[test]
    fn empty_views_never_open() {
        let mut empty = GalleryView::new(Vec::new());
        assert_eq!(empty.active_folder(), None);
        assert_eq!(empty.open_image(0), OpenOutcome::Invalid);
        assert_eq!(empty.progress_percent(), 0.0);

        let mut blank = GalleryView::single(folder("Nobody", 0));
        assert!(!blank.is_fully_rendered());
        assert_eq!(blank.on_image_load(0), None);
        assert_eq!(blank.open_image(0), OpenOutcome::Invalid);
    }

    #[test]
    fn selecting_a_folder_restarts_admission_and_closes_the_viewer() {
        let mut view = GalleryView::new(vec![folder("Alice", 2), folder("Bob", 4)]);
        settle_all(&mut view);
        assert_eq!(view.open_image(0), OpenOutcome::Opened);

        assert!(view.select_folder(1));
        assert!(!view.is_viewer_open());
        assert_eq!(view.active_folder().map(|f| f.name.as_str()), Some("Bob"));
        assert_eq!(view.progress_percent(), 25.0);

        settle_all(&mut view);
        assert_eq!(view.open_image(3), OpenOutcome::Opened);
        assert_eq!(view.current_image(), Some("https://img/Bob/3.png"));
        view.next();
        assert_eq!(view.current_image(), Some("https://img/Bob/0.png"));

        assert!(!view.select_folder(2));
        assert_eq!(view.active_index(), Some(1));
    }

    #[test]
    fn refetch_keeps_the_active_folder_by_name() {
        let mut view = GalleryView::new(vec![folder("Alice", 2), folder("Bob", 3)]);
        view.select_folder(1);
        settle_all(&mut view);
        assert_eq!(view.open_image(2), OpenOutcome::Opened);

        view.set_folders(vec![folder("Aaron", 1), folder("Alice", 2), folder("Bob", 3)]);
        assert_eq!(view.active_index(), Some(2));
        assert!(view.progress_percent() > 0.0, "admission restarted");
        assert!(!view.is_viewer_open());

        view.set_folders(vec![folder("Carol", 1)]);
        assert_eq!(view.active_folder().map(|f| f.name.as_str()), Some("Carol"));

        view.set_folders(Vec::new());
        assert_eq!(view.active_index(), None);
        assert!(!view.should_render(0));
    }

    #[test]
    fn refetch_of_the_same_folder_closes_the_viewer_until_admitted() {
        let mut view = GalleryView::single(folder("Alice", 3));
        settle_all(&mut view);
        assert_eq!(view.open_image(1), OpenOutcome::Opened);

        view.set_folders(vec![folder("Alice", 3)]);
        assert!(!view.is_viewer_open());
        assert!(!view.is_fully_rendered());
        assert_eq!(view.open_image(1), OpenOutcome::StillRendering);

        settle_all(&mut view);
        assert_eq!(view.open_image(1), OpenOutcome::Opened);
    }
}
