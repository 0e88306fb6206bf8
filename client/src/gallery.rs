//! Progressive gallery rendering.
//!
//! A gallery starts `Idle`, loads its folder listing, then shows the first
//! `step` images. Each activation of the expansion control reveals another
//! `step` images until everything is shown, after which the control turns
//! into "Show Less" and collapses back to the first `step`.
//!
//! Every change re-renders the whole visible slice `[0, shown_count)`, so
//! what is on screen is always a pure function of `urls` and `shown_count`.

use std::time::Instant;

use thiserror::Error;

use crate::lightbox::{Lightbox, LightboxSelection, SelectionError};
use crate::render::Renderer;
use crate::ListingSource;

pub const DEFAULT_STEP: usize = 12;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("gallery '{folder}': {source}")]
    StaleSelection {
        folder: String,
        source: SelectionError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    /// Listing failed; carries the diagnostic message
    Error(String),
}

/// State of the expansion control below a gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Hidden,
    /// Disabled while the listing is in flight
    Loading,
    ShowMore,
    ShowLess,
    Retry,
}

impl Control {
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Hidden => None,
            Self::Loading => Some("Loading…"),
            Self::ShowMore => Some("Show More"),
            Self::ShowLess => Some("Show Less"),
            Self::Retry => Some("Retry"),
        }
    }
}

/// What an activation of the control did to a loaded gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Expanded,
    Collapsed,
}

#[derive(Debug, Clone)]
pub struct GalleryState {
    folder: String,
    step: usize,
    urls: Vec<String>,
    shown_count: usize,
    phase: Phase,
}

impl GalleryState {
    /// A missing or zero `step` falls back to [`DEFAULT_STEP`].
    #[must_use]
    pub fn new(folder: impl Into<String>, step: Option<usize>) -> Self {
        Self {
            folder: folder.into(),
            step: step.filter(|s| *s > 0).unwrap_or(DEFAULT_STEP),
            urls: Vec::new(),
            shown_count: 0,
            phase: Phase::Idle,
        }
    }

    /// Enters `Loading` from `Idle` or `Error`. Returns `false` when a load
    /// is already in flight or the listing is already loaded.
    pub fn begin_load(&mut self) -> bool {
        match self.phase {
            Phase::Idle | Phase::Error(_) => {
                self.phase = Phase::Loading;
                true
            }
            Phase::Loading | Phase::Loaded => false,
        }
    }

    pub fn finish_load(&mut self, result: Result<Vec<String>, String>) {
        match result {
            Ok(urls) => {
                self.shown_count = self.step.min(urls.len());
                self.urls = urls;
                self.phase = Phase::Loaded;
            }
            Err(message) => {
                self.phase = Phase::Error(message);
            }
        }
    }

    /// Reveals the next `step` images, or collapses once all are shown.
    /// Does nothing unless the gallery is loaded and larger than one step.
    pub fn advance(&mut self) -> Option<Advance> {
        if self.phase != Phase::Loaded || !self.expandable() {
            return None;
        }
        if self.shown_count < self.urls.len() {
            self.shown_count = (self.shown_count + self.step).min(self.urls.len());
            Some(Advance::Expanded)
        } else {
            self.shown_count = self.step.min(self.urls.len());
            Some(Advance::Collapsed)
        }
    }

    #[must_use]
    pub fn control(&self) -> Control {
        match self.phase {
            Phase::Idle => Control::Hidden,
            Phase::Loading => Control::Loading,
            Phase::Error(_) => Control::Retry,
            Phase::Loaded if !self.expandable() => Control::Hidden,
            Phase::Loaded if self.shown_count < self.urls.len() => Control::ShowMore,
            Phase::Loaded => Control::ShowLess,
        }
    }

    /// The rendered slice.
    #[must_use]
    pub fn visible(&self) -> &[String] {
        &self.urls[..self.shown_count]
    }

    #[must_use]
    pub fn folder(&self) -> &str {
        &self.folder
    }

    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    #[must_use]
    pub fn shown_count(&self) -> usize {
        self.shown_count
    }

    #[must_use]
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    fn expandable(&self) -> bool {
        self.urls.len() > self.step
    }
}

/// Drives one gallery: owns its state, its listing source and its renderer.
pub struct GalleryController<S, R> {
    state: GalleryState,
    source: S,
    renderer: R,
}

impl<S: ListingSource, R: Renderer> GalleryController<S, R> {
    pub fn new(state: GalleryState, source: S, renderer: R) -> Self {
        Self {
            state,
            source,
            renderer,
        }
    }

    /// Loads the listing for the first time.
    pub async fn mount(&mut self) {
        self.load().await;
    }

    /// Handles a click on the expansion control.
    pub async fn activate(&mut self) {
        match self.state.phase().clone() {
            // Only reachable after a load future was dropped before finishing.
            Phase::Loading => {
                tracing::debug!("gallery '{}' is loading, activation ignored", self.state.folder());
            }
            Phase::Idle | Phase::Error(_) => self.load().await,
            Phase::Loaded => {
                if let Some(advance) = self.state.advance() {
                    self.render();
                    if advance == Advance::Collapsed {
                        self.renderer.scroll_into_view();
                    }
                }
            }
        }
    }

    /// Captures the rendered images and opens the shared lightbox at `index`.
    /// A selection that no longer matches the rendered slice is logged and ignored.
    pub fn open_in(&self, index: usize, lightbox: &mut Lightbox) {
        match self.select(index) {
            Ok(selection) => lightbox.open(selection),
            Err(e) => tracing::warn!("{e}"),
        }
    }

    pub fn select(&self, index: usize) -> Result<LightboxSelection, RenderError> {
        LightboxSelection::new(self.state.visible().to_vec(), index).map_err(|source| {
            RenderError::StaleSelection {
                folder: self.state.folder().to_owned(),
                source,
            }
        })
    }

    #[must_use]
    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    async fn load(&mut self) {
        if self.state.folder().trim().is_empty() {
            tracing::warn!("gallery without a folder skipped");
            self.renderer.set_control(self.state.control());
            return;
        }
        if !self.state.begin_load() {
            return;
        }
        self.renderer.set_control(self.state.control());

        let start = Instant::now();
        let result = self
            .source
            .fetch(self.state.folder())
            .await
            .map_err(|e| e.to_string());
        match &result {
            Ok(urls) => tracing::info!(
                "loaded {} images for '{}' in {:?}",
                urls.len(),
                self.state.folder(),
                start.elapsed()
            ),
            Err(e) => tracing::error!("listing of '{}' failed. Error: {e}", self.state.folder()),
        }

        let failed = result.is_err();
        self.state.finish_load(result);
        if failed {
            self.renderer.set_control(self.state.control());
        } else {
            self.render();
        }
    }

    fn render(&mut self) {
        self.renderer.render(self.state.folder(), self.state.visible());
        self.renderer.set_control(self.state.control());
    }
}
