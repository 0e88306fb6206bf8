//! Modal image viewer shared by every gallery on a page.
//!
//! A [`LightboxSelection`] is captured from the images a gallery currently
//! shows and handed to [`Lightbox::open`], which takes it over entirely.
//! Nothing survives between two opens.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("image {index} selected but only {len} images are rendered")]
    OutOfRange { index: usize, len: usize },
}

/// Rendered images of one gallery, in display order, and the clicked one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxSelection {
    items: Vec<String>,
    index: usize,
}

impl LightboxSelection {
    pub fn new(items: Vec<String>, index: usize) -> Result<Self, SelectionError> {
        if index >= items.len() {
            return Err(SelectionError::OutOfRange {
                index,
                len: items.len(),
            });
        }
        Ok(Self { items, index })
    }

    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowRight,
    ArrowLeft,
    Other,
}

/// User interactions the modal reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    CloseButton,
    NextButton,
    PrevButton,
    /// Click on the dimmed area around the image
    Backdrop,
    /// Click on the displayed image itself
    Image,
    Key(Key),
}

#[derive(Debug, Default)]
pub struct Lightbox {
    items: Vec<String>,
    index: usize,
    visible: bool,
}

impl Lightbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, selection: LightboxSelection) {
        self.items = selection.items;
        self.index = selection.index;
        self.visible = true;
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.items.len();
        self.visible = true;
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len();
        self.index = (self.index + len - 1) % len;
        self.visible = true;
    }

    /// Hides the modal. The selection stays until the next open replaces it.
    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn handle(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::CloseButton | Trigger::Backdrop => self.close(),
            Trigger::NextButton => self.next(),
            Trigger::PrevButton => self.previous(),
            Trigger::Image => {}
            Trigger::Key(key) => {
                if !self.visible {
                    return;
                }
                match key {
                    Key::Escape => self.close(),
                    Key::ArrowRight => self.next(),
                    Key::ArrowLeft => self.previous(),
                    Key::Other => {}
                }
            }
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Image on display, if the modal is open.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        if !self.visible {
            return None;
        }
        self.items.get(self.index).map(String::as_str)
    }
}
