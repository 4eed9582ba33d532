// SPDX-License-Identifier: PMPL-1.0-or-later

//! Slide navigation for the generated gallery page.
//!
//! The page lays its photos out in a horizontally scrolling container, one
//! slide per viewport width. [`SlideNavigator`] tracks which slide is current,
//! jumps the container to a requested slide, and follows the user when they
//! scroll or swipe the container directly.
//!
//! The navigator never touches a document. Everything it needs from the host
//! comes through a [`SlideViewport`], which keeps it testable without a browser
//! (see [`StaticViewport`]). The DOM binding lives in `slideshow::web` behind
//! the `web` feature.

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

/// Host surface the navigator drives.
///
/// `slide_width` is queried on every request rather than cached, so a layout
/// change between two events is picked up without a resize hook.
pub trait SlideViewport {
    /// Rendered width of one slide, in pixels.
    fn slide_width(&self) -> f64;

    /// Current horizontal scroll offset of the slide container.
    fn scroll_offset(&self) -> f64;

    /// Jump the container to the given horizontal offset.
    fn set_scroll_offset(&mut self, offset: f64);
}

impl<V: SlideViewport + ?Sized> SlideViewport for &mut V {
    fn slide_width(&self) -> f64 {
        (**self).slide_width()
    }

    fn scroll_offset(&self) -> f64 {
        (**self).scroll_offset()
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        (**self).set_scroll_offset(offset)
    }
}

/// Host events the adapter layer forwards to the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideEvent {
    NextClicked,
    PreviousClicked,
    ScrollChanged,
}

/// Tracks the current slide of a horizontally scrolling container.
///
/// Invariant: `current_index < slide_count`, or `current_index == 0` when
/// there are no slides.
#[derive(Debug)]
pub struct SlideNavigator<V: SlideViewport> {
    viewport: V,
    slide_count: usize,
    current_index: usize,
}

impl<V: SlideViewport> SlideNavigator<V> {
    /// Create a navigator positioned on the first slide.
    ///
    /// The viewport is not moved; the page is assumed to start at offset 0.
    pub fn new(viewport: V, slide_count: usize) -> Self {
        Self {
            viewport,
            slide_count,
            current_index: 0,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Jump to slide `n` and make it current.
    ///
    /// Requests outside `0..slide_count` are ignored.
    pub fn go_to_slide(&mut self, n: usize) {
        if n >= self.slide_count {
            return;
        }
        let offset = n as f64 * self.viewport.slide_width();
        self.viewport.set_scroll_offset(offset);
        self.current_index = n;
    }

    /// Advance one slide; saturates on the last slide.
    pub fn next(&mut self) {
        if self.current_index + 1 < self.slide_count {
            self.go_to_slide(self.current_index + 1);
        }
    }

    /// Go back one slide; saturates on the first slide.
    pub fn previous(&mut self) {
        if self.current_index > 0 {
            self.go_to_slide(self.current_index - 1);
        }
    }

    /// Reconcile the current slide with the observed scroll offset.
    ///
    /// Picks the nearest slide so momentum scrolling that stops a few pixels
    /// off a boundary still lands on the right index. Overscroll past either
    /// edge is clamped into range. A zero or non-finite slide width skips the
    /// reconciliation entirely.
    pub fn on_scroll(&mut self) {
        if self.slide_count == 0 {
            return;
        }
        let width = self.viewport.slide_width();
        if !width.is_finite() || width <= 0.0 {
            return;
        }
        let offset = self.viewport.scroll_offset();
        if !offset.is_finite() {
            return;
        }

        let last = (self.slide_count - 1) as f64;
        let observed = (offset / width).round().clamp(0.0, last) as usize;
        if observed != self.current_index {
            self.current_index = observed;
        }
    }

    /// Handler for the page's next button.
    pub fn on_next_clicked(&mut self) {
        self.next();
    }

    /// Handler for the page's previous button.
    pub fn on_previous_clicked(&mut self) {
        self.previous();
    }

    /// Handler for scroll events on the slide container.
    pub fn on_scroll_changed(&mut self) {
        self.on_scroll();
    }

    /// Dispatch a host event to its handler.
    pub fn handle(&mut self, event: SlideEvent) {
        match event {
            SlideEvent::NextClicked => self.on_next_clicked(),
            SlideEvent::PreviousClicked => self.on_previous_clicked(),
            SlideEvent::ScrollChanged => self.on_scroll_changed(),
        }
    }
}

/// In-memory viewport with a settable slide width.
///
/// Stands in for the browser in tests and in headless previews.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StaticViewport {
    pub slide_width: f64,
    pub scroll_offset: f64,
}

impl StaticViewport {
    pub fn new(slide_width: f64) -> Self {
        Self {
            slide_width,
            scroll_offset: 0.0,
        }
    }

    /// Simulate the user scrolling the container directly.
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }
}

impl SlideViewport for StaticViewport {
    fn slide_width(&self) -> f64 {
        self.slide_width
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }
}
