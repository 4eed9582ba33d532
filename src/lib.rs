// SPDX-License-Identifier: PMPL-1.0-or-later

//! phogg: photo gallery generator
//!
//! Turns a directory of JPEG photos into a static single-page gallery:
//!
//! 1. **Gallery**: finds the photos, reads EXIF data and description files,
//!    and writes resized copies for every target resolution (in parallel).
//! 2. **Site**: renders a Jinja theme with the site configuration and copies
//!    the theme's static assets next to the page.
//! 3. **Slideshow**: the page's navigation logic. The navigator itself is
//!    plain Rust; with the `web` feature it is bound to the DOM and shipped
//!    as a `wasm-pack` bundle (`phogg --web-bundle pkg/`).

pub mod config;
pub mod gallery;
pub mod i18n;
pub mod report;
pub mod site;
pub mod slideshow;
pub mod types;
