// SPDX-License-Identifier: PMPL-1.0-or-later

//! Browser binding for the gallery page (`--features web`, wasm32 only).
//!
//! `mount()` is called once by the page after the module is initialised. It
//! picks the page locale, hides the elements of the other locale, and wires
//! the slide container and its buttons to a [`SlideNavigator`].
//!
//! Expected markup (see the default theme):
//!
//! - `<body data-primary="en" data-secondary="de">`
//! - `#slides`: the horizontally scrolling container; its first child is the
//!   reference slide used for measuring
//! - `#previous`, `#next`, `#language-toggle`: buttons
//! - `[data-locale]`: elements shown only for their locale

use super::{SlideNavigator, SlideViewport};
use crate::i18n::{visible_for, Lang, LocalePair};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

macro_rules! console_log {
    ($($t:tt)*) => {
        web_sys::console::log_1(&format!($($t)*).into())
    }
}

macro_rules! console_warn {
    ($($t:tt)*) => {
        web_sys::console::warn_1(&format!($($t)*).into())
    }
}

/// Slide container and reference slide of the rendered page
pub struct DomViewport {
    container: Element,
    reference: Element,
}

impl DomViewport {
    pub fn new(container: Element, reference: Element) -> Self {
        Self {
            container,
            reference,
        }
    }
}

impl SlideViewport for DomViewport {
    fn slide_width(&self) -> f64 {
        self.reference.get_bounding_client_rect().width()
    }

    fn scroll_offset(&self) -> f64 {
        f64::from(self.container.scroll_left())
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        // scroll-behavior on the container decides whether this animates
        self.container.scroll_to_with_x_and_y(offset, 0.0);
    }
}

/// Entry point called by the page: `init().then(() => mount())`
#[wasm_bindgen]
pub fn mount() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    mount_locale_toggle(&document)?;

    let Some(container) = document.get_element_by_id("slides") else {
        console_log!("phogg: no #slides container, slideshow disabled");
        return Ok(());
    };
    let Some(reference) = container.first_element_child() else {
        console_log!("phogg: empty gallery, slideshow disabled");
        return Ok(());
    };
    let slide_count = container.child_element_count() as usize;

    let navigator = Rc::new(RefCell::new(SlideNavigator::new(
        DomViewport::new(container, reference),
        slide_count,
    )));

    on_event(&document, "previous", "click", {
        let navigator = navigator.clone();
        move || navigator.borrow_mut().on_previous_clicked()
    })?;
    on_event(&document, "next", "click", {
        let navigator = navigator.clone();
        move || navigator.borrow_mut().on_next_clicked()
    })?;
    on_event(&document, "slides", "scroll", {
        let navigator = navigator.clone();
        move || navigator.borrow_mut().on_scroll_changed()
    })?;

    console_log!("phogg: slideshow mounted with {} slides", slide_count);
    Ok(())
}

/// Pick the initial locale and bind the language toggle
fn mount_locale_toggle(document: &Document) -> Result<(), JsValue> {
    let Some(locales) = page_locales(document) else {
        console_warn!("phogg: body carries no data-primary/data-secondary, locale toggle disabled");
        return Ok(());
    };

    let preferred = browser_locales();
    let active = Rc::new(Cell::new(locales.select(preferred.as_slice())));
    apply_locale(document, active.get())?;

    let toggle_document = document.clone();
    on_event(document, "language-toggle", "click", move || {
        let next = locales.toggle(active.get());
        active.set(next);
        if let Err(err) = apply_locale(&toggle_document, next) {
            console_warn!("phogg: switching locale failed: {:?}", err);
        }
    })
}

fn page_locales(document: &Document) -> Option<LocalePair> {
    let dataset = document.body()?.dataset();
    let primary = Lang::from_code(&dataset.get("primary")?)?;
    let secondary = Lang::from_code(&dataset.get("secondary")?)?;
    Some(LocalePair::new(primary, secondary))
}

/// `navigator.languages`, or `navigator.language` when the list is empty
fn browser_locales() -> Vec<String> {
    let Some(navigator) = web_sys::window().map(|window| window.navigator()) else {
        return Vec::new();
    };
    let mut locales: Vec<String> = navigator
        .languages()
        .iter()
        .filter_map(|value| value.as_string())
        .collect();
    if locales.is_empty() {
        locales.extend(navigator.language());
    }
    locales
}

/// Show the elements of `active`, hide those of any other locale
fn apply_locale(document: &Document, active: Lang) -> Result<(), JsValue> {
    if let Some(root) = document.document_element() {
        root.set_attribute("lang", active.code())?;
    }

    let elements = document.query_selector_all("[data-locale]")?;
    for index in 0..elements.length() {
        let Some(element) = elements
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        let tag = element.get_attribute("data-locale");
        element.set_hidden(!visible_for(tag.as_deref(), active));
    }
    Ok(())
}

/// Attach `handler` to the `event` of element `#id`; a missing element is
/// skipped. The closure lives for the rest of the page.
fn on_event<F>(document: &Document, id: &str, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let Some(target) = document.get_element_by_id(id) else {
        console_warn!("phogg: no #{} element, {} handler not bound", id, event);
        return Ok(());
    };
    let closure: Closure<dyn FnMut()> = Closure::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
