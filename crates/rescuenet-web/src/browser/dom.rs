#![forbid(unsafe_code)]

//! Element queries and `IntersectionObserver` over `web-sys`.

use rescuenet_runtime::{
    IntersectionCallback, IntersectionObserver, IntersectionRecord, ObserverOptions,
    RevealElement, ViewportHost,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, IntersectionObserverEntry, IntersectionObserverInit, Window};

use super::log_js_error;

/// A DOM element. Equality is JavaScript identity.
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement(Element);

impl DomElement {
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self(element)
    }

    #[must_use]
    pub fn element(&self) -> &Element {
        &self.0
    }
}

impl RevealElement for DomElement {
    fn add_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().add_1(class) {
            log_js_error("classList.add", &err);
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().remove_1(class) {
            log_js_error("classList.remove", &err);
        }
    }
}

type EntriesClosure = Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>;

/// A live `IntersectionObserver`. Dropping it disconnects the observer and
/// releases the JavaScript callback.
pub struct DomObserver {
    observer: web_sys::IntersectionObserver,
    _callback: EntriesClosure,
}

impl std::fmt::Debug for DomObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomObserver").finish_non_exhaustive()
    }
}

impl IntersectionObserver for DomObserver {
    type Element = DomElement;

    fn observe(&self, element: &DomElement) {
        self.observer.observe(&element.0);
    }

    fn unobserve(&self, element: &DomElement) {
        self.observer.unobserve(&element.0);
    }

    fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for DomObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// The page document and its viewport.
#[derive(Debug, Clone)]
pub struct BrowserViewport {
    window: Window,
    document: Document,
}

impl BrowserViewport {
    #[must_use]
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    /// Viewport of the global `window`, if there is one.
    #[must_use]
    pub fn global() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self::new(window, document))
    }

    fn has_intersection_observer(&self) -> bool {
        js_sys::Reflect::has(&self.window, &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false)
    }
}

impl ViewportHost for BrowserViewport {
    type Element = DomElement;
    type Observer = DomObserver;

    fn query_selector_all(&self, selector: &str) -> Vec<DomElement> {
        // An invalid selector throws a SyntaxError; treat it as no match.
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                log_js_error("querySelectorAll", &err);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(DomElement)
            .collect()
    }

    fn create_observer(
        &self,
        options: &ObserverOptions,
        callback: IntersectionCallback<DomElement>,
    ) -> Option<DomObserver> {
        if !self.has_intersection_observer() {
            return None;
        }

        let closure: EntriesClosure = Closure::new(
            move |entries: js_sys::Array, _observer: web_sys::IntersectionObserver| {
                let records: Vec<IntersectionRecord<DomElement>> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| {
                        IntersectionRecord::new(DomElement(entry.target()), entry.is_intersecting())
                    })
                    .collect();
                callback(&records);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        let observer = match web_sys::IntersectionObserver::new_with_options(
            closure.as_ref().unchecked_ref(),
            &init,
        ) {
            Ok(observer) => observer,
            Err(err) => {
                log_js_error("new IntersectionObserver", &err);
                return None;
            }
        };
        Some(DomObserver {
            observer,
            _callback: closure,
        })
    }
}
