#![forbid(unsafe_code)]

//! The object JavaScript drives: one per page load.

use std::rc::Rc;

use rescuenet_router::Router;
use rescuenet_runtime::ViewportHost;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::dom::{BrowserViewport, DomElement};
use super::frames::BrowserFrames;
use super::head::BrowserDocument;
use crate::page::{PageScope, RenderText};
use crate::stats::{COUNT_ATTR, parse_count_target};

/// Site runtime exported to JavaScript.
///
/// Each `navigate` starts a new page scope: reveals and counters of the
/// previous page are released before the new page registers its own.
///
/// ```js
/// const app = new SiteApp();
/// router.afterEach((to) => {
///   app.navigate(to.fullPath);
///   requestAnimationFrame(() => app.reveal(".animate-on-scroll"));
/// });
/// app.countUp(".stat-number");
/// ```
#[wasm_bindgen]
pub struct SiteApp {
    window: Window,
    viewport: BrowserViewport,
    frames: Rc<BrowserFrames>,
    router: Router<BrowserDocument>,
    page: PageScope<BrowserViewport, Rc<BrowserFrames>>,
}

#[wasm_bindgen]
impl SiteApp {
    /// Bind to the global window and open the first page scope.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SiteApp, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let viewport = BrowserViewport::new(window.clone(), document.clone());
        let frames = Rc::new(BrowserFrames::new(window.clone()));
        let page = PageScope::new(viewport.clone(), Rc::clone(&frames));
        // The browser owns the back/forward stack.
        let router = Router::new(BrowserDocument::new(document)).with_history_limit(0);

        Ok(Self {
            window,
            viewport,
            frames,
            router,
            page,
        })
    }

    /// Release the current page, update the document head for `path` and
    /// scroll to the top. Returns the navigation as JSON.
    pub fn navigate(&mut self, path: &str) -> Result<String, JsValue> {
        self.teardown();
        let nav = self.router.navigate(path);
        self.window.scroll_to_with_x_and_y(0.0, 0.0);
        serde_json::to_string(&nav).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Observe every element matching `selector` for reveal. Returns the
    /// number of newly observed elements.
    pub fn reveal(&mut self, selector: &str) -> usize {
        self.page.reveal(selector)
    }

    /// Start a count-up on every element matching `selector` that carries a
    /// valid `data-count-to` target and is not already counting. Returns the
    /// number of counters started.
    #[wasm_bindgen(js_name = countUp)]
    pub fn count_up(&mut self, selector: &str) -> usize {
        let targets: Vec<(DomElement, f64)> = self
            .viewport
            .query_selector_all(selector)
            .into_iter()
            .filter_map(|element| {
                let target = element
                    .element()
                    .get_attribute(COUNT_ATTR)
                    .and_then(|raw| parse_count_target(&raw))?;
                Some((element, target))
            })
            .collect();
        let render: RenderText<DomElement> = Rc::new(|element: &DomElement, text: &str| {
            element.element().set_text_content(Some(text));
        });
        self.page.count_up(targets, render)
    }

    /// Release the current page and open an empty one. Later `reveal` and
    /// `countUp` calls register with the new page.
    pub fn teardown(&mut self) {
        self.page = PageScope::new(self.viewport.clone(), Rc::clone(&self.frames));
    }
}
