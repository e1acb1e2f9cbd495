#![forbid(unsafe_code)]

use rescuenet_router::{MetaDocument, MetaTag};
use web_sys::Document;

use super::log_js_error;

/// The live document head.
#[derive(Debug, Clone)]
pub struct BrowserDocument {
    document: Document,
}

impl BrowserDocument {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl MetaDocument for BrowserDocument {
    fn set_title(&mut self, title: &str) {
        self.document.set_title(title);
    }

    fn set_meta_content(&mut self, tag: MetaTag, content: &str) -> bool {
        match self.document.query_selector(tag.selector()) {
            Ok(Some(element)) => match element.set_attribute("content", content) {
                Ok(()) => true,
                Err(err) => {
                    log_js_error("setAttribute", &err);
                    false
                }
            },
            Ok(None) => false,
            Err(err) => {
                log_js_error("querySelector", &err);
                false
            }
        }
    }
}
