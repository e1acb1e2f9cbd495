#![forbid(unsafe_code)]

//! Browser host for the RescueNet runtime.
//!
//! On `wasm32` this crate implements the runtime's host traits over
//! `web-sys` and exports `SiteApp` to JavaScript. The pieces that do not
//! need a browser ([`page`], [`stats`]) build on every target so they can be
//! tested natively.
//!
//! | Host trait | Browser type |
//! |------------|--------------|
//! | `ViewportHost` | `BrowserViewport` (`querySelectorAll` + `IntersectionObserver`) |
//! | `RevealElement` | `DomElement` (`classList`) |
//! | `FrameScheduler` | `BrowserFrames` (`performance.now` + `requestAnimationFrame`) |
//! | `MetaDocument` | `BrowserDocument` (`document.title` + `<meta content>`) |

pub mod page;
pub mod stats;

pub use page::{PageScope, RenderText};

#[cfg(target_arch = "wasm32")]
mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserDocument, BrowserFrames, BrowserViewport, DomElement, DomObserver, SiteApp};
