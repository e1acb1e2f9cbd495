#![forbid(unsafe_code)]

//! Build-time tooling for the RescueNet site.
//!
//! - [`html`]: rewrites render-blocking stylesheet links in the bundled
//!   `index.html` into preload links with a `<noscript>` fallback.
//! - [`config`]: `rescuenet.toml` settings.
//! - [`inspect`]: route listing and content checks for the CLI.

pub mod config;
pub mod error;
pub mod html;
pub mod inspect;

pub use config::{BuildConfig, CONFIG_FILE, HtmlConfig};
pub use error::BuildError;
pub use html::{OptimizeReport, Rewrite, defer_stylesheets, optimize_file};
pub use inspect::{ContentReport, RouteRow, check_content, route_rows};
