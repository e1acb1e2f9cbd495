#![forbid(unsafe_code)]

//! Client-side routing for the RescueNet site.
//!
//! - [`RouteTable`]: ordered `pattern → page` table with `:param` segments.
//! - [`compute_metadata`]: pure mapping from a route's meta to the six
//!   document fields (title, description, Open Graph, Twitter).
//! - [`apply_metadata`]: the single step that writes those fields into a
//!   [`MetaDocument`].
//! - [`Router`]: ties the three together on every navigation.

pub mod document;
pub mod meta;
pub mod router;
pub mod table;

pub use document::{HeadSnapshot, MetaDocument, MetaTag};
pub use meta::{DEFAULT_DESCRIPTION, DEFAULT_TITLE, PageMetadata, apply_metadata, compute_metadata};
pub use router::{DEFAULT_HISTORY_LIMIT, Navigation, Router, ScrollPosition};
pub use table::{Page, Params, RouteDef, RouteMatch, RouteMeta, RoutePattern, RouteTable};
