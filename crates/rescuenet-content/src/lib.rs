#![forbid(unsafe_code)]

//! Static content for the RescueNet site.
//!
//! The datasets ship inside the binary as JSON (see `data/`) and are parsed
//! once into a [`ContentStore`], which pages receive by reference.
//!
//! ```
//! use rescuenet_content::ContentStore;
//!
//! let store = ContentStore::load().expect("bundled datasets are valid");
//! let featured = store.featured_campaign().expect("one featured campaign");
//! assert_eq!(featured.slug, "turkey-earthquake-relief");
//! ```

pub mod error;
pub mod model;
pub mod store;

pub use error::ContentError;
pub use model::{BlogPost, Campaign, Disaster, DisasterStatus, DisasterType, Severity};
pub use store::{ContentStore, DEFAULT_RECENT_COUNT};
