#![forbid(unsafe_code)]

//! Navigation driver.
//!
//! Every navigation resolves the path, computes metadata for the matched
//! route and writes it to the document before the [`Navigation`] is returned.
//! Unknown paths still complete; they carry `route: None` and the default
//! metadata.
//!
//! # Invariants
//!
//! 1. After `navigate` or a successful `back`, the document head reflects
//!    [`Router::current`].
//! 2. `history` never contains the current location.
//! 3. `history` holds at most the configured limit, dropping the oldest
//!    entries first.

use serde::Serialize;

use crate::document::MetaDocument;
use crate::meta::{PageMetadata, apply_metadata, compute_metadata};
use crate::table::{Page, Params, RouteTable};

/// Scroll position a completed navigation asks the view to restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollPosition {
    Top,
}

/// Outcome of one navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub path: String,
    pub route: Option<Page>,
    pub params: Params,
    pub metadata: PageMetadata,
    pub scroll: ScrollPosition,
}

/// Route table plus the document it keeps in sync.
#[derive(Debug)]
pub struct Router<D: MetaDocument> {
    table: RouteTable,
    document: D,
    current: Option<Navigation>,
    history: Vec<String>,
    history_limit: usize,
}

/// Default number of previous locations kept for [`Router::back`].
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

impl<D: MetaDocument> Router<D> {
    /// Router over the standard site routes.
    pub fn new(document: D) -> Self {
        Self::with_table(RouteTable::standard(), document)
    }

    pub fn with_table(table: RouteTable, document: D) -> Self {
        Self {
            table,
            document,
            current: None,
            history: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Keep at most `limit` previous locations. `0` disables [`back`](Self::back),
    /// for hosts that own the history themselves.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.trim_history();
        self
    }

    fn trim_history(&mut self) {
        let excess = self.history.len().saturating_sub(self.history_limit);
        self.history.drain(..excess);
    }

    /// Navigate to `path`, pushing the current location onto the history.
    pub fn navigate(&mut self, path: &str) -> Navigation {
        let nav = self.resolve(path);
        if let Some(previous) = self.current.replace(nav.clone()) {
            self.history.push(previous.path);
            self.trim_history();
        }
        nav
    }

    /// Return to the previous location. `None` when there is no history.
    pub fn back(&mut self) -> Option<Navigation> {
        let path = self.history.pop()?;
        let nav = self.resolve(&path);
        self.current = Some(nav.clone());
        Some(nav)
    }

    fn resolve(&mut self, path: &str) -> Navigation {
        let (route, params, metadata) = match self.table.resolve(path) {
            Some(m) => (
                Some(m.route.page),
                m.params,
                compute_metadata(m.route.meta.as_ref()),
            ),
            None => (None, Params::default(), compute_metadata(None)),
        };
        apply_metadata(&mut self.document, &metadata);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "rescuenet::router",
            path,
            route = route.map(Page::name),
            "navigation completed"
        );

        Navigation {
            path: path.to_string(),
            route,
            params,
            metadata,
            scroll: ScrollPosition::Top,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Navigation> {
        self.current.as_ref()
    }

    /// Previous locations, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }
}
