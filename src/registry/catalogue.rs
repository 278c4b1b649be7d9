use http::Method;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// A single registered endpoint, for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// Base path of the owning group; empty for top-level leaves.
    pub base_path: String,
    /// Path relative to the base path.
    pub path: String,
    pub method: Method,
    /// Stable textual identity of the registered handler. Human-suitable, not
    /// guaranteed unique across closures sharing code.
    pub handler_name: String,
}

/// One catalogue entry: a group heading or a top-level leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEntry {
    Group {
        base_path: String,
        children: Vec<RouteInfo>,
    },
    Route(RouteInfo),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// A leaf was registered under a base path no group was created for.
    /// Registration is rejected and the catalogue is left unchanged.
    #[error("no group registered for base path '{base_path}'")]
    UnknownGroup { base_path: String },
}

/// Append-only catalogue of registered groups and endpoints.
///
/// Owned by the router facade; mutated only during the startup registration
/// phase, and read-only thereafter. Not internally synchronized.
#[derive(Debug, Default)]
pub struct RouteCatalogue {
    entries: Vec<RouteEntry>,
    groups: HashMap<String, usize>,
}

impl RouteCatalogue {
    pub fn new() -> Self {
        RouteCatalogue::default()
    }

    /// Record a group with the given base path.
    ///
    /// Registering the same base path twice is a no-op; later leaves bind to
    /// the one existing group.
    pub fn add_group(&mut self, base_path: &str) {
        if self.groups.contains_key(base_path) {
            debug!(base_path, "group already catalogued");
            return;
        }
        self.groups.insert(base_path.to_string(), self.entries.len());
        self.entries.push(RouteEntry::Group {
            base_path: base_path.to_string(),
            children: Vec::new(),
        });
    }

    /// Record a leaf endpoint.
    ///
    /// A non-empty `base_path` must name a previously added group; the leaf is
    /// appended to that group's children in call order. An empty `base_path`
    /// appends the leaf at the top level.
    pub fn add_route(
        &mut self,
        base_path: &str,
        path: &str,
        handler_name: &str,
        method: Method,
    ) -> Result<(), CatalogueError> {
        let info = RouteInfo {
            base_path: base_path.to_string(),
            path: path.to_string(),
            method,
            handler_name: handler_name.to_string(),
        };

        if base_path.is_empty() {
            self.entries.push(RouteEntry::Route(info));
            return Ok(());
        }

        let index = self
            .groups
            .get(base_path)
            .copied()
            .ok_or_else(|| CatalogueError::UnknownGroup {
                base_path: base_path.to_string(),
            })?;
        match &mut self.entries[index] {
            RouteEntry::Group { children, .. } => children.push(info),
            // The group index only ever points at Group entries.
            RouteEntry::Route(_) => unreachable!("group index points at a leaf entry"),
        }
        Ok(())
    }

    /// All entries, in registration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Number of top-level entries (groups plus top-level leaves).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of catalogued endpoints across all groups.
    pub fn route_count(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                RouteEntry::Group { children, .. } => children.len(),
                RouteEntry::Route(_) => 1,
            })
            .sum()
    }
}
